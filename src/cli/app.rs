//! Main app runner for lesson playback
//!
//! Drives the lesson runner and the step views from a line-oriented prompt
//! loop. All stdin reads go through one reader; exit confirmation happens
//! at the prompt layer before the runner is asked to abandon the run.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::application::media::StepMedia;
use crate::application::ports::{
    AudioPlayer, AudioSession, CompletionSink, ConfigStore, ExitSink, LessonSource, VoiceRecorder,
};
use crate::application::runner::{LessonRunner, RunnerState};
use crate::application::steps::{
    AudioStepView, OptionFeedback, QuestionStepView, RepeatPhase, RepeatStepView, RevealStepView,
    RoleplayPhase, RoleplayStepView, StepEvent,
};
use crate::domain::config::AppConfig;
use crate::domain::lesson::{
    AttemptSummary, AudioStep, Confidence, Lesson, QuestionStep, RepeatStep, RevealStep,
    RoleplayStep, Step,
};
use crate::infrastructure::{
    CpalVoiceRecorder, DesktopAudioSession, FixtureLessonSource, NoopAudioPlayer,
    NoopVoiceRecorder, RodioPlayer, XdgConfigStore,
};

use super::args::PlayOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Merge the config file under the CLI-provided values
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        eprintln!("Warning: ignoring config file: {}", e);
        AppConfig::empty()
    });
    file_config.merge(cli_config)
}

/// Single-owner stdin line reader
struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next trimmed line; None once stdin closes
    async fn line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(line.trim().to_string()),
            _ => None,
        }
    }
}

/// Completion sink that keeps the summary for the end-of-run report and
/// optionally writes it to a JSON file
struct TerminalCompletionSink {
    out: Option<PathBuf>,
    summary: Arc<StdMutex<Option<AttemptSummary>>>,
}

#[async_trait]
impl CompletionSink for TerminalCompletionSink {
    async fn lesson_completed(&self, summary: &AttemptSummary) {
        if let Ok(mut slot) = self.summary.lock() {
            *slot = Some(summary.clone());
        }

        let Some(path) = &self.out else {
            return;
        };
        match serde_json::to_string_pretty(summary) {
            Ok(json) => {
                if let Err(e) = tokio::fs::write(path, json).await {
                    eprintln!("Warning: could not write attempt summary: {}", e);
                }
            }
            Err(e) => eprintln!("Warning: could not serialize attempt summary: {}", e),
        }
    }
}

/// The prompt layer owns stdin, so the user has already confirmed by the
/// time the runner consults this sink.
struct PreconfirmedExit;

#[async_trait]
impl ExitSink for PreconfirmedExit {
    async fn confirm_exit(&self) -> bool {
        true
    }
}

/// How a step loop ended
enum StepFlow {
    /// The step advanced the runner, or the run was abandoned
    Continue,
    /// stdin closed mid-step
    Eof,
}

/// How a playback wait ended
enum PlaybackWait {
    Finished,
    Stopped,
    Eof,
}

type Runner = LessonRunner<TerminalCompletionSink, PreconfirmedExit>;

/// Run the interactive lesson player
pub async fn run_play(options: PlayOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let lesson = match resolve_lesson(&options).await {
        Ok(lesson) => lesson,
        Err(message) => {
            presenter.error(&message);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let player: Arc<dyn AudioPlayer> = if options.mute {
        Arc::new(NoopAudioPlayer::new())
    } else {
        Arc::new(RodioPlayer::new())
    };
    let recorder: Arc<dyn VoiceRecorder> = if options.mute {
        Arc::new(NoopVoiceRecorder::new())
    } else {
        Arc::new(CpalVoiceRecorder::new(recordings_dir()))
    };
    let session: Arc<dyn AudioSession> = Arc::new(DesktopAudioSession::new());

    let summary_slot: Arc<StdMutex<Option<AttemptSummary>>> = Arc::new(StdMutex::new(None));
    let sink = TerminalCompletionSink {
        out: options.out.clone(),
        summary: Arc::clone(&summary_slot),
    };

    let mut runner = match LessonRunner::new(lesson, sink, PreconfirmedExit) {
        Ok(runner) => runner,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    presenter.info(&format!(
        "{} · {} steps · ~{} min",
        runner.lesson().title,
        runner.total_steps(),
        runner.lesson().estimated_minutes
    ));

    let mut input = Input::new();

    while runner.state() == RunnerState::InProgress {
        let Some(step) = runner.current_step().cloned() else {
            break;
        };
        let media = StepMedia::new(
            Arc::clone(&player),
            Arc::clone(&recorder),
            Arc::clone(&session),
        );

        let flow = match step {
            Step::Audio(s) => {
                play_audio_step(&mut runner, s, media, &mut presenter, &mut input, &options).await
            }
            Step::Question(s) => {
                play_question_step(&mut runner, s, media, &mut presenter, &mut input).await
            }
            Step::Reveal(s) => {
                let was_correct = runner.last_question_correct();
                play_reveal_step(&mut runner, s, media, was_correct, &mut presenter, &mut input)
                    .await
            }
            Step::Repeat(s) => {
                play_repeat_step(&mut runner, s, media, &mut presenter, &mut input).await
            }
            Step::Roleplay(s) => {
                play_roleplay_step(&mut runner, s, media, &mut presenter, &mut input).await
            }
        };

        if let StepFlow::Eof = flow {
            presenter.warning("Input closed; leaving the lesson.");
            return ExitCode::from(EXIT_ERROR);
        }
    }

    match runner.state() {
        RunnerState::Complete => {
            let summary = summary_slot.lock().ok().and_then(|slot| slot.clone());
            if let Some(summary) = summary {
                presenter.success(&format!(
                    "Lesson complete — score {} ({} responses)",
                    summary.score,
                    summary.responses.len()
                ));
                if let Some(path) = &options.out {
                    presenter.info(&format!("Attempt summary written to {}", path.display()));
                }
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        RunnerState::Abandoned => {
            presenter.info("Lesson abandoned; progress discarded.");
            ExitCode::from(EXIT_SUCCESS)
        }
        RunnerState::InProgress => ExitCode::from(EXIT_ERROR),
    }
}

/// List lessons in the lessons directory
pub async fn run_list(lessons_dir: &str) -> ExitCode {
    let presenter = Presenter::new();
    let source = FixtureLessonSource::new(lessons_dir);

    match source.list().await {
        Ok(lessons) if lessons.is_empty() => {
            presenter.info(&format!("No lessons found in {}", lessons_dir));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(lessons) => {
            for lesson in lessons {
                println!(
                    "{:>4}  {:<8} {} ({} steps, ~{} min)",
                    lesson.id,
                    lesson.lesson_type.to_string(),
                    lesson.title,
                    lesson.step_count(),
                    lesson.estimated_minutes
                );
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&format!("Could not list lessons in {}: {}", lessons_dir, e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// A path plays directly; anything else must be a lesson id
async fn resolve_lesson(options: &PlayOptions) -> Result<Lesson, String> {
    let path = Path::new(&options.lesson);
    if path.is_file() {
        return FixtureLessonSource::load_file(path)
            .await
            .map_err(|e| e.to_string());
    }

    match options.lesson.parse::<u64>() {
        Ok(id) => FixtureLessonSource::new(&options.lessons_dir)
            .lesson(id)
            .await
            .map_err(|e| e.to_string()),
        Err(_) => Err(format!("Lesson not found: {}", options.lesson)),
    }
}

fn recordings_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("hearsay").join("recordings"))
        .unwrap_or_else(|| std::env::temp_dir().join("hearsay-recordings"))
}

/// Wait until playback finishes naturally or the user presses Enter
async fn wait_for_playback<F>(
    input: &mut Input,
    presenter: &mut Presenter,
    finished: F,
) -> PlaybackWait
where
    F: Fn() -> bool,
{
    presenter.start_spinner("Playing... press Enter to stop");
    let result = loop {
        if finished() {
            break PlaybackWait::Finished;
        }
        tokio::select! {
            line = input.lines.next_line() => {
                match line {
                    Ok(Some(_)) => break PlaybackWait::Stopped,
                    _ => break PlaybackWait::Eof,
                }
            }
            _ = tokio::time::sleep(std::time::Duration::from_millis(100)) => {}
        }
    };
    presenter.stop_spinner();
    result
}

/// Prompt for exit confirmation, then ask the runner to abandon.
/// Some(true) = abandoned, Some(false) = declined, None = EOF.
async fn confirm_quit(runner: &mut Runner, presenter: &Presenter, input: &mut Input) -> Option<bool> {
    presenter.warning("Leave the lesson? Progress will be lost.");
    presenter.prompt("y/N");
    let line = input.line().await?;
    if line.eq_ignore_ascii_case("y") {
        Some(runner.request_exit().await)
    } else {
        Some(false)
    }
}

async fn play_audio_step(
    runner: &mut Runner,
    step: AudioStep,
    media: StepMedia,
    presenter: &mut Presenter,
    input: &mut Input,
    options: &PlayOptions,
) -> StepFlow {
    let mut view = AudioStepView::new(step, media);
    presenter.heading(&view.step().title);
    if !view.step().description.is_empty() {
        presenter.output(&view.step().description);
    }

    let mut autoplay_pending = options.autoplay;
    loop {
        if autoplay_pending {
            autoplay_pending = false;
            match start_and_wait_audio(&mut view, presenter, input).await {
                PlaybackWait::Eof => {
                    view.release_media().await;
                    return StepFlow::Eof;
                }
                _ => continue,
            }
        }

        presenter.dim("p play · c continue · q quit");
        presenter.prompt("p/c/q");
        let Some(command) = input.line().await else {
            view.release_media().await;
            return StepFlow::Eof;
        };

        match command.as_str() {
            "p" | "" => {
                if let PlaybackWait::Eof = start_and_wait_audio(&mut view, presenter, input).await {
                    view.release_media().await;
                    return StepFlow::Eof;
                }
            }
            "c" => {
                if !view.can_continue() {
                    presenter.warning("Listen to the audio first");
                    continue;
                }
                match view.finish().await {
                    Ok(event) => {
                        feed_runner(runner, event, presenter).await;
                        return StepFlow::Continue;
                    }
                    Err(e) => presenter.warning(&e.to_string()),
                }
            }
            "q" => match confirm_quit(runner, presenter, input).await {
                None => {
                    view.release_media().await;
                    return StepFlow::Eof;
                }
                Some(true) => {
                    view.release_media().await;
                    return StepFlow::Continue;
                }
                Some(false) => {}
            },
            _ => presenter.warning("Unknown command"),
        }
    }
}

/// Start the audio step's clip and wait it out
async fn start_and_wait_audio(
    view: &mut AudioStepView,
    presenter: &mut Presenter,
    input: &mut Input,
) -> PlaybackWait {
    view.play().await;
    if let Some(err) = view.error() {
        presenter.warning(err);
        presenter.info("You can continue anyway.");
        return PlaybackWait::Finished;
    }

    let wait = wait_for_playback(input, presenter, || view.prompt_finished()).await;
    match wait {
        PlaybackWait::Finished => view.playback_finished(),
        PlaybackWait::Stopped => view.stop().await,
        PlaybackWait::Eof => {}
    }
    wait
}

async fn play_question_step(
    runner: &mut Runner,
    step: QuestionStep,
    media: StepMedia,
    presenter: &mut Presenter,
    input: &mut Input,
) -> StepFlow {
    let mut view = QuestionStepView::new(step, media);
    presenter.heading(&view.step().question);
    for (i, option) in view.step().options.iter().enumerate() {
        presenter.output(&format!("  {}. {}", i + 1, option));
    }

    loop {
        if view.explanation_visible() {
            presenter.dim("c continue · q quit");
            presenter.prompt("c/q");
        } else {
            presenter.dim("1-9 select · s submit · p replay · q quit");
            presenter.prompt("#/s/p/q");
        }

        let Some(command) = input.line().await else {
            view.release_media().await;
            return StepFlow::Eof;
        };

        if let Ok(number) = command.parse::<usize>() {
            if number == 0 {
                presenter.warning("Options start at 1");
                continue;
            }
            match view.select(number - 1) {
                Ok(()) => presenter.info(&format!("Selected {}", number)),
                Err(e) => presenter.warning(&e.to_string()),
            }
            continue;
        }

        match command.as_str() {
            "s" => match view.submit() {
                Ok(event) => {
                    feed_runner(runner, event, presenter).await;
                    render_question_feedback(&view, presenter);
                }
                Err(e) => presenter.warning(&e.to_string()),
            },
            "p" => {
                view.replay_audio().await;
                if let Some(err) = view.error() {
                    presenter.warning(err);
                }
            }
            "c" => match view.acknowledge().await {
                Ok(event) => {
                    feed_runner(runner, event, presenter).await;
                    return StepFlow::Continue;
                }
                Err(_) => presenter.warning("Submit an answer first"),
            },
            "q" => match confirm_quit(runner, presenter, input).await {
                None => {
                    view.release_media().await;
                    return StepFlow::Eof;
                }
                Some(true) => {
                    view.release_media().await;
                    return StepFlow::Continue;
                }
                Some(false) => {}
            },
            _ => presenter.warning("Unknown command"),
        }
    }
}

fn render_question_feedback(view: &QuestionStepView, presenter: &Presenter) {
    println!();
    for (i, option) in view.step().options.iter().enumerate() {
        let line = match view.option_feedback(i) {
            OptionFeedback::Correct => format!("  {} {}", "✓".green(), option.as_str().green()),
            OptionFeedback::IncorrectSelection => {
                format!("  {} {}", "✗".red(), option.as_str().red())
            }
            OptionFeedback::Plain => format!("    {}", option),
        };
        presenter.output(&line);
    }
    presenter.output(&view.step().explanation);
}

async fn play_reveal_step(
    runner: &mut Runner,
    step: RevealStep,
    media: StepMedia,
    was_correct: bool,
    presenter: &mut Presenter,
    input: &mut Input,
) -> StepFlow {
    let mut view = RevealStepView::new(step, media, was_correct);

    if view.was_correct() {
        presenter.heading(&format!("{}", "Correct!".green()));
    } else {
        presenter.heading(&format!("{}", "Not quite".yellow()));
    }
    presenter.output(&format!("Answer: {}", view.step().correct_answer));
    presenter.output("");
    presenter.output(&view.step().transcript);
    for phrase in view.key_phrases() {
        presenter.dim(&format!("  {} — {}", phrase.term, phrase.translation));
    }
    if let Some(tip) = view.tip() {
        presenter.info(tip);
    }

    loop {
        presenter.dim("t translation · p replay · c continue · q quit");
        presenter.prompt("t/p/c/q");
        let Some(command) = input.line().await else {
            view.release_media().await;
            return StepFlow::Eof;
        };

        match command.as_str() {
            "t" => {
                view.toggle_translation();
                if view.translation_visible() {
                    presenter.output(&view.step().translation);
                }
            }
            "p" => {
                view.replay_audio().await;
                if let Some(err) = view.error() {
                    presenter.warning(err);
                }
            }
            "c" | "" => {
                let event = view.acknowledge().await;
                feed_runner(runner, event, presenter).await;
                return StepFlow::Continue;
            }
            "q" => match confirm_quit(runner, presenter, input).await {
                None => {
                    view.release_media().await;
                    return StepFlow::Eof;
                }
                Some(true) => {
                    view.release_media().await;
                    return StepFlow::Continue;
                }
                Some(false) => {}
            },
            _ => presenter.warning("Unknown command"),
        }
    }
}

async fn play_repeat_step(
    runner: &mut Runner,
    step: RepeatStep,
    media: StepMedia,
    presenter: &mut Presenter,
    input: &mut Input,
) -> StepFlow {
    let mut view = RepeatStepView::new(step, media);
    presenter.heading(&format!("Repeat: {}", view.step().phrase));
    presenter.output(&format!("        {}", view.step().translation));
    if let Some(phonetic) = view.step().phonetic.as_deref() {
        presenter.dim(&format!("        {}", phonetic));
    }
    if let Some(tip) = view.step().tip.as_deref() {
        presenter.info(tip);
    }

    loop {
        match view.phase() {
            RepeatPhase::Listen => {
                presenter.dim("p play · r record · q quit");
                presenter.prompt("p/r/q");
                let Some(command) = input.line().await else {
                    view.release_media().await;
                    return StepFlow::Eof;
                };
                match command.as_str() {
                    "p" | "" => {
                        if view.play_reference().await.is_ok() {
                            if let Some(err) = view.error() {
                                presenter.warning(err);
                            } else {
                                let wait =
                                    wait_for_playback(input, presenter, || view.prompt_finished())
                                        .await;
                                match wait {
                                    PlaybackWait::Finished => view.playback_finished(),
                                    PlaybackWait::Stopped => {}
                                    PlaybackWait::Eof => {
                                        view.release_media().await;
                                        return StepFlow::Eof;
                                    }
                                }
                            }
                        }
                    }
                    "r" => {
                        if let Err(e) = view.start_recording().await {
                            presenter.warning(&e.to_string());
                            continue;
                        }
                        if let Some(err) = view.error() {
                            presenter.warning(err);
                            continue;
                        }
                        // Recording is live; a line stops it
                        presenter.start_spinner("Recording... press Enter to stop");
                        let line = input.line().await;
                        presenter.stop_spinner();
                        if line.is_none() {
                            view.release_media().await;
                            return StepFlow::Eof;
                        }
                        if view.stop_recording().await.is_ok() {
                            if let Some(err) = view.error() {
                                presenter.warning(err);
                            }
                        }
                    }
                    "q" => match confirm_quit(runner, presenter, input).await {
                        None => {
                            view.release_media().await;
                            return StepFlow::Eof;
                        }
                        Some(true) => {
                            view.release_media().await;
                            return StepFlow::Continue;
                        }
                        Some(false) => {}
                    },
                    _ => presenter.warning("Unknown command"),
                }
            }

            RepeatPhase::Recording => {
                // Recording is handled inline above; landing here means the
                // stop never ran. Close it out.
                let _ = view.stop_recording().await;
            }

            RepeatPhase::Review => {
                presenter.dim("p original · m my take · r retry · c rate · q quit");
                presenter.prompt("p/m/r/c/q");
                let Some(command) = input.line().await else {
                    view.release_media().await;
                    return StepFlow::Eof;
                };
                match command.as_str() {
                    "p" => {
                        let _ = view.play_reference().await;
                        if let Some(err) = view.error() {
                            presenter.warning(err);
                        }
                    }
                    "m" => {
                        let _ = view.play_recording().await;
                        if let Some(err) = view.error() {
                            presenter.warning(err);
                        }
                    }
                    "r" => {
                        let _ = view.retry().await;
                        presenter.info("Recording discarded");
                    }
                    "c" | "" => {
                        let _ = view.proceed_to_rating().await;
                    }
                    "q" => match confirm_quit(runner, presenter, input).await {
                        None => {
                            view.release_media().await;
                            return StepFlow::Eof;
                        }
                        Some(true) => {
                            view.release_media().await;
                            return StepFlow::Continue;
                        }
                        Some(false) => {}
                    },
                    _ => presenter.warning("Unknown command"),
                }
            }

            RepeatPhase::Rate => {
                presenter.output("How confident are you?");
                for value in Confidence::MIN..=Confidence::MAX {
                    if let Ok(confidence) = Confidence::new(value) {
                        presenter.dim(&format!("  {} — {}", value, confidence.label()));
                    }
                }
                presenter.prompt("1-5, Enter = 3");
                let Some(command) = input.line().await else {
                    view.release_media().await;
                    return StepFlow::Eof;
                };

                if !command.is_empty() {
                    match command
                        .parse::<u8>()
                        .ok()
                        .and_then(|v| Confidence::new(v).ok())
                    {
                        Some(confidence) => {
                            let _ = view.set_confidence(confidence);
                        }
                        None => {
                            presenter.warning("Enter a rating from 1 to 5");
                            continue;
                        }
                    }
                }

                match view.complete().await {
                    Ok(event) => {
                        feed_runner(runner, event, presenter).await;
                        return StepFlow::Continue;
                    }
                    Err(e) => presenter.warning(&e.to_string()),
                }
            }
        }
    }
}

async fn play_roleplay_step(
    runner: &mut Runner,
    step: RoleplayStep,
    media: StepMedia,
    presenter: &mut Presenter,
    input: &mut Input,
) -> StepFlow {
    let mut view = RoleplayStepView::new(step, media);
    presenter.heading(&view.step().context);
    presenter.output(&format!("Your task: {}", view.step().task));

    loop {
        match view.phase() {
            RoleplayPhase::Listen => {
                presenter.dim("p play prompt · r respond · q quit");
                presenter.prompt("p/r/q");
                let Some(command) = input.line().await else {
                    view.release_media().await;
                    return StepFlow::Eof;
                };
                match command.as_str() {
                    "p" | "" => {
                        if view.play_prompt().await.is_ok() {
                            if let Some(err) = view.error() {
                                presenter.warning(err);
                            } else {
                                let wait =
                                    wait_for_playback(input, presenter, || view.prompt_finished())
                                        .await;
                                match wait {
                                    PlaybackWait::Finished => view.playback_finished(),
                                    PlaybackWait::Stopped => {}
                                    PlaybackWait::Eof => {
                                        view.release_media().await;
                                        return StepFlow::Eof;
                                    }
                                }
                            }
                        }
                    }
                    "r" => {
                        if let Err(e) = view.start_recording().await {
                            presenter.warning(&e.to_string());
                            continue;
                        }
                        if let Some(err) = view.error() {
                            presenter.warning(err);
                            continue;
                        }
                        presenter.start_spinner("Recording... press Enter to stop");
                        let line = input.line().await;
                        presenter.stop_spinner();
                        if line.is_none() {
                            view.release_media().await;
                            return StepFlow::Eof;
                        }
                        if view.stop_recording().await.is_ok() {
                            if let Some(err) = view.error() {
                                presenter.warning(err);
                            }
                        }
                    }
                    "q" => match confirm_quit(runner, presenter, input).await {
                        None => {
                            view.release_media().await;
                            return StepFlow::Eof;
                        }
                        Some(true) => {
                            view.release_media().await;
                            return StepFlow::Continue;
                        }
                        Some(false) => {}
                    },
                    _ => presenter.warning("Unknown command"),
                }
            }

            RoleplayPhase::Responding => {
                let _ = view.stop_recording().await;
            }

            RoleplayPhase::Feedback => {
                if !view.suggested_responses().is_empty() {
                    presenter.output("You could have said:");
                    for suggestion in view.suggested_responses() {
                        presenter.dim(&format!(
                            "  {} — {}",
                            suggestion.phrase, suggestion.translation
                        ));
                    }
                }
                presenter.dim("p prompt · m my take · r retry · c continue · q quit");
                presenter.prompt("p/m/r/c/q");
                let Some(command) = input.line().await else {
                    view.release_media().await;
                    return StepFlow::Eof;
                };
                match command.as_str() {
                    "p" => {
                        let _ = view.play_prompt().await;
                        if let Some(err) = view.error() {
                            presenter.warning(err);
                        }
                    }
                    "m" => {
                        let _ = view.play_recording().await;
                        if let Some(err) = view.error() {
                            presenter.warning(err);
                        }
                    }
                    "r" => {
                        let _ = view.retry().await;
                        presenter.info("Recording discarded");
                    }
                    "c" | "" => match view.complete().await {
                        Ok(event) => {
                            feed_runner(runner, event, presenter).await;
                            return StepFlow::Continue;
                        }
                        Err(e) => presenter.warning(&e.to_string()),
                    },
                    "q" => match confirm_quit(runner, presenter, input).await {
                        None => {
                            view.release_media().await;
                            return StepFlow::Eof;
                        }
                        Some(true) => {
                            view.release_media().await;
                            return StepFlow::Continue;
                        }
                        Some(false) => {}
                    },
                    _ => presenter.warning("Unknown command"),
                }
            }
        }
    }
}

/// Hand an event to the runner; runner rejections here are programming
/// errors in the prompt loop, surfaced but not fatal.
async fn feed_runner(runner: &mut Runner, event: StepEvent, presenter: &Presenter) {
    if let Err(e) = runner.handle(event).await {
        presenter.error(&e.to_string());
    }
}
