//! Lesson runner use case
//!
//! The runner owns the step index and the response list for the whole run;
//! step views own only their transient phase state and report upward as
//! `StepEvent`s. Events are matched exhaustively against the current step's
//! type, so adding a step variant is a compile-time exercise.
//!
//! State machine:
//!   Step(i) -> Step(i+1) on the advancing events
//!   Step(last) -> COMPLETE (score computed, completion sink invoked)
//!   Step(i) -> ABANDONED via request_exit, after sink confirmation

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::application::ports::{CompletionSink, ExitSink};
use crate::application::steps::StepEvent;
use crate::domain::lesson::{AttemptSummary, Lesson, Step, StepResponse};

/// Run lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerState {
    InProgress,
    Complete,
    Abandoned,
}

impl RunnerState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Complete => "complete",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for RunnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an accepted event did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerSignal {
    /// The event was recorded; the current step is still active
    Stay,
    /// Moved to the next step
    Advanced,
    /// The last step completed; the completion sink has been invoked
    Completed,
}

/// Runner errors: events that do not fit the current step or run state
#[derive(Debug, Clone, Error)]
pub enum RunnerError {
    #[error("Lesson has no steps")]
    EmptyLesson,

    #[error("Invalid event {event} for {step_type} step at index {index}")]
    InvalidEvent {
        step_type: &'static str,
        event: &'static str,
        index: usize,
    },

    #[error("An answer must be submitted before continuing")]
    AnswerRequired,

    #[error("This question was already answered")]
    AlreadyAnswered,

    #[error("The lesson is already {0}")]
    Finished(RunnerState),
}

/// Sequences steps, aggregates responses and computes the final score.
pub struct LessonRunner<C, E>
where
    C: CompletionSink,
    E: ExitSink,
{
    lesson: Lesson,
    completion: C,
    exit: E,
    index: usize,
    responses: Vec<StepResponse>,
    last_question_correct: Option<bool>,
    answered_current: bool,
    state: RunnerState,
    started_at: DateTime<Utc>,
}

impl<C, E> LessonRunner<C, E>
where
    C: CompletionSink,
    E: ExitSink,
{
    /// Start a run over a lesson. Empty lessons are rejected.
    pub fn new(lesson: Lesson, completion: C, exit: E) -> Result<Self, RunnerError> {
        if lesson.steps.is_empty() {
            return Err(RunnerError::EmptyLesson);
        }
        Ok(Self {
            lesson,
            completion,
            exit,
            index: 0,
            responses: Vec::new(),
            last_question_correct: None,
            answered_current: false,
            state: RunnerState::InProgress,
            started_at: Utc::now(),
        })
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// The step currently being played, if the run is still going
    pub fn current_step(&self) -> Option<&Step> {
        match self.state {
            RunnerState::InProgress => self.lesson.steps.get(self.index),
            _ => None,
        }
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn total_steps(&self) -> usize {
        self.lesson.step_count()
    }

    /// Responses recorded so far
    pub fn responses(&self) -> &[StepResponse] {
        &self.responses
    }

    /// Correctness of the most recent question, feeding reveal framing.
    /// Defaults to true when no question preceded.
    pub fn last_question_correct(&self) -> bool {
        self.last_question_correct.unwrap_or(true)
    }

    /// Feed one step event into the run
    pub async fn handle(&mut self, event: StepEvent) -> Result<RunnerSignal, RunnerError> {
        if self.state != RunnerState::InProgress {
            return Err(RunnerError::Finished(self.state));
        }

        // Index is valid while in progress: new() rejects empty lessons and
        // advance() flips to Complete instead of walking past the end.
        let step = &self.lesson.steps[self.index];

        match (step, event) {
            (Step::Audio(_), StepEvent::Listened) => self.advance().await,

            (
                Step::Question(q),
                StepEvent::AnswerSubmitted {
                    selected_index,
                    correct,
                },
            ) => {
                if self.answered_current {
                    return Err(RunnerError::AlreadyAnswered);
                }
                debug!(step = %q.id, selected_index, correct, "answer recorded");
                self.responses.push(StepResponse::Question {
                    step_id: q.id.clone(),
                    selected_index,
                    correct,
                    answered_at: Utc::now(),
                });
                self.last_question_correct = Some(correct);
                self.answered_current = true;
                Ok(RunnerSignal::Stay)
            }

            (Step::Question(_), StepEvent::ContinuePressed) => {
                if !self.answered_current {
                    return Err(RunnerError::AnswerRequired);
                }
                self.advance().await
            }

            (Step::Reveal(_), StepEvent::ContinuePressed) => self.advance().await,

            (
                Step::Repeat(r),
                StepEvent::RepeatCompleted {
                    confidence,
                    recording,
                },
            ) => {
                self.responses.push(StepResponse::Repeat {
                    step_id: r.id.clone(),
                    confidence,
                    recording,
                    answered_at: Utc::now(),
                });
                self.advance().await
            }

            (Step::Roleplay(r), StepEvent::RoleplayCompleted { recording }) => {
                self.responses.push(StepResponse::Roleplay {
                    step_id: r.id.clone(),
                    recording,
                    answered_at: Utc::now(),
                });
                self.advance().await
            }

            (step, event) => Err(RunnerError::InvalidEvent {
                step_type: step.type_name(),
                event: event.name(),
                index: self.index,
            }),
        }
    }

    /// Abandon the run. The exit sink confirms first; a declined
    /// confirmation keeps the run alive. Abandoning never appends a
    /// response and never reaches the completion sink.
    pub async fn request_exit(&mut self) -> bool {
        if self.state != RunnerState::InProgress {
            return false;
        }
        if !self.exit.confirm_exit().await {
            return false;
        }
        debug!(step = self.index, "run abandoned");
        self.state = RunnerState::Abandoned;
        true
    }

    async fn advance(&mut self) -> Result<RunnerSignal, RunnerError> {
        self.answered_current = false;

        if self.index + 1 >= self.lesson.step_count() {
            self.state = RunnerState::Complete;
            let summary = AttemptSummary::new(
                self.lesson.id,
                self.responses.clone(),
                self.started_at,
                Utc::now(),
            );
            debug!(score = summary.score.value(), "lesson complete");
            self.completion.lesson_completed(&summary).await;
            return Ok(RunnerSignal::Completed);
        }

        self.index += 1;
        debug!(step = self.index, "advanced");
        Ok(RunnerSignal::Advanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lesson::{
        AudioStep, Confidence, LessonType, QuestionStep, RepeatStep, RevealStep, RoleplayStep,
    };
    use crate::domain::recording::RecordingUri;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex as StdMutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        summary: Arc<StdMutex<Option<AttemptSummary>>>,
    }

    impl RecordingSink {
        fn taken(&self) -> Option<AttemptSummary> {
            self.summary.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionSink for RecordingSink {
        async fn lesson_completed(&self, summary: &AttemptSummary) {
            *self.summary.lock().unwrap() = Some(summary.clone());
        }
    }

    struct ConfirmingExit {
        confirm: bool,
    }

    impl ConfirmingExit {
        fn new(confirm: bool) -> Self {
            Self { confirm }
        }
    }

    #[async_trait]
    impl ExitSink for ConfirmingExit {
        async fn confirm_exit(&self) -> bool {
            self.confirm
        }
    }

    fn audio(id: &str) -> Step {
        Step::Audio(AudioStep {
            id: id.into(),
            audio_url: "/a.mp3".into(),
            title: "Listen".into(),
            description: String::new(),
        })
    }

    fn question(id: &str, correct_index: usize) -> Step {
        Step::Question(QuestionStep {
            id: id.into(),
            question: "?".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_index,
            explanation: "e".into(),
            audio_url: None,
        })
    }

    fn reveal(id: &str) -> Step {
        Step::Reveal(RevealStep {
            id: id.into(),
            correct_answer: "a".into(),
            transcript: "t".into(),
            translation: "t".into(),
            key_phrases: Vec::new(),
            tip: None,
            audio_url: None,
        })
    }

    fn repeat(id: &str) -> Step {
        Step::Repeat(RepeatStep {
            id: id.into(),
            audio_url: "/c.mp3".into(),
            phrase: "p".into(),
            translation: "t".into(),
            phonetic: None,
            tip: None,
        })
    }

    fn roleplay(id: &str) -> Step {
        Step::Roleplay(RoleplayStep {
            id: id.into(),
            audio_url: "/r.mp3".into(),
            context: "c".into(),
            task: "t".into(),
            suggested_responses: Vec::new(),
        })
    }

    fn lesson(steps: Vec<Step>) -> Lesson {
        Lesson {
            id: 1,
            lesson_type: LessonType::Gist,
            title: "t".into(),
            description: String::new(),
            steps,
            estimated_minutes: 5,
        }
    }

    fn runner(steps: Vec<Step>) -> (LessonRunner<RecordingSink, ConfirmingExit>, RecordingSink) {
        let sink = RecordingSink::default();
        let runner =
            LessonRunner::new(lesson(steps), sink.clone(), ConfirmingExit::new(true)).unwrap();
        (runner, sink)
    }

    fn answer(selected_index: usize, correct: bool) -> StepEvent {
        StepEvent::AnswerSubmitted {
            selected_index,
            correct,
        }
    }

    #[tokio::test]
    async fn empty_lesson_is_rejected() {
        let sink = RecordingSink::default();
        let result = LessonRunner::new(lesson(Vec::new()), sink, ConfirmingExit::new(true));
        assert!(matches!(result, Err(RunnerError::EmptyLesson)));
    }

    #[tokio::test]
    async fn audio_advances_unconditionally() {
        let (mut runner, _) = runner(vec![audio("a1"), reveal("r1")]);

        let signal = runner.handle(StepEvent::Listened).await.unwrap();
        assert_eq!(signal, RunnerSignal::Advanced);
        assert_eq!(runner.step_index(), 1);
        assert!(runner.responses().is_empty());
    }

    #[tokio::test]
    async fn question_records_but_does_not_auto_advance() {
        let (mut runner, _) = runner(vec![question("q1", 0), reveal("r1")]);

        let signal = runner.handle(answer(0, true)).await.unwrap();
        assert_eq!(signal, RunnerSignal::Stay);
        assert_eq!(runner.step_index(), 0);
        assert_eq!(runner.responses().len(), 1);
        assert!(runner.last_question_correct());

        let signal = runner.handle(StepEvent::ContinuePressed).await.unwrap();
        assert_eq!(signal, RunnerSignal::Advanced);
        assert_eq!(runner.step_index(), 1);
    }

    #[tokio::test]
    async fn continue_before_answer_is_rejected() {
        let (mut runner, _) = runner(vec![question("q1", 0), reveal("r1")]);

        let err = runner.handle(StepEvent::ContinuePressed).await.unwrap_err();
        assert!(matches!(err, RunnerError::AnswerRequired));
    }

    #[tokio::test]
    async fn double_answer_is_rejected() {
        let (mut runner, _) = runner(vec![question("q1", 0), reveal("r1")]);

        runner.handle(answer(0, true)).await.unwrap();
        let err = runner.handle(answer(1, false)).await.unwrap_err();
        assert!(matches!(err, RunnerError::AlreadyAnswered));
        assert_eq!(runner.responses().len(), 1);
    }

    #[tokio::test]
    async fn mismatched_event_is_rejected_without_side_effects() {
        let (mut runner, _) = runner(vec![audio("a1"), reveal("r1")]);

        let err = runner
            .handle(StepEvent::RoleplayCompleted { recording: None })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunnerError::InvalidEvent {
                step_type: "audio",
                event: "roleplay_completed",
                index: 0
            }
        ));
        assert_eq!(runner.step_index(), 0);
        assert!(runner.responses().is_empty());
    }

    #[tokio::test]
    async fn last_question_correct_defaults_to_true() {
        let (runner, _) = runner(vec![reveal("r1")]);
        assert!(runner.last_question_correct());
    }

    #[tokio::test]
    async fn wrong_answer_flows_into_reveal_framing() {
        let (mut runner, _) = runner(vec![question("q1", 2), reveal("r1")]);

        runner.handle(answer(1, false)).await.unwrap();
        runner.handle(StepEvent::ContinuePressed).await.unwrap();
        assert!(!runner.last_question_correct());
    }

    #[tokio::test]
    async fn mixed_lesson_scores_only_questions() {
        // [audio, question(correct@0), reveal, repeat]; select 0, confidence 4
        let (mut runner, sink) = runner(vec![
            audio("a1"),
            question("q1", 0),
            reveal("r1"),
            repeat("c1"),
        ]);

        runner.handle(StepEvent::Listened).await.unwrap();
        runner.handle(answer(0, true)).await.unwrap();
        runner.handle(StepEvent::ContinuePressed).await.unwrap();
        runner.handle(StepEvent::ContinuePressed).await.unwrap();

        let signal = runner
            .handle(StepEvent::RepeatCompleted {
                confidence: Confidence::new(4).unwrap(),
                recording: Some(RecordingUri::new("/tmp/take.flac").unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(signal, RunnerSignal::Completed);
        assert_eq!(runner.state(), RunnerState::Complete);

        let summary = sink.taken().expect("completion sink not invoked");
        assert_eq!(summary.responses.len(), 2);
        assert_eq!(summary.score.value(), 1.0);
    }

    #[tokio::test]
    async fn two_questions_half_correct_scores_half() {
        // correct answers are 2 and 1; the user picks 1 both times
        let (mut runner, sink) = runner(vec![question("q1", 2), question("q2", 1)]);

        runner.handle(answer(1, false)).await.unwrap();
        runner.handle(StepEvent::ContinuePressed).await.unwrap();
        runner.handle(answer(1, true)).await.unwrap();
        let signal = runner.handle(StepEvent::ContinuePressed).await.unwrap();

        assert_eq!(signal, RunnerSignal::Completed);
        let summary = sink.taken().unwrap();
        assert_eq!(summary.score.value(), 0.5);
        assert_eq!(summary.responses.len(), 2);
    }

    #[tokio::test]
    async fn speaking_only_lesson_scores_perfect() {
        let (mut runner, sink) = runner(vec![repeat("c1"), roleplay("rp1")]);

        runner
            .handle(StepEvent::RepeatCompleted {
                confidence: Confidence::default(),
                recording: None,
            })
            .await
            .unwrap();
        runner
            .handle(StepEvent::RoleplayCompleted { recording: None })
            .await
            .unwrap();

        let summary = sink.taken().unwrap();
        assert_eq!(summary.score.value(), 1.0);
    }

    #[tokio::test]
    async fn exit_confirmed_abandons_without_completing() {
        let (mut runner, sink) = runner(vec![audio("a1"), reveal("r1")]);

        assert!(runner.request_exit().await);
        assert_eq!(runner.state(), RunnerState::Abandoned);
        assert!(sink.taken().is_none());
        assert!(runner.responses().is_empty());

        // No further events accepted
        let err = runner.handle(StepEvent::Listened).await.unwrap_err();
        assert!(matches!(err, RunnerError::Finished(RunnerState::Abandoned)));
    }

    #[tokio::test]
    async fn exit_declined_keeps_the_run_alive() {
        let sink = RecordingSink::default();
        let mut runner = LessonRunner::new(
            lesson(vec![audio("a1"), reveal("r1")]),
            sink.clone(),
            ConfirmingExit::new(false),
        )
        .unwrap();

        assert!(!runner.request_exit().await);
        assert_eq!(runner.state(), RunnerState::InProgress);
        assert_eq!(
            runner.handle(StepEvent::Listened).await.unwrap(),
            RunnerSignal::Advanced
        );
    }

    #[tokio::test]
    async fn events_after_completion_are_rejected() {
        let (mut runner, _) = runner(vec![audio("a1")]);

        let signal = runner.handle(StepEvent::Listened).await.unwrap();
        assert_eq!(signal, RunnerSignal::Completed);

        let err = runner.handle(StepEvent::Listened).await.unwrap_err();
        assert!(matches!(err, RunnerError::Finished(RunnerState::Complete)));
        assert!(!runner.request_exit().await);
    }

    #[tokio::test]
    async fn summary_carries_lesson_id_and_timing() {
        let (mut runner, sink) = runner(vec![audio("a1")]);
        runner.handle(StepEvent::Listened).await.unwrap();

        let summary = sink.taken().unwrap();
        assert_eq!(summary.lesson_id, 1);
        assert!(summary.completed_at >= summary.started_at);
    }
}
