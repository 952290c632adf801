//! Audio step view
//!
//! No explicit phases: a single "has played" flag gates continuing. Replay
//! is allowed any number of times. A load or playback failure counts as
//! having listened so a broken asset can never block the lesson.

use crate::application::media::StepMedia;
use crate::domain::lesson::AudioStep;

use super::{StepError, StepEvent};

pub struct AudioStepView {
    step: AudioStep,
    media: StepMedia,
    has_played: bool,
    error: Option<String>,
}

impl AudioStepView {
    pub fn new(step: AudioStep, media: StepMedia) -> Self {
        Self {
            step,
            media,
            has_played: false,
            error: None,
        }
    }

    pub fn step(&self) -> &AudioStep {
        &self.step
    }

    /// Start (or restart) playback of the clip
    pub async fn play(&mut self) {
        match self.media.play_prompt(&self.step.audio_url).await {
            Ok(()) => self.error = None,
            Err(e) => {
                // Non-blocking: a flaky asset still satisfies the step
                self.error = Some(e.to_string());
                self.has_played = true;
            }
        }
    }

    /// Stop playback early; an explicit stop counts as having listened
    pub async fn stop(&mut self) {
        self.media.stop_prompt().await;
        self.has_played = true;
    }

    /// Input event: the clip ran to its natural end
    pub fn playback_finished(&mut self) {
        self.has_played = true;
    }

    /// Poll hook for shells without status callbacks
    pub fn prompt_finished(&self) -> bool {
        self.media.prompt_finished()
    }

    pub fn has_played(&self) -> bool {
        self.has_played
    }

    pub fn can_continue(&self) -> bool {
        self.has_played
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Finish the step, tearing down its media
    pub async fn finish(&mut self) -> Result<StepEvent, StepError> {
        if !self.has_played {
            return Err(StepError::Phase {
                phase: "listen",
                action: "continue",
            });
        }
        self.media.release_all().await;
        Ok(StepEvent::Listened)
    }

    /// Whether any media handle is still live (teardown check)
    pub fn has_active_media(&self) -> bool {
        self.media.has_active_media()
    }

    /// Force teardown without finishing, for early step switches
    pub async fn release_media(&mut self) {
        self.media.release_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{happy_media, media_with, FakePlayer, FakeRecorder};
    use super::*;

    fn step() -> AudioStep {
        AudioStep {
            id: "intro".into(),
            audio_url: "/media/audio/cafe-order-es.mp3".into(),
            title: "Listen to the conversation".into(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn cannot_finish_before_listening() {
        let mut view = AudioStepView::new(step(), happy_media());
        assert!(!view.can_continue());
        assert!(view.finish().await.is_err());
    }

    #[tokio::test]
    async fn natural_finish_unlocks_continue() {
        let mut view = AudioStepView::new(step(), happy_media());

        view.play().await;
        assert!(view.error().is_none());
        assert!(!view.can_continue());

        view.playback_finished();
        assert!(view.can_continue());

        let event = view.finish().await.unwrap();
        assert_eq!(event, StepEvent::Listened);
        assert!(!view.has_active_media());
    }

    #[tokio::test]
    async fn explicit_stop_counts_as_listened() {
        let mut view = AudioStepView::new(step(), happy_media());

        view.play().await;
        view.stop().await;
        assert!(view.can_continue());
    }

    #[tokio::test]
    async fn load_failure_shows_error_and_satisfies_step() {
        let media = media_with(
            FakePlayer { fail_load: true },
            FakeRecorder::default(),
        );
        let mut view = AudioStepView::new(step(), media);

        view.play().await;
        assert!(view.error().is_some());
        assert!(view.can_continue());
        assert_eq!(view.finish().await.unwrap(), StepEvent::Listened);
    }

    #[tokio::test]
    async fn replay_is_allowed() {
        let mut view = AudioStepView::new(step(), happy_media());

        view.play().await;
        view.playback_finished();
        view.play().await;
        assert!(view.can_continue());
    }
}
