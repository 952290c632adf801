//! Reveal step view
//!
//! Presents the correct answer, the transcript with a translation toggle,
//! optional key phrases and an optional tip. Framing depends on whether the
//! preceding question was answered correctly; the runner passes that in
//! (defaulting to correct when no question preceded). A single continue
//! action advances unconditionally.

use crate::application::media::StepMedia;
use crate::domain::lesson::{KeyPhrase, RevealStep};

use super::StepEvent;

pub struct RevealStepView {
    step: RevealStep,
    media: StepMedia,
    was_correct: bool,
    translation_visible: bool,
    error: Option<String>,
}

impl RevealStepView {
    pub fn new(step: RevealStep, media: StepMedia, was_correct: bool) -> Self {
        Self {
            step,
            media,
            was_correct,
            translation_visible: false,
            error: None,
        }
    }

    pub fn step(&self) -> &RevealStep {
        &self.step
    }

    /// Whether the preceding question was answered correctly.
    /// Display framing only; scoring already happened at the question.
    pub fn was_correct(&self) -> bool {
        self.was_correct
    }

    /// Local UI state only; never affects scoring
    pub fn toggle_translation(&mut self) {
        self.translation_visible = !self.translation_visible;
    }

    pub fn translation_visible(&self) -> bool {
        self.translation_visible
    }

    pub fn key_phrases(&self) -> &[KeyPhrase] {
        &self.step.key_phrases
    }

    pub fn tip(&self) -> Option<&str> {
        self.step.tip.as_deref()
    }

    /// Replay the prompt, when the step carries one
    pub async fn replay_audio(&mut self) {
        let Some(url) = self.step.audio_url.clone() else {
            return;
        };
        match self.media.play_prompt(&url).await {
            Ok(()) => self.error = None,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Continue: always completes
    pub async fn acknowledge(&mut self) -> StepEvent {
        self.media.release_all().await;
        StepEvent::ContinuePressed
    }

    pub fn has_active_media(&self) -> bool {
        self.media.has_active_media()
    }

    pub async fn release_media(&mut self) {
        self.media.release_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{happy_media, media_with, FakePlayer, FakeRecorder};
    use super::*;

    fn step() -> RevealStep {
        RevealStep {
            id: "r1".into(),
            correct_answer: "Un cafe con leche".into(),
            transcript: "Cliente: Un cafe con leche, por favor.".into(),
            translation: "Customer: A coffee with milk, please.".into(),
            key_phrases: vec![KeyPhrase {
                term: "por favor".into(),
                translation: "please".into(),
            }],
            tip: None,
            audio_url: Some("/media/audio/cafe-order-es.mp3".into()),
        }
    }

    #[tokio::test]
    async fn acknowledge_always_completes() {
        let mut view = RevealStepView::new(step(), happy_media(), true);
        let event = view.acknowledge().await;
        assert_eq!(event, StepEvent::ContinuePressed);
        assert!(!view.has_active_media());
    }

    #[tokio::test]
    async fn translation_toggle_is_pure_ui_state() {
        let mut view = RevealStepView::new(step(), happy_media(), false);

        assert!(!view.translation_visible());
        view.toggle_translation();
        assert!(view.translation_visible());
        view.toggle_translation();
        assert!(!view.translation_visible());

        // Framing is whatever the runner injected, toggling changed nothing
        assert!(!view.was_correct());
    }

    #[tokio::test]
    async fn replay_failure_is_inline_only() {
        let media = media_with(FakePlayer { fail_load: true }, FakeRecorder::default());
        let mut view = RevealStepView::new(step(), media, true);

        view.replay_audio().await;
        assert!(view.error().is_some());

        // Still completes
        assert_eq!(view.acknowledge().await, StepEvent::ContinuePressed);
    }

    #[tokio::test]
    async fn exposes_key_phrases_and_tip() {
        let view = RevealStepView::new(step(), happy_media(), true);
        assert_eq!(view.key_phrases().len(), 1);
        assert_eq!(view.key_phrases()[0].term, "por favor");
        assert!(view.tip().is_none());
    }
}
