//! Question step view
//!
//! Phases: selecting -> submitted. The pending selection is freely
//! changeable until submission locks it in, computes correctness by index
//! equality, and reveals per-option feedback plus the explanation. A
//! separate continue action is what actually advances the runner.

use std::fmt;

use crate::application::media::StepMedia;
use crate::domain::lesson::QuestionStep;

use super::{StepError, StepEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionPhase {
    #[default]
    Selecting,
    Submitted,
}

impl QuestionPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for QuestionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an option should be rendered after submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    /// The correct answer, always highlighted after submission
    Correct,
    /// The user's pick when it was wrong
    IncorrectSelection,
    Plain,
}

pub struct QuestionStepView {
    step: QuestionStep,
    media: StepMedia,
    phase: QuestionPhase,
    selection: Option<usize>,
    correct: Option<bool>,
    error: Option<String>,
}

impl QuestionStepView {
    pub fn new(step: QuestionStep, media: StepMedia) -> Self {
        Self {
            step,
            media,
            phase: QuestionPhase::Selecting,
            selection: None,
            correct: None,
            error: None,
        }
    }

    pub fn step(&self) -> &QuestionStep {
        &self.step
    }

    pub fn phase(&self) -> QuestionPhase {
        self.phase
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Update the pending selection. Idempotent and freely changeable
    /// until the answer is submitted.
    pub fn select(&mut self, index: usize) -> Result<(), StepError> {
        if self.phase == QuestionPhase::Submitted {
            return Err(StepError::AlreadySubmitted);
        }
        if index >= self.step.options.len() {
            return Err(StepError::NoSuchOption { index });
        }
        self.selection = Some(index);
        Ok(())
    }

    /// Lock in the pending selection and compute correctness
    pub fn submit(&mut self) -> Result<StepEvent, StepError> {
        if self.phase == QuestionPhase::Submitted {
            return Err(StepError::AlreadySubmitted);
        }
        let selected_index = self.selection.ok_or(StepError::NothingSelected)?;

        let correct = self.step.is_correct(selected_index);
        self.correct = Some(correct);
        self.phase = QuestionPhase::Submitted;

        Ok(StepEvent::AnswerSubmitted {
            selected_index,
            correct,
        })
    }

    /// Whether the locked-in answer was correct
    pub fn was_correct(&self) -> Option<bool> {
        self.correct
    }

    /// Per-option styling, revealed only after submission
    pub fn option_feedback(&self, index: usize) -> OptionFeedback {
        if self.phase != QuestionPhase::Submitted {
            return OptionFeedback::Plain;
        }
        if index == self.step.correct_index {
            OptionFeedback::Correct
        } else if self.selection == Some(index) {
            OptionFeedback::IncorrectSelection
        } else {
            OptionFeedback::Plain
        }
    }

    pub fn explanation_visible(&self) -> bool {
        self.phase == QuestionPhase::Submitted
    }

    /// Replay the clip the question refers to, when it has one.
    /// Playback failures only surface inline; listening is not required here.
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

    /// The continue action: only valid once an answer is locked in
    pub async fn acknowledge(&mut self) -> Result<StepEvent, StepError> {
        if self.phase != QuestionPhase::Submitted {
            return Err(StepError::NotSubmitted);
        }
        self.media.release_all().await;
        Ok(StepEvent::ContinuePressed)
    }

    pub fn has_active_media(&self) -> bool {
        self.media.has_active_media()
    }

    pub async fn release_media(&mut self) {
        self.media.release_all().await;
    }
}
