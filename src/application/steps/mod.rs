//! Step views
//!
//! One module per step type. Each view runs its own phase machine, owns a
//! `StepMedia` for its audio lifecycle, and keeps a user-visible inline
//! error slot for degraded media. Contract violations (acting out of phase)
//! are `StepError`s; device failures never surface as `Err`. They land in
//! the inline slot, and each view's phase rules decide what they unlock.
//!
//! Views are identity-keyed: a new step means a new view. The completion
//! methods tear the view's media down; a shell that swaps steps early must
//! run the teardown itself via `release_media`.

mod audio;
mod question;
mod repeat;
mod reveal;
mod roleplay;

pub use audio::AudioStepView;
pub use question::{OptionFeedback, QuestionPhase, QuestionStepView};
pub use repeat::{RepeatPhase, RepeatStepView};
pub use reveal::RevealStepView;
pub use roleplay::{RoleplayPhase, RoleplayStepView};

use thiserror::Error;

use crate::domain::lesson::Confidence;
use crate::domain::recording::RecordingUri;

/// What a step view tells the runner
#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    /// The audio step's clip was heard (or failed, which counts)
    Listened,
    /// A question answer was locked in; does not advance on its own
    AnswerSubmitted { selected_index: usize, correct: bool },
    /// Explicit continue after an answer or a reveal
    ContinuePressed,
    /// A repeat step finished its listen/record/review/rate cycle
    RepeatCompleted {
        confidence: Confidence,
        recording: Option<RecordingUri>,
    },
    /// A roleplay step finished its listen/respond/feedback cycle
    RoleplayCompleted { recording: Option<RecordingUri> },
}

impl StepEvent {
    /// Short name used in runner diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Listened => "listened",
            Self::AnswerSubmitted { .. } => "answer_submitted",
            Self::ContinuePressed => "continue",
            Self::RepeatCompleted { .. } => "repeat_completed",
            Self::RoleplayCompleted { .. } => "roleplay_completed",
        }
    }
}

/// Step view contract violations.
///
/// These mean the caller drove a view out of order, not that a device
/// failed; device failures go to the view's inline error instead.
#[derive(Debug, Clone, Error)]
pub enum StepError {
    #[error("Cannot {action} during the {phase} phase")]
    Phase {
        phase: &'static str,
        action: &'static str,
    },

    #[error("The audio must be heard before recording")]
    ListenFirst,

    #[error("No option selected")]
    NothingSelected,

    #[error("Option {index} does not exist")]
    NoSuchOption { index: usize },

    #[error("The answer is already locked in")]
    AlreadySubmitted,

    #[error("An answer must be submitted first")]
    NotSubmitted,
}
