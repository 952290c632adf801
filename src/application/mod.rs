//! Application layer - Use cases and port interfaces
//!
//! Contains the lesson runner, the per-step phase machines, the audio
//! resource manager, and trait definitions for external system interactions.

pub mod media;
pub mod ports;
pub mod runner;
pub mod steps;

// Re-export use cases
pub use media::StepMedia;
pub use runner::{LessonRunner, RunnerError, RunnerSignal, RunnerState};
pub use steps::{
    AudioStepView, QuestionStepView, RepeatStepView, RevealStepView, RoleplayStepView, StepError,
    StepEvent,
};
