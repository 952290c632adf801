//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_session;
pub mod config;
pub mod lesson_source;
pub mod player;
pub mod recorder;
pub mod sinks;

// Re-export common types
pub use audio_session::{AudioSession, AudioSessionError};
pub use config::ConfigStore;
pub use lesson_source::{LessonSource, LessonSourceError};
pub use player::{AudioPlayer, PlaybackError, Sound};
pub use recorder::{RecordingError, VoiceRecorder};
pub use sinks::{CompletionSink, ExitSink};
