//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio device, the filesystem and the config store.

pub mod config;
pub mod lessons;
pub mod media;

// Re-export adapters
pub use config::XdgConfigStore;
pub use lessons::FixtureLessonSource;
pub use media::{
    CpalVoiceRecorder, DesktopAudioSession, NoopAudioPlayer, NoopVoiceRecorder, RodioPlayer,
};
