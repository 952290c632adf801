//! Playback port interfaces

use async_trait::async_trait;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Failed to load audio from {url}: {reason}")]
    LoadFailed { url: String, reason: String },

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    #[error("No audio output device available")]
    NoOutputDevice,

    #[error("Cannot start playback while a recording is active")]
    RecordingInProgress,
}

/// A loaded, playable sound handle.
///
/// Handles are single-owner: whoever holds the box is responsible for
/// stopping and unloading it. `stop` and `unload` are idempotent so that
/// forced teardown can run regardless of playback state.
#[async_trait]
pub trait Sound: Send + Sync {
    /// Begin playback from the start of the clip
    async fn play(&mut self) -> Result<(), PlaybackError>;

    /// Stop playback. Safe to call when not playing.
    async fn stop(&mut self) -> Result<(), PlaybackError>;

    /// Release the underlying device resources. Safe to call twice.
    async fn unload(&mut self);

    /// Whether the handle still holds device resources
    fn is_loaded(&self) -> bool;

    /// Whether playback ran to its natural end
    fn is_finished(&self) -> bool;
}

/// Port for resolving audio URLs into playable handles
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Resolve a URL to a loaded sound, ready to play
    async fn load(&self, url: &str) -> Result<Box<dyn Sound>, PlaybackError>;
}
