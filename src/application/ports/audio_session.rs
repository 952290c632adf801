//! Audio session port
//!
//! Device audio routing is global state on mobile platforms: playback must
//! work in silent mode, and microphone routing may only be enabled while a
//! recording is actually running. Modeling the routing switches as an
//! explicit capability lets tests assert the enable/disable ordering around
//! the record phase.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from audio routing configuration
#[derive(Debug, Clone, Error)]
pub enum AudioSessionError {
    #[error("Failed to configure audio routing: {0}")]
    RoutingFailed(String),
}

/// Port for device-wide audio mode switching
#[async_trait]
pub trait AudioSession: Send + Sync {
    /// Route for playback, audible even with the device in silent mode
    async fn configure_playback(&self) -> Result<(), AudioSessionError>;

    /// Enable microphone routing. Called right before capture starts.
    async fn enter_recording_mode(&self) -> Result<(), AudioSessionError>;

    /// Revert to playback-only routing. Called as soon as capture ends,
    /// on the failure paths too.
    async fn exit_recording_mode(&self) -> Result<(), AudioSessionError>;
}
