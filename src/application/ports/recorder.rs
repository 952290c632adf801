//! Recording port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::RecordingUri;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(String),

    #[error("Recording produced no audio")]
    EmptyRecording,

    #[error("No audio input device available")]
    NoInputDevice,
}

/// Port for microphone capture.
///
/// At most one recording is in flight per recorder; `start` while recording
/// is a start failure, `stop` finalizes the capture to a local URI.
#[async_trait]
pub trait VoiceRecorder: Send + Sync {
    /// Check (and if needed prompt for) microphone permission.
    /// Must be called immediately before starting a recording.
    async fn request_permission(&self) -> Result<(), RecordingError>;

    /// Begin capturing from the microphone
    async fn start(&self) -> Result<(), RecordingError>;

    /// Stop capturing and finalize, yielding the recording's local URI
    async fn stop(&self) -> Result<RecordingUri, RecordingError>;

    /// Discard the current capture without finalizing. Best effort.
    async fn cancel(&self);

    /// Whether a capture is currently active
    fn is_recording(&self) -> bool;
}
