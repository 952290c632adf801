//! Per-step audio resource manager
//!
//! One `StepMedia` lives exactly as long as one step view. It owns at most
//! one prompt playback handle, one playback handle for the user's own
//! recording, and the active-recording flag, and it enforces the
//! teardown-then-acquire discipline: a new resource is only acquired after
//! the previous holder of its slot has been stopped and released.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::{
    AudioPlayer, AudioSession, PlaybackError, RecordingError, Sound, VoiceRecorder,
};
use crate::domain::recording::RecordingUri;

/// Owns the audio/recording lifecycle for a single step view.
pub struct StepMedia {
    player: Arc<dyn AudioPlayer>,
    recorder: Arc<dyn VoiceRecorder>,
    session: Arc<dyn AudioSession>,
    prompt: Option<Box<dyn Sound>>,
    recording_playback: Option<Box<dyn Sound>>,
    recording_active: bool,
}

impl StepMedia {
    pub fn new(
        player: Arc<dyn AudioPlayer>,
        recorder: Arc<dyn VoiceRecorder>,
        session: Arc<dyn AudioSession>,
    ) -> Self {
        Self {
            player,
            recorder,
            session,
            prompt: None,
            recording_playback: None,
            recording_active: false,
        }
    }

    /// Play the step's prompt/original audio.
    ///
    /// Any previously loaded prompt is stopped and released first; a playing
    /// user-recording is stopped. Fails with `RecordingInProgress` while a
    /// recording is active.
    pub async fn play_prompt(&mut self, url: &str) -> Result<(), PlaybackError> {
        if self.recording_active {
            return Err(PlaybackError::RecordingInProgress);
        }

        stop_slot(&mut self.recording_playback).await;
        release_slot(&mut self.prompt).await;

        self.session
            .configure_playback()
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

        let mut sound = self.player.load(url).await?;
        if let Err(e) = sound.play().await {
            sound.unload().await;
            return Err(e);
        }

        debug!(url, "prompt playback started");
        self.prompt = Some(sound);
        Ok(())
    }

    /// Stop the prompt without releasing it. Safe when nothing is playing.
    pub async fn stop_prompt(&mut self) {
        stop_slot(&mut self.prompt).await;
    }

    /// Whether the prompt ran to its natural end
    pub fn prompt_finished(&self) -> bool {
        self.prompt.as_ref().is_some_and(|s| s.is_finished())
    }

    /// Play back the user's own recording.
    pub async fn play_recording(&mut self, uri: &RecordingUri) -> Result<(), PlaybackError> {
        if self.recording_active {
            return Err(PlaybackError::RecordingInProgress);
        }

        stop_slot(&mut self.prompt).await;
        release_slot(&mut self.recording_playback).await;

        self.session
            .configure_playback()
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

        let mut sound = self.player.load(uri.as_str()).await?;
        if let Err(e) = sound.play().await {
            sound.unload().await;
            return Err(e);
        }

        debug!(uri = uri.as_str(), "recording playback started");
        self.recording_playback = Some(sound);
        Ok(())
    }

    /// Start a microphone capture.
    ///
    /// All playback is stopped and released first, then the permission gate
    /// runs, then microphone routing is enabled, and only then does capture
    /// begin. A start failure reverts the routing change.
    pub async fn start_recording(&mut self) -> Result<(), RecordingError> {
        release_slot(&mut self.prompt).await;
        release_slot(&mut self.recording_playback).await;

        self.recorder.request_permission().await?;

        self.session
            .enter_recording_mode()
            .await
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        if let Err(e) = self.recorder.start().await {
            if let Err(exit_err) = self.session.exit_recording_mode().await {
                warn!(error = %exit_err, "failed to leave recording mode after start failure");
            }
            return Err(e);
        }

        debug!("recording started");
        self.recording_active = true;
        Ok(())
    }

    /// Stop the capture and finalize it to a URI.
    /// Microphone routing is reverted whether or not finalization succeeds.
    pub async fn finish_recording(&mut self) -> Result<RecordingUri, RecordingError> {
        let result = self.recorder.stop().await;

        if let Err(e) = self.session.exit_recording_mode().await {
            warn!(error = %e, "failed to leave recording mode");
        }
        self.recording_active = false;

        result
    }

    /// Discard an in-flight capture without finalizing
    pub async fn discard_recording(&mut self) {
        if !self.recording_active {
            return;
        }
        self.recorder.cancel().await;
        if let Err(e) = self.session.exit_recording_mode().await {
            warn!(error = %e, "failed to leave recording mode");
        }
        self.recording_active = false;
    }

    /// Force-stop and release everything this step holds.
    ///
    /// The disposer for step switches and unmount: idempotent, best effort,
    /// teardown failures are logged and swallowed.
    pub async fn release_all(&mut self) {
        release_slot(&mut self.prompt).await;
        release_slot(&mut self.recording_playback).await;
        self.discard_recording().await;
    }

    /// Whether any playback handle or capture is still live
    pub fn has_active_media(&self) -> bool {
        self.prompt.is_some() || self.recording_playback.is_some() || self.recording_active
    }

    /// Whether a capture is active
    pub fn is_recording(&self) -> bool {
        self.recording_active
    }
}

/// Stop a slot's sound, keeping it loaded
async fn stop_slot(slot: &mut Option<Box<dyn Sound>>) {
    if let Some(sound) = slot.as_mut() {
        if let Err(e) = sound.stop().await {
            warn!(error = %e, "failed to stop sound");
        }
    }
}

/// Stop and release whatever occupies a slot
async fn release_slot(slot: &mut Option<Box<dyn Sound>>) {
    if let Some(mut sound) = slot.take() {
        if let Err(e) = sound.stop().await {
            warn!(error = %e, "failed to stop sound during teardown");
        }
        sound.unload().await;
    }
}
