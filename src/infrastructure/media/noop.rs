//! No-op media adapters
//!
//! Used for muted play-throughs and headless environments: sounds "finish"
//! immediately and recordings finalize to placeholder URIs so speaking
//! steps remain completable without a microphone.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::application::ports::{
    AudioPlayer, PlaybackError, RecordingError, Sound, VoiceRecorder,
};
use crate::domain::recording::RecordingUri;

/// Audio player whose sounds are silent and instantly finished
pub struct NoopAudioPlayer;

impl NoopAudioPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopAudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPlayer for NoopAudioPlayer {
    async fn load(&self, _url: &str) -> Result<Box<dyn Sound>, PlaybackError> {
        Ok(Box::new(NoopSound { loaded: true }))
    }
}

struct NoopSound {
    loaded: bool,
}

#[async_trait]
impl Sound for NoopSound {
    async fn play(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn unload(&mut self) {
        self.loaded = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn is_finished(&self) -> bool {
        true
    }
}

/// Recorder that captures nothing but finalizes to placeholder URIs
pub struct NoopVoiceRecorder {
    recording: AtomicBool,
    take_counter: AtomicU64,
}

impl NoopVoiceRecorder {
    pub fn new() -> Self {
        Self {
            recording: AtomicBool::new(false),
            take_counter: AtomicU64::new(0),
        }
    }
}

impl Default for NoopVoiceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceRecorder for NoopVoiceRecorder {
    async fn request_permission(&self) -> Result<(), RecordingError> {
        Ok(())
    }

    async fn start(&self) -> Result<(), RecordingError> {
        self.recording.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<RecordingUri, RecordingError> {
        self.recording.store(false, Ordering::SeqCst);
        let take = self.take_counter.fetch_add(1, Ordering::SeqCst) + 1;
        RecordingUri::new(format!("muted://take-{}", take))
            .map_err(|_| RecordingError::EmptyRecording)
    }

    async fn cancel(&self) {
        self.recording.store(false, Ordering::SeqCst);
    }

    fn is_recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_sounds_finish_immediately() {
        let player = NoopAudioPlayer::new();
        let mut sound = player.load("/any/url.mp3").await.unwrap();

        sound.play().await.unwrap();
        assert!(sound.is_finished());

        sound.unload().await;
        assert!(!sound.is_loaded());
    }

    #[tokio::test]
    async fn noop_recorder_yields_distinct_takes() {
        let recorder = NoopVoiceRecorder::new();

        recorder.start().await.unwrap();
        assert!(recorder.is_recording());
        let first = recorder.stop().await.unwrap();

        recorder.start().await.unwrap();
        let second = recorder.stop().await.unwrap();

        assert_ne!(first, second);
        assert!(!recorder.is_recording());
    }
}
