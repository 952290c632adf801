//! Rodio-based audio player adapter
//!
//! Resolves local file paths (optionally `file://`-prefixed) to rodio
//! sinks. The `OutputStream` is not `Send`, so each sound runs playback on
//! its own thread that keeps the stream alive; the `Sink` handle crossing
//! back is thread-safe and drives stop/teardown.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;

use crate::application::ports::{AudioPlayer, PlaybackError, Sound};

/// Audio player backed by rodio
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn load(&self, url: &str) -> Result<Box<dyn Sound>, PlaybackError> {
        let path = resolve_path(url);
        if !path.is_file() {
            return Err(PlaybackError::LoadFailed {
                url: url.to_string(),
                reason: "file not found".into(),
            });
        }

        Ok(Box::new(RodioSound {
            path,
            url: url.to_string(),
            sink: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            loaded: true,
        }))
    }
}

/// Turn a media URL into a local filesystem path
fn resolve_path(url: &str) -> PathBuf {
    let trimmed = url.strip_prefix("file://").unwrap_or(url);
    Path::new(trimmed).to_path_buf()
}

struct RodioSound {
    path: PathBuf,
    url: String,
    sink: Option<Arc<Sink>>,
    shutdown: Arc<AtomicBool>,
    loaded: bool,
}

impl RodioSound {
    fn load_error(&self, reason: impl std::fmt::Display) -> PlaybackError {
        PlaybackError::LoadFailed {
            url: self.url.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Sound for RodioSound {
    async fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.loaded {
            return Err(PlaybackError::PlaybackFailed("sound was unloaded".into()));
        }

        // Restarting drops the previous playback thread
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.shutdown.store(false, Ordering::SeqCst);

        let path = self.path.clone();
        let shutdown = Arc::clone(&self.shutdown);
        let (tx, rx) = oneshot::channel::<Result<Arc<Sink>, PlaybackError>>();

        // The OutputStream must live on this thread for as long as the
        // sound plays.
        std::thread::spawn(move || {
            let (_stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(_) => {
                    let _ = tx.send(Err(PlaybackError::NoOutputDevice));
                    return;
                }
            };

            let sink = match Sink::try_new(&handle) {
                Ok(sink) => Arc::new(sink),
                Err(e) => {
                    let _ = tx.send(Err(PlaybackError::PlaybackFailed(e.to_string())));
                    return;
                }
            };

            let file = match File::open(&path) {
                Ok(file) => file,
                Err(e) => {
                    let _ = tx.send(Err(PlaybackError::PlaybackFailed(e.to_string())));
                    return;
                }
            };

            let source = match Decoder::new(BufReader::new(file)) {
                Ok(source) => source,
                Err(e) => {
                    let _ = tx.send(Err(PlaybackError::PlaybackFailed(e.to_string())));
                    return;
                }
            };

            sink.append(source);
            let _ = tx.send(Ok(Arc::clone(&sink)));

            while !shutdown.load(Ordering::SeqCst) && !sink.empty() {
                std::thread::sleep(Duration::from_millis(50));
            }
        });

        let sink = rx
            .await
            .map_err(|_| self.load_error("playback thread exited"))??;
        self.sink = Some(sink);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), PlaybackError> {
        if let Some(sink) = &self.sink {
            sink.stop();
        }
        self.shutdown.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.shutdown.store(true, Ordering::SeqCst);
        self.loaded = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.empty())
    }
}
