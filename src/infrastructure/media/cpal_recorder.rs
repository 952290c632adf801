//! Cross-platform microphone recorder using cpal
//!
//! Captures mono PCM into a shared buffer on a dedicated thread (the cpal
//! stream is not thread-safe) and finalizes a take by FLAC-encoding it to a
//! file in the recordings directory. The desktop analogue of the mobile
//! permission prompt is probing for a usable input device.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::warn;

use crate::application::ports::{RecordingError, VoiceRecorder};
use crate::domain::recording::RecordingUri;

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: usize = 16;

/// Microphone recorder backed by cpal, finalizing takes as FLAC files
pub struct CpalVoiceRecorder {
    output_dir: PathBuf,
    /// Captured mono i16 samples at the device sample rate
    buffer: Arc<StdMutex<Vec<i16>>>,
    sample_rate: Arc<AtomicU32>,
    is_recording: Arc<AtomicBool>,
    take_counter: AtomicU64,
}

impl CpalVoiceRecorder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            buffer: Arc::new(StdMutex::new(Vec::new())),
            sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            take_counter: AtomicU64::new(0),
        }
    }

    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoInputDevice)
    }

    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported = device
            .default_input_config()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get config: {}", e)))?;

        let sample_format = supported.sample_format();
        if sample_format != SampleFormat::I16 && sample_format != SampleFormat::F32 {
            return Err(RecordingError::StartFailed(
                "Unsupported sample format".into(),
            ));
        }

        Ok((supported.config(), sample_format))
    }

    /// Mix interleaved multi-channel samples down to mono
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Encode PCM samples to FLAC bytes
    fn encode_flac(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, RecordingError> {
        let samples_i32: Vec<i32> = samples.iter().map(|&s| s as i32).collect();

        let config = flacenc::config::Encoder::default()
            .into_verified()
            .map_err(|(_, e)| RecordingError::FinalizeFailed(format!("{:?}", e)))?;

        let source = MemSource::from_samples(&samples_i32, 1, BITS_PER_SAMPLE, sample_rate as usize);

        let stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
            .map_err(|e| RecordingError::FinalizeFailed(format!("{:?}", e)))?;

        let mut sink = ByteSink::new();
        stream
            .write(&mut sink)
            .map_err(|e| RecordingError::FinalizeFailed(e.to_string()))?;

        Ok(sink.into_inner())
    }
}

#[async_trait]
impl VoiceRecorder for CpalVoiceRecorder {
    async fn request_permission(&self) -> Result<(), RecordingError> {
        // Desktop has no permission prompt; the gate is whether an input
        // device is usable at all.
        tokio::task::spawn_blocking(Self::get_input_device)
            .await
            .map_err(|e| RecordingError::StartFailed(format!("Task join error: {}", e)))?
            .map(|_| ())
    }

    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".into(),
            ));
        }

        {
            let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
            buffer.clear();
        }
        self.is_recording.store(true, Ordering::SeqCst);

        let buffer = Arc::clone(&self.buffer);
        let sample_rate = Arc::clone(&self.sample_rate);
        let is_recording = Arc::clone(&self.is_recording);

        // The cpal stream is not Send; it lives on its own thread until the
        // recording flag drops.
        std::thread::spawn(move || {
            let device = match Self::get_input_device() {
                Ok(d) => d,
                Err(_) => {
                    is_recording.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let (config, sample_format) = match Self::get_input_config(&device) {
                Ok(c) => c,
                Err(_) => {
                    is_recording.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let channels = config.channels;
            sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

            let stream_result = match sample_format {
                SampleFormat::I16 => {
                    let buffer = Arc::clone(&buffer);
                    let is_recording = Arc::clone(&is_recording);
                    device.build_input_stream(
                        &config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            if is_recording.load(Ordering::SeqCst) {
                                let mono = CpalVoiceRecorder::mix_to_mono(data, channels);
                                if let Ok(mut buffer) = buffer.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| warn!(error = %err, "audio input stream error"),
                        None,
                    )
                }

                SampleFormat::F32 => {
                    let buffer = Arc::clone(&buffer);
                    let is_recording = Arc::clone(&is_recording);
                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if is_recording.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalVoiceRecorder::mix_to_mono(&i16_data, channels);
                                if let Ok(mut buffer) = buffer.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| warn!(error = %err, "audio input stream error"),
                        None,
                    )
                }

                _ => {
                    is_recording.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(_) => {
                    is_recording.store(false, Ordering::SeqCst);
                    return;
                }
            };

            if stream.play().is_err() {
                is_recording.store(false, Ordering::SeqCst);
                return;
            }

            while is_recording.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            drop(stream);
        });

        // Give the thread a moment to start
        sleep(TokioDuration::from_millis(50)).await;

        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Failed to start recording".into(),
            ));
        }

        Ok(())
    }

    async fn stop(&self) -> Result<RecordingUri, RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::FinalizeFailed(
                "No recording in progress".into(),
            ));
        }

        self.is_recording.store(false, Ordering::SeqCst);

        // Let the capture thread wind down
        sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::FinalizeFailed("Sample rate not set".into()));
        }

        let samples = {
            let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Err(RecordingError::EmptyRecording);
        }

        let take = self.take_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let path = self.output_dir.join(format!("take-{}.flac", take));
        let output_dir = self.output_dir.clone();

        let flac = tokio::task::spawn_blocking(move || Self::encode_flac(&samples, sample_rate))
            .await
            .map_err(|e| RecordingError::FinalizeFailed(format!("Encode task error: {}", e)))??;

        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|e| RecordingError::FinalizeFailed(e.to_string()))?;
        tokio::fs::write(&path, flac)
            .await
            .map_err(|e| RecordingError::FinalizeFailed(e.to_string()))?;

        RecordingUri::new(path.to_string_lossy().into_owned())
            .map_err(|_| RecordingError::EmptyRecording)
    }

    async fn cancel(&self) {
        self.is_recording.store(false, Ordering::SeqCst);

        sleep(TokioDuration::from_millis(100)).await;

        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.clear();
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        let result = CpalVoiceRecorder::mix_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn mix_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalVoiceRecorder::mix_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]); // Average of each pair
    }

    #[test]
    fn encode_flac_produces_magic_number() {
        // 100ms of silence at 16kHz
        let silence = vec![0i16; 1600];
        let flac = CpalVoiceRecorder::encode_flac(&silence, 16000).unwrap();
        assert!(flac.len() > 4);
        assert_eq!(&flac[0..4], b"fLaC");
    }

    #[test]
    fn recorder_default_state() {
        let recorder = CpalVoiceRecorder::new("/tmp/hearsay-takes");
        assert!(!recorder.is_recording());
    }

    #[tokio::test]
    async fn stop_without_start_fails() {
        let recorder = CpalVoiceRecorder::new("/tmp/hearsay-takes");
        assert!(recorder.stop().await.is_err());
    }
}
