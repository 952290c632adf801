//! Repeat step view
//!
//! Phase machine: listen -> record -> review -> rate. Hearing the reference
//! phrase unlocks recording; a stop only reaches review when a usable
//! recording URI came back; review offers original-vs-own playback and a
//! retry that discards just the recording; rating captures a 1-5 confidence
//! that completes the step together with the recording reference.

use std::fmt;

use crate::application::media::StepMedia;
use crate::domain::lesson::{Confidence, RepeatStep};
use crate::domain::recording::RecordingUri;

use super::{StepError, StepEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPhase {
    #[default]
    Listen,
    Recording,
    Review,
    Rate,
}

impl RepeatPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Listen => "listen",
            Self::Recording => "recording",
            Self::Review => "review",
            Self::Rate => "rate",
        }
    }
}

impl fmt::Display for RepeatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct RepeatStepView {
    step: RepeatStep,
    media: StepMedia,
    phase: RepeatPhase,
    has_listened: bool,
    recording: Option<RecordingUri>,
    confidence: Confidence,
    error: Option<String>,
}

impl RepeatStepView {
    pub fn new(step: RepeatStep, media: StepMedia) -> Self {
        Self {
            step,
            media,
            phase: RepeatPhase::Listen,
            has_listened: false,
            recording: None,
            confidence: Confidence::default(),
            error: None,
        }
    }

    pub fn step(&self) -> &RepeatStep {
        &self.step
    }

    pub fn phase(&self) -> RepeatPhase {
        self.phase
    }

    pub fn has_listened(&self) -> bool {
        self.has_listened
    }

    pub fn recording(&self) -> Option<&RecordingUri> {
        self.recording.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Play the reference phrase. Available while listening and again
    /// during review for comparison.
    pub async fn play_reference(&mut self) -> Result<(), StepError> {
        match self.phase {
            RepeatPhase::Listen | RepeatPhase::Review => {}
            phase => {
                return Err(StepError::Phase {
                    phase: phase.as_str(),
                    action: "play the reference",
                })
            }
        }

        match self.media.play_prompt(&self.step.audio_url).await {
            Ok(()) => self.error = None,
            Err(e) => {
                // A broken reference must not block the step
                self.error = Some(e.to_string());
                self.has_listened = true;
            }
        }
        Ok(())
    }

    /// Input event: the reference ran to its natural end
    pub fn playback_finished(&mut self) {
        self.has_listened = true;
    }

    /// Poll hook for shells without status callbacks
    pub fn prompt_finished(&self) -> bool {
        self.media.prompt_finished()
    }

    /// Begin recording the user's repetition.
    ///
    /// Device failures (permission denial, start failure) surface inline
    /// and leave the phase unchanged so the user can retry.
    pub async fn start_recording(&mut self) -> Result<(), StepError> {
        if self.phase != RepeatPhase::Listen {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "start recording",
            });
        }
        if !self.has_listened {
            return Err(StepError::ListenFirst);
        }

        match self.media.start_recording().await {
            Ok(()) => {
                self.error = None;
                self.phase = RepeatPhase::Recording;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        Ok(())
    }

    /// Stop recording. Reaches review only with a usable recording URI;
    /// otherwise surfaces the error and falls back to idle listening.
    pub async fn stop_recording(&mut self) -> Result<(), StepError> {
        if self.phase != RepeatPhase::Recording {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "stop recording",
            });
        }

        match self.media.finish_recording().await {
            Ok(uri) => {
                self.recording = Some(uri);
                self.error = None;
                self.phase = RepeatPhase::Review;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = RepeatPhase::Listen;
            }
        }
        Ok(())
    }

    /// Play back the user's own take during review
    pub async fn play_recording(&mut self) -> Result<(), StepError> {
        if self.phase != RepeatPhase::Review {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "play the recording",
            });
        }
        let Some(uri) = self.recording.clone() else {
            return Ok(());
        };
        match self.media.play_recording(&uri).await {
            Ok(()) => self.error = None,
            Err(e) => self.error = Some(e.to_string()),
        }
        Ok(())
    }

    /// Discard the take and go record again. Listening state is kept.
    pub async fn retry(&mut self) -> Result<(), StepError> {
        if self.phase != RepeatPhase::Review {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "retry",
            });
        }
        self.media.release_all().await;
        self.recording = None;
        self.phase = RepeatPhase::Listen;
        Ok(())
    }

    /// Keep the take and move on to rating
    pub async fn proceed_to_rating(&mut self) -> Result<(), StepError> {
        if self.phase != RepeatPhase::Review {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "rate",
            });
        }
        self.media.release_all().await;
        self.phase = RepeatPhase::Rate;
        Ok(())
    }

    pub fn set_confidence(&mut self, confidence: Confidence) -> Result<(), StepError> {
        if self.phase != RepeatPhase::Rate {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "set confidence",
            });
        }
        self.confidence = confidence;
        Ok(())
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Complete the step with the rating and the recording reference
    pub async fn complete(&mut self) -> Result<StepEvent, StepError> {
        if self.phase != RepeatPhase::Rate {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "complete",
            });
        }
        self.media.release_all().await;
        Ok(StepEvent::RepeatCompleted {
            confidence: self.confidence,
            recording: self.recording.clone(),
        })
    }

    pub fn has_active_media(&self) -> bool {
        self.media.has_active_media()
    }

    pub async fn release_media(&mut self) {
        self.media.release_all().await;
    }
}
