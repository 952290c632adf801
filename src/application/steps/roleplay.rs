//! Roleplay step view
//!
//! Phase machine: listen -> respond -> feedback. The prompt plays first,
//! then the user records a free-form response; feedback offers both
//! playbacks plus the suggested responses as reference material. Retrying
//! from feedback keeps the listened state so the user is not forced to hear
//! the prompt again.

use std::fmt;

use crate::application::media::StepMedia;
use crate::domain::lesson::{RoleplayStep, SuggestedResponse};
use crate::domain::recording::RecordingUri;

use super::{StepError, StepEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleplayPhase {
    #[default]
    Listen,
    Responding,
    Feedback,
}

impl RoleplayPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Listen => "listen",
            Self::Responding => "responding",
            Self::Feedback => "feedback",
        }
    }
}

impl fmt::Display for RoleplayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct RoleplayStepView {
    step: RoleplayStep,
    media: StepMedia,
    phase: RoleplayPhase,
    has_listened: bool,
    recording: Option<RecordingUri>,
    error: Option<String>,
}

impl RoleplayStepView {
    pub fn new(step: RoleplayStep, media: StepMedia) -> Self {
        Self {
            step,
            media,
            phase: RoleplayPhase::Listen,
            has_listened: false,
            recording: None,
            error: None,
        }
    }

    pub fn step(&self) -> &RoleplayStep {
        &self.step
    }

    pub fn phase(&self) -> RoleplayPhase {
        self.phase
    }

    pub fn has_listened(&self) -> bool {
        self.has_listened
    }

    pub fn recording(&self) -> Option<&RecordingUri> {
        self.recording.as_ref()
    }

    /// Reference phrases shown during feedback. Never graded.
    pub fn suggested_responses(&self) -> &[SuggestedResponse] {
        &self.step.suggested_responses
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Play the situational prompt. Available while listening and again
    /// during feedback for comparison.
    pub async fn play_prompt(&mut self) -> Result<(), StepError> {
        match self.phase {
            RoleplayPhase::Listen | RoleplayPhase::Feedback => {}
            phase => {
                return Err(StepError::Phase {
                    phase: phase.as_str(),
                    action: "play the prompt",
                })
            }
        }

        match self.media.play_prompt(&self.step.audio_url).await {
            Ok(()) => self.error = None,
            Err(e) => {
                // Prompt failure must not block the step
                self.error = Some(e.to_string());
                self.has_listened = true;
            }
        }
        Ok(())
    }

    /// Input event: the prompt ran to its natural end
    pub fn playback_finished(&mut self) {
        self.has_listened = true;
    }

    /// Poll hook for shells without status callbacks
    pub fn prompt_finished(&self) -> bool {
        self.media.prompt_finished()
    }

    /// Begin recording the free-form response.
    /// Device failures surface inline; the phase stays at listen.
    pub async fn start_recording(&mut self) -> Result<(), StepError> {
        if self.phase != RoleplayPhase::Listen {
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
                self.phase = RoleplayPhase::Responding;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        Ok(())
    }

    /// Stop recording; a usable URI moves to feedback, failure falls back
    /// to listening without requiring a re-listen.
    pub async fn stop_recording(&mut self) -> Result<(), StepError> {
        if self.phase != RoleplayPhase::Responding {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "stop recording",
            });
        }

        match self.media.finish_recording().await {
            Ok(uri) => {
                self.recording = Some(uri);
                self.error = None;
                self.phase = RoleplayPhase::Feedback;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = RoleplayPhase::Listen;
            }
        }
        Ok(())
    }

    /// Play back the user's response during feedback
    pub async fn play_recording(&mut self) -> Result<(), StepError> {
        if self.phase != RoleplayPhase::Feedback {
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

    /// Discard the response and record another; the prompt counts as heard
    pub async fn retry(&mut self) -> Result<(), StepError> {
        if self.phase != RoleplayPhase::Feedback {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "retry",
            });
        }
        self.media.release_all().await;
        self.recording = None;
        self.phase = RoleplayPhase::Listen;
        self.has_listened = true;
        Ok(())
    }

    /// Complete the step with the recording reference
    pub async fn complete(&mut self) -> Result<StepEvent, StepError> {
        if self.phase != RoleplayPhase::Feedback {
            return Err(StepError::Phase {
                phase: self.phase.as_str(),
                action: "complete",
            });
        }
        self.media.release_all().await;
        Ok(StepEvent::RoleplayCompleted {
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
