//! Step response entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use crate::domain::recording::RecordingUri;

/// The recorded outcome of completing one scored or recorded step.
///
/// Audio and reveal steps leave no response behind: listening is not graded
/// and a reveal only consumes the preceding question's correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepResponse {
    Question {
        step_id: String,
        selected_index: usize,
        correct: bool,
        answered_at: DateTime<Utc>,
    },
    Repeat {
        step_id: String,
        confidence: Confidence,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recording: Option<RecordingUri>,
        answered_at: DateTime<Utc>,
    },
    Roleplay {
        step_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recording: Option<RecordingUri>,
        answered_at: DateTime<Utc>,
    },
}

impl StepResponse {
    /// Identifier of the step this response belongs to
    pub fn step_id(&self) -> &str {
        match self {
            Self::Question { step_id, .. }
            | Self::Repeat { step_id, .. }
            | Self::Roleplay { step_id, .. } => step_id,
        }
    }

    /// When the response was captured
    pub fn answered_at(&self) -> DateTime<Utc> {
        match self {
            Self::Question { answered_at, .. }
            | Self::Repeat { answered_at, .. }
            | Self::Roleplay { answered_at, .. } => *answered_at,
        }
    }

    /// Whether this is a correctly answered question.
    /// Speaking responses carry no grade and report `false`.
    pub fn is_correct_answer(&self) -> bool {
        matches!(self, Self::Question { correct: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_response_serializes_with_tag() {
        let response = StepResponse::Question {
            step_id: "q1".into(),
            selected_index: 2,
            correct: true,
            answered_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "question");
        assert_eq!(json["step_id"], "q1");
        assert_eq!(json["selected_index"], 2);
        assert_eq!(json["correct"], true);
    }

    #[test]
    fn repeat_response_omits_missing_recording() {
        let response = StepResponse::Repeat {
            step_id: "c1".into(),
            confidence: Confidence::default(),
            recording: None,
            answered_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "repeat");
        assert_eq!(json["confidence"], 3);
        assert!(json.get("recording").is_none());
    }

    #[test]
    fn roleplay_response_round_trips() {
        let response = StepResponse::Roleplay {
            step_id: "rp1".into(),
            recording: Some(RecordingUri::new("/tmp/r.flac").unwrap()),
            answered_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        let back: StepResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn is_correct_answer_only_for_correct_questions() {
        let correct = StepResponse::Question {
            step_id: "q1".into(),
            selected_index: 0,
            correct: true,
            answered_at: Utc::now(),
        };
        let wrong = StepResponse::Question {
            step_id: "q2".into(),
            selected_index: 1,
            correct: false,
            answered_at: Utc::now(),
        };
        let spoken = StepResponse::Roleplay {
            step_id: "rp1".into(),
            recording: None,
            answered_at: Utc::now(),
        };

        assert!(correct.is_correct_answer());
        assert!(!wrong.is_correct_answer());
        assert!(!spoken.is_correct_answer());
    }
}
