//! Attempt summary entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::StepResponse;
use super::score::Score;

/// Everything the completion sink receives when a run finishes.
/// Shaped for backend submission: score, responses and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub lesson_id: u64,
    pub responses: Vec<StepResponse>,
    pub score: Score,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_seconds: u64,
}

impl AttemptSummary {
    /// Assemble a summary for a finished run
    pub fn new(
        lesson_id: u64,
        responses: Vec<StepResponse>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let score = Score::from_responses(&responses);
        let duration_seconds = completed_at
            .signed_duration_since(started_at)
            .num_seconds()
            .max(0) as u64;

        Self {
            lesson_id,
            responses,
            score,
            started_at,
            completed_at,
            duration_seconds,
        }
    }
}
