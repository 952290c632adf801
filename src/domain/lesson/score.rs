//! Score value object

use std::fmt;

use serde::{Deserialize, Serialize};

use super::response::StepResponse;

/// Final lesson score: the fraction of question responses answered correctly.
///
/// Lessons with no question steps score 1.0 so that pure speaking practice
/// counts as fully successful.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Compute the score over a full response list
    pub fn from_responses(responses: &[StepResponse]) -> Self {
        let mut questions = 0usize;
        let mut correct = 0usize;

        for response in responses {
            if let StepResponse::Question { correct: answered_correctly, .. } = response {
                questions += 1;
                if *answered_correctly {
                    correct += 1;
                }
            }
        }

        if questions == 0 {
            Self(1.0)
        } else {
            Self(correct as f64 / questions as f64)
        }
    }

    /// Score as a fraction in [0.0, 1.0]
    pub const fn value(&self) -> f64 {
        self.0
    }

    pub fn is_perfect(&self) -> bool {
        self.0 >= 1.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}
