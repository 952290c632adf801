//! Confidence value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfidenceOutOfRange;

/// Self-assessed confidence collected after a repeat step's recording review.
/// An integer on a 1-5 scale, validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a confidence rating, rejecting values outside 1-5
    pub const fn new(value: u8) -> Result<Self, ConfidenceOutOfRange> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(ConfidenceOutOfRange { value })
        }
    }

    /// The raw 1-5 rating
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Descriptive label shown next to the rating
    pub const fn label(&self) -> &'static str {
        match self.0 {
            1 => "Not at all confident",
            2 => "Slightly confident",
            3 => "Somewhat confident",
            4 => "Confident",
            _ => "Very confident",
        }
    }
}

impl Default for Confidence {
    /// The scale's midpoint, preselected in the rating UI
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Confidence {
    type Error = ConfidenceOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for u8 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
