//! Lesson entity

use serde::Deserialize;

use super::step::Step;

/// Kinds of lessons offered by the content catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    /// Listening comprehension
    Gist,
    /// Repetition/speaking practice
    Chunk,
    /// Interactive roleplay
    Roleplay,
}

impl LessonType {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gist => "gist",
            Self::Chunk => "chunk",
            Self::Roleplay => "roleplay",
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single lesson: an ordered sequence of steps.
/// Constructed once per play-through and immutable during a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lesson {
    pub id: u64,
    pub lesson_type: LessonType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<Step>,
    #[serde(default = "default_estimated_minutes")]
    pub estimated_minutes: u16,
}

fn default_estimated_minutes() -> u16 {
    5
}

impl Lesson {
    /// Number of steps in this lesson
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of question steps in this lesson
    pub fn question_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Question(_)))
            .count()
    }
}
