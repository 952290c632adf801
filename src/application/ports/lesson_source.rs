//! Lesson source port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::lesson::Lesson;

/// Lesson loading errors
#[derive(Debug, Clone, Error)]
pub enum LessonSourceError {
    #[error("Lesson {0} not found")]
    NotFound(u64),

    #[error("Failed to load lesson: {0}")]
    LoadFailed(String),

    #[error("Failed to parse lesson: {0}")]
    ParseFailed(String),
}

/// Port for supplying lessons by identifier.
/// The runner does not care whether this is fixture data or a network fetch.
#[async_trait]
pub trait LessonSource: Send + Sync {
    async fn lesson(&self, id: u64) -> Result<Lesson, LessonSourceError>;
}
