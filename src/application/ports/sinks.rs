//! Completion and exit port interfaces

use async_trait::async_trait;

use crate::domain::lesson::AttemptSummary;

/// Port receiving the finished attempt when the last step completes.
/// Backend submission lives behind this seam.
#[async_trait]
pub trait CompletionSink: Send + Sync {
    async fn lesson_completed(&self, summary: &AttemptSummary);
}

/// Port owning the abandon-run confirmation UX.
///
/// Exiting mid-lesson is destructive (progress is discarded), so the runner
/// asks before abandoning. Returning false keeps the run alive.
#[async_trait]
pub trait ExitSink: Send + Sync {
    async fn confirm_exit(&self) -> bool;
}
