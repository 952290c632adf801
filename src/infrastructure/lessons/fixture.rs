//! Fixture lesson source
//!
//! Lessons live as JSON files in a directory, one lesson per file. The
//! canonical layout is `<id>.json`, but any `.json` file whose `id` field
//! matches is accepted so hand-authored fixtures can use friendly names.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{LessonSource, LessonSourceError};
use crate::domain::lesson::Lesson;

/// Lesson source reading JSON fixtures from a directory
pub struct FixtureLessonSource {
    dir: PathBuf,
}

impl FixtureLessonSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse one lesson file
    pub async fn load_file(path: &Path) -> Result<Lesson, LessonSourceError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| LessonSourceError::LoadFailed(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| LessonSourceError::ParseFailed(e.to_string()))
    }

    /// All lessons in the directory, ordered by id.
    /// Unparseable files are skipped rather than failing the listing.
    pub async fn list(&self) -> Result<Vec<Lesson>, LessonSourceError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| LessonSourceError::LoadFailed(e.to_string()))?;

        let mut lessons = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LessonSourceError::LoadFailed(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Ok(lesson) = Self::load_file(&path).await {
                lessons.push(lesson);
            }
        }

        lessons.sort_by_key(|l| l.id);
        Ok(lessons)
    }
}

#[async_trait]
impl LessonSource for FixtureLessonSource {
    async fn lesson(&self, id: u64) -> Result<Lesson, LessonSourceError> {
        let canonical = self.dir.join(format!("{}.json", id));
        if canonical.is_file() {
            let lesson = Self::load_file(&canonical).await?;
            if lesson.id == id {
                return Ok(lesson);
            }
        }

        // Fall back to scanning for a matching id
        let lessons = self.list().await?;
        lessons
            .into_iter()
            .find(|l| l.id == id)
            .ok_or(LessonSourceError::NotFound(id))
    }
}
