//! Lesson source infrastructure adapters

mod fixture;

pub use fixture::FixtureLessonSource;
