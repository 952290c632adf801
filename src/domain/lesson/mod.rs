//! Lesson domain module
//!
//! The lesson/step/response schema is the stable contract between content
//! authoring and the runner; field names follow the lesson JSON shape.

mod attempt;
mod confidence;
mod model;
mod response;
mod score;
mod step;

pub use attempt::AttemptSummary;
pub use confidence::Confidence;
pub use model::{Lesson, LessonType};
pub use response::StepResponse;
pub use score::Score;
pub use step::{
    AudioStep, KeyPhrase, QuestionStep, RepeatStep, RevealStep, RoleplayStep, Step,
    SuggestedResponse,
};
