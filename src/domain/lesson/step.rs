//! Step schema
//!
//! Steps are polymorphic over their `type` tag. The enum is deliberately
//! closed: adding a step type breaks every match in the runner at compile
//! time instead of falling through at runtime.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// One unit of lesson interaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Audio(AudioStep),
    Question(QuestionStep),
    Reveal(RevealStep),
    Repeat(RepeatStep),
    Roleplay(RoleplayStep),
}

impl Step {
    /// Step identifier, unique within a lesson
    pub fn id(&self) -> &str {
        match self {
            Self::Audio(s) => &s.id,
            Self::Question(s) => &s.id,
            Self::Reveal(s) => &s.id,
            Self::Repeat(s) => &s.id,
            Self::Roleplay(s) => &s.id,
        }
    }

    /// The `type` tag this step carries in lesson JSON
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Audio(_) => "audio",
            Self::Question(_) => "question",
            Self::Reveal(_) => "reveal",
            Self::Repeat(_) => "repeat",
            Self::Roleplay(_) => "roleplay",
        }
    }
}

/// Listening step: play a clip, completion is "listened at least once"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioStep {
    pub id: String,
    pub audio_url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Multiple-choice comprehension question
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionStep {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    /// Clip the question refers to, replayable while answering
    #[serde(default)]
    pub audio_url: Option<String>,
}

impl QuestionStep {
    /// Whether the given option index is the correct answer
    pub fn is_correct(&self, selected_index: usize) -> bool {
        selected_index == self.correct_index
    }
}

/// Answer reveal with transcript, translation and study material
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevealStep {
    pub id: String,
    pub correct_answer: String,
    pub transcript: String,
    pub translation: String,
    #[serde(default)]
    pub key_phrases: Vec<KeyPhrase>,
    #[serde(default)]
    pub tip: Option<String>,
    /// Optional prompt replay
    #[serde(default)]
    pub audio_url: Option<String>,
}

/// Pronunciation practice: listen, record, review, rate
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepeatStep {
    pub id: String,
    pub audio_url: String,
    pub phrase: String,
    pub translation: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub tip: Option<String>,
}

/// Free-form conversational response to a situational prompt
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoleplayStep {
    pub id: String,
    pub audio_url: String,
    pub context: String,
    pub task: String,
    #[serde(default)]
    pub suggested_responses: Vec<SuggestedResponse>,
}

/// A model answer shown as pedagogical reference, never graded
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestedResponse {
    pub phrase: String,
    pub translation: String,
}

/// A foreign-term/English-term pair from a reveal step.
///
/// Authored as a two-entry JSON map where the English side is always keyed
/// `"english"` and the foreign side is keyed by the lesson's language
/// (`"spanish"`, `"french"`, ...). Key order is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPhrase {
    pub term: String,
    pub translation: String,
}

impl<'de> Deserialize<'de> for KeyPhrase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyPhraseVisitor;

        impl<'de> Visitor<'de> for KeyPhraseVisitor {
            type Value = KeyPhrase;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with an \"english\" entry and one foreign-language entry")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut term: Option<String> = None;
                let mut translation: Option<String> = None;

                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    if key == "english" {
                        translation = Some(value);
                    } else if term.is_none() {
                        // Whatever the foreign key is called, its value is the term
                        term = Some(value);
                    }
                }

                let term = term
                    .ok_or_else(|| serde::de::Error::custom("key phrase missing foreign term"))?;
                let translation = translation.ok_or_else(|| {
                    serde::de::Error::custom("key phrase missing \"english\" entry")
                })?;

                Ok(KeyPhrase { term, translation })
            }
        }

        deserializer.deserialize_map(KeyPhraseVisitor)
    }
}
