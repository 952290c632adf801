//! Recording URI value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::EmptyRecordingUri;

/// Location of a finalized recording on local storage.
/// Guaranteed non-empty; a recorder that yields no URI failed to finalize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordingUri(String);

impl RecordingUri {
    /// Create a recording URI, rejecting empty strings
    pub fn new(uri: impl Into<String>) -> Result<Self, EmptyRecordingUri> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err(EmptyRecordingUri);
        }
        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordingUri {
    type Error = EmptyRecordingUri;

    fn try_from(uri: String) -> Result<Self, Self::Error> {
        Self::new(uri)
    }
}

impl From<RecordingUri> for String {
    fn from(uri: RecordingUri) -> Self {
        uri.0
    }
}

impl fmt::Display for RecordingUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty() {
        let uri = RecordingUri::new("/tmp/recording-1.flac").unwrap();
        assert_eq!(uri.as_str(), "/tmp/recording-1.flac");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(RecordingUri::new("").is_err());
        assert!(RecordingUri::new("   ").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let uri = RecordingUri::new("file:///tmp/r.flac").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, "\"file:///tmp/r.flac\"");
        let back: RecordingUri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uri);
    }

    #[test]
    fn deserializing_empty_fails() {
        assert!(serde_json::from_str::<RecordingUri>("\"\"").is_err());
    }
}
