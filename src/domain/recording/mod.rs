//! Recording domain module

mod uri;

pub use uri::RecordingUri;
