//! Media infrastructure adapters
//!
//! Desktop implementations of the playback/recording/session ports, plus
//! no-op variants for muted or headless operation.

mod cpal_recorder;
mod noop;
mod rodio_player;
mod session;

pub use cpal_recorder::CpalVoiceRecorder;
pub use noop::{NoopAudioPlayer, NoopVoiceRecorder};
pub use rodio_player::RodioPlayer;
pub use session::DesktopAudioSession;
