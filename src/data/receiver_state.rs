use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

use super::PlayerState;

/// Playback state as reported by the receiver itself
///
/// Receiver-reported states and the controller's local [`PlayerState`] are
/// distinct spaces and must never be compared directly; use
/// [`ReceiverState::to_player_state`] to move between them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverState {
    /// Receiver has no media or finished playback
    #[serde(rename = "idle")]
    Idle,
    /// Receiver is buffering media
    #[serde(rename = "buffering")]
    Buffering,
    /// Receiver is playing media
    #[serde(rename = "playing")]
    Playing,
    /// Receiver playback is paused
    #[serde(rename = "paused")]
    Paused,
    /// Receiver state could not be determined
    #[serde(rename = "unknown")]
    Unknown,
}

impl Default for ReceiverState {
    fn default() -> Self {
        ReceiverState::Unknown
    }
}

impl ReceiverState {
    /// Map a receiver-reported state onto the controller's local state space
    pub fn to_player_state(&self) -> PlayerState {
        match self {
            ReceiverState::Playing => PlayerState::Playing,
            ReceiverState::Paused => PlayerState::Paused,
            ReceiverState::Buffering => PlayerState::Loading,
            ReceiverState::Idle => PlayerState::Idle,
            ReceiverState::Unknown => PlayerState::Idle,
        }
    }
}

impl std::fmt::Display for ReceiverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiverState::Idle => write!(f, "idle"),
            ReceiverState::Buffering => write!(f, "buffering"),
            ReceiverState::Playing => write!(f, "playing"),
            ReceiverState::Paused => write!(f, "paused"),
            ReceiverState::Unknown => write!(f, "unknown"),
        }
    }
}
