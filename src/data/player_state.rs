use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

/// Player state enumeration defining the local view of receiver playback
///
/// This is the controller's own state space. It is mutated only by the
/// controller itself, either in response to commands it issues or to status
/// events pushed by the receiver. The state the receiver reports for itself
/// lives in a separate enumeration, [`super::ReceiverState`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// No media loaded
    #[serde(rename = "idle")]
    Idle,
    /// A load request is in flight
    #[serde(rename = "loading")]
    Loading,
    /// Media loaded but not started
    #[serde(rename = "loaded")]
    Loaded,
    /// Media is playing on the receiver
    #[serde(rename = "playing")]
    Playing,
    /// Playback is paused
    #[serde(rename = "paused")]
    Paused,
    /// Playback was stopped by the user
    #[serde(rename = "stopped")]
    Stopped,
    /// A seek request is in flight
    #[serde(rename = "seeking")]
    Seeking,
    /// Playback failed
    #[serde(rename = "error")]
    Error,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::Idle
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Loading => write!(f, "loading"),
            PlayerState::Loaded => write!(f, "loaded"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Stopped => write!(f, "stopped"),
            PlayerState::Seeking => write!(f, "seeking"),
            PlayerState::Error => write!(f, "error"),
        }
    }
}
