use crate::data::{DeviceState, PlayerState, RepeatMode};
use serde::{Serialize, Deserialize};

/// Represents the state change notifications the controller pushes to the
/// UI layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CastEvent {
    /// Device connectivity has changed
    DeviceStateChanged {
        state: DeviceState,
    },

    /// The local playback state has changed
    PlayerStateChanged {
        state: PlayerState,
    },

    /// Playback position has changed
    PositionChanged {
        position: f64,
    },

    /// Duration of the loaded media became known or changed
    DurationChanged {
        duration: f64,
    },

    /// The now-playing URL has changed
    NowPlayingChanged {
        url: Option<String>,
    },

    /// Receiver volume or mute state has changed
    VolumeChanged {
        level: f64,
        muted: bool,
    },

    /// Queue repeat mode has changed
    RepeatModeChanged {
        mode: RepeatMode,
    },
}
