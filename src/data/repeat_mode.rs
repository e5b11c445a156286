use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

/// Repeat mode enumeration for the receiver's playback queue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// No repeat
    #[serde(rename = "off")]
    Off,
    /// Repeat the entire queue
    #[serde(rename = "all")]
    All,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::Off
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatMode::Off => write!(f, "off"),
            RepeatMode::All => write!(f, "all"),
        }
    }
}
