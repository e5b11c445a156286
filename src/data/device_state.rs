use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

/// Device state enumeration describing connectivity to a receiver
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    /// No current receiver activity
    #[serde(rename = "idle")]
    Idle,
    /// A session is running on a receiver
    #[serde(rename = "active")]
    Active,
    /// The receiver is in use but one or more issues have occurred
    #[serde(rename = "warning")]
    Warning,
    /// Session establishment failed
    #[serde(rename = "error")]
    Error,
}

impl Default for DeviceState {
    fn default() -> Self {
        DeviceState::Idle
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceState::Idle => write!(f, "idle"),
            DeviceState::Active => write!(f, "active"),
            DeviceState::Warning => write!(f, "warning"),
            DeviceState::Error => write!(f, "error"),
        }
    }
}
