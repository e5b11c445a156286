// Configuration for the cast controller
//
// All fields fall back to sensible defaults so a partial configuration
// object (or none at all) is enough to construct a controller.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

fn default_receiver_app_id() -> String {
    // Default media receiver application
    "CC1AD845".to_string()
}

fn default_autoplay() -> bool {
    true
}

fn default_timer_step_ms() -> u64 {
    1000
}

fn default_volume_step() -> f64 {
    0.1
}

fn default_volume() -> f64 {
    0.5
}

fn default_availability_attempts() -> usize {
    10
}

fn default_availability_interval_ms() -> u64 {
    1000
}

/// Controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastConfig {
    /// Receiver application to launch
    #[serde(default = "default_receiver_app_id")]
    pub receiver_app_id: String,

    /// Whether loaded media starts playing immediately
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    /// Progress ticker period in milliseconds
    #[serde(default = "default_timer_step_ms")]
    pub timer_step_ms: u64,

    /// Volume adjustment applied per call
    #[serde(default = "default_volume_step")]
    pub volume_step: f64,

    /// Initial volume level
    #[serde(default = "default_volume")]
    pub default_volume: f64,

    /// Number of availability probes before giving up
    #[serde(default = "default_availability_attempts")]
    pub availability_attempts: usize,

    /// Interval between availability probes in milliseconds
    #[serde(default = "default_availability_interval_ms")]
    pub availability_interval_ms: u64,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            receiver_app_id: default_receiver_app_id(),
            autoplay: default_autoplay(),
            timer_step_ms: default_timer_step_ms(),
            volume_step: default_volume_step(),
            default_volume: default_volume(),
            availability_attempts: default_availability_attempts(),
            availability_interval_ms: default_availability_interval_ms(),
        }
    }
}

impl CastConfig {
    /// Read a configuration from a JSON value
    ///
    /// Missing fields fall back to their defaults; an invalid value is
    /// rejected as a whole and replaced by the default configuration.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(config) => {
                debug!("Loaded cast configuration: {:?}", config);
                config
            }
            Err(e) => {
                warn!("Invalid cast configuration, using defaults: {}", e);
                CastConfig::default()
            }
        }
    }
}
