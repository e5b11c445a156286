/// Data structures for device, playback and receiver state
pub mod data;

/// Cast session/playback controller and listener infrastructure
pub mod controller;

/// Boundary to the vendor casting SDK
pub mod sdk;

/// Helper utilities for formatting, retries and media types
pub mod helpers;

/// Configuration handling
pub mod config;

// Re-export items for easier access
pub use data::{CastEvent, DeviceState, PlayerState, ReceiverState, RepeatMode};
pub use controller::{CastController, CastStateListener};
pub use sdk::{CastSdk, NullCastSdk, SdkError};
pub use config::CastConfig;
