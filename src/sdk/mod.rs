// Boundary to the vendor casting SDK
//
// Everything the controller needs from the remote-casting stack is expressed
// as explicit operations on the `CastSdk` trait. Session negotiation, device
// discovery, transport and the receiver application itself live behind this
// boundary and are not implemented here.

pub mod null_sdk;

pub use null_sdk::NullCastSdk;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::data::{MediaSession, MediaStatus, RepeatMode, Session};

/// Errors surfaced by the casting SDK
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Cast capability unavailable: {0}")]
    Unavailable(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Command error: {0}")]
    Command(String),
}

/// Parameters for a queue-style load of a single media item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadRequest {
    /// URL of the media to load
    pub content_id: String,

    /// MIME content type of the media
    pub content_type: String,

    /// Whether playback starts as soon as the item is loaded
    pub autoplay: bool,

    /// Start position in seconds
    pub start_time: f64,

    /// Repeat mode for the one-item queue
    pub repeat_mode: RepeatMode,
}

/// Media that was already playing on a joined session
///
/// Returned when a session request attaches to a pre-existing session,
/// e.g. after a page reload on the sender side.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMedia {
    /// Handle to the media item loaded on the receiver
    pub media: MediaSession,

    /// Playback state the receiver reported at join time
    pub status: MediaStatus,
}

/// Result of a successful session request
#[derive(Debug, Clone, PartialEq)]
pub struct SessionHandle {
    /// The established session
    pub session: Session,

    /// Media already playing on the receiver, if any
    pub active_media: Option<ActiveMedia>,
}

/// Abstract interface to the remote-casting SDK
///
/// Each method is a single request to the receiver; the result indicates
/// whether the request was accepted. Asynchronous receiver-originated
/// notifications (session liveness, media status pushes) are delivered by the
/// host runtime to the controller's `on_session_update` and
/// `on_media_status_update` entry points instead of through this trait.
pub trait CastSdk: Send + Sync {
    /// Availability probe for the casting capability
    fn is_available(&self) -> bool;

    /// Request that a receiver application session be created or joined
    fn request_session(&self, app_id: &str) -> Result<SessionHandle, SdkError>;

    /// Stop the receiver application associated with the session
    fn stop_session(&self, session_id: &str) -> Result<(), SdkError>;

    /// Load media into the running receiver application
    fn load(&self, session_id: &str, request: LoadRequest) -> Result<MediaSession, SdkError>;

    /// Resume playback of the current media item
    fn play(&self, media_session_id: &str) -> Result<(), SdkError>;

    /// Pause playback of the current media item
    fn pause(&self, media_session_id: &str) -> Result<(), SdkError>;

    /// Stop playback of the current media item
    fn stop_media(&self, media_session_id: &str) -> Result<(), SdkError>;

    /// Seek to an absolute position in seconds
    fn seek(&self, media_session_id: &str, position: f64) -> Result<(), SdkError>;

    /// Set the repeat mode of the receiver's queue
    fn set_repeat_mode(&self, media_session_id: &str, mode: RepeatMode) -> Result<(), SdkError>;

    /// Set the receiver volume level (0.0 to 1.0)
    fn set_volume(&self, session_id: &str, level: f64) -> Result<(), SdkError>;

    /// Mute or unmute the receiver
    fn set_muted(&self, session_id: &str, muted: bool) -> Result<(), SdkError>;

    /// Read the receiver-reported status of a media session
    fn media_status(&self, media_session_id: &str) -> Result<MediaStatus, SdkError>;
}
