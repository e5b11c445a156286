use serde::{Serialize, Deserialize};

use super::ReceiverState;

/// Opaque handle to an active receiver connection
///
/// Owned exclusively by the controller for its lifetime; cleared on
/// disconnect or receiver stop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Identifier assigned by the SDK when the session was created or joined
    pub session_id: String,

    /// Friendly display name of the receiver device
    pub receiver_name: String,
}

impl Session {
    /// Create a new session handle
    pub fn new(session_id: String, receiver_name: String) -> Self {
        Self { session_id, receiver_name }
    }
}

/// Handle to the media item currently loaded on the receiver
///
/// Replaced on each successful load, cleared on stop or disconnect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaSession {
    /// Identifier of the media item within the session
    pub media_session_id: String,

    /// URL of the loaded media
    pub content_id: String,

    /// Duration in seconds, -1.0 when unknown
    pub duration: f64,
}

/// Snapshot of the playback state the receiver reports for a media session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaStatus {
    /// Receiver-reported playback state
    pub state: ReceiverState,

    /// Current position in seconds
    pub position: f64,

    /// Duration in seconds, -1.0 when unknown
    pub duration: f64,

    /// URL of the media the status refers to
    pub content_id: String,
}

impl Default for MediaStatus {
    fn default() -> Self {
        Self {
            state: ReceiverState::Unknown,
            position: 0.0,
            duration: -1.0,
            content_id: String::new(),
        }
    }
}
