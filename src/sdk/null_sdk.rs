use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use log::{debug, info, warn};

use crate::data::{MediaSession, MediaStatus, ReceiverState, RepeatMode, Session};
use crate::sdk::{ActiveMedia, CastSdk, LoadRequest, SdkError, SessionHandle};

/// A casting SDK implementation without a real receiver
///
/// Requests are applied to an in-memory receiver model instead of being sent
/// over the network. Useful for demos and testing: the modeled receiver
/// status can be inspected and overwritten, and individual request classes
/// can be switched to fail.
pub struct NullCastSdk {
    /// Whether the availability probe reports the capability as present
    available: AtomicBool,

    /// Receiver-side status of the currently loaded media
    status: RwLock<MediaStatus>,

    /// Media already playing when the next session request joins
    active_media: RwLock<Option<ActiveMedia>>,

    /// Duration reported for loaded media
    media_duration: RwLock<f64>,

    /// Receiver volume model
    volume: RwLock<f64>,
    muted: AtomicBool,

    /// Last repeat mode requested on the queue
    repeat_mode: RwLock<RepeatMode>,

    /// Last seek target received, if any
    last_seek: RwLock<Option<f64>>,

    /// Counter used to hand out media session ids
    media_counter: AtomicUsize,

    /// Failure injection flags
    fail_session: AtomicBool,
    fail_load: AtomicBool,
    fail_command: AtomicBool,
}

impl NullCastSdk {
    /// Create a new null SDK with an available capability and an empty receiver
    pub fn new() -> Self {
        debug!("Creating new NullCastSdk");
        Self {
            available: AtomicBool::new(true),
            status: RwLock::new(MediaStatus::default()),
            active_media: RwLock::new(None),
            media_duration: RwLock::new(120.0),
            volume: RwLock::new(0.5),
            muted: AtomicBool::new(false),
            repeat_mode: RwLock::new(RepeatMode::Off),
            last_seek: RwLock::new(None),
            media_counter: AtomicUsize::new(0),
            fail_session: AtomicBool::new(false),
            fail_load: AtomicBool::new(false),
            fail_command: AtomicBool::new(false),
        }
    }

    /// Control what the availability probe reports
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make session requests fail
    pub fn fail_sessions(&self, fail: bool) {
        self.fail_session.store(fail, Ordering::SeqCst);
    }

    /// Make load requests fail
    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    /// Make media command requests fail
    pub fn fail_commands(&self, fail: bool) {
        self.fail_command.store(fail, Ordering::SeqCst);
    }

    /// Set the duration reported for subsequently loaded media
    pub fn set_media_duration(&self, duration: f64) {
        if let Ok(mut d) = self.media_duration.write() {
            *d = duration;
        }
    }

    /// Overwrite the receiver-side status, simulating a change made by
    /// another controller connected to the same receiver
    pub fn set_status(&self, status: MediaStatus) {
        if let Ok(mut s) = self.status.write() {
            *s = status;
        } else {
            warn!("Failed to acquire write lock for receiver status");
        }
    }

    /// Prime the next session request with already-playing media
    pub fn set_active_media(&self, active: Option<ActiveMedia>) {
        if let Ok(mut m) = self.active_media.write() {
            *m = active;
        }
    }

    /// Current receiver volume model
    pub fn get_volume(&self) -> f64 {
        self.volume.read().map(|v| *v).unwrap_or(0.0)
    }

    /// Current receiver mute model
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    /// Last repeat mode requested on the queue
    pub fn get_repeat_mode(&self) -> RepeatMode {
        self.repeat_mode.read().map(|m| *m).unwrap_or(RepeatMode::Off)
    }

    /// Last seek target received
    pub fn get_last_seek(&self) -> Option<f64> {
        self.last_seek.read().ok().and_then(|s| *s)
    }

    fn check_command(&self) -> Result<(), SdkError> {
        if self.fail_command.load(Ordering::SeqCst) {
            Err(SdkError::Command("request rejected by receiver".to_string()))
        } else {
            Ok(())
        }
    }

    fn set_receiver_state(&self, state: ReceiverState) {
        if let Ok(mut status) = self.status.write() {
            status.state = state;
        } else {
            warn!("Failed to acquire write lock for receiver status");
        }
    }
}

impl Default for NullCastSdk {
    fn default() -> Self {
        Self::new()
    }
}

impl CastSdk for NullCastSdk {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn request_session(&self, app_id: &str) -> Result<SessionHandle, SdkError> {
        if self.fail_session.load(Ordering::SeqCst) {
            return Err(SdkError::Session("session request rejected".to_string()));
        }
        info!("NullCastSdk: session requested for app {}", app_id);

        let active_media = self.active_media.read().map(|m| m.clone()).unwrap_or(None);
        if let Some(active) = &active_media {
            // Joined sessions expose the receiver status of the running media
            self.set_status(active.status.clone());
        }

        Ok(SessionHandle {
            session: Session::new("null-session".to_string(), "Null Receiver".to_string()),
            active_media,
        })
    }

    fn stop_session(&self, session_id: &str) -> Result<(), SdkError> {
        self.check_command()?;
        info!("NullCastSdk: stopping session {}", session_id);
        self.set_receiver_state(ReceiverState::Idle);
        Ok(())
    }

    fn load(&self, session_id: &str, request: LoadRequest) -> Result<MediaSession, SdkError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(SdkError::Load("load request rejected".to_string()));
        }

        let duration = self.media_duration.read().map(|d| *d).unwrap_or(-1.0);
        let id = self.media_counter.fetch_add(1, Ordering::SeqCst);
        debug!("NullCastSdk: loading {} ({}) on session {}",
            request.content_id, request.content_type, session_id);

        if let Ok(mut mode) = self.repeat_mode.write() {
            *mode = request.repeat_mode;
        }
        if let Ok(mut status) = self.status.write() {
            status.state = if request.autoplay {
                ReceiverState::Playing
            } else {
                ReceiverState::Idle
            };
            status.position = request.start_time;
            status.duration = duration;
            status.content_id = request.content_id.clone();
        }

        Ok(MediaSession {
            media_session_id: format!("null-media-{}", id),
            content_id: request.content_id,
            duration,
        })
    }

    fn play(&self, media_session_id: &str) -> Result<(), SdkError> {
        self.check_command()?;
        debug!("NullCastSdk: play on {}", media_session_id);
        self.set_receiver_state(ReceiverState::Playing);
        Ok(())
    }

    fn pause(&self, media_session_id: &str) -> Result<(), SdkError> {
        self.check_command()?;
        debug!("NullCastSdk: pause on {}", media_session_id);
        self.set_receiver_state(ReceiverState::Paused);
        Ok(())
    }

    fn stop_media(&self, media_session_id: &str) -> Result<(), SdkError> {
        self.check_command()?;
        debug!("NullCastSdk: stop on {}", media_session_id);
        self.set_receiver_state(ReceiverState::Idle);
        Ok(())
    }

    fn seek(&self, media_session_id: &str, position: f64) -> Result<(), SdkError> {
        self.check_command()?;
        debug!("NullCastSdk: seek {} to {:.1}s", media_session_id, position);
        if let Ok(mut last) = self.last_seek.write() {
            *last = Some(position);
        }
        if let Ok(mut status) = self.status.write() {
            status.position = position;
        }
        Ok(())
    }

    fn set_repeat_mode(&self, media_session_id: &str, mode: RepeatMode) -> Result<(), SdkError> {
        self.check_command()?;
        debug!("NullCastSdk: repeat mode {} on {}", mode, media_session_id);
        if let Ok(mut m) = self.repeat_mode.write() {
            *m = mode;
        }
        Ok(())
    }

    fn set_volume(&self, session_id: &str, level: f64) -> Result<(), SdkError> {
        self.check_command()?;
        debug!("NullCastSdk: volume {:.2} on session {}", level, session_id);
        if let Ok(mut v) = self.volume.write() {
            *v = level;
        }
        Ok(())
    }

    fn set_muted(&self, session_id: &str, muted: bool) -> Result<(), SdkError> {
        self.check_command()?;
        debug!("NullCastSdk: muted={} on session {}", muted, session_id);
        self.muted.store(muted, Ordering::SeqCst);
        Ok(())
    }

    fn media_status(&self, _media_session_id: &str) -> Result<MediaStatus, SdkError> {
        match self.status.read() {
            Ok(status) => Ok(status.clone()),
            Err(_) => Err(SdkError::Command(
                "receiver status unavailable".to_string(),
            )),
        }
    }
}
