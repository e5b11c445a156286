use std::sync::{Arc, Weak, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use delegate::delegate;
use log::{debug, info, warn};

use crate::config::CastConfig;
use crate::controller::base_controller::{BaseController, CastStateListener};
use crate::controller::ticker::ProgressTicker;
use crate::data::{
    DeviceState, MediaSession, PlayerState, ReceiverState, RepeatMode, Session,
};
use crate::helpers::retry::RetryHandler;
use crate::sdk::{ActiveMedia, CastSdk, LoadRequest, SdkError};

/// Cast session/playback controller
///
/// Owns the connection to a receiver device and the local view of its
/// playback state. Commands issued by the UI layer update the local state
/// optimistically before the receiver acknowledges them; asynchronous
/// receiver-originated notifications are fed in through
/// [`CastController::on_session_update`] and
/// [`CastController::on_media_status_update`] and reconciled against the
/// local state.
///
/// All request failures are absorbed into state transitions; no command
/// propagates an error to the caller beyond its boolean success indicator.
pub struct CastController {
    /// Listener management
    base: BaseController,

    /// Boundary to the vendor casting SDK
    sdk: Arc<dyn CastSdk>,

    /// Controller configuration
    config: CastConfig,

    /// Current device connectivity state
    device_state: Arc<RwLock<DeviceState>>,

    /// Local view of receiver playback
    player_state: Arc<RwLock<PlayerState>>,

    /// Active receiver connection, None when disconnected
    session: Arc<RwLock<Option<Session>>>,

    /// Media item currently loaded on the receiver
    media_session: Arc<RwLock<Option<MediaSession>>>,

    /// Playback clock
    position: Arc<RwLock<f64>>,
    duration: Arc<RwLock<f64>>,

    /// URL and content type of the current media
    now_playing: Arc<RwLock<Option<String>>>,
    content_type: Arc<RwLock<Option<String>>>,

    /// Receiver volume; muting does not change the stored level
    volume: Arc<RwLock<f64>>,
    muted: Arc<AtomicBool>,

    /// Repeat mode applied to loads and repeat commands
    repeat_mode: Arc<RwLock<RepeatMode>>,

    /// Whether loads start playback immediately
    autoplay: Arc<AtomicBool>,

    /// Progress ticker interpolating the position between status pushes
    ticker: Arc<RwLock<ProgressTicker>>,
}

impl CastController {
    /// Create a new controller with the default configuration
    pub fn new(sdk: Arc<dyn CastSdk>) -> Self {
        Self::with_config(sdk, CastConfig::default())
    }

    /// Create a new controller with the given configuration
    pub fn with_config(sdk: Arc<dyn CastSdk>, config: CastConfig) -> Self {
        debug!("Creating new CastController");
        let ticker_period = Duration::from_millis(config.timer_step_ms);
        Self {
            base: BaseController::new(),
            sdk,
            device_state: Arc::new(RwLock::new(DeviceState::Idle)),
            player_state: Arc::new(RwLock::new(PlayerState::Idle)),
            session: Arc::new(RwLock::new(None)),
            media_session: Arc::new(RwLock::new(None)),
            position: Arc::new(RwLock::new(0.0)),
            duration: Arc::new(RwLock::new(-1.0)),
            now_playing: Arc::new(RwLock::new(None)),
            content_type: Arc::new(RwLock::new(None)),
            volume: Arc::new(RwLock::new(config.default_volume)),
            muted: Arc::new(AtomicBool::new(false)),
            repeat_mode: Arc::new(RwLock::new(RepeatMode::Off)),
            autoplay: Arc::new(AtomicBool::new(config.autoplay)),
            ticker: Arc::new(RwLock::new(ProgressTicker::new(ticker_period))),
            config,
        }
    }

    delegate! {
        to self.base {
            /// Register a state listener to be notified of state changes
            pub fn register_state_listener(&self, listener: Weak<dyn CastStateListener>) -> bool;

            /// Unregister a previously registered state listener
            pub fn unregister_state_listener(&self, listener: &Arc<dyn CastStateListener>) -> bool;

            /// Friendly name of the connected receiver, if any
            pub fn get_receiver_name(&self) -> Option<String>;
        }
    }

    /// Poll for SDK availability with bounded retries
    ///
    /// Fails permanently once the retries are exhausted; the caller should
    /// direct the user to install or enable the casting capability.
    pub fn initialize(&self) -> Result<(), SdkError> {
        let mut retry = RetryHandler::new(
            self.config.availability_attempts,
            Duration::from_millis(self.config.availability_interval_ms),
        );
        let sdk = Arc::clone(&self.sdk);
        let available = retry.execute_with_retry(
            || if sdk.is_available() { Some(()) } else { None },
            "cast availability probe",
        );
        match available {
            Some(()) => {
                info!("Cast capability available");
                Ok(())
            }
            None => Err(SdkError::Unavailable(
                "cast capability not present after bounded retries".to_string(),
            )),
        }
    }

    /// Request that a receiver application session be created or joined
    ///
    /// When the request joins a pre-existing session with media already
    /// playing, the local state is reconstructed from the receiver's report
    /// without issuing a fresh load.
    pub fn launch(&self) -> bool {
        info!("Launching receiver app {}", self.config.receiver_app_id);
        self.stop_progress_ticker();

        match self.sdk.request_session(&self.config.receiver_app_id) {
            Ok(handle) => {
                info!("Connected to {}", handle.session.receiver_name);
                self.base.set_receiver_name(Some(handle.session.receiver_name.clone()));
                if let Ok(mut session) = self.session.write() {
                    *session = Some(handle.session);
                } else {
                    warn!("Failed to acquire write lock when storing session");
                }
                self.set_device_state(DeviceState::Active);
                if let Some(active) = handle.active_media {
                    self.attach_existing_media(active);
                }
                true
            }
            Err(e) => {
                warn!("Session request failed: {}", e);
                self.set_device_state(DeviceState::Error);
                false
            }
        }
    }

    /// Session-liveness notification from the SDK
    ///
    /// A dead session triggers the authoritative teardown path; the
    /// operation is idempotent.
    pub fn on_session_update(&self, alive: bool) {
        if alive {
            debug!("Session update: alive");
            return;
        }
        info!("Session ended by receiver");
        self.teardown();
    }

    /// Stop the receiver application
    pub fn stop_app(&self) -> bool {
        let session_id = match self.session_id() {
            Some(id) => id,
            None => {
                debug!("Stop requested without a session");
                return false;
            }
        };

        match self.sdk.stop_session(&session_id) {
            Ok(()) => {
                info!("Receiver application stopped");
                self.teardown();
                true
            }
            Err(e) => {
                warn!("Stop request failed: {}", e);
                false
            }
        }
    }

    /// Load media into the running receiver application
    ///
    /// Builds a queue-style load with a single item, honoring the current
    /// repeat mode and autoplay flag. Requires an established session;
    /// a failed load reverts to idle and may be retried by the caller.
    pub fn load_media(&self, url: &str, content_type: &str) -> bool {
        let session_id = match self.session_id() {
            Some(id) => id,
            None => {
                debug!("Load requested without a session");
                return false;
            }
        };

        info!("Loading {}", url);
        self.set_now_playing(Some(url.to_string()));
        if let Ok(mut ct) = self.content_type.write() {
            *ct = Some(content_type.to_string());
        }

        let autoplay = self.autoplay.load(Ordering::SeqCst);
        let request = LoadRequest {
            content_id: url.to_string(),
            content_type: content_type.to_string(),
            autoplay,
            start_time: 0.0,
            repeat_mode: self.get_repeat_mode(),
        };

        self.set_player_state(PlayerState::Loading);
        match self.sdk.load(&session_id, request) {
            Ok(media) => {
                debug!("New media session {}", media.media_session_id);
                self.set_duration(media.duration);
                self.set_position(0.0);
                if let Ok(mut current) = self.media_session.write() {
                    *current = Some(media);
                } else {
                    warn!("Failed to acquire write lock when storing media session");
                }
                let state = if autoplay { PlayerState::Playing } else { PlayerState::Loaded };
                self.set_player_state(state);
                if state == PlayerState::Playing {
                    self.start_progress_ticker();
                }
                true
            }
            Err(e) => {
                warn!("Media load failed: {}", e);
                self.set_player_state(PlayerState::Idle);
                false
            }
        }
    }

    /// Start or resume playback
    ///
    /// From loaded or paused media this issues a play request; from idle or
    /// stopped state the last media is loaded again from the beginning.
    pub fn play(&self) -> bool {
        let media_id = match self.media_session_id() {
            Some(id) => id,
            None => {
                debug!("Play requested without a media session");
                return false;
            }
        };

        match self.get_playback_state() {
            PlayerState::Loaded | PlayerState::Paused => {
                if let Err(e) = self.sdk.play(&media_id) {
                    // State was already adopted optimistically
                    warn!("Play request failed: {}", e);
                }
                self.set_player_state(PlayerState::Playing);
                self.start_progress_ticker();
                true
            }
            PlayerState::Idle | PlayerState::Stopped => {
                let url = self.get_now_playing();
                let content_type = self.get_content_type();
                match (url, content_type) {
                    (Some(url), Some(ct)) => self.load_media(&url, &ct),
                    _ => {
                        debug!("Nothing to replay");
                        false
                    }
                }
            }
            state => {
                debug!("Play ignored in state {}", state);
                false
            }
        }
    }

    /// Pause playback
    pub fn pause(&self) -> bool {
        let media_id = match self.media_session_id() {
            Some(id) => id,
            None => {
                debug!("Pause requested without a media session");
                return false;
            }
        };

        if self.get_playback_state() != PlayerState::Playing {
            debug!("Pause ignored while not playing");
            return false;
        }

        self.set_player_state(PlayerState::Paused);
        self.stop_progress_ticker();
        if let Err(e) = self.sdk.pause(&media_id) {
            warn!("Pause request failed: {}", e);
        }
        true
    }

    /// Stop playback of the current media item
    pub fn stop_media(&self) -> bool {
        let media_id = match self.media_session_id() {
            Some(id) => id,
            None => {
                debug!("Stop requested without a media session");
                return false;
            }
        };

        if let Err(e) = self.sdk.stop_media(&media_id) {
            warn!("Stop request failed: {}", e);
        }
        self.set_player_state(PlayerState::Stopped);
        self.stop_progress_ticker();
        true
    }

    /// Seek by a relative offset in minutes
    ///
    /// The target position is clamped to the known media range before the
    /// request is sent to the receiver.
    pub fn seek(&self, minutes: u32, forward: bool) -> bool {
        let offset = (minutes as f64) * 60.0;
        let current = self.get_position();
        let mut target = if forward { current + offset } else { current - offset };

        if target < 0.0 {
            target = 0.0;
        }
        let duration = self.get_duration();
        if duration >= 0.0 && target > duration {
            target = duration;
        }

        debug!(
            "Seeking {} {} minute(s) to {:.1}s",
            if forward { "forward" } else { "back" },
            minutes,
            target
        );
        self.seek_to(target)
    }

    /// Seek to an absolute position in seconds
    ///
    /// Valid only while playing or paused; transitions through seeking and
    /// back to playing on acknowledgement.
    pub fn seek_to(&self, position: f64) -> bool {
        let local = self.get_playback_state();
        if local != PlayerState::Playing && local != PlayerState::Paused {
            debug!("Seek ignored in state {}", local);
            return false;
        }
        let media_id = match self.media_session_id() {
            Some(id) => id,
            None => {
                debug!("Seek requested without a media session");
                return false;
            }
        };

        self.set_position(position);
        self.set_player_state(PlayerState::Seeking);
        match self.sdk.seek(&media_id, position) {
            Ok(()) => {
                debug!("Media seek done");
                self.set_player_state(PlayerState::Playing);
                self.start_progress_ticker();
                true
            }
            Err(e) => {
                // Remain in seeking until the next receiver status push
                warn!("Seek request failed: {}", e);
                false
            }
        }
    }

    /// Set the repeat mode of the receiver's queue
    pub fn set_repeat(&self, repeat: bool) -> bool {
        let media_id = match self.media_session_id() {
            Some(id) => id,
            None => {
                debug!("Repeat requested without a media session");
                return false;
            }
        };

        let mode = if repeat { RepeatMode::All } else { RepeatMode::Off };
        match self.sdk.set_repeat_mode(&media_id, mode) {
            Ok(()) => debug!("Queue repeat mode request acknowledged"),
            Err(e) => warn!("Repeat mode request failed: {}", e),
        }
        if let Ok(mut m) = self.repeat_mode.write() {
            *m = mode;
        }
        self.base.notify_repeat_mode_changed(mode);
        true
    }

    /// Adjust the receiver volume or toggle mute
    ///
    /// Volume is stepped by a fixed amount per call and clamped to
    /// [0.0, 1.0]. Muting toggles independently and leaves the stored
    /// volume level untouched.
    pub fn set_volume(&self, increase: bool, mute: bool) -> bool {
        if self.media_session_id().is_none() {
            debug!("Volume requested without a media session");
            return false;
        }
        let session_id = match self.session_id() {
            Some(id) => id,
            None => {
                debug!("Volume requested without a session");
                return false;
            }
        };

        if mute {
            let muted = !self.muted.load(Ordering::SeqCst);
            self.muted.store(muted, Ordering::SeqCst);
            if let Err(e) = self.sdk.set_muted(&session_id, muted) {
                warn!("Mute request failed: {}", e);
            }
            self.base.notify_volume_changed(self.get_volume(), muted);
        } else {
            let step = self.config.volume_step;
            let mut level = self.get_volume();
            level = if increase { level + step } else { level - step };
            level = level.clamp(0.0, 1.0);
            if let Ok(mut v) = self.volume.write() {
                *v = level;
            }
            if let Err(e) = self.sdk.set_volume(&session_id, level) {
                warn!("Volume request failed: {}", e);
            }
            self.base.notify_volume_changed(level, self.muted.load(Ordering::SeqCst));
        }
        true
    }

    /// Media status notification from the receiver
    ///
    /// Pushed on any playback change, including ones not initiated locally.
    /// A dead media session resets playback; otherwise the receiver's report
    /// is reconciled with the local state and the local clock is
    /// resynchronized.
    pub fn on_media_status_update(&self, alive: bool) {
        if !alive {
            info!("Media session ended");
            self.set_position(0.0);
            self.set_player_state(PlayerState::Idle);
            self.stop_progress_ticker();
            return;
        }

        let media_id = match self.media_session_id() {
            Some(id) => id,
            None => {
                debug!("Status update without a media session");
                return;
            }
        };
        let status = match self.sdk.media_status(&media_id) {
            Ok(status) => status,
            Err(e) => {
                warn!("Failed to read receiver status: {}", e);
                return;
            }
        };

        let local = self.get_playback_state();
        if status.state == ReceiverState::Playing && local == PlayerState::Paused {
            info!("Playback resumed by another controller");
            self.set_player_state(PlayerState::Playing);
            self.start_progress_ticker();
        } else if status.state == ReceiverState::Paused && local != PlayerState::Paused {
            info!("Playback paused by another controller");
            self.set_player_state(PlayerState::Paused);
            self.stop_progress_ticker();
        }

        // Resynchronize the local clock from the receiver's report; needed
        // across repeat-loop restarts
        self.set_position(status.position);
    }

    /// Whether loads start playback immediately
    pub fn set_autoplay(&self, autoplay: bool) {
        self.autoplay.store(autoplay, Ordering::SeqCst);
    }

    /// Current device connectivity state
    pub fn get_device_state(&self) -> DeviceState {
        if let Ok(state) = self.device_state.read() {
            *state
        } else {
            warn!("Failed to acquire read lock for device state");
            DeviceState::Idle
        }
    }

    /// Current local playback state
    pub fn get_playback_state(&self) -> PlayerState {
        if let Ok(state) = self.player_state.read() {
            *state
        } else {
            warn!("Failed to acquire read lock for player state");
            PlayerState::Idle
        }
    }

    /// Current playback position in seconds
    pub fn get_position(&self) -> f64 {
        self.position.read().map(|p| *p).unwrap_or(0.0)
    }

    /// Duration of the loaded media in seconds, -1.0 when unknown
    pub fn get_duration(&self) -> f64 {
        self.duration.read().map(|d| *d).unwrap_or(-1.0)
    }

    /// URL of the current media, if any
    pub fn get_now_playing(&self) -> Option<String> {
        if let Ok(url) = self.now_playing.read() {
            url.clone()
        } else {
            None
        }
    }

    /// Content type of the current media, if any
    pub fn get_content_type(&self) -> Option<String> {
        if let Ok(ct) = self.content_type.read() {
            ct.clone()
        } else {
            None
        }
    }

    /// Stored receiver volume level
    pub fn get_volume(&self) -> f64 {
        self.volume.read().map(|v| *v).unwrap_or(0.0)
    }

    /// Whether the receiver is muted
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    /// Current repeat mode
    pub fn get_repeat_mode(&self) -> RepeatMode {
        self.repeat_mode.read().map(|m| *m).unwrap_or(RepeatMode::Off)
    }

    /// Active session handle, if any
    pub fn get_session(&self) -> Option<Session> {
        if let Ok(session) = self.session.read() {
            session.clone()
        } else {
            None
        }
    }

    /// Current media session handle, if any
    pub fn get_media_session(&self) -> Option<MediaSession> {
        if let Ok(media) = self.media_session.read() {
            media.clone()
        } else {
            None
        }
    }

    /// Whether the progress ticker is currently running
    pub fn ticker_active(&self) -> bool {
        self.ticker.read().map(|t| t.is_active()).unwrap_or(false)
    }

    /// Reconstruct local state from media already playing on a joined session
    fn attach_existing_media(&self, active: ActiveMedia) {
        info!("Joining existing media session {}", active.media.media_session_id);
        let status = active.status;

        let duration = if active.media.duration >= 0.0 {
            active.media.duration
        } else {
            status.duration
        };
        self.set_duration(duration);
        self.set_position(status.position);
        self.set_now_playing(Some(status.content_id.clone()));
        if let Ok(mut media) = self.media_session.write() {
            *media = Some(active.media);
        } else {
            warn!("Failed to acquire write lock when storing media session");
        }

        let state = status.state.to_player_state();
        self.set_player_state(state);
        if state == PlayerState::Playing {
            self.start_progress_ticker();
        }
    }

    /// Single authoritative teardown path; idempotent
    fn teardown(&self) {
        debug!("Tearing down cast state");
        self.stop_progress_ticker();
        if let Ok(mut session) = self.session.write() {
            *session = None;
        } else {
            warn!("Failed to acquire write lock when clearing session");
        }
        if let Ok(mut media) = self.media_session.write() {
            *media = None;
        } else {
            warn!("Failed to acquire write lock when clearing media session");
        }
        self.base.set_receiver_name(None);
        self.set_position(0.0);
        self.set_duration(-1.0);
        self.set_now_playing(None);
        self.set_device_state(DeviceState::Idle);
        self.set_player_state(PlayerState::Idle);
    }

    /// One step of the progress ticker
    ///
    /// Returns false when the ticker should stop itself (end of media).
    fn tick(&self) -> bool {
        if self.get_playback_state() != PlayerState::Playing {
            return true;
        }

        let duration = self.get_duration();
        let position = self.get_position();
        if duration >= 0.0 && position >= duration {
            // Local end-of-media fallback; the receiver's own status push
            // follows and corrects the state
            self.set_position(0.0);
            return false;
        }

        self.set_position(position + 1.0);
        true
    }

    fn start_progress_ticker(&self) {
        let controller = self.clone();
        if let Ok(mut ticker) = self.ticker.write() {
            ticker.start(move || controller.tick());
        } else {
            warn!("Failed to acquire write lock when starting progress ticker");
        }
    }

    fn stop_progress_ticker(&self) {
        if let Ok(mut ticker) = self.ticker.write() {
            ticker.stop();
        } else {
            warn!("Failed to acquire write lock when stopping progress ticker");
        }
    }

    fn session_id(&self) -> Option<String> {
        if let Ok(session) = self.session.read() {
            session.as_ref().map(|s| s.session_id.clone())
        } else {
            warn!("Failed to acquire read lock for session");
            None
        }
    }

    fn media_session_id(&self) -> Option<String> {
        if let Ok(media) = self.media_session.read() {
            media.as_ref().map(|m| m.media_session_id.clone())
        } else {
            warn!("Failed to acquire read lock for media session");
            None
        }
    }

    fn set_device_state(&self, new_state: DeviceState) {
        let mut changed = false;
        if let Ok(mut state) = self.device_state.write() {
            if *state != new_state {
                *state = new_state;
                changed = true;
            }
        } else {
            warn!("Failed to acquire write lock when setting device state");
        }
        if changed {
            self.base.notify_device_state_changed(new_state);
        }
    }

    fn set_player_state(&self, new_state: PlayerState) {
        let mut changed = false;
        if let Ok(mut state) = self.player_state.write() {
            if *state != new_state {
                *state = new_state;
                changed = true;
            }
        } else {
            warn!("Failed to acquire write lock when setting player state");
        }
        if changed {
            self.base.notify_player_state_changed(new_state);
        }
    }

    fn set_position(&self, new_position: f64) {
        let mut changed = false;
        if let Ok(mut position) = self.position.write() {
            if *position != new_position {
                *position = new_position;
                changed = true;
            }
        } else {
            warn!("Failed to acquire write lock when setting position");
        }
        if changed {
            self.base.notify_position_changed(new_position);
        }
    }

    fn set_duration(&self, new_duration: f64) {
        let mut changed = false;
        if let Ok(mut duration) = self.duration.write() {
            if *duration != new_duration {
                *duration = new_duration;
                changed = true;
            }
        } else {
            warn!("Failed to acquire write lock when setting duration");
        }
        if changed {
            self.base.notify_duration_changed(new_duration);
        }
    }

    fn set_now_playing(&self, url: Option<String>) {
        let mut changed = false;
        if let Ok(mut now_playing) = self.now_playing.write() {
            if *now_playing != url {
                *now_playing = url.clone();
                changed = true;
            }
        } else {
            warn!("Failed to acquire write lock when setting now-playing URL");
        }
        if changed {
            self.base.notify_now_playing_changed(url);
        }
    }
}

// State is shared between clones; the ticker thread holds a clone of the
// controller it ticks for
impl Clone for CastController {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            sdk: Arc::clone(&self.sdk),
            config: self.config.clone(),
            device_state: Arc::clone(&self.device_state),
            player_state: Arc::clone(&self.player_state),
            session: Arc::clone(&self.session),
            media_session: Arc::clone(&self.media_session),
            position: Arc::clone(&self.position),
            duration: Arc::clone(&self.duration),
            now_playing: Arc::clone(&self.now_playing),
            content_type: Arc::clone(&self.content_type),
            volume: Arc::clone(&self.volume),
            muted: Arc::clone(&self.muted),
            repeat_mode: Arc::clone(&self.repeat_mode),
            autoplay: Arc::clone(&self.autoplay),
            ticker: Arc::clone(&self.ticker),
        }
    }
}
