// Common helpers for integration tests

#![allow(dead_code)]

use std::any::Any;
use std::sync::{Arc, RwLock, Weak};

use castcontrol::config::CastConfig;
use castcontrol::controller::{CastController, CastStateListener};
use castcontrol::data::{CastEvent, PlayerState};
use castcontrol::sdk::{CastSdk, NullCastSdk};

/// Listener that records every event it receives
pub struct EventRecorder {
    events: RwLock<Vec<CastEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<CastEvent> {
        self.events.read().map(|e| e.clone()).unwrap_or_default()
    }

    /// Player states in the order they were announced
    pub fn player_states(&self) -> Vec<PlayerState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                CastEvent::PlayerStateChanged { state } => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }
}

impl CastStateListener for EventRecorder {
    fn on_event(&self, event: CastEvent) {
        if let Ok(mut events) = self.events.write() {
            events.push(event);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Configuration whose background ticker never fires during a test
pub fn test_config() -> CastConfig {
    CastConfig {
        timer_step_ms: 60_000,
        availability_attempts: 2,
        availability_interval_ms: 1,
        ..CastConfig::default()
    }
}

/// Create a controller wired to a null SDK with a recording listener
pub fn create_controller() -> (Arc<NullCastSdk>, CastController, Arc<EventRecorder>) {
    let sdk = Arc::new(NullCastSdk::new());
    let controller = CastController::with_config(Arc::clone(&sdk) as Arc<dyn CastSdk>, test_config());

    let recorder = Arc::new(EventRecorder::new());
    controller.register_state_listener(Arc::downgrade(&recorder) as Weak<dyn CastStateListener>);

    (sdk, controller, recorder)
}

/// Establish a session and load media with autoplay
pub fn connect_and_load(controller: &CastController, url: &str) {
    assert!(controller.launch(), "session request should succeed");
    assert!(
        controller.load_media(url, "video/mp4"),
        "load should succeed"
    );
}
