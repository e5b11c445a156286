use crate::data::{CastEvent, DeviceState, PlayerState, RepeatMode};
use std::sync::{Arc, Weak, RwLock};
use std::any::Any;
use log::{debug, trace, warn};

/// Trait for objects that listen to cast controller state changes
pub trait CastStateListener: Send + Sync {
    /// Called when any controller event occurs
    ///
    /// # Arguments
    ///
    /// * `event` - The event that occurred
    fn on_event(&self, event: CastEvent);

    /// Convert to Any for dynamic casting
    fn as_any(&self) -> &dyn Any;
}

/// Base implementation handling state listener management
///
/// Provides the listener registry and notification helpers used by the
/// cast controller. Listeners are held as weak references so the UI layer
/// keeps ownership of its observers.
#[derive(Clone)]
pub struct BaseController {
    /// List of state listeners registered with this controller
    listeners: Arc<RwLock<Vec<Weak<dyn CastStateListener>>>>,

    /// Friendly name of the connected receiver, if any
    receiver_name: Arc<RwLock<Option<String>>>,
}

impl BaseController {
    /// Create a new BaseController with no listeners
    pub fn new() -> Self {
        debug!("Creating new BaseController");
        Self {
            listeners: Arc::new(RwLock::new(Vec::new())),
            receiver_name: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the friendly name of the connected receiver
    pub fn set_receiver_name(&self, name: Option<String>) {
        if let Ok(mut receiver_name) = self.receiver_name.write() {
            *receiver_name = name;
        } else {
            warn!("Failed to acquire write lock when setting receiver name");
        }
    }

    /// Get the friendly name of the connected receiver
    pub fn get_receiver_name(&self) -> Option<String> {
        if let Ok(receiver_name) = self.receiver_name.read() {
            receiver_name.clone()
        } else {
            warn!("Failed to acquire read lock for receiver name");
            None
        }
    }

    /// Notify all registered listeners that the device state has changed
    pub fn notify_device_state_changed(&self, state: DeviceState) {
        debug!("Notifying listeners of device state change: {}", state);
        self.broadcast_event(CastEvent::DeviceStateChanged { state });
    }

    /// Notify all registered listeners that the player state has changed
    pub fn notify_player_state_changed(&self, state: PlayerState) {
        debug!("Notifying listeners of player state change: {}", state);
        self.broadcast_event(CastEvent::PlayerStateChanged { state });
    }

    /// Notify all registered listeners that the playback position has changed
    pub fn notify_position_changed(&self, position: f64) {
        trace!("Notifying listeners of position change: {:.1}s", position);
        self.broadcast_event(CastEvent::PositionChanged { position });
    }

    /// Notify all registered listeners that the media duration has changed
    pub fn notify_duration_changed(&self, duration: f64) {
        debug!("Notifying listeners of duration change: {:.1}s", duration);
        self.broadcast_event(CastEvent::DurationChanged { duration });
    }

    /// Notify all registered listeners that the now-playing URL has changed
    pub fn notify_now_playing_changed(&self, url: Option<String>) {
        debug!("Notifying listeners of now-playing change");
        self.broadcast_event(CastEvent::NowPlayingChanged { url });
    }

    /// Notify all registered listeners that volume or mute state has changed
    pub fn notify_volume_changed(&self, level: f64, muted: bool) {
        debug!("Notifying listeners of volume change: {:.2} muted={}", level, muted);
        self.broadcast_event(CastEvent::VolumeChanged { level, muted });
    }

    /// Notify all registered listeners that the repeat mode has changed
    pub fn notify_repeat_mode_changed(&self, mode: RepeatMode) {
        debug!("Notifying listeners of repeat mode change: {}", mode);
        self.broadcast_event(CastEvent::RepeatModeChanged { mode });
    }

    /// Broadcast an event to all registered listeners
    pub fn broadcast_event(&self, event: CastEvent) {
        self.prune_dead_listeners();

        if let Ok(listeners) = self.listeners.read() {
            trace!("Broadcasting event to {} listeners: {:?}", listeners.len(), event);
            for listener_weak in listeners.iter() {
                if let Some(listener) = listener_weak.upgrade() {
                    listener.on_event(event.clone());
                }
            }
        } else {
            warn!("Failed to acquire read lock for listeners when broadcasting event");
        }
    }

    /// Register a state listener to be notified of state changes
    pub fn register_listener(&self, listener: Weak<dyn CastStateListener>) -> bool {
        debug!("Attempting to register a new listener");
        if let Ok(mut listeners) = self.listeners.write() {
            // Check for duplicates before adding
            for existing in listeners.iter() {
                if let (Some(new), Some(old)) = (listener.upgrade(), existing.upgrade()) {
                    if Arc::ptr_eq(&new, &old) {
                        debug!("Listener already registered, skipping");
                        return false;
                    }
                }
            }
            listeners.push(listener);
            debug!("Listener successfully registered, total listeners: {}", listeners.len());
            return true;
        }
        warn!("Failed to acquire write lock when registering listener");
        false
    }

    /// Unregister a previously registered state listener
    pub fn unregister_listener(&self, listener: &Arc<dyn CastStateListener>) -> bool {
        debug!("Attempting to unregister a listener");
        if let Ok(mut listeners) = self.listeners.write() {
            let original_len = listeners.len();
            // Remove all weak references that point to the same object or are dead
            listeners.retain(|weak_ref| {
                if let Some(target) = weak_ref.upgrade() {
                    !Arc::ptr_eq(&target, listener)
                } else {
                    false
                }
            });
            let removed = listeners.len() < original_len;
            if removed {
                debug!("Listener successfully unregistered, remaining listeners: {}", listeners.len());
            } else {
                debug!("Listener not found for unregistration");
            }
            return removed;
        }
        warn!("Failed to acquire write lock when unregistering listener");
        false
    }

    /// Remove any dead (dropped) listeners
    fn prune_dead_listeners(&self) {
        if let Ok(mut listeners) = self.listeners.write() {
            let original_len = listeners.len();
            listeners.retain(|weak_ref| weak_ref.upgrade().is_some());
            let removed = original_len - listeners.len();
            if removed > 0 {
                debug!("Pruned {} dead listeners, remaining: {}", removed, listeners.len());
            }
        } else {
            warn!("Failed to acquire write lock when pruning dead listeners");
        }
    }

    /// Register a state listener to be notified of state changes
    /// This is an alias for register_listener used by the controller facade
    pub fn register_state_listener(&self, listener: Weak<dyn CastStateListener>) -> bool {
        self.register_listener(listener)
    }

    /// Unregister a previously registered state listener
    /// This is an alias for unregister_listener used by the controller facade
    pub fn unregister_state_listener(&self, listener: &Arc<dyn CastStateListener>) -> bool {
        self.unregister_listener(listener)
    }
}

impl Default for BaseController {
    fn default() -> Self {
        Self::new()
    }
}
