//! Integration tests for the cast controller lifecycle and playback commands

#[path = "common/mod.rs"]
mod common;
use common::*;

use castcontrol::config::CastConfig;
use castcontrol::controller::CastController;
use castcontrol::data::{DeviceState, PlayerState};
use castcontrol::sdk::{CastSdk, NullCastSdk, SdkError};
use std::sync::Arc;

#[test]
fn test_initialize_succeeds_when_capability_present() {
    let (_sdk, controller, _recorder) = create_controller();
    assert!(controller.initialize().is_ok());
}

#[test]
fn test_initialize_fails_after_bounded_retries() {
    let sdk = Arc::new(NullCastSdk::new());
    sdk.set_available(false);
    let controller = CastController::with_config(Arc::clone(&sdk) as Arc<dyn CastSdk>, test_config());

    match controller.initialize() {
        Err(SdkError::Unavailable(_)) => {}
        other => panic!("Expected Unavailable, got {:?}", other.err()),
    }
}

#[test]
fn test_launch_establishes_session() {
    let (_sdk, controller, recorder) = create_controller();

    assert!(controller.launch());
    assert_eq!(controller.get_device_state(), DeviceState::Active);
    assert_eq!(controller.get_receiver_name(), Some("Null Receiver".to_string()));
    assert!(controller.get_session().is_some());
    assert!(recorder.events().iter().any(|e| matches!(
        e,
        castcontrol::data::CastEvent::DeviceStateChanged { state: DeviceState::Active }
    )));
}

#[test]
fn test_launch_failure_sets_error_state() {
    let (sdk, controller, _recorder) = create_controller();
    sdk.fail_sessions(true);

    assert!(!controller.launch());
    assert_eq!(controller.get_device_state(), DeviceState::Error);
    assert!(controller.get_session().is_none());

    // The user may retry once the receiver is reachable again
    sdk.fail_sessions(false);
    assert!(controller.launch());
    assert_eq!(controller.get_device_state(), DeviceState::Active);
}

#[test]
fn test_load_with_autoplay_starts_playback() {
    let (sdk, controller, recorder) = create_controller();
    sdk.set_media_duration(300.0);

    connect_and_load(&controller, "http://host/movie.mp4");

    assert_eq!(controller.get_playback_state(), PlayerState::Playing);
    assert_eq!(controller.get_duration(), 300.0);
    assert_eq!(
        controller.get_now_playing(),
        Some("http://host/movie.mp4".to_string())
    );
    assert!(controller.ticker_active());

    // The load transitions through the loading state before playing
    let states = recorder.player_states();
    assert_eq!(states, vec![PlayerState::Loading, PlayerState::Playing]);
}

#[test]
fn test_load_without_autoplay_stays_loaded() {
    let (_sdk, controller, _recorder) = create_controller();
    controller.set_autoplay(false);

    connect_and_load(&controller, "http://host/movie.mp4");

    assert_eq!(controller.get_playback_state(), PlayerState::Loaded);
    assert!(!controller.ticker_active());
}

#[test]
fn test_load_failure_reverts_to_idle() {
    let (sdk, controller, _recorder) = create_controller();
    controller.launch();
    sdk.fail_loads(true);

    assert!(!controller.load_media("http://host/movie.mp4", "video/mp4"));
    assert_eq!(controller.get_playback_state(), PlayerState::Idle);
    assert!(!controller.ticker_active());

    // The load is retryable
    sdk.fail_loads(false);
    assert!(controller.load_media("http://host/movie.mp4", "video/mp4"));
    assert_eq!(controller.get_playback_state(), PlayerState::Playing);
}

#[test]
fn test_play_pause_alternation_drives_the_ticker() {
    let (_sdk, controller, _recorder) = create_controller();
    connect_and_load(&controller, "http://host/movie.mp4");

    // The ticker is active exactly while the controller is playing
    for _ in 0..4 {
        assert_eq!(controller.get_playback_state(), PlayerState::Playing);
        assert!(controller.ticker_active());

        assert!(controller.pause());
        assert_eq!(controller.get_playback_state(), PlayerState::Paused);
        assert!(!controller.ticker_active());

        assert!(controller.play());
    }
}

#[test]
fn test_seek_forward_one_minute() {
    let (sdk, controller, recorder) = create_controller();
    sdk.set_media_duration(600.0);
    connect_and_load(&controller, "http://host/movie.mp4");

    assert!(controller.seek_to(30.0));
    recorder.clear();

    assert!(controller.seek(1, true));
    assert_eq!(sdk.get_last_seek(), Some(90.0));
    assert_eq!(controller.get_position(), 90.0);

    // Transitions through seeking and back to playing on acknowledgement
    let states = recorder.player_states();
    assert_eq!(states, vec![PlayerState::Seeking, PlayerState::Playing]);
    assert!(controller.ticker_active());
}

#[test]
fn test_repeat_mode_is_sent_and_applied_to_later_loads() {
    let (sdk, controller, _recorder) = create_controller();
    connect_and_load(&controller, "http://host/movie.mp4");

    assert!(controller.set_repeat(true));
    assert_eq!(sdk.get_repeat_mode(), castcontrol::data::RepeatMode::All);

    // A subsequent load carries the stored repeat mode
    assert!(controller.load_media("http://host/other.mp4", "video/mp4"));
    assert_eq!(sdk.get_repeat_mode(), castcontrol::data::RepeatMode::All);

    assert!(controller.set_repeat(false));
    assert_eq!(sdk.get_repeat_mode(), castcontrol::data::RepeatMode::Off);
}

#[test]
fn test_stop_app_tears_down_everything() {
    let (_sdk, controller, _recorder) = create_controller();
    connect_and_load(&controller, "http://host/movie.mp4");

    assert!(controller.stop_app());

    assert!(controller.get_session().is_none());
    assert!(controller.get_media_session().is_none());
    assert_eq!(controller.get_device_state(), DeviceState::Idle);
    assert_eq!(controller.get_playback_state(), PlayerState::Idle);
    assert_eq!(controller.get_position(), 0.0);
    assert!(!controller.ticker_active());
    assert!(controller.get_receiver_name().is_none());

    // Stopping again without a session is a silent no-op
    assert!(!controller.stop_app());
}

#[test]
fn test_volume_commands_reach_the_receiver() {
    let sdk = Arc::new(NullCastSdk::new());
    let config = CastConfig {
        default_volume: 0.5,
        ..test_config()
    };
    let controller = CastController::with_config(Arc::clone(&sdk) as Arc<dyn CastSdk>, config);
    connect_and_load(&controller, "http://host/movie.mp4");

    assert!(controller.set_volume(true, false));
    assert!((sdk.get_volume() - 0.6).abs() < 1e-9);

    assert!(controller.set_volume(false, false));
    assert!((sdk.get_volume() - 0.5).abs() < 1e-9);

    assert!(controller.set_volume(false, true));
    assert!(sdk.is_muted());
    // Muting leaves the stored volume level untouched
    assert!((controller.get_volume() - 0.5).abs() < 1e-9);
}
