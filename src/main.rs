use castcontrol::config::CastConfig;
use castcontrol::controller::{CastController, CastStateListener};
use castcontrol::data::CastEvent;
use castcontrol::helpers::{content_type_for_url, format_time};
use castcontrol::sdk::{CastSdk, NullCastSdk};
use std::any::Any;
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;
use clap::Parser;
use log::info;
use env_logger::Env;

/// Cast a media URL to a receiver and drive a short playback session
#[derive(Parser, Debug)]
#[command(name = "castcontrol", about = "Cast controller demo")]
struct Args {
    /// URL of the media to cast
    url: String,

    /// Content type; inferred from the URL extension when omitted
    #[arg(long)]
    content_type: Option<String>,

    /// Load the media without starting playback
    #[arg(long)]
    no_autoplay: bool,
}

/// Event logger that implements the CastStateListener trait
struct EventLogger {
    name: String,
}

impl EventLogger {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl CastStateListener for EventLogger {
    fn on_event(&self, event: CastEvent) {
        match event {
            CastEvent::DeviceStateChanged { state } => {
                info!("[{}] Device state changed: {}", self.name, state)
            }
            CastEvent::PlayerStateChanged { state } => {
                info!("[{}] Player state changed: {}", self.name, state)
            }
            CastEvent::PositionChanged { position } => {
                info!("[{}] Position: {}", self.name, format_time(position))
            }
            CastEvent::DurationChanged { duration } => {
                info!("[{}] Duration: {}", self.name, format_time(duration))
            }
            CastEvent::NowPlayingChanged { url } => {
                info!("[{}] Now playing: {}", self.name, url.as_deref().unwrap_or("-"))
            }
            CastEvent::VolumeChanged { level, muted } => {
                info!("[{}] Volume: {:.2} muted={}", self.name, level, muted)
            }
            CastEvent::RepeatModeChanged { mode } => {
                info!("[{}] Repeat mode: {}", self.name, mode)
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn main() {
    // Initialize the logger with default configuration
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    let content_type = match args.content_type.or_else(|| content_type_for_url(&args.url)) {
        Some(ct) => ct,
        None => {
            eprintln!("Could not infer a content type for {}", args.url);
            std::process::exit(1);
        }
    };

    info!("castcontrol demo starting");

    let sdk: Arc<dyn CastSdk> = Arc::new(NullCastSdk::new());
    let config = CastConfig {
        autoplay: !args.no_autoplay,
        ..CastConfig::default()
    };
    let controller = CastController::with_config(sdk, config);

    // Subscribe to controller events
    let event_logger = Arc::new(EventLogger::new("cast"));
    let weak_logger = Arc::downgrade(&event_logger) as Weak<dyn CastStateListener>;
    controller.register_state_listener(weak_logger);

    if let Err(e) = controller.initialize() {
        eprintln!("Cast capability is not available: {}", e);
        std::process::exit(1);
    }

    if !controller.launch() {
        eprintln!("Could not establish a session");
        std::process::exit(1);
    }
    if let Some(name) = controller.get_receiver_name() {
        println!("Connected to {}", name);
    }

    if !controller.load_media(&args.url, &content_type) {
        eprintln!("Load failed, giving up");
        std::process::exit(1);
    }

    // Let the progress ticker advance for a few seconds, then exercise the
    // playback commands
    thread::sleep(Duration::from_secs(3));
    controller.pause();
    controller.play();
    controller.seek(1, true);
    controller.set_volume(true, false);
    thread::sleep(Duration::from_secs(2));

    println!(
        "{} / {} ({})",
        format_time(controller.get_position()),
        format_time(controller.get_duration()),
        controller.get_playback_state()
    );

    controller.stop_app();
    info!("castcontrol demo finished");
}
