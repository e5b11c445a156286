// Data structures for castcontrol

pub mod cast_event;
pub mod device_state;
pub mod player_state;
pub mod receiver_state;
pub mod repeat_mode;
pub mod session;

pub use cast_event::CastEvent;
pub use device_state::DeviceState;
pub use player_state::PlayerState;
pub use receiver_state::ReceiverState;
pub use repeat_mode::RepeatMode;
pub use session::{MediaSession, MediaStatus, Session};
