// Cast controller implementations

pub mod base_controller;
pub mod cast_controller;
pub mod ticker;

pub use base_controller::{BaseController, CastStateListener};
pub use cast_controller::CastController;
pub use ticker::ProgressTicker;
