// Helper utilities for castcontrol

pub mod format;
pub mod media_types;
pub mod retry;

pub use format::format_time;
pub use media_types::content_type_for_url;
pub use retry::RetryHandler;
