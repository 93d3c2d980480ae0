pub mod errors;
pub mod time;

pub use errors::{FullscreenError, MediaError};
pub use time::{format_time, format_video_size};
