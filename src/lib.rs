// Playback controller library shared by the headless driver and host views

pub mod config;
pub mod constants;
pub mod core;
pub mod player;
pub mod utils;

pub use config::Config;
pub use player::{MediaElement, MediaEvent, PlaybackController, PlaybackState};
pub use utils::MediaError;
