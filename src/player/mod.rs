pub mod controller;
pub mod fullscreen;
pub mod keyboard;
pub mod simulated;
pub mod traits;
pub mod types;
pub use controller::PlaybackController;
pub use fullscreen::{FullscreenApi, FullscreenOutcome};
pub use keyboard::{KeyCode, KeyDisposition, Shortcut};
pub use simulated::{PlayBehavior, SimulatedElement, SimulatedFullscreen};
pub use traits::{FullscreenHost, MediaElement};
pub use types::{MediaEvent, PlaybackIndicator, PlaybackState, PointerSeek, TimeRange};
