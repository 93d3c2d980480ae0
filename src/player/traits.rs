use anyhow::Result;
use async_trait::async_trait;

use super::fullscreen::FullscreenApi;
use super::types::TimeRange;
use crate::utils::FullscreenError;

/// Playable media element owned by the host view.
///
/// Setters take `&self`; implementations keep their own interior state so a
/// pending `play` request never blocks teardown.
#[async_trait]
pub trait MediaElement: Send + Sync {
    fn is_paused(&self) -> bool;
    /// Resolves once the host has accepted or rejected the request.
    async fn play(&self) -> Result<()>;
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// NaN or zero until metadata is available.
    fn duration(&self) -> f64;
    /// Native volume in `[0, 1]`.
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn is_muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn source(&self) -> String;
    fn set_source(&self, source: &str);
    fn buffered(&self) -> Vec<TimeRange>;
    /// Intrinsic pixel dimensions, zero when unknown.
    fn video_dimensions(&self) -> (u32, u32);
    /// Restarts resource selection for the current source.
    fn load(&self);
}

/// Fullscreen capability of the player container.
pub trait FullscreenHost: Send + Sync {
    /// Whether any element is currently fullscreen.
    fn is_fullscreen(&self) -> bool;
    fn supports(&self, api: FullscreenApi) -> bool;
    fn request(&self, api: FullscreenApi) -> Result<(), FullscreenError>;
    fn exit(&self, api: FullscreenApi) -> Result<(), FullscreenError>;
}
