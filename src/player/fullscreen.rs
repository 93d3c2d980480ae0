//! Fullscreen toggling across vendor APIs.

use tracing::{debug, warn};

use super::traits::FullscreenHost;
use crate::utils::FullscreenError;

/// Host fullscreen API flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Ms,
}

impl FullscreenApi {
    /// Order in which APIs are tried.
    pub const FALLBACK_ORDER: [FullscreenApi; 3] = [
        FullscreenApi::Standard,
        FullscreenApi::Webkit,
        FullscreenApi::Ms,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenOutcome {
    Entered(FullscreenApi),
    Exited(FullscreenApi),
    /// No API was available; nothing happened.
    Unavailable,
}

/// Enters fullscreen when nothing is fullscreen, exits otherwise, using the
/// first API the host supports.
pub fn toggle(host: &dyn FullscreenHost) -> Result<FullscreenOutcome, FullscreenError> {
    let entering = !host.is_fullscreen();

    let Some(api) = FullscreenApi::FALLBACK_ORDER
        .into_iter()
        .find(|api| host.supports(*api))
    else {
        debug!("No fullscreen API available");
        return Ok(FullscreenOutcome::Unavailable);
    };

    if entering {
        host.request(api).inspect_err(|e| {
            warn!("Fullscreen request via {:?} failed: {}", api, e);
        })?;
        Ok(FullscreenOutcome::Entered(api))
    } else {
        host.exit(api).inspect_err(|e| {
            warn!("Fullscreen exit via {:?} failed: {}", api, e);
        })?;
        Ok(FullscreenOutcome::Exited(api))
    }
}
