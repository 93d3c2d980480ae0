use serde::Serialize;
use thiserror::Error;

/// Failures surfaced to the player overlay. None of these are fatal; the view
/// renders the message and offers a retry.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum MediaError {
    #[error("Video loading was aborted")]
    Aborted,

    #[error("Network error occurred")]
    Network,

    #[error("Video decoding error")]
    Decode,

    #[error("Video format not supported")]
    UnsupportedFormat,

    #[error("Failed to play video: {0}")]
    PlayRejected(String),

    #[error("Unknown video error")]
    Unknown,
}

impl MediaError {
    pub const CODE_ABORTED: u16 = 1;
    pub const CODE_NETWORK: u16 = 2;
    pub const CODE_DECODE: u16 = 3;
    pub const CODE_SRC_NOT_SUPPORTED: u16 = 4;

    /// Maps a host media error code onto the taxonomy. A missing or
    /// unrecognised code is reported as `Unknown`.
    pub fn from_code(code: Option<u16>) -> Self {
        match code {
            Some(Self::CODE_ABORTED) => Self::Aborted,
            Some(Self::CODE_NETWORK) => Self::Network,
            Some(Self::CODE_DECODE) => Self::Decode,
            Some(Self::CODE_SRC_NOT_SUPPORTED) => Self::UnsupportedFormat,
            _ => Self::Unknown,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenError {
    #[error("Fullscreen request was not allowed")]
    NotAllowed,

    #[error("Fullscreen is not supported")]
    NotSupported,
}
