/// Common types shared by the controller and its hosts
use serde::Serialize;

use crate::constants;
use crate::utils::MediaError;

/// Overlay shown briefly in the middle of the player after a transport change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackIndicator {
    Playing,
    Paused,
    Ended,
}

/// Notifications delivered by the host media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    LoadedMetadata,
    /// Enough data to start playback.
    CanPlay,
    CanPlayThrough,
    /// Raw host error code, if the host reported one.
    Error(Option<u16>),
    TimeUpdate,
    Ended,
    Waiting,
    Progress,
}

/// A buffered span of the media timeline, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Click on the seek track: pointer offset from the track's left edge and the
/// track width, both in the same units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSeek {
    pub offset_x: f64,
    pub track_width: f64,
}

impl PointerSeek {
    pub fn new(offset_x: f64, track_width: f64) -> Self {
        Self {
            offset_x,
            track_width,
        }
    }

    /// Position along the track in `[0, 1]`, or `None` when the track has no
    /// usable width.
    pub fn fraction(&self) -> Option<f64> {
        if !self.track_width.is_finite() || self.track_width <= 0.0 || !self.offset_x.is_finite() {
            return None;
        }
        Some((self.offset_x / self.track_width).clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_muted: bool,
    pub volume: u8,
    pub current_time: f64,
    /// Zero until metadata has loaded.
    pub duration: f64,
    pub progress_percent: f64,
    pub buffered_percent: f64,
    pub loading: bool,
    pub error: Option<MediaError>,
    pub controls_visible: bool,
    pub indicator: Option<PlaybackIndicator>,
    pub video_size: String,
    pub is_fullscreen: bool,
}

impl PlaybackState {
    pub fn with_volume(volume: u8) -> Self {
        Self {
            volume: volume.min(constants::MAX_VOLUME),
            ..Self::default()
        }
    }

    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Message for the error panel, empty when there is no error.
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator.is_some()
    }

    /// Percentage of `duration` covered by `seconds`, or `None` while the
    /// duration is unknown.
    pub fn percent_of_duration(&self, seconds: f64) -> Option<f64> {
        if !self.has_duration() || !seconds.is_finite() {
            return None;
        }
        Some((seconds / self.duration * 100.0).clamp(0.0, 100.0))
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_muted: false,
            volume: constants::DEFAULT_VOLUME,
            current_time: 0.0,
            duration: 0.0,
            progress_percent: 0.0,
            buffered_percent: 0.0,
            loading: true,
            error: None,
            controls_visible: false,
            indicator: None,
            video_size: String::new(),
            is_fullscreen: false,
        }
    }
}

/// Host durations can be NaN before metadata and infinite for live streams.
pub(crate) fn normalize_duration(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 { raw } else { 0.0 }
}
