use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use super::fullscreen::{self, FullscreenOutcome};
use super::keyboard::{KeyCode, KeyDisposition, Shortcut};
use super::traits::{FullscreenHost, MediaElement};
use super::types::{MediaEvent, PlaybackIndicator, PlaybackState, PointerSeek, normalize_duration};
use crate::config::Config;
use crate::constants;
use crate::core::{Property, PropertySubscriber};
use crate::utils::{MediaError, format_time, format_video_size};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Control object behind a player view.
///
/// The view holds the controller (usually in an `Arc`), forwards input and
/// host notifications to it and renders whatever [`PlaybackState`] it
/// publishes. State only changes through the methods below.
pub struct PlaybackController {
    config: Config,
    state: Property<PlaybackState>,
    element: Mutex<Option<Arc<dyn MediaElement>>>,
    fullscreen: Mutex<Option<Arc<dyn FullscreenHost>>>,
    hide_timer: Mutex<Option<JoinHandle<()>>>,
    indicator_timer: Mutex<Option<JoinHandle<()>>>,
    runtime: Option<Handle>,
    disposed: CancellationToken,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state.get())
            .field("bound", &lock(&self.element).is_some())
            .field("disposed", &self.disposed.is_cancelled())
            .finish()
    }
}

impl PlaybackController {
    /// Creates a controller that is not yet attached to an element.
    ///
    /// Overlay timers run on the tokio runtime current at construction. A
    /// controller created outside one falls back to whichever runtime is
    /// current when a timer is armed.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            state: Property::new(
                PlaybackState::with_volume(config.playback.initial_volume),
                "playback_state",
            ),
            element: Mutex::new(None),
            fullscreen: Mutex::new(None),
            hide_timer: Mutex::new(None),
            indicator_timer: Mutex::new(None),
            runtime: Handle::try_current().ok(),
            disposed: CancellationToken::new(),
        }
    }

    pub fn bound(
        config: &Config,
        element: Arc<dyn MediaElement>,
        fullscreen: Option<Arc<dyn FullscreenHost>>,
    ) -> Self {
        let controller = Self::new(config);
        controller.bind(element, fullscreen);
        controller
    }

    /// Attaches the host element. The configured volume is pushed to it.
    pub fn bind(&self, element: Arc<dyn MediaElement>, fullscreen: Option<Arc<dyn FullscreenHost>>) {
        if self.disposed.is_cancelled() {
            warn!("Ignoring bind on a destroyed playback controller");
            return;
        }

        debug!("Binding playback controller to {}", element.source());
        *lock(&self.element) = Some(element);
        *lock(&self.fullscreen) = fullscreen;

        let volume = self.state.read(|s| s.volume);
        self.set_volume(i32::from(volume));
    }

    fn element(&self) -> Option<Arc<dyn MediaElement>> {
        if self.disposed.is_cancelled() {
            return None;
        }
        lock(&self.element).clone()
    }

    pub fn state(&self) -> PlaybackState {
        self.state.get()
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        self.state.subscribe()
    }

    pub fn is_destroyed(&self) -> bool {
        self.disposed.is_cancelled()
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.state.read(|s| s.current_time))
    }

    pub fn duration_label(&self) -> String {
        format_time(self.state.read(|s| s.duration))
    }

    /// Number of auto-hide timers still waiting to fire (0 or 1).
    pub fn pending_hide_timers(&self) -> usize {
        lock(&self.hide_timer)
            .as_ref()
            .map_or(0, |handle| usize::from(!handle.is_finished()))
    }

    // === Transport ===

    pub async fn toggle_play_pause(&self) {
        let Some(element) = self.element() else {
            return;
        };
        if self.state.read(PlaybackState::has_error) {
            debug!("Ignoring play/pause while the player shows an error");
            return;
        }

        if element.is_paused() {
            self.play().await;
        } else {
            self.pause();
        }
    }

    /// Requests playback and records the settled outcome.
    pub async fn play(&self) {
        let Some(element) = self.element() else {
            return;
        };

        trace!("Requesting playback");
        let result = element.play().await;

        if self.disposed.is_cancelled() {
            debug!("Play request settled after destroy, discarding outcome");
            return;
        }

        match result {
            Ok(()) => {
                info!("Playback started");
                self.state.update(|s| s.is_playing = true);
                self.flash_indicator(PlaybackIndicator::Playing, self.config.controls.indicator_flash());
            }
            Err(e) => {
                error!("Error playing video: {}", e);
                self.state.update(|s| {
                    s.is_playing = false;
                    s.loading = false;
                    s.error = Some(MediaError::PlayRejected(e.to_string()));
                });
            }
        }
    }

    pub fn pause(&self) {
        let Some(element) = self.element() else {
            return;
        };

        trace!("Pausing playback");
        element.pause();
        self.state.update(|s| s.is_playing = false);
        self.flash_indicator(PlaybackIndicator::Paused, self.config.controls.indicator_flash());
    }

    pub fn toggle_mute(&self) {
        let Some(element) = self.element() else {
            return;
        };

        element.set_muted(!element.is_muted());
        let muted = element.is_muted();
        trace!("Muted: {}", muted);
        self.state.update(|s| s.is_muted = muted);
    }

    /// Sets the volume percentage, clamped to `[0, 100]`. Zero mutes.
    pub fn set_volume(&self, volume: i32) {
        let Some(element) = self.element() else {
            return;
        };

        let volume = volume.clamp(0, i32::from(constants::MAX_VOLUME)) as u8;
        let muted = volume == 0;
        trace!("Setting volume to {}", volume);

        element.set_volume(f64::from(volume) / f64::from(constants::MAX_VOLUME));
        element.set_muted(muted);
        self.state.update(|s| {
            s.volume = volume;
            s.is_muted = muted;
        });
    }

    pub fn change_volume(&self, delta: i32) {
        let current = i32::from(self.state.read(|s| s.volume));
        let target = current
            .saturating_add(delta)
            .clamp(0, i32::from(constants::MAX_VOLUME));
        self.set_volume(target);
    }

    /// Moves the playhead by `delta` seconds, clamped to the media bounds.
    pub fn seek(&self, delta: f64) {
        let Some(element) = self.element() else {
            return;
        };

        let (current, duration) = self.state.read(|s| (s.current_time, s.duration));
        if duration <= 0.0 || !delta.is_finite() {
            debug!("Ignoring seek before duration is known");
            return;
        }

        let target = (current + delta).clamp(0.0, duration);
        trace!("Seeking by {}s to {}", delta, target);
        self.write_position(element.as_ref(), target);
    }

    /// Seeks to the point on the track where the pointer landed. Pointers
    /// outside the track clamp to its ends.
    pub fn seek_to(&self, pointer: PointerSeek) {
        let Some(element) = self.element() else {
            return;
        };

        let duration = self.state.read(|s| s.duration);
        let Some(fraction) = pointer.fraction() else {
            debug!("Ignoring seek on a track without width");
            return;
        };
        if duration <= 0.0 {
            debug!("Ignoring seek before duration is known");
            return;
        }

        let target = fraction * duration;
        trace!("Seeking to {:.1}% ({}s)", fraction * 100.0, target);
        self.write_position(element.as_ref(), target);
    }

    fn write_position(&self, element: &dyn MediaElement, target: f64) {
        element.set_current_time(target);
        self.state.update(|s| {
            s.current_time = target;
            if let Some(percent) = s.percent_of_duration(target) {
                s.progress_percent = percent;
            }
        });
    }

    pub fn toggle_fullscreen(&self) {
        if self.disposed.is_cancelled() {
            return;
        }
        let Some(host) = lock(&self.fullscreen).clone() else {
            debug!("No fullscreen host bound");
            return;
        };

        match fullscreen::toggle(host.as_ref()) {
            Ok(FullscreenOutcome::Entered(api)) => {
                info!("Entered fullscreen via {:?}", api);
                self.state.update(|s| s.is_fullscreen = true);
            }
            Ok(FullscreenOutcome::Exited(api)) => {
                info!("Exited fullscreen via {:?}", api);
                self.state.update(|s| s.is_fullscreen = false);
            }
            Ok(FullscreenOutcome::Unavailable) => {}
            // Already logged; fullscreen failures never reach the error panel
            Err(_) => {}
        }
    }

    /// Clears the error and reloads the current source from scratch.
    pub fn retry(&self) {
        let Some(element) = self.element() else {
            return;
        };

        info!("Retrying {}", element.source());
        element.load();
        let playing = !element.is_paused();
        let current_time = element.current_time();
        self.state.update(|s| {
            s.error = None;
            s.loading = true;
            s.is_playing = playing;
            s.current_time = current_time;
            s.progress_percent = s.percent_of_duration(current_time).unwrap_or(0.0);
        });
    }

    // === Overlay ===

    pub fn show_controls(&self) {
        if self.disposed.is_cancelled() {
            return;
        }
        self.state.update(|s| s.controls_visible = true);
        self.arm_hide_timer(self.config.controls.hide_delay());
    }

    /// Pointer left the player: hide sooner than after plain inactivity.
    pub fn hide_controls(&self) {
        if self.disposed.is_cancelled() {
            return;
        }
        self.arm_hide_timer(self.config.controls.pointer_leave_delay());
    }

    fn arm_hide_timer(&self, delay: Duration) {
        let mut slot = lock(&self.hide_timer);
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let state = self.state.clone();
        *slot = self.spawn_timer("hide", async move {
            tokio::time::sleep(delay).await;
            state.update(|s| {
                if s.is_playing {
                    s.controls_visible = false;
                }
            });
        });
    }

    fn flash_indicator(&self, indicator: PlaybackIndicator, window: Duration) {
        let mut slot = lock(&self.indicator_timer);
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        self.state.update(|s| s.indicator = Some(indicator));

        let state = self.state.clone();
        *slot = self.spawn_timer("indicator", async move {
            tokio::time::sleep(window).await;
            state.update(|s| s.indicator = None);
        });
    }

    fn spawn_timer<F>(&self, name: &str, timer: F) -> Option<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Some(runtime) = Handle::try_current().ok().or_else(|| self.runtime.clone()) else {
            warn!("No tokio runtime available, {} timer not armed", name);
            return None;
        };
        Some(runtime.spawn(timer))
    }

    fn cancel_timers(&self) {
        for slot in [&self.hide_timer, &self.indicator_timer] {
            if let Some(handle) = lock(slot).take() {
                handle.abort();
            }
        }
    }

    // === Host notifications ===

    pub fn handle_event(&self, event: MediaEvent) {
        let Some(element) = self.element() else {
            trace!("Ignoring {:?} on an unbound or destroyed controller", event);
            return;
        };

        match event {
            MediaEvent::LoadedMetadata => {
                let duration = normalize_duration(element.duration());
                let (width, height) = element.video_dimensions();
                let video_size = format_video_size(width, height);
                debug!("Video metadata loaded: {}s {}", duration, video_size);
                self.state.update(|s| {
                    s.duration = duration;
                    s.video_size = video_size;
                });
            }
            MediaEvent::CanPlay => {
                debug!("Video ready to play");
                self.state.update(|s| {
                    s.loading = false;
                    s.error = None;
                });
            }
            MediaEvent::Error(code) => {
                let media_error = MediaError::from_code(code);
                error!("Video error: {}", media_error);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(media_error);
                });
            }
            MediaEvent::TimeUpdate => {
                let current_time = element.current_time();
                self.state.update(|s| {
                    s.current_time = current_time;
                    if let Some(percent) = s.percent_of_duration(current_time) {
                        s.progress_percent = percent;
                    }
                });
            }
            MediaEvent::Ended => {
                debug!("Playback ended");
                self.state.update(|s| s.is_playing = false);
                self.flash_indicator(PlaybackIndicator::Ended, self.config.controls.end_indicator());
            }
            MediaEvent::Waiting => {
                self.state.update(|s| s.loading = true);
            }
            MediaEvent::CanPlayThrough => {
                self.state.update(|s| s.loading = false);
            }
            MediaEvent::Progress => {
                let Some(last) = element.buffered().last().copied() else {
                    return;
                };
                self.state.update(|s| {
                    if let Some(percent) = s.percent_of_duration(last.end) {
                        s.buffered_percent = percent;
                    }
                });
            }
        }
    }

    /// Feeds host notifications into the controller until the channel closes
    /// or the controller is destroyed.
    pub fn listen(self: &Arc<Self>, mut events: mpsc::UnboundedReceiver<MediaEvent>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            debug!("Media event pump started");
            loop {
                tokio::select! {
                    _ = controller.disposed.cancelled() => break,
                    event = events.recv() => match event {
                        Some(event) => controller.handle_event(event),
                        None => break,
                    },
                }
            }
            debug!("Media event pump stopped");
        })
    }

    // === Keyboard ===

    /// Applies a keyboard shortcut. Keys are only honoured while the overlay
    /// is visible.
    pub async fn handle_key(&self, code: &str) -> KeyDisposition {
        if self.disposed.is_cancelled() || !self.state.read(|s| s.controls_visible) {
            return KeyDisposition::PassThrough;
        }
        let Ok(key) = code.parse::<KeyCode>() else {
            return KeyDisposition::PassThrough;
        };

        let playback = &self.config.playback;
        match Shortcut::for_key(key, playback.seek_step_secs, playback.volume_step) {
            Shortcut::TogglePlayPause => self.toggle_play_pause().await,
            Shortcut::Seek(delta) => self.seek(delta),
            Shortcut::ChangeVolume(delta) => self.change_volume(delta),
            Shortcut::ToggleMute => self.toggle_mute(),
            Shortcut::ToggleFullscreen => self.toggle_fullscreen(),
        }
        KeyDisposition::PreventDefault
    }

    // === Teardown ===

    /// Stops playback, aborts the media fetch and cancels timers. Safe to call
    /// repeatedly, on an unbound controller, or with a play request pending.
    pub fn destroy(&self) {
        let first = !self.disposed.is_cancelled();
        self.disposed.cancel();
        self.cancel_timers();

        if let Some(element) = lock(&self.element).take() {
            element.pause();
            element.set_source("");
            element.load();
        }
        lock(&self.fullscreen).take();

        if first {
            debug!("Playback controller destroyed");
            self.state.update(|s| {
                s.is_playing = false;
                s.indicator = None;
            });
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}
