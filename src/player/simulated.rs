//! In-memory hosts used by the headless driver and the test suites.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::trace;

use super::fullscreen::FullscreenApi;
use super::traits::{FullscreenHost, MediaElement};
use super::types::TimeRange;
use crate::utils::FullscreenError;

/// How the simulated element answers `play` requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayBehavior {
    Resolve,
    Reject(String),
    /// Stays pending until [`SimulatedElement::settle_play`] is called.
    Deferred,
}

#[derive(Debug)]
struct ElementInner {
    paused: bool,
    current_time: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    source: String,
    buffered: Vec<TimeRange>,
    dimensions: (u32, u32),
    play_behavior: PlayBehavior,
    pending_play: Option<oneshot::Sender<Result<(), String>>>,
    play_requests: usize,
    pause_calls: usize,
    load_calls: usize,
}

#[derive(Debug)]
pub struct SimulatedElement {
    inner: Mutex<ElementInner>,
}

impl SimulatedElement {
    pub fn new(source: &str) -> Self {
        Self {
            inner: Mutex::new(ElementInner {
                paused: true,
                current_time: 0.0,
                duration: f64::NAN,
                volume: 1.0,
                muted: false,
                source: source.to_string(),
                buffered: Vec::new(),
                dimensions: (0, 0),
                play_behavior: PlayBehavior::Resolve,
                pending_play: None,
                play_requests: 0,
                pause_calls: 0,
                load_calls: 0,
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, ElementInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pretends metadata arrived for a video of the given length and size.
    pub fn with_metadata(self, duration: f64, width: u32, height: u32) -> Self {
        {
            let mut inner = self.inner();
            inner.duration = duration;
            inner.dimensions = (width, height);
        }
        self
    }

    pub fn set_play_behavior(&self, behavior: PlayBehavior) {
        self.inner().play_behavior = behavior;
    }

    pub fn set_duration(&self, duration: f64) {
        self.inner().duration = duration;
    }

    pub fn set_buffered(&self, ranges: Vec<TimeRange>) {
        self.inner().buffered = ranges;
    }

    /// Settles a deferred play request. Returns false if none was pending.
    pub fn settle_play(&self, outcome: Result<(), String>) -> bool {
        match self.inner().pending_play.take() {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }

    pub fn has_pending_play(&self) -> bool {
        self.inner().pending_play.is_some()
    }

    pub fn play_requests(&self) -> usize {
        self.inner().play_requests
    }

    pub fn pause_calls(&self) -> usize {
        self.inner().pause_calls
    }

    pub fn load_calls(&self) -> usize {
        self.inner().load_calls
    }
}

#[async_trait]
impl MediaElement for SimulatedElement {
    fn is_paused(&self) -> bool {
        self.inner().paused
    }

    async fn play(&self) -> Result<()> {
        let pending = {
            let mut inner = self.inner();
            inner.play_requests += 1;
            match inner.play_behavior.clone() {
                PlayBehavior::Resolve => {
                    inner.paused = false;
                    return Ok(());
                }
                PlayBehavior::Reject(reason) => return Err(anyhow!(reason)),
                PlayBehavior::Deferred => {
                    let (sender, receiver) = oneshot::channel();
                    inner.pending_play = Some(sender);
                    receiver
                }
            }
        };

        trace!("Play request deferred");
        match pending.await {
            Ok(Ok(())) => {
                self.inner().paused = false;
                Ok(())
            }
            Ok(Err(reason)) => Err(anyhow!(reason)),
            Err(_) => Err(anyhow!("play request was interrupted")),
        }
    }

    fn pause(&self) {
        let mut inner = self.inner();
        inner.pause_calls += 1;
        inner.paused = true;
    }

    fn current_time(&self) -> f64 {
        self.inner().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.inner().current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.inner().duration
    }

    fn volume(&self) -> f64 {
        self.inner().volume
    }

    fn set_volume(&self, volume: f64) {
        self.inner().volume = volume;
    }

    fn is_muted(&self) -> bool {
        self.inner().muted
    }

    fn set_muted(&self, muted: bool) {
        self.inner().muted = muted;
    }

    fn source(&self) -> String {
        self.inner().source.clone()
    }

    fn set_source(&self, source: &str) {
        self.inner().source = source.to_string();
    }

    fn buffered(&self) -> Vec<TimeRange> {
        self.inner().buffered.clone()
    }

    fn video_dimensions(&self) -> (u32, u32) {
        self.inner().dimensions
    }

    fn load(&self) {
        let mut inner = self.inner();
        inner.load_calls += 1;
        inner.paused = true;
        inner.current_time = 0.0;
        // Reloading drops a pending play request, like a real element
        inner.pending_play = None;
    }
}

#[derive(Debug)]
struct FullscreenInner {
    supported: HashSet<FullscreenApi>,
    active: bool,
    deny: bool,
    requests: Vec<FullscreenApi>,
}

#[derive(Debug)]
pub struct SimulatedFullscreen {
    inner: Mutex<FullscreenInner>,
}

impl SimulatedFullscreen {
    pub fn new(supported: &[FullscreenApi]) -> Self {
        Self {
            inner: Mutex::new(FullscreenInner {
                supported: supported.iter().copied().collect(),
                active: false,
                deny: false,
                requests: Vec::new(),
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, FullscreenInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn deny_requests(&self, deny: bool) {
        self.inner().deny = deny;
    }

    /// APIs used for successful enter requests, in order.
    pub fn requests(&self) -> Vec<FullscreenApi> {
        self.inner().requests.clone()
    }
}

impl FullscreenHost for SimulatedFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.inner().active
    }

    fn supports(&self, api: FullscreenApi) -> bool {
        self.inner().supported.contains(&api)
    }

    fn request(&self, api: FullscreenApi) -> Result<(), FullscreenError> {
        let mut inner = self.inner();
        if !inner.supported.contains(&api) {
            return Err(FullscreenError::NotSupported);
        }
        if inner.deny {
            return Err(FullscreenError::NotAllowed);
        }
        inner.active = true;
        inner.requests.push(api);
        Ok(())
    }

    fn exit(&self, api: FullscreenApi) -> Result<(), FullscreenError> {
        let mut inner = self.inner();
        if !inner.supported.contains(&api) {
            return Err(FullscreenError::NotSupported);
        }
        inner.active = false;
        Ok(())
    }
}
