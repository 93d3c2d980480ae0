use sprocket::Config;
use sprocket::player::{
    FullscreenApi, FullscreenHost, PlayBehavior, PlaybackController, SimulatedElement,
    SimulatedFullscreen,
};
use std::sync::Arc;

pub struct PlayerBuilder {
    source: String,
    duration: f64,
    dimensions: (u32, u32),
    fullscreen_apis: Vec<FullscreenApi>,
    play_behavior: PlayBehavior,
    config: Config,
}

pub struct TestPlayer {
    pub controller: Arc<PlaybackController>,
    pub element: Arc<SimulatedElement>,
    pub fullscreen: Arc<SimulatedFullscreen>,
}

impl PlayerBuilder {
    pub fn video(duration: f64) -> Self {
        Self {
            source: "/files/preview/42/stream".to_string(),
            duration,
            dimensions: (1920, 1080),
            fullscreen_apis: FullscreenApi::FALLBACK_ORDER.to_vec(),
            play_behavior: PlayBehavior::Resolve,
            config: Config::default(),
        }
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = (width, height);
        self
    }

    pub fn fullscreen_apis(mut self, apis: &[FullscreenApi]) -> Self {
        self.fullscreen_apis = apis.to_vec();
        self
    }

    pub fn play_behavior(mut self, behavior: PlayBehavior) -> Self {
        self.play_behavior = behavior;
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> TestPlayer {
        let (width, height) = self.dimensions;
        let element = Arc::new(
            SimulatedElement::new(&self.source).with_metadata(self.duration, width, height),
        );
        element.set_play_behavior(self.play_behavior);

        let fullscreen = Arc::new(SimulatedFullscreen::new(&self.fullscreen_apis));
        let host: Arc<dyn FullscreenHost> = fullscreen.clone();
        let controller = Arc::new(PlaybackController::bound(
            &self.config,
            element.clone(),
            Some(host),
        ));

        TestPlayer {
            controller,
            element,
            fullscreen,
        }
    }
}
