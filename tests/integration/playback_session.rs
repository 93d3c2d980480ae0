use crate::common::{PlayerBuilder, elapse};
use sprocket::Config;
use sprocket::player::{
    FullscreenApi, KeyDisposition, MediaElement, MediaEvent, PlaybackIndicator, PointerSeek,
};

#[tokio::test(start_paused = true)]
async fn test_viewing_session() {
    let player = PlayerBuilder::video(100.0).build();
    let controller = &player.controller;
    controller.handle_event(MediaEvent::LoadedMetadata);
    controller.handle_event(MediaEvent::CanPlay);

    // Pointer enters: overlay shows, space starts playback
    controller.show_controls();
    assert_eq!(controller.handle_key("Space").await, KeyDisposition::PreventDefault);
    assert!(controller.state().is_playing);
    assert_eq!(controller.state().indicator, Some(PlaybackIndicator::Playing));

    // Inactivity hides the overlay while playing
    elapse(3001).await;
    let state = controller.state();
    assert!(!state.controls_visible);
    assert!(!state.indicator_visible());

    // Hidden overlay means shortcuts pass through to the page
    assert_eq!(controller.handle_key("ArrowUp").await, KeyDisposition::PassThrough);

    controller.show_controls();
    controller.seek_to(PointerSeek::new(90.0, 100.0));
    assert_eq!(player.element.current_time(), 90.0);
    controller.handle_key("ArrowRight").await;
    assert_eq!(player.element.current_time(), 100.0);

    controller.handle_event(MediaEvent::Ended);
    assert!(!controller.state().is_playing);
    assert_eq!(controller.state().indicator, Some(PlaybackIndicator::Ended));

    // Not playing any more, so the overlay stays up
    elapse(3001).await;
    let state = controller.state();
    assert!(state.controls_visible);
    assert!(!state.indicator_visible());

    controller.destroy();
    assert_eq!(player.element.source(), "");
    assert_eq!(controller.pending_hide_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pointer_leave_hides_sooner() {
    let player = PlayerBuilder::video(100.0).build();
    let controller = &player.controller;
    controller.handle_event(MediaEvent::LoadedMetadata);
    controller.play().await;

    controller.show_controls();
    elapse(500).await;
    controller.hide_controls();
    assert_eq!(controller.pending_hide_timers(), 1);

    elapse(999).await;
    assert!(controller.state().controls_visible);
    elapse(2).await;
    assert!(!controller.state().controls_visible);
}

#[tokio::test(start_paused = true)]
async fn test_configured_delays_are_used() {
    let mut config = Config::default();
    config.controls.hide_delay_ms = 500;
    config.playback.volume_step = 25;
    config.playback.initial_volume = 50;

    let player = PlayerBuilder::video(100.0).config(config).build();
    let controller = &player.controller;
    assert_eq!(controller.state().volume, 50);
    assert_eq!(player.element.volume(), 0.5);

    controller.play().await;
    controller.show_controls();
    controller.handle_key("ArrowUp").await;
    assert_eq!(controller.state().volume, 75);

    elapse(501).await;
    assert!(!controller.state().controls_visible);
}

#[tokio::test]
async fn test_fullscreen_falls_back_to_vendor_api() {
    let player = PlayerBuilder::video(100.0)
        .fullscreen_apis(&[FullscreenApi::Ms])
        .build();
    let controller = &player.controller;

    controller.show_controls();
    assert_eq!(controller.handle_key("KeyF").await, KeyDisposition::PreventDefault);
    assert!(controller.state().is_fullscreen);
    assert_eq!(player.fullscreen.requests(), vec![FullscreenApi::Ms]);

    controller.toggle_fullscreen();
    assert!(!controller.state().is_fullscreen);
}

#[tokio::test]
async fn test_fullscreen_without_api_is_noop() {
    let player = PlayerBuilder::video(100.0).fullscreen_apis(&[]).build();
    player.controller.toggle_fullscreen();
    assert!(!player.controller.state().is_fullscreen);
    assert!(player.fullscreen.requests().is_empty());
}

#[tokio::test]
async fn test_rejected_play_then_retry() {
    let player = PlayerBuilder::video(100.0)
        .play_behavior(sprocket::player::PlayBehavior::Reject(
            "play() request was denied".to_string(),
        ))
        .build();
    let controller = &player.controller;

    controller.play().await;
    let state = controller.state();
    assert!(!state.is_playing);
    assert_eq!(
        state.error_message(),
        "Failed to play video: play() request was denied"
    );

    // Transport is locked until retry clears the error
    controller.toggle_play_pause().await;
    assert_eq!(player.element.play_requests(), 1);

    player
        .element
        .set_play_behavior(sprocket::player::PlayBehavior::Resolve);
    controller.retry();
    controller.toggle_play_pause().await;
    assert!(controller.state().is_playing);
}
