use crate::common::{PlayerBuilder, settle};
use sprocket::MediaError;
use sprocket::player::{MediaElement, MediaEvent, TimeRange};
use tokio::sync::mpsc;

#[tokio::test]
async fn test_pump_applies_host_notifications() {
    let player = PlayerBuilder::video(240.0).dimensions(640, 360).build();
    let controller = &player.controller;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let pump = controller.listen(events_rx);

    events_tx.send(MediaEvent::LoadedMetadata).unwrap();
    events_tx.send(MediaEvent::CanPlay).unwrap();
    settle(|| !controller.state().loading).await;

    let state = controller.state();
    assert_eq!(state.duration, 240.0);
    assert_eq!(state.video_size, "640x360");
    assert!(!state.has_error());

    player.element.set_current_time(60.0);
    player
        .element
        .set_buffered(vec![TimeRange::new(0.0, 120.0)]);
    events_tx.send(MediaEvent::TimeUpdate).unwrap();
    events_tx.send(MediaEvent::Progress).unwrap();
    settle(|| controller.state().buffered_percent > 0.0).await;

    let state = controller.state();
    assert_eq!(state.progress_percent, 25.0);
    assert_eq!(state.buffered_percent, 50.0);
    assert_eq!(controller.elapsed_label(), "1:00");

    drop(events_tx);
    pump.await.unwrap();
}

#[tokio::test]
async fn test_pump_stops_on_destroy() {
    let player = PlayerBuilder::video(30.0).build();
    let controller = &player.controller;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let pump = controller.listen(events_rx);

    controller.destroy();
    pump.await.unwrap();

    // Nothing is listening any more; late notifications change nothing
    let _ = events_tx.send(MediaEvent::Error(Some(MediaError::CODE_NETWORK)));
    controller.handle_event(MediaEvent::Error(Some(MediaError::CODE_NETWORK)));
    assert!(!controller.state().has_error());
}

#[tokio::test]
async fn test_error_before_rejected_play_settles() {
    let player = PlayerBuilder::video(30.0)
        .play_behavior(sprocket::player::PlayBehavior::Deferred)
        .build();
    let controller = player.controller.clone();

    let play = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.play().await })
    };
    settle(|| player.element.has_pending_play()).await;

    // The host reports a decode failure while the play request is in flight
    controller.handle_event(MediaEvent::Error(Some(MediaError::CODE_DECODE)));
    assert_eq!(controller.state().error, Some(MediaError::Decode));

    assert!(player.element.settle_play(Err("decode failure".to_string())));
    play.await.unwrap();

    let state = controller.state();
    assert!(!state.is_playing);
    assert!(!state.loading);
    assert_eq!(
        state.error,
        Some(MediaError::PlayRejected("decode failure".to_string()))
    );

    controller.retry();
    assert!(!controller.state().has_error());
    assert!(controller.state().loading);
    assert!(player.element.is_paused());
}
