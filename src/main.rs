use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sprocket::Config;
use sprocket::player::{
    FullscreenApi, MediaElement, MediaEvent, PlaybackController, PointerSeek, SimulatedElement,
    SimulatedFullscreen, TimeRange,
};

const DEFAULT_SOURCE: &str = "/files/stream/demo.mp4";
const DEFAULT_DURATION_SECS: f64 = 120.0;

/// One line of driver input.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Play,
    Pause,
    Toggle,
    Mute,
    Volume(i32),
    Seek(f64),
    SeekTo(f64, f64),
    Key(String),
    Fullscreen,
    Retry,
    Show,
    Hide,
    /// Advance the simulated playhead and buffer by this many seconds.
    Tick(f64),
    Event(MediaEvent),
    State,
    Quit,
}

fn parse_event(name: &str, arg: Option<&str>) -> Result<MediaEvent> {
    Ok(match name {
        "metadata" => MediaEvent::LoadedMetadata,
        "canplay" => MediaEvent::CanPlay,
        "canplaythrough" => MediaEvent::CanPlayThrough,
        "timeupdate" => MediaEvent::TimeUpdate,
        "ended" => MediaEvent::Ended,
        "waiting" => MediaEvent::Waiting,
        "progress" => MediaEvent::Progress,
        "error" => MediaEvent::Error(
            arg.map(str::parse::<u16>)
                .transpose()
                .context("Error code must be a number")?,
        ),
        other => bail!("Unknown event '{}'", other),
    })
}

fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        bail!("Empty command");
    };

    let mut number = |what: &str| -> Result<f64> {
        parts
            .next()
            .with_context(|| format!("Missing {}", what))?
            .parse::<f64>()
            .with_context(|| format!("Invalid {}", what))
    };

    Ok(match name {
        "play" => Command::Play,
        "pause" => Command::Pause,
        "toggle" => Command::Toggle,
        "mute" => Command::Mute,
        "volume" => Command::Volume(number("volume")? as i32),
        "seek" => Command::Seek(number("seconds")?),
        "seek-to" => {
            let offset = number("pointer offset")?;
            let width = number("track width")?;
            Command::SeekTo(offset, width)
        }
        "fullscreen" => Command::Fullscreen,
        "retry" => Command::Retry,
        "show" => Command::Show,
        "hide" => Command::Hide,
        "tick" => Command::Tick(number("seconds")?),
        "state" => Command::State,
        "quit" | "exit" => Command::Quit,
        "key" => {
            let code = parts.next().context("Missing key code")?;
            Command::Key(code.to_string())
        }
        "event" => {
            let event = parts.next().context("Missing event name")?;
            Command::Event(parse_event(event, parts.next())?)
        }
        other => bail!("Unknown command '{}'", other),
    })
}

async fn run(config: Config, source: String, duration: f64) -> Result<()> {
    let element = Arc::new(SimulatedElement::new(&source).with_metadata(duration, 1920, 1080));
    let fullscreen = Arc::new(SimulatedFullscreen::new(&FullscreenApi::FALLBACK_ORDER));
    let controller = Arc::new(PlaybackController::bound(
        &config,
        element.clone(),
        Some(fullscreen),
    ));

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let pump = controller.listen(events_rx);
    for event in [MediaEvent::LoadedMetadata, MediaEvent::CanPlay] {
        events_tx.send(event).context("Event pump stopped")?;
    }
    controller.show_controls();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                warn!("{:#}", e);
                continue;
            }
        };

        match command {
            Command::Play => controller.play().await,
            Command::Pause => controller.pause(),
            Command::Toggle => controller.toggle_play_pause().await,
            Command::Mute => controller.toggle_mute(),
            Command::Volume(volume) => controller.set_volume(volume),
            Command::Seek(delta) => controller.seek(delta),
            Command::SeekTo(offset, width) => controller.seek_to(PointerSeek::new(offset, width)),
            Command::Key(code) => {
                let disposition = controller.handle_key(&code).await;
                info!("{} -> {:?}", code, disposition);
            }
            Command::Fullscreen => controller.toggle_fullscreen(),
            Command::Retry => controller.retry(),
            Command::Show => controller.show_controls(),
            Command::Hide => controller.hide_controls(),
            Command::Tick(seconds) => {
                if !element.is_paused() {
                    let position = (element.current_time() + seconds).min(duration);
                    element.set_current_time(position);
                    element.set_buffered(vec![TimeRange::new(0.0, (position + 30.0).min(duration))]);
                    events_tx.send(MediaEvent::TimeUpdate)?;
                    events_tx.send(MediaEvent::Progress)?;
                    if position >= duration {
                        element.pause();
                        events_tx.send(MediaEvent::Ended)?;
                    }
                }
            }
            Command::Event(event) => events_tx.send(event)?,
            Command::State => {}
            Command::Quit => break,
        }

        // Let the event pump catch up before reporting
        tokio::task::yield_now().await;
        println!("{}", serde_json::to_string(&controller.state())?);
    }

    controller.destroy();
    pump.await?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sprocket=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting sprocket playback driver");

    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let duration = match args.next() {
        Some(raw) => raw.parse::<f64>().context("Duration must be a number of seconds")?,
        None => DEFAULT_DURATION_SECS,
    };

    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, source, duration))
}
