use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};

use player_overlay::display::{DisplaySurface, FullscreenApi, HeadlessDocument, WidgetRole};
use player_overlay::media::{AutoplayPolicy, HeadlessMedia, MediaElement};
use player_overlay::player::{ControlEvent, ControlWidgetSet, Fill, Label, OverlayActions, PlayerController};
use player_overlay::utils::{self, format_time};

/// Simulated clock step between media time updates
const TICK: Duration = Duration::from_millis(250);

/// Width reported for both tracks; commands give fractions of it
const TRACK_WIDTH: f64 = 100.0;

type Controller = PlayerController<HeadlessMedia, HeadlessDocument>;

/// player-overlay - drive the video control overlay against a headless player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media duration in seconds
    #[arg(long, default_value = "200")]
    duration: f64,

    /// How the simulated host treats play requests (allow, muted, blocked)
    #[arg(long, value_name = "POLICY", default_value = "muted")]
    autoplay_policy: AutoplayPolicy,

    /// Leave a widget out of the document (repeatable)
    #[arg(long, value_name = "WIDGET")]
    missing: Vec<WidgetRole>,

    /// Fullscreen entry point the host supports (repeatable; default all)
    #[arg(long = "fullscreen-api", value_name = "API")]
    fullscreen_apis: Vec<FullscreenApi>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print state as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// A line read from stdin
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Play,
    Seek(f64),
    Volume(f64),
    Mute,
    Fullscreen,
    Unmute,
    Status,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let mut fraction = || -> Result<f64> {
        let word = words
            .next()
            .ok_or_else(|| anyhow::anyhow!("'{}' needs a fraction of the track, e.g. 0.5", verb))?;
        Ok(word.parse()?)
    };

    Ok(match verb {
        "play" | "p" => Command::Play,
        "seek" => Command::Seek(fraction()?),
        "volume" | "vol" => Command::Volume(fraction()?),
        "mute" | "m" => Command::Mute,
        "fullscreen" | "f" => Command::Fullscreen,
        "unmute" => Command::Unmute,
        "" | "status" => Command::Status,
        "quit" | "q" => Command::Quit,
        other => anyhow::bail!("Unknown command '{}'", other),
    })
}

fn run_command(controller: &mut Controller, command: Command) {
    match command {
        Command::Play => controller.dispatch(ControlEvent::PlayClicked),
        Command::Seek(fraction) => controller.dispatch(ControlEvent::ScrubTrackClicked {
            offset_x: fraction * TRACK_WIDTH,
            track_width: TRACK_WIDTH,
        }),
        Command::Volume(fraction) => controller.dispatch(ControlEvent::VolumeTrackClicked {
            offset_x: fraction * TRACK_WIDTH,
            track_width: TRACK_WIDTH,
        }),
        Command::Mute => controller.dispatch(ControlEvent::VolumeButtonClicked),
        Command::Fullscreen => controller.dispatch(ControlEvent::FullscreenClicked),
        Command::Unmute => controller.unmute_from_overlay(),
        Command::Status | Command::Quit => {}
    }
}

/// Everything the host would render
#[derive(Serialize)]
struct Snapshot<'a> {
    widgets: &'a ControlWidgetSet,
    current_time: f64,
    paused: bool,
    muted: bool,
    volume: f64,
    fullscreen: bool,
    has_user_unmuted: bool,
}

fn print_state(controller: &Controller, json: bool) -> Result<()> {
    let media = controller.media();
    let snapshot = Snapshot {
        widgets: controller.widgets(),
        current_time: media.map(|m| m.current_time()).unwrap_or(0.0),
        paused: media.map(|m| m.is_paused()).unwrap_or(true),
        muted: media.map(|m| m.is_muted()).unwrap_or(false),
        volume: media.map(|m| m.volume()).unwrap_or(0.0),
        fullscreen: controller.display().is_fullscreen(),
        has_user_unmuted: controller.has_user_unmuted(),
    };

    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
        return Ok(());
    }

    let w = snapshot.widgets;
    let label = |l: &Option<Label>| l.as_ref().map_or("-", Label::text).to_string();
    let fill = |f: &Option<Fill>| f.as_ref().map_or("-", Fill::width).to_string();
    let overlay = match &w.unmute_overlay {
        None => "absent",
        Some(o) if !o.is_displayed() => "hidden",
        Some(o) if o.opacity() == 0.0 => "fading",
        Some(_) => "shown",
    };

    println!(
        "[{}] {} / {} progress={} volume={} {} overlay={} fullscreen={} ({} media)",
        label(&w.play_button),
        label(&w.current_time),
        label(&w.duration),
        fill(&w.progress_fill),
        label(&w.volume_button),
        fill(&w.volume_fill),
        overlay,
        if snapshot.fullscreen { "on" } else { "off" },
        format_time(snapshot.current_time),
    );
    Ok(())
}

/// Resolve once the controller's next timed change is due
async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = utils::load_config(args.config.as_deref())?;

    let log_level = if args.debug { "debug" } else { config.general.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting player-overlay v{}", env!("CARGO_PKG_VERSION"));

    let mut document = HeadlessDocument::complete().without(&args.missing);
    if !args.fullscreen_apis.is_empty() {
        document = document.with_fullscreen_apis(&args.fullscreen_apis);
    }
    let media = HeadlessMedia::new(args.duration, args.autoplay_policy);

    let mut controller = PlayerController::bind(document, Some(media), &config);
    print_state(&controller, args.json)?;

    let mut ticker = tokio::time::interval(TICK);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let events = controller.media_mut().map(|m| m.advance(TICK)).unwrap_or_default();
                for event in events {
                    controller.dispatch_media(event);
                }
                controller.tick(Instant::now());
            }
            _ = wait_for_deadline(controller.next_deadline()) => {
                controller.tick(Instant::now());
                print_state(&controller, args.json)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        run_command(&mut controller, command);
                        print_state(&controller, args.json)?;
                    }
                    Err(e) => warn!("{}", e),
                }
            }
        }
    }

    info!("Shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("play").unwrap(), Command::Play);
        assert_eq!(parse_command("seek 0.5").unwrap(), Command::Seek(0.5));
        assert_eq!(parse_command("vol 0.25").unwrap(), Command::Volume(0.25));
        assert_eq!(parse_command("  ").unwrap(), Command::Status);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert!(parse_command("seek").is_err());
        assert!(parse_command("seek half").is_err());
        assert!(parse_command("rewind").is_err());
    }

    #[test]
    fn test_run_command_uses_track_fractions() {
        let mut controller: Controller = PlayerController::bind(
            HeadlessDocument::complete(),
            Some(HeadlessMedia::loaded(200.0, AutoplayPolicy::Allow)),
            &utils::Config::default(),
        );

        run_command(&mut controller, Command::Seek(0.5));
        run_command(&mut controller, Command::Volume(0.25));

        let media = controller.media().unwrap();
        assert_eq!(media.current_time(), 100.0);
        assert_eq!(media.volume(), 0.25);
    }

    #[tokio::test]
    async fn test_overlay_hides_at_deadline() {
        let mut config = utils::Config::default();
        config.player.overlay_fade_ms = 20;
        let mut controller: Controller = PlayerController::bind(
            HeadlessDocument::complete(),
            Some(HeadlessMedia::loaded(200.0, AutoplayPolicy::Allow)),
            &config,
        );
        assert!(controller.next_deadline().is_none());

        controller.unmute_from_overlay();
        wait_for_deadline(controller.next_deadline()).await;
        controller.tick(Instant::now());

        assert!(!controller.widgets().unmute_overlay.as_ref().unwrap().is_displayed());
        assert!(controller.next_deadline().is_none());
    }
}
