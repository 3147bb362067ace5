//! Firemix output probe
//!
//! Loads a settings file, opens the output stage and pushes a solid test
//! frame to every configured controller. Useful for checking wiring, ports
//! and dimming exemptions without running the full mixer.

mod logging_setup;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use firemix_core::{HlsFrame, Settings};
use firemix_net::Networking;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "firemix-probe")]
#[command(about = "Send a solid test frame to every configured LED controller")]
#[command(version)]
struct Args {
    /// Settings file (.toml, anything else is read as JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Hue, 0.0 to 1.0
    #[arg(long, default_value_t = 0.0)]
    hue: f32,

    /// Lightness, 0.0 to 1.0
    #[arg(long, default_value_t = 0.5)]
    lightness: f32,

    /// Saturation, 0.0 to 1.0
    #[arg(long, default_value_t = 1.0)]
    saturation: f32,

    /// Global dimmer, 0.0 to 1.0
    #[arg(short, long, default_value_t = 1.0)]
    dimmer: f32,

    /// Number of frames to send
    #[arg(short = 'n', long, default_value_t = 1)]
    frames: u64,

    /// Frame rate when sending more than one frame
    #[arg(long, default_value_t = 30.0)]
    fps: f32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(&args.config)
        .with_context(|| format!("Failed to load settings from {:?}", args.config))?;
    let _log_guard = logging_setup::init(&settings.logging)?;

    let strands = settings.strand_layout();
    let clients = &settings.networking.clients;
    if settings.networking.enabled_clients().next().is_none() {
        warn!("No enabled clients in {:?}; frames go nowhere", args.config);
    }

    let mut frame = HlsFrame::new(strands.pixel_count());
    frame.fill(args.hue, args.lightness, args.saturation);

    let mut output =
        Networking::open(&settings.networking).context("Failed to open output sockets")?;

    info!(
        "Sending {} frame(s) of {} pixels over {} strands to {} client(s)",
        args.frames,
        frame.len(),
        strands.enabled_count(),
        clients.len()
    );

    let interval = Duration::from_secs_f32(1.0 / args.fps.max(0.1));
    for index in 0..args.frames {
        let started = Instant::now();

        output
            .write_buffer(&frame, args.dimmer, &strands, clients)
            .with_context(|| format!("Failed to send frame {}", index))?;

        if index + 1 < args.frames {
            std::thread::sleep(interval.saturating_sub(started.elapsed()));
        }
    }

    let stats = output.close();
    println!(
        "{} frames, {} datagrams, {} pub/sub messages",
        stats.frames, stats.datagrams, stats.multipart_messages
    );

    Ok(())
}
