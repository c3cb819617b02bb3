//! Sidescroller headless runner
//!
//! Loads settings, builds a session and plays a scripted run, logging what
//! happens. `RUST_LOG=debug` shows generator detail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sidescroller::renderer::{EntityKind, HostError, RenderFrame, RenderHost};
use sidescroller::session::{EntityHandle, HudSnapshot};
use sidescroller::sim::KeyCode;
use sidescroller::{GamePhase, Session, SessionEvent, Settings, generate_level};

const FRAME_TIME: f64 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 1800;
/// Scripted jump cadence (frames)
const JUMP_EVERY: u32 = 45;
const JUMP_HOLD: u32 = 12;

/// Host that keeps entity counts and logs HUD changes
#[derive(Default)]
struct LogHost {
    live: usize,
    disposed: usize,
    frames: u64,
    last_instances: usize,
}

impl RenderHost for LogHost {
    fn spawn(&mut self, _handle: EntityHandle, _kind: EntityKind) {
        self.live += 1;
    }

    fn dispose(&mut self, _handle: EntityHandle) {
        self.live = self.live.saturating_sub(1);
        self.disposed += 1;
    }

    fn present(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        self.last_instances = frame.instances.len();
    }

    fn update_hud(&mut self, hud: &HudSnapshot) -> Result<(), HostError> {
        log::info!(
            "HUD: score {} | {} | seed {} | {} collectibles left",
            hud.score,
            hud.phase.as_str(),
            hud.seed,
            hud.collectibles_remaining
        );
        Ok(())
    }
}

#[derive(Parser)]
#[command(name = "sidescroller")]
#[command(about = "Headless sidescroller run")]
struct Args {
    /// Settings JSON (defaults apply when omitted)
    settings: Option<PathBuf>,

    /// Frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u32,

    /// Fixed level seed
    #[arg(long)]
    seed: Option<u32>,

    /// Print the generated level as JSON and exit
    #[arg(long)]
    dump_level: bool,
}

fn run(args: Args) -> Result<()> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.level.seed = args.seed;
    }

    if args.dump_level {
        let level = generate_level(&settings.level)?;
        println!("{}", serde_json::to_string_pretty(&level)?);
        return Ok(());
    }

    let mut session = Session::new(settings, LogHost::default())?;
    session.start();
    session.key_down(KeyCode::ArrowRight);

    for frame in 0..args.frames {
        match frame % JUMP_EVERY {
            0 => session.key_down(KeyCode::Space),
            JUMP_HOLD => session.key_up(KeyCode::Space),
            _ => {}
        }
        session.frame(frame as f64 * FRAME_TIME);

        for event in session.drain_events() {
            match event {
                SessionEvent::Collected { .. } | SessionEvent::ScoreChanged { .. } => {
                    log::debug!("{:?}", event)
                }
                _ => log::info!("{:?}", event),
            }
        }
        if session.phase() == GamePhase::GameOver {
            break;
        }
    }

    let host = session.host();
    log::info!(
        "Finished after {} frames: phase {}, score {}, seed {}, {} live entities ({} disposed), {} instances last frame",
        host.frames,
        session.phase().as_str(),
        session.score(),
        session.level_seed(),
        host.live,
        host.disposed,
        host.last_instances
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let args = Args::parse();
    env_logger::init();
    log::info!("Sidescroller (headless) starting...");

    if let Err(e) = run(args) {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive a `Session` from their own frame callback
}
