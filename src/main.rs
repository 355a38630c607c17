//! Headless native runner
//!
//! Drives the simulation with the autopilot and either streams snapshots as
//! JSON lines or logs a periodic summary. A graphical frontend plugs into the
//! same `FrameDriver` with its own `InputSource` and `Renderer`.

use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use alien_invasion::autopilot::Autopilot;
use alien_invasion::sim::{GameEvent, GameState, Snapshot};
use alien_invasion::{Command, FixedRateClock, FrameDriver, InputSource, ManualClock, Renderer, Settings};

#[derive(Debug, Parser)]
#[command(name = "alien-invasion", version, about = "Headless Alien Invasion simulation")]
struct Args {
    /// JSON settings file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Override the cosmetic RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Pace frames at the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write every snapshot to stdout as a JSON line
    #[arg(long)]
    json: bool,

    /// Frames between autopilot shots
    #[arg(long, default_value_t = 8)]
    fire_every: u64,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

/// Sends Quit once the frame budget is spent
struct FrameBudget<I> {
    inner: I,
    remaining: u64,
}

impl<I: InputSource> InputSource for FrameBudget<I> {
    fn poll(&mut self, last: &Snapshot) -> Vec<Command> {
        if self.remaining == 0 {
            return vec![Command::Quit];
        }
        self.remaining -= 1;
        self.inner.poll(last)
    }
}

/// One JSON object per line
struct JsonLines {
    out: BufWriter<Stdout>,
}

impl Renderer for JsonLines {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Logs lifecycle events and a once-per-second status line
struct LogSummary {
    every: u64,
    frames: u64,
}

impl Renderer for LogSummary {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.frames += 1;
        for event in &snapshot.events {
            match event {
                GameEvent::AlienDestroyed { .. } => {}
                other => log::info!("tick {}: {:?}", snapshot.tick, other),
            }
        }
        if self.frames % self.every == 0 {
            log::info!(
                "tick {} {:?}: score {} (best {}), lives {}, aliens {}, bullets {}",
                snapshot.tick,
                snapshot.phase,
                snapshot.score,
                snapshot.best_score,
                snapshot.lives,
                snapshot.aliens.len(),
                snapshot.bullets.len()
            );
        }
        Ok(())
    }
}

fn run<R: Renderer>(args: &Args, settings: Settings, renderer: R) -> io::Result<Snapshot> {
    let input = FrameBudget {
        inner: Autopilot::new(args.fire_every, true),
        remaining: args.ticks,
    };
    let state = GameState::new(settings);
    let summary = if args.realtime {
        let clock = FixedRateClock::from_settings(&state.settings);
        FrameDriver::new(state, input, renderer, clock).run()?
    } else {
        FrameDriver::new(state, input, renderer, ManualClock::default()).run()?
    };
    Ok(summary.final_snapshot)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    settings.validate().context("invalid settings")?;

    if args.print_config {
        println!("{}", settings.to_json());
        return Ok(());
    }

    log::info!("Alien Invasion (headless) starting, {} frames", args.ticks);

    let every = u64::from(settings.tick_rate_hz);
    let last = if args.json {
        let out = BufWriter::new(io::stdout());
        run(&args, settings, JsonLines { out })
    } else {
        run(&args, settings, LogSummary { every, frames: 0 })
    }
    .context("frame loop failed")?;

    log::info!(
        "Finished at tick {}: score {}, best {}, fleets cleared {}",
        last.tick,
        last.score,
        last.best_score,
        last.fleets_cleared
    );
    Ok(())
}
