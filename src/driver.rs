//! Fixed-tick frame driver
//!
//! Owns the session and runs the loop: drain commands, tick, snapshot,
//! render. Input, output and pacing are collaborators behind traits so the
//! same loop drives a real frontend, a headless run, or a test.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::settings::Settings;
use crate::sim::{GameState, Snapshot, TickInput, tick};

pub use crate::sim::{Command, Direction};

/// Source of input commands, drained once per tick
pub trait InputSource {
    /// Commands that arrived since the last tick. `last` is the snapshot the
    /// renderer was most recently given.
    fn poll(&mut self, last: &Snapshot) -> Vec<Command>;
}

/// Consumer of per-tick snapshots
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;

    /// Called once after the last frame, e.g. to flush buffered output
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Tick pacing
pub trait Clock {
    /// Block until the next tick is due
    fn wait_for_tick(&mut self);
}

/// Sleeps so ticks start at a fixed rate. Late ticks are not made up.
#[derive(Debug)]
pub struct FixedRateClock {
    period: Duration,
    last: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_duration())
    }
}

impl Clock for FixedRateClock {
    fn wait_for_tick(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                thread::sleep(self.period - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Never sleeps; counts the ticks it was asked for
#[derive(Debug, Default)]
pub struct ManualClock {
    pub ticks: u64,
}

impl Clock for ManualClock {
    fn wait_for_tick(&mut self) {
        self.ticks += 1;
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Loop iterations executed (including paused ones)
    pub frames: u64,
    pub final_snapshot: Snapshot,
}

/// The fixed-tick loop
pub struct FrameDriver<I, R, C> {
    state: GameState,
    input: I,
    renderer: R,
    clock: C,
    last: Snapshot,
    frames: u64,
}

impl<I: InputSource, R: Renderer, C: Clock> FrameDriver<I, R, C> {
    pub fn new(state: GameState, input: I, renderer: R, clock: C) -> Self {
        let last = state.snapshot();
        Self {
            state,
            input,
            renderer,
            clock,
            last,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Last snapshot handed to the renderer
    pub fn last_snapshot(&self) -> &Snapshot {
        &self.last
    }

    /// Run one frame. Returns `Ok(false)` once quit was requested.
    pub fn step(&mut self) -> io::Result<bool> {
        self.clock.wait_for_tick();

        let commands = self.input.poll(&self.last);
        let input = TickInput::from_commands(&commands);
        if input.quit {
            log::info!("Quit requested after {} frames", self.frames);
            return Ok(false);
        }

        tick(&mut self.state, &input);
        self.frames += 1;

        self.last = self.state.snapshot();
        self.renderer.render(&self.last)?;
        Ok(true)
    }

    /// Run until quit; renderer errors end the loop
    pub fn run(mut self) -> io::Result<RunSummary> {
        log::info!(
            "Frame driver starting: {}x{} playfield at {} Hz",
            self.state.playfield.size.x,
            self.state.playfield.size.y,
            self.state.settings.tick_rate_hz
        );
        while self.step()? {}
        self.renderer.finish()?;
        Ok(RunSummary {
            frames: self.frames,
            final_snapshot: self.last,
        })
    }
}
