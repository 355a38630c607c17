//! Alien Invasion - a fixed-tick arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, bullets, fleet, collisions, lifecycle)
//! - `driver`: Fixed-tick frame driver and its input/render/clock seams
//! - `autopilot`: Scripted input source for headless runs
//! - `settings`: Data-driven game configuration
//! - `highscores`: In-process session leaderboard

pub mod autopilot;
pub mod driver;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use driver::{Clock, Command, FixedRateClock, FrameDriver, InputSource, ManualClock, Renderer};
pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Reference tick rate (Hz)
    pub const TICK_RATE_HZ: u32 = 60;

    /// Playfield defaults
    pub const PLAYFIELD_WIDTH: f32 = 1200.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 60.0;
    pub const SHIP_HEIGHT: f32 = 48.0;
    pub const SHIP_SPEED: f32 = 1.5;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 3.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 2.5;
    pub const BULLETS_ALLOWED: usize = 3;

    /// Alien defaults
    pub const ALIEN_WIDTH: f32 = 60.0;
    pub const ALIEN_HEIGHT: f32 = 58.0;
    pub const ALIEN_SPEED: f32 = 1.0;

    /// Fleet layout: grid pitch as a multiple of alien size
    pub const FLEET_SPACING: f32 = 2.0;
    /// Vertical distance the whole fleet drops on each edge contact
    pub const FLEET_DROP: f32 = 10.0;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const POINTS_PER_ALIEN: u64 = 10;
    /// Ship-alien collisions ignored for this many ticks after a round reset (0.5s at 60 Hz)
    pub const GRACE_TICKS: u32 = 30;
}
