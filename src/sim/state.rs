//! Game state and core simulation types
//!
//! The session owns the ship, the bullets in flight and the fleet. Score,
//! lives and the lifecycle phase live alongside them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fleet::{Fleet, fleet_layout};
use super::rect::{Body, EntityKind, Rect};
use crate::highscores::HighScores;
use crate::settings::Settings;

/// Coarse lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running
    Active,
    /// Everything frozen until the pause toggle
    Paused,
    /// Out of lives; waiting for restart
    GameOver,
}

/// Something that happened during a tick (for audio/visual collaborators)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AlienDestroyed { alien_id: u32, bullet_id: u32 },
    FleetRespawned { fleets_cleared: u32 },
    ShipHit { lives_left: u32 },
    GameOver { score: u64 },
    Restarted,
    Paused,
    Resumed,
}

/// Held movement keys. Opposite flags cancel out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    /// Unit-ish direction from the held flags
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i8 - self.left as i8;
        let y = self.down as i8 - self.up as i8;
        Vec2::new(x as f32, y as f32)
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub intent: MoveIntent,
    pub variant: ShipVariant,
}

impl Ship {
    /// Ship resting at the bottom center of the playfield
    pub fn new(settings: &Settings, playfield: &Rect) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(settings.ship_width, settings.ship_height),
            speed: settings.ship_speed,
            intent: MoveIntent::default(),
            variant: settings.ship_variant,
        };
        ship.recenter(playfield);
        ship
    }

    /// Move back to bottom center (held keys stay held)
    pub fn recenter(&mut self, playfield: &Rect) {
        self.pos = Vec2::new(
            playfield.center_x() - self.size.x / 2.0,
            playfield.bottom() - self.size.y,
        );
    }

    /// Apply held directions, then clamp inside the playfield
    pub fn update(&mut self, playfield: &Rect) {
        let delta = self.intent.axis() * self.speed;
        self.advance(delta);
        self.pos = playfield.clamp_pos(self.pos, self.size);
    }

    /// Point a new bullet leaves from (midtop)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

impl Body for Ship {
    fn kind(&self) -> EntityKind {
        EntityKind::Ship
    }

    fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn advance(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}

/// A projectile travelling straight up
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    /// Bullet whose midtop sits on the ship's midtop
    pub fn fired_from(id: u32, ship: &Ship, settings: &Settings) -> Self {
        let muzzle = ship.muzzle();
        Self {
            id,
            pos: Vec2::new(muzzle.x - settings.bullet_width / 2.0, muzzle.y),
            size: Vec2::new(settings.bullet_width, settings.bullet_height),
            speed: settings.bullet_speed,
        }
    }

    pub fn update(&mut self) {
        self.advance(Vec2::new(0.0, -self.speed));
    }

    /// Bottom edge has passed above the playfield top
    pub fn is_spent(&self) -> bool {
        self.rect().bottom() <= 0.0
    }
}

impl Body for Bullet {
    fn kind(&self) -> EntityKind {
        EntityKind::Bullet
    }

    fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn advance(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}

/// Ship skin picked before play; cosmetic only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShipVariant {
    #[default]
    Blue,
    Green,
    Orange,
    Red,
}

/// Cosmetic alien skin; no effect on collision or scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlienVariant {
    #[default]
    Green,
    Blue,
    Red,
    Yellow,
}

impl AlienVariant {
    pub const ALL: [AlienVariant; 4] = [
        AlienVariant::Green,
        AlienVariant::Blue,
        AlienVariant::Red,
        AlienVariant::Yellow,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A single invader. Direction and drop live on the fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct Alien {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub variant: AlienVariant,
}

impl Body for Alien {
    fn kind(&self) -> EntityKind {
        EntityKind::Alien
    }

    fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn advance(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Configuration this session was built from
    pub settings: Settings,
    /// Playfield bounds (origin at top-left)
    pub playfield: Rect,
    /// Seed for cosmetic randomness
    pub seed: u64,
    /// Cosmetic RNG (alien variants only)
    pub rng: Pcg32,
    /// Score (never decreases within a game)
    pub score: u64,
    /// Lives remaining
    pub lives: u32,
    /// Fleets destroyed this game
    pub fleets_cleared: u32,
    /// Simulated (unpaused) tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks left during which ship-alien contact is ignored
    pub grace_ticks: u32,
    pub ship: Ship,
    /// Bullets in flight
    pub bullets: Vec<Bullet>,
    pub fleet: Fleet,
    /// Session leaderboard
    pub high_scores: HighScores,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with a full fleet
    pub fn new(settings: Settings) -> Self {
        let playfield = Rect::new(0.0, 0.0, settings.playfield_width, settings.playfield_height);
        let seed = settings.seed;
        let mut state = Self {
            playfield,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: settings.starting_lives,
            fleets_cleared: 0,
            time_ticks: 0,
            phase: GamePhase::Active,
            grace_ticks: 0,
            ship: Ship::new(&settings, &playfield),
            bullets: Vec::new(),
            fleet: Fleet::new(settings.fleet_drop),
            high_scores: HighScores::new(),
            events: Vec::new(),
            next_id: 1,
            settings,
        };
        state.spawn_fleet();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the fleet with a freshly laid out one
    pub fn spawn_fleet(&mut self) {
        let size = Vec2::new(self.settings.alien_width, self.settings.alien_height);
        let layout = fleet_layout(
            self.playfield.size.x,
            self.playfield.size.y,
            size,
            self.settings.fleet_spacing,
        );
        let mut aliens = Vec::with_capacity(layout.positions.len());
        for pos in layout.positions {
            let id = self.next_entity_id();
            let variant = AlienVariant::random(&mut self.rng);
            aliens.push(Alien {
                id,
                pos,
                size,
                variant,
            });
        }
        log::debug!("Spawned fleet: {} columns x {} rows", layout.columns, layout.rows);
        self.fleet = Fleet::with_aliens(aliens, self.settings.fleet_drop);
    }

    /// Fire if under the in-flight limit. Returns false when the shot is dropped.
    pub fn fire_bullet(&mut self) -> bool {
        if self.bullets.len() >= self.settings.bullets_allowed {
            return false;
        }
        let id = self.next_entity_id();
        let bullet = Bullet::fired_from(id, &self.ship, &self.settings);
        self.bullets.push(bullet);
        true
    }

    /// Lose a round but keep playing: fresh fleet, no bullets, ship recentered
    pub fn reset_round(&mut self) {
        self.bullets.clear();
        self.spawn_fleet();
        self.ship.recenter(&self.playfield);
        self.grace_ticks = self.settings.grace_ticks;
    }

    /// Start a brand-new game. The leaderboard, RNG stream and held keys
    /// carry over.
    pub fn restart(&mut self) {
        let intent = self.ship.intent;
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.fleets_cleared = 0;
        self.grace_ticks = 0;
        self.phase = GamePhase::Active;
        self.ship = Ship::new(&self.settings, &self.playfield);
        self.ship.intent = intent;
        self.bullets = Vec::new();
        self.spawn_fleet();
    }

    /// Best score this process has seen, including the game in progress
    pub fn best_score(&self) -> u64 {
        self.high_scores.best().max(self.score)
    }
}
