//! Read-only per-tick view handed to renderers
//!
//! Built after the tick completes; renderers never see live entities.

use serde::{Deserialize, Serialize};

use super::rect::{Body, Rect};
use super::state::{AlienVariant, GameEvent, GamePhase, GameState, ShipVariant};

/// One alien as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlienView {
    pub id: u32,
    pub rect: Rect,
    pub variant: AlienVariant,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub lives: u32,
    pub fleets_cleared: u32,
    /// Post-collision immunity is running
    pub grace: bool,
    pub playfield: Rect,
    pub ship: Rect,
    pub ship_variant: ShipVariant,
    /// Bullet rectangles, clipped to the playfield
    pub bullets: Vec<Rect>,
    pub aliens: Vec<AlienView>,
    /// Events raised by the tick that produced this snapshot
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            score: state.score,
            best_score: state.best_score(),
            lives: state.lives,
            fleets_cleared: state.fleets_cleared,
            grace: state.grace_ticks > 0,
            playfield: state.playfield,
            ship: state.ship.rect(),
            ship_variant: state.ship.variant,
            // A bullet leaving the top edge stays in flight until its bottom passes 0
            bullets: state
                .bullets
                .iter()
                .map(|b| b.rect().clip(&state.playfield))
                .collect(),
            aliens: state
                .fleet
                .aliens
                .iter()
                .map(|a| AlienView {
                    id: a.id,
                    rect: a.rect(),
                    variant: a.variant,
                })
                .collect(),
            events: state.events.clone(),
        }
    }

    /// Every entity rectangle lies inside the playfield
    pub fn in_bounds(&self) -> bool {
        self.playfield.contains(&self.ship)
            && self.aliens.iter().all(|a| self.playfield.contains(&a.rect))
            && self.bullets.iter().all(|b| self.playfield.contains(b))
    }
}

impl GameState {
    /// Immutable view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
