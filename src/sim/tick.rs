//! Fixed timestep simulation tick
//!
//! Advances the session by one tick and applies lifecycle transitions.

use serde::{Deserialize, Serialize};

use super::collision::{resolve_bullet_hits, ship_collides};
use super::state::{GameEvent, GamePhase, GameState};

/// Movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A discrete input event from the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Movement key pressed (`true`) or released (`false`)
    Move { direction: Direction, pressed: bool },
    Fire,
    /// Toggle between Active and Paused
    Pause,
    /// Start over after game over
    Restart,
    Quit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement key changes, in arrival order
    pub moves: Vec<(Direction, bool)>,
    /// Fire presses this tick
    pub fire: u32,
    /// Pause toggle (an even number of presses cancels out)
    pub pause: bool,
    pub restart: bool,
    pub quit: bool,
}

impl TickInput {
    /// Fold a drained command batch into one tick's input
    pub fn from_commands(commands: &[Command]) -> Self {
        let mut input = Self::default();
        for command in commands {
            match *command {
                Command::Move { direction, pressed } => input.moves.push((direction, pressed)),
                Command::Fire => input.fire += 1,
                Command::Pause => input.pause = !input.pause,
                Command::Restart => input.restart = true,
                Command::Quit => input.quit = true,
            }
        }
        input
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Key state is tracked in every phase so a release during a pause is not lost
    for &(direction, pressed) in &input.moves {
        let intent = &mut state.ship.intent;
        match direction {
            Direction::Left => intent.left = pressed,
            Direction::Right => intent.right = pressed,
            Direction::Up => intent.up = pressed,
            Direction::Down => intent.down = pressed,
        }
    }

    if input.restart && state.phase == GamePhase::GameOver {
        log::info!("Restarting game (previous score {})", state.score);
        state.restart();
        state.events.push(GameEvent::Restarted);
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Active => {
                log::debug!("Paused at tick {}", state.time_ticks);
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                log::debug!("Resumed at tick {}", state.time_ticks);
                state.phase = GamePhase::Active;
                state.events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Active {
        return;
    }

    state.time_ticks += 1;
    let in_grace = state.grace_ticks > 0;

    // Fire from where the ship is before it moves this tick
    for _ in 0..input.fire {
        if in_grace || !state.fire_bullet() {
            log::debug!("Fire dropped ({} bullets in flight)", state.bullets.len());
        }
    }

    if !in_grace {
        state.ship.update(&state.playfield);
    }

    for bullet in &mut state.bullets {
        bullet.update();
    }
    state.bullets.retain(|b| !b.is_spent());

    state.fleet.update(state.settings.alien_speed, &state.playfield);

    let hits = resolve_bullet_hits(&mut state.bullets, &mut state.fleet.aliens);
    if !hits.is_empty() {
        state.score += state.settings.points_per_alien * hits.len() as u64;
        state.events.extend(hits.iter().map(|hit| GameEvent::AlienDestroyed {
            alien_id: hit.alien_id,
            bullet_id: hit.bullet_id,
        }));
    }

    if state.fleet.is_empty() {
        state.fleets_cleared += 1;
        log::info!(
            "Fleet {} destroyed at tick {}, score {}",
            state.fleets_cleared,
            state.time_ticks,
            state.score
        );
        state.spawn_fleet();
        state.events.push(GameEvent::FleetRespawned {
            fleets_cleared: state.fleets_cleared,
        });
    }

    if in_grace {
        state.grace_ticks -= 1;
    } else if ship_collides(&state.ship, &state.fleet.aliens)
        || state.fleet.reached_bottom(&state.playfield)
    {
        ship_hit(state);
    }
}

/// Lose one life, then either reset the round or end the game
fn ship_hit(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        log::info!(
            "Game over at tick {}: score {}, fleets cleared {}",
            state.time_ticks,
            state.score,
            state.fleets_cleared
        );
        state.phase = GamePhase::GameOver;
        if let Some(rank) =
            state
                .high_scores
                .add_score(state.score, state.fleets_cleared, state.time_ticks)
        {
            log::info!("New session high score #{}: {}", rank, state.score);
        }
        state.events.push(GameEvent::GameOver { score: state.score });
    } else {
        log::info!("Ship hit, {} lives left", state.lives);
        state.reset_round();
        state.events.push(GameEvent::ShipHit {
            lives_left: state.lives,
        });
    }
}
