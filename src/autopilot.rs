//! Autopilot input source
//!
//! Plays the game from snapshots alone: slides under the lowest alien,
//! fires when lined up, and restarts after game over. Deterministic, so a
//! headless run with a fixed seed always plays out the same way.

use crate::driver::{Command, Direction, InputSource};
use crate::sim::{GamePhase, Snapshot};

/// Horizontal slack before the autopilot bothers to move
const DEADZONE: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Frames between shots
    pub fire_every: u64,
    /// Send Restart when the game ends
    pub auto_restart: bool,
    frame: u64,
    holding_left: bool,
    holding_right: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_every: 8,
            auto_restart: true,
            frame: 0,
            holding_left: false,
            holding_right: false,
        }
    }
}

impl Autopilot {
    pub fn new(fire_every: u64, auto_restart: bool) -> Self {
        Self {
            fire_every: fire_every.max(1),
            auto_restart,
            ..Default::default()
        }
    }

    /// Horizontal center of the alien to chase: the lowest one, nearest
    /// the ship on ties
    fn target_x(snapshot: &Snapshot) -> Option<f32> {
        let ship_x = snapshot.ship.center_x();
        snapshot
            .aliens
            .iter()
            .min_by(|a, b| {
                let key_a = (-a.rect.bottom(), (a.rect.center_x() - ship_x).abs());
                let key_b = (-b.rect.bottom(), (b.rect.center_x() - ship_x).abs());
                key_a
                    .partial_cmp(&key_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|a| a.rect.center_x())
    }

    fn set_held(&mut self, left: bool, right: bool, commands: &mut Vec<Command>) {
        if left != self.holding_left {
            self.holding_left = left;
            commands.push(Command::Move {
                direction: Direction::Left,
                pressed: left,
            });
        }
        if right != self.holding_right {
            self.holding_right = right;
            commands.push(Command::Move {
                direction: Direction::Right,
                pressed: right,
            });
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, last: &Snapshot) -> Vec<Command> {
        self.frame += 1;
        let mut commands = Vec::new();

        match last.phase {
            GamePhase::Paused => return commands,
            GamePhase::GameOver => {
                self.set_held(false, false, &mut commands);
                if self.auto_restart {
                    commands.push(Command::Restart);
                }
                return commands;
            }
            GamePhase::Active => {}
        }

        let Some(target) = Self::target_x(last) else {
            self.set_held(false, false, &mut commands);
            return commands;
        };

        let dx = target - last.ship.center_x();
        self.set_held(dx < -DEADZONE, dx > DEADZONE, &mut commands);

        let lined_up = dx.abs() <= last.ship.size.x / 2.0;
        if lined_up && self.frame % self.fire_every == 0 {
            commands.push(Command::Fire);
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{FrameDriver, ManualClock, Renderer};
    use crate::settings::Settings;
    use crate::sim::GameState;

    struct Limit<I> {
        inner: I,
        remaining: u64,
    }

    impl<I: InputSource> InputSource for Limit<I> {
        fn poll(&mut self, last: &Snapshot) -> Vec<Command> {
            if self.remaining == 0 {
                return vec![Command::Quit];
            }
            self.remaining -= 1;
            self.inner.poll(last)
        }
    }

    struct Discard;

    impl Renderer for Discard {
        fn render(&mut self, _snapshot: &Snapshot) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn snapshot() -> Snapshot {
        GameState::new(Settings::default()).snapshot()
    }

    #[test]
    fn test_moves_toward_target() {
        let mut pilot = Autopilot::default();
        let mut snap = snapshot();
        // Ship far right of every alien
        snap.ship.pos.x = snap.playfield.size.x - snap.ship.size.x;
        let commands = pilot.poll(&snap);
        assert!(commands.contains(&Command::Move {
            direction: Direction::Left,
            pressed: true
        }));

        // Holding already: no repeated press
        let commands = pilot.poll(&snap);
        assert!(!commands.iter().any(|c| matches!(c, Command::Move { .. })));
    }

    #[test]
    fn test_restarts_after_game_over() {
        let mut pilot = Autopilot::default();
        let mut snap = snapshot();
        snap.phase = GamePhase::GameOver;
        assert_eq!(pilot.poll(&snap), vec![Command::Restart]);

        let mut quiet = Autopilot::new(8, false);
        assert!(quiet.poll(&snap).is_empty());
    }

    #[test]
    fn test_idle_while_paused() {
        let mut pilot = Autopilot::default();
        let mut snap = snapshot();
        snap.phase = GamePhase::Paused;
        for _ in 0..20 {
            assert!(pilot.poll(&snap).is_empty());
        }
    }

    #[test]
    fn test_autopilot_scores() {
        let settings = Settings {
            seed: 3,
            ..Default::default()
        };
        let input = Limit {
            inner: Autopilot::default(),
            remaining: 3000,
        };
        let summary = FrameDriver::new(GameState::new(settings), input, Discard, ManualClock::default())
            .run()
            .expect("run");
        assert_eq!(summary.frames, 3000);
        assert!(summary.final_snapshot.best_score > 0);
    }

    #[test]
    fn test_autopilot_is_deterministic() {
        let run = || {
            let input = Limit {
                inner: Autopilot::default(),
                remaining: 1500,
            };
            FrameDriver::new(
                GameState::new(Settings::default()),
                input,
                Discard,
                ManualClock::default(),
            )
            .run()
            .expect("run")
            .final_snapshot
        };
        assert_eq!(run(), run());
    }
}
