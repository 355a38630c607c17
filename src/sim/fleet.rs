//! Fleet manager
//!
//! The fleet moves as one body: every alien shares a horizontal direction,
//! and an edge contact reverses it and drops the whole formation at once.

use glam::Vec2;

use super::rect::{Body, Rect};
use super::state::Alien;

/// Grid computed for a playfield
#[derive(Debug, Clone, PartialEq)]
pub struct FleetLayout {
    pub columns: usize,
    pub rows: usize,
    /// Top-left corners, row-major
    pub positions: Vec<Vec2>,
}

/// Lay out a full fleet grid.
///
/// One alien of margin on each side horizontally, two alien heights of
/// headroom at the top and bottom. The grid pitch is `spacing` alien sizes.
/// Always at least one row and one column. Deterministic: no randomness
/// touches positions.
pub fn fleet_layout(width: f32, height: f32, alien_size: Vec2, spacing: f32) -> FleetLayout {
    let pitch = alien_size * spacing;
    let available_x = width - 2.0 * alien_size.x;
    let available_y = height - 4.0 * alien_size.y;

    // Negative space saturates to 0 on the cast
    let columns = ((available_x / pitch.x).floor() as usize).max(1);
    let rows = ((available_y / pitch.y).floor() as usize).max(1);

    let mut positions = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            positions.push(Vec2::new(
                alien_size.x + pitch.x * col as f32,
                alien_size.y + pitch.y * row as f32,
            ));
        }
    }

    FleetLayout {
        columns,
        rows,
        positions,
    }
}

/// The live aliens plus the motion state they share
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    /// Live aliens; order carries no meaning
    pub aliens: Vec<Alien>,
    /// +1.0 moving right, -1.0 moving left
    pub direction: f32,
    /// Vertical distance added on each edge contact
    pub drop: f32,
}

impl Fleet {
    /// Empty fleet heading right
    pub fn new(drop: f32) -> Self {
        Self::with_aliens(Vec::new(), drop)
    }

    pub fn with_aliens(aliens: Vec<Alien>, drop: f32) -> Self {
        Self {
            aliens,
            // Always starts heading right; a respawned fleet does not inherit
            // the direction the previous fleet was moving in
            direction: 1.0,
            drop,
        }
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    /// True if any alien touches or crosses the left or right boundary
    pub fn check_edges(&self, playfield: &Rect) -> bool {
        self.aliens.iter().any(|alien| {
            let rect = alien.rect();
            rect.left() <= playfield.left() || rect.right() >= playfield.right()
        })
    }

    /// Flip direction and drop every alien by the same amount.
    ///
    /// The drop is shortened if needed so no alien extends below the
    /// playfield bottom.
    pub fn reverse_and_drop(&mut self, playfield: &Rect) {
        self.direction = -self.direction;

        let lowest = self
            .aliens
            .iter()
            .map(|a| a.rect().bottom())
            .fold(f32::NEG_INFINITY, f32::max);
        let drop = self.drop.min(playfield.bottom() - lowest).max(0.0);

        for alien in &mut self.aliens {
            alien.advance(Vec2::new(0.0, drop));
        }
    }

    /// Shift the formation horizontally by `speed` in the current direction.
    ///
    /// The step is cut short so the leading alien stops exactly on the
    /// boundary; the next edge check then turns the fleet around.
    pub fn advance(&mut self, speed: f32, playfield: &Rect) {
        if self.aliens.is_empty() {
            return;
        }

        let step = if self.direction > 0.0 {
            let rightmost = self
                .aliens
                .iter()
                .map(|a| a.rect().right())
                .fold(f32::NEG_INFINITY, f32::max);
            speed.min(playfield.right() - rightmost).max(0.0)
        } else {
            let leftmost = self
                .aliens
                .iter()
                .map(|a| a.rect().left())
                .fold(f32::INFINITY, f32::min);
            -(speed.min(leftmost - playfield.left()).max(0.0))
        };

        for alien in &mut self.aliens {
            alien.advance(Vec2::new(step, 0.0));
        }
    }

    /// One tick of fleet motion: edge check, possible reverse + drop, advance
    pub fn update(&mut self, speed: f32, playfield: &Rect) {
        if self.check_edges(playfield) {
            self.reverse_and_drop(playfield);
        }
        self.advance(speed, playfield);
    }

    /// True if any alien has reached the playfield bottom
    pub fn reached_bottom(&self, playfield: &Rect) -> bool {
        self.aliens
            .iter()
            .any(|a| a.rect().bottom() >= playfield.bottom())
    }
}
