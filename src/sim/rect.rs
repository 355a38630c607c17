//! Axis-aligned rectangle geometry
//!
//! Screen space: origin at the top-left corner, x grows right, y grows down.
//! Every entity's bounding rectangle is derived from its position on demand,
//! so it can never go stale.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True if `other` lies fully inside this rectangle (edges inclusive)
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Part of this rectangle inside `bounds` (zero-sized if they are apart)
    pub fn clip(&self, bounds: &Rect) -> Rect {
        let min = self.pos.max(bounds.pos);
        let max = (self.pos + self.size).min(bounds.pos + bounds.size).max(min);
        Rect {
            pos: min,
            size: max - min,
        }
    }

    /// Top-left position that keeps a rectangle of `size` at `pos` inside `self`
    pub fn clamp_pos(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let max = (self.pos + self.size - size).max(self.pos);
        pos.clamp(self.pos, max)
    }
}

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Bullet,
    Alien,
}

/// Shared capability of everything that lives on the playfield
pub trait Body {
    fn kind(&self) -> EntityKind;

    /// Bounding rectangle at the current position
    fn rect(&self) -> Rect;

    /// Move by `delta`
    fn advance(&mut self, delta: Vec2);
}

/// Index of the first body in `bodies` overlapping `rect`
pub fn first_overlap<B: Body>(rect: &Rect, bodies: &[B]) -> Option<usize> {
    bodies.iter().position(|b| b.rect().overlaps(rect))
}
