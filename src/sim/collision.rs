//! Collision detection and resolution
//!
//! Plain rectangle overlap. Bullet-alien pairs are resolved before the
//! ship-alien check so a kill on the same tick still scores.

use super::rect::{Body, first_overlap};
use super::state::{Alien, Bullet, Ship};

/// One bullet-alien kill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub bullet_id: u32,
    pub alien_id: u32,
}

/// Pair bullets with the aliens they overlap and remove both.
///
/// Each bullet takes the first live alien it overlaps; an alien can be
/// claimed by only one bullet. Removal happens after pairing so the
/// collections are never mutated mid-scan.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, aliens: &mut Vec<Alien>) -> Vec<Hit> {
    let mut spent_bullets = vec![false; bullets.len()];
    let mut dead_aliens = vec![false; aliens.len()];
    let mut hits = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let rect = bullet.rect();
        let target = aliens
            .iter()
            .enumerate()
            .find(|(ai, alien)| !dead_aliens[*ai] && alien.rect().overlaps(&rect))
            .map(|(ai, _)| ai);

        if let Some(ai) = target {
            spent_bullets[bi] = true;
            dead_aliens[ai] = true;
            hits.push(Hit {
                bullet_id: bullet.id,
                alien_id: aliens[ai].id,
            });
        }
    }

    if hits.is_empty() {
        return hits;
    }

    let mut spent = spent_bullets.into_iter();
    bullets.retain(|_| !spent.next().unwrap_or(false));
    let mut dead = dead_aliens.into_iter();
    aliens.retain(|_| !dead.next().unwrap_or(false));

    hits
}

/// True if the ship overlaps any live alien
pub fn ship_collides(ship: &Ship, aliens: &[Alien]) -> bool {
    first_overlap(&ship.rect(), aliens).is_some()
}
