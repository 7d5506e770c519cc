//! Projectiles
//!
//! Straight-line movers owned by whoever fired them. Wall resolution is
//! first-match in wall iteration order, not nearest-hit along the travel
//! path; replays depend on that tie-break, so keep it.

use glam::IVec2;

use super::{Rect, Wall};
use crate::consts::{BULLET_SIZE, BULLET_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Outcome of advancing a projectile one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Impact {
    /// The projectile hit a wall and must be reaped
    pub expired: bool,
    /// Index of a wall whose health just reached zero, for deferred removal
    pub destroyed_wall: Option<usize>,
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projectile {
    pub rect: Rect,
    /// Cardinal unit vector
    pub dir: IVec2,
}

impl Projectile {
    pub fn new(x: i32, y: i32, dir: IVec2) -> Self {
        Self {
            rect: Rect::new(x, y, BULLET_SIZE, BULLET_SIZE),
            dir,
        }
    }

    /// Move one frame (both axes at once — projectile motion is not
    /// axis-separated) and resolve against the first overlapping wall.
    pub fn advance(&mut self, walls: &mut [Wall]) -> Impact {
        self.rect.x += self.dir.x * BULLET_SPEED;
        self.rect.y += self.dir.y * BULLET_SPEED;

        for (i, wall) in walls.iter_mut().enumerate() {
            if !self.rect.overlaps(&wall.rect) {
                continue;
            }
            if wall.destructible && wall.take_damage() {
                log::debug!("wall at ({}, {}) destroyed", wall.rect.x, wall.rect.y);
                return Impact {
                    expired: true,
                    destroyed_wall: Some(i),
                };
            }
            return Impact {
                expired: true,
                destroyed_wall: None,
            };
        }

        Impact::default()
    }

    /// True when the rect lies entirely outside the screen on any side
    pub fn off_bounds(&self, screen_w: i32, screen_h: i32) -> bool {
        self.rect.right() < 0
            || self.rect.x > screen_w
            || self.rect.bottom() < 0
            || self.rect.y > screen_h
    }
}

/// Advance a bullet list in place: every bullet moves and resolves, expired
/// and off-screen bullets are reaped, and wall removals are applied after
/// the whole scan (highest index first, deduplicated) so indices collected
/// mid-scan stay valid. Returns the number of walls removed.
pub fn advance_bullets(bullets: &mut Vec<Projectile>, walls: &mut Vec<Wall>) -> u32 {
    let mut destroyed: Vec<usize> = Vec::new();

    bullets.retain_mut(|bullet| {
        let impact = bullet.advance(walls);
        if let Some(idx) = impact.destroyed_wall {
            if !destroyed.contains(&idx) {
                destroyed.push(idx);
            }
        }
        !impact.expired && !bullet.off_bounds(SCREEN_WIDTH, SCREEN_HEIGHT)
    });

    destroyed.sort_unstable_by(|a, b| b.cmp(a));
    let removed = destroyed.len() as u32;
    for idx in destroyed {
        // A stale index is a no-op, not an error
        if idx < walls.len() {
            walls.remove(idx);
        }
    }
    removed
}
