//! The player tank
//!
//! Movement is axis-separated against the wall grid: the x displacement is
//! tested and applied first, then the y displacement independently, so the
//! tank slides along a wall when driving diagonally into it.

use glam::IVec2;

use super::projectile::advance_bullets;
use super::tick::TickInput;
use super::{Projectile, Rect, Wall};
use crate::consts::{
    BULLET_SIZE, PLAYER_LIVES, PLAYER_SHOOT_COOLDOWN, PLAYER_SPEED, TANK_SIZE,
};

/// The player-controlled tank
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub lives: i32,
    pub score: u32,
    pub bullets: Vec<Projectile>,
    pub shoot_cooldown: u32,
    /// Last movement direction held; bullets leave the tank this way
    pub facing: IVec2,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            rect: Rect::new(x, y, TANK_SIZE, TANK_SIZE),
            lives: PLAYER_LIVES,
            score: 0,
            bullets: Vec::new(),
            shoot_cooldown: 0,
            facing: IVec2::NEG_Y,
        }
    }

    /// Reposition for a level start. Score and lives carry over; bullets
    /// and cooldown do not.
    pub fn reset_for_level(&mut self, spawn: IVec2) {
        self.rect.x = spawn.x;
        self.rect.y = spawn.y;
        self.bullets.clear();
        self.shoot_cooldown = 0;
        self.facing = IVec2::NEG_Y;
    }

    /// Apply the held movement keys with axis-separated wall resolution.
    ///
    /// Per axis the later assignment wins (evaluation order: up, down,
    /// left, right), so holding opposite keys resolves to the last one
    /// checked. `facing` tracks the last direction assigned this call.
    pub fn handle_input(&mut self, input: &TickInput, walls: &[Wall]) {
        let mut dx = 0;
        let mut dy = 0;
        if input.up {
            dy = -PLAYER_SPEED;
            self.facing = IVec2::NEG_Y;
        }
        if input.down {
            dy = PLAYER_SPEED;
            self.facing = IVec2::Y;
        }
        if input.left {
            dx = -PLAYER_SPEED;
            self.facing = IVec2::NEG_X;
        }
        if input.right {
            dx = PLAYER_SPEED;
            self.facing = IVec2::X;
        }

        // X first; a blocked axis discards its whole displacement
        let moved = self.rect.translated(IVec2::new(dx, 0));
        if !walls.iter().any(|w| moved.overlaps(&w.rect)) {
            self.rect = moved;
        }
        let moved = self.rect.translated(IVec2::new(0, dy));
        if !walls.iter().any(|w| moved.overlaps(&w.rect)) {
            self.rect = moved;
        }
    }

    /// Fire along `facing` if off cooldown. The bullet spawns just outside
    /// the tank's bounding box, centered on the facing edge.
    pub fn shoot(&mut self) {
        if self.shoot_cooldown > 0 {
            return;
        }
        let c = self.rect.center();
        let (x, y) = match (self.facing.x, self.facing.y) {
            (0, -1) => (c.x - BULLET_SIZE / 2, self.rect.y - BULLET_SIZE),
            (0, 1) => (c.x - BULLET_SIZE / 2, self.rect.bottom()),
            (-1, 0) => (self.rect.x - BULLET_SIZE, c.y - BULLET_SIZE / 2),
            _ => (self.rect.right(), c.y - BULLET_SIZE / 2),
        };
        self.bullets.push(Projectile::new(x, y, self.facing));
        self.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;
        log::debug!("player fired from ({x}, {y})");
    }

    /// Per-frame upkeep: tick the cooldown down and advance owned bullets.
    /// Walls destroyed by those bullets are removed from the shared set —
    /// the one place the player mutates state it does not own.
    pub fn update(&mut self, walls: &mut Vec<Wall>) -> u32 {
        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        }
        advance_bullets(&mut self.bullets, walls)
    }
}
