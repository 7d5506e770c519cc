//! Enemy tanks
//!
//! Enemies wander in a cardinal direction until they have been blocked long
//! enough to give up and roll a new one, and periodically lob shots straight
//! down. All randomness flows through the RNG handle the orchestrator hands
//! in, so a fixed seed replays the whole campaign.

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::projectile::advance_bullets;
use super::{Projectile, Rect, Wall};
use crate::consts::{
    BULLET_SIZE, ENEMY_COOLDOWN_MAX, ENEMY_COOLDOWN_MIN, ENEMY_STUCK_LIMIT, SCREEN_HEIGHT,
    SCREEN_WIDTH, TANK_SIZE,
};

const CARDINALS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

/// A wandering enemy tank
#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    pub dir: IVec2,
    /// Pixels per frame; fractional speeds accumulate across frames
    pub speed: f32,
    pub bullets: Vec<Projectile>,
    stuck_frames: u32,
    shoot_cooldown: u32,
    /// Sub-pixel remainder carried between frames so fractional speeds
    /// are not truncated away
    move_accum: f32,
}

impl Enemy {
    pub fn new(x: i32, y: i32, speed: f32, rng: &mut impl Rng) -> Self {
        Self {
            rect: Rect::new(x, y, TANK_SIZE, TANK_SIZE),
            dir: CARDINALS.choose(rng).copied().unwrap_or(IVec2::Y),
            speed,
            bullets: Vec::new(),
            stuck_frames: 0,
            shoot_cooldown: rng.random_range(ENEMY_COOLDOWN_MIN..=ENEMY_COOLDOWN_MAX),
            move_accum: 0.0,
        }
    }

    /// One frame of wandering, firing and bullet upkeep. Returns the number
    /// of walls the enemy's bullets removed.
    pub fn update(&mut self, walls: &mut Vec<Wall>, rng: &mut impl Rng) -> u32 {
        // Whole-pixel step for this frame; the remainder carries over
        self.move_accum += self.speed;
        let step = self.move_accum as i32;
        self.move_accum -= step as f32;

        let moved = self.rect.translated(self.dir * step);
        if walls.iter().any(|w| moved.overlaps(&w.rect)) {
            self.stuck_frames += 1;
        } else {
            self.rect = moved;
            self.stuck_frames = 0;
        }

        if self.stuck_frames > ENEMY_STUCK_LIMIT {
            self.dir = CARDINALS.choose(rng).copied().unwrap_or(IVec2::Y);
            self.stuck_frames = 0;
            log::debug!(
                "enemy at ({}, {}) unstuck, new direction {:?}",
                self.rect.x,
                self.rect.y,
                self.dir
            );
        }

        self.rect = self.rect.clamped(SCREEN_WIDTH, SCREEN_HEIGHT);

        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        } else {
            let c = self.rect.center();
            self.bullets.push(Projectile::new(
                c.x - BULLET_SIZE / 2,
                c.y - BULLET_SIZE / 2,
                IVec2::Y,
            ));
            self.shoot_cooldown = rng.random_range(ENEMY_COOLDOWN_MIN..=ENEMY_COOLDOWN_MAX);
        }

        advance_bullets(&mut self.bullets, walls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_initial_cooldown_in_range() {
        let mut rng = rng();
        for _ in 0..50 {
            let enemy = Enemy::new(100, 100, 2.0, &mut rng);
            assert!((ENEMY_COOLDOWN_MIN..=ENEMY_COOLDOWN_MAX).contains(&enemy.shoot_cooldown));
        }
    }

    #[test]
    fn test_moves_along_direction() {
        let mut rng = rng();
        let mut enemy = Enemy::new(400, 300, 2.0, &mut rng);
        enemy.dir = IVec2::X;
        let mut walls = Vec::new();
        enemy.update(&mut walls, &mut rng);
        assert_eq!(enemy.rect.x, 402);
        assert_eq!(enemy.rect.y, 300);
    }

    #[test]
    fn test_fractional_speed_accumulates() {
        let mut rng = rng();
        let mut enemy = Enemy::new(400, 300, 2.2, &mut rng);
        enemy.dir = IVec2::X;
        let mut walls = Vec::new();
        for _ in 0..10 {
            enemy.update(&mut walls, &mut rng);
        }
        // 10 frames at 2.2 px must cover the full 22 px, not 10 * trunc(2.2)
        assert_eq!(enemy.rect.x, 422);
    }

    #[test]
    fn test_blocked_move_is_undone_and_unsticks_eventually() {
        let mut rng = rng();
        // Box the enemy in on all four sides, edges touching
        let walls = vec![
            Wall::solid(Rect::new(60, 100, 40, 40)),
            Wall::solid(Rect::new(140, 100, 40, 40)),
            Wall::solid(Rect::new(100, 60, 40, 40)),
            Wall::solid(Rect::new(100, 140, 40, 40)),
        ];
        let mut enemy = Enemy::new(100, 100, 2.0, &mut rng);
        let mut walls = walls;
        for _ in 0..(ENEMY_STUCK_LIMIT * 3) {
            enemy.update(&mut walls, &mut rng);
            assert_eq!((enemy.rect.x, enemy.rect.y), (100, 100));
            assert!(!walls.iter().any(|w| enemy.rect.overlaps(&w.rect)));
        }
        // Direction was re-rolled at least once along the way
        assert!(enemy.stuck_frames <= ENEMY_STUCK_LIMIT);
    }

    #[test]
    fn test_clamped_to_screen() {
        let mut rng = rng();
        let mut enemy = Enemy::new(SCREEN_WIDTH - TANK_SIZE, 300, 5.0, &mut rng);
        enemy.dir = IVec2::X;
        let mut walls = Vec::new();
        for _ in 0..20 {
            enemy.update(&mut walls, &mut rng);
        }
        assert_eq!(enemy.rect.x, SCREEN_WIDTH - TANK_SIZE);
    }

    #[test]
    fn test_fires_downward_when_cooldown_expires() {
        let mut rng = rng();
        let mut enemy = Enemy::new(400, 100, 0.0, &mut rng);
        let mut walls = Vec::new();
        let mut fired = false;
        for _ in 0..=(ENEMY_COOLDOWN_MAX + 1) {
            enemy.update(&mut walls, &mut rng);
            if !enemy.bullets.is_empty() {
                fired = true;
                assert_eq!(enemy.bullets[0].dir, IVec2::Y);
                break;
            }
        }
        assert!(fired);
    }
}
