//! Game state and campaign progression
//!
//! All entity ownership lives here: the walls, the player, the enemy
//! roster and the current level index. Per-frame phase logic is in `tick`;
//! this module provides the explicit reset paths (`start_level`,
//! `advance_level`, `full_restart`) so a restart never relies on
//! re-running construction.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::{self, LevelSpec};
use super::{Enemy, Player, Rect, Wall};
use crate::consts::{
    PLAYER_LIVES, SCREEN_HEIGHT, SCREEN_WIDTH, TANK_SIZE, TILE_SIZE,
};

/// Where the enemy row starts and how it is spaced at level load
const ENEMY_ROW_X: i32 = 100;
const ENEMY_ROW_Y: i32 = 100;
const ENEMY_SPACING: i32 = 60;
/// Downward nudges tried when an enemy spawn lands inside a wall
const ENEMY_SPAWN_ATTEMPTS: u32 = 10;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Normal gameplay
    Running,
    /// Frozen by the pause toggle
    Paused,
    /// Level cleared; waiting out the banner or a confirm press
    Victory,
    /// Out of lives; capturing a name for the ledger
    EnterName,
    /// Read-only ledger display; any key starts the campaign over
    ShowHighScores,
    /// Every level cleared. Terminal.
    CampaignComplete,
}

/// Things the outside world reacts to (logging, the score ledger)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted { index: usize },
    LevelCleared { index: usize },
    EnemyDestroyed { score: u32 },
    PlayerHit { lives_left: i32 },
    /// Player confirmed a name for the ledger; the frontend persists it
    SubmitScore { name: String, score: u32 },
    CampaignComplete { score: u32 },
}

/// Complete simulation state
pub struct GameState {
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub level_index: usize,
    pub walls: Vec<Wall>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Frames spent on the victory banner
    pub transition_frames: u32,
    /// Name-entry buffer, capped at `MAX_NAME_LEN`
    pub name_buffer: String,
    /// Total simulated frames
    pub frame: u64,
}

impl GameState {
    /// Fresh campaign from the given seed, starting at level 0
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            level_index: 0,
            walls: Vec::new(),
            player: Player::new(0, 0),
            enemies: Vec::new(),
            transition_frames: 0,
            name_buffer: String::new(),
            frame: 0,
        };
        state.start_level(0);
        state
    }

    /// Load a level's walls, rebuild the enemy roster and reposition the
    /// player at a collision-free spawn. Score and lives carry over.
    ///
    /// Callers check `level_count` before advancing; an out-of-range index
    /// here is a bug upstream and leaves the state untouched.
    pub fn start_level(&mut self, index: usize) {
        let spec = match level::load_level(index) {
            Ok(spec) => spec,
            Err(err) => {
                log::error!("refusing level change: {err}");
                return;
            }
        };
        self.apply_level(index, spec);
    }

    fn apply_level(&mut self, index: usize, spec: LevelSpec) {
        self.level_index = index;
        self.walls = spec.walls;

        let spawn = find_spawn(&self.walls);
        self.player.reset_for_level(spawn);

        self.enemies.clear();
        for i in 0..spec.enemy_count {
            let x = ENEMY_ROW_X + i as i32 * ENEMY_SPACING;
            let mut y = ENEMY_ROW_Y;
            let mut attempts = 0;
            while attempts < ENEMY_SPAWN_ATTEMPTS
                && self
                    .walls
                    .iter()
                    .any(|w| Rect::new(x, y, TANK_SIZE, TANK_SIZE).overlaps(&w.rect))
            {
                y += TILE_SIZE;
                attempts += 1;
            }
            self.enemies
                .push(Enemy::new(x, y, spec.enemy_speed, &mut self.rng));
        }

        self.transition_frames = 0;
        self.phase = GamePhase::Running;
        log::info!(
            "level {} started: {} enemies at speed {:.1}",
            index + 1,
            self.enemies.len(),
            spec.enemy_speed
        );
    }

    /// Move to the next level, or finish the campaign if none remain
    pub fn advance_level(&mut self) -> GameEvent {
        let next = self.level_index + 1;
        if next >= level::level_count() {
            self.phase = GamePhase::CampaignComplete;
            log::info!("campaign complete, final score {}", self.player.score);
            GameEvent::CampaignComplete {
                score: self.player.score,
            }
        } else {
            self.start_level(next);
            GameEvent::LevelStarted { index: next }
        }
    }

    /// Restart the current level in place. A dead player gets a fresh life
    /// count (post-death retry); otherwise score and lives carry over.
    pub fn restart_level(&mut self) {
        if self.player.lives <= 0 {
            self.player.lives = PLAYER_LIVES;
        }
        self.name_buffer.clear();
        self.start_level(self.level_index);
    }

    /// Restart the whole campaign: level 0, fresh score and lives
    pub fn full_restart(&mut self) {
        self.player.score = 0;
        self.player.lives = PLAYER_LIVES;
        self.name_buffer.clear();
        self.start_level(0);
    }
}

/// Find a wall-free player spawn near the bottom-center of the screen.
///
/// Starts at the preferred point and, if occupied, walks an outward grid of
/// tile-sized offsets (straight up, then up-right, then up-left), clamped
/// to the screen, taking the first position that overlaps nothing.
fn find_spawn(walls: &[Wall]) -> IVec2 {
    let preferred = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT - 100);
    let collides = |pos: IVec2| {
        let rect = Rect::new(pos.x, pos.y, TANK_SIZE, TANK_SIZE);
        walls.iter().any(|w| rect.overlaps(&w.rect))
    };

    if !collides(preferred) {
        return preferred;
    }

    let max = IVec2::new(SCREEN_WIDTH - TANK_SIZE, SCREEN_HEIGHT - TANK_SIZE);
    for dy in (0..SCREEN_HEIGHT).step_by(TILE_SIZE as usize) {
        for dx in (0..SCREEN_WIDTH).step_by(TILE_SIZE as usize) {
            for offset in [
                IVec2::new(0, -dy),
                IVec2::new(dx, -dy),
                IVec2::new(-dx, -dy),
            ] {
                let pos = (preferred + offset).clamp(IVec2::ZERO, max);
                if !collides(pos) {
                    return pos;
                }
            }
        }
    }
    preferred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_SEED;

    #[test]
    fn test_new_game_boots_level_zero() {
        let state = GameState::new(DEFAULT_SEED);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.player.lives, PLAYER_LIVES);
        assert_eq!(state.player.score, 0);
        assert!(!state.walls.is_empty());
    }

    #[test]
    fn test_nothing_spawns_inside_walls() {
        let state = GameState::new(DEFAULT_SEED);
        assert!(
            !state
                .walls
                .iter()
                .any(|w| state.player.rect.overlaps(&w.rect))
        );
        for enemy in &state.enemies {
            assert!(!state.walls.iter().any(|w| enemy.rect.overlaps(&w.rect)));
        }
    }

    #[test]
    fn test_start_level_preserves_score_and_lives() {
        let mut state = GameState::new(DEFAULT_SEED);
        state.player.score = 700;
        state.player.lives = 2;
        state.start_level(1);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.player.score, 700);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.enemies.len(), 4);
        assert!(state.player.bullets.is_empty());
    }

    #[test]
    fn test_start_level_rejects_bad_index() {
        let mut state = GameState::new(DEFAULT_SEED);
        state.start_level(99);
        assert_eq!(state.level_index, 0);
    }

    #[test]
    fn test_advance_past_last_level_completes_campaign() {
        let mut state = GameState::new(DEFAULT_SEED);
        state.start_level(crate::sim::level_count() - 1);
        state.player.score = 1200;
        let event = state.advance_level();
        assert_eq!(state.phase, GamePhase::CampaignComplete);
        assert_eq!(event, GameEvent::CampaignComplete { score: 1200 });
    }

    #[test]
    fn test_restart_after_death_refills_lives() {
        let mut state = GameState::new(DEFAULT_SEED);
        state.player.lives = 0;
        state.player.score = 300;
        state.restart_level();
        assert_eq!(state.player.lives, PLAYER_LIVES);
        assert_eq!(state.player.score, 300);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_full_restart_resets_everything() {
        let mut state = GameState::new(DEFAULT_SEED);
        state.start_level(1);
        state.player.score = 900;
        state.player.lives = 1;
        state.full_restart();
        assert_eq!(state.level_index, 0);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.lives, PLAYER_LIVES);
    }

    #[test]
    fn test_spawn_search_relocates_off_occupied_tile() {
        // Occupy the preferred spawn tile exactly
        let preferred = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT - 100);
        let walls = vec![Wall::solid(Rect::new(
            preferred.x,
            preferred.y,
            TILE_SIZE,
            TILE_SIZE,
        ))];
        let spawn = find_spawn(&walls);
        assert_ne!(spawn, preferred);
        let rect = Rect::new(spawn.x, spawn.y, TANK_SIZE, TANK_SIZE);
        assert!(!walls.iter().any(|w| rect.overlaps(&w.rect)));
    }

    #[test]
    fn test_spawn_search_prefers_unoccupied_start() {
        let spawn = find_spawn(&[]);
        assert_eq!(spawn, IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT - 100));
    }
}
