//! Tank Blitz - a tile-grid tank arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `highscores`: Persisted top-10 score ledger
//! - `ui`: Render-sink port and frame presentation

pub mod highscores;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Playfield width in pixels
    pub const SCREEN_WIDTH: i32 = 800;
    /// Playfield height in pixels
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Wall tile edge length; level grids are laid out on this pitch
    pub const TILE_SIZE: i32 = 40;
    /// Tank edge length (player and enemy alike)
    pub const TANK_SIZE: i32 = 40;
    /// Projectile edge length
    pub const BULLET_SIZE: i32 = 5;

    /// Player movement, pixels per frame
    pub const PLAYER_SPEED: i32 = 5;
    /// Projectile movement, pixels per frame
    pub const BULLET_SPEED: i32 = 10;
    /// Level-0 enemy speed; scaled up 10% per level index
    pub const ENEMY_BASE_SPEED: f32 = 2.0;

    /// Fixed simulation rate
    pub const FPS: u32 = 60;

    pub const PLAYER_LIVES: i32 = 3;
    pub const POINTS_PER_ENEMY: u32 = 100;
    /// Frames between player shots
    pub const PLAYER_SHOOT_COOLDOWN: u32 = 20;
    /// Frames an enemy tolerates being blocked before re-rolling direction
    pub const ENEMY_STUCK_LIMIT: u32 = 30;
    /// Enemy shot cooldowns are re-rolled uniformly from this range (frames)
    pub const ENEMY_COOLDOWN_MIN: u32 = 60;
    pub const ENEMY_COOLDOWN_MAX: u32 = 120;
    /// Frames the victory banner stays up before auto-advancing (3 s)
    pub const LEVEL_TRANSITION_FRAMES: u32 = 180;

    /// Name-entry buffer cap; also the ledger's stored-name cap
    pub const MAX_NAME_LEN: usize = 20;
    /// Ledger name used when the player submits an empty one
    pub const DEFAULT_PLAYER_NAME: &str = "Player";

    /// Fixed boot seed for reproducible runs
    pub const DEFAULT_SEED: u64 = 42;
}
