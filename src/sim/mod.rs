//! Deterministic simulation module
//!
//! All gameplay logic lives here and must stay deterministic:
//! - Fixed 60 Hz timestep only
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order with deferred removal
//! - No rendering or platform dependencies

pub mod enemy;
pub mod level;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wall;

pub use enemy::Enemy;
pub use level::{LevelError, LevelSpec, level_count, load_level};
pub use player::Player;
pub use projectile::{Impact, Projectile};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use wall::Wall;
