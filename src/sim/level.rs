//! Level registry
//!
//! Hand-authored ASCII layouts on the 40 px tile grid: '1' is a solid wall,
//! '2' a cracked wall with 3 hit points, anything else open floor. Each
//! level also scales the enemy roster — one more tank and 10% more speed
//! per index.

use std::fmt;

use super::{Rect, Wall};
use crate::consts::{ENEMY_BASE_SPEED, TILE_SIZE};

/// Hit points given to every cracked ('2') tile
pub const CRACKED_WALL_HEALTH: i32 = 3;

/// The campaign, in play order. 20 x 15 tiles covers the 800x600 screen.
const LEVELS: [&[&str]; 3] = [
    &[
        "11111111111111111111",
        "10000000000000000001",
        "10002000020000002001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "11111111111111111111",
    ],
    &[
        "11111111111111111111",
        "10000000200000000001",
        "10001110001110001101",
        "10100000000000000101",
        "10000000200002000001",
        "10001110001110001101",
        "10100000000000000101",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "11111111111111111111",
    ],
    &[
        "11111111111111111111",
        "10022002200220022001",
        "10220022002200220021",
        "10022002200220022001",
        "10220022002200220021",
        "10022002200220022001",
        "10220022002200220021",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "10000000000000000001",
        "11111111111111111111",
    ],
];

/// Everything needed to populate a level
#[derive(Debug, Clone)]
pub struct LevelSpec {
    pub walls: Vec<Wall>,
    pub enemy_count: usize,
    pub enemy_speed: f32,
}

/// Errors from the level registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    OutOfRange { index: usize, count: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::OutOfRange { index, count } => {
                write!(f, "level index {index} out of range (campaign has {count} levels)")
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Number of levels in the campaign
pub fn level_count() -> usize {
    LEVELS.len()
}

/// Build the wall set and difficulty parameters for a level
pub fn load_level(index: usize) -> Result<LevelSpec, LevelError> {
    let Some(grid) = LEVELS.get(index) else {
        return Err(LevelError::OutOfRange {
            index,
            count: LEVELS.len(),
        });
    };

    let mut walls = Vec::new();
    for (row, line) in grid.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let rect = Rect::new(
                col as i32 * TILE_SIZE,
                row as i32 * TILE_SIZE,
                TILE_SIZE,
                TILE_SIZE,
            );
            match ch {
                '1' => walls.push(Wall::solid(rect)),
                '2' => walls.push(Wall::cracked(rect, CRACKED_WALL_HEALTH)),
                _ => {}
            }
        }
    }

    Ok(LevelSpec {
        walls,
        enemy_count: 3 + index,
        enemy_speed: ENEMY_BASE_SPEED * (1.0 + 0.1 * index as f32),
    })
}
