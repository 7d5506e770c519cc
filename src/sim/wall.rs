//! Wall blocks
//!
//! Static grid-aligned obstacles. Indestructible walls shrug off any number
//! of hits; destructible ("cracked") walls carry a hit-point counter and are
//! removed from the level by whoever lands the final hit.

use super::Rect;

/// A static wall block, optionally destructible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    pub rect: Rect,
    pub destructible: bool,
    pub health: i32,
}

impl Wall {
    /// An indestructible block
    pub fn solid(rect: Rect) -> Self {
        Self {
            rect,
            destructible: false,
            health: 1,
        }
    }

    /// A destructible block with the given hit points
    pub fn cracked(rect: Rect, health: i32) -> Self {
        Self {
            rect,
            destructible: true,
            health,
        }
    }

    /// Apply one point of damage.
    ///
    /// Returns true when the wall is spent and must be removed by the
    /// caller; walls never remove themselves. Indestructible walls ignore
    /// damage entirely.
    pub fn take_damage(&mut self) -> bool {
        if !self.destructible {
            return false;
        }
        self.health -= 1;
        self.health <= 0
    }
}
