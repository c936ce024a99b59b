//! Maze Chase - a tile-grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, motion, adversary AI, session state machine)
//! - `settings`: Tuning and driver configuration loaded from JSON
//! - `error`: Error types for precondition failures and configuration
//! - `ui`: Text frame rendering for the terminal driver

pub mod error;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{SettingsError, SimError};
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Size of one tile in sub-tile units
    pub const TILE_SIZE: i32 = 24;
    /// Maze width and height in tiles
    pub const GRID_SIZE: usize = 15;
    /// Playfield extent in sub-tile units
    pub const FIELD_SIZE: i32 = GRID_SIZE as i32 * TILE_SIZE;

    /// Default driver cadence (~25 FPS)
    pub const TICK_INTERVAL_MS: u64 = 40;

    /// Agent speed in sub-tile units per tick
    pub const AGENT_SPEED: i32 = 6;
    /// Agent spawn tile, kept free of walls and pickups
    pub const AGENT_SPAWN: IVec2 = IVec2::new(7, 11);
    /// Shared adversary spawn tile
    pub const ADVERSARY_SPAWN: IVec2 = IVec2::new(4, 4);

    /// Ticks between animation frames
    pub const ANIMATION_DELAY: u32 = 2;
    /// Number of agent animation frames
    pub const ANIMATION_FRAMES: u32 = 4;

    /// Adversaries active on level 1
    pub const BASE_ADVERSARIES: usize = 6;
    /// Size of the adversary pool
    pub const MAX_ADVERSARIES: usize = 12;

    pub const START_LIVES: u32 = 3;
    /// Score for one pickup
    pub const PICKUP_SCORE: u32 = 10;
    /// Level bonus is this times the new level number
    pub const LEVEL_BONUS: u32 = 100;

    /// Chance per tick that an adversary picks a random heading
    pub const WANDER_CHANCE: f64 = 0.10;
    /// Chance per tick that an adversary steers toward the agent
    pub const PURSUE_CHANCE: f64 = 0.30;
}

/// Tile containing a sub-tile position
#[inline]
pub fn tile_of(pos: IVec2) -> IVec2 {
    IVec2::new(
        pos.x.div_euclid(consts::TILE_SIZE),
        pos.y.div_euclid(consts::TILE_SIZE),
    )
}

/// Top-left sub-tile position of a tile
#[inline]
pub fn tile_origin(cell: IVec2) -> IVec2 {
    cell * consts::TILE_SIZE
}

/// Number of adversaries active on a level (levels start at 1)
#[inline]
pub fn active_adversaries_for_level(level: u32) -> usize {
    let extra = level.saturating_sub(1) as usize;
    (consts::BASE_ADVERSARIES + extra).min(consts::MAX_ADVERSARIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_of_truncates() {
        assert_eq!(tile_of(IVec2::new(0, 0)), IVec2::new(0, 0));
        assert_eq!(tile_of(IVec2::new(23, 47)), IVec2::new(0, 1));
        assert_eq!(tile_of(IVec2::new(168, 264)), IVec2::new(7, 11));
        assert_eq!(tile_of(IVec2::new(-1, 0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_active_adversary_scaling() {
        assert_eq!(active_adversaries_for_level(1), 6);
        assert_eq!(active_adversaries_for_level(2), 7);
        assert_eq!(active_adversaries_for_level(7), 12);
        assert_eq!(active_adversaries_for_level(8), 12);
        assert_eq!(active_adversaries_for_level(100), 12);
        for level in 1..50 {
            assert_eq!(
                active_adversaries_for_level(level),
                (6 + level as usize - 1).min(12)
            );
        }
    }
}
