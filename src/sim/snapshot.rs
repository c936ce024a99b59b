//! Read-only view of a session for the presentation layer

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Direction, Facing};
use super::state::{GameState, SessionPhase};

/// What the presentation layer needs to draw the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentView {
    pub position: IVec2,
    pub direction: Direction,
    pub facing: Facing,
    pub animation_frame: u32,
}

/// Everything drawable after a tick. Dormant adversaries are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub paused: bool,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub time_ticks: u64,
    pub agent: AgentView,
    /// Positions of active adversaries, in index order
    pub adversaries: Vec<IVec2>,
    pub grid_size: usize,
    /// Row-major wall bitmap
    pub walls: Vec<bool>,
    /// Row-major pickup bitmap
    pub pickups: Vec<bool>,
}

impl Snapshot {
    pub(crate) fn capture(state: &GameState) -> Self {
        let agent = state.agent();
        let grid = state.grid();
        Self {
            phase: state.phase(),
            paused: state.is_paused(),
            score: state.score(),
            lives: state.lives(),
            level: state.level(),
            time_ticks: state.time_ticks(),
            agent: AgentView {
                position: agent.pos,
                direction: agent.dir,
                facing: agent.facing(),
                animation_frame: agent.animation_frame,
            },
            adversaries: state.active_adversaries().iter().map(|a| a.pos).collect(),
            grid_size: grid.size(),
            walls: grid.walls(),
            pickups: grid.pickups(),
        }
    }

    /// Bitmap lookup; out-of-range cells read as false
    pub fn is_wall(&self, cell: IVec2) -> bool {
        self.bit(&self.walls, cell)
    }

    pub fn has_pickup(&self, cell: IVec2) -> bool {
        self.bit(&self.pickups, cell)
    }

    fn bit(&self, bits: &[bool], cell: IVec2) -> bool {
        if cell.x < 0 || cell.y < 0 {
            return false;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        if x >= self.grid_size || y >= self.grid_size {
            return false;
        }
        bits.get(y * self.grid_size + x).copied().unwrap_or(false)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Command, GameState};
    use crate::tile_origin;

    #[test]
    fn test_snapshot_reports_only_active_adversaries() {
        let mut state = GameState::new(5);
        state.handle_command(Command::Start);
        let snap = state.snapshot();
        assert_eq!(snap.adversaries.len(), BASE_ADVERSARIES);
        assert_eq!(snap.phase, SessionPhase::Playing);
        assert_eq!(snap.lives, START_LIVES);
        assert_eq!(snap.agent.position, tile_origin(AGENT_SPAWN));
        assert_eq!(snap.agent.facing, Facing::Right);
    }

    #[test]
    fn test_bitmaps_match_grid() {
        let state = GameState::new(5);
        let snap = state.snapshot();
        assert_eq!(snap.grid_size, GRID_SIZE);
        assert_eq!(snap.walls.len(), GRID_SIZE * GRID_SIZE);
        assert!(snap.is_wall(IVec2::new(0, 0)));
        assert!(snap.is_wall(IVec2::new(3, 3)));
        assert!(snap.has_pickup(IVec2::new(1, 1)));
        assert!(!snap.has_pickup(AGENT_SPAWN));
        assert!(!snap.is_wall(IVec2::new(-1, 4)));
        assert!(!snap.has_pickup(IVec2::new(GRID_SIZE as i32, 4)));
    }

    #[test]
    fn test_json_export() {
        let state = GameState::new(5);
        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Menu");
        assert_eq!(value["level"], 1);
        assert_eq!(value["agent"]["facing"], "Right");
        assert_eq!(value["agent"]["position"], serde_json::json!([168, 264]));
    }
}
