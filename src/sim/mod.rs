//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no timing
//! - Seeded RNG only
//! - Stable iteration order (by adversary index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod entity;
pub mod grid;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{MotionOutcome, can_move, resolve_motion};
pub use controller::AdversaryController;
pub use entity::{Adversary, Agent, Direction, Facing, Mover};
pub use grid::{Cell, Grid};
pub use snapshot::{AgentView, Snapshot};
pub use state::{Command, GameEvent, GameState, SessionPhase};
pub use tick::{TickInput, apply_command, tick};
