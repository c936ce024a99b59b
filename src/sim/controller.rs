//! Adversary steering
//!
//! Deliberately weak: a random wander plus a greedy lean toward the agent, no
//! search. Each adversary is evaluated on its own every tick with no memory
//! beyond its current heading.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{can_move, clamp_to_field};
use super::entity::{Adversary, Direction, Mover};
use super::grid::Grid;
use crate::consts::{PURSUE_CHANCE, WANDER_CHANCE};
use crate::error::SimError;

/// Per-tick adversary policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdversaryController {
    /// Chance of picking a random heading
    pub wander_chance: f64,
    /// Chance of leaning toward the agent
    pub pursue_chance: f64,
}

impl Default for AdversaryController {
    fn default() -> Self {
        Self {
            wander_chance: WANDER_CHANCE,
            pursue_chance: PURSUE_CHANCE,
        }
    }
}

impl AdversaryController {
    pub fn new(wander_chance: f64, pursue_chance: f64) -> Result<Self, SimError> {
        let controller = Self {
            wander_chance,
            pursue_chance,
        };
        controller.validate()?;
        Ok(controller)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in [
            ("wander_chance", self.wander_chance),
            ("pursue_chance", self.pursue_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }

    /// Choose this tick's heading. Does not move the adversary.
    pub fn steer<R: Rng + ?Sized>(
        &self,
        adversary: &Adversary,
        agent_pos: IVec2,
        grid: &Grid,
        rng: &mut R,
    ) -> Direction {
        let mut dir = adversary.dir;

        // Wander replaces the heading without a legality check; motion
        // resolution refuses illegal steps later.
        if rng.random_bool(self.wander_chance) {
            dir = random_heading(rng);
        }

        if rng.random_bool(self.pursue_chance) {
            let candidate = Direction::toward(adversary.pos, agent_pos);
            if can_move(grid, adversary.pos, candidate, adversary.speed) {
                dir = candidate;
            }
        }

        dir
    }

    /// Steer, move, then clamp to the playfield
    pub fn advance<R: Rng + ?Sized>(
        &self,
        adversary: &mut Adversary,
        agent_pos: IVec2,
        grid: &Grid,
        rng: &mut R,
    ) -> bool {
        adversary.dir = self.steer(adversary, agent_pos, grid, rng);
        let moved = adversary.step(grid, None);
        adversary.pos = clamp_to_field(adversary.pos);
        moved
    }
}

/// Random non-zero heading; a (0, 0) draw becomes left or right
fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    let mut dx = rng.random_range(-1..=1);
    let dy = rng.random_range(-1..=1);
    if dx == 0 && dy == 0 {
        dx = if rng.random_bool(0.5) { 1 } else { -1 };
    }
    Direction::from_unit(dx, dy)
}
