//! Moving entities: the player agent and the adversaries
//!
//! Both share the same motion mechanics through [`Mover`]; the agent adds
//! steering requests and animation, adversaries add a per-instance speed tier.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::resolve_motion;
use super::grid::Grid;
use crate::consts::*;
use crate::error::SimError;
use crate::tile_origin;

/// A heading with each component in {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Direction(IVec2);

impl Direction {
    pub const NONE: Self = Self(IVec2::ZERO);
    pub const UP: Self = Self(IVec2::new(0, -1));
    pub const DOWN: Self = Self(IVec2::new(0, 1));
    pub const LEFT: Self = Self(IVec2::new(-1, 0));
    pub const RIGHT: Self = Self(IVec2::new(1, 0));

    pub fn new(dx: i32, dy: i32) -> Result<Self, SimError> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return Err(SimError::InvalidDirection { dx, dy });
        }
        Ok(Self(IVec2::new(dx, dy)))
    }

    /// Build from components already known to be in {-1, 0, 1}
    #[inline]
    pub(crate) const fn from_unit(dx: i32, dy: i32) -> Self {
        Self(IVec2::new(dx, dy))
    }

    /// Per-axis sign of `to - from`
    pub fn toward(from: IVec2, to: IVec2) -> Self {
        Self((to - from).signum())
    }

    #[inline]
    pub fn vec(self) -> IVec2 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == IVec2::ZERO
    }

    /// Zero or a single-axis unit vector
    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        self.0.x == 0 || self.0.y == 0
    }

    /// Pass single-axis headings through, reject diagonals
    pub fn agent_heading(self) -> Result<Self, SimError> {
        if self.is_axis_aligned() {
            Ok(self)
        } else {
            Err(SimError::DiagonalAgentDirection {
                dx: self.0.x,
                dy: self.0.y,
            })
        }
    }

    /// Sprite orientation; vertical wins over horizontal, standing still faces right
    pub fn facing(self) -> Facing {
        if self.0.y < 0 {
            Facing::Up
        } else if self.0.y > 0 {
            Facing::Down
        } else if self.0.x < 0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Which way a sprite is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

/// Shared motion capability for anything that walks the maze
pub trait Mover {
    fn position(&self) -> IVec2;
    fn direction(&self) -> Direction;
    /// Sub-tile units per tick
    fn speed(&self) -> i32;
    fn set_motion(&mut self, position: IVec2, direction: Direction);

    /// Run one tick of motion resolution. Returns true if the entity moved.
    fn step(&mut self, grid: &Grid, requested: Option<Direction>) -> bool {
        let outcome = resolve_motion(
            grid,
            self.position(),
            self.direction(),
            requested,
            self.speed(),
        );
        self.set_motion(outcome.position, outcome.direction);
        outcome.moved
    }
}

/// The player-controlled agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub pos: IVec2,
    pub dir: Direction,
    /// Latest steering request, kept until replaced
    pub requested: Direction,
    pub speed: i32,
    /// Cosmetic animation frame, 0..ANIMATION_FRAMES
    pub animation_frame: u32,
    animation_counter: u32,
}

impl Agent {
    pub fn new(spawn: IVec2) -> Self {
        Self {
            pos: tile_origin(spawn),
            dir: Direction::NONE,
            requested: Direction::NONE,
            speed: AGENT_SPEED,
            animation_frame: 0,
            animation_counter: ANIMATION_DELAY,
        }
    }

    /// Put the agent back on its spawn tile, standing still
    pub fn respawn(&mut self, spawn: IVec2) {
        self.pos = tile_origin(spawn);
        self.dir = Direction::NONE;
        self.requested = Direction::NONE;
    }

    /// Queue a steering request. Diagonals are rejected.
    pub fn request(&mut self, dir: Direction) -> Result<(), SimError> {
        self.requested = dir.agent_heading()?;
        Ok(())
    }

    pub fn advance_animation(&mut self) {
        self.animation_counter = self.animation_counter.saturating_sub(1);
        if self.animation_counter == 0 {
            self.animation_counter = ANIMATION_DELAY;
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
        }
    }

    pub fn facing(&self) -> Facing {
        self.dir.facing()
    }
}

impl Mover for Agent {
    fn position(&self) -> IVec2 {
        self.pos
    }

    fn direction(&self) -> Direction {
        self.dir
    }

    fn speed(&self) -> i32 {
        self.speed
    }

    fn set_motion(&mut self, position: IVec2, direction: Direction) {
        self.pos = position;
        self.dir = direction;
    }
}

/// A maze adversary; behavior is memoryless, see `controller`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub index: usize,
    pub pos: IVec2,
    pub dir: Direction,
    pub speed: i32,
}

impl Adversary {
    /// Dormant adversary parked on the spawn tile
    pub fn new(index: usize) -> Self {
        Self {
            index,
            pos: tile_origin(ADVERSARY_SPAWN),
            dir: Direction::NONE,
            speed: Self::speed_tier(index),
        }
    }

    /// Cyclic speed tiers 1, 2, 3
    #[inline]
    pub fn speed_tier(index: usize) -> i32 {
        1 + (index % 3) as i32
    }

    /// Return to the spawn tile heading left or right at random
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = tile_origin(ADVERSARY_SPAWN);
        self.speed = Self::speed_tier(self.index);
        self.dir = if rng.random_bool(0.5) {
            Direction::RIGHT
        } else {
            Direction::LEFT
        };
    }
}

impl Mover for Adversary {
    fn position(&self) -> IVec2 {
        self.pos
    }

    fn direction(&self) -> Direction {
        self.dir
    }

    fn speed(&self) -> i32 {
        self.speed
    }

    fn set_motion(&mut self, position: IVec2, direction: Direction) {
        self.pos = position;
        self.dir = direction;
    }
}
