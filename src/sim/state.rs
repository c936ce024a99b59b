//! Game session state and core simulation types
//!
//! `GameState` owns everything one play session needs. Outside callers only
//! read it through accessors or a [`Snapshot`]; mutation goes through `tick`
//! and commands.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::controller::AdversaryController;
use super::entity::{Adversary, Agent, Direction};
use super::grid::Grid;
use super::snapshot::Snapshot;
use super::tick::{TickInput, apply_command, tick};
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;
use crate::active_adversaries_for_level;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, waiting for Start
    Menu,
    /// Active gameplay
    Playing,
    /// Agent was caught; the next tick costs a life
    Dying,
    /// Out of lives, waiting for Start
    GameOver,
}

/// Discrete input events from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    TogglePause,
    ReturnToMenu,
}

/// Things that happened during the last tick or command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    PickupCollected { cell: IVec2 },
    AgentCaught { adversary: usize },
    LifeLost { remaining: u32 },
    LevelCleared { level: u32, bonus: u32 },
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was built from
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) controller: AdversaryController,
    pub(crate) phase: SessionPhase,
    pub(crate) paused: bool,
    pub(crate) score: u32,
    pub(crate) lives: u32,
    pub(crate) level: u32,
    /// Gameplay ticks advanced this session
    pub(crate) time_ticks: u64,
    pub(crate) grid: Grid,
    pub(crate) agent: Agent,
    /// Full adversary pool; only the first `active_adversaries` take part
    pub(crate) adversaries: Vec<Adversary>,
    pub(crate) active_adversaries: usize,
    /// Events from the most recent tick/command
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting in the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_controller(seed, AdversaryController::default())
    }

    /// Create a session from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self, SimError> {
        let controller =
            AdversaryController::new(settings.wander_chance, settings.pursue_chance)?;
        Ok(Self::with_controller(settings.seed, controller))
    }

    pub fn with_controller(seed: u64, controller: AdversaryController) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            controller,
            phase: SessionPhase::Menu,
            paused: false,
            score: 0,
            lives: START_LIVES,
            level: 1,
            time_ticks: 0,
            grid: Grid::standard(),
            agent: Agent::new(AGENT_SPAWN),
            adversaries: (0..MAX_ADVERSARIES).map(Adversary::new).collect(),
            active_adversaries: active_adversaries_for_level(1),
            events: Vec::new(),
        }
    }

    /// Run one tick with an optional new steering request.
    ///
    /// `None` keeps the previous request; it does not mean "stop".
    pub fn advance_frame(&mut self, requested: Option<Direction>) -> Result<(), SimError> {
        tick(
            self,
            &TickInput {
                direction: requested,
                command: None,
            },
        )
    }

    pub fn handle_command(&mut self, command: Command) {
        self.events.clear();
        apply_command(self, command);
    }

    /// Start a fresh session: score, lives and level reset, new level loaded
    pub(crate) fn start_session(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.time_ticks = 0;
        self.paused = false;
        self.load_level();
        self.phase = SessionPhase::Playing;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Fresh grid, active count for the current level, everyone back to spawn
    pub(crate) fn load_level(&mut self) {
        self.grid = Grid::standard();
        self.active_adversaries = active_adversaries_for_level(self.level);
        self.reset_positions();
        log::info!(
            "Level {} loaded: {} adversaries, {} pickups",
            self.level,
            self.active_adversaries,
            self.grid.pickups_remaining()
        );
    }

    /// Reposition agent and active adversaries; the grid is untouched
    pub(crate) fn reset_positions(&mut self) {
        self.agent.respawn(AGENT_SPAWN);
        let active = self.active_adversaries;
        for adv in self.adversaries.iter_mut().take(active) {
            adv.respawn(&mut self.rng);
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn controller(&self) -> &AdversaryController {
        &self.controller
    }

    /// Adversaries currently in play
    pub fn active_adversaries(&self) -> &[Adversary] {
        &self.adversaries[..self.active_adversaries]
    }

    pub fn active_adversary_count(&self) -> usize {
        self.active_adversaries
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
