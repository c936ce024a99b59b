//! Fixed-tick simulation step
//!
//! One call advances the session by exactly one tick and leaves a consistent
//! state behind. There is no timing in here; the caller owns the cadence.

use super::collision::{collect_pickup, find_agent_collision, level_complete};
use super::entity::{Direction, Mover};
use super::state::{Command, GameEvent, GameState, SessionPhase};
use crate::consts::*;
use crate::error::SimError;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// New steering request; `None` keeps the previous one
    pub direction: Option<Direction>,
    /// Discrete command, applied before the tick runs
    pub command: Option<Command>,
}

/// Advance the session by one tick
///
/// A rejected input leaves the session untouched.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<(), SimError> {
    let direction = input.direction.map(Direction::agent_heading).transpose()?;

    state.events.clear();

    if let Some(command) = input.command {
        apply_command(state, command);
    }

    if let Some(dir) = direction {
        state.agent.requested = dir;
    }

    if state.paused {
        return Ok(());
    }

    match state.phase {
        SessionPhase::Playing => play(state),
        SessionPhase::Dying => lose_life(state),
        SessionPhase::Menu | SessionPhase::GameOver => {}
    }

    Ok(())
}

/// Apply a command; commands that make no sense in the current phase are ignored
pub fn apply_command(state: &mut GameState, command: Command) {
    match (command, state.phase) {
        (Command::Start, SessionPhase::Menu | SessionPhase::GameOver) => {
            state.start_session();
        }
        (Command::TogglePause, SessionPhase::Playing | SessionPhase::Dying) => {
            state.paused = !state.paused;
            log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
        }
        (Command::ReturnToMenu, SessionPhase::Playing | SessionPhase::Dying) => {
            state.paused = false;
            state.phase = SessionPhase::Menu;
            log::info!("Session abandoned at level {} with score {}", state.level, state.score);
        }
        (command, phase) => {
            log::debug!("Ignoring {command:?} in {phase:?}");
        }
    }
}

fn play(state: &mut GameState) {
    state.time_ticks += 1;

    state.agent.advance_animation();

    let requested = Some(state.agent.requested);
    if state.agent.step(&state.grid, requested) {
        if let Some(cell) = collect_pickup(&mut state.grid, state.agent.pos) {
            state.score += PICKUP_SCORE;
            state.events.push(GameEvent::PickupCollected { cell });
            log::debug!("Pickup at {cell}, score {}", state.score);
        }
    }

    let agent_pos = state.agent.pos;
    let active = state.active_adversaries;
    let controller = state.controller;
    for adv in state.adversaries.iter_mut().take(active) {
        controller.advance(adv, agent_pos, &state.grid, &mut state.rng);
    }

    if let Some(adversary) = find_agent_collision(agent_pos, &state.adversaries[..active]) {
        state.phase = SessionPhase::Dying;
        state.events.push(GameEvent::AgentCaught { adversary });
        log::info!("Agent caught by adversary {adversary}");
    }

    if level_complete(&state.grid) {
        state.level += 1;
        let bonus = LEVEL_BONUS * state.level;
        state.score += bonus;
        state.events.push(GameEvent::LevelCleared {
            level: state.level,
            bonus,
        });
        log::info!("Level cleared, advancing to {} (+{bonus})", state.level);
        state.load_level();
        // Repositioning everyone also cancels a catch from this same tick
        state.phase = SessionPhase::Playing;
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives > 0 {
        state.reset_positions();
        state.phase = SessionPhase::Playing;
        log::info!("Life lost, {} remaining", state.lives);
    } else {
        state.phase = SessionPhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over at level {} with score {}", state.level, state.score);
    }
}
