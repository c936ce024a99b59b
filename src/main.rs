//! Maze Chase entry point
//!
//! Headless driver: owns the fixed cadence, feeds an autopilot's steering into
//! the simulation and prints text frames.

use std::path::PathBuf;
use std::thread;

use glam::IVec2;
use maze_chase::sim::{Command, Direction, GameEvent, GameState, SessionPhase};
use maze_chase::ui::render_frame;
use maze_chase::{Settings, SimError, tile_of};

const TURN_ORDER: [Direction; 4] = [
    Direction::UP,
    Direction::RIGHT,
    Direction::DOWN,
    Direction::LEFT,
];

/// Idle/demo player: heads for the nearest pickup, turns when stuck
#[derive(Debug, Default)]
struct Autopilot {
    last_pos: Option<IVec2>,
    turn: usize,
}

impl Autopilot {
    fn steer(&mut self, state: &GameState) -> Option<Direction> {
        let pos = state.agent().pos;
        let stuck = self.last_pos == Some(pos);
        self.last_pos = Some(pos);

        if stuck {
            self.turn = (self.turn + 1) % TURN_ORDER.len();
            return Some(TURN_ORDER[self.turn]);
        }

        let here = tile_of(pos);
        let target = state
            .grid()
            .pickup_cells()
            .min_by_key(|cell| (*cell - here).abs().element_sum())?;
        let delta = target - here;

        let dir = if delta.x.abs() >= delta.y.abs() {
            if delta.x > 0 {
                Direction::RIGHT
            } else {
                Direction::LEFT
            }
        } else if delta.y > 0 {
            Direction::DOWN
        } else {
            Direction::UP
        };
        Some(dir)
    }
}

fn main() -> Result<(), SimError> {
    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let mut state = GameState::from_settings(&settings)?;
    let controller = state.controller();
    log::info!(
        "Seed {:#x}, wander {:.2}, pursue {:.2}",
        state.seed(),
        controller.wander_chance,
        controller.pursue_chance
    );

    println!("{}", render_frame(&state.snapshot()));
    state.handle_command(Command::Start);

    let mut pilot = Autopilot::default();
    let render_every = settings.render_every.max(1);
    let max_ticks = settings.max_ticks.unwrap_or(u64::MAX);

    for frame in 0..max_ticks {
        let request = pilot.steer(&state);
        state.advance_frame(request)?;

        for event in state.events() {
            match event {
                GameEvent::LevelCleared { level, bonus } => {
                    println!("Level {level}! +{bonus}");
                }
                GameEvent::LifeLost { remaining } => {
                    println!("Caught! {remaining} lives left");
                }
                _ => {}
            }
        }

        if frame % render_every == 0 || state.phase() == SessionPhase::GameOver {
            println!("{}", render_frame(&state.snapshot()));
        }
        if state.phase() == SessionPhase::GameOver {
            break;
        }

        thread::sleep(settings.tick_interval());
    }

    log::info!(
        "Finished after {} ticks: level {}, score {}",
        state.time_ticks(),
        state.level(),
        state.score()
    );
    Ok(())
}
