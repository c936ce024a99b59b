//! Text frame rendering for the terminal driver
//!
//! Draws a [`Snapshot`] as a block of characters: maze, pickups, agent and
//! adversaries, with a HUD line underneath. Menu and game-over get a title card.

use std::fmt::Write;

use glam::IVec2;

use crate::sim::{Facing, SessionPhase, Snapshot};
use crate::tile_of;

pub const WALL: char = '#';
pub const PICKUP: char = '.';
pub const ADVERSARY: char = 'M';

/// Agent glyph, a mouth opening toward the heading
pub fn agent_glyph(facing: Facing) -> char {
    match facing {
        Facing::Up => 'V',
        Facing::Down => '^',
        Facing::Left => '>',
        Facing::Right => '<',
    }
}

/// Render one frame
pub fn render_frame(snap: &Snapshot) -> String {
    match snap.phase {
        SessionPhase::Menu => {
            title_card(&["MAZE CHASE", "Press ENTER to Start", "WASD to Move"])
        }
        SessionPhase::GameOver => {
            let score = format!("Score: {}", snap.score);
            title_card(&["GAME OVER", score.as_str(), "Press ENTER to Start"])
        }
        SessionPhase::Playing | SessionPhase::Dying => {
            let mut out = render_maze(snap);
            out.push_str(&hud_line(snap));
            out
        }
    }
}

fn render_maze(snap: &Snapshot) -> String {
    let agent_tile = tile_of(snap.agent.position);
    let adversary_tiles: Vec<IVec2> = snap.adversaries.iter().map(|&p| tile_of(p)).collect();

    let mut out = String::with_capacity((snap.grid_size + 1) * snap.grid_size);
    for y in 0..snap.grid_size as i32 {
        for x in 0..snap.grid_size as i32 {
            let cell = IVec2::new(x, y);
            let glyph = if cell == agent_tile {
                if snap.phase == SessionPhase::Dying {
                    'X'
                } else {
                    agent_glyph(snap.agent.facing)
                }
            } else if adversary_tiles.contains(&cell) {
                ADVERSARY
            } else if snap.is_wall(cell) {
                WALL
            } else if snap.has_pickup(cell) {
                PICKUP
            } else {
                ' '
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Score, level and lives
pub fn hud_line(snap: &Snapshot) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "Score: {}  Level: {}  Lives: {}",
        snap.score, snap.level, snap.lives
    );
    if snap.paused {
        line.push_str("  [PAUSED]");
    }
    line
}

fn title_card(lines: &[&str]) -> String {
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) + 4;
    let border = format!("+{}+\n", "-".repeat(width));
    let mut out = border.clone();
    for line in lines {
        let _ = writeln!(out, "|{line:^width$}|");
    }
    out.push_str(&border);
    out
}
