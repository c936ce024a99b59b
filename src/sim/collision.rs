//! Collision detection and motion resolution on the tile grid
//!
//! Entities are points in sub-tile space. Walls are tested against the tile the
//! point would land in after one step, so a turn is granted as soon as the
//! target tile is open, without waiting for tile-center alignment.

use glam::IVec2;

use super::entity::{Adversary, Direction};
use super::grid::Grid;
use crate::consts::{FIELD_SIZE, TILE_SIZE};
use crate::tile_of;

/// Result of one tick of motion resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionOutcome {
    pub position: IVec2,
    pub direction: Direction,
    pub moved: bool,
}

/// Move-check: can an entity at `pos` step `speed` units along `dir`?
///
/// Standing still always passes.
pub fn can_move(grid: &Grid, pos: IVec2, dir: Direction, speed: i32) -> bool {
    if dir.is_zero() {
        return true;
    }
    let next = pos + dir.vec() * speed;
    !grid.is_blocked(tile_of(next))
}

/// Resolve one tick: the requested heading wins if it is legal, otherwise the
/// current heading is kept if still legal, otherwise the entity stays put.
pub fn resolve_motion(
    grid: &Grid,
    pos: IVec2,
    current: Direction,
    requested: Option<Direction>,
    speed: i32,
) -> MotionOutcome {
    let direction = match requested {
        Some(req) if can_move(grid, pos, req, speed) => req,
        _ => current,
    };

    if direction.is_zero() || !can_move(grid, pos, direction, speed) {
        return MotionOutcome {
            position: pos,
            direction,
            moved: false,
        };
    }

    MotionOutcome {
        position: pos + direction.vec() * speed,
        direction,
        moved: true,
    }
}

/// Keep a position inside the playfield
#[inline]
pub fn clamp_to_field(pos: IVec2) -> IVec2 {
    pos.clamp(IVec2::ZERO, IVec2::splat(FIELD_SIZE - 1))
}

/// Consume the pickup under `pos`, if any. Returns the tile that was cleared.
pub fn collect_pickup(grid: &mut Grid, pos: IVec2) -> Option<IVec2> {
    let cell = tile_of(pos);
    match grid.consume_pickup(cell) {
        Ok(true) => Some(cell),
        _ => None,
    }
}

/// Proximity box test, half a tile on both axes
#[inline]
pub fn overlaps(a: IVec2, b: IVec2) -> bool {
    let d = (a - b).abs();
    d.x < TILE_SIZE / 2 && d.y < TILE_SIZE / 2
}

/// Index of the first adversary touching the agent
pub fn find_agent_collision(agent_pos: IVec2, adversaries: &[Adversary]) -> Option<usize> {
    adversaries
        .iter()
        .position(|adv| overlaps(agent_pos, adv.pos))
}

/// A level is complete once no pickup remains
#[inline]
pub fn level_complete(grid: &Grid) -> bool {
    !grid.any_pickup_remaining()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{AGENT_SPAWN, GRID_SIZE};
    use crate::tile_origin;
    use proptest::prelude::*;

    fn grid() -> Grid {
        Grid::generate(GRID_SIZE, AGENT_SPAWN).unwrap()
    }

    #[test]
    fn test_zero_direction_always_passes() {
        let grid = grid();
        // Even from inside a wall tile
        assert!(can_move(&grid, IVec2::ZERO, Direction::NONE, 6));
    }

    #[test]
    fn test_wall_blocks_move() {
        let grid = grid();
        // (2,3) is open, (3,3) is a wall
        let pos = tile_origin(IVec2::new(2, 3));
        assert!(!can_move(&grid, pos, Direction::RIGHT, 24));
        assert!(can_move(&grid, pos, Direction::RIGHT, 6));
        // Border wall on the left
        let pos = tile_origin(IVec2::new(1, 5));
        assert!(!can_move(&grid, pos, Direction::LEFT, 1));
    }

    #[test]
    fn test_requested_direction_wins_when_legal() {
        let grid = grid();
        let pos = tile_origin(AGENT_SPAWN);
        let out = resolve_motion(&grid, pos, Direction::RIGHT, Some(Direction::UP), 6);
        assert_eq!(out.direction, Direction::UP);
        assert_eq!(out.position, pos + IVec2::new(0, -6));
        assert!(out.moved);
    }

    #[test]
    fn test_falls_back_to_current_direction() {
        let grid = grid();
        // (1,1): up is the border, right is open
        let pos = tile_origin(IVec2::new(1, 1));
        let out = resolve_motion(&grid, pos, Direction::RIGHT, Some(Direction::UP), 6);
        assert_eq!(out.direction, Direction::RIGHT);
        assert_eq!(out.position, pos + IVec2::new(6, 0));
    }

    #[test]
    fn test_stops_when_nothing_legal() {
        let grid = grid();
        let pos = tile_origin(IVec2::new(1, 1));
        let out = resolve_motion(&grid, pos, Direction::LEFT, Some(Direction::UP), 6);
        assert_eq!(out.position, pos);
        assert!(!out.moved);
        assert_eq!(out.direction, Direction::LEFT);
    }

    #[test]
    fn test_turn_not_gated_on_alignment() {
        let grid = grid();
        // Mid-corridor, 6 units into tile (7,11) with column 7 open below
        let pos = tile_origin(AGENT_SPAWN) + IVec2::new(6, 0);
        let out = resolve_motion(&grid, pos, Direction::RIGHT, Some(Direction::DOWN), 6);
        assert_eq!(out.direction, Direction::DOWN);
        assert!(out.moved);
    }

    #[test]
    fn test_clamp_to_field() {
        assert_eq!(clamp_to_field(IVec2::new(-5, 400)), IVec2::new(0, FIELD_SIZE - 1));
        assert_eq!(clamp_to_field(IVec2::new(10, 20)), IVec2::new(10, 20));
    }

    #[test]
    fn test_collect_pickup_once() {
        let mut grid = grid();
        let pos = tile_origin(IVec2::new(8, 11)) + IVec2::new(3, 5);
        assert_eq!(collect_pickup(&mut grid, pos), Some(IVec2::new(8, 11)));
        assert_eq!(collect_pickup(&mut grid, pos), None);
    }

    #[test]
    fn test_overlap_threshold() {
        let a = IVec2::new(100, 100);
        assert!(overlaps(a, IVec2::new(111, 89)));
        assert!(!overlaps(a, IVec2::new(112, 100)));
        assert!(!overlaps(a, IVec2::new(100, 88)));
    }

    #[test]
    fn test_first_collision_wins() {
        let agent = IVec2::new(100, 100);
        let mut advs: Vec<Adversary> = (0..3).map(Adversary::new).collect();
        advs[0].pos = IVec2::new(300, 300);
        advs[1].pos = IVec2::new(105, 95);
        advs[2].pos = IVec2::new(100, 100);
        assert_eq!(find_agent_collision(agent, &advs), Some(1));
        assert_eq!(find_agent_collision(agent, &advs[..1]), None);
    }

    fn open_position() -> impl Strategy<Value = IVec2> {
        (1..GRID_SIZE as i32 - 1, 1..GRID_SIZE as i32 - 1, 0..TILE_SIZE, 0..TILE_SIZE)
            .prop_filter("start on an open tile", |(cx, cy, _, _)| !(cx % 3 == 0 && cy % 3 == 0))
            .prop_map(|(cx, cy, ox, oy)| tile_origin(IVec2::new(cx, cy)) + IVec2::new(ox, oy))
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        (-1..=1i32, -1..=1i32).prop_map(|(dx, dy)| Direction::new(dx, dy).unwrap())
    }

    proptest! {
        #[test]
        fn prop_motion_never_enters_walls(
            start in open_position(),
            current in any_direction(),
            requested in proptest::option::of(any_direction()),
            speed in 1..=6i32,
            ticks in 1..40usize,
        ) {
            let grid = grid();
            let mut pos = start;
            let mut dir = current;
            for _ in 0..ticks {
                let out = resolve_motion(&grid, pos, dir, requested, speed);
                pos = out.position;
                dir = out.direction;
                prop_assert!(grid.contains(tile_of(pos)));
                prop_assert!(!grid.is_blocked(tile_of(pos)));
            }
        }
    }
}
