//! Maze geometry
//!
//! A square grid of cells, each holding two independent facts: whether it is a
//! wall and whether it still carries a pickup. Layout is procedural and fully
//! determined by the grid size and the spawn cell.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{AGENT_SPAWN, GRID_SIZE};
use crate::error::SimError;

/// One maze cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub wall: bool,
    pub pickup: bool,
}

/// Square maze, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build the standard layout: walled border, a wall on every interior cell
    /// whose coordinates are both multiples of 3, pickups everywhere else, and a
    /// cleared spawn cell.
    pub fn generate(size: usize, spawn: IVec2) -> Result<Self, SimError> {
        if size < 3 {
            return Err(SimError::GridTooSmall(size));
        }
        let last = size as i32 - 1;
        if spawn.x < 1 || spawn.y < 1 || spawn.x >= last || spawn.y >= last {
            return Err(SimError::SpawnNotInterior {
                x: spawn.x,
                y: spawn.y,
            });
        }
        Ok(Self::build(size, spawn))
    }

    /// The level layout every session plays on
    pub fn standard() -> Self {
        Self::build(GRID_SIZE, AGENT_SPAWN)
    }

    fn build(size: usize, spawn: IVec2) -> Self {
        let last = size - 1;
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let border = x == 0 || y == 0 || x == last || y == last;
                let cell = if border {
                    Cell {
                        wall: true,
                        pickup: false,
                    }
                } else {
                    let wall = x % 3 == 0 && y % 3 == 0;
                    Cell {
                        wall,
                        pickup: !wall,
                    }
                };
                cells.push(cell);
            }
        }

        cells[spawn.y as usize * size + spawn.x as usize] = Cell::default();

        Self { size, cells }
    }

    /// Width and height in cells
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a cell lies inside the grid
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.size && (cell.y as usize) < self.size
    }

    fn index(&self, cell: IVec2) -> Result<usize, SimError> {
        if self.contains(cell) {
            Ok(cell.y as usize * self.size + cell.x as usize)
        } else {
            Err(SimError::CellOutOfBounds {
                x: cell.x,
                y: cell.y,
                size: self.size,
            })
        }
    }

    pub fn cell(&self, cell: IVec2) -> Result<Cell, SimError> {
        Ok(self.cells[self.index(cell)?])
    }

    pub fn is_wall(&self, cell: IVec2) -> Result<bool, SimError> {
        Ok(self.cell(cell)?.wall)
    }

    pub fn has_pickup(&self, cell: IVec2) -> Result<bool, SimError> {
        Ok(self.cell(cell)?.pickup)
    }

    /// Movement blocker test: out of bounds counts as blocked
    #[inline]
    pub fn is_blocked(&self, cell: IVec2) -> bool {
        self.cell(cell).map(|c| c.wall).unwrap_or(true)
    }

    /// Remove the pickup from a cell. Returns true only if one was there.
    pub fn consume_pickup(&mut self, cell: IVec2) -> Result<bool, SimError> {
        let idx = self.index(cell)?;
        let had = self.cells[idx].pickup;
        self.cells[idx].pickup = false;
        Ok(had)
    }

    pub fn any_pickup_remaining(&self) -> bool {
        self.cells.iter().any(|c| c.pickup)
    }

    pub fn pickups_remaining(&self) -> usize {
        self.cells.iter().filter(|c| c.pickup).count()
    }

    /// Wall bitmap, row-major
    pub fn walls(&self) -> Vec<bool> {
        self.cells.iter().map(|c| c.wall).collect()
    }

    /// Pickup bitmap, row-major
    pub fn pickups(&self) -> Vec<bool> {
        self.cells.iter().map(|c| c.pickup).collect()
    }

    /// Cells that still carry a pickup, in row-major order
    pub fn pickup_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells.iter().enumerate().filter(|(_, c)| c.pickup).map(|(i, _)| {
            IVec2::new((i % self.size) as i32, (i / self.size) as i32)
        })
    }
}
