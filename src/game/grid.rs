use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Cell;

/// Bounded play area.
///
/// Cells are addressed in distance units: a cell's coordinates are
/// multiples of `cell_size`, and the area spans
/// `[0, width * cell_size) x [0, height * cell_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Width in cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Distance moved by one step
    pub fn unit(&self) -> i32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Check if a cell lies within the play area
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.width * self.cell_size
            && cell.y >= 0
            && cell.y < self.height * self.cell_size
    }

    /// Column/row index of the cell that covers `cell`, or None off-board
    pub fn index_of(&self, cell: Cell) -> Option<(usize, usize)> {
        if !self.contains(cell) {
            return None;
        }
        Some((
            (cell.x / self.cell_size) as usize,
            (cell.y / self.cell_size) as usize,
        ))
    }

    /// Uniformly random cell-aligned position inside the play area
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let col = rng.gen_range(0..self.width);
        let row = rng.gen_range(0..self.height);
        Cell::new(col * self.cell_size, row * self.cell_size)
    }
}
