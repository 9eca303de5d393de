//! Fixed-size square grid of live/dead cells.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("expected {expected} cells for the grid, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}

/// An `N`×`N` grid addressed by `(x, y)`, where `x` is the row and `y` the
/// column. Cells outside the grid are treated as dead; there is no wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Creates a grid from row-major cell states.
    pub fn from_cells(size: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        if cells.len() != size * size {
            return Err(GridError::SizeMismatch {
                expected: size * size,
                got: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }

    #[inline]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index_of(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index_of(x, y);
        self.cells[idx] = alive;
    }

    /// Flips the cell at `(x, y)` and returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let idx = self.index_of(x, y);
        self.cells[idx] = !self.cells[idx];
        self.cells[idx]
    }

    /// Counts live cells in the Moore neighborhood of `(x, y)`.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dx in -1..=1_isize {
            for dy in -1..=1_isize {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if self.in_bounds(nx, ny) && self.get(nx as usize, ny as usize) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Sets every cell from `f(x, y)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize) -> bool) {
        let size = self.size;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(idx / size, idx % size);
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterates over `((x, y), alive)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), bool)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &alive)| ((idx / size, idx % size), alive))
    }
}

/// By-value form of [`Grid::toggle`].
pub fn toggle_cell(mut grid: Grid, x: usize, y: usize) -> Grid {
    grid.toggle(x, y);
    grid
}
