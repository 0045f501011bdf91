use thiserror::Error;

use crate::rules::Rules;

/// One cell of the board.
///
/// `neighbor_count` is scratch space for `Grid::advance_generation`: it is
/// only meaningful while a generation step is in progress and is zero at all
/// other times.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    pub alive: bool,
    pub neighbor_count: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },
}

/// Fixed-size rectangular board of cells, row-major, bounded edges.
///
/// Coordinates outside `[0, width) x [0, height)` are permanently dead: they
/// are never stored, never counted, and writes to them are ignored.
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    rules: Rules,
}

impl Grid {
    /// Create an all-dead grid with the classic Conway rules.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Self::with_rules(width, height, Rules::default())
    }

    pub fn with_rules(width: u32, height: u32, rules: Rules) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            rules,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// The eight Moore-neighborhood coordinates of (x, y), unfiltered.
    /// Callers filter with `is_in_bounds` before indexing.
    pub fn neighbor_offsets(x: i32, y: i32) -> [(i32, i32); 8] {
        [
            (x - 1, y - 1),
            (x - 1, y),
            (x - 1, y + 1),
            (x, y - 1),
            (x, y + 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x + 1, y + 1),
        ]
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y as u32 * self.width + x as u32) as usize
    }

    /// Set one cell's life state. Out-of-bounds writes are ignored; the
    /// interaction layer bounds-checks before calling, this is a backstop.
    pub fn set_alive(&mut self, x: i32, y: i32, value: bool) {
        if self.is_in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells[idx].alive = value;
        }
    }

    /// Life state of one cell; out-of-bounds coordinates read as dead.
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.is_in_bounds(x, y) && self.cells[self.index(x, y)].alive
    }

    /// Visit every cell in row-major order.
    pub fn for_each_cell(&self, mut f: impl FnMut(u32, u32, bool)) {
        for y in 0..self.height {
            for x in 0..self.width {
                f(x, y, self.cells[(y * self.width + x) as usize].alive);
            }
        }
    }

    /// Advance the whole board by one generation.
    ///
    /// Two passes over the board. The scoring pass tallies, for every cell,
    /// how many of its in-bounds Moore neighbors are alive, by having each
    /// live cell increment its neighbors' `neighbor_count`. The transition
    /// pass then applies the rules and resets the tallies. All scores come
    /// from the pre-transition state; interleaving the passes per-cell would
    /// make the result depend on traversal order.
    pub fn advance_generation(&mut self) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.cells[self.index(x, y)].alive {
                    for (nx, ny) in Self::neighbor_offsets(x, y) {
                        if self.is_in_bounds(nx, ny) {
                            let idx = self.index(nx, ny);
                            self.cells[idx].neighbor_count += 1;
                        }
                    }
                }
            }
        }

        let rules = self.rules;
        for cell in &mut self.cells {
            cell.alive = rules.next_state(cell.alive, cell.neighbor_count as u32);
            cell.neighbor_count = 0;
        }
    }
}
