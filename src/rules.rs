use crate::grid::Grid;

/// Life-like rule set in survival-range/birth-count form.
///
/// Conway's classic rules (B3/S23):
/// 1. Any live cell with fewer than two live neighbors dies (underpopulation)
/// 2. Any live cell with two or three live neighbors lives (survival)
/// 3. Any live cell with more than three live neighbors dies (overpopulation)
/// 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Minimum neighbors for a live cell to survive
    pub survival_min: u32,
    /// Maximum neighbors for a live cell to survive
    pub survival_max: u32,
    /// Number of neighbors for a dead cell to become alive
    pub birth_count: u32,
}

impl Default for Rules {
    fn default() -> Self {
        // Classic Conway's Game of Life
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_count: 3,
        }
    }
}

impl Rules {
    pub fn new(survival_min: u32, survival_max: u32, birth_count: u32) -> Self {
        Self {
            survival_min,
            survival_max,
            birth_count,
        }
    }

    /// Next life state of one cell given its live-neighbor count.
    pub fn next_state(&self, alive: bool, neighbors: u32) -> bool {
        if alive {
            neighbors >= self.survival_min && neighbors <= self.survival_max
        } else {
            neighbors == self.birth_count
        }
    }
}

/// Small stampable patterns, given as cells relative to an anchor.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Period-2 oscillator, three cells in a vertical line
    Blinker,
    /// 2x2 still life
    Block,
    /// Diagonal spaceship
    Glider,
}

impl Pattern {
    /// Cell coordinates of the pattern anchored at (x, y).
    pub fn cells(&self, x: i32, y: i32) -> Vec<(i32, i32)> {
        match self {
            Pattern::Blinker => vec![(x, y - 1), (x, y), (x, y + 1)],
            Pattern::Block => vec![(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)],
            Pattern::Glider => vec![
                (x, y + 1),
                (x + 1, y + 2),
                (x + 2, y),
                (x + 2, y + 1),
                (x + 2, y + 2),
            ],
        }
    }
}

/// Stamp a pattern onto the grid; cells falling outside the grid are skipped.
pub fn place_pattern(grid: &mut Grid, pattern: &Pattern, x: i32, y: i32) {
    for (cx, cy) in pattern.cells(x, y) {
        if grid.is_in_bounds(cx, cy) {
            grid.set_alive(cx, cy, true);
        }
    }
}
