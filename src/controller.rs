use crate::grid::Grid;
use crate::rules::{place_pattern, Pattern};

/// Everything the core needs to know about one frame of input, already
/// translated out of windowing-backend terms by the frontend.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Pointer position in display pixels.
    pub pointer_px: (i32, i32),
    /// Primary (paint) button is currently down.
    pub primary_down: bool,
    /// Secondary (polarity) button is currently down.
    pub secondary_down: bool,
    /// Toggle between editing and simulating; true only on the frame the
    /// toggle was requested.
    pub toggle_simulation: bool,
    /// Stamp a glider at the cursor; true only on the frame it was requested.
    pub stamp_glider: bool,
    /// Shut down after this frame.
    pub quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Simulating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Receives the per-frame cell-state snapshot, one call per cell in
/// row-major order.
pub trait CellSink {
    fn draw_cell(&mut self, x: u32, y: u32, alive: bool);
}

/// Owns the grid and decides, frame by frame, how input acts on it.
///
/// Two modes: `Editing` (primary button paints `paint_value` onto the cell
/// under the pointer) and `Simulating` (the grid advances one generation per
/// frame and painting is disabled, so a manual edit can never race a
/// half-computed generation). The secondary button flips `paint_value` on
/// its rising edge in either mode; flipping while simulating pre-arms the
/// polarity for the return to editing.
pub struct InteractionController {
    grid: Grid,
    cell_size_px: u32,
    mode: Mode,
    paint_value: bool,
    secondary_held: bool,
}

impl InteractionController {
    pub fn new(grid: Grid, cell_size_px: u32) -> Self {
        Self {
            grid,
            cell_size_px,
            mode: Mode::Editing,
            paint_value: true,
            secondary_held: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn paint_value(&self) -> bool {
        self.paint_value
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Process one frame of input and emit the resulting cell states.
    pub fn process_frame(&mut self, input: &InputSnapshot, sink: &mut dyn CellSink) -> FrameOutcome {
        if input.quit {
            return FrameOutcome::Quit;
        }

        if input.toggle_simulation {
            self.mode = match self.mode {
                Mode::Editing => Mode::Simulating,
                Mode::Simulating => Mode::Editing,
            };
            log::info!("Mode: {:?}", self.mode);
        }

        let (cell_x, cell_y) = self.cell_under_pointer(input.pointer_px);

        // Rising edge on the secondary button flips the paint polarity; the
        // latch updates every frame so holding the button flips only once.
        if input.secondary_down && !self.secondary_held {
            self.paint_value = !self.paint_value;
            log::debug!("Paint value: {}", self.paint_value);
        }
        self.secondary_held = input.secondary_down;

        if self.mode == Mode::Editing && self.grid.is_in_bounds(cell_x, cell_y) {
            if input.primary_down {
                self.grid.set_alive(cell_x, cell_y, self.paint_value);
            }
            if input.stamp_glider {
                place_pattern(&mut self.grid, &Pattern::Glider, cell_x, cell_y);
            }
        }

        if self.mode == Mode::Simulating {
            self.grid.advance_generation();
        }

        self.grid.for_each_cell(|x, y, alive| sink.draw_cell(x, y, alive));
        FrameOutcome::Continue
    }

    fn cell_under_pointer(&self, pointer_px: (i32, i32)) -> (i32, i32) {
        let size = self.cell_size_px as i32;
        (pointer_px.0.div_euclid(size), pointer_px.1.div_euclid(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL_SIZE: u32 = 10;

    fn controller() -> InteractionController {
        InteractionController::new(Grid::new(8, 8).unwrap(), CELL_SIZE)
    }

    /// Collects the emitted snapshot for assertions.
    #[derive(Default)]
    struct RecordingSink {
        cells: Vec<(u32, u32, bool)>,
    }

    impl CellSink for RecordingSink {
        fn draw_cell(&mut self, x: u32, y: u32, alive: bool) {
            self.cells.push((x, y, alive));
        }
    }

    /// Swallows the snapshot when a test only cares about state.
    struct NullSink;

    impl CellSink for NullSink {
        fn draw_cell(&mut self, _x: u32, _y: u32, _alive: bool) {}
    }

    fn frame(ctl: &mut InteractionController, input: InputSnapshot) -> FrameOutcome {
        ctl.process_frame(&input, &mut NullSink)
    }

    #[test]
    fn quit_short_circuits_the_frame() {
        let mut ctl = controller();
        let mut sink = RecordingSink::default();
        let outcome = ctl.process_frame(
            &InputSnapshot {
                quit: true,
                toggle_simulation: true,
                ..Default::default()
            },
            &mut sink,
        );
        assert_eq!(outcome, FrameOutcome::Quit);
        // Nothing after the quit check ran: no snapshot, no mode flip
        assert!(sink.cells.is_empty());
        assert_eq!(ctl.mode(), Mode::Editing);
    }

    #[test]
    fn toggle_flips_between_the_two_modes() {
        let mut ctl = controller();
        assert_eq!(ctl.mode(), Mode::Editing);
        frame(&mut ctl, InputSnapshot { toggle_simulation: true, ..Default::default() });
        assert_eq!(ctl.mode(), Mode::Simulating);
        frame(&mut ctl, InputSnapshot { toggle_simulation: true, ..Default::default() });
        assert_eq!(ctl.mode(), Mode::Editing);
    }

    #[test]
    fn painting_sets_the_cell_under_the_pointer() {
        let mut ctl = controller();
        frame(
            &mut ctl,
            InputSnapshot {
                pointer_px: (34, 57),
                primary_down: true,
                ..Default::default()
            },
        );
        assert!(ctl.grid().is_alive(3, 5));
        // Pointer hover without the button does nothing
        frame(&mut ctl, InputSnapshot { pointer_px: (12, 12), ..Default::default() });
        assert!(!ctl.grid().is_alive(1, 1));
    }

    #[test]
    fn painting_respects_paint_value() {
        let mut ctl = controller();
        frame(
            &mut ctl,
            InputSnapshot { pointer_px: (5, 5), primary_down: true, ..Default::default() },
        );
        assert!(ctl.grid().is_alive(0, 0));

        // Flip polarity, paint the same cell dead again
        frame(
            &mut ctl,
            InputSnapshot {
                pointer_px: (5, 5),
                primary_down: true,
                secondary_down: true,
                ..Default::default()
            },
        );
        assert!(!ctl.grid().is_alive(0, 0));
    }

    #[test]
    fn out_of_bounds_pointer_paints_nothing() {
        let mut ctl = controller();
        let mut sink = RecordingSink::default();
        ctl.process_frame(
            &InputSnapshot {
                pointer_px: (799, 799), // past the 8x8 grid
                primary_down: true,
                ..Default::default()
            },
            &mut sink,
        );
        assert!(sink.cells.iter().all(|&(_, _, alive)| !alive));
    }

    #[test]
    fn secondary_hold_flips_polarity_exactly_once() {
        let mut ctl = controller();
        assert!(ctl.paint_value());
        for _ in 0..5 {
            frame(&mut ctl, InputSnapshot { secondary_down: true, ..Default::default() });
        }
        assert!(!ctl.paint_value());

        // Release, press again: one more flip
        frame(&mut ctl, InputSnapshot::default());
        frame(&mut ctl, InputSnapshot { secondary_down: true, ..Default::default() });
        assert!(ctl.paint_value());
    }

    #[test]
    fn polarity_can_be_prearmed_while_simulating() {
        let mut ctl = controller();
        frame(&mut ctl, InputSnapshot { toggle_simulation: true, ..Default::default() });
        assert_eq!(ctl.mode(), Mode::Simulating);
        frame(&mut ctl, InputSnapshot { secondary_down: true, ..Default::default() });
        assert!(!ctl.paint_value());
    }

    #[test]
    fn simulating_ignores_the_primary_button() {
        let mut ctl = controller();
        frame(&mut ctl, InputSnapshot { toggle_simulation: true, ..Default::default() });
        frame(
            &mut ctl,
            InputSnapshot { pointer_px: (5, 5), primary_down: true, ..Default::default() },
        );
        // The grid was all dead, one generation of an empty board stays dead,
        // and no paint landed at (0, 0)
        assert!(!ctl.grid().is_alive(0, 0));
    }

    #[test]
    fn editing_does_not_advance_the_generation() {
        let mut ctl = controller();
        // A lone cell would die if a generation ran
        frame(
            &mut ctl,
            InputSnapshot { pointer_px: (25, 25), primary_down: true, ..Default::default() },
        );
        frame(&mut ctl, InputSnapshot::default());
        assert!(ctl.grid().is_alive(2, 2));
    }

    #[test]
    fn simulating_advances_one_generation_per_frame() {
        let mut ctl = controller();
        // Paint a horizontal blinker at row 2
        for px in [15, 25, 35] {
            frame(
                &mut ctl,
                InputSnapshot { pointer_px: (px, 25), primary_down: true, ..Default::default() },
            );
        }
        frame(&mut ctl, InputSnapshot { toggle_simulation: true, ..Default::default() });
        // One frame: the blinker turned vertical
        assert!(ctl.grid().is_alive(2, 1));
        assert!(ctl.grid().is_alive(2, 2));
        assert!(ctl.grid().is_alive(2, 3));
        assert!(!ctl.grid().is_alive(1, 2));
        // Next frame: back to horizontal
        frame(&mut ctl, InputSnapshot::default());
        assert!(ctl.grid().is_alive(1, 2));
        assert!(ctl.grid().is_alive(3, 2));
    }

    #[test]
    fn stamp_places_a_glider_while_editing_only() {
        let mut ctl = controller();
        frame(
            &mut ctl,
            InputSnapshot { pointer_px: (21, 21), stamp_glider: true, ..Default::default() },
        );
        // Glider anchored at cell (2, 2)
        assert!(ctl.grid().is_alive(2, 3));
        assert!(ctl.grid().is_alive(4, 2));

        let mut ctl = controller();
        frame(&mut ctl, InputSnapshot { toggle_simulation: true, ..Default::default() });
        frame(
            &mut ctl,
            InputSnapshot { pointer_px: (21, 21), stamp_glider: true, ..Default::default() },
        );
        frame(&mut ctl, InputSnapshot { toggle_simulation: true, ..Default::default() });
        assert!(!ctl.grid().is_alive(2, 3));
    }

    #[test]
    fn snapshot_covers_every_cell_in_row_major_order() {
        let mut ctl = InteractionController::new(Grid::new(3, 2).unwrap(), CELL_SIZE);
        let mut sink = RecordingSink::default();
        ctl.process_frame(&InputSnapshot::default(), &mut sink);
        let coords: Vec<(u32, u32)> = sink.cells.iter().map(|&(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
