use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton},
    keyboard::{Key, NamedKey},
};

use crate::controller::InputSnapshot;

/// Accumulates winit events between redraws and hands the core one
/// `InputSnapshot` per frame.
///
/// Button and cursor state are latches (the last event wins); Enter, Escape
/// and G are one-shot signals that clear when the snapshot is taken, so each
/// key press is seen by exactly one frame. Key repeats are ignored.
#[derive(Default)]
pub struct InputCollector {
    cursor: PhysicalPosition<f64>,
    primary_down: bool,
    secondary_down: bool,
    toggle_pending: bool,
    stamp_pending: bool,
    quit_pending: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = position;
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.primary_down = pressed,
            MouseButton::Right => self.secondary_down = pressed,
            _ => {}
        }
    }

    pub fn on_key(&mut self, key: &Key, state: ElementState, repeat: bool) {
        if state != ElementState::Pressed || repeat {
            return;
        }
        match key {
            Key::Named(NamedKey::Enter) => self.toggle_pending = true,
            Key::Named(NamedKey::Escape) => self.quit_pending = true,
            Key::Character(c) if c.eq_ignore_ascii_case("g") => self.stamp_pending = true,
            _ => {}
        }
    }

    pub fn request_quit(&mut self) {
        self.quit_pending = true;
    }

    /// Build the snapshot for the coming frame and clear the one-shot flags.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            pointer_px: (self.cursor.x as i32, self.cursor.y as i32),
            primary_down: self.primary_down,
            secondary_down: self.secondary_down,
            toggle_simulation: self.toggle_pending,
            stamp_glider: self.stamp_pending,
            quit: self.quit_pending,
        };
        self.toggle_pending = false;
        self.stamp_pending = false;
        self.quit_pending = false;
        snapshot
    }
}
