//! Keyboard state and edge detection
//!
//! The window layer reports raw key transitions; the simulation only ever
//! sees a [`TickInput`]. Held keys map to directions, while jump/boost/restart
//! fire once per physical press no matter how long the key is held.

use crate::sim::TickInput;

/// Game actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Boost,
    Restart,
    Quit,
}

impl Key {
    /// Map a DOM/winit-style key code (e.g. `"KeyW"`, `"Space"`) to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::Forward),
            "KeyS" | "ArrowDown" => Some(Key::Back),
            "KeyA" | "ArrowLeft" => Some(Key::Left),
            "KeyD" | "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Jump),
            "ShiftLeft" | "ShiftRight" => Some(Key::Boost),
            "KeyR" | "Enter" => Some(Key::Restart),
            "Escape" => Some(Key::Quit),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const KEY_COUNT: usize = 8;

/// Accumulated keyboard state between simulation ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; KEY_COUNT],
    /// Pressed since the last time edges were consumed
    pressed: [bool; KEY_COUNT],
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; OS auto-repeat while held does not re-trigger
    pub fn key_down(&mut self, key: Key) {
        let i = key.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Was this key pressed since the edges were last consumed?
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Input for the next tick, including any pending one-shot edges
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            forward: self.is_held(Key::Forward),
            back: self.is_held(Key::Back),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            jump: self.was_pressed(Key::Jump),
            boost: self.was_pressed(Key::Boost),
            restart: self.was_pressed(Key::Restart),
            idle_mode: self.idle_mode,
        }
    }

    /// Clear one-shot edges after a tick has processed them
    pub fn consume_edges(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }

    /// Tick input with edges, clearing them in the same step
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = self.tick_input();
        self.consume_edges();
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("KeyW"), Some(Key::Forward));
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_code("ShiftRight"), Some(Key::Boost));
        assert_eq!(Key::from_code("KeyQ"), None);
    }

    #[test]
    fn test_held_keys_drive_directions() {
        let mut input = InputState::new();
        input.key_down(Key::Forward);
        input.key_down(Key::Right);
        let tick = input.take_tick_input();
        assert!(tick.forward && tick.right);
        assert!(!tick.back && !tick.left);

        // Still held on the next tick
        assert!(input.take_tick_input().forward);
        input.key_up(Key::Forward);
        assert!(!input.take_tick_input().forward);
    }

    #[test]
    fn test_jump_fires_once_per_press() {
        let mut input = InputState::new();
        input.key_down(Key::Jump);
        assert!(input.take_tick_input().jump);
        assert!(!input.take_tick_input().jump, "held key must not re-fire");

        // Auto-repeat while held
        input.key_down(Key::Jump);
        assert!(!input.take_tick_input().jump);

        input.key_up(Key::Jump);
        input.key_down(Key::Jump);
        assert!(input.take_tick_input().jump);
    }

    #[test]
    fn test_quick_tap_between_ticks_is_not_lost() {
        let mut input = InputState::new();
        input.key_down(Key::Restart);
        input.key_up(Key::Restart);
        assert!(input.take_tick_input().restart);
        assert!(!input.take_tick_input().restart);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut input = InputState::new();
        input.key_down(Key::Boost);
        assert!(input.tick_input().boost);
        assert!(input.tick_input().boost);
        input.consume_edges();
        assert!(!input.tick_input().boost);
    }
}
