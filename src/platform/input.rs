//! Keyboard state to per-tick intents
//!
//! Hosts forward raw key codes on press/release; the game reads a
//! `TickInput` snapshot once per tick.

use crate::sim::TickInput;

/// Key codes (DOM `keyCode` values)
pub mod keys {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    /// Toggle idle mode
    pub const IDLE: u32 = 73;
    pub const FIRE: u32 = 88;
    pub const GLITCH: u32 = 90;
}

/// Which game keys are currently held
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub glitch: bool,
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is bound.
    pub fn key_down(&mut self, code: u32) -> bool {
        if code == keys::IDLE {
            self.idle_mode = !self.idle_mode;
            log::info!("Idle mode: {}", self.idle_mode);
            return true;
        }
        self.set(code, true)
    }

    /// Record a key release. Returns true if the key is bound.
    pub fn key_up(&mut self, code: u32) -> bool {
        if code == keys::IDLE {
            return true;
        }
        self.set(code, false)
    }

    fn set(&mut self, code: u32, pressed: bool) -> bool {
        let key = match code {
            keys::LEFT => &mut self.left,
            keys::UP => &mut self.up,
            keys::RIGHT => &mut self.right,
            keys::DOWN => &mut self.down,
            keys::FIRE => &mut self.fire,
            keys::GLITCH => &mut self.glitch,
            _ => return false,
        };
        *key = pressed;
        true
    }

    /// Release every held key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        *self = Self {
            idle_mode: self.idle_mode,
            ..Self::default()
        };
    }

    /// Intents for the next tick. Forward wins when both thrust keys are held.
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            forward: self.up,
            backward: self.down && !self.up,
            rotate_left: self.left,
            rotate_right: self.right,
            fire: self.fire,
            glitch: self.glitch,
            idle_mode: self.idle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert!(input.key_down(keys::UP));
        assert!(input.key_down(keys::FIRE));
        let tick = input.to_tick_input();
        assert!(tick.forward && tick.fire);
        assert!(!tick.glitch);

        assert!(input.key_up(keys::UP));
        assert!(!input.to_tick_input().forward);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down(65));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_forward_and_backward_are_exclusive() {
        let mut input = InputState::new();
        input.key_down(keys::UP);
        input.key_down(keys::DOWN);
        let tick = input.to_tick_input();
        assert!(tick.forward);
        assert!(!tick.backward);
    }

    #[test]
    fn test_idle_toggle_survives_release_all() {
        let mut input = InputState::new();
        input.key_down(keys::IDLE);
        input.key_down(keys::GLITCH);
        input.release_all();
        assert!(input.idle_mode);
        assert!(!input.glitch);
        input.key_down(keys::IDLE);
        assert!(!input.to_tick_input().idle_mode);
    }
}
