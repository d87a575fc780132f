//! Pressed-key state.
//!
//! The set tracks physical key codes, not directions, so holding KeyW
//! and ArrowUp and releasing one keeps the other effective. State is
//! owned by the engine instance; two mounts never share it.

use crate::core::math::Vec2;

/// The physical keys the engine cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    KeyE,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` string; `None` for keys the game
    /// ignores (those keep their default browser behavior).
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "KeyW" => Self::KeyW,
            "KeyA" => Self::KeyA,
            "KeyS" => Self::KeyS,
            "KeyD" => Self::KeyD,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Space" => Self::Space,
            "KeyE" => Self::KeyE,
            _ => return None,
        })
    }

    pub fn is_interact(self) -> bool {
        matches!(self, Self::KeyE)
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    pressed: Vec<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.pressed.retain(|k| *k != key);
    }

    /// Defensive reset for window blur: a key released while the tab is
    /// unfocused must not appear stuck.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Combine held direction keys into a movement intent. Opposing
    /// keys cancel; the result is not normalized (steering does that).
    pub fn movement_intent(&self) -> Vec2 {
        let up = self.is_pressed(KeyCode::KeyW) || self.is_pressed(KeyCode::ArrowUp);
        let down = self.is_pressed(KeyCode::KeyS) || self.is_pressed(KeyCode::ArrowDown);
        let left = self.is_pressed(KeyCode::KeyA) || self.is_pressed(KeyCode::ArrowLeft);
        let right = self.is_pressed(KeyCode::KeyD) || self.is_pressed(KeyCode::ArrowRight);

        let mut intent = Vec2::zero();
        if up {
            intent.y -= 1.0;
        }
        if down {
            intent.y += 1.0;
        }
        if left {
            intent.x -= 1.0;
        }
        if right {
            intent.x += 1.0;
        }
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_codes_map_to_one_direction() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        input.press(KeyCode::ArrowUp);
        input.release(KeyCode::KeyW);
        assert_eq!(input.movement_intent(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyA);
        input.press(KeyCode::KeyD);
        assert_eq!(input.movement_intent(), Vec2::zero());
    }

    #[test]
    fn blur_clear_releases_everything() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyS);
        input.press(KeyCode::KeyD);
        input.clear();
        assert_eq!(input.movement_intent(), Vec2::zero());
    }

    #[test]
    fn unknown_codes_are_ignored() {
        assert_eq!(KeyCode::from_code("KeyQ"), None);
        assert_eq!(KeyCode::from_code("Tab"), None);
        assert_eq!(KeyCode::from_code("KeyE"), Some(KeyCode::KeyE));
    }
}
