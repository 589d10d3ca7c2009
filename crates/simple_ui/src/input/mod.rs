//! Input management system
//!
//! The UI never talks to the platform directly. Each tick it samples an
//! [`InputBackend`] into an [`InputState`] snapshot, and every consumer
//! during that tick reads the same snapshot.

pub mod backend;
pub mod collision;
pub mod keymap;

pub use backend::{InputBackend, ScriptedInput};
pub use keymap::{legend_for, KeyLegend, KEY_MAP};

use bitflags::bitflags;

use crate::foundation::math::{vec2, Vec2};

bitflags! {
    /// Pointer buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left mouse button
        const PRIMARY = 0b001;
        /// Right mouse button
        const SECONDARY = 0b010;
        /// Middle mouse button
        const MIDDLE = 0b100;
    }
}

bitflags! {
    /// Held keyboard modifiers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 0b01;
        /// Either control key
        const CONTROL = 0b10;
    }
}

/// Active keyboard input language, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardLanguage {
    /// English (US) layout
    #[default]
    English,
    /// Russian (ЙЦУКЕН) layout
    Russian,
    /// Any other layout; typed as English
    Other,
}

/// Physical keys the UI reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    One, Two, Three, Four, Five, Six, Seven, Eight, Nine, Zero,
    Q, W, E, R, T, Y, U, I, O, P,
    A, S, D, F, G, H, J, K, L, Semicolon, Apostrophe,
    Z, X, C, V, B, N, M, Comma, Period, Slash,
    Space, Minus, Equal, LeftBracket, RightBracket, Backslash, Grave,
    Backspace, Delete, Left, Right,
}

impl Key {
    /// Editing keys that are not part of the character map
    pub const EDITING: [Self; 4] = [Self::Backspace, Self::Delete, Self::Left, Self::Right];

    /// Every key a backend is asked about each frame
    pub fn all() -> impl Iterator<Item = Self> {
        KEY_MAP.iter().map(|legend| legend.key).chain(Self::EDITING)
    }
}

/// One tick's worth of sampled input
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    /// Pointer position in pixels
    pub pointer: Vec2,
    /// Buttons currently held
    pub buttons_down: MouseButtons,
    /// Buttons that went down this frame
    pub buttons_pressed: MouseButtons,
    /// Buttons that went up this frame
    pub buttons_released: MouseButtons,
    /// Wheel movement this frame; positive is away from the user
    pub wheel: f32,
    /// Keys held this frame
    pub keys_down: Vec<Key>,
    /// Keys that went down this frame, in map order
    pub keys_pressed: Vec<Key>,
    /// Held modifiers
    pub modifiers: Modifiers,
    /// Caps lock toggle state
    pub caps_lock: bool,
    /// Active input language
    pub language: KeyboardLanguage,
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Window size in pixels
    pub viewport: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer: Vec2::zeros(),
            buttons_down: MouseButtons::empty(),
            buttons_pressed: MouseButtons::empty(),
            buttons_released: MouseButtons::empty(),
            wheel: 0.0,
            keys_down: Vec::new(),
            keys_pressed: Vec::new(),
            modifiers: Modifiers::empty(),
            caps_lock: false,
            language: KeyboardLanguage::English,
            delta_time: 0.0,
            viewport: vec2(1920.0, 1080.0),
        }
    }
}

impl InputState {
    /// Sample every query of `backend` into a snapshot
    pub fn sample(backend: &dyn InputBackend) -> Self {
        let mut buttons_down = MouseButtons::empty();
        let mut buttons_pressed = MouseButtons::empty();
        let mut buttons_released = MouseButtons::empty();
        for button in MouseButtons::all().iter() {
            buttons_down.set(button, backend.is_button_down(button));
            buttons_pressed.set(button, backend.is_button_pressed(button));
            buttons_released.set(button, backend.is_button_released(button));
        }

        Self {
            pointer: backend.pointer_position(),
            buttons_down,
            buttons_pressed,
            buttons_released,
            wheel: backend.wheel_delta(),
            keys_down: Key::all().filter(|key| backend.is_key_down(*key)).collect(),
            keys_pressed: Key::all().filter(|key| backend.is_key_pressed(*key)).collect(),
            modifiers: backend.modifiers(),
            caps_lock: backend.caps_lock(),
            language: backend.keyboard_language(),
            delta_time: backend.delta_time(),
            viewport: backend.viewport_size(),
        }
    }

    /// Copy of this state with all per-frame edges cleared
    pub fn quiet(&self) -> Self {
        Self {
            buttons_pressed: MouseButtons::empty(),
            buttons_released: MouseButtons::empty(),
            wheel: 0.0,
            keys_pressed: Vec::new(),
            ..self.clone()
        }
    }

    /// Returns true if `button` went down this frame
    pub fn pressed(&self, button: MouseButtons) -> bool {
        self.buttons_pressed.contains(button)
    }

    /// Returns true if `button` went up this frame
    pub fn released(&self, button: MouseButtons) -> bool {
        self.buttons_released.contains(button)
    }

    /// Returns true if `key` went down this frame
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Shift held
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Control held
    pub fn control(&self) -> bool {
        self.modifiers.contains(Modifiers::CONTROL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_cover_map_and_editing() {
        let keys: Vec<Key> = Key::all().collect();

        assert_eq!(keys.len(), KEY_MAP.len() + Key::EDITING.len());
        assert!(keys.contains(&Key::Grave));
        assert!(keys.contains(&Key::Backspace));
    }

    #[test]
    fn test_quiet_clears_edges() {
        let state = InputState {
            pointer: vec2(4.0, 5.0),
            buttons_down: MouseButtons::PRIMARY,
            buttons_pressed: MouseButtons::PRIMARY,
            wheel: 1.0,
            keys_pressed: vec![Key::A],
            ..InputState::default()
        };
        let quiet = state.quiet();

        assert_eq!(quiet.pointer, vec2(4.0, 5.0));
        assert_eq!(quiet.buttons_down, MouseButtons::PRIMARY);
        assert!(!quiet.pressed(MouseButtons::PRIMARY));
        assert_eq!(quiet.wheel, 0.0);
        assert!(quiet.keys_pressed.is_empty());
    }
}
