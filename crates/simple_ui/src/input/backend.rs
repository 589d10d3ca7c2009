//! Input backend trait
//!
//! Defines the interface between the UI and the platform event pump.
//! Keeps the UI independent of any windowing library.

use std::collections::VecDeque;

use super::{InputState, Key, KeyboardLanguage, Modifiers, MouseButtons};
use crate::foundation::math::{vec2, Vec2};

/// Platform input queries consumed once per tick
pub trait InputBackend {
    /// Pump platform events for a new frame
    ///
    /// Returns false once the window has been asked to close.
    fn poll_events(&mut self) -> bool;

    /// Pointer position in pixels
    fn pointer_position(&self) -> Vec2;

    /// Button held this frame
    fn is_button_down(&self, button: MouseButtons) -> bool;

    /// Button went down this frame
    fn is_button_pressed(&self, button: MouseButtons) -> bool;

    /// Button went up this frame
    fn is_button_released(&self, button: MouseButtons) -> bool;

    /// Wheel movement this frame
    fn wheel_delta(&self) -> f32;

    /// Key held this frame
    fn is_key_down(&self, key: Key) -> bool;

    /// Key went down this frame
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Held modifiers
    fn modifiers(&self) -> Modifiers;

    /// Seconds since the previous frame
    fn delta_time(&self) -> f32;

    /// Window size in pixels
    fn viewport_size(&self) -> Vec2;

    /// Active keyboard input language
    fn keyboard_language(&self) -> KeyboardLanguage;

    /// Caps lock toggle state
    fn caps_lock(&self) -> bool;
}

/// In-memory input backend that replays queued frames
///
/// Each call to [`InputBackend::poll_events`] advances to the next queued
/// frame and returns false once the script is exhausted. Builder helpers
/// queue frames that carry held state (pointer, held buttons, language)
/// over from the previous one.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    current: InputState,
    queue: VecDeque<InputState>,
    frame_time: f32,
}

impl ScriptedInput {
    /// Create a script for a window of the given pixel size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            current: InputState {
                viewport: vec2(width, height),
                ..InputState::default()
            },
            queue: VecDeque::new(),
            frame_time: 1.0 / 60.0,
        }
    }

    /// Set the delta time reported by frames queued after this call
    pub fn with_frame_time(mut self, seconds: f32) -> Self {
        self.frame_time = seconds;
        self
    }

    /// Frame currently being reported
    pub fn current(&self) -> &InputState {
        &self.current
    }

    /// Number of frames still queued
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Queue a fully specified frame
    pub fn push_frame(&mut self, frame: InputState) -> &mut Self {
        self.queue.push_back(frame);
        self
    }

    /// Queue a frame derived from the last queued one with edges cleared
    pub fn frame(&mut self, edit: impl FnOnce(&mut InputState)) -> &mut Self {
        let mut next = self.queue.back().unwrap_or(&self.current).quiet();
        next.delta_time = self.frame_time;
        edit(&mut next);
        self.push_frame(next)
    }

    /// Queue `count` frames with no new input
    pub fn idle(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.frame(|_| {});
        }
        self
    }

    /// Queue a pointer move
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.frame(|f| f.pointer = vec2(x, y))
    }

    /// Queue a button press at the current pointer position
    pub fn press(&mut self, button: MouseButtons) -> &mut Self {
        self.frame(|f| {
            f.buttons_down.insert(button);
            f.buttons_pressed.insert(button);
        })
    }

    /// Queue a button release at the current pointer position
    pub fn release(&mut self, button: MouseButtons) -> &mut Self {
        self.frame(|f| {
            f.buttons_down.remove(button);
            f.buttons_released.insert(button);
        })
    }

    /// Queue a move followed by a press and a release
    pub fn click_at(&mut self, x: f32, y: f32, button: MouseButtons) -> &mut Self {
        self.move_to(x, y).press(button).release(button)
    }

    /// Queue a wheel movement
    pub fn scroll(&mut self, delta: f32) -> &mut Self {
        self.frame(|f| f.wheel = delta)
    }

    /// Queue a single key press with the given modifiers held
    pub fn key(&mut self, key: Key, modifiers: Modifiers) -> &mut Self {
        self.frame(|f| {
            f.modifiers = modifiers;
            f.keys_pressed = vec![key];
            f.keys_down = vec![key];
        })
        .frame(|f| {
            f.modifiers = Modifiers::empty();
            f.keys_down.clear();
        })
    }

    /// Queue one key press per key
    pub fn type_keys(&mut self, keys: &[Key]) -> &mut Self {
        for key in keys {
            self.key(*key, Modifiers::empty());
        }
        self
    }

    /// Change the reported input language for subsequent frames
    pub fn language(&mut self, language: KeyboardLanguage) -> &mut Self {
        self.frame(|f| f.language = language)
    }

    /// Toggle caps lock for subsequent frames
    pub fn caps_lock(&mut self, on: bool) -> &mut Self {
        self.frame(|f| f.caps_lock = on)
    }

    /// Resize the reported window for subsequent frames
    pub fn resize(&mut self, width: f32, height: f32) -> &mut Self {
        self.frame(|f| f.viewport = vec2(width, height))
    }
}

impl InputBackend for ScriptedInput {
    fn poll_events(&mut self) -> bool {
        match self.queue.pop_front() {
            Some(frame) => {
                self.current = frame;
                true
            }
            None => {
                self.current = self.current.quiet();
                false
            }
        }
    }

    fn pointer_position(&self) -> Vec2 {
        self.current.pointer
    }

    fn is_button_down(&self, button: MouseButtons) -> bool {
        self.current.buttons_down.contains(button)
    }

    fn is_button_pressed(&self, button: MouseButtons) -> bool {
        self.current.buttons_pressed.contains(button)
    }

    fn is_button_released(&self, button: MouseButtons) -> bool {
        self.current.buttons_released.contains(button)
    }

    fn wheel_delta(&self) -> f32 {
        self.current.wheel
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.current.keys_down.contains(&key)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.current.keys_pressed.contains(&key)
    }

    fn modifiers(&self) -> Modifiers {
        self.current.modifiers
    }

    fn delta_time(&self) -> f32 {
        self.current.delta_time
    }

    fn viewport_size(&self) -> Vec2 {
        self.current.viewport
    }

    fn keyboard_language(&self) -> KeyboardLanguage {
        self.current.language
    }

    fn caps_lock(&self) -> bool {
        self.current.caps_lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_replays_in_order() {
        let mut input = ScriptedInput::new(800.0, 600.0);
        input.click_at(10.0, 20.0, MouseButtons::PRIMARY);
        assert_eq!(input.remaining(), 3);

        assert!(input.poll_events());
        assert_eq!(input.pointer_position(), vec2(10.0, 20.0));
        assert!(!input.is_button_down(MouseButtons::PRIMARY));

        assert!(input.poll_events());
        assert!(input.is_button_pressed(MouseButtons::PRIMARY));
        assert!(input.is_button_down(MouseButtons::PRIMARY));

        assert!(input.poll_events());
        assert!(input.is_button_released(MouseButtons::PRIMARY));
        assert!(!input.is_button_down(MouseButtons::PRIMARY));

        assert!(!input.poll_events());
        assert!(!input.is_button_released(MouseButtons::PRIMARY));
        assert_eq!(input.pointer_position(), vec2(10.0, 20.0));
    }

    #[test]
    fn test_sample_snapshot() {
        let mut input = ScriptedInput::new(800.0, 600.0);
        input.key(Key::A, Modifiers::SHIFT);
        input.poll_events();

        let state = InputState::sample(&input);
        assert_eq!(state.keys_pressed, vec![Key::A]);
        assert!(state.shift());
        assert_eq!(state.viewport, vec2(800.0, 600.0));
    }
}
