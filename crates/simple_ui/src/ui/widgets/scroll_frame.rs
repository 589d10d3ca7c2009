//! Scrollable viewport widget
//!
//! A scroll frame shows a window onto a virtual canvas measured in
//! viewport units: a canvas size of `(1, 3)` is three viewports tall, and
//! a canvas position of `(0, 2)` shows its last third.

use crate::config::ScrollConfig;
use crate::foundation::math::{vec2, Color, Rect, Vec2};

/// Axes the wheel scrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollAxis {
    /// Wheel scrolls vertically
    #[default]
    Vertical,
    /// Wheel scrolls horizontally
    Horizontal,
    /// Wheel scrolls vertically, or horizontally while shift is held
    Both,
}

/// Virtual canvas size and position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    canvas_size: Vec2,
    canvas_position: Vec2,
    /// Axes the wheel scrolls
    pub axis: ScrollAxis,
    /// Canvas units moved per wheel notch
    pub speed: f32,
    /// Wheel input is ignored while false
    pub enabled: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ScrollState {
    /// Create a one-viewport canvas
    pub fn new(speed: f32) -> Self {
        Self {
            canvas_size: vec2(1.0, 1.0),
            canvas_position: Vec2::zeros(),
            axis: ScrollAxis::Vertical,
            speed,
            enabled: true,
        }
    }

    /// Canvas size in viewport units (at least 1 per axis)
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Canvas position in viewport units
    pub fn canvas_position(&self) -> Vec2 {
        self.canvas_position
    }

    /// Resize the canvas; the position is re-clamped
    pub fn set_canvas_size(&mut self, size: Vec2) {
        self.canvas_size = size;
        self.clamp();
    }

    /// Move the canvas, clamped to `[0, size - 1]`
    pub fn set_canvas_position(&mut self, position: Vec2) {
        self.canvas_position = position;
        self.clamp();
    }

    /// Enforce `size >= 1` and `0 <= position <= size - 1` per axis
    pub fn clamp(&mut self) {
        self.canvas_size.x = self.canvas_size.x.max(1.0);
        self.canvas_size.y = self.canvas_size.y.max(1.0);
        self.canvas_position.x = self.canvas_position.x.clamp(0.0, self.canvas_size.x - 1.0);
        self.canvas_position.y = self.canvas_position.y.clamp(0.0, self.canvas_size.y - 1.0);
    }

    /// Apply one frame of wheel movement
    ///
    /// Positive deltas scroll toward the start of the canvas. Returns true
    /// if the position changed.
    pub fn apply_wheel(&mut self, delta: f32, shift: bool) -> bool {
        if !self.enabled || delta == 0.0 {
            return false;
        }
        let horizontal = match self.axis {
            ScrollAxis::Vertical => false,
            ScrollAxis::Horizontal => true,
            ScrollAxis::Both => shift,
        };
        let step = if delta > 0.0 { -self.speed } else { self.speed };
        let before = self.canvas_position;
        if horizontal {
            self.canvas_position.x += step;
        } else {
            self.canvas_position.y += step;
        }
        self.clamp();
        self.canvas_position != before
    }
}

/// Scroll frame widget payload
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    /// Canvas state
    pub scroll: ScrollState,
    /// Clip descendants to the frame
    pub clip: bool,
    /// Slider colour
    pub slider_color: Color,
    /// Slider transparency in `[0, 1]`
    pub slider_transparency: f32,
    /// Slider thickness in pixels
    pub slider_size: f32,
}

impl ScrollFrame {
    /// Create a scroll frame from the scroll defaults
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            scroll: ScrollState::new(config.scroll_speed),
            clip: true,
            slider_color: config.slider_color,
            slider_transparency: config.slider_transparency,
            slider_size: config.slider_size,
        }
    }

    /// Set the canvas size
    pub fn with_canvas_size(mut self, size: Vec2) -> Self {
        self.scroll.set_canvas_size(size);
        self
    }

    /// Set the scroll axis
    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.scroll.axis = axis;
        self
    }

    /// Slider line segments for a frame drawn at `rect`
    ///
    /// Each slider spans `1 / canvas_size` of the frame along its axis and
    /// sits at `canvas_position / (canvas_size - 1)` of the free track.
    pub fn slider_segments(&self, rect: Rect) -> Vec<(Vec2, Vec2)> {
        let mut segments = Vec::new();
        if self.slider_transparency >= 1.0 || self.slider_size <= 0.0 {
            return segments;
        }
        let size = self.scroll.canvas_size();
        let position = self.scroll.canvas_position();
        let inset = self.slider_size * 0.6;

        if size.y > 1.0 && matches!(self.scroll.axis, ScrollAxis::Vertical | ScrollAxis::Both) {
            let length = rect.height / size.y;
            let y = rect.y + (rect.height - length) * (position.y / (size.y - 1.0));
            let x = rect.right() - inset;
            segments.push((vec2(x, y), vec2(x, y + length)));
        }
        if size.x > 1.0 && matches!(self.scroll.axis, ScrollAxis::Horizontal | ScrollAxis::Both) {
            let length = rect.width / size.x;
            let x = rect.x + (rect.width - length) * (position.x / (size.x - 1.0));
            let y = rect.bottom() - inset;
            segments.push((vec2(x, y), vec2(x + length, y)));
        }
        segments
    }

    /// Slider colour with transparency applied
    pub fn slider_draw_color(&self) -> Color {
        self.slider_color.with_transparency(self.slider_transparency)
    }
}

impl Default for ScrollFrame {
    fn default() -> Self {
        Self::new(&ScrollConfig::default())
    }
}
