//! Math utilities and types
//!
//! Provides the 2D math types the UI works in: normalized vectors, pixel
//! rectangles and 8-bit colours.

use serde::{Deserialize, Serialize};

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Shorthand constructor for a [`Vec2`]
#[inline]
#[must_use]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Axis-aligned rectangle in pixel space (top-left origin)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a position and a size
    #[must_use]
    pub fn from_pos_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Top-left corner
    #[must_use]
    pub fn position(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    /// Width and height
    #[must_use]
    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    /// Right edge
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point lies inside the rectangle, edges included
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Returns true if the rectangle (grown by `margin`) misses the
    /// `[0, width] x [0, height]` viewport entirely
    #[must_use]
    pub fn is_outside_viewport(&self, viewport: Vec2, margin: f32) -> bool {
        self.x + self.width + margin < 0.0
            || self.x - margin > viewport.x
            || self.y + self.height + margin < 0.0
            || self.y - margin > viewport.y
    }
}

/// RGBA colour with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent
    pub const BLANK: Self = Self::rgba(0, 0, 0, 0);
    /// Mid grey used for placeholder text
    pub const PLACEHOLDER: Self = Self::rgb(150, 150, 150);

    /// Create an opaque colour
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a colour with explicit alpha
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale alpha by `1 - transparency`
    ///
    /// Transparency outside `[0, 1]` is clamped.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_transparency(self, transparency: f32) -> Self {
        let opacity = 1.0 - transparency.clamp(0.0, 1.0);
        Self {
            a: (f32::from(self.a) * opacity) as u8,
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    #[must_use]
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(vec2(10.0, 20.0)));
        assert!(rect.contains(vec2(110.0, 70.0)));
        assert!(rect.contains(vec2(50.0, 30.0)));
        assert!(!rect.contains(vec2(5.0, 30.0)));
        assert!(!rect.contains(vec2(50.0, 71.0)));
    }

    #[test]
    fn test_rect_outside_viewport() {
        let viewport = vec2(800.0, 600.0);

        assert!(!Rect::new(0.0, 0.0, 100.0, 100.0).is_outside_viewport(viewport, 0.0));
        assert!(Rect::new(-300.0, 0.0, 100.0, 100.0).is_outside_viewport(viewport, 0.0));
        assert!(Rect::new(0.0, 900.0, 100.0, 100.0).is_outside_viewport(viewport, 0.0));
        assert!(!Rect::new(-105.0, 0.0, 100.0, 100.0).is_outside_viewport(viewport, 10.0));
    }

    #[test]
    fn test_rect_outside_far_edges() {
        let viewport = vec2(800.0, 600.0);

        assert!(Rect::new(850.0, 0.0, 100.0, 100.0).is_outside_viewport(viewport, 0.0));
        assert!(!Rect::new(850.0, 0.0, 100.0, 100.0).is_outside_viewport(viewport, 60.0));
        assert!(!Rect::new(800.0, 0.0, 100.0, 100.0).is_outside_viewport(viewport, 0.0));
        assert!(Rect::new(0.0, 650.0, 100.0, 100.0).is_outside_viewport(viewport, 0.0));
        assert!(!Rect::new(0.0, 640.0, 100.0, 100.0).is_outside_viewport(viewport, 50.0));
    }

    #[test]
    fn test_color_transparency() {
        assert_eq!(Color::WHITE.with_transparency(0.0).a, 255);
        assert_eq!(Color::WHITE.with_transparency(1.0).a, 0);
        assert_eq!(Color::rgba(10, 20, 30, 200).with_transparency(0.5), Color::rgba(10, 20, 30, 100));
        assert_eq!(Color::WHITE.with_transparency(-3.0).a, 255);
    }
}
