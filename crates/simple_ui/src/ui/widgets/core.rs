//! Core UI widget primitives
//!
//! Shared types and structures used by all positioned widgets.

use crate::foundation::math::{vec2, Color, Rect, Vec2};

/// Where fitted text sits inside its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAnchor {
    /// Top edge, centred horizontally
    N,
    /// Top-right corner
    NE,
    /// Right edge, centred vertically
    E,
    /// Bottom-right corner
    SE,
    /// Bottom edge, centred horizontally
    S,
    /// Bottom-left corner
    SW,
    /// Left edge, centred vertically
    W,
    /// Top-left corner
    NW,
    /// Centre of the box
    #[default]
    Center,
}

impl TextAnchor {
    /// Get the normalized anchor position (0.0 to 1.0)
    pub fn to_normalized(self) -> Vec2 {
        match self {
            Self::N => vec2(0.5, 0.0),
            Self::NE => vec2(1.0, 0.0),
            Self::E => vec2(1.0, 0.5),
            Self::SE => vec2(1.0, 1.0),
            Self::S => vec2(0.5, 1.0),
            Self::SW => vec2(0.0, 1.0),
            Self::W => vec2(0.0, 0.5),
            Self::NW => vec2(0.0, 0.0),
            Self::Center => vec2(0.5, 0.5),
        }
    }
}

/// Properties shared by every positioned node
///
/// Position, size and anchor are normalized to the parent: a size of
/// `(0.5, 0.5)` covers half of the parent in each axis, and an anchor of
/// `(0.5, 0.5)` places `position` at the node's centre. Values outside
/// `[0, 1]` are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual2D {
    /// Normalized position of the anchor point
    pub position: Vec2,
    /// Normalized size
    pub size: Vec2,
    /// Normalized anchor offset within the node
    pub anchor: Vec2,
    /// Hidden nodes are neither drawn, picked nor descended into
    pub visible: bool,
    /// Only active nodes can become the topmost interactive node
    pub active: bool,
    /// Draw and pick order among siblings (higher = on top)
    pub z_index: i32,
    /// Fill colour
    pub background: Color,
    /// Fill transparency in `[0, 1]`
    pub background_transparency: f32,
    /// Outline colour
    pub border_color: Color,
    /// Outline thickness in pixels; zero disables the outline
    pub border_thickness: f32,
    /// Outline transparency in `[0, 1]`
    pub border_transparency: f32,
    /// Corner roundness in `[0, 1]`
    pub roundness: f32,
    /// Segments per rounded corner
    pub segments: u32,
    pub(crate) absolute: Rect,
}

impl Default for Visual2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            size: Vec2::zeros(),
            anchor: Vec2::zeros(),
            visible: true,
            active: false,
            z_index: 0,
            background: Color::BLACK,
            background_transparency: 0.0,
            border_color: Color::BLACK,
            border_thickness: 0.0,
            border_transparency: 0.0,
            roundness: 0.0,
            segments: 5,
            absolute: Rect::ZERO,
        }
    }
}

impl Visual2D {
    /// Create a visual at `position` with the given `size`
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..Self::default()
        }
    }

    /// Create a visual covering its whole parent
    pub fn fill() -> Self {
        Self::new(Vec2::zeros(), vec2(1.0, 1.0))
    }

    /// Set the anchor offset
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the z-index
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set interactivity
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the fill colour and its transparency
    pub fn with_background(mut self, color: Color, transparency: f32) -> Self {
        self.background = color;
        self.background_transparency = transparency;
        self
    }

    /// Set the outline
    pub fn with_border(mut self, color: Color, thickness: f32) -> Self {
        self.border_color = color;
        self.border_thickness = thickness;
        self
    }

    /// Set corner rounding
    pub fn with_roundness(mut self, roundness: f32, segments: u32) -> Self {
        self.roundness = roundness;
        self.segments = segments;
        self
    }

    /// Top-left corner in the parent's normalized space
    pub fn local_origin(&self) -> Vec2 {
        self.position - self.anchor.component_mul(&self.size)
    }

    /// Absolute rectangle resolved during the most recent frame
    pub fn absolute_rect(&self) -> Rect {
        self.absolute
    }

    /// Fill colour with transparency applied
    pub fn fill_color(&self) -> Color {
        self.background.with_transparency(self.background_transparency)
    }

    /// Outline colour with transparency applied
    pub fn outline_color(&self) -> Color {
        self.border_color.with_transparency(self.border_transparency)
    }
}

/// Text appearance shared by labels and text boxes
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text colour
    pub color: Color,
    /// Text transparency in `[0, 1]`
    pub transparency: f32,
    /// Placement of the fitted text inside the box
    pub anchor: TextAnchor,
    /// Largest size to fit; `None` fits to the box height
    pub size: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            transparency: 0.0,
            anchor: TextAnchor::Center,
            size: Some(10.0),
        }
    }
}

impl TextStyle {
    /// Style with a target text size
    pub fn sized(size: f32) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// Style that grows text to the box height
    pub fn auto_fit() -> Self {
        Self {
            size: None,
            ..Self::default()
        }
    }

    /// Set the text colour
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the text anchor
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Text colour with transparency applied
    pub fn draw_color(&self) -> Color {
        self.color.with_transparency(self.transparency)
    }
}
