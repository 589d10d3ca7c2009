//! Text label widget and text fitting

use super::core::{TextAnchor, TextStyle};
use crate::foundation::math::{vec2, Vec2};

/// Static text drawn inside a positioned box
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLabel {
    /// Displayed text
    pub text: String,
    /// Appearance
    pub style: TextStyle,
}

impl TextLabel {
    /// Create a label with the default style
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Replace the style
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

/// Result of fitting text into a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFit {
    /// Offset of the text origin from the box's top-left corner
    pub offset: Vec2,
    /// Chosen text size
    pub size: f32,
}

impl TextFit {
    /// Text smaller than this is not drawn
    pub const MIN_DRAWABLE: f32 = 1.0;

    /// Returns true if the fitted text is large enough to draw
    pub fn is_drawable(&self) -> bool {
        self.size > Self::MIN_DRAWABLE
    }
}

/// Find the largest whole text size that fits `bounds` and place it by `anchor`
///
/// `measure` returns the extent of the text at a given size. The search runs
/// over `[1, max]`, where `max` is `target` or the box height when `target`
/// is `None` or taller than the box. Offsets never go negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn fit_text(mut measure: impl FnMut(f32) -> Vec2, bounds: Vec2, anchor: TextAnchor, target: Option<f32>) -> TextFit {
    let max = match target {
        Some(size) if size >= 0.0 && size <= bounds.y => size,
        _ => bounds.y,
    };

    let mut low = 1_i64;
    let mut high = max.floor() as i64;
    while low < high {
        let middle = (low + high + 1) / 2;
        let extent = measure(middle as f32);
        if extent.x <= bounds.x && extent.y <= bounds.y {
            low = middle;
        } else {
            high = middle - 1;
        }
    }

    let size = (low as f32).min(max.max(0.0));
    let extent = measure(size);
    let anchor = anchor.to_normalized();
    let offset = vec2(
        (anchor.x * (bounds.x - extent.x)).max(0.0),
        (anchor.y * (bounds.y - extent.y)).max(0.0),
    );

    TextFit { offset, size }
}
