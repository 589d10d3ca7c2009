//! Hit testing for pointer input
//!
//! Determines whether the pointer lies over a resolved node rectangle.
//! Edges count as inside.

use crate::foundation::math::{Rect, Vec2};

/// Check if a point is inside a rectangular region
///
/// # Arguments
/// * `point_x` - X coordinate of the point
/// * `point_y` - Y coordinate of the point
/// * `rect_x` - X coordinate of rectangle's top-left corner
/// * `rect_y` - Y coordinate of rectangle's top-left corner
/// * `rect_width` - Width of the rectangle
/// * `rect_height` - Height of the rectangle
pub fn point_in_rect(point_x: f32, point_y: f32, rect_x: f32, rect_y: f32, rect_width: f32, rect_height: f32) -> bool {
    point_x >= rect_x && point_x <= rect_x + rect_width && point_y >= rect_y && point_y <= rect_y + rect_height
}

/// Check if the pointer lies over a resolved rectangle
pub fn pointer_over(rect: &Rect, pointer: Vec2) -> bool {
    point_in_rect(pointer.x, pointer.y, rect.x, rect.y, rect.width, rect.height)
}
