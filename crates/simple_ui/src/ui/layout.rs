//! Layout resolution
//!
//! Positions and sizes are fractions of the parent's resolved rectangle,
//! composed multiplicatively up the chain of positioned ancestors until a
//! layout boundary (or the top of the tree) is reached, then scaled by the
//! viewport's pixel size.

use crate::foundation::collections::NodeId;
use crate::foundation::math::{vec2, Rect, Vec2};
use crate::scene::{Node, SceneTree};

/// Normalized placement applied to a node's children
///
/// A child at local position `p` lands at `offset + scale * p` in
/// viewport-normalized space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildTransform {
    /// Translation in viewport-normalized units
    pub offset: Vec2,
    /// Per-axis scale in viewport-normalized units
    pub scale: Vec2,
}

impl Default for ChildTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ChildTransform {
    /// Whole-viewport placement
    pub const IDENTITY: ChildTransform = ChildTransform {
        offset: Vec2::new(0.0, 0.0),
        scale: Vec2::new(1.0, 1.0),
    };

    /// Map a local point into viewport-normalized space
    pub fn apply_point(&self, point: Vec2) -> Vec2 {
        self.offset + self.scale.component_mul(&point)
    }

    /// Normalized rectangle of `node` under this transform
    pub fn place(&self, node: &Node) -> Option<(Vec2, Vec2)> {
        let visual = node.visual()?;
        let position = self.apply_point(visual.local_origin());
        let size = self.scale.component_mul(&visual.size);
        Some((position, size))
    }

    /// Transform that `node`'s children inherit
    ///
    /// Layout boundaries restart their children at the whole viewport;
    /// non-positioned nodes pass the transform through unchanged.
    pub fn for_children(&self, node: &Node) -> ChildTransform {
        if node.is_layout_boundary() {
            return Self::IDENTITY;
        }
        let Some((position, size)) = self.place(node) else {
            return *self;
        };
        let canvas = node
            .scroll_frame()
            .map_or_else(|| vec2(0.0, 0.0), |frame| frame.scroll.canvas_position());
        ChildTransform {
            offset: position - size.component_mul(&canvas),
            scale: size,
        }
    }
}

/// Transform inherited by `id` from its ancestors
pub fn inherited_transform(tree: &SceneTree, id: NodeId) -> ChildTransform {
    let mut chain = Vec::new();
    let mut current = tree.parent(id);
    while let Some(ancestor) = current {
        let Some(node) = tree.get(ancestor) else {
            break;
        };
        if node.is_layout_boundary() {
            break;
        }
        chain.push(ancestor);
        current = node.parent();
    }

    chain
        .iter()
        .rev()
        .filter_map(|&ancestor| tree.get(ancestor))
        .fold(ChildTransform::IDENTITY, |transform, node| transform.for_children(node))
}

/// Absolute pixel rectangle of a positioned node
pub fn resolve_rect(tree: &SceneTree, id: NodeId, viewport: Vec2) -> Option<Rect> {
    let node = tree.get(id)?;
    let (position, size) = inherited_transform(tree, id).place(node)?;
    Some(to_pixels(position, size, viewport))
}

/// Absolute pixel endpoints of a line, resolved through its parent chain
pub fn resolve_line(tree: &SceneTree, id: NodeId, viewport: Vec2) -> Option<(Vec2, Vec2)> {
    let segment = tree.get(id)?.line()?;
    let transform = inherited_transform(tree, id);
    Some((
        transform.apply_point(segment.from).component_mul(&viewport),
        transform.apply_point(segment.to).component_mul(&viewport),
    ))
}

pub(crate) fn to_pixels(position: Vec2, size: Vec2, viewport: Vec2) -> Rect {
    Rect::from_pos_size(position.component_mul(&viewport), size.component_mul(&viewport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrollConfig;
    use crate::scene::{LineSegment, NodeKind};
    use crate::ui::widgets::{ScrollFrame, Visual2D};
    use approx::assert_relative_eq;

    const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

    fn half(tree: &mut SceneTree, parent: NodeId) -> NodeId {
        tree.create(
            NodeKind::frame(Visual2D::new(vec2(0.0, 0.0), vec2(0.5, 0.5))),
            Some(parent),
        )
    }

    #[test]
    fn test_nested_sizes_multiply() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::frame(Visual2D::fill()));
        let a = half(&mut tree, root);
        let b = half(&mut tree, a);
        let c = half(&mut tree, b);

        let rect = resolve_rect(&tree, c, VIEWPORT).unwrap();
        assert_relative_eq!(rect.width, 1920.0 * 0.125);
        assert_relative_eq!(rect.height, 1080.0 * 0.125);
    }

    #[test]
    fn test_position_and_anchor_compose() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let panel = tree.create(
            NodeKind::frame(Visual2D::new(vec2(0.5, 0.5), vec2(0.5, 0.5))),
            Some(root),
        );
        let centred = tree.create(
            NodeKind::frame(Visual2D::new(vec2(0.5, 0.5), vec2(0.5, 0.5)).with_anchor(vec2(0.5, 0.5))),
            Some(panel),
        );

        let rect = resolve_rect(&tree, centred, VIEWPORT).unwrap();
        assert_relative_eq!(rect.x, 1920.0 * 0.625);
        assert_relative_eq!(rect.y, 1080.0 * 0.625);
        assert_relative_eq!(rect.width, 1920.0 * 0.25);
    }

    #[test]
    fn test_negative_and_oversized_values() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let node = tree.create(
            NodeKind::frame(Visual2D::new(vec2(-0.5, 0.0), vec2(2.0, 1.0))),
            Some(root),
        );

        let rect = resolve_rect(&tree, node, VIEWPORT).unwrap();
        assert_relative_eq!(rect.x, -960.0);
        assert_relative_eq!(rect.width, 3840.0);
    }

    #[test]
    fn test_boundary_restarts_composition() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let outer = half(&mut tree, root);
        let inner = half(&mut tree, outer);
        tree.set_layout_boundary(outer, true);

        let rect = resolve_rect(&tree, inner, VIEWPORT).unwrap();
        assert_relative_eq!(rect.width, 960.0);
    }

    #[test]
    fn test_folders_pass_through() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let outer = half(&mut tree, root);
        let folder = tree.create(NodeKind::Folder, Some(outer));
        let inner = half(&mut tree, folder);

        let rect = resolve_rect(&tree, inner, VIEWPORT).unwrap();
        assert_relative_eq!(rect.width, 480.0);
    }

    #[test]
    fn test_scroll_offset_shifts_children() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let frame = ScrollFrame::new(&ScrollConfig::default()).with_canvas_size(vec2(1.0, 3.0));
        let scroller = tree.create(NodeKind::scroll_frame(Visual2D::fill(), frame), Some(root));
        let child = tree.create(
            NodeKind::frame(Visual2D::new(vec2(0.0, 1.0), vec2(1.0, 1.0))),
            Some(scroller),
        );

        if let Some(frame) = tree.get_mut(scroller).and_then(|node| node.scroll_frame_mut()) {
            frame.scroll.set_canvas_position(vec2(0.0, 1.0));
        }

        let rect = resolve_rect(&tree, child, VIEWPORT).unwrap();
        assert_relative_eq!(rect.y, 0.0);
    }

    #[test]
    fn test_line_endpoints_use_parent() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let panel = tree.create(
            NodeKind::frame(Visual2D::new(vec2(0.5, 0.0), vec2(0.5, 0.5))),
            Some(root),
        );
        let line = tree.create(
            NodeKind::line(LineSegment::new(vec2(0.0, 0.0), vec2(1.0, 1.0))),
            Some(panel),
        );

        let (from, to) = resolve_line(&tree, line, VIEWPORT).unwrap();
        assert_relative_eq!(from.x, 960.0);
        assert_relative_eq!(to.x, 1920.0);
        assert_relative_eq!(to.y, 540.0);
    }

    #[test]
    fn test_non_visual_has_no_rect() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        assert!(resolve_rect(&tree, root, VIEWPORT).is_none());
    }
}
