//! Topmost-node picking
//!
//! Runs once per frame before any node handles events. Every visible,
//! active positioned node under the pointer is a candidate; the one with
//! the highest z-index wins, and on equal z-index the one found later in
//! draw order wins.

use crate::foundation::collections::NodeId;
use crate::foundation::math::Vec2;
use crate::input::collision;
use crate::scene::SceneTree;
use crate::ui::layout::ChildTransform;

struct Pick {
    viewport: Vec2,
    pointer: Vec2,
    best: Option<(i32, NodeId)>,
}

/// Find the single node that receives pointer events this frame
///
/// `root` itself is never a candidate. Invisible subtrees are skipped,
/// while inactive containers are still searched for active descendants.
/// Children of a clipping scroll frame are only reachable inside it.
pub fn find_topmost(tree: &mut SceneTree, root: NodeId, viewport: Vec2, pointer: Vec2) -> Option<NodeId> {
    let mut pick = Pick {
        viewport,
        pointer,
        best: None,
    };
    let transform = crate::ui::layout::inherited_transform(tree, root);
    let inner = tree.get(root).map_or(transform, |node| transform.for_children(node));
    visit_children(tree, root, inner, &mut pick);
    pick.best.map(|(_, id)| id)
}

fn visit_children(tree: &mut SceneTree, parent: NodeId, transform: ChildTransform, pick: &mut Pick) {
    tree.ensure_children_sorted(parent);
    for child in tree.children(parent).to_vec() {
        visit(tree, child, transform, pick);
    }
}

fn visit(tree: &mut SceneTree, id: NodeId, transform: ChildTransform, pick: &mut Pick) {
    let Some(node) = tree.get(id) else {
        return;
    };

    if let Some(segment) = node.line() {
        if segment.visible {
            visit_children(tree, id, transform, pick);
        }
        return;
    }

    let Some(visual) = node.visual() else {
        let inner = transform.for_children(node);
        visit_children(tree, id, inner, pick);
        return;
    };
    if !visual.visible {
        return;
    }

    let over = transform
        .place(node)
        .map(|(position, size)| crate::ui::layout::to_pixels(position, size, pick.viewport))
        .is_some_and(|rect| collision::pointer_over(&rect, pick.pointer));

    if over && visual.active && pick.best.map_or(true, |(z_index, _)| visual.z_index >= z_index) {
        pick.best = Some((visual.z_index, id));
    }

    let clipped = node.scroll_frame().is_some_and(|frame| frame.clip);
    if clipped && !over {
        return;
    }

    let inner = transform.for_children(node);
    visit_children(tree, id, inner, pick);
}
