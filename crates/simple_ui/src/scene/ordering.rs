//! Sibling draw order

use crate::foundation::collections::NodeId;

use super::SceneTree;

/// Sort key: non-positioned nodes first, then positioned nodes by z-index
fn sort_key(tree: &SceneTree, id: NodeId) -> (u8, i32) {
    match tree.get(id).and_then(|node| node.z_index()) {
        Some(z_index) => (1, z_index),
        None => (0, 0),
    }
}

/// Stable-sort `parent`'s children by z-index and clear the dirty flag
///
/// Siblings with equal keys keep their insertion order, so later
/// siblings still draw on top of earlier ones.
pub fn sort_children(tree: &mut SceneTree, parent: NodeId) {
    let Some(node) = tree.get(parent) else {
        return;
    };
    let mut keyed: Vec<((u8, i32), NodeId)> = node
        .children
        .iter()
        .map(|&child| (sort_key(tree, child), child))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);

    if let Some(node) = tree.get_mut(parent) {
        node.children = keyed.into_iter().map(|(_, child)| child).collect();
        node.children_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeKind, Value};
    use crate::ui::widgets::Visual2D;

    fn framed(tree: &mut SceneTree, parent: NodeId, z_index: i32) -> NodeId {
        let id = tree.create(NodeKind::frame(Visual2D::fill()), Some(parent));
        tree.set_z_index(id, z_index);
        id
    }

    #[test]
    fn test_sort_by_z_index() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let high = framed(&mut tree, root, 5);
        let low = framed(&mut tree, root, -2);
        let mid = framed(&mut tree, root, 0);

        sort_children(&mut tree, root);
        assert_eq!(tree.children(root), &[low, mid, high]);
        assert!(!tree.get(root).unwrap().children_dirty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let first = framed(&mut tree, root, 1);
        let second = framed(&mut tree, root, 1);
        let third = framed(&mut tree, root, 1);

        sort_children(&mut tree, root);
        assert_eq!(tree.children(root), &[first, second, third]);
    }

    #[test]
    fn test_non_positioned_sort_first() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let negative = framed(&mut tree, root, -10);
        let value = tree.create(NodeKind::value(Value::Int(3)), Some(root));
        let folder = tree.create(NodeKind::Folder, Some(root));

        sort_children(&mut tree, root);
        assert_eq!(tree.children(root), &[value, folder, negative]);
    }
}
