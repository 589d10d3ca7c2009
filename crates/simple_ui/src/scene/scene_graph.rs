//! Scene tree arena
//!
//! Owns every node and the parent/child links between them. Nodes are
//! addressed by [`NodeId`] handles that stay valid until the node is
//! deleted; a deleted handle simply stops resolving.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::collections::{NodeId, NodeMap};
use crate::foundation::math::Vec2;
use crate::ui::backend::TextureId;
use crate::ui::input::PointerEventKind;
use crate::ui::widgets::Visual2D;

use super::node::{Node, NodeCallback, NodeClass, NodeKind};
use super::ordering;

/// Frame timing visible to node callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Frames per second over the previous frame
    pub fps: f32,
    /// Window size in pixels
    pub viewport: Vec2,
    /// Frames run so far
    pub frame: u64,
}

impl Default for FrameInfo {
    fn default() -> Self {
        Self {
            delta_time: 0.0,
            fps: 0.0,
            viewport: Vec2::zeros(),
            frame: 0,
        }
    }
}

/// Arena of nodes forming one or more trees
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: NodeMap<Node>,
    released_textures: Vec<TextureId>,
    frame: FrameInfo,
}

impl SceneTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parentless node that ends layout composition
    ///
    /// Descendants resolve their rectangles relative to the whole window
    /// rather than to this node.
    pub fn create_root(&mut self, kind: NodeKind) -> NodeId {
        let mut node = Node::new(kind);
        node.layout_boundary = true;
        self.nodes.insert(node)
    }

    /// Create a node, appended to `parent` when given
    pub fn create(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.insert(Node::new(kind));
        if let Some(parent) = parent {
            self.attach(id, parent);
        }
        id
    }

    /// Create a named node under `parent`
    pub fn create_named(&mut self, kind: NodeKind, name: impl Into<String>, parent: NodeId) -> NodeId {
        let id = self.create(kind, Some(parent));
        if let Some(node) = self.nodes.get_mut(id) {
            node.name = name.into();
        }
        id
    }

    /// Look up a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether `id` still refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of `id` in current order; empty for unknown handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Type tag of `id`
    pub fn class(&self, id: NodeId) -> Option<NodeClass> {
        self.nodes.get(id).map(Node::class)
    }

    /// Positioned properties of `id`
    pub fn visual(&self, id: NodeId) -> Option<&Visual2D> {
        self.nodes.get(id).and_then(Node::visual)
    }

    /// Mutable positioned properties of `id`
    ///
    /// Use [`set_z_index`](Self::set_z_index) to change draw order.
    pub fn visual_mut(&mut self, id: NodeId) -> Option<&mut Visual2D> {
        self.nodes.get_mut(id).and_then(Node::visual_mut)
    }

    /// Set the z-index of a positioned node or line and re-sort its siblings
    pub fn set_z_index(&mut self, id: NodeId, z_index: i32) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if let Some(visual) = node.visual_mut() {
            visual.z_index = z_index;
        } else if let Some(segment) = node.line_mut() {
            segment.z_index = z_index;
        } else {
            return;
        }
        if let Some(parent) = node.parent {
            self.mark_children_dirty(parent);
        }
    }

    /// Make layout composition stop (or not) at `id`
    pub fn set_layout_boundary(&mut self, id: NodeId, boundary: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.layout_boundary = boundary;
        }
    }

    /// Attach `child` as the last child of `parent`
    ///
    /// The child is first detached from its current parent. Attaching a
    /// node to itself or to one of its own descendants does nothing.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        if child == parent || !self.contains(child) || !self.contains(parent) {
            return;
        }
        if self.is_ancestor_of(child, parent) {
            log::warn!("Refusing to attach {child:?} under its own descendant {parent:?}");
            return;
        }

        self.detach(child);

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
            node.children_dirty = true;
        }
        self.fire_child_hook(parent, child, true);
    }

    /// Detach `child` from its parent; parentless nodes are left alone
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&id| id != child);
            node.children_dirty = true;
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        self.fire_child_hook(parent, child, false);
    }

    /// First direct child of `parent` named `name`
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.nodes.get(id).is_some_and(|node| node.name == name))
    }

    /// First direct child of `parent` with the given class
    pub fn find_child_of_class(&self, parent: NodeId, class: NodeClass) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.class(id) == Some(class))
    }

    /// Whether `ancestor` lies strictly above `node`
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `node` lies strictly below `ancestor`
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.is_ancestor_of(ancestor, node)
    }

    /// Whether `id` and every ancestor are visible
    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(node_id) else {
                return false;
            };
            let visible = match (node.visual(), node.line()) {
                (Some(visual), _) => visual.visible,
                (None, Some(segment)) => segment.visible,
                (None, None) => true,
            };
            if !visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Flag `parent`'s children for re-sorting
    pub fn mark_children_dirty(&mut self, parent: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children_dirty = true;
        }
    }

    /// Re-sort `parent`'s children by z-index if they are flagged
    pub fn ensure_children_sorted(&mut self, parent: NodeId) {
        if self.nodes.get(parent).is_some_and(|node| node.children_dirty) {
            ordering::sort_children(self, parent);
        }
    }

    /// Run `callback` every frame while `id` is traversed
    pub fn set_on_tick(&mut self, id: NodeId, callback: impl FnMut(&mut SceneTree, NodeId) + 'static) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hooks.on_tick = Some(Rc::new(RefCell::new(callback)));
        }
    }

    /// Run `callback(tree, parent, child)` whenever a child is attached to `id`
    pub fn on_child_added(&mut self, id: NodeId, callback: impl FnMut(&mut SceneTree, NodeId, NodeId) + 'static) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hooks.on_child_added = Some(Rc::new(RefCell::new(callback)));
        }
    }

    /// Run `callback(tree, parent, child)` whenever a child is detached from `id`
    pub fn on_child_removed(&mut self, id: NodeId, callback: impl FnMut(&mut SceneTree, NodeId, NodeId) + 'static) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hooks.on_child_removed = Some(Rc::new(RefCell::new(callback)));
        }
    }

    /// Run `callback` when `id` receives the pointer event `kind`
    pub fn on_pointer(
        &mut self,
        id: NodeId,
        kind: PointerEventKind,
        callback: impl FnMut(&mut SceneTree, NodeId) + 'static,
    ) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hooks.pointer.insert(kind, Rc::new(RefCell::new(callback)));
        }
    }

    /// Timing of the frame being processed
    pub fn frame_info(&self) -> FrameInfo {
        self.frame
    }

    pub(crate) fn set_frame_info(&mut self, frame: FrameInfo) {
        self.frame = frame;
    }

    /// Take the textures released by deleted nodes since the last call
    pub fn take_released_textures(&mut self) -> Vec<TextureId> {
        std::mem::take(&mut self.released_textures)
    }

    pub(crate) fn release_texture(&mut self, texture: TextureId) {
        self.released_textures.push(texture);
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }

    pub(crate) fn fire_tick(&mut self, id: NodeId) {
        let callback = self.nodes.get(id).and_then(|node| node.hooks.on_tick.clone());
        if let Some(callback) = callback {
            invoke(&callback, self, id);
        }
    }

    pub(crate) fn fire_pointer(&mut self, id: NodeId, kind: PointerEventKind) {
        let callback = self.nodes.get(id).and_then(|node| node.hooks.pointer.get(&kind).cloned());
        if let Some(callback) = callback {
            invoke(&callback, self, id);
        }
    }

    fn fire_child_hook(&mut self, parent: NodeId, child: NodeId, added: bool) {
        let callback = self.nodes.get(parent).and_then(|node| {
            if added {
                node.hooks.on_child_added.clone()
            } else {
                node.hooks.on_child_removed.clone()
            }
        });
        if let Some(callback) = callback {
            // A callback that re-enters itself is skipped.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut *callback)(self, parent, child);
            }
        }
    }
}

fn invoke(callback: &NodeCallback, tree: &mut SceneTree, id: NodeId) {
    match callback.try_borrow_mut() {
        Ok(mut callback) => (&mut *callback)(tree, id),
        Err(_) => log::trace!("Skipping re-entrant callback on {id:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::vec2;
    use crate::scene::{Value, ValueKind};

    fn frame() -> NodeKind {
        NodeKind::frame(Visual2D::fill())
    }

    #[test]
    fn test_attach_maintains_links() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let a = tree.create(frame(), Some(root));
        let b = tree.create(frame(), Some(root));
        let c = tree.create(frame(), Some(a));

        tree.attach(c, b);

        assert_eq!(tree.parent(c), Some(b));
        assert!(tree.children(b).contains(&c));
        assert!(!tree.children(a).contains(&c));
        for id in [a, b, c] {
            let parent = tree.parent(id).unwrap();
            assert!(tree.children(parent).contains(&id));
        }
    }

    #[test]
    fn test_self_attach_is_noop() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let a = tree.create(frame(), Some(root));

        tree.attach(a, a);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.children(root), &[a]);
    }

    #[test]
    fn test_attach_under_descendant_is_refused() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let a = tree.create(frame(), Some(root));
        let b = tree.create(frame(), Some(a));

        tree.attach(a, b);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(b), Some(a));
    }

    #[test]
    fn test_detach_unparented_is_noop() {
        let mut tree = SceneTree::new();
        let lonely = tree.create(NodeKind::Folder, None);
        tree.detach(lonely);
        assert_eq!(tree.parent(lonely), None);
    }

    #[test]
    fn test_find_child_and_class() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        tree.create_named(frame(), "panel", root);
        let value = tree.create(NodeKind::value(Value::Bool(true)), Some(root));

        assert!(tree.find_child(root, "panel").is_some());
        assert!(tree.find_child(root, "missing").is_none());
        assert_eq!(tree.find_child_of_class(root, NodeClass::Value(ValueKind::Bool)), Some(value));
        assert_eq!(tree.find_child_of_class(root, NodeClass::TextBox), None);
    }

    #[test]
    fn test_ancestry() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let a = tree.create(frame(), Some(root));
        let b = tree.create(frame(), Some(a));

        assert!(tree.is_ancestor_of(root, b));
        assert!(tree.is_descendant_of(b, root));
        assert!(!tree.is_ancestor_of(b, root));
        assert!(!tree.is_ancestor_of(a, a));
    }

    #[test]
    fn test_child_hooks_fire() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let log = Rc::new(RefCell::new(Vec::new()));

        let added = Rc::clone(&log);
        tree.on_child_added(root, move |_, _, child| added.borrow_mut().push(("added", child)));
        let removed = Rc::clone(&log);
        tree.on_child_removed(root, move |_, _, child| removed.borrow_mut().push(("removed", child)));

        let a = tree.create(frame(), Some(root));
        tree.detach(a);

        assert_eq!(*log.borrow(), vec![("added", a), ("removed", a)]);
    }

    #[test]
    fn test_structural_change_marks_dirty() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let a = tree.create(frame(), Some(root));
        tree.ensure_children_sorted(root);
        assert!(!tree.get(root).unwrap().children_dirty());

        tree.set_z_index(a, 3);
        assert!(tree.get(root).unwrap().children_dirty());
        tree.ensure_children_sorted(root);

        tree.detach(a);
        assert!(tree.get(root).unwrap().children_dirty());
    }

    #[test]
    fn test_effective_visibility() {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        let outer = tree.create(frame(), Some(root));
        let inner = tree.create(NodeKind::frame(Visual2D::new(vec2(0.0, 0.0), vec2(1.0, 1.0))), Some(outer));

        assert!(tree.is_effectively_visible(inner));
        tree.visual_mut(outer).unwrap().visible = false;
        assert!(!tree.is_effectively_visible(inner));
    }
}
