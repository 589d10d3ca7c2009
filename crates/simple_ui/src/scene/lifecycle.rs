//! Subtree duplication and teardown

use crate::foundation::collections::NodeId;

use super::node::{Node, NodeKind, Widget};
use super::SceneTree;

impl SceneTree {
    /// Deep-copy the subtree rooted at `id` and attach it next to the original
    ///
    /// The copy's root is renamed `"<name> (clone)"`; descendants keep their
    /// names. Callbacks are shared with the original, while pointer state,
    /// focus and cached textures start fresh. Returns `None` for unknown
    /// handles.
    pub fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let copy = self.duplicate_recursive(id)?;
        if let Some(node) = self.get_mut(copy) {
            node.name = format!("{} (clone)", node.name);
        }
        if let Some(parent) = self.parent(id) {
            self.attach(copy, parent);
        }
        log::debug!("Cloned {id:?} as {copy:?}");
        Some(copy)
    }

    fn duplicate_recursive(&mut self, id: NodeId) -> Option<NodeId> {
        let source = self.get(id)?;
        let mut node = Node::new(source.kind.duplicate());
        node.name = source.name.clone();
        node.layout_boundary = source.layout_boundary;
        let hooks = source.hooks.clone();
        let children = source.children.clone();

        let copy = self.insert_node(node);
        for child in children {
            if let Some(child_copy) = self.duplicate_recursive(child) {
                self.attach(child_copy, copy);
            }
        }
        // Installed after the children so building the copy fires no hooks.
        if let Some(node) = self.get_mut(copy) {
            node.hooks = hooks;
        }
        Some(copy)
    }

    /// Destroy `id` and its whole subtree
    ///
    /// Each node is detached from its parent before its children are
    /// destroyed, then its own resources are released. Textures owned by
    /// destroyed nodes are queued for [`take_released_textures`](Self::take_released_textures).
    pub fn delete(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        self.detach(id);
        for child in self.children(id).to_vec() {
            self.delete(child);
        }
        self.teardown(id);
        self.remove_node(id);
    }

    /// Destroy every child of `id`, keeping `id` itself
    pub fn delete_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.delete(child);
        }
    }

    fn teardown(&mut self, id: NodeId) {
        let released = match self.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Visual {
                widget: Widget::ImageLabel(image),
                ..
            }) => image.release_textures(),
            Some(NodeKind::Visual {
                widget: Widget::TextBox(text_box),
                ..
            }) => text_box.cache.take_texture().into_iter().collect(),
            _ => Vec::new(),
        };
        for texture in released {
            self.release_texture(texture);
        }
    }
}
