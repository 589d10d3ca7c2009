//! Text box focus
//!
//! At most one text box is focused. A primary press moves focus to the
//! topmost node when it is a visible text box, and away from the current
//! one otherwise. A text box that loses focus has its text cleared.

use crate::foundation::collections::NodeId;
use crate::foundation::math::Vec2;
use crate::input::{InputState, MouseButtons};
use crate::scene::{NodeClass, SceneTree};

/// Tracks which text box receives keyboard input
#[derive(Debug, Default)]
pub struct FocusArbiter {
    focused: Option<NodeId>,
    pending_click: Option<(NodeId, Vec2)>,
}

impl FocusArbiter {
    /// Create an arbiter with nothing focused
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused text box
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Apply this frame's primary press and drop focus from boxes that vanished
    pub fn resolve(&mut self, tree: &mut SceneTree, topmost: Option<NodeId>, input: &InputState) {
        if let Some(current) = self.focused {
            if !tree.contains(current) || !tree.is_effectively_visible(current) {
                log::debug!("Focused text box {current:?} is gone or hidden");
                self.defocus(tree);
            }
        }

        if !input.pressed(MouseButtons::PRIMARY) {
            return;
        }

        let target = topmost.filter(|&id| {
            tree.class(id) == Some(NodeClass::TextBox) && tree.is_effectively_visible(id)
        });

        if target != self.focused {
            self.defocus(tree);
            if let Some(id) = target {
                if let Some(text_box) = tree.get_mut(id).and_then(|node| node.text_box_mut()) {
                    text_box.editor.focus();
                }
                log::debug!("Focus moved to {id:?}");
                self.focused = Some(id);
            }
        }

        if let Some(id) = target {
            self.pending_click = Some((id, input.pointer));
        }
    }

    /// Remove focus from the current text box, clearing its text
    pub fn defocus(&mut self, tree: &mut SceneTree) {
        if let Some(previous) = self.focused.take() {
            if let Some(text_box) = tree.get_mut(previous).and_then(|node| node.text_box_mut()) {
                text_box.editor.defocus();
            }
        }
        self.pending_click = None;
    }

    /// Take the click that should place `id`'s cursor this frame
    pub(crate) fn take_click(&mut self, id: NodeId) -> Option<Vec2> {
        match self.pending_click {
            Some((target, pointer)) if target == id => {
                self.pending_click = None;
                Some(pointer)
            }
            _ => None,
        }
    }
}
