//! Pointer event state machine
//!
//! Each positioned node keeps a small [`PointerState`]. Once per frame the
//! traversal feeds it the node's visibility, whether the pointer is over it
//! and whether it is the frame's topmost node; [`PointerTracker::update`]
//! returns the events that transition produces.

use crate::input::{InputState, MouseButtons};

/// Pointer button tracked by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button
    Primary,
    /// Right button
    Secondary,
}

impl PointerButton {
    /// Buttons in dispatch order
    pub const ALL: [PointerButton; 2] = [PointerButton::Primary, PointerButton::Secondary];

    fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }

    /// Matching input flag
    pub fn mask(self) -> MouseButtons {
        match self {
            Self::Primary => MouseButtons::PRIMARY,
            Self::Secondary => MouseButtons::SECONDARY,
        }
    }
}

/// Event delivered to a node's pointer callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer started hovering the node while it is topmost
    Enter,
    /// Hover ended
    Leave,
    /// Button went down over the topmost node
    Press(PointerButton),
    /// Button released over the node that captured the press
    Click(PointerButton),
    /// A press began a hold
    HoldStart(PointerButton),
    /// The hold's button was released, wherever the pointer is
    HoldEnd(PointerButton),
}

/// Per-node pointer bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    hovered: bool,
    started: [bool; 2],
    held: [bool; 2],
}

impl PointerState {
    /// Whether the node is currently hovered
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether `button` is held since a press on this node
    pub fn is_held(&self, button: PointerButton) -> bool {
        self.held[button.index()]
    }
}

/// How the pointer relates to one node this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerContact {
    /// Node and all its ancestors are visible
    pub visible: bool,
    /// Pointer lies inside the node's rectangle
    pub over: bool,
    /// Node won this frame's pick
    pub topmost: bool,
}

impl PointerContact {
    /// Contact for a node that is not drawn this frame
    pub const HIDDEN: PointerContact = PointerContact {
        visible: false,
        over: false,
        topmost: false,
    };
}

/// Per-frame button transitions shared by every node update
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    pressed: [bool; 2],
    released: [bool; 2],
}

impl PointerTracker {
    /// Capture this frame's button transitions
    pub fn new(input: &InputState) -> Self {
        let mut tracker = Self::default();
        for button in PointerButton::ALL {
            tracker.pressed[button.index()] = input.pressed(button.mask());
            tracker.released[button.index()] = input.released(button.mask());
        }
        tracker
    }

    /// Advance `state` and return the events to dispatch, in order
    pub fn update(&self, state: &mut PointerState, contact: PointerContact) -> Vec<PointerEventKind> {
        let mut events = Vec::new();
        let hovered = contact.visible && contact.over && contact.topmost;

        if hovered && !state.hovered {
            events.push(PointerEventKind::Enter);
        } else if !hovered && state.hovered {
            events.push(PointerEventKind::Leave);
        }
        state.hovered = hovered;

        if !contact.visible || !contact.topmost {
            state.started = [false; 2];
        }

        for button in PointerButton::ALL {
            let index = button.index();
            if self.pressed[index] && hovered {
                state.started[index] = true;
                state.held[index] = true;
                events.push(PointerEventKind::Press(button));
                events.push(PointerEventKind::HoldStart(button));
            }
            if self.released[index] {
                if state.held[index] {
                    state.held[index] = false;
                    events.push(PointerEventKind::HoldEnd(button));
                }
                if state.started[index] && hovered {
                    events.push(PointerEventKind::Click(button));
                }
                state.started[index] = false;
            }
        }

        events
    }
}
