//! Scene tree
//!
//! Nodes live in an arena owned by [`SceneTree`] and refer to each other
//! through [`NodeId`](crate::foundation::collections::NodeId) handles.
//! Parent links are back-references; each parent owns the ordered list of
//! its children.

mod lifecycle;
pub mod node;
pub mod ordering;
pub mod scene_graph;

pub use node::{
    ChildCallback, LineSegment, Node, NodeCallback, NodeClass, NodeKind, Value, ValueKind, Widget,
};
pub use scene_graph::{FrameInfo, SceneTree};
