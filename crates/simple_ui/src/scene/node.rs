//! Node definitions
//!
//! A single node type carries a closed set of payloads. Positioned
//! payloads share a [`Visual2D`]; everything else is either structural
//! (folders), a line, or a value holder observed by change signals.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::collections::NodeId;
use crate::foundation::math::{Color, Vec2};
use crate::ui::input::{PointerEventKind, PointerState};
use crate::ui::widgets::{ImageLabel, ScrollFrame, TextBox, TextLabel, Visual2D};

use super::SceneTree;

/// Callback invoked with the tree and the node it is attached to
pub type NodeCallback = Rc<RefCell<dyn FnMut(&mut SceneTree, NodeId)>>;

/// Callback invoked with the tree, the parent and the affected child
pub type ChildCallback = Rc<RefCell<dyn FnMut(&mut SceneTree, NodeId, NodeId)>>;

/// Payload type of a value holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text
    String,
    /// Reference to another node
    Object,
    /// Boolean
    Bool,
    /// Integer
    Int,
    /// Float
    Float,
    /// 2D vector
    Vector2,
    /// Colour
    Color,
}

/// Value stored by a value holder
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text
    String(String),
    /// Reference to another node
    Object(Option<NodeId>),
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f32),
    /// 2D vector
    Vector2(Vec2),
    /// Colour
    Color(Color),
}

impl Value {
    /// Type tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Object(_) => ValueKind::Object,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Vector2(_) => ValueKind::Vector2,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// Default value of a kind
    pub fn default_of(kind: ValueKind) -> Self {
        match kind {
            ValueKind::String => Self::String(String::new()),
            ValueKind::Object => Self::Object(None),
            ValueKind::Bool => Self::Bool(false),
            ValueKind::Int => Self::Int(0),
            ValueKind::Float => Self::Float(0.0),
            ValueKind::Vector2 => Self::Vector2(Vec2::zeros()),
            ValueKind::Color => Self::Color(Color::WHITE),
        }
    }
}

/// Type tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// Structural container with no visual
    Folder,
    /// Plain positioned rectangle
    Frame,
    /// Static text
    TextLabel,
    /// Editable text
    TextBox,
    /// Image
    ImageLabel,
    /// Scrollable viewport
    ScrollFrame,
    /// Line between two points
    Line,
    /// Value holder
    Value(ValueKind),
}

impl NodeClass {
    /// Name given to new nodes of this class
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::Frame => "Frame",
            Self::TextLabel => "TextLabel",
            Self::TextBox => "TextBox",
            Self::ImageLabel => "ImageLabel",
            Self::ScrollFrame => "ScrollFrame",
            Self::Line => "Line",
            Self::Value(ValueKind::String) => "StringValue",
            Self::Value(ValueKind::Object) => "ObjectValue",
            Self::Value(ValueKind::Bool) => "BoolValue",
            Self::Value(ValueKind::Int) => "IntValue",
            Self::Value(ValueKind::Float) => "FloatValue",
            Self::Value(ValueKind::Vector2) => "Vector2Value",
            Self::Value(ValueKind::Color) => "ColorValue",
        }
    }

    /// Whether nodes of this class carry a [`Visual2D`]
    pub fn is_visual(self) -> bool {
        matches!(
            self,
            Self::Frame | Self::TextLabel | Self::TextBox | Self::ImageLabel | Self::ScrollFrame
        )
    }
}

/// Behaviour layered on top of a [`Visual2D`]
#[derive(Debug)]
pub enum Widget {
    /// Plain rectangle
    Frame,
    /// Static text
    TextLabel(TextLabel),
    /// Editable text
    TextBox(TextBox),
    /// Image
    ImageLabel(ImageLabel),
    /// Scrollable viewport
    ScrollFrame(ScrollFrame),
}

/// Line between two points in the parent's normalized space
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    /// Start point
    pub from: Vec2,
    /// End point
    pub to: Vec2,
    /// Thickness in pixels
    pub thickness: f32,
    /// Colour
    pub color: Color,
    /// Transparency in `[0, 1]`
    pub transparency: f32,
    /// Hidden lines are not drawn
    pub visible: bool,
    /// Draw order among siblings
    pub z_index: i32,
}

impl LineSegment {
    /// Create a one-pixel black line
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self {
            from,
            to,
            thickness: 1.0,
            color: Color::BLACK,
            transparency: 0.0,
            visible: true,
            z_index: 0,
        }
    }

    /// Set thickness and colour
    pub fn with_stroke(mut self, thickness: f32, color: Color) -> Self {
        self.thickness = thickness;
        self.color = color;
        self
    }
}

/// Node payload
#[derive(Debug)]
pub enum NodeKind {
    /// Structural container
    Folder,
    /// Positioned node
    Visual {
        /// Shared positioned properties
        visual: Visual2D,
        /// Type-specific behaviour
        widget: Widget,
    },
    /// Line
    Line(LineSegment),
    /// Value holder
    Value(Value),
}

impl NodeKind {
    /// Plain rectangle
    pub fn frame(visual: Visual2D) -> Self {
        Self::Visual {
            visual,
            widget: Widget::Frame,
        }
    }

    /// Static text
    pub fn text_label(visual: Visual2D, label: TextLabel) -> Self {
        Self::Visual {
            visual,
            widget: Widget::TextLabel(label),
        }
    }

    /// Editable text; text boxes are always interactive
    pub fn text_box(visual: Visual2D, text_box: TextBox) -> Self {
        Self::Visual {
            visual: visual.with_active(true),
            widget: Widget::TextBox(text_box),
        }
    }

    /// Image
    pub fn image_label(visual: Visual2D, image: ImageLabel) -> Self {
        Self::Visual {
            visual,
            widget: Widget::ImageLabel(image),
        }
    }

    /// Scrollable viewport
    pub fn scroll_frame(visual: Visual2D, frame: ScrollFrame) -> Self {
        Self::Visual {
            visual,
            widget: Widget::ScrollFrame(frame),
        }
    }

    /// Line between two points
    pub fn line(segment: LineSegment) -> Self {
        Self::Line(segment)
    }

    /// Value holder
    pub fn value(value: Value) -> Self {
        Self::Value(value)
    }

    /// Type tag
    pub fn class(&self) -> NodeClass {
        match self {
            Self::Folder => NodeClass::Folder,
            Self::Visual { widget, .. } => match widget {
                Widget::Frame => NodeClass::Frame,
                Widget::TextLabel(_) => NodeClass::TextLabel,
                Widget::TextBox(_) => NodeClass::TextBox,
                Widget::ImageLabel(_) => NodeClass::ImageLabel,
                Widget::ScrollFrame(_) => NodeClass::ScrollFrame,
            },
            Self::Line(_) => NodeClass::Line,
            Self::Value(value) => NodeClass::Value(value.kind()),
        }
    }

    /// Copy of the payload with caches, focus and uploaded textures dropped
    pub fn duplicate(&self) -> Self {
        match self {
            Self::Folder => Self::Folder,
            Self::Visual { visual, widget } => Self::Visual {
                visual: visual.clone(),
                widget: match widget {
                    Widget::Frame => Widget::Frame,
                    Widget::TextLabel(label) => Widget::TextLabel(label.clone()),
                    Widget::TextBox(text_box) => Widget::TextBox(text_box.duplicate()),
                    Widget::ImageLabel(image) => Widget::ImageLabel(image.duplicate()),
                    Widget::ScrollFrame(frame) => Widget::ScrollFrame(frame.clone()),
                },
            },
            Self::Line(segment) => Self::Line(segment.clone()),
            Self::Value(value) => Self::Value(value.clone()),
        }
    }
}

/// Callbacks registered on a node; shared with clones
#[derive(Clone, Default)]
pub(crate) struct NodeHooks {
    pub(crate) on_tick: Option<NodeCallback>,
    pub(crate) on_child_added: Option<ChildCallback>,
    pub(crate) on_child_removed: Option<ChildCallback>,
    pub(crate) pointer: HashMap<PointerEventKind, NodeCallback>,
}

impl std::fmt::Debug for NodeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeHooks")
            .field("on_tick", &self.on_tick.is_some())
            .field("on_child_added", &self.on_child_added.is_some())
            .field("on_child_removed", &self.on_child_removed.is_some())
            .field("pointer", &self.pointer.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A node in the scene tree
#[derive(Debug)]
pub struct Node {
    /// Display name; not unique
    pub name: String,
    /// Payload
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) children_dirty: bool,
    pub(crate) layout_boundary: bool,
    pub(crate) hooks: NodeHooks,
    pub(crate) pointer: PointerState,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            name: kind.class().default_name().to_string(),
            kind,
            parent: None,
            children: Vec::new(),
            children_dirty: true,
            layout_boundary: false,
            hooks: NodeHooks::default(),
            pointer: PointerState::default(),
        }
    }

    /// Type tag
    pub fn class(&self) -> NodeClass {
        self.kind.class()
    }

    /// Parent handle
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in current draw order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether children must be re-sorted before the next traversal
    pub fn children_dirty(&self) -> bool {
        self.children_dirty
    }

    /// Whether layout composition stops at this node
    pub fn is_layout_boundary(&self) -> bool {
        self.layout_boundary
    }

    /// Shared positioned properties
    pub fn visual(&self) -> Option<&Visual2D> {
        match &self.kind {
            NodeKind::Visual { visual, .. } => Some(visual),
            _ => None,
        }
    }

    /// Mutable positioned properties
    pub fn visual_mut(&mut self) -> Option<&mut Visual2D> {
        match &mut self.kind {
            NodeKind::Visual { visual, .. } => Some(visual),
            _ => None,
        }
    }

    /// Text label payload
    pub fn text_label(&self) -> Option<&TextLabel> {
        match &self.kind {
            NodeKind::Visual {
                widget: Widget::TextLabel(label),
                ..
            } => Some(label),
            _ => None,
        }
    }

    /// Mutable text label payload
    pub fn text_label_mut(&mut self) -> Option<&mut TextLabel> {
        match &mut self.kind {
            NodeKind::Visual {
                widget: Widget::TextLabel(label),
                ..
            } => Some(label),
            _ => None,
        }
    }

    /// Text box payload
    pub fn text_box(&self) -> Option<&TextBox> {
        match &self.kind {
            NodeKind::Visual {
                widget: Widget::TextBox(text_box),
                ..
            } => Some(text_box),
            _ => None,
        }
    }

    /// Mutable text box payload
    pub fn text_box_mut(&mut self) -> Option<&mut TextBox> {
        match &mut self.kind {
            NodeKind::Visual {
                widget: Widget::TextBox(text_box),
                ..
            } => Some(text_box),
            _ => None,
        }
    }

    /// Image label payload
    pub fn image_label(&self) -> Option<&ImageLabel> {
        match &self.kind {
            NodeKind::Visual {
                widget: Widget::ImageLabel(image),
                ..
            } => Some(image),
            _ => None,
        }
    }

    /// Mutable image label payload
    pub fn image_label_mut(&mut self) -> Option<&mut ImageLabel> {
        match &mut self.kind {
            NodeKind::Visual {
                widget: Widget::ImageLabel(image),
                ..
            } => Some(image),
            _ => None,
        }
    }

    /// Scroll frame payload
    pub fn scroll_frame(&self) -> Option<&ScrollFrame> {
        match &self.kind {
            NodeKind::Visual {
                widget: Widget::ScrollFrame(frame),
                ..
            } => Some(frame),
            _ => None,
        }
    }

    /// Mutable scroll frame payload
    pub fn scroll_frame_mut(&mut self) -> Option<&mut ScrollFrame> {
        match &mut self.kind {
            NodeKind::Visual {
                widget: Widget::ScrollFrame(frame),
                ..
            } => Some(frame),
            _ => None,
        }
    }

    /// Line payload
    pub fn line(&self) -> Option<&LineSegment> {
        match &self.kind {
            NodeKind::Line(segment) => Some(segment),
            _ => None,
        }
    }

    /// Mutable line payload
    pub fn line_mut(&mut self) -> Option<&mut LineSegment> {
        match &mut self.kind {
            NodeKind::Line(segment) => Some(segment),
            _ => None,
        }
    }

    /// Held value
    pub fn value(&self) -> Option<&Value> {
        match &self.kind {
            NodeKind::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Mutable held value
    pub fn value_mut(&mut self) -> Option<&mut Value> {
        match &mut self.kind {
            NodeKind::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Z-index for positioned members, `None` for the rest
    pub fn z_index(&self) -> Option<i32> {
        match &self.kind {
            NodeKind::Visual { visual, .. } => Some(visual.z_index),
            NodeKind::Line(segment) => Some(segment.z_index),
            NodeKind::Folder | NodeKind::Value(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::vec2;

    #[test]
    fn test_class_and_default_names() {
        let node = Node::new(NodeKind::value(Value::Int(3)));
        assert_eq!(node.class(), NodeClass::Value(ValueKind::Int));
        assert_eq!(node.name, "IntValue");

        let node = Node::new(NodeKind::frame(Visual2D::fill()));
        assert_eq!(node.class(), NodeClass::Frame);
        assert!(node.class().is_visual());
        assert!(node.children_dirty());
    }

    #[test]
    fn test_text_box_forced_active() {
        let kind = NodeKind::text_box(Visual2D::fill(), TextBox::default());
        let node = Node::new(kind);
        assert!(node.visual().map_or(false, |visual| visual.active));
    }

    #[test]
    fn test_z_index_by_member() {
        assert_eq!(Node::new(NodeKind::Folder).z_index(), None);
        let mut line = LineSegment::new(vec2(0.0, 0.0), vec2(1.0, 1.0));
        line.z_index = 4;
        assert_eq!(Node::new(NodeKind::line(line)).z_index(), Some(4));
    }

    #[test]
    fn test_value_defaults() {
        assert_eq!(Value::default_of(ValueKind::Color), Value::Color(Color::WHITE));
        assert_eq!(Value::default_of(ValueKind::Object).kind(), ValueKind::Object);
    }
}
