//! UI System Module
//!
//! Keeps UI logic separate from the rendering backend.
//!
//! Architecture:
//! - [`UiManager`]: owns the scene tree and runs one frame per tick
//! - `widgets/`: payloads of positioned nodes and their behaviour
//! - `layout`: normalized-to-pixel rectangle resolution
//! - `input/`: picking, pointer events and text box focus
//! - `rendering/`: recorded draw commands, clip scopes, text cache
//! - `backend`: the drawing interface a platform implements

pub mod backend;
mod frame;
pub mod input;
pub mod layout;
pub mod manager;
pub mod rendering;
pub mod widgets;

pub use backend::{FontId, RenderBackend, RenderError, TextureId};
pub use input::{FocusArbiter, PointerButton, PointerEventKind};
pub use layout::{resolve_line, resolve_rect, ChildTransform};
pub use manager::{UiManager, FPS_LABEL_NAME};
pub use rendering::{DrawCommand, RecordingBackend};
pub use widgets::{
    ImageLabel, ImageOverlay, ScrollAxis, ScrollFrame, TextAnchor, TextBox, TextLabel, TextStyle, Visual2D,
};
