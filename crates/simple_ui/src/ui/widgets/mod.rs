//! UI widgets module
//!
//! Payload types for every positioned node (frames, labels, text boxes,
//! images and scroll frames) plus the properties they share.

pub mod core;
pub mod image_label;
pub mod scroll_frame;
pub mod text_box;
pub mod text_label;

pub use self::core::{TextAnchor, TextStyle, Visual2D};
pub use image_label::{ImageLabel, ImageOverlay, ImageSource, ResourceError};
pub use scroll_frame::{ScrollAxis, ScrollFrame, ScrollState};
pub use text_box::{codepoint_offsets, TextBox, TextEditor};
pub use text_label::{fit_text, TextFit, TextLabel};
