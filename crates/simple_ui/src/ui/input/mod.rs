//! Pointer and keyboard arbitration for the scene tree

pub mod focus;
pub mod picking;
pub mod processor;

pub use focus::FocusArbiter;
pub use picking::find_topmost;
pub use processor::{PointerButton, PointerContact, PointerEventKind, PointerState, PointerTracker};
