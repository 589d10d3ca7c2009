//! UI rendering module
//!
//! Backend-agnostic rendering helpers: recorded draw commands, scoped clip
//! regions and the text texture cache.

pub mod clip;
pub mod commands;
pub mod text_cache;

pub use clip::ClipScope;
pub use commands::{DrawCommand, RecordingBackend};
pub use text_cache::{TextCache, TextCacheKey};
