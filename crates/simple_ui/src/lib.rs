//! # Simple UI
//!
//! A retained-mode scene-graph UI engine for real-time applications.
//!
//! ## Features
//!
//! - **Scene tree**: an arena of typed nodes with parent/child links,
//!   child-added/removed and per-tick callbacks, deep clone and recursive delete
//! - **Normalized layout**: positions and sizes are fractions of the parent,
//!   composed multiplicatively up to a layout boundary
//! - **Picking**: exactly one topmost interactive node per frame drives
//!   enter/leave/press/click/hold events
//! - **Text boxes**: UTF-8 aware cursor, word deletion, layout- and
//!   caps-aware key mapping for English and Russian
//! - **Scroll frames**: virtual canvas with wheel scrolling, sliders and clipping
//! - **Change signals**: poll-based observers over value holders or getters
//! - **Backend agnostic**: drawing and input go through traits; headless
//!   implementations are included for tests and tools
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simple_ui::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, ui: &mut UiManager) -> Result<(), AppError> {
//!         let root = ui.root();
//!         let label = TextLabel::new("Hello");
//!         ui.tree_mut().create(NodeKind::text_label(Visual2D::fill(), label), Some(root));
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _ui: &mut UiManager, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(UiConfig::default())?;
//!     let mut input = ScriptedInput::new(1920.0, 1080.0);
//!     input.idle(60);
//!     let mut backend = RecordingBackend::new();
//!     engine.run(&mut MyApp, &mut input, &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod scene;
pub mod signals;
pub mod ui;

mod application;
mod engine;

#[cfg(test)]
mod tests;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig, ScrollConfig, TextConfig, UiConfig},
        foundation::{
            collections::{NodeId, SignalId},
            math::{vec2, Color, Rect, Vec2},
            time::Timer,
        },
        input::{InputBackend, InputState, Key, KeyboardLanguage, Modifiers, MouseButtons, ScriptedInput},
        scene::{LineSegment, NodeClass, NodeKind, SceneTree, Value, ValueKind},
        signals::SignalRegistry,
        ui::{
            DrawCommand, ImageLabel, ImageOverlay, PointerButton, PointerEventKind, RecordingBackend,
            RenderBackend, ScrollAxis, ScrollFrame, TextAnchor, TextBox, TextLabel, TextStyle, UiManager,
            Visual2D,
        },
        AppError, Application, Engine, EngineError,
    };
}
