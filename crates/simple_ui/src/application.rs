//! Application trait and lifecycle management

use crate::engine::EngineError;
use crate::ui::UiManager;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to build a UI on top of the engine loop.
pub trait Application {
    /// Build the initial tree
    ///
    /// Called once after the font is loaded and before the first frame.
    fn initialize(&mut self, ui: &mut UiManager) -> Result<(), AppError>;

    /// Per-frame logic
    ///
    /// Called after input is sampled and the topmost node is picked, before
    /// the tree is traversed.
    fn update(&mut self, ui: &mut UiManager, delta_time: f32) -> Result<(), AppError>;

    /// Called once after the last frame, before the tree is torn down
    fn cleanup(&mut self, _ui: &mut UiManager) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(String),
}
