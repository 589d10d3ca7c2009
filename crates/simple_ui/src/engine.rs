//! Main loop
//!
//! Drives a [`UiManager`] with an input and a render backend until the
//! input backend reports that the window closed.

use crate::application::{AppError, Application};
use crate::config::{ConfigError, UiConfig};
use crate::input::InputBackend;
use crate::ui::{RenderBackend, RenderError, UiManager};
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rendering backend failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Application hook failed
    #[error("Application error: {0}")]
    ApplicationError(String),
}

/// Owns the UI and runs frames
#[derive(Debug)]
pub struct Engine {
    ui: UiManager,
    frames: u64,
}

impl Engine {
    /// Create an engine from a validated configuration
    pub fn new(config: UiConfig) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|reason| EngineError::Config(ConfigError::Invalid(reason)))?;
        log::info!(
            "Initializing UI engine ({}x{})",
            config.engine.window_width,
            config.engine.window_height
        );
        Ok(Self {
            ui: UiManager::new(config),
            frames: 0,
        })
    }

    /// The UI being driven
    pub fn ui(&mut self) -> &mut UiManager {
        &mut self.ui
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run `app` until `input` stops producing frames
    ///
    /// A missing font is logged and text is skipped. Each frame samples
    /// input, lets the application update and then draws.
    pub fn run<A: Application>(
        &mut self,
        app: &mut A,
        input: &mut dyn InputBackend,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), EngineError> {
        if let Err(err) = self.ui.load_font(backend) {
            log::warn!("Font unavailable, text will not be drawn: {err}");
        }

        app.initialize(&mut self.ui)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");
        let result = self.main_loop(app, input, backend);

        app.cleanup(&mut self.ui);
        self.ui.shutdown(backend);
        log::info!("Engine shutdown complete after {} frames", self.frames);
        result
    }

    fn main_loop<A: Application>(
        &mut self,
        app: &mut A,
        input: &mut dyn InputBackend,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), EngineError> {
        while input.poll_events() {
            self.ui.prepare(&*input);
            let delta_time = self.ui.input().delta_time;
            app.update(&mut self.ui, delta_time)
                .map_err(|e: AppError| EngineError::ApplicationError(format!("App update: {e}")))?;
            self.ui.render(backend)?;
            self.frames += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::vec2;
    use crate::input::{MouseButtons, ScriptedInput};
    use crate::scene::NodeKind;
    use crate::ui::{PointerButton, PointerEventKind, RecordingBackend, Visual2D};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct ClickCounter {
        clicks: Rc<Cell<u32>>,
        updates: u32,
        cleaned: bool,
    }

    impl Application for ClickCounter {
        fn initialize(&mut self, ui: &mut UiManager) -> Result<(), AppError> {
            let root = ui.root();
            let tree = ui.tree_mut();
            let button = tree.create(
                NodeKind::frame(Visual2D::new(vec2(0.0, 0.0), vec2(0.5, 0.5)).with_active(true)),
                Some(root),
            );
            let clicks = Rc::clone(&self.clicks);
            tree.on_pointer(button, PointerEventKind::Click(PointerButton::Primary), move |_, _| {
                clicks.set(clicks.get() + 1);
            });
            Ok(())
        }

        fn update(&mut self, _ui: &mut UiManager, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            Ok(())
        }

        fn cleanup(&mut self, _ui: &mut UiManager) {
            self.cleaned = true;
        }
    }

    #[test]
    fn test_run_until_input_ends() {
        let mut engine = Engine::new(UiConfig::default()).unwrap();
        let mut app = ClickCounter::default();
        let mut input = ScriptedInput::new(100.0, 100.0);
        input.click_at(10.0, 10.0, MouseButtons::PRIMARY).click_at(90.0, 90.0, MouseButtons::PRIMARY);
        let mut backend = RecordingBackend::new();

        engine.run(&mut app, &mut input, &mut backend).unwrap();

        assert_eq!(app.clicks.get(), 1);
        assert_eq!(app.updates, 6);
        assert_eq!(engine.frames(), 6);
        assert!(app.cleaned);
        let root = engine.ui().root();
        assert!(engine.ui().tree().children(root).is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = UiConfig::default();
        config.engine.window_width = 0;
        assert!(matches!(Engine::new(config), Err(EngineError::Config(_))));
    }

    struct Failing;

    impl Application for Failing {
        fn initialize(&mut self, _ui: &mut UiManager) -> Result<(), AppError> {
            Ok(())
        }

        fn update(&mut self, _ui: &mut UiManager, _delta_time: f32) -> Result<(), AppError> {
            Err(AppError::Custom("boom".into()))
        }
    }

    #[test]
    fn test_update_error_stops_loop() {
        let mut engine = Engine::new(UiConfig::default()).unwrap();
        let mut input = ScriptedInput::new(100.0, 100.0);
        input.idle(3);
        let mut backend = RecordingBackend::new();

        let result = engine.run(&mut Failing, &mut input, &mut backend);
        assert!(matches!(result, Err(EngineError::ApplicationError(_))));
        assert_eq!(engine.frames(), 0);
    }
}
