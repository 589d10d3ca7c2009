//! Runtime settings for the UI engine
//!
//! Defaults reproduce the stock behaviour: 5px letter spacing, a half-second
//! caret blink, twenty-symbol text boxes and half-viewport scroll steps.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Color;

/// # Engine Configuration
///
/// Window and driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level filter passed to the logger
    pub log_level: String,
    /// Initial window width in pixels
    pub window_width: u32,
    /// Initial window height in pixels
    pub window_height: u32,
    /// Target FPS for frame rate limiting (`None` = unlimited)
    pub target_fps: Option<u32>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            window_width: 1920,
            window_height: 1080,
            target_fps: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the initial window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err("Window dimensions must be non-zero".to_string());
        }
        if self.target_fps == Some(0) {
            return Err("Target FPS must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Text Configuration
///
/// Font and text-entry defaults shared by labels and text boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Extra horizontal spacing between glyphs, in pixels
    pub letter_spacing: f32,
    /// Caret blink half-period in seconds
    pub cursor_blink_seconds: f32,
    /// Default codepoint limit for new text boxes
    pub default_max_symbols: usize,
    /// Default target text size for new labels
    pub default_text_size: f32,
    /// Placeholder shown by empty, unfocused text boxes
    pub placeholder: String,
    /// Placeholder colour
    pub placeholder_color: Color,
    /// Font file handed to the rendering backend
    pub font_path: String,
    /// Pixel size the font atlas is rasterised at
    pub font_base_size: u32,
}

impl TextConfig {
    /// Create a new text configuration
    pub fn new() -> Self {
        Self {
            letter_spacing: 5.0,
            cursor_blink_seconds: 0.5,
            default_max_symbols: 20,
            default_text_size: 10.0,
            placeholder: "PlaceholderText".to_string(),
            placeholder_color: Color::PLACEHOLDER,
            font_path: "resources/fonts/font.ttf".to_string(),
            font_base_size: 200,
        }
    }

    /// Set the font file
    pub fn with_font(mut self, path: impl Into<String>) -> Self {
        self.font_path = path.into();
        self
    }

    /// Set the default symbol limit
    pub fn with_max_symbols(mut self, max: usize) -> Self {
        self.default_max_symbols = max;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cursor_blink_seconds <= 0.0 {
            return Err("Cursor blink period must be positive".to_string());
        }
        if self.default_max_symbols == 0 {
            return Err("Max symbols must be at least 1".to_string());
        }
        if self.font_base_size == 0 {
            return Err("Font base size must be non-zero".to_string());
        }
        Ok(())
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Scroll Configuration
///
/// Defaults for scrollable viewports and their sliders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Canvas units moved per wheel notch
    pub scroll_speed: f32,
    /// Slider thickness in pixels
    pub slider_size: f32,
    /// Slider transparency in `[0, 1]`
    pub slider_transparency: f32,
    /// Slider colour
    pub slider_color: Color,
}

impl ScrollConfig {
    /// Create a new scroll configuration
    pub fn new() -> Self {
        Self {
            scroll_speed: 0.5,
            slider_size: 5.0,
            slider_transparency: 0.5,
            slider_color: Color::rgb(15, 15, 15),
        }
    }

    /// Set scroll speed
    pub fn with_scroll_speed(mut self, speed: f32) -> Self {
        self.scroll_speed = speed;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.slider_transparency) {
            return Err("Slider transparency must be within [0, 1]".to_string());
        }
        if self.slider_size < 0.0 {
            return Err("Slider size cannot be negative".to_string());
        }
        Ok(())
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete UI Configuration
///
/// Top-level configuration applications load and hand to the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Driver configuration
    pub engine: EngineConfig,
    /// Text defaults
    pub text: TextConfig,
    /// Scroll defaults
    pub scroll: ScrollConfig,
}

impl UiConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        self.text.validate()?;
        self.scroll.validate()?;
        Ok(())
    }

    /// Load from file and validate
    pub fn load_validated(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate().map_err(ConfigError::Invalid)?;
        log::info!("Loaded UI configuration ({}x{})", config.engine.window_width, config.engine.window_height);
        Ok(config)
    }
}

impl Config for UiConfig {}
