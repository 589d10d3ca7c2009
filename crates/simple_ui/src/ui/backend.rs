//! UI Render Backend Trait
//!
//! Defines the interface between the UI and a drawing library.
//! Keeps the scene graph independent of any graphics API.

use image::RgbaImage;

use crate::foundation::math::{Color, Rect, Vec2};

/// Handle to a font loaded by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u64);

/// Handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Rendering errors
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The backend rejected a call
    #[error("Render backend error: {0}")]
    Backend(String),

    /// A font file could not be loaded
    #[error("Failed to load font {0}")]
    FontLoad(String),

    /// A draw call referenced a texture that is not loaded
    #[error("Texture {0:?} is not loaded")]
    MissingTexture(TextureId),
}

/// Backend-agnostic drawing interface
///
/// Coordinates are pixels with the origin at the top-left of the window.
pub trait RenderBackend {
    /// Begin a frame, clearing to `clear`
    fn begin_frame(&mut self, clear: Color) -> Result<(), RenderError>;

    /// Present the frame
    fn end_frame(&mut self) -> Result<(), RenderError>;

    /// Filled rectangle with rounded corners
    fn draw_rounded_rect(&mut self, rect: Rect, roundness: f32, segments: u32, color: Color) -> Result<(), RenderError>;

    /// Outline of a rectangle with rounded corners
    fn draw_rounded_rect_outline(
        &mut self,
        rect: Rect,
        roundness: f32,
        segments: u32,
        thickness: f32,
        color: Color,
    ) -> Result<(), RenderError>;

    /// Straight line
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) -> Result<(), RenderError>;

    /// Extent of `text` at `size` with `spacing` pixels between glyphs
    fn measure_text(&self, font: FontId, text: &str, size: f32, spacing: f32) -> Vec2;

    /// Draw text with its top-left corner at `position`
    fn draw_text(
        &mut self,
        font: FontId,
        text: &str,
        position: Vec2,
        size: f32,
        spacing: f32,
        color: Color,
    ) -> Result<(), RenderError>;

    /// Load a font rasterised at `base_size` containing `glyphs`
    fn load_font(&mut self, path: &str, base_size: u32, glyphs: &[char]) -> Result<FontId, RenderError>;

    /// Release a font
    fn unload_font(&mut self, font: FontId);

    /// Upload decoded pixels as a texture
    fn upload_texture(&mut self, image: &RgbaImage) -> Result<TextureId, RenderError>;

    /// Release a texture
    fn unload_texture(&mut self, texture: TextureId);

    /// Draw the `source` region of a texture into `dest`
    fn draw_texture(&mut self, texture: TextureId, source: Rect, dest: Rect, tint: Color) -> Result<(), RenderError>;

    /// Render white text into a new texture; returns the texture and its size
    fn render_text_to_texture(
        &mut self,
        font: FontId,
        text: &str,
        size: f32,
        spacing: f32,
    ) -> Result<(TextureId, Vec2), RenderError>;

    /// Restrict drawing to `rect` until the matching [`pop_clip`](Self::pop_clip)
    fn push_clip(&mut self, rect: Rect);

    /// Remove the innermost clip rectangle
    fn pop_clip(&mut self);
}
