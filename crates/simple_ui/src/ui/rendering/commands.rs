//! UI render commands
//!
//! [`RecordingBackend`] is a headless [`RenderBackend`] that records every
//! draw call as a [`DrawCommand`]. Text is measured with a fixed-pitch
//! metric so layouts are deterministic.

use std::collections::{HashMap, HashSet};

use image::RgbaImage;

use crate::foundation::math::{vec2, Color, Rect, Vec2};
use crate::ui::backend::{FontId, RenderBackend, RenderError, TextureId};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rounded rectangle
    RoundedRect {
        /// Target rectangle
        rect: Rect,
        /// Corner roundness
        roundness: f32,
        /// Fill colour
        color: Color,
    },
    /// Rounded rectangle outline
    RoundedRectOutline {
        /// Target rectangle
        rect: Rect,
        /// Line thickness
        thickness: f32,
        /// Line colour
        color: Color,
    },
    /// Straight line
    Line {
        /// Start point
        from: Vec2,
        /// End point
        to: Vec2,
        /// Line thickness
        thickness: f32,
        /// Line colour
        color: Color,
    },
    /// Directly drawn text
    Text {
        /// Drawn string
        text: String,
        /// Top-left corner
        position: Vec2,
        /// Text size
        size: f32,
        /// Text colour
        color: Color,
    },
    /// Textured quad
    Texture {
        /// Texture drawn
        texture: TextureId,
        /// Source region
        source: Rect,
        /// Destination rectangle
        dest: Rect,
        /// Tint
        tint: Color,
    },
    /// Clip rectangle pushed
    PushClip(Rect),
    /// Clip rectangle popped
    PopClip,
}

/// Headless backend that records draw calls
#[derive(Debug)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    next_id: u64,
    fonts: HashSet<FontId>,
    textures: HashMap<TextureId, Vec2>,
    uploads: usize,
    clip_depth: usize,
    frames: u64,
    glyph_width: f32,
    fail_font_loads: bool,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Create a backend with half-square glyphs
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            next_id: 1,
            fonts: HashSet::new(),
            textures: HashMap::new(),
            uploads: 0,
            clip_depth: 0,
            frames: 0,
            glyph_width: 0.5,
            fail_font_loads: false,
        }
    }

    /// Make every subsequent font load fail
    pub fn with_failing_fonts(mut self) -> Self {
        self.fail_font_loads = true;
        self
    }

    /// Commands recorded since the last `begin_frame`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Strings drawn directly this frame, in draw order
    pub fn drawn_text(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Rectangles filled this frame, in draw order
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::RoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Textures currently loaded
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Fonts currently loaded
    pub fn live_fonts(&self) -> usize {
        self.fonts.len()
    }

    /// Total texture uploads, text renders included
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    /// Clip rectangles currently pushed
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Frames begun
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn text_extent(&self, text: &str, size: f32, spacing: f32) -> Vec2 {
        let count = text.chars().count();
        if count == 0 {
            return vec2(0.0, size);
        }
        let glyphs = count as f32;
        vec2(glyphs * size * self.glyph_width + (glyphs - 1.0) * spacing, size)
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_frame(&mut self, _clear: Color) -> Result<(), RenderError> {
        self.commands.clear();
        self.frames += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        if self.clip_depth != 0 {
            return Err(RenderError::Backend(format!("{} clip rectangles left open", self.clip_depth)));
        }
        Ok(())
    }

    fn draw_rounded_rect(&mut self, rect: Rect, roundness: f32, _segments: u32, color: Color) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::RoundedRect { rect, roundness, color });
        Ok(())
    }

    fn draw_rounded_rect_outline(
        &mut self,
        rect: Rect,
        _roundness: f32,
        _segments: u32,
        thickness: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::RoundedRectOutline { rect, thickness, color });
        Ok(())
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
        Ok(())
    }

    fn measure_text(&self, _font: FontId, text: &str, size: f32, spacing: f32) -> Vec2 {
        self.text_extent(text, size, spacing)
    }

    fn draw_text(
        &mut self,
        font: FontId,
        text: &str,
        position: Vec2,
        size: f32,
        _spacing: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        if !self.fonts.contains(&font) {
            return Err(RenderError::Backend(format!("font {font:?} is not loaded")));
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
            color,
        });
        Ok(())
    }

    fn load_font(&mut self, path: &str, _base_size: u32, _glyphs: &[char]) -> Result<FontId, RenderError> {
        if self.fail_font_loads {
            return Err(RenderError::FontLoad(path.to_string()));
        }
        let font = FontId(self.allocate());
        self.fonts.insert(font);
        Ok(font)
    }

    fn unload_font(&mut self, font: FontId) {
        self.fonts.remove(&font);
    }

    fn upload_texture(&mut self, image: &RgbaImage) -> Result<TextureId, RenderError> {
        let texture = TextureId(self.allocate());
        self.textures
            .insert(texture, vec2(image.width() as f32, image.height() as f32));
        self.uploads += 1;
        Ok(texture)
    }

    fn unload_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
    }

    fn draw_texture(&mut self, texture: TextureId, source: Rect, dest: Rect, tint: Color) -> Result<(), RenderError> {
        if !self.textures.contains_key(&texture) {
            return Err(RenderError::MissingTexture(texture));
        }
        self.commands.push(DrawCommand::Texture {
            texture,
            source,
            dest,
            tint,
        });
        Ok(())
    }

    fn render_text_to_texture(
        &mut self,
        font: FontId,
        text: &str,
        size: f32,
        spacing: f32,
    ) -> Result<(TextureId, Vec2), RenderError> {
        if !self.fonts.contains(&font) {
            return Err(RenderError::Backend(format!("font {font:?} is not loaded")));
        }
        let extent = self.text_extent(text, size, spacing);
        let texture = TextureId(self.allocate());
        self.textures.insert(texture, extent);
        self.uploads += 1;
        Ok((texture, extent))
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_pitch_metric() {
        let backend = RecordingBackend::new();
        let font = FontId(0);

        assert_eq!(backend.measure_text(font, "", 10.0, 5.0), vec2(0.0, 10.0));
        assert_eq!(backend.measure_text(font, "abcd", 10.0, 5.0), vec2(35.0, 10.0));
        assert_eq!(backend.measure_text(font, "жж", 10.0, 0.0), vec2(10.0, 10.0));
    }

    #[test]
    fn test_texture_lifecycle() {
        let mut backend = RecordingBackend::new();
        let texture = backend.upload_texture(&RgbaImage::new(2, 2)).unwrap();
        assert_eq!(backend.live_textures(), 1);

        backend.unload_texture(texture);
        assert_eq!(backend.live_textures(), 0);
        let result = backend.draw_texture(texture, Rect::ZERO, Rect::ZERO, Color::WHITE);
        assert!(matches!(result, Err(RenderError::MissingTexture(_))));
    }

    #[test]
    fn test_unbalanced_clip_fails_frame() {
        let mut backend = RecordingBackend::new();
        backend.begin_frame(Color::WHITE).unwrap();
        backend.push_clip(Rect::ZERO);
        assert!(backend.end_frame().is_err());
        backend.pop_clip();
        assert!(backend.end_frame().is_ok());
    }

    #[test]
    fn test_failing_fonts() {
        let mut backend = RecordingBackend::new().with_failing_fonts();
        assert!(matches!(backend.load_font("x.ttf", 200, &[]), Err(RenderError::FontLoad(_))));
    }
}
