//! Render-to-texture cache for typed text
//!
//! Text boxes redraw the same string every frame. The cache keeps the last
//! rendering and replaces it only when the content, size or font changes.
//! The text is rendered white and tinted at draw time, so colour changes
//! never invalidate it.

use crate::foundation::math::Vec2;
use crate::ui::backend::{FontId, RenderBackend, RenderError, TextureId};

/// What a cached texture was rendered from
#[derive(Debug, Clone, PartialEq)]
pub struct TextCacheKey {
    /// Rendered string
    pub content: String,
    /// Text size
    pub size: f32,
    /// Font used
    pub font: FontId,
}

#[derive(Debug, Clone, PartialEq)]
struct CachedText {
    key: TextCacheKey,
    texture: TextureId,
    extent: Vec2,
}

/// Single-entry text texture cache
#[derive(Debug, Default)]
pub struct TextCache {
    entry: Option<CachedText>,
}

impl TextCache {
    /// Texture for `key`, rendering it if the cached one is stale
    pub fn get_or_render(
        &mut self,
        backend: &mut dyn RenderBackend,
        key: TextCacheKey,
        spacing: f32,
    ) -> Result<(TextureId, Vec2), RenderError> {
        if let Some(entry) = &self.entry {
            if entry.key == key {
                return Ok((entry.texture, entry.extent));
            }
        }
        if let Some(old) = self.entry.take() {
            backend.unload_texture(old.texture);
        }

        let (texture, extent) = backend.render_text_to_texture(key.font, &key.content, key.size, spacing)?;
        self.entry = Some(CachedText { key, texture, extent });
        Ok((texture, extent))
    }

    /// Whether a rendering is held
    pub fn is_cached(&self) -> bool {
        self.entry.is_some()
    }

    /// Drop the rendering and hand back its texture
    pub fn take_texture(&mut self) -> Option<TextureId> {
        self.entry.take().map(|entry| entry.texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::rendering::RecordingBackend;

    fn key(content: &str, size: f32, font: FontId) -> TextCacheKey {
        TextCacheKey {
            content: content.to_string(),
            size,
            font,
        }
    }

    #[test]
    fn test_cache_hit_and_eviction() {
        let mut backend = RecordingBackend::new();
        let font = backend.load_font("font.ttf", 200, &[]).unwrap();
        let mut cache = TextCache::default();

        let (first, _) = cache.get_or_render(&mut backend, key("abc", 10.0, font), 5.0).unwrap();
        let (again, _) = cache.get_or_render(&mut backend, key("abc", 10.0, font), 5.0).unwrap();
        assert_eq!(first, again);
        assert_eq!(backend.uploads(), 1);

        let (resized, extent) = cache.get_or_render(&mut backend, key("abc", 20.0, font), 5.0).unwrap();
        assert_ne!(first, resized);
        assert_eq!(extent.y, 20.0);
        assert_eq!(backend.live_textures(), 1);

        cache.get_or_render(&mut backend, key("abcd", 20.0, font), 5.0).unwrap();
        assert_eq!(backend.uploads(), 3);
        assert_eq!(backend.live_textures(), 1);
    }

    #[test]
    fn test_take_texture_empties_cache() {
        let mut backend = RecordingBackend::new();
        let font = backend.load_font("font.ttf", 200, &[]).unwrap();
        let mut cache = TextCache::default();
        cache.get_or_render(&mut backend, key("x", 10.0, font), 0.0).unwrap();

        assert!(cache.take_texture().is_some());
        assert!(!cache.is_cached());
        assert!(cache.take_texture().is_none());
    }
}
