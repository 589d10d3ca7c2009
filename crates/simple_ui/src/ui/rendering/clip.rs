//! Scoped clip regions
//!
//! [`ClipScope`] pushes a clip rectangle on creation and pops it when
//! dropped, so every exit path out of a clipped traversal closes it.

use std::ops::{Deref, DerefMut};

use crate::foundation::math::Rect;
use crate::ui::backend::RenderBackend;

/// Clip rectangle held open for the lifetime of the guard
pub struct ClipScope<'a> {
    backend: &'a mut dyn RenderBackend,
}

impl<'a> ClipScope<'a> {
    /// Push `rect` on `backend`
    pub fn new(backend: &'a mut dyn RenderBackend, rect: Rect) -> Self {
        backend.push_clip(rect);
        Self { backend }
    }
}

impl<'a> Deref for ClipScope<'a> {
    type Target = dyn RenderBackend + 'a;

    fn deref(&self) -> &Self::Target {
        self.backend
    }
}

impl<'a> DerefMut for ClipScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend
    }
}

impl Drop for ClipScope<'_> {
    fn drop(&mut self) {
        self.backend.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::rendering::{DrawCommand, RecordingBackend};

    fn clipped_work(backend: &mut dyn RenderBackend, bail: bool) -> Result<(), ()> {
        let _scope = ClipScope::new(backend, Rect::new(0.0, 0.0, 10.0, 10.0));
        if bail {
            return Err(());
        }
        Ok(())
    }

    #[test]
    fn test_clip_closed_on_every_path() {
        let mut backend = RecordingBackend::new();

        clipped_work(&mut backend, false).unwrap();
        assert!(clipped_work(&mut backend, true).is_err());

        assert_eq!(backend.clip_depth(), 0);
        assert_eq!(backend.commands().last(), Some(&DrawCommand::PopClip));
    }

    #[test]
    fn test_nested_scopes() {
        let mut backend = RecordingBackend::new();
        {
            let mut outer = ClipScope::new(&mut backend, Rect::ZERO);
            let _inner = ClipScope::new(&mut *outer, Rect::ZERO);
        }
        assert_eq!(backend.clip_depth(), 0);
        let pushes = backend
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::PushClip(_)))
            .count();
        assert_eq!(pushes, 2);
    }
}
