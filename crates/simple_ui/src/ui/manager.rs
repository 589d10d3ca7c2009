//! UI Manager
//!
//! Owns the scene tree and every piece of per-frame state the tree needs:
//! the sampled input, the topmost node, text box focus, the signal registry,
//! frame timing and the loaded font. One [`UiManager::tick`] runs a whole
//! frame: sample input, poll signals, pick, then traverse and draw.

use crate::config::UiConfig;
use crate::foundation::collections::NodeId;
use crate::foundation::math::{vec2, Color};
use crate::foundation::time::Timer;
use crate::input::{keymap, InputBackend, InputState};
use crate::scene::{FrameInfo, NodeKind, SceneTree};
use crate::signals::SignalRegistry;
use crate::ui::backend::{FontId, RenderBackend, RenderError};
use crate::ui::frame::{self, FrameContext};
use crate::ui::input::{find_topmost, FocusArbiter, PointerTracker};
use crate::ui::widgets::{ScrollFrame, TextAnchor, TextBox, TextLabel, TextStyle, Visual2D};

/// Name given to the frame-rate label
pub const FPS_LABEL_NAME: &str = "FPS_LABEL";

/// Z-index that keeps the frame-rate label above everything else
const FPS_LABEL_Z_INDEX: i32 = 100_000;

/// Central UI management system
#[derive(Debug)]
pub struct UiManager {
    config: UiConfig,
    tree: SceneTree,
    root: NodeId,
    input: InputState,
    topmost: Option<NodeId>,
    focus: FocusArbiter,
    signals: SignalRegistry,
    timer: Timer,
    font: Option<FontId>,
    fps_label: Option<NodeId>,
}

impl UiManager {
    /// Create a manager with an empty tree under a whole-window root
    pub fn new(config: UiConfig) -> Self {
        let mut tree = SceneTree::new();
        let root = tree.create_root(NodeKind::Folder);
        if let Some(node) = tree.get_mut(root) {
            node.name = "Screen".to_string();
        }
        let input = InputState {
            viewport: vec2(config.engine.window_width as f32, config.engine.window_height as f32),
            ..InputState::default()
        };

        Self {
            config,
            tree,
            root,
            input,
            topmost: None,
            focus: FocusArbiter::new(),
            signals: SignalRegistry::new(),
            timer: Timer::new(),
            font: None,
            fps_label: None,
        }
    }

    /// Load the configured font with every glyph the key map can type
    ///
    /// Without a font, text is skipped while everything else still draws.
    pub fn load_font(&mut self, backend: &mut dyn RenderBackend) -> Result<FontId, RenderError> {
        if let Some(old) = self.font.take() {
            backend.unload_font(old);
        }
        let mut glyphs: Vec<char> = (' '..='~').chain(keymap::glyphs()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();

        let font = backend.load_font(&self.config.text.font_path, self.config.text.font_base_size, &glyphs)?;
        log::info!(
            "Loaded font {} with {} glyphs",
            self.config.text.font_path,
            glyphs.len()
        );
        self.font = Some(font);
        Ok(font)
    }

    /// Configuration in use
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The scene tree
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// The scene tree, mutably
    pub fn tree_mut(&mut self) -> &mut SceneTree {
        &mut self.tree
    }

    /// Root node covering the whole window
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Signal registry polled every frame
    pub fn signals(&mut self) -> &mut SignalRegistry {
        &mut self.signals
    }

    /// Tree and signal registry together, for connecting signals
    pub fn tree_and_signals(&mut self) -> (&mut SceneTree, &mut SignalRegistry) {
        (&mut self.tree, &mut self.signals)
    }

    /// Input sampled for the current frame
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Node under the pointer that receives events this frame
    pub fn topmost(&self) -> Option<NodeId> {
        self.topmost
    }

    /// Focused text box
    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Frame timing
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Text box using the configured text defaults
    pub fn new_text_box(&self) -> TextBox {
        TextBox::new(&self.config.text)
    }

    /// Scroll frame using the configured scroll defaults
    pub fn new_scroll_frame(&self) -> ScrollFrame {
        ScrollFrame::new(&self.config.scroll)
    }

    /// Sample input, poll signals and pick the topmost node
    pub fn prepare(&mut self, input: &dyn InputBackend) {
        self.input = InputState::sample(input);
        self.timer.advance(self.input.delta_time);
        self.tree.set_frame_info(FrameInfo {
            delta_time: self.timer.delta_time(),
            fps: self.timer.current_fps(),
            viewport: self.input.viewport,
            frame: self.timer.frame_count(),
        });

        self.signals.poll(&mut self.tree);

        let topmost = find_topmost(&mut self.tree, self.root, self.input.viewport, self.input.pointer);
        if topmost != self.topmost {
            log::debug!("Topmost node changed to {topmost:?}");
        }
        self.topmost = topmost;
        self.focus.resolve(&mut self.tree, topmost, &self.input);
    }

    /// Traverse the tree and draw the frame
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        backend.begin_frame(Color::WHITE)?;
        let mut ctx = FrameContext {
            input: &self.input,
            topmost: self.topmost,
            focus: &mut self.focus,
            font: self.font,
            text: &self.config.text,
            tracker: PointerTracker::new(&self.input),
        };
        frame::traverse(&mut self.tree, self.root, backend, &mut ctx);
        let presented = backend.end_frame();

        self.release_textures(backend);
        presented
    }

    /// Run one whole frame
    pub fn tick(&mut self, input: &dyn InputBackend, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        self.prepare(input);
        self.render(backend)
    }

    /// Show or hide the frame-rate label, creating it on first use
    pub fn toggle_fps_label(&mut self) -> NodeId {
        let label = match self.fps_label.filter(|&id| self.tree.contains(id)) {
            Some(id) => id,
            None => self.create_fps_label(),
        };
        if let Some(visual) = self.tree.visual_mut(label) {
            visual.visible = !visual.visible;
            log::debug!("Frame-rate label visible: {}", visual.visible);
        }
        label
    }

    fn create_fps_label(&mut self) -> NodeId {
        let visual = Visual2D::new(vec2(0.85, 0.0), vec2(0.15, 0.1))
            .with_anchor(TextAnchor::NE.to_normalized())
            .with_background(Color::BLACK, 1.0)
            .with_active(false)
            .with_visible(false);
        let label = TextLabel::new("").with_style(TextStyle::auto_fit().with_anchor(TextAnchor::NE));
        let id = self
            .tree
            .create_named(NodeKind::text_label(visual, label), FPS_LABEL_NAME, self.root);
        self.tree.set_z_index(id, FPS_LABEL_Z_INDEX);
        self.tree.set_on_tick(id, |tree, id| {
            let fps = tree.frame_info().fps;
            if let Some(label) = tree.get_mut(id).and_then(|node| node.text_label_mut()) {
                label.text = format!("{fps:.0} FPS");
            }
        });
        self.fps_label = Some(id);
        id
    }

    /// Delete the whole tree and release backend resources
    pub fn shutdown(&mut self, backend: &mut dyn RenderBackend) {
        self.focus.defocus(&mut self.tree);
        self.tree.delete_children(self.root);
        self.signals.clear();
        self.topmost = None;
        self.fps_label = None;
        self.release_textures(backend);
        if let Some(font) = self.font.take() {
            backend.unload_font(font);
        }
        log::info!("UI shut down");
    }

    fn release_textures(&mut self, backend: &mut dyn RenderBackend) {
        for texture in self.tree.take_released_textures() {
            backend.unload_texture(texture);
        }
    }
}
