//! Per-frame tree traversal
//!
//! One depth-first pass from the root: each node re-sorts its children if
//! needed, resolves its rectangle, updates its pointer state and fires the
//! resulting callbacks, runs its tick callback, handles widget behaviour
//! (scrolling, text editing), draws itself and then visits its children.
//! Callbacks may delete the node being visited; the pass checks for that
//! after every callback.

use crate::config::TextConfig;
use crate::foundation::collections::NodeId;
use crate::foundation::math::{vec2, Rect, Vec2};
use crate::input::{collision, InputState, Key};
use crate::scene::{NodeClass, NodeKind, SceneTree, Widget};
use crate::ui::backend::{FontId, RenderBackend, RenderError};
use crate::ui::input::{FocusArbiter, PointerContact, PointerTracker};
use crate::ui::layout::{to_pixels, ChildTransform};
use crate::ui::rendering::{ClipScope, TextCacheKey};
use crate::ui::widgets::{fit_text, TextFit, TextStyle};

/// Caret line thickness in pixels
const CARET_THICKNESS: f32 = 2.0;

/// Everything a traversal reads besides the tree and the backend
pub(crate) struct FrameContext<'a> {
    pub input: &'a InputState,
    pub topmost: Option<NodeId>,
    pub focus: &'a mut FocusArbiter,
    pub font: Option<FontId>,
    pub text: &'a TextConfig,
    pub tracker: PointerTracker,
}

impl FrameContext<'_> {
    fn viewport(&self) -> Vec2 {
        self.input.viewport
    }

    fn spacing(&self) -> f32 {
        self.text.letter_spacing
    }
}

/// Run one layout, event and draw pass starting at `root`
pub(crate) fn traverse(
    tree: &mut SceneTree,
    root: NodeId,
    backend: &mut dyn RenderBackend,
    ctx: &mut FrameContext<'_>,
) {
    let transform = crate::ui::layout::inherited_transform(tree, root);
    visit(tree, root, transform, backend, ctx);
}

fn visit_children(
    tree: &mut SceneTree,
    parent: NodeId,
    transform: ChildTransform,
    backend: &mut dyn RenderBackend,
    ctx: &mut FrameContext<'_>,
) {
    tree.ensure_children_sorted(parent);
    for child in tree.children(parent).to_vec() {
        if tree.parent(child) == Some(parent) {
            visit(tree, child, transform, backend, ctx);
        }
    }
}

fn visit(
    tree: &mut SceneTree,
    id: NodeId,
    transform: ChildTransform,
    backend: &mut dyn RenderBackend,
    ctx: &mut FrameContext<'_>,
) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match node.kind {
        NodeKind::Visual { .. } => visit_visual(tree, id, transform, backend, ctx),
        NodeKind::Line(_) => visit_line(tree, id, transform, backend, ctx),
        NodeKind::Folder | NodeKind::Value(_) => {
            let inner = transform.for_children(node);
            tree.fire_tick(id);
            if tree.contains(id) {
                visit_children(tree, id, inner, backend, ctx);
            }
        }
    }
}

fn visit_line(
    tree: &mut SceneTree,
    id: NodeId,
    transform: ChildTransform,
    backend: &mut dyn RenderBackend,
    ctx: &mut FrameContext<'_>,
) {
    let Some(segment) = tree.get(id).and_then(|node| node.line()) else {
        return;
    };
    if !segment.visible {
        return;
    }
    let viewport = ctx.viewport();
    let from = transform.apply_point(segment.from).component_mul(&viewport);
    let to = transform.apply_point(segment.to).component_mul(&viewport);
    let color = segment.color.with_transparency(segment.transparency);
    if let Err(err) = backend.draw_line(from, to, segment.thickness, color) {
        log::warn!("Skipping line {id:?}: {err}");
    }

    tree.fire_tick(id);
    if tree.contains(id) {
        visit_children(tree, id, transform, backend, ctx);
    }
}

fn visit_visual(
    tree: &mut SceneTree,
    id: NodeId,
    transform: ChildTransform,
    backend: &mut dyn RenderBackend,
    ctx: &mut FrameContext<'_>,
) {
    let viewport = ctx.viewport();
    let pointer = ctx.input.pointer;

    let Some(node) = tree.get_mut(id) else {
        return;
    };
    let Some((position, size)) = transform.place(node) else {
        return;
    };
    let visible = node.visual().is_some_and(|visual| visual.visible);
    if !visible {
        conceal(tree, id, ctx);
        return;
    }

    let rect = to_pixels(position, size, viewport);
    let over = collision::pointer_over(&rect, pointer);
    if let Some(visual) = node.visual_mut() {
        visual.absolute = rect;
    }
    if let Some(frame) = node.scroll_frame_mut() {
        frame.scroll.clamp();
        if over && frame.scroll.apply_wheel(ctx.input.wheel, ctx.input.shift()) {
            log::trace!("Scrolled {id:?} to {:?}", frame.scroll.canvas_position());
        }
    }

    let contact = PointerContact {
        visible: true,
        over,
        topmost: ctx.topmost == Some(id),
    };
    let events = ctx.tracker.update(&mut node.pointer, contact);
    for kind in events {
        tree.fire_pointer(id, kind);
        if !tree.contains(id) {
            return;
        }
    }

    tree.fire_tick(id);
    if !tree.contains(id) {
        return;
    }

    if tree.class(id) == Some(NodeClass::TextBox) {
        edit_text_box(tree, id, rect, backend, ctx);
    }

    let culled = tree
        .visual(id)
        .is_some_and(|visual| rect.is_outside_viewport(viewport, visual.border_thickness));
    if !culled {
        if let Err(err) = draw_visual(tree, id, rect, backend, ctx) {
            log::warn!("Skipping draw of {id:?}: {err}");
        }
    }

    let Some(node) = tree.get(id) else {
        return;
    };
    let inner = transform.for_children(node);
    let clip = node.scroll_frame().filter(|frame| frame.clip).is_some();
    if clip {
        let mut scope = ClipScope::new(backend, rect);
        visit_children(tree, id, inner, &mut *scope, ctx);
    } else {
        visit_children(tree, id, inner, backend, ctx);
    }

    if let Some(frame) = tree.get(id).and_then(|node| node.scroll_frame()) {
        let color = frame.slider_draw_color();
        for (from, to) in frame.slider_segments(rect) {
            if let Err(err) = backend.draw_line(from, to, frame.slider_size, color) {
                log::warn!("Skipping slider of {id:?}: {err}");
            }
        }
    }
}

/// Update the pointer state of a hidden node and everything below it
fn conceal(tree: &mut SceneTree, id: NodeId, ctx: &mut FrameContext<'_>) {
    let Some(node) = tree.get_mut(id) else {
        return;
    };
    let events = ctx.tracker.update(&mut node.pointer, PointerContact::HIDDEN);
    for kind in events {
        tree.fire_pointer(id, kind);
        if !tree.contains(id) {
            return;
        }
    }
    for child in tree.children(id).to_vec() {
        conceal(tree, child, ctx);
    }
}

/// Fitted size and offset of `text` inside `rect`
fn layout_text(backend: &dyn RenderBackend, font: FontId, text: &str, style: &TextStyle, rect: Rect, spacing: f32) -> TextFit {
    fit_text(
        |size| backend.measure_text(font, text, size, spacing),
        rect.size(),
        style.anchor,
        style.size,
    )
}

fn edit_text_box(
    tree: &mut SceneTree,
    id: NodeId,
    rect: Rect,
    backend: &dyn RenderBackend,
    ctx: &mut FrameContext<'_>,
) {
    let input = ctx.input;
    let click = ctx.focus.take_click(id);
    let font = ctx.font;
    let spacing = ctx.spacing();

    let Some(text_box) = tree.get_mut(id).and_then(|node| node.text_box_mut()) else {
        return;
    };
    let editor = &mut text_box.editor;

    if editor.is_focused() {
        for &key in &input.keys_pressed {
            match key {
                Key::Backspace | Key::Delete if input.control() => {
                    editor.delete_word();
                }
                Key::Backspace | Key::Delete => {
                    editor.backspace();
                }
                Key::Left => editor.move_left(),
                Key::Right => editor.move_right(),
                other => {
                    editor.insert_key(other, input.language, input.shift(), input.caps_lock);
                }
            }
        }
    }

    if let (Some(click), Some(font)) = (click, font) {
        let text = editor.text().to_string();
        let fit = layout_text(backend, font, &text, &text_box.style, rect, spacing);
        let click_x = click.x - (rect.x + fit.offset.x);
        text_box
            .editor
            .place_cursor(click_x, |prefix| backend.measure_text(font, prefix, fit.size, spacing).x);
    }

    text_box.editor.tick_blink(input.delta_time);
}

fn draw_visual(
    tree: &mut SceneTree,
    id: NodeId,
    rect: Rect,
    backend: &mut dyn RenderBackend,
    ctx: &FrameContext<'_>,
) -> Result<(), RenderError> {
    let Some(NodeKind::Visual { visual, widget }) = tree.get_mut(id).map(|node| &mut node.kind) else {
        return Ok(());
    };
    let spacing = ctx.spacing();

    if visual.background_transparency < 1.0 {
        backend.draw_rounded_rect(rect, visual.roundness, visual.segments, visual.fill_color())?;
    }
    if visual.border_thickness > 0.0 && visual.border_transparency < 1.0 {
        backend.draw_rounded_rect_outline(
            rect,
            visual.roundness,
            visual.segments,
            visual.border_thickness,
            visual.outline_color(),
        )?;
    }

    match widget {
        Widget::Frame | Widget::ScrollFrame(_) => {}
        Widget::TextLabel(label) => {
            let Some(font) = ctx.font else {
                return Ok(());
            };
            let fit = layout_text(backend, font, &label.text, &label.style, rect, spacing);
            if fit.is_drawable() {
                backend.draw_text(
                    font,
                    &label.text,
                    rect.position() + fit.offset,
                    fit.size,
                    spacing,
                    label.style.draw_color(),
                )?;
            }
        }
        Widget::TextBox(text_box) => {
            let Some(font) = ctx.font else {
                return Ok(());
            };
            let text = text_box.editor.text().to_string();
            let focused = text_box.editor.is_focused();

            if text.is_empty() && !focused {
                let placeholder = text_box.placeholder.clone();
                let fit = layout_text(backend, font, &placeholder, &text_box.style, rect, spacing);
                if fit.is_drawable() {
                    let color = text_box.placeholder_color.with_transparency(text_box.style.transparency);
                    backend.draw_text(font, &placeholder, rect.position() + fit.offset, fit.size, spacing, color)?;
                }
                return Ok(());
            }

            let fit = layout_text(backend, font, &text, &text_box.style, rect, spacing);
            let origin = rect.position() + fit.offset;
            if !text.is_empty() && fit.is_drawable() {
                let key = TextCacheKey {
                    content: text.clone(),
                    size: fit.size,
                    font,
                };
                let (texture, extent) = text_box.cache.get_or_render(backend, key, spacing)?;
                backend.draw_texture(
                    texture,
                    Rect::from_pos_size(vec2(0.0, 0.0), extent),
                    Rect::from_pos_size(origin, extent),
                    text_box.style.draw_color(),
                )?;
            }

            if focused && text_box.editor.caret_visible() {
                let prefix = text.get(..text_box.editor.cursor_byte()).unwrap_or(&text);
                let caret_x = origin.x + backend.measure_text(font, prefix, fit.size, spacing).x;
                backend.draw_line(
                    vec2(caret_x, origin.y),
                    vec2(caret_x, origin.y + fit.size),
                    CARET_THICKNESS,
                    text_box.cursor_color,
                )?;
            }
        }
        Widget::ImageLabel(image) => {
            if let Some(texture) = image.prepare_texture(backend, rect.size())? {
                if let Some((source, dest)) = image.placement(rect) {
                    backend.draw_texture(texture, source, dest, image.draw_tint())?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrollConfig;
    use crate::foundation::math::Color;
    use crate::input::MouseButtons;
    use crate::scene::LineSegment;
    use crate::ui::input::{PointerButton, PointerEventKind};
    use crate::ui::rendering::{DrawCommand, RecordingBackend};
    use crate::ui::widgets::{ScrollFrame, TextLabel, Visual2D};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        tree: SceneTree,
        root: NodeId,
        backend: RecordingBackend,
        focus: FocusArbiter,
        text: TextConfig,
        font: Option<FontId>,
    }

    impl Harness {
        fn new() -> Self {
            let mut tree = SceneTree::new();
            let root = tree.create_root(NodeKind::Folder);
            let mut backend = RecordingBackend::new();
            let font = backend.load_font("font.ttf", 200, &['a']).ok();
            Self {
                tree,
                root,
                backend,
                focus: FocusArbiter::new(),
                text: TextConfig::default(),
                font,
            }
        }

        fn run(&mut self, input: &InputState, topmost: Option<NodeId>) -> Vec<DrawCommand> {
            let mut ctx = FrameContext {
                input,
                topmost,
                focus: &mut self.focus,
                font: self.font,
                text: &self.text,
                tracker: PointerTracker::new(input),
            };
            traverse(&mut self.tree, self.root, &mut self.backend, &mut ctx);
            self.backend.take_commands()
        }
    }

    fn input_at(x: f32, y: f32) -> InputState {
        InputState {
            pointer: vec2(x, y),
            viewport: vec2(100.0, 100.0),
            ..InputState::default()
        }
    }

    #[test]
    fn test_children_drawn_in_z_order() {
        let mut h = Harness::new();
        let colors = [Color::rgb(3, 0, 0), Color::rgb(1, 0, 0), Color::rgb(2, 0, 0)];
        for (z_index, color) in [3, 1, 2].into_iter().zip(colors) {
            h.tree.create(
                NodeKind::frame(Visual2D::fill().with_z_index(z_index).with_background(color, 0.0)),
                Some(h.root),
            );
        }

        let drawn: Vec<u8> = h
            .run(&input_at(0.0, 0.0), None)
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::RoundedRect { color, .. } => Some(color.r),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, vec![1, 2, 3]);
    }

    #[test]
    fn test_absolute_rect_cached() {
        let mut h = Harness::new();
        let node = h.tree.create(
            NodeKind::frame(Visual2D::new(vec2(0.25, 0.5), vec2(0.5, 0.25))),
            Some(h.root),
        );
        h.run(&input_at(0.0, 0.0), None);
        assert_eq!(h.tree.visual(node).unwrap().absolute_rect(), Rect::new(25.0, 50.0, 50.0, 25.0));
    }

    #[test]
    fn test_hidden_subtree_not_drawn() {
        let mut h = Harness::new();
        let hidden = h.tree.create(NodeKind::frame(Visual2D::fill().with_visible(false)), Some(h.root));
        h.tree.create(NodeKind::frame(Visual2D::fill()), Some(hidden));

        assert!(h.run(&input_at(0.0, 0.0), None).is_empty());
    }

    #[test]
    fn test_offscreen_node_culled_but_children_visited() {
        let mut h = Harness::new();
        let away = h.tree.create(
            NodeKind::frame(Visual2D::new(vec2(2.0, 2.0), vec2(0.5, 0.5))),
            Some(h.root),
        );
        let child = h.tree.create(
            NodeKind::frame(Visual2D::new(vec2(-4.0, -4.0), vec2(1.0, 1.0))),
            Some(away),
        );

        let commands = h.run(&input_at(0.0, 0.0), None);
        assert_eq!(commands.len(), 1);
        assert_eq!(h.tree.visual(child).unwrap().absolute_rect(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_label_text_drawn() {
        let mut h = Harness::new();
        h.tree.create(
            NodeKind::text_label(Visual2D::fill(), TextLabel::new("hello")),
            Some(h.root),
        );
        let commands = h.run(&input_at(0.0, 0.0), None);
        assert!(commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == "hello")));
    }

    #[test]
    fn test_scroll_frame_clips_and_draws_sliders() {
        let mut h = Harness::new();
        let frame = ScrollFrame::new(&ScrollConfig::default()).with_canvas_size(vec2(1.0, 4.0));
        let scroller = h.tree.create(NodeKind::scroll_frame(Visual2D::fill(), frame), Some(h.root));
        h.tree.create(NodeKind::frame(Visual2D::fill()), Some(scroller));

        let commands = h.run(&input_at(50.0, 50.0), None);
        let push = commands.iter().position(|c| matches!(c, DrawCommand::PushClip(_))).unwrap();
        let pop = commands.iter().position(|c| matches!(c, DrawCommand::PopClip)).unwrap();
        let slider = commands.iter().rposition(|c| matches!(c, DrawCommand::Line { .. })).unwrap();
        assert!(push < pop && pop < slider);
    }

    #[test]
    fn test_wheel_scrolls_only_under_pointer() {
        let mut h = Harness::new();
        let frame = ScrollFrame::new(&ScrollConfig::default()).with_canvas_size(vec2(1.0, 3.0));
        let scroller = h.tree.create(
            NodeKind::scroll_frame(Visual2D::new(vec2(0.0, 0.0), vec2(0.5, 0.5)), frame),
            Some(h.root),
        );

        let mut outside = input_at(90.0, 90.0);
        outside.wheel = -1.0;
        h.run(&outside, None);
        let position = |tree: &SceneTree| tree.get(scroller).unwrap().scroll_frame().unwrap().scroll.canvas_position();
        assert_eq!(position(&h.tree), vec2(0.0, 0.0));

        let mut inside = input_at(10.0, 10.0);
        inside.wheel = -1.0;
        h.run(&inside, None);
        assert_eq!(position(&h.tree), vec2(0.0, 0.5));
    }

    #[test]
    fn test_line_drawn_through_parent() {
        let mut h = Harness::new();
        let panel = h.tree.create(
            NodeKind::frame(Visual2D::new(vec2(0.5, 0.5), vec2(0.5, 0.5)).with_background(Color::BLACK, 1.0)),
            Some(h.root),
        );
        h.tree.create(
            NodeKind::line(LineSegment::new(vec2(0.0, 0.0), vec2(1.0, 0.0))),
            Some(panel),
        );

        let commands = h.run(&input_at(0.0, 0.0), None);
        assert!(matches!(
            commands.as_slice(),
            [DrawCommand::Line { from, to, .. }] if *from == vec2(50.0, 50.0) && *to == vec2(100.0, 50.0)
        ));
    }

    #[test]
    fn test_click_callback_and_self_delete() {
        let mut h = Harness::new();
        let button = h.tree.create(NodeKind::frame(Visual2D::fill().with_active(true)), Some(h.root));
        h.tree.create(NodeKind::frame(Visual2D::fill()), Some(button));
        let clicks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&clicks);
        h.tree.on_pointer(button, PointerEventKind::Press(PointerButton::Primary), move |tree, id| {
            *counter.borrow_mut() += 1;
            tree.delete(id);
        });

        let mut press = input_at(10.0, 10.0);
        press.buttons_pressed = MouseButtons::PRIMARY;
        h.run(&press, Some(button));

        assert_eq!(*clicks.borrow(), 1);
        assert!(!h.tree.contains(button));
        assert!(h.tree.children(h.root).is_empty());
    }

    #[test]
    fn test_tick_runs_for_folders_and_values() {
        let mut h = Harness::new();
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let folder = h.tree.create(NodeKind::Folder, Some(h.root));
        let value = h.tree.create(NodeKind::value(crate::scene::Value::Int(1)), Some(folder));
        for id in [folder, value] {
            let log = Rc::clone(&ticks);
            h.tree.set_on_tick(id, move |_, id| log.borrow_mut().push(id));
        }

        h.run(&input_at(0.0, 0.0), None);
        assert_eq!(*ticks.borrow(), vec![folder, value]);
    }
}
