//! Headless UI demo
//!
//! Builds a small form with a name field, a submit button, a counter bound
//! to a value node and a scrolling list of cloned rows. A scripted input
//! session drives it through the engine loop against the recording backend,
//! and the draw list of the last frame is logged.
//!
//! Pass a RON config file path as the first argument to override defaults.

use std::cell::Cell;
use std::rc::Rc;

use simple_ui::foundation::logging;
use simple_ui::prelude::*;
use thiserror::Error;

/// Number of rows in the scrolling list
const ROW_COUNT: usize = 8;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Nodes the demo updates after they are built
#[derive(Default)]
struct FormDemo {
    name_field: Option<NodeId>,
    counter: Option<NodeId>,
    submits: Rc<Cell<u32>>,
}

impl FormDemo {
    fn build_button(ui: &mut UiManager, parent: NodeId, submits: Rc<Cell<u32>>, counter: NodeId) -> NodeId {
        let tree = ui.tree_mut();
        let visual = Visual2D::new(vec2(0.05, 0.2), vec2(0.3, 0.1))
            .with_background(Color::rgb(51, 102, 204), 0.0)
            .with_roundness(0.3, 8)
            .with_active(true);
        let button = tree.create_named(
            NodeKind::text_label(visual, TextLabel::new("Submit").with_style(TextStyle::auto_fit())),
            "SubmitButton",
            parent,
        );

        tree.on_pointer(button, PointerEventKind::Enter, |tree, id| {
            if let Some(visual) = tree.visual_mut(id) {
                visual.background_transparency = 0.3;
            }
        });
        tree.on_pointer(button, PointerEventKind::Leave, |tree, id| {
            if let Some(visual) = tree.visual_mut(id) {
                visual.background_transparency = 0.0;
            }
        });
        tree.on_pointer(button, PointerEventKind::Click(PointerButton::Primary), move |tree, _| {
            submits.set(submits.get() + 1);
            if let Some(Value::Int(count)) = tree.get_mut(counter).and_then(|node| node.value_mut()) {
                *count += 1;
            }
        });
        button
    }

    fn build_list(ui: &mut UiManager, parent: NodeId) {
        let frame = ui
            .new_scroll_frame()
            .with_canvas_size(vec2(1.0, ROW_COUNT as f32 * 0.25));
        let tree = ui.tree_mut();
        let list = tree.create_named(
            NodeKind::scroll_frame(
                Visual2D::new(vec2(0.5, 0.05), vec2(0.45, 0.9)).with_border(Color::BLACK, 1.0),
                frame,
            ),
            "RowList",
            parent,
        );

        let height = 1.0 / ROW_COUNT as f32;
        let template = tree.create_named(
            NodeKind::text_label(
                Visual2D::new(vec2(0.0, 0.0), vec2(1.0, height)).with_active(true),
                TextLabel::new("Row 1"),
            ),
            "Row",
            list,
        );
        for index in 1..ROW_COUNT {
            let Some(row) = tree.clone_subtree(template) else {
                continue;
            };
            if let Some(visual) = tree.visual_mut(row) {
                visual.position.y = index as f32 * height;
            }
            if let Some(label) = tree.get_mut(row).and_then(|node| node.text_label_mut()) {
                label.text = format!("Row {}", index + 1);
            }
        }
    }
}

impl Application for FormDemo {
    fn initialize(&mut self, ui: &mut UiManager) -> Result<(), AppError> {
        let root = ui.root();
        let tree = ui.tree_mut();
        let counter = tree.create_named(NodeKind::value(Value::Int(0)), "SubmitCount", root);
        let counter_label = tree.create_named(
            NodeKind::text_label(
                Visual2D::new(vec2(0.05, 0.35), vec2(0.3, 0.08)),
                TextLabel::new("Submitted 0 times").with_style(TextStyle::auto_fit().with_anchor(TextAnchor::W)),
            ),
            "SubmitLabel",
            root,
        );

        let field = ui.new_text_box().with_placeholder("Your name");
        let name_field = ui.tree_mut().create_named(
            NodeKind::text_box(
                Visual2D::new(vec2(0.05, 0.05), vec2(0.4, 0.1)).with_border(Color::BLACK, 2.0),
                field,
            ),
            "NameField",
            root,
        );

        Self::build_button(ui, root, Rc::clone(&self.submits), counter);
        Self::build_list(ui, root);

        let (tree, signals) = ui.tree_and_signals();
        signals.connect_value(tree, counter, move |tree| {
            let count = match tree.get(counter).and_then(|node| node.value()) {
                Some(Value::Int(count)) => *count,
                _ => return,
            };
            if let Some(label) = tree.get_mut(counter_label).and_then(|node| node.text_label_mut()) {
                label.text = format!("Submitted {count} times");
            }
        });

        ui.toggle_fps_label();
        self.name_field = Some(name_field);
        self.counter = Some(counter);
        log::info!("Demo form built with {} nodes", ui.tree().len());
        Ok(())
    }

    fn update(&mut self, ui: &mut UiManager, _delta_time: f32) -> Result<(), AppError> {
        if let Some(field) = self.name_field {
            if ui.focused() == Some(field) && ui.input().pressed(MouseButtons::SECONDARY) {
                log::debug!("Secondary press while editing the name field");
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, ui: &mut UiManager) {
        let name = self
            .name_field
            .and_then(|id| ui.tree().get(id))
            .and_then(|node| node.text_box())
            .map(|text_box| text_box.editor.text().to_string())
            .unwrap_or_default();
        log::info!("Name field holds {name:?}, submitted {} times", self.submits.get());
        if let Some(counter) = self.counter.and_then(|id| ui.tree().get(id)).and_then(|node| node.value()) {
            log::info!("Counter value: {counter:?}");
        }
    }
}

/// Pointer and keyboard session replayed against the form
fn script(width: f32, height: f32) -> ScriptedInput {
    let mut input = ScriptedInput::new(width, height);
    let px = |x: f32, y: f32| (x * width, y * height);

    let (x, y) = px(0.2, 0.1);
    input.click_at(x, y, MouseButtons::PRIMARY);
    input.key(Key::A, Modifiers::SHIFT);
    input.type_keys(&[Key::D, Key::A]);
    input.language(KeyboardLanguage::Russian);
    input.type_keys(&[Key::Space, Key::L, Key::J, Key::D, Key::F]);
    input.key(Key::Backspace, Modifiers::CONTROL);

    let (x, y) = px(0.2, 0.25);
    input.click_at(x, y, MouseButtons::PRIMARY);
    input.click_at(x, y, MouseButtons::PRIMARY);

    let (x, y) = px(0.7, 0.5);
    input.move_to(x, y);
    for _ in 0..3 {
        input.scroll(-1.0);
    }
    input.idle(2);
    input
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => UiConfig::load_validated(path)?,
        None => UiConfig::default(),
    };
    logging::init_with_level(&config.engine.log_level);

    let width = config.engine.window_width as f32;
    let height = config.engine.window_height as f32;
    let mut engine = Engine::new(config)?;
    let mut backend = RecordingBackend::new();
    let mut input = script(width, height);
    let mut app = FormDemo::default();

    engine.run(&mut app, &mut input, &mut backend)?;

    log::info!("Ran {} frames", engine.frames());
    for command in backend.commands() {
        log::info!("{command:?}");
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        log::error!("Demo failed: {err}");
        eprintln!("Demo failed: {err}");
        std::process::exit(1);
    }
}
