use super::{headless, play};
use crate::foundation::math::vec2;
use crate::input::{Key, KeyboardLanguage, Modifiers, MouseButtons, ScriptedInput};
use crate::scene::NodeKind;
use crate::ui::rendering::DrawCommand;
use crate::ui::widgets::{TextAnchor, TextStyle, Visual2D};
use crate::ui::UiManager;
use crate::foundation::collections::NodeId;

fn focused_field(ui: &mut UiManager, input: &mut ScriptedInput) -> NodeId {
    let root = ui.root();
    let field = ui.new_text_box();
    let id = ui.tree_mut().create(
        NodeKind::text_box(Visual2D::new(vec2(0.0, 0.0), vec2(1.0, 0.5)), field),
        Some(root),
    );
    input.click_at(5.0, 5.0, MouseButtons::PRIMARY);
    id
}

fn text(ui: &UiManager, id: NodeId) -> String {
    ui.tree().get(id).unwrap().text_box().unwrap().editor.text().to_string()
}

#[test]
fn test_word_delete_boundaries() {
    let (mut ui, mut backend) = headless();
    let mut input = ScriptedInput::new(800.0, 200.0);
    let field = focused_field(&mut ui, &mut input);
    input.type_keys(&[
        Key::H, Key::E, Key::L, Key::L, Key::O, Key::Comma, Key::Space,
        Key::W, Key::O, Key::R, Key::L, Key::D,
    ]);
    play(&mut ui, &mut input, &mut backend);
    assert_eq!(text(&ui, field), "hello, world");

    input.key(Key::Backspace, Modifiers::CONTROL);
    play(&mut ui, &mut input, &mut backend);
    assert_eq!(text(&ui, field), "hello, ");

    input.key(Key::Backspace, Modifiers::CONTROL);
    play(&mut ui, &mut input, &mut backend);
    assert_eq!(text(&ui, field), "hello");
}

#[test]
fn test_russian_input_is_codepoint_aware() {
    let (mut ui, mut backend) = headless();
    let mut input = ScriptedInput::new(800.0, 200.0);
    let field = focused_field(&mut ui, &mut input);
    input.language(KeyboardLanguage::Russian);
    input.type_keys(&[Key::H, Key::J]);
    input.type_keys(&[Key::Left]);
    play(&mut ui, &mut input, &mut backend);

    let node = ui.tree().get(field).unwrap();
    let editor = &node.text_box().unwrap().editor;
    assert_eq!(editor.text(), "ро");
    assert_eq!(editor.cursor(), 1);
    assert_eq!(editor.cursor_byte(), 2);
    assert_eq!(editor.offsets().len(), editor.codepoint_count() + 1);
}

#[test]
fn test_backspace_and_arrows() {
    let (mut ui, mut backend) = headless();
    let mut input = ScriptedInput::new(800.0, 200.0);
    let field = focused_field(&mut ui, &mut input);
    input.type_keys(&[Key::A, Key::B, Key::C, Key::Left, Key::Backspace, Key::Right, Key::D]);
    play(&mut ui, &mut input, &mut backend);

    assert_eq!(text(&ui, field), "acd");
}

#[test]
fn test_caps_lock_uppercases() {
    let (mut ui, mut backend) = headless();
    let mut input = ScriptedInput::new(800.0, 200.0);
    let field = focused_field(&mut ui, &mut input);
    input.caps_lock(true);
    input.type_keys(&[Key::Q]);
    input.key(Key::W, Modifiers::SHIFT);
    play(&mut ui, &mut input, &mut backend);

    assert_eq!(text(&ui, field), "QW");
}

#[test]
fn test_keys_ignored_without_focus() {
    let (mut ui, mut backend) = headless();
    let root = ui.root();
    let field = ui.new_text_box();
    let id = ui.tree_mut().create(NodeKind::text_box(Visual2D::fill(), field), Some(root));

    let mut input = ScriptedInput::new(100.0, 100.0);
    input.type_keys(&[Key::A, Key::B]);
    play(&mut ui, &mut input, &mut backend);

    assert_eq!(text(&ui, id), "");
}

#[test]
fn test_focus_moves_and_clears_previous() {
    let (mut ui, mut backend) = headless();
    let root = ui.root();
    let first = ui.new_text_box();
    let second = ui.new_text_box();
    let tree = ui.tree_mut();
    let first = tree.create(
        NodeKind::text_box(Visual2D::new(vec2(0.0, 0.0), vec2(1.0, 0.5)), first),
        Some(root),
    );
    let second = tree.create(
        NodeKind::text_box(Visual2D::new(vec2(0.0, 0.5), vec2(1.0, 0.5)), second),
        Some(root),
    );

    let mut input = ScriptedInput::new(100.0, 100.0);
    input.click_at(10.0, 10.0, MouseButtons::PRIMARY);
    input.type_keys(&[Key::X]);
    input.click_at(10.0, 90.0, MouseButtons::PRIMARY);
    play(&mut ui, &mut input, &mut backend);

    assert_eq!(ui.focused(), Some(second));
    assert_eq!(text(&ui, first), "");
}

#[test]
fn test_placeholder_shown_until_focus() {
    let (mut ui, mut backend) = headless();
    let root = ui.root();
    let field = ui.new_text_box().with_placeholder("Name");
    ui.tree_mut().create(NodeKind::text_box(Visual2D::fill(), field), Some(root));

    let mut input = ScriptedInput::new(400.0, 100.0);
    input.idle(1);
    play(&mut ui, &mut input, &mut backend);
    assert_eq!(backend.drawn_text(), vec!["Name"]);

    input.click_at(10.0, 10.0, MouseButtons::PRIMARY);
    play(&mut ui, &mut input, &mut backend);
    assert!(backend.drawn_text().is_empty());
}

#[test]
fn test_typed_text_rendered_through_cache() {
    let (mut ui, mut backend) = headless();
    let mut input = ScriptedInput::new(800.0, 200.0);
    focused_field(&mut ui, &mut input);
    input.type_keys(&[Key::O, Key::K]);
    play(&mut ui, &mut input, &mut backend);
    let uploads = backend.uploads();

    input.idle(3);
    play(&mut ui, &mut input, &mut backend);
    assert_eq!(backend.uploads(), uploads);
    assert!(backend
        .commands()
        .iter()
        .any(|command| matches!(command, DrawCommand::Texture { .. })));
}

#[test]
fn test_click_places_cursor() {
    let (mut ui, mut backend) = headless();
    let root = ui.root();
    let mut field = ui.new_text_box().with_style(TextStyle::sized(10.0).with_anchor(TextAnchor::NW));
    field.editor.set_text("abcd");
    let id = ui.tree_mut().create(NodeKind::text_box(Visual2D::fill(), field), Some(root));

    let mut input = ScriptedInput::new(400.0, 100.0);
    input.click_at(390.0, 5.0, MouseButtons::PRIMARY);
    play(&mut ui, &mut input, &mut backend);
    assert_eq!(ui.tree().get(id).unwrap().text_box().unwrap().editor.cursor(), 4);

    input.click_at(1.0, 5.0, MouseButtons::PRIMARY);
    play(&mut ui, &mut input, &mut backend);
    assert_eq!(ui.tree().get(id).unwrap().text_box().unwrap().editor.cursor(), 0);
}
