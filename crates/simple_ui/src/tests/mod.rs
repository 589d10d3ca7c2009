//! Cross-module tests driving whole frames through the UI manager

mod text_entry;

use crate::config::UiConfig;
use crate::input::ScriptedInput;
use crate::ui::rendering::RecordingBackend;
use crate::ui::UiManager;

/// Manager with a loaded font on a recording backend
pub(crate) fn headless() -> (UiManager, RecordingBackend) {
    let mut backend = RecordingBackend::new();
    let mut ui = UiManager::new(UiConfig::default());
    ui.load_font(&mut backend).unwrap();
    (ui, backend)
}

/// Run every queued frame
pub(crate) fn play(ui: &mut UiManager, input: &mut ScriptedInput, backend: &mut RecordingBackend) {
    use crate::input::InputBackend;
    while input.poll_events() {
        ui.tick(input, backend).unwrap();
    }
}
