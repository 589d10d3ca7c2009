//! Editable single-line text box
//!
//! [`TextEditor`] owns the text, the codepoint-offset table and the cursor.
//! All cursor positions are codepoint indices; byte positions only appear
//! when splicing the underlying string.

use super::core::TextStyle;
use crate::config::TextConfig;
use crate::foundation::math::Color;
use crate::foundation::time::Cooldown;
use crate::input::{keymap, Key, KeyboardLanguage};
use crate::ui::rendering::TextCache;

/// Characters that end a word for Ctrl+Backspace
const WORD_BREAKS: &[u8] = b".,:;?!/\\'\"`~";

/// Byte offset of every codepoint start, followed by the total byte length
///
/// Lead bytes decide the step (1, 2, 3 or 4 bytes). A byte that is not a
/// valid lead byte advances by one.
pub fn codepoint_offsets(bytes: &[u8]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(bytes.len() + 1);
    let mut index = 0;
    while index < bytes.len() {
        offsets.push(index);
        let lead = bytes[index];
        index += if lead < 0x80 {
            1
        } else if lead & 0xE0 == 0xC0 {
            2
        } else if lead & 0xF0 == 0xE0 {
            3
        } else if lead & 0xF8 == 0xF0 {
            4
        } else {
            1
        };
    }
    offsets.push(bytes.len());
    offsets
}

/// Cursor-based text editing state
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditor {
    text: String,
    offsets: Vec<usize>,
    cursor: usize,
    max_symbols: usize,
    focused: bool,
    blink: Cooldown,
}

impl TextEditor {
    /// Create an empty editor
    pub fn new(max_symbols: usize, blink_seconds: f32) -> Self {
        Self {
            text: String::new(),
            offsets: vec![0],
            cursor: 0,
            max_symbols,
            focused: false,
            blink: Cooldown::new(blink_seconds),
        }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text; the cursor is clamped to the new length
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rebuild();
        self.cursor = self.cursor.min(self.codepoint_count());
    }

    /// Remove all text and return the cursor to the start
    pub fn clear(&mut self) {
        self.text.clear();
        self.rebuild();
        self.cursor = 0;
    }

    /// Codepoint-offset table (always `codepoint_count() + 1` entries)
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of codepoints in the text
    pub fn codepoint_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Cursor position as a codepoint index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to `[0, codepoint_count()]`
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.codepoint_count());
    }

    /// Byte offset of the cursor
    pub fn cursor_byte(&self) -> usize {
        self.offsets[self.cursor.min(self.codepoint_count())]
    }

    /// Maximum number of codepoints accepted
    pub fn max_symbols(&self) -> usize {
        self.max_symbols
    }

    /// Change the codepoint limit; existing text is kept
    pub fn set_max_symbols(&mut self, max_symbols: usize) {
        self.max_symbols = max_symbols;
    }

    /// Whether this editor holds keyboard focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the caret should be drawn this frame
    pub fn caret_visible(&self) -> bool {
        self.focused && self.blink.is_on()
    }

    /// Gain focus with the caret shown
    pub fn focus(&mut self) {
        self.focused = true;
        self.blink.reset();
    }

    /// Lose focus; the text is erased
    pub fn defocus(&mut self) {
        self.focused = false;
        self.clear();
    }

    /// Insert one legend at the cursor
    ///
    /// Returns false when the text already holds `max_symbols` codepoints.
    pub fn insert(&mut self, legend: &str) -> bool {
        if self.codepoint_count() >= self.max_symbols || legend.is_empty() {
            return false;
        }
        let at = self.cursor_byte();
        self.text.insert_str(at, legend);
        self.rebuild();
        self.set_cursor(self.cursor + legend.chars().count());
        self.blink.reset();
        true
    }

    /// Insert the legend for a physical key under the given layout state
    pub fn insert_key(&mut self, key: Key, language: KeyboardLanguage, shift: bool, caps_lock: bool) -> bool {
        match keymap::legend_for(key, language, shift, caps_lock) {
            Some(legend) => self.insert(legend),
            None => false,
        }
    }

    /// Remove the codepoint before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.offsets[self.cursor - 1];
        let end = self.offsets[self.cursor];
        self.text.replace_range(start..end, "");
        self.rebuild();
        self.cursor -= 1;
        self.blink.reset();
        true
    }

    /// Remove the word before the cursor
    ///
    /// Scanning backwards, a word-break character ends the word and is
    /// removed with it. Spaces directly before the cursor are skipped, then
    /// the run of non-space characters before them is removed.
    pub fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let bytes = self.text.as_bytes();
        let end = self.offsets[self.cursor];
        let mut lower = end;
        let mut skipping_space = false;
        let mut first = true;

        for index in (0..self.cursor).rev() {
            let start = self.offsets[index];
            let byte = bytes[start];
            if WORD_BREAKS.contains(&byte) {
                lower = start;
                break;
            } else if byte == b' ' && first {
                skipping_space = true;
                continue;
            } else if byte == b' ' && !skipping_space {
                break;
            } else if byte != b' ' && skipping_space {
                skipping_space = false;
            }
            first = false;
            lower = start;
        }

        if lower == end {
            return false;
        }
        self.text.replace_range(lower..end, "");
        self.rebuild();
        self.cursor = self.offsets.iter().position(|&offset| offset == lower).unwrap_or(0);
        self.blink.reset();
        true
    }

    /// Move the cursor one codepoint left
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.blink.reset();
    }

    /// Move the cursor one codepoint right
    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
        self.blink.reset();
    }

    /// Place the cursor at the boundary nearest `click_x`
    ///
    /// `click_x` is measured from the text origin, and `measure` returns the
    /// width of a prefix of the typed text. The placeholder is never
    /// measured, so a click on an empty box always lands at 0.
    pub fn place_cursor(&mut self, click_x: f32, mut measure: impl FnMut(&str) -> f32) {
        self.cursor = 0;
        let mut previous = measure("");
        for index in 1..self.offsets.len() {
            let current = measure(&self.text[..self.offsets[index]]);
            if click_x < (previous + current) / 2.0 {
                self.cursor = index - 1;
                break;
            }
            self.cursor = index;
            previous = current;
        }
        self.blink.reset();
    }

    /// Advance the caret blink by one frame
    pub fn tick_blink(&mut self, delta_time: f32) {
        self.blink.tick(delta_time);
    }

    fn rebuild(&mut self) {
        self.offsets = codepoint_offsets(self.text.as_bytes());
    }
}

/// Text box widget payload
#[derive(Debug)]
pub struct TextBox {
    /// Editing state
    pub editor: TextEditor,
    /// Appearance of typed text
    pub style: TextStyle,
    /// Shown when empty and unfocused
    pub placeholder: String,
    /// Placeholder colour
    pub placeholder_color: Color,
    /// Caret colour
    pub cursor_color: Color,
    pub(crate) cache: TextCache,
}

impl TextBox {
    /// Create a text box from the text defaults
    pub fn new(config: &TextConfig) -> Self {
        Self {
            editor: TextEditor::new(config.default_max_symbols, config.cursor_blink_seconds),
            style: TextStyle::sized(config.default_text_size),
            placeholder: config.placeholder.clone(),
            placeholder_color: config.placeholder_color,
            cursor_color: Color::BLACK,
            cache: TextCache::default(),
        }
    }

    /// Replace the placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replace the style
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Text the box currently displays, placeholder included
    pub fn display_text(&self) -> &str {
        if self.editor.text().is_empty() {
            &self.placeholder
        } else {
            self.editor.text()
        }
    }

    /// Copy without focus or cached rendering
    pub fn duplicate(&self) -> Self {
        let mut editor = self.editor.clone();
        editor.focused = false;
        editor.blink.reset();
        Self {
            editor,
            style: self.style.clone(),
            placeholder: self.placeholder.clone(),
            placeholder_color: self.placeholder_color,
            cursor_color: self.cursor_color,
            cache: TextCache::default(),
        }
    }
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new(&TextConfig::default())
    }
}
