//! Physical key to character mapping
//!
//! Every printable key carries four legends: default and shifted for the
//! English layout, then default and shifted for the Russian layout.

use super::{Key, KeyboardLanguage};

/// Legends printed on one physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLegend {
    /// Physical key
    pub key: Key,
    /// `[english, english shifted, russian, russian shifted]`
    pub legends: [&'static str; 4],
}

const fn legend(key: Key, en: &'static str, en_shift: &'static str, ru: &'static str, ru_shift: &'static str) -> KeyLegend {
    KeyLegend {
        key,
        legends: [en, en_shift, ru, ru_shift],
    }
}

/// The full character map, in the order keys are scanned each frame
pub const KEY_MAP: [KeyLegend; 48] = [
    legend(Key::One, "1", "!", "1", "!"),
    legend(Key::Two, "2", "@", "2", "\""),
    legend(Key::Three, "3", "#", "3", "№"),
    legend(Key::Four, "4", "$", "4", ";"),
    legend(Key::Five, "5", "%", "5", "%"),
    legend(Key::Six, "6", "^", "6", ":"),
    legend(Key::Seven, "7", "&", "7", "?"),
    legend(Key::Eight, "8", "*", "8", "*"),
    legend(Key::Nine, "9", "(", "9", "("),
    legend(Key::Zero, "0", ")", "0", ")"),
    legend(Key::Q, "q", "Q", "й", "Й"),
    legend(Key::W, "w", "W", "ц", "Ц"),
    legend(Key::E, "e", "E", "у", "У"),
    legend(Key::R, "r", "R", "к", "К"),
    legend(Key::T, "t", "T", "е", "Е"),
    legend(Key::Y, "y", "Y", "н", "Н"),
    legend(Key::U, "u", "U", "г", "Г"),
    legend(Key::I, "i", "I", "ш", "Ш"),
    legend(Key::O, "o", "O", "щ", "Щ"),
    legend(Key::P, "p", "P", "з", "З"),
    legend(Key::A, "a", "A", "ф", "Ф"),
    legend(Key::S, "s", "S", "ы", "Ы"),
    legend(Key::D, "d", "D", "в", "В"),
    legend(Key::F, "f", "F", "а", "А"),
    legend(Key::G, "g", "G", "п", "П"),
    legend(Key::H, "h", "H", "р", "Р"),
    legend(Key::J, "j", "J", "о", "О"),
    legend(Key::K, "k", "K", "л", "Л"),
    legend(Key::L, "l", "L", "д", "Д"),
    legend(Key::Semicolon, ";", ":", "ж", "Ж"),
    legend(Key::Apostrophe, "'", "\"", "э", "Э"),
    legend(Key::Z, "z", "Z", "я", "Я"),
    legend(Key::X, "x", "X", "ч", "Ч"),
    legend(Key::C, "c", "C", "с", "С"),
    legend(Key::V, "v", "V", "м", "М"),
    legend(Key::B, "b", "B", "и", "И"),
    legend(Key::N, "n", "N", "т", "Т"),
    legend(Key::M, "m", "M", "ь", "Ь"),
    legend(Key::Comma, ",", "<", "б", "Б"),
    legend(Key::Period, ".", ">", "ю", "Ю"),
    legend(Key::Slash, "/", "?", ".", ","),
    legend(Key::Space, " ", " ", " ", " "),
    legend(Key::Minus, "-", "_", "-", "_"),
    legend(Key::Equal, "=", "+", "=", "+"),
    legend(Key::LeftBracket, "[", "{", "х", "Х"),
    legend(Key::RightBracket, "]", "}", "ъ", "Ъ"),
    legend(Key::Backslash, "\\", "|", "\\", "/"),
    legend(Key::Grave, "`", "~", "ё", "Ё"),
];

/// Character produced by `key` under the given layout state
///
/// Caps lock acts like shift for every key, digits included.
/// Returns `None` for keys outside the character map.
pub fn legend_for(key: Key, language: KeyboardLanguage, shift: bool, caps_lock: bool) -> Option<&'static str> {
    let mut index = match language {
        KeyboardLanguage::Russian => 2,
        KeyboardLanguage::English | KeyboardLanguage::Other => 0,
    };
    if shift || caps_lock {
        index += 1;
    }

    KEY_MAP
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.legends[index])
}

/// Every character the map can produce, for loading font glyphs
pub fn glyphs() -> impl Iterator<Item = char> {
    KEY_MAP
        .iter()
        .flat_map(|entry| entry.legends.iter())
        .flat_map(|legend| legend.chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_selection() {
        assert_eq!(legend_for(Key::Q, KeyboardLanguage::English, false, false), Some("q"));
        assert_eq!(legend_for(Key::Q, KeyboardLanguage::English, true, false), Some("Q"));
        assert_eq!(legend_for(Key::Q, KeyboardLanguage::Russian, false, false), Some("й"));
        assert_eq!(legend_for(Key::Q, KeyboardLanguage::Russian, false, true), Some("Й"));
        assert_eq!(legend_for(Key::One, KeyboardLanguage::English, false, true), Some("!"));
        assert_eq!(legend_for(Key::Z, KeyboardLanguage::Other, false, false), Some("z"));
    }

    #[test]
    fn test_editing_keys_have_no_legend() {
        for key in Key::EDITING {
            assert_eq!(legend_for(key, KeyboardLanguage::English, false, false), None);
        }
    }

    #[test]
    fn test_every_legend_is_one_codepoint() {
        for entry in &KEY_MAP {
            for legend in entry.legends {
                assert_eq!(legend.chars().count(), 1, "{:?}", entry.key);
            }
        }
    }

    #[test]
    fn test_every_mapped_key_resolves() {
        for entry in &KEY_MAP {
            for language in [KeyboardLanguage::English, KeyboardLanguage::Russian] {
                for shift in [false, true] {
                    let legend = legend_for(entry.key, language, shift, false);
                    assert!(legend.is_some(), "{:?} {language:?} shift={shift}", entry.key);
                }
            }
            let repeats = KEY_MAP.iter().filter(|other| other.key == entry.key).count();
            assert_eq!(repeats, 1, "{:?} mapped twice", entry.key);
        }
    }

    #[test]
    fn test_glyphs_include_cyrillic() {
        let glyphs: Vec<char> = glyphs().collect();
        assert!(glyphs.contains(&'ё'));
        assert!(glyphs.contains(&'№'));
    }
}
