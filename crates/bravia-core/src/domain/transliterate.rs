//! Script detection and kana decomposition.
//!
//! The TV's Japanese keyboard only has the plain gojūon kana plus three
//! modifier keys: `゛` (dakuten), `゜` (handakuten) and `小` (small form).
//! Typing `が` therefore means selecting `か` and then `゛`; typing `っ` means
//! `つ` followed by `小`.  [`transliterate`] rewrites text into that keystroke
//! form and picks the keyboard to type it on.
//!
//! The keyboard has no katakana, so katakana letters are typed as their
//! hiragana counterparts.  Characters with no entry pass through unchanged;
//! the planner later skips anything the chosen keyboard cannot type.

use serde::{Deserialize, Serialize};

use super::keyboard::LayoutKind;

/// Composed kana and the base-keyboard keystrokes that produce them.
const DECOMPOSITIONS: &[(char, &str)] = &[
    // Dakuten
    ('が', "か゛"),
    ('ぎ', "き゛"),
    ('ぐ', "く゛"),
    ('げ', "け゛"),
    ('ご', "こ゛"),
    ('ざ', "さ゛"),
    ('じ', "し゛"),
    ('ず', "す゛"),
    ('ぜ', "せ゛"),
    ('ぞ', "そ゛"),
    ('だ', "た゛"),
    ('ぢ', "ち゛"),
    ('づ', "つ゛"),
    ('で', "て゛"),
    ('ど', "と゛"),
    ('ば', "は゛"),
    ('び', "ひ゛"),
    ('ぶ', "ふ゛"),
    ('べ', "へ゛"),
    ('ぼ', "ほ゛"),
    ('ゔ', "う゛"),
    // Handakuten
    ('ぱ', "は゜"),
    ('ぴ', "ひ゜"),
    ('ぷ', "ふ゜"),
    ('ぺ', "へ゜"),
    ('ぽ', "ほ゜"),
    // Small forms
    ('ぁ', "あ小"),
    ('ぃ', "い小"),
    ('ぅ', "う小"),
    ('ぇ', "え小"),
    ('ぉ', "お小"),
    ('ゕ', "か小"),
    ('ゖ', "け小"),
    ('っ', "つ小"),
    ('ゃ', "や小"),
    ('ゅ', "ゆ小"),
    ('ょ', "よ小"),
    ('ゎ', "わ小"),
];

/// Returns the keystroke sequence for a composed kana, or `None` when `ch`
/// is typed as itself.
pub fn decompose(ch: char) -> Option<&'static str> {
    DECOMPOSITIONS
        .iter()
        .find(|(composed, _)| *composed == ch)
        .map(|(_, keys)| *keys)
}

/// Maps a katakana letter (U+30A1–U+30F6) to the hiragana letter with the
/// same sound.  Everything else, including `ー` and `・`, is returned as is.
pub fn to_hiragana(ch: char) -> char {
    if ('\u{30A1}'..='\u{30F6}').contains(&ch) {
        char::from_u32(ch as u32 - 0x60).unwrap_or(ch)
    } else {
        ch
    }
}

/// Iterates over the whole decomposition table.
pub fn decompositions() -> impl Iterator<Item = (char, &'static str)> {
    DECOMPOSITIONS.iter().copied()
}

/// Returns `true` for code points in the Hiragana (U+3040–U+309F) or
/// Katakana (U+30A0–U+30FF) blocks.
pub fn is_kana(ch: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&ch) || ('\u{30A0}'..='\u{30FF}').contains(&ch)
}

/// Picks the keyboard for `text`: Japanese as soon as one kana appears.
pub fn detect_script(text: &str) -> LayoutKind {
    if text.chars().any(is_kana) {
        LayoutKind::Japanese
    } else {
        LayoutKind::Latin
    }
}

/// The result of [`transliterate`]: the keyboard to use and the exact
/// sequence of characters to select on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transliteration {
    pub layout: LayoutKind,
    pub chars: Vec<char>,
}

impl Transliteration {
    /// The expanded characters as a `String`.
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Rewrites `text` into keyboard-addressable characters.
///
/// - Japanese text: katakana is folded to hiragana, then each composed kana
///   becomes its keystroke sequence.
/// - Latin text: upper-cased, since the Latin keyboard has no lower case.
///
/// This never fails.  Characters neither keyboard can type are kept and
/// skipped by the planner.
pub fn transliterate(text: &str) -> Transliteration {
    match detect_script(text) {
        LayoutKind::Japanese => {
            let mut chars = Vec::with_capacity(text.len());
            for ch in text.chars().map(to_hiragana) {
                match decompose(ch) {
                    Some(keys) => chars.extend(keys.chars()),
                    None => chars.push(ch),
                }
            }
            Transliteration {
                layout: LayoutKind::Japanese,
                chars,
            }
        }
        LayoutKind::Latin => Transliteration {
            layout: LayoutKind::Latin,
            chars: text.to_uppercase().chars().collect(),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
