//! Hanzi filter.
//!
//! Selects probable Chinese characters by code point: CJK Unified
//! Ideographs, Extension A and Extension B. No check is made that a code
//! point is actually assigned.

use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::{Range, RangeInclusive};
use std::str::Chars;

use lazy_static::lazy_static;
use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

const CJK_RANGES: [RangeInclusive<u32>; 3] = [
    0x4E00..=0x9FFF,   // CJK Unified Ideographs
    0x3400..=0x4DBF,   // Extension A
    0x20000..=0x2A6DF, // Extension B
];

// Invisible directional and formatting marks
const BIDI_CONTROLS: Range<u32> = 8206..8287;

lazy_static! {
    static ref EXCLUDED: HashSet<char> = {
        let symbols = ['–', '—', '‘', '’', '“', '”', '…', '⊼', '⁆', '∕', '。'];
        // Unrecognised hanzi with no matching pinyin
        let no_pinyin = ['㤙'];
        symbols.into_iter().chain(no_pinyin).collect()
    };
}

/// Check whether a single character is a (possible) hanzi.
pub fn is_hanzi(zi: char) -> bool {
    let code = zi as u32;
    if BIDI_CONTROLS.contains(&code) || EXCLUDED.contains(&zi) {
        return false;
    }
    CJK_RANGES.iter().any(|range| range.contains(&code))
}

/// Lazy, restartable sequence of the hanzi in a text, in order and with
/// duplicates. Clone it to scan again from the same point.
#[derive(Debug, Clone)]
pub struct Hanzi<'a> {
    chars: Chars<'a>,
}

impl Iterator for Hanzi<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.chars.by_ref().find(|&zi| is_hanzi(zi))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.chars.size_hint().1)
    }
}

pub fn filter_hanzi(text: &str) -> Hanzi<'_> {
    Hanzi { chars: text.chars() }
}

/// NFC-normalise text, folding CJK compatibility ideographs onto their
/// unified forms. Borrows when the text is already in NFC.
pub fn normalize(text: &str) -> Cow<'_, str> {
    match is_nfc_quick(text.chars()) {
        IsNormalized::Yes => Cow::Borrowed(text),
        _ => Cow::Owned(text.nfc().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_hanzi_in_order() {
        let text = "Hello 今天天氣很好! 123";
        let hanzi: String = filter_hanzi(text).collect();
        assert_eq!(hanzi, "今天天氣很好");
    }

    #[test]
    fn test_range_edges() {
        assert!(is_hanzi('\u{4E00}'));
        assert!(is_hanzi('\u{9FFF}'));
        assert!(is_hanzi('\u{3400}'));
        assert!(is_hanzi('\u{4DBF}'));
        assert!(is_hanzi('\u{20000}'));
        assert!(is_hanzi('\u{2A6DF}'));

        assert!(!is_hanzi('\u{4DFF}'));
        assert!(!is_hanzi('\u{A000}'));
        assert!(!is_hanzi('\u{33FF}'));
        assert!(!is_hanzi('\u{2A6E0}'));
        assert!(!is_hanzi('a'));
    }

    #[test]
    fn test_exclusions() {
        assert!(!is_hanzi('㤙'));
        assert!(!is_hanzi('。'));
        assert!(!is_hanzi('…'));
        assert!(!is_hanzi('\u{200E}'));
        assert!(!is_hanzi('\u{202E}'));
        let hanzi: Vec<char> = filter_hanzi("“你好”，㤙。\u{200F}").collect();
        assert_eq!(hanzi, vec!['你', '好']);
    }

    #[test]
    fn test_idempotent() {
        let once: String = filter_hanzi("他说：「我們走吧！」 ok").collect();
        let twice: String = filter_hanzi(&once).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_restartable() {
        let hanzi = filter_hanzi("a爱b爱c");
        let first: Vec<char> = hanzi.clone().collect();
        let second: Vec<char> = hanzi.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!['爱', '爱']);
    }

    #[test]
    fn test_empty_and_latin() {
        assert_eq!(filter_hanzi("").count(), 0);
        assert_eq!(filter_hanzi("Sing, O goddess, the anger of Achilles").count(), 0);
    }

    #[test]
    fn test_normalize_folds_compatibility_ideographs() {
        // U+F900 is a compatibility form of U+8C48
        let text = "\u{F900}";
        assert!(!is_hanzi('\u{F900}'));
        let normalized = normalize(text);
        assert_eq!(normalized, "\u{8C48}");
        assert_eq!(filter_hanzi(&normalized).count(), 1);

        assert!(matches!(normalize("已经规范"), Cow::Borrowed(_)));
    }
}
