//! Per-character occurrence counts.

use std::collections::HashMap;

pub type CharCounts = HashMap<char, u64>;

/// Count occurrences of each character.
pub fn count_chars<I>(hanzi: I) -> CharCounts
where
    I: IntoIterator<Item = char>,
{
    let mut counts = CharCounts::new();
    for zi in hanzi {
        *counts.entry(zi).or_insert(0) += 1;
    }
    counts
}
