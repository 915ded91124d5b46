//! Simplified / Traditional identification.
//!
//! Most characters are unchanged by simplification, so only the characters
//! found exclusively in one column count as evidence. The share of
//! exclusively-Simplified characters decides the variant.

use std::collections::HashSet;
use std::fmt;

use crate::config::ClassifierConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterVariant {
    Simplified,
    Traditional,
    /// Evidence absent or too mixed to call
    Unknown,
}

impl CharacterVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            CharacterVariant::Simplified => "Simplified",
            CharacterVariant::Traditional => "Traditional",
            CharacterVariant::Unknown => "Unknown",
        }
    }

    /// One-line message for the user.
    pub fn describe(self) -> &'static str {
        match self {
            CharacterVariant::Simplified => "Simplified character set detected",
            CharacterVariant::Traditional => "Traditional character set detected",
            CharacterVariant::Unknown => "Unknown character set - stats for reference only",
        }
    }
}

impl fmt::Display for CharacterVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share of exclusively-Simplified characters among all exclusive ones, or
/// `None` when no character is exclusive to either column.
pub fn simplified_ratio(simplified: &[char], traditional: &[char]) -> Option<f64> {
    let simp: HashSet<char> = simplified.iter().copied().collect();
    let trad: HashSet<char> = traditional.iter().copied().collect();

    let simp_only = simp.difference(&trad).count();
    let trad_only = trad.difference(&simp).count();

    if simp_only + trad_only == 0 {
        return None;
    }
    Some(simp_only as f64 / (simp_only + trad_only) as f64)
}

pub fn identify_variant(
    simplified: &[char],
    traditional: &[char],
    config: &ClassifierConfig,
) -> CharacterVariant {
    match simplified_ratio(simplified, traditional) {
        None => CharacterVariant::Unknown,
        Some(ratio) if ratio >= config.simplified_bound() => CharacterVariant::Simplified,
        Some(ratio) if ratio <= config.traditional_bound() => CharacterVariant::Traditional,
        Some(_) => CharacterVariant::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn identify(simplified: &str, traditional: &str) -> CharacterVariant {
        identify_variant(&chars(simplified), &chars(traditional), &ClassifierConfig::default())
    }

    #[test]
    fn test_on_threshold() {
        // 9 exclusive simplified, 1 exclusive traditional: exactly 0.90
        assert_eq!(identify("爱气车电话点脑视东", "漢"), CharacterVariant::Simplified);
        // exactly 0.10
        assert_eq!(identify("汉", "愛氣車電話點腦視東"), CharacterVariant::Traditional);
    }

    #[test]
    fn test_shared_characters_are_not_evidence() {
        // 燚 sits in both lists and is ignored: 18 vs 1 exclusive
        assert_eq!(
            identify("爱气车电话点脑视东读对儿饭飞机钟兴个燚", "漢燚"),
            CharacterVariant::Simplified
        );
        assert_eq!(
            identify("汉燚", "愛氣車電話點腦視東讀對兒飯飛機鐘興個燚"),
            CharacterVariant::Traditional
        );
    }

    #[test]
    fn test_below_threshold() {
        // 8 of 10 exclusive characters are simplified
        assert_eq!(identify("爱气车电话点脑视", "漢號"), CharacterVariant::Unknown);
        assert_eq!(identify("汉号", "愛氣車電話點腦視"), CharacterVariant::Unknown);
    }

    #[test]
    fn test_balanced_and_empty() {
        assert_eq!(identify("", ""), CharacterVariant::Unknown);
        assert_eq!(identify("爱气车电话", "愛氣車電話"), CharacterVariant::Unknown);
        assert_eq!(simplified_ratio(&chars("爱气"), &chars("愛氣")), Some(0.5));
        // Only invariant characters matched
        assert_eq!(identify("八八子", "八子"), CharacterVariant::Unknown);
    }

    #[test]
    fn test_duplicates_do_not_weigh() {
        // Set membership only: repeating 汉 does not outvote nine characters
        assert_eq!(
            identify("爱气车电话点脑视东", "漢漢漢漢漢漢漢漢漢漢漢"),
            CharacterVariant::Simplified
        );
    }

    #[test]
    fn test_custom_threshold() {
        let config = ClassifierConfig {
            threshold: 0.75,
            ..ClassifierConfig::default()
        };
        let variant = identify_variant(&chars("爱气车"), &chars("漢"), &config);
        assert_eq!(variant, CharacterVariant::Simplified);
        let variant = identify_variant(&chars("汉"), &chars("愛氣車"), &config);
        assert_eq!(variant, CharacterVariant::Traditional);
    }

    #[test]
    fn test_describe() {
        assert_eq!(CharacterVariant::Unknown.to_string(), "Unknown");
        assert!(CharacterVariant::Traditional.describe().starts_with("Traditional"));
    }
}
