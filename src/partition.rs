//! Split filtered hanzi against the reference columns.

use crate::vocabulary::ReferenceVocabulary;

/// Hanzi of one text sorted by which reference column they matched.
///
/// Order and duplicates follow the source text. A character present in
/// both columns (e.g. 八) lands in both `simplified` and `traditional`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionResult {
    pub simplified: Vec<char>,
    pub traditional: Vec<char>,
    /// Hanzi in neither column
    pub outliers: Vec<char>,
}

pub fn partition_hanzi<I>(hanzi: I, vocabulary: &ReferenceVocabulary) -> PartitionResult
where
    I: IntoIterator<Item = char>,
{
    let mut result = PartitionResult::default();

    for zi in hanzi {
        let in_simplified = vocabulary.contains_simplified(zi);
        let in_traditional = vocabulary.contains_traditional(zi);

        if in_simplified {
            result.simplified.push(zi);
        }
        if in_traditional {
            result.traditional.push(zi);
        }
        if !in_simplified && !in_traditional {
            result.outliers.push(zi);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_hanzi;
    use crate::test_support::sample_vocabulary;

    #[test]
    fn test_partition() {
        let vocab = sample_vocabulary();
        let result = partition_hanzi(filter_hanzi("爱愛八龘爱"), &vocab);
        assert_eq!(result.simplified, vec!['爱', '八', '爱']);
        assert_eq!(result.traditional, vec!['愛', '八']);
        assert_eq!(result.outliers, vec!['龘']);
    }

    #[test]
    fn test_every_character_is_placed() {
        let vocab = sample_vocabulary();
        let input: Vec<char> = filter_hanzi("我們學習漢语，龘靐齉爲为").collect();
        let result = partition_hanzi(input.iter().copied(), &vocab);

        for zi in &input {
            assert!(
                result.simplified.contains(zi)
                    || result.traditional.contains(zi)
                    || result.outliers.contains(zi)
            );
        }
        for zi in &result.outliers {
            assert!(!vocab.contains_simplified(*zi));
            assert!(!vocab.contains_traditional(*zi));
        }
    }

    #[test]
    fn test_empty() {
        let vocab = sample_vocabulary();
        assert_eq!(partition_hanzi(filter_hanzi(""), &vocab), PartitionResult::default());
    }
}
