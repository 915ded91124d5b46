//! Grade-level and cumulative statistics.
//!
//! One row per HSK band plus a `[10+]` row for everything beyond HSK7-9.
//! Percentages are whole numbers relative to the whole-text totals and are
//! rounded half up.

use std::fmt;

use crate::aggregate::{GradeCounts, GradeTally};
use crate::error::AnalysisError;
use crate::grade::{GradeLabel, HSK_GRADES, HskGrade};

/// Column headers, in row field order.
pub const STATS_COLUMNS: [&str; 9] = [
    "HSK Grade",
    "No. Hanzi (Unique)",
    "% of Total Unique",
    "Cumul. Unique",
    "% of Cumul. Unique",
    "No. Hanzi (Count)",
    "% of Total",
    "Cumul. Count",
    "% of Cumul. Count",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsRow {
    pub label: GradeLabel,
    pub unique: u64,
    pub unique_pct: u32,
    pub cumulative_unique: u64,
    pub cumulative_unique_pct: u32,
    pub count: u64,
    pub count_pct: u32,
    pub cumulative_count: u64,
    pub cumulative_count_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTable {
    rows: Vec<StatsRow>,
}

/// Running totals from HSK1 upwards.
pub fn cumulative_counts(counts: &GradeCounts) -> [GradeTally; HSK_GRADES] {
    let mut cumulative = [GradeTally::default(); HSK_GRADES];
    let mut running = GradeTally::default();
    for (grade, tally) in counts.iter() {
        running.unique += tally.unique;
        running.count += tally.count;
        cumulative[grade.index()] = running;
    }
    cumulative
}

fn percent(part: u64, whole: u64) -> u32 {
    let (part, whole) = (u128::from(part), u128::from(whole));
    ((part * 200 + whole) / (whole * 2)) as u32
}

impl StatsTable {
    /// Fails with `NoHanziFound` when the text had no hanzi at all.
    pub fn compute(counts: &GradeCounts) -> Result<Self, AnalysisError> {
        if counts.is_empty() {
            return Err(AnalysisError::NoHanziFound);
        }

        let total = counts.total;
        let cumulative = cumulative_counts(counts);

        let mut rows: Vec<StatsRow> = counts
            .iter()
            .map(|(grade, tally)| {
                let cumul = cumulative[grade.index()];
                StatsRow {
                    label: GradeLabel::Hsk(grade),
                    unique: tally.unique,
                    unique_pct: percent(tally.unique, total.unique),
                    cumulative_unique: cumul.unique,
                    cumulative_unique_pct: percent(cumul.unique, total.unique),
                    count: tally.count,
                    count_pct: percent(tally.count, total.count),
                    cumulative_count: cumul.count,
                    cumulative_count_pct: percent(cumul.count, total.count),
                }
            })
            .collect();

        let hsk = cumulative[HskGrade::MAX.index()];
        if hsk.unique > total.unique || hsk.count > total.count {
            log::warn!(
                "HSK bands exceed text totals (unique {}/{}, count {}/{}), beyond-HSK row clamped to zero",
                hsk.unique,
                total.unique,
                hsk.count,
                total.count
            );
        }
        let beyond_unique = total.unique.saturating_sub(hsk.unique);
        let beyond_count = total.count.saturating_sub(hsk.count);

        rows.push(StatsRow {
            label: GradeLabel::BeyondHsk,
            unique: beyond_unique,
            unique_pct: percent(beyond_unique, total.unique),
            cumulative_unique: total.unique,
            cumulative_unique_pct: 100,
            count: beyond_count,
            count_pct: percent(beyond_count, total.count),
            cumulative_count: total.count,
            cumulative_count_pct: 100,
        });

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[StatsRow] {
        &self.rows
    }

    pub fn grade(&self, grade: HskGrade) -> &StatsRow {
        &self.rows[grade.index()]
    }

    pub fn beyond_hsk(&self) -> &StatsRow {
        &self.rows[HSK_GRADES]
    }
}

impl fmt::Display for StatsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| {} |", STATS_COLUMNS.join(" | "))?;
        writeln!(f, "|{}", "---|".repeat(STATS_COLUMNS.len()))?;
        for row in &self.rows {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                row.label,
                row.unique,
                row.unique_pct,
                row.cumulative_unique,
                row.cumulative_unique_pct,
                row.count,
                row.count_pct,
                row.cumulative_count,
                row.cumulative_count_pct
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(unique: u64, count: u64) -> GradeTally {
        GradeTally { unique, count }
    }

    fn sample_counts() -> GradeCounts {
        GradeCounts::new(
            tally(10, 40),
            [
                tally(4, 20),
                tally(2, 8),
                tally(1, 3),
                tally(0, 0),
                tally(0, 0),
                tally(0, 0),
                tally(1, 1),
            ],
        )
    }

    #[test]
    fn test_cumulative_counts() {
        let cumulative = cumulative_counts(&sample_counts());
        let unique: Vec<u64> = cumulative.iter().map(|t| t.unique).collect();
        let count: Vec<u64> = cumulative.iter().map(|t| t.count).collect();
        assert_eq!(unique, vec![4, 6, 7, 7, 7, 7, 8]);
        assert_eq!(count, vec![20, 28, 31, 31, 31, 31, 32]);
    }

    #[test]
    fn test_percentages() {
        let table = StatsTable::compute(&sample_counts()).unwrap();
        assert_eq!(table.rows().len(), 8);

        let hsk1 = table.grade(HskGrade::MIN);
        assert_eq!(hsk1.unique_pct, 40);
        assert_eq!(hsk1.count_pct, 50);

        let unique_pct: Vec<u32> = table.rows().iter().map(|r| r.cumulative_unique_pct).collect();
        assert_eq!(unique_pct, vec![40, 60, 70, 70, 70, 70, 80, 100]);

        // 31/40 = 77.5 rounds up
        let count_pct: Vec<u32> = table.rows().iter().map(|r| r.cumulative_count_pct).collect();
        assert_eq!(count_pct, vec![50, 70, 78, 78, 78, 78, 80, 100]);

        // 3/40 = 7.5, 1/40 = 2.5
        let hsk3 = table.grade(HskGrade::new(3).unwrap());
        assert_eq!(hsk3.count_pct, 8);
        assert_eq!(table.grade(HskGrade::MAX).count_pct, 3);
    }

    #[test]
    fn test_beyond_hsk_row() {
        let table = StatsTable::compute(&sample_counts()).unwrap();
        let beyond = table.beyond_hsk();
        assert_eq!(beyond.label, GradeLabel::BeyondHsk);
        assert_eq!(beyond.unique, 2);
        assert_eq!(beyond.unique_pct, 20);
        assert_eq!(beyond.count, 8);
        assert_eq!(beyond.count_pct, 20);
        assert_eq!(beyond.cumulative_unique, 10);
        assert_eq!(beyond.cumulative_count, 40);
        assert_eq!(beyond.cumulative_count_pct, 100);
    }

    #[test]
    fn test_monotonic_and_closed() {
        let table = StatsTable::compute(&sample_counts()).unwrap();
        let rows = table.rows();
        for pair in rows.windows(2) {
            assert!(pair[1].cumulative_unique >= pair[0].cumulative_unique);
            assert!(pair[1].cumulative_count >= pair[0].cumulative_count);
        }
        let hsk = table.grade(HskGrade::MAX);
        let beyond = table.beyond_hsk();
        assert!(hsk.cumulative_unique <= beyond.cumulative_unique);
        let closure = hsk.cumulative_unique_pct + beyond.unique_pct;
        assert!((99..=101).contains(&closure));
    }

    #[test]
    fn test_no_hanzi() {
        let empty = GradeCounts::new(GradeTally::default(), [GradeTally::default(); HSK_GRADES]);
        assert_eq!(StatsTable::compute(&empty), Err(AnalysisError::NoHanziFound));
    }

    #[test]
    fn test_all_outliers() {
        let counts = GradeCounts::new(tally(3, 5), [GradeTally::default(); HSK_GRADES]);
        let table = StatsTable::compute(&counts).unwrap();
        assert!(table.rows()[..HSK_GRADES].iter().all(|r| r.cumulative_unique_pct == 0));
        assert_eq!(table.beyond_hsk().unique_pct, 100);
        assert_eq!(table.beyond_hsk().count_pct, 100);
    }

    #[test]
    fn test_overcount_is_clamped() {
        let mut grades = [GradeTally::default(); HSK_GRADES];
        grades[1] = tally(2, 3);
        let counts = GradeCounts::new(tally(2, 2), grades);
        let table = StatsTable::compute(&counts).unwrap();
        assert_eq!(table.beyond_hsk().unique, 0);
        assert_eq!(table.beyond_hsk().count, 0);
    }

    #[test]
    fn test_display() {
        let rendered = StatsTable::compute(&sample_counts()).unwrap().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("| HSK Grade |"));
        assert!(lines[8].starts_with("| [7-9] | 1 |"));
        assert!(lines[9].starts_with("| [10+] | 2 | 20 |"));
    }
}
