//! Cross-sectional percentile ranking.
//!
//! Ranks are computed within a single date across securities, never across
//! time. Tied values share their average rank, so the output is
//! deterministic regardless of input ordering. NaN entries are excluded
//! from the ranking and rank NaN; percentiles are therefore computed over
//! the reduced set, which is what lets a prior screen's mask narrow the
//! candidate pool before the next screen ranks it.

use crate::domain::panel::Panel;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest value ranks first.
    Ascending,
    /// Largest value ranks first.
    Descending,
}

/// Percentile ranks in (0, 1] for one cross-section.
///
/// Each finite entry gets `rank / finite_count` where tied entries share
/// the average of the positions they span. NaN entries stay NaN.
pub fn percentile_ranks(values: &[f64], direction: Direction) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    let mut order: Vec<usize> = (0..values.len())
        .filter(|i| values[*i].is_finite())
        .collect();
    let count = order.len();
    if count == 0 {
        return out;
    }

    order.sort_by(|&a, &b| {
        let cmp = values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal);
        let cmp = match direction {
            Direction::Ascending => cmp,
            Direction::Descending => cmp.reverse(),
        };
        cmp.then(a.cmp(&b))
    });

    let mut start = 0;
    while start < count {
        let mut end = start;
        while end + 1 < count && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        // average of 1-based positions start+1 ..= end+1
        let rank = (start + end + 2) as f64 / 2.0;
        for k in start..=end {
            out[order[k]] = rank / count as f64;
        }
        start = end + 1;
    }
    out
}

/// Apply [`percentile_ranks`] to every date of a panel.
pub fn rank_rows(panel: &Panel, direction: Direction) -> Panel {
    let mut out = Panel::filled(
        panel.dates().to_vec(),
        panel.securities().to_vec(),
        f64::NAN,
    );
    for row in 0..panel.n_dates() {
        let ranks = percentile_ranks(panel.row(row), direction);
        for (col, rank) in ranks.iter().enumerate() {
            out.set(row, col, *rank);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn descending_ranks_largest_first() {
        let ranks = percentile_ranks(&[10.0, 30.0, 20.0], Direction::Descending);
        assert!((ranks[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((ranks[2] - 2.0 / 3.0).abs() < 1e-12);
        assert!((ranks[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ascending_ranks_smallest_first() {
        let ranks = percentile_ranks(&[10.0, 30.0, 20.0], Direction::Ascending);
        assert!((ranks[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((ranks[2] - 2.0 / 3.0).abs() < 1e-12);
        assert!((ranks[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ties_share_average_rank() {
        let ranks = percentile_ranks(&[5.0, 5.0, 1.0, 9.0], Direction::Descending);
        // 9.0 -> rank 1, the two 5.0 -> (2+3)/2 = 2.5, 1.0 -> rank 4
        assert!((ranks[3] - 0.25).abs() < 1e-12);
        assert!((ranks[0] - 2.5 / 4.0).abs() < 1e-12);
        assert!((ranks[1] - 2.5 / 4.0).abs() < 1e-12);
        assert!((ranks[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nan_entries_excluded_from_percentile_base() {
        let ranks = percentile_ranks(&[f64::NAN, 7.0, 3.0], Direction::Descending);
        assert!(ranks[0].is_nan());
        assert!((ranks[1] - 0.5).abs() < 1e-12);
        assert!((ranks[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_nan_row_stays_nan() {
        let ranks = percentile_ranks(&[f64::NAN, f64::NAN], Direction::Descending);
        assert!(ranks.iter().all(|r| r.is_nan()));
    }

    #[test]
    fn single_entry_is_full_percentile() {
        let ranks = percentile_ranks(&[42.0], Direction::Descending);
        assert_eq!(ranks, vec![1.0]);
    }

    #[test]
    fn deterministic_across_runs() {
        let values = [3.0, 1.0, 3.0, f64::NAN, 2.0];
        let first = percentile_ranks(&values, Direction::Descending);
        let second = percentile_ranks(&values, Direction::Descending);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn rank_rows_works_per_date() {
        let dates: Vec<NaiveDate> = (0..2)
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i))
            .collect();
        let panel = Panel::new(
            dates,
            vec!["A".to_string(), "B".to_string()],
            vec![1.0, 2.0, 9.0, 3.0],
        )
        .unwrap();
        let ranks = rank_rows(&panel, Direction::Descending);
        // day 0: B first, day 1: A first
        assert!((ranks.get(0, 1) - 0.5).abs() < 1e-12);
        assert!((ranks.get(0, 0) - 1.0).abs() < 1e-12);
        assert!((ranks.get(1, 0) - 0.5).abs() < 1e-12);
        assert!((ranks.get(1, 1) - 1.0).abs() < 1e-12);
    }
}
