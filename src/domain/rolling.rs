//! Per-security sliding-window statistics over a panel.
//!
//! A window statistic is defined only once `window` rows exist and every
//! value inside the window is present; a single missing value disqualifies
//! the whole window. Short history therefore yields NaN, which downstream
//! ranking treats as ineligible rather than as an error.

use crate::domain::panel::Panel;

/// Rolling mean of the trailing `window` rows, per security.
pub fn rolling_mean(panel: &Panel, window: usize) -> Panel {
    rolling(panel, window, |sum| sum / window as f64)
}

/// Rolling sum of the trailing `window` rows, per security.
pub fn rolling_sum(panel: &Panel, window: usize) -> Panel {
    rolling(panel, window, |sum| sum)
}

fn rolling(panel: &Panel, window: usize, finish: impl Fn(f64) -> f64) -> Panel {
    let mut out = Panel::filled(
        panel.dates().to_vec(),
        panel.securities().to_vec(),
        f64::NAN,
    );
    if window == 0 {
        return out;
    }

    for col in 0..panel.n_securities() {
        let mut sum = 0.0;
        let mut missing = 0usize;
        for row in 0..panel.n_dates() {
            let entering = panel.get(row, col);
            if entering.is_finite() {
                sum += entering;
            } else {
                missing += 1;
            }
            if row >= window {
                let leaving = panel.get(row - window, col);
                if leaving.is_finite() {
                    sum -= leaving;
                } else {
                    missing -= 1;
                }
            }
            if row + 1 >= window && missing == 0 {
                out.set(row, col, finish(sum));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_panel(values: Vec<f64>) -> Panel {
        let dates: Vec<NaiveDate> = (0..values.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
            .collect();
        Panel::new(dates, vec!["A".to_string()], values).unwrap()
    }

    #[test]
    fn mean_warmup_is_nan() {
        let out = rolling_mean(&make_panel(vec![1.0, 2.0, 3.0, 4.0]), 3);
        assert!(out.get(0, 0).is_nan());
        assert!(out.get(1, 0).is_nan());
        assert_eq!(out.get(2, 0), 2.0);
        assert_eq!(out.get(3, 0), 3.0);
    }

    #[test]
    fn sum_slides_correctly() {
        let out = rolling_sum(&make_panel(vec![1.0, 2.0, 3.0, 4.0, 5.0]), 2);
        assert!(out.get(0, 0).is_nan());
        assert_eq!(out.get(1, 0), 3.0);
        assert_eq!(out.get(2, 0), 5.0);
        assert_eq!(out.get(3, 0), 7.0);
        assert_eq!(out.get(4, 0), 9.0);
    }

    #[test]
    fn missing_value_disqualifies_window() {
        let out = rolling_mean(&make_panel(vec![1.0, f64::NAN, 3.0, 4.0, 5.0]), 3);
        // windows containing index 1 are undefined
        assert!(out.get(2, 0).is_nan());
        assert!(out.get(3, 0).is_nan());
        assert_eq!(out.get(4, 0), 4.0);
    }

    #[test]
    fn window_longer_than_history_is_all_nan() {
        let out = rolling_mean(&make_panel(vec![1.0, 2.0]), 5);
        assert!(out.get(0, 0).is_nan());
        assert!(out.get(1, 0).is_nan());
    }

    #[test]
    fn window_of_one_echoes_input() {
        let out = rolling_sum(&make_panel(vec![7.0, 8.0]), 1);
        assert_eq!(out.get(0, 0), 7.0);
        assert_eq!(out.get(1, 0), 8.0);
    }

    #[test]
    fn multiple_securities_independent() {
        let dates: Vec<NaiveDate> = (0..3)
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
            .collect();
        let panel = Panel::new(
            dates,
            vec!["A".to_string(), "B".to_string()],
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0],
        )
        .unwrap();
        let out = rolling_mean(&panel, 2);
        assert_eq!(out.get(1, 0), 1.5);
        assert_eq!(out.get(1, 1), 15.0);
        assert_eq!(out.get(2, 0), 2.5);
        assert_eq!(out.get(2, 1), 25.0);
    }
}
