//! Rebalance scheduling on a fiscal calendar.
//!
//! The allocator produces a daily target series; the schedule downsamples
//! it to one snapshot per fiscal period (the last daily row inside the
//! period) and re-expands it to the daily index, holding each snapshot
//! from the period's calendar end until the next period's end. A date only
//! ever receives a snapshot taken on or before that date, so the schedule
//! cannot look ahead.

use crate::domain::panel::Panel;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Fiscal quarter ends. With a fiscal year ending in November the
    /// periods end in February, May, August and November.
    QuarterEnd,
    /// Calendar month ends; `fiscal_year_end_month` is ignored.
    MonthEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebalanceSchedule {
    pub frequency: Frequency,
    /// 1-12; month in which the fiscal year ends.
    pub fiscal_year_end_month: u32,
}

impl Default for RebalanceSchedule {
    fn default() -> Self {
        Self {
            frequency: Frequency::QuarterEnd,
            fiscal_year_end_month: 11,
        }
    }
}

impl RebalanceSchedule {
    /// Index of the period containing `date`. Consecutive periods have
    /// consecutive ids.
    pub fn period_id(&self, date: NaiveDate) -> i64 {
        let months = date.year() as i64 * 12 + date.month0() as i64;
        match self.frequency {
            Frequency::MonthEnd => months,
            Frequency::QuarterEnd => {
                (months - (self.fiscal_year_end_month as i64 % 12)).div_euclid(3)
            }
        }
    }

    /// Last calendar day of the period with the given id.
    pub fn period_end(&self, id: i64) -> NaiveDate {
        let months = match self.frequency {
            Frequency::MonthEnd => id,
            Frequency::QuarterEnd => id * 3 + (self.fiscal_year_end_month as i64 % 12) + 2,
        };
        let year = months.div_euclid(12) as i32;
        let month0 = months.rem_euclid(12) as u32;
        let first_of_next = if month0 == 11 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month0 + 2, 1)
        };
        // months stays in range for any date chrono can represent
        first_of_next.unwrap_or(NaiveDate::MAX) - chrono::Days::new(1)
    }

    /// Downsample to one snapshot per period (last daily row), then hold
    /// that snapshot over the daily index until the next period completes.
    ///
    /// Rows before the first completed period are all zero: there is no
    /// earlier snapshot to hold.
    pub fn rebalance_then_hold(&self, daily: &Panel) -> Panel {
        let dates = daily.dates();
        let width = daily.n_securities();
        let mut out = Panel::filled(dates.to_vec(), daily.securities().to_vec(), 0.0);

        // index of the last row of the most recently completed period
        let mut held: Option<usize> = None;
        for row in 0..dates.len() {
            let id = self.period_id(dates[row]);
            if row > 0 && self.period_id(dates[row - 1]) != id {
                held = Some(row - 1);
            }
            let source = if dates[row] == self.period_end(id) {
                Some(row)
            } else {
                held
            };
            if let Some(src) = source {
                for col in 0..width {
                    out.set(row, col, daily.get(src, col));
                }
            }
        }
        out
    }
}
