//! Date × security panel representation.
//!
//! A `Panel` is a dense row-major matrix with a date axis (rows, strictly
//! increasing) and a security axis (columns). `f64::NAN` means "no value"
//! and propagates through every derived statistic; it is never silently
//! replaced by zero except where a stage explicitly fills.

use crate::domain::error::QuantmomError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    dates: Vec<NaiveDate>,
    securities: Vec<String>,
    values: Vec<f64>,
}

impl Panel {
    pub fn new(
        dates: Vec<NaiveDate>,
        securities: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self, QuantmomError> {
        if values.len() != dates.len() * securities.len() {
            return Err(QuantmomError::ShapeMismatch {
                reason: format!(
                    "expected {} values for {} dates x {} securities, got {}",
                    dates.len() * securities.len(),
                    dates.len(),
                    securities.len(),
                    values.len()
                ),
            });
        }
        for pair in dates.windows(2) {
            if pair[0] >= pair[1] {
                return Err(QuantmomError::ShapeMismatch {
                    reason: format!("date index not strictly increasing at {}", pair[1]),
                });
            }
        }
        Ok(Self {
            dates,
            securities,
            values,
        })
    }

    /// Panel of the given shape with every cell set to `fill`.
    pub fn filled(dates: Vec<NaiveDate>, securities: Vec<String>, fill: f64) -> Self {
        let len = dates.len() * securities.len();
        Self {
            dates,
            securities,
            values: vec![fill; len],
        }
    }

    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    pub fn n_securities(&self) -> usize {
        self.securities.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn securities(&self) -> &[String] {
        &self.securities
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.securities.len() + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.securities.len() + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let width = self.securities.len();
        &self.values[row * width..(row + 1) * width]
    }

    pub fn same_axes(&self, other: &Panel) -> bool {
        self.dates == other.dates && self.securities == other.securities
    }

    /// Shift rows down by `periods`: row `t` of the result is row
    /// `t - periods` of the input, the vacated leading rows are NaN.
    pub fn shift(&self, periods: usize) -> Panel {
        let width = self.securities.len();
        let mut out = Panel::filled(self.dates.clone(), self.securities.clone(), f64::NAN);
        for row in periods..self.dates.len() {
            let src = (row - periods) * width;
            let dst = row * width;
            out.values[dst..dst + width].copy_from_slice(&self.values[src..src + width]);
        }
        out
    }

    /// Elementwise product. Axes must match.
    pub fn mul(&self, other: &Panel) -> Result<Panel, QuantmomError> {
        if !self.same_axes(other) {
            return Err(QuantmomError::ShapeMismatch {
                reason: "elementwise multiply of panels with different axes".into(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a * b)
            .collect();
        Ok(Panel {
            dates: self.dates.clone(),
            securities: self.securities.clone(),
            values,
        })
    }

    /// Per-security simple percent change between consecutive rows.
    ///
    /// The first row is NaN. A cell is NaN when either price is missing or
    /// the base price is zero (undefined, never infinite).
    pub fn pct_change(&self) -> Panel {
        let mut out = Panel::filled(self.dates.clone(), self.securities.clone(), f64::NAN);
        for row in 1..self.dates.len() {
            for col in 0..self.securities.len() {
                let prev = self.get(row - 1, col);
                let curr = self.get(row, col);
                if prev.is_finite() && curr.is_finite() && prev != 0.0 {
                    out.set(row, col, (curr - prev) / prev);
                }
            }
        }
        out
    }

    /// Keep cells where the mask is true, NaN elsewhere. Axes must match.
    pub fn where_mask(&self, mask: &Mask) -> Result<Panel, QuantmomError> {
        if self.dates != mask.dates || self.securities != mask.securities {
            return Err(QuantmomError::ShapeMismatch {
                reason: "mask axes differ from panel axes".into(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&mask.values)
            .map(|(v, keep)| if *keep { *v } else { f64::NAN })
            .collect();
        Ok(Panel {
            dates: self.dates.clone(),
            securities: self.securities.clone(),
            values,
        })
    }
}

/// Boolean matrix over the same axes as a [`Panel`]; used as the
/// eligibility matrix produced by the screens.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    dates: Vec<NaiveDate>,
    securities: Vec<String>,
    values: Vec<bool>,
}

impl Mask {
    pub fn filled(dates: Vec<NaiveDate>, securities: Vec<String>, fill: bool) -> Self {
        let len = dates.len() * securities.len();
        Self {
            dates,
            securities,
            values: vec![fill; len],
        }
    }

    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    pub fn n_securities(&self) -> usize {
        self.securities.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn securities(&self) -> &[String] {
        &self.securities
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.values[row * self.securities.len() + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.values[row * self.securities.len() + col] = value;
    }

    /// Number of true cells in one row.
    pub fn count_true(&self, row: usize) -> usize {
        let width = self.securities.len();
        self.values[row * width..(row + 1) * width]
            .iter()
            .filter(|v| **v)
            .count()
    }
}

/// The two stacked input matrices every pipeline stage derives from.
///
/// Construction is the single structural checkpoint: a close/volume pair
/// with different axes is rejected before any stage runs.
#[derive(Debug, Clone)]
pub struct PricePanel {
    pub close: Panel,
    pub volume: Panel,
}

impl PricePanel {
    pub fn new(close: Panel, volume: Panel) -> Result<Self, QuantmomError> {
        if !close.same_axes(&volume) {
            return Err(QuantmomError::ShapeMismatch {
                reason: format!(
                    "close is {} dates x {} securities, volume is {} x {}",
                    close.n_dates(),
                    close.n_securities(),
                    volume.n_dates(),
                    volume.n_securities()
                ),
            });
        }
        Ok(Self { close, volume })
    }
}
