#![allow(dead_code)]

use chrono::NaiveDate;
use quantmom::domain::error::QuantmomError;
use quantmom::domain::panel::{Panel, PricePanel};
use quantmom::ports::data_port::PanelPort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `n` consecutive calendar days starting at `start`.
pub fn day_range(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    (0..n).map(|i| start + chrono::Days::new(i as u64)).collect()
}

pub fn securities(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Build a panel from per-security columns.
pub fn panel_from_columns(dates: Vec<NaiveDate>, names: &[&str], columns: &[Vec<f64>]) -> Panel {
    let n_days = dates.len();
    let mut values = Vec::with_capacity(n_days * columns.len());
    for row in 0..n_days {
        for column in columns {
            values.push(column[row]);
        }
    }
    Panel::new(dates, securities(names), values).unwrap()
}

/// Price panel where each security has a constant daily price increment
/// and a constant volume.
pub fn trending_prices(
    dates: Vec<NaiveDate>,
    specs: &[(&str, f64, f64, f64)], // (code, start_price, daily_change, volume)
) -> PricePanel {
    let names: Vec<&str> = specs.iter().map(|(code, ..)| *code).collect();
    let close_cols: Vec<Vec<f64>> = specs
        .iter()
        .map(|(_, start, change, _)| {
            (0..dates.len())
                .map(|i| start + change * i as f64)
                .collect()
        })
        .collect();
    let volume_cols: Vec<Vec<f64>> = specs
        .iter()
        .map(|(_, _, _, volume)| vec![*volume; dates.len()])
        .collect();
    let close = panel_from_columns(dates.clone(), &names, &close_cols);
    let volume = panel_from_columns(dates, &names, &volume_cols);
    PricePanel::new(close, volume).unwrap()
}

pub struct MockPanelPort {
    pub panel: PricePanel,
}

impl MockPanelPort {
    pub fn new(panel: PricePanel) -> Self {
        Self { panel }
    }
}

impl PanelPort for MockPanelPort {
    fn fetch_panel(
        &self,
        _codes: &[String],
        _exchange: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<PricePanel, QuantmomError> {
        Ok(self.panel.clone())
    }

    fn list_symbols(&self, _exchange: &str) -> Result<Vec<String>, QuantmomError> {
        Ok(self.panel.close.securities().to_vec())
    }
}
