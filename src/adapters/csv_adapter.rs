//! CSV file panel adapter.
//!
//! One `{CODE}_{EXCHANGE}.csv` file per security with `date,close,volume`
//! rows. The panel's date axis is the union of every security's dates;
//! securities without a row for some date hold NaN there, and securities
//! whose file is missing entirely become all-NaN columns (the universe was
//! resolved upstream, the panel just tolerates the gap).

use crate::domain::error::QuantmomError;
use crate::domain::panel::{Panel, PricePanel};
use crate::ports::data_port::PanelPort;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

pub struct CsvPanelAdapter {
    base_path: PathBuf,
}

type SecuritySeries = BTreeMap<NaiveDate, (f64, f64)>;

impl CsvPanelAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str, exchange: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", code, exchange))
    }

    fn read_series(
        &self,
        code: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<SecuritySeries, QuantmomError> {
        let path = self.csv_path(code, exchange);
        let content = fs::read_to_string(&path).map_err(|e| QuantmomError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut series = SecuritySeries::new();

        for result in rdr.records() {
            let record = result.map_err(|e| QuantmomError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| QuantmomError::Data {
                reason: format!("missing date column in {}", path.display()),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| QuantmomError::Data {
                    reason: format!("invalid date in {}: {}", path.display(), e),
                })?;

            if date < start_date || date > end_date {
                continue;
            }

            let close: f64 = record
                .get(1)
                .ok_or_else(|| QuantmomError::Data {
                    reason: format!("missing close column in {}", path.display()),
                })?
                .parse()
                .map_err(|e| QuantmomError::Data {
                    reason: format!("invalid close value in {}: {}", path.display(), e),
                })?;

            let volume: f64 = record
                .get(2)
                .ok_or_else(|| QuantmomError::Data {
                    reason: format!("missing volume column in {}", path.display()),
                })?
                .parse()
                .map_err(|e| QuantmomError::Data {
                    reason: format!("invalid volume value in {}: {}", path.display(), e),
                })?;

            if volume < 0.0 {
                return Err(QuantmomError::Data {
                    reason: format!("negative volume on {} in {}", date, path.display()),
                });
            }

            series.insert(date, (close, volume));
        }

        Ok(series)
    }
}

impl PanelPort for CsvPanelAdapter {
    fn fetch_panel(
        &self,
        codes: &[String],
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PricePanel, QuantmomError> {
        let mut per_code: Vec<SecuritySeries> = Vec::with_capacity(codes.len());
        let mut found_any = false;

        for code in codes {
            if !self.csv_path(code, exchange).exists() {
                eprintln!("Warning: no data file for {}.{}", code, exchange);
                per_code.push(SecuritySeries::new());
                continue;
            }
            let series = self.read_series(code, exchange, start_date, end_date)?;
            if !series.is_empty() {
                found_any = true;
            }
            per_code.push(series);
        }

        if !found_any {
            return Err(QuantmomError::NoData {
                code: codes.join(","),
                exchange: exchange.to_string(),
            });
        }

        let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        for series in &per_code {
            all_dates.extend(series.keys().copied());
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

        let mut close = Panel::filled(dates.clone(), codes.to_vec(), f64::NAN);
        let mut volume = Panel::filled(dates.clone(), codes.to_vec(), f64::NAN);
        for (row, date) in dates.iter().enumerate() {
            for (col, series) in per_code.iter().enumerate() {
                if let Some((c, v)) = series.get(date) {
                    close.set(row, col, *c);
                    volume.set(row, col, *v);
                }
            }
        }

        PricePanel::new(close, volume)
    }

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, QuantmomError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| QuantmomError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", exchange);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| QuantmomError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.ends_with(&suffix) {
                symbols.push(name_str[..name_str.len() - suffix.len()].to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
