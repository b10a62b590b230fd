//! CSV output adapter for the pipeline's result matrices.
//!
//! Wide layout: one row per date, one column per security, empty cells for
//! NaN so downstream tools read them back as missing rather than zero.

use crate::domain::error::QuantmomError;
use crate::domain::panel::Panel;
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    fn write_matrix(panel: &Panel, path: &Path) -> Result<(), QuantmomError> {
        let mut wtr = csv::Writer::from_path(path).map_err(|e| QuantmomError::Data {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        let mut header = vec!["date".to_string()];
        header.extend(panel.securities().iter().cloned());
        wtr.write_record(&header).map_err(|e| QuantmomError::Data {
            reason: format!("CSV write error: {}", e),
        })?;

        for row in 0..panel.n_dates() {
            let mut record = vec![panel.dates()[row].format("%Y-%m-%d").to_string()];
            for col in 0..panel.n_securities() {
                let value = panel.get(row, col);
                record.push(if value.is_finite() {
                    format!("{}", value)
                } else {
                    String::new()
                });
            }
            wtr.write_record(&record).map_err(|e| QuantmomError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_weights(&self, weights: &Panel, output_dir: &Path) -> Result<(), QuantmomError> {
        Self::write_matrix(weights, &output_dir.join("target_weights.csv"))
    }

    fn write_gross_returns(
        &self,
        returns: &Panel,
        output_dir: &Path,
    ) -> Result<(), QuantmomError> {
        Self::write_matrix(returns, &output_dir.join("gross_returns.csv"))
    }
}
