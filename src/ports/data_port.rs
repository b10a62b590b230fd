//! Panel data access port trait.

use crate::domain::error::QuantmomError;
use crate::domain::panel::PricePanel;
use chrono::NaiveDate;

/// Source of close/volume panels for a resolved universe of securities.
///
/// The returned panel's date axis is the union of each security's dates;
/// a security missing a date holds NaN there.
pub trait PanelPort {
    fn fetch_panel(
        &self,
        codes: &[String],
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PricePanel, QuantmomError>;

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, QuantmomError>;
}
