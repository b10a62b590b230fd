//! Gross return attribution.

use crate::domain::error::QuantmomError;
use crate::domain::panel::{Panel, PricePanel};

/// Per-security gross return: the period's close-to-close change times the
/// position already held entering the period.
///
/// The position matrix is shifted one further period so that date `t`'s
/// return never uses a position decided from `t`'s own price change. Early
/// rows without a defined position or price change are NaN, not an error.
/// Aggregation across securities is left to the caller.
pub fn gross_returns(positions: &Panel, prices: &PricePanel) -> Result<Panel, QuantmomError> {
    let changes = prices.close.pct_change();
    let held_entering = positions.shift(1);
    changes.mul(&held_entering)
}
