//! Target weight allocation.
//!
//! Every eligible security on a date gets `1 / count`; a date with no
//! eligible securities gets an all-zero row rather than NaN. The daily
//! series is then put on the rebalance schedule so the book stays fixed
//! between anchors.

use crate::domain::panel::{Mask, Panel};
use crate::domain::schedule::RebalanceSchedule;

/// Daily equal weights over the eligible set.
pub fn equal_weights(signals: &Mask) -> Panel {
    let mut out = Panel::filled(signals.dates().to_vec(), signals.securities().to_vec(), 0.0);
    for row in 0..signals.n_dates() {
        let count = signals.count_true(row);
        if count == 0 {
            continue;
        }
        let weight = 1.0 / count as f64;
        for col in 0..signals.n_securities() {
            if signals.get(row, col) {
                out.set(row, col, weight);
            }
        }
    }
    out
}

/// Equal weights held on the rebalance schedule.
pub fn allocate_weights(signals: &Mask, schedule: &RebalanceSchedule) -> Panel {
    schedule.rebalance_then_hold(&equal_weights(signals))
}
