//! One-period execution lag.

use crate::domain::panel::Panel;

/// The position held on date `t` is the target weight computed on `t-1`;
/// a signal observed today is acted on starting the next period. The first
/// row is undefined.
pub fn lag_positions(weights: &Panel) -> Panel {
    weights.shift(1)
}
