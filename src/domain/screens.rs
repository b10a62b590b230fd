//! Cross-sectional eligibility screens.
//!
//! Three screens run in a fixed order, each ranking only the survivors of
//! the screen before it: liquidity (average dollar volume), momentum
//! (trailing return excluding the most recent periods), and smoothness
//! (count of positive-return days). The masks compound — a security can
//! pass smoothness only if it passed momentum, which requires passing
//! liquidity. Computing the screens independently changes which securities
//! are selected, so the prior mask is applied to the statistic *before*
//! ranking, never after.

use crate::domain::error::QuantmomError;
use crate::domain::panel::{Mask, Panel, PricePanel};
use crate::domain::ranking::{Direction, rank_rows};
use crate::domain::rolling::{rolling_mean, rolling_sum};
use crate::domain::strategy::StrategyParams;

/// Run all three screens and return the combined eligibility matrix.
pub fn generate_signals(
    prices: &PricePanel,
    params: &StrategyParams,
) -> Result<Mask, QuantmomError> {
    let liquid = liquidity_screen(
        prices,
        params.dollar_volume_window,
        params.dollar_volume_top_fraction,
    )?;
    let momentum = momentum_screen(
        &prices.close,
        &liquid,
        params.momentum_window,
        params.momentum_skip,
        params.momentum_top_fraction,
    )?;
    smoothness_screen(
        &prices.close,
        &momentum,
        params.momentum_window,
        params.smoothness_top_fraction,
    )
}

/// Securities in the top `top_fraction` by rolling average dollar volume.
///
/// Dates with fewer than `window` prior observations rank NaN and are
/// ineligible.
pub fn liquidity_screen(
    prices: &PricePanel,
    window: usize,
    top_fraction: f64,
) -> Result<Mask, QuantmomError> {
    let dollar_volume = prices.close.mul(&prices.volume)?;
    let avg_dollar_volume = rolling_mean(&dollar_volume, window);
    let ranks = rank_rows(&avg_dollar_volume, Direction::Descending);
    Ok(threshold(&ranks, top_fraction))
}

/// Survivors of `prior` in the top `top_fraction` by trailing return.
pub fn momentum_screen(
    close: &Panel,
    prior: &Mask,
    window: usize,
    skip: usize,
    top_fraction: f64,
) -> Result<Mask, QuantmomError> {
    let returns = trailing_returns(close, window, skip);
    let masked = returns.where_mask(prior)?;
    let ranks = rank_rows(&masked, Direction::Descending);
    Ok(threshold(&ranks, top_fraction))
}

/// Survivors of `prior` in the top `top_fraction` by count of
/// positive-return days over the trailing `window`.
pub fn smoothness_screen(
    close: &Panel,
    prior: &Mask,
    window: usize,
    top_fraction: f64,
) -> Result<Mask, QuantmomError> {
    let counts = positive_day_counts(close, window);
    let masked = counts.where_mask(prior)?;
    let ranks = rank_rows(&masked, Direction::Descending);
    Ok(threshold(&ranks, top_fraction))
}

/// Trailing return `(P[t-skip] - P[t-window]) / P[t-window]`.
///
/// NaN when either price is missing or the base price is zero.
pub fn trailing_returns(close: &Panel, window: usize, skip: usize) -> Panel {
    let base = close.shift(window);
    let recent = close.shift(skip);
    let mut out = Panel::filled(
        close.dates().to_vec(),
        close.securities().to_vec(),
        f64::NAN,
    );
    for row in 0..close.n_dates() {
        for col in 0..close.n_securities() {
            let b = base.get(row, col);
            let r = recent.get(row, col);
            if b.is_finite() && r.is_finite() && b != 0.0 {
                out.set(row, col, (r - b) / b);
            }
        }
    }
    out
}

/// Rolling count of days whose close-to-close change was positive.
///
/// A missing change counts as not-positive, so the count is defined as
/// soon as `window` rows exist.
pub fn positive_day_counts(close: &Panel, window: usize) -> Panel {
    let changes = close.pct_change();
    let mut positives = Panel::filled(close.dates().to_vec(), close.securities().to_vec(), 0.0);
    for row in 0..close.n_dates() {
        for col in 0..close.n_securities() {
            if changes.get(row, col) > 0.0 {
                positives.set(row, col, 1.0);
            }
        }
    }
    rolling_sum(&positives, window)
}

fn threshold(ranks: &Panel, top_fraction: f64) -> Mask {
    let mut out = Mask::filled(ranks.dates().to_vec(), ranks.securities().to_vec(), false);
    for row in 0..ranks.n_dates() {
        for col in 0..ranks.n_securities() {
            let pct = ranks.get(row, col);
            if pct.is_finite() && pct <= top_fraction {
                out.set(row, col, true);
            }
        }
    }
    out
}
