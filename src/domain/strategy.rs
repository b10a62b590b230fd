//! Strategy parameter surface.
//!
//! Defaults mirror the published quantitative momentum rules: 90-day dollar
//! volume screen keeping the top 60%, 12-month momentum excluding the most
//! recent month keeping the top 10%, smoothness keeping the top 50%, and a
//! quarterly rebalance on a fiscal year ending in November.

use crate::domain::schedule::RebalanceSchedule;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    /// Rolling window for the average dollar volume screen, in periods.
    pub dollar_volume_window: usize,
    /// Fraction of the cross-section kept by the liquidity screen, in (0, 1].
    pub dollar_volume_top_fraction: f64,
    /// Trailing window for the momentum return, in periods.
    pub momentum_window: usize,
    /// Most-recent periods excluded from the momentum return.
    pub momentum_skip: usize,
    /// Fraction of liquidity survivors kept by the momentum screen.
    pub momentum_top_fraction: f64,
    /// Fraction of momentum survivors kept by the smoothness screen.
    pub smoothness_top_fraction: f64,
    pub rebalance: RebalanceSchedule,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            dollar_volume_window: 90,
            dollar_volume_top_fraction: 0.60,
            momentum_window: 252,
            momentum_skip: 22,
            momentum_top_fraction: 0.10,
            smoothness_top_fraction: 0.50,
            rebalance: RebalanceSchedule::default(),
        }
    }
}
