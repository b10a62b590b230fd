//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Ranking — percentile ranks stay in (0, 1] and skip missing values
//! 2. Allocation — weight rows sum to zero or one for any panel
//! 3. Lag — positions reproduce the prior day's weights bit for bit
//! 4. Scheduling — held rows never draw on a future daily row

mod common;

use common::*;
use proptest::prelude::*;
use quantmom::domain::panel::{Panel, PricePanel};
use quantmom::domain::pipeline::run_pipeline;
use quantmom::domain::ranking::{Direction, percentile_ranks};
use quantmom::domain::schedule::{Frequency, RebalanceSchedule};
use quantmom::domain::strategy::StrategyParams;
use quantmom::domain::weights::equal_weights;

fn short_window_params() -> StrategyParams {
    StrategyParams {
        dollar_volume_window: 5,
        dollar_volume_top_fraction: 1.0,
        momentum_window: 10,
        momentum_skip: 2,
        momentum_top_fraction: 0.5,
        smoothness_top_fraction: 1.0,
        rebalance: RebalanceSchedule {
            frequency: Frequency::MonthEnd,
            fiscal_year_end_month: 11,
        },
    }
}

fn arb_values(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            9 => 1.0..100.0_f64,
            1 => Just(f64::NAN),
        ],
        n,
    )
}

fn arb_price_panel() -> impl Strategy<Value = PricePanel> {
    (2usize..5, 30usize..60).prop_flat_map(|(n_secs, n_days)| {
        (
            prop::collection::vec(prop::collection::vec(1.0..100.0_f64, n_days), n_secs),
            prop::collection::vec(prop::collection::vec(100.0..10_000.0_f64, n_days), n_secs),
        )
            .prop_map(move |(close_cols, volume_cols)| {
                let names: Vec<String> = (0..n_secs).map(|i| format!("S{i}")).collect();
                let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
                let dates = day_range(date(2024, 1, 2), n_days);
                let close = panel_from_columns(dates.clone(), &name_refs, &close_cols);
                let volume = panel_from_columns(dates, &name_refs, &volume_cols);
                PricePanel::new(close, volume).unwrap()
            })
    })
}

// ── 1. Ranking ───────────────────────────────────────────────────────

proptest! {
    /// Finite inputs rank into (0, 1]; missing inputs stay missing.
    #[test]
    fn percentile_ranks_stay_in_unit_interval(values in arb_values(20)) {
        let ranks = percentile_ranks(&values, Direction::Descending);
        prop_assert_eq!(ranks.len(), values.len());
        for (value, rank) in values.iter().zip(&ranks) {
            if value.is_finite() {
                prop_assert!(*rank > 0.0 && *rank <= 1.0, "rank {rank} out of range");
            } else {
                prop_assert!(rank.is_nan());
            }
        }
    }

    /// Ranks never exceed 1.0, and the worst untied value sits exactly at
    /// 1.0. A tie spanning the bottom shares an average rank below it.
    #[test]
    fn percentile_ranks_top_out_at_one(values in arb_values(20)) {
        let ranks = percentile_ranks(&values, Direction::Ascending);
        let max = ranks.iter().copied().filter(|r| r.is_finite()).fold(f64::MIN, f64::max);
        let finite: Vec<u64> = values
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| v.to_bits())
            .collect();
        let distinct =
            finite.iter().collect::<std::collections::HashSet<_>>().len() == finite.len();
        if !finite.is_empty() {
            prop_assert!(max <= 1.0 + 1e-12, "max rank {max} exceeds 1.0");
            if distinct {
                prop_assert!((max - 1.0).abs() < 1e-12, "max rank was {max}");
            }
        }
    }

    /// Both directions rank the same set of entries.
    #[test]
    fn ranking_direction_preserves_missing(values in arb_values(20)) {
        let asc = percentile_ranks(&values, Direction::Ascending);
        let desc = percentile_ranks(&values, Direction::Descending);
        for (a, d) in asc.iter().zip(&desc) {
            prop_assert_eq!(a.is_nan(), d.is_nan());
        }
    }
}

// ── 2. Allocation ────────────────────────────────────────────────────

proptest! {
    /// Every daily weight row sums to zero (nothing eligible) or one.
    #[test]
    fn weight_rows_sum_to_zero_or_one(prices in arb_price_panel()) {
        let out = run_pipeline(&prices, &short_window_params()).unwrap();
        for row in 0..out.weights.n_dates() {
            let sum: f64 = (0..out.weights.n_securities())
                .map(|col| out.weights.get(row, col))
                .sum();
            prop_assert!(
                sum.abs() < 1e-9 || (sum - 1.0).abs() < 1e-9,
                "row {row} sums to {sum}"
            );
        }
    }

    /// Weights are only ever given to securities the screens kept.
    #[test]
    fn weights_respect_signals(prices in arb_price_panel()) {
        let params = short_window_params();
        let out = run_pipeline(&prices, &params).unwrap();
        let daily = equal_weights(&out.signals);
        for row in 0..daily.n_dates() {
            for col in 0..daily.n_securities() {
                if daily.get(row, col) > 0.0 {
                    prop_assert!(out.signals.get(row, col));
                }
            }
        }
    }
}

// ── 3. Lag ───────────────────────────────────────────────────────────

proptest! {
    /// Positions are the previous day's weights, bit for bit.
    #[test]
    fn positions_lag_weights_one_row(prices in arb_price_panel()) {
        let out = run_pipeline(&prices, &short_window_params()).unwrap();
        for col in 0..out.positions.n_securities() {
            prop_assert!(out.positions.get(0, col).is_nan());
        }
        for row in 1..out.positions.n_dates() {
            for col in 0..out.positions.n_securities() {
                prop_assert_eq!(
                    out.positions.get(row, col).to_bits(),
                    out.weights.get(row - 1, col).to_bits()
                );
            }
        }
    }
}

// ── 4. Scheduling ────────────────────────────────────────────────────

proptest! {
    /// A held row is either the zero fill or a copy of a daily row taken
    /// on or before that date.
    #[test]
    fn held_rows_never_look_ahead(
        values in prop::collection::vec(0.0..1.0_f64, 40),
    ) {
        let dates = day_range(date(2024, 1, 2), 40);
        let daily = Panel::new(dates, vec!["A".to_string()], values).unwrap();
        let schedule = RebalanceSchedule {
            frequency: Frequency::MonthEnd,
            fiscal_year_end_month: 11,
        };
        let held = schedule.rebalance_then_hold(&daily);

        for row in 0..held.n_dates() {
            let value = held.get(row, 0);
            let from_past = (0..=row).any(|src| daily.get(src, 0).to_bits() == value.to_bits());
            prop_assert!(
                value == 0.0 || from_past,
                "row {row} holds {value}, absent from rows 0..={row}"
            );
        }
    }
}
