//! The five-stage transformation pipeline.
//!
//! Raw prices/volumes → eligibility signals → target weights → held
//! positions → gross returns. Stages run in that fixed order, each a pure
//! function of the previous stage's output; nothing is mutated in place
//! and no state survives between invocations, so identical input panels
//! produce bit-identical output.

use crate::domain::error::QuantmomError;
use crate::domain::panel::{Mask, Panel, PricePanel};
use crate::domain::positions::lag_positions;
use crate::domain::returns::gross_returns;
use crate::domain::screens::generate_signals;
use crate::domain::strategy::StrategyParams;
use crate::domain::weights::allocate_weights;

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub signals: Mask,
    pub weights: Panel,
    pub positions: Panel,
    pub gross_returns: Panel,
}

pub fn run_pipeline(
    prices: &PricePanel,
    params: &StrategyParams,
) -> Result<PipelineOutput, QuantmomError> {
    let signals = generate_signals(prices, params)?;
    let weights = allocate_weights(&signals, &params.rebalance);
    let positions = lag_positions(&weights);
    let gross_returns = gross_returns(&positions, prices)?;
    Ok(PipelineOutput {
        signals,
        weights,
        positions,
        gross_returns,
    })
}
