//! Concentration metrics over current allocation weights.

use log::debug;
use rust_decimal::Decimal;

use crate::constants::WELL_DIVERSIFIED_THRESHOLD;
use crate::errors::{CalculatorError, Result};
use crate::portfolio::Portfolio;

use super::risk_model::{RiskLabel, RiskMetrics};

/// Sum of squared allocation fractions.
///
/// Every row must carry `current_weight_pct` (see
/// [`compute_current_allocation`](crate::rebalancing::compute_current_allocation)).
/// An empty portfolio has an index of zero.
pub fn concentration_index(portfolio: &Portfolio) -> Result<Decimal> {
    let mut index = Decimal::ZERO;
    for row in portfolio.rows() {
        let fraction = row.require_current_weight()? / Decimal::ONE_HUNDRED;
        index = fraction
            .checked_mul(fraction)
            .and_then(|square| index.checked_add(square))
            .ok_or_else(|| CalculatorError::overflow("concentration index"))?;
    }
    Ok(index)
}

pub fn diversification_score(index: Decimal) -> Decimal {
    Decimal::ONE - index
}

pub fn risk_label(score: Decimal) -> RiskLabel {
    if score > WELL_DIVERSIFIED_THRESHOLD {
        RiskLabel::WellDiversified
    } else {
        RiskLabel::Concentrated
    }
}

/// Computes all risk figures in one go.
pub fn assess_risk(portfolio: &Portfolio) -> Result<RiskMetrics> {
    let index = concentration_index(portfolio)?;
    let score = diversification_score(index);
    let effective_holdings = if index > Decimal::ZERO {
        Some(Decimal::ONE / index)
    } else {
        None
    };
    let label = risk_label(score);

    debug!(
        "Concentration index {} -> diversification {} ({})",
        index, score, label
    );

    Ok(RiskMetrics {
        concentration_index: index,
        diversification_score: score,
        effective_holdings,
        label,
    })
}
