//! Allocation engine passes.
//!
//! Each pass takes a portfolio by reference and returns a new, enriched
//! copy, so callers can keep the input table and re-run the rebalance pass
//! with a different target total. Rounding is banker's rounding
//! (`Decimal::round_dp`), applied per holding and never redistributed.

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::constants::{
    DEVIATION_ALERT_THRESHOLD_PCT, FULL_ALLOCATION_PCT, VALUE_DECIMAL_PRECISION,
    WEIGHT_DECIMAL_PRECISION,
};
use crate::errors::{CalculatorError, Result};
use crate::portfolio::{Portfolio, PortfolioRow};

use super::rebalancing_model::{
    ExecutionStep, RebalancePlan, RebalanceRecommendation, RebalanceSummary, TradeAction,
    TradeInstruction,
};

/// Sets `current_weight_pct` on every row.
///
/// Fails with [`CalculatorError::DivisionByZero`] when the total current value
/// is not positive.
pub fn compute_current_allocation(portfolio: &Portfolio) -> Result<Portfolio> {
    let total = portfolio.total_current_value()?;
    if total <= Decimal::ZERO {
        return Err(CalculatorError::DivisionByZero(total).into());
    }

    debug!(
        "Computing current allocation for {} holdings, total {}",
        portfolio.len(),
        total
    );

    let rows = portfolio
        .rows()
        .iter()
        .map(|row| -> Result<PortfolioRow> {
            let weight = row
                .current_value
                .checked_div(total)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(|| CalculatorError::overflow("current weight"))?;
            Ok(PortfolioRow {
                current_weight_pct: Some(weight.round_dp(WEIGHT_DECIMAL_PRECISION)),
                ..row.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Portfolio { rows })
}

/// Sets `target_value`, `delta` and `action` on every row for the given total.
///
/// Target weights that do not add up to 100 are passed through; the
/// mismatch shows up later as a non-zero summary residual.
pub fn compute_rebalance(portfolio: &Portfolio, target_total: Decimal) -> Result<Portfolio> {
    if target_total < Decimal::ZERO {
        return Err(CalculatorError::NegativeTargetTotal(target_total).into());
    }

    let weight_sum = portfolio.total_target_weight()?;
    if !portfolio.is_empty() && weight_sum != FULL_ALLOCATION_PCT {
        warn!(
            "Target weights add up to {}% instead of {}%",
            weight_sum, FULL_ALLOCATION_PCT
        );
    }

    debug!(
        "Computing rebalance for {} holdings toward target total {}",
        portfolio.len(),
        target_total
    );

    let rows = portfolio
        .rows()
        .iter()
        .map(|row| -> Result<PortfolioRow> {
            let target_value = (row.target_weight_pct / Decimal::ONE_HUNDRED)
                .checked_mul(target_total)
                .ok_or_else(|| CalculatorError::overflow("target value"))?
                .round_dp(VALUE_DECIMAL_PRECISION);
            let delta = target_value
                .checked_sub(row.current_value)
                .ok_or_else(|| CalculatorError::overflow("delta"))?;
            Ok(PortfolioRow {
                target_value: Some(target_value),
                delta: Some(delta),
                action: Some(TradeAction::from_delta(delta)),
                ..row.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Portfolio { rows })
}

/// Aggregates buy and sell totals over a rebalanced plan.
///
/// Every row must carry a `delta`; a row without one is a missing-field error.
pub fn summarize(plan: &RebalancePlan) -> Result<RebalanceSummary> {
    let mut total_buy = Decimal::ZERO;
    let mut total_sell = Decimal::ZERO;

    for row in plan.portfolio.rows() {
        let delta = row.require_delta()?;
        if delta > Decimal::ZERO {
            total_buy = total_buy
                .checked_add(delta)
                .ok_or_else(|| CalculatorError::overflow("total buy"))?;
        } else if delta < Decimal::ZERO {
            total_sell = total_sell
                .checked_add(delta.abs())
                .ok_or_else(|| CalculatorError::overflow("total sell"))?;
        }
    }

    let residual = total_buy
        .checked_sub(total_sell)
        .ok_or_else(|| CalculatorError::overflow("residual"))?;
    if !residual.is_zero() {
        warn!(
            "Rebalance residual is {} (buy {} vs sell {}); check that target weights add up to {}%",
            residual, total_buy, total_sell, FULL_ALLOCATION_PCT
        );
    }

    Ok(RebalanceSummary {
        total_assets: plan.target_total,
        total_buy,
        total_sell,
        residual,
    })
}

/// Builds the ordered trade list for a portfolio that went through both passes.
pub fn recommend(portfolio: &Portfolio) -> Result<RebalanceRecommendation> {
    let mut sells = Vec::new();
    let mut buys = Vec::new();
    let mut max_deviation_pct = Decimal::ZERO;

    for row in portfolio.rows() {
        let current_weight_pct = row.require_current_weight()?;
        let target_value = row.require_target_value()?;
        let delta = row.require_delta()?;
        let action = row.require_action()?;

        let deviation = current_weight_pct
            .checked_sub(row.target_weight_pct)
            .ok_or_else(|| CalculatorError::overflow("weight deviation"))?
            .abs();
        if deviation > max_deviation_pct {
            max_deviation_pct = deviation;
        }

        let instruction = TradeInstruction {
            label: row.label.clone(),
            action,
            amount: delta.abs(),
            current_value: row.current_value,
            current_weight_pct,
            target_value,
            target_weight_pct: row.target_weight_pct,
        };

        match action {
            TradeAction::Sell => sells.push(instruction),
            TradeAction::Buy => buys.push(instruction),
            TradeAction::Hold => {}
        }
    }

    let steps = sells
        .iter()
        .chain(buys.iter())
        .enumerate()
        .map(|(i, t)| ExecutionStep {
            step: i + 1,
            label: t.label.clone(),
            action: t.action,
            amount: t.amount,
        })
        .collect();

    Ok(RebalanceRecommendation {
        sells,
        buys,
        steps,
        max_deviation_pct,
        deviation_alert: max_deviation_pct > DEVIATION_ALERT_THRESHOLD_PCT,
    })
}
