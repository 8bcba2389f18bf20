//! Property-based tests for the allocation engine and risk metrics.
//!
//! These tests verify invariants over randomly generated portfolios
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use rebalancer_core::{
    assess_risk, compute_current_allocation, compute_rebalance, summarize, Holding, Portfolio,
    RebalancePlan, RiskLabel, TradeAction,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Generators
// =============================================================================

/// Generates current values with a positive total.
fn arb_values(max_len: usize) -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::vec(0u64..1_000_000_000, 1..=max_len)
        .prop_filter("total must be positive", |v| v.iter().any(|x| *x > 0))
}

/// Generates `n` target weights with two decimals that add up to exactly 100.
fn weights_summing_to_100(units: &[u32]) -> Vec<Decimal> {
    let total: u64 = units.iter().map(|u| *u as u64).sum();
    let mut weights: Vec<Decimal> = units
        .iter()
        .map(|u| {
            (Decimal::from(*u) * dec!(100) / Decimal::from(total))
                .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::ToZero)
        })
        .collect();
    let assigned: Decimal = weights[..weights.len() - 1].iter().sum();
    if let Some(last) = weights.last_mut() {
        *last = dec!(100) - assigned;
    }
    weights
}

/// Generates a portfolio whose target weights add up to 100.
fn arb_balanced_portfolio(max_len: usize) -> impl Strategy<Value = Portfolio> {
    (1..=max_len)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(0u64..1_000_000_000, n),
                proptest::collection::vec(1u32..1_000, n),
            )
        })
        .prop_filter("total must be positive", |(values, _)| {
            values.iter().any(|v| *v > 0)
        })
        .prop_map(|(values, units)| {
            let weights = weights_summing_to_100(&units);
            Portfolio::new(
                values
                    .iter()
                    .zip(weights)
                    .enumerate()
                    .map(|(i, (v, w))| Holding::new(format!("H{}", i), Decimal::from(*v), w))
                    .collect(),
            )
        })
}

/// Generates a portfolio with arbitrary whole-number weights in [0, 100].
fn arb_unbalanced_portfolio(max_len: usize) -> impl Strategy<Value = Portfolio> {
    proptest::collection::vec((0u64..1_000_000_000, 0u32..=100), 1..=max_len).prop_map(|rows| {
        Portfolio::new(
            rows.into_iter()
                .enumerate()
                .map(|(i, (v, w))| {
                    Holding::new(format!("H{}", i), Decimal::from(v), Decimal::from(w))
                })
                .collect(),
        )
    })
}

fn portfolio_from_values(values: &[u64]) -> Portfolio {
    Portfolio::new(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Holding::new(format!("H{}", i), Decimal::from(*v), dec!(0)))
            .collect(),
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Current weights add up to 100 within half a basis point per holding.
    #[test]
    fn prop_current_weights_sum_to_100(values in arb_values(30)) {
        let allocated = compute_current_allocation(&portfolio_from_values(&values)).unwrap();
        let sum: Decimal = allocated
            .rows()
            .iter()
            .map(|r| r.current_weight_pct.unwrap())
            .sum();
        let tolerance = Decimal::from(values.len()) * dec!(0.005);

        prop_assert!(
            (sum - dec!(100)).abs() <= tolerance,
            "weights sum to {} for {} holdings",
            sum,
            values.len()
        );
    }

    /// Running the allocation pass twice gives the same table.
    #[test]
    fn prop_current_allocation_is_idempotent(values in arb_values(20)) {
        let portfolio = portfolio_from_values(&values);
        let once = compute_current_allocation(&portfolio).unwrap();
        let twice = compute_current_allocation(&once).unwrap();

        prop_assert_eq!(once, twice);
    }

    /// Deltas add up to the cash flow needed, within per-holding rounding.
    #[test]
    fn prop_deltas_match_cash_flow(
        portfolio in arb_balanced_portfolio(20),
        additional in 0u64..100_000_000,
    ) {
        let target_total = portfolio.total_current_value().unwrap() + Decimal::from(additional);
        let rebalanced = compute_rebalance(&portfolio, target_total).unwrap();
        let delta_sum: Decimal = rebalanced.rows().iter().map(|r| r.delta.unwrap()).sum();
        let expected = target_total - portfolio.total_current_value().unwrap();
        let tolerance = Decimal::from(portfolio.len()) * dec!(0.5);

        prop_assert!(
            (delta_sum - expected).abs() <= tolerance,
            "delta sum {} vs expected {}",
            delta_sum,
            expected
        );
    }

    /// The summary residual is exactly buy minus sell, and equals the sum of deltas.
    #[test]
    fn prop_residual_is_exact(
        portfolio in arb_unbalanced_portfolio(20),
        target_total in 0u64..5_000_000_000,
    ) {
        let target_total = Decimal::from(target_total);
        let plan = RebalancePlan {
            target_total,
            portfolio: compute_rebalance(&portfolio, target_total).unwrap(),
        };
        let summary = summarize(&plan).unwrap();
        let delta_sum: Decimal = plan.portfolio.rows().iter().map(|r| r.delta.unwrap()).sum();

        prop_assert_eq!(summary.total_buy - summary.total_sell, summary.residual);
        prop_assert_eq!(summary.residual, delta_sum);
        prop_assert!(summary.total_buy >= Decimal::ZERO);
        prop_assert!(summary.total_sell >= Decimal::ZERO);
        prop_assert_eq!(summary.total_assets, target_total);
    }

    /// Actions follow the sign of the delta and input order is preserved.
    #[test]
    fn prop_action_matches_delta_sign(
        portfolio in arb_unbalanced_portfolio(20),
        target_total in 0u64..5_000_000_000,
    ) {
        let rebalanced = compute_rebalance(&portfolio, Decimal::from(target_total)).unwrap();

        for (before, after) in portfolio.rows().iter().zip(rebalanced.rows()) {
            prop_assert_eq!(&before.label, &after.label);
            let delta = after.delta.unwrap();
            let expected = if delta > Decimal::ZERO {
                TradeAction::Buy
            } else if delta < Decimal::ZERO {
                TradeAction::Sell
            } else {
                TradeAction::Hold
            };
            prop_assert_eq!(after.action, Some(expected));
        }
    }

    /// The concentration index stays in (0, 1] up to weight rounding, and the
    /// label follows the diversification score.
    #[test]
    fn prop_risk_metrics_are_consistent(values in arb_values(30)) {
        let allocated = compute_current_allocation(&portfolio_from_values(&values)).unwrap();
        let metrics = assess_risk(&allocated).unwrap();

        prop_assert!(metrics.concentration_index > Decimal::ZERO);
        prop_assert!(metrics.concentration_index <= dec!(1.001));
        prop_assert_eq!(
            metrics.diversification_score,
            Decimal::ONE - metrics.concentration_index
        );
        let expected_label = if metrics.diversification_score > dec!(0.7) {
            RiskLabel::WellDiversified
        } else {
            RiskLabel::Concentrated
        };
        prop_assert_eq!(metrics.label, expected_label);
    }
}
