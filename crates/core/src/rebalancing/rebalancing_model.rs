use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::Portfolio;
use crate::risk::RiskMetrics;

// ============================================================================
// Domain Models
// ============================================================================

/// Trade direction implied by the sign of a rebalance delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl TradeAction {
    pub fn from_delta(delta: Decimal) -> Self {
        if delta > Decimal::ZERO {
            TradeAction::Buy
        } else if delta < Decimal::ZERO {
            TradeAction::Sell
        } else {
            TradeAction::Hold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target total plus the portfolio after both engine passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancePlan {
    pub target_total: Decimal,
    pub portfolio: Portfolio,
}

/// Aggregate buy/sell figures over a rebalanced portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceSummary {
    /// Equals the plan's target total
    pub total_assets: Decimal,
    /// Sum of positive deltas
    pub total_buy: Decimal,
    /// Sum of absolute negative deltas
    pub total_sell: Decimal,
    /// `total_buy - total_sell`; non-zero when target weights do not add up to 100
    pub residual: Decimal,
}

impl RebalanceSummary {
    pub fn has_residual(&self) -> bool {
        !self.residual.is_zero()
    }
}

// ============================================================================
// Recommendation Models
// ============================================================================

/// A single holding that needs to be bought or sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInstruction {
    pub label: String,
    pub action: TradeAction,
    /// Absolute trade amount
    pub amount: Decimal,
    pub current_value: Decimal,
    pub current_weight_pct: Decimal,
    pub target_value: Decimal,
    pub target_weight_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    /// 1-based position in the execution order
    pub step: usize,
    pub label: String,
    pub action: TradeAction,
    pub amount: Decimal,
}

/// Ordered trade list for carrying out a plan. Sells come before buys so the
/// proceeds can fund the purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceRecommendation {
    pub sells: Vec<TradeInstruction>,
    pub buys: Vec<TradeInstruction>,
    pub steps: Vec<ExecutionStep>,
    /// Largest |current weight - target weight| in percentage points
    pub max_deviation_pct: Decimal,
    pub deviation_alert: bool,
}

impl RebalanceRecommendation {
    pub fn is_balanced(&self) -> bool {
        self.sells.is_empty() && self.buys.is_empty()
    }
}

/// Everything a presentation layer needs for one rebalance scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceReport {
    pub plan: RebalancePlan,
    pub summary: RebalanceSummary,
    pub risk: RiskMetrics,
    pub recommendation: RebalanceRecommendation,
}
