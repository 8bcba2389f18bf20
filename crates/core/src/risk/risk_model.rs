use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    WellDiversified,
    Concentrated,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::WellDiversified => "Well diversified",
            RiskLabel::Concentrated => "Concentrated",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concentration figures derived from current allocation weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Herfindahl-style index, sum of squared weight fractions
    pub concentration_index: Decimal,
    /// `1 - concentration_index`
    pub diversification_score: Decimal,
    /// `1 / concentration_index`; `None` for an empty portfolio
    pub effective_holdings: Option<Decimal>,
    pub label: RiskLabel,
}
