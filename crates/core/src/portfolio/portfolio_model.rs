//! Portfolio table models: raw holdings and their enriched rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Error, Result, ValidationError};
use crate::rebalancing::TradeAction;

/// One asset-class line item as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub label: String,
    pub current_value: Decimal,
    /// Target allocation in percent (0-100)
    pub target_weight_pct: Decimal,
}

impl Holding {
    pub fn new(
        label: impl Into<String>,
        current_value: Decimal,
        target_weight_pct: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            current_value,
            target_weight_pct,
        }
    }

    /// Checks the record-level constraints an input source should enforce.
    ///
    /// The engine never calls this; it is for importers and entry forms.
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Holding label cannot be empty".to_string(),
            )));
        }
        if self.current_value < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Current value of '{}' cannot be negative",
                self.label
            ))));
        }
        if self.target_weight_pct < Decimal::ZERO || self.target_weight_pct > Decimal::ONE_HUNDRED
        {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Target weight of '{}' must be between 0 and 100",
                self.label
            ))));
        }
        Ok(())
    }
}

/// A holding together with the fields derived by the engine passes.
///
/// Derived fields stay `None` until the pass that computes them has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRow {
    pub label: String,
    pub current_value: Decimal,
    pub target_weight_pct: Decimal,
    /// Share of the current total in percent, 2 dp
    pub current_weight_pct: Option<Decimal>,
    /// Value this holding should have after rebalancing, whole units
    pub target_value: Option<Decimal>,
    /// `target_value - current_value`
    pub delta: Option<Decimal>,
    pub action: Option<TradeAction>,
}

impl From<Holding> for PortfolioRow {
    fn from(holding: Holding) -> Self {
        Self {
            label: holding.label,
            current_value: holding.current_value,
            target_weight_pct: holding.target_weight_pct,
            current_weight_pct: None,
            target_value: None,
            delta: None,
            action: None,
        }
    }
}

impl PortfolioRow {
    pub fn holding(&self) -> Holding {
        Holding::new(
            self.label.clone(),
            self.current_value,
            self.target_weight_pct,
        )
    }

    pub fn require_current_weight(&self) -> Result<Decimal> {
        self.current_weight_pct
            .ok_or_else(|| missing_field("current_weight_pct", &self.label))
    }

    pub fn require_target_value(&self) -> Result<Decimal> {
        self.target_value
            .ok_or_else(|| missing_field("target_value", &self.label))
    }

    pub fn require_delta(&self) -> Result<Decimal> {
        self.delta.ok_or_else(|| missing_field("delta", &self.label))
    }

    pub fn require_action(&self) -> Result<TradeAction> {
        self.action.ok_or_else(|| missing_field("action", &self.label))
    }
}

fn missing_field(field: &str, label: &str) -> Error {
    Error::Validation(ValidationError::MissingField(format!(
        "{} (holding '{}')",
        field, label
    )))
}

/// Ordered portfolio table. Order is preserved for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub rows: Vec<PortfolioRow>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self {
            rows: holdings.into_iter().map(PortfolioRow::from).collect(),
        }
    }

    pub fn rows(&self) -> &[PortfolioRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of `current_value` across all rows.
    ///
    /// Fails with [`CalculatorError::Overflow`] when the sum leaves the
    /// `Decimal` range.
    pub fn total_current_value(&self) -> Result<Decimal> {
        checked_sum(self.rows.iter().map(|r| r.current_value), "total current value")
    }

    /// Sum of `target_weight_pct` across all rows.
    pub fn total_target_weight(&self) -> Result<Decimal> {
        checked_sum(
            self.rows.iter().map(|r| r.target_weight_pct),
            "total target weight",
        )
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.rows.iter().map(PortfolioRow::holding).collect()
    }

    /// Labels that appear more than once, in first-seen order.
    pub fn duplicate_labels(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for row in &self.rows {
            if !seen.insert(row.label.as_str()) && !duplicates.contains(&row.label) {
                duplicates.push(row.label.clone());
            }
        }
        duplicates
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>, operation: &str) -> Result<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| Error::from(CalculatorError::overflow(operation)))
    })
}

impl From<Vec<Holding>> for Portfolio {
    fn from(holdings: Vec<Holding>) -> Self {
        Portfolio::new(holdings)
    }
}
