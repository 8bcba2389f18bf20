use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::Holding;

/// A quantity of a tradable symbol with its target weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
    pub target_weight_pct: Decimal,
}

impl Position {
    pub fn new(symbol: impl Into<String>, quantity: Decimal, target_weight_pct: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            target_weight_pct,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Position symbol cannot be empty".to_string(),
            )));
        }
        if self.quantity < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Quantity of '{}' cannot be negative",
                self.symbol
            ))));
        }
        if self.target_weight_pct < Decimal::ZERO || self.target_weight_pct > Decimal::ONE_HUNDRED
        {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Target weight of '{}' must be between 0 and 100",
                self.symbol
            ))));
        }
        Ok(())
    }
}

/// A position priced by a resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedPosition {
    pub symbol: String,
    pub quantity: Decimal,
    pub price: Decimal,
    /// `price * quantity`
    pub value: Decimal,
    pub target_weight_pct: Decimal,
}

/// Outcome of pricing a batch of positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionValuation {
    /// Priced positions, in input order
    pub valued: Vec<ValuedPosition>,
    /// Symbols dropped because no usable price was available
    pub skipped: Vec<String>,
    /// Sum of `value` over priced positions only
    pub total_value: Decimal,
}

impl PositionValuation {
    /// Holdings for the allocation engine, labelled by symbol.
    pub fn holdings(&self) -> Vec<Holding> {
        self.valued
            .iter()
            .map(|p| Holding::new(p.symbol.clone(), p.value, p.target_weight_pct))
            .collect()
    }
}
