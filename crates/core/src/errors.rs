//! Core error types for the rebalancer.
//!
//! The engine itself only raises validation and calculation errors. Market
//! data errors come from price resolvers and are usually swallowed by the
//! valuation step, but they are part of the root enum so resolvers can use
//! the crate-wide `Result`.

use thiserror::Error;

use crate::market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the rebalancer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rebalance calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("CSV processing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised when an engine precondition does not hold.
#[derive(Error, Debug, PartialEq)]
pub enum CalculatorError {
    /// The portfolio total is zero or negative, so no allocation exists.
    #[error("Portfolio total must be positive to compute allocations (got {0})")]
    DivisionByZero(rust_decimal::Decimal),

    #[error("Target total must not be negative (got {0})")]
    NegativeTargetTotal(rust_decimal::Decimal),

    /// An intermediate amount exceeds the range of `Decimal`.
    #[error("Amount out of range while computing {0}")]
    Overflow(String),
}

impl CalculatorError {
    pub fn overflow(operation: impl Into<String>) -> Self {
        CalculatorError::Overflow(operation.into())
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A derived field was read before the pass that produces it ran.
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}
