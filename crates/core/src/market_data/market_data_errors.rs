use thiserror::Error;

/// Errors a price resolver can report for a single symbol.
///
/// Valuation treats every variant as "price unavailable" and drops the
/// position; none of them abort a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: String },

    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },
}
