use async_trait::async_trait;
use rust_decimal::Decimal;

use super::market_data_errors::MarketDataError;

/// Source of already-resolved per-unit prices.
///
/// Implementations own any retry or caching behaviour; the valuation step
/// calls each symbol once.
#[async_trait]
pub trait PriceResolver: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &'static str;

    /// Latest price per unit, or `Ok(None)` when the source has no price.
    async fn latest_price(&self, symbol: &str) -> Result<Option<Decimal>, MarketDataError>;
}
