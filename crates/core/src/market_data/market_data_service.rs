//! Prices positions through a [`PriceResolver`] before they reach the engine.

use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::market_data_errors::MarketDataError;
use super::market_data_model::{Position, PositionValuation, ValuedPosition};
use super::market_data_traits::PriceResolver;

/// Prices every position concurrently.
///
/// A position is dropped (and its symbol listed in `skipped`) when the
/// resolver returns no price, a non-positive price, or an error, or when its
/// value does not fit in a `Decimal`. The batch itself never fails.
pub async fn value_positions(
    resolver: &dyn PriceResolver,
    positions: &[Position],
) -> PositionValuation {
    let lookups = positions
        .iter()
        .map(|position| resolver.latest_price(&position.symbol));
    let prices = join_all(lookups).await;

    let mut valuation = PositionValuation::default();
    for (position, price) in positions.iter().zip(prices) {
        let priced = usable_price(&position.symbol, price).and_then(|price| {
            let out_of_range = || MarketDataError::InvalidPrice {
                symbol: position.symbol.clone(),
                price: format!("{} x {} is out of range", price, position.quantity),
            };
            let value = price.checked_mul(position.quantity).ok_or_else(out_of_range)?;
            let total = valuation
                .total_value
                .checked_add(value)
                .ok_or_else(out_of_range)?;
            Ok((price, value, total))
        });
        match priced {
            Ok((price, value, total)) => {
                valuation.total_value = total;
                valuation.valued.push(ValuedPosition {
                    symbol: position.symbol.clone(),
                    quantity: position.quantity,
                    price,
                    value,
                    target_weight_pct: position.target_weight_pct,
                });
            }
            Err(e) => {
                warn!(
                    "Skipping {} ({}): {}",
                    position.symbol,
                    resolver.id(),
                    e
                );
                valuation.skipped.push(position.symbol.clone());
            }
        }
    }

    debug!(
        "Valued {} of {} positions via {}, total {}",
        valuation.valued.len(),
        positions.len(),
        resolver.id(),
        valuation.total_value
    );

    valuation
}

fn usable_price(
    symbol: &str,
    price: Result<Option<Decimal>, MarketDataError>,
) -> Result<Decimal, MarketDataError> {
    match price? {
        Some(p) if p > Decimal::ZERO => Ok(p),
        Some(p) => Err(MarketDataError::InvalidPrice {
            symbol: symbol.to_string(),
            price: p.to_string(),
        }),
        None => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
    }
}
