//! Market data module - price resolvers and position valuation.
//!
//! Quote retrieval itself lives outside this crate; resolvers here only
//! hand back prices that were already fetched.

mod market_data_errors;
mod market_data_model;
mod market_data_service;
mod market_data_traits;
mod static_price_resolver;

pub use market_data_errors::MarketDataError;
pub use market_data_model::{Position, PositionValuation, ValuedPosition};
pub use market_data_service::value_positions;
pub use market_data_traits::PriceResolver;
pub use static_price_resolver::StaticPriceResolver;
