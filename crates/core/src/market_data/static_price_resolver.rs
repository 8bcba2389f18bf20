use std::collections::HashMap;
use std::io::Read;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::import::{parse_decimal_cell, TableReader};
use crate::Result;

use super::market_data_errors::MarketDataError;
use super::market_data_traits::PriceResolver;

const SYMBOL_COLUMNS: &[&str] = &["symbol", "ticker"];
const PRICE_COLUMNS: &[&str] = &["price", "close"];

/// Price table held in memory, typically loaded from a `symbol,price` CSV
/// produced by whatever tool fetched the quotes.
#[derive(Debug, Default, Clone)]
pub struct StaticPriceResolver {
    prices: HashMap<String, Decimal>,
}

impl StaticPriceResolver {
    pub fn from_prices<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            prices: prices
                .into_iter()
                .map(|(symbol, price)| (symbol.into(), price))
                .collect(),
        }
    }

    /// Loads a price table. Later rows win when a symbol repeats.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut table = TableReader::new(reader)?;
        let symbol_idx = table.require_column("symbol", SYMBOL_COLUMNS)?;
        let price_idx = table.require_column("price", PRICE_COLUMNS)?;

        let mut prices = HashMap::new();
        for row in table.rows() {
            let (line, record) = row?;
            let symbol = record.get(symbol_idx).unwrap_or("").trim().to_string();
            if symbol.is_empty() {
                continue;
            }
            let price = parse_decimal_cell(record.get(price_idx), "price", line)?;
            prices.insert(symbol, price);
        }
        Ok(Self { prices })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceResolver for StaticPriceResolver {
    fn id(&self) -> &'static str {
        "STATIC"
    }

    async fn latest_price(
        &self,
        symbol: &str,
    ) -> std::result::Result<Option<Decimal>, MarketDataError> {
        Ok(self.prices.get(symbol).copied())
    }
}
