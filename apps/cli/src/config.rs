use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioSource {
    Sample,
    File(PathBuf),
    Positions { positions: PathBuf, prices: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: PortfolioSource,
    pub additional_investment: Decimal,
    pub export_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = match (
            var("REBALANCER_PORTFOLIO_FILE"),
            var("REBALANCER_POSITIONS_FILE"),
            var("REBALANCER_PRICES_FILE"),
        ) {
            (Some(file), _, _) => PortfolioSource::File(PathBuf::from(file)),
            (None, Some(positions), Some(prices)) => PortfolioSource::Positions {
                positions: PathBuf::from(positions),
                prices: PathBuf::from(prices),
            },
            (None, Some(_), None) => {
                bail!("REBALANCER_POSITIONS_FILE requires REBALANCER_PRICES_FILE")
            }
            (None, None, Some(_)) => {
                bail!("REBALANCER_PRICES_FILE requires REBALANCER_POSITIONS_FILE")
            }
            (None, None, None) => PortfolioSource::Sample,
        };

        let additional_investment = match var("REBALANCER_ADDITIONAL_INVESTMENT") {
            Some(raw) => Decimal::from_str(raw.trim().replace([',', '_'], "").as_str())
                .with_context(|| format!("Invalid REBALANCER_ADDITIONAL_INVESTMENT: {}", raw))?,
            None => Decimal::ZERO,
        };
        if additional_investment < Decimal::ZERO {
            bail!("REBALANCER_ADDITIONAL_INVESTMENT cannot be negative");
        }

        let export_path = var("REBALANCER_EXPORT_FILE").map(PathBuf::from);

        let log_format = match var("REBALANCER_LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(f) if f.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(f) => bail!("Invalid REBALANCER_LOG_FORMAT: {} (expected text or json)", f),
            None => LogFormat::Text,
        };

        Ok(Self {
            source,
            additional_investment,
            export_path,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.source, PortfolioSource::Sample);
        assert_eq!(config.additional_investment, Decimal::ZERO);
        assert!(config.export_path.is_none());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_portfolio_file_wins_over_positions() {
        let config = config(&[
            ("REBALANCER_PORTFOLIO_FILE", "portfolio.csv"),
            ("REBALANCER_POSITIONS_FILE", "positions.csv"),
            ("REBALANCER_PRICES_FILE", "prices.csv"),
        ])
        .unwrap();

        assert_eq!(
            config.source,
            PortfolioSource::File(PathBuf::from("portfolio.csv"))
        );
    }

    #[test]
    fn test_positions_need_prices() {
        assert!(config(&[("REBALANCER_POSITIONS_FILE", "positions.csv")]).is_err());
    }

    #[test]
    fn test_prices_need_positions() {
        let err = config(&[("REBALANCER_PRICES_FILE", "prices.csv")]).unwrap_err();
        assert!(err.to_string().contains("REBALANCER_POSITIONS_FILE"));
    }

    #[test]
    fn test_additional_investment() {
        let config = config(&[("REBALANCER_ADDITIONAL_INVESTMENT", "1,000,000")]).unwrap();
        assert_eq!(config.additional_investment, dec!(1000000));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config(&[("REBALANCER_ADDITIONAL_INVESTMENT", "lots")]).is_err());
        assert!(config(&[("REBALANCER_ADDITIONAL_INVESTMENT", "-5")]).is_err());
        assert!(config(&[("REBALANCER_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = config(&[("REBALANCER_EXPORT_FILE", "  ")]).unwrap();
        assert!(config.export_path.is_none());
    }
}
