use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use rebalancer_core::export::write_portfolio_csv;
use rebalancer_core::import::{parse_portfolio_csv, parse_positions_csv, sample_portfolio};
use rebalancer_core::market_data::{value_positions, StaticPriceResolver};
use rebalancer_core::{Holding, RebalanceReport, RebalancingService, RebalancingServiceTrait};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat, PortfolioSource};

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

pub async fn load_holdings(source: &PortfolioSource) -> anyhow::Result<Vec<Holding>> {
    match source {
        PortfolioSource::Sample => {
            tracing::info!("No portfolio file configured, using sample portfolio");
            Ok(sample_portfolio())
        }
        PortfolioSource::File(path) => {
            tracing::info!("Loading portfolio from {}", path.display());
            Ok(parse_portfolio_csv(open(path)?)?)
        }
        PortfolioSource::Positions { positions, prices } => {
            tracing::info!(
                "Valuing positions from {} with prices from {}",
                positions.display(),
                prices.display()
            );
            let positions = parse_positions_csv(open(positions)?)?;
            let resolver = StaticPriceResolver::from_csv(open(prices)?)?;
            let valuation = value_positions(&resolver, &positions).await;
            if !valuation.skipped.is_empty() {
                tracing::warn!(
                    "No price for {}; excluded from the portfolio",
                    valuation.skipped.join(", ")
                );
            }
            tracing::info!(
                "Valued {} positions, total {}",
                valuation.valued.len(),
                valuation.total_value
            );
            Ok(valuation.holdings())
        }
    }
}

pub async fn build_report(config: &Config) -> anyhow::Result<RebalanceReport> {
    let holdings = load_holdings(&config.source).await?;
    let service = RebalancingService::new();
    let report = service.build_report(holdings, config.additional_investment)?;

    if report.summary.has_residual() {
        tracing::warn!(
            "Buy and sell totals differ by {}; target weights do not add up to 100%",
            report.summary.residual
        );
    }

    if let Some(path) = &config.export_path {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_portfolio_csv(file, &report.plan.portfolio)?;
        tracing::info!("Exported rebalance table to {}", path.display());
    }

    Ok(report)
}
