//! Portfolio table: holdings as supplied and rows enriched by the engine.

mod portfolio_model;

pub use portfolio_model::{Holding, Portfolio, PortfolioRow};
