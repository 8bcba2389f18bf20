//! Rebalancer Core - allocation engine, risk metrics and their collaborators.
//!
//! The engine (`rebalancing`, `risk`) is synchronous and pure: every pass
//! takes a portfolio table and returns a new, enriched one. Importers,
//! exporters and price resolvers sit around it and never reach into it.

pub mod constants;
pub mod errors;
pub mod export;
pub mod import;
pub mod market_data;
pub mod portfolio;
pub mod rebalancing;
pub mod risk;

pub use portfolio::{Holding, Portfolio, PortfolioRow};
pub use rebalancing::*;
pub use risk::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
