//! Output consumers: tabular export of an enriched portfolio.

mod csv_export;

pub use csv_export::{portfolio_csv_bytes, write_portfolio_csv};
