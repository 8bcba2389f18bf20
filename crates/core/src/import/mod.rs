//! Input table sources: CSV import and the built-in sample portfolio.

mod csv_parser;
mod sample;

pub use csv_parser::{parse_decimal_cell, parse_portfolio_csv, parse_positions_csv, TableReader};
pub use sample::sample_portfolio;
