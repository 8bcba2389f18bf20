//! Delimited-text readers for portfolio and position tables.
//!
//! Column names are matched case-insensitively against a list of aliases,
//! which include Japanese spreadsheet headers.

use std::io::Read;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::constants::FULL_ALLOCATION_PCT;
use crate::errors::{Error, Result, ValidationError};
use crate::market_data::Position;
use crate::portfolio::Holding;

const LABEL_COLUMNS: &[&str] = &["label", "asset_class", "asset", "name", "資産クラス"];
const VALUE_COLUMNS: &[&str] = &["current_value", "value", "amount", "現在額"];
const TARGET_COLUMNS: &[&str] = &[
    "target_weight_pct",
    "target_weight",
    "target_pct",
    "target",
    "目標配分",
];
const SYMBOL_COLUMNS: &[&str] = &["symbol", "ticker"];
const QUANTITY_COLUMNS: &[&str] = &["quantity", "shares", "qty"];

/// Thin wrapper over a `csv::Reader` with normalized headers.
pub struct TableReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
}

impl<R: Read> TableReader<R> {
    pub fn new(source: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        let headers = reader.headers()?.iter().map(normalize_header).collect();
        Ok(Self { reader, headers })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the first header matching one of `aliases`.
    pub fn find_column(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.headers.iter().position(|h| h == alias))
    }

    pub fn require_column(&self, field: &str, aliases: &[&str]) -> Result<usize> {
        self.find_column(aliases).ok_or_else(|| {
            Error::Validation(ValidationError::MissingField(format!(
                "column '{}' (accepted headers: {})",
                field,
                aliases.join(", ")
            )))
        })
    }

    /// Data records with their 1-based line number (the header is line 1).
    pub fn rows(&mut self) -> impl Iterator<Item = Result<(usize, StringRecord)>> + '_ {
        self.reader
            .records()
            .enumerate()
            .map(|(i, record)| record.map(|r| (i + 2, r)).map_err(Error::from))
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Parses a numeric cell, tolerating `,` and `_` digit grouping.
pub fn parse_decimal_cell(cell: Option<&str>, column: &str, line: usize) -> Result<Decimal> {
    let raw = cell.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Line {}: missing value for '{}'",
            line, column
        ))));
    }
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
    Decimal::from_str(&cleaned).map_err(|e| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Line {}: invalid number '{}' for '{}': {}",
            line, raw, column, e
        )))
    })
}

/// Reads holdings from a CSV with a header row.
///
/// Every row is validated; the first invalid row aborts the import. Target
/// weights that do not add up to 100 are accepted with a warning.
pub fn parse_portfolio_csv<R: Read>(source: R) -> Result<Vec<Holding>> {
    let mut table = TableReader::new(source)?;
    let label_idx = table.require_column("label", LABEL_COLUMNS)?;
    let value_idx = table.require_column("current_value", VALUE_COLUMNS)?;
    let target_idx = table.require_column("target_weight_pct", TARGET_COLUMNS)?;

    let mut holdings = Vec::new();
    for row in table.rows() {
        let (line, record) = row?;
        let holding = Holding::new(
            record.get(label_idx).unwrap_or("").trim(),
            parse_decimal_cell(record.get(value_idx), "current_value", line)?,
            parse_decimal_cell(record.get(target_idx), "target_weight_pct", line)?,
        );
        holding.validate().map_err(|e| with_line(e, line))?;
        holdings.push(holding);
    }

    let weight_sum: Decimal = holdings.iter().map(|h| h.target_weight_pct).sum();
    if !holdings.is_empty() && weight_sum != FULL_ALLOCATION_PCT {
        warn!(
            "Imported target weights add up to {}% instead of {}%",
            weight_sum, FULL_ALLOCATION_PCT
        );
    }
    debug!("Imported {} holdings", holdings.len());

    Ok(holdings)
}

/// Reads positions (symbol, quantity, target weight) from a CSV.
pub fn parse_positions_csv<R: Read>(source: R) -> Result<Vec<Position>> {
    let mut table = TableReader::new(source)?;
    let symbol_idx = table.require_column("symbol", SYMBOL_COLUMNS)?;
    let quantity_idx = table.require_column("quantity", QUANTITY_COLUMNS)?;
    let target_idx = table.require_column("target_weight_pct", TARGET_COLUMNS)?;

    let mut positions = Vec::new();
    for row in table.rows() {
        let (line, record) = row?;
        let position = Position::new(
            record.get(symbol_idx).unwrap_or("").trim(),
            parse_decimal_cell(record.get(quantity_idx), "quantity", line)?,
            parse_decimal_cell(record.get(target_idx), "target_weight_pct", line)?,
        );
        position.validate().map_err(|e| with_line(e, line))?;
        positions.push(position);
    }
    debug!("Imported {} positions", positions.len());

    Ok(positions)
}

fn with_line(err: Error, line: usize) -> Error {
    match err {
        Error::Validation(ValidationError::InvalidInput(msg)) => Error::Validation(
            ValidationError::InvalidInput(format!("Line {}: {}", line, msg)),
        ),
        other => other,
    }
}
