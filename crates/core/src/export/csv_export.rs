use std::io::Write;

use csv::WriterBuilder;
use rust_decimal::Decimal;

use crate::portfolio::Portfolio;
use crate::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const HEADERS: [&str; 7] = [
    "label",
    "current_value",
    "target_weight_pct",
    "current_weight_pct",
    "target_value",
    "delta",
    "action",
];

/// Writes the portfolio table, base and derived columns. Derived fields
/// that have not been computed are left empty.
pub fn write_portfolio_csv<W: Write>(writer: W, portfolio: &Portfolio) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for row in portfolio.rows() {
        csv_writer.write_record([
            row.label.clone(),
            row.current_value.to_string(),
            row.target_weight_pct.to_string(),
            optional_cell(row.current_weight_pct),
            optional_cell(row.target_value),
            optional_cell(row.delta),
            row.action.map(|a| a.to_string()).unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders the table to bytes, optionally prefixed with a UTF-8 BOM so
/// spreadsheet tools pick up the encoding.
pub fn portfolio_csv_bytes(portfolio: &Portfolio, with_bom: bool) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if with_bom {
        buffer.extend_from_slice(UTF8_BOM);
    }
    write_portfolio_csv(&mut buffer, portfolio)?;
    Ok(buffer)
}

fn optional_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}
