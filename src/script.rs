use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::ConvertError,
    format::format_values,
    records::{read_csv, SaleRecord},
};

const SCHEMA: &str = "\
CREATE DATABASE IF NOT EXISTS supermarket_sales;
USE supermarket_sales;

-- Create the sales table
CREATE TABLE IF NOT EXISTS sales (
    invoice_id VARCHAR(20) PRIMARY KEY,
    branch CHAR(1),
    city VARCHAR(50),
    customer_type VARCHAR(20),
    gender VARCHAR(10),
    product_line VARCHAR(100),
    unit_price DECIMAL(10, 2),
    quantity INT,
    tax_5_percent DECIMAL(10, 4),
    total DECIMAL(10, 4),
    sale_date DATE,
    sale_time TIME,
    payment VARCHAR(20),
    cogs DECIMAL(10, 2),
    gross_margin_percentage DECIMAL(10, 9),
    gross_income DECIMAL(10, 4),
    rating DECIMAL(3, 1)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;

-- Disable foreign key checks for the import
SET FOREIGN_KEY_CHECKS = 0;

-- Clear existing rows
TRUNCATE TABLE sales;

-- Insert rows
INSERT INTO sales (
    invoice_id, branch, city, customer_type, gender, product_line,
    unit_price, quantity, tax_5_percent, total, sale_date, sale_time,
    payment, cogs, gross_margin_percentage, gross_income, rating
) VALUES
";

const FOOTER: &str = "
-- Re-enable foreign key checks
SET FOREIGN_KEY_CHECKS = 1;

-- Commit
COMMIT;
";

/// Outcome of a successful [`convert`] run.
#[derive(Debug, PartialEq)]
pub struct ConvertSummary {
    pub rows: usize,
    pub output: PathBuf,
}

/// Writes the full import script for `records` and returns the number of
/// value tuples written.
///
/// With no records the INSERT header is followed directly by the footer.
/// MySQL rejects that statement, but no tuple text is invented for it.
pub fn write_script<W: Write>(mut out: W, records: &[SaleRecord]) -> Result<usize, ConvertError> {
    out.write_all(SCHEMA.as_bytes())?;

    if records.is_empty() {
        warn!("no data rows; INSERT statement has no VALUES tuples");
    }

    let last = records.len().saturating_sub(1);
    for (i, record) in records.iter().enumerate() {
        let values = format_values(record)?;
        let terminator = if i == last { ';' } else { ',' };
        writeln!(out, "    ({values}){terminator}")?;
    }

    out.write_all(FOOTER.as_bytes())?;
    Ok(records.len())
}

/// Reads `config.input` and writes the SQL script to `config.output`.
///
/// The output is created (or truncated) only after the input has been
/// read. A formatting error part-way through leaves a partial file behind.
pub fn convert(config: &Config) -> Result<ConvertSummary, ConvertError> {
    let records = read_csv(&config.input)?;

    let file = File::create(&config.output).map_err(|source| ConvertError::CreateOutput {
        path: config.output.clone(),
        source,
    })?;
    debug!(path = %config.output.display(), "writing sql script");

    let mut writer = BufWriter::new(file);
    let rows = write_script(&mut writer, &records)?;
    writer.flush()?;

    debug!(rows, path = %config.output.display(), "sql script flushed");
    Ok(ConvertSummary {
        rows,
        output: config.output.clone(),
    })
}
