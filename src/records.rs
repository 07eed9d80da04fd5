use serde::Deserialize;
use std::{fs::File, path::Path};
use tracing::{debug, info};

use crate::error::ConvertError;

/// Number of columns every sales row must carry.
pub const FIELD_COUNT: usize = 17;

/// One row of the supermarket sales export. Fields are bound by position,
/// not by the header names in the file.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct SaleRecord {
    /// 1-based line in the source file.
    #[serde(skip)]
    pub line: u64,
    pub invoice_id: String,
    pub branch: String,
    pub city: String,
    pub customer_type: String,
    pub gender: String,
    pub product_line: String,
    pub unit_price: String,
    pub quantity: String,
    pub tax_5_percent: String,
    pub total: String,
    /// `MM/DD/YYYY`
    pub sale_date: String,
    /// `HH:MM`
    pub sale_time: String,
    pub payment: String,
    pub cogs: String,
    pub gross_margin_percentage: String,
    pub gross_income: String,
    pub rating: String,
}

pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>, ConvertError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConvertError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading sales csv");

    // Arity is checked per row below so short rows get a line number rather
    // than the csv crate's UnequalLengths error.
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map_or(0, |pos| pos.line());

        if row.len() != FIELD_COUNT {
            return Err(ConvertError::FieldCount {
                line,
                found: row.len(),
            });
        }

        let mut record: SaleRecord = row.deserialize(None)?;
        record.line = line;
        records.push(record);
    }

    info!(rows = records.len(), path = %path.display(), "loaded sales rows");
    Ok(records)
}
