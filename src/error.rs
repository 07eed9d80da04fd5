use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot open input {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 17 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: invalid sale date {value:?} (expected MM/DD/YYYY)")]
    InvalidDate {
        line: u64,
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("cannot create output {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}
