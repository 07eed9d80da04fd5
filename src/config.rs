use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "supermarket_sales - Sheet1.csv";
pub const DEFAULT_OUTPUT: &str = "supermarket_sales.sql";

/// Where to read sales rows from and where to write the SQL script.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}
