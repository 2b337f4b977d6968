//! Loads outcome tables exported from the decision-aid spreadsheets.

mod mapping;
mod normalizer;
mod parser;

use crate::scoring::OutcomeRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read outcome table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid outcome CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("outcome table is missing the '{column}' column")]
    MissingColumn { column: &'static str },
    #[error("row {row}: could not parse '{value}' in column '{column}'")]
    UnparsableColumn {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: unknown outcome direction '{value}'")]
    UnknownDirection { row: usize, value: String },
    #[error("row {row}: confidence interval needs both a lower and an upper bound")]
    IncompleteInterval { row: usize },
}

pub struct OutcomeTableImporter;

impl OutcomeTableImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<OutcomeRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<OutcomeRecord>, ImportError> {
        let records = parser::parse_records(reader)?;
        debug!(rows = records.len(), "imported outcome table");
        Ok(records)
    }
}
