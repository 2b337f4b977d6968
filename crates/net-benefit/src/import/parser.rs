use super::mapping::{column_for_header, direction_for_cell, importance_level_for_cell, Column};
use super::normalizer::normalize_cell;
use super::ImportError;
use crate::scoring::{ConfidenceInterval, Direction, OutcomeRecord};
use std::collections::HashMap;
use std::io::Read;

/// Header positions resolved once per file.
struct ColumnIndex {
    positions: HashMap<Column, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let mut positions = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(column) = column_for_header(header) {
                positions.entry(column).or_insert(index);
            }
        }

        for required in [Column::Label, Column::Effect, Column::Importance] {
            if !positions.contains_key(&required) {
                return Err(ImportError::MissingColumn {
                    column: required.canonical(),
                });
            }
        }

        let has_lower = positions.contains_key(&Column::CiLower);
        let has_upper = positions.contains_key(&Column::CiUpper);
        if has_lower != has_upper {
            let missing = if has_lower {
                Column::CiUpper
            } else {
                Column::CiLower
            };
            return Err(ImportError::MissingColumn {
                column: missing.canonical(),
            });
        }

        Ok(Self { positions })
    }

    fn cell(&self, record: &csv::StringRecord, column: Column) -> Option<String> {
        self.positions
            .get(&column)
            .and_then(|index| record.get(*index))
            .map(normalize_cell)
            .filter(|value| !value.is_empty())
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<OutcomeRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;
    let mut records = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = index + 1;

        if record.iter().all(|value| normalize_cell(value).is_empty()) {
            continue;
        }

        records.push(parse_row(&columns, &record, row)?);
    }

    Ok(records)
}

fn parse_row(
    columns: &ColumnIndex,
    record: &csv::StringRecord,
    row: usize,
) -> Result<OutcomeRecord, ImportError> {
    let label = columns
        .cell(record, Column::Label)
        .ok_or_else(|| unparsable(row, Column::Label, ""))?;
    let effect = required_number(columns, record, row, Column::Effect)?;
    let importance = parse_importance(columns, record, row)?;

    let direction = match columns.cell(record, Column::Direction) {
        Some(value) => {
            direction_for_cell(&value).ok_or(ImportError::UnknownDirection { row, value })?
        }
        None => Direction::Beneficial,
    };

    let lower = optional_number(columns, record, row, Column::CiLower)?;
    let upper = optional_number(columns, record, row, Column::CiUpper)?;
    let confidence_interval = match (lower, upper) {
        (Some(lower), Some(upper)) => Some(ConfidenceInterval { lower, upper }),
        (None, None) => None,
        _ => return Err(ImportError::IncompleteInterval { row }),
    };

    Ok(OutcomeRecord {
        label,
        effect,
        direction,
        importance,
        confidence_interval,
    })
}

fn parse_importance(
    columns: &ColumnIndex,
    record: &csv::StringRecord,
    row: usize,
) -> Result<f64, ImportError> {
    let value = columns
        .cell(record, Column::Importance)
        .ok_or_else(|| unparsable(row, Column::Importance, ""))?;

    if let Some(level) = importance_level_for_cell(&value) {
        return Ok(level.value());
    }

    value
        .parse::<f64>()
        .map_err(|_| unparsable(row, Column::Importance, &value))
}

fn required_number(
    columns: &ColumnIndex,
    record: &csv::StringRecord,
    row: usize,
    column: Column,
) -> Result<f64, ImportError> {
    optional_number(columns, record, row, column)?.ok_or_else(|| unparsable(row, column, ""))
}

fn optional_number(
    columns: &ColumnIndex,
    record: &csv::StringRecord,
    row: usize,
    column: Column,
) -> Result<Option<f64>, ImportError> {
    columns
        .cell(record, column)
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|_| unparsable(row, column, &value))
        })
        .transpose()
}

fn unparsable(row: usize, column: Column, value: &str) -> ImportError {
    ImportError::UnparsableColumn {
        row,
        column: column.canonical(),
        value: value.to_string(),
    }
}
