use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::FormatError;
use crate::model::{is_blank, AnnotatedTable, CompoundBlock, Table};
use crate::table::NAME_COLUMN;

/// Label of the inserted annotation column.
pub const COMPOUND_COLUMN: &str = "compound_name";

/// Position at which the annotation column is inserted.
pub const COMPOUND_COLUMN_POSITION: usize = 1;

// Marker format written by the quantification software: one space after
// "Compound", two spaces after the numbered colon, then the compound name
// (word characters, digits, colons, hyphens, internal spaces).
static COMPOUND_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Compound (\d+):  ([\w][\w :\-]*)").expect("compound marker pattern is valid")
});

/// Extract the compound name from a marker cell, trimmed of trailing spaces.
pub fn extract_compound_name(text: &str) -> Option<&str> {
    COMPOUND_MARKER
        .captures(text)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim_end())
}

/// Split a normalized table into compound blocks and ordinary measurement rows.
///
/// A row with a blank `Name` cell starts a new block; every following row up to
/// the next marker is counted against it. Block lengths are taken from the data
/// rather than assumed, so a short or long block surfaces later as a shape
/// mismatch instead of silently misaligned labels.
pub fn partition(table: &Table) -> Result<(Vec<CompoundBlock>, Vec<Vec<String>>), FormatError> {
    let name_col = table
        .column_index(NAME_COLUMN)
        .ok_or_else(|| FormatError::shape(format!("table has no '{NAME_COLUMN}' column")))?;

    let mut blocks: Vec<CompoundBlock> = Vec::new();
    let mut data_rows = Vec::new();

    for (row_index, row) in table.rows.iter().enumerate() {
        let name_cell = row.get(name_col).map(String::as_str).unwrap_or_default();
        if is_blank(name_cell) {
            let marker = row.first().map(String::as_str).unwrap_or_default();
            let name = extract_compound_name(marker).ok_or_else(|| {
                FormatError::CompoundPattern {
                    row_index,
                    text: marker.to_string(),
                }
            })?;
            blocks.push(CompoundBlock {
                name: name.to_string(),
                row_count: 0,
            });
        } else {
            let block = blocks.last_mut().ok_or_else(|| {
                FormatError::shape(format!(
                    "data row {row_index} appears before the first compound marker"
                ))
            })?;
            block.row_count += 1;
            data_rows.push(row.clone());
        }
    }

    if blocks.is_empty() {
        return Err(FormatError::EmptyData);
    }

    debug!(
        compounds = blocks.len(),
        rows = data_rows.len(),
        "partitioned compound blocks"
    );

    Ok((blocks, data_rows))
}

/// Insert the `compound_name` column at position 1, aligning each block's name
/// with the rows counted for it.
pub fn annotate(
    table: &Table,
    blocks: &[CompoundBlock],
    data_rows: Vec<Vec<String>>,
    expected_block_len: Option<usize>,
) -> Result<AnnotatedTable, FormatError> {
    if let Some(expected) = expected_block_len {
        for block in blocks {
            if block.row_count != expected {
                return Err(FormatError::shape(format!(
                    "compound '{}' has {} rows, expected {expected}",
                    block.name, block.row_count
                )));
            }
        }
    }

    let total: usize = blocks.iter().map(|block| block.row_count).sum();
    if total != data_rows.len() {
        return Err(FormatError::shape(format!(
            "compound blocks account for {total} rows but table has {}",
            data_rows.len()
        )));
    }

    let mut columns = table.columns.clone();
    columns.insert(COMPOUND_COLUMN_POSITION, COMPOUND_COLUMN.to_string());

    let labels = blocks
        .iter()
        .flat_map(|block| std::iter::repeat(block.name.as_str()).take(block.row_count));

    let mut rows = Vec::with_capacity(data_rows.len());
    for (mut row, name) in data_rows.into_iter().zip(labels) {
        row.insert(COMPOUND_COLUMN_POSITION, name.to_string());
        rows.push(row);
    }

    Ok(AnnotatedTable { columns, rows })
}
