use tracing::debug;

use crate::errors::FormatError;
use crate::model::{is_blank, RawTable, Table};

/// Row offset (0-indexed) of the column-header row in a stock export.
pub const DEFAULT_HEADER_ROW: usize = 5;

/// Label applied to the first column; its header cell is blank in real exports.
pub const INDEX_COLUMN: &str = "Index";

/// Column whose blank cells mark compound-block rows.
pub const NAME_COLUMN: &str = "Name";

/// Apply the header row at `header_row` as column labels, drop every row with a
/// blank `Index` cell, then drop the first survivor (the report's date stamp).
pub fn normalize(raw: &RawTable, header_row: usize) -> Result<Table, FormatError> {
    let header = raw
        .rows
        .get(header_row)
        .ok_or_else(|| FormatError::InvalidHeader {
            row_index: header_row,
            message: format!("file has only {} rows", raw.rows.len()),
        })?;

    let mut columns: Vec<String> = header.iter().map(|cell| cell.trim().to_string()).collect();
    if columns.is_empty() {
        return Err(FormatError::InvalidHeader {
            row_index: header_row,
            message: "header row has no cells".to_string(),
        });
    }
    columns[0] = INDEX_COLUMN.to_string();

    if !columns.iter().any(|col| col == NAME_COLUMN) {
        return Err(FormatError::InvalidHeader {
            row_index: header_row,
            message: format!("header row has no '{NAME_COLUMN}' column"),
        });
    }

    let mut rows = Vec::new();
    let mut dropped_blank = 0usize;
    for (index, row) in raw.rows.iter().enumerate() {
        if index == header_row {
            continue;
        }
        match row.first() {
            Some(cell) if !is_blank(cell) => {
                let mut cells = row.clone();
                cells.resize(columns.len(), String::new());
                rows.push(cells);
            }
            _ => dropped_blank += 1,
        }
    }

    if rows.is_empty() {
        return Err(FormatError::EmptyData);
    }
    // First surviving row holds the report date, not data.
    rows.remove(0);
    if rows.is_empty() {
        return Err(FormatError::EmptyData);
    }

    debug!(
        kept = rows.len(),
        dropped_blank, "normalized export header block"
    );

    Ok(Table { columns, rows })
}
