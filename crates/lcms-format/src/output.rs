use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compounds::COMPOUND_COLUMN_POSITION;
use crate::errors::FormatError;
use crate::model::AnnotatedTable;

fn csv_bytes(columns: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>, FormatError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

impl AnnotatedTable {
    /// The table as comma-delimited text, header first, no row-index column.
    pub fn to_csv_string(&self) -> Result<String, FormatError> {
        let bytes = csv_bytes(&self.columns, &self.rows)?;
        String::from_utf8(bytes)
            .map_err(|_| FormatError::shape("serialized table was not valid UTF-8".to_string()))
    }
}

/// Write the whole annotated table to one delimited file.
pub fn write_single(table: &AnnotatedTable, path: &Path) -> Result<(), FormatError> {
    let bytes = csv_bytes(&table.columns, &table.rows)?;
    fs::write(path, bytes)?;
    debug!(path = %path.display(), rows = table.rows.len(), "wrote annotated table");
    Ok(())
}

/// Write one file per target, each holding the rows whose `compound_name`
/// matches that target. Every file is serialized before the first write, and
/// files already on disk are removed if a later write fails, so the split is
/// all-or-nothing.
pub fn write_split(
    table: &AnnotatedTable,
    targets: &[(String, PathBuf)],
) -> Result<Vec<PathBuf>, FormatError> {
    let mut pending = Vec::with_capacity(targets.len());
    for (compound, path) in targets {
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .filter(|row| {
                row.get(COMPOUND_COLUMN_POSITION)
                    .is_some_and(|name| name == compound)
            })
            .cloned()
            .collect();
        let bytes = csv_bytes(&table.columns, &rows)?;
        pending.push((path.clone(), bytes));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(pending.len());
    for (path, bytes) in pending {
        if let Err(err) = fs::write(&path, bytes) {
            for done in &written {
                let _ = fs::remove_file(done);
            }
            return Err(FormatError::Io { source: err });
        }
        debug!(path = %path.display(), "wrote compound file");
        written.push(path);
    }

    Ok(written)
}
