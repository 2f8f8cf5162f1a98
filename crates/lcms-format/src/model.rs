use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::FormatError;

/// An empty-after-trim cell is the CSV analogue of the export's null.
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// The export file as rows of text cells, before any header is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn parse(content: &str) -> Result<Self, FormatError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(Self { rows })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }
}

/// A table with column labels applied and the preamble filtered out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == name)
    }
}

/// One compound marker in source order, with the number of measurement rows
/// that followed it before the next marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundBlock {
    pub name: String,
    pub row_count: usize,
}

/// The final table with `compound_name` inserted at column position 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl AnnotatedTable {
    /// Distinct compound names in first-occurrence order.
    pub fn distinct_compounds(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if let Some(name) = row.get(crate::compounds::COMPOUND_COLUMN_POSITION) {
                if !seen.iter().any(|existing: &String| existing == name) {
                    seen.push(name.clone());
                }
            }
        }
        seen
    }
}
