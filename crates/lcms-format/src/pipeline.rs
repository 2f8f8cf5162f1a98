use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compounds::{annotate, partition};
use crate::errors::FormatError;
use crate::model::{AnnotatedTable, RawTable};
use crate::output::{write_single, write_split};
use crate::table::{normalize, DEFAULT_HEADER_ROW};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// 0-indexed offset of the column-header row in the export.
    pub header_row: usize,
    /// When set, every compound block must contain exactly this many rows.
    /// Left unset, block lengths are taken from the data.
    pub expected_block_len: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            header_row: DEFAULT_HEADER_ROW,
            expected_block_len: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatSummary {
    /// Distinct compound names in first-occurrence order.
    pub compounds: Vec<String>,
    pub rows_written: usize,
    pub files: Vec<PathBuf>,
}

/// Run the full transformation over export text already in memory.
pub fn annotate_export(
    content: &str,
    options: &FormatOptions,
) -> Result<AnnotatedTable, FormatError> {
    let raw = RawTable::parse(content)?;
    let table = normalize(&raw, options.header_row)?;
    let (blocks, data_rows) = partition(&table)?;
    annotate(&table, &blocks, data_rows, options.expected_block_len)
}

/// Reformat the export at `file_path` with the stock layout assumptions.
///
/// With `split_files` false the annotated table is written to `return_path`.
/// With it true, one file is written per distinct compound: to `file_names`
/// when given (which must match the compound count), otherwise to
/// `<compound_name>.csv` inside `return_path` treated as a directory.
pub fn format_sample(
    file_path: impl AsRef<Path>,
    return_path: impl AsRef<Path>,
    split_files: bool,
    file_names: Option<&[PathBuf]>,
) -> Result<FormatSummary, FormatError> {
    format_sample_with(
        file_path,
        return_path,
        split_files,
        file_names,
        &FormatOptions::default(),
    )
}

pub fn format_sample_with(
    file_path: impl AsRef<Path>,
    return_path: impl AsRef<Path>,
    split_files: bool,
    file_names: Option<&[PathBuf]>,
    options: &FormatOptions,
) -> Result<FormatSummary, FormatError> {
    let file_path = file_path.as_ref();
    if file_path.as_os_str().is_empty() {
        return Err(FormatError::config("no input file path was given"));
    }
    let return_path = return_path.as_ref();

    let raw = RawTable::load(file_path)?;
    let table = normalize(&raw, options.header_row)?;
    let (blocks, data_rows) = partition(&table)?;
    let annotated = annotate(&table, &blocks, data_rows, options.expected_block_len)?;
    let compounds = annotated.distinct_compounds();

    let files = if split_files {
        let targets = split_targets(&compounds, return_path, file_names)?;
        write_split(&annotated, &targets)?
    } else {
        if return_path.as_os_str().is_empty() {
            return Err(FormatError::validation("no output path was given"));
        }
        write_single(&annotated, return_path)?;
        vec![return_path.to_path_buf()]
    };

    debug!(
        compounds = compounds.len(),
        rows = annotated.rows.len(),
        files = files.len(),
        "reformatted sample export"
    );

    Ok(FormatSummary {
        compounds,
        rows_written: annotated.rows.len(),
        files,
    })
}

fn split_targets(
    compounds: &[String],
    return_path: &Path,
    file_names: Option<&[PathBuf]>,
) -> Result<Vec<(String, PathBuf)>, FormatError> {
    match file_names {
        Some(names) => {
            if names.len() != compounds.len() {
                return Err(FormatError::validation(format!(
                    "{} file names given for {} compounds",
                    names.len(),
                    compounds.len()
                )));
            }
            Ok(compounds
                .iter()
                .cloned()
                .zip(names.iter().cloned())
                .collect())
        }
        None => Ok(compounds
            .iter()
            .map(|compound| {
                (
                    compound.clone(),
                    return_path.join(format!("{compound}.csv")),
                )
            })
            .collect()),
    }
}
