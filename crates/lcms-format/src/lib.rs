pub mod compounds;
pub mod errors;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod table;

pub use compounds::{annotate, extract_compound_name, partition, COMPOUND_COLUMN};
pub use errors::FormatError;
pub use model::{AnnotatedTable, CompoundBlock, RawTable, Table};
pub use output::{write_single, write_split};
pub use pipeline::{
    annotate_export, format_sample, format_sample_with, FormatOptions, FormatSummary,
};
pub use table::{normalize, DEFAULT_HEADER_ROW, INDEX_COLUMN, NAME_COLUMN};
