use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("header row {row_index} invalid: {message}")]
    InvalidHeader { row_index: usize, message: String },

    #[error("compound marker at row {row_index} did not match expected pattern: '{text}'")]
    CompoundPattern { row_index: usize, text: String },

    #[error("table shape mismatch: {message}")]
    Shape { message: String },

    #[error("file did not contain any data rows")]
    EmptyData,

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FormatError {
    /// Integer status preserved from the original tool's contract: `1` for a
    /// missing input path, `2` for everything else. Success maps to `0`.
    pub fn status_code(&self) -> i32 {
        match self {
            FormatError::Config { .. } => 1,
            _ => 2,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        FormatError::Config {
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        FormatError::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        FormatError::Shape {
            message: message.into(),
        }
    }
}
