use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlareplotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unexpected column structure: {0}")]
    ColumnStructure(String),

    #[error("Unsupported fingerprint format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid parameter: {name} = {value}, {message}")]
    InvalidParameter {
        name: String,
        value: String,
        message: String,
    },
}

/// Type alias for Result with FlareplotError
pub type Result<T> = std::result::Result<T, FlareplotError>;

impl FlareplotError {
    /// Create a new ColumnStructure error
    pub fn column_structure(message: impl Into<String>) -> Self {
        FlareplotError::ColumnStructure(message.into())
    }

    /// Create a new InvalidFileFormat error
    pub fn invalid_file_format(message: impl Into<String>) -> Self {
        FlareplotError::InvalidFileFormat(message.into())
    }

    /// Create a new InvalidParameter error
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        FlareplotError::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}
