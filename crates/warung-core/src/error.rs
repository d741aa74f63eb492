//! Error types for the warung-core library.
//!
//! The line parser itself never fails; these errors only arise when
//! loading OCR line files or configuration.

use thiserror::Error;

/// Main error type for the warung library.
#[derive(Error, Debug)]
pub enum WarungError {
    /// OCR line input could not be loaded.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to loading OCR line input.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file extension does not name a known line format.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// The input parsed but does not have the expected shape.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// The input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8")]
    NotUtf8,
}

/// Result type for the warung library.
pub type Result<T> = std::result::Result<T, WarungError>;
