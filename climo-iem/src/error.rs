/// Error types for the IEM client library
use thiserror::Error;

/// Main error type for IEM operations
#[derive(Error, Debug)]
pub enum IemError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Response table is missing a required column
    #[error("Unexpected response schema: {0}")]
    Schema(String),

    /// Variable name does not match any daily record field
    #[error("Unknown weather variable: {0}")]
    UnknownVariable(String),
}

/// Type alias for Results using IemError
pub type Result<T> = std::result::Result<T, IemError>;
