//! Error types for pairbench operations.

use thiserror::Error;

/// Result type alias using pairbench's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running or reporting a benchmark.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// IO error while reading config or writing artifacts.
    #[error("io error: {0}")]
    IoError(String),

    /// Results could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Chart rendering failed.
    #[error("plot error: {0}")]
    PlotError(String),

    /// A trace session was started on a thread that already holds one.
    #[error("memory trace session already active on this thread")]
    NestedTrace,
}
