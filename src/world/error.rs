//! Error types for level and tuning data loading.

use thiserror::Error;

/// Errors that can occur when loading level or configuration data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File or directory could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Two level files declare the same id.
    #[error("Level id {id} is defined more than once ('{first}' and '{second}')")]
    DuplicateLevel { id: u32, first: String, second: String },

    /// A level directory produced no usable levels.
    #[error("No levels found in '{0}'")]
    EmptyRegistry(String),

    /// A level parsed but its contents are unusable.
    #[error("Level {id} is invalid: {reason}")]
    InvalidLevel { id: u32, reason: String },
}
