/*!
 * Error types for the scriptmark application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a speaker table unusable for the whole run
#[derive(Error, Debug)]
pub enum SpeakerTableError {
    /// The tabular source does not exist at the expected location
    #[error("Speaker table not found: {path:?}. Place speakers.csv at this location or pass --speakers <CSV>")]
    NotFound {
        /// Location that was searched
        path: PathBuf,
    },

    /// The source exists but could not be read or decoded
    #[error("Failed to read speaker table {path:?}: {message}")]
    Unreadable {
        /// Location of the source
        path: PathBuf,
        /// Underlying reader error
        message: String,
    },

    /// The header row lacks one of the required columns
    #[error("Speaker table {path:?} is missing required column(s): {columns}")]
    MissingColumns {
        /// Location of the source
        path: PathBuf,
        /// Comma separated list of the absent columns
        columns: String,
    },
}

/// Problems with a single speaker table row. The row is skipped, the load goes on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    /// The row is shorter than the header
    #[error("Row {row} is malformed (name, color and length are required)")]
    MissingField {
        /// 1-based data row number
        row: usize,
    },

    /// The name column is blank
    #[error("Row {row} has an empty speaker name")]
    EmptyName {
        /// 1-based data row number
        row: usize,
    },

    /// The length column is not a non-negative integer
    #[error("Length '{value}' of speaker '{name}' is not a number, skipping")]
    InvalidLength {
        /// Speaker the row describes
        name: String,
        /// Raw length value
        value: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The speaker table could not be loaded; nothing was processed
    #[error("Speaker table error: {0}")]
    SpeakerTable(#[from] SpeakerTableError),

    /// The input script is missing or unreadable
    #[error("Input file error: {path:?}: {message}")]
    InputFile {
        /// Input location
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// The output could not be written
    #[error("Output error: {path:?}: {message}")]
    Output {
        /// Output location
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
