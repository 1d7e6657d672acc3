// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for file-renaming

use thiserror::Error;

/// Result type alias for file-renaming operations
pub type Result<T> = std::result::Result<T, FileRenamingError>;

/// file-renaming error types
#[derive(Error, Debug)]
pub enum FileRenamingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("Validation error: {0}")]
    Validation(String),

    /// External names do not line up one-to-one with the input files
    #[error("Name count ({names}) does not match file count ({files})")]
    CountMismatch { files: usize, names: usize },

    /// No free target name within the attempt budget
    #[error("Cannot rename {file}: target already exists")]
    CollisionExhausted { file: String },

    #[error("Failed to rename {file}: {source}")]
    RenameFailed {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote name generator refused or could not answer
    #[error("Name generator error: {0}")]
    Generator(String),

    #[error("Failed to parse generated names: {reason} (content: {content})")]
    MalformedResponse { reason: String, content: String },

    #[error("{failed} of {total} files could not be renamed")]
    PartialFailure { failed: usize, total: usize },
}
