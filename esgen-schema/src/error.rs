//! Error types for mapping document parsing.

use thiserror::Error;

/// Error type for mapping document parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not valid JSON, or a node does not have the expected shape.
    ///
    /// `path` is the dotted location of the offending node inside the document
    /// (for example `mappings.properties.title.type`), or `.` for the root.
    #[error("malformed document at '{path}': {message}")]
    Json {
        /// Location of the offending node.
        path: String,
        /// Description of the JSON error, with line and column.
        message: String,
    },
}

impl ParseError {
    /// Returns the document path of the offending node.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Json { path, .. } => path,
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ParseError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::Json {
            path: err.path().to_string(),
            message: err.inner().to_string(),
        }
    }
}
