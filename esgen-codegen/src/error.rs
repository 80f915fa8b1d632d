//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Mapping document parse error.
    #[error(transparent)]
    Parse(#[from] esgen_schema::ParseError),

    /// A document could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A document was read but is not well-formed.
    #[error("malformed document {}: {message}", path.display())]
    Malformed {
        /// Offending path.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A custom template is not well-formed.
    #[error("invalid template: {message}")]
    Template {
        /// Error message.
        message: String,
    },

    /// Two differently-shaped sub-schemas resolved to the same structure name.
    #[error("structure '{name}' is defined twice with different shapes")]
    StructCollision {
        /// Structure name.
        name: String,
    },
}

impl CodegenError {
    /// Creates a read error for the given path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed document error for the given path.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a template error with the given message.
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }
}
