//! Projection errors
//!
//! Every error here aborts generation of the whole run; recoverable gaps
//! in the binding surface are emitted as trapping stubs instead.

use crate::config::ConfigError;
use swiftwinrt_metadata::MetadataError;
use thiserror::Error;

/// Result alias for projection operations
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Errors that can occur while projecting metadata to Swift
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A type shape the ABI layer cannot represent, such as a raw pointer
    #[error("Unsupported ABI shape: {shape}")]
    UnsupportedAbiShape {
        /// Signature of the offending type
        shape: String,
    },

    /// A constant with no Swift literal rendering
    #[error("Unsupported constant: {constant}")]
    UnsupportedConstant {
        /// The offending constant
        constant: String,
    },

    /// Metadata that violates a structural rule of the runtime
    #[error("Malformed metadata for {type_name}: {reason}")]
    MalformedMetadata {
        /// Fully qualified name of the offending definition
        type_name: String,
        /// What is wrong with it
        reason: String,
    },

    /// A definition was projected with the wrong number of generic arguments
    #[error("Generic arity mismatch for {type_name}: expected {expected}, got {actual}")]
    GenericArityMismatch {
        /// Fully qualified name of the definition
        type_name: String,
        /// Declared generic arity
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },

    /// Metadata could not be loaded or resolved
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Projection configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generated sources could not be written
    #[error("Failed to write generated sources: {0}")]
    Io(#[from] std::io::Error),
}

impl ProjectionError {
    pub(crate) fn malformed(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ProjectionError::MalformedMetadata {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
