//! Metadata loading errors

use thiserror::Error;

/// Result alias for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that can occur while loading or resolving metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Failed to read a metadata document
    #[error("Failed to read metadata document: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a metadata document
    #[error("Failed to parse metadata document: {0}")]
    Json(#[from] serde_json::Error),

    /// A type signature string could not be parsed
    #[error("Invalid type signature '{signature}': {reason}")]
    InvalidSignature {
        /// The offending signature text
        signature: String,
        /// What went wrong
        reason: String,
    },

    /// A GUID string could not be parsed
    #[error("Invalid GUID: {0}")]
    InvalidGuid(String),

    /// An assembly version string could not be parsed
    #[error("Invalid assembly version: {0}")]
    InvalidVersion(String),

    /// A type reference names no known definition
    #[error("Unresolved type: {name}")]
    UnresolvedType {
        /// Fully qualified name that was not found
        name: String,
    },

    /// Two definitions share the same fully qualified name
    #[error("Duplicate type definition: {name}")]
    DuplicateType {
        /// Fully qualified name
        name: String,
    },

    /// An enum is backed by something other than an integer primitive
    #[error("Invalid underlying type '{underlying}' for enum {name}")]
    InvalidEnumUnderlying {
        /// Fully qualified name of the enum
        name: String,
        /// Signature of the underlying type
        underlying: String,
    },

    /// A reference supplies the wrong number of generic arguments
    #[error("Generic arity mismatch for {name}: expected {expected}, got {actual}")]
    GenericArityMismatch {
        /// Fully qualified name of the definition
        name: String,
        /// Declared generic arity
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },
}
