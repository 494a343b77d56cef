//! Swift source writer
//!
//! Models the subset of Swift syntax the projection generator emits: type
//! expressions, declarations with bodies, and plain statements.

#![warn(missing_docs)]

pub mod names;
pub mod types;
pub mod writer;

pub use names::{escape_identifier, string_literal};
pub use types::{SwiftParameter, SwiftType, SwiftVisibility};
pub use writer::{
    SwiftClass, SwiftFunc, SwiftRecordBodyWriter, SwiftSourceFileWriter, SwiftStatementWriter,
};
