//! WinRT to Swift projection engine
//!
//! Maps type definitions from a [`MetadataStore`](swiftwinrt_metadata::MetadataStore)
//! onto Swift declarations: surface types, ABI types and conversion helpers,
//! interface identifiers, and member bindings.
//!
//! ```no_run
//! use swiftwinrt_metadata::MetadataStore;
//! use swiftwinrt_projection::{generate, ProjectionConfig};
//!
//! let mut store = MetadataStore::new();
//! store.load_file(std::path::Path::new("Windows.Foundation.json"))?;
//! for module in generate(&store, &ProjectionConfig::default())? {
//!     module.write_to(std::path::Path::new("Generated"))?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod abi;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod iid;
pub mod mapper;
pub mod members;
pub mod naming;
pub mod well_known;

pub use abi::{AbiProjection, TypeProjection};
pub use config::{ConfigError, ModuleAssignment, ModuleConfig, ProjectionConfig};
pub use context::Projection;
pub use dispatch::Emission;
pub use error::{ProjectionError, ProjectionResult};
pub use generator::{generate, GeneratedFile, GeneratedModule};
pub use iid::to_iid_initializer;
pub use mapper::{to_constant, ReferenceNullability};
pub use members::{Member, MemberBinding};
