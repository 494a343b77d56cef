//! WinRT metadata graph
//!
//! A navigable, read-only model of assemblies, type definitions and their
//! members, loaded from JSON metadata documents. The projection engine only
//! ever reads from a [`MetadataStore`].

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod guid;
pub mod model;
pub mod mscorlib;
pub mod signature;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use guid::Guid;
pub use model::{
    Accessor, Assembly, AssemblyId, BoundType, Constant, Event, InterfaceImpl, Method, NameKind, Param,
    Property, TypeDefId, TypeDefinition, TypeKind, TypeNode, Version, Visibility,
};
pub use signature::TypeSig;
pub use store::MetadataStore;
