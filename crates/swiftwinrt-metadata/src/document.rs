//! JSON metadata documents
//!
//! A document describes one or more assemblies. Type references are written
//! as [signature strings](crate::signature).
//!
//! ```json
//! {
//!   "assemblies": [{
//!     "name": "Windows",
//!     "version": "255.255.255.255",
//!     "types": [{
//!       "namespace": "Windows.Foundation",
//!       "name": "IStringable",
//!       "kind": "interface",
//!       "guid": "96369F54-8EB6-48F0-ABCE-C1B211E627C3",
//!       "methods": [{ "name": "ToString", "returns": "System.String" }]
//!     }]
//!   }]
//! }
//! ```

use crate::guid::Guid;
use crate::model::{NameKind, TypeKind, Visibility};
use serde::Deserialize;

/// Top-level metadata document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataDocument {
    /// Assemblies described by the document
    pub assemblies: Vec<AssemblyDoc>,
}

/// An assembly entry
#[derive(Debug, Clone, Deserialize)]
pub struct AssemblyDoc {
    /// Simple assembly name
    pub name: String,
    /// Four-part version (defaults to `255.255.255.255`, as in WinMD files)
    #[serde(default = "default_version")]
    pub version: String,
    /// Declared types
    #[serde(default)]
    pub types: Vec<TypeDoc>,
}

fn default_version() -> String {
    "255.255.255.255".to_string()
}

/// A type definition entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDoc {
    /// Namespace
    #[serde(default)]
    pub namespace: String,
    /// Name, including any generic suffix
    pub name: String,
    /// Kind of definition
    pub kind: TypeKind,
    /// Visibility (defaults to public)
    #[serde(default)]
    pub visibility: Visibility,
    /// Generic parameter names
    #[serde(default)]
    pub generic_params: Vec<String>,
    /// Base type signature
    #[serde(default)]
    pub base: Option<String>,
    /// Implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<InterfaceImplDoc>,
    /// Interface identifier
    #[serde(default)]
    pub guid: Option<Guid>,
    /// Underlying integer type for enums (defaults to `System.Int32`)
    #[serde(default)]
    pub underlying: Option<String>,
    /// Properties
    #[serde(default)]
    pub properties: Vec<PropertyDoc>,
    /// Methods
    #[serde(default)]
    pub methods: Vec<MethodDoc>,
    /// Events
    #[serde(default)]
    pub events: Vec<EventDoc>,
}

/// An interface implementation entry
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceImplDoc {
    /// Interface signature
    pub interface: String,
    /// Marks the class's default interface
    #[serde(default)]
    pub default: bool,
}

/// A property entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDoc {
    /// Property name
    pub name: String,
    /// Property type signature
    #[serde(rename = "type")]
    pub ty: String,
    /// Getter visibility; absent when there is no getter
    #[serde(default)]
    pub getter: Option<Visibility>,
    /// Setter visibility; absent when there is no setter
    #[serde(default)]
    pub setter: Option<Visibility>,
    /// `specialname` flag
    #[serde(default)]
    pub special_name: bool,
}

/// A method entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDoc {
    /// Method name
    pub name: String,
    /// Visibility (defaults to public)
    #[serde(default)]
    pub visibility: Visibility,
    /// Name kind (defaults to regular)
    #[serde(default)]
    pub name_kind: NameKind,
    /// Parameters
    #[serde(default)]
    pub params: Vec<ParamDoc>,
    /// Return type signature (defaults to `System.Void`)
    #[serde(default = "default_return")]
    pub returns: String,
}

fn default_return() -> String {
    "System.Void".to_string()
}

/// A parameter entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDoc {
    /// Parameter name
    #[serde(default)]
    pub name: Option<String>,
    /// Parameter type signature
    #[serde(rename = "type")]
    pub ty: String,
    /// Passed by reference
    #[serde(default)]
    pub by_ref: bool,
}

/// An event entry
#[derive(Debug, Clone, Deserialize)]
pub struct EventDoc {
    /// Event name
    pub name: String,
    /// Handler delegate signature
    pub handler: String,
    /// Visibility (defaults to public)
    #[serde(default)]
    pub visibility: Visibility,
}

impl MetadataDocument {
    /// Parse a document from JSON text
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
