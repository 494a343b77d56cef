//! Core metadata definitions

use crate::guid::Guid;
use crate::error::MetadataError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Index of a type definition in its [`MetadataStore`](crate::MetadataStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDefId(pub(crate) u32);

impl TypeDefId {
    /// Position of the definition in the store
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an assembly in its [`MetadataStore`](crate::MetadataStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(pub(crate) u32);

/// Member and type visibility, as encoded in ECMA-335 metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    /// Not referenceable outside its scope
    CompilerControlled,
    /// Visible only to the declaring type
    Private,
    /// Visible within the assembly (`internal`)
    Assembly,
    /// Visible to subtypes within the assembly
    FamilyAndAssembly,
    /// Visible to subtypes or within the assembly
    FamilyOrAssembly,
    /// Visible to subtypes (`protected`)
    Family,
    /// Visible everywhere
    #[default]
    Public,
}

/// The kind of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    /// A COM interface with an IID
    Interface,
    /// A runtime class (or a reference type in the base runtime)
    Class,
    /// An enumeration backed by an integer
    Enum,
    /// A value type
    Struct,
    /// A delegate type
    Delegate,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Class => write!(f, "class"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Struct => write!(f, "struct"),
            TypeKind::Delegate => write!(f, "delegate"),
        }
    }
}

/// Whether a method name is ordinary or reserved (accessors, constructors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum NameKind {
    /// An ordinary method name
    #[default]
    Regular,
    /// `specialname`: property and event accessors
    Special,
    /// `rtspecialname`: constructors and other runtime-reserved names
    RuntimeSpecial,
}

/// A four-part assembly version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version {
    #[allow(missing_docs)]
    pub major: u16,
    #[allow(missing_docs)]
    pub minor: u16,
    #[allow(missing_docs)]
    pub build: u16,
    #[allow(missing_docs)]
    pub revision: u16,
}

impl Version {
    /// The `255.255.255.255` version carried by WinMD contract references
    pub const ALL_255: Self = Self::new(255, 255, 255, 255);

    /// Create a version from its four parts
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self { major, minor, build, revision }
    }
}

impl FromStr for Version {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0u16; 4];
        let pieces: Vec<&str> = s.split('.').collect();
        if pieces.is_empty() || pieces.len() > 4 {
            return Err(MetadataError::InvalidVersion(s.to_string()));
        }
        for (slot, piece) in parts.iter_mut().zip(&pieces) {
            *slot = piece
                .parse()
                .map_err(|_| MetadataError::InvalidVersion(s.to_string()))?;
        }
        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
    }
}

/// A loaded assembly
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Assembly id
    pub id: AssemblyId,
    /// Simple name, e.g. `Windows`
    pub name: String,
    /// Assembly version
    pub version: Version,
    /// Definitions declared by the assembly, in declaration order
    pub types: Vec<TypeDefId>,
}

/// A type reference in a signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    /// A definition instantiated with its generic arguments
    Bound(BoundType),
    /// Single-dimensional array: `T[]`
    Array(Box<TypeNode>),
    /// An unbound generic parameter of the enclosing definition
    GenericParam(String),
    /// Unmanaged pointer: `T*`
    Pointer(Box<TypeNode>),
}

impl From<BoundType> for TypeNode {
    fn from(bound: BoundType) -> Self {
        TypeNode::Bound(bound)
    }
}

/// A definition together with its generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundType {
    /// The instantiated definition
    pub definition: TypeDefId,
    /// Generic arguments, one per declared generic parameter
    pub generic_args: Vec<TypeNode>,
}

impl BoundType {
    /// Bind a definition with the given arguments
    pub fn new(definition: TypeDefId, generic_args: Vec<TypeNode>) -> Self {
        Self { definition, generic_args }
    }

    /// Bind a definition without generic arguments
    pub fn non_generic(definition: TypeDefId) -> Self {
        Self::new(definition, Vec::new())
    }

    /// View this bound type as a type node
    pub fn to_node(&self) -> TypeNode {
        TypeNode::Bound(self.clone())
    }
}

/// A class's interface implementation
#[derive(Debug, Clone)]
pub struct InterfaceImpl {
    /// The implemented interface
    pub interface: BoundType,
    /// Whether this is the class's `[Default]` interface
    pub is_default: bool,
}

/// A property or event accessor
#[derive(Debug, Clone)]
pub struct Accessor {
    /// Accessor method name, e.g. `get_Name`; this is also its vtable slot name
    pub name: String,
    /// Accessor visibility
    pub visibility: Visibility,
}

impl Accessor {
    /// Whether the accessor is publicly callable
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A declared property
#[derive(Debug, Clone)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Property type
    pub ty: TypeNode,
    /// Get accessor, if any
    pub getter: Option<Accessor>,
    /// Set accessor, if any
    pub setter: Option<Accessor>,
    /// `specialname` flag on the property itself
    pub special_name: bool,
}

/// A method parameter
#[derive(Debug, Clone)]
pub struct Param {
    /// Parameter name; metadata allows unnamed parameters
    pub name: Option<String>,
    /// Parameter type
    pub ty: TypeNode,
    /// Passed by reference
    pub is_by_ref: bool,
}

/// A declared method
#[derive(Debug, Clone)]
pub struct Method {
    /// Method name
    pub name: String,
    /// Method visibility
    pub visibility: Visibility,
    /// Regular or reserved name
    pub name_kind: NameKind,
    /// Parameters in declaration order
    pub params: Vec<Param>,
    /// Return type, `System.Void` when nothing is returned
    pub return_type: TypeNode,
}

impl Method {
    /// Whether the method is publicly callable
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A declared event
#[derive(Debug, Clone)]
pub struct Event {
    /// Event name
    pub name: String,
    /// Delegate type of the handler
    pub handler: TypeNode,
    /// Event visibility
    pub visibility: Visibility,
}

/// A value from the metadata constant table
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    #[allow(missing_docs)]
    Boolean(bool),
    /// A UTF-16 code unit
    Char(u16),
    #[allow(missing_docs)]
    Int8(i8),
    #[allow(missing_docs)]
    Int16(i16),
    #[allow(missing_docs)]
    Int32(i32),
    #[allow(missing_docs)]
    Int64(i64),
    #[allow(missing_docs)]
    UInt8(u8),
    #[allow(missing_docs)]
    UInt16(u16),
    #[allow(missing_docs)]
    UInt32(u32),
    #[allow(missing_docs)]
    UInt64(u64),
    #[allow(missing_docs)]
    Single(f32),
    #[allow(missing_docs)]
    Double(f64),
    #[allow(missing_docs)]
    String(String),
    /// The null reference
    Null,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Boolean(value) => write!(f, "boolean {}", value),
            Constant::Char(value) => write!(f, "char {:#06x}", value),
            Constant::Int8(value) => write!(f, "int8 {}", value),
            Constant::Int16(value) => write!(f, "int16 {}", value),
            Constant::Int32(value) => write!(f, "int32 {}", value),
            Constant::Int64(value) => write!(f, "int64 {}", value),
            Constant::UInt8(value) => write!(f, "uint8 {}", value),
            Constant::UInt16(value) => write!(f, "uint16 {}", value),
            Constant::UInt32(value) => write!(f, "uint32 {}", value),
            Constant::UInt64(value) => write!(f, "uint64 {}", value),
            Constant::Single(value) => write!(f, "single {}", value),
            Constant::Double(value) => write!(f, "double {}", value),
            Constant::String(value) => write!(f, "string {:?}", value),
            Constant::Null => f.write_str("null"),
        }
    }
}

/// A type definition
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    /// Definition id
    pub id: TypeDefId,
    /// Declaring assembly
    pub assembly: AssemblyId,
    /// Namespace, possibly empty
    pub namespace: String,
    /// Name including any generic suffix, e.g. ``IVector`1``
    pub name: String,
    /// Type visibility
    pub visibility: Visibility,
    /// Type kind
    pub kind: TypeKind,
    /// Generic parameter names
    pub generic_params: Vec<String>,
    /// Base type, if any
    pub base_type: Option<BoundType>,
    /// Implemented interfaces (classes)
    pub interfaces: Vec<InterfaceImpl>,
    /// Interface identifier (interfaces and delegates)
    pub guid: Option<Guid>,
    /// Underlying integer type (enums)
    pub enum_underlying: Option<TypeNode>,
    /// Declared properties
    pub properties: Vec<Property>,
    /// Declared methods, accessors excluded
    pub methods: Vec<Method>,
    /// Declared events
    pub events: Vec<Event>,
}

impl TypeDefinition {
    /// `Namespace.Name`, or just `Name` in the global namespace
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Name with the `` `N `` generic arity suffix removed
    pub fn name_without_generic_suffix(&self) -> &str {
        match self.name.find('`') {
            Some(tick) => &self.name[..tick],
            None => &self.name,
        }
    }

    /// Number of declared generic parameters
    pub fn generic_arity(&self) -> usize {
        self.generic_params.len()
    }

    /// Whether the type is publicly visible
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// The implementation flagged as the class's default interface
    pub fn default_interface(&self) -> Option<&BoundType> {
        self.interfaces
            .iter()
            .find(|implementation| implementation.is_default)
            .map(|implementation| &implementation.interface)
    }

    /// Bind this definition without generic arguments
    pub fn bind(&self) -> BoundType {
        BoundType::non_generic(self.id)
    }
}
