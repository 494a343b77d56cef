//! The base runtime assembly
//!
//! WinMD files reference primitives through `mscorlib`. The store registers
//! this assembly up front so documents never have to declare it.

use crate::model::{TypeKind, Version};

/// Name of the base runtime assembly
pub const ASSEMBLY_NAME: &str = "mscorlib";

/// Version carried by WinMD references to the base runtime
pub const VERSION: Version = Version::ALL_255;

/// Namespace of every base runtime type
pub const NAMESPACE: &str = "System";

/// Primitive value types of the base runtime, including `Void`
pub const PRIMITIVES: &[&str] = &[
    "Void", "Boolean", "Char", "SByte", "Byte", "Int16", "UInt16", "Int32", "UInt32", "Int64",
    "UInt64", "Single", "Double", "IntPtr", "UIntPtr", "Guid",
];

/// Integer primitives an enum may be backed by
pub const ENUM_UNDERLYING_TYPES: &[&str] = &[
    "SByte", "Byte", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
];

/// Reference types of the base runtime
pub const REFERENCE_TYPES: &[&str] = &[
    "Object",
    "String",
    "ValueType",
    "Enum",
    "MulticastDelegate",
    "Attribute",
];

/// Every built-in definition with its kind, in registration order
pub fn builtin_types() -> impl Iterator<Item = (&'static str, TypeKind)> {
    PRIMITIVES
        .iter()
        .map(|name| (*name, TypeKind::Struct))
        .chain(REFERENCE_TYPES.iter().map(|name| (*name, TypeKind::Class)))
}
