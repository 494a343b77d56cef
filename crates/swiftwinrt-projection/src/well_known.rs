//! Base runtime primitives and their Swift spellings
//!
//! The only place that knows how `mscorlib` primitives look in Swift, both
//! on the surface and at the ABI.

use crate::abi::AbiProjection;
use crate::mapper::ReferenceNullability;
use swiftwinrt_codewriter::SwiftType;

/// Swift module of the runtime support library
pub const RUNTIME_MODULE: &str = "WindowsRuntime";

/// A name inside the runtime support library: `WindowsRuntime.<name>`
pub(crate) fn runtime_type(name: &str) -> SwiftType {
    SwiftType::chain(&[RUNTIME_MODULE, name])
}

/// A name inside the ABI module: `<abi>.<name>`
pub(crate) fn abi_type(abi_module: &str, name: &str) -> SwiftType {
    SwiftType::chain(&[abi_module, name])
}

/// `UnsafeMutablePointer<<abi>.IInspectable>?`
pub(crate) fn inspectable_pointer(abi_module: &str) -> SwiftType {
    SwiftType::optional(
        SwiftType::unsafe_mutable_pointer(abi_type(abi_module, "IInspectable")),
        false,
    )
}

/// Surface type of a base runtime type, by simple name
///
/// `Object` is the only reference type among them and honours `nullability`;
/// `String` maps to a Swift value type.
pub fn primitive_swift_type(name: &str, nullability: ReferenceNullability) -> Option<SwiftType> {
    let ty = match name {
        "Void" | "Int16" | "UInt16" | "Int32" | "UInt32" | "Int64" | "UInt64" | "Double"
        | "String" => SwiftType::identifier(name),
        "Boolean" => SwiftType::Bool,
        "SByte" => SwiftType::int(Some(8), true),
        "Byte" => SwiftType::int(Some(8), false),
        "IntPtr" => SwiftType::int(None, true),
        "UIntPtr" => SwiftType::int(None, false),
        "Single" => SwiftType::Float,
        "Char" => SwiftType::chain(&["UTF16", "CodeUnit"]),
        "Guid" => SwiftType::chain(&["Foundation", "UUID"]),
        "Object" => nullability.apply(SwiftType::Any),
        _ => return None,
    };
    Some(ty)
}

/// ABI projection of a base runtime type, by simple name
///
/// `None` for `Void` and for base runtime types that never cross the ABI.
pub fn primitive_abi_projection(name: &str, abi_module: &str) -> Option<AbiProjection> {
    let projection = match name {
        "SByte" | "Byte" | "Int16" | "UInt16" | "Int32" | "UInt32" | "Int64" | "UInt64"
        | "Single" | "Double" | "Char" | "IntPtr" | "UIntPtr" => AbiProjection::Identity,
        "Boolean" => AbiProjection::Simple {
            abi_type: abi_type(abi_module, "boolean"),
            projection_type: runtime_type("BooleanProjection"),
            inert: true,
        },
        "String" => AbiProjection::Simple {
            abi_type: SwiftType::optional(abi_type(abi_module, "HSTRING"), false),
            projection_type: runtime_type("HStringProjection"),
            inert: false,
        },
        "Guid" => AbiProjection::Simple {
            abi_type: abi_type(abi_module, "GUID"),
            projection_type: runtime_type("GUIDProjection"),
            inert: true,
        },
        "Object" => AbiProjection::Simple {
            abi_type: inspectable_pointer(abi_module),
            projection_type: runtime_type("IInspectableProjection"),
            inert: false,
        },
        _ => return None,
    };
    Some(projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftwinrt_metadata::mscorlib;

    #[test]
    fn test_surface_table_is_exact() {
        let expected = [
            ("Void", "Void"),
            ("Boolean", "Bool"),
            ("Char", "UTF16.CodeUnit"),
            ("SByte", "Int8"),
            ("Byte", "UInt8"),
            ("Int16", "Int16"),
            ("UInt16", "UInt16"),
            ("Int32", "Int32"),
            ("UInt32", "UInt32"),
            ("Int64", "Int64"),
            ("UInt64", "UInt64"),
            ("Single", "Float"),
            ("Double", "Double"),
            ("IntPtr", "Int"),
            ("UIntPtr", "UInt"),
            ("Guid", "Foundation.UUID"),
            ("String", "String"),
            ("Object", "Any?"),
        ];
        for (name, swift) in expected {
            let ty = primitive_swift_type(name, ReferenceNullability::Explicit)
                .unwrap_or_else(|| panic!("no mapping for {}", name));
            assert_eq!(ty.to_string(), swift, "mapping for System.{}", name);
        }
    }

    #[test]
    fn test_surface_table_covers_every_primitive() {
        for name in mscorlib::PRIMITIVES {
            assert!(
                primitive_swift_type(name, ReferenceNullability::None).is_some(),
                "System.{} has no surface mapping",
                name
            );
        }
        assert!(primitive_swift_type("ValueType", ReferenceNullability::None).is_none());
    }

    #[test]
    fn test_object_nullability() {
        assert_eq!(
            primitive_swift_type("Object", ReferenceNullability::None).unwrap(),
            SwiftType::Any
        );
        assert_eq!(
            primitive_swift_type("Object", ReferenceNullability::Implicit)
                .unwrap()
                .to_string(),
            "Any!"
        );
        assert_eq!(
            primitive_swift_type("String", ReferenceNullability::Implicit)
                .unwrap()
                .to_string(),
            "String"
        );
    }

    #[test]
    fn test_abi_table() {
        for name in mscorlib::PRIMITIVES.iter().filter(|name| **name != "Void") {
            assert!(
                primitive_abi_projection(name, "CWinRT").is_some(),
                "System.{} has no ABI projection",
                name
            );
        }
        assert!(primitive_abi_projection("Void", "CWinRT").is_none());
        assert_eq!(
            primitive_abi_projection("Int32", "CWinRT"),
            Some(AbiProjection::Identity)
        );

        let expected = [
            ("Boolean", "CWinRT.boolean", "WindowsRuntime.BooleanProjection", true),
            ("String", "CWinRT.HSTRING?", "WindowsRuntime.HStringProjection", false),
            ("Guid", "CWinRT.GUID", "WindowsRuntime.GUIDProjection", true),
            (
                "Object",
                "UnsafeMutablePointer<CWinRT.IInspectable>?",
                "WindowsRuntime.IInspectableProjection",
                false,
            ),
        ];
        for (name, abi, projection, is_inert) in expected {
            match primitive_abi_projection(name, "CWinRT") {
                Some(AbiProjection::Simple {
                    abi_type,
                    projection_type,
                    inert,
                }) => {
                    assert_eq!(abi_type.to_string(), abi);
                    assert_eq!(projection_type.to_string(), projection);
                    assert_eq!(inert, is_inert);
                }
                other => panic!("unexpected projection for System.{}: {:?}", name, other),
            }
        }
    }
}
