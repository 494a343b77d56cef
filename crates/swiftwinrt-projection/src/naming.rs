//! Swift names derived from metadata names

use swiftwinrt_codewriter::{escape_identifier, SwiftVisibility};
use swiftwinrt_metadata::{TypeDefinition, Visibility};

/// Map a metadata visibility onto Swift's access levels
pub fn to_visibility(visibility: Visibility) -> SwiftVisibility {
    match visibility {
        Visibility::Public | Visibility::Family | Visibility::FamilyOrAssembly => {
            SwiftVisibility::Public
        }
        Visibility::Assembly | Visibility::FamilyAndAssembly => SwiftVisibility::Internal,
        Visibility::Private => SwiftVisibility::Private,
        Visibility::CompilerControlled => SwiftVisibility::Fileprivate,
    }
}

/// Swift type name: the metadata name without its generic suffix
pub fn to_type_name(definition: &TypeDefinition) -> String {
    definition.name_without_generic_suffix().to_string()
}

/// Name of the protocol an interface is exposed through: `IFooProtocol`
pub fn to_protocol_name(definition: &TypeDefinition) -> String {
    format!("{}Protocol", definition.name_without_generic_suffix())
}

/// Name of the class implementing an interface's projection: `IFooProjection`
pub fn to_projection_type_name(definition: &TypeDefinition) -> String {
    format!("{}Projection", definition.name_without_generic_suffix())
}

/// Existential type name an interface maps to: `AnyIFoo`
pub fn to_existential_name(definition: &TypeDefinition) -> String {
    format!("Any{}", definition.name_without_generic_suffix())
}

/// Mangled C struct name: `__x_ABI_CWindows_CFoundation_CIStringable`
pub fn to_abi_struct_name(definition: &TypeDefinition) -> String {
    let mut name = String::from("__x_ABI_C");
    for segment in definition.namespace.split('.').filter(|s| !s.is_empty()) {
        name.push_str(segment);
        name.push_str("_C");
    }
    name.push_str(definition.name_without_generic_suffix());
    name
}

/// Lower-camel-case member name, escaped if it collides with a keyword
///
/// A leading run of capitals is lowered as one word, keeping the last
/// capital when it starts the next word: `IPAddress` becomes `ipAddress`.
pub fn to_member_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let leading_upper = chars.iter().take_while(|c| c.is_uppercase()).count();
    let lowered = match leading_upper {
        0 | 1 => leading_upper,
        n if n == chars.len() => n,
        n if chars[n].is_alphabetic() => n - 1,
        n => n,
    };

    let mut member: String = chars[..lowered].iter().flat_map(|c| c.to_lowercase()).collect();
    member.extend(&chars[lowered..]);
    escape_identifier(&member)
}
