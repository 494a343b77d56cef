//! Type mapping: metadata type references to Swift surface and ABI types

use crate::abi::AbiProjection;
use crate::context::Projection;
use crate::error::{ProjectionError, ProjectionResult};
use crate::naming;
use crate::well_known;
use swiftwinrt_codewriter::SwiftType;
use swiftwinrt_metadata::{BoundType, Constant, TypeDefinition, TypeKind, TypeNode, Version, Visibility};

/// How a reference-typed mapping is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceNullability {
    /// Leave the type as is
    None,
    /// `T?`
    Explicit,
    /// `T!`
    Implicit,
}

impl ReferenceNullability {
    /// Apply to a reference type
    pub fn apply(self, ty: SwiftType) -> SwiftType {
        match self {
            ReferenceNullability::None => ty,
            ReferenceNullability::Explicit => SwiftType::optional(ty, false),
            ReferenceNullability::Implicit => SwiftType::optional(ty, true),
        }
    }
}

const IREFERENCE_ASSEMBLY: &str = "Windows";
const IREFERENCE_NAMESPACE: &str = "Windows.Foundation";
const IREFERENCE_NAME: &str = "IReference`1";

impl Projection<'_> {
    /// Swift type for a type reference, as used in member signatures
    ///
    /// Reference types become optional; `allow_implicit_unwrap` picks `T!`
    /// over `T?`.
    pub fn map_surface_type(&self, node: &TypeNode, allow_implicit_unwrap: bool) -> ProjectionResult<SwiftType> {
        let nullability = if allow_implicit_unwrap {
            ReferenceNullability::Implicit
        } else {
            ReferenceNullability::Explicit
        };
        self.to_type(node, nullability)
    }

    /// Swift return type; `None` exactly for `System.Void`
    pub fn map_return_type(&self, node: &TypeNode) -> ProjectionResult<Option<SwiftType>> {
        if self.store().is_void(node) {
            return Ok(None);
        }
        self.to_type(node, ReferenceNullability::Implicit).map(Some)
    }

    /// Swift type for a type reference with explicit reference nullability
    pub fn to_type(&self, node: &TypeNode, nullability: ReferenceNullability) -> ProjectionResult<SwiftType> {
        match node {
            TypeNode::Bound(bound) => self.to_bound_type(bound, nullability),
            TypeNode::Array(element) => {
                let element = self.to_type(element, ReferenceNullability::Explicit)?;
                Ok(nullability.apply(SwiftType::array(element)))
            }
            TypeNode::GenericParam(name) => Ok(SwiftType::identifier(name.clone())),
            TypeNode::Pointer(_) => Err(ProjectionError::UnsupportedAbiShape {
                shape: self.signature_of(node),
            }),
        }
    }

    fn to_bound_type(&self, bound: &BoundType, nullability: ReferenceNullability) -> ProjectionResult<SwiftType> {
        let definition = self.definition(bound);

        if self.store().is_mscorlib(definition.assembly) {
            if let Some(ty) = well_known::primitive_swift_type(&definition.name, nullability) {
                return Ok(ty);
            }
        }

        if self.is_ireference(definition) {
            if let [wrapped] = bound.generic_args.as_slice() {
                let wrapped = self.to_type(wrapped, ReferenceNullability::Explicit)?;
                return Ok(nullability.apply(wrapped));
            }
        }

        let name = match definition.kind {
            TypeKind::Interface => naming::to_existential_name(definition),
            _ => naming::to_type_name(definition),
        };
        let generic_args = bound
            .generic_args
            .iter()
            .map(|arg| self.to_type(arg, ReferenceNullability::Explicit))
            .collect::<ProjectionResult<Vec<_>>>()?;
        let ty = SwiftType::generic(name, generic_args);

        let is_reference = match definition.kind {
            TypeKind::Interface => true,
            TypeKind::Class => definition.full_name() != "System.String",
            _ => false,
        };
        Ok(if is_reference { nullability.apply(ty) } else { ty })
    }

    /// Swift base class for a class's metadata base type
    ///
    /// `System.Object` and non-public bases have no Swift counterpart.
    pub fn to_base_type(&self, base: &BoundType) -> ProjectionResult<Option<SwiftType>> {
        let definition = self.definition(base);
        if Some(base.definition) == self.store().system_type("Object")
            || definition.visibility != Visibility::Public
        {
            return Ok(None);
        }

        let generic_args = base
            .generic_args
            .iter()
            .map(|arg| self.to_type(arg, ReferenceNullability::Explicit))
            .collect::<ProjectionResult<Vec<_>>>()?;
        Ok(Some(SwiftType::generic(naming::to_type_name(definition), generic_args)))
    }

    /// Whether a definition is `Windows.Foundation.IReference<T>`
    pub fn is_ireference(&self, definition: &TypeDefinition) -> bool {
        let assembly = self.store().assembly_of(definition);
        assembly.name == IREFERENCE_ASSEMBLY
            && assembly.version == Version::ALL_255
            && definition.namespace == IREFERENCE_NAMESPACE
            && definition.name == IREFERENCE_NAME
            && definition.generic_arity() == 1
    }

    /// C ABI type of a bound type
    ///
    /// Interfaces, structs and delegates map to their mangled struct in the
    /// ABI module, classes to their default interface, enums to their
    /// underlying integer.
    pub fn map_abi_type(&self, bound: &BoundType) -> ProjectionResult<SwiftType> {
        let definition = self.definition(bound);
        if !bound.generic_args.is_empty() {
            return Err(ProjectionError::UnsupportedAbiShape {
                shape: self.signature_of(&bound.to_node()),
            });
        }

        if self.store().is_mscorlib(definition.assembly) {
            return match well_known::primitive_abi_projection(&definition.name, self.abi_module()) {
                Some(AbiProjection::Identity) => {
                    well_known::primitive_swift_type(&definition.name, ReferenceNullability::None)
                        .ok_or_else(|| ProjectionError::UnsupportedAbiShape {
                            shape: definition.full_name(),
                        })
                }
                Some(AbiProjection::Simple { abi_type, .. }) => Ok(abi_type),
                None => Err(ProjectionError::UnsupportedAbiShape {
                    shape: definition.full_name(),
                }),
            };
        }

        match definition.kind {
            TypeKind::Interface | TypeKind::Struct | TypeKind::Delegate => {
                Ok(self.abi_struct(definition))
            }
            TypeKind::Class => match definition.default_interface() {
                Some(default_interface) => self.map_abi_type(default_interface),
                None => Err(ProjectionError::malformed(
                    definition.full_name(),
                    "class has no default interface",
                )),
            },
            TypeKind::Enum => self.map_abi_type(self.enum_underlying(definition)?),
        }
    }

    /// C vtable struct of an interface, delegate or class
    pub fn map_abi_vtable_type(&self, bound: &BoundType) -> ProjectionResult<SwiftType> {
        let definition = self.definition(bound);
        if !bound.generic_args.is_empty() {
            return Err(ProjectionError::UnsupportedAbiShape {
                shape: self.signature_of(&bound.to_node()),
            });
        }

        match definition.kind {
            TypeKind::Interface | TypeKind::Delegate => Ok(SwiftType::identifier(format!(
                "{}.{}Vtbl",
                self.abi_module(),
                naming::to_abi_struct_name(definition)
            ))),
            TypeKind::Class => match definition.default_interface() {
                Some(default_interface) => self.map_abi_vtable_type(default_interface),
                None => Err(ProjectionError::malformed(
                    definition.full_name(),
                    "class has no default interface",
                )),
            },
            TypeKind::Enum | TypeKind::Struct => Err(ProjectionError::UnsupportedAbiShape {
                shape: format!("vtable of {} {}", definition.kind, definition.full_name()),
            }),
        }
    }

    fn abi_struct(&self, definition: &TypeDefinition) -> SwiftType {
        well_known::abi_type(self.abi_module(), &naming::to_abi_struct_name(definition))
    }

    pub(crate) fn enum_underlying<'d>(&self, definition: &'d TypeDefinition) -> ProjectionResult<&'d BoundType> {
        match &definition.enum_underlying {
            Some(TypeNode::Bound(underlying)) => Ok(underlying),
            _ => Err(ProjectionError::malformed(
                definition.full_name(),
                "enum has no underlying integer type",
            )),
        }
    }
}

/// Swift literal for a boolean, integer or null constant
pub fn to_constant(constant: &Constant) -> ProjectionResult<String> {
    Ok(match constant {
        Constant::Boolean(value) => value.to_string(),
        Constant::Int8(value) => value.to_string(),
        Constant::Int16(value) => value.to_string(),
        Constant::Int32(value) => value.to_string(),
        Constant::Int64(value) => value.to_string(),
        Constant::UInt8(value) => value.to_string(),
        Constant::UInt16(value) => value.to_string(),
        Constant::UInt32(value) => value.to_string(),
        Constant::UInt64(value) => value.to_string(),
        Constant::Null => "nil".to_string(),
        Constant::Char(_) | Constant::Single(_) | Constant::Double(_) | Constant::String(_) => {
            return Err(ProjectionError::UnsupportedConstant {
                constant: constant.to_string(),
            })
        }
    })
}
