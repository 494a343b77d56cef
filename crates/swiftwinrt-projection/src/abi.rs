//! ABI projections: how a type's value crosses the component boundary

use crate::context::Projection;
use crate::error::ProjectionResult;
use crate::mapper::ReferenceNullability;
use crate::naming;
use crate::well_known;
use swiftwinrt_codewriter::SwiftType;
use swiftwinrt_metadata::{BoundType, TypeKind, TypeNode};

/// How values of a type are converted between Swift and the C ABI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiProjection {
    /// The Swift and ABI representations are bit-identical
    Identity,
    /// Conversion goes through a projection helper type
    Simple {
        /// C ABI representation
        abi_type: SwiftType,
        /// Swift type implementing the conversion
        projection_type: SwiftType,
        /// Whether ABI values need no cleanup
        inert: bool,
    },
}

/// Swift surface type plus, when one exists, its ABI projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeProjection {
    /// Surface type, with reference types optional
    pub swift_type: SwiftType,
    /// `None` when no binding can be generated for the type yet
    pub abi: Option<AbiProjection>,
}

impl Projection<'_> {
    /// Projection of a type reference, memoized by type identity
    pub fn type_projection(&self, node: &TypeNode) -> ProjectionResult<TypeProjection> {
        if let Some(projection) = self.cached_projection(node) {
            return Ok(projection);
        }

        // Computed without holding the lock: resolution recurses into
        // generic arguments.
        let projection = TypeProjection {
            swift_type: self.to_type(node, ReferenceNullability::Explicit)?,
            abi: self.resolve_abi_projection(node)?,
        };
        Ok(self.remember_projection(node, projection))
    }

    fn resolve_abi_projection(&self, node: &TypeNode) -> ProjectionResult<Option<AbiProjection>> {
        let bound = match node {
            TypeNode::Bound(bound) => bound,
            TypeNode::Array(_) | TypeNode::GenericParam(_) | TypeNode::Pointer(_) => return Ok(None),
        };
        let definition = self.definition(bound);

        if self.store().is_mscorlib(definition.assembly) {
            return Ok(well_known::primitive_abi_projection(&definition.name, self.abi_module()));
        }

        if self.is_ireference(definition) {
            if let [wrapped] = bound.generic_args.as_slice() {
                return self.ireference_projection(wrapped);
            }
        }

        if !bound.generic_args.is_empty() {
            return Ok(None);
        }

        let projection = match definition.kind {
            TypeKind::Enum => Some(AbiProjection::Simple {
                abi_type: self.map_abi_type(self.enum_underlying(definition)?)?,
                projection_type: SwiftType::identifier(naming::to_type_name(definition)),
                inert: true,
            }),
            TypeKind::Interface => Some(AbiProjection::Simple {
                abi_type: self.abi_pointer(bound)?,
                projection_type: SwiftType::identifier(naming::to_projection_type_name(definition)),
                inert: false,
            }),
            TypeKind::Class => match definition.default_interface() {
                Some(default_interface) if default_interface.generic_args.is_empty() => {
                    Some(AbiProjection::Simple {
                        abi_type: self.abi_pointer(default_interface)?,
                        projection_type: SwiftType::identifier(naming::to_type_name(definition)),
                        inert: false,
                    })
                }
                _ => None,
            },
            TypeKind::Struct | TypeKind::Delegate => None,
        };
        Ok(projection)
    }

    /// `IReference<T>` travels as a boxed `IInspectable`
    fn ireference_projection(&self, wrapped: &TypeNode) -> ProjectionResult<Option<AbiProjection>> {
        let inner = self.type_projection(wrapped)?;
        let inner_projection = match inner.abi {
            Some(AbiProjection::Identity) => SwiftType::generic(
                format!("{}.IdentityProjection", well_known::RUNTIME_MODULE),
                vec![inner.swift_type],
            ),
            Some(AbiProjection::Simple { projection_type, .. }) => projection_type,
            None => return Ok(None),
        };

        Ok(Some(AbiProjection::Simple {
            abi_type: well_known::inspectable_pointer(self.abi_module()),
            projection_type: SwiftType::generic(
                format!("{}.IReferenceProjection", well_known::RUNTIME_MODULE),
                vec![inner_projection],
            ),
            inert: false,
        }))
    }

    fn abi_pointer(&self, bound: &BoundType) -> ProjectionResult<SwiftType> {
        Ok(SwiftType::optional(
            SwiftType::unsafe_mutable_pointer(self.map_abi_type(bound)?),
            false,
        ))
    }
}
