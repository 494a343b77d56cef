//! Projection context shared by every emission in a run

use crate::abi::TypeProjection;
use crate::error::{ProjectionError, ProjectionResult};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use swiftwinrt_metadata::{BoundType, MetadataStore, TypeDefinition, TypeNode};

/// Projects metadata from one store into Swift
///
/// Holds the ABI module name every generated declaration refers to and a
/// memo table of type projections keyed by type reference. The table only
/// ever grows, and each entry is a pure function of its key, so a
/// `Projection` can be shared across threads.
#[derive(Debug)]
pub struct Projection<'a> {
    store: &'a MetadataStore,
    abi_module: String,
    type_projections: Mutex<FxHashMap<TypeNode, TypeProjection>>,
}

impl<'a> Projection<'a> {
    /// Create a projection over a loaded store
    pub fn new(store: &'a MetadataStore, abi_module: impl Into<String>) -> Self {
        Projection {
            store,
            abi_module: abi_module.into(),
            type_projections: Mutex::new(FxHashMap::default()),
        }
    }

    /// The metadata being projected
    pub fn store(&self) -> &'a MetadataStore {
        self.store
    }

    /// Swift module holding the C ABI declarations
    pub fn abi_module(&self) -> &str {
        &self.abi_module
    }

    /// Number of memoized type projections
    pub fn cached_projections(&self) -> usize {
        self.type_projections.lock().len()
    }

    pub(crate) fn definition(&self, bound: &BoundType) -> &'a TypeDefinition {
        self.store.definition(bound.definition)
    }

    pub(crate) fn cached_projection(&self, node: &TypeNode) -> Option<TypeProjection> {
        self.type_projections.lock().get(node).cloned()
    }

    /// Record a computed projection; a concurrent duplicate keeps the first
    pub(crate) fn remember_projection(&self, node: &TypeNode, projection: TypeProjection) -> TypeProjection {
        self.type_projections
            .lock()
            .entry(node.clone())
            .or_insert(projection)
            .clone()
    }

    pub(crate) fn signature_of(&self, node: &TypeNode) -> String {
        self.store.to_signature(node).to_string()
    }

    /// Check a bound type supplies one argument per generic parameter
    pub(crate) fn check_arity(&self, bound: &BoundType) -> ProjectionResult<()> {
        let definition = self.definition(bound);
        if bound.generic_args.len() != definition.generic_arity() {
            return Err(ProjectionError::GenericArityMismatch {
                type_name: definition.full_name(),
                expected: definition.generic_arity(),
                actual: bound.generic_args.len(),
            });
        }
        Ok(())
    }
}
