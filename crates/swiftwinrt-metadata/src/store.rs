//! Metadata store: owns every loaded assembly and definition

use crate::document::{MetadataDocument, TypeDoc};
use crate::error::{MetadataError, MetadataResult};
use crate::model::{
    Accessor, Assembly, AssemblyId, BoundType, Event, InterfaceImpl, Method, Param, Property,
    TypeDefId, TypeDefinition, TypeKind, TypeNode, Version, Visibility,
};
use crate::mscorlib;
use crate::signature::TypeSig;
use rustc_hash::FxHashMap;
use std::path::Path;

/// Read-only graph of assemblies and type definitions
///
/// Definitions are stored in a flat vector indexed by [`TypeDefId`]; a name
/// index maps fully qualified names back to ids. The base runtime assembly
/// is always present.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    assemblies: Vec<Assembly>,
    definitions: Vec<TypeDefinition>,
    by_full_name: FxHashMap<String, TypeDefId>,
    mscorlib: AssemblyId,
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Signatures of one definition, resolved before being attached to it
struct ResolvedMembers {
    base_type: Option<BoundType>,
    interfaces: Vec<InterfaceImpl>,
    enum_underlying: Option<TypeNode>,
    properties: Vec<Property>,
    methods: Vec<Method>,
    events: Vec<Event>,
}

impl MetadataStore {
    /// Create a store containing only the base runtime assembly
    pub fn new() -> Self {
        let mut store = MetadataStore {
            assemblies: Vec::new(),
            definitions: Vec::new(),
            by_full_name: FxHashMap::default(),
            mscorlib: AssemblyId(0),
        };

        let base = store.add_assembly(mscorlib::ASSEMBLY_NAME, mscorlib::VERSION);
        store.mscorlib = base;
        for (name, kind) in mscorlib::builtin_types() {
            // Built-in names are unique, so declaration cannot fail here.
            let _ = store.declare(base, mscorlib::NAMESPACE, name, kind, Visibility::Public, Vec::new());
        }

        store
    }

    /// Parse and load a JSON metadata document
    pub fn load_json(&mut self, content: &str) -> MetadataResult<()> {
        let document = MetadataDocument::from_json(content)?;
        self.load_document(document)
    }

    /// Read and load a JSON metadata document from disk
    pub fn load_file(&mut self, path: &Path) -> MetadataResult<()> {
        let content = std::fs::read_to_string(path)?;
        self.load_json(&content)
    }

    /// Read several documents and load them as one
    ///
    /// Signatures may refer to types declared in any of the files.
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> MetadataResult<()> {
        let mut merged = MetadataDocument::default();
        for path in paths {
            let content = std::fs::read_to_string(path.as_ref())?;
            let document = MetadataDocument::from_json(&content)?;
            merged.assemblies.extend(document.assemblies);
        }
        self.load_document(merged)
    }

    /// Load a parsed document
    ///
    /// All definitions are declared first, then every signature is resolved,
    /// so types may reference each other in any order. On error the store
    /// should be discarded.
    pub fn load_document(&mut self, document: MetadataDocument) -> MetadataResult<()> {
        let mut pending: Vec<(TypeDefId, TypeDoc)> = Vec::new();

        for assembly_doc in document.assemblies {
            let version: Version = assembly_doc.version.parse()?;
            let assembly = match self.find_assembly(&assembly_doc.name) {
                Some(existing) => existing,
                None => self.add_assembly(&assembly_doc.name, version),
            };

            for type_doc in assembly_doc.types {
                let id = self.declare(
                    assembly,
                    &type_doc.namespace,
                    &type_doc.name,
                    type_doc.kind,
                    type_doc.visibility,
                    type_doc.generic_params.clone(),
                )?;
                pending.push((id, type_doc));
            }
        }

        let mut resolved = Vec::with_capacity(pending.len());
        for (id, type_doc) in &pending {
            resolved.push((*id, self.resolve_members(*id, type_doc)?));
        }

        for ((id, type_doc), (_, members)) in pending.into_iter().zip(resolved) {
            let definition = &mut self.definitions[id.index()];
            definition.guid = type_doc.guid;
            definition.base_type = members.base_type;
            definition.interfaces = members.interfaces;
            definition.enum_underlying = members.enum_underlying;
            definition.properties = members.properties;
            definition.methods = members.methods;
            definition.events = members.events;
        }

        Ok(())
    }

    fn add_assembly(&mut self, name: &str, version: Version) -> AssemblyId {
        let id = AssemblyId(self.assemblies.len() as u32);
        self.assemblies.push(Assembly {
            id,
            name: name.to_string(),
            version,
            types: Vec::new(),
        });
        id
    }

    fn find_assembly(&self, name: &str) -> Option<AssemblyId> {
        self.assemblies
            .iter()
            .find(|assembly| assembly.name == name)
            .map(|assembly| assembly.id)
    }

    fn declare(
        &mut self,
        assembly: AssemblyId,
        namespace: &str,
        name: &str,
        kind: TypeKind,
        visibility: Visibility,
        generic_params: Vec<String>,
    ) -> MetadataResult<TypeDefId> {
        let id = TypeDefId(self.definitions.len() as u32);
        let definition = TypeDefinition {
            id,
            assembly,
            namespace: namespace.to_string(),
            name: name.to_string(),
            visibility,
            kind,
            generic_params,
            base_type: None,
            interfaces: Vec::new(),
            guid: None,
            enum_underlying: None,
            properties: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
        };

        let full_name = definition.full_name();
        if self.by_full_name.contains_key(&full_name) {
            return Err(MetadataError::DuplicateType { name: full_name });
        }

        self.by_full_name.insert(full_name, id);
        self.definitions.push(definition);
        self.assemblies[assembly.0 as usize].types.push(id);
        Ok(id)
    }

    fn resolve_members(&self, id: TypeDefId, doc: &TypeDoc) -> MetadataResult<ResolvedMembers> {
        let scope = &self.definition(id).generic_params;
        let resolve = |text: &str| self.resolve_str_in(text, scope);
        let resolve_bound = |text: &str| -> MetadataResult<BoundType> {
            match resolve(text)? {
                TypeNode::Bound(bound) => Ok(bound),
                _ => Err(MetadataError::InvalidSignature {
                    signature: text.to_string(),
                    reason: "expected a named type".to_string(),
                }),
            }
        };

        let base_type = doc.base.as_deref().map(|text| resolve_bound(text)).transpose()?;

        let interfaces = doc
            .interfaces
            .iter()
            .map(|implementation| {
                Ok(InterfaceImpl {
                    interface: resolve_bound(&implementation.interface)?,
                    is_default: implementation.default,
                })
            })
            .collect::<MetadataResult<Vec<_>>>()?;

        let enum_underlying = if doc.kind == TypeKind::Enum {
            let underlying = resolve(doc.underlying.as_deref().unwrap_or("System.Int32"))?;
            if !self.is_enum_integer(&underlying) {
                return Err(MetadataError::InvalidEnumUnderlying {
                    name: self.definition(id).full_name(),
                    underlying: self.to_signature(&underlying).to_string(),
                });
            }
            Some(underlying)
        } else {
            None
        };

        let properties = doc
            .properties
            .iter()
            .map(|property| {
                Ok(Property {
                    name: property.name.clone(),
                    ty: resolve(&property.ty)?,
                    getter: property.getter.map(|visibility| Accessor {
                        name: format!("get_{}", property.name),
                        visibility,
                    }),
                    setter: property.setter.map(|visibility| Accessor {
                        name: format!("put_{}", property.name),
                        visibility,
                    }),
                    special_name: property.special_name,
                })
            })
            .collect::<MetadataResult<Vec<_>>>()?;

        let methods = doc
            .methods
            .iter()
            .map(|method| {
                let params = method
                    .params
                    .iter()
                    .map(|param| {
                        Ok(Param {
                            name: param.name.clone(),
                            ty: resolve(&param.ty)?,
                            is_by_ref: param.by_ref,
                        })
                    })
                    .collect::<MetadataResult<Vec<_>>>()?;
                Ok(Method {
                    name: method.name.clone(),
                    visibility: method.visibility,
                    name_kind: method.name_kind,
                    params,
                    return_type: resolve(&method.returns)?,
                })
            })
            .collect::<MetadataResult<Vec<_>>>()?;

        let events = doc
            .events
            .iter()
            .map(|event| {
                Ok(Event {
                    name: event.name.clone(),
                    handler: resolve(&event.handler)?,
                    visibility: event.visibility,
                })
            })
            .collect::<MetadataResult<Vec<_>>>()?;

        Ok(ResolvedMembers {
            base_type,
            interfaces,
            enum_underlying,
            properties,
            methods,
            events,
        })
    }

    /// Parse and resolve a signature outside any generic scope
    pub fn resolve_str(&self, text: &str) -> MetadataResult<TypeNode> {
        self.resolve_str_in(text, &[])
    }

    fn resolve_str_in(&self, text: &str, generic_scope: &[String]) -> MetadataResult<TypeNode> {
        let sig = TypeSig::parse(text)?;
        self.resolve(&sig, generic_scope)
    }

    /// Resolve a parsed signature; `!T` must name one of `generic_scope`
    pub fn resolve(&self, sig: &TypeSig, generic_scope: &[String]) -> MetadataResult<TypeNode> {
        match sig {
            TypeSig::Named { full_name, args } => {
                let id = self
                    .lookup(full_name)
                    .ok_or_else(|| MetadataError::UnresolvedType {
                        name: full_name.clone(),
                    })?;

                let arity = self.definition(id).generic_arity();
                if args.len() != arity {
                    return Err(MetadataError::GenericArityMismatch {
                        name: full_name.clone(),
                        expected: arity,
                        actual: args.len(),
                    });
                }

                let generic_args = args
                    .iter()
                    .map(|arg| self.resolve(arg, generic_scope))
                    .collect::<MetadataResult<Vec<_>>>()?;
                Ok(TypeNode::Bound(BoundType::new(id, generic_args)))
            }
            TypeSig::Array(element) => Ok(TypeNode::Array(Box::new(
                self.resolve(element, generic_scope)?,
            ))),
            TypeSig::Pointer(pointee) => Ok(TypeNode::Pointer(Box::new(
                self.resolve(pointee, generic_scope)?,
            ))),
            TypeSig::GenericParam(name) => {
                if generic_scope.iter().any(|param| param == name) {
                    Ok(TypeNode::GenericParam(name.clone()))
                } else {
                    Err(MetadataError::UnresolvedType {
                        name: format!("!{}", name),
                    })
                }
            }
        }
    }

    /// Render a resolved node back into signature syntax, for diagnostics
    pub fn to_signature(&self, node: &TypeNode) -> TypeSig {
        match node {
            TypeNode::Bound(bound) => TypeSig::Named {
                full_name: self.definition(bound.definition).full_name(),
                args: bound
                    .generic_args
                    .iter()
                    .map(|arg| self.to_signature(arg))
                    .collect(),
            },
            TypeNode::Array(element) => TypeSig::Array(Box::new(self.to_signature(element))),
            TypeNode::GenericParam(name) => TypeSig::GenericParam(name.clone()),
            TypeNode::Pointer(pointee) => TypeSig::Pointer(Box::new(self.to_signature(pointee))),
        }
    }

    /// Look up a definition id by fully qualified name
    pub fn lookup(&self, full_name: &str) -> Option<TypeDefId> {
        self.by_full_name.get(full_name).copied()
    }

    /// Look up a definition by fully qualified name
    pub fn find(&self, full_name: &str) -> Option<&TypeDefinition> {
        self.lookup(full_name).map(|id| self.definition(id))
    }

    /// Get a definition by id
    pub fn definition(&self, id: TypeDefId) -> &TypeDefinition {
        &self.definitions[id.index()]
    }

    /// All definitions, in load order
    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.iter()
    }

    /// Get an assembly by id
    pub fn assembly(&self, id: AssemblyId) -> &Assembly {
        &self.assemblies[id.0 as usize]
    }

    /// The assembly declaring a definition
    pub fn assembly_of(&self, definition: &TypeDefinition) -> &Assembly {
        self.assembly(definition.assembly)
    }

    /// All assemblies, base runtime first, then in load order
    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }

    /// Whether an assembly is the base runtime
    pub fn is_mscorlib(&self, assembly: AssemblyId) -> bool {
        assembly == self.mscorlib
    }

    /// A base runtime definition by simple name, e.g. `Int32`
    pub fn system_type(&self, name: &str) -> Option<TypeDefId> {
        self.lookup(&format!("{}.{}", mscorlib::NAMESPACE, name))
    }

    fn is_enum_integer(&self, node: &TypeNode) -> bool {
        match node {
            TypeNode::Bound(bound) => mscorlib::ENUM_UNDERLYING_TYPES
                .iter()
                .any(|name| Some(bound.definition) == self.system_type(name)),
            _ => false,
        }
    }

    /// Whether a type node denotes `System.Void`
    pub fn is_void(&self, node: &TypeNode) -> bool {
        match node {
            TypeNode::Bound(bound) => Some(bound.definition) == self.system_type("Void"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_builtins() {
        let store = MetadataStore::new();
        assert_eq!(store.assemblies().len(), 1);
        assert!(store.is_mscorlib(store.assemblies()[0].id));

        for name in mscorlib::PRIMITIVES.iter().chain(mscorlib::REFERENCE_TYPES) {
            let definition = store.find(&format!("System.{}", name)).unwrap();
            assert_eq!(definition.namespace, "System");
            assert!(store.is_mscorlib(definition.assembly));
        }

        assert_eq!(store.find("System.String").unwrap().kind, TypeKind::Class);
        assert_eq!(store.find("System.Int32").unwrap().kind, TypeKind::Struct);
    }

    #[test]
    fn test_is_void() {
        let store = MetadataStore::new();
        assert!(store.is_void(&store.resolve_str("System.Void").unwrap()));
        assert!(!store.is_void(&store.resolve_str("System.Int32").unwrap()));
        assert!(!store.is_void(&store.resolve_str("System.Void*").unwrap()));
    }

    #[test]
    fn test_to_signature_renders_resolved_nodes() {
        let store = MetadataStore::new();
        let node = store.resolve_str("System.Byte*[]").unwrap();
        assert_eq!(store.to_signature(&node).to_string(), "System.Byte*[]");
    }

    #[test]
    fn test_generic_param_outside_scope_is_unresolved() {
        let store = MetadataStore::new();
        let err = store.resolve_str("!T").unwrap_err();
        assert!(matches!(err, MetadataError::UnresolvedType { name } if name == "!T"));
    }

    #[test]
    fn test_arity_mismatch_on_non_generic() {
        let store = MetadataStore::new();
        let err = store.resolve_str("System.Int32<System.Int32>").unwrap_err();
        assert!(matches!(
            err,
            MetadataError::GenericArityMismatch { expected: 0, actual: 1, .. }
        ));
    }
}
