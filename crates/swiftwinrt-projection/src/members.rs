//! Member bindings of an interface projection

use crate::abi::AbiProjection;
use crate::context::Projection;
use crate::error::{ProjectionError, ProjectionResult};
use crate::mapper::ReferenceNullability;
use crate::naming::to_member_name;
use swiftwinrt_codewriter::{
    escape_identifier, SwiftFunc, SwiftParameter, SwiftRecordBodyWriter, SwiftStatementWriter,
    SwiftType, SwiftVisibility,
};
use swiftwinrt_metadata::{
    Accessor, BoundType, Event, Method, NameKind, Param, Property, TypeDefinition,
};
use tracing::debug;

/// A declared member of an interface
#[derive(Debug, Clone, Copy)]
pub enum Member<'m> {
    #[allow(missing_docs)]
    Property(&'m Property),
    #[allow(missing_docs)]
    Method(&'m Method),
    #[allow(missing_docs)]
    Event(&'m Event),
}

impl<'m> Member<'m> {
    /// Members in emission order: properties, methods, then events
    pub fn all_of(definition: &'m TypeDefinition) -> impl Iterator<Item = Member<'m>> {
        definition
            .properties
            .iter()
            .map(Member::Property)
            .chain(definition.methods.iter().map(Member::Method))
            .chain(definition.events.iter().map(Member::Event))
    }
}

/// Swift signature of a method or property accessor binding
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBinding {
    /// One parameter per metadata parameter
    pub params: Vec<SwiftParameter>,
    /// `None` for `Void`
    pub return_type: Option<SwiftType>,
    /// Every call crosses the ABI and may fail
    pub throws: bool,
}

impl Projection<'_> {
    /// Write bindings for every member of an interface into a class body
    pub fn write_interface_members(
        &self,
        interface: &BoundType,
        writer: &mut SwiftRecordBodyWriter,
    ) -> ProjectionResult<()> {
        let definition = self.definition(interface);
        for member in Member::all_of(definition) {
            match member {
                Member::Property(property) => self.write_property(definition, property, writer)?,
                Member::Method(method) => self.write_method(definition, method, writer)?,
                Member::Event(event) => {
                    debug!(
                        interface = %definition.full_name(),
                        event = %event.name,
                        "events are not projected"
                    );
                }
            }
        }
        Ok(())
    }

    fn write_property(
        &self,
        definition: &TypeDefinition,
        property: &Property,
        writer: &mut SwiftRecordBodyWriter,
    ) -> ProjectionResult<()> {
        if property.getter.is_none() && property.setter.is_none() {
            return Err(ProjectionError::malformed(
                definition.full_name(),
                format!("property {} has no accessors", property.name),
            ));
        }
        if property.special_name {
            debug!(property = %property.name, "skipping special-name property");
            return Ok(());
        }

        let projection = self.type_projection(&property.ty)?;
        let member_name = to_member_name(&property.name);
        let qualified = format!("{}.{}", definition.full_name(), property.name);

        if let Some(getter) = property.getter.as_ref().filter(|getter| getter.is_public()) {
            let binding = self.getter_binding(definition, property)?;
            if let Some(ty) = &binding.return_type {
                writer.write_computed_property(SwiftVisibility::Public, &member_name, ty, binding.throws, |body| {
                    write_accessor_call(body, "_getter", getter, None, projection.abi.as_ref(), &qualified);
                    Ok::<(), ProjectionError>(())
                })?;
            }
        }

        if let Some(setter) = property.setter.as_ref().filter(|setter| setter.is_public()) {
            let binding = self.setter_binding(property)?;
            let func = SwiftFunc {
                visibility: SwiftVisibility::Public,
                is_static: false,
                name: member_name.clone(),
                params: binding.params,
                throws: binding.throws,
                return_type: binding.return_type,
            };
            writer.write_func(&func, |body| {
                write_accessor_call(body, "_setter", setter, Some("newValue"), projection.abi.as_ref(), &qualified);
                Ok::<(), ProjectionError>(())
            })?;
        }

        Ok(())
    }

    fn write_method(
        &self,
        definition: &TypeDefinition,
        method: &Method,
        writer: &mut SwiftRecordBodyWriter,
    ) -> ProjectionResult<()> {
        if !method.is_public() || method.name_kind != NameKind::Regular {
            debug!(method = %method.name, "skipping non-public or special method");
            return Ok(());
        }

        let binding = self.method_binding(method)?;
        let func = SwiftFunc {
            visibility: SwiftVisibility::Public,
            is_static: false,
            name: to_member_name(&method.name),
            params: binding.params,
            throws: binding.throws,
            return_type: binding.return_type,
        };
        let qualified = format!("{}.{}", definition.full_name(), method.name);
        writer.write_func(&func, |body| {
            body.write_not_implemented(&qualified);
            Ok::<(), ProjectionError>(())
        })
    }

    /// Map a method's parameters and return type
    pub fn method_binding(&self, method: &Method) -> ProjectionResult<MemberBinding> {
        let params = method
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| self.to_parameter(index, param))
            .collect::<ProjectionResult<Vec<_>>>()?;

        Ok(MemberBinding {
            params,
            return_type: self.map_return_type(&method.return_type)?,
            throws: true,
        })
    }

    /// Signature of a property getter: no parameters, the property type as
    /// an implicitly unwrapped return
    pub fn getter_binding(&self, definition: &TypeDefinition, property: &Property) -> ProjectionResult<MemberBinding> {
        let return_type = self.map_return_type(&property.ty)?.ok_or_else(|| {
            ProjectionError::malformed(
                definition.full_name(),
                format!("property {} has type System.Void", property.name),
            )
        })?;
        Ok(MemberBinding {
            params: Vec::new(),
            return_type: Some(return_type),
            throws: true,
        })
    }

    /// Signature of a property setter: one unlabeled `newValue`, no return
    pub fn setter_binding(&self, property: &Property) -> ProjectionResult<MemberBinding> {
        Ok(MemberBinding {
            params: vec![SwiftParameter::unlabeled(
                "newValue",
                self.to_type(&property.ty, ReferenceNullability::Explicit)?,
            )],
            return_type: None,
            throws: true,
        })
    }

    /// An unlabeled Swift parameter; unnamed parameters become `arg<index>`
    pub fn to_parameter(&self, index: usize, param: &Param) -> ProjectionResult<SwiftParameter> {
        let name = match param.name.as_deref() {
            Some(name) if !name.is_empty() => escape_identifier(name),
            _ => format!("arg{}", index),
        };
        Ok(SwiftParameter {
            is_inout: param.is_by_ref,
            ..SwiftParameter::unlabeled(name, self.to_type(&param.ty, ReferenceNullability::Explicit)?)
        })
    }
}

/// `try _getter(_vtable.get_X)`, with the projection helper appended when
/// the type is not identity-projected
fn write_accessor_call(
    body: &mut SwiftStatementWriter,
    helper: &str,
    accessor: &Accessor,
    value: Option<&str>,
    abi: Option<&AbiProjection>,
    qualified: &str,
) {
    let mut args = vec![format!("_vtable.{}", accessor.name)];
    args.extend(value.map(str::to_string));
    match abi {
        Some(AbiProjection::Identity) => {}
        Some(AbiProjection::Simple { projection_type, .. }) => {
            args.push(format!("{}.self", projection_type));
        }
        None => {
            body.write_not_implemented(qualified);
            return;
        }
    }
    body.write_statement(format!("try {}({})", helper, args.join(", ")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftwinrt_codewriter::{SwiftClass, SwiftSourceFileWriter};
    use swiftwinrt_metadata::MetadataStore;

    const METADATA: &str = r#"{
        "assemblies": [{
            "name": "Contoso",
            "types": [
                { "namespace": "Contoso", "name": "Size", "kind": "struct" },
                {
                    "namespace": "Contoso", "name": "IWidget", "kind": "interface",
                    "guid": "00000000-0000-0000-0000-000000000001",
                    "properties": [
                        { "name": "Count", "type": "System.Int32", "getter": "public", "setter": "public" },
                        { "name": "Title", "type": "System.String", "getter": "public" },
                        { "name": "Bounds", "type": "Contoso.Size", "getter": "public" },
                        { "name": "Hidden", "type": "System.Int32", "getter": "assembly" },
                        { "name": "Item", "type": "System.Int32", "getter": "public", "specialName": true }
                    ],
                    "methods": [
                        {
                            "name": "Resize",
                            "params": [
                                { "name": "in", "type": "System.Int32" },
                                { "type": "System.Boolean", "byRef": true }
                            ],
                            "returns": "Contoso.IWidget"
                        },
                        { "name": "Close" },
                        { "name": "Secret", "visibility": "private" },
                        { "name": "get_Count", "nameKind": "special", "returns": "System.Int32" }
                    ],
                    "events": [{ "name": "Changed", "handler": "System.Object" }]
                },
                {
                    "namespace": "Contoso", "name": "IBroken", "kind": "interface",
                    "guid": "00000000-0000-0000-0000-000000000002",
                    "properties": [{ "name": "Ghost", "type": "System.Int32" }]
                }
            ]
        }]
    }"#;

    fn render(store: &MetadataStore, interface: &str) -> ProjectionResult<String> {
        let projection = Projection::new(store, "CWinRT");
        let definition = store.find(interface).unwrap();
        let mut file = SwiftSourceFileWriter::new();
        let class = SwiftClass {
            visibility: SwiftVisibility::Public,
            is_final: true,
            name: "Test".to_string(),
            base: None,
            conformances: Vec::new(),
        };
        file.write_class(&class, |body| projection.write_interface_members(&definition.bind(), body))?;
        Ok(file.into_string())
    }

    fn store() -> MetadataStore {
        let mut store = MetadataStore::new();
        store.load_json(METADATA).unwrap();
        store
    }

    #[test]
    fn test_identity_property() {
        let output = render(&store(), "Contoso.IWidget").unwrap();
        assert!(output.contains(
            "    public var count: Int32 {\n        get throws {\n            try _getter(_vtable.get_Count)\n        }\n    }\n"
        ));
        assert!(output.contains(
            "    public func count(_ newValue: Int32) throws {\n        try _setter(_vtable.put_Count, newValue)\n    }\n"
        ));
    }

    #[test]
    fn test_simple_property_passes_projection_type() {
        let output = render(&store(), "Contoso.IWidget").unwrap();
        assert!(output.contains("public var title: String {"));
        assert!(output.contains("try _getter(_vtable.get_Title, WindowsRuntime.HStringProjection.self)"));
        assert!(!output.contains("func title("));
    }

    #[test]
    fn test_unprojectable_property_is_stubbed() {
        let output = render(&store(), "Contoso.IWidget").unwrap();
        assert!(output.contains("public var bounds: Size {"));
        assert!(output.contains("fatalError(\"Not implemented: Contoso.IWidget.Bounds\")"));
    }

    #[test]
    fn test_hidden_members_are_skipped() {
        let output = render(&store(), "Contoso.IWidget").unwrap();
        assert!(!output.contains("hidden"));
        assert!(!output.contains("item"));
        assert!(!output.contains("secret"));
        assert!(!output.contains("get_Count()"));
        assert!(!output.contains("changed"));
    }

    #[test]
    fn test_methods_are_stubbed() {
        let output = render(&store(), "Contoso.IWidget").unwrap();
        assert!(output.contains(
            "    public func resize(_ `in`: Int32, _ arg1: inout Bool) throws -> AnyIWidget! {\n        fatalError(\"Not implemented: Contoso.IWidget.Resize\")\n    }\n"
        ));
        assert!(output.contains("    public func close() throws {\n"));
    }

    #[test]
    fn test_property_accessor_bindings() {
        let store = store();
        let projection = Projection::new(&store, "CWinRT");
        let definition = store.find("Contoso.IWidget").unwrap();
        let title = &definition.properties[1];

        let getter = projection.getter_binding(definition, title).unwrap();
        assert!(getter.params.is_empty());
        assert_eq!(getter.return_type.unwrap().to_string(), "String");
        assert!(getter.throws);

        let setter = projection.setter_binding(title).unwrap();
        assert_eq!(setter.params.len(), 1);
        assert_eq!(setter.params[0].to_string(), "_ newValue: String");
        assert_eq!(setter.return_type, None);
        assert!(setter.throws);
    }

    #[test]
    fn test_void_property_is_malformed() {
        let mut store = store();
        store
            .load_json(
                r#"{ "assemblies": [{ "name": "Contoso.Void", "types": [{
                    "namespace": "Contoso", "name": "IVoid", "kind": "interface",
                    "guid": "00000000-0000-0000-0000-000000000003",
                    "properties": [{ "name": "Nothing", "type": "System.Void", "getter": "public" }]
                }] }] }"#,
            )
            .unwrap();
        let err = render(&store, "Contoso.IVoid").unwrap_err();
        assert!(matches!(err, ProjectionError::MalformedMetadata { reason, .. } if reason.contains("System.Void")));
    }

    #[test]
    fn test_property_without_accessors_is_malformed() {
        let err = render(&store(), "Contoso.IBroken").unwrap_err();
        assert!(matches!(err, ProjectionError::MalformedMetadata { type_name, .. } if type_name == "Contoso.IBroken"));
    }

    #[test]
    fn test_member_order() {
        let store = store();
        let definition = store.find("Contoso.IWidget").unwrap();
        let kinds: Vec<&str> = Member::all_of(definition)
            .map(|member| match member {
                Member::Property(_) => "property",
                Member::Method(_) => "method",
                Member::Event(_) => "event",
            })
            .collect();
        assert_eq!(kinds.first(), Some(&"property"));
        assert_eq!(kinds.last(), Some(&"event"));
        assert_eq!(kinds.len(), 10);
    }
}
