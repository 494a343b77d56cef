//! Per-kind projection of a bound type into a source file

use crate::context::Projection;
use crate::error::{ProjectionError, ProjectionResult};
use crate::iid::to_iid_initializer;
use crate::mapper::ReferenceNullability;
use crate::naming;
use crate::well_known::runtime_type;
use swiftwinrt_codewriter::{
    string_literal, SwiftClass, SwiftRecordBodyWriter, SwiftSourceFileWriter, SwiftType,
    SwiftVisibility,
};
use swiftwinrt_metadata::{BoundType, TypeDefinition, TypeKind};
use tracing::debug;

/// Outcome of projecting one type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// A declaration was written
    Written,
    /// The type kind or shape is not projected; nothing was written
    Skipped,
}

impl Projection<'_> {
    /// Write the projection of a bound type
    ///
    /// Generic interfaces, classes whose default interface is a generic
    /// instantiation, structs and delegates are skipped. On error the file is
    /// left untouched.
    pub fn write_projection(
        &self,
        ty: &BoundType,
        file: &mut SwiftSourceFileWriter,
    ) -> ProjectionResult<Emission> {
        let definition = self.definition(ty);
        match definition.kind {
            TypeKind::Interface if definition.generic_arity() > 0 => {
                debug!(type_name = %definition.full_name(), "skipping generic interface");
                return Ok(Emission::Skipped);
            }
            TypeKind::Interface => {
                self.check_arity(ty)?;
                self.write_interface_projection(definition, ty, file)?;
            }
            TypeKind::Class => {
                self.check_arity(ty)?;
                if let Some(default_interface) = definition
                    .default_interface()
                    .filter(|interface| !interface.generic_args.is_empty())
                {
                    debug!(
                        type_name = %definition.full_name(),
                        default_interface = %self.store().to_signature(&default_interface.to_node()),
                        "skipping class with generic default interface"
                    );
                    return Ok(Emission::Skipped);
                }
                self.write_class_projection(definition, ty, file)?;
            }
            TypeKind::Enum => {
                self.check_arity(ty)?;
                self.write_enum_projection(definition, file)?;
            }
            TypeKind::Struct | TypeKind::Delegate => {
                debug!(
                    type_name = %definition.full_name(),
                    kind = %definition.kind,
                    "type kind is not projected"
                );
                return Ok(Emission::Skipped);
            }
        }
        Ok(Emission::Written)
    }

    fn write_interface_projection(
        &self,
        definition: &TypeDefinition,
        ty: &BoundType,
        file: &mut SwiftSourceFileWriter,
    ) -> ProjectionResult<()> {
        let projection_name = naming::to_projection_type_name(definition);
        let class = SwiftClass {
            visibility: naming::to_visibility(definition.visibility),
            is_final: true,
            name: projection_name.clone(),
            base: Some(SwiftType::generic(
                "WinRTProjectionBase",
                vec![SwiftType::identifier(projection_name)],
            )),
            conformances: vec![
                SwiftType::identifier("WinRTProjection"),
                SwiftType::identifier(naming::to_protocol_name(definition)),
            ],
        };

        file.write_class(&class, |body| {
            self.write_conformance(definition, ty, ty, body)?;
            self.write_interface_members(ty, body)
        })
    }

    fn write_class_projection(
        &self,
        definition: &TypeDefinition,
        ty: &BoundType,
        file: &mut SwiftSourceFileWriter,
    ) -> ProjectionResult<()> {
        let type_name = naming::to_type_name(definition);

        let Some(default_interface) = definition.default_interface() else {
            // Static class: only a private initializer
            let class = SwiftClass {
                visibility: naming::to_visibility(definition.visibility),
                is_final: true,
                name: type_name,
                base: None,
                conformances: Vec::new(),
            };
            return file.write_class(&class, |body| {
                body.write_init(SwiftVisibility::Private, &[], |_| Ok(()))
            });
        };

        let class = SwiftClass {
            visibility: naming::to_visibility(definition.visibility),
            is_final: true,
            name: type_name.clone(),
            base: Some(SwiftType::generic(
                "WinRTProjectionBase",
                vec![SwiftType::identifier(type_name)],
            )),
            conformances: vec![SwiftType::identifier("WinRTProjection")],
        };

        file.write_class(&class, |body| {
            self.write_conformance(definition, ty, default_interface, body)?;
            self.write_interface_members(default_interface, body)
        })
    }

    fn write_enum_projection(
        &self,
        definition: &TypeDefinition,
        file: &mut SwiftSourceFileWriter,
    ) -> ProjectionResult<()> {
        let c_enum = self.map_abi_type(self.enum_underlying(definition)?)?;
        file.write_extension(
            &SwiftType::identifier(naming::to_type_name(definition)),
            &[runtime_type("EnumProjection")],
            |body| {
                body.write_type_alias(SwiftVisibility::Public, "CEnum", &c_enum);
                Ok(())
            },
        )
    }

    /// `WinRTProjection` requirements: value, ABI and vtable types, IID and
    /// runtime class name
    fn write_conformance(
        &self,
        definition: &TypeDefinition,
        ty: &BoundType,
        interface: &BoundType,
        body: &mut SwiftRecordBodyWriter,
    ) -> ProjectionResult<()> {
        let interface_definition = self.definition(interface);
        let guid = interface_definition.guid.ok_or_else(|| {
            ProjectionError::malformed(interface_definition.full_name(), "interface has no GUID")
        })?;

        body.write_type_alias(
            SwiftVisibility::Public,
            "SwiftValue",
            &self.to_type(&ty.to_node(), ReferenceNullability::None)?,
        );
        body.write_type_alias(SwiftVisibility::Public, "CStruct", &self.map_abi_type(interface)?);
        body.write_type_alias(
            SwiftVisibility::Public,
            "CVTableStruct",
            &self.map_abi_vtable_type(interface)?,
        );
        body.write_stored_property(
            SwiftVisibility::Public,
            true,
            true,
            "iid",
            None,
            Some(&to_iid_initializer(&guid)),
        );
        body.write_stored_property(
            SwiftVisibility::Public,
            true,
            true,
            "runtimeClassName",
            None,
            Some(&string_literal(&definition.full_name())),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftwinrt_metadata::MetadataStore;

    const METADATA: &str = r#"{
        "assemblies": [{
            "name": "Windows",
            "types": [
                {
                    "namespace": "Windows.Foundation", "name": "IStringable", "kind": "interface",
                    "guid": "96369f54-8eb6-48f0-abce-c1b211e627c3",
                    "methods": [{ "name": "ToString", "returns": "System.String" }]
                },
                {
                    "namespace": "Windows.Foundation", "name": "Uri", "kind": "class",
                    "interfaces": [{ "interface": "Windows.Foundation.IStringable", "default": true }]
                },
                { "namespace": "Windows.Foundation", "name": "GuidHelper", "kind": "class" },
                { "namespace": "Windows.Foundation", "name": "AsyncStatus", "kind": "enum" },
                {
                    "namespace": "Windows.Foundation", "name": "FileAttributes", "kind": "enum",
                    "underlying": "System.UInt32"
                },
                { "namespace": "Windows.Foundation", "name": "Point", "kind": "struct" },
                {
                    "namespace": "Windows.Foundation", "name": "AsyncActionCompletedHandler", "kind": "delegate",
                    "guid": "a4ed5c81-76c9-40bd-8be6-b1d90fb20ae7"
                },
                {
                    "namespace": "Windows.Foundation.Collections", "name": "IVector`1", "kind": "interface",
                    "genericParams": ["T"], "guid": "913337e9-11a1-4345-a3a2-4e7f956e222d"
                },
                { "namespace": "Windows.Foundation", "name": "INoGuid", "kind": "interface" },
                {
                    "namespace": "Windows.Foundation", "name": "Box`1", "kind": "class",
                    "genericParams": ["T"]
                },
                {
                    "namespace": "Windows.Foundation.Collections", "name": "StringVector", "kind": "class",
                    "interfaces": [{
                        "interface": "Windows.Foundation.Collections.IVector`1<System.String>",
                        "default": true
                    }]
                }
            ]
        }]
    }"#;

    fn store() -> MetadataStore {
        let mut store = MetadataStore::new();
        store.load_json(METADATA).unwrap();
        store
    }

    fn project(store: &MetadataStore, full_name: &str) -> ProjectionResult<(Emission, String)> {
        let projection = Projection::new(store, "CWinRT");
        let mut file = SwiftSourceFileWriter::new();
        let emission = projection.write_projection(&store.find(full_name).unwrap().bind(), &mut file)?;
        Ok((emission, file.into_string()))
    }

    #[test]
    fn test_interface_projection() {
        let (emission, output) = project(&store(), "Windows.Foundation.IStringable").unwrap();
        assert_eq!(emission, Emission::Written);
        let expected = "\
public final class IStringableProjection: WinRTProjectionBase<IStringableProjection>, WinRTProjection, IStringableProtocol {
    public typealias SwiftValue = AnyIStringable
    public typealias CStruct = CWinRT.__x_ABI_CWindows_CFoundation_CIStringable
    public typealias CVTableStruct = CWinRT.__x_ABI_CWindows_CFoundation_CIStringableVtbl
    public static let iid = IID(0x96369F54, 0x8EB6, 0x48F0, 0xABCE, 0xC1B211E627C3)
    public static let runtimeClassName = \"Windows.Foundation.IStringable\"

    public func toString() throws -> String {
        fatalError(\"Not implemented: Windows.Foundation.IStringable.ToString\")
    }
}
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_class_projection_binds_default_interface() {
        let (emission, output) = project(&store(), "Windows.Foundation.Uri").unwrap();
        assert_eq!(emission, Emission::Written);
        assert!(output.starts_with(
            "public final class Uri: WinRTProjectionBase<Uri>, WinRTProjection {\n"
        ));
        assert!(output.contains("    public typealias SwiftValue = Uri\n"));
        assert!(output.contains(
            "    public typealias CStruct = CWinRT.__x_ABI_CWindows_CFoundation_CIStringable\n"
        ));
        assert!(output.contains("    public static let runtimeClassName = \"Windows.Foundation.Uri\"\n"));
        assert!(output.contains("public func toString() throws -> String"));
    }

    #[test]
    fn test_static_class_has_only_private_init() {
        let (emission, output) = project(&store(), "Windows.Foundation.GuidHelper").unwrap();
        assert_eq!(emission, Emission::Written);
        assert_eq!(output, "public final class GuidHelper {\n    private init() {}\n}\n");
    }

    #[test]
    fn test_enum_projection() {
        let (_, output) = project(&store(), "Windows.Foundation.AsyncStatus").unwrap();
        assert_eq!(
            output,
            "extension AsyncStatus: WindowsRuntime.EnumProjection {\n    public typealias CEnum = Int32\n}\n"
        );

        let (_, output) = project(&store(), "Windows.Foundation.FileAttributes").unwrap();
        assert!(output.contains("public typealias CEnum = UInt32"));
    }

    #[test]
    fn test_skipped_kinds() {
        let store = store();
        for name in [
            "Windows.Foundation.Point",
            "Windows.Foundation.AsyncActionCompletedHandler",
            "Windows.Foundation.Collections.IVector`1",
        ] {
            let (emission, output) = project(&store, name).unwrap();
            assert_eq!(emission, Emission::Skipped, "{}", name);
            assert!(output.is_empty());
        }
    }

    #[test]
    fn test_class_with_generic_default_interface_is_skipped() {
        let (emission, output) =
            project(&store(), "Windows.Foundation.Collections.StringVector").unwrap();
        assert_eq!(emission, Emission::Skipped);
        assert!(output.is_empty());
    }

    #[test]
    fn test_interface_without_guid_is_malformed() {
        let err = project(&store(), "Windows.Foundation.INoGuid").unwrap_err();
        assert!(matches!(err, ProjectionError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_generic_class_without_arguments_is_arity_mismatch() {
        let err = project(&store(), "Windows.Foundation.Box`1").unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::GenericArityMismatch { expected: 1, actual: 0, .. }
        ));
    }

    #[test]
    fn test_arity_checked_on_bound_arguments() {
        let store = store();
        let projection = Projection::new(&store, "CWinRT");
        let uri = store.find("Windows.Foundation.Uri").unwrap();
        let int32 = store.resolve_str("System.Int32").unwrap();
        let bogus = BoundType::new(uri.id, vec![int32]);

        let mut file = SwiftSourceFileWriter::new();
        let err = projection.write_projection(&bogus, &mut file).unwrap_err();
        assert!(matches!(err, ProjectionError::GenericArityMismatch { expected: 0, actual: 1, .. }));
        assert_eq!(file.declaration_count(), 0);
    }
}
