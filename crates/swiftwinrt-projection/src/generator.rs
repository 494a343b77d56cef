//! Whole-run generation: assemblies to modules to Swift files

use crate::config::{ModuleConfig, ProjectionConfig};
use crate::context::Projection;
use crate::dispatch::Emission;
use crate::error::ProjectionResult;
use crate::well_known::RUNTIME_MODULE;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use swiftwinrt_codewriter::SwiftSourceFileWriter;
use swiftwinrt_metadata::{MetadataStore, TypeDefId};
use tracing::{debug, info};

/// First line of every generated file
pub const GENERATED_BANNER: &str = "Generated by swiftwinrt. DO NOT EDIT.";

/// One generated `.swift` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name, e.g. `Windows.Foundation.swift`
    pub name: String,
    /// Swift source
    pub contents: String,
    /// Number of declarations in the file
    pub declarations: usize,
}

/// All files of one output module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Module name
    pub name: String,
    /// Files, sorted by name
    pub files: Vec<GeneratedFile>,
}

impl GeneratedModule {
    /// Write the module's files into `<out_dir>/<module>/`, returning that directory
    pub fn write_to(&self, out_dir: &Path) -> ProjectionResult<PathBuf> {
        let module_dir = out_dir.join(&self.name);
        std::fs::create_dir_all(&module_dir)?;
        for file in &self.files {
            std::fs::write(module_dir.join(&file.name), &file.contents)?;
        }
        Ok(module_dir)
    }
}

struct ModulePlan {
    config: ModuleConfig,
    types: Vec<TypeDefId>,
}

/// Generate Swift sources for every public type outside the base runtime
///
/// Output is deterministic: modules come back sorted by name, files sorted
/// within each module, and types sorted within each file. Any error aborts
/// the whole run.
pub fn generate(store: &MetadataStore, config: &ProjectionConfig) -> ProjectionResult<Vec<GeneratedModule>> {
    let projection = Projection::new(store, config.abi_module.clone());

    let mut plans: BTreeMap<String, ModulePlan> = BTreeMap::new();
    for assembly in store.assemblies() {
        if store.is_mscorlib(assembly.id) {
            continue;
        }

        let assignment = config.module_for(&assembly.name);
        debug!(assembly = %assembly.name, module = %assignment.name, implicit = assignment.implicit, "assigned assembly");
        let plan = plans.entry(assignment.name).or_insert_with(|| ModulePlan {
            config: assignment.module,
            types: Vec::new(),
        });

        plan.types.extend(assembly.types.iter().copied().filter(|id| {
            let definition = store.definition(*id);
            definition.is_public() && plan.config.includes_type(&definition.full_name())
        }));
    }

    plans
        .into_iter()
        .map(|(name, plan)| generate_module(&projection, name, plan))
        .collect()
}

fn generate_module(projection: &Projection<'_>, name: String, plan: ModulePlan) -> ProjectionResult<GeneratedModule> {
    let store = projection.store();

    let mut groups: BTreeMap<String, Vec<TypeDefId>> = BTreeMap::new();
    for id in plan.types {
        let definition = store.definition(id);
        let file_name = if plan.config.flatten_namespaces || definition.namespace.is_empty() {
            format!("{}.swift", name)
        } else {
            format!("{}.swift", definition.namespace)
        };
        groups.entry(file_name).or_default().push(id);
    }

    let mut files = Vec::new();
    for (file_name, mut types) in groups {
        types.sort_by_key(|id| store.definition(*id).full_name());

        let mut file = SwiftSourceFileWriter::new();
        file.write_comment(GENERATED_BANNER);
        file.write_import(projection.abi_module());
        file.write_import(RUNTIME_MODULE);
        file.write_import("Foundation");

        let mut skipped = 0;
        for id in types {
            let bound = store.definition(id).bind();
            if projection.write_projection(&bound, &mut file)? == Emission::Skipped {
                skipped += 1;
            }
        }

        let declarations = file.declaration_count();
        if declarations == 0 {
            debug!(module = %name, file = %file_name, "no declarations, file omitted");
            continue;
        }
        debug!(module = %name, file = %file_name, declarations, skipped, "generated file");
        files.push(GeneratedFile {
            name: file_name,
            contents: file.into_string(),
            declarations,
        });
    }

    info!(module = %name, files = files.len(), "generated module");
    Ok(GeneratedModule { name, files })
}
