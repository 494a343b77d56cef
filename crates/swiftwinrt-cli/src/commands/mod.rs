//! Subcommand implementations

pub mod generate;
pub mod modules;

use anyhow::Context;
use std::path::{Path, PathBuf};
use swiftwinrt_metadata::MetadataStore;
use swiftwinrt_projection::ProjectionConfig;

/// Load every metadata document into one store
pub fn load_metadata(paths: &[PathBuf]) -> anyhow::Result<MetadataStore> {
    let mut store = MetadataStore::new();
    store
        .load_files(paths)
        .with_context(|| format!("failed to load metadata from {}", display_paths(paths)))?;
    tracing::debug!(
        assemblies = store.assemblies().len(),
        definitions = store.definitions().count(),
        "metadata loaded"
    );
    Ok(store)
}

/// Read the projection configuration, or fall back to the defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ProjectionConfig> {
    match path {
        Some(path) => ProjectionConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => Ok(ProjectionConfig::default()),
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const FOUNDATION: &str = r#"{
        "assemblies": [{
            "name": "Windows",
            "types": [
                {
                    "namespace": "Windows.Foundation", "name": "IStringable", "kind": "interface",
                    "guid": "96369f54-8eb6-48f0-abce-c1b211e627c3",
                    "methods": [{ "name": "ToString", "returns": "System.String" }]
                },
                { "namespace": "Windows.Foundation", "name": "AsyncStatus", "kind": "enum" },
                { "namespace": "Windows.Foundation", "name": "Point", "kind": "struct" }
            ]
        }]
    }"#;

    pub const WIDGETS: &str = r#"{
        "assemblies": [{
            "name": "Contoso.Widgets",
            "types": [{
                "namespace": "Contoso.Widgets", "name": "Widget", "kind": "class",
                "interfaces": [{ "interface": "Windows.Foundation.IStringable", "default": true }]
            }]
        }]
    }"#;

    pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}
