//! Projection configuration (`projection.json` / `projection.toml`)
//!
//! Assigns assemblies to output modules. Module entries are kept in the
//! order the document declares them, and the first entry whose assembly
//! patterns match wins.

use glob::Pattern;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// ABI module imported by generated files unless configured otherwise
pub const DEFAULT_ABI_MODULE: &str = "CWinRT";

/// Errors that can occur while loading a projection configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse a JSON configuration
    #[error("Failed to parse configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to parse a TOML configuration
    #[error("Failed to parse configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Top-level projection configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Swift module holding the C ABI declarations (default: "CWinRT")
    #[serde(default = "default_abi_module")]
    pub abi_module: String,

    /// Output modules, in declaration order
    #[serde(default)]
    pub modules: ModuleList,
}

fn default_abi_module() -> String {
    DEFAULT_ABI_MODULE.to_string()
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            abi_module: default_abi_module(),
            modules: ModuleList::default(),
        }
    }
}

/// Settings for one output module
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    /// Glob patterns over assembly names
    #[serde(default)]
    pub assemblies: Vec<String>,

    /// Allow-list of fully qualified type names; all public types when absent
    #[serde(default)]
    pub types: Option<Vec<String>>,

    /// Emit one file for the whole module instead of one per namespace
    #[serde(default)]
    pub flatten_namespaces: bool,
}

/// Named module entries in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleList(Vec<(String, ModuleConfig)>);

/// The module an assembly's types are generated into
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleAssignment {
    /// Module name
    pub name: String,
    /// Module settings
    pub module: ModuleConfig,
    /// Whether the module was synthesized because no entry matched
    pub implicit: bool,
}

impl ProjectionConfig {
    /// Parse a configuration from a file, choosing TOML or JSON by extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: ProjectionConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ProjectionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_swift_module_name(&self.abi_module) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid ABI module name: '{}'",
                self.abi_module
            )));
        }

        for (name, module) in self.modules.iter() {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Module name cannot be empty".to_string(),
                ));
            }
            for pattern in &module.assemblies {
                Pattern::new(pattern).map_err(|e| {
                    ConfigError::ValidationError(format!(
                        "Invalid assembly pattern '{}' in module '{}': {}",
                        pattern, name, e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Find the module for an assembly
    ///
    /// Entries are tried in declaration order. An assembly no entry claims
    /// gets an implicit module named after itself.
    pub fn module_for(&self, assembly_name: &str) -> ModuleAssignment {
        self.modules
            .iter()
            .find(|(_, module)| module.matches_assembly(assembly_name))
            .map(|(name, module)| ModuleAssignment {
                name: name.clone(),
                module: module.clone(),
                implicit: false,
            })
            .unwrap_or_else(|| ModuleAssignment {
                name: assembly_name.to_string(),
                module: ModuleConfig {
                    assemblies: vec![assembly_name.to_string()],
                    ..ModuleConfig::default()
                },
                implicit: true,
            })
    }
}

impl ModuleConfig {
    /// Whether any assembly pattern matches the name
    pub fn matches_assembly(&self, assembly_name: &str) -> bool {
        self.assemblies.iter().any(|pattern| {
            Pattern::new(pattern)
                .map(|pattern| pattern.matches(assembly_name))
                .unwrap_or(false)
        })
    }

    /// Whether a type passes the allow-list
    pub fn includes_type(&self, full_name: &str) -> bool {
        match &self.types {
            Some(types) => types.iter().any(|name| name == full_name),
            None => true,
        }
    }
}

impl ModuleList {
    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ModuleConfig)> {
        self.0.iter().map(|(name, module)| (name, module))
    }

    /// Append an entry; a repeated name replaces the earlier settings in place
    pub fn push(&mut self, name: impl Into<String>, module: ModuleConfig) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = module,
            None => self.0.push((name, module)),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ModuleList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModuleListVisitor;

        impl<'de> Visitor<'de> for ModuleListVisitor {
            type Value = ModuleList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of module names to module settings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ModuleList, A::Error> {
                let mut entries: Vec<(String, ModuleConfig)> = Vec::new();
                while let Some((name, module)) = map.next_entry::<String, ModuleConfig>()? {
                    if entries.iter().any(|(existing, _)| *existing == name) {
                        return Err(de::Error::custom(format!("duplicate module '{}'", name)));
                    }
                    entries.push((name, module));
                }
                Ok(ModuleList(entries))
            }
        }

        deserializer.deserialize_map(ModuleListVisitor)
    }
}

/// Swift module names are identifiers: a letter or `_`, then letters, digits or `_`
fn is_valid_swift_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
