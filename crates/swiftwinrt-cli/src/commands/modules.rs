//! `swiftwinrt modules`: show which module each assembly lands in.

use super::{load_config, load_metadata};
use crate::output::StyledOutput;
use std::path::PathBuf;
use swiftwinrt_projection::ModuleAssignment;

pub fn execute(
    metadata: &[PathBuf],
    config: Option<PathBuf>,
    out: &mut StyledOutput,
) -> anyhow::Result<Vec<(String, ModuleAssignment)>> {
    let store = load_metadata(metadata)?;
    let config = load_config(config.as_deref())?;

    let assignments: Vec<(String, ModuleAssignment)> = store
        .assemblies()
        .iter()
        .filter(|assembly| !store.is_mscorlib(assembly.id))
        .map(|assembly| (assembly.name.clone(), config.module_for(&assembly.name)))
        .collect();

    for (assembly, assignment) in &assignments {
        out.plain(&format!("{:<32} ", assembly));
        out.info(&assignment.name);
        if assignment.implicit {
            out.dim(" (implicit)");
        }
        if assignment.module.flatten_namespaces {
            out.dim(" [flattened]");
        }
        out.newline();
    }
    out.flush();

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use tempfile::TempDir;
    use termcolor::ColorChoice;

    #[test]
    fn test_assignments() {
        let temp = TempDir::new().unwrap();
        let metadata = vec![
            write(temp.path(), "foundation.json", FOUNDATION),
            write(temp.path(), "widgets.json", WIDGETS),
        ];
        let config = write(
            temp.path(),
            "projection.toml",
            "[modules.Contoso]\nassemblies = [\"Contoso.*\"]\nflattenNamespaces = true\n",
        );

        let mut out = StyledOutput::new(ColorChoice::Never);
        let assignments = execute(&metadata, Some(config), &mut out).unwrap();
        assert_eq!(assignments.len(), 2);

        let (assembly, windows) = &assignments[0];
        assert_eq!(assembly, "Windows");
        assert_eq!(windows.name, "Windows");
        assert!(windows.implicit);

        let (assembly, contoso) = &assignments[1];
        assert_eq!(assembly, "Contoso.Widgets");
        assert_eq!(contoso.name, "Contoso");
        assert!(contoso.module.flatten_namespaces);
    }
}
