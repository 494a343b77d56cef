//! `swiftwinrt generate`: project metadata into Swift source files.

use super::{load_config, load_metadata};
use crate::output::StyledOutput;
use anyhow::Context;
use std::path::PathBuf;
use swiftwinrt_projection::{generate, GeneratedModule};

/// Options for `swiftwinrt generate`
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub metadata: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub abi_module: Option<String>,
    pub out: PathBuf,
    pub dry_run: bool,
}

pub fn execute(options: &GenerateOptions, out: &mut StyledOutput) -> anyhow::Result<Vec<GeneratedModule>> {
    let store = load_metadata(&options.metadata)?;
    let mut config = load_config(options.config.as_deref())?;
    if let Some(abi_module) = &options.abi_module {
        config.abi_module = abi_module.clone();
        config.validate()?;
    }

    // Everything is generated before anything is written.
    let modules = generate(&store, &config).context("generation failed")?;

    for module in &modules {
        let declarations: usize = module.files.iter().map(|file| file.declarations).sum();
        let target = options.out.join(&module.name);

        if options.dry_run {
            out.warning("  Would generate ");
        } else {
            module
                .write_to(&options.out)
                .with_context(|| format!("failed to write module {}", module.name))?;
            out.success("     Generated ");
        }
        out.plain(&module.name);
        out.dim(&format!(
            " ({} files, {} declarations) -> {}",
            module.files.len(),
            declarations,
            target.display()
        ));
        out.newline();
    }

    if modules.is_empty() {
        out.warning("warning");
        out.plain(": no public types to project");
        out.newline();
    }
    out.flush();

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use std::fs;
    use tempfile::TempDir;
    use termcolor::ColorChoice;

    fn options(temp: &TempDir) -> GenerateOptions {
        GenerateOptions {
            metadata: vec![
                write(temp.path(), "foundation.json", FOUNDATION),
                write(temp.path(), "widgets.json", WIDGETS),
            ],
            config: None,
            abi_module: None,
            out: temp.path().join("Generated"),
            dry_run: false,
        }
    }

    #[test]
    fn test_generate_writes_modules() {
        let temp = TempDir::new().unwrap();
        let mut out = StyledOutput::new(ColorChoice::Never);
        let modules = execute(&options(&temp), &mut out).unwrap();
        assert_eq!(modules.len(), 2);

        let foundation = temp.path().join("Generated/Windows/Windows.Foundation.swift");
        let contents = fs::read_to_string(foundation).unwrap();
        assert!(contents.contains("public final class IStringableProjection:"));
        assert!(temp
            .path()
            .join("Generated/Contoso.Widgets/Contoso.Widgets.swift")
            .exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut out = StyledOutput::new(ColorChoice::Never);
        let modules = execute(
            &GenerateOptions {
                dry_run: true,
                ..options(&temp)
            },
            &mut out,
        )
        .unwrap();
        assert!(!modules.is_empty());
        assert!(!temp.path().join("Generated").exists());
    }

    #[test]
    fn test_abi_module_override() {
        let temp = TempDir::new().unwrap();
        let mut out = StyledOutput::new(ColorChoice::Never);
        let modules = execute(
            &GenerateOptions {
                abi_module: Some("CCustom".to_string()),
                dry_run: true,
                ..options(&temp)
            },
            &mut out,
        )
        .unwrap();
        assert!(modules[0].files[0].contents.contains("import CCustom\n"));

        let err = execute(
            &GenerateOptions {
                abi_module: Some("not valid".to_string()),
                ..options(&temp)
            },
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid"));
    }

    #[test]
    fn test_fatal_error_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let broken = write(
            temp.path(),
            "broken.json",
            r#"{ "assemblies": [{ "name": "Broken", "types": [{
                "namespace": "Broken", "name": "IBuffer", "kind": "interface",
                "guid": "905a0fe0-bc53-11df-8c49-001e4fc686da",
                "properties": [{ "name": "Data", "type": "System.Byte*", "getter": "public" }]
            }] }] }"#,
        );
        let mut opts = options(&temp);
        opts.metadata.push(broken);

        let mut out = StyledOutput::new(ColorChoice::Never);
        let err = execute(&opts, &mut out).unwrap_err();
        assert!(format!("{:#}", err).contains("System.Byte*"));
        assert!(!temp.path().join("Generated").exists());
    }
}
