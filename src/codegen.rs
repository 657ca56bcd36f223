//! Source generation from a resolved [`Catalog`].
//!
//! Produces, for the selected [`Profile`]:
//! - One index artifact enumerating every command class with a reverse lookup
//! - One artifact per command class that has at least one command
//!
//! Artifacts come out in a fixed order: the index first, then command
//! artifacts in catalog key order. Identical input always produces
//! byte-identical output.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::profile::Profile;

/// Default Java package of generated sources.
pub const DEFAULT_PACKAGE: &str = "com.zwave.commandclass";

/// Options selected once at start-up.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub profile: Profile,
    /// Package declaration for targets that have one.
    pub package: String,
}

impl GenerateOptions {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name relative to the output directory.
    pub file_name: String,
    pub contents: String,
}

/// Statistics collected during generation for reporting.
#[derive(Debug, Default)]
pub struct GenerationStats {
    pub artifacts_written: usize,
    pub command_classes: usize,
    pub command_artifacts: usize,
    pub classes_without_commands: usize,
}

/// Render every artifact for `catalog`, without touching the filesystem.
pub fn emit(catalog: &Catalog, options: &GenerateOptions) -> Vec<Artifact> {
    let profile = options.profile;
    let mut artifacts = Vec::with_capacity(catalog.len() + 1);

    artifacts.push(Artifact {
        file_name: profile.index_file_name(),
        contents: profile.render_index(catalog, &options.package),
    });

    for entry in catalog.iter() {
        if entry.commands.is_empty() {
            debug!(name = %entry.display_name, "no commands, skipping command artifact");
            continue;
        }
        artifacts.push(Artifact {
            file_name: profile.command_file_name(entry),
            contents: profile.render_commands(entry, &options.package),
        });
    }

    artifacts
}

/// Generate sources for `catalog` into `output_dir`.
///
/// Everything is rendered and checked before the directory is touched. The
/// directory's previous contents are then removed, so it must be dedicated to
/// generated output.
pub fn generate(
    catalog: &Catalog,
    options: &GenerateOptions,
    output_dir: &Path,
) -> Result<GenerationStats> {
    let artifacts = emit(catalog, options);
    check_unique_file_names(&artifacts)?;

    clear_output_dir(output_dir)?;
    for artifact in &artifacts {
        write_file(&output_dir.join(&artifact.file_name), &artifact.contents)?;
    }

    let stats = GenerationStats {
        artifacts_written: artifacts.len(),
        command_classes: catalog.len(),
        command_artifacts: artifacts.len() - 1,
        classes_without_commands: catalog.iter().filter(|e| e.commands.is_empty()).count(),
    };
    info!(
        profile = options.profile.name(),
        artifacts = stats.artifacts_written,
        dir = %output_dir.display(),
        "wrote generated sources"
    );
    Ok(stats)
}

/// Two classes whose names differ only in separators map to the same type
/// name, and therefore the same file.
fn check_unique_file_names(artifacts: &[Artifact]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for artifact in artifacts {
        if !seen.insert(artifact.file_name.as_str()) {
            return Err(Error::Codegen(format!(
                "two artifacts would be written to {}",
                artifact.file_name
            )));
        }
    }
    Ok(())
}

/// Remove everything inside `dir`, creating it if it does not exist.
fn clear_output_dir(dir: &Path) -> Result<()> {
    let clear_err = |source| Error::Clear {
        path: dir.to_path_buf(),
        source,
    };

    if !dir.exists() {
        return std::fs::create_dir_all(dir).map_err(clear_err);
    }

    for entry in std::fs::read_dir(dir).map_err(clear_err)? {
        let path = entry.map_err(clear_err)?.path();
        let removed = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        removed.map_err(|e| Error::Clear { path, source: e })?;
    }
    Ok(())
}

/// Write content to a file, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::document::{RawCommand, RawCommandClass, RawDocument};
    use crate::naming::IdentifierStyle;

    fn class(name: &str, key: &str, commands: &[(&str, &str)]) -> RawCommandClass {
        RawCommandClass {
            name: Some(name.to_string()),
            key: Some(key.to_string()),
            version: Some("1".to_string()),
            commands: commands
                .iter()
                .map(|(name, key)| RawCommand {
                    name: Some(name.to_string()),
                    key: Some(key.to_string()),
                })
                .collect(),
        }
    }

    fn file_names(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.file_name.as_str()).collect()
    }

    #[test]
    fn index_first_then_classes_in_key_order() {
        let document = RawDocument {
            command_classes: vec![
                class("COMMAND_CLASS_VERSION", "0x86", &[("VERSION_GET", "0x11")]),
                class("COMMAND_CLASS_NO_OPERATION", "0x00", &[]),
                class("COMMAND_CLASS_BASIC", "0x20", &[("BASIC_SET", "0x01")]),
            ],
        };
        let (catalog, _) = build_catalog(&document, IdentifierStyle::Verbatim);

        let artifacts = emit(&catalog, &GenerateOptions::new(Profile::Java));
        assert_eq!(
            file_names(&artifacts),
            ["CommandClass.java", "BasicCommand.java", "VersionCommand.java"]
        );
        // The class without commands is still indexed.
        assert!(artifacts[0].contents.contains("NO_OPERATION(0x00, 1)"));
    }

    #[test]
    fn empty_catalog_emits_only_index() {
        let artifacts = emit(&Catalog::default(), &GenerateOptions::new(Profile::JavaScript));
        assert_eq!(file_names(&artifacts), ["CommandClass.js"]);
    }

    #[test]
    fn colliding_file_names_are_rejected() {
        let artifacts = vec![
            Artifact {
                file_name: "SwitchXCommand.java".to_string(),
                contents: String::new(),
            },
            Artifact {
                file_name: "SwitchXCommand.java".to_string(),
                contents: String::new(),
            },
        ];
        let err = check_unique_file_names(&artifacts).unwrap_err().to_string();
        assert!(err.contains("SwitchXCommand.java"));
    }

    #[test]
    fn default_package() {
        let options = GenerateOptions::new(Profile::Java);
        assert_eq!(options.package, DEFAULT_PACKAGE);
    }
}
