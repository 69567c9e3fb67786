#![deny(missing_docs)]

//! # Service Manifest
//!
//! Reads the parts of a serverless-style service manifest that drive
//! generation: `custom.documentation` and the `functions` map. Every other key
//! is ignored.

use crate::error::{CliError, CliResult};
use indexmap::IndexMap;
use oasgen_core::config::Event;
use oasgen_core::{DefinitionConfig, FunctionDescriptor};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The manifest subset read by the generator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Plugin settings.
    #[serde(default)]
    pub custom: Custom,
    /// Functions keyed by name, in manifest order.
    #[serde(default)]
    pub functions: IndexMap<String, Option<FunctionEntry>>,
}

/// The `custom` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Custom {
    /// Top-level documentation settings.
    #[serde(default)]
    pub documentation: Option<DefinitionConfig>,
}

/// One entry of the `functions` map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionEntry {
    /// Trigger events.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::General(format!("Failed to read manifest {:?}: {}", path, e))
        })?;
        Self::parse(&content)
    }

    /// Parses manifest YAML.
    pub fn parse(content: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The `custom.documentation` block.
    pub fn documentation(&self) -> CliResult<&DefinitionConfig> {
        self.custom.documentation.as_ref().ok_or_else(|| {
            CliError::General("Manifest has no 'custom.documentation' section".to_string())
        })
    }

    /// Function descriptors in manifest order.
    pub fn functions(&self) -> Vec<FunctionDescriptor> {
        self.functions
            .iter()
            .map(|(name, entry)| FunctionDescriptor {
                name: name.clone(),
                events: entry
                    .as_ref()
                    .map(|e| e.events.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// Directory schema file references are resolved against.
pub fn resolution_root(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
service: pets
provider:
  name: aws
custom:
  documentation:
    title: Pets
    version: '1'
functions:
  listPets:
    handler: handler.list
    events:
      - http:
          path: pets
          method: get
          documentation: {summary: List}
  cron:
    handler: handler.cron
    events:
      - schedule: rate(1 hour)
  bare:
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        assert_eq!(manifest.documentation().unwrap().title, "Pets");

        let functions = manifest.functions();
        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["listPets", "cron", "bare"]);
        assert!(functions[0].events[0].http_event().is_some());
        assert!(functions[1].events[0].http.is_none());
        assert!(functions[2].events.is_empty());
    }

    #[test]
    fn test_missing_documentation_section() {
        let manifest = Manifest::parse("service: pets\n").unwrap();
        let err = manifest.documentation().unwrap_err();
        assert!(err.to_string().contains("custom.documentation"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("serverless.yml")).unwrap_err();
        assert!(matches!(err, CliError::General(_)));
    }

    #[test]
    fn test_resolution_root() {
        assert_eq!(resolution_root(Path::new("serverless.yml")), PathBuf::from("."));
        assert_eq!(
            resolution_root(Path::new("svc/serverless.yml")),
            PathBuf::from("svc")
        );
    }
}
