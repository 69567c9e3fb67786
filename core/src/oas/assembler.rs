#![deny(missing_docs)]

//! # Document Assembly
//!
//! Produces the finished [`Definition`] for one generation run.
//!
//! The run is a pipeline of pure stages: the schema registry resolves models,
//! every documented HTTP event becomes a [`PathFragment`], and the fragments
//! are folded into `paths` once. Nothing is mutated across runs.

use crate::config::{DefinitionConfig, FunctionDescriptor};
use crate::error::AppResult;
use crate::oas::document::{Components, Definition, Operation, Paths, OPENAPI_VERSION};
use crate::oas::merge::merge_typed;
use crate::oas::operation::build_operation;
use crate::oas::registry::{FsSchemaLoader, SchemaLoader, SchemaRegistry};
use std::path::PathBuf;
use tracing::{debug, info};
use utoipa::openapi::info::{Info, InfoBuilder};
use uuid::Uuid;

/// One operation placed at a path and method.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFragment {
    /// Path key, always starting with `/`.
    pub path: String,
    /// Lower-cased HTTP method.
    pub method: String,
    /// The generated operation.
    pub operation: Operation,
}

/// Builds a [`Definition`] from configuration and functions.
pub struct DocumentAssembler<'a, L = FsSchemaLoader> {
    config: &'a DefinitionConfig,
    registry: SchemaRegistry<L>,
}

impl<'a> DocumentAssembler<'a, FsSchemaLoader> {
    /// Assembler resolving schema files relative to `root`.
    pub fn new(config: &'a DefinitionConfig, root: impl Into<PathBuf>) -> Self {
        Self::with_registry(config, SchemaRegistry::from_root(root))
    }
}

impl<'a, L: SchemaLoader> DocumentAssembler<'a, L> {
    /// Assembler with a custom schema registry.
    pub fn with_registry(config: &'a DefinitionConfig, registry: SchemaRegistry<L>) -> Self {
        Self { config, registry }
    }

    /// Runs the whole pipeline.
    ///
    /// Fails on the first schema resolution or missing request model error;
    /// no partial document is returned.
    pub async fn assemble(&self, functions: &[FunctionDescriptor]) -> AppResult<Definition> {
        let schemas = self.registry.resolve(&self.config.models).await?;
        let fragments = path_fragments(functions, self.config)?;
        let operation_count = fragments.len();
        let paths = fold_paths(fragments)?;

        info!(
            models = schemas.len(),
            operations = operation_count,
            paths = paths.len(),
            "Assembled OpenAPI definition"
        );

        Ok(Definition {
            openapi: OPENAPI_VERSION.to_string(),
            info: self.info(),
            servers: self.config.servers.clone(),
            security: self
                .config
                .security
                .as_ref()
                .map(|all| all.iter().map(|s| s.requirement()).collect()),
            paths,
            components: Components {
                schemas,
                security_schemes: self.config.security_schemes.clone(),
            },
        })
    }

    fn info(&self) -> Info {
        let version = self
            .config
            .version
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        InfoBuilder::new()
            .title(self.config.title.clone())
            .description(Some(self.config.description.clone()))
            .version(version)
            .build()
    }
}

/// One fragment per documented HTTP event, in function then event order.
pub fn path_fragments(
    functions: &[FunctionDescriptor],
    config: &DefinitionConfig,
) -> AppResult<Vec<PathFragment>> {
    let mut fragments = Vec::new();
    for function in functions {
        for event in function.events.iter().filter_map(|e| e.http_event()) {
            let Some(documentation) = event.documented() else {
                debug!(function = %function.name, path = %event.path, "Skipping undocumented event");
                continue;
            };
            let fragment = PathFragment {
                path: format!("/{}", event.path.trim_start_matches('/')),
                method: event.method.to_lowercase(),
                operation: build_operation(&function.name, documentation, config)?,
            };
            debug!(
                function = %function.name,
                path = %fragment.path,
                method = %fragment.method,
                "Built operation"
            );
            fragments.push(fragment);
        }
    }
    Ok(fragments)
}

/// Folds fragments into `paths`.
///
/// Two fragments on the same path and method are deep-merged: the later one's
/// leaf values win and its sequences replace the earlier ones.
pub fn fold_paths(fragments: impl IntoIterator<Item = PathFragment>) -> AppResult<Paths> {
    let mut paths = Paths::new();
    for PathFragment {
        path,
        method,
        operation,
    } in fragments
    {
        let item = paths.entry(path).or_default();
        let operation = match item.get(&method) {
            Some(existing) => merge_typed(existing.clone(), operation)?,
            None => operation,
        };
        item.insert(method, operation);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::Responses;
    use serde_json::json;

    fn functions(yaml: &str) -> Vec<FunctionDescriptor> {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn operation(id: &str) -> Operation {
        Operation {
            operation_id: id.into(),
            summary: None,
            description: None,
            tags: None,
            deprecated: None,
            request_body: None,
            parameters: vec![],
            responses: Responses::new(),
            security: None,
        }
    }

    #[test]
    fn test_fragments_skip_undocumented_and_non_http() {
        let fns = functions(
            r#"
- name: listPets
  events:
    - http: {path: pets, method: GET, documentation: {summary: List}}
    - http: {path: pets/all, method: GET}
    - http: GET pets/short
    - schedule: rate(1 hour)
- name: worker
  events: []
"#,
        );
        let fragments = path_fragments(&fns, &DefinitionConfig::default()).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].path, "/pets");
        assert_eq!(fragments[0].method, "get");
        assert_eq!(fragments[0].operation.operation_id, "listPets");
    }

    #[test]
    fn test_fold_groups_methods_under_path() {
        let paths = fold_paths(vec![
            PathFragment {
                path: "/pets".into(),
                method: "get".into(),
                operation: operation("listPets"),
            },
            PathFragment {
                path: "/pets".into(),
                method: "post".into(),
                operation: operation("createPet"),
            },
        ])
        .unwrap();
        let methods: Vec<_> = paths["/pets"].keys().cloned().collect();
        assert_eq!(methods, ["get", "post"]);
    }

    #[test]
    fn test_fold_same_path_and_method_merges() {
        let mut first = operation("first");
        first.summary = Some("kept".into());
        first.tags = Some(vec!["a".into(), "b".into()]);
        let mut second = operation("second");
        second.tags = Some(vec!["c".into()]);

        let paths = fold_paths(vec![
            PathFragment {
                path: "/pets".into(),
                method: "get".into(),
                operation: first,
            },
            PathFragment {
                path: "/pets".into(),
                method: "get".into(),
                operation: second,
            },
        ])
        .unwrap();

        let merged = &paths["/pets"]["get"];
        assert_eq!(merged.operation_id, "second");
        assert_eq!(merged.summary.as_deref(), Some("kept"));
        assert_eq!(merged.tags, Some(vec!["c".to_string()]));
    }

    #[tokio::test]
    async fn test_assemble_header_sections() {
        let config: DefinitionConfig = serde_yaml::from_str(
            r#"
title: Pets
description: Pet store
version: 1.2.3
servers:
  - url: https://api.example.com
security:
  - authorizerName: main
    bearerAuth: []
securitySchemes:
  bearerAuth: {type: http, scheme: bearer}
"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let definition = DocumentAssembler::new(&config, dir.path())
            .assemble(&[])
            .await
            .unwrap();
        let value = serde_json::to_value(&definition).unwrap();

        assert_eq!(value["openapi"], json!("3.0.0"));
        assert_eq!(
            value["info"],
            json!({"title": "Pets", "description": "Pet store", "version": "1.2.3"})
        );
        assert_eq!(value["servers"], json!([{"url": "https://api.example.com"}]));
        assert_eq!(value["security"], json!([{"bearerAuth": []}]));
        assert_eq!(
            value["components"]["securitySchemes"]["bearerAuth"]["scheme"],
            json!("bearer")
        );
        assert_eq!(value["paths"], json!({}));
        assert_eq!(value["components"]["schemas"], json!({}));
    }

    #[tokio::test]
    async fn test_missing_version_gets_uuid() {
        let config = DefinitionConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let definition = DocumentAssembler::new(&config, dir.path())
            .assemble(&[])
            .await
            .unwrap();
        assert!(Uuid::parse_str(&definition.info.version).is_ok());
        assert!(definition.servers.is_none());
        assert!(definition.security.is_none());
    }
}
