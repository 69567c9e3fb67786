#![deny(missing_docs)]

//! # Schema Registry
//!
//! Resolves the configured models into the `components.schemas` map.
//!
//! Schemas may be inline or stored in JSON/YAML files below the resolution
//! root. Local (`#/definitions/X`) and relative file (`common.json#/Id`)
//! references are inlined; remote references are kept as-is since no network
//! access is performed.
//!
//! A reference back into a schema that is still being expanded cannot be
//! inlined. A cycle to the model root becomes `#/components/schemas/<Model>`;
//! a cycle to any other subschema lifts that subschema into its own
//! `<Model>.<Name>` component and points the reference there.

use crate::config::{Model, ModelSchema};
use crate::error::{AppError, AppResult};
use crate::oas::document::SCHEMA_REF_PREFIX;
use crate::oas::schema::clean_schema;
use indexmap::IndexMap;
use serde_json::{json, Map, Value as JsonValue};
use std::collections::{HashMap, HashSet, VecDeque};
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Loads one schema document.
pub trait SchemaLoader {
    /// Reads and parses the document at `path`.
    fn load(&self, path: &Path) -> impl Future<Output = AppResult<JsonValue>> + Send;
}

/// Reads schema files from disk. YAML and JSON are both accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSchemaLoader;

impl SchemaLoader for FsSchemaLoader {
    fn load(&self, path: &Path) -> impl Future<Output = AppResult<JsonValue>> + Send {
        let path = path.to_path_buf();
        async move {
            let text = tokio::fs::read_to_string(&path).await?;
            serde_yaml::from_str(&text).map_err(|e| {
                AppError::General(format!("Failed to parse schema file {:?}: {}", path, e))
            })
        }
    }
}

/// Resolves models to cleaned, dereferenced JSON-Schemas.
pub struct SchemaRegistry<L = FsSchemaLoader> {
    root: PathBuf,
    loader: L,
}

impl SchemaRegistry<FsSchemaLoader> {
    /// Registry reading schema files relative to `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self::new(root, FsSchemaLoader)
    }
}

impl<L: SchemaLoader> SchemaRegistry<L> {
    /// Registry with a custom loader.
    pub fn new(root: impl Into<PathBuf>, loader: L) -> Self {
        Self {
            root: root.into(),
            loader,
        }
    }

    /// Resolves every model, keyed by name in declaration order.
    ///
    /// A repeated name keeps its first position but takes the later schema.
    /// Subschemas lifted out of recursive models follow their model.
    pub async fn resolve(&self, models: &[Model]) -> AppResult<IndexMap<String, JsonValue>> {
        let mut schemas = IndexMap::new();
        for model in models {
            let (schema, lifted) = self.resolve_model(model).await?;
            debug!(model = %model.name, "Resolved model schema");
            if schemas.insert(model.name.clone(), schema).is_some() {
                warn!(model = %model.name, "Duplicate model name, later schema wins");
            }
            for (component, schema) in lifted {
                debug!(model = %model.name, %component, "Lifted recursive subschema");
                schemas.insert(component, schema);
            }
        }
        Ok(schemas)
    }

    async fn resolve_model(
        &self,
        model: &Model,
    ) -> AppResult<(JsonValue, IndexMap<String, JsonValue>)> {
        let (root_file, root_doc) = match &model.schema {
            ModelSchema::File(relative) => {
                let path = normalize(&self.root.join(relative));
                let doc = self
                    .loader
                    .load(&path)
                    .await
                    .map_err(|e| AppError::schema_resolution(&model.name, e.to_string()))?;
                (Some(path), doc)
            }
            ModelSchema::Inline(schema) => (None, schema.clone()),
        };

        let files = self
            .preload(&model.name, &root_doc, root_file.as_deref())
            .await?;

        let mut inliner = Inliner {
            model: &model.name,
            root_dir: &self.root,
            inline_root: &root_doc,
            files: &files,
            active: vec![(root_file.clone(), String::new())],
            cyclic: HashSet::new(),
            lifted: IndexMap::new(),
        };
        let schema = inliner.expand(&clean_schema(&root_doc), root_file.as_deref())?;
        Ok((schema, inliner.lifted))
    }

    /// Loads every file reachable through `$ref`s, breadth-first.
    async fn preload(
        &self,
        model: &str,
        root_doc: &JsonValue,
        root_file: Option<&Path>,
    ) -> AppResult<HashMap<PathBuf, JsonValue>> {
        let mut files = HashMap::new();
        let mut queue = VecDeque::new();
        collect_file_refs(root_doc, &base_dir(root_file, &self.root), &mut queue);
        if let Some(path) = root_file {
            files.insert(path.to_path_buf(), root_doc.clone());
        }

        while let Some(path) = queue.pop_front() {
            if files.contains_key(&path) {
                continue;
            }
            let doc = self
                .loader
                .load(&path)
                .await
                .map_err(|e| AppError::schema_resolution(model, e.to_string()))?;
            collect_file_refs(&doc, &base_dir(Some(&path), &self.root), &mut queue);
            debug!(model, file = ?path, "Loaded referenced schema file");
            files.insert(path, doc);
        }

        Ok(files)
    }
}

/// A reference target: document (None = inline model schema) and JSON pointer.
type RefTarget = (Option<PathBuf>, String);

struct Inliner<'a> {
    model: &'a str,
    root_dir: &'a Path,
    inline_root: &'a JsonValue,
    files: &'a HashMap<PathBuf, JsonValue>,
    /// Targets being expanded; the first entry is the model root.
    active: Vec<RefTarget>,
    /// Targets found to be re-entered while still active.
    cyclic: HashSet<RefTarget>,
    lifted: IndexMap<String, JsonValue>,
}

impl Inliner<'_> {
    fn expand(&mut self, value: &JsonValue, doc: Option<&Path>) -> AppResult<JsonValue> {
        match value {
            JsonValue::Object(map) => {
                if let Some(JsonValue::String(reference)) = map.get("$ref") {
                    return self.expand_ref(value, reference, doc);
                }
                let mut out = Map::new();
                for (key, child) in map {
                    out.insert(key.clone(), self.expand(child, doc)?);
                }
                Ok(JsonValue::Object(out))
            }
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.expand(item, doc))
                .collect::<AppResult<Vec<_>>>()
                .map(JsonValue::Array),
            other => Ok(other.clone()),
        }
    }

    fn expand_ref(
        &mut self,
        original: &JsonValue,
        reference: &str,
        doc: Option<&Path>,
    ) -> AppResult<JsonValue> {
        let Some((file, pointer)) = split_reference(reference) else {
            return Ok(original.clone());
        };
        let target_doc = if file.is_empty() {
            doc.map(Path::to_path_buf)
        } else {
            Some(normalize(&base_dir(doc, self.root_dir).join(file)))
        };
        let target = (target_doc, pointer.to_string());

        if self.active.contains(&target) {
            let component = self.component_name(&target);
            warn!(model = self.model, reference, %component, "Cyclic schema reference");
            if self.active.first() != Some(&target) {
                self.cyclic.insert(target);
            }
            return Ok(json!({ "$ref": format!("{}{}", SCHEMA_REF_PREFIX, component) }));
        }

        let mut resolved = self.lookup(&target, reference)?.clone();
        if target.1.is_empty() {
            resolved = clean_schema(&resolved);
        }
        let doc_path = target.0.clone();
        self.active.push(target);
        let expanded = self.expand(&resolved, doc_path.as_deref());
        let finished = self.active.pop();
        let expanded = expanded?;

        if let Some(target) = finished {
            if self.cyclic.remove(&target) {
                let component = self.component_name(&target);
                self.lifted.entry(component).or_insert_with(|| expanded.clone());
            }
        }
        Ok(expanded)
    }

    /// Component a cyclic reference to `target` points at.
    fn component_name(&self, target: &RefTarget) -> String {
        if self.active.first() == Some(target) {
            return self.model.to_string();
        }
        let (doc, pointer) = target;
        let name = match pointer.rsplit('/').next().filter(|s| !s.is_empty()) {
            Some(segment) => segment.replace("~1", "/").replace("~0", "~"),
            None => doc
                .as_deref()
                .and_then(Path::file_stem)
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Schema".to_string()),
        };
        let name: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}.{}", self.model, name)
    }

    fn lookup(&self, (doc, pointer): &RefTarget, reference: &str) -> AppResult<&JsonValue> {
        let document = match doc {
            None => self.inline_root,
            Some(path) => self.files.get(path).ok_or_else(|| {
                AppError::schema_resolution(self.model, format!("File {:?} was not loaded", path))
            })?,
        };
        if pointer.is_empty() {
            return Ok(document);
        }
        document.pointer(pointer).ok_or_else(|| {
            AppError::schema_resolution(
                self.model,
                format!("Unresolvable reference '{}'", reference),
            )
        })
    }
}

/// Splits `file#pointer`. Returns `None` for remote references.
fn split_reference(reference: &str) -> Option<(&str, &str)> {
    if reference.contains("://") {
        return None;
    }
    Some(reference.split_once('#').unwrap_or((reference, "")))
}

/// Collapses `.` and `..` without touching the filesystem, so the same file
/// reached through different relative paths gets one key.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn base_dir(doc: Option<&Path>, root: &Path) -> PathBuf {
    doc.and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf())
}

fn collect_file_refs(value: &JsonValue, base: &Path, out: &mut VecDeque<PathBuf>) {
    match value {
        JsonValue::Object(map) => {
            if let Some(JsonValue::String(reference)) = map.get("$ref") {
                if let Some((file, _)) = split_reference(reference) {
                    if !file.is_empty() {
                        out.push_back(normalize(&base.join(file)));
                    }
                }
            }
            for child in map.values() {
                collect_file_refs(child, base, out);
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                collect_file_refs(item, base, out);
            }
        }
        _ => {}
    }
}
