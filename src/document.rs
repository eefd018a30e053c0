//! The consolidated document: `{ type: { id: item } }`.
//!
//! This is the canonical intermediate shape shared by every stage. The
//! extractor performs the native list→map transform once; the reinjector
//! performs the inverse map→list transform once at the very end. Insertion
//! order is preserved throughout so repeated runs serialize identically.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::PipelineError;

/// Capability flag for the two kinds of content type.
///
/// Culture entries carry their full structural pointer as gettext context;
/// ordinary entries rely on their id for disambiguation and stay contextless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Ordinary,
    Culture,
}

impl ItemKind {
    pub fn requires_context(self) -> bool {
        matches!(self, ItemKind::Culture)
    }
}

/// Mapping from content type to `id -> item` objects, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    types: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item under `(type, id)`. Returns true when an existing item
    /// was overwritten (last write wins).
    pub fn insert_item(&mut self, type_name: &str, id: &str, item: Value) -> bool {
        let entry = self
            .types
            .entry(type_name.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(items) => items.insert(id.to_string(), item).is_some(),
            _ => unreachable!("document type values are always objects"),
        }
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn item_count(&self) -> usize {
        self.types
            .values()
            .filter_map(Value::as_object)
            .map(Map::len)
            .sum()
    }

    /// Types in insertion order, each with its `id -> item` object.
    pub fn types(&self) -> impl Iterator<Item = (&String, &Map<String, Value>)> {
        self.types
            .iter()
            .filter_map(|(name, items)| items.as_object().map(|m| (name, m)))
    }

    pub fn items(&self, type_name: &str) -> Option<&Map<String, Value>> {
        self.types.get(type_name).and_then(Value::as_object)
    }

    /// Inverse transform back to the native `{ type: [items] }` shape, items
    /// in document insertion order.
    pub fn to_lists(&self) -> Value {
        let mut out = Map::new();
        for (name, items) in self.types() {
            let list: Vec<Value> = items.values().cloned().collect();
            out.insert(name.clone(), Value::Array(list));
        }
        Value::Object(out)
    }

    pub fn read(path: &Path) -> Result<Self, PipelineError> {
        let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| PipelineError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        match value {
            Value::Object(types) => Ok(Self { types }),
            _ => Err(PipelineError::Parse {
                path: path.to_path_buf(),
                message: "document root must be an object".to_string(),
            }),
        }
    }

    /// Write the artifact as strict, compact UTF-8 JSON. Output is a pure
    /// function of the document contents, so unchanged input trees produce
    /// byte-identical files.
    pub fn write(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        let content = serde_json::to_string(&Value::Object(self.types.clone()))
            .expect("document serialization is infallible");
        fs::write(path, format!("{content}\n")).map_err(|e| PipelineError::io(path, e))
    }
}

/// Write any output value the same way the document artifact is written.
pub fn write_json(path: &Path, value: &Value) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    let content = serde_json::to_string(value).expect("json serialization is infallible");
    fs::write(path, format!("{content}\n")).map_err(|e| PipelineError::io(path, e))
}

/// Recursively lower-case every object key. Source files are inconsistently
/// cased; later duplicates win within a single object.
pub fn lower_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, child) in map {
                out.insert(key.to_lowercase(), lower_keys(child));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(lower_keys).collect()),
        other => other,
    }
}
