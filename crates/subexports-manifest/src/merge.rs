//! Merging derived subexports into an existing manifest

use crate::package_json::PackageJson;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Conditional export targets for one subpath
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub types: String,
    pub import: String,
    pub require: String,
}

impl ExportRecord {
    /// JSON form with `types` first, as TypeScript resolution expects
    pub fn to_value(&self) -> Value {
        json!({
            "types": self.types,
            "import": self.import,
            "require": self.require,
        })
    }
}

/// Export records keyed by subpath, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMap {
    entries: Vec<(String, ExportRecord)>,
}

impl ExportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous record for the same key
    pub fn insert(&mut self, key: impl Into<String>, record: ExportRecord) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = record,
            None => self.entries.push((key, record)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ExportRecord> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportRecord)> {
        self.entries
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the candidate manifest
///
/// `files` becomes the ordered union of the existing entries and `files`;
/// `exports` keeps every existing key and overlays the derived records. A
/// `files` that is not an array or an `exports` that is not an object is
/// treated as empty. All other fields are carried over unchanged.
pub fn merge(original: &PackageJson, exports: &ExportMap, files: &[String]) -> PackageJson {
    let mut merged_files: Vec<Value> = Vec::new();
    let existing_files: &[Value] = match original.files() {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };
    let derived_files = files.iter().map(|file| Value::String(file.clone()));
    for file in existing_files.iter().cloned().chain(derived_files) {
        if !merged_files.contains(&file) {
            merged_files.push(file);
        }
    }

    let mut merged_exports = match original.exports() {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    for (key, record) in exports.iter() {
        merged_exports.insert(key.to_string(), record.to_value());
    }

    let mut candidate = original.clone();
    let document = candidate.as_map_mut();
    document.insert("files".to_string(), Value::Array(merged_files));
    document.insert("exports".to_string(), Value::Object(merged_exports));
    candidate
}

/// Whether the `files`/`exports` subset serializes differently
pub fn has_changed(original: &PackageJson, candidate: &PackageJson) -> bool {
    original.relevant_subset().to_string() != candidate.relevant_subset().to_string()
}
