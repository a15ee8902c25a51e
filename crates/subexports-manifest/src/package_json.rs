//! `package.json` documents
//!
//! The whole document is kept as an ordered JSON object so fields this tool
//! does not understand survive a rewrite untouched.

use crate::errors::ManifestError;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PACKAGE_JSON: &str = "package.json";

/// A parsed package manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageJson {
    document: Map<String, Value>,
}

/// Find the nearest `package.json`, searching `start` and then its ancestors
pub fn find_package_json(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PACKAGE_JSON))
        .find(|candidate| candidate.is_file())
}

impl PackageJson {
    /// Wrap a JSON value, which must be an object
    pub fn from_value(path: &Path, value: Value) -> Result<Self, ManifestError> {
        match value {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(ManifestError::NotAnObject(path.to_path_buf())),
        }
    }

    /// Read and parse a manifest file
    pub fn read_from_path(path: &Path) -> Result<Self, ManifestError> {
        debug!("Reading package manifest from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(path, value)
    }

    /// Write the manifest with an atomic temp-file rename
    pub fn write_to_path(&self, path: &Path) -> Result<(), ManifestError> {
        let content = self.to_pretty_string()?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| ManifestError::io(&temp_path, e))?;
            file.write_all(content.as_bytes())
                .and_then(|()| file.flush())
                .map_err(|e| ManifestError::io(&temp_path, e))?;
        }

        fs::rename(&temp_path, path).map_err(|e| ManifestError::io(path, e))?;
        debug!("Package manifest written to {}", path.display());
        Ok(())
    }

    /// Two-space indented JSON with a trailing newline
    pub fn to_pretty_string(&self) -> Result<String, ManifestError> {
        let mut content = serde_json::to_string_pretty(&self.document)?;
        content.push('\n');
        Ok(content)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn files(&self) -> Option<&Value> {
        self.get("files")
    }

    pub fn exports(&self) -> Option<&Value> {
        self.get("exports")
    }

    pub(crate) fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.document
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }

    /// The `files` and `exports` fields, omitting whichever is absent
    pub fn relevant_subset(&self) -> Value {
        let mut subset = Map::new();
        for key in ["files", "exports"] {
            if let Some(value) = self.document.get(key) {
                subset.insert(key.to_string(), value.clone());
            }
        }
        Value::Object(subset)
    }
}
