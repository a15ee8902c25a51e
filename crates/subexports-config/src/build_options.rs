//! Build options handed over by the bundling host
//!
//! The host's entry-point configuration arrives untyped (esbuild accepts a
//! list, a list of `{in, out}` objects or a mapping). Only the flat mapping
//! form names its entries, so anything else is rejected here, before any
//! plugin touches the file system.

use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Raw build options as configured for the host
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BuildOptions {
    /// Directory the bundler writes its artifacts to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// Entry points, expected to be a mapping of entry name to source path
    #[serde(
        default,
        alias = "entryPoints",
        alias = "entry_points",
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_points: Option<Value>,
}

/// Build options that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBuild {
    entry_points: Vec<(String, String)>,
    outdir: String,
}

impl BuildOptions {
    /// Validate the options against the project root
    ///
    /// Entry points are checked first, then the output directory. The
    /// returned outdir is relative to `root`, uses `/` separators and carries
    /// no leading `./` or trailing `/`.
    pub fn validate(&self, root: &Path) -> Result<ValidatedBuild, ConfigurationError> {
        let entry_points = validate_entry_points(self.entry_points.as_ref())?;
        let outdir = normalize_outdir(self.outdir.as_deref(), root)?;

        debug!(
            "Validated {} entry points with outdir '{}'",
            entry_points.len(),
            outdir
        );

        Ok(ValidatedBuild {
            entry_points,
            outdir,
        })
    }
}

impl ValidatedBuild {
    /// Normalized output directory, relative to the project root
    pub fn outdir(&self) -> &str {
        &self.outdir
    }

    /// Entry names in configuration order
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entry_points.iter().map(|(name, _)| name.as_str())
    }

    /// Source path configured for an entry
    pub fn source_for(&self, name: &str) -> Option<&str> {
        self.entry_points
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, source)| source.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.source_for(name).is_some()
    }
}

/// Options of the subexports plugin itself
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubExportsOptions {
    /// Optional whitelist of entries, by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,
}

impl SubExportsOptions {
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: Some(entries.into_iter().map(Into::into).collect()),
        }
    }

    /// Resolve the effective entry names
    ///
    /// The whitelist wins when present, otherwise every configured entry is
    /// used. Duplicates collapse onto their first occurrence. Names whose
    /// root shims would land inside the output directory are rejected.
    pub fn resolve_entries(
        &self,
        build: &ValidatedBuild,
    ) -> Result<Vec<String>, ConfigurationError> {
        let candidates: Vec<&str> = match &self.entries {
            Some(whitelist) => whitelist.iter().map(String::as_str).collect(),
            None => build.entry_names().collect(),
        };

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(candidates.len());
        for name in candidates {
            validate_entry_name(name)?;
            check_shim_location(name, build.outdir())?;
            if seen.insert(name) {
                resolved.push(name.to_string());
            }
        }
        Ok(resolved)
    }

    /// Whitelisted names that the build does not configure
    pub fn unknown_entries<'a>(&'a self, build: &ValidatedBuild) -> Vec<&'a str> {
        self.entries
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|name| !build.contains(name))
            .collect()
    }
}

fn validate_entry_points(
    entry_points: Option<&Value>,
) -> Result<Vec<(String, String)>, ConfigurationError> {
    let map = match entry_points {
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ConfigurationError::EntryPointsShape {
                found: describe(other),
            })
        }
        None => {
            return Err(ConfigurationError::EntryPointsShape { found: "nothing" });
        }
    };

    map.iter()
        .map(|(name, source)| {
            validate_entry_name(name)?;
            match source {
                Value::String(source) => Ok((name.clone(), source.clone())),
                other => Err(ConfigurationError::EntryPointValue {
                    name: name.clone(),
                    found: describe(other),
                }),
            }
        })
        .collect()
}

/// Check that an entry name can be used as a relative file stem
pub fn validate_entry_name(name: &str) -> Result<(), ConfigurationError> {
    let invalid = |reason| ConfigurationError::InvalidEntryName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('\\') {
        return Err(invalid("use '/' to separate directories"));
    }
    if name.chars().any(|c| c == '"' || c.is_control()) {
        return Err(invalid("name contains quotes or control characters"));
    }
    if name.starts_with('/') || name.contains(':') {
        return Err(invalid("name must be relative"));
    }
    if name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid("name must not contain empty, '.' or '..' segments"));
    }
    Ok(())
}

/// Root shims are `{name}.js` and `{name}.d.ts`; neither may live under the outdir
fn check_shim_location(name: &str, outdir: &str) -> Result<(), ConfigurationError> {
    let inside = name
        .strip_prefix(outdir)
        .is_some_and(|rest| rest.starts_with('/'));
    if inside {
        return Err(ConfigurationError::ShimInOutdir {
            name: name.to_string(),
            outdir: outdir.to_string(),
        });
    }
    Ok(())
}

/// Resolve `.` and `..` components lexically, without touching the file system
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let at_name = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if at_name {
                    normalized.pop();
                } else if !at_root {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn normalize_outdir(outdir: Option<&str>, root: &Path) -> Result<String, ConfigurationError> {
    let raw = match outdir.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.replace('\\', "/"),
        _ => return Err(ConfigurationError::MissingOutdir),
    };

    let relative = if Path::new(&raw).is_absolute() {
        let absolute = normalize_path(Path::new(&raw));
        let stripped = absolute
            .strip_prefix(normalize_path(root))
            .map_err(|_| ConfigurationError::OutdirOutsideRoot(raw.clone().into()))?;
        stripped.to_string_lossy().replace('\\', "/")
    } else {
        raw.clone()
    };

    let mut segments = Vec::new();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(ConfigurationError::OutdirOutsideRoot(raw.into())),
            segment => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Err(ConfigurationError::OutdirIsRoot);
    }
    Ok(segments.join("/"))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
