use crate::errors::ManifestError;
use crate::package_json::{find_package_json, PackageJson};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Access to the package manifest of the project being built
pub trait ManifestStore: Send + Sync {
    /// Location of the manifest, if one can be found
    fn resolve_location(&self) -> Option<PathBuf>;

    /// Read the manifest, `Ok(None)` when there is none
    fn read(&self) -> Result<Option<PackageJson>, ManifestError>;

    /// Replace the manifest at `path` with `manifest`
    fn write(&self, path: &Path, manifest: &PackageJson) -> Result<(), ManifestError>;
}

/// Manifest store backed by the nearest `package.json` on disk
#[derive(Debug, Clone)]
pub struct FsManifestStore {
    root: PathBuf,
}

impl FsManifestStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ManifestStore for FsManifestStore {
    fn resolve_location(&self) -> Option<PathBuf> {
        let found = find_package_json(&self.root);
        if found.is_none() {
            debug!("No package.json found from {}", self.root.display());
        }
        found
    }

    fn read(&self) -> Result<Option<PackageJson>, ManifestError> {
        self.resolve_location()
            .map(|path| PackageJson::read_from_path(&path))
            .transpose()
    }

    fn write(&self, path: &Path, manifest: &PackageJson) -> Result<(), ManifestError> {
        manifest.write_to_path(path)
    }
}
