//! The `sub-exports` plugin

use crate::artifacts::EntryArtifacts;
use crate::errors::SynthesisError;
use crate::plugin::{BuildContext, BuildPlugin};
use crate::shims::{shim_files, write_shims};
use std::path::{Path, PathBuf};
use subexports_config::{SubExportsOptions, ValidatedBuild};
use subexports_manifest::{
    has_changed, merge, ExportMap, FsManifestStore, ManifestStore, PackageJson,
};
use tracing::{debug, info, warn};

pub const PLUGIN_NAME: &str = "sub-exports";

/// What happened to the package manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    /// No entries selected; nothing was touched
    Skipped,
    NotFound,
    Unchanged(PathBuf),
    Updated(PathBuf),
    /// Dry run: the manifest differs and would have been written
    WouldUpdate(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisReport {
    pub entries: Vec<String>,
    pub exports: ExportMap,
    pub files: Vec<String>,
    /// Shim paths relative to the project root
    pub shims: Vec<PathBuf>,
    pub shims_written: usize,
    pub manifest: ManifestOutcome,
    /// Whitelisted names the build does not configure
    pub unknown_entries: Vec<String>,
}

impl SynthesisReport {
    fn skipped(unknown_entries: Vec<String>) -> Self {
        Self {
            entries: Vec::new(),
            exports: ExportMap::new(),
            files: Vec::new(),
            shims: Vec::new(),
            shims_written: 0,
            manifest: ManifestOutcome::Skipped,
            unknown_entries,
        }
    }
}

#[derive(Debug)]
struct Prepared {
    build: ValidatedBuild,
    entries: Vec<String>,
    unknown_entries: Vec<String>,
}

/// Adds subexports to a package according to its entry points
pub struct SubExports {
    options: SubExportsOptions,
    store: Option<Box<dyn ManifestStore>>,
    dry_run: bool,
    prepared: Option<Prepared>,
}

impl SubExports {
    pub fn new(options: SubExportsOptions) -> Self {
        Self {
            options,
            store: None,
            dry_run: false,
            prepared: None,
        }
    }

    /// Use a specific manifest store instead of the nearest `package.json`
    pub fn with_store(mut self, store: Box<dyn ManifestStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Compute everything but write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn synthesize(
        &self,
        root: &Path,
        prepared: &Prepared,
        store: &dyn ManifestStore,
    ) -> Result<SynthesisReport, SynthesisError> {
        let outdir = prepared.build.outdir();
        let artifacts: Vec<EntryArtifacts> = prepared
            .entries
            .iter()
            .map(|name| EntryArtifacts::derive(outdir, name))
            .collect();

        let mut exports = ExportMap::new();
        let mut files = Vec::with_capacity(artifacts.len() * 5);
        for entry in &artifacts {
            exports.insert(entry.export_key(), entry.export_record());
            files.extend(entry.files());
        }

        let shims = shim_files(&artifacts);

        // Shim writes don't depend on the manifest, so both run side by side
        let (shim_result, loaded) = rayon::join(
            || {
                if self.dry_run {
                    Ok(0)
                } else {
                    write_shims(root, &shims)
                }
            },
            || load_manifest(store),
        );

        // The manifest phase completes even when a shim write failed
        let manifest =
            loaded.and_then(|loaded| self.update_manifest(store, loaded, &exports, &files));
        let shims_written = shim_result?;
        let manifest = manifest?;

        Ok(SynthesisReport {
            entries: prepared.entries.clone(),
            exports,
            files,
            shims: shims.into_iter().map(|shim| shim.path).collect(),
            shims_written,
            manifest,
            unknown_entries: prepared.unknown_entries.clone(),
        })
    }

    fn update_manifest(
        &self,
        store: &dyn ManifestStore,
        loaded: Option<(PathBuf, PackageJson)>,
        exports: &ExportMap,
        files: &[String],
    ) -> Result<ManifestOutcome, SynthesisError> {
        let Some((path, original)) = loaded else {
            warn!("Subexports: could not find package.json");
            return Ok(ManifestOutcome::NotFound);
        };

        let candidate = merge(&original, exports, files);
        if !has_changed(&original, &candidate) {
            debug!("{} already up to date", path.display());
            return Ok(ManifestOutcome::Unchanged(path));
        }

        if self.dry_run {
            return Ok(ManifestOutcome::WouldUpdate(path));
        }

        store.write(&path, &candidate)?;
        info!("Updated exports in {}", path.display());
        Ok(ManifestOutcome::Updated(path))
    }
}

fn load_manifest(
    store: &dyn ManifestStore,
) -> Result<Option<(PathBuf, PackageJson)>, SynthesisError> {
    let Some(path) = store.resolve_location() else {
        return Ok(None);
    };
    Ok(store.read()?.map(|manifest| (path, manifest)))
}

impl BuildPlugin for SubExports {
    type Output = SynthesisReport;

    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn setup(&mut self, build: &BuildContext<'_>) -> Result<(), SynthesisError> {
        let validated = build.options().validate(build.root())?;
        let entries = self.options.resolve_entries(&validated)?;
        let unknown_entries: Vec<String> = self
            .options
            .unknown_entries(&validated)
            .into_iter()
            .map(String::from)
            .collect();

        for name in &unknown_entries {
            warn!("Entry '{}' is not a configured entry point", name);
        }
        debug!("Selected {} entries: {:?}", entries.len(), entries);

        self.prepared = Some(Prepared {
            build: validated,
            entries,
            unknown_entries,
        });
        Ok(())
    }

    fn on_end(&mut self, build: &BuildContext<'_>) -> Result<SynthesisReport, SynthesisError> {
        let prepared = self
            .prepared
            .take()
            .ok_or(SynthesisError::NotSetUp(PLUGIN_NAME))?;

        if prepared.entries.is_empty() {
            debug!("No entries selected, skipping");
            return Ok(SynthesisReport::skipped(prepared.unknown_entries));
        }

        let fs_store;
        let store: &dyn ManifestStore = match &self.store {
            Some(store) => store.as_ref(),
            None => {
                fs_store = FsManifestStore::new(build.root());
                &fs_store
            }
        };

        self.synthesize(build.root(), &prepared, store)
    }
}
