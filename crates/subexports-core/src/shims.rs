//! Root-level compatibility shims
//!
//! Consumers resolving `pkg/name` without `exports` support land on
//! `{root}/name.js` and `{root}/name.d.ts`; these re-export the real output.

use crate::artifacts::EntryArtifacts;
use crate::errors::SynthesisError;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A shim file to write, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimFile {
    pub path: PathBuf,
    pub contents: String,
}

pub fn render_require_shim(specifier: &str) -> String {
    format!("module.exports = require(\"{}\");", specifier)
}

pub fn render_types_shim(specifier: &str) -> String {
    format!("export type * from \"{}\";", specifier)
}

/// Both shims of every entry
pub fn shim_files(artifacts: &[EntryArtifacts]) -> Vec<ShimFile> {
    artifacts
        .iter()
        .flat_map(|entry| {
            [
                ShimFile {
                    path: PathBuf::from(&entry.root_compiled),
                    contents: entry.require_shim(),
                },
                ShimFile {
                    path: PathBuf::from(&entry.root_types),
                    contents: entry.types_shim(),
                },
            ]
        })
        .collect()
}

/// Write shims under `root` in parallel
///
/// Every write is attempted; one of the failures is returned if any occur.
/// Already written shims are left in place.
pub fn write_shims(root: &Path, shims: &[ShimFile]) -> Result<usize, SynthesisError> {
    let failures: Vec<SynthesisError> = shims
        .par_iter()
        .filter_map(|shim| write_shim(root, shim).err())
        .collect();

    match failures.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(shims.len()),
    }
}

fn write_shim(root: &Path, shim: &ShimFile) -> Result<(), SynthesisError> {
    let path = root.join(&shim.path);
    let io_error = |source| SynthesisError::Io {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(&path, &shim.contents).map_err(io_error)?;

    debug!("Wrote shim {}", path.display());
    Ok(())
}
