use crate::naming::{in_outdir, shim_specifier, to_relative};
use crate::shims::{render_require_shim, render_types_shim};
use subexports_manifest::ExportRecord;

/// The five published paths of one entry
///
/// Paths in the output directory come from the bundler; the two root paths
/// are the shims this crate writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryArtifacts {
    pub name: String,
    /// `{outdir}/{name}.js`
    pub compiled: String,
    /// `{outdir}/{name}.mjs`
    pub module: String,
    /// `{outdir}/{name}.d.ts`
    pub types: String,
    /// `{name}.js`
    pub root_compiled: String,
    /// `{name}.d.ts`
    pub root_types: String,
}

impl EntryArtifacts {
    pub fn derive(outdir: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            compiled: in_outdir(outdir, &format!("{}.js", name)),
            module: in_outdir(outdir, &format!("{}.mjs", name)),
            types: in_outdir(outdir, &format!("{}.d.ts", name)),
            root_compiled: format!("{}.js", name),
            root_types: format!("{}.d.ts", name),
        }
    }

    /// Subpath key in `exports`
    pub fn export_key(&self) -> String {
        format!("./{}", self.name)
    }

    pub fn export_record(&self) -> ExportRecord {
        ExportRecord {
            types: to_relative(&self.types),
            import: to_relative(&self.module),
            require: to_relative(&self.compiled),
        }
    }

    /// Paths to publish, compiled output first and root shims last
    pub fn files(&self) -> [String; 5] {
        [
            self.compiled.clone(),
            self.types.clone(),
            self.module.clone(),
            self.root_compiled.clone(),
            self.root_types.clone(),
        ]
    }

    /// Contents of the root `{name}.js` shim
    pub fn require_shim(&self) -> String {
        render_require_shim(&shim_specifier(&self.name, &self.compiled))
    }

    /// Contents of the root `{name}.d.ts` shim
    pub fn types_shim(&self) -> String {
        render_types_shim(&shim_specifier(&self.name, &self.types))
    }
}
