//! Subexport synthesis
//!
//! After a bundler has written its artifacts, the [`SubExports`] plugin
//! derives, for every named entry point:
//! - an `exports["./{name}"]` record pointing at the `.d.ts`, `.mjs` and `.js` outputs
//! - root-level `{name}.js` / `{name}.d.ts` shims for consumers that ignore `exports`
//! - the five paths the package has to publish under `files`
//!
//! and merges the result into the nearest `package.json`.

pub mod artifacts;
pub mod errors;
pub mod naming;
pub mod plugin;
pub mod shims;
pub mod synthesizer;

pub use artifacts::EntryArtifacts;
pub use errors::SynthesisError;
pub use plugin::{BuildContext, BuildHost, BuildPlugin};
pub use synthesizer::{ManifestOutcome, SubExports, SynthesisReport};
