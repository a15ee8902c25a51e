//! Package manifest handling
//!
//! This crate owns everything that touches `package.json`: finding the
//! nearest one, reading and atomically writing it, and merging derived
//! `exports` records and `files` entries into it.
//!
//! Key order of the document is preserved across a read/merge/write cycle so
//! that an unchanged merge serializes to exactly the same text.

pub mod errors;
pub mod merge;
pub mod package_json;
pub mod store;

pub use errors::ManifestError;
pub use merge::{has_changed, merge, ExportMap, ExportRecord};
pub use package_json::{find_package_json, PackageJson, PACKAGE_JSON};
pub use store::{FsManifestStore, ManifestStore};
