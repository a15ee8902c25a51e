//! Configuration for the subexports tool
//!
//! Two layers live here:
//! - [`ProjectConfig`]: the on-disk `subexports.toml` (or JSON) file
//! - [`BuildOptions`]: the options a bundling host hands to its plugins,
//!   validated into a [`ValidatedBuild`] before any file I/O happens

pub mod build_options;
pub mod errors;
pub mod project;

pub use build_options::{normalize_path, BuildOptions, SubExportsOptions, ValidatedBuild};
pub use errors::{ConfigError, ConfigurationError};
pub use project::ProjectConfig;
