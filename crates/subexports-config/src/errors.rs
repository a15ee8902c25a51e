use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid or missing build inputs, detected before any work is done
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Entry points must be a mapping of entry name to source path, found {found}")]
    EntryPointsShape { found: &'static str },

    #[error("Entry point '{name}' must map to a source path string, found {found}")]
    EntryPointValue { name: String, found: &'static str },

    #[error("Invalid entry name '{name}': {reason}")]
    InvalidEntryName { name: String, reason: &'static str },

    #[error("An output directory is required when using multiple exports")]
    MissingOutdir,

    #[error("Output directory '{}' is outside the project root", .0.display())]
    OutdirOutsideRoot(PathBuf),

    #[error("Output directory must not be the project root")]
    OutdirIsRoot,

    #[error("Entry '{name}' would write its root shims into the output directory '{outdir}'")]
    ShimInOutdir { name: String, outdir: String },
}

/// Errors raised while loading the project configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
