use std::io;
use std::path::PathBuf;
use subexports_config::ConfigurationError;
use subexports_manifest::ManifestError;
use thiserror::Error;

/// Errors raised while running the subexports plugin
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Plugin '{0}' reached the end of the build without being set up")]
    NotSetUp(&'static str),
}
