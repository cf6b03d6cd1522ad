use std::path::PathBuf;

use levelgen_noise::NoiseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("resource not registered: {0}")]
    MissingResource(&'static str),

    #[error("resource {0} used before initialization")]
    ResourceNotReady(&'static str),

    #[error("scene ticked before start")]
    NotStarted,

    #[error("failed to decode sheet image {path}: {reason}")]
    SheetImage { path: PathBuf, reason: String },

    #[error(transparent)]
    Noise(#[from] NoiseError),
}

pub type Result<T> = std::result::Result<T, Error>;
