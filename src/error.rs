//! Error types for pxdiag

use thiserror::Error;

/// Main error type for pxdiag operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Unknown command")]
    UnknownCommand,

    #[error("Unsupported filter: {filter}")]
    UnsupportedFilter { filter: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: String },

    #[error("Malformed volume dataset: {reason}")]
    MalformedDataset { reason: String },

    #[error("Volume {id} not found")]
    VolumeNotFound { id: String },

    #[error("Volume ID required")]
    MissingVolumeId,

    #[error("Pager '{program}' failed: {source}")]
    Pager {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid diag bundle: {reason}")]
    BundleLayout { reason: String },

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },
}

/// Result type alias for pxdiag operations
pub type Result<T> = std::result::Result<T, Error>;
