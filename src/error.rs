//! Error types for the boundary layers.  The simulation core has none.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid panel endpoint `{0}`")]
    InvalidEndpoint(String),

    #[error("panel index {0} out of range (0..12)")]
    NoSuchPanel(usize),

    #[error("panel slot {0} is already connected")]
    AlreadyConnected(usize),

    #[error("panel slot {0} has no endpoint configured")]
    Unconfigured(usize),

    #[error("failed to open {endpoint}: {source}")]
    Open {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid panel spec `{0}` (expected INDEX=ENDPOINT with INDEX in 0..12)")]
    InvalidPanel(String),
}
