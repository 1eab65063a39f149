use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by index queries.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("notes for {path} are not sorted by line and column")]
    UnsortedNotes { path: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    /// True for failures caused by the caller asking for an unknown path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IndexError::NotFound(_))
    }
}

/// Failures while loading `diagview.toml|yaml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
