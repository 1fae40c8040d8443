use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting a document or running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The input tree nests deeper than `limits.max_depth`.
    #[error("document nests deeper than the limit of {limit} levels")]
    TooDeep { limit: usize },

    /// The JSON text itself nests past serde_json's recursion limit.
    #[error("document nests too deeply to parse as JSON")]
    JsonTooDeep,

    /// A heading carries a negative level and clamping is disabled.
    #[error("invalid heading level {0}")]
    InvalidHeadingLevel(i64),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
