//! Error type shared by the library.

use std::path::PathBuf;

/// Everything that can go wrong while loading, exporting or rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File could not be opened, created or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// CSV tokenising or serialisation failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// The input table lacks a required column.
    #[error("missing required column `{0}`")]
    MissingColumn(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The drawing backend rejected a primitive.
    #[error("render error: {0}")]
    Render(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
