//! All error types for the i18n-table crate.
//!
//! These are returned from all fallible operations (file discovery, parsing,
//! nesting, translation and writing).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid JSON in {}: {source}", path.display())]
    JsonFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid key `{0}`")]
    InvalidKey(String),

    #[error("key `{leaf}` is a value but `{nested}` uses it as a nested object")]
    KeyConflict { leaf: String, nested: String },

    #[error("invalid language code: {0}")]
    InvalidLanguage(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Wraps an I/O error together with the path it happened on.
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Wraps a JSON error together with the file it was read from.
    pub fn json_file(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::JsonFile {
            path: path.into(),
            source,
        }
    }
}
