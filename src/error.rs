//! Pipeline error taxonomy.
//!
//! Fatal errors abort the running stage; per-file problems (encoding, parse)
//! are normally recovered as skips inside the extractor and only show up here
//! when a caller asks for them explicitly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or unreadable path. Fatal when it is a stage's root input.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File bytes could not be decoded to text even after fallback.
    #[error("undecodable text in {path}")]
    Encoding { path: PathBuf },

    /// File decoded but is not valid JSON even under the lenient parser.
    #[error("malformed content in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Configuration problem. Warnings by default; fatal under strict mode
    /// or when the config itself is unusable (bad regex, unreadable file).
    #[error("configuration error: {0}")]
    Config(String),

    /// The compiled catalog could not be read. Always fatal for injection.
    #[error("unreadable catalog {path}: {message}")]
    CatalogFormat { path: PathBuf, message: String },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
