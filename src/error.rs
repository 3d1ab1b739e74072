//! Error type shared by every pipeline operation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not find {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not find a {element} element in {}", path.display())]
    MissingElement { path: PathBuf, element: String },

    #[error("could not read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write to {}", path.display())]
    Unwritable { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("XML parsing error in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("JSON parsing error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid outline for glyph {code}: {message}")]
    Geometry { code: String, message: String },

    #[error("malformed font {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("{tool} is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("{command} exited with code {code:?}: {output}")]
    ToolFailure {
        command: String,
        code: Option<i32>,
        output: String,
    },
}

impl Error {
    /// True when a required input, or a required element inside it, is
    /// missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::MissingElement { .. })
    }

    /// True for every error caused by malformed structured input.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Xml { .. }
                | Error::Json { .. }
                | Error::Parse(_)
                | Error::Geometry { .. }
                | Error::MalformedInput { .. }
        )
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Read a whole text file, mapping failures onto NotFound / Unreadable.
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::read(path, e))
}

/// Write a whole file, mapping failures onto Unwritable / Io.
pub(crate) fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::NotFound => Error::Unwritable {
            path: path.to_path_buf(),
        },
        _ => Error::io(path, e),
    })
}
