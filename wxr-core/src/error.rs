//! Error types and result handling for WXR split and compose operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias using the crate-level [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Every fatal failure mode of the split and compose pipelines.
///
/// Non-fatal conditions (items without a post id, keyless metadata, missing
/// companion HTML files) never surface here; they are reported through
/// `tracing` and counted in the run summaries instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading, writing or listing a path failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The XML reader rejected the input.
    #[error("{}: malformed XML: {source}", display_origin(path.as_deref()))]
    Xml {
        /// File the XML came from, if known
        path: Option<PathBuf>,
        /// Error reported by quick-xml
        #[source]
        source: quick_xml::Error,
    },

    /// The XML was well-formed but does not have the expected shape.
    #[error("{}: {message}", display_origin(path.as_deref()))]
    Malformed {
        /// File the XML came from, if known
        path: Option<PathBuf>,
        /// What was wrong
        message: String,
    },

    /// The header document is absent from the input directory.
    #[error("{}: header file not found", path.display())]
    MissingHeader {
        /// Expected location of the header file
        path: PathBuf,
    },

    /// Invalid option supplied by the caller.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Builds an [`Error::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds an [`Error::Malformed`] without a file origin.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::Malformed {
            path: None,
            message: message.into(),
        }
    }

    /// Attaches the originating file to XML errors that do not carry one yet.
    #[must_use]
    pub fn with_path(self, origin: &Path) -> Self {
        match self {
            Error::Xml { path: None, source } => Error::Xml {
                path: Some(origin.to_path_buf()),
                source,
            },
            Error::Malformed {
                path: None,
                message,
            } => Error::Malformed {
                path: Some(origin.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(source: quick_xml::Error) -> Self {
        Error::Xml { path: None, source }
    }
}

fn display_origin(path: Option<&Path>) -> String {
    path.map_or_else(|| "(input)".to_string(), |p| p.display().to_string())
}
