//! Error types for WXR CLI operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use wxr_core::config::{HEADER_FILE_NAME, MAX_PAD_WIDTH};

/// Main error type for WXR CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Split or compose pipeline failure
    #[error(transparent)]
    Core(#[from] wxr_core::Error),

    /// Output file already exists
    #[error("{}: Output file already exists, use --force to overwrite", path.display())]
    OutputExists {
        /// Path to the existing file
        path: PathBuf,
    },

    /// Path exists but is not a directory
    #[error("{}: Not a directory", path.display())]
    NotADirectory {
        /// Offending path
        path: PathBuf,
    },

    /// Input directory lacks the header document
    #[error("{}: No {HEADER_FILE_NAME} in directory", path.display())]
    MissingHeader {
        /// Input directory
        path: PathBuf,
    },

    /// Failed to create the output file
    #[error("{}: {source}", path.display())]
    CreateOutput {
        /// Path to the output file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to write the composed archive
    #[error("{}: {source}", display_output(path.as_deref()))]
    WriteOutput {
        /// Output file, or `None` for stdout
        path: Option<PathBuf>,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Pad width outside the accepted range
    #[error("Invalid pad width {width}: must be between 1 and {max}", max = MAX_PAD_WIDTH)]
    InvalidPadWidth {
        /// Rejected width
        width: usize,
    },
}

/// Specialized `Result` type for WXR CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A failed run of one of the binaries.
///
/// Carries the program name so the message printed on stderr reads
/// `<program>: <path>: <message>`.
#[derive(Debug)]
pub struct InvocationError {
    /// Program name to prefix in error output (e.g. "wxr-split").
    pub program: String,
    /// Underlying error produced by processing.
    pub source: Error,
}

impl InvocationError {
    /// Wraps `source` for `program`.
    pub fn new(program: impl Into<String>, source: impl Into<Error>) -> Self {
        Self {
            program: program.into(),
            source: source.into(),
        }
    }
}

impl std::fmt::Display for InvocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.program, self.source)
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Formats an error message for stderr, respecting `-qq`.
///
/// Returns `None` when `quiet` is 2 or more.
pub fn format_error_for_stderr(quiet: u8, err: &InvocationError) -> Option<String> {
    if quiet >= 2 {
        return None;
    }
    Some(err.to_string())
}

fn display_output(path: Option<&Path>) -> String {
    path.map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string())
}
