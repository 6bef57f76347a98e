//! File system checks and output handling for the WXR CLI.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use wxr_core::config::HEADER_FILE_NAME;

use crate::config::{DEFAULT_BUFFER_SIZE, STDOUT_PATH};
use crate::error::{Error, Result};

/// Returns `true` if `path` selects standard output.
pub fn is_stdout(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str().is_empty() || p == Path::new(STDOUT_PATH))
}

/// Opens an output writer for the given path or stdout.
///
/// `None`, an empty path and `-` all select stdout.
///
/// # Errors
///
/// Returns [`Error::OutputExists`] if the file exists and `force` is `false`,
/// and [`Error::CreateOutput`] if it cannot be created.
pub fn open_output(path: Option<&Path>, force: bool) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if !is_stdout(Some(path)) => {
            check_output_free(path, force)?;
            let file = File::create(path).map_err(|source| Error::CreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(io::BufWriter::with_capacity(
                DEFAULT_BUFFER_SIZE,
                file,
            )))
        }
        _ => Ok(Box::new(io::BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            io::stdout(),
        ))),
    }
}

/// Fails if `path` exists and may not be overwritten.
///
/// # Errors
///
/// Returns [`Error::OutputExists`] when `path` exists and `force` is `false`.
pub fn check_output_free(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Checks that `dir` is a directory holding a header file.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] or [`Error::MissingHeader`].
pub fn check_input_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    if !dir.join(HEADER_FILE_NAME).is_file() {
        return Err(Error::MissingHeader {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Checks that a split may write into `out_dir` and returns the header path.
///
/// The directory may be missing. An existing header means a previous split
/// landed there; it is only replaced with `force`.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] if `out_dir` is a file and
/// [`Error::OutputExists`] for an existing header without `force`.
pub fn check_split_target(out_dir: &Path, force: bool) -> Result<PathBuf> {
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(Error::NotADirectory {
            path: out_dir.to_path_buf(),
        });
    }
    let header = out_dir.join(HEADER_FILE_NAME);
    check_output_free(&header, force)?;
    Ok(header)
}

/// Writes `contents` to `output` and flushes it.
///
/// # Errors
///
/// Returns [`Error::WriteOutput`] naming `path` (stdout when `None`).
pub fn write_output(mut output: impl Write, contents: &str, path: Option<&Path>) -> Result<()> {
    output
        .write_all(contents.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|source| Error::WriteOutput {
            path: path.filter(|p| !is_stdout(Some(*p))).map(Path::to_path_buf),
            source,
        })
}
