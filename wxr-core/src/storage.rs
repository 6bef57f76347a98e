//! File access used by the pipelines.
//!
//! The split and compose pipelines never touch `std::fs` directly; they go
//! through [`Storage`] so they can run against [`MemoryFs`] in tests.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Read, write and list operations on a tree of text files.
pub trait Storage {
    /// Reads a whole file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file is missing or unreadable. A missing
    /// file carries [`io::ErrorKind::NotFound`].
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Creates or truncates a file and writes `contents` to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;

    /// Creates a directory and its missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be created.
    fn create_dir_all(&mut self, path: &Path) -> Result<()>;

    /// Lists the regular files directly inside `dir`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be read.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Returns `true` if `err` reports a missing file.
pub fn is_not_found(err: &Error) -> bool {
    matches!(err, Error::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
}

/// [`Storage`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Storage for LocalFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| Error::io(path, source))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|source| Error::io(path, source))
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|source| Error::io(path, source))
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|source| Error::io(dir, source))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::io(dir, source))?;
            let file_type = entry
                .file_type()
                .map_err(|source| Error::io(entry.path(), source))?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }
}

/// In-memory [`Storage`].
///
/// Directories exist implicitly once a file is written below them or they
/// are created explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, String>,
    dirs: Vec<PathBuf>,
}

impl MemoryFs {
    /// Creates an empty file tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous contents.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Removes a file, returning its contents.
    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.files.remove(path)
    }

    /// Returns the contents of a file.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// All file paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    fn dir_exists(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d.starts_with(dir))
            || self.files.keys().any(|f| f.starts_with(dir))
    }
}

impl Storage for MemoryFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            Error::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            )
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        if !self.dirs.iter().any(|d| d == path) {
            self.dirs.push(path.to_path_buf());
        }
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !self.dir_exists(dir) {
            return Err(Error::io(
                dir,
                io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            ));
        }

        Ok(self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }
}
