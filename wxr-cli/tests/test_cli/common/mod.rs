use std::fs;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};


pub use data::{generate_archive, HELLO_WORLD_CONTENT, SAMPLE_ARCHIVE};

/// Returns the path of one of the binaries of this package.
///
/// # Panics
///
/// Panics if `name` is not a binary of this package.
fn binary_path(name: &str) -> &'static str {
    match name {
        "wxr-split" => env!("CARGO_BIN_EXE_wxr-split"),
        "wxr-compose" => env!("CARGO_BIN_EXE_wxr-compose"),
        other => panic!("unknown binary '{other}'"),
    }
}

/// Output from running a binary command
#[derive(Debug, Eq, PartialEq)]
pub struct Output {
    pub status: ExitStatus,
    pub stdout_raw: Vec<u8>,
    pub stdout: String,
    pub stderr: String,
}

/// Shared test fixture utilities to keep filesystem interactions isolated
pub struct Fixture {
    root_dir: tempfile::TempDir,
}

impl Fixture {
    /// Create an empty fixture
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            root_dir: tempfile::TempDir::new().unwrap(),
        }
    }

    /// Create fixture with single file
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created or if the fixture file
    /// cannot be written.
    pub fn with_file(name: &str, contents: &[u8]) -> Self {
        let fixture = Self::new();
        fixture.write(name, contents);
        fixture
    }

    /// Get full path for a file in the fixture
    pub fn path(&self, name: &str) -> String {
        format!("{}/{}", self.root_dir.path().display(), name)
    }

    /// Write a file, creating parent directories as needed
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, contents: &[u8]) {
        let path = self.root_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Read a file of the fixture as text
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root_dir.path().join(name))
            .unwrap_or_else(|err| panic!("cannot read {name}: {err}"))
    }

    /// Remove a file from the fixture
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be removed.
    pub fn remove_file(&self, name: &str) {
        fs::remove_file(self.root_dir.path().join(name)).unwrap();
    }

    /// Check if a file exists in the fixture
    pub fn file_exists(&self, name: &str) -> bool {
        self.root_dir.path().join(name).exists()
    }

    /// Sorted names of the files directly inside `dir`
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be read.
    pub fn list(&self, dir: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root_dir.path().join(dir))
            .unwrap()
            .flatten()
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn root_dir_path(&self) -> &Path {
        self.root_dir.path()
    }

    /// Run a cargo binary with the specified arguments
    pub async fn run_cargo(&mut self, name: &str, args: &[&str]) -> Output {
        self.run_with_env(name, args, &[]).await
    }

    /// Run a cargo binary with extra environment variables
    ///
    /// `RUST_LOG` is cleared unless given in `envs`, so log levels only depend
    /// on the command line.
    ///
    /// # Panics
    ///
    /// Panics if the process cannot be spawned or awaited.
    pub async fn run_with_env(
        &mut self,
        name: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> Output {
        let bin_path = PathBuf::from(binary_path(name));
        let output = tokio::process::Command::new(&bin_path)
            .args(args)
            .current_dir(self.root_dir.path())
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .unwrap();

        Output {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            stdout_raw: output.stdout,
        }
    }
}
