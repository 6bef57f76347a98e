//! Shared functionality for the `wxr-split` and `wxr-compose` command-line tools.
//!
//! The binaries parse their options with `clap`, turn them into a
//! [`CliConfig`] and hand over to [`run_split`] or [`run_compose`], which check
//! the file system, drive the `wxr-core` pipelines against the local disk and
//! report failures as [`InvocationError`]s.

pub mod config;
pub mod error;
pub mod io;
pub mod process;


pub use config::{CliConfig, DEFAULT_BUFFER_SIZE, STDOUT_PATH};
pub use error::{format_error_for_stderr, Error, InvocationError, Result};
pub use io::{check_input_dir, check_output_free, check_split_target, open_output};
pub use process::{compose_archive, init_logging, run_compose, run_split, split_archive};
