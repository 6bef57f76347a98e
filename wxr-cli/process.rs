//! Split and compose workflows behind the command-line tools.

use std::path::Path;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wxr_core::{compose_directory, split_file, ComposeSummary, LocalFs, SplitSummary};

use crate::config::CliConfig;
use crate::error::{InvocationError, Result};
use crate::io::{
    check_input_dir, check_output_free, check_split_target, is_stdout, open_output, write_output,
};

/// Installs the stderr log subscriber for a binary.
///
/// `RUST_LOG` takes precedence over the level derived from `-v` and `-q`.
/// Does nothing if a subscriber is already installed.
pub fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Splits the archive at `input` into `out_dir`.
///
/// # Errors
///
/// Fails if `out_dir` already holds a header and `force` is not set, or if
/// the split pipeline fails.
pub fn split_archive(input: &Path, out_dir: &Path, config: &CliConfig) -> Result<SplitSummary> {
    let header = check_split_target(out_dir, config.force)?;
    if header.exists() {
        debug!("overwriting previous split in {}", out_dir.display());
    }
    debug!("Input: {}", input.display());

    let summary = split_file(input, out_dir, &mut LocalFs, &config.split_options())?;
    info!("Output: {}", summary.header.display());
    Ok(summary)
}

/// Recomposes the archive stored in `in_dir` and writes it to `output`.
///
/// `None` or `-` writes to stdout. The output file is only created once the
/// archive has been composed, so a failed run leaves no partial file.
///
/// # Errors
///
/// Fails if `in_dir` is not a split directory, if the output exists and
/// `force` is not set, or if composing or writing fails.
pub fn compose_archive(
    in_dir: &Path,
    output: Option<&Path>,
    config: &CliConfig,
) -> Result<ComposeSummary> {
    check_input_dir(in_dir)?;

    let output = output.filter(|path| !is_stdout(Some(*path)));
    if let Some(path) = output {
        check_output_free(path, config.force)?;
    }

    let composition = compose_directory(in_dir, &LocalFs, &config.compose_options())?;

    let writer = open_output(output, config.force)?;
    write_output(writer, &composition.xml, output)?;
    match output {
        Some(path) => info!("Output: {}", path.display()),
        None => info!("Output: (stdout)"),
    }

    Ok(composition.summary)
}

/// Runs [`split_archive`] on behalf of `program`.
///
/// # Errors
///
/// Returns the failure wrapped in an [`InvocationError`] naming `program`.
pub fn run_split(
    input: &Path,
    out_dir: &Path,
    config: &CliConfig,
    program: &str,
) -> std::result::Result<SplitSummary, InvocationError> {
    split_archive(input, out_dir, config).map_err(|err| InvocationError::new(program, err))
}

/// Runs [`compose_archive`] on behalf of `program`.
///
/// # Errors
///
/// Returns the failure wrapped in an [`InvocationError`] naming `program`.
pub fn run_compose(
    in_dir: &Path,
    output: Option<&Path>,
    config: &CliConfig,
    program: &str,
) -> std::result::Result<ComposeSummary, InvocationError> {
    compose_archive(in_dir, output, config).map_err(|err| InvocationError::new(program, err))
}
