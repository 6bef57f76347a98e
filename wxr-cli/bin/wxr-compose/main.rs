//! WXR archive composer
//!
//! Rebuilds a single WordPress export from a directory written by
//! `wxr-split`, optionally keeping only some post types.

use std::process;

mod opts;

use opts::ComposeOpts;

use wxr_cli::{format_error_for_stderr, init_logging, run_compose};

const PROGRAM_NAME: &str = "wxr-compose";

fn main() -> std::io::Result<()> {
    let opts = ComposeOpts::parse();

    let config = match opts.config() {
        Ok(config) => config,
        Err(err) => {
            if opts.quiet < 2 {
                eprintln!("{PROGRAM_NAME}: {err}");
            }
            process::exit(1);
        }
    };
    init_logging(&config);

    if let Err(err) = run_compose(
        &opts.input_dir,
        opts.output.as_deref(),
        &config,
        PROGRAM_NAME,
    ) {
        if let Some(msg) = format_error_for_stderr(config.quiet, &err) {
            eprintln!("{msg}");
        }
        process::exit(1);
    }

    Ok(())
}
