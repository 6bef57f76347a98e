//! WXR archive splitter
//!
//! Breaks a WordPress export into a header file and one file group per item,
//! so the archive can be diffed, edited and recomposed with `wxr-compose`.

use std::process;

mod opts;

use opts::SplitOpts;

use wxr_cli::{format_error_for_stderr, init_logging, run_split};

const PROGRAM_NAME: &str = "wxr-split";

fn main() -> std::io::Result<()> {
    let opts = SplitOpts::parse();
    let config = opts.config();
    init_logging(&config);

    if let Err(err) = run_split(&opts.input, &opts.output_dir, &config, PROGRAM_NAME) {
        if let Some(msg) = format_error_for_stderr(config.quiet, &err) {
            eprintln!("{msg}");
        }
        process::exit(1);
    }

    Ok(())
}
