//! Command line argument parsing for the wxr-compose utility.

use std::path::PathBuf;

use clap::Parser;

use wxr_cli::{CliConfig, Error};
use wxr_core::config::{validate_pad_width, DEFAULT_PAD_WIDTH};
use wxr_core::HtmlLayout;

/// Recompose a WordPress WXR export from a split directory
///
/// Reads `Header.xml` and the item files produced by `wxr-split` from
/// INPUT_DIR, merges the HTML bodies back, and writes a single archive with the
/// items ordered by post type and numeric post id.
#[derive(Debug, Parser)]
#[command(name = "wxr-compose", version = "0.1.1")]
pub struct ComposeOpts {
    /// Directory containing Header.xml and the item files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output file; standard output when omitted or `-`
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Report every file read and every missing HTML body
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Suppress notices; specify twice to suppress errors too
    #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Overwrite OUTPUT_FILE if it exists
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Only include items of this post type (repeatable)
    #[arg(short = 'i', long = "include", value_name = "TYPE")]
    include: Vec<String>,

    /// Item files carry their own content and excerpt (no xml/ and html/)
    #[arg(short = 'c', long = "combined-xml-html")]
    combined: bool,

    /// Drop Divi page builder metadata (keys starting with `_et_` or `et_`)
    #[arg(short = 's', long = "strip-divi")]
    strip_divi: bool,

    /// Drop metadata whose key starts with PREFIX (repeatable)
    #[arg(long = "strip-prefix", value_name = "PREFIX")]
    strip_prefix: Vec<String>,

    /// Zero-pad width of post ids when ordering items
    #[arg(long = "pad-width", value_name = "N", default_value_t = DEFAULT_PAD_WIDTH)]
    pad_width: usize,
}

impl ComposeOpts {
    /// Parse command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Build CLI configuration from the parsed options
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPadWidth`] when the core rejects the pad width.
    pub fn config(&self) -> Result<CliConfig, Error> {
        validate_pad_width(self.pad_width).map_err(|_| Error::InvalidPadWidth {
            width: self.pad_width,
        })?;

        Ok(CliConfig {
            verbose: self.verbose,
            quiet: self.quiet,
            force: self.force,
            layout: if self.combined {
                HtmlLayout::Combined
            } else {
                HtmlLayout::Split
            },
            strip_divi: self.strip_divi,
            strip_prefixes: self.strip_prefix.clone(),
            include: self.include.clone(),
            pad_width: self.pad_width,
        })
    }
}
