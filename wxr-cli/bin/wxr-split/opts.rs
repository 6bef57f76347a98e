//! Command line argument parsing for the wxr-split utility.

use std::path::PathBuf;

use clap::Parser;

use wxr_cli::CliConfig;
use wxr_core::HtmlLayout;

/// Split a WordPress WXR export into per-item files
///
/// Writes `Header.xml` with the channel envelope plus one XML file per item
/// carrying a `wp:post_id`, named `{post_type}-{post_id}[.{post_name}].xml`.
/// Unless `--combined-xml-html` is given, item XML goes under `xml/` and the
/// post content and excerpt under `html/`.
#[derive(Debug, Parser)]
#[command(name = "wxr-split", version = "0.1.1")]
pub struct SplitOpts {
    /// WXR export file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory receiving the header and item files
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Report every item written or skipped
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Suppress notices; specify twice to suppress errors too
    #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Overwrite a previous split in OUTPUT_DIR
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Keep content and excerpt inside the item XML files
    #[arg(short = 'c', long = "combined-xml-html")]
    combined: bool,

    /// Drop Divi page builder metadata (keys starting with `_et_` or `et_`)
    #[arg(short = 's', long = "strip-divi")]
    strip_divi: bool,

    /// Drop metadata whose key starts with PREFIX (repeatable)
    #[arg(long = "strip-prefix", value_name = "PREFIX")]
    strip_prefix: Vec<String>,
}

impl SplitOpts {
    /// Parse command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Build CLI configuration from the parsed options
    pub fn config(&self) -> CliConfig {
        CliConfig {
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
            ..CliConfig::default()
        }
    }
}
