//! Configuration shared by the `wxr-split` and `wxr-compose` binaries.

use wxr_core::config::{DEFAULT_PAD_WIDTH, DIVI_META_PREFIXES};
use wxr_core::{ComposeOptions, HtmlLayout, SplitOptions};

/// Default buffer size for the composed output stream
pub const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Output path that stands for standard output
pub const STDOUT_PATH: &str = "-";

/// Configuration for CLI operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CliConfig {
    /// Report per-item notices
    pub verbose: bool,
    /// Quiet level: 1 hides notices, 2 hides errors as well
    pub quiet: u8,
    /// Overwrite existing output
    pub force: bool,
    /// Keep rich text inside the item XML instead of HTML companions
    pub layout: HtmlLayout,
    /// Drop Divi page builder metadata
    pub strip_divi: bool,
    /// Extra metadata key prefixes to drop
    pub strip_prefixes: Vec<String>,
    /// Post types to recompose; empty keeps all
    pub include: Vec<String>,
    /// Zero-pad width of post ids when ordering item files
    pub pad_width: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            quiet: 0,
            force: false,
            layout: HtmlLayout::Split,
            strip_divi: false,
            strip_prefixes: Vec::new(),
            include: Vec::new(),
            pad_width: DEFAULT_PAD_WIDTH,
        }
    }
}

impl CliConfig {
    /// Metadata key prefixes to strip, explicit ones first.
    pub fn all_strip_prefixes(&self) -> Vec<String> {
        let mut prefixes = self.strip_prefixes.clone();
        if self.strip_divi {
            for prefix in DIVI_META_PREFIXES {
                if !prefixes.iter().any(|p| p == prefix) {
                    prefixes.push(prefix.to_string());
                }
            }
        }
        prefixes
    }

    /// Options for the split pipeline.
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions::default()
            .with_layout(self.layout)
            .with_strip_prefixes(self.all_strip_prefixes())
    }

    /// Options for the compose pipeline.
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            layout: self.layout,
            include: self.include.clone(),
            strip_prefixes: self.all_strip_prefixes(),
            pad_width: self.pad_width,
        }
    }

    /// Default log filter directive when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet > 0 {
            "error"
        } else {
            "warn"
        }
    }
}
