//! Shared configuration primitives for the split and compose pipelines.

use crate::error::{Error, Result};

/// File name of the channel envelope written next to the item files.
pub const HEADER_FILE_NAME: &str = "Header.xml";

/// Subdirectory holding item XML files when HTML bodies are split out.
pub const XML_DIR: &str = "xml";

/// Subdirectory holding the separated HTML bodies.
pub const HTML_DIR: &str = "html";

/// Extension of item files.
pub const XML_EXTENSION: &str = "xml";

/// Suffix replacing `.xml` for the separated `content:encoded` body.
pub const CONTENT_SUFFIX: &str = "-content.html";

/// Suffix replacing `.xml` for the separated `excerpt:encoded` body.
pub const EXCERPT_SUFFIX: &str = "-excerpt.html";

/// Default zero-pad width of the numeric post id in sort keys.
pub const DEFAULT_PAD_WIDTH: usize = 10;

/// Largest accepted pad width; `u64::MAX` has 20 digits.
pub const MAX_PAD_WIDTH: usize = 20;

/// Metadata key prefixes written by the Divi page builder.
pub const DIVI_META_PREFIXES: [&str; 2] = ["_et_", "et_"];

/// Body of the comment left in the header where the items were.
pub const ITEMS_MARKER: &str = " items removed ";

/// Where the rich-text bodies of an item live on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlLayout {
    /// Item XML under `xml/`, bodies under `html/` as `-content.html` and
    /// `-excerpt.html` companions.
    #[default]
    Split,

    /// One self-contained XML file per item, next to the header.
    Combined,
}

/// Options for [`crate::split::split_document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// On-disk layout of the produced files.
    pub layout: HtmlLayout,
    /// Metadata key prefixes to remove from every item. Empty keeps all.
    pub strip_prefixes: Vec<String>,
}

impl SplitOptions {
    /// Selects the on-disk layout.
    #[must_use]
    pub fn with_layout(mut self, layout: HtmlLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Adds metadata key prefixes to strip.
    #[must_use]
    pub fn with_strip_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Adds the Divi page builder prefixes to the strip set.
    #[must_use]
    pub fn with_divi_stripped(self) -> Self {
        self.with_strip_prefixes(DIVI_META_PREFIXES)
    }
}

/// Options for [`crate::compose::compose_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// On-disk layout of the files being read.
    pub layout: HtmlLayout,
    /// Post types to keep. Empty keeps every item.
    pub include: Vec<String>,
    /// Metadata key prefixes to remove from every item. Empty keeps all.
    pub strip_prefixes: Vec<String>,
    /// Zero-pad width of the post id in sort keys.
    pub pad_width: usize,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            layout: HtmlLayout::default(),
            include: Vec::new(),
            strip_prefixes: Vec::new(),
            pad_width: DEFAULT_PAD_WIDTH,
        }
    }
}

impl ComposeOptions {
    /// Selects the on-disk layout.
    #[must_use]
    pub fn with_layout(mut self, layout: HtmlLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Restricts output to the given post types.
    #[must_use]
    pub fn with_include<I, S>(mut self, post_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(post_types.into_iter().map(Into::into));
        self
    }

    /// Adds metadata key prefixes to strip.
    #[must_use]
    pub fn with_strip_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Sets the sort key pad width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] unless `1 <= width <= MAX_PAD_WIDTH`.
    pub fn with_pad_width(mut self, width: usize) -> Result<Self> {
        validate_pad_width(width)?;
        self.pad_width = width;
        Ok(self)
    }

    /// Returns `true` when an item of `post_type` passes the allow-list.
    pub fn accepts(&self, post_type: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|t| t == post_type)
    }
}

/// Checks that a sort key pad width is usable.
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] for zero or widths above [`MAX_PAD_WIDTH`].
pub fn validate_pad_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_PAD_WIDTH {
        return Err(Error::InvalidOption(format!(
            "pad width must be between 1 and {MAX_PAD_WIDTH}, got {width}"
        )));
    }
    Ok(())
}
