//! File naming and ordering of item files.
//!
//! An item file is called `{post_type}-{post_id}[.{post_name}].xml`. Sorting
//! those names as plain strings would put `post-12` before `post-2`, so the
//! ordering key left-pads the post id with zeroes: `post-0000000002` sorts
//! before `post-0000000012`, and the type prefix keeps items of one type
//! together. Ids longer than the pad width are left as they are and may sort
//! out of numeric order.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::{HEADER_FILE_NAME, HTML_DIR, XML_DIR, XML_EXTENSION};

/// The `(post_type, post_id, post_name)` triple naming an item on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    /// `wp:post_type`, e.g. `post`, `page`, `attachment`
    pub post_type: String,
    /// `wp:post_id` as written in the archive
    pub post_id: String,
    /// `wp:post_name`; never `Some("")`
    pub post_name: Option<String>,
}

impl Identity {
    /// Creates an identity; an empty `post_name` counts as absent.
    pub fn new(
        post_type: impl Into<String>,
        post_id: impl Into<String>,
        post_name: Option<String>,
    ) -> Self {
        Self {
            post_type: post_type.into(),
            post_id: post_id.into(),
            post_name: post_name.filter(|name| !name.is_empty()),
        }
    }

    /// File name without extension, e.g. `post-12.hello-world`.
    pub fn file_base_name(&self) -> String {
        match &self.post_name {
            Some(name) => format!("{}-{}.{}", self.post_type, self.post_id, name),
            None => format!("{}-{}", self.post_type, self.post_id),
        }
    }

    /// File name of the item XML, e.g. `post-12.hello-world.xml`.
    pub fn file_name(&self) -> String {
        format!("{}.{XML_EXTENSION}", self.file_base_name())
    }

    /// Ordering key; agrees with [`sort_key_for_stem`] on [`Self::file_base_name`].
    pub fn sort_key(&self, width: usize) -> String {
        sort_key_for_stem(&self.file_base_name(), width)
    }
}

/// Builds the ordering key from a file stem.
///
/// The stem is cut at its first `-` into the type and the rest, and the rest
/// at its first `.` into the id and the name. The id is left-padded with `0`
/// to `width` characters.
pub fn sort_key_for_stem(stem: &str, width: usize) -> String {
    let Some((post_type, rest)) = stem.split_once('-') else {
        return stem.to_string();
    };
    let (post_id, name) = match rest.split_once('.') {
        Some((id, name)) => (id, Some(name)),
        None => (rest, None),
    };

    let mut key = format!("{post_type}-{post_id:0>width$}");
    if let Some(name) = name {
        key.push('.');
        key.push_str(name);
    }
    key
}

/// Returns the id part of a file stem when it is wider than `width`.
///
/// Such names still sort, but no longer in numeric order.
pub fn overlong_post_id(stem: &str, width: usize) -> Option<&str> {
    let (_, rest) = stem.split_once('-')?;
    let post_id = rest.split_once('.').map_or(rest, |(id, _)| id);
    (post_id.len() > width).then_some(post_id)
}

/// Returns `true` for names of the form `*-*.xml` other than the header.
pub fn is_item_file_name(name: &str) -> bool {
    if name == HEADER_FILE_NAME {
        return false;
    }
    let Some(stem) = name.strip_suffix(".xml") else {
        return false;
    };
    stem.contains('-')
}

/// Ordering key for an item file path, or `None` if the name is not an item name.
pub fn sort_key_for_path(path: &Path, width: usize) -> Option<String> {
    let name = path.file_name().and_then(OsStr::to_str)?;
    if !is_item_file_name(name) {
        return None;
    }
    let stem = name.strip_suffix(".xml")?;
    Some(sort_key_for_stem(stem, width))
}

/// Path of an HTML companion of an item XML file.
///
/// `suffix` replaces the `.xml` extension. When the XML file lives in an
/// `xml/` directory the companion goes to the sibling `html/` directory,
/// otherwise next to the XML file.
pub fn companion_path(xml_path: &Path, suffix: &str) -> PathBuf {
    let name = xml_path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    let stem = name.strip_suffix(".xml").unwrap_or(name);
    let file_name = format!("{stem}{suffix}");

    let parent = xml_path.parent().unwrap_or_else(|| Path::new(""));
    match (parent.file_name(), parent.parent()) {
        (Some(dir), Some(grandparent)) if dir == XML_DIR => {
            grandparent.join(HTML_DIR).join(file_name)
        }
        _ => parent.join(file_name),
    }
}
