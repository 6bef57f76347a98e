//! Recomposing a WXR archive from a split directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{
    validate_pad_width, ComposeOptions, HtmlLayout, CONTENT_SUFFIX, EXCERPT_SUFFIX,
    HEADER_FILE_NAME, XML_DIR,
};
use crate::error::{Error, Result};
use crate::item::{namespace_declarations, Item, Namespaces};
use crate::naming::{companion_path, overlong_post_id, sort_key_for_path};
use crate::sanitize::MetaReport;
use crate::storage::{is_not_found, Storage};
use crate::xml::{parse_document, parse_element, Element, Node};

/// Outcome of a compose run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeSummary {
    /// Item files discovered
    pub found: usize,
    /// Items written to the archive
    pub included: usize,
    /// Items left out by the post type allow-list
    pub filtered: usize,
    /// HTML companion files that were expected but absent
    pub missing_companions: usize,
    /// Metadata removed across all items
    pub meta: MetaReport,
}

/// A recomposed archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Serialized WXR document
    pub xml: String,
    /// What went into it
    pub summary: ComposeSummary,
}

/// Rebuilds the archive stored in `in_dir`.
///
/// Reads `Header.xml`, then every item file (`{type}-{id}[.{name}].xml`) from
/// `in_dir`, or from `in_dir/xml` in split layout, in sort key order. HTML
/// companions are merged back into `content:encoded` and `excerpt:encoded`;
/// missing companions leave the field empty. Items pass the allow-list,
/// metadata cleanup, and are appended to the channel.
///
/// # Errors
///
/// Returns [`Error::MissingHeader`] if the header is absent, [`Error::Xml`] or
/// [`Error::Malformed`] if the header or any item file does not parse, and
/// [`Error::Io`] for other read failures. No partial archive is produced.
pub fn compose_directory<S: Storage>(
    in_dir: &Path,
    storage: &S,
    options: &ComposeOptions,
) -> Result<Composition> {
    validate_pad_width(options.pad_width)?;

    let header_path = in_dir.join(HEADER_FILE_NAME);
    let header = storage.read_to_string(&header_path).map_err(|err| {
        if is_not_found(&err) {
            Error::MissingHeader {
                path: header_path.clone(),
            }
        } else {
            err
        }
    })?;
    let mut document = parse_document(&header).map_err(|err| err.with_path(&header_path))?;

    let declarations = namespace_declarations(&document.root);
    let files = item_files(in_dir, storage, options)?;
    debug!("Input: {} files", files.len());

    let mut summary = ComposeSummary {
        found: files.len(),
        ..ComposeSummary::default()
    };
    let mut items = Vec::with_capacity(files.len());

    for path in files {
        debug!("Read: {}", path.display());

        let xml = storage.read_to_string(&path)?;
        let element = parse_element(&xml).map_err(|err| err.with_path(&path))?;
        let ns =
            Namespaces::from_declarations(declarations.iter().chain(&element.attributes));
        let mut item = Item::new(element, ns);

        if options.layout == HtmlLayout::Split {
            summary.missing_companions += merge_companions(&mut item, &path, storage)?;
        }
        item.normalize_rich_text();

        let post_type = item.post_type_or_unknown();
        if !options.accepts(&post_type) {
            debug!("filtered out {} ({post_type})", path.display());
            summary.filtered += 1;
            continue;
        }

        if !options.strip_prefixes.is_empty() {
            summary
                .meta
                .merge(item.strip_meta_by_prefix(&options.strip_prefixes));
        }
        summary.meta.merge(item.drop_duplicate_meta());

        item.drop_inherited_namespaces(&declarations);
        items.push(item.into_element());
    }

    let channel = document
        .root
        .child_mut("channel")
        .ok_or_else(|| Error::malformed("no <channel> element").with_path(&header_path))?;
    summary.included = items.len();
    append_items(channel, items);

    info!(
        "composed {} of {} items ({} filtered)",
        summary.included, summary.found, summary.filtered
    );
    Ok(Composition {
        xml: document.to_xml_string(),
        summary,
    })
}

/// Item files of the directory, ordered by sort key.
fn item_files<S: Storage>(
    in_dir: &Path,
    storage: &S,
    options: &ComposeOptions,
) -> Result<Vec<PathBuf>> {
    let dir = match options.layout {
        HtmlLayout::Split => in_dir.join(XML_DIR),
        HtmlLayout::Combined => in_dir.to_path_buf(),
    };

    let listed = match storage.list_files(&dir) {
        Ok(listed) => listed,
        Err(err) if is_not_found(&err) => {
            warn!("{}: no such directory, no items to compose", dir.display());
            Vec::new()
        }
        Err(err) => return Err(err),
    };

    let mut keyed: Vec<(String, PathBuf)> = listed
        .into_iter()
        .filter_map(|path| sort_key_for_path(&path, options.pad_width).map(|key| (key, path)))
        .collect();

    for (_, path) in &keyed {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if let Some(id) = overlong_post_id(stem, options.pad_width) {
            warn!(
                "{}: post id {id} is wider than {} digits and may sort out of order",
                path.display(),
                options.pad_width
            );
        }
    }

    keyed.sort();
    Ok(keyed.into_iter().map(|(_, path)| path).collect())
}

/// Loads the HTML companions of `xml_path` into `item`.
///
/// Returns how many companions were missing.
fn merge_companions<S: Storage>(
    item: &mut Item,
    xml_path: &Path,
    storage: &S,
) -> Result<usize> {
    let mut missing = 0;

    let fields: [(&str, &str, fn(&mut Item, &str) -> bool); 2] = [
        (CONTENT_SUFFIX, "content:encoded", Item::set_content),
        (EXCERPT_SUFFIX, "excerpt:encoded", Item::set_excerpt),
    ];

    for (suffix, field, set_field) in fields {
        let html_path = companion_path(xml_path, suffix);
        let body = match storage.read_to_string(&html_path) {
            Ok(body) => body,
            Err(err) if is_not_found(&err) => {
                debug!(
                    "could not find: {} (XML: {})",
                    html_path.display(),
                    xml_path.display()
                );
                missing += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        if !set_field(item, &body) && !body.is_empty() {
            debug!(
                "{}: no {field} element to receive {}",
                xml_path.display(),
                html_path.display()
            );
        }
    }

    Ok(missing)
}

/// Appends `items` to the end of `channel`, one per line.
///
/// The whitespace before the last child of the channel (normally the marker
/// comment) is reused as indentation; trailing whitespace stays last.
fn append_items(channel: &mut Element, items: Vec<Element>) {
    let closing = if channel.children.last().is_some_and(Node::is_whitespace) {
        channel.children.pop()
    } else {
        None
    };
    let indent = channel
        .children
        .iter()
        .rev()
        .find(|node| node.is_whitespace())
        .cloned()
        .unwrap_or_else(|| Node::Text("\n".to_string()));

    for item in items {
        channel.children.push(indent.clone());
        channel.children.push(Node::Element(item));
    }
    if let Some(closing) = closing {
        channel.children.push(closing);
    }
}
