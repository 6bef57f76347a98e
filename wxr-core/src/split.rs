//! Splitting a WXR archive into a header file and per-item files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{
    HtmlLayout, SplitOptions, CONTENT_SUFFIX, EXCERPT_SUFFIX, HEADER_FILE_NAME, HTML_DIR,
    ITEMS_MARKER, XML_DIR,
};
use crate::error::{Error, Result};
use crate::item::{namespace_declarations, Item, Namespaces};
use crate::naming::{companion_path, Identity};
use crate::sanitize::MetaReport;
use crate::storage::Storage;
use crate::xml::{parse_document, Attribute, Document, Element, Node};

/// Outcome of a split run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// `<item>` elements found in the channel
    pub items: usize,
    /// Items left out for lacking a `wp:post_id`
    pub skipped: usize,
    /// Item XML files written, in document order
    pub written: Vec<PathBuf>,
    /// Location of the header file
    pub header: PathBuf,
    /// Metadata removed across all items
    pub meta: MetaReport,
}

/// The files produced for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemFiles {
    xml_path: PathBuf,
    xml: String,
    /// `(path, body)` of the content and excerpt companions in split layout
    html: Vec<(PathBuf, String)>,
}

/// Everything a split writes, computed before the first write.
#[derive(Debug)]
struct SplitPlan {
    header: String,
    items: Vec<ItemFiles>,
    summary: SplitSummary,
}

/// Reads `input` from `storage` and splits it into `out_dir`.
///
/// # Errors
///
/// See [`split_document`]; errors additionally carry the input path.
pub fn split_file<S: Storage>(
    input: &Path,
    out_dir: &Path,
    storage: &mut S,
    options: &SplitOptions,
) -> Result<SplitSummary> {
    let xml = storage.read_to_string(input)?;
    split_document(&xml, out_dir, storage, options).map_err(|err| err.with_path(input))
}

/// Splits a WXR document into `out_dir`.
///
/// Writes one file group per item carrying a `wp:post_id` and then the header
/// file, which is the document with its items replaced by a marker comment at
/// the end of the channel. Nothing is written unless the whole document parses.
///
/// # Errors
///
/// Returns [`Error::Xml`] or [`Error::Malformed`] if the document cannot be
/// parsed or has no `<channel>`, and [`Error::Io`] if any file cannot be written.
pub fn split_document<S: Storage>(
    xml: &str,
    out_dir: &Path,
    storage: &mut S,
    options: &SplitOptions,
) -> Result<SplitSummary> {
    let document = parse_document(xml)?;
    let plan = plan_split(document, out_dir, options)?;

    storage.create_dir_all(out_dir)?;
    if options.layout == HtmlLayout::Split {
        storage.create_dir_all(&out_dir.join(XML_DIR))?;
        storage.create_dir_all(&out_dir.join(HTML_DIR))?;
    }

    for files in &plan.items {
        debug!("Output: {}", files.xml_path.display());
        storage.write(&files.xml_path, &files.xml)?;
        for (path, body) in &files.html {
            storage.write(path, body)?;
        }
    }

    // The header goes last so its presence marks a finished split.
    storage.write(&plan.summary.header, &plan.header)?;

    info!(
        "split {} items: {} written, {} skipped",
        plan.summary.items,
        plan.summary.written.len(),
        plan.summary.skipped
    );
    Ok(plan.summary)
}

fn plan_split(
    mut document: Document,
    out_dir: &Path,
    options: &SplitOptions,
) -> Result<SplitPlan> {
    let ns = Namespaces::from_element(&document.root);
    let declarations = namespace_declarations(&document.root);

    let channel = document
        .root
        .child_mut("channel")
        .ok_or_else(|| Error::malformed("no <channel> element"))?;

    let (elements, closing) = detach_items(channel);
    channel.children.push(Node::Comment(ITEMS_MARKER.to_string()));
    if let Some(closing) = closing {
        channel.children.push(closing);
    }

    debug!("Input: {} items", elements.len());

    let mut summary = SplitSummary {
        items: elements.len(),
        header: out_dir.join(HEADER_FILE_NAME),
        ..SplitSummary::default()
    };
    let mut names: HashMap<String, usize> = HashMap::new();
    let mut items: Vec<ItemFiles> = Vec::with_capacity(elements.len());

    for element in elements {
        let mut item = Item::new(element, ns.clone());

        if !options.strip_prefixes.is_empty() {
            summary
                .meta
                .merge(item.strip_meta_by_prefix(&options.strip_prefixes));
        }

        let Some(identity) = item.identity() else {
            debug!("skipping item without post_id");
            summary.skipped += 1;
            continue;
        };

        summary.meta.merge(item.drop_duplicate_meta());

        let files = item_files(item, &identity, out_dir, options.layout, &declarations);
        if let Some(&index) = names.get(&identity.file_base_name()) {
            warn!(
                "{}: more than one item maps to this name, the last one wins",
                identity.file_name()
            );
            items[index] = files;
            continue;
        }

        names.insert(identity.file_base_name(), items.len());
        summary.written.push(files.xml_path.clone());
        items.push(files);
    }

    Ok(SplitPlan {
        header: document.to_xml_string(),
        items,
        summary,
    })
}

/// Removes the `<item>` children of `channel`, returning them in order.
///
/// The whitespace following each item goes with it. The whitespace after the
/// last item, which indents the closing `</channel>`, is returned separately.
/// Marker comments left by an earlier split are dropped the same way, so a
/// recomposed archive splits into the same header again.
fn detach_items(channel: &mut Element) -> (Vec<Element>, Option<Node>) {
    let mut items = Vec::new();
    let mut closing = None;
    let mut after_item = false;

    let children = std::mem::take(&mut channel.children);
    for node in children {
        if std::mem::take(&mut after_item) && node.is_whitespace() {
            closing = Some(node);
            continue;
        }
        match node {
            Node::Element(element) if element.name == "item" => {
                items.push(element);
                after_item = true;
                closing = None;
            }
            Node::Comment(text) if text == ITEMS_MARKER => {
                after_item = true;
                closing = None;
            }
            other => {
                closing = None;
                channel.children.push(other);
            }
        }
    }

    (items, closing)
}

fn item_files(
    mut item: Item,
    identity: &Identity,
    out_dir: &Path,
    layout: HtmlLayout,
    declarations: &[Attribute],
) -> ItemFiles {
    let mut html = Vec::new();

    let xml_path = match layout {
        HtmlLayout::Combined => {
            item.normalize_rich_text();
            out_dir.join(identity.file_name())
        }
        HtmlLayout::Split => {
            let xml_path = out_dir.join(XML_DIR).join(identity.file_name());

            let content = item.content().unwrap_or_default();
            let excerpt = item.excerpt().unwrap_or_default();
            item.set_content("");
            item.set_excerpt("");

            html.push((companion_path(&xml_path, CONTENT_SUFFIX), content));
            html.push((companion_path(&xml_path, EXCERPT_SUFFIX), excerpt));
            xml_path
        }
    };

    item.declare_namespaces(declarations);
    let mut xml = item.element().to_xml_string();
    xml.push('\n');

    ItemFiles {
        xml_path,
        xml,
        html,
    }
}
