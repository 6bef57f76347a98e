//! Cleanup of `wp:postmeta` entries.
//!
//! Both passes take the children of an `<item>` and return a new sequence;
//! nodes that are not metadata entries pass through untouched and keep their
//! order. A removed entry takes the whitespace text node right after it along,
//! so the remaining markup keeps one line per element. When the removed entries
//! end the sequence, the whitespace before them goes instead, so the closing
//! tag keeps its indentation.
//!
//! Keyless entries (no `wp:meta_key` element) are removed by
//! [`drop_duplicates`] but left alone by [`strip_by_prefix`].

use tracing::debug;

use crate::item::Namespaces;
use crate::xml::{Element, Node};

/// What a cleanup pass removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaReport {
    /// Keys of entries dropped because the key was seen earlier
    pub duplicates: Vec<String>,
    /// Number of entries dropped for lacking a key
    pub keyless: usize,
    /// Keys of entries dropped because of a matching prefix
    pub stripped: Vec<String>,
}

impl MetaReport {
    /// Total number of removed entries.
    pub fn removed(&self) -> usize {
        self.duplicates.len() + self.keyless + self.stripped.len()
    }

    /// Adds the counts of `other` to `self`.
    pub fn merge(&mut self, other: MetaReport) {
        self.duplicates.extend(other.duplicates);
        self.keyless += other.keyless;
        self.stripped.extend(other.stripped);
    }
}

/// Keeps the first entry for every key and drops entries without a key.
pub fn drop_duplicates(children: Vec<Node>, ns: &Namespaces) -> (Vec<Node>, MetaReport) {
    let mut report = MetaReport::default();
    let mut seen: Vec<String> = Vec::new();

    let kept = retain_entries(children, ns, |key| match key {
        None => {
            debug!("removed metadata entry without meta_key");
            report.keyless += 1;
            false
        }
        Some(key) if seen.contains(&key) => {
            debug!("removed duplicate: {key}");
            report.duplicates.push(key);
            false
        }
        Some(key) => {
            seen.push(key);
            true
        }
    });

    (kept, report)
}

/// Drops entries whose key starts with any of `prefixes`.
pub fn strip_by_prefix<S: AsRef<str>>(
    children: Vec<Node>,
    ns: &Namespaces,
    prefixes: &[S],
) -> (Vec<Node>, MetaReport) {
    let mut report = MetaReport::default();
    if prefixes.is_empty() {
        return (children, report);
    }

    let kept = retain_entries(children, ns, |key| match key {
        Some(key) if prefixes.iter().any(|p| key.starts_with(p.as_ref())) => {
            debug!("removed metadata: {key}");
            report.stripped.push(key);
            false
        }
        _ => true,
    });

    (kept, report)
}

/// Rebuilds `children`, asking `keep` about every `wp:postmeta` element.
fn retain_entries<F>(children: Vec<Node>, ns: &Namespaces, mut keep: F) -> Vec<Node>
where
    F: FnMut(Option<String>) -> bool,
{
    let postmeta = ns.wp("postmeta");
    let meta_key = ns.wp("meta_key");

    let mut kept = Vec::with_capacity(children.len());
    let mut drop_tail = false;
    // Whitespace after the latest removal while nothing has been kept since
    let mut tail: Option<Option<Node>> = None;

    for node in children {
        if std::mem::take(&mut drop_tail) && node.is_whitespace() {
            tail = Some(Some(node));
            continue;
        }

        if let Node::Element(element) = &node {
            if element.name == postmeta {
                let key = element.child(&meta_key).map(Element::text);
                if !keep(key) {
                    drop_tail = true;
                    tail = Some(None);
                    continue;
                }
            }
        }

        tail = None;
        kept.push(node);
    }

    if let Some(tail) = tail {
        if kept.last().is_some_and(Node::is_whitespace) {
            kept.pop();
        }
        kept.extend(tail);
    }

    kept
}
