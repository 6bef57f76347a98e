//! Typed view over a WXR `<item>` element.

use crate::naming::Identity;
use crate::sanitize::{self, MetaReport};
use crate::xml::{Attribute, Element};

/// Namespace URI of the `wp:` elements (WXR 1.2).
pub const WP_NAMESPACE: &str = "http://wordpress.org/export/1.2/";

/// Namespace URI of `content:encoded`.
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Namespace URI of `excerpt:encoded` (WXR 1.2).
pub const EXCERPT_NAMESPACE: &str = "http://wordpress.org/export/1.2/excerpt/";

/// Post type used for items that carry no `wp:post_type`.
pub const UNKNOWN_POST_TYPE: &str = "unknown";

const WP_NAMESPACE_BASE: &str = "http://wordpress.org/export/";

/// Prefixes bound to the WXR namespaces in a given document.
///
/// Lookups go by qualified name, so the prefixes actually declared by the
/// archive are resolved once from its `xmlns:*` attributes. Older WXR
/// versions (`export/1.0/`, `export/1.1/`) are recognized too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    wp: String,
    content: String,
    excerpt: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            wp: "wp".to_string(),
            content: "content".to_string(),
            excerpt: "excerpt".to_string(),
        }
    }
}

impl Namespaces {
    /// Resolves prefixes from the declarations on `element`, falling back to
    /// `wp`, `content` and `excerpt`.
    pub fn from_element(element: &Element) -> Self {
        Self::from_declarations(&element.attributes)
    }

    /// Resolves prefixes from a list of attributes; later declarations of the
    /// same namespace win.
    pub fn from_declarations<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = &'a Attribute>,
    {
        let mut ns = Self::default();
        for attr in attributes {
            let Some(prefix) = attr.name.strip_prefix("xmlns:") else {
                continue;
            };
            let uri = attr.value.as_str();
            if uri == CONTENT_NAMESPACE {
                ns.content = prefix.to_string();
            } else if uri.starts_with(WP_NAMESPACE_BASE) {
                if uri.ends_with("/excerpt/") {
                    ns.excerpt = prefix.to_string();
                } else {
                    ns.wp = prefix.to_string();
                }
            }
        }
        ns
    }

    /// Qualified name of a `wp:` element.
    pub fn wp(&self, local: &str) -> String {
        format!("{}:{local}", self.wp)
    }

    /// Qualified name of `content:encoded`.
    pub fn content_encoded(&self) -> String {
        format!("{}:encoded", self.content)
    }

    /// Qualified name of `excerpt:encoded`.
    pub fn excerpt_encoded(&self) -> String {
        format!("{}:encoded", self.excerpt)
    }
}

/// One `wp:postmeta` entry as read from an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEntry {
    /// `wp:meta_key`, or `None` when the element is missing
    pub key: Option<String>,
    /// `wp:meta_value`, or `None` when the element is missing
    pub value: Option<String>,
}

/// A WXR item together with the namespace prefixes of its archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    element: Element,
    ns: Namespaces,
}

impl Item {
    /// Wraps an `<item>` element.
    pub fn new(element: Element, ns: Namespaces) -> Self {
        Self { element, ns }
    }

    /// Returns the underlying element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Consumes the view and returns the element.
    pub fn into_element(self) -> Element {
        self.element
    }

    fn field(&self, name: &str) -> Option<String> {
        self.element.child(name).map(Element::text)
    }

    /// `wp:post_type`, if present.
    pub fn post_type(&self) -> Option<String> {
        self.field(&self.ns.wp("post_type"))
    }

    /// `wp:post_type`, or [`UNKNOWN_POST_TYPE`] when the element is missing.
    pub fn post_type_or_unknown(&self) -> String {
        self.post_type()
            .unwrap_or_else(|| UNKNOWN_POST_TYPE.to_string())
    }

    /// `wp:post_id`, trimmed; blank ids count as absent.
    pub fn post_id(&self) -> Option<String> {
        self.field(&self.ns.wp("post_id"))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
    }

    /// `wp:post_name`, if present and not empty.
    pub fn post_name(&self) -> Option<String> {
        self.field(&self.ns.wp("post_name"))
            .filter(|name| !name.is_empty())
    }

    /// Identity used to name this item on disk, or `None` without a post id.
    pub fn identity(&self) -> Option<Identity> {
        let post_id = self.post_id()?;
        Some(Identity::new(
            self.post_type_or_unknown(),
            post_id,
            self.post_name(),
        ))
    }

    /// Text of `content:encoded`, if the element exists.
    pub fn content(&self) -> Option<String> {
        self.field(&self.ns.content_encoded())
    }

    /// Text of `excerpt:encoded`, if the element exists.
    pub fn excerpt(&self) -> Option<String> {
        self.field(&self.ns.excerpt_encoded())
    }

    /// Replaces the body of `content:encoded`.
    ///
    /// Returns `false` when the item has no such element; nothing is added.
    pub fn set_content(&mut self, value: &str) -> bool {
        let name = self.ns.content_encoded();
        self.set_rich_text(&name, value)
    }

    /// Replaces the body of `excerpt:encoded`.
    ///
    /// Returns `false` when the item has no such element; nothing is added.
    pub fn set_excerpt(&mut self, value: &str) -> bool {
        let name = self.ns.excerpt_encoded();
        self.set_rich_text(&name, value)
    }

    fn set_rich_text(&mut self, name: &str, value: &str) -> bool {
        match self.element.child_mut(name) {
            Some(element) => {
                element.set_cdata(value);
                true
            }
            None => false,
        }
    }

    /// Rewrites both rich-text fields as CDATA, keeping their text.
    pub fn normalize_rich_text(&mut self) {
        if let Some(content) = self.content() {
            self.set_content(&content);
        }
        if let Some(excerpt) = self.excerpt() {
            self.set_excerpt(&excerpt);
        }
    }

    /// Metadata entries in document order.
    pub fn meta_entries(&self) -> Vec<MetaEntry> {
        let postmeta = self.ns.wp("postmeta");
        let meta_key = self.ns.wp("meta_key");
        let meta_value = self.ns.wp("meta_value");

        self.element
            .elements()
            .filter(|e| e.name == postmeta)
            .map(|e| MetaEntry {
                key: e.child(&meta_key).map(Element::text),
                value: e.child(&meta_value).map(Element::text),
            })
            .collect()
    }

    /// Removes repeated and keyless metadata entries. See [`sanitize::drop_duplicates`].
    pub fn drop_duplicate_meta(&mut self) -> MetaReport {
        let children = std::mem::take(&mut self.element.children);
        let (children, report) = sanitize::drop_duplicates(children, &self.ns);
        self.element.children = children;
        report
    }

    /// Removes metadata whose key starts with one of `prefixes`.
    /// See [`sanitize::strip_by_prefix`].
    pub fn strip_meta_by_prefix<S: AsRef<str>>(&mut self, prefixes: &[S]) -> MetaReport {
        let children = std::mem::take(&mut self.element.children);
        let (children, report) = sanitize::strip_by_prefix(children, &self.ns, prefixes);
        self.element.children = children;
        report
    }

    /// Adds the given namespace declarations that the item does not declare itself.
    pub fn declare_namespaces(&mut self, declarations: &[Attribute]) {
        let missing: Vec<Attribute> = declarations
            .iter()
            .filter(|decl| self.element.attribute(&decl.name).is_none())
            .cloned()
            .collect();
        if !missing.is_empty() {
            let own = std::mem::take(&mut self.element.attributes);
            self.element.attributes = missing.into_iter().chain(own).collect();
        }
    }

    /// Removes declarations identical to the given (inherited) ones.
    pub fn drop_inherited_namespaces(&mut self, declarations: &[Attribute]) {
        self.element
            .attributes
            .retain(|attr| !declarations.contains(attr));
    }
}

/// The `xmlns` and `xmlns:*` attributes of `element`.
pub fn namespace_declarations(element: &Element) -> Vec<Attribute> {
    element
        .attributes
        .iter()
        .filter(|attr| attr.name == "xmlns" || attr.name.starts_with("xmlns:"))
        .cloned()
        .collect()
}
