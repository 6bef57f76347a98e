//! Owned, order-preserving XML tree built on `quick-xml`.
//!
//! The tree keeps everything a WXR round trip needs to reproduce: comments,
//! literal CDATA sections, the XML declaration and text in its original escaped
//! form. Nothing is reformatted, so a parsed document serializes back to the
//! same bytes apart from attribute quoting.

use std::borrow::Cow;

mod reader;
mod writer;


pub use reader::{parse_document, parse_element};

/// An attribute with its value kept in escaped source form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name, e.g. `xmlns:wp`
    pub name: String,
    /// Raw value, entity references left in place
    pub value: String,
}

impl Attribute {
    /// Creates an attribute from a name and an already escaped value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// XML declaration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// `version` pseudo-attribute
    pub version: String,
    /// `encoding` pseudo-attribute, if present
    pub encoding: Option<String>,
    /// `standalone` pseudo-attribute, if present
    pub standalone: Option<String>,
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Child element
    Element(Element),
    /// Character data, still escaped as in the source
    Text(String),
    /// Literal `<![CDATA[...]]>` section body
    CData(String),
    /// Comment body
    Comment(String),
    /// Processing instruction body
    ProcessingInstruction(String),
    /// `<?xml ...?>` declaration; only valid in a document prolog
    Declaration(Declaration),
    /// `<!DOCTYPE ...>` body; only valid in a document prolog
    DocType(String),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the element if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns `true` for text nodes made of XML whitespace only.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(text) if is_xml_whitespace(text))
    }
}

/// An element and its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written in the source, e.g. `wp:post_id`
    pub name: String,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
    /// Child nodes in source order
    pub children: Vec<Node>,
    /// Written as `<name/>`; only honored while `children` is empty
    pub self_closing: bool,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Returns the raw value of the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Iterates over child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Returns the first child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Returns the first child element called `name`.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|e| e.name == name)
    }

    /// Returns the concatenated character data of the direct children.
    ///
    /// Text nodes are unescaped; CDATA sections are taken literally. Text that
    /// cannot be unescaped (undeclared entities) is returned as written.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(raw) => out.push_str(&unescape_lossy(raw)),
                Node::CData(data) => out.push_str(data),
                _ => {}
            }
        }
        out
    }

    /// Replaces the children with `value` wrapped in CDATA.
    ///
    /// A `]]>` inside the value ends one section after `]]` and starts the next
    /// with `>`, which is how WordPress itself escapes it.
    pub fn set_cdata(&mut self, value: &str) {
        let mut sections = Vec::new();
        let mut rest = value;
        while let Some(pos) = rest.find("]]>") {
            sections.push(Node::CData(rest[..pos + 2].to_string()));
            rest = &rest[pos + 2..];
        }
        sections.push(Node::CData(rest.to_string()));

        self.children = sections;
        self.self_closing = false;
    }

    /// Serializes the element and its subtree.
    pub fn to_xml_string(&self) -> String {
        writer::element_to_string(self)
    }
}

/// A parsed document: prolog, one root element and trailing misc nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Declaration, doctype, comments and whitespace before the root
    pub prolog: Vec<Node>,
    /// Root element
    pub root: Element,
    /// Comments and whitespace after the root
    pub epilog: Vec<Node>,
}

impl Document {
    /// Serializes the whole document.
    pub fn to_xml_string(&self) -> String {
        writer::document_to_string(self)
    }
}

/// Whitespace as defined by the XML `S` production.
pub(crate) fn is_xml_whitespace(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::unescape(raw).unwrap_or(Cow::Borrowed(raw))
}
