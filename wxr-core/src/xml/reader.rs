//! Event-driven construction of the owned tree.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

use super::{Attribute, Declaration, Document, Element, Node};

/// Parses a complete document, keeping comments and CDATA sections.
///
/// # Errors
///
/// Returns [`Error::Xml`] for syntax errors reported by quick-xml (including
/// mismatched end tags) and [`Error::Malformed`] when the document has no root,
/// several roots, or elements left open at end of input.
pub fn parse_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false).check_end_names(true);
    let decoder = reader.decoder();

    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut root: Option<Element> = None;
    let mut open: Vec<Element> = Vec::new();

    loop {
        let node = match reader.read_event()? {
            Event::Start(start) => {
                open.push(element_from_start(&start, decoder, false)?);
                continue;
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| Error::malformed("closing tag without matching opening tag"))?;
                Node::Element(element)
            }
            Event::Empty(start) => Node::Element(element_from_start(&start, decoder, true)?),
            Event::Text(text) => Node::Text(decoder.decode(&text)?.into_owned()),
            Event::CData(data) => Node::CData(decoder.decode(&data)?.into_owned()),
            Event::Comment(comment) => Node::Comment(decoder.decode(&comment)?.into_owned()),
            Event::PI(pi) => Node::ProcessingInstruction(decoder.decode(&pi)?.into_owned()),
            Event::DocType(doctype) => Node::DocType(decoder.decode(&doctype)?.into_owned()),
            Event::Decl(decl) => Node::Declaration(declaration(&decl, decoder)?),
            Event::Eof => break,
        };

        if let Some(parent) = open.last_mut() {
            parent.children.push(node);
            continue;
        }

        match node {
            Node::Element(element) => {
                if root.is_some() {
                    return Err(Error::malformed("document has more than one root element"));
                }
                root = Some(element);
            }
            other if root.is_none() => prolog.push(other),
            other => epilog.push(other),
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(Error::malformed(format!(
            "element <{}> is not closed",
            unclosed.name
        )));
    }

    let root = root.ok_or_else(|| Error::malformed("document has no root element"))?;
    Ok(Document {
        prolog,
        root,
        epilog,
    })
}

/// Parses a document and returns only its root element.
///
/// Used for item files, whose root is the `<item>` itself.
///
/// # Errors
///
/// Same as [`parse_document`].
pub fn parse_element(xml: &str) -> Result<Element> {
    parse_document(xml).map(|document| document.root)
}

fn element_from_start(
    start: &BytesStart<'_>,
    decoder: Decoder,
    self_closing: bool,
) -> Result<Element> {
    let name = decoder.decode(start.name().as_ref())?.into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        attributes.push(Attribute::new(
            decoder.decode(attr.key.as_ref())?,
            decoder.decode(&attr.value)?,
        ));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        self_closing,
    })
}

fn declaration(decl: &BytesDecl<'_>, decoder: Decoder) -> Result<Declaration> {
    let version = decoder.decode(&decl.version()?)?.into_owned();
    let encoding = match decl.encoding() {
        Some(value) => Some(decoder.decode(&value?)?.into_owned()),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(value) => Some(decoder.decode(&value?)?.into_owned()),
        None => None,
    };

    Ok(Declaration {
        version,
        encoding,
        standalone,
    })
}
