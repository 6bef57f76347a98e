//! Serialization of the owned tree through `quick_xml::Writer`.

use std::borrow::Cow;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Document, Element, Node};

pub(super) fn document_to_string(document: &Document) -> String {
    let mut writer = Writer::new(Vec::new());
    for node in &document.prolog {
        write_node(&mut writer, node);
    }
    write_element(&mut writer, &document.root);
    for node in &document.epilog {
        write_node(&mut writer, node);
    }
    into_string(writer)
}

pub(super) fn element_to_string(element: &Element) -> String {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, element);
    into_string(writer)
}

fn into_string(writer: Writer<Vec<u8>>) -> String {
    // Every fragment written came from a `&str`.
    String::from_utf8(writer.into_inner())
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        let value = quote_safe(&attr.value);
        start.push_attribute((attr.name.as_bytes(), value.as_bytes()));
    }

    if element.self_closing && element.children.is_empty() {
        emit(writer, Event::Empty(start));
        return;
    }

    emit(writer, Event::Start(start));
    for child in &element.children {
        write_node(writer, child);
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())));
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) {
    match node {
        Node::Element(element) => write_element(writer, element),
        Node::Text(raw) => emit(writer, Event::Text(BytesText::from_escaped(raw.as_str()))),
        Node::CData(data) => emit(writer, Event::CData(BytesCData::new(data.as_str()))),
        Node::Comment(body) => emit(writer, Event::Comment(BytesText::from_escaped(body.as_str()))),
        Node::ProcessingInstruction(body) => {
            emit(writer, Event::PI(BytesText::from_escaped(body.as_str())));
        }
        Node::DocType(body) => emit(writer, Event::DocType(BytesText::from_escaped(body.as_str()))),
        Node::Declaration(decl) => emit(
            writer,
            Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )),
        ),
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) {
    // Writing into a `Vec<u8>` cannot fail.
    let _ = writer.write_event(event);
}

/// Attributes are always written with double quotes; a raw value that came
/// from a single-quoted attribute may still contain `"`.
fn quote_safe(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}
