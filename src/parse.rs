//! SVG parsing from XML.

use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesStart, Event};

use crate::ast::*;
use crate::error::{Result, SvgsortError};

/// Parse an SVG string into a Document.
///
/// Inside text-content elements (and under `xml:space="preserve"`) text is
/// kept byte for byte. Elsewhere whitespace-only text is dropped and other
/// text is trimmed; layout there is the serializer's job.
/// Anything after the root element's end tag is ignored.
pub fn parse_svg(svg: &str) -> Result<Document> {
    let mut reader = Reader::from_str(svg);

    let mut xml_declaration = None;
    let mut doctype = None;
    let mut open: Vec<Element> = Vec::new();
    // Parallel to `open`: whether each open element is in a text context.
    let mut in_text: Vec<bool> = Vec::new();
    let mut root = None;

    while root.is_none() {
        match reader.read_event()? {
            Event::Decl(decl) if open.is_empty() => {
                xml_declaration = Some(parse_declaration(&decl)?);
            }
            Event::DocType(dt) if open.is_empty() => {
                doctype = Some(String::from_utf8_lossy(&dt).trim().to_string());
            }
            Event::Start(start) => {
                let elem = parse_element_start(&start)?;
                let inherited = in_text.last().copied().unwrap_or(false);
                in_text.push(inherited || elem.starts_text_context());
                open.push(elem);
            }
            Event::Empty(start) => {
                let elem = parse_element_start(&start)?;
                attach(&mut open, &mut root, Node::Element(elem));
            }
            Event::End(_) => {
                let elem = open
                    .pop()
                    .ok_or_else(|| SvgsortError::InvalidSvg("Unmatched end tag".into()))?;
                in_text.pop();
                attach(&mut open, &mut root, Node::Element(elem));
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if in_text.last().copied().unwrap_or(false) {
                    push_child(&mut open, Node::Text(text.into_owned()));
                } else if !text.trim().is_empty() {
                    push_child(&mut open, Node::Text(text.trim().to_string()));
                }
            }
            Event::Comment(comment) => {
                let comment = String::from_utf8_lossy(&comment).into_owned();
                push_child(&mut open, Node::Comment(comment));
            }
            Event::CData(cdata) => {
                let cdata = String::from_utf8_lossy(&cdata).into_owned();
                push_child(&mut open, Node::CData(cdata));
            }
            Event::PI(pi) => {
                let content = String::from_utf8_lossy(&pi).into_owned();
                let (target, rest) = match content.split_once(char::is_whitespace) {
                    Some((t, r)) => (t.to_string(), Some(r.trim().to_string())),
                    None => (content, None),
                };
                push_child(
                    &mut open,
                    Node::ProcessingInstruction {
                        target,
                        content: rest,
                    },
                );
            }
            Event::Eof if open.is_empty() => {
                return Err(SvgsortError::InvalidSvg("No root element found".into()));
            }
            Event::Eof => {
                return Err(SvgsortError::InvalidSvg("Unexpected end of file".into()));
            }
            _ => {}
        }
    }

    let Some(Node::Element(root)) = root else {
        return Err(SvgsortError::InvalidSvg("No root element found".into()));
    };

    Ok(Document {
        xml_declaration,
        doctype,
        root,
    })
}

/// Append a finished node to the innermost open element, or make it the root.
fn attach(open: &mut [Element], root: &mut Option<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

/// Like `attach`, but non-element nodes outside the root are dropped.
fn push_child(open: &mut [Element], node: Node) {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
    }
}

fn parse_declaration(decl: &BytesDecl) -> Result<XmlDeclaration> {
    Ok(XmlDeclaration {
        version: String::from_utf8_lossy(decl.version()?.as_ref()).into_owned(),
        encoding: decl
            .encoding()
            .transpose()
            .ok()
            .flatten()
            .map(|e| String::from_utf8_lossy(e.as_ref()).into_owned()),
        standalone: decl
            .standalone()
            .transpose()
            .ok()
            .flatten()
            .map(|s| s.as_ref() == b"yes"),
    })
}

fn parse_element_start(start: &BytesStart) -> Result<Element> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push(Attribute::new(key, value.into_owned()));
    }

    Ok(element)
}
