//! SVG serialization to XML, compact or pretty-printed.

use std::borrow::Cow;

use crate::ast::*;
use crate::config::Js2Svg;

/// Serialize a Document to an SVG string.
///
/// Pretty mode adds newlines and indentation between nodes, except inside
/// text-content elements and `xml:space="preserve"` subtrees, where children
/// are written exactly as stored.
pub fn serialize(doc: &Document, options: &Js2Svg) -> String {
    let mut w = Writer {
        out: String::new(),
        pretty: options.pretty,
        unit: options.indent.unit(),
    };

    if let Some(ref decl) = doc.xml_declaration {
        w.out.push_str("<?xml version=\"");
        w.out.push_str(&decl.version);
        w.out.push('"');
        if let Some(ref enc) = decl.encoding {
            w.out.push_str(" encoding=\"");
            w.out.push_str(enc);
            w.out.push('"');
        }
        if let Some(standalone) = decl.standalone {
            w.out.push_str(" standalone=\"");
            w.out.push_str(if standalone { "yes" } else { "no" });
            w.out.push('"');
        }
        w.out.push_str("?>");
        w.newline();
    }

    if let Some(ref dt) = doc.doctype {
        w.out.push_str("<!DOCTYPE ");
        w.out.push_str(dt);
        w.out.push('>');
        w.newline();
    }

    w.element(&doc.root, 0, false);
    w.newline();

    w.out
}

struct Writer<'a> {
    out: String,
    pretty: bool,
    unit: Cow<'a, str>,
}

impl Writer<'_> {
    fn newline(&mut self) {
        if self.pretty {
            self.out.push('\n');
        }
    }

    fn indent(&mut self, depth: usize) {
        if self.pretty {
            for _ in 0..depth {
                self.out.push_str(&self.unit);
            }
        }
    }

    fn element(&mut self, elem: &Element, depth: usize, in_text: bool) {
        let name = elem.name.full_name();
        self.out.push('<');
        self.out.push_str(&name);

        for attr in &elem.attributes {
            self.out.push(' ');
            self.out.push_str(&attr.name.full_name());
            self.out.push_str("=\"");
            push_escaped_attr(&mut self.out, &attr.value);
            self.out.push('"');
        }

        if elem.children.is_empty() {
            self.out.push_str("/>");
            return;
        }
        self.out.push('>');

        let in_text = in_text || elem.starts_text_context();
        // Text-only content stays on the tag's line as well.
        let inline = in_text || elem.children.iter().all(|n| matches!(n, Node::Text(_)));
        if inline {
            for child in &elem.children {
                self.node(child, depth + 1, true);
            }
        } else {
            for child in &elem.children {
                self.newline();
                self.indent(depth + 1);
                self.node(child, depth + 1, false);
            }
            self.newline();
            self.indent(depth);
        }

        self.out.push_str("</");
        self.out.push_str(&name);
        self.out.push('>');
    }

    fn node(&mut self, node: &Node, depth: usize, in_text: bool) {
        match node {
            Node::Element(elem) => self.element(elem, depth, in_text),
            Node::Text(text) => push_escaped_text(&mut self.out, text),
            Node::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment);
                self.out.push_str("-->");
            }
            Node::CData(data) => {
                self.out.push_str("<![CDATA[");
                self.out.push_str(data);
                self.out.push_str("]]>");
            }
            Node::ProcessingInstruction { target, content } => {
                self.out.push_str("<?");
                self.out.push_str(target);
                if let Some(c) = content {
                    self.out.push(' ');
                    self.out.push_str(c);
                }
                self.out.push_str("?>");
            }
        }
    }
}

fn push_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Indent;
    use crate::parse::parse_svg;

    fn compact() -> Js2Svg {
        Js2Svg {
            pretty: false,
            indent: Indent::Spaces(4),
        }
    }

    fn pretty(indent: Indent) -> Js2Svg {
        Js2Svg {
            pretty: true,
            indent,
        }
    }

    fn round_trip(svg: &str, options: &Js2Svg) -> String {
        serialize(&parse_svg(svg).unwrap(), options)
    }

    #[test]
    fn test_serialize_compact() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <rect width="10"/>
        </svg>"#;
        let doc = parse_svg(svg).unwrap();
        let out = serialize(&doc, &compact());
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="10"/></svg>"#
        );
    }

    #[test]
    fn test_serialize_pretty_indent() {
        let out = round_trip(
            r#"<svg><defs><circle r="1"/></defs><rect/></svg>"#,
            &pretty(Indent::Spaces(2)),
        );
        assert_eq!(
            out,
            "<svg>\n  <defs>\n    <circle r=\"1\"/>\n  </defs>\n  <rect/>\n</svg>\n"
        );
    }

    #[test]
    fn test_serialize_literal_indent() {
        let out = round_trip("<svg><g><rect/></g></svg>", &pretty(Indent::Literal("\t".into())));
        assert_eq!(out, "<svg>\n\t<g>\n\t\t<rect/>\n\t</g>\n</svg>\n");
    }

    #[test]
    fn test_serialize_text_kept_verbatim() {
        let svg = r#"<svg><text x="1">  a &lt; b  </text></svg>"#;
        assert_eq!(
            round_trip(svg, &pretty(Indent::Spaces(4))),
            "<svg>\n    <text x=\"1\">  a &lt; b  </text>\n</svg>\n"
        );
        assert_eq!(
            round_trip(svg, &compact()),
            r#"<svg><text x="1">  a &lt; b  </text></svg>"#
        );
    }

    #[test]
    fn test_serialize_mixed_text_content() {
        for svg in [
            "<svg><text>Hello <tspan>world</tspan></text></svg>",
            "<svg><text><tspan>a</tspan> <tspan>b</tspan></text></svg>",
            "<svg><text>a<tspan>b</tspan></text></svg>",
        ] {
            assert_eq!(round_trip(svg, &compact()), svg);
        }

        let out = round_trip(
            "<svg><g><text>a<tspan>b</tspan></text></g></svg>",
            &pretty(Indent::Spaces(2)),
        );
        assert_eq!(
            out,
            "<svg>\n  <g>\n    <text>a<tspan>b</tspan></text>\n  </g>\n</svg>\n"
        );
    }

    #[test]
    fn test_serialize_multiline_text_unchanged() {
        let svg = "<svg><text>\n  <tspan>one</tspan>\n  <tspan>two</tspan>\n</text></svg>";
        let out = round_trip(svg, &pretty(Indent::Spaces(2)));
        assert_eq!(
            out,
            "<svg>\n  <text>\n  <tspan>one</tspan>\n  <tspan>two</tspan>\n</text>\n</svg>\n"
        );
    }

    #[test]
    fn test_serialize_xml_space_preserve() {
        let svg = r#"<svg><g xml:space="preserve">  a   b  <rect/></g></svg>"#;
        assert_eq!(round_trip(svg, &compact()), svg);
        assert_eq!(
            round_trip(svg, &pretty(Indent::Spaces(2))),
            "<svg>\n  <g xml:space=\"preserve\">  a   b  <rect/></g>\n</svg>\n"
        );
    }

    #[test]
    fn test_serialize_max_indent_deep_nesting() {
        let mut root = Element::new("g");
        for _ in 0..50 {
            root = Element::new("g").with_child(root);
        }
        let out = serialize(&Document::new(root), &pretty(Indent::Spaces(u8::MAX)));
        let deepest = out.lines().map(|l| l.len() - l.trim_start().len()).max();
        assert_eq!(deepest, Some(50 * 255));
    }

    #[test]
    fn test_serialize_keeps_prolog_and_comments() {
        let svg = r#"<?xml version="1.0" standalone="no"?><svg><!-- note --><g/></svg>"#;
        let doc = parse_svg(svg).unwrap();
        let out = serialize(&doc, &compact());
        assert_eq!(
            out,
            r#"<?xml version="1.0" standalone="no"?><svg><!-- note --><g/></svg>"#
        );
    }

    #[test]
    fn test_serialize_escapes_attrs() {
        let doc = Document::new(Element::new("svg").with_attr("data-x", "a\"<b>&"));
        let out = serialize(&doc, &compact());
        assert_eq!(out, r#"<svg data-x="a&quot;&lt;b&gt;&amp;"/>"#);
    }
}
