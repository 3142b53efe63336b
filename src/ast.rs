//! SVG document tree.

/// Elements whose character data is rendered.
pub const TEXT_ELEMENTS: &[&str] = &["text", "tspan", "textPath", "title", "desc", "style"];

/// A complete SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// XML declaration (e.g., `<?xml version="1.0" encoding="UTF-8"?>`)
    pub xml_declaration: Option<XmlDeclaration>,
    /// DOCTYPE declaration, without the `<!DOCTYPE` / `>` delimiters
    pub doctype: Option<String>,
    /// The root SVG element
    pub root: Element,
}

/// XML declaration attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

/// An SVG/XML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element name with optional prefix (e.g., "svg", "svg:defs")
    pub name: QName,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
    /// Child nodes, owned exclusively by this element
    pub children: Vec<Node>,
}

/// A qualified name (possibly with namespace prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Parse a qualified name from a string like "prefix:local" or just "local".
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((prefix, local)) => Self::with_prefix(prefix, local),
            None => Self::new(s),
        }
    }

    /// Compare against a full name without allocating.
    pub fn matches(&self, full: &str) -> bool {
        match &self.prefix {
            None => self.local == full,
            Some(p) => full
                .strip_prefix(p.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
                .is_some_and(|local| local == self.local),
        }
    }

    /// Get the full name as a string.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QName::parse(name),
            value: value.into(),
        }
    }
}

/// A node in the SVG tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
    /// A processing instruction (e.g., `<?xml-stylesheet ... ?>`)
    ProcessingInstruction {
        target: String,
        content: Option<String>,
    },
}

impl Node {
    /// The full element name, or `None` for anything that isn't an element.
    pub fn name(&self) -> Option<String> {
        match self {
            Node::Element(e) => Some(e.name.full_name()),
            _ => None,
        }
    }

    /// True if this is an element whose full name is `name`.
    pub fn is_element_named(&self, name: &str) -> bool {
        matches!(self, Node::Element(e) if e.name.matches(name))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(elem)
    }
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: QName::parse(name),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Get an attribute value by local name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.local == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name.matches(name)) {
            attr.value = value.into();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Check if this element has a specific local name.
    pub fn is(&self, name: &str) -> bool {
        self.name.local == name
    }

    /// Whitespace inside this element is content and must be kept verbatim.
    /// Descendants inherit this.
    pub fn starts_text_context(&self) -> bool {
        TEXT_ELEMENTS.contains(&self.name.local.as_str())
            || self
                .attributes
                .iter()
                .any(|a| a.name.matches("xml:space") && a.value == "preserve")
    }

    /// Iterate over child elements only (skip text, comments, etc.).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterate over child elements mutably.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Names of the direct children, `None` for non-element nodes.
    pub fn child_names(&self) -> Vec<Option<String>> {
        self.children.iter().map(Node::name).collect()
    }
}

impl Document {
    /// Wrap a root element into a document without prolog.
    pub fn new(root: Element) -> Self {
        Self {
            xml_declaration: None,
            doctype: None,
            root,
        }
    }

    /// Recursively visit all elements in the document, parents first.
    pub fn for_each_element(&self, mut f: impl FnMut(&Element)) {
        fn visit(elem: &Element, f: &mut impl FnMut(&Element)) {
            f(elem);
            for child in elem.child_elements() {
                visit(child, f);
            }
        }
        visit(&self.root, &mut f);
    }
}
