//! A minimal order-preserving XML element tree.
//!
//! The database rewrite has to keep every element, attribute, and comment
//! it does not touch, and insert new children at exact positions, so the
//! whole document is held in memory. Whitespace-only text is dropped at
//! parse time and regenerated as 4-space indentation on write.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_owned(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element with a single text child, `<name>text</name>`. An empty
    /// text child is kept, which stops the writer from collapsing the
    /// element to a short tag.
    pub fn with_text(name: &str, text: &str) -> Self {
        let mut element = Element::new(name);
        element.children.push(Node::Text(text.to_owned()));
        element
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attrs.push((key.to_owned(), value.to_owned()));
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// All child elements with the given name, in document order.
    pub fn child_elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter_map(move |node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Concatenated text directly under this element.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text of the first child element with the given name, or empty.
    pub fn child_text(&self, name: &str) -> String {
        self.child(name).map(|element| element.text()).unwrap_or_default()
    }

    /// Insert `child` directly after the first child element named
    /// `after`, or at the end if no such element exists.
    pub fn insert_after(&mut self, after: &str, child: Element) {
        let position = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(element) if element.name == after));

        match position {
            Some(index) => self.children.insert(index + 1, Node::Element(child)),
            None => self.children.push(Node::Element(child)),
        }
    }
}

/// Parse a document into its root element. Returns `None` for a document
/// without one.
pub fn parse(input: &str) -> Result<Option<Element>, quick_xml::Error> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                let content = text.unescape()?.into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(content));
                }
            }
            Event::CData(data) => {
                let content = String::from_utf8_lossy(&data).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(content));
                }
            }
            Event::Comment(comment) => {
                let content = String::from_utf8_lossy(&comment).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Comment(content));
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    Ok(root)
}

fn element_from_start(start: &BytesStart) -> Result<Element, quick_xml::Error> {
    let mut element = Element::new(&String::from_utf8_lossy(start.name().as_ref()));

    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attrs.push((key, value));
    }

    Ok(element)
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Serialize a document with an XML declaration and 4-space indentation.
/// Childless elements collapse to short tags; an empty text child keeps
/// the open/close pair.
pub fn to_xml(root: &Element) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(element) => write_element(writer, element)?,
            Node::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            Node::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}
