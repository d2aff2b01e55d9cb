//! XML parser that builds [`XmlDocument`] trees.

use crate::{Error, Result, XmlAttribute, XmlChild, XmlChildren, XmlDocument, XmlElement};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Parse XML from a string.
///
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// skipped. Exactly one root element is required.
///
/// ```rust
/// use rfcmark_xml::parse;
///
/// let xml = parse("<reference><front/></reference>").unwrap();
/// assert_eq!(xml.root.name, "reference");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn parse(content: &str) -> Result<XmlDocument> {
    XmlParser::new(content).parse()
}

struct XmlParser<'a> {
    source: &'a str,
    reader: Reader<&'a [u8]>,
    /// Elements that have been opened but not closed yet.
    stack: Vec<BuildNode>,
}

/// An element under construction.
struct BuildNode {
    name: String,
    prefix: Option<String>,
    attributes: Vec<XmlAttribute>,
    /// Offset of the `<` of the start tag.
    start_offset: usize,
    children: Vec<XmlChild>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            source,
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlDocument> {
        let mut root: Option<XmlElement> = None;

        loop {
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => self.handle_start(&e, event_start)?,
                Ok(Event::End(e)) => {
                    let element = self.handle_end(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.handle_empty(&e, event_start)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => self.handle_text(&e, event_start)?,
                Ok(Event::CData(e)) => self.handle_cdata(&e, event_start),
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position() as usize),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", node.name),
                position: node.start_offset,
            });
        }

        let root = root.ok_or(Error::EmptyDocument)?;
        Ok(XmlDocument {
            root,
            span: 0..self.source.len(),
        })
    }

    /// Hand a finished element to its parent, or make it the root.
    fn attach(&mut self, element: XmlElement, root: &mut Option<XmlElement>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(XmlChild::Element(element)),
            None if root.is_some() => {
                return Err(Error::MultipleRoots {
                    position: element.span.start,
                });
            }
            None => *root = Some(element),
        }
        Ok(())
    }

    fn handle_start(&mut self, e: &BytesStart<'_>, event_start: usize) -> Result<()> {
        let (name, prefix) = split_name(e.name().as_ref());
        let attributes = parse_attributes(e, event_start)?;

        self.stack.push(BuildNode {
            name,
            prefix,
            attributes,
            start_offset: event_start,
            children: Vec::new(),
        });
        Ok(())
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) -> Result<XmlElement> {
        let (end_name, _) = split_name(e.name().as_ref());

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
        })?;

        if node.name != end_name {
            return Err(Error::MismatchedEndTag {
                expected: node.name,
                found: end_name,
                position: node.start_offset,
            });
        }

        let end_offset = self.reader.buffer_position() as usize;
        Ok(XmlElement {
            name: node.name,
            prefix: node.prefix,
            attributes: node.attributes,
            children: finalize_children(node.children),
            span: node.start_offset..end_offset,
        })
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>, event_start: usize) -> Result<XmlElement> {
        let (name, prefix) = split_name(e.name().as_ref());
        let attributes = parse_attributes(e, event_start)?;
        let end_offset = self.reader.buffer_position() as usize;

        Ok(XmlElement {
            name,
            prefix,
            attributes,
            children: XmlChildren::Empty,
            span: event_start..end_offset,
        })
    }

    fn handle_text(&mut self, e: &BytesText<'_>, event_start: usize) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(event_start),
        })?;
        let end_offset = self.reader.buffer_position() as usize;

        // Text outside the root element is ignored.
        if let Some(node) = self.stack.last_mut() {
            node.children.push(XmlChild::Text {
                content: text.into_owned(),
                span: event_start..end_offset,
            });
        }
        Ok(())
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>, event_start: usize) {
        let text = String::from_utf8_lossy(e.as_ref()).into_owned();
        let end_offset = self.reader.buffer_position() as usize;

        if let Some(node) = self.stack.last_mut() {
            node.children.push(XmlChild::Text {
                content: text,
                span: event_start..end_offset,
            });
        }
    }
}

fn split_name(raw: &[u8]) -> (String, Option<String>) {
    let full_name = String::from_utf8_lossy(raw).into_owned();
    match full_name.split_once(':') {
        Some((prefix, local)) => (local.to_string(), Some(prefix.to_string())),
        None => (full_name, None),
    }
}

fn parse_attributes(e: &BytesStart<'_>, tag_start: usize) -> Result<Vec<XmlAttribute>> {
    let mut attributes = Vec::new();

    for attr_result in e.attributes() {
        let attr = attr_result?;
        let (name, prefix) = split_name(attr.key.as_ref());
        let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid attribute value: {}", err),
            position: Some(tag_start),
        })?;

        attributes.push(XmlAttribute {
            name,
            prefix,
            value: value.into_owned(),
        });
    }

    Ok(attributes)
}

/// Pick the tightest [`XmlChildren`] representation for the collected children.
fn finalize_children(children: Vec<XmlChild>) -> XmlChildren {
    let has_elements = children.iter().any(|c| matches!(c, XmlChild::Element(_)));

    // Indentation between elements carries no meaning.
    let children: Vec<XmlChild> = if has_elements {
        children.into_iter().filter(|c| !c.is_blank_text()).collect()
    } else {
        children
    };

    if children.is_empty() {
        return XmlChildren::Empty;
    }

    if children.iter().all(|c| matches!(c, XmlChild::Element(_))) {
        let elements = children
            .into_iter()
            .filter_map(|c| match c {
                XmlChild::Element(e) => Some(e),
                XmlChild::Text { .. } => None,
            })
            .collect();
        return XmlChildren::Elements(elements);
    }

    if !has_elements {
        // Adjacent text and CDATA runs collapse into one text node.
        let start = children.first().map_or(0, child_start);
        let end = children.last().map_or(0, child_end);
        let content: String = children
            .into_iter()
            .filter_map(|c| match c {
                XmlChild::Text { content, .. } => Some(content),
                XmlChild::Element(_) => None,
            })
            .collect();
        return XmlChildren::Text {
            content,
            span: start..end,
        };
    }

    XmlChildren::Mixed(children)
}

fn child_start(child: &XmlChild) -> usize {
    match child {
        XmlChild::Element(e) => e.span.start,
        XmlChild::Text { span, .. } => span.start,
    }
}

fn child_end(child: &XmlChild) -> usize {
    match child {
        XmlChild::Element(e) => e.span.end,
        XmlChild::Text { span, .. } => span.end,
    }
}
