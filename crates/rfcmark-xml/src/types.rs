//! Core types for span-tracked XML trees.

use std::ops::Range;

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// The root element of the document.
    pub root: XmlElement,

    /// Byte range of the whole input.
    pub span: Range<usize>,
}

/// An XML element.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any (e.g. "xi" in `<xi:include>`).
    pub prefix: Option<String>,

    pub attributes: Vec<XmlAttribute>,

    pub children: XmlChildren,

    /// Byte range from the opening `<` to the end of the closing tag.
    pub span: Range<usize>,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    /// The local name of the attribute (without namespace prefix).
    pub name: String,

    pub prefix: Option<String>,

    /// The attribute value, after unescaping XML entities.
    pub value: String,
}

/// Children of an XML element.
///
/// Whitespace-only text between child elements is not kept, so an element
/// that only contains indented children is `Elements`, not `Mixed`.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlChildren {
    /// Element contains only child elements.
    Elements(Vec<XmlElement>),

    /// Element contains only text content.
    Text {
        content: String,
        span: Range<usize>,
    },

    /// Element contains text and elements interleaved.
    Mixed(Vec<XmlChild>),

    Empty,
}

/// A single child in mixed content.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlChild {
    Element(XmlElement),
    Text {
        content: String,
        span: Range<usize>,
    },
}

impl XmlChild {
    /// Whether this child is text made only of whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, XmlChild::Text { content, .. } if content.trim().is_empty())
    }
}

impl XmlElement {
    /// Create an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            attributes: Vec::new(),
            children: XmlChildren::Empty,
            span: 0..0,
        }
    }

    /// Add an attribute, skipping it when the value is empty.
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.attributes.push(XmlAttribute::new(name, value));
        }
        self
    }

    /// Replace the content with text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children = XmlChildren::Text {
            content: text.into(),
            span: 0..0,
        };
        self
    }

    /// Append a child element, converting the content to `Elements` if needed.
    pub fn push_child(&mut self, child: XmlElement) {
        match &mut self.children {
            XmlChildren::Elements(elements) => elements.push(child),
            XmlChildren::Mixed(children) => children.push(XmlChild::Element(child)),
            XmlChildren::Text { content, span } => {
                let text = XmlChild::Text {
                    content: std::mem::take(content),
                    span: span.clone(),
                };
                self.children = XmlChildren::Mixed(vec![text, XmlChild::Element(child)]);
            }
            XmlChildren::Empty => self.children = XmlChildren::Elements(vec![child]),
        }
    }

    /// The name including its namespace prefix, as written in the source.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Get an attribute value by local name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.children, XmlChildren::Empty)
    }

    pub fn has_elements(&self) -> bool {
        matches!(&self.children, XmlChildren::Elements(e) if !e.is_empty())
    }

    /// Get text content, if this element contains only text.
    pub fn text(&self) -> Option<&str> {
        match &self.children {
            XmlChildren::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Get the first child element with the given name.
    pub fn get_child(&self, name: &str) -> Option<&XmlElement> {
        self.all_children().into_iter().find(|e| e.name == name)
    }

    /// Get child elements by name.
    pub fn get_children(&self, name: &str) -> Vec<&XmlElement> {
        self.all_children()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    /// Get all child elements, ignoring text in mixed content.
    pub fn all_children(&self) -> Vec<&XmlElement> {
        match &self.children {
            XmlChildren::Elements(elements) => elements.iter().collect(),
            XmlChildren::Mixed(children) => children
                .iter()
                .filter_map(|c| match c {
                    XmlChild::Element(e) => Some(e),
                    XmlChild::Text { .. } => None,
                })
                .collect(),
            XmlChildren::Text { .. } | XmlChildren::Empty => vec![],
        }
    }

    /// First non-blank text found directly inside this element, if any.
    pub fn stray_text(&self) -> Option<&str> {
        match &self.children {
            XmlChildren::Text { content, .. } if !content.trim().is_empty() => Some(content),
            XmlChildren::Mixed(children) => children.iter().find_map(|c| match c {
                XmlChild::Text { content, .. } if !content.trim().is_empty() => Some(content.as_str()),
                _ => None,
            }),
            _ => None,
        }
    }
}

impl XmlAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            value: value.into(),
        }
    }

    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_attribute_skips_empty_values() {
        let element = XmlElement::new("date")
            .with_attribute("year", "2024")
            .with_attribute("month", "");

        assert_eq!(element.get_attribute("year"), Some("2024"));
        assert_eq!(element.attributes.len(), 1);
    }

    #[test]
    fn test_push_child_converts_text_to_mixed() {
        let mut element = XmlElement::new("t").with_text("Hello");
        element.push_child(XmlElement::new("br"));

        assert!(matches!(element.children, XmlChildren::Mixed(ref c) if c.len() == 2));
        assert_eq!(element.stray_text(), Some("Hello"));
        assert_eq!(element.all_children().len(), 1);
    }

    #[test]
    fn test_push_child_on_empty() {
        let mut element = XmlElement::new("front");
        element.push_child(XmlElement::new("title").with_text("T"));

        assert!(element.has_elements());
        assert_eq!(element.get_child("title").and_then(|t| t.text()), Some("T"));
        assert_eq!(element.stray_text(), None);
    }

    #[test]
    fn test_qualified_name() {
        let mut attr = XmlAttribute::new("lang", "en");
        attr.prefix = Some("xml".to_string());
        assert_eq!(attr.qualified_name(), "xml:lang");
        assert_eq!(XmlElement::new("rfc").qualified_name(), "rfc");
    }
}
