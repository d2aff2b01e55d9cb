//! Indented XML output for [`XmlElement`] trees.

use crate::{Error, Result, XmlChild, XmlChildren, XmlElement};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Serialize an element tree as indented markup.
///
/// Each nesting level is indented by `indent` spaces. Elements with text
/// content stay on a single line.
///
/// ```rust
/// use rfcmark_xml::{XmlElement, write_indented};
///
/// let mut front = XmlElement::new("front");
/// front.push_child(XmlElement::new("title").with_text("Key words"));
///
/// assert_eq!(
///     write_indented(&front, 3).unwrap(),
///     "<front>\n   <title>Key words</title>\n</front>"
/// );
/// ```
pub fn write_indented(element: &XmlElement, indent: usize) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    write_element(&mut writer, element)?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Write(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let name = element.qualified_name();
    let mut start = BytesStart::new(name.as_str());
    for attr in &element.attributes {
        let key = attr.qualified_name();
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    match &element.children {
        XmlChildren::Empty => emit(writer, Event::Empty(start)),
        XmlChildren::Text { content, .. } => {
            emit(writer, Event::Start(start))?;
            emit(writer, Event::Text(BytesText::new(content)))?;
            emit(writer, Event::End(BytesEnd::new(name.as_str())))
        }
        XmlChildren::Elements(children) => {
            emit(writer, Event::Start(start))?;
            for child in children {
                write_element(writer, child)?;
            }
            emit(writer, Event::End(BytesEnd::new(name.as_str())))
        }
        XmlChildren::Mixed(children) => {
            emit(writer, Event::Start(start))?;
            for child in children {
                match child {
                    XmlChild::Element(e) => write_element(writer, e)?,
                    XmlChild::Text { content, .. } => {
                        emit(writer, Event::Text(BytesText::new(content)))?
                    }
                }
            }
            emit(writer, Event::End(BytesEnd::new(name.as_str())))
        }
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Write(e.to_string()))
}
