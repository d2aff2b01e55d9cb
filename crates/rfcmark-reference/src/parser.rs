//! Decoding of `<reference>` elements into [`Reference`] values.
//!
//! Decoding is strict about structure (root name, required `anchor`,
//! `<front>` and `<title>`, no stray character data between elements) and
//! lenient about vocabulary: elements and attributes it does not know are
//! skipped.

use crate::error::{Error, Result};
use crate::types::*;
use rfcmark_xml::XmlElement;

/// Parse and decode a reference from its raw XML text.
///
/// # Errors
///
/// Returns [`Error::Xml`] for malformed XML and one of the structural errors
/// when the markup is well-formed but is not a usable `<reference>`.
pub fn decode_reference(content: &str) -> Result<Reference> {
    let xml = rfcmark_xml::parse(content)?;
    reference_from_element(&xml.root)
}

/// Decode a reference from an already parsed element.
pub fn reference_from_element(element: &XmlElement) -> Result<Reference> {
    if element.name != "reference" {
        return Err(Error::InvalidRootElement {
            found: element.name.clone(),
        });
    }
    reject_text(element)?;

    let anchor = required_attribute(element, "anchor")?;
    let front = required_child(element, "front").and_then(parse_front)?;

    let series_info = element
        .get_children("seriesInfo")
        .into_iter()
        .map(parse_series_info)
        .collect::<Result<Vec<_>>>()?;

    let formats = element
        .get_children("format")
        .into_iter()
        .map(|f| -> Result<Format> {
            Ok(Format {
                format_type: required_attribute(f, "type")?,
                target: optional_attribute(f, "target"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Reference {
        anchor,
        target: optional_attribute(element, "target"),
        front,
        series_info,
        formats,
    })
}

fn parse_front(front: &XmlElement) -> Result<Front> {
    reject_text(front)?;

    let title = required_child(front, "title")?;
    let title = Title {
        text: title.text().unwrap_or_default().trim().to_string(),
        abbrev: optional_attribute(title, "abbrev"),
    };

    let authors = front
        .get_children("author")
        .into_iter()
        .map(parse_author)
        .collect::<Result<Vec<_>>>()?;

    let date = front
        .get_child("date")
        .map(|d| Date {
            year: optional_attribute(d, "year"),
            month: optional_attribute(d, "month"),
            day: optional_attribute(d, "day"),
        })
        .unwrap_or_default();

    let keywords: Vec<String> = front
        .get_children("keyword")
        .into_iter()
        .filter_map(child_text)
        .collect();

    let abstract_paragraphs: Vec<String> = front
        .get_child("abstract")
        .map(|a| a.get_children("t").into_iter().filter_map(child_text).collect())
        .unwrap_or_default();

    Ok(Front {
        title,
        authors,
        date,
        keywords,
        abstract_paragraphs,
    })
}

fn parse_author(author: &XmlElement) -> Result<Author> {
    reject_text(author)?;

    let organization = author.get_child("organization").map(|o| Organization {
        name: o.text().unwrap_or_default().trim().to_string(),
        abbrev: optional_attribute(o, "abbrev"),
    });

    let address = match author.get_child("address") {
        Some(address) => Some(parse_address(address)?),
        None => None,
    };

    Ok(Author {
        initials: optional_attribute(author, "initials"),
        surname: optional_attribute(author, "surname"),
        fullname: optional_attribute(author, "fullname"),
        role: optional_attribute(author, "role"),
        organization,
        address,
    })
}

fn parse_address(address: &XmlElement) -> Result<Address> {
    reject_text(address)?;

    let postal = match address.get_child("postal") {
        Some(postal) => {
            reject_text(postal)?;
            Some(Postal {
                streets: postal
                    .get_children("street")
                    .into_iter()
                    .filter_map(child_text)
                    .collect(),
                city: postal.get_child("city").and_then(child_text),
                region: postal.get_child("region").and_then(child_text),
                code: postal.get_child("code").and_then(child_text),
                country: postal.get_child("country").and_then(child_text),
            })
        }
        None => None,
    };

    Ok(Address {
        postal,
        phone: address.get_child("phone").and_then(child_text),
        email: address.get_child("email").and_then(child_text),
        uri: address.get_child("uri").and_then(child_text),
    })
}

fn parse_series_info(series: &XmlElement) -> Result<SeriesInfo> {
    Ok(SeriesInfo {
        name: required_attribute(series, "name")?,
        value: required_attribute(series, "value")?,
        stream: optional_attribute(series, "stream"),
        status: optional_attribute(series, "status"),
    })
}

fn required_attribute(element: &XmlElement, attribute: &str) -> Result<String> {
    element
        .get_attribute(attribute)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingAttribute {
            element: element.name.clone(),
            attribute: attribute.to_string(),
        })
}

fn optional_attribute(element: &XmlElement, attribute: &str) -> Option<String> {
    element
        .get_attribute(attribute)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required_child<'a>(element: &'a XmlElement, name: &str) -> Result<&'a XmlElement> {
    element.get_child(name).ok_or_else(|| Error::MissingElement {
        parent: element.name.clone(),
        element: name.to_string(),
    })
}

fn child_text(element: &XmlElement) -> Option<String> {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn reject_text(element: &XmlElement) -> Result<()> {
    match element.stray_text() {
        Some(text) => Err(Error::UnexpectedText {
            element: element.name.clone(),
            text: text.to_string(),
        }),
        None => Ok(()),
    }
}
