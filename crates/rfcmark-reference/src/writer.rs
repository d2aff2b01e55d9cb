//! Canonical XML output for [`Reference`] values.

use crate::error::Result;
use crate::types::*;
use rfcmark_xml::XmlElement;

/// Indentation used for canonical reference markup.
pub const INDENT: usize = 3;

/// Write a reference as canonical, indented `<reference>` markup.
pub fn encode_reference(reference: &Reference) -> Result<String> {
    Ok(rfcmark_xml::write_indented(
        &reference_to_element(reference),
        INDENT,
    )?)
}

/// Build the element tree for a reference, in RFC 7991 element order.
pub fn reference_to_element(reference: &Reference) -> XmlElement {
    let mut root = XmlElement::new("reference")
        .with_attribute("anchor", reference.anchor.as_str())
        .with_attribute("target", opt(&reference.target));

    root.push_child(front_to_element(&reference.front));

    for series in &reference.series_info {
        root.push_child(
            XmlElement::new("seriesInfo")
                .with_attribute("name", series.name.as_str())
                .with_attribute("value", series.value.as_str())
                .with_attribute("stream", opt(&series.stream))
                .with_attribute("status", opt(&series.status)),
        );
    }

    for format in &reference.formats {
        root.push_child(
            XmlElement::new("format")
                .with_attribute("type", format.format_type.as_str())
                .with_attribute("target", opt(&format.target)),
        );
    }

    root
}

fn front_to_element(front: &Front) -> XmlElement {
    let mut element = XmlElement::new("front");

    element.push_child(
        XmlElement::new("title")
            .with_attribute("abbrev", opt(&front.title.abbrev))
            .with_text(front.title.text.as_str()),
    );

    for author in &front.authors {
        element.push_child(author_to_element(author));
    }

    element.push_child(
        XmlElement::new("date")
            .with_attribute("year", opt(&front.date.year))
            .with_attribute("month", opt(&front.date.month))
            .with_attribute("day", opt(&front.date.day)),
    );

    for keyword in &front.keywords {
        element.push_child(XmlElement::new("keyword").with_text(keyword.as_str()));
    }

    if !front.abstract_paragraphs.is_empty() {
        let mut abstract_element = XmlElement::new("abstract");
        for paragraph in &front.abstract_paragraphs {
            abstract_element.push_child(XmlElement::new("t").with_text(paragraph.as_str()));
        }
        element.push_child(abstract_element);
    }

    element
}

fn author_to_element(author: &Author) -> XmlElement {
    let mut element = XmlElement::new("author")
        .with_attribute("initials", opt(&author.initials))
        .with_attribute("surname", opt(&author.surname))
        .with_attribute("fullname", opt(&author.fullname))
        .with_attribute("role", opt(&author.role));

    if let Some(org) = &author.organization {
        element.push_child(
            XmlElement::new("organization")
                .with_attribute("abbrev", opt(&org.abbrev))
                .with_text(org.name.as_str()),
        );
    }

    if let Some(address) = &author.address {
        let mut address_element = XmlElement::new("address");

        if let Some(postal) = &address.postal {
            let mut postal_element = XmlElement::new("postal");
            for street in &postal.streets {
                postal_element.push_child(XmlElement::new("street").with_text(street.as_str()));
            }
            push_text_child(&mut postal_element, "city", &postal.city);
            push_text_child(&mut postal_element, "region", &postal.region);
            push_text_child(&mut postal_element, "code", &postal.code);
            push_text_child(&mut postal_element, "country", &postal.country);
            address_element.push_child(postal_element);
        }

        push_text_child(&mut address_element, "phone", &address.phone);
        push_text_child(&mut address_element, "email", &address.email);
        push_text_child(&mut address_element, "uri", &address.uri);
        element.push_child(address_element);
    }

    element
}

fn push_text_child(parent: &mut XmlElement, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        parent.push_child(XmlElement::new(name).with_text(value.as_str()));
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
