/*
 * title_writer.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * RFC 7991 <rfc> and <front> output for the document title block.
 */

//! XML title block writer.
//!
//! Turns [`TitleData`] into the opening `<rfc>` element and its `<front>`,
//! in the element order fixed by RFC 7991. The caller may push more
//! children (abstract, notes) into `<front>` before writing.

use rfcmark_ast::{Author, Contact, Datetime, SeriesInfo, TitleData};
use rfcmark_xml::{XmlElement, write_indented};

use crate::Result;
use crate::render::RenderContext;
use crate::transforms::bibliography::anchor_key;

/// `xmlns:xi` namespace declared on `<rfc>`.
pub const XINCLUDE_NS: &str = "http://www.w3.org/2001/XInclude";

const INDENT: usize = 2;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Map a `[seriesInfo] status` to the `<rfc category>` value.
pub fn status_to_category(status: &str) -> Option<&'static str> {
    match status {
        "full-standard" | "standard" => Some("std"),
        "informational" => Some("info"),
        "experimental" => Some("exp"),
        "bcp" => Some("bcp"),
        "historic" => Some("historic"),
        _ => None,
    }
}

/// Writes the title block as RFC 7991 markup.
#[derive(Debug, Clone, Default)]
pub struct TitleWriter {
    toc_depth: usize,
}

impl TitleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer configured from the render options.
    pub fn from_context(ctx: &RenderContext) -> Self {
        Self::new().with_toc_depth(ctx.options.toc_depth)
    }

    /// Set `<rfc tocDepth>`. Zero leaves it out.
    pub fn with_toc_depth(mut self, toc_depth: usize) -> Self {
        self.toc_depth = toc_depth;
        self
    }

    /// Render `<rfc>` with its `<front>` as indented markup.
    pub fn render(&self, title: &TitleData) -> Result<String> {
        Ok(write_indented(&self.rfc_element(title), INDENT)?)
    }

    /// Build the `<rfc>` element; `<front>` is its only child.
    pub fn rfc_element(&self, title: &TitleData) -> XmlElement {
        let submission_type = match title.submission_type.as_str() {
            "" => "IETF",
            other => other,
        };
        let series_value = title.series_info.value.as_str();

        let mut rfc = XmlElement::new("rfc")
            .with_attribute("version", "3")
            .with_attribute("ipr", title.ipr.as_str())
            .with_attribute("docName", series_value)
            .with_attribute("submissionType", submission_type)
            .with_attribute(
                "category",
                status_to_category(&title.series_info.status).unwrap_or_default(),
            )
            .with_attribute("xml:lang", "en")
            .with_attribute("xmlns:xi", XINCLUDE_NS)
            .with_attribute("updates", int_slice_to_string(&title.updates))
            .with_attribute("obsoletes", int_slice_to_string(&title.obsoletes))
            .with_attribute("indexInclude", title.index_include.to_string());

        // RFC 7841 Appendix A.2.2: only the IETF and IRTF streams use consensus.
        if matches!(submission_type, "IETF" | "IRTF") && title.consensus {
            rfc = rfc.with_attribute("consensus", "true");
        }
        if title.sort_refs {
            rfc = rfc.with_attribute("sortRefs", "true");
        }
        if self.toc_depth > 0 {
            rfc = rfc.with_attribute("tocDepth", self.toc_depth.to_string());
        }
        // Deprecated, but xml2rfc needs it to produce an actual RFC.
        if series_value.parse::<i64>().is_ok() {
            rfc = rfc.with_attribute("number", series_value);
        }

        rfc.push_child(front_element(title));
        rfc
    }
}

fn front_element(title: &TitleData) -> XmlElement {
    let mut front = XmlElement::new("front");

    front.push_child(
        XmlElement::new("title")
            .with_attribute("abbrev", title.abbrev.as_str())
            .with_text(title.title.as_str()),
    );
    front.push_child(series_info_element(&title.series_info));

    for author in &title.author {
        front.push_child(title_author(author, "author"));
    }

    front.push_child(date_element(title.date.as_ref()));

    push_element(&mut front, "area", &title.area);
    push_element(&mut front, "workgroup", &title.workgroup);
    for keyword in &title.keyword {
        push_text(&mut front, "keyword", keyword);
    }

    front
}

fn series_info_element(series: &SeriesInfo) -> XmlElement {
    for (field, value) in [
        ("value", &series.value),
        ("stream", &series.stream),
        ("status", &series.status),
        ("name", &series.name),
    ] {
        if value.is_empty() {
            tracing::warn!(
                field,
                "Empty '{}' in [seriesInfo], resulting XML may fail to parse",
                field
            );
        }
    }

    XmlElement::new("seriesInfo")
        .with_attribute("value", series.value.as_str())
        .with_attribute("stream", series.stream.as_str())
        .with_attribute("status", series.status.as_str())
        .with_attribute("name", series.name.as_str())
}

/// An `<author>` or `<contact>` element for a title block person.
pub fn title_author(author: &Author, tag: &str) -> XmlElement {
    let mut element = XmlElement::new(tag)
        .with_attribute("role", author.role.as_str())
        .with_attribute("initials", author.initials.as_str())
        .with_attribute("surname", author.surname.as_str())
        .with_attribute("fullname", author.fullname.as_str());

    element.push_child(
        XmlElement::new("organization")
            .with_attribute("abbrev", author.organization_abbrev.as_str())
            .with_text(author.organization.as_str()),
    );

    let address = &author.address;
    let p = &address.postal;
    let mut postal = XmlElement::new("postal");
    // <street> is required by the schema; the other singular parts are optional.
    push_element(&mut postal, "street", &p.street);
    for street in &p.streets {
        push_element(&mut postal, "street", street);
    }
    for (tag, one, many) in [
        ("city", &p.city, &p.cities),
        ("cityarea", &p.cityarea, &p.cityareas),
        ("code", &p.code, &p.codes),
        ("country", &p.country, &p.countries),
        ("extaddr", &p.extaddr, &p.extaddrs),
        ("pobox", &p.pobox, &p.poboxes),
        ("region", &p.region, &p.regions),
    ] {
        push_text(&mut postal, tag, one);
        for value in many {
            push_element(&mut postal, tag, value);
        }
    }

    let mut address_element = XmlElement::new("address");
    address_element.push_child(postal);
    push_text(&mut address_element, "phone", &address.phone);
    push_text(&mut address_element, "email", &address.email);
    for email in &address.emails {
        push_element(&mut address_element, "email", email);
    }
    push_text(&mut address_element, "uri", &address.uri);

    element.push_child(address_element);
    element
}

fn date_element(date: Option<&Datetime>) -> XmlElement {
    let Some(date) = date.and_then(|d| d.date) else {
        return XmlElement::new("date");
    };

    let mut element = XmlElement::new("date");
    if date.year > 0 {
        element = element.with_attribute("year", date.year.to_string());
    }
    if let Some(month) = usize::from(date.month)
        .checked_sub(1)
        .and_then(|m| MONTHS.get(m))
    {
        element = element.with_attribute("month", *month);
    }
    if date.day > 0 {
        element = element.with_attribute("day", date.day.to_string());
    }
    element
}

fn push_element(parent: &mut XmlElement, tag: &str, value: &str) {
    parent.push_child(XmlElement::new(tag).with_text(value));
}

fn push_text(parent: &mut XmlElement, tag: &str, value: &str) {
    if !value.is_empty() {
        push_element(parent, tag, value);
    }
}

/// Join RFC numbers as `1, 2, 3`.
pub fn int_slice_to_string(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The author with the given full name, compared case-insensitively.
pub fn author_from_title<'a>(fullname: &str, title: &'a TitleData) -> Option<&'a Author> {
    find_person(fullname, &title.author)
}

/// The contact with the given full name, compared case-insensitively.
pub fn contact_from_title<'a>(fullname: &str, title: &'a TitleData) -> Option<&'a Contact> {
    find_person(fullname, &title.contact)
}

fn find_person<'a>(fullname: &str, people: &'a [Author]) -> Option<&'a Author> {
    let wanted = anchor_key(fullname);
    people.iter().find(|a| anchor_key(&a.fullname) == wanted)
}
