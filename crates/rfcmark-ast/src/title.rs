/*
 * title.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Title block metadata, read from the TOML header of a document.
 */

use serde::{Deserialize, Serialize};
use toml::value::Datetime;

/// Document metadata from the title block.
///
/// Keys follow the TOML title block written by document authors, e.g.
///
/// ```toml
/// title = "Citations in RFC Documents"
/// abbrev = "rfcmark"
/// ipr = "trust200902"
/// area = "Internet"
/// workgroup = "Network Working Group"
/// keyword = ["markdown", "xml"]
/// date = 2018-12-10T00:00:00Z
///
/// [seriesInfo]
/// name = "Internet-Draft"
/// value = "draft-example-rfcmark-00"
/// stream = "IETF"
/// status = "informational"
///
/// [[author]]
/// initials = "R."
/// surname = "Gieben"
/// fullname = "R. (Miek) Gieben"
/// organization = "Google"
///   [author.address]
///   email = "miek@google.com"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleData {
    pub title: String,
    pub abbrev: String,

    /// RFC numbers this document updates.
    pub updates: Vec<u32>,
    pub obsoletes: Vec<u32>,

    pub ipr: String,

    #[serde(rename = "seriesInfo", alias = "seriesinfo")]
    pub series_info: SeriesInfo,

    #[serde(rename = "submissiontype", alias = "submissionType")]
    pub submission_type: String,

    #[serde(with = "datetime_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<Datetime>,

    pub area: String,
    pub workgroup: String,
    pub keyword: Vec<String>,

    pub author: Vec<Author>,
    pub contact: Vec<Contact>,

    pub consensus: bool,

    #[serde(rename = "indexInclude", alias = "indexinclude")]
    pub index_include: bool,

    #[serde(rename = "sortRefs", alias = "sortrefs")]
    pub sort_refs: bool,
}

impl TitleData {
    /// Parse a TOML title block.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Full names of all authors followed by all contacts.
    pub fn names(&self) -> Vec<&str> {
        self.author
            .iter()
            .chain(&self.contact)
            .map(|a| a.fullname.as_str())
            .collect()
    }
}

/// `[seriesInfo]` of the document itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesInfo {
    pub name: String,
    pub value: String,
    pub stream: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub initials: String,
    pub surname: String,
    pub fullname: String,
    pub organization: String,
    #[serde(rename = "abbrev")]
    pub organization_abbrev: String,
    pub role: String,
    pub address: Address,
}

/// Contacts share the author layout.
pub type Contact = Author;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub postal: Postal,
    pub phone: String,
    pub email: String,
    pub emails: Vec<String>,
    pub uri: String,
}

/// Postal address. Each part can be given once or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Postal {
    pub street: String,
    pub streets: Vec<String>,
    pub city: String,
    pub cities: Vec<String>,
    pub cityarea: String,
    pub cityareas: Vec<String>,
    pub code: String,
    pub codes: Vec<String>,
    pub country: String,
    pub countries: Vec<String>,
    pub extaddr: String,
    pub extaddrs: Vec<String>,
    pub pobox: String,
    pub poboxes: Vec<String>,
    pub region: String,
    pub regions: Vec<String>,
}

/// Dates are native TOML datetimes in a title block and RFC 3339 strings in
/// JSON documents. Both forms are accepted.
mod datetime_text {
    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt;
    use toml::value::Datetime;

    pub fn serialize<S: Serializer>(date: &Option<Datetime>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Datetime>, D::Error> {
        d.deserialize_any(DatetimeVisitor)
    }

    struct DatetimeVisitor;

    impl<'de> Visitor<'de> for DatetimeVisitor {
        type Value = Option<Datetime>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a TOML datetime or an RFC 3339 string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse::<Datetime>().map(Some).map_err(E::custom)
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            Datetime::deserialize(de::value::MapAccessDeserializer::new(map)).map(Some)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(DatetimeVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = r#"
title = "Citations in RFC Documents"
abbrev = "rfcmark"
ipr = "trust200902"
updates = [7991, 7749]
area = "Internet"
workgroup = "Network Working Group"
keyword = ["markdown", "xml", "bibliography"]
submissiontype = "IETF"
consensus = true
indexInclude = true
date = 2018-12-10T00:00:00Z

[seriesInfo]
name = "Internet-Draft"
value = "draft-example-rfcmark-00"
stream = "IETF"
status = "informational"

[[author]]
initials = "R."
surname = "Gieben"
fullname = "R. (Miek) Gieben"
organization = "Google"
abbrev = "GOOG"
  [author.address]
  email = "miek@google.com"
  emails = ["miek@miek.nl"]
    [author.address.postal]
    streets = ["Buckingham Palace Road"]
    city = "London"

[[contact]]
fullname = "Jane Doe"
"#;

    #[test]
    fn test_from_toml() {
        let t = TitleData::from_toml(TITLE).unwrap();

        assert_eq!(t.title, "Citations in RFC Documents");
        assert_eq!(t.updates, vec![7991, 7749]);
        assert!(t.obsoletes.is_empty());
        assert_eq!(t.series_info.value, "draft-example-rfcmark-00");
        assert_eq!(t.series_info.status, "informational");
        assert_eq!(t.submission_type, "IETF");
        assert!(t.consensus);
        assert!(t.index_include);
        assert!(!t.sort_refs);

        let author = &t.author[0];
        assert_eq!(author.organization_abbrev, "GOOG");
        assert_eq!(author.address.email, "miek@google.com");
        assert_eq!(author.address.emails, vec!["miek@miek.nl"]);
        assert_eq!(author.address.postal.city, "London");
        assert_eq!(author.address.postal.streets, vec!["Buckingham Palace Road"]);

        let date = t.date.unwrap().date.unwrap();
        assert_eq!((date.year, date.month, date.day), (2018, 12, 10));
    }

    #[test]
    fn test_names_are_authors_then_contacts() {
        let t = TitleData::from_toml(TITLE).unwrap();
        assert_eq!(t.names(), vec!["R. (Miek) Gieben", "Jane Doe"]);
    }

    #[test]
    fn test_empty_title_block() {
        let t = TitleData::from_toml("").unwrap();
        assert_eq!(t, TitleData::default());
        assert!(t.names().is_empty());
    }

    #[test]
    fn test_local_date() {
        let t = TitleData::from_toml("date = 2021-03-01").unwrap();
        let date = t.date.unwrap().date.unwrap();
        assert_eq!((date.year, date.month, date.day), (2021, 3, 1));
    }

    #[test]
    fn test_json_date_is_a_string() {
        let t = TitleData::from_toml("date = 2018-12-10").unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["date"], "2018-12-10");

        let back: TitleData = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_json_without_date() {
        let t: TitleData = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert_eq!(t.title, "x");
        assert_eq!(t.date, None);
    }
}
