//! Typed bibliographic reference records for rfcmark.
//!
//! A reference is the `<reference>` element of the RFC 7991 vocabulary: an
//! anchor, an optional target URI, a `<front>` with title, authors and date,
//! and any number of `<seriesInfo>` and `<format>` entries. This crate decodes
//! such elements into [`Reference`] values on top of [`rfcmark_xml`] and
//! writes them back out in a canonical indented form.
//!
//! ```rust
//! use rfcmark_reference::{decode_reference, encode_reference};
//!
//! let reference = decode_reference(r#"<reference anchor="RFC2119" target="https://www.rfc-editor.org/info/rfc2119">
//!   <front>
//!     <title>Key words for use in RFCs to Indicate Requirement Levels</title>
//!     <author initials="S." surname="Bradner" fullname="S. Bradner"/>
//!     <date year="1997" month="March"/>
//!   </front>
//!   <seriesInfo name="BCP" value="14"/>
//! </reference>"#).unwrap();
//!
//! assert_eq!(reference.anchor, "RFC2119");
//! assert_eq!(reference.front.authors[0].surname.as_deref(), Some("Bradner"));
//!
//! let canonical = encode_reference(&reference).unwrap();
//! assert!(canonical.starts_with("<reference anchor=\"RFC2119\""));
//! ```

pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{decode_reference, reference_from_element};
pub use types::*;
pub use writer::{encode_reference, reference_to_element};
