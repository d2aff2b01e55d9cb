//! Span-tracked XML parsing for rfcmark.
//!
//! This crate wraps [`quick-xml`] to provide a tree of [`XmlElement`]s where
//! each element and attribute remembers the byte range it occupied in the
//! original input. The tree can be written back out as indented markup with
//! [`write_indented`].
//!
//! # Example
//!
//! ```rust
//! use rfcmark_xml::parse;
//!
//! let xml = parse(r#"<reference anchor="RFC2119">
//!   <front><title>Key words</title></front>
//! </reference>"#).unwrap();
//!
//! assert_eq!(xml.root.name, "reference");
//! assert_eq!(xml.root.get_attribute("anchor"), Some("RFC2119"));
//!
//! let front = xml.root.get_child("front").unwrap();
//! assert_eq!(front.get_child("title").unwrap().text(), Some("Key words"));
//! ```

pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use parser::parse;
pub use types::{XmlAttribute, XmlChild, XmlChildren, XmlDocument, XmlElement};
pub use writer::write_indented;
