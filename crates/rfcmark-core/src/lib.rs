//! Bibliography resolution and XML front matter for rfcmark
//!
//! This crate turns a parsed rfcmark document into the pieces an RFC 7991
//! renderer needs from it: the reference sections and the title block.
//!
//! # Architecture
//!
//! - [`reference_block`] - Recognizes raw `<reference>` blocks for the parser
//! - [`TransformPipeline`] - Ordered [`AstTransform`]s over the document tree
//! - [`BibliographyTransform`] - Citations to normative/informative sections
//! - [`TitleWriter`] - The `<rfc>` element and its `<front>`
//! - [`RenderContext`] - Per-document options and collected warnings
//!
//! # Example
//!
//! ```rust
//! use rfcmark_ast::{Citation, CitationKind, DocumentMatter, Matter, Node};
//! use rfcmark_core::{BibliographyTransform, RenderContext, TransformPipeline};
//!
//! let mut doc = Node::Document(vec![
//!     Node::Paragraph(vec![Node::Citation(Citation::single("RFC2119", CitationKind::Normative))]),
//!     Node::DocumentMatter(DocumentMatter::new(Matter::Back)),
//! ]);
//!
//! let mut pipeline = TransformPipeline::new();
//! pipeline.push(Box::new(BibliographyTransform::new()));
//! pipeline.execute(&mut doc, &mut RenderContext::new()).unwrap();
//! ```

pub mod error;
pub mod reference_block;
pub mod render;
pub mod title_writer;
pub mod transform;
pub mod transforms;

// Re-export commonly used types
pub use error::{Result, RfcmarkError};
pub use reference_block::{
    anchor_from_reference, recognize_reference, reference_hook, reformat_reference,
};
pub use render::{RenderContext, RenderOptions};
pub use title_writer::{TitleWriter, author_from_title, contact_from_title, int_slice_to_string};
pub use transform::{AstTransform, TransformPipeline};
pub use transforms::BibliographyTransform;
