/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document tree types for rfcmark.
 *
 * This crate holds the node types the bibliography engine reads and
 * writes (titles, citations, raw reference blocks, document matter and
 * the generated bibliography sections), a pre-order walker with early
 * termination, and the TOML title block data.
 */

pub mod node;
pub mod title;
pub mod walk;

pub use node::{
    Bibliography, BibliographyItem, BibliographyKind, Citation, CitationKind, CitationTarget,
    DocumentMatter, Heading, Matter, Node, ReferenceBlock, ReferenceSource, Title,
};
pub use title::{Address, Author, Contact, Postal, SeriesInfo, TitleData};
pub use toml::value::Datetime;
pub use walk::{WalkStatus, find, find_mut, walk};
