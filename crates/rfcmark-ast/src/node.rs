/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document tree node types.
 */

use crate::title::TitleData;
use rfcmark_reference::Reference;
use serde::{Deserialize, Serialize};

/// A node in the document tree.
///
/// Serialized adjacently tagged, `{"t": "<Variant>", "c": <content>}`, in the
/// same shape as Pandoc JSON so documents can be exchanged with other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Node {
    Document(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading(Heading),
    Text(String),
    Title(Title),
    Citation(Citation),
    ReferenceBlock(ReferenceBlock),
    DocumentMatter(DocumentMatter),
    Bibliography(Bibliography),
    BibliographyWrapper(Vec<Node>),
    BibliographyItem(BibliographyItem),
}

impl Node {
    /// Child nodes in document order, or `None` for leaves.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document(children)
            | Node::Paragraph(children)
            | Node::BibliographyWrapper(children) => Some(children),
            Node::Heading(h) => Some(&h.children),
            Node::DocumentMatter(m) => Some(&m.children),
            Node::Bibliography(b) => Some(&b.children),
            Node::Text(_)
            | Node::Title(_)
            | Node::Citation(_)
            | Node::ReferenceBlock(_)
            | Node::BibliographyItem(_) => None,
        }
    }

    /// Mutable access to the child list, or `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document(children)
            | Node::Paragraph(children)
            | Node::BibliographyWrapper(children) => Some(children),
            Node::Heading(h) => Some(&mut h.children),
            Node::DocumentMatter(m) => Some(&mut m.children),
            Node::Bibliography(b) => Some(&mut b.children),
            Node::Text(_)
            | Node::Title(_)
            | Node::Citation(_)
            | Node::ReferenceBlock(_)
            | Node::BibliographyItem(_) => None,
        }
    }

    /// Append a child. Leaves are left untouched and `false` is returned.
    pub fn append_child(&mut self, child: Node) -> bool {
        match self.children_mut() {
            Some(children) => {
                children.push(child);
                true
            }
            None => false,
        }
    }

    pub fn is_back_matter(&self) -> bool {
        matches!(self, Node::DocumentMatter(m) if m.matter == Matter::Back)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<Node>,
}

/// The document title block.
///
/// `data` is `None` when the document declares a title node without any
/// metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Title {
    #[serde(default)]
    pub data: Option<TitleData>,
}

impl Title {
    pub fn new(data: TitleData) -> Self {
        Self { data: Some(data) }
    }
}

/// How a cited work relates to the citing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Normative,
    Informative,
    /// Informative, but not rendered inline.
    Suppressed,
}

/// One anchor referenced by a citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationTarget {
    pub destination: String,
    pub kind: CitationKind,
}

impl CitationTarget {
    pub fn new(destination: impl Into<String>, kind: CitationKind) -> Self {
        Self {
            destination: destination.into(),
            kind,
        }
    }
}

/// An inline citation such as `[@RFC2119; @!RFC8174]`.
///
/// Each target carries its own kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Citation {
    pub targets: Vec<CitationTarget>,
}

impl Citation {
    pub fn new(targets: Vec<CitationTarget>) -> Self {
        Self { targets }
    }

    /// A citation of a single anchor.
    pub fn single(destination: impl Into<String>, kind: CitationKind) -> Self {
        Self::new(vec![CitationTarget::new(destination, kind)])
    }
}

/// Raw `<reference>` or `<referencegroup>` markup embedded in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceBlock {
    pub literal: String,
}

impl ReferenceBlock {
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Matter {
    Front,
    Main,
    Back,
}

/// A `{frontmatter}`, `{mainmatter}` or `{backmatter}` region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMatter {
    pub matter: Matter,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl DocumentMatter {
    pub fn new(matter: Matter) -> Self {
        Self {
            matter,
            children: Vec::new(),
        }
    }
}

/// Bibliography groups. Suppressed citations are listed as informative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BibliographyKind {
    Normative,
    Informative,
}

impl From<CitationKind> for BibliographyKind {
    fn from(kind: CitationKind) -> Self {
        match kind {
            CitationKind::Normative => BibliographyKind::Normative,
            CitationKind::Informative | CitationKind::Suppressed => BibliographyKind::Informative,
        }
    }
}

/// A normative or informative references section.
///
/// Children are [`Node::BibliographyItem`]s in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bibliography {
    pub kind: BibliographyKind,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Bibliography {
    pub fn new(kind: BibliographyKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// The items of this section, skipping any other children.
    pub fn items(&self) -> impl Iterator<Item = &BibliographyItem> {
        self.children.iter().filter_map(|c| match c {
            Node::BibliographyItem(item) => Some(item),
            _ => None,
        })
    }
}

/// Content attached to a bibliography item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    /// The reference block decoded as a `<reference>`.
    Decoded(Box<Reference>),
    /// The reference block text, kept verbatim because it did not decode.
    Raw(String),
}

/// A resolved bibliography entry.
///
/// `source` is `None` for a citation with no matching reference block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographyItem {
    pub anchor: String,
    pub kind: BibliographyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ReferenceSource>,
}

impl BibliographyItem {
    pub fn new(anchor: impl Into<String>, kind: BibliographyKind) -> Self {
        Self {
            anchor: anchor.into(),
            kind,
            source: None,
        }
    }

    pub fn reference(&self) -> Option<&Reference> {
        match &self.source {
            Some(ReferenceSource::Decoded(r)) => Some(r),
            _ => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match &self.source {
            Some(ReferenceSource::Raw(raw)) => Some(raw),
            _ => None,
        }
    }
}
