/*
 * bibliography.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that turns citations into normative and informative bibliographies.
 */

//! Bibliography transform.
//!
//! Collects every citation in the document, matches it with a raw
//! `<reference>` block by anchor, and inserts the resulting reference
//! sections into the back matter.
//!
//! ## Input
//!
//! - The first [`Node::Title`]; citations of its authors and contacts are
//!   dropped
//! - [`Node::Citation`] targets, deduplicated case-insensitively with the
//!   first occurrence winning
//! - [`Node::ReferenceBlock`]s, keyed by their lower-cased anchor with the
//!   last block winning
//!
//! ## Output
//!
//! Under the first `{backmatter}`:
//!
//! ```text
//! DocumentMatter(back)
//! └── BibliographyWrapper          (only when both sections exist)
//!     ├── Bibliography(normative)
//!     │   └── BibliographyItem ...
//!     └── Bibliography(informative)
//!         └── BibliographyItem ...
//! ```
//!
//! RFC 7322 Section 4.8.6 splits the references into two subsections only
//! when both kinds are present; with a single kind its section is attached
//! to the back matter directly.

use hashlink::LinkedHashMap;
use rfcmark_ast::{
    Bibliography, BibliographyItem, BibliographyKind, CitationKind, Node, ReferenceSource, Title,
    WalkStatus, find_mut, walk,
};
use rfcmark_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use rfcmark_reference::decode_reference;

use crate::Result;
use crate::reference_block::anchor_from_reference;
use crate::render::RenderContext;
use crate::transform::AstTransform;

/// A citation target that made it into the bibliography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationSeed {
    /// The anchor as first written in the document.
    pub anchor: String,
    pub kind: CitationKind,
}

/// Everything the bibliography is built from.
#[derive(Debug, Clone, Default)]
pub struct CollectedCitations {
    /// Cited anchors by lower-cased anchor, in document order.
    pub citations: LinkedHashMap<String, CitationSeed>,

    /// Raw reference block text by lower-cased anchor.
    pub raw: LinkedHashMap<String, String>,
}

/// Case-insensitive key for anchors and names.
///
/// Each character is lower-cased on its own, so `ΟΔΟΣ` and `οδοσ` share a
/// key. `str::to_lowercase` would turn a word-final `Σ` into `ς`.
pub fn anchor_key(anchor: &str) -> String {
    anchor.chars().flat_map(char::to_lowercase).collect()
}

/// Full names of the title block's authors, then its contacts.
pub fn names_from_title(title: &Title) -> Vec<&str> {
    title.data.as_ref().map(|d| d.names()).unwrap_or_default()
}

/// Walk the document and gather citations and raw reference blocks.
pub fn collect_citations(doc: &Node) -> CollectedCitations {
    let mut names: Vec<&str> = Vec::new();
    walk(doc, &mut |node| {
        if let Node::Title(title) = node {
            names = names_from_title(title);
            return WalkStatus::Terminate;
        }
        WalkStatus::Continue
    });
    let names: Vec<String> = names.into_iter().map(anchor_key).collect();

    let mut collected = CollectedCitations::default();
    walk(doc, &mut |node| {
        match node {
            Node::Citation(citation) => {
                for target in &citation.targets {
                    let key = anchor_key(&target.destination);
                    // Citing an author or contact is not a reference.
                    if names.contains(&key) || collected.citations.contains_key(&key) {
                        continue;
                    }
                    collected.citations.insert(
                        key,
                        CitationSeed {
                            anchor: target.destination.clone(),
                            kind: target.kind,
                        },
                    );
                }
            }
            Node::ReferenceBlock(block) => {
                if let Some(anchor) = anchor_from_reference(&block.literal) {
                    collected
                        .raw
                        .insert(anchor_key(anchor), block.literal.clone());
                }
            }
            _ => {}
        }
        WalkStatus::Continue
    });

    collected
}

/// Build the normative and informative sections from collected citations.
///
/// Items are sorted by anchor. A reference block that does not decode is
/// attached verbatim and reported as an `R-3-1` warning.
pub fn assemble_bibliography(
    collected: &CollectedCitations,
    ctx: &mut RenderContext,
) -> (Option<Bibliography>, Option<Bibliography>) {
    let mut seeds: Vec<&CitationSeed> = collected.citations.values().collect();
    seeds.sort_by(|a, b| a.anchor.cmp(&b.anchor));

    let mut normative: Option<Bibliography> = None;
    let mut informative: Option<Bibliography> = None;

    for seed in seeds {
        let kind = BibliographyKind::from(seed.kind);
        let mut item = BibliographyItem::new(seed.anchor.as_str(), kind);

        if let Some(literal) = collected.raw.get(&anchor_key(&seed.anchor)) {
            item.source = Some(match decode_reference(literal) {
                Ok(reference) => ReferenceSource::Decoded(Box::new(reference)),
                Err(err) => {
                    tracing::warn!(
                        anchor = %seed.anchor,
                        error = %err,
                        "Failed to decode reference, keeping it verbatim"
                    );
                    ctx.add_warning(decode_failure(&seed.anchor, &err));
                    ReferenceSource::Raw(literal.clone())
                }
            });
        }

        let section = match kind {
            BibliographyKind::Normative => &mut normative,
            BibliographyKind::Informative => &mut informative,
        };
        section
            .get_or_insert_with(|| Bibliography::new(kind))
            .children
            .push(Node::BibliographyItem(item));
    }

    (normative, informative)
}

/// Collect and assemble in one step.
pub fn citation_to_bibliography(
    doc: &Node,
    ctx: &mut RenderContext,
) -> (Option<Bibliography>, Option<Bibliography>) {
    assemble_bibliography(&collect_citations(doc), ctx)
}

/// The first `{backmatter}` node in document order.
pub fn node_back_matter(doc: &mut Node) -> Option<&mut Node> {
    find_mut(doc, &Node::is_back_matter)
}

/// Insert the bibliography into the back matter.
///
/// Returns `true` if a section was attached. Without back matter nothing is
/// changed and, if there was a bibliography to insert, an `R-3-2` warning
/// is recorded.
pub fn add_bibliography(doc: &mut Node, ctx: &mut RenderContext) -> bool {
    let (normative, informative) = citation_to_bibliography(doc, ctx);
    let has_bibliography = normative.is_some() || informative.is_some();

    let Some(back) = node_back_matter(doc) else {
        if has_bibliography {
            tracing::warn!("No back matter found, can't insert bibliography");
            ctx.add_warning(missing_back_matter());
        }
        return false;
    };

    let mut sections: Vec<Node> = [normative, informative]
        .into_iter()
        .flatten()
        .map(Node::Bibliography)
        .collect();

    match sections.len() {
        0 => false,
        1 => back.append_child(sections.remove(0)),
        _ => back.append_child(Node::BibliographyWrapper(sections)),
    }
}

fn decode_failure(anchor: &str, err: &rfcmark_reference::Error) -> DiagnosticMessage {
    DiagnosticMessageBuilder::warning("Reference Kept Verbatim")
        .with_code("R-3-1")
        .problem(format!(
            "The reference block for `{}` could not be decoded",
            anchor
        ))
        .add_detail(err.to_string())
        .add_note("Reference groups are always kept verbatim")
        .build()
}

fn missing_back_matter() -> DiagnosticMessage {
    DiagnosticMessageBuilder::warning("Bibliography Not Inserted")
        .with_code("R-3-2")
        .problem("The document has no back matter to hold the bibliography")
        .add_hint("Add a `{backmatter}` marker to the document")
        .build()
}

/// Transform that resolves citations into bibliography sections.
pub struct BibliographyTransform;

impl BibliographyTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BibliographyTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTransform for BibliographyTransform {
    fn name(&self) -> &str {
        "bibliography"
    }

    fn transform(&self, ast: &mut Node, ctx: &mut RenderContext) -> Result<()> {
        let inserted = add_bibliography(ast, ctx);
        tracing::debug!(inserted, "Bibliography resolved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfcmark_ast::{
        Author, Citation, CitationTarget, DocumentMatter, Matter, ReferenceBlock, TitleData, find,
    };

    fn cite(anchor: &str, kind: CitationKind) -> Node {
        Node::Citation(Citation::single(anchor, kind))
    }

    fn reference(anchor: &str) -> Node {
        Node::ReferenceBlock(ReferenceBlock::new(format!(
            r#"<reference anchor="{anchor}"><front><title>About {anchor}</title></front></reference>"#
        )))
    }

    fn back_matter(children: Vec<Node>) -> Node {
        Node::DocumentMatter(DocumentMatter {
            matter: Matter::Back,
            children,
        })
    }

    fn title(authors: &[&str], contacts: &[&str]) -> Node {
        let person = |name: &&str| Author {
            fullname: name.to_string(),
            ..Default::default()
        };
        Node::Title(Title::new(TitleData {
            author: authors.iter().map(person).collect(),
            contact: contacts.iter().map(person).collect(),
            ..Default::default()
        }))
    }

    fn back_children(doc: &Node) -> &[Node] {
        find(doc, &Node::is_back_matter)
            .and_then(Node::children)
            .unwrap()
    }

    fn anchors(section: &Bibliography) -> Vec<&str> {
        section.items().map(|i| i.anchor.as_str()).collect()
    }

    #[test]
    fn test_anchor_only_normative() {
        // One citation without a reference block
        let mut doc = Node::Document(vec![
            Node::Paragraph(vec![cite("X", CitationKind::Normative)]),
            back_matter(vec![]),
        ]);
        let mut ctx = RenderContext::new();

        assert!(add_bibliography(&mut doc, &mut ctx));

        let children = back_children(&doc);
        assert_eq!(children.len(), 1);
        let Node::Bibliography(section) = &children[0] else {
            panic!("Expected Bibliography, got {:?}", children[0]);
        };
        assert_eq!(section.kind, BibliographyKind::Normative);
        let items: Vec<_> = section.items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].anchor, "X");
        assert!(items[0].source.is_none());
        assert!(ctx.warnings.is_empty());
    }

    #[test]
    fn test_case_variants_collapse_to_first() {
        let mut doc = Node::Document(vec![
            Node::Paragraph(vec![
                cite("x", CitationKind::Normative),
                cite("X", CitationKind::Normative),
            ]),
            reference("X"),
            back_matter(vec![]),
        ]);
        let mut ctx = RenderContext::new();

        assert!(add_bibliography(&mut doc, &mut ctx));

        let Node::Bibliography(section) = &back_children(&doc)[0] else {
            panic!("Expected Bibliography");
        };
        let items: Vec<_> = section.items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].anchor, "x");
        let decoded = items[0].reference().unwrap();
        assert_eq!(decoded.anchor, "X");
        assert_eq!(decoded.front.title.text, "About X");
    }

    #[test]
    fn test_anchor_key_folds_each_character() {
        assert_eq!(anchor_key("RFC2119"), "rfc2119");
        assert_eq!(anchor_key("ΟΔΟΣ"), "οδοσ");
        assert_eq!(anchor_key("ΟΔΟΣ"), anchor_key("οδοσ"));
    }

    #[test]
    fn test_greek_case_variants_collapse() {
        let doc = Node::Document(vec![
            cite("ΟΔΟΣ", CitationKind::Normative),
            cite("οδοσ", CitationKind::Informative),
        ]);
        let collected = collect_citations(&doc);

        assert_eq!(collected.citations.len(), 1);
        let seed = collected.citations.values().next().unwrap();
        assert_eq!(seed.anchor, "ΟΔΟΣ");
        assert_eq!(seed.kind, CitationKind::Normative);
    }

    #[test]
    fn test_greek_anchor_matches_reference_block() {
        let mut doc = Node::Document(vec![
            cite("οδοσ", CitationKind::Normative),
            reference("ΟΔΟΣ"),
            back_matter(vec![]),
        ]);
        let mut ctx = RenderContext::new();

        assert!(add_bibliography(&mut doc, &mut ctx));

        let Node::Bibliography(section) = &back_children(&doc)[0] else {
            panic!("Expected Bibliography");
        };
        let item = section.items().next().unwrap();
        assert_eq!(item.anchor, "οδοσ");
        assert_eq!(item.reference().unwrap().anchor, "ΟΔΟΣ");
    }

    #[test]
    fn test_greek_author_citation_is_dropped() {
        let doc = Node::Document(vec![
            title(&["ΟΔΟΣ"], &[]),
            cite("οδοσ", CitationKind::Informative),
        ]);
        assert!(collect_citations(&doc).citations.is_empty());
    }

    #[test]
    fn test_undecodable_reference_is_kept_verbatim() {
        let literal = r#"<reference anchor="BadRef">not-xml-garbage</reference>"#;
        let mut doc = Node::Document(vec![
            cite("BadRef", CitationKind::Normative),
            Node::ReferenceBlock(ReferenceBlock::new(literal)),
            back_matter(vec![]),
        ]);
        let mut ctx = RenderContext::new();

        assert!(add_bibliography(&mut doc, &mut ctx));

        let Node::Bibliography(section) = &back_children(&doc)[0] else {
            panic!("Expected Bibliography");
        };
        let item = section.items().next().unwrap();
        assert_eq!(item.anchor, "BadRef");
        assert_eq!(item.raw(), Some(literal));
        assert!(ctx.has_warning("R-3-1"));
        assert!(ctx.warnings[0].problem.as_deref().unwrap().contains("BadRef"));
    }

    #[test]
    fn test_reference_group_is_kept_verbatim() {
        let literal = "<referencegroup anchor='BCP14'><reference anchor='RFC2119'><front><title>x</title></front></reference></referencegroup>";
        let mut doc = Node::Document(vec![
            cite("BCP14", CitationKind::Informative),
            Node::ReferenceBlock(ReferenceBlock::new(literal)),
            back_matter(vec![]),
        ]);
        let mut ctx = RenderContext::new();

        assert!(add_bibliography(&mut doc, &mut ctx));
        let Node::Bibliography(section) = &back_children(&doc)[0] else {
            panic!("Expected Bibliography");
        };
        assert_eq!(section.items().next().unwrap().raw(), Some(literal));
    }

    #[test]
    fn test_missing_back_matter() {
        let mut doc = Node::Document(vec![
            cite("A", CitationKind::Normative),
            Node::DocumentMatter(DocumentMatter::new(Matter::Front)),
        ]);
        let before = doc.clone();
        let mut ctx = RenderContext::new();

        assert!(!add_bibliography(&mut doc, &mut ctx));
        assert_eq!(doc, before);
        assert!(ctx.has_warning("R-3-2"));
    }

    #[test]
    fn test_missing_back_matter_without_citations_is_silent() {
        let mut doc = Node::Document(vec![Node::Text("no citations".to_string())]);
        let mut ctx = RenderContext::new();

        assert!(!add_bibliography(&mut doc, &mut ctx));
        assert!(ctx.warnings.is_empty());
    }

    #[test]
    fn test_no_citations_attaches_nothing() {
        let mut doc = Node::Document(vec![reference("A"), back_matter(vec![])]);
        let mut ctx = RenderContext::new();

        assert!(!add_bibliography(&mut doc, &mut ctx));
        assert!(back_children(&doc).is_empty());
    }

    #[test]
    fn test_both_kinds_are_wrapped() {
        let mut doc = Node::Document(vec![
            cite("B", CitationKind::Informative),
            cite("A", CitationKind::Normative),
            back_matter(vec![Node::Text("appendix".to_string())]),
        ]);
        let mut ctx = RenderContext::new();

        assert!(add_bibliography(&mut doc, &mut ctx));

        let children = back_children(&doc);
        assert_eq!(children.len(), 2);
        let Node::BibliographyWrapper(sections) = &children[1] else {
            panic!("Expected BibliographyWrapper, got {:?}", children[1]);
        };
        assert_eq!(sections.len(), 2);
        let Node::Bibliography(normative) = &sections[0] else {
            panic!("Expected normative Bibliography");
        };
        let Node::Bibliography(informative) = &sections[1] else {
            panic!("Expected informative Bibliography");
        };
        assert_eq!(normative.kind, BibliographyKind::Normative);
        assert_eq!(anchors(normative), vec!["A"]);
        assert_eq!(informative.kind, BibliographyKind::Informative);
        assert_eq!(anchors(informative), vec!["B"]);
    }

    #[test]
    fn test_suppressed_is_informative() {
        let mut doc = Node::Document(vec![
            cite("S", CitationKind::Suppressed),
            cite("I", CitationKind::Informative),
            back_matter(vec![]),
        ]);
        let mut ctx = RenderContext::new();

        assert!(add_bibliography(&mut doc, &mut ctx));

        let children = back_children(&doc);
        assert_eq!(children.len(), 1);
        let Node::Bibliography(section) = &children[0] else {
            panic!("Expected Bibliography");
        };
        assert_eq!(section.kind, BibliographyKind::Informative);
        assert_eq!(anchors(section), vec!["I", "S"]);
        assert!(section.items().all(|i| i.kind == BibliographyKind::Informative));
    }

    #[test]
    fn test_items_sorted_case_sensitively() {
        let doc = Node::Document(vec![
            cite("b", CitationKind::Normative),
            cite("a2", CitationKind::Normative),
            cite("A", CitationKind::Normative),
        ]);
        let (normative, informative) = citation_to_bibliography(&doc, &mut RenderContext::new());

        assert!(informative.is_none());
        assert_eq!(anchors(&normative.unwrap()), vec!["A", "a2", "b"]);
    }

    #[test]
    fn test_first_kind_wins() {
        let doc = Node::Document(vec![
            cite("rfc1", CitationKind::Informative),
            cite("RFC1", CitationKind::Normative),
        ]);
        let (normative, informative) = citation_to_bibliography(&doc, &mut RenderContext::new());

        assert!(normative.is_none());
        assert_eq!(anchors(&informative.unwrap()), vec!["rfc1"]);
    }

    #[test]
    fn test_multi_target_citation() {
        let doc = Node::Document(vec![Node::Citation(Citation::new(vec![
            CitationTarget::new("RFC2119", CitationKind::Normative),
            CitationTarget::new("RFC8174", CitationKind::Informative),
        ]))]);
        let (normative, informative) = citation_to_bibliography(&doc, &mut RenderContext::new());

        assert_eq!(anchors(&normative.unwrap()), vec!["RFC2119"]);
        assert_eq!(anchors(&informative.unwrap()), vec!["RFC8174"]);
    }

    #[test]
    fn test_author_and_contact_citations_are_dropped() {
        let doc = Node::Document(vec![
            title(&["R. Gieben"], &["Jane Doe"]),
            cite("r. gieben", CitationKind::Informative),
            cite("JANE DOE", CitationKind::Normative),
            cite("RFC7991", CitationKind::Normative),
        ]);
        let collected = collect_citations(&doc);

        let anchors: Vec<_> = collected.citations.values().map(|s| s.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["RFC7991"]);
    }

    #[test]
    fn test_only_first_title_counts() {
        let doc = Node::Document(vec![
            title(&["Alice"], &[]),
            title(&["Bob"], &[]),
            cite("Alice", CitationKind::Normative),
            cite("Bob", CitationKind::Normative),
        ]);
        let collected = collect_citations(&doc);

        assert!(!collected.citations.contains_key("alice"));
        assert_eq!(collected.citations["bob"].anchor, "Bob");
    }

    #[test]
    fn test_title_without_data() {
        let doc = Node::Document(vec![
            Node::Title(Title::default()),
            cite("A", CitationKind::Normative),
        ]);
        assert_eq!(collect_citations(&doc).citations.len(), 1);
    }

    #[test]
    fn test_raw_blocks_last_wins_and_match_any_case() {
        let first = r#"<reference anchor="Dup"><front><title>first</title></front></reference>"#;
        let second = r#"<reference anchor="DUP"><front><title>second</title></front></reference>"#;
        let doc = Node::Document(vec![
            Node::ReferenceBlock(ReferenceBlock::new(first)),
            Node::ReferenceBlock(ReferenceBlock::new(second)),
            cite("dup", CitationKind::Normative),
        ]);

        let collected = collect_citations(&doc);
        assert_eq!(collected.raw.len(), 1);
        assert_eq!(collected.raw["dup"], second);

        let (normative, _) = assemble_bibliography(&collected, &mut RenderContext::new());
        let normative = normative.unwrap();
        let item = normative.items().next().unwrap();
        assert_eq!(item.reference().unwrap().front.title.text, "second");
    }

    #[test]
    fn test_reference_blocks_without_anchor_are_ignored() {
        let doc = Node::Document(vec![Node::ReferenceBlock(ReferenceBlock::new(
            "<reference target='x'></reference>",
        ))]);
        assert!(collect_citations(&doc).raw.is_empty());
    }

    #[test]
    fn test_first_back_matter_is_used() {
        let mut doc = Node::Document(vec![
            cite("A", CitationKind::Normative),
            back_matter(vec![]),
            back_matter(vec![]),
        ]);
        assert!(add_bibliography(&mut doc, &mut RenderContext::new()));

        let Node::Document(children) = &doc else {
            panic!("Expected Document");
        };
        assert_eq!(children[1].children().map(<[Node]>::len), Some(1));
        assert_eq!(children[2].children().map(<[Node]>::len), Some(0));
    }

    #[test]
    fn test_transform_name_and_run() {
        let transform = BibliographyTransform::new();
        assert_eq!(transform.name(), "bibliography");

        let mut doc = Node::Document(vec![cite("A", CitationKind::Normative), back_matter(vec![])]);
        transform.transform(&mut doc, &mut RenderContext::new()).unwrap();
        assert_eq!(back_children(&doc).len(), 1);
    }
}
