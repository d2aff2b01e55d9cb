/*
 * reference_block.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Raw <reference> and <referencegroup> blocks embedded in documents.
 */

//! Raw reference blocks.
//!
//! Authors can paste RFC 7991 `<reference>` or `<referencegroup>` markup
//! directly into a document. The block parser calls [`reference_hook`] at
//! each block start; the bibliography transform later finds the blocks by
//! their anchor with [`anchor_from_reference`].

use rfcmark_ast::{Node, ReferenceBlock};
use rfcmark_reference::{decode_reference, encode_reference};

const REFERENCE_OPEN: &str = "<reference ";
const REFERENCE_CLOSE: &str = "</reference>";
const GROUP_OPEN: &str = "<referencegroup ";
const GROUP_CLOSE: &str = "</referencegroup>";

const ANCHOR: &str = "anchor=";

fn closing_marker(data: &str) -> Option<&'static str> {
    if data.starts_with(REFERENCE_OPEN) {
        Some(REFERENCE_CLOSE)
    } else if data.starts_with(GROUP_OPEN) {
        Some(GROUP_CLOSE)
    } else {
        None
    }
}

/// Return the reference block at the start of `data`, if there is one.
///
/// The block runs from the opening `<reference ` (or `<referencegroup `)
/// through the first matching closing tag, across lines. Anything after the
/// closing tag is not part of the block.
///
/// ```rust
/// use rfcmark_core::reference_block::recognize_reference;
///
/// let data = "<reference anchor='a'>\n</reference>\ntrailing";
/// assert_eq!(recognize_reference(data), Some("<reference anchor='a'>\n</reference>"));
/// assert_eq!(recognize_reference(" <reference anchor='a'></reference>"), None);
/// ```
pub fn recognize_reference(data: &str) -> Option<&str> {
    let close = closing_marker(data)?;

    // The search starts one closing-tag length in.
    let rest = data.as_bytes().get(close.len()..)?;
    let end = rest
        .windows(close.len())
        .position(|window| window == close.as_bytes())?;
    if end == 0 || end > data.len() {
        return None;
    }

    data.get(..end + 2 * close.len())
}

/// Extract the `anchor` attribute value from a raw reference block.
///
/// The value is returned exactly as written, between the quote character
/// that follows `anchor=` and the next occurrence of that same character.
/// The quote is a single byte; a multi-byte character after `anchor=` has
/// no value and gives `None`.
pub fn anchor_from_reference(data: &str) -> Option<&str> {
    closing_marker(data)?;

    let beg = data.find(ANCHOR)? + ANCHOR.len();
    let quote = *data.as_bytes().get(beg)?;
    let len = data
        .as_bytes()
        .get(beg + 1..)?
        .iter()
        .position(|&b| b == quote)?;

    data.get(beg + 1..beg + 1 + len)
}

/// Rewrite a reference in canonical, indented form.
///
/// Input that does not decode as a `<reference>` (including every
/// `<referencegroup>`) is returned unchanged.
pub fn reformat_reference(data: &str) -> String {
    decode_reference(data)
        .and_then(|reference| encode_reference(&reference))
        .unwrap_or_else(|_| data.to_string())
}

/// Block parser hook for raw reference blocks.
///
/// Returns the [`Node::ReferenceBlock`] for the block at the start of `data`
/// together with the number of bytes it consumed.
pub fn reference_hook(data: &str) -> Option<(Node, usize)> {
    let span = recognize_reference(data)?;
    let block = ReferenceBlock::new(reformat_reference(span));
    Some((Node::ReferenceBlock(block), span.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_single_reference() {
        let data = r#"<reference anchor="RFC2119"><front><title>Key words</title></front></reference>"#;
        assert_eq!(recognize_reference(data), Some(data));
    }

    #[test]
    fn test_recognize_excludes_trailing_content() {
        let block = "<reference anchor='x'>\n  <front/>\n</reference>";
        let data = format!("{block}\n\nNext paragraph.");
        assert_eq!(recognize_reference(&data), Some(block));
    }

    #[test]
    fn test_recognize_group_uses_group_close() {
        let data = "<referencegroup anchor='BCP14'>\n<reference anchor='RFC2119'></reference>\n<reference anchor='RFC8174'></reference>\n</referencegroup>";
        assert_eq!(recognize_reference(data), Some(data));
    }

    #[test]
    fn test_recognize_stops_at_first_close() {
        let data = "<reference anchor='a'></reference><reference anchor='b'></reference>";
        assert_eq!(
            recognize_reference(data),
            Some("<reference anchor='a'></reference>")
        );
    }

    #[test]
    fn test_recognize_requires_opener() {
        assert_eq!(recognize_reference(""), None);
        assert_eq!(recognize_reference("<reference>x</reference>"), None);
        assert_eq!(recognize_reference("  <reference anchor='a'></reference>"), None);
        assert_eq!(recognize_reference("<references title='x'></references>"), None);
    }

    #[test]
    fn test_recognize_unclosed() {
        assert_eq!(recognize_reference("<reference anchor='a'>"), None);
        assert_eq!(recognize_reference("<referencegroup anchor='a'></reference>"), None);
    }

    #[test]
    fn test_recognize_boundary_sizes() {
        // Closing tag exactly at the search start is an empty match.
        assert_eq!(recognize_reference("<reference x</reference>"), None);
        // One byte later is the smallest accepted block.
        assert_eq!(
            recognize_reference("<reference xy</reference>"),
            Some("<reference xy</reference>")
        );
        // Shorter than opener plus closing tag.
        assert_eq!(recognize_reference("<reference "), None);

        assert_eq!(recognize_reference("<referencegroup x</referencegroup>"), None);
        assert_eq!(
            recognize_reference("<referencegroup xy</referencegroup>"),
            Some("<referencegroup xy</referencegroup>")
        );
    }

    #[test]
    fn test_recognize_non_ascii_after_opener() {
        let data = "<reference é anchor='a'></reference>";
        assert_eq!(recognize_reference(data), Some(data));
    }

    #[test]
    fn test_anchor_quotes() {
        assert_eq!(
            anchor_from_reference(r#"<reference anchor="RFC2119" target="x">"#),
            Some("RFC2119")
        );
        assert_eq!(
            anchor_from_reference("<referencegroup anchor='BCP14'>"),
            Some("BCP14")
        );
    }

    #[test]
    fn test_anchor_is_not_normalized() {
        assert_eq!(
            anchor_from_reference(r#"<reference anchor=" Mixed Case ">"#),
            Some(" Mixed Case ")
        );
    }

    #[test]
    fn test_anchor_after_other_attributes() {
        assert_eq!(
            anchor_from_reference("<reference target='https://example.com' anchor='late'>"),
            Some("late")
        );
    }

    #[test]
    fn test_anchor_missing_or_malformed() {
        assert_eq!(anchor_from_reference("<reference target='x'>"), None);
        assert_eq!(anchor_from_reference("<reference anchor="), None);
        assert_eq!(anchor_from_reference("<reference anchor='unterminated"), None);
        assert_eq!(anchor_from_reference("<front anchor='x'>"), None);
        assert_eq!(anchor_from_reference("anchor='x'"), None);
    }

    #[test]
    fn test_anchor_with_multibyte_quote() {
        assert_eq!(anchor_from_reference("<reference anchor=éxé>"), None);
        assert_eq!(anchor_from_reference("<reference anchor=ΣaΣ>"), None);
    }

    #[test]
    fn test_anchor_value_may_be_non_ascii() {
        assert_eq!(
            anchor_from_reference("<reference anchor='ΟΔΟΣ'>"),
            Some("ΟΔΟΣ")
        );
    }

    #[test]
    fn test_anchor_empty_value() {
        assert_eq!(anchor_from_reference("<reference anchor=''>"), Some(""));
    }

    #[test]
    fn test_reformat_decodable_reference() {
        let data = "<reference anchor='RFC2119'><front><title>Key words</title><date year='1997'/></front></reference>";
        let out = reformat_reference(data);
        assert_eq!(
            out,
            "<reference anchor=\"RFC2119\">\n   <front>\n      <title>Key words</title>\n      <date year=\"1997\"/>\n   </front>\n</reference>"
        );
    }

    #[test]
    fn test_reformat_keeps_undecodable_input() {
        let data = r#"<reference anchor="BadRef">not-xml-garbage</reference>"#;
        assert_eq!(reformat_reference(data), data);

        let group = "<referencegroup anchor='BCP14'><reference anchor='RFC2119'><front><title>x</title></front></reference></referencegroup>";
        assert_eq!(reformat_reference(group), group);
    }

    #[test]
    fn test_hook_consumes_block_only() {
        let data = "<reference anchor='RFC2119'><front><title>Key words</title></front></reference>\nrest";
        let (node, consumed) = reference_hook(data).unwrap();

        assert_eq!(&data[consumed..], "\nrest");
        let Node::ReferenceBlock(block) = node else {
            panic!("Expected ReferenceBlock");
        };
        assert!(block.literal.starts_with("<reference anchor=\"RFC2119\">\n   <front>"));
        assert_eq!(anchor_from_reference(&block.literal), Some("RFC2119"));
    }

    #[test]
    fn test_hook_no_match() {
        assert!(reference_hook("Just a paragraph.").is_none());
    }
}
