/*
 * walk.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Depth-first traversal of the document tree.
 */

use crate::node::Node;

/// What a visitor wants the walk to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Descend into children, then continue with siblings.
    Continue,
    /// Do not descend into this node's children.
    SkipChildren,
    /// Stop the whole walk.
    Terminate,
}

/// Visit `node` and its descendants in pre-order.
///
/// Returns [`WalkStatus::Terminate`] if the visitor stopped the walk.
///
/// ```rust
/// use rfcmark_ast::{Node, WalkStatus, walk};
///
/// let doc = Node::Document(vec![
///     Node::Paragraph(vec![Node::Text("a".into())]),
///     Node::Text("b".into()),
/// ]);
///
/// let mut texts = Vec::new();
/// walk(&doc, &mut |node| {
///     if let Node::Text(t) = node {
///         texts.push(t.as_str());
///     }
///     WalkStatus::Continue
/// });
/// assert_eq!(texts, vec!["a", "b"]);
/// ```
pub fn walk<'a, F>(node: &'a Node, visitor: &mut F) -> WalkStatus
where
    F: FnMut(&'a Node) -> WalkStatus,
{
    match visitor(node) {
        WalkStatus::Terminate => return WalkStatus::Terminate,
        WalkStatus::SkipChildren => return WalkStatus::Continue,
        WalkStatus::Continue => {}
    }

    if let Some(children) = node.children() {
        for child in children {
            if walk(child, visitor) == WalkStatus::Terminate {
                return WalkStatus::Terminate;
            }
        }
    }

    WalkStatus::Continue
}

/// First node in pre-order matching `predicate`.
pub fn find<'a, P>(node: &'a Node, predicate: &P) -> Option<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    let mut found = None;
    walk(node, &mut |n| {
        if predicate(n) {
            found = Some(n);
            WalkStatus::Terminate
        } else {
            WalkStatus::Continue
        }
    });
    found
}

/// Mutable counterpart of [`find`].
pub fn find_mut<'a, P>(node: &'a mut Node, predicate: &P) -> Option<&'a mut Node>
where
    P: Fn(&Node) -> bool,
{
    if predicate(node) {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|child| find_mut(child, predicate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Citation, CitationKind, DocumentMatter, Matter};

    fn sample() -> Node {
        Node::Document(vec![
            Node::Paragraph(vec![
                Node::Text("one".to_string()),
                Node::Citation(Citation::single("A", CitationKind::Normative)),
            ]),
            Node::DocumentMatter(DocumentMatter {
                matter: Matter::Back,
                children: vec![Node::Text("two".to_string())],
            }),
            Node::Text("three".to_string()),
        ])
    }

    fn texts(node: &Node) -> Vec<String> {
        let mut out = Vec::new();
        walk(node, &mut |n| {
            if let Node::Text(t) = n {
                out.push(t.clone());
            }
            WalkStatus::Continue
        });
        out
    }

    #[test]
    fn test_walk_is_pre_order() {
        assert_eq!(texts(&sample()), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_walk_terminate_stops_everything() {
        let doc = sample();
        let mut seen = 0;
        let status = walk(&doc, &mut |n| {
            seen += 1;
            if matches!(n, Node::Citation(_)) {
                WalkStatus::Terminate
            } else {
                WalkStatus::Continue
            }
        });
        // Document, Paragraph, Text, Citation
        assert_eq!(seen, 4);
        assert_eq!(status, WalkStatus::Terminate);
    }

    #[test]
    fn test_walk_skip_children() {
        let doc = sample();
        let mut out = Vec::new();
        walk(&doc, &mut |n| match n {
            Node::DocumentMatter(_) => WalkStatus::SkipChildren,
            Node::Text(t) => {
                out.push(t.as_str());
                WalkStatus::Continue
            }
            _ => WalkStatus::Continue,
        });
        assert_eq!(out, vec!["one", "three"]);
    }

    #[test]
    fn test_find_mut_allows_insertion() {
        let mut doc = sample();
        let back = find_mut(&mut doc, &Node::is_back_matter).unwrap();
        back.append_child(Node::Text("appended".to_string()));

        assert_eq!(texts(&doc), vec!["one", "two", "appended", "three"]);
    }

    #[test]
    fn test_find_returns_first_match() {
        let doc = sample();
        let first_text = find(&doc, &|n| matches!(n, Node::Text(_)));
        assert_eq!(first_text, Some(&Node::Text("one".to_string())));
        assert!(find(&doc, &|n| matches!(n, Node::Title(_))).is_none());
    }
}
