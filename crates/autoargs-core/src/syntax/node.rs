//! Positioned view over the green tree.
//!
//! A [`SyntaxNode`] pairs a green node with its absolute offset and a
//! back-reference to its parent. Parents do not own their positioned
//! children; children are materialized on demand while walking.
//!
//! # Rewriting
//!
//! [`SyntaxNode::replace_with`] swaps one node for a new green node and
//! returns the root of a new tree. Only the ancestors of the replaced node
//! are rebuilt; every other subtree is shared with the original tree.

use std::fmt;
use std::sync::Arc;

use super::green::{GreenElement, GreenNode, GreenToken};
use super::kind::SyntaxKind;
use crate::text::Span;

struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    index_in_parent: usize,
    offset: usize,
}

/// A node positioned within one tree snapshot.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

impl SyntaxNode {
    /// Wrap a green node as the root of a tree.
    pub fn new_root(green: GreenNode) -> Self {
        SyntaxNode(Arc::new(NodeData {
            green,
            parent: None,
            index_in_parent: 0,
            offset: 0,
        }))
    }

    fn new_child(parent: &SyntaxNode, green: GreenNode, index: usize, offset: usize) -> Self {
        SyntaxNode(Arc::new(NodeData {
            green,
            parent: Some(parent.clone()),
            index_in_parent: index,
            offset,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        self.0.parent.clone()
    }

    /// Index among the parent's children (tokens included).
    pub fn index_in_parent(&self) -> usize {
        self.0.index_in_parent
    }

    /// This node followed by each of its ancestors up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(Some(self.clone()), SyntaxNode::parent)
    }

    pub fn root(&self) -> SyntaxNode {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    /// Child nodes in order, skipping tokens.
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        let mut offset = self.0.offset;
        self.0
            .green
            .children()
            .iter()
            .enumerate()
            .filter_map(move |(index, child)| {
                let child_offset = offset;
                offset += child.full_len();
                child
                    .as_node()
                    .map(|green| SyntaxNode::new_child(self, green.clone(), index, child_offset))
            })
    }

    /// Child tokens in order, skipping nodes.
    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        let mut offset = self.0.offset;
        self.0.green.children().iter().filter_map(move |child| {
            let child_offset = offset;
            offset += child.full_len();
            child.as_token().map(|green| SyntaxToken {
                green: green.clone(),
                offset: child_offset,
            })
        })
    }

    /// First child node of the given kind.
    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.children().find(|child| child.kind() == kind)
    }

    /// First child token of the given kind.
    pub fn token_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.child_tokens().find(|token| token.kind() == kind)
    }

    /// This node and all nodes below it, in pre-order.
    pub fn descendants(&self) -> Vec<SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            let children: Vec<SyntaxNode> = node.children().collect();
            stack.extend(children.into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Range including leading and trailing trivia.
    pub fn full_span(&self) -> Span {
        Span::new(self.0.offset, self.0.offset + self.0.green.full_len())
    }

    /// Range of the node's own text, without outer trivia.
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let start = full.start + self.0.green.leading_trivia_len();
        let end = full.end - self.0.green.trailing_trivia_len();
        if start > end {
            Span::caret(start)
        } else {
            Span::new(start, end)
        }
    }

    /// Source text without outer trivia.
    pub fn text(&self) -> String {
        self.0.green.text()
    }

    /// The deepest node whose span contains `span`.
    ///
    /// When a parent and child cover exactly the same span, the outermost of
    /// them is returned, so a caret on `calc` in `calc.Add()` yields the
    /// identifier while a caret between the parentheses yields the argument
    /// list. Returns `None` if `span` lies outside this node.
    pub fn find_node(&self, span: Span) -> Option<SyntaxNode> {
        if !self.full_span().contains(&span) {
            return None;
        }
        let mut current = self.clone();
        loop {
            let next = current
                .children()
                .find(|child| child.span().contains(&span) && !child.span().is_empty());
            match next {
                Some(child) => current = child,
                None => break,
            }
        }
        while let Some(parent) = current.parent() {
            if parent.span() != current.span() {
                break;
            }
            current = parent;
        }
        Some(current)
    }

    /// Replace this node with `replacement`, returning the new tree's root.
    ///
    /// Every ancestor is rebuilt with the new child; all other subtrees are
    /// shared with the current tree.
    pub fn replace_with(&self, replacement: GreenNode) -> SyntaxNode {
        let mut green = replacement;
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            green = parent
                .green()
                .replace_child(current.index_in_parent(), GreenElement::Node(green));
            current = parent;
        }
        SyntaxNode::new_root(green)
    }
}

impl PartialEq for SyntaxNode {
    /// Identity within a snapshot: same green node at the same offset under
    /// the same root.
    fn eq(&self, other: &Self) -> bool {
        self.0.offset == other.0.offset
            && self.0.green.ptr_eq(&other.0.green)
            && self.root().0.green.ptr_eq(&other.root().0.green)
    }
}

impl Eq for SyntaxNode {}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.green, f)
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind(), self.span())
    }
}

/// A token positioned within a tree.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    green: GreenToken,
    offset: usize,
}

impl SyntaxToken {
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    /// Range of the token text, without trivia.
    pub fn span(&self) -> Span {
        let start = self.offset + self.green.leading_trivia().len();
        Span::new(start, start + self.green.text().len())
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}", self.kind(), self.text(), self.span())
    }
}
