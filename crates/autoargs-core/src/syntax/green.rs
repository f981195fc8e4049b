//! Green tree: the immutable, shareable payload of a syntax tree.
//!
//! Green nodes know their kind, children and width, but not their position
//! or parent. That makes them freely shareable: a rewrite rebuilds only the
//! nodes on the path from the edit to the root and reuses every other
//! subtree by reference count.
//!
//! Tokens carry their surrounding trivia (whitespace, comments, line
//! breaks), so writing out the tokens of a tree reproduces its source
//! exactly.

use std::fmt;
use std::sync::Arc;

use super::kind::SyntaxKind;

// ============================================================================
// Tokens
// ============================================================================

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    kind: SyntaxKind,
    leading: String,
    text: String,
    trailing: String,
}

/// An immutable token with leading and trailing trivia.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken(Arc<GreenTokenData>);

impl GreenToken {
    /// Create a token without trivia.
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self::with_trivia(kind, "", text, "")
    }

    /// Create a token with explicit trivia.
    pub fn with_trivia(
        kind: SyntaxKind,
        leading: impl Into<String>,
        text: impl Into<String>,
        trailing: impl Into<String>,
    ) -> Self {
        debug_assert!(kind.is_token(), "{kind} is not a token kind");
        GreenToken(Arc::new(GreenTokenData {
            kind,
            leading: leading.into(),
            text: text.into(),
            trailing: trailing.into(),
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Token text without trivia.
    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn leading_trivia(&self) -> &str {
        &self.0.leading
    }

    pub fn trailing_trivia(&self) -> &str {
        &self.0.trailing
    }

    /// Width including trivia.
    pub fn full_len(&self) -> usize {
        self.0.leading.len() + self.0.text.len() + self.0.trailing.len()
    }

    /// A copy of this token with `trivia` appended to its trailing trivia.
    pub fn append_trailing(&self, trivia: &str) -> Self {
        let mut trailing = self.0.trailing.clone();
        trailing.push_str(trivia);
        GreenToken::with_trivia(self.kind(), self.0.leading.clone(), self.0.text.clone(), trailing)
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.0.leading);
        out.push_str(&self.0.text);
        out.push_str(&self.0.trailing);
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind(), self.text())
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A child of a green node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(node) => node.kind(),
            GreenElement::Token(token) => token.kind(),
        }
    }

    pub fn full_len(&self) -> usize {
        match self {
            GreenElement::Node(node) => node.full_len(),
            GreenElement::Token(token) => token.full_len(),
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            GreenElement::Node(node) => Some(node),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(_) => None,
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    full_len: usize,
    children: Vec<GreenElement>,
}

/// An immutable interior node.
///
/// Equality is structural: two independently built nodes with the same
/// shape and text compare equal. Use [`GreenNode::ptr_eq`] to ask whether
/// two handles share the same allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        debug_assert!(!kind.is_token(), "{kind} is a token kind");
        let full_len = children.iter().map(GreenElement::full_len).sum();
        GreenNode(Arc::new(GreenNodeData {
            kind,
            full_len,
            children,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Width including all trivia.
    pub fn full_len(&self) -> usize {
        self.0.full_len
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    /// True if both handles point at the same shared node.
    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// A copy of this node with child `index` replaced.
    ///
    /// Siblings are shared with `self`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn replace_child(&self, index: usize, child: GreenElement) -> GreenNode {
        let mut children = self.0.children.clone();
        children[index] = child;
        GreenNode::new(self.kind(), children)
    }

    /// First token in document order, if any.
    pub fn first_token(&self) -> Option<&GreenToken> {
        self.0.children.iter().find_map(|child| match child {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(node) => node.first_token(),
        })
    }

    /// Last token in document order, if any.
    pub fn last_token(&self) -> Option<&GreenToken> {
        self.0.children.iter().rev().find_map(|child| match child {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(node) => node.last_token(),
        })
    }

    /// A copy of this node with `trivia` appended after its last token.
    ///
    /// Only the path down to the last token is rebuilt. A node without
    /// tokens is returned unchanged.
    pub fn append_trailing_trivia(&self, trivia: &str) -> GreenNode {
        for (index, child) in self.0.children.iter().enumerate().rev() {
            let replacement = match child {
                GreenElement::Token(token) => GreenElement::Token(token.append_trailing(trivia)),
                GreenElement::Node(node) if node.last_token().is_some() => {
                    GreenElement::Node(node.append_trailing_trivia(trivia))
                }
                GreenElement::Node(_) => continue,
            };
            return self.replace_child(index, replacement);
        }
        self.clone()
    }

    /// Width of the leading trivia of the first token.
    pub fn leading_trivia_len(&self) -> usize {
        self.first_token()
            .map(|t| t.leading_trivia().len())
            .unwrap_or(0)
    }

    /// Width of the trailing trivia of the last token.
    pub fn trailing_trivia_len(&self) -> usize {
        self.last_token()
            .map(|t| t.trailing_trivia().len())
            .unwrap_or(0)
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        for child in &self.0.children {
            match child {
                GreenElement::Node(node) => node.write_to(out),
                GreenElement::Token(token) => token.write_to(out),
            }
        }
    }

    /// Source text without the outer leading/trailing trivia.
    pub fn text(&self) -> String {
        let full = self.to_string();
        let start = self.leading_trivia_len();
        let end = full.len() - self.trailing_trivia_len();
        if start >= end {
            return String::new();
        }
        full[start..end].to_string()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.full_len());
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str, trailing: &str) -> GreenNode {
        GreenNode::new(
            SyntaxKind::IdentifierName,
            vec![GreenToken::with_trivia(SyntaxKind::IdentifierToken, "", text, trailing).into()],
        )
    }

    fn access(target: &str, member: &str) -> GreenNode {
        GreenNode::new(
            SyntaxKind::SimpleMemberAccessExpression,
            vec![
                name(target, "").into(),
                GreenToken::new(SyntaxKind::DotToken, ".").into(),
                name(member, "").into(),
            ],
        )
    }

    #[test]
    fn full_len_sums_children() {
        let node = access("calc", "Add");
        assert_eq!(node.full_len(), "calc.Add".len());
        assert_eq!(node.to_string(), "calc.Add");
    }

    #[test]
    fn equality_is_structural() {
        let a = access("calc", "Add");
        let b = access("calc", "Add");
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn replace_child_shares_siblings() {
        let node = access("calc", "Add");
        let replaced = node.replace_child(2, name("Sub", "").into());
        assert_eq!(replaced.to_string(), "calc.Sub");
        let before = node.children()[0].as_node().unwrap();
        let after = replaced.children()[0].as_node().unwrap();
        assert!(before.ptr_eq(after));
    }

    #[test]
    fn append_trailing_trivia_targets_last_token() {
        let node = access("calc", "Add");
        let appended = node.append_trailing_trivia("\n");
        assert_eq!(appended.to_string(), "calc.Add\n");
        assert_eq!(appended.text(), "calc.Add");
        assert_eq!(appended.trailing_trivia_len(), 1);
    }

    #[test]
    fn text_strips_outer_trivia_only() {
        let node = GreenNode::new(
            SyntaxKind::IdentifierName,
            vec![GreenToken::with_trivia(SyntaxKind::IdentifierToken, "  ", "x", " // c\n").into()],
        );
        assert_eq!(node.text(), "x");
        assert_eq!(node.to_string(), "  x // c\n");
    }
}
