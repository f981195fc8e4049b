//! Constructors for generated syntax.
//!
//! Generated nodes carry no trivia except a single space after list
//! separators, so `Arg.Any<int>(), Arg.Any<string>()` reads the way a
//! person would write it.

use super::green::{GreenElement, GreenNode, GreenToken};
use super::kind::SyntaxKind;

pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind, text)
}

fn separator() -> GreenToken {
    GreenToken::with_trivia(SyntaxKind::CommaToken, "", ",", " ")
}

/// Interleave `items` with `, ` separators.
fn separated(items: impl IntoIterator<Item = GreenNode>) -> Vec<GreenElement> {
    let mut out = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(separator().into());
        }
        out.push(item.into());
    }
    out
}

pub fn identifier_name(name: &str) -> GreenNode {
    GreenNode::new(
        SyntaxKind::IdentifierName,
        vec![token(SyntaxKind::IdentifierToken, name).into()],
    )
}

/// `<T1, T2>`
pub fn type_argument_list(types: impl IntoIterator<Item = GreenNode>) -> GreenNode {
    let mut children = vec![token(SyntaxKind::LessThanToken, "<").into()];
    children.extend(separated(types));
    children.push(token(SyntaxKind::GreaterThanToken, ">").into());
    GreenNode::new(SyntaxKind::TypeArgumentList, children)
}

/// `Name<T1, T2>`
pub fn generic_name(name: &str, type_arguments: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::GenericName,
        vec![
            token(SyntaxKind::IdentifierToken, name).into(),
            type_arguments.into(),
        ],
    )
}

/// `target.name`
pub fn member_access(target: GreenNode, name: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::SimpleMemberAccessExpression,
        vec![
            target.into(),
            token(SyntaxKind::DotToken, ".").into(),
            name.into(),
        ],
    )
}

pub fn argument(expression: GreenNode) -> GreenNode {
    GreenNode::new(SyntaxKind::Argument, vec![expression.into()])
}

/// `(a, b)`
pub fn argument_list(arguments: impl IntoIterator<Item = GreenNode>) -> GreenNode {
    let mut children = vec![token(SyntaxKind::OpenParenToken, "(").into()];
    children.extend(separated(arguments));
    children.push(token(SyntaxKind::CloseParenToken, ")").into());
    GreenNode::new(SyntaxKind::ArgumentList, children)
}

/// `expression(arguments)`
pub fn invocation(expression: GreenNode, arguments: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::InvocationExpression,
        vec![expression.into(), arguments.into()],
    )
}
