//! Typed views over [`SyntaxNode`]s.
//!
//! Each view wraps a node of one kind and exposes its interesting children
//! by role. `cast` returns `None` for nodes of any other kind.

use super::kind::SyntaxKind;
use super::node::SyntaxNode;

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == $kind).then_some($name(node))
            }

            pub fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(
    /// `callee(arguments)`
    InvocationExpression,
    SyntaxKind::InvocationExpression
);
ast_node!(
    /// The parenthesized argument list of an invocation.
    ArgumentList,
    SyntaxKind::ArgumentList
);
ast_node!(
    /// `target.member`
    MemberAccessExpression,
    SyntaxKind::SimpleMemberAccessExpression
);
ast_node!(
    /// `typeof(T)`
    TypeOfExpression,
    SyntaxKind::TypeOfExpression
);

impl InvocationExpression {
    /// The invoked expression (usually a member access).
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|child| child.kind() != SyntaxKind::ArgumentList)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.0
            .child_of_kind(SyntaxKind::ArgumentList)
            .and_then(ArgumentList::cast)
    }

    /// The callee viewed as a member access, if it is one.
    pub fn member_access(&self) -> Option<MemberAccessExpression> {
        self.expression().and_then(MemberAccessExpression::cast)
    }
}

impl ArgumentList {
    /// Argument nodes in order.
    pub fn arguments(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|child| child.kind() == SyntaxKind::Argument)
    }

    pub fn len(&self) -> usize {
        self.arguments().count()
    }

    /// True when the list has no arguments, e.g. `()`.
    pub fn is_empty(&self) -> bool {
        self.arguments().next().is_none()
    }

    /// The invocation this list belongs to, if its parent is one.
    pub fn invocation(&self) -> Option<InvocationExpression> {
        self.0.parent().and_then(InvocationExpression::cast)
    }
}

impl MemberAccessExpression {
    /// The receiver (`target` in `target.member`).
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    /// The member name node (`IdentifierName` or `GenericName`).
    pub fn name(&self) -> Option<SyntaxNode> {
        self.0.children().nth(1)
    }

    /// The member identifier text, without type arguments.
    pub fn member_name(&self) -> Option<String> {
        self.name()
            .and_then(|name| name.token_of_kind(SyntaxKind::IdentifierToken))
            .map(|token| token.text().to_string())
    }
}

impl TypeOfExpression {
    /// The type operand.
    pub fn type_node(&self) -> Option<SyntaxNode> {
        self.0.children().find(|child| child.kind().is_type())
    }
}
