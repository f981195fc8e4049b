//! Node and token kinds.

use std::fmt;

/// Identifies the shape of a node or token in the syntax tree.
///
/// Node kinds come first, token kinds after. Names follow the conventional
/// C# syntax vocabulary since that is the language the engine rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Declarations and statements
    /// Root of a parsed document.
    CompilationUnit,
    /// `using Some.Namespace;`
    UsingDirective,
    /// `var x = expr;`
    LocalDeclarationStatement,
    /// `expr;`
    ExpressionStatement,

    // Expressions
    /// `callee(args)`
    InvocationExpression,
    /// `(a, b)` following a callee
    ArgumentList,
    /// A single entry in an argument list.
    Argument,
    /// `target.name`
    SimpleMemberAccessExpression,
    /// `typeof(T)`
    TypeOfExpression,
    /// `(expr)`
    ParenthesizedExpression,
    /// Numeric, string, `true`, `false` or `null`.
    LiteralExpression,
    /// `this`
    ThisExpression,

    // Names and types
    /// `Name`
    IdentifierName,
    /// `Name<T1, T2>`
    GenericName,
    /// `<T1, T2>`
    TypeArgumentList,
    /// `Left.Right`
    QualifiedName,
    /// `global::Name`
    AliasQualifiedName,
    /// `int`, `string`, ...
    PredefinedType,
    /// `T[]`
    ArrayType,
    /// `[]` or `[,]`
    ArrayRankSpecifier,
    /// `T?`
    NullableType,
    /// `T*`
    PointerType,
    /// `(T1, T2 name)`
    TupleType,
    /// One element of a tuple type.
    TupleElement,

    // Tokens
    IdentifierToken,
    /// Reserved word (`typeof`, `using`, `int`, `true`, ...).
    KeywordToken,
    NumericLiteralToken,
    StringLiteralToken,
    DotToken,
    CommaToken,
    SemicolonToken,
    EqualsToken,
    OpenParenToken,
    CloseParenToken,
    LessThanToken,
    GreaterThanToken,
    OpenBracketToken,
    CloseBracketToken,
    QuestionToken,
    AsteriskToken,
    ColonColonToken,
    /// Zero-width token that carries trivia at the end of a document.
    EndOfFileToken,
}

impl SyntaxKind {
    /// True for token kinds.
    pub fn is_token(self) -> bool {
        matches!(
            self,
            SyntaxKind::IdentifierToken
                | SyntaxKind::KeywordToken
                | SyntaxKind::NumericLiteralToken
                | SyntaxKind::StringLiteralToken
                | SyntaxKind::DotToken
                | SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::ColonColonToken
                | SyntaxKind::EndOfFileToken
        )
    }

    /// True for node kinds that denote a type.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::IdentifierName
                | SyntaxKind::GenericName
                | SyntaxKind::QualifiedName
                | SyntaxKind::AliasQualifiedName
                | SyntaxKind::PredefinedType
                | SyntaxKind::ArrayType
                | SyntaxKind::NullableType
                | SyntaxKind::PointerType
                | SyntaxKind::TupleType
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_and_nodes_are_disjoint() {
        assert!(SyntaxKind::CommaToken.is_token());
        assert!(!SyntaxKind::ArgumentList.is_token());
        assert!(!SyntaxKind::CommaToken.is_type());
    }

    #[test]
    fn names_are_types() {
        assert!(SyntaxKind::GenericName.is_type());
        assert!(SyntaxKind::TupleType.is_type());
        assert!(!SyntaxKind::InvocationExpression.is_type());
    }
}
