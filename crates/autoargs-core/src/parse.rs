//! Lossless parser for the C# subset the engine works with.
//!
//! The parser covers what is needed to locate and rewrite calls on mocked
//! interfaces and to round-trip type names through `typeof(...)`:
//!
//! ## Grammar
//!
//! ```text
//! <unit>        := <statement>* EOF
//! <statement>   := "using" <name> ";"
//!                | <type> IDENT "=" <expr> ";"
//!                | <expr> ";"
//! <expr>        := <primary> ("." <simple-name> | <arguments>)*
//! <primary>     := "typeof" "(" <type> ")" | <literal> | "this"
//!                | "(" <expr> ")" | <predefined> | <name>
//! <arguments>   := "(" [<expr> ("," <expr>)*] ")"
//! <type>        := (<predefined> | <tuple> | <name>) ("?" | "*" | "[" ","* "]")*
//! <name>        := [IDENT "::"] <simple-name> ("." <simple-name>)*
//! <simple-name> := IDENT ["<" <type> ("," <type>)* ">"]
//! <tuple>       := "(" <type> [IDENT] ("," <type> [IDENT])+ ")"
//! ```
//!
//! Whitespace and `//` comments are kept as trivia on the neighbouring
//! tokens: a token owns the rest of its line (up to and including the line
//! break) as trailing trivia, and everything before it as leading trivia.
//! Printing a parsed tree therefore reproduces the input exactly.

use winnow::ascii::{digit1, line_ending, multispace0, space0};
use winnow::combinator::{alt, opt, repeat};
use winnow::error::{ErrMode, ParserError};
use winnow::prelude::*;
use winnow::token::{any, literal, one_of, take_till, take_while};
use winnow::ModalResult;

use crate::error::ParseError;
use crate::syntax::{GreenElement, GreenNode, GreenToken, SyntaxKind, SyntaxNode};

/// Keywords that name built-in types.
pub const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
    "short", "ushort", "object", "string", "void", "nint", "nuint",
];

/// Keywords that can never be identifiers.
const RESERVED: &[&str] = &[
    "typeof", "using", "true", "false", "null", "this", "new", "class", "interface", "namespace",
    "return",
];

fn is_reserved(word: &str) -> bool {
    PREDEFINED_TYPES.contains(&word) || RESERVED.contains(&word)
}

// ============================================================================
// Public API
// ============================================================================

/// Parse a whole document.
///
/// # Examples
///
/// ```
/// use autoargs_core::parse::parse_compilation_unit;
///
/// let source = "using NSubstitute;\ncalc.Add();\n";
/// let root = parse_compilation_unit(source).unwrap();
/// assert_eq!(root.to_string(), source);
/// ```
pub fn parse_compilation_unit(source: &str) -> Result<SyntaxNode, ParseError> {
    compilation_unit
        .parse(source)
        .map(SyntaxNode::new_root)
        .map_err(|e| syntax_error(e.offset(), e.inner().to_string()))
}

/// Parse a standalone expression; the whole input must be consumed.
///
/// # Examples
///
/// ```
/// use autoargs_core::parse::parse_expression;
/// use autoargs_core::syntax::SyntaxKind;
///
/// let expr = parse_expression("typeof(List<int>)").unwrap();
/// assert_eq!(expr.kind(), SyntaxKind::TypeOfExpression);
/// ```
pub fn parse_expression(source: &str) -> Result<SyntaxNode, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let (expr, rest) = (expression, leading_trivia)
        .parse(source)
        .map_err(|e| syntax_error(e.offset(), e.inner().to_string()))?;
    let expr = if rest.is_empty() {
        expr
    } else {
        expr.append_trailing_trivia(rest)
    };
    Ok(SyntaxNode::new_root(expr))
}

fn syntax_error(offset: usize, message: String) -> ParseError {
    let message = if message.is_empty() {
        "unexpected input".to_string()
    } else {
        message
    };
    ParseError::Syntax { offset, message }
}

// ============================================================================
// Trivia and tokens
// ============================================================================

fn line_comment<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    ("//", take_till(0.., ['\r', '\n']))
        .take()
        .parse_next(input)
}

/// Whitespace, line breaks and comments before a token.
fn leading_trivia<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    let start = *input;
    loop {
        let before = input.len();
        multispace0.parse_next(input)?;
        opt(line_comment).parse_next(input)?;
        if input.len() == before {
            break;
        }
    }
    Ok(&start[..start.len() - input.len()])
}

/// The rest of the line after a token, up to and including one line break.
fn trailing_trivia<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    (space0, opt(line_comment), opt(line_ending))
        .take()
        .parse_next(input)
}

/// Lex one token whose text is recognized by `text`.
fn lexeme<'s>(
    input: &mut &'s str,
    kind: SyntaxKind,
    text: fn(&mut &'s str) -> ModalResult<&'s str>,
) -> ModalResult<GreenToken> {
    let checkpoint = *input;
    let leading = leading_trivia(input)?;
    let Ok(token_text) = text(input) else {
        *input = checkpoint;
        return Err(ErrMode::from_input(input));
    };
    let trailing = trailing_trivia(input)?;
    Ok(GreenToken::with_trivia(kind, leading, token_text, trailing))
}

/// Lex a fixed punctuation token.
fn punct(input: &mut &str, kind: SyntaxKind, text: &'static str) -> ModalResult<GreenToken> {
    let checkpoint = *input;
    let leading = leading_trivia(input)?;
    let matched: ModalResult<&str> = literal(text).parse_next(input);
    if matched.is_err() {
        *input = checkpoint;
        return Err(ErrMode::from_input(input));
    }
    let trailing = trailing_trivia(input)?;
    Ok(GreenToken::with_trivia(kind, leading, text, trailing))
}

fn word_text<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    (
        opt('@'),
        one_of(|c: char| c.is_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Lex a word accepted by `accept`, which picks the token kind.
fn word(input: &mut &str, accept: impl Fn(&str) -> Option<SyntaxKind>) -> ModalResult<GreenToken> {
    let checkpoint = *input;
    let leading = leading_trivia(input)?;
    let Ok(text) = word_text(input) else {
        *input = checkpoint;
        return Err(ErrMode::from_input(input));
    };
    let Some(kind) = accept(text) else {
        *input = checkpoint;
        return Err(ErrMode::from_input(input));
    };
    let trailing = trailing_trivia(input)?;
    Ok(GreenToken::with_trivia(kind, leading, text, trailing))
}

fn identifier(input: &mut &str) -> ModalResult<GreenToken> {
    word(input, |text| {
        (!is_reserved(text)).then_some(SyntaxKind::IdentifierToken)
    })
}

fn keyword(input: &mut &str, expected: &'static str) -> ModalResult<GreenToken> {
    word(input, |text| {
        (text == expected).then_some(SyntaxKind::KeywordToken)
    })
}

fn numeric_text<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    (
        digit1,
        opt(('.', digit1)),
        take_while(0.., ['f', 'F', 'd', 'D', 'm', 'M', 'l', 'L', 'u', 'U']),
    )
        .take()
        .parse_next(input)
}

fn string_text<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    let start = *input;
    '"'.parse_next(input)?;
    loop {
        match any.parse_next(input)? {
            '"' => break,
            '\\' => {
                any.parse_next(input)?;
            }
            '\n' => return Err(ErrMode::from_input(input)),
            _ => {}
        }
    }
    Ok(&start[..start.len() - input.len()])
}

fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind, children)
}

// ============================================================================
// Statements
// ============================================================================

fn compilation_unit(input: &mut &str) -> ModalResult<GreenNode> {
    let statements: Vec<GreenNode> = repeat(0.., statement).parse_next(input)?;
    let leading = leading_trivia(input)?;
    let mut children: Vec<GreenElement> = statements.into_iter().map(GreenElement::Node).collect();
    children.push(GreenToken::with_trivia(SyntaxKind::EndOfFileToken, leading, "", "").into());
    Ok(node(SyntaxKind::CompilationUnit, children))
}

fn statement(input: &mut &str) -> ModalResult<GreenNode> {
    alt((using_directive, local_declaration, expression_statement)).parse_next(input)
}

fn using_directive(input: &mut &str) -> ModalResult<GreenNode> {
    let using = keyword(input, "using")?;
    let name = name(input)?;
    let semi = punct(input, SyntaxKind::SemicolonToken, ";")?;
    Ok(node(
        SyntaxKind::UsingDirective,
        vec![using.into(), name.into(), semi.into()],
    ))
}

fn local_declaration(input: &mut &str) -> ModalResult<GreenNode> {
    let ty = type_syntax(input)?;
    let ident = identifier(input)?;
    let equals = punct(input, SyntaxKind::EqualsToken, "=")?;
    let value = expression(input)?;
    let semi = punct(input, SyntaxKind::SemicolonToken, ";")?;
    Ok(node(
        SyntaxKind::LocalDeclarationStatement,
        vec![
            ty.into(),
            ident.into(),
            equals.into(),
            value.into(),
            semi.into(),
        ],
    ))
}

fn expression_statement(input: &mut &str) -> ModalResult<GreenNode> {
    let expr = expression(input)?;
    let semi = punct(input, SyntaxKind::SemicolonToken, ";")?;
    Ok(node(
        SyntaxKind::ExpressionStatement,
        vec![expr.into(), semi.into()],
    ))
}

// ============================================================================
// Expressions
// ============================================================================

fn expression(input: &mut &str) -> ModalResult<GreenNode> {
    let mut expr = primary(input)?;
    loop {
        let checkpoint = *input;
        if let Ok(dot) = punct(input, SyntaxKind::DotToken, ".") {
            if let Ok(member) = simple_name(input) {
                expr = node(
                    SyntaxKind::SimpleMemberAccessExpression,
                    vec![expr.into(), dot.into(), member.into()],
                );
                continue;
            }
            *input = checkpoint;
            break;
        }
        if let Some(arguments) = opt(argument_list).parse_next(input)? {
            expr = node(
                SyntaxKind::InvocationExpression,
                vec![expr.into(), arguments.into()],
            );
            continue;
        }
        break;
    }
    Ok(expr)
}

fn primary(input: &mut &str) -> ModalResult<GreenNode> {
    alt((
        typeof_expression,
        literal_expression,
        this_expression,
        parenthesized,
        predefined_type,
        name_start,
    ))
    .parse_next(input)
}

fn typeof_expression(input: &mut &str) -> ModalResult<GreenNode> {
    let typeof_kw = keyword(input, "typeof")?;
    let open = punct(input, SyntaxKind::OpenParenToken, "(")?;
    let ty = type_syntax(input)?;
    let close = punct(input, SyntaxKind::CloseParenToken, ")")?;
    Ok(node(
        SyntaxKind::TypeOfExpression,
        vec![typeof_kw.into(), open.into(), ty.into(), close.into()],
    ))
}

fn literal_expression(input: &mut &str) -> ModalResult<GreenNode> {
    let token = alt((
        |i: &mut &str| lexeme(i, SyntaxKind::NumericLiteralToken, numeric_text),
        |i: &mut &str| lexeme(i, SyntaxKind::StringLiteralToken, string_text),
        |i: &mut &str| {
            word(i, |text| {
                matches!(text, "true" | "false" | "null").then_some(SyntaxKind::KeywordToken)
            })
        },
    ))
    .parse_next(input)?;
    Ok(node(SyntaxKind::LiteralExpression, vec![token.into()]))
}

fn this_expression(input: &mut &str) -> ModalResult<GreenNode> {
    let this = keyword(input, "this")?;
    Ok(node(SyntaxKind::ThisExpression, vec![this.into()]))
}

fn parenthesized(input: &mut &str) -> ModalResult<GreenNode> {
    let open = punct(input, SyntaxKind::OpenParenToken, "(")?;
    let inner = expression(input)?;
    let close = punct(input, SyntaxKind::CloseParenToken, ")")?;
    Ok(node(
        SyntaxKind::ParenthesizedExpression,
        vec![open.into(), inner.into(), close.into()],
    ))
}

fn argument_list(input: &mut &str) -> ModalResult<GreenNode> {
    let open = punct(input, SyntaxKind::OpenParenToken, "(")?;
    let mut children: Vec<GreenElement> = vec![open.into()];
    if let Some(first) = opt(expression).parse_next(input)? {
        children.push(node(SyntaxKind::Argument, vec![first.into()]).into());
        loop {
            let checkpoint = *input;
            let Ok(comma) = punct(input, SyntaxKind::CommaToken, ",") else {
                break;
            };
            let Ok(next) = expression(input) else {
                *input = checkpoint;
                return Err(ErrMode::from_input(input));
            };
            children.push(comma.into());
            children.push(node(SyntaxKind::Argument, vec![next.into()]).into());
        }
    }
    let close = punct(input, SyntaxKind::CloseParenToken, ")")?;
    children.push(close.into());
    Ok(node(SyntaxKind::ArgumentList, children))
}

// ============================================================================
// Names and types
// ============================================================================

fn type_syntax(input: &mut &str) -> ModalResult<GreenNode> {
    let mut ty = alt((predefined_type, tuple_type, name)).parse_next(input)?;
    loop {
        if let Ok(question) = punct(input, SyntaxKind::QuestionToken, "?") {
            ty = node(SyntaxKind::NullableType, vec![ty.into(), question.into()]);
            continue;
        }
        if let Ok(star) = punct(input, SyntaxKind::AsteriskToken, "*") {
            ty = node(SyntaxKind::PointerType, vec![ty.into(), star.into()]);
            continue;
        }
        if let Some(rank) = opt(rank_specifier).parse_next(input)? {
            ty = node(SyntaxKind::ArrayType, vec![ty.into(), rank.into()]);
            continue;
        }
        break;
    }
    Ok(ty)
}

fn predefined_type(input: &mut &str) -> ModalResult<GreenNode> {
    let keyword = word(input, |text| {
        PREDEFINED_TYPES
            .contains(&text)
            .then_some(SyntaxKind::KeywordToken)
    })?;
    Ok(node(SyntaxKind::PredefinedType, vec![keyword.into()]))
}

fn rank_specifier(input: &mut &str) -> ModalResult<GreenNode> {
    let open = punct(input, SyntaxKind::OpenBracketToken, "[")?;
    let mut children: Vec<GreenElement> = vec![open.into()];
    while let Ok(comma) = punct(input, SyntaxKind::CommaToken, ",") {
        children.push(comma.into());
    }
    let close = punct(input, SyntaxKind::CloseBracketToken, "]")?;
    children.push(close.into());
    Ok(node(SyntaxKind::ArrayRankSpecifier, children))
}

fn tuple_type(input: &mut &str) -> ModalResult<GreenNode> {
    let open = punct(input, SyntaxKind::OpenParenToken, "(")?;
    let mut children: Vec<GreenElement> = vec![open.into(), tuple_element(input)?.into()];
    let mut elements = 1;
    while let Ok(comma) = punct(input, SyntaxKind::CommaToken, ",") {
        children.push(comma.into());
        children.push(tuple_element(input)?.into());
        elements += 1;
    }
    if elements < 2 {
        return Err(ErrMode::from_input(input));
    }
    let close = punct(input, SyntaxKind::CloseParenToken, ")")?;
    children.push(close.into());
    Ok(node(SyntaxKind::TupleType, children))
}

fn tuple_element(input: &mut &str) -> ModalResult<GreenNode> {
    let ty = type_syntax(input)?;
    let mut children: Vec<GreenElement> = vec![ty.into()];
    if let Ok(ident) = identifier(input) {
        children.push(ident.into());
    }
    Ok(node(SyntaxKind::TupleElement, children))
}

/// A possibly qualified name: `A`, `A.B<C>`, `global::A.B`.
fn name(input: &mut &str) -> ModalResult<GreenNode> {
    let mut left = name_start(input)?;
    loop {
        let checkpoint = *input;
        let Ok(dot) = punct(input, SyntaxKind::DotToken, ".") else {
            break;
        };
        let Ok(right) = simple_name(input) else {
            *input = checkpoint;
            break;
        };
        left = node(
            SyntaxKind::QualifiedName,
            vec![left.into(), dot.into(), right.into()],
        );
    }
    Ok(left)
}

fn name_start(input: &mut &str) -> ModalResult<GreenNode> {
    alt((alias_qualified_name, simple_name)).parse_next(input)
}

fn alias_qualified_name(input: &mut &str) -> ModalResult<GreenNode> {
    let alias = identifier(input)?;
    let colons = punct(input, SyntaxKind::ColonColonToken, "::")?;
    let right = simple_name(input)?;
    Ok(node(
        SyntaxKind::AliasQualifiedName,
        vec![
            node(SyntaxKind::IdentifierName, vec![alias.into()]).into(),
            colons.into(),
            right.into(),
        ],
    ))
}

fn simple_name(input: &mut &str) -> ModalResult<GreenNode> {
    let ident = identifier(input)?;
    match type_argument_list(input) {
        Ok(arguments) => Ok(node(
            SyntaxKind::GenericName,
            vec![ident.into(), arguments.into()],
        )),
        Err(_) => Ok(node(SyntaxKind::IdentifierName, vec![ident.into()])),
    }
}

fn type_argument_list(input: &mut &str) -> ModalResult<GreenNode> {
    let checkpoint = *input;
    let open = punct(input, SyntaxKind::LessThanToken, "<")?;
    let mut children: Vec<GreenElement> = vec![open.into()];
    let Ok(first) = type_syntax(input) else {
        *input = checkpoint;
        return Err(ErrMode::from_input(input));
    };
    children.push(first.into());
    while let Ok(comma) = punct(input, SyntaxKind::CommaToken, ",") {
        let Ok(next) = type_syntax(input) else {
            *input = checkpoint;
            return Err(ErrMode::from_input(input));
        };
        children.push(comma.into());
        children.push(next.into());
    }
    let Ok(close) = punct(input, SyntaxKind::GreaterThanToken, ">") else {
        *input = checkpoint;
        return Err(ErrMode::from_input(input));
    };
    children.push(close.into());
    Ok(node(SyntaxKind::TypeArgumentList, children))
}
