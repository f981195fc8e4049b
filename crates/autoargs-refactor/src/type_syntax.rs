//! Type-name to type-syntax conversion.

use autoargs_core::parse::parse_expression;
use autoargs_core::syntax::ast::TypeOfExpression;
use autoargs_core::syntax::GreenNode;
use tracing::trace;

/// Parse a type's display string into a type syntax node.
///
/// The name is wrapped as `typeof(<name>)` and parsed as an expression, so
/// anything that is a valid `typeof` operand is accepted: keywords,
/// qualified and generic names, arrays, nullables, pointers and tuples.
/// Returns `None` for anything else.
pub fn create_type_syntax(type_name: &str) -> Option<GreenNode> {
    let source = format!("typeof({})", type_name.trim());
    let expr = match parse_expression(&source) {
        Ok(expr) => expr,
        Err(e) => {
            trace!(type_name, error = %e, "type name does not parse");
            return None;
        }
    };
    let Some(type_of) = TypeOfExpression::cast(expr) else {
        trace!(type_name, "type name did not produce a typeof expression");
        return None;
    };
    type_of.type_node().map(|node| node.green().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoargs_core::syntax::SyntaxKind;

    #[test]
    fn keyword_type() {
        let ty = create_type_syntax("int").unwrap();
        assert_eq!(ty.kind(), SyntaxKind::PredefinedType);
        assert_eq!(ty.to_string(), "int");
    }

    #[test]
    fn generic_and_qualified_types_keep_their_text() {
        for name in [
            "List<int>",
            "System.Collections.Generic.Dictionary<string, List<int>>",
            "global::System.Guid",
            "int[,]",
            "string?",
            "byte*",
            "(int, string name)",
        ] {
            let ty = create_type_syntax(name).unwrap();
            assert_eq!(ty.to_string(), name);
        }
    }

    #[test]
    fn surrounding_whitespace_is_dropped() {
        assert_eq!(create_type_syntax(" int ").unwrap().to_string(), "int");
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert!(create_type_syntax("").is_none());
        assert!(create_type_syntax("List<").is_none());
        assert!(create_type_syntax("int) + typeof(int").is_none());
        assert!(create_type_syntax("1abc").is_none());
    }

    #[test]
    fn synthesis_is_deterministic() {
        let a = create_type_syntax("Dictionary<string, int>").unwrap();
        let b = create_type_syntax("Dictionary<string, int>").unwrap();
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }
}
