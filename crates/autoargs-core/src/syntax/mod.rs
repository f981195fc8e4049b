//! Immutable syntax trees with structural sharing.
//!
//! The tree has two layers:
//!
//! - **Green** ([`GreenNode`], [`GreenToken`]): position-free, reference
//!   counted, shared between tree snapshots.
//! - **Positioned** ([`SyntaxNode`], [`SyntaxToken`]): a green node plus its
//!   offset and parent, created lazily while walking.
//!
//! Typed views in [`ast`] name the children of the node kinds the engine
//! inspects, and [`factory`] builds new green nodes for generated code.

pub mod ast;
pub mod factory;
mod green;
mod kind;
mod node;

pub use green::{GreenElement, GreenNode, GreenToken};
pub use kind::SyntaxKind;
pub use node::{SyntaxNode, SyntaxToken};

#[cfg(test)]
mod tests {
    use super::ast::{ArgumentList, InvocationExpression};
    use super::*;
    use crate::parse::parse_compilation_unit;
    use crate::text::Span;

    const SOURCE: &str = "var calc = Substitute.For<ICalculator>();\ncalc.Add();\nother.Run(1);\n";

    fn caret_after(source: &str, needle: &str) -> Span {
        Span::caret(source.find(needle).unwrap() + needle.len())
    }

    #[test]
    fn caret_inside_empty_parens_finds_argument_list() {
        let root = parse_compilation_unit(SOURCE).unwrap();
        let node = root.find_node(caret_after(SOURCE, "calc.Add(")).unwrap();
        assert_eq!(node.kind(), SyntaxKind::ArgumentList);
        let list = ArgumentList::cast(node).unwrap();
        assert!(list.is_empty());
        assert!(list.invocation().is_some());
    }

    #[test]
    fn caret_on_identifier_finds_name() {
        let root = parse_compilation_unit(SOURCE).unwrap();
        let node = root.find_node(Span::caret(SOURCE.find("Run").unwrap() + 1)).unwrap();
        assert_eq!(node.kind(), SyntaxKind::IdentifierName);
        assert_eq!(node.text(), "Run");
    }

    #[test]
    fn span_outside_tree_finds_nothing() {
        let root = parse_compilation_unit(SOURCE).unwrap();
        assert!(root.find_node(Span::caret(SOURCE.len() + 10)).is_none());
    }

    #[test]
    fn parent_links_reach_root() {
        let root = parse_compilation_unit(SOURCE).unwrap();
        let node = root.find_node(caret_after(SOURCE, "calc.Add(")).unwrap();
        let kinds: Vec<SyntaxKind> = node.ancestors().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ArgumentList,
                SyntaxKind::InvocationExpression,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::CompilationUnit,
            ]
        );
        assert_eq!(node.root(), root);
    }

    #[test]
    fn replace_with_rebuilds_only_the_path() {
        let root = parse_compilation_unit(SOURCE).unwrap();
        let list = root.find_node(caret_after(SOURCE, "calc.Add(")).unwrap();
        let call = InvocationExpression::cast(list.parent().unwrap()).unwrap();

        let new_list = factory::argument_list(vec![factory::argument(factory::identifier_name("x"))]);
        let new_call = call
            .syntax()
            .green()
            .replace_child(list.index_in_parent(), new_list.into());
        let new_root = call.syntax().replace_with(new_call);

        assert_eq!(
            new_root.to_string(),
            "var calc = Substitute.For<ICalculator>();\ncalc.Add(x);\nother.Run(1);\n"
        );

        let old_statements: Vec<SyntaxNode> = root.children().collect();
        let new_statements: Vec<SyntaxNode> = new_root.children().collect();
        assert!(old_statements[0].green().ptr_eq(new_statements[0].green()));
        assert!(!old_statements[1].green().ptr_eq(new_statements[1].green()));
        assert!(old_statements[2].green().ptr_eq(new_statements[2].green()));

        // The receiver inside the rebuilt statement is shared too.
        let old_access = call.member_access().unwrap();
        let new_call_node = new_root.find_node(caret_after(SOURCE, "calc.Ad")).unwrap();
        let new_access = new_call_node.parent().unwrap();
        assert!(old_access.syntax().green().ptr_eq(new_access.green()));
    }

    #[test]
    fn nodes_from_different_snapshots_are_not_equal() {
        let a = parse_compilation_unit(SOURCE).unwrap();
        let b = parse_compilation_unit(SOURCE).unwrap();
        assert_eq!(a.green(), b.green());
        assert_ne!(a, b);
    }
}
