//! An in-memory analysis host.
//!
//! [`InMemoryModel`] is a small, declarative stand-in for a compiler: types,
//! their methods and the project's library references are registered up
//! front, and queries are answered by looking names up in those tables.
//! Local variable types come from explicit [`InMemoryModel::local`]
//! registrations or, failing that, from `Type name = ...;` declarations in
//! the document itself, including `var x = Substitute.For<T>();`.
//!
//! It is complete enough to drive the refactoring engine in tests and in
//! tools that have no real compiler at hand.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::{AutoArgsError, AutoArgsResult};
use crate::semantic::{MethodSymbol, ResolutionResult, SemanticModel, TypeInfo, TypeKind};
use crate::syntax::ast::{InvocationExpression, MemberAccessExpression};
use crate::syntax::{SyntaxKind, SyntaxNode};
use crate::workspace::{AnalysisHost, Document};

/// The factory type whose `For<T>()` creates substitutes.
const SUBSTITUTE_FACTORY: &str = "Substitute";
const SUBSTITUTE_METHOD: &str = "For";

/// Limit on chained `var` lookups (`var a = b; var b = c; ...`).
const MAX_LOCAL_DEPTH: usize = 8;

/// Declarative semantic model.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    /// Types keyed by simple name.
    types: BTreeMap<String, TypeInfo>,
    methods: Vec<MethodSymbol>,
    /// Local variable name to type name.
    locals: BTreeMap<String, String>,
    references: Vec<String>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type of any kind by qualified name.
    pub fn declare_type(mut self, qualified: &str, kind: TypeKind) -> Self {
        let info = TypeInfo::new(qualified, kind);
        self.types.insert(info.name.clone(), info);
        self
    }

    pub fn interface(self, qualified: &str) -> Self {
        self.declare_type(qualified, TypeKind::Interface)
    }

    pub fn class(self, qualified: &str) -> Self {
        self.declare_type(qualified, TypeKind::Class)
    }

    /// Register a method. `declaring_type` may be a simple or qualified name
    /// and is matched against declared types when queried, so it may be
    /// registered before its type. `parameters` are `(name, type)` pairs.
    pub fn method(mut self, declaring_type: &str, name: &str, parameters: &[(&str, &str)]) -> Self {
        let symbol = parameters
            .iter()
            .fold(MethodSymbol::new(declaring_type, name), |symbol, (p, ty)| {
                symbol.with_parameter(*p, *ty)
            });
        self.methods.push(symbol);
        self
    }

    /// Declare the type of a local variable.
    pub fn local(mut self, variable: &str, type_name: &str) -> Self {
        self.locals
            .insert(variable.to_string(), type_name.to_string());
        self
    }

    /// Add a library reference by display name.
    pub fn reference(mut self, display_name: &str) -> Self {
        self.references.push(display_name.to_string());
        self
    }

    fn lookup_type(&self, name: &str) -> Option<TypeInfo> {
        let info = self.types.get(name).or_else(|| {
            self.types
                .values()
                .find(|info| info.display_name() == name)
        });
        info.cloned()
    }

    /// Same-name methods declared on `receiver`.
    fn methods_named(&self, receiver: &TypeInfo, name: &str) -> Vec<MethodSymbol> {
        let containing = receiver.display_name();
        self.methods
            .iter()
            .filter(|m| m.name == name)
            .filter_map(|m| {
                let declaring = self
                    .lookup_type(&m.containing_type)
                    .map(|info| info.display_name())
                    .unwrap_or_else(|| m.containing_type.clone());
                (declaring == containing).then(|| MethodSymbol {
                    containing_type: declaring,
                    ..m.clone()
                })
            })
            .collect()
    }

    /// Receiver type and member name of a member-access invocation.
    fn call_target(&self, invocation: &SyntaxNode) -> Option<(TypeInfo, String)> {
        let access = InvocationExpression::cast(invocation.clone())?.member_access()?;
        let receiver = self.type_of(&access.expression()?)?;
        Some((receiver, access.member_name()?))
    }

    fn type_of_at_depth(&self, expression: &SyntaxNode, depth: usize) -> Option<TypeInfo> {
        if depth > MAX_LOCAL_DEPTH {
            return None;
        }
        match expression.kind() {
            SyntaxKind::ParenthesizedExpression => expression
                .children()
                .next()
                .and_then(|inner| self.type_of_at_depth(&inner, depth + 1)),
            SyntaxKind::IdentifierName => {
                let name = expression.text();
                if let Some(type_name) = self.locals.get(&name) {
                    return self.lookup_type(type_name);
                }
                self.declared_local_type(expression, &name, depth)
            }
            SyntaxKind::InvocationExpression => substitute_type_argument(expression)
                .and_then(|type_name| self.lookup_type(&type_name)),
            _ => None,
        }
    }

    /// Type of a local declared as `Type name = value;` in the same tree.
    fn declared_local_type(&self, usage: &SyntaxNode, name: &str, depth: usize) -> Option<TypeInfo> {
        let declaration = usage
            .root()
            .descendants()
            .into_iter()
            .filter(|node| node.kind() == SyntaxKind::LocalDeclarationStatement)
            .find(|node| {
                node.token_of_kind(SyntaxKind::IdentifierToken)
                    .is_some_and(|token| token.text() == name)
            })?;
        let mut children = declaration.children();
        let declared = children.next()?;
        let value = children.next()?;
        if declared.text() == "var" {
            self.type_of_at_depth(&value, depth + 1)
        } else {
            self.lookup_type(&declared.text())
        }
    }
}

/// `T` in `Substitute.For<T>()`.
fn substitute_type_argument(invocation: &SyntaxNode) -> Option<String> {
    let access: MemberAccessExpression = InvocationExpression::cast(invocation.clone())?.member_access()?;
    if access.expression()?.text() != SUBSTITUTE_FACTORY {
        return None;
    }
    let name = access.name()?;
    if name.kind() != SyntaxKind::GenericName || access.member_name()? != SUBSTITUTE_METHOD {
        return None;
    }
    let type_arguments = name.child_of_kind(SyntaxKind::TypeArgumentList)?;
    let first = type_arguments.children().next()?;
    Some(first.text())
}

impl SemanticModel for InMemoryModel {
    fn type_of(&self, expression: &SyntaxNode) -> Option<TypeInfo> {
        self.type_of_at_depth(expression, 0)
    }

    fn resolve_call_symbol(&self, invocation: &SyntaxNode) -> ResolutionResult {
        let Some((receiver, member)) = self.call_target(invocation) else {
            return ResolutionResult::Unresolved;
        };
        let group = self.methods_named(&receiver, &member);
        if group.is_empty() {
            return ResolutionResult::Unresolved;
        }
        let arity = InvocationExpression::cast(invocation.clone())
            .and_then(|call| call.argument_list())
            .map(|list| list.len())
            .unwrap_or(0);
        let mut matching = group.iter().filter(|m| m.parameters.len() == arity);
        match (matching.next(), matching.next()) {
            (Some(only), None) => ResolutionResult::Resolved(only.clone()),
            _ => ResolutionResult::Ambiguous(group),
        }
    }

    fn external_dependency_names(&self) -> Vec<String> {
        self.references.clone()
    }

    fn member_group(&self, invocation: &SyntaxNode) -> Vec<MethodSymbol> {
        self.call_target(invocation)
            .map(|(receiver, member)| self.methods_named(&receiver, &member))
            .unwrap_or_default()
    }
}

/// [`AnalysisHost`] backed by an [`InMemoryModel`].
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    model: Arc<InMemoryModel>,
}

impl InMemoryHost {
    pub fn new(model: InMemoryModel) -> Self {
        InMemoryHost {
            model: Arc::new(model),
        }
    }

    pub fn model(&self) -> &InMemoryModel {
        &self.model
    }
}

#[async_trait]
impl AnalysisHost for InMemoryHost {
    async fn syntax_root(
        &self,
        document: &Document,
        cancel: &CancellationToken,
    ) -> AutoArgsResult<SyntaxNode> {
        if cancel.is_cancelled() {
            return Err(AutoArgsError::Cancelled);
        }
        Ok(document.root().clone())
    }

    async fn semantic_model(
        &self,
        document: &Document,
        cancel: &CancellationToken,
    ) -> AutoArgsResult<Arc<dyn SemanticModel>> {
        if cancel.is_cancelled() {
            return Err(AutoArgsError::Cancelled);
        }
        trace!(path = document.path(), "semantic model requested");
        Ok(self.model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Span;

    const SOURCE: &str = "using NSubstitute;\nvar calc = Substitute.For<ICalculator>();\ncalc.Add();\nwidget.Add();\ncalc.Reset();\n";

    fn model() -> InMemoryModel {
        InMemoryModel::new()
            .interface("Acme.ICalculator")
            .class("Acme.Widget")
            .method("ICalculator", "Add", &[("a", "int")])
            .method("ICalculator", "Add", &[("a", "int"), ("b", "bool")])
            .method("ICalculator", "Reset", &[])
            .method("Widget", "Add", &[("a", "int")])
            .local("widget", "Widget")
            .reference("NSubstitute, Version=5.1.0.0")
    }

    fn invocation_at(root: &SyntaxNode, needle: &str) -> SyntaxNode {
        let offset = SOURCE.find(needle).unwrap() + needle.len();
        let list = root.find_node(Span::caret(offset)).unwrap();
        list.parent().unwrap()
    }

    #[test]
    fn var_declared_from_substitute_gets_interface_type() {
        let root = crate::parse::parse_compilation_unit(SOURCE).unwrap();
        let call = invocation_at(&root, "calc.Add(");
        let access = InvocationExpression::cast(call).unwrap().member_access().unwrap();
        let ty = model().type_of(&access.expression().unwrap()).unwrap();
        assert_eq!(ty.display_name(), "Acme.ICalculator");
        assert!(ty.is_interface());
    }

    #[test]
    fn explicit_local_wins() {
        let root = crate::parse::parse_compilation_unit(SOURCE).unwrap();
        let call = invocation_at(&root, "widget.Add(");
        let access = InvocationExpression::cast(call).unwrap().member_access().unwrap();
        let ty = model().type_of(&access.expression().unwrap()).unwrap();
        assert_eq!(ty.kind, TypeKind::Class);
    }

    #[test]
    fn overloads_without_arity_match_are_ambiguous() {
        let root = crate::parse::parse_compilation_unit(SOURCE).unwrap();
        let call = invocation_at(&root, "calc.Add(");
        match model().resolve_call_symbol(&call) {
            ResolutionResult::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
        assert_eq!(model().member_group(&call).len(), 2);
    }

    #[test]
    fn arity_match_resolves() {
        let root = crate::parse::parse_compilation_unit(SOURCE).unwrap();
        let call = invocation_at(&root, "calc.Reset(");
        assert!(matches!(
            model().resolve_call_symbol(&call),
            ResolutionResult::Resolved(m) if m.name == "Reset"
        ));
    }

    #[test]
    fn methods_may_precede_their_type() {
        let model = InMemoryModel::new()
            .method("ICalculator", "Add", &[("a", "int")])
            .method("ICalculator", "Add", &[("a", "int"), ("b", "bool")])
            .interface("Acme.ICalculator");
        let root = crate::parse::parse_compilation_unit(SOURCE).unwrap();
        let call = invocation_at(&root, "calc.Add(");
        let candidates = model.resolve_call_symbol(&call).candidates().to_vec();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|m| m.containing_type == "Acme.ICalculator"));
    }

    #[test]
    fn unknown_member_is_unresolved() {
        let source = "var calc = Substitute.For<ICalculator>();\ncalc.Divide();\n";
        let root = crate::parse::parse_compilation_unit(source).unwrap();
        let offset = source.find("Divide(").unwrap() + "Divide(".len();
        let call = root.find_node(Span::caret(offset)).unwrap().parent().unwrap();
        assert_eq!(model().resolve_call_symbol(&call), ResolutionResult::Unresolved);
    }

    #[test]
    fn references_are_reported() {
        assert_eq!(
            model().external_dependency_names(),
            vec!["NSubstitute, Version=5.1.0.0".to_string()]
        );
    }

    #[tokio::test]
    async fn host_honours_cancellation() {
        let host = InMemoryHost::new(model());
        let doc = Document::parse("Tests.cs", SOURCE).unwrap();
        let cancel = CancellationToken::new();
        assert!(host.syntax_root(&doc, &cancel).await.is_ok());
        cancel.cancel();
        assert!(host.syntax_root(&doc, &cancel).await.unwrap_err().is_cancelled());
        assert!(host.semantic_model(&doc, &cancel).await.is_err());
    }
}
