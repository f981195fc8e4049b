//! Semantic queries the refactoring engine needs from its host.
//!
//! The engine never binds code itself. A host (an IDE, a compiler service,
//! or the in-memory model in [`crate::memory`]) answers three questions
//! about a syntax tree: what type an expression has, which method a call
//! binds to, and which libraries the project references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::SyntaxNode;

/// The category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Array,
    TypeParameter,
    /// The host could not bind the type.
    Error,
}

/// A bound type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Simple name, including type arguments (`IRepository<User>`).
    pub name: String,
    pub kind: TypeKind,
    /// Enclosing namespaces, outermost first.
    pub containing_namespace: Vec<String>,
}

impl TypeInfo {
    /// Build from a qualified name such as `Acme.Billing.ICalculator`.
    ///
    /// Dots inside type arguments do not split the name.
    pub fn new(qualified: &str, kind: TypeKind) -> Self {
        let mut segments = split_qualified(qualified);
        let name = segments.pop().unwrap_or_default();
        TypeInfo {
            name,
            kind,
            containing_namespace: segments,
        }
    }

    /// Fully qualified display form.
    pub fn display_name(&self) -> String {
        if self.containing_namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.containing_namespace.join("."), self.name)
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Split on `.` at generic depth zero.
fn split_qualified(qualified: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in qualified.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                segments.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    segments.push(current);
    segments
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    /// The parameter type as source text (`int`, `List<string>`).
    pub type_display: String,
}

/// A method as seen by the binder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Fully qualified name of the declaring type.
    pub containing_type: String,
    pub name: String,
    pub parameters: Vec<ParameterSymbol>,
}

impl MethodSymbol {
    pub fn new(containing_type: impl Into<String>, name: impl Into<String>) -> Self {
        MethodSymbol {
            containing_type: containing_type.into(),
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_display: impl Into<String>) -> Self {
        self.parameters.push(ParameterSymbol {
            name: name.into(),
            type_display: type_display.into(),
        });
        self
    }

    /// Parameter type names in declaration order.
    pub fn parameter_types(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|p| p.type_display.clone())
            .collect()
    }

    /// `Containing.Type.Name(T1, T2)`
    pub fn display_string(&self) -> String {
        format!(
            "{}.{}({})",
            self.containing_type,
            self.name,
            self.parameter_types().join(", ")
        )
    }
}

impl fmt::Display for MethodSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// Outcome of binding a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The call binds to exactly one method.
    Resolved(MethodSymbol),
    /// Overload resolution failed; these methods were considered.
    Ambiguous(Vec<MethodSymbol>),
    /// Nothing with that name was found.
    Unresolved,
}

impl ResolutionResult {
    /// Candidates left behind by a failed overload resolution.
    pub fn candidates(&self) -> &[MethodSymbol] {
        match self {
            ResolutionResult::Ambiguous(candidates) => candidates,
            _ => &[],
        }
    }
}

/// Semantic queries over one document snapshot.
pub trait SemanticModel: Send + Sync {
    /// The type of an expression, or `None` when it cannot be bound.
    fn type_of(&self, expression: &SyntaxNode) -> Option<TypeInfo>;

    /// Bind an invocation expression.
    fn resolve_call_symbol(&self, invocation: &SyntaxNode) -> ResolutionResult;

    /// Display names of the libraries the project references.
    fn external_dependency_names(&self) -> Vec<String>;

    /// Every method with the invoked member's name on the receiver's type.
    fn member_group(&self, _invocation: &SyntaxNode) -> Vec<MethodSymbol> {
        Vec::new()
    }
}
