//! Rewrite actions and their presentation.
//!
//! A [`RewriteAction`] captures everything needed to fill one call's empty
//! argument list with wildcard matchers for one overload. Nothing is
//! synthesized until [`RewriteAction::apply`] runs, so offering many actions
//! costs only the captured parameter type names.

use autoargs_core::config::{AutoArgsConfig, LineEnding};
use autoargs_core::error::{AutoArgsError, AutoArgsResult};
use autoargs_core::semantic::MethodSymbol;
use autoargs_core::syntax::ast::InvocationExpression;
use autoargs_core::workspace::Document;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::arguments::ArgumentFactory;

const ELLIPSIS: &str = "...";

// ============================================================================
// Actions
// ============================================================================

/// Fill one call's argument list with wildcard matchers for one overload.
#[derive(Debug, Clone)]
pub struct RewriteAction {
    title: String,
    document: Document,
    invocation: InvocationExpression,
    parameter_types: Vec<String>,
    arguments: ArgumentFactory,
    line_ending: LineEnding,
}

impl RewriteAction {
    pub fn new(
        title: impl Into<String>,
        document: Document,
        invocation: InvocationExpression,
        candidate: &MethodSymbol,
        config: &AutoArgsConfig,
    ) -> Self {
        RewriteAction {
            title: title.into(),
            document,
            invocation,
            parameter_types: candidate.parameter_types(),
            arguments: ArgumentFactory::new(config),
            line_ending: config.line_ending,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Parameter types of the overload this action targets.
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    pub fn invocation(&self) -> &InvocationExpression {
        &self.invocation
    }

    /// Produce the rewritten document.
    ///
    /// The call's argument list is replaced by one wildcard matcher per
    /// parameter and the configured line break is appended after the call.
    /// Everything outside the call is shared with the original document.
    pub async fn apply(&self, cancel: &CancellationToken) -> AutoArgsResult<Document> {
        if cancel.is_cancelled() {
            return Err(AutoArgsError::Cancelled);
        }

        let call = self.invocation.syntax();
        if !call.root().green().ptr_eq(self.document.root().green()) {
            return Err(AutoArgsError::NodeNotFound {
                kind: call.kind().to_string(),
            });
        }
        let list = self
            .invocation
            .argument_list()
            .ok_or_else(|| AutoArgsError::NodeNotFound {
                kind: "ArgumentList".to_string(),
            })?;

        let new_list = self.arguments.create_args_any(self.parameter_types.as_slice());
        let rebuilt = call
            .green()
            .replace_child(list.syntax().index_in_parent(), new_list.into())
            .append_trailing_trivia(self.line_ending.as_str());

        debug!(
            path = self.document.path(),
            title = %self.title,
            parameters = self.parameter_types.len(),
            "applying wildcard arguments"
        );
        Ok(self.document.with_root(call.replace_with(rebuilt)))
    }
}

/// What gets registered with the host.
#[derive(Debug, Clone)]
pub enum CodeAction {
    /// A single, directly applicable rewrite.
    Rewrite(RewriteAction),
    /// Alternatives the user picks from; exactly one is applied.
    Group {
        title: String,
        actions: Vec<RewriteAction>,
    },
}

impl CodeAction {
    pub fn title(&self) -> &str {
        match self {
            CodeAction::Rewrite(action) => action.title(),
            CodeAction::Group { title, .. } => title,
        }
    }

    /// Every rewrite reachable from this action.
    pub fn rewrites(&self) -> Vec<&RewriteAction> {
        match self {
            CodeAction::Rewrite(action) => vec![action],
            CodeAction::Group { actions, .. } => actions.iter().collect(),
        }
    }

    pub fn summary(&self) -> SuggestionSummary {
        match self {
            CodeAction::Rewrite(action) => SuggestionSummary::leaf(action),
            CodeAction::Group { title, actions } => SuggestionSummary {
                title: title.clone(),
                parameter_types: Vec::new(),
                children: actions.iter().map(SuggestionSummary::leaf).collect(),
            },
        }
    }
}

// ============================================================================
// Summaries
// ============================================================================

/// Serializable description of an offered action, for hosts that talk JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSummary {
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SuggestionSummary>,
}

impl SuggestionSummary {
    fn leaf(action: &RewriteAction) -> Self {
        SuggestionSummary {
            title: action.title().to_string(),
            parameter_types: action.parameter_types().to_vec(),
            children: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Short label for one overload: `.Name(T1, T2)`.
///
/// Keeps the display string from the last `.` before the parameter list and
/// bounds it to `max_len` characters, ending in `...` when cut. Display
/// strings with no parameter list or no `.` are bounded whole.
pub fn method_display(symbol: &MethodSymbol, max_len: usize) -> String {
    let display = symbol.display_string();
    let label = match display.find('(') {
        Some(paren) => match display[..paren].rfind('.') {
            Some(dot) => &display[dot..],
            None => display.as_str(),
        },
        None => display.as_str(),
    };
    bound(label, max_len)
}

fn bound(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len <= ELLIPSIS.len() {
        return text.chars().take(max_len).collect();
    }
    let mut out: String = text.chars().take(max_len - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Turn overload candidates into an action to register.
///
/// One candidate gives a single rewrite under the configured title. Several
/// give a group under that title with one rewrite per overload, each
/// labelled by [`method_display`]. No candidates gives nothing.
pub fn compose_actions(
    document: &Document,
    invocation: &InvocationExpression,
    candidates: &[MethodSymbol],
    config: &AutoArgsConfig,
) -> Option<CodeAction> {
    match candidates {
        [] => None,
        [only] => Some(CodeAction::Rewrite(RewriteAction::new(
            config.title.clone(),
            document.clone(),
            invocation.clone(),
            only,
            config,
        ))),
        many => Some(CodeAction::Group {
            title: config.title.clone(),
            actions: many
                .iter()
                .map(|candidate| {
                    RewriteAction::new(
                        method_display(candidate, config.label_max_len),
                        document.clone(),
                        invocation.clone(),
                        candidate,
                        config,
                    )
                })
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoargs_core::text::Span;

    const SOURCE: &str = "calc.Add();\nnext();\n";

    fn setup() -> (Document, InvocationExpression) {
        let document = Document::parse("Tests.cs", SOURCE).unwrap();
        let list = document
            .root()
            .find_node(Span::caret("calc.Add(".len()))
            .unwrap();
        let call = InvocationExpression::cast(list.parent().unwrap()).unwrap();
        (document, call)
    }

    fn add(types: &[&str]) -> MethodSymbol {
        types
            .iter()
            .enumerate()
            .fold(MethodSymbol::new("Acme.ICalculator", "Add"), |m, (i, ty)| {
                m.with_parameter(format!("p{i}"), *ty)
            })
    }

    mod labels {
        use super::*;

        #[test]
        fn keeps_member_and_parameters() {
            assert_eq!(method_display(&add(&["int", "bool"]), 50), ".Add(int, bool)");
        }

        #[test]
        fn dots_inside_parameters_do_not_count() {
            let method = add(&["System.Int32"]);
            assert_eq!(method_display(&method, 50), ".Add(System.Int32)");
        }

        #[test]
        fn long_labels_are_cut_with_ellipsis() {
            let method = add(&[
                "System.Collections.Generic.Dictionary<string, int>",
                "System.Threading.CancellationToken",
            ]);
            let label = method_display(&method, 50);
            assert_eq!(label.chars().count(), 50);
            assert!(label.starts_with(".Add(System.Collections"));
            assert!(label.ends_with("..."));
        }

        #[test]
        fn tiny_bounds_do_not_panic() {
            assert_eq!(bound("abcdef", 2), "ab");
            assert_eq!(bound("abc", 3), "abc");
        }
    }

    mod composition {
        use super::*;

        #[test]
        fn no_candidates_gives_nothing() {
            let (document, call) = setup();
            assert!(compose_actions(&document, &call, &[], &AutoArgsConfig::default()).is_none());
        }

        #[test]
        fn single_candidate_uses_fixed_title() {
            let (document, call) = setup();
            let action =
                compose_actions(&document, &call, &[add(&["int"])], &AutoArgsConfig::default())
                    .unwrap();
            assert!(matches!(action, CodeAction::Rewrite(_)));
            assert_eq!(action.title(), "Add wildcard-match arguments");
        }

        #[test]
        fn many_candidates_form_a_group() {
            let (document, call) = setup();
            let candidates = [add(&["int"]), add(&["int", "bool"])];
            let action =
                compose_actions(&document, &call, &candidates, &AutoArgsConfig::default()).unwrap();
            let titles: Vec<&str> = action.rewrites().into_iter().map(|a| a.title()).collect();
            assert_eq!(titles, vec![".Add(int)", ".Add(int, bool)"]);
            assert_eq!(action.title(), "Add wildcard-match arguments");
        }

        #[test]
        fn summary_serializes() {
            let (document, call) = setup();
            let candidates = [add(&["int"]), add(&["int", "bool"])];
            let action =
                compose_actions(&document, &call, &candidates, &AutoArgsConfig::default()).unwrap();
            let json = action.summary().to_json().unwrap();
            let back: SuggestionSummary = serde_json::from_str(&json).unwrap();
            assert_eq!(back.children.len(), 2);
            assert_eq!(back.children[1].parameter_types, vec!["int", "bool"]);
            assert!(back.parameter_types.is_empty());
        }
    }

    mod apply {
        use super::*;

        #[tokio::test]
        async fn rewrites_only_the_call() {
            let (document, call) = setup();
            let action = RewriteAction::new(
                "t",
                document.clone(),
                call,
                &add(&["int", "string"]),
                &AutoArgsConfig::default(),
            );
            let rewritten = action.apply(&CancellationToken::new()).await.unwrap();
            assert_eq!(
                rewritten.text(),
                "calc.Add(Arg.Any<int>(), Arg.Any<string>())\r\n;\nnext();\n"
            );
            assert_eq!(document.text(), SOURCE);

            let before: Vec<_> = document.root().children().collect();
            let after: Vec<_> = rewritten.root().children().collect();
            assert!(before[1].green().ptr_eq(after[1].green()));
        }

        #[tokio::test]
        async fn lf_line_ending() {
            let (document, call) = setup();
            let config = AutoArgsConfig {
                line_ending: LineEnding::Lf,
                ..AutoArgsConfig::default()
            };
            let action = RewriteAction::new("t", document, call, &add(&["int"]), &config);
            let rewritten = action.apply(&CancellationToken::new()).await.unwrap();
            assert!(rewritten.text().starts_with("calc.Add(Arg.Any<int>())\n;"));
        }

        #[tokio::test]
        async fn cancelled_apply_fails() {
            let (document, call) = setup();
            let action =
                RewriteAction::new("t", document, call, &add(&["int"]), &AutoArgsConfig::default());
            let cancel = CancellationToken::new();
            cancel.cancel();
            assert!(action.apply(&cancel).await.unwrap_err().is_cancelled());
        }

        #[tokio::test]
        async fn call_from_another_snapshot_is_rejected() {
            let (_, call) = setup();
            let other = Document::parse("Tests.cs", SOURCE).unwrap();
            let action =
                RewriteAction::new("t", other, call, &add(&["int"]), &AutoArgsConfig::default());
            let err = action.apply(&CancellationToken::new()).await.unwrap_err();
            assert!(matches!(err, AutoArgsError::NodeNotFound { .. }));
        }
    }
}
