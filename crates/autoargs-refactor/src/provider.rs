//! The refactoring entry point.
//!
//! [`AutoArgsProvider::compute_refactorings`] runs the whole pipeline for
//! one selection:
//!
//! 1. Fetch the syntax root and locate the selected node.
//! 2. Syntactic filter: an empty argument list on a member-access call.
//! 3. Fetch the semantic model and apply the semantic filter.
//! 4. Enumerate overload candidates.
//! 5. Compose and register actions.
//!
//! Every stage either advances or returns `Ok(())` with nothing registered.
//! Cancellation is checked between stages and surfaces as
//! [`AutoArgsError::Cancelled`], again with nothing registered.

use std::sync::Arc;

use autoargs_core::config::AutoArgsConfig;
use autoargs_core::error::{AutoArgsError, AutoArgsResult};
use autoargs_core::text::{position_to_byte_offset, Span};
use autoargs_core::workspace::{AnalysisHost, Document};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::{compose_actions, CodeAction};
use crate::applicability::{check_candidate, find_candidate_invocation};
use crate::candidates::resolve_candidates;

/// One refactoring request: a document, a selection, and a sink for actions.
#[derive(Debug)]
pub struct RefactoringContext {
    document: Document,
    span: Span,
    cancel: CancellationToken,
    actions: Vec<CodeAction>,
}

impl RefactoringContext {
    pub fn new(document: Document, span: Span, cancel: CancellationToken) -> Self {
        RefactoringContext {
            document,
            span,
            cancel,
            actions: Vec::new(),
        }
    }

    /// A request for an editor caret at 1-indexed `line` and `col`.
    pub fn at_position(document: Document, line: u32, col: u32, cancel: CancellationToken) -> Self {
        let offset = position_to_byte_offset(&document.text(), line, col);
        RefactoringContext::new(document, Span::caret(offset), cancel)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn register_refactoring(&mut self, action: CodeAction) {
        self.actions.push(action);
    }

    /// Actions registered so far.
    pub fn actions(&self) -> &[CodeAction] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<CodeAction> {
        self.actions
    }

    fn check_cancelled(&self) -> AutoArgsResult<()> {
        if self.cancel.is_cancelled() {
            Err(AutoArgsError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Offers to fill empty argument lists on mocked-interface calls with
/// wildcard matchers.
#[derive(Debug, Clone, Default)]
pub struct AutoArgsProvider {
    config: Arc<AutoArgsConfig>,
}

impl AutoArgsProvider {
    pub fn new(config: AutoArgsConfig) -> Self {
        AutoArgsProvider {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AutoArgsConfig {
        &self.config
    }

    /// Inspect the context's selection and register any applicable action.
    pub async fn compute_refactorings(
        &self,
        host: &dyn AnalysisHost,
        context: &mut RefactoringContext,
    ) -> AutoArgsResult<()> {
        let root = host
            .syntax_root(&context.document, &context.cancel)
            .await?;
        let Some(node) = root.find_node(context.span) else {
            debug!(span = %context.span, "selection lies outside the document");
            return Ok(());
        };
        let candidate = match find_candidate_invocation(&node) {
            Ok(candidate) => candidate,
            Err(reason) => {
                debug!(%reason, "not offering wildcard arguments");
                return Ok(());
            }
        };

        context.check_cancelled()?;
        let model = host
            .semantic_model(&context.document, &context.cancel)
            .await?;
        let call = match check_candidate(candidate, model.as_ref(), &self.config) {
            Ok(call) => call,
            Err(reason) => {
                debug!(%reason, "not offering wildcard arguments");
                return Ok(());
            }
        };

        context.check_cancelled()?;
        let candidates = resolve_candidates(&call.invocation, model.as_ref(), self.config.candidate_source);
        // The actions must rewrite the tree the call was found in.
        let document = if root.green().ptr_eq(context.document.root().green()) {
            context.document.clone()
        } else {
            context.document.with_root(root)
        };
        let Some(action) = compose_actions(&document, &call.invocation, &candidates, &self.config) else {
            debug!(
                receiver = %call.receiver_type,
                "no overload candidates for call"
            );
            return Ok(());
        };

        context.check_cancelled()?;
        debug!(
            title = action.title(),
            choices = action.rewrites().len(),
            "registering wildcard-argument action"
        );
        context.register_refactoring(action);
        Ok(())
    }
}
