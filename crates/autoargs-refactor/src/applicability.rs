//! Deciding whether a selection is a call the refactoring can fix.
//!
//! The check is split in two so the provider can stop before asking the
//! host for a semantic model:
//!
//! 1. [`find_candidate_invocation`] is purely syntactic: an empty argument
//!    list on a member-access invocation.
//! 2. [`check_applicability`] adds the semantic conditions: the receiver is
//!    an interface and the mocking library is referenced.

use autoargs_core::config::AutoArgsConfig;
use autoargs_core::semantic::{SemanticModel, TypeInfo};
use autoargs_core::syntax::ast::{ArgumentList, InvocationExpression};
use autoargs_core::syntax::SyntaxNode;
use thiserror::Error;

/// Why a selection does not qualify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotApplicable {
    #[error("selection is not inside an argument list")]
    NoArgumentList,

    #[error("argument list already has {count} argument(s)")]
    ArgumentsPresent { count: usize },

    #[error("argument list does not belong to an invocation")]
    NotAnInvocation,

    #[error("invoked expression is not a member access")]
    NotMemberAccess,

    #[error("receiver type could not be determined")]
    UnknownReceiverType,

    #[error("receiver type {type_name} is not an interface")]
    ReceiverNotInterface { type_name: String },

    #[error("project does not reference {library}")]
    LibraryNotReferenced { library: String },
}

/// A call that passed the syntactic checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateInvocation {
    pub invocation: InvocationExpression,
    pub argument_list: ArgumentList,
    /// The receiver expression (`calc` in `calc.Add()`).
    pub receiver: SyntaxNode,
}

/// A call that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicableCall {
    pub invocation: InvocationExpression,
    pub argument_list: ArgumentList,
    pub receiver_type: TypeInfo,
}

/// Syntactic half: find the empty argument list of a member-access call at
/// or above `node`.
pub fn find_candidate_invocation(node: &SyntaxNode) -> Result<CandidateInvocation, NotApplicable> {
    let argument_list = node
        .ancestors()
        .find_map(ArgumentList::cast)
        .ok_or(NotApplicable::NoArgumentList)?;
    let count = argument_list.len();
    if count > 0 {
        return Err(NotApplicable::ArgumentsPresent { count });
    }
    let invocation = argument_list
        .invocation()
        .ok_or(NotApplicable::NotAnInvocation)?;
    let receiver = invocation
        .member_access()
        .and_then(|access| access.expression())
        .ok_or(NotApplicable::NotMemberAccess)?;
    Ok(CandidateInvocation {
        invocation,
        argument_list,
        receiver,
    })
}

/// True if any referenced library's display name mentions `library`.
pub fn references_library(model: &dyn SemanticModel, library: &str) -> bool {
    model
        .external_dependency_names()
        .iter()
        .any(|name| name.contains(library))
}

/// Semantic half, applied to a syntactic candidate.
pub fn check_candidate(
    candidate: CandidateInvocation,
    model: &dyn SemanticModel,
    config: &AutoArgsConfig,
) -> Result<ApplicableCall, NotApplicable> {
    let receiver_type = model
        .type_of(&candidate.receiver)
        .ok_or(NotApplicable::UnknownReceiverType)?;
    if !receiver_type.is_interface() {
        return Err(NotApplicable::ReceiverNotInterface {
            type_name: receiver_type.display_name(),
        });
    }
    if !references_library(model, &config.library) {
        return Err(NotApplicable::LibraryNotReferenced {
            library: config.library.clone(),
        });
    }
    Ok(ApplicableCall {
        invocation: candidate.invocation,
        argument_list: candidate.argument_list,
        receiver_type,
    })
}

/// Both halves in one call.
pub fn check_applicability(
    node: &SyntaxNode,
    model: &dyn SemanticModel,
    config: &AutoArgsConfig,
) -> Result<ApplicableCall, NotApplicable> {
    let candidate = find_candidate_invocation(node)?;
    check_candidate(candidate, model, config)
}
