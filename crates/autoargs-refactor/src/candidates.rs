//! Overload candidate enumeration.

use autoargs_core::config::CandidateSource;
use autoargs_core::semantic::{MethodSymbol, SemanticModel};
use autoargs_core::syntax::ast::InvocationExpression;

/// The methods a bare call might have been meant to invoke.
///
/// With [`CandidateSource::OverloadFailure`] these are the candidates the
/// binder considered when overload resolution failed; a call that resolves,
/// or whose name is unknown, has none. With [`CandidateSource::MemberGroup`]
/// every same-name method on the receiver type is offered.
pub fn resolve_candidates(
    invocation: &InvocationExpression,
    model: &dyn SemanticModel,
    source: CandidateSource,
) -> Vec<MethodSymbol> {
    match source {
        CandidateSource::OverloadFailure => model
            .resolve_call_symbol(invocation.syntax())
            .candidates()
            .to_vec(),
        CandidateSource::MemberGroup => model.member_group(invocation.syntax()),
    }
}
