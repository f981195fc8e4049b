//! Wildcard-argument refactoring for calls on mocked interfaces.
//!
//! Given a call such as `calc.Add()` on a substitute whose interface only
//! declares `Add(int)` and `Add(int, bool)`, this crate offers to fill the
//! empty argument list with `Arg.Any<T>()` matchers, one action per
//! overload.
//!
//! - `type_syntax`: type display string to type syntax
//! - `arguments`: wildcard argument list construction
//! - `applicability`: syntactic and semantic preconditions
//! - `candidates`: overload candidate enumeration
//! - `action`: deferred rewrites, labels, grouping
//! - `provider`: the end-to-end pipeline

pub mod action;
pub mod applicability;
pub mod arguments;
pub mod candidates;
pub mod provider;
pub mod type_syntax;

pub use action::{CodeAction, RewriteAction, SuggestionSummary};
pub use provider::{AutoArgsProvider, RefactoringContext};
