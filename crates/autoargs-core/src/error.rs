//! Error types for autoargs.
//!
//! The engine only ever *offers* optional suggestions, so most "failures"
//! (wrong context, unknown types, no overload candidates) are not errors at
//! all and never reach this module. What remains is:
//!
//! - **Cancellation**: the host abandoned the query.
//! - **Host failures**: the host could not produce a tree or semantic model.
//! - **Parse failures**: surfaced by the parser when callers ask for them.
//! - **Configuration failures**: unreadable or malformed config files.

use thiserror::Error;

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contained nothing to parse.
    #[error("empty input")]
    Empty,

    /// The input is not valid syntax.
    #[error("invalid syntax at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for autoargs operations.
#[derive(Debug, Error)]
pub enum AutoArgsError {
    /// The host signalled cancellation of the in-flight query.
    #[error("operation cancelled")]
    Cancelled,

    /// The host could not provide a syntax tree or semantic model.
    #[error("host error: {message}")]
    Host { message: String },

    /// A node expected to belong to a tree could not be located.
    #[error("node not found in tree: {kind}")]
    NodeNotFound { kind: String },

    /// Parse failure.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration could not be read or parsed.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for autoargs operations.
pub type AutoArgsResult<T> = Result<T, AutoArgsError>;

// ============================================================================
// Convenience Constructors
// ============================================================================

impl AutoArgsError {
    /// Create a host error.
    pub fn host(message: impl Into<String>) -> Self {
        AutoArgsError::Host {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        AutoArgsError::Config {
            message: message.into(),
        }
    }

    /// True if this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AutoArgsError::Cancelled)
    }
}
