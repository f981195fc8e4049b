//! Core infrastructure for autoargs.
//!
//! This crate provides everything the refactoring engine needs below the
//! refactoring itself:
//! - Error types
//! - Configuration loading
//! - Text spans and position helpers
//! - Immutable syntax trees with structural sharing
//! - A lossless parser for the C# subset the engine touches
//! - Semantic model and analysis host traits
//! - An in-memory host for tests and standalone tools

pub mod config;
pub mod error;
pub mod memory;
pub mod parse;
pub mod semantic;
pub mod syntax;
pub mod text;
pub mod workspace;

pub use tokio_util::sync::CancellationToken;
