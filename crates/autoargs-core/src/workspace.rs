//! Documents and the analysis host.
//!
//! A [`Document`] is an immutable snapshot: a path plus a syntax tree.
//! Rewrites produce new documents with a bumped version and leave the old
//! snapshot untouched.
//!
//! The [`AnalysisHost`] trait is the seam between the engine and whatever
//! owns the real compilation. Both of its queries are asynchronous and
//! cancellable, because a real host may need to parse or bind on demand.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::AutoArgsResult;
use crate::parse::parse_compilation_unit;
use crate::semantic::SemanticModel;
use crate::syntax::SyntaxNode;

/// One source document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: Arc<str>,
    root: SyntaxNode,
    version: u32,
}

impl Document {
    /// Parse `source` into a new document at version 0.
    pub fn parse(path: &str, source: &str) -> AutoArgsResult<Self> {
        let root = parse_compilation_unit(source)?;
        Ok(Document::from_root(path, root))
    }

    pub fn from_root(path: &str, root: SyntaxNode) -> Self {
        Document {
            path: Arc::from(path),
            root,
            version: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Full source text.
    pub fn text(&self) -> String {
        self.root.to_string()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// The next snapshot of this document with a new tree.
    pub fn with_root(&self, root: SyntaxNode) -> Self {
        Document {
            path: Arc::clone(&self.path),
            root,
            version: self.version + 1,
        }
    }
}

/// Services the host provides for a document.
///
/// Implementations must return [`AutoArgsError::Cancelled`] once `cancel`
/// has been triggered.
///
/// [`AutoArgsError::Cancelled`]: crate::error::AutoArgsError::Cancelled
#[async_trait]
pub trait AnalysisHost: Send + Sync {
    /// The syntax root of `document`.
    async fn syntax_root(
        &self,
        document: &Document,
        cancel: &CancellationToken,
    ) -> AutoArgsResult<SyntaxNode>;

    /// A semantic model for `document`.
    async fn semantic_model(
        &self,
        document: &Document,
        cancel: &CancellationToken,
    ) -> AutoArgsResult<Arc<dyn SemanticModel>>;
}
