//! # Sqlscan - SQL candidate discovery for source workspaces
//!
//! Scans a multi-project source workspace for string values that are likely
//! used as SQL statements, as a precursor to SQL-safety checking.
//!
//! Sqlscan provides:
//! - A generic tagged-variant syntax model, decoupled from any one grammar
//! - Tree-sitter based lowering with pluggable language adapters
//! - A declaration scanner keyed on the `sql` name marker
//! - Literal reconstruction across concatenated string fragments
//! - First-match `sqlcheck.conf` connection-string resolution

pub mod syntax;
pub mod workspace;
pub mod adapter;
pub mod extract;
pub mod conf;
pub mod filter;

// Re-exports for convenient access
pub use syntax::{SyntaxElement, SyntaxNode, SyntaxProvider, SyntaxToken, SyntaxTree};
pub use workspace::{Document, Project, Workspace};
pub use extract::{SqlCandidate, collect_candidates, scan_workspace};
pub use conf::resolve_connection_string;

/// Result type alias for sqlscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sqlscan operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlcheck.conf not found in workspace {0}")]
    ConfNotFound(String),
}
