//! Literal-extraction engine
//!
//! The scanner finds declarations flagged by the SQL name marker, the
//! reconstructor reassembles their literal text, and the aggregator drives
//! both across every document of a workspace.

pub mod scanner;
pub mod reconstruct;
pub mod aggregate;

pub use aggregate::{SqlCandidate, collect_candidates, scan_workspace};
pub use reconstruct::reconstruct;
pub use scanner::{Candidate, SQL_TAG, has_sql_marker, scan_declarations};
