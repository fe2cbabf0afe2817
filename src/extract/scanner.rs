//! Declaration scanner
//!
//! Walks one syntax tree in a single depth-first, document-order pass and
//! yields a candidate for every declared name whose lower-cased identifier
//! contains the SQL marker. Purely a filtering traversal, no side effects.

use crate::syntax::{NodeKind, SyntaxNode, SyntaxTree, TokenKind};

/// Name marker that flags a declaration as SQL-related
pub const SQL_TAG: &str = "sql";

/// SQL-marker predicate over identifier text.
///
/// Kept as a standalone function so the marker can be swapped or extended
/// without touching traversal.
pub fn has_sql_marker(name: &str) -> bool {
    name.to_lowercase().contains(SQL_TAG)
}

/// A declaration flagged by the marker predicate, pending reconstruction.
/// Borrows from the tree; exists only for the duration of a scan.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'t> {
    /// The declared name
    pub name: &'t str,
    /// 1-indexed line of the declared name
    pub line: u32,
    /// Lowered initializer expression, absent for bare declarations
    pub initializer: Option<&'t SyntaxNode>,
}

/// Collect candidates from one tree, in source order.
///
/// Declarations nested inside blocks, closures, and other declarations'
/// initializers are all found; names sharing one declaration statement are
/// matched independently.
pub fn scan_declarations(tree: &SyntaxTree) -> Vec<Candidate<'_>> {
    let mut candidates = Vec::new();
    walk(&tree.root, &mut candidates);
    candidates
}

fn walk<'t>(node: &'t SyntaxNode, out: &mut Vec<Candidate<'t>>) {
    if node.kind == NodeKind::Declaration {
        for declarator in node
            .child_nodes()
            .filter(|child| child.kind == NodeKind::Declarator)
        {
            collect(declarator, out);
        }
    }
    for child in node.child_nodes() {
        walk(child, out);
    }
}

fn collect<'t>(declarator: &'t SyntaxNode, out: &mut Vec<Candidate<'t>>) {
    let Some(name) = declarator
        .child_tokens()
        .find(|token| token.kind == TokenKind::Identifier)
    else {
        return;
    };
    if !has_sql_marker(&name.text) {
        return;
    }
    out.push(Candidate {
        name: &name.text,
        line: name.line,
        initializer: declarator
            .child_nodes()
            .find(|child| child.kind == NodeKind::Initializer),
    });
}
