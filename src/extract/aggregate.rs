//! Workspace aggregation
//!
//! Drives the scanner and reconstructor over every document of every
//! project and collects the results into one flat, ordered sequence.

use super::reconstruct::reconstruct;
use super::scanner::scan_declarations;
use crate::Result;
use crate::syntax::SyntaxProvider;
use crate::workspace::Workspace;
use serde::Serialize;

/// One reconstructed SQL candidate with its source location.
#[derive(Debug, Clone, Serialize)]
pub struct SqlCandidate {
    pub project: String,
    pub document: String,
    pub variable: String,
    pub line: u32,
    pub text: String,
}

/// Scan every document in the workspace.
///
/// Output order is exactly (project order, document order, in-document
/// declaration order). Provider failures propagate unchanged: nothing is
/// retried and no partial result is suppressed. Duplicate and empty texts
/// are preserved verbatim; filtering is the caller's business.
pub fn scan_workspace(
    workspace: &Workspace,
    provider: &impl SyntaxProvider,
) -> Result<Vec<SqlCandidate>> {
    let mut candidates = Vec::new();
    for project in &workspace.projects {
        for document in &project.documents {
            let tree = provider.syntax_tree(document)?;
            for candidate in scan_declarations(&tree) {
                let text = reconstruct(&candidate);
                tracing::debug!(
                    "{}:{} {} -> {:?}",
                    document.relative_path,
                    candidate.line,
                    candidate.name,
                    text
                );
                candidates.push(SqlCandidate {
                    project: project.name.clone(),
                    document: document.relative_path.clone(),
                    variable: candidate.name.to_string(),
                    line: candidate.line,
                    text,
                });
            }
        }
    }
    Ok(candidates)
}

/// The reconstructed strings alone, in scan order.
pub fn collect_candidates(
    workspace: &Workspace,
    provider: &impl SyntaxProvider,
) -> Result<Vec<String>> {
    Ok(scan_workspace(workspace, provider)?
        .into_iter()
        .map(|candidate| candidate.text)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};
    use crate::workspace::{Document, Project};
    use crate::{Error, Workspace};
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Provider over pre-built trees, keyed by relative path.
    struct FixedProvider {
        trees: HashMap<String, SyntaxTree>,
    }

    impl SyntaxProvider for FixedProvider {
        fn syntax_tree(&self, document: &Document) -> Result<SyntaxTree> {
            self.trees
                .get(&document.relative_path)
                .cloned()
                .ok_or_else(|| Error::Parse(format!("no tree for {}", document.relative_path)))
        }
    }

    fn declaration(name: &str, line: u32, literals: &[&str]) -> SyntaxNode {
        let initializer = SyntaxNode::with_children(
            NodeKind::Initializer,
            literals
                .iter()
                .map(|value| SyntaxElement::from(SyntaxToken::string_literal(*value, line)))
                .collect(),
        );
        let declarator = SyntaxNode::with_children(
            NodeKind::Declarator,
            vec![
                SyntaxToken::identifier(name, line).into(),
                initializer.into(),
            ],
        );
        SyntaxNode::with_children(NodeKind::Declaration, vec![declarator.into()])
    }

    fn tree(declarations: Vec<SyntaxNode>) -> SyntaxTree {
        SyntaxTree::new(SyntaxNode::with_children(
            NodeKind::Other,
            declarations.into_iter().map(SyntaxElement::from).collect(),
        ))
    }

    fn document(relative_path: &str) -> Document {
        Document {
            path: PathBuf::from("/ws").join(relative_path),
            relative_path: relative_path.to_string(),
        }
    }

    fn two_project_workspace() -> (Workspace, FixedProvider) {
        let workspace = Workspace {
            root: PathBuf::from("/ws"),
            projects: vec![
                Project {
                    name: "p1".to_string(),
                    root: PathBuf::from("/ws/p1"),
                    documents: vec![document("p1/d1.rs")],
                },
                Project {
                    name: "p2".to_string(),
                    root: PathBuf::from("/ws/p2"),
                    documents: vec![document("p2/d1.rs")],
                },
            ],
        };
        let mut trees = HashMap::new();
        trees.insert(
            "p1/d1.rs".to_string(),
            tree(vec![
                declaration("sql_a", 1, &["SELECT 1"]),
                declaration("sql_b", 2, &["SELECT 2"]),
            ]),
        );
        trees.insert(
            "p2/d1.rs".to_string(),
            tree(vec![declaration("sql_c", 1, &["SELECT 1"])]),
        );
        (workspace, FixedProvider { trees })
    }

    #[test]
    fn order_is_project_then_document_then_declaration() {
        let (workspace, provider) = two_project_workspace();
        let texts = collect_candidates(&workspace, &provider).unwrap();
        assert_eq!(texts, vec!["SELECT 1", "SELECT 2", "SELECT 1"]);
    }

    #[test]
    fn duplicates_are_preserved_verbatim() {
        let (workspace, provider) = two_project_workspace();
        let texts = collect_candidates(&workspace, &provider).unwrap();
        assert_eq!(texts.iter().filter(|t| *t == "SELECT 1").count(), 2);
    }

    #[test]
    fn repeated_calls_yield_identical_sequences() {
        let (workspace, provider) = two_project_workspace();
        let first = collect_candidates(&workspace, &provider).unwrap();
        let second = collect_candidates(&workspace, &provider).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_candidates_are_recorded() {
        let workspace = Workspace {
            root: PathBuf::from("/ws"),
            projects: vec![Project {
                name: "p1".to_string(),
                root: PathBuf::from("/ws/p1"),
                documents: vec![document("p1/d1.rs")],
            }],
        };
        let mut trees = HashMap::new();
        trees.insert(
            "p1/d1.rs".to_string(),
            tree(vec![declaration("sql_empty", 1, &[])]),
        );

        let texts = collect_candidates(&workspace, &FixedProvider { trees }).unwrap();
        assert_eq!(texts, vec![String::new()]);
    }

    #[test]
    fn provider_failures_propagate() {
        let workspace = Workspace {
            root: PathBuf::from("/ws"),
            projects: vec![Project {
                name: "p1".to_string(),
                root: PathBuf::from("/ws/p1"),
                documents: vec![document("p1/missing.rs")],
            }],
        };
        let provider = FixedProvider {
            trees: HashMap::new(),
        };
        assert!(matches!(
            scan_workspace(&workspace, &provider),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn records_carry_source_locations() {
        let (workspace, provider) = two_project_workspace();
        let records = scan_workspace(&workspace, &provider).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].project, "p1");
        assert_eq!(records[0].document, "p1/d1.rs");
        assert_eq!(records[0].variable, "sql_a");
        assert_eq!(records[0].line, 1);
        assert_eq!(records[2].project, "p2");
    }
}
