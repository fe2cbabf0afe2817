//! Workspace model and directory-based loader
//!
//! A workspace is an ordered sequence of projects; a project owns a root
//! directory and an ordered sequence of documents. All three are plain
//! immutable values for the duration of a scan - parsing is deferred to the
//! syntax provider, so traversal over them is a pure function.

use crate::Result;
use crate::adapter::AdapterRegistry;
use crate::filter::IgnoreFilter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One source file of a project.
#[derive(Debug, Clone)]
pub struct Document {
    /// Absolute path, used for reading
    pub path: PathBuf,
    /// Workspace-relative path, used for display
    pub relative_path: String,
}

/// A unit of source organization with a root directory and its documents.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub root: PathBuf,
    pub documents: Vec<Document>,
}

/// The top-level scanned unit: an ordered sequence of projects.
///
/// Project order is deterministic (directory name order from the loader)
/// and determines search and aggregation precedence.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub projects: Vec<Project>,
}

impl Workspace {
    /// Identifier used in error and log messages
    pub fn id(&self) -> String {
        self.root.display().to_string()
    }
}

/// Load a workspace from a directory.
///
/// Every direct subdirectory that transitively contains at least one
/// supported, non-ignored source file becomes a project, in name order.
/// If no subdirectory qualifies, the root itself is the single project.
pub fn load_workspace(root: &Path, registry: &AdapterRegistry) -> Result<Workspace> {
    let root = root.to_path_buf();
    let filter = IgnoreFilter::new(&root);

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(&root)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| !filter.is_ignored(path, true))
        .collect();
    subdirs.sort();

    let mut projects = Vec::new();
    for dir in subdirs {
        let documents = collect_documents(&root, &dir, registry, &filter);
        if !documents.is_empty() {
            projects.push(Project {
                name: dir_name(&dir),
                root: dir,
                documents,
            });
        }
    }

    // Flat workspace: the root directory is itself the single project
    if projects.is_empty() {
        let documents = collect_documents(&root, &root, registry, &filter);
        if !documents.is_empty() {
            projects.push(Project {
                name: dir_name(&root),
                root: root.clone(),
                documents,
            });
        }
    }

    tracing::info!(
        "loaded workspace {} ({} projects)",
        root.display(),
        projects.len()
    );

    Ok(Workspace { root, projects })
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn collect_documents(
    workspace_root: &Path,
    project_root: &Path,
    registry: &AdapterRegistry,
    filter: &IgnoreFilter,
) -> Vec<Document> {
    let mut documents: Vec<Document> = WalkDir::new(project_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !filter.is_ignored(entry.path(), entry.file_type().is_dir()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| registry.find_adapter(entry.path()).is_some())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(workspace_root)
                .unwrap_or(entry.path());
            Document {
                path: entry.path().to_path_buf(),
                relative_path: relative.to_string_lossy().replace('\\', "/"),
            }
        })
        .collect();

    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    documents
}
