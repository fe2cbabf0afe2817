//! Connection-string resolution
//!
//! The workspace is searched in project order for a file named exactly
//! `sqlcheck.conf` in a project root. The first match wins and its entire
//! content is the opaque connection string; no internal structure is
//! parsed here.

use crate::workspace::Workspace;
use crate::{Error, Result};

/// Fixed name of the connection-string file
pub const CONNECTION_FILE: &str = "sqlcheck.conf";

/// Return the content of the first `sqlcheck.conf` in workspace order.
///
/// Later projects are not examined once a file is found. Fails with
/// [`Error::ConfNotFound`] carrying the workspace identifier when no
/// project has the file.
pub fn resolve_connection_string(workspace: &Workspace) -> Result<String> {
    for project in &workspace.projects {
        let conf_path = project.root.join(CONNECTION_FILE);
        if conf_path.exists() {
            let connection_string = std::fs::read_to_string(&conf_path)?;
            tracing::info!("connection string found at {}", conf_path.display());
            return Ok(connection_string);
        }
    }
    Err(Error::ConfNotFound(workspace.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Project;
    use std::path::Path;

    fn project(name: &str, root: &Path) -> Project {
        Project {
            name: name.to_string(),
            root: root.to_path_buf(),
            documents: Vec::new(),
        }
    }

    #[test]
    fn first_matching_project_wins() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = dir.path().join("p1");
        let p2 = dir.path().join("p2");
        let p3 = dir.path().join("p3");
        for p in [&p1, &p2, &p3] {
            std::fs::create_dir_all(p).unwrap();
        }
        std::fs::write(p2.join(CONNECTION_FILE), "CONN=A").unwrap();
        std::fs::write(p3.join(CONNECTION_FILE), "CONN=B").unwrap();

        let workspace = Workspace {
            root: dir.path().to_path_buf(),
            projects: vec![
                project("p1", &p1),
                project("p2", &p2),
                project("p3", &p3),
            ],
        };

        assert_eq!(resolve_connection_string(&workspace).unwrap(), "CONN=A");
    }

    #[test]
    fn missing_everywhere_is_a_not_found_error() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = dir.path().join("p1");
        std::fs::create_dir_all(&p1).unwrap();

        let workspace = Workspace {
            root: dir.path().to_path_buf(),
            projects: vec![project("p1", &p1)],
        };

        match resolve_connection_string(&workspace) {
            Err(Error::ConfNotFound(id)) => assert_eq!(id, workspace.id()),
            other => panic!("expected ConfNotFound, got {other:?}"),
        }
    }

    #[test]
    fn content_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = dir.path().join("p1");
        std::fs::create_dir_all(&p1).unwrap();
        std::fs::write(
            p1.join(CONNECTION_FILE),
            "Server=db;Database=app;User Id=sa;\n",
        )
        .unwrap();

        let workspace = Workspace {
            root: dir.path().to_path_buf(),
            projects: vec![project("p1", &p1)],
        };

        assert_eq!(
            resolve_connection_string(&workspace).unwrap(),
            "Server=db;Database=app;User Id=sa;\n"
        );
    }
}
