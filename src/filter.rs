use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Gitignore-style filter applied during workspace discovery.
///
/// Honors `.gitignore`/`.ignore` at the workspace root and adds defaults
/// that keep build output and vendored code out of the scan.
pub struct IgnoreFilter {
    inner: Gitignore,
}

impl IgnoreFilter {
    pub fn new(root: &Path) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        builder.add(root.join(".gitignore"));
        builder.add(root.join(".ignore"));

        let defaults = [
            ".git/", ".hg/", ".svn/",
            "target/", "node_modules/", "vendor/", "venv/", ".venv/",
            "dist/", "build/", "out/", "__pycache__/",
            "*.min.js",
        ];

        for pattern in defaults {
            // Static patterns, all valid
            builder.add_line(None, pattern).ok();
        }

        Self {
            inner: builder.build().unwrap_or_else(|_| Gitignore::empty()),
        }
    }

    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.inner.matched(path, is_dir).is_ignore()
    }
}
