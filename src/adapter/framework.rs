//! Core adapter framework
//!
//! Defines the trait all language adapters implement, the extension-keyed
//! registry, and the registry-backed syntax provider used by the aggregator.

use crate::syntax::{SyntaxProvider, SyntaxTree};
use crate::workspace::Document;
use crate::{Error, Result};
use std::path::Path;

/// Trait for language adapters
///
/// Each adapter is responsible for:
/// 1. Identifying files it can parse
/// 2. Parsing them with its tree-sitter grammar
/// 3. Lowering the parse into the generic syntax model
pub trait LanguageAdapter: Send + Sync {
    /// Get the language name (for display)
    fn language_name(&self) -> &str;

    /// Get file extensions this adapter handles
    fn file_extensions(&self) -> &[&str];

    /// Check if this adapter can handle a file
    fn can_handle(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            self.file_extensions().contains(&ext)
        } else {
            false
        }
    }

    /// Parse one file and lower it into the generic syntax model.
    /// `path` is used only for error messages.
    fn parse(&self, path: &str, content: &str) -> Result<SyntaxTree>;
}

/// Registry of language adapters
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn LanguageAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter
    pub fn register(&mut self, adapter: impl LanguageAdapter + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    /// Find an adapter for a file
    pub fn find_adapter(&self, path: &Path) -> Option<&dyn LanguageAdapter> {
        self.adapters
            .iter()
            .find(|a| a.can_handle(path))
            .map(|a| a.as_ref())
    }

    /// Get all registered adapters
    pub fn adapters(&self) -> &[Box<dyn LanguageAdapter>] {
        &self.adapters
    }
}

impl SyntaxProvider for AdapterRegistry {
    /// Read and parse a document. This is the scan's only blocking
    /// operation; read and parse failures propagate unchanged.
    fn syntax_tree(&self, document: &Document) -> Result<SyntaxTree> {
        let adapter = self.find_adapter(&document.path).ok_or_else(|| {
            Error::Parse(format!(
                "no language adapter for {}",
                document.relative_path
            ))
        })?;
        let content = std::fs::read_to_string(&document.path)
            .map_err(|e| Error::Parse(format!("{}: {e}", document.relative_path)))?;
        adapter.parse(&document.relative_path, &content)
    }
}

/// Create a default registry with all built-in adapters
pub fn default_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    registry.register(super::rust::RustAdapter::new());
    registry.register(super::python::PythonAdapter::new());
    registry.register(super::javascript::JavaScriptAdapter::new());
    registry.register(super::go::GoAdapter::new());
    registry
}
