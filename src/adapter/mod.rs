//! Language Adapter Framework
//!
//! Each language provides a tree-sitter grammar and a lowering into the
//! generic syntax model. The extraction engine never sees language-specific
//! grammar shapes.

pub mod framework;
pub mod decode;
pub mod rust;
pub mod python;
pub mod javascript;
pub mod go;

pub use framework::{AdapterRegistry, LanguageAdapter, default_registry};
