//! Rust language adapter
//!
//! Lowers a tree-sitter-rust parse into the generic syntax model. `let`,
//! `const`, and `static` bindings become declarations; tuple patterns pair
//! names with tuple-expression elements positionally when arities match.

use super::decode;
use super::framework::LanguageAdapter;
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, TokenKind};
use crate::{Error, Result};
use tree_sitter::{Language, Node, Parser};

/// Rust language adapter
pub struct RustAdapter {
    language: Language,
}

impl RustAdapter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_rust::LANGUAGE.into(),
        }
    }
}

impl Default for RustAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for RustAdapter {
    fn language_name(&self) -> &str {
        "Rust"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn parse(&self, path: &str, content: &str) -> Result<SyntaxTree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| Error::Parse(format!("{path}: {e}")))?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| Error::Parse(format!("{path}: tree-sitter produced no tree")))?;
        Ok(SyntaxTree::new(lower_root(tree.root_node(), content)))
    }
}

fn lower_root(root: Node, source: &str) -> SyntaxNode {
    match lower(root, source) {
        SyntaxElement::Node(node) => node,
        SyntaxElement::Token(token) => {
            SyntaxNode::with_children(NodeKind::Other, vec![token.into()])
        }
    }
}

fn lower(node: Node, source: &str) -> SyntaxElement {
    match node.kind() {
        "let_declaration" => lower_let(node, source).into(),
        "const_item" | "static_item" => lower_item(node, source).into(),
        "string_literal" => string_token(node, source).into(),
        "raw_string_literal" => raw_string_token(node, source).into(),
        "identifier" => SyntaxToken::identifier(text(node, source), line(node)).into(),
        _ if node.named_child_count() == 0 => {
            SyntaxToken::new(TokenKind::Other, text(node, source), line(node)).into()
        }
        _ => {
            let mut cursor = node.walk();
            let children = node
                .named_children(&mut cursor)
                .map(|child| lower(child, source))
                .collect();
            SyntaxNode::with_children(NodeKind::Other, children).into()
        }
    }
}

/// `let <pattern> = <value>;`
fn lower_let(node: Node, source: &str) -> SyntaxNode {
    let mut declaration = SyntaxNode::new(NodeKind::Declaration);
    if let Some(pattern) = node.child_by_field_name("pattern") {
        push_declarators(
            &mut declaration,
            pattern,
            node.child_by_field_name("value"),
            source,
        );
    }
    declaration
}

/// `const NAME: T = <value>;` / `static NAME: T = <value>;`
fn lower_item(node: Node, source: &str) -> SyntaxNode {
    let mut declaration = SyntaxNode::new(NodeKind::Declaration);
    if let Some(name) = node.child_by_field_name("name") {
        declaration.push(declarator(name, node.child_by_field_name("value"), source).into());
    }
    declaration
}

fn push_declarators(
    declaration: &mut SyntaxNode,
    pattern: Node,
    value: Option<Node>,
    source: &str,
) {
    match pattern.kind() {
        "identifier" => declaration.push(declarator(pattern, value, source).into()),
        "tuple_pattern" => {
            let mut pattern_cursor = pattern.walk();
            let elements: Vec<Node> = pattern.named_children(&mut pattern_cursor).collect();
            let values: Vec<Node> = match value.filter(|v| v.kind() == "tuple_expression") {
                Some(tuple) => {
                    let mut value_cursor = tuple.walk();
                    tuple.named_children(&mut value_cursor).collect()
                }
                None => Vec::new(),
            };
            if elements.len() == values.len() {
                for (element, element_value) in elements.into_iter().zip(values) {
                    push_declarators(declaration, element, Some(element_value), source);
                }
            } else {
                for element in elements {
                    push_shared(declaration, element, value, source);
                }
            }
        }
        _ => push_shared(declaration, pattern, value, source),
    }
}

/// Every name bound by the pattern shares the whole initializer.
fn push_shared(declaration: &mut SyntaxNode, pattern: Node, value: Option<Node>, source: &str) {
    let mut names = Vec::new();
    pattern_identifiers(pattern, &mut names);
    for name in names {
        declaration.push(declarator(name, value, source).into());
    }
}

fn pattern_identifiers<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    if node.kind() == "identifier" {
        out.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        pattern_identifiers(child, out);
    }
}

fn declarator(name: Node, value: Option<Node>, source: &str) -> SyntaxNode {
    let mut declarator = SyntaxNode::new(NodeKind::Declarator);
    declarator.push(SyntaxToken::identifier(text(name, source), line(name)).into());
    if let Some(value) = value {
        declarator.push(
            SyntaxNode::with_children(NodeKind::Initializer, vec![lower(value, source)]).into(),
        );
    }
    declarator
}

/// `"..."` or `b"..."`: quotes stripped, escapes expanded
fn string_token(node: Node, source: &str) -> SyntaxToken {
    let raw = text(node, source);
    let raw = raw.strip_prefix('b').unwrap_or(raw);
    SyntaxToken::string_literal(decode::unescape(decode::strip_quotes(raw)), line(node))
}

/// `r"..."` / `r#"..."#` / `br#"..."#`: content taken verbatim
fn raw_string_token(node: Node, source: &str) -> SyntaxToken {
    let body = text(node, source);
    let body = body.strip_prefix('b').unwrap_or(body);
    let body = body.strip_prefix('r').unwrap_or(body);
    let hashes = body.chars().take_while(|&c| c == '#').count();
    let body = &body[hashes..body.len() - hashes];
    SyntaxToken::string_literal(decode::strip_quotes(body), line(node))
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn line(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{reconstruct, scan_declarations};

    fn reconstructed(source: &str) -> Vec<(String, String)> {
        let tree = RustAdapter::new().parse("test.rs", source).unwrap();
        scan_declarations(&tree)
            .iter()
            .map(|c| (c.name.to_string(), reconstruct(c)))
            .collect()
    }

    #[test]
    fn let_binding_is_flagged_and_reconstructed() {
        let source = r#"
fn main() {
    let sql_query = "SELECT id FROM users";
    let other = "not flagged";
}
"#;
        assert_eq!(
            reconstructed(source),
            vec![("sql_query".to_string(), "SELECT id FROM users".to_string())]
        );
    }

    #[test]
    fn const_and_static_items_are_declarations() {
        let source = r#"
const SQL_LIMIT: &str = "LIMIT 10";
static SQL_BASE: &str = "SELECT *";
"#;
        assert_eq!(
            reconstructed(source),
            vec![
                ("SQL_LIMIT".to_string(), "LIMIT 10".to_string()),
                ("SQL_BASE".to_string(), "SELECT *".to_string()),
            ]
        );
    }

    #[test]
    fn literals_are_collected_across_wrapping_expressions() {
        let source = r#"
fn main() {
    let sql = concat!("SELECT ", "* FROM t");
}
"#;
        assert_eq!(
            reconstructed(source),
            vec![("sql".to_string(), "SELECT * FROM t".to_string())]
        );
    }

    #[test]
    fn escapes_decode_and_raw_strings_stay_verbatim() {
        let source = "fn main() {\n    let sql_a = \"line1\\nline2\";\n    let sql_b = r#\"keep \\n and \"quotes\"\"#;\n}\n";
        assert_eq!(
            reconstructed(source),
            vec![
                ("sql_a".to_string(), "line1\nline2".to_string()),
                ("sql_b".to_string(), "keep \\n and \"quotes\"".to_string()),
            ]
        );
    }

    #[test]
    fn tuple_patterns_pair_names_with_values() {
        let source = r#"
fn main() {
    let (sql_first, sql_second) = ("SELECT 1", "SELECT 2");
    let (sql_mixed, other) = ("SELECT 3", 42);
}
"#;
        assert_eq!(
            reconstructed(source),
            vec![
                ("sql_first".to_string(), "SELECT 1".to_string()),
                ("sql_second".to_string(), "SELECT 2".to_string()),
                ("sql_mixed".to_string(), "SELECT 3".to_string()),
            ]
        );
    }

    #[test]
    fn bare_declaration_yields_empty_string() {
        let source = r#"
fn main() {
    let sql_pending;
}
"#;
        assert_eq!(reconstructed(source), vec![("sql_pending".to_string(), String::new())]);
    }

    #[test]
    fn nested_declarations_are_found() {
        let source = r#"
fn main() {
    let run = || {
        let sql_inner = "SELECT 1";
    };
}
"#;
        assert_eq!(
            reconstructed(source),
            vec![("sql_inner".to_string(), "SELECT 1".to_string())]
        );
    }
}
