//! Go language adapter
//!
//! Lowers a tree-sitter-go parse into the generic syntax model. `var` and
//! `const` specs and `:=` statements become declarations; multi-name forms
//! pair names with the value list positionally when arities match. Raw
//! (backtick) strings are literal tokens taken verbatim.

use super::decode;
use super::framework::LanguageAdapter;
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, TokenKind};
use crate::{Error, Result};
use tree_sitter::{Language, Node, Parser};

/// Go language adapter
pub struct GoAdapter {
    language: Language,
}

impl GoAdapter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for GoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for GoAdapter {
    fn language_name(&self) -> &str {
        "Go"
    }

    fn file_extensions(&self) -> &[&str] {
        &["go"]
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
        "var_spec" | "const_spec" => lower_spec(node, source).into(),
        "short_var_declaration" => lower_short_var(node, source).into(),
        "interpreted_string_literal" => {
            let raw = text(node, source);
            SyntaxToken::string_literal(
                decode::unescape(decode::strip_quotes(raw)),
                line(node),
            )
            .into()
        }
        "raw_string_literal" => {
            let raw = text(node, source);
            SyntaxToken::string_literal(decode::strip_quotes(raw), line(node)).into()
        }
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

/// `var a, b T = x, y` / `const a = x`
fn lower_spec(node: Node, source: &str) -> SyntaxNode {
    let mut cursor = node.walk();
    let names: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
    let value_list = node.child_by_field_name("value");
    pair_names(names, value_list, source)
}

/// `a, b := x, y`
fn lower_short_var(node: Node, source: &str) -> SyntaxNode {
    let names: Vec<Node> = match node.child_by_field_name("left") {
        Some(left) => {
            let mut cursor = left.walk();
            left.named_children(&mut cursor)
                .filter(|n| n.kind() == "identifier")
                .collect()
        }
        None => Vec::new(),
    };
    pair_names(names, node.child_by_field_name("right"), source)
}

fn pair_names(names: Vec<Node>, value_list: Option<Node>, source: &str) -> SyntaxNode {
    let mut declaration = SyntaxNode::new(NodeKind::Declaration);
    let values: Vec<Node> = match value_list {
        Some(list) => {
            let mut cursor = list.walk();
            list.named_children(&mut cursor).collect()
        }
        None => Vec::new(),
    };
    if names.len() == values.len() {
        for (name, value) in names.into_iter().zip(values) {
            declaration.push(declarator(name, Some(value), source).into());
        }
    } else {
        // Arity mismatch (e.g. `a, b := f()`): every name shares the list
        for name in names {
            declaration.push(declarator(name, value_list, source).into());
        }
    }
    declaration
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
        let tree = GoAdapter::new().parse("test.go", source).unwrap();
        scan_declarations(&tree)
            .iter()
            .map(|c| (c.name.to_string(), reconstruct(c)))
            .collect()
    }

    #[test]
    fn short_var_declaration_is_flagged() {
        let source = "package main\n\nfunc main() {\n\tsqlQuery := \"SELECT \" + \"*\" + \" FROM t\"\n\t_ = sqlQuery\n}\n";
        assert_eq!(
            reconstructed(source),
            vec![("sqlQuery".to_string(), "SELECT * FROM t".to_string())]
        );
    }

    #[test]
    fn var_without_value_yields_empty_string() {
        let source = "package main\n\nfunc main() {\n\tvar sqlEmpty string\n\t_ = sqlEmpty\n}\n";
        assert_eq!(reconstructed(source), vec![("sqlEmpty".to_string(), String::new())]);
    }

    #[test]
    fn multi_name_forms_pair_positionally() {
        let source = "package main\n\nfunc main() {\n\tsqlA, sqlB := \"SELECT 1\", \"SELECT 2\"\n\t_, _ = sqlA, sqlB\n}\n";
        assert_eq!(
            reconstructed(source),
            vec![
                ("sqlA".to_string(), "SELECT 1".to_string()),
                ("sqlB".to_string(), "SELECT 2".to_string()),
            ]
        );
    }

    #[test]
    fn raw_strings_stay_verbatim() {
        let source = "package main\n\nconst sqlLimit = `LIMIT 10\\n`\n";
        assert_eq!(
            reconstructed(source),
            vec![("sqlLimit".to_string(), "LIMIT 10\\n".to_string())]
        );
    }

    #[test]
    fn interpreted_strings_decode_escapes() {
        let source = "package main\n\nvar sqlMulti = \"SELECT *\\nFROM t\"\n";
        assert_eq!(
            reconstructed(source),
            vec![("sqlMulti".to_string(), "SELECT *\nFROM t".to_string())]
        );
    }
}
