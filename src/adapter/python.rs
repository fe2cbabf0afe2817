//! Python language adapter
//!
//! Lowers a tree-sitter-python parse into the generic syntax model.
//! Assignments serve as the declaration construct; annotated names without
//! a value become bare declarators. f-strings are interpolation and are not
//! string-literal tokens.

use super::decode;
use super::framework::LanguageAdapter;
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, TokenKind};
use crate::{Error, Result};
use tree_sitter::{Language, Node, Parser};

/// Python language adapter
pub struct PythonAdapter {
    language: Language,
}

impl PythonAdapter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for PythonAdapter {
    fn language_name(&self) -> &str {
        "Python"
    }

    fn file_extensions(&self) -> &[&str] {
        &["py", "pyi"]
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
        "assignment" => lower_assignment(node, source).into(),
        "string" => string_token(node, source).into(),
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

/// `<target> = <value>` or `<target>: <type>` (no value)
fn lower_assignment(node: Node, source: &str) -> SyntaxNode {
    let mut declaration = SyntaxNode::new(NodeKind::Declaration);
    if let Some(left) = node.child_by_field_name("left") {
        push_targets(
            &mut declaration,
            left,
            node.child_by_field_name("right"),
            source,
        );
    }
    declaration
}

fn push_targets(declaration: &mut SyntaxNode, target: Node, value: Option<Node>, source: &str) {
    match target.kind() {
        "identifier" => declaration.push(declarator(target, value, source).into()),
        "pattern_list" | "tuple_pattern" => {
            let mut target_cursor = target.walk();
            let names: Vec<Node> = target.named_children(&mut target_cursor).collect();
            let values: Vec<Node> = match value
                .filter(|v| v.kind() == "expression_list" || v.kind() == "tuple")
            {
                Some(list) => {
                    let mut value_cursor = list.walk();
                    list.named_children(&mut value_cursor).collect()
                }
                None => Vec::new(),
            };
            if names.len() == values.len() {
                for (name, name_value) in names.into_iter().zip(values) {
                    push_targets(declaration, name, Some(name_value), source);
                }
            } else {
                for name in names {
                    push_targets(declaration, name, value, source);
                }
            }
        }
        // Attribute and subscript targets bind no new name
        _ => {}
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

/// Decode one Python string literal. f-strings keep their raw text as an
/// `Other` token so their fragments never reach a candidate.
fn string_token(node: Node, source: &str) -> SyntaxToken {
    let raw = text(node, source);
    let prefix_len = raw
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    let prefix = &raw[..prefix_len];
    if prefix.contains('f') || prefix.contains('F') {
        return SyntaxToken::new(TokenKind::Other, raw, line(node));
    }
    let body = strip_python_quotes(&raw[prefix_len..]);
    let is_raw = prefix.contains('r') || prefix.contains('R');
    let value = if is_raw {
        body.to_string()
    } else {
        decode::unescape(body)
    };
    SyntaxToken::string_literal(value, line(node))
}

fn strip_python_quotes(body: &str) -> &str {
    for triple in ["\"\"\"", "'''"] {
        if body.len() >= 6 && body.starts_with(triple) && body.ends_with(triple) {
            return &body[3..body.len() - 3];
        }
    }
    decode::strip_quotes(body)
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn line(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}
