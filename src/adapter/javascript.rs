//! JavaScript language adapter
//!
//! Lowers a tree-sitter-javascript parse into the generic syntax model.
//! `var`/`let`/`const` declarations become declarations; template strings
//! are interpolation and are not string-literal tokens.

use super::decode;
use super::framework::LanguageAdapter;
use crate::syntax::{NodeKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, TokenKind};
use crate::{Error, Result};
use tree_sitter::{Language, Node, Parser};

/// JavaScript language adapter
pub struct JavaScriptAdapter {
    language: Language,
}

impl JavaScriptAdapter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for JavaScriptAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for JavaScriptAdapter {
    fn language_name(&self) -> &str {
        "JavaScript"
    }

    fn file_extensions(&self) -> &[&str] {
        &["js", "jsx", "mjs", "cjs"]
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
        "variable_declaration" | "lexical_declaration" => lower_declaration(node, source).into(),
        "string" => {
            let raw = text(node, source);
            SyntaxToken::string_literal(
                decode::unescape(decode::strip_quotes(raw)),
                line(node),
            )
            .into()
        }
        // Template strings are interpolation; their fragments never reach a
        // candidate
        "template_string" => {
            SyntaxToken::new(TokenKind::Other, text(node, source), line(node)).into()
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

/// `var`/`let`/`const` with one `variable_declarator` per bound name
fn lower_declaration(node: Node, source: &str) -> SyntaxNode {
    let mut declaration = SyntaxNode::new(NodeKind::Declaration);
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "variable_declarator" {
            continue;
        }
        let value = child.child_by_field_name("value");
        if let Some(name) = child.child_by_field_name("name") {
            push_bindings(&mut declaration, name, value, source);
        }
    }
    declaration
}

fn push_bindings(declaration: &mut SyntaxNode, target: Node, value: Option<Node>, source: &str) {
    match target.kind() {
        "identifier" => declaration.push(declarator(target, value, source).into()),
        "array_pattern" => {
            let mut target_cursor = target.walk();
            let elements: Vec<Node> = target.named_children(&mut target_cursor).collect();
            let values: Vec<Node> = match value.filter(|v| v.kind() == "array") {
                Some(array) => {
                    let mut value_cursor = array.walk();
                    array.named_children(&mut value_cursor).collect()
                }
                None => Vec::new(),
            };
            if elements.len() == values.len() {
                for (element, element_value) in elements.into_iter().zip(values) {
                    push_bindings(declaration, element, Some(element_value), source);
                }
            } else {
                for element in elements {
                    push_shared(declaration, element, value, source);
                }
            }
        }
        _ => push_shared(declaration, target, value, source),
    }
}

/// Every name bound by the pattern shares the whole initializer.
fn push_shared(declaration: &mut SyntaxNode, target: Node, value: Option<Node>, source: &str) {
    let mut names = Vec::new();
    binding_identifiers(target, &mut names);
    for name in names {
        declaration.push(declarator(name, value, source).into());
    }
}

fn binding_identifiers<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => out.push(node),
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                binding_identifiers(child, out);
            }
        }
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

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn line(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}
