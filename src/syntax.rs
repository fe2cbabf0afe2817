//! Generic syntax model - the tagged-variant tree all adapters lower into
//!
//! Interior nodes carry a kind tag and their children in source order; leaf
//! tokens carry a kind tag plus decoded text. The scanner and reconstructor
//! operate only on this model, never on a language-specific grammar shape.

use crate::Result;
use crate::workspace::Document;

/// Kind tag for interior nodes.
///
/// Only the declaration structure is distinguished; every other construct
/// lowers to `Other` so nested declarations stay reachable by traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A statement that binds one or more names
    Declaration,
    /// A single name bound by a declaration, with an optional initializer
    Declarator,
    /// The initializer expression of a declarator
    Initializer,
    /// Any other syntactic construct
    Other,
}

/// Kind tag for leaf tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A declared or referenced name
    Identifier,
    /// A string literal; the token text is the decoded content
    StringLiteral,
    /// Any other leaf
    Other,
}

/// A leaf of the syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    /// Decoded text: for string literals the content with quotes stripped
    /// and escapes expanded, for everything else the source text verbatim.
    pub text: String,
    /// 1-indexed source line
    pub line: u32,
}

impl SyntaxToken {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn identifier(text: impl Into<String>, line: u32) -> Self {
        Self::new(TokenKind::Identifier, text, line)
    }

    pub fn string_literal(text: impl Into<String>, line: u32) -> Self {
        Self::new(TokenKind::StringLiteral, text, line)
    }
}

/// An interior node of the syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub children: Vec<SyntaxElement>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<SyntaxElement>) -> Self {
        Self { kind, children }
    }

    pub fn push(&mut self, element: SyntaxElement) {
        self.children.push(element);
    }

    /// Direct child nodes, in source order
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    /// Direct child tokens, in source order
    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(SyntaxElement::as_token)
    }

    /// Every descendant token, depth-first, left to right
    pub fn tokens(&self) -> Tokens<'_> {
        let mut stack = Vec::with_capacity(self.children.len());
        for child in self.children.iter().rev() {
            stack.push(child);
        }
        Tokens { stack }
    }

    /// Every descendant token of the given kind, in source order
    pub fn tokens_of(&self, kind: TokenKind) -> impl Iterator<Item = &SyntaxToken> {
        self.tokens().filter(move |t| t.kind == kind)
    }
}

/// A tree element: either an interior node or a leaf token.
#[derive(Debug, Clone)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(token) => Some(token),
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        SyntaxElement::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        SyntaxElement::Token(token)
    }
}

/// Depth-first token iterator over a subtree
pub struct Tokens<'a> {
    stack: Vec<&'a SyntaxElement>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a SyntaxToken;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            match element {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => {
                    for child in node.children.iter().rev() {
                        self.stack.push(child);
                    }
                }
            }
        }
        None
    }
}

/// A parsed source file, read-only during scanning.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub root: SyntaxNode,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }
}

/// Source of syntax trees for documents.
///
/// The only operation expected to block: implementations read and parse the
/// underlying file. Parse and load failures propagate unchanged.
pub trait SyntaxProvider {
    fn syntax_tree(&self, document: &Document) -> Result<SyntaxTree>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SyntaxNode {
        // ("a" + name) + "b", with the parenthesized group as a nested node
        let group = SyntaxNode::with_children(
            NodeKind::Other,
            vec![
                SyntaxToken::string_literal("a", 1).into(),
                SyntaxToken::new(TokenKind::Other, "+", 1).into(),
                SyntaxToken::identifier("name", 1).into(),
            ],
        );
        SyntaxNode::with_children(
            NodeKind::Other,
            vec![
                group.into(),
                SyntaxToken::new(TokenKind::Other, "+", 1).into(),
                SyntaxToken::string_literal("b", 1).into(),
            ],
        )
    }

    #[test]
    fn tokens_are_depth_first_left_to_right() {
        let root = sample_tree();
        let texts: Vec<&str> = root.tokens().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "+", "name", "+", "b"]);
    }

    #[test]
    fn tokens_of_filters_by_kind() {
        let root = sample_tree();
        let literals: Vec<&str> = root
            .tokens_of(TokenKind::StringLiteral)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(literals, vec!["a", "b"]);

        let identifiers: Vec<&str> = root
            .tokens_of(TokenKind::Identifier)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(identifiers, vec!["name"]);
    }

    #[test]
    fn empty_node_yields_no_tokens() {
        let node = SyntaxNode::new(NodeKind::Other);
        assert_eq!(node.tokens().count(), 0);
    }
}
