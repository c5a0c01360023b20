//! A naive, simple oracle for structural classification.
//!
//! The document is flattened into one token per position. A range holds no
//! content exactly when its tokens are some closing tokens followed by some
//! opening tokens.
use md_suggest::core::{Node, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Open(NodeKind),
    Close(NodeKind),
    Leaf(NodeKind),
    Char(char),
}

/// Token stream of `doc`'s content; token `i` spans positions `i..i + 1`.
pub fn tokens(doc: &Node) -> Vec<Token> {
    let mut out = Vec::new();
    for child in doc.content().iter() {
        push_node(child, &mut out);
    }
    out
}

fn push_node(node: &Node, out: &mut Vec<Token>) {
    if let Some(text) = node.text_str() {
        out.extend(text.chars().map(Token::Char));
    } else if node.is_leaf() {
        out.push(Token::Leaf(node.kind()));
    } else {
        out.push(Token::Open(node.kind()));
        for child in node.content().iter() {
            push_node(child, out);
        }
        out.push(Token::Close(node.kind()));
    }
}

/// Whether `pos` falls between two characters of the same text run.
pub fn is_text_interior(tokens: &[Token], pos: usize) -> bool {
    pos > 0
        && matches!(tokens.get(pos - 1), Some(Token::Char(_)))
        && matches!(tokens.get(pos), Some(Token::Char(_)))
}

pub fn content_between(doc: &Node, from: usize, to: usize) -> bool {
    let tokens = tokens(doc);
    if to > tokens.len() || from > tokens.len() {
        return true;
    }
    if from >= to {
        return false;
    }
    let mut opening = false;
    for token in &tokens[from..to] {
        match token {
            Token::Close(_) if !opening => {}
            Token::Open(_) => opening = true,
            _ => return true,
        }
    }
    false
}
