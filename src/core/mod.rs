//! Document tree for structured rich text.
//!
//! This module provides the immutable document model the suggestion engine
//! operates on:
//!
//! - [`Node`] - A typed tree node (container, textblock, leaf or text)
//! - [`Fragment`] - An ordered child list with cached size
//! - [`Slice`] - A fragment cut from a document, possibly open at either side
//! - [`ResolvedPos`] and [`NodeRange`] - Positions resolved to their ancestor chain
//! - [`NodesBetween`] - A lazy pre-order walk over nodes intersecting a range
//!
//! Positions address boundaries in a flattened token stream: a container
//! contributes an opening token, its children and a closing token; text
//! contributes one token per `char`; any other leaf contributes one token.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod mark;
mod replace;
mod resolve;
mod slice;
mod walk;

pub use mark::{
    AnchorData, AnchorDebug, AnchorPosition, AnchorRole, GroupKind, Mark, MarkKind,
    StructureMark, SuggestionId,
};
pub use resolve::{NodeRange, ResolvedPos};
pub use slice::Slice;
pub use walk::NodesBetween;

pub type Attrs = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("position {pos} out of range (document size {size})")]
    PositionOutOfRange { pos: usize, size: usize },
    #[error("no node at position {pos}")]
    NoNodeAt { pos: usize },
    #[error("inserted content deeper than insertion position")]
    InsertTooDeep,
    #[error("inconsistent open depths")]
    InconsistentOpenDepths,
    #[error("cannot join {sub} onto {main}")]
    CannotJoin { sub: NodeKind, main: NodeKind },
    #[error("removing non-flat range")]
    NonFlatRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    Blockquote,
    BulletList,
    OrderedList,
    ListItem,
    CodeBlock,
    HorizontalRule,
    Image,
    HardBreak,
    Text,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Blockquote => "blockquote",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::HorizontalRule => "horizontalRule",
            NodeKind::Image => "image",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::Text => "text",
        }
    }

    pub fn is_text(self) -> bool {
        self == NodeKind::Text
    }

    pub fn is_inline(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::Image | NodeKind::HardBreak)
    }

    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Text | NodeKind::Image | NodeKind::HardBreak | NodeKind::HorizontalRule
        )
    }

    /// Nodes whose children are inline content.
    pub fn is_textblock(self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph | NodeKind::Heading | NodeKind::CodeBlock
        )
    }

    fn is_list(self) -> bool {
        matches!(self, NodeKind::BulletList | NodeKind::OrderedList)
    }

    fn holds_blocks(self) -> bool {
        matches!(
            self,
            NodeKind::Doc | NodeKind::Blockquote | NodeKind::ListItem
        )
    }

    /// Whether the content of `self` may be joined onto a node of `other`.
    pub fn compatible_content(self, other: NodeKind) -> bool {
        self == other
            || (self.is_textblock() && other.is_textblock())
            || (self.is_list() && other.is_list())
            || (self.holds_blocks() && other.holds_blocks())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable document node. Every edit produces a new tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    attrs: Attrs,
    #[serde(default, skip_serializing_if = "Fragment::is_empty")]
    content: Fragment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marks: Vec<Mark>,
}

impl Node {
    /// Creates an element node with the given children.
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
            content: Fragment::from_nodes(children),
            text: None,
            marks: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            attrs: Attrs::new(),
            content: Fragment::empty(),
            text: Some(text.into()),
            marks: Vec::new(),
        }
    }

    pub fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn content(&self) -> &Fragment {
        &self.content
    }

    pub fn text_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }

    pub fn is_inline(&self) -> bool {
        self.kind.is_inline()
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    pub fn is_textblock(&self) -> bool {
        self.kind.is_textblock()
    }

    pub fn node_size(&self) -> usize {
        if let Some(text) = &self.text {
            text.chars().count()
        } else if self.kind.is_leaf() {
            1
        } else {
            self.content.size() + 2
        }
    }

    pub fn content_size(&self) -> usize {
        self.content.size()
    }

    pub fn child_count(&self) -> usize {
        self.content.child_count()
    }

    pub fn maybe_child(&self, index: usize) -> Option<&Node> {
        self.content.maybe_child(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.content.maybe_child(0)
    }

    /// Same type, attributes and marks.
    pub fn same_markup(&self, other: &Node) -> bool {
        self.kind == other.kind && self.attrs == other.attrs && self.marks == other.marks
    }

    /// A node with the same markup and the given content.
    pub fn copy(&self, content: Fragment) -> Node {
        Node {
            kind: self.kind,
            attrs: self.attrs.clone(),
            content,
            text: self.text.clone(),
            marks: self.marks.clone(),
        }
    }

    pub fn mark(&self, marks: Vec<Mark>) -> Node {
        Node {
            marks,
            ..self.clone()
        }
    }

    pub(crate) fn with_text(&self, text: String) -> Node {
        Node {
            text: Some(text),
            ..self.clone()
        }
    }

    /// Cuts the node down to `[from, to)` of its content (or characters).
    pub fn cut(&self, from: usize, to: usize) -> Node {
        if let Some(text) = &self.text {
            let piece: String = text.chars().skip(from).take(to.saturating_sub(from)).collect();
            return self.with_text(piece);
        }
        if from == 0 && to == self.content.size() {
            return self.clone();
        }
        self.copy(self.content.cut(from, to))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        self.descendants()
            .filter_map(|(node, _)| node.text_str())
            .collect()
    }

    /// The node starting at `pos`, or the text node containing it.
    pub fn node_at(&self, mut pos: usize) -> Option<&Node> {
        let mut node = self;
        loop {
            let (index, offset) = node.content.find_index(pos).ok()?;
            node = node.content.maybe_child(index)?;
            if offset == pos || node.is_text() {
                return Some(node);
            }
            pos -= offset + 1;
        }
    }

    /// Lazy pre-order walk over every descendant intersecting `[from, to)`.
    pub fn nodes_between(&self, from: usize, to: usize) -> NodesBetween<'_> {
        NodesBetween::new(&self.content, from, to)
    }

    pub fn descendants(&self) -> NodesBetween<'_> {
        self.nodes_between(0, self.content.size())
    }

    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, ModelError> {
        ResolvedPos::resolve(self, pos)
    }

    /// Rewrites the mark set of the node starting at `pos`. Positions are
    /// unchanged.
    pub fn update_marks_at<F>(&self, pos: usize, f: F) -> Result<Node, ModelError>
    where
        F: FnOnce(&[Mark]) -> Vec<Mark>,
    {
        self.update_child_marks(pos, pos, f)
    }

    fn update_child_marks<F>(&self, pos: usize, abs: usize, f: F) -> Result<Node, ModelError>
    where
        F: FnOnce(&[Mark]) -> Vec<Mark>,
    {
        let (index, offset) = self
            .content
            .find_index(pos)
            .map_err(|_| ModelError::NoNodeAt { pos: abs })?;
        let child = self
            .content
            .maybe_child(index)
            .ok_or(ModelError::NoNodeAt { pos: abs })?;
        let updated = if offset == pos {
            child.mark(f(&child.marks))
        } else if child.is_text() {
            return Err(ModelError::NoNodeAt { pos: abs });
        } else {
            child.update_child_marks(pos - offset - 1, abs, f)?
        };
        Ok(self.copy(self.content.replace_child(index, updated)))
    }
}

/// Ordered children of a node with their cached total size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Node>", into = "Vec<Node>")]
pub struct Fragment {
    children: Vec<Node>,
    size: usize,
}

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a fragment, dropping empty text nodes and joining adjacent
    /// text nodes that share their marks.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut children: Vec<Node> = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.text_str().is_some_and(str::is_empty) {
                continue;
            }
            match children.last_mut() {
                Some(last) if last.is_text() && node.is_text() && last.same_markup(&node) => {
                    let joined = format!(
                        "{}{}",
                        last.text_str().unwrap_or_default(),
                        node.text_str().unwrap_or_default()
                    );
                    *last = last.with_text(joined);
                }
                _ => children.push(node),
            }
        }
        let size = children.iter().map(Node::node_size).sum();
        Self { children, size }
    }

    pub fn from_node(node: Node) -> Self {
        Self::from_nodes(vec![node])
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Child at `index`. Panics when out of bounds, like slice indexing.
    pub fn child(&self, index: usize) -> &Node {
        &self.children[index]
    }

    pub fn maybe_child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn last_child(&self) -> Option<&Node> {
        self.children.last()
    }

    /// Index of the child at or around `pos` and that child's start offset.
    pub fn find_index(&self, pos: usize) -> Result<(usize, usize), ModelError> {
        if pos == 0 {
            return Ok((0, 0));
        }
        if pos == self.size {
            return Ok((self.children.len(), pos));
        }
        if pos > self.size {
            return Err(ModelError::PositionOutOfRange {
                pos,
                size: self.size,
            });
        }
        let mut cur = 0;
        for (index, child) in self.children.iter().enumerate() {
            let end = cur + child.node_size();
            if end >= pos {
                if end == pos {
                    return Ok((index + 1, end));
                }
                return Ok((index, cur));
            }
            cur = end;
        }
        Err(ModelError::PositionOutOfRange {
            pos,
            size: self.size,
        })
    }

    pub fn cut(&self, from: usize, to: usize) -> Fragment {
        if from == 0 && to == self.size {
            return self.clone();
        }
        let mut result = Vec::new();
        if to > from {
            let mut pos = 0;
            for child in &self.children {
                if pos >= to {
                    break;
                }
                let end = pos + child.node_size();
                if end > from {
                    let piece = if pos < from || end > to {
                        if child.is_text() {
                            child.cut(from.saturating_sub(pos), child.node_size().min(to - pos))
                        } else {
                            child.cut(
                                from.saturating_sub(pos + 1),
                                child.content_size().min(to - pos - 1),
                            )
                        }
                    } else {
                        child.clone()
                    };
                    result.push(piece);
                }
                pos = end;
            }
        }
        Fragment::from_nodes(result)
    }

    pub fn append(&self, other: &Fragment) -> Fragment {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut children = self.children.clone();
        children.extend(other.children.iter().cloned());
        Fragment::from_nodes(children)
    }

    pub fn replace_child(&self, index: usize, node: Node) -> Fragment {
        let mut children = self.children.clone();
        if let Some(slot) = children.get_mut(index) {
            *slot = node;
        }
        let size = children.iter().map(Node::node_size).sum();
        Fragment { children, size }
    }
}

impl From<Vec<Node>> for Fragment {
    fn from(nodes: Vec<Node>) -> Self {
        Fragment::from_nodes(nodes)
    }
}

impl From<Fragment> for Vec<Node> {
    fn from(fragment: Fragment) -> Self {
        fragment.children
    }
}
