#![allow(dead_code)]

use md_suggest::{
    AnchorData, AnchorDebug, AnchorPosition, AnchorRole, EditOperation, Fragment, GroupKind,
    Mark, Node, NodeKind, Slice, StructureMark, SuggestionId, Transaction, annotate,
};

pub fn doc(children: Vec<Node>) -> Node {
    Node::new(NodeKind::Doc, children)
}

pub fn p(text: &str) -> Node {
    if text.is_empty() {
        Node::leaf(NodeKind::Paragraph)
    } else {
        Node::new(NodeKind::Paragraph, vec![Node::text(text)])
    }
}

pub fn bq(children: Vec<Node>) -> Node {
    Node::new(NodeKind::Blockquote, children)
}

pub fn ol(children: Vec<Node>) -> Node {
    Node::new(NodeKind::OrderedList, children)
}

pub fn li(children: Vec<Node>) -> Node {
    Node::new(NodeKind::ListItem, children)
}

pub fn hr() -> Node {
    Node::leaf(NodeKind::HorizontalRule)
}

/// Wraps `[from, to)` in an empty node of `kind`.
pub fn wrap(from: usize, to: usize, kind: NodeKind) -> EditOperation {
    let slice = Slice::new(Fragment::from_node(Node::leaf(kind)), 0, 0);
    EditOperation::replace_around(from, to, from, to, slice, 1, true)
}

/// Sinks the list item range `[start, end)` into the item before it.
pub fn sink(start: usize, end: usize) -> EditOperation {
    let nested = li(vec![ol(Vec::new())]);
    let slice = Slice::new(Fragment::from_node(nested), 1, 0);
    EditOperation::replace_around(start - 1, end, start, end, slice, 1, true)
}

/// Annotates `step` on a fresh transaction over `doc` and returns the result.
pub fn suggest(doc: &Node, step: &EditOperation, id: u64) -> Node {
    let mut tx = Transaction::new(doc.clone());
    assert!(annotate(&mut tx, step, &[], SuggestionId(id)).unwrap());
    tx.into_doc()
}

pub fn anchors_of(node: &Node, id: u64) -> Vec<(AnchorRole, AnchorPosition)> {
    node.marks()
        .iter()
        .filter_map(Mark::as_structure)
        .filter(|mark| mark.id == SuggestionId(id))
        .map(|mark| (mark.data.value, mark.data.position))
        .collect()
}

/// A hand-built replace-around anchor whose inverse lifts the gap out of
/// its wrapper.
pub fn lift_anchor(id: u64, value: AnchorRole, position: AnchorPosition) -> Mark {
    Mark::Structure(StructureMark {
        id: SuggestionId(id),
        data: AnchorData {
            value,
            position,
            kind: GroupKind::ReplaceAround,
            slice: Slice::empty(),
            insert: Some(0),
            structure: true,
            debug: AnchorDebug {
                inverse_from: 0,
                inverse_to: 15,
                inverse_gap_from: Some(1),
                inverse_gap_to: Some(14),
                from_offset: Some(1),
                to_offset: Some(1),
                gap_from_offset: Some(1),
                gap_to_offset: Some(1),
            },
        },
    })
}
