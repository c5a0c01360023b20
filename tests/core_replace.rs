use md_suggest::{Fragment, ModelError, Node, NodeKind, Slice};

mod common;
use common::{bq, doc, li, ol, p};

#[test]
fn test_delete_inside_text() {
    let before = doc(vec![p("Hello")]);
    let after = before.replace(2, 4, &Slice::empty()).unwrap();
    assert_eq!(after, doc(vec![p("Hlo")]));
}

#[test]
fn test_join_paragraphs() {
    let before = doc(vec![p("ab"), p("cd")]);
    let after = before.replace(3, 5, &Slice::empty()).unwrap();
    assert_eq!(after, doc(vec![p("abcd")]));
}

#[test]
fn test_split_paragraph() {
    let before = doc(vec![p("abcd")]);
    let split = Slice::new(Fragment::from_nodes(vec![p(""), p("")]), 1, 1);
    let after = before.replace(3, 3, &split).unwrap();
    assert_eq!(after, doc(vec![p("ab"), p("cd")]));
}

#[test]
fn test_insert_block_between_blocks() {
    let before = doc(vec![p("a"), p("c")]);
    let block = Slice::new(Fragment::from_node(p("b")), 0, 0);
    let after = before.replace(3, 3, &block).unwrap();
    assert_eq!(after, doc(vec![p("a"), p("b"), p("c")]));
}

#[test]
fn test_replace_inside_nested_container_keeps_wrappers() {
    let before = doc(vec![bq(vec![p("ab")])]);
    let text = Slice::new(Fragment::from_node(Node::text("X")), 0, 0);
    let after = before.replace(3, 3, &text).unwrap();
    assert_eq!(after, doc(vec![bq(vec![p("aXb")])]));
}

#[test]
fn test_join_list_items() {
    let before = doc(vec![ol(vec![li(vec![p("a")]), li(vec![p("b")])])]);
    let after = before.replace(5, 7, &Slice::empty()).unwrap();
    assert_eq!(after, doc(vec![ol(vec![li(vec![p("a"), p("b")])])]));
}

#[test]
fn test_slice_between_blocks() {
    let source = doc(vec![p("ab"), p("cd")]);
    let slice = source.slice(2, 6).unwrap();
    assert_eq!(slice.content, Fragment::from_nodes(vec![p("b"), p("c")]));
    assert_eq!((slice.open_start, slice.open_end), (1, 1));
    assert_eq!(slice.size(), 4);
    assert!(source.slice(4, 4).unwrap().is_empty());
}

#[test]
fn test_replace_with_own_slice_is_identity() {
    let source = doc(vec![bq(vec![p("ab"), p("cd")]), p("ef")]);
    let slice = source.slice(3, 11).unwrap();
    assert_eq!(source.replace(3, 11, &slice).unwrap(), source);
}

#[test]
fn test_too_deep_insert_is_rejected() {
    let before = doc(vec![p("a")]);
    let open = Slice::new(Fragment::from_node(p("x")), 1, 0);
    assert_eq!(
        before.replace(0, 0, &open),
        Err(ModelError::InsertTooDeep)
    );
}

#[test]
fn test_inconsistent_open_depths_are_rejected() {
    let before = doc(vec![p("ab"), p("cd")]);
    let open = Slice::new(Fragment::from_node(p("x")), 1, 0);
    assert_eq!(
        before.replace(2, 2, &open),
        Err(ModelError::InconsistentOpenDepths)
    );
}

#[test]
fn test_incompatible_join_is_rejected() {
    let before = doc(vec![p("ab"), ol(vec![li(vec![p("c")])])]);
    assert!(matches!(
        before.replace(3, 5, &Slice::empty()),
        Err(ModelError::CannotJoin { .. })
    ));
}

#[test]
fn test_out_of_range_position() {
    let before = doc(vec![p("ab")]);
    assert!(matches!(
        before.replace(0, 9, &Slice::empty()),
        Err(ModelError::PositionOutOfRange { pos: 9, .. })
    ));
}

#[test]
fn test_leaf_blocks_have_size_one() {
    let source = doc(vec![p("a"), Node::leaf(NodeKind::HorizontalRule), p("b")]);
    assert_eq!(source.content_size(), 7);
    let after = source.replace(3, 4, &Slice::empty()).unwrap();
    assert_eq!(after, doc(vec![p("a"), p("b")]));
}
