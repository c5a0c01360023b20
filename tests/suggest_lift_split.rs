use md_suggest::{
    AnchorPosition, AnchorRole, EditOperation, Fragment, GroupKind, NodeKind, Slice,
    SuggestionId, Transaction, annotate, apply_suggestion, find_structure_group,
    revert_suggestion, suggestion_ids,
};

mod common;
use common::{anchors_of, bq, doc, p, suggest};

fn lift() -> EditOperation {
    EditOperation::replace_around(0, 6, 1, 5, Slice::empty(), 0, true)
}

fn split() -> EditOperation {
    let halves = Fragment::from_nodes(vec![p(""), p("")]);
    EditOperation::replace(3, 3, Slice::new(halves, 1, 1), true)
}

#[test]
fn test_lift_anchors_every_role_on_the_lifted_paragraph() {
    let quoted = doc(vec![bq(vec![p("Hi")]), p("x")]);
    let lifted = suggest(&quoted, &lift(), 1);

    let para = lifted.content().child(0);
    assert_eq!(para.kind(), NodeKind::Paragraph);
    assert_eq!(para.text_content(), "Hi");
    assert_eq!(
        anchors_of(para, 1),
        vec![
            (AnchorRole::GapFrom, AnchorPosition::Start),
            (AnchorRole::GapTo, AnchorPosition::End),
            (AnchorRole::From, AnchorPosition::Start),
            (AnchorRole::To, AnchorPosition::End),
        ]
    );
    assert!(lifted.content().child(1).marks().is_empty());

    let group = find_structure_group(&lifted, SuggestionId(1)).unwrap();
    assert_eq!(group.kind(), GroupKind::ReplaceAround);
    assert_eq!((group.from(), group.to()), (0, 4));
    assert_eq!(group.gap(), Some((0, 4)));
}

#[test]
fn test_revert_lift_restores_blockquote() {
    let quoted = doc(vec![bq(vec![p("Hi")]), p("x")]);
    let mut tx = Transaction::new(quoted.clone());
    assert!(annotate(&mut tx, &lift(), &[], SuggestionId(1)).unwrap());
    assert_eq!(tx.doc().content().child(0).kind(), NodeKind::Paragraph);

    let replayed = revert_suggestion(&mut tx, SuggestionId(1)).unwrap();
    assert_eq!(replayed.len(), 1);
    assert_eq!(tx.doc(), &quoted);
}

#[test]
fn test_split_anchors_inner_boundaries_of_both_halves() {
    let split_doc = suggest(&doc(vec![p("abcd")]), &split(), 2);

    let (head, tail) = (split_doc.content().child(0), split_doc.content().child(1));
    assert_eq!(head.text_content(), "ab");
    assert_eq!(tail.text_content(), "cd");
    assert_eq!(anchors_of(head, 2), vec![(AnchorRole::From, AnchorPosition::InnerEnd)]);
    assert_eq!(anchors_of(tail, 2), vec![(AnchorRole::To, AnchorPosition::InnerStart)]);

    let group = find_structure_group(&split_doc, SuggestionId(2)).unwrap();
    assert_eq!(group.kind(), GroupKind::Replace);
    assert_eq!((group.from(), group.to()), (3, 5));
}

#[test]
fn test_revert_split_joins_the_paragraph_again() {
    let source = doc(vec![p("abcd")]);
    let mut tx = Transaction::new(source.clone());
    assert!(annotate(&mut tx, &split(), &[], SuggestionId(2)).unwrap());

    revert_suggestion(&mut tx, SuggestionId(2)).unwrap();
    assert_eq!(tx.doc(), &source);
}

#[test]
fn test_apply_split_keeps_both_paragraphs() {
    let mut tx = Transaction::new(doc(vec![p("abcd")]));
    assert!(annotate(&mut tx, &split(), &[], SuggestionId(2)).unwrap());

    apply_suggestion(&mut tx, SuggestionId(2)).unwrap();
    assert_eq!(tx.doc(), &doc(vec![p("ab"), p("cd")]));
    assert!(suggestion_ids(tx.doc()).is_empty());
}
