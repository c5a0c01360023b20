use md_suggest::{
    EditOperation, Fragment, Node, NodeKind, Slice, SuggestError, SuggestionId, Transaction,
    annotate, rebase, revert_suggestion,
};

mod common;
use common::{doc, p, wrap};

fn insert_text(pos: usize, text: &str) -> EditOperation {
    EditOperation::replace(pos, pos, Slice::new(Fragment::from_node(Node::text(text)), 0, 0), false)
}

#[test]
fn test_previous_steps_already_in_transaction_cancel_out() {
    let original = doc(vec![p("ab"), p("cd")]);
    let insert = insert_text(1, "xy");
    let mut tx = Transaction::new(original);
    tx.step(insert.clone()).unwrap();

    // Defined against the document after the insert.
    let step = wrap(6, 10, NodeKind::Blockquote);
    assert_eq!(
        rebase(&step, std::slice::from_ref(&insert), tx.steps()),
        Some(step.clone())
    );
    assert!(annotate(&mut tx, &step, &[insert], SuggestionId(1)).unwrap());
    assert_eq!(tx.doc().text_content(), "xyabcd");
    assert_eq!(tx.doc().content().child(1).kind(), NodeKind::Blockquote);

    revert_suggestion(&mut tx, SuggestionId(1)).unwrap();
    assert_eq!(tx.doc(), &doc(vec![p("xyab"), p("cd")]));
}

#[test]
fn test_step_moves_with_untracked_edits() {
    let mut tx = Transaction::new(doc(vec![p("ab"), p("cd")]));
    tx.step(insert_text(1, "xy")).unwrap();

    // Defined against the original document.
    let step = wrap(4, 8, NodeKind::Blockquote);
    assert!(annotate(&mut tx, &step, &[], SuggestionId(1)).unwrap());
    let quote = tx.doc().content().child(1);
    assert_eq!(quote.kind(), NodeKind::Blockquote);
    assert_eq!(quote.text_content(), "cd");
    assert_eq!(quote.marks().len(), 4);
    assert_eq!(tx.steps()[1], wrap(6, 10, NodeKind::Blockquote));
}

#[test]
fn test_step_over_deleted_content_fails_to_rebase() {
    let mut tx = Transaction::new(doc(vec![p("ab"), p("cd"), p("ef")]));
    tx.step(EditOperation::replace(2, 10, Slice::empty(), false))
        .unwrap();
    assert_eq!(tx.doc(), &doc(vec![p("af")]));

    let join = EditOperation::replace(7, 9, Slice::empty(), true);
    let before = tx.doc().clone();
    assert_eq!(
        annotate(&mut tx, &join, &[], SuggestionId(4)),
        Err(SuggestError::RebaseFailure {
            id: SuggestionId(4),
            step: "replace",
        })
    );
    assert_eq!(tx.doc(), &before);
    assert_eq!(tx.steps().len(), 1);
}
