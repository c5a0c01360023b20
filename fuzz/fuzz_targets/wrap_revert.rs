#![no_main]

use libfuzzer_sys::fuzz_target;
use md_suggest::{
    EditOperation, Fragment, Node, NodeKind, Slice, SuggestionId, Transaction, annotate,
    revert_suggestion,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let blocks: Vec<Node> = data[2..]
        .chunks(3)
        .map(|chunk| {
            let text: String = chunk.iter().map(|b| char::from(b'a' + b % 26)).collect();
            Node::new(NodeKind::Paragraph, vec![Node::text(text)])
        })
        .collect();
    if blocks.is_empty() {
        return;
    }
    let first = data[0] as usize % blocks.len();
    let last = first + 1 + data[1] as usize % (blocks.len() - first);
    let start: usize = blocks[..first].iter().map(Node::node_size).sum();
    let end: usize = start + blocks[first..last].iter().map(Node::node_size).sum::<usize>();

    let doc = Node::new(NodeKind::Doc, blocks);
    let quote = Slice::new(Fragment::from_node(Node::leaf(NodeKind::Blockquote)), 0, 0);
    let step = EditOperation::replace_around(start, end, start, end, quote, 1, true);
    let mut tx = Transaction::new(doc.clone());
    if annotate(&mut tx, &step, &[], SuggestionId(1)).unwrap_or(false) {
        revert_suggestion(&mut tx, SuggestionId(1)).expect("wrap should revert");
        assert_eq!(tx.doc(), &doc);
    }
});
