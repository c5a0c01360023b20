use md_suggest::{Node, NodeKind, content_between};
use md_suggest_naive_oracle as oracle;
use proptest::collection::vec;
use proptest::prelude::*;

fn leaf_block() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-c]{0,3}".prop_map(|text| {
            if text.is_empty() {
                Node::leaf(NodeKind::Paragraph)
            } else {
                Node::new(NodeKind::Paragraph, vec![Node::text(text)])
            }
        }),
        Just(Node::new(
            NodeKind::Paragraph,
            vec![
                Node::text("x"),
                Node::leaf(NodeKind::HardBreak),
                Node::text("y"),
            ],
        )),
        Just(Node::leaf(NodeKind::HorizontalRule)),
    ]
}

fn block() -> impl Strategy<Value = Node> {
    leaf_block().prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..3).prop_map(|children| Node::new(NodeKind::Blockquote, children)),
            vec(vec(inner, 0..3), 0..3).prop_map(|items| {
                let items = items
                    .into_iter()
                    .map(|children| Node::new(NodeKind::ListItem, children))
                    .collect();
                Node::new(NodeKind::BulletList, items)
            }),
        ]
    })
}

fn document() -> impl Strategy<Value = Node> {
    vec(block(), 1..4).prop_map(|children| Node::new(NodeKind::Doc, children))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_config::cases()))]

    #[test]
    fn classifier_matches_token_oracle(
        doc in document(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let size = doc.content_size();
        let tokens = oracle::tokens(&doc);
        prop_assert_eq!(tokens.len(), size);

        let x = a.index(size + 1);
        let y = b.index(size + 1);
        let (from, to) = (x.min(y), x.max(y));
        prop_assume!(!oracle::is_text_interior(&tokens, from));

        prop_assert_eq!(
            content_between(&doc, from, to),
            oracle::content_between(&doc, from, to),
            "range [{}, {}) of {:?}",
            from,
            to,
            tokens
        );
    }

    #[test]
    fn positions_past_the_end_count_as_content(doc in document(), extra in 1usize..4) {
        let size = doc.content_size();
        prop_assert!(content_between(&doc, 0, size + extra));
        prop_assert!(oracle::content_between(&doc, 0, size + extra));
    }
}
