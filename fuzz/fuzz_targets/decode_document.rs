#![no_main]

use libfuzzer_sys::fuzz_target;
use md_suggest::{
    Node, SuggestionId, Transaction, find_structure_group, revert_suggestion, suggestion_ids,
};

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<Node>(data) else {
        return;
    };
    for id in suggestion_ids(&doc) {
        let _ = find_structure_group(&doc, id);
        let mut tx = Transaction::new(doc.clone());
        let _ = revert_suggestion(&mut tx, id);
    }
    let mut tx = Transaction::new(doc);
    let _ = revert_suggestion(&mut tx, SuggestionId(u64::MAX));
});
