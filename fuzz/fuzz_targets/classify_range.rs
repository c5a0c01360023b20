#![no_main]

use libfuzzer_sys::fuzz_target;
use md_suggest::{EditOperation, Node, Slice, SuggestConfig, Transaction, is_structural_step};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let Ok(doc) = serde_json::from_slice::<Node>(&data[4..]) else {
        return;
    };
    let from = data[0] as usize;
    let to = from + data[1] as usize;
    let step = EditOperation::replace(from, to, Slice::empty(), data[2] % 2 == 0);
    let config = SuggestConfig {
        infer_structure: data[3] % 2 == 0,
        strict_anchors: false,
    };
    let _ = is_structural_step(&doc, &step, &config);
    let mut tx = Transaction::new(doc);
    let _ = tx.step(step);
});
