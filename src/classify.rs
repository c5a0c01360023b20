//! Structural step classification.
//!
//! A range is structural when walking from its start to its end only crosses
//! node boundaries: closing tokens of ancestors, then opening tokens of empty
//! or first-child containers. Any leaf on the way is real content.

use crate::core::Node;
use crate::suggest::SuggestConfig;
use crate::transform::EditOperation;
use tracing::debug;

/// Whether `[from, to)` of `doc` holds real content. Positions outside the
/// document count as content.
pub fn content_between(doc: &Node, from: usize, to: usize) -> bool {
    if to > doc.content_size() {
        return true;
    }
    let Ok(start) = doc.resolve(from) else {
        return true;
    };
    let mut dist = to as i64 - from as i64;
    let mut depth = start.depth();
    while dist > 0 && depth > 0 && start.index_after(depth) == start.node(depth).child_count() {
        depth -= 1;
        dist -= 1;
    }
    if dist > 0 {
        let mut next = start.node(depth).maybe_child(start.index_after(depth));
        while dist > 0 {
            match next {
                Some(node) if !node.is_leaf() => {
                    next = node.first_child();
                    dist -= 1;
                }
                _ => return true,
            }
        }
    }
    false
}

pub fn is_structural(doc: &Node, from: usize, to: usize) -> bool {
    !content_between(doc, from, to)
}

/// Whether `step` should be tracked as a structural suggestion on `doc`.
///
/// The step's own flag always counts. With `infer_structure`, a step whose
/// replaced spans hold no content counts too.
pub fn is_structural_step(doc: &Node, step: &EditOperation, config: &SuggestConfig) -> bool {
    if step.is_structure() {
        return true;
    }
    if !config.infer_structure {
        return false;
    }
    let structural = match *step {
        EditOperation::ContentReplace { from, to, .. } => !content_between(doc, from, to),
        EditOperation::BoundaryReplace {
            from,
            to,
            gap_from,
            gap_to,
            ..
        } => !(content_between(doc, from, gap_from) || content_between(doc, gap_to, to)),
    };
    debug!(step = step.name(), structural, "classified step");
    structural
}
