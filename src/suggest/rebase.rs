use crate::transform::EditOperation;
use tracing::debug;

/// Moves `step` into the position space after `forth`.
///
/// `back` holds the operations (oldest first) applied since `step` was
/// defined that must be undone first; each is undone through its inverted
/// map, newest first. The result is then mapped through every operation of
/// `forth` in order. Returns `None` as soon as one mapping deletes the
/// content the step is anchored to.
pub fn rebase(
    step: &EditOperation,
    back: &[EditOperation],
    forth: &[EditOperation],
) -> Option<EditOperation> {
    let undone = back
        .iter()
        .rev()
        .try_fold(step.clone(), |step, prev| step.map(&prev.step_map().invert()));
    let Some(undone) = undone else {
        debug!(step = step.name(), "step lost its content while undoing previous steps");
        return None;
    };
    let rebased = forth
        .iter()
        .try_fold(undone, |step, next| step.map(&next.step_map()));
    if rebased.is_none() {
        debug!(step = step.name(), "step lost its content while replaying transaction steps");
    }
    rebased
}
