//! Reverting and accepting structural suggestions.
//!
//! Resolving a suggestion also resolves every suggestion anchored in the
//! spans its inverse replaces, newest first, since those may sit inside the
//! shape the outer inverse removes. Suggestions anchored wholly inside the
//! gap are carried over untouched. Work is staged on a copy of the
//! transaction, so a failure leaves the caller's transaction as it was.

use super::SuggestError;
use super::group::{StructureMarkGroup, find_structure_group, structure_anchors};
use crate::classify::content_between;
use crate::core::{Node, SuggestionId};
use crate::transform::{EditOperation, Transaction};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Revert,
    Accept,
}

/// Replays the recorded inverse of suggestion `id`, returning the replayed
/// operations in the order they were applied.
#[instrument(skip_all, fields(id = %id))]
pub fn revert_suggestion(
    tx: &mut Transaction,
    id: SuggestionId,
) -> Result<Vec<EditOperation>, SuggestError> {
    resolve(tx, id, Resolution::Revert)
}

/// Accepts suggestion `id`: drops its anchors and keeps the current content.
#[instrument(skip_all, fields(id = %id))]
pub fn apply_suggestion(tx: &mut Transaction, id: SuggestionId) -> Result<(), SuggestError> {
    resolve(tx, id, Resolution::Accept).map(|_| ())
}

/// Reverts each id in the given order. All or nothing.
pub fn revert_suggestions(
    tx: &mut Transaction,
    ids: &[SuggestionId],
) -> Result<Vec<EditOperation>, SuggestError> {
    let mut staged = tx.clone();
    let mut replayed = Vec::new();
    for &id in ids {
        replayed.extend(revert_suggestion(&mut staged, id)?);
    }
    *tx = staged;
    Ok(replayed)
}

/// Reverts suggestions until no structure anchor is left. All or nothing.
pub fn revert_all_suggestions(tx: &mut Transaction) -> Result<Vec<EditOperation>, SuggestError> {
    let mut staged = tx.clone();
    let mut replayed = Vec::new();
    while let Some(id) = first_structure_id(staged.doc()) {
        replayed.extend(revert_suggestion(&mut staged, id)?);
    }
    *tx = staged;
    Ok(replayed)
}

/// Whether `id` has a complete anchor group that a revert could read back.
pub fn is_structure_suggestion(doc: &Node, id: SuggestionId) -> bool {
    find_structure_group(doc, id).is_ok()
}

fn first_structure_id(doc: &Node) -> Option<SuggestionId> {
    structure_anchors(doc, 0, doc.content_size())
        .next()
        .map(|(_, _, mark)| mark.id)
}

fn resolve(
    tx: &mut Transaction,
    id: SuggestionId,
    resolution: Resolution,
) -> Result<Vec<EditOperation>, SuggestError> {
    let group = find_structure_group(tx.doc(), id)?;
    let ids = affected_ids(tx.doc(), &group);
    debug!(?ids, ?resolution, "resolving suggestion group");

    let mut staged = tx.clone();
    let mut replayed = Vec::new();
    for &current in ids.iter().rev() {
        let group = find_structure_group(staged.doc(), current)?;
        if resolution == Resolution::Revert {
            check_side_spans(staged.doc(), &group)?;
        }
        for anchor in group.anchors() {
            staged.remove_node_mark(anchor.pos, &anchor.to_mark())?;
        }
        if resolution == Resolution::Revert {
            let inverse = group.inverse()?;
            staged
                .step(inverse.clone())
                .map_err(|err| SuggestError::OverwriteWouldOccur {
                    id: current,
                    reason: err.to_string(),
                })?;
            replayed.push(inverse);
        }
    }
    *tx = staged;
    Ok(replayed)
}

/// `group`'s id plus the ids of groups anchored in its replaced spans.
fn affected_ids(doc: &Node, group: &StructureMarkGroup) -> BTreeSet<SuggestionId> {
    let (from, to) = (group.from(), group.to());
    let within = |pos: usize, lo: usize, hi: usize| lo <= pos && pos <= hi;
    let mut ids = BTreeSet::from([group.id()]);
    for (pos, node, mark) in structure_anchors(doc, from, to) {
        if ids.contains(&mark.id) {
            continue;
        }
        let end = pos + node.node_size();
        let nested = match group.gap() {
            Some((gap_from, gap_to)) => {
                if within(pos, gap_from, gap_to) && within(end, gap_from, gap_to) {
                    debug!(nested = %mark.id, pos, "skipping group inside the gap");
                    continue;
                }
                let on_side = |p| within(p, from, gap_from) || within(p, gap_to, to);
                on_side(pos) || on_side(end)
            }
            None => within(pos, from, to) || within(end, from, to),
        };
        if nested {
            ids.insert(mark.id);
        }
    }
    ids
}

/// Refuses a replace-around revert when a side span changed width since
/// encoding and now holds content the inverse would delete.
fn check_side_spans(doc: &Node, group: &StructureMarkGroup) -> Result<(), SuggestError> {
    let StructureMarkGroup::ReplaceAround {
        from,
        to,
        gap_from,
        gap_to,
    } = group
    else {
        return Ok(());
    };
    let offsets = &from.data().debug;
    let sides = [
        (from.resolved(), gap_from.resolved(), offsets.recorded_head_width()),
        (gap_to.resolved(), to.resolved(), offsets.recorded_tail_width()),
    ];
    for (start, end, recorded) in sides {
        let Some(recorded) = recorded else {
            continue;
        };
        let width = end as i64 - start as i64;
        if width != recorded && content_between(doc, start.min(end), start.max(end)) {
            return Err(SuggestError::OverwriteWouldOccur {
                id: group.id(),
                reason: format!(
                    "[{start}, {end}) spans {width} positions instead of {recorded} and holds untracked content"
                ),
            });
        }
    }
    Ok(())
}
