//! Encoding structural operations as anchor groups.
//!
//! The inverse of the applied operation has two or four boundary positions.
//! Each is pinned to a node of the new document whose start, inner start,
//! inner end or end equals it. Candidates are the block nodes intersecting
//! the inverse's block range, visited in document order; the order of the
//! passes below decides which node wins when several match.

use super::rebase::rebase;
use super::{SuggestConfig, SuggestError};
use crate::classify::{content_between, is_structural_step};
use crate::core::{
    AnchorData, AnchorDebug, AnchorPosition, AnchorRole, Mark, Node, StructureMark, SuggestionId,
};
use crate::transform::{EditOperation, Transaction};
use tracing::{debug, instrument, warn};

/// Annotates `step` with the default configuration.
pub fn annotate(
    tx: &mut Transaction,
    step: &EditOperation,
    prev_steps: &[EditOperation],
    id: SuggestionId,
) -> Result<bool, SuggestError> {
    annotate_with_config(tx, step, prev_steps, id, &SuggestConfig::default())
}

/// Tracks `step` as structural suggestion `id`.
///
/// Returns `Ok(false)` without touching `tx` when the step is not
/// structural; the caller then tracks it as a content change. Otherwise the
/// step is rebased from before `prev_steps` onto the steps already in `tx`,
/// applied, and the anchors of its inverse are added. On error `tx` is left
/// unchanged.
#[instrument(skip_all, fields(id = %id, step = step.name()))]
pub fn annotate_with_config(
    tx: &mut Transaction,
    step: &EditOperation,
    prev_steps: &[EditOperation],
    id: SuggestionId,
    config: &SuggestConfig,
) -> Result<bool, SuggestError> {
    if !is_structural_step(tx.doc(), step, config) {
        debug!("not structural, leaving to content tracking");
        return Ok(false);
    }

    let rebased = rebase(step, prev_steps, tx.steps()).ok_or(SuggestError::RebaseFailure {
        id,
        step: step.name(),
    })?;

    let mut staged = tx.clone();
    let doc_before = staged.doc().clone();
    staged.step(rebased.clone())?;
    let inverse = rebased.invert(&doc_before)?;
    if inverse.kind() != rebased.kind() {
        return Err(SuggestError::InvertTypeMismatch {
            id,
            expected: rebased.name(),
            found: inverse.name(),
        });
    }

    let template = anchor_template(staged.doc(), &inverse);
    let targets = boundary_targets(&inverse);
    let anchors = resolve_anchors(staged.doc(), &inverse, &targets);

    let missing: Vec<AnchorRole> = targets
        .iter()
        .map(|(role, _)| *role)
        .filter(|role| !anchors.iter().any(|anchor| anchor.role == *role))
        .collect();
    if !missing.is_empty() {
        let missing = missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        warn!(%missing, "partial anchor resolution");
        if config.strict_anchors {
            return Err(SuggestError::PartialAnchors { id, missing });
        }
    }

    for anchor in &anchors {
        debug!(
            role = %anchor.role,
            pos = anchor.node_pos,
            position = ?anchor.position,
            "anchored role"
        );
        let mark = Mark::Structure(StructureMark {
            id,
            data: AnchorData {
                value: anchor.role,
                position: anchor.position,
                ..template.clone()
            },
        });
        staged.add_node_mark(anchor.node_pos, mark)?;
    }

    *tx = staged;
    Ok(true)
}

/// Payload shared by every anchor of one group.
fn anchor_template(doc: &Node, inverse: &EditOperation) -> AnchorData {
    match *inverse {
        EditOperation::ContentReplace {
            from,
            to,
            ref slice,
            structure,
        } => AnchorData {
            value: AnchorRole::From,
            position: AnchorPosition::Start,
            kind: inverse.kind(),
            slice: slice.clone(),
            insert: None,
            structure: structure || !content_between(doc, from, to),
            debug: AnchorDebug {
                inverse_from: from,
                inverse_to: to,
                ..AnchorDebug::default()
            },
        },
        EditOperation::BoundaryReplace {
            from,
            to,
            gap_from,
            gap_to,
            ref slice,
            insert,
            structure,
        } => {
            let head = gap_from as i64 - from as i64;
            let tail = to as i64 - gap_to as i64;
            AnchorData {
                value: AnchorRole::From,
                position: AnchorPosition::Start,
                kind: inverse.kind(),
                slice: slice.clone(),
                insert: Some(insert),
                structure,
                debug: AnchorDebug {
                    inverse_from: from,
                    inverse_to: to,
                    inverse_gap_from: Some(gap_from),
                    inverse_gap_to: Some(gap_to),
                    from_offset: Some(head),
                    to_offset: Some(tail),
                    gap_from_offset: Some(head),
                    gap_to_offset: Some(tail),
                },
            }
        }
    }
}

fn boundary_targets(inverse: &EditOperation) -> Vec<(AnchorRole, usize)> {
    match *inverse {
        EditOperation::ContentReplace { from, to, .. } => {
            vec![(AnchorRole::From, from), (AnchorRole::To, to)]
        }
        EditOperation::BoundaryReplace {
            from,
            to,
            gap_from,
            gap_to,
            ..
        } => vec![
            (AnchorRole::GapFrom, gap_from),
            (AnchorRole::GapTo, gap_to),
            (AnchorRole::From, from),
            (AnchorRole::To, to),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedAnchor {
    role: AnchorRole,
    node_pos: usize,
    position: AnchorPosition,
}

/// Block nodes of the inverse's block range as `(pos, size)`.
fn candidate_nodes(doc: &Node, from: usize, to: usize) -> Vec<(usize, usize)> {
    let (Ok(start), Ok(end)) = (doc.resolve(from), doc.resolve(to)) else {
        warn!(from, to, "inverse positions do not resolve in the new document");
        return Vec::new();
    };
    let Some(range) = start.block_range(&end) else {
        warn!(from, to, "no block range around the inverse");
        return Vec::new();
    };
    doc.nodes_between(range.start(), range.end())
        .filter(|(node, _)| !node.is_inline())
        .map(|(node, pos)| (pos, node.node_size()))
        .collect()
}

fn resolve_anchors(
    doc: &Node,
    inverse: &EditOperation,
    targets: &[(AnchorRole, usize)],
) -> Vec<ResolvedAnchor> {
    let nodes = candidate_nodes(doc, inverse.from(), inverse.to());
    let mut resolver = Resolver::default();
    for pair in targets.chunks(2) {
        if let [first, second] = pair {
            resolver.opening_pass(&nodes, *first, *second);
            resolver.closing_pass(&nodes, *first, *second);
        }
    }
    resolver.found
}

#[derive(Debug, Default)]
struct Resolver {
    found: Vec<ResolvedAnchor>,
}

impl Resolver {
    fn is_resolved(&self, role: AnchorRole) -> bool {
        self.found.iter().any(|anchor| anchor.role == role)
    }

    fn record(&mut self, role: AnchorRole, node_pos: usize, position: AnchorPosition) -> bool {
        self.found.push(ResolvedAnchor {
            role,
            node_pos,
            position,
        });
        true
    }

    fn try_open(&mut self, (role, target): (AnchorRole, usize), pos: usize) -> bool {
        if self.is_resolved(role) {
            false
        } else if pos == target {
            self.record(role, pos, AnchorPosition::Start)
        } else if pos + 1 == target {
            self.record(role, pos, AnchorPosition::InnerStart)
        } else {
            false
        }
    }

    fn try_close(&mut self, (role, target): (AnchorRole, usize), pos: usize, size: usize) -> bool {
        let end = pos + size;
        if self.is_resolved(role) {
            false
        } else if end == target {
            self.record(role, pos, AnchorPosition::End)
        } else if end.checked_sub(1) == Some(target) {
            self.record(role, pos, AnchorPosition::InnerEnd)
        } else {
            false
        }
    }

    /// Start-type matches for `first`; a node that takes `first` is tried
    /// for `second` at its own end before `second` is tried at its start.
    fn opening_pass(
        &mut self,
        nodes: &[(usize, usize)],
        first: (AnchorRole, usize),
        second: (AnchorRole, usize),
    ) {
        for &(pos, size) in nodes {
            if self.try_open(first, pos) {
                self.try_close(second, pos, size);
            }
            self.try_open(second, pos);
        }
    }

    fn closing_pass(
        &mut self,
        nodes: &[(usize, usize)],
        first: (AnchorRole, usize),
        second: (AnchorRole, usize),
    ) {
        for &(pos, size) in nodes {
            self.try_close(first, pos, size);
            self.try_close(second, pos, size);
        }
    }
}
