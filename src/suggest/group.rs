//! Reading anchor groups back out of a document.

use super::SuggestError;
use crate::core::{AnchorData, AnchorRole, GroupKind, Mark, Node, StructureMark, SuggestionId};
use crate::transform::EditOperation;
use std::collections::BTreeSet;

/// One anchor found in a document: the node it sits on and its mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    pub pos: usize,
    pub node_size: usize,
    pub mark: StructureMark,
}

impl AnchorRef {
    /// The absolute position this anchor stands for.
    pub fn resolved(&self) -> usize {
        self.mark.data.position.resolve(self.pos, self.node_size)
    }

    pub fn data(&self) -> &AnchorData {
        &self.mark.data
    }

    pub fn to_mark(&self) -> Mark {
        Mark::Structure(self.mark.clone())
    }
}

/// The complete anchor set of one structural suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureMarkGroup {
    Replace {
        from: AnchorRef,
        to: AnchorRef,
    },
    ReplaceAround {
        from: AnchorRef,
        to: AnchorRef,
        gap_from: AnchorRef,
        gap_to: AnchorRef,
    },
}

impl StructureMarkGroup {
    pub fn id(&self) -> SuggestionId {
        self.from_anchor().mark.id
    }

    pub fn kind(&self) -> GroupKind {
        match self {
            StructureMarkGroup::Replace { .. } => GroupKind::Replace,
            StructureMarkGroup::ReplaceAround { .. } => GroupKind::ReplaceAround,
        }
    }

    fn from_anchor(&self) -> &AnchorRef {
        match self {
            StructureMarkGroup::Replace { from, .. }
            | StructureMarkGroup::ReplaceAround { from, .. } => from,
        }
    }

    fn to_anchor(&self) -> &AnchorRef {
        match self {
            StructureMarkGroup::Replace { to, .. }
            | StructureMarkGroup::ReplaceAround { to, .. } => to,
        }
    }

    pub fn anchors(&self) -> Vec<&AnchorRef> {
        match self {
            StructureMarkGroup::Replace { from, to } => vec![from, to],
            StructureMarkGroup::ReplaceAround {
                from,
                to,
                gap_from,
                gap_to,
            } => vec![from, to, gap_from, gap_to],
        }
    }

    pub fn from(&self) -> usize {
        self.from_anchor().resolved()
    }

    pub fn to(&self) -> usize {
        self.to_anchor().resolved()
    }

    /// `(gap_from, gap_to)` for replace-around groups.
    pub fn gap(&self) -> Option<(usize, usize)> {
        match self {
            StructureMarkGroup::Replace { .. } => None,
            StructureMarkGroup::ReplaceAround {
                gap_from, gap_to, ..
            } => Some((gap_from.resolved(), gap_to.resolved())),
        }
    }

    /// Rebuilds the recorded inverse at the anchors' current positions.
    pub fn inverse(&self) -> Result<EditOperation, SuggestError> {
        let data = self.from_anchor().data();
        match self {
            StructureMarkGroup::Replace { from, to } => Ok(EditOperation::replace(
                from.resolved(),
                to.resolved(),
                data.slice.clone(),
                data.structure,
            )),
            StructureMarkGroup::ReplaceAround {
                from,
                to,
                gap_from,
                gap_to,
            } => {
                let insert =
                    gap_from
                        .data()
                        .insert
                        .ok_or_else(|| SuggestError::MissingAnchors {
                            id: self.id(),
                            detail: "gapFrom anchor carries no insert count".to_string(),
                        })?;
                Ok(EditOperation::replace_around(
                    from.resolved(),
                    to.resolved(),
                    gap_from.resolved(),
                    gap_to.resolved(),
                    data.slice.clone(),
                    insert,
                    data.structure,
                ))
            }
        }
    }
}

/// Structure anchors on nodes intersecting `[from, to)`, in document order.
pub fn structure_anchors(
    doc: &Node,
    from: usize,
    to: usize,
) -> impl Iterator<Item = (usize, &Node, &StructureMark)> {
    doc.nodes_between(from, to).flat_map(|(node, pos)| {
        node.marks()
            .iter()
            .filter_map(Mark::as_structure)
            .map(move |mark| (pos, node, mark))
    })
}

/// Ids of every structural suggestion anchored in `doc`, ascending.
pub fn suggestion_ids(doc: &Node) -> Vec<SuggestionId> {
    structure_anchors(doc, 0, doc.content_size())
        .map(|(_, _, mark)| mark.id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Scans the whole document for the anchors of `id`. The first anchor found
/// for each role wins.
pub fn find_structure_group(
    doc: &Node,
    id: SuggestionId,
) -> Result<StructureMarkGroup, SuggestError> {
    let mut from = None;
    let mut to = None;
    let mut gap_from = None;
    let mut gap_to = None;
    for (pos, node, mark) in structure_anchors(doc, 0, doc.content_size()) {
        if mark.id != id {
            continue;
        }
        let slot = match mark.data.value {
            AnchorRole::From => &mut from,
            AnchorRole::To => &mut to,
            AnchorRole::GapFrom => &mut gap_from,
            AnchorRole::GapTo => &mut gap_to,
        };
        if slot.is_none() {
            *slot = Some(AnchorRef {
                pos,
                node_size: node.node_size(),
                mark: mark.clone(),
            });
        }
    }

    let (Some(from), Some(to)) = (from, to) else {
        return Err(SuggestError::MissingAnchors {
            id,
            detail: "could not find both from and to marks".to_string(),
        });
    };
    match from.data().kind {
        GroupKind::Replace => Ok(StructureMarkGroup::Replace { from, to }),
        GroupKind::ReplaceAround => match (gap_from, gap_to) {
            (Some(gap_from), Some(gap_to)) => Ok(StructureMarkGroup::ReplaceAround {
                from,
                to,
                gap_from,
                gap_to,
            }),
            _ => Err(SuggestError::MissingAnchors {
                id,
                detail: "could not find both gap marks of a replace-around group".to_string(),
            }),
        },
    }
}
