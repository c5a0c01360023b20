use super::map::{Bias, Mappable, StepMap};
use super::StepError;
use crate::classify::content_between;
use crate::core::{GroupKind, Node, Slice};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// An invertible edit from one document version to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stepType")]
pub enum EditOperation {
    /// Replaces `[from, to)` with `slice`.
    #[serde(rename = "replace")]
    ContentReplace {
        from: usize,
        to: usize,
        #[serde(default)]
        slice: Slice,
        #[serde(default, skip_serializing_if = "is_false")]
        structure: bool,
    },
    /// Replaces `[from, gap_from)` and `[gap_to, to)` with `slice`, moving
    /// the gap content into the slice at `insert`.
    #[serde(rename = "replaceAround", rename_all = "camelCase")]
    BoundaryReplace {
        from: usize,
        to: usize,
        gap_from: usize,
        gap_to: usize,
        #[serde(default)]
        slice: Slice,
        insert: usize,
        #[serde(default, skip_serializing_if = "is_false")]
        structure: bool,
    },
}

impl EditOperation {
    pub fn replace(from: usize, to: usize, slice: Slice, structure: bool) -> Self {
        EditOperation::ContentReplace {
            from,
            to,
            slice,
            structure,
        }
    }

    pub fn replace_around(
        from: usize,
        to: usize,
        gap_from: usize,
        gap_to: usize,
        slice: Slice,
        insert: usize,
        structure: bool,
    ) -> Self {
        EditOperation::BoundaryReplace {
            from,
            to,
            gap_from,
            gap_to,
            slice,
            insert,
            structure,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditOperation::ContentReplace { .. } => "replace",
            EditOperation::BoundaryReplace { .. } => "replaceAround",
        }
    }

    pub fn kind(&self) -> GroupKind {
        match self {
            EditOperation::ContentReplace { .. } => GroupKind::Replace,
            EditOperation::BoundaryReplace { .. } => GroupKind::ReplaceAround,
        }
    }

    pub fn from(&self) -> usize {
        match *self {
            EditOperation::ContentReplace { from, .. }
            | EditOperation::BoundaryReplace { from, .. } => from,
        }
    }

    pub fn to(&self) -> usize {
        match *self {
            EditOperation::ContentReplace { to, .. }
            | EditOperation::BoundaryReplace { to, .. } => to,
        }
    }

    pub fn slice(&self) -> &Slice {
        match self {
            EditOperation::ContentReplace { slice, .. }
            | EditOperation::BoundaryReplace { slice, .. } => slice,
        }
    }

    pub fn is_structure(&self) -> bool {
        match *self {
            EditOperation::ContentReplace { structure, .. }
            | EditOperation::BoundaryReplace { structure, .. } => structure,
        }
    }

    fn check_gap(&self) -> Result<(), StepError> {
        match *self {
            EditOperation::BoundaryReplace {
                from,
                to,
                gap_from,
                gap_to,
                ..
            } if !(from <= gap_from && gap_from <= gap_to && gap_to <= to) => {
                Err(StepError::GapOutOfRange {
                    from,
                    to,
                    gap_from,
                    gap_to,
                })
            }
            _ => Ok(()),
        }
    }

    /// Applies the operation, returning the new document.
    ///
    /// A structural operation fails rather than overwrite content in the
    /// spans it replaces.
    pub fn apply(&self, doc: &Node) -> Result<Node, StepError> {
        match self {
            EditOperation::ContentReplace {
                from,
                to,
                slice,
                structure,
            } => {
                if *structure && content_between(doc, *from, *to) {
                    return Err(StepError::StructureOverwrite);
                }
                Ok(doc.replace(*from, *to, slice)?)
            }
            EditOperation::BoundaryReplace {
                from,
                to,
                gap_from,
                gap_to,
                slice,
                insert,
                structure,
            } => {
                self.check_gap()?;
                if *structure
                    && (content_between(doc, *from, *gap_from)
                        || content_between(doc, *gap_to, *to))
                {
                    return Err(StepError::StructureGapOverwrite);
                }
                let gap = doc.slice(*gap_from, *gap_to)?;
                if gap.open_start > 0 || gap.open_end > 0 {
                    return Err(StepError::GapNotFlat);
                }
                let inserted = slice
                    .insert_at(*insert, &gap.content)
                    .map_err(|_| StepError::GapDoesNotFit)?;
                Ok(doc.replace(*from, *to, &inserted)?)
            }
        }
    }

    pub fn step_map(&self) -> StepMap {
        match *self {
            EditOperation::ContentReplace {
                from,
                to,
                ref slice,
                ..
            } => StepMap::new(vec![(from, to.saturating_sub(from), slice.size())]),
            EditOperation::BoundaryReplace {
                from,
                to,
                gap_from,
                gap_to,
                ref slice,
                insert,
                ..
            } => StepMap::new(vec![
                (from, gap_from.saturating_sub(from), insert),
                (gap_to, to.saturating_sub(gap_to), slice.size().saturating_sub(insert)),
            ]),
        }
    }

    /// The operation undoing this one, given the document it was applied to.
    pub fn invert(&self, doc: &Node) -> Result<EditOperation, StepError> {
        match *self {
            EditOperation::ContentReplace {
                from,
                to,
                ref slice,
                ..
            } => Ok(EditOperation::replace(
                from,
                from + slice.size(),
                doc.slice(from, to)?,
                false,
            )),
            EditOperation::BoundaryReplace {
                from,
                to,
                gap_from,
                gap_to,
                ref slice,
                insert,
                structure,
            } => {
                self.check_gap()?;
                let gap = gap_to - gap_from;
                let removed = doc
                    .slice(from, to)?
                    .remove_between(gap_from - from, gap_to - from)?;
                Ok(EditOperation::replace_around(
                    from,
                    from + slice.size() + gap,
                    from + insert,
                    from + insert + gap,
                    removed,
                    gap_from - from,
                    structure,
                ))
            }
        }
    }

    /// Maps the operation through `mapping`. `None` when the content it
    /// anchors to was deleted.
    pub fn map(&self, mapping: &impl Mappable) -> Option<EditOperation> {
        match *self {
            EditOperation::ContentReplace {
                from,
                to,
                ref slice,
                structure,
            } => {
                let from = mapping.map_result(from, Bias::After);
                let to = mapping.map_result(to, Bias::Before);
                if from.deleted_across() && to.deleted_across() {
                    return None;
                }
                Some(EditOperation::replace(
                    from.pos,
                    from.pos.max(to.pos),
                    slice.clone(),
                    structure,
                ))
            }
            EditOperation::BoundaryReplace {
                from: old_from,
                to: old_to,
                gap_from,
                gap_to,
                ref slice,
                insert,
                structure,
            } => {
                let from = mapping.map_result(old_from, Bias::After);
                let to = mapping.map_result(old_to, Bias::Before);
                let gap_from = if old_from == gap_from {
                    from.pos
                } else {
                    mapping.map(gap_from, Bias::Before)
                };
                let gap_to = if old_to == gap_to {
                    to.pos
                } else {
                    mapping.map(gap_to, Bias::After)
                };
                if (from.deleted_across() && to.deleted_across())
                    || gap_from < from.pos
                    || gap_to > to.pos
                {
                    return None;
                }
                Some(EditOperation::replace_around(
                    from.pos,
                    to.pos,
                    gap_from,
                    gap_to,
                    slice.clone(),
                    insert,
                    structure,
                ))
            }
        }
    }
}
