//! Node and inline annotations.
//!
//! Format marks (`strong`, `em`, ...) decorate inline text. Suggestion marks
//! carry a [`SuggestionId`]: `insertion`/`deletion` tag inline ranges owned by
//! the host, while `structure` marks are anchors pinned to single nodes that
//! together encode the inverse of a structural edit.

use super::Slice;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-wide, strictly increasing suggestion identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SuggestionId(pub u64);

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SuggestionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "attrs", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Link { href: String },
    Insertion { id: SuggestionId },
    Deletion { id: SuggestionId },
    Structure(StructureMark),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkKind {
    Strong,
    Em,
    Code,
    Link,
    Insertion,
    Deletion,
    Structure,
}

impl Mark {
    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Strong => MarkKind::Strong,
            Mark::Em => MarkKind::Em,
            Mark::Code => MarkKind::Code,
            Mark::Link { .. } => MarkKind::Link,
            Mark::Insertion { .. } => MarkKind::Insertion,
            Mark::Deletion { .. } => MarkKind::Deletion,
            Mark::Structure(_) => MarkKind::Structure,
        }
    }

    /// Suggestion id carried by insertion, deletion and structure marks.
    pub fn suggestion_id(&self) -> Option<SuggestionId> {
        match self {
            Mark::Insertion { id } | Mark::Deletion { id } => Some(*id),
            Mark::Structure(mark) => Some(mark.id),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&StructureMark> {
        match self {
            Mark::Structure(mark) => Some(mark),
            _ => None,
        }
    }

    /// Format marks replace an existing mark of the same kind; suggestion
    /// marks stack so one node can hold anchors from several groups.
    fn excludes_same_kind(&self) -> bool {
        self.suggestion_id().is_none()
    }

    /// Returns `set` with this mark added.
    pub fn add_to_set(&self, set: &[Mark]) -> Vec<Mark> {
        if set.contains(self) {
            return set.to_vec();
        }
        let mut out = Vec::with_capacity(set.len() + 1);
        let mut placed = false;
        for existing in set {
            if self.excludes_same_kind() && existing.kind() == self.kind() {
                if !placed {
                    out.push(self.clone());
                    placed = true;
                }
                continue;
            }
            if !placed && existing.kind() > self.kind() {
                out.push(self.clone());
                placed = true;
            }
            out.push(existing.clone());
        }
        if !placed {
            out.push(self.clone());
        }
        out
    }

    /// Returns `set` without this mark.
    pub fn remove_from_set(&self, set: &[Mark]) -> Vec<Mark> {
        set.iter().filter(|mark| *mark != self).cloned().collect()
    }
}

/// A structure anchor: one of the two or four boundary roles of a structural
/// suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureMark {
    pub id: SuggestionId,
    pub data: AnchorData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorRole {
    From,
    To,
    GapFrom,
    GapTo,
}

impl fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnchorRole::From => "from",
            AnchorRole::To => "to",
            AnchorRole::GapFrom => "gapFrom",
            AnchorRole::GapTo => "gapTo",
        };
        f.write_str(name)
    }
}

/// Which boundary of the anchored node the role sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorPosition {
    Start,
    End,
    InnerStart,
    InnerEnd,
}

impl AnchorPosition {
    /// Absolute position for a node starting at `node_pos` with `node_size`.
    pub fn resolve(self, node_pos: usize, node_size: usize) -> usize {
        match self {
            AnchorPosition::Start => node_pos,
            AnchorPosition::End => node_pos + node_size,
            AnchorPosition::InnerStart => node_pos + 1,
            AnchorPosition::InnerEnd => (node_pos + node_size).saturating_sub(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKind {
    Replace,
    ReplaceAround,
}

/// Payload of a structure anchor. This is the only durable artifact of the
/// engine and must survive a JSON round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorData {
    pub value: AnchorRole,
    pub position: AnchorPosition,
    #[serde(rename = "type")]
    pub kind: GroupKind,
    #[serde(default)]
    pub slice: Slice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<usize>,
    #[serde(default)]
    pub structure: bool,
    pub debug: AnchorDebug,
}

/// Inverse positions at encode time plus the redundant distances between
/// them. Offsets are only present for `replaceAround` groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorDebug {
    pub inverse_from: usize,
    pub inverse_to: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_gap_from: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_gap_to: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_from_offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_to_offset: Option<i64>,
}

impl AnchorDebug {
    /// Width of `[from, gap_from)` recorded at encode time.
    pub fn recorded_head_width(&self) -> Option<i64> {
        self.from_offset.or(self.gap_from_offset)
    }

    /// Width of `[gap_to, to)` recorded at encode time.
    pub fn recorded_tail_width(&self) -> Option<i64> {
        self.to_offset.or(self.gap_to_offset)
    }
}
