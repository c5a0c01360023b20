//! Structural suggestion tracking.
//!
//! A structural edit is applied right away, and its inverse is written back
//! into the document as `structure` marks on the nodes around the edited
//! range. Later the marks of one suggestion id are read back to either replay
//! the inverse (revert) or drop the marks and keep the edit (accept).
//!
//! - [`annotate()`] - Classify, rebase, apply and anchor one operation
//! - [`revert_suggestion`] and [`apply_suggestion`] - Resolve a suggestion
//!   together with the suggestions nested in its replaced spans
//! - [`find_structure_group`] - Read back the anchor group of one id

use crate::core::{ModelError, SuggestionId};
use crate::transform::StepError;

pub mod annotate;
pub mod group;
pub mod rebase;
pub mod revert;

pub use annotate::{annotate, annotate_with_config};
pub use group::{
    AnchorRef, StructureMarkGroup, find_structure_group, structure_anchors, suggestion_ids,
};
pub use rebase::rebase;
pub use revert::{
    apply_suggestion, is_structure_suggestion, revert_all_suggestions, revert_suggestion,
    revert_suggestions,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    #[error("could not rebase {step} step for suggestion {id}: its content was deleted")]
    RebaseFailure { id: SuggestionId, step: &'static str },
    #[error("inverting the {expected} step for suggestion {id} produced a {found} step")]
    InvertTypeMismatch {
        id: SuggestionId,
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing anchors for suggestion {id}: {detail}")]
    MissingAnchors { id: SuggestionId, detail: String },
    #[error("reverting suggestion {id} would overwrite content: {reason}")]
    OverwriteWouldOccur { id: SuggestionId, reason: String },
    #[error("could not anchor {missing} for suggestion {id}")]
    PartialAnchors { id: SuggestionId, missing: String },
    #[error(transparent)]
    Step(#[from] StepError),
}

impl From<ModelError> for SuggestError {
    fn from(err: ModelError) -> Self {
        SuggestError::Step(StepError::Model(err))
    }
}

/// Configuration for annotating steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestConfig {
    /// Treat steps whose replaced spans hold no content as structural even
    /// when they do not carry the structure flag.
    pub infer_structure: bool,
    /// Fail instead of warning when a boundary role cannot be anchored.
    pub strict_anchors: bool,
}

impl SuggestConfig {
    pub fn lenient() -> Self {
        Self {
            infer_structure: true,
            strict_anchors: false,
        }
    }

    pub fn strict() -> Self {
        Self {
            infer_structure: true,
            strict_anchors: true,
        }
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self::lenient()
    }
}
