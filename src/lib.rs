//! md-suggest: Reversible structural suggestions for tree-shaped rich text.
//!
//! Edits are recorded as suggestions that can be reverted or accepted after
//! the fact without a separate change log. Structural edits (wrap, unwrap,
//! split, join, sink, lift) are applied at once, and their inverse is stored
//! as anchor marks on the surrounding nodes. It includes:
//!
//! - **Document model** - Nodes, fragments, slices, resolved positions and the
//!   replace algorithm
//! - **Classification** - Whether a step only moves node boundaries
//! - **Transforms** - Invertible edit operations, position maps and a
//!   transaction builder
//! - **Suggestions** - Rebasing, anchoring, and reverting or accepting groups
//!
//! # Quick Start
//!
//! ```rust
//! use md_suggest::{
//!     EditOperation, Fragment, Node, NodeKind, Slice, SuggestionId, Transaction, annotate,
//!     revert_suggestion,
//! };
//!
//! let paragraph = Node::new(NodeKind::Paragraph, vec![Node::text("Hello World")]);
//! let doc = Node::new(NodeKind::Doc, vec![paragraph]);
//!
//! // Wrap the paragraph in a blockquote as suggestion 1
//! let quote = Slice::new(Fragment::from_node(Node::leaf(NodeKind::Blockquote)), 0, 0);
//! let wrap = EditOperation::replace_around(0, 13, 0, 13, quote, 1, true);
//! let mut tx = Transaction::new(doc.clone());
//! assert!(annotate(&mut tx, &wrap, &[], SuggestionId(1)).unwrap());
//!
//! // Revert it
//! revert_suggestion(&mut tx, SuggestionId(1)).unwrap();
//! assert_eq!(tx.doc(), &doc);
//! ```
//!
//! # Features
//!
//! - `cli` - Builds the `md-suggest` binary (enabled by default)

// Document tree
pub mod core;

// Structural step classification
pub mod classify;

// Edit operations and transactions
pub mod transform;

// Suggestion annotation and reversal
pub mod suggest;

// Re-export core types
pub use core::{
    Attrs, Fragment, ModelError, Node, NodeKind, NodeRange, NodesBetween, ResolvedPos, Slice,
};

// Re-export mark types
pub use core::mark::{
    AnchorData, AnchorDebug, AnchorPosition, AnchorRole, GroupKind, Mark, MarkKind, StructureMark,
    SuggestionId,
};

// Re-export classifier
pub use classify::{content_between, is_structural, is_structural_step};

// Re-export transform types
pub use transform::{
    Bias, EditOperation, MapResult, Mappable, Mapping, MarkEdit, StepError, StepMap, Transaction,
};

// Re-export suggestion engine
pub use suggest::{
    AnchorRef, StructureMarkGroup, SuggestConfig, SuggestError, annotate, annotate_with_config,
    apply_suggestion, find_structure_group, is_structure_suggestion, rebase,
    revert_all_suggestions, revert_suggestion, revert_suggestions, structure_anchors,
    suggestion_ids,
};
