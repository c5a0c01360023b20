//! Edit operations over the document tree.
//!
//! - [`EditOperation`] - The two invertible operations: content replace and
//!   boundary replace (replace around a carried-over gap)
//! - [`StepMap`], [`Mapping`] and [`Mappable`] - Position mapping through
//!   applied operations
//! - [`Transaction`] - Builder collecting applied operations and mark edits

use crate::core::ModelError;

mod map;
mod step;
mod transaction;

pub use map::{Bias, MapResult, Mappable, Mapping, StepMap};
pub use step::EditOperation;
pub use transaction::{MarkEdit, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("Structure replace would overwrite content")]
    StructureOverwrite,
    #[error("Structure gap-replace would overwrite content")]
    StructureGapOverwrite,
    #[error("Gap is not a flat range")]
    GapNotFlat,
    #[error("Content does not fit in gap")]
    GapDoesNotFit,
    #[error("gap [{gap_from}, {gap_to}) is not inside [{from}, {to})")]
    GapOutOfRange {
        from: usize,
        to: usize,
        gap_from: usize,
        gap_to: usize,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}
