use super::map::{Mapping, StepMap};
use super::{EditOperation, StepError};
use crate::core::{Mark, ModelError, Node};

/// A node annotation change recorded alongside the applied operations.
/// Mark edits never move positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkEdit {
    Add { pos: usize, mark: Mark },
    Remove { pos: usize, mark: Mark },
}

/// Builder collecting operations and mark edits against a document.
///
/// Owned by one caller at a time and passed by `&mut`. It is `Clone` so
/// work can be staged on a copy and committed only on success.
#[derive(Debug, Clone)]
pub struct Transaction {
    before: Node,
    doc: Node,
    steps: Vec<EditOperation>,
    docs: Vec<Node>,
    mapping: Mapping,
    mark_edits: Vec<MarkEdit>,
}

impl Transaction {
    pub fn new(doc: Node) -> Self {
        Self {
            before: doc.clone(),
            doc,
            steps: Vec::new(),
            docs: Vec::new(),
            mapping: Mapping::new(),
            mark_edits: Vec::new(),
        }
    }

    /// The document the transaction started from.
    pub fn before(&self) -> &Node {
        &self.before
    }

    /// The current document.
    pub fn doc(&self) -> &Node {
        &self.doc
    }

    /// Operations applied so far, in order.
    pub fn steps(&self) -> &[EditOperation] {
        &self.steps
    }

    /// The document each step was applied to.
    pub fn docs(&self) -> &[Node] {
        &self.docs
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn mark_edits(&self) -> &[MarkEdit] {
        &self.mark_edits
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty() || !self.mark_edits.is_empty()
    }

    /// Applies `step` to the current document.
    pub fn step(&mut self, step: EditOperation) -> Result<&mut Self, StepError> {
        let next = step.apply(&self.doc)?;
        let map: StepMap = step.step_map();
        let previous = std::mem::replace(&mut self.doc, next);
        self.docs.push(previous);
        self.mapping.push(map);
        self.steps.push(step);
        Ok(self)
    }

    /// Adds `mark` to the node starting at `pos`.
    pub fn add_node_mark(&mut self, pos: usize, mark: Mark) -> Result<&mut Self, ModelError> {
        self.doc = self.doc.update_marks_at(pos, |marks| mark.add_to_set(marks))?;
        self.mark_edits.push(MarkEdit::Add { pos, mark });
        Ok(self)
    }

    /// Removes `mark` from the node starting at `pos`.
    pub fn remove_node_mark(&mut self, pos: usize, mark: &Mark) -> Result<&mut Self, ModelError> {
        self.doc = self
            .doc
            .update_marks_at(pos, |marks| mark.remove_from_set(marks))?;
        self.mark_edits.push(MarkEdit::Remove {
            pos,
            mark: mark.clone(),
        });
        Ok(self)
    }

    pub fn into_doc(self) -> Node {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NodeKind, Slice};
    use crate::transform::{Bias, Mappable};

    fn doc() -> Node {
        Node::new(
            NodeKind::Doc,
            vec![
                Node::new(NodeKind::Paragraph, vec![Node::text("ab")]),
                Node::new(NodeKind::Paragraph, vec![Node::text("cd")]),
            ],
        )
    }

    #[test]
    fn test_step_records_history() {
        let mut tx = Transaction::new(doc());
        tx.step(EditOperation::replace(3, 5, Slice::empty(), true))
            .unwrap();
        assert_eq!(tx.steps().len(), 1);
        assert_eq!(tx.docs()[0], doc());
        assert_eq!(tx.doc().child_count(), 1);
        assert_eq!(tx.doc().text_content(), "abcd");
        assert_eq!(tx.mapping().map(7, Bias::After), 5);
        assert_eq!(tx.before(), &doc());
    }

    #[test]
    fn test_failed_step_leaves_transaction_untouched() {
        let mut tx = Transaction::new(doc());
        let err = tx
            .step(EditOperation::replace(1, 3, Slice::empty(), true))
            .unwrap_err();
        assert_eq!(err, StepError::StructureOverwrite);
        assert!(!tx.doc_changed());
        assert_eq!(tx.doc(), &doc());
    }

    #[test]
    fn test_mark_edits_do_not_move_positions() {
        let mut tx = Transaction::new(doc());
        tx.add_node_mark(4, Mark::Strong).unwrap();
        assert_eq!(tx.doc().node_at(4).unwrap().marks(), &[Mark::Strong]);
        assert!(tx.steps().is_empty());
        tx.remove_node_mark(4, &Mark::Strong).unwrap();
        assert!(tx.doc().node_at(4).unwrap().marks().is_empty());
        assert_eq!(tx.mark_edits().len(), 2);
    }
}
