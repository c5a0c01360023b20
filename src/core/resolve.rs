use super::{ModelError, Node};

#[derive(Debug, Clone, Copy)]
struct PathEntry<'a> {
    node: &'a Node,
    index: usize,
    offset: usize,
}

/// A position resolved against a document: the chain of ancestors containing
/// it, with the child index and absolute start at each level.
#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
    pos: usize,
    path: Vec<PathEntry<'a>>,
    parent_offset: usize,
}

impl<'a> ResolvedPos<'a> {
    pub(crate) fn resolve(doc: &'a Node, pos: usize) -> Result<Self, ModelError> {
        let size = doc.content_size();
        if pos > size {
            return Err(ModelError::PositionOutOfRange { pos, size });
        }
        let mut path = Vec::new();
        let mut start = 0;
        let mut parent_offset = pos;
        let mut node = doc;
        loop {
            let (index, offset) = node.content().find_index(parent_offset)?;
            let rem = parent_offset - offset;
            path.push(PathEntry {
                node,
                index,
                offset: start + offset,
            });
            if rem == 0 {
                break;
            }
            node = node.content().child(index);
            if node.is_text() {
                break;
            }
            parent_offset = rem - 1;
            start += offset + 1;
        }
        Ok(Self {
            pos,
            path,
            parent_offset,
        })
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    pub fn parent_offset(&self) -> usize {
        self.parent_offset
    }

    pub fn parent(&self) -> &'a Node {
        self.node(self.depth())
    }

    pub fn doc(&self) -> &'a Node {
        self.node(0)
    }

    /// Ancestor at `depth`; `0` is the document.
    pub fn node(&self, depth: usize) -> &'a Node {
        self.path[depth].node
    }

    pub fn index(&self, depth: usize) -> usize {
        self.path[depth].index
    }

    pub fn index_after(&self, depth: usize) -> usize {
        let index = self.index(depth);
        if depth == self.depth() && self.text_offset() == 0 {
            index
        } else {
            index + 1
        }
    }

    /// Start of the content of the ancestor at `depth`.
    pub fn start(&self, depth: usize) -> usize {
        if depth == 0 {
            0
        } else {
            self.path[depth - 1].offset + 1
        }
    }

    pub fn end(&self, depth: usize) -> usize {
        self.start(depth) + self.node(depth).content_size()
    }

    /// Position before the ancestor at `depth`; `None` for the document.
    pub fn before(&self, depth: usize) -> Option<usize> {
        let parent = depth.checked_sub(1)?;
        if depth == self.depth() + 1 {
            Some(self.pos)
        } else {
            self.path.get(parent).map(|entry| entry.offset)
        }
    }

    /// Position after the ancestor at `depth`; `None` for the document.
    pub fn after(&self, depth: usize) -> Option<usize> {
        let parent = depth.checked_sub(1)?;
        if depth == self.depth() + 1 {
            return Some(self.pos);
        }
        let start = self.path.get(parent)?.offset;
        let node = self.path.get(depth)?.node;
        Some(start + node.node_size())
    }

    /// Offset into the text node the position points into, or `0`.
    pub fn text_offset(&self) -> usize {
        self.path
            .last()
            .map_or(0, |entry| self.pos - entry.offset)
    }

    pub fn node_after(&self) -> Option<Node> {
        let parent = self.parent();
        let index = self.index(self.depth());
        let child = parent.maybe_child(index)?;
        let offset = self.text_offset();
        if offset > 0 {
            Some(child.cut(offset, child.node_size()))
        } else {
            Some(child.clone())
        }
    }

    pub fn node_before(&self) -> Option<Node> {
        let parent = self.parent();
        let index = self.index(self.depth());
        let offset = self.text_offset();
        if offset > 0 {
            return parent.maybe_child(index).map(|child| child.cut(0, offset));
        }
        index
            .checked_sub(1)
            .and_then(|i| parent.maybe_child(i))
            .cloned()
    }

    /// Deepest depth whose content contains both this position and `pos`.
    pub fn shared_depth(&self, pos: usize) -> usize {
        (1..=self.depth())
            .rev()
            .find(|&depth| self.start(depth) <= pos && self.end(depth) >= pos)
            .unwrap_or(0)
    }

    /// The range of sibling block nodes spanning this position and `other`.
    pub fn block_range(&self, other: &ResolvedPos<'a>) -> Option<NodeRange<'a>> {
        if other.pos < self.pos {
            return other.block_range(self);
        }
        let lift = usize::from(self.parent().is_textblock() || self.pos == other.pos);
        let top = self.depth().checked_sub(lift)?;
        (0..=top)
            .rev()
            .find(|&depth| other.pos <= self.end(depth))
            .and_then(|depth| NodeRange::new(self.clone(), other.clone(), depth))
    }
}

/// A flat run of siblings at `depth`, from the child containing `from` to the
/// child containing `to`.
#[derive(Debug, Clone)]
pub struct NodeRange<'a> {
    from: ResolvedPos<'a>,
    to: ResolvedPos<'a>,
    depth: usize,
    start: usize,
    end: usize,
}

impl<'a> NodeRange<'a> {
    fn new(from: ResolvedPos<'a>, to: ResolvedPos<'a>, depth: usize) -> Option<Self> {
        let start = from.before(depth + 1)?;
        let end = to.after(depth + 1)?;
        Some(Self {
            from,
            to,
            depth,
            start,
            end,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn parent(&self) -> &'a Node {
        self.from.node(self.depth)
    }

    pub fn start_index(&self) -> usize {
        self.from.index(self.depth)
    }

    pub fn end_index(&self) -> usize {
        self.to.index_after(self.depth)
    }
}
