use super::{Fragment, Node};

/// Pre-order iterator over `(node, pos)` pairs whose span intersects a range.
///
/// A node is yielded when it starts before the range end and ends after the
/// range start; its children are then visited with the range narrowed to its
/// content. The iterator is `Clone`, so a walk can be restarted from any
/// point.
#[derive(Debug, Clone)]
pub struct NodesBetween<'a> {
    stack: Vec<Frame<'a>>,
}

#[derive(Debug, Clone)]
struct Frame<'a> {
    children: &'a [Node],
    index: usize,
    offset: usize,
    base: usize,
    from: usize,
    to: usize,
}

impl<'a> NodesBetween<'a> {
    pub(crate) fn new(fragment: &'a Fragment, from: usize, to: usize) -> Self {
        Self {
            stack: vec![Frame {
                children: fragment.children(),
                index: 0,
                offset: 0,
                base: 0,
                from,
                to,
            }],
        }
    }
}

impl<'a> Iterator for NodesBetween<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let children = frame.children;
            let Some(child) = children.get(frame.index) else {
                self.stack.pop();
                continue;
            };
            if frame.offset >= frame.to {
                self.stack.pop();
                continue;
            }
            let start = frame.offset;
            let end = start + child.node_size();
            frame.index += 1;
            frame.offset = end;
            if end <= frame.from {
                continue;
            }
            let pos = frame.base + start;
            let (from, to) = (frame.from, frame.to);
            let content_size = child.content_size();
            if content_size > 0 {
                let inner = start + 1;
                self.stack.push(Frame {
                    children: child.content().children(),
                    index: 0,
                    offset: 0,
                    base: pos + 1,
                    from: from.saturating_sub(inner),
                    to: content_size.min(to - inner),
                });
            }
            return Some((child, pos));
        }
    }
}
