//! Slicing and replacing ranges of a document.
//!
//! Replacing `[from, to)` with an open slice closes the open sides of the
//! slice against the nodes around the range, joining them when their content
//! is compatible.

use super::{Fragment, ModelError, Node, ResolvedPos, Slice};

impl Node {
    /// The content between `from` and `to` as a slice open as deep as the
    /// positions are below their shared ancestor.
    pub fn slice(&self, from: usize, to: usize) -> Result<Slice, ModelError> {
        if to <= from {
            return Ok(Slice::empty());
        }
        let rfrom = self.resolve(from)?;
        let rto = self.resolve(to)?;
        let depth = rfrom.shared_depth(to);
        let start = rfrom.start(depth);
        let node = rfrom.node(depth);
        let content = node.content().cut(rfrom.pos() - start, rto.pos() - start);
        Ok(Slice::new(
            content,
            rfrom.depth() - depth,
            rto.depth() - depth,
        ))
    }

    /// Replaces `[from, to)` with `slice`, returning the new document.
    pub fn replace(&self, from: usize, to: usize, slice: &Slice) -> Result<Node, ModelError> {
        if to < from {
            return Err(ModelError::PositionOutOfRange {
                pos: to,
                size: self.content_size(),
            });
        }
        let rfrom = self.resolve(from)?;
        let rto = self.resolve(to)?;
        if slice.open_start > rfrom.depth() {
            return Err(ModelError::InsertTooDeep);
        }
        let outer_depth = rfrom.depth() - slice.open_start;
        if rto.depth().checked_sub(slice.open_end) != Some(outer_depth) {
            return Err(ModelError::InconsistentOpenDepths);
        }
        replace_outer(&rfrom, &rto, slice, 0)
    }
}

fn replace_outer(
    from: &ResolvedPos<'_>,
    to: &ResolvedPos<'_>,
    slice: &Slice,
    depth: usize,
) -> Result<Node, ModelError> {
    let index = from.index(depth);
    let node = from.node(depth);
    if index == to.index(depth) && depth < from.depth() - slice.open_start {
        let inner = replace_outer(from, to, slice, depth + 1)?;
        Ok(node.copy(node.content().replace_child(index, inner)))
    } else if slice.is_empty() {
        Ok(close(node, replace_two_way(from, to, depth)?))
    } else if slice.open_start == 0
        && slice.open_end == 0
        && from.depth() == depth
        && to.depth() == depth
    {
        let parent = from.parent();
        let content = parent.content();
        let joined = content
            .cut(0, from.parent_offset())
            .append(&slice.content)
            .append(&content.cut(to.parent_offset(), content.size()));
        Ok(close(parent, joined))
    } else {
        let (along, start_pos, end_pos) = prepare_slice_for_replace(slice, from);
        let start = along.resolve(start_pos)?;
        let end = along.resolve(end_pos)?;
        Ok(close(node, replace_three_way(from, &start, &end, to, depth)?))
    }
}

fn close(node: &Node, content: Fragment) -> Node {
    node.copy(content)
}

fn check_join(main: &Node, sub: &Node) -> Result<(), ModelError> {
    if sub.kind().compatible_content(main.kind()) {
        Ok(())
    } else {
        Err(ModelError::CannotJoin {
            sub: sub.kind(),
            main: main.kind(),
        })
    }
}

fn joinable<'a>(
    before: &ResolvedPos<'a>,
    after: &ResolvedPos<'_>,
    depth: usize,
) -> Result<&'a Node, ModelError> {
    let node = before.node(depth);
    check_join(node, after.node(depth))?;
    Ok(node)
}

fn add_node(child: Node, target: &mut Vec<Node>) {
    match target.last_mut() {
        Some(last) if child.is_text() && child.same_markup(last) => {
            let joined = format!(
                "{}{}",
                last.text_str().unwrap_or_default(),
                child.text_str().unwrap_or_default()
            );
            *last = last.with_text(joined);
        }
        _ => target.push(child),
    }
}

fn add_range<'a>(
    start: Option<&ResolvedPos<'a>>,
    end: Option<&ResolvedPos<'a>>,
    depth: usize,
    target: &mut Vec<Node>,
) {
    let Some(node) = end.or(start).map(|pos| pos.node(depth)) else {
        return;
    };
    let mut start_index = 0;
    let end_index = end.map_or(node.child_count(), |pos| pos.index(depth));
    if let Some(start) = start {
        start_index = start.index(depth);
        if start.depth() > depth {
            start_index += 1;
        } else if start.text_offset() > 0 {
            if let Some(after) = start.node_after() {
                add_node(after, target);
            }
            start_index += 1;
        }
    }
    for index in start_index..end_index {
        add_node(node.content().child(index).clone(), target);
    }
    if let Some(end) = end {
        if end.depth() == depth && end.text_offset() > 0 {
            if let Some(before) = end.node_before() {
                add_node(before, target);
            }
        }
    }
}

fn replace_three_way(
    from: &ResolvedPos<'_>,
    start: &ResolvedPos<'_>,
    end: &ResolvedPos<'_>,
    to: &ResolvedPos<'_>,
    depth: usize,
) -> Result<Fragment, ModelError> {
    let open_start = if from.depth() > depth {
        Some(joinable(from, start, depth + 1)?)
    } else {
        None
    };
    let open_end = if to.depth() > depth {
        Some(joinable(end, to, depth + 1)?)
    } else {
        None
    };

    let mut content = Vec::new();
    add_range(None, Some(from), depth, &mut content);
    match (open_start, open_end) {
        (Some(open_start), Some(open_end)) if start.index(depth) == end.index(depth) => {
            check_join(open_start, open_end)?;
            let inner = replace_three_way(from, start, end, to, depth + 1)?;
            add_node(close(open_start, inner), &mut content);
        }
        _ => {
            if let Some(open_start) = open_start {
                let inner = replace_two_way(from, start, depth + 1)?;
                add_node(close(open_start, inner), &mut content);
            }
            add_range(Some(start), Some(end), depth, &mut content);
            if let Some(open_end) = open_end {
                let inner = replace_two_way(end, to, depth + 1)?;
                add_node(close(open_end, inner), &mut content);
            }
        }
    }
    add_range(Some(to), None, depth, &mut content);
    Ok(Fragment::from_nodes(content))
}

fn replace_two_way(
    from: &ResolvedPos<'_>,
    to: &ResolvedPos<'_>,
    depth: usize,
) -> Result<Fragment, ModelError> {
    let mut content = Vec::new();
    add_range(None, Some(from), depth, &mut content);
    if from.depth() > depth {
        let node = joinable(from, to, depth + 1)?;
        let inner = replace_two_way(from, to, depth + 1)?;
        add_node(close(node, inner), &mut content);
    }
    add_range(Some(to), None, depth, &mut content);
    Ok(Fragment::from_nodes(content))
}

/// Wraps the slice content in copies of the ancestors of `along` so both
/// sides can be resolved at the same depths as the replaced range.
fn prepare_slice_for_replace(slice: &Slice, along: &ResolvedPos<'_>) -> (Node, usize, usize) {
    let extra = along.depth() - slice.open_start;
    let mut node = along.node(extra).copy(slice.content.clone());
    for depth in (0..extra).rev() {
        node = along.node(depth).copy(Fragment::from_node(node));
    }
    let start = slice.open_start + extra;
    let end = node
        .content_size()
        .saturating_sub(slice.open_end + extra);
    (node, start, end)
}
