use super::{Fragment, ModelError, Node};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A piece of document: a fragment plus how many levels are open at each
/// side. Serializes like a ProseMirror slice; the empty slice is `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slice {
    pub content: Fragment,
    pub open_start: usize,
    pub open_end: usize,
}

impl Slice {
    pub fn new(content: Fragment, open_start: usize, open_end: usize) -> Self {
        Self {
            content,
            open_start,
            open_end,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.size() == 0
    }

    /// Size the slice adds when inserted.
    pub fn size(&self) -> usize {
        self.content
            .size()
            .saturating_sub(self.open_start + self.open_end)
    }

    /// Inserts `fragment` at `pos`, counted from the slice's open start.
    pub fn insert_at(&self, pos: usize, fragment: &Fragment) -> Result<Slice, ModelError> {
        let content = insert_into(&self.content, pos + self.open_start, fragment)?;
        Ok(Slice::new(content, self.open_start, self.open_end))
    }

    /// Removes `[from, to)`, counted from the slice's open start. The range
    /// must be flat.
    pub fn remove_between(&self, from: usize, to: usize) -> Result<Slice, ModelError> {
        let content = remove_range(&self.content, from + self.open_start, to + self.open_start)?;
        Ok(Slice::new(content, self.open_start, self.open_end))
    }
}

fn insert_into(content: &Fragment, dist: usize, insert: &Fragment) -> Result<Fragment, ModelError> {
    let (index, offset) = content.find_index(dist)?;
    match content.maybe_child(index) {
        Some(child) if offset != dist && !child.is_text() => {
            let inner = insert_into(child.content(), dist - offset - 1, insert)?;
            Ok(content.replace_child(index, child.copy(inner)))
        }
        _ => Ok(content
            .cut(0, dist)
            .append(insert)
            .append(&content.cut(dist, content.size()))),
    }
}

fn remove_range(content: &Fragment, from: usize, to: usize) -> Result<Fragment, ModelError> {
    let (index, offset) = content.find_index(from)?;
    let child = content.maybe_child(index);
    let (index_to, offset_to) = content.find_index(to)?;
    if offset == from || child.is_some_and(Node::is_text) {
        let ends_in_text = content.maybe_child(index_to).is_some_and(Node::is_text);
        if offset_to != to && !ends_in_text {
            return Err(ModelError::NonFlatRange);
        }
        return Ok(content.cut(0, from).append(&content.cut(to, content.size())));
    }
    let Some(child) = child else {
        return Err(ModelError::NonFlatRange);
    };
    if index != index_to {
        return Err(ModelError::NonFlatRange);
    }
    let inner = remove_range(child.content(), from - offset - 1, to - offset - 1)?;
    Ok(content.replace_child(index, child.copy(inner)))
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SliceRepr {
    content: Fragment,
    #[serde(default, skip_serializing_if = "is_zero")]
    open_start: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    open_end: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl Serialize for Slice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_none();
        }
        SliceRepr {
            content: self.content.clone(),
            open_start: self.open_start,
            open_end: self.open_end,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Slice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = Option::<SliceRepr>::deserialize(deserializer)?;
        Ok(repr
            .map(|repr| Slice::new(repr.content, repr.open_start, repr.open_end))
            .unwrap_or_default())
    }
}
