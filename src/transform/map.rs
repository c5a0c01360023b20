//! Position maps produced by edit operations.

const DEL_BEFORE: u8 = 1;
const DEL_AFTER: u8 = 2;
const DEL_ACROSS: u8 = 4;
const DEL_SIDE: u8 = 8;

/// Which side a position sticks to when content is inserted exactly at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Before,
    After,
}

/// A mapped position plus what happened to the content around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapResult {
    pub pos: usize,
    del_info: u8,
}

impl MapResult {
    fn new(pos: usize, del_info: u8) -> Self {
        Self { pos, del_info }
    }

    /// The token on the side the position is biased toward was deleted.
    pub fn deleted(&self) -> bool {
        self.del_info & DEL_SIDE > 0
    }

    pub fn deleted_before(&self) -> bool {
        self.del_info & (DEL_BEFORE | DEL_ACROSS) > 0
    }

    pub fn deleted_after(&self) -> bool {
        self.del_info & (DEL_AFTER | DEL_ACROSS) > 0
    }

    /// The position sat strictly inside a deleted range.
    pub fn deleted_across(&self) -> bool {
        self.del_info & DEL_ACROSS > 0
    }
}

pub trait Mappable {
    fn map_result(&self, pos: usize, bias: Bias) -> MapResult;

    fn map(&self, pos: usize, bias: Bias) -> usize {
        self.map_result(pos, bias).pos
    }
}

/// Replaced ranges of one operation as `(start, old_size, new_size)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepMap {
    ranges: Vec<(usize, usize, usize)>,
    inverted: bool,
}

impl StepMap {
    pub fn new(ranges: Vec<(usize, usize, usize)>) -> Self {
        Self {
            ranges,
            inverted: false,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ranges(&self) -> &[(usize, usize, usize)] {
        &self.ranges
    }

    /// The map from the new document back to the old one.
    pub fn invert(&self) -> StepMap {
        Self {
            ranges: self.ranges.clone(),
            inverted: !self.inverted,
        }
    }
}

impl Mappable for StepMap {
    fn map_result(&self, pos: usize, bias: Bias) -> MapResult {
        let pos = pos as i64;
        let mut diff: i64 = 0;
        for &(start, old, new) in &self.ranges {
            let (old_size, new_size) = if self.inverted {
                (new as i64, old as i64)
            } else {
                (old as i64, new as i64)
            };
            let start = start as i64 - if self.inverted { diff } else { 0 };
            if start > pos {
                break;
            }
            let end = start + old_size;
            if pos <= end {
                let after = if old_size == 0 {
                    bias == Bias::After
                } else if pos == start {
                    false
                } else if pos == end {
                    true
                } else {
                    bias == Bias::After
                };
                let result = start + diff + if after { new_size } else { 0 };
                let mut del = if pos == start {
                    DEL_AFTER
                } else if pos == end {
                    DEL_BEFORE
                } else {
                    DEL_ACROSS
                };
                let clean_side = match bias {
                    Bias::Before => pos == start,
                    Bias::After => pos == end,
                };
                if !clean_side {
                    del |= DEL_SIDE;
                }
                return MapResult::new(result.max(0) as usize, del);
            }
            diff += new_size - old_size;
        }
        MapResult::new((pos + diff).max(0) as usize, 0)
    }
}

/// A chain of step maps applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    pub fn maps(&self) -> &[StepMap] {
        &self.maps
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl Mappable for Mapping {
    fn map_result(&self, pos: usize, bias: Bias) -> MapResult {
        let mut pos = pos;
        let mut del_info = 0;
        for map in &self.maps {
            let result = map.map_result(pos, bias);
            del_info |= result.del_info;
            pos = result.pos;
        }
        MapResult::new(pos, del_info)
    }
}
