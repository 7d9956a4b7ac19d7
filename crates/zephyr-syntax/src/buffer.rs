use text_size::{TextRange, TextSize};

use crate::NodeTypeId;

/// Number of buffer slots one record occupies.
///
/// Leaves have exactly this size; a parent's size adds its descendants' slots.
pub const UNIT_SIZE: u32 = 4;

const UNIT: usize = UNIT_SIZE as usize;

/// One decoded `(type, start, end, size)` record of the flat buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FlatTreeRecord {
    pub type_id: NodeTypeId,
    pub start: TextSize,
    pub end: TextSize,
    /// Slots covered by this record and all of its descendants.
    pub size: u32,
}

impl FlatTreeRecord {
    pub fn new(type_id: NodeTypeId, range: TextRange, size: u32) -> Self {
        Self { type_id, start: range.start(), end: range.end(), size }
    }

    pub fn leaf(type_id: NodeTypeId, range: TextRange) -> Self {
        Self::new(type_id, range, UNIT_SIZE)
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Number of records in this record's subtree, itself included.
    pub fn subtree_len(&self) -> usize {
        self.size as usize / UNIT
    }

    pub fn is_leaf(&self) -> bool {
        self.size == UNIT_SIZE
    }

    pub(crate) fn encode(self) -> [u32; UNIT] {
        [u32::from(self.type_id), self.start.into(), self.end.into(), self.size]
    }

    pub(crate) fn decode(words: &[u32]) -> Self {
        debug_assert_eq!(words.len(), UNIT);
        let type_id = NodeTypeId::new(words[0] as u16);
        Self { type_id, start: words[1].into(), end: words[2].into(), size: words[3] }
    }

    /// Decodes the record at `index` in `buffer`.
    pub(crate) fn at(buffer: &[u32], index: usize) -> Self {
        Self::decode(&buffer[index * UNIT..(index + 1) * UNIT])
    }
}
