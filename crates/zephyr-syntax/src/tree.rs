//! Finished trees and the handles used to walk them.

use std::fmt;
use std::ops::Range;

use text_size::{TextRange, TextSize};

use crate::buffer::FlatTreeRecord;
use crate::{NodeType, NodeTypeId, NodeTypeRegistry, UNIT_SIZE};

/// Owned, immutable tree for a single document snapshot.
#[derive(Clone)]
pub struct Tree {
    registry: &'static NodeTypeRegistry,
    /// Post-order records, root last. Never empty.
    buffer: Box<[u32]>,
    top: NodeTypeId,
    text: Box<str>,
}

impl Tree {
    pub(crate) fn new(
        registry: &'static NodeTypeRegistry,
        buffer: Box<[u32]>,
        top: NodeTypeId,
        text: Box<str>,
    ) -> Self {
        debug_assert!(!buffer.is_empty() && buffer.len() % UNIT_SIZE as usize == 0);
        Self { registry, buffer, top, text }
    }

    pub fn registry(&self) -> &'static NodeTypeRegistry {
        self.registry
    }

    /// Returns the raw `(type, start, end, size)` words.
    #[inline]
    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() / UNIT_SIZE as usize
    }

    /// Always `false`; the root record is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Decodes every record in buffer order.
    pub fn records(&self) -> Records<'_> {
        Records { buffer: self.buffer.chunks_exact(UNIT_SIZE as usize) }
    }

    pub fn top_type(&self) -> &'static NodeType {
        self.registry.get(self.top).unwrap_or_else(|| self.registry.root_type())
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: self.len() - 1 }
    }

    /// Iterates childless nodes in buffer order.
    pub fn leaves(&self) -> impl Iterator<Item = SyntaxNode<'_>> + '_ {
        (0..self.len() - 1)
            .map(|index| SyntaxNode { tree: self, index })
            .filter(|node| !node.has_children())
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("records", &self.len())
            .field("text_len", &self.text.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn go(f: &mut fmt::Formatter<'_>, node: SyntaxNode<'_>, depth: usize) -> fmt::Result {
            let indent = depth * 2;
            write!(f, "{:indent$}{}@{:?}", "", node.node_type().name(), node.range())?;

            if node.has_children() || node.is_root() {
                writeln!(f)?;
                for child in node.children() {
                    go(f, child, depth + 1)?;
                }
                Ok(())
            } else {
                writeln!(f, " {:?}", node.text())
            }
        }

        go(f, self.root(), 0)
    }
}

/// Iterator over decoded records.
#[derive(Clone)]
pub struct Records<'a> {
    buffer: std::slice::ChunksExact<'a, u32>,
}

impl Iterator for Records<'_> {
    type Item = FlatTreeRecord;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.next().map(FlatTreeRecord::decode)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.buffer.size_hint()
    }
}

impl DoubleEndedIterator for Records<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.buffer.next_back().map(FlatTreeRecord::decode)
    }
}

impl ExactSizeIterator for Records<'_> {}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a Tree,
    /// Record index in the buffer.
    index: usize,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    pub fn record(self) -> FlatTreeRecord {
        FlatTreeRecord::at(&self.tree.buffer, self.index)
    }

    /// Returns this node's type; unknown ids resolve to the fallback type.
    #[inline]
    pub fn node_type(self) -> &'a NodeType {
        let registry = self.tree.registry;
        registry.get(self.record().type_id).unwrap_or_else(|| registry.unknown_type())
    }

    #[inline]
    pub fn range(self) -> TextRange {
        self.record().range()
    }

    /// Returns the covered text, or `""` if the span does not fall on character
    /// boundaries (only possible for trees built leaf by leaf).
    #[inline]
    pub fn text(self) -> &'a str {
        self.tree.text.get(Range::<usize>::from(self.range())).unwrap_or_default()
    }

    /// Returns the record index of this node in the buffer.
    #[inline]
    pub fn index(self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self.index + 1 == self.tree.len()
    }

    #[inline]
    pub fn has_children(self) -> bool {
        !self.record().is_leaf()
    }

    /// Iterates direct children in document order.
    ///
    /// The last child sits right before its parent; each earlier sibling is
    /// found by skipping the later sibling's subtree.
    pub fn children(self) -> Children<'a> {
        let first = self.index + 1 - self.record().subtree_len();
        let mut indices = Vec::new();
        let mut cursor = self.index;

        while cursor > first {
            let child = cursor - 1;
            indices.push(child);
            cursor = child + 1 - FlatTreeRecord::at(&self.tree.buffer, child).subtree_len();
        }

        indices.reverse();
        Children { tree: self.tree, indices: indices.into_iter() }
    }

    /// Returns the parent node, if any.
    pub fn parent(self) -> Option<Self> {
        (self.index + 1..self.tree.len())
            .map(|index| Self { tree: self.tree, index })
            .find(|candidate| candidate.index + 1 - candidate.record().subtree_len() <= self.index)
    }

    /// Returns the childless node(s) touching `offset`.
    pub fn leaf_at_offset(self, offset: TextSize) -> LeafAtOffset<Self> {
        if !self.range().contains_inclusive(offset) {
            return LeafAtOffset::None;
        }

        if !self.has_children() {
            return LeafAtOffset::Single(self);
        }

        let mut hits = self.children().filter(|child| child.range().contains_inclusive(offset));
        match (hits.next(), hits.next()) {
            (None, _) => LeafAtOffset::None,
            (Some(only), None) => only.leaf_at_offset(offset),
            (Some(left), Some(right)) => {
                let left = left.leaf_at_offset(offset).left_biased();
                let right = right.leaf_at_offset(offset).right_biased();
                match (left, right) {
                    (Some(left), Some(right)) => LeafAtOffset::Between(left, right),
                    (Some(it), None) | (None, Some(it)) => LeafAtOffset::Single(it),
                    (None, None) => LeafAtOffset::None,
                }
            }
        }
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.node_type().name(), self.range())
    }
}

/// Iterator over a node's direct children.
#[derive(Clone)]
pub struct Children<'a> {
    tree: &'a Tree,
    indices: std::vec::IntoIter<usize>,
}

impl<'a> Iterator for Children<'a> {
    type Item = SyntaxNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.indices.next().map(|index| SyntaxNode { tree: self.tree, index })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.indices.next_back().map(|index| SyntaxNode { tree: self.tree, index })
    }
}

impl ExactSizeIterator for Children<'_> {}

/// There might be zero, one or two leaves at a given offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeafAtOffset<T> {
    /// No leaves at offset.
    None,
    /// Only a single leaf at offset.
    Single(T),
    /// Offset is exactly between two leaves.
    Between(T, T),
}

impl<T> LeafAtOffset<T> {
    /// Convert to option, preferring the right leaf in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(_, right) => Some(right),
        }
    }

    /// Convert to option, preferring the left leaf in case of a tie.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(left, _) => Some(left),
        }
    }
}
