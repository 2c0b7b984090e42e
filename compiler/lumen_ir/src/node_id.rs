//! Node IDs and ranges for the flat syntax tree.
//!
//! Children are referenced by `NodeId(u32)` instead of `Box<Node>`, and
//! variable-length child lists (statements, arguments, parameter names) are
//! `(start, len)` windows into side tables of the arena.

use std::fmt;

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel value).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Range of node IDs in the arena's flattened child lists.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeRange {
    pub start: u32,
    pub len: u16,
}

impl NodeRange {
    /// Empty range.
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        NodeRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Slice bounds within the backing list.
    #[inline]
    pub(crate) fn bounds(self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len()
    }
}

/// Range of names in the arena's flattened name lists (parameter lists).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NameRange {
    pub start: u32,
    pub len: u16,
}

impl NameRange {
    /// Empty range.
    pub const EMPTY: NameRange = NameRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        NameRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub(crate) fn bounds(self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len()
    }
}
