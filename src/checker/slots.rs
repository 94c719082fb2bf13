//! Monotonic slot allocation.
//!
//! Every relational sub-expression owns one slot: a synthetic catalog
//! relation named after the slot id that receives the sub-expression's output
//! schema. Ids are handed out in pre-order and never reused, so a parent's
//! slot is always the lowest id in its subtree.

use std::fmt;

use crate::catalog::Catalog;

/// Identifier of an analysis slot. Valid ids start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u32);

impl SlotId {
    /// Wraps a raw slot number.
    #[must_use]
    pub fn new(id: u32) -> Self {
        SlotId(id)
    }

    /// Returns the raw slot number.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out slot ids and binds a fresh relation for each.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    /// Most recently allocated id (0 = none yet).
    last: u32,
    /// Catalog name prefix for slot relations.
    prefix: String,
}

impl SlotAllocator {
    /// Creates an allocator whose slot relations are named `{prefix}{id}`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        SlotAllocator {
            last: 0,
            prefix: prefix.into(),
        }
    }

    /// Allocates the next slot and binds an empty relation for it.
    pub fn allocate(&mut self, catalog: &mut Catalog) -> SlotId {
        self.last += 1;
        let slot = SlotId(self.last);
        let name = self.name(slot);
        let relation = catalog.add_relation(&name);
        log::debug!("allocated slot {slot} as '{name}' (relation #{})", relation.index());
        slot
    }

    /// Returns the most recently allocated slot without allocating.
    /// `SlotId(0)` means nothing has been allocated yet.
    #[must_use]
    pub fn current(&self) -> SlotId {
        SlotId(self.last)
    }

    /// Catalog name of a slot's relation.
    #[must_use]
    pub fn name(&self, slot: SlotId) -> String {
        format!("{}{}", self.prefix, slot.0)
    }

    /// All slots allocated so far, in allocation order.
    pub fn allocated(&self) -> impl Iterator<Item = SlotId> {
        (1..=self.last).map(SlotId)
    }
}
