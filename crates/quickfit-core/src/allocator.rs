//! Quick-fit allocator over a simulated address space.
//!
//! The allocator owns a growable pool of slots and the per-size-class
//! free lists. A request is satisfied only from the exact-size free
//! list; any other request grows the pool at the tail. Blocks are never
//! split or coalesced, and slots are never removed once created.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::free_list::FreeLists;

/// Outcome of a successful allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocOutcome {
    /// The oldest address of the exact-size free list was reused.
    Reused { address: usize, size: usize },
    /// No exact-size free address existed; the pool grew by one slot.
    Grown { address: usize, size: usize },
}

impl AllocOutcome {
    /// Address the block landed at, regardless of path.
    pub fn address(&self) -> usize {
        match *self {
            Self::Reused { address, .. } | Self::Grown { address, .. } => address,
        }
    }

    /// Size of the allocated block.
    pub fn size(&self) -> usize {
        match *self {
            Self::Reused { size, .. } | Self::Grown { size, .. } => size,
        }
    }
}

/// Outcome of a successful free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FreeOutcome {
    /// The address was re-enqueued on its size class's free list.
    Recycled { address: usize, size: usize },
    /// The block's size has no declared class; the slot is empty but
    /// unreachable from any free list.
    Unrecycled { address: usize, size: usize },
}

impl FreeOutcome {
    /// Address of the freed slot.
    pub fn address(&self) -> usize {
        match *self {
            Self::Recycled { address, .. } | Self::Unrecycled { address, .. } => address,
        }
    }
}

/// A free that could not be honored. Allocator state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FreeError {
    /// Address out of pool bounds, or the slot is already empty.
    #[error("invalid address {address} for free operation")]
    InvalidAddress { address: usize },
}

/// Quick-fit allocator state.
///
/// Slot `i` of the pool is address `i`: `None` is an empty slot,
/// `Some(size)` a block of that size. Every address held by a free list
/// refers to an empty slot. Addresses are stable for the life of the
/// allocator; the pool only grows.
#[derive(Debug, Clone)]
pub struct QuickFitAllocator {
    free_lists: FreeLists,
    pool: Vec<Option<usize>>,
    total_allocated: usize,
    active_count: usize,
}

impl QuickFitAllocator {
    /// Creates an allocator seeded with one home slot per distinct size.
    ///
    /// Sizes are taken in caller order; a duplicate size is a no-op on
    /// its second occurrence. After construction the pool holds exactly
    /// one empty slot per distinct class, and each class's free list
    /// holds that slot's address.
    pub fn new(block_sizes: &[usize]) -> Self {
        let mut free_lists = FreeLists::new();
        let mut pool = Vec::new();
        for &size in block_sizes {
            if !free_lists.declare(size) {
                continue;
            }
            let address = pool.len();
            pool.push(None);
            free_lists.recycle(size, address);
        }
        Self {
            free_lists,
            pool,
            total_allocated: 0,
            active_count: 0,
        }
    }

    /// Allocates a block of `size`.
    ///
    /// Pops the oldest free address of the exact size class when one
    /// exists; otherwise grows the pool by one slot at the tail. The
    /// growth path accepts any size, declared or not, and never creates
    /// a free-list entry. Allocation cannot fail.
    pub fn allocate(&mut self, size: usize) -> AllocOutcome {
        if let Some(address) = self.free_lists.take_exact(size) {
            self.pool[address] = Some(size);
            self.total_allocated += size;
            self.active_count += 1;
            return AllocOutcome::Reused { address, size };
        }

        let address = self.pool.len();
        self.pool.push(Some(size));
        self.total_allocated += size;
        self.active_count += 1;
        AllocOutcome::Grown { address, size }
    }

    /// Frees the block at `address`.
    ///
    /// Valid only for an in-bounds, occupied slot. The slot becomes
    /// empty; if the block's size has a declared class the address is
    /// re-enqueued at the back of that class's free list, otherwise the
    /// slot stays unreachable from any free list. An out-of-bounds or
    /// already-empty address fails without touching any state.
    pub fn free(&mut self, address: usize) -> Result<FreeOutcome, FreeError> {
        let size = match self.pool.get(address) {
            Some(&Some(size)) => size,
            _ => return Err(FreeError::InvalidAddress { address }),
        };

        self.pool[address] = None;
        self.total_allocated -= size;
        self.active_count -= 1;

        if self.free_lists.recycle(size, address) {
            Ok(FreeOutcome::Recycled { address, size })
        } else {
            Ok(FreeOutcome::Unrecycled { address, size })
        }
    }

    /// Whether the slot at `address` exists and is empty.
    ///
    /// A query, not a command: out-of-bounds addresses report `false`
    /// rather than erroring.
    pub fn is_block_free(&self, address: usize) -> bool {
        matches!(self.pool.get(address), Some(None))
    }

    /// Size of the occupied block at `address`, if any.
    pub fn lookup(&self, address: usize) -> Option<usize> {
        self.pool.get(address).copied().flatten()
    }

    /// Current pool length (one past the highest address).
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Number of currently occupied slots.
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Sum of the sizes of all occupied blocks.
    pub fn total_allocated(&self) -> usize {
        self.total_allocated
    }

    /// Number of free addresses queued for `size` (0 when undeclared).
    pub fn free_count(&self, size: usize) -> usize {
        self.free_lists.queued(size)
    }

    /// Declared size classes in ascending order.
    pub fn size_classes(&self) -> impl Iterator<Item = usize> + '_ {
        self.free_lists.classes()
    }

    /// Free addresses queued for `size`, oldest first.
    ///
    /// `None` when `size` was never declared as a class.
    pub fn free_addresses(&self, size: usize) -> Option<Vec<usize>> {
        self.free_lists.addresses(size).map(Iterator::collect)
    }
}
