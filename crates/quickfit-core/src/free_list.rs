//! Per-size-class free lists.
//!
//! Each declared block size owns a FIFO queue of reusable addresses.
//! The table is keyed by size and iterates in ascending numeric order,
//! so the exact-fit scan is deterministic regardless of the order the
//! classes were declared in.

use std::collections::{BTreeMap, VecDeque};

/// Free-list table: one address queue per declared size class.
#[derive(Debug, Clone, Default)]
pub struct FreeLists {
    lists: BTreeMap<usize, VecDeque<usize>>,
}

impl FreeLists {
    /// Creates an empty table with no declared classes.
    pub fn new() -> Self {
        Self {
            lists: BTreeMap::new(),
        }
    }

    /// Declares a size class with an empty queue.
    ///
    /// Returns `false` if the class already exists; the existing queue
    /// is left untouched.
    pub fn declare(&mut self, size: usize) -> bool {
        if self.lists.contains_key(&size) {
            return false;
        }
        self.lists.insert(size, VecDeque::new());
        true
    }

    /// Whether `size` is a declared class.
    pub fn has_class(&self, size: usize) -> bool {
        self.lists.contains_key(&size)
    }

    /// Pops the oldest queued address of exactly `size`.
    ///
    /// Quick-fit never falls back to a larger class, so the ascending
    /// scan over classes reduces to a direct lookup on the ordered map.
    /// Returns `None` when the class is undeclared or its queue is empty.
    pub fn take_exact(&mut self, size: usize) -> Option<usize> {
        self.lists.get_mut(&size)?.pop_front()
    }

    /// Appends `address` to the back of the queue for `size`.
    ///
    /// Returns `false` (and drops the address) when `size` has no
    /// declared class.
    pub fn recycle(&mut self, size: usize, address: usize) -> bool {
        match self.lists.get_mut(&size) {
            Some(queue) => {
                queue.push_back(address);
                true
            }
            None => false,
        }
    }

    /// Number of addresses queued for `size` (0 when undeclared).
    pub fn queued(&self, size: usize) -> usize {
        self.lists.get(&size).map_or(0, VecDeque::len)
    }

    /// Declared classes in ascending order.
    pub fn classes(&self) -> impl Iterator<Item = usize> + '_ {
        self.lists.keys().copied()
    }

    /// Queued addresses for `size`, oldest first. `None` when undeclared.
    pub fn addresses(&self, size: usize) -> Option<impl Iterator<Item = usize> + '_> {
        self.lists.get(&size).map(|queue| queue.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_is_idempotent() {
        let mut lists = FreeLists::new();
        assert!(lists.declare(16));
        lists.recycle(16, 0);
        // Second declaration must not clobber the queued address.
        assert!(!lists.declare(16));
        assert_eq!(lists.queued(16), 1);
    }

    #[test]
    fn test_take_exact_is_fifo() {
        let mut lists = FreeLists::new();
        lists.declare(8);
        lists.recycle(8, 3);
        lists.recycle(8, 7);
        lists.recycle(8, 1);
        assert_eq!(lists.take_exact(8), Some(3));
        assert_eq!(lists.take_exact(8), Some(7));
        assert_eq!(lists.take_exact(8), Some(1));
        assert_eq!(lists.take_exact(8), None);
    }

    #[test]
    fn test_take_exact_never_matches_other_classes() {
        let mut lists = FreeLists::new();
        lists.declare(8);
        lists.declare(32);
        lists.recycle(32, 0);
        // 16 is undeclared and 8 is empty; 32 must not be raided.
        assert_eq!(lists.take_exact(16), None);
        assert_eq!(lists.take_exact(8), None);
        assert_eq!(lists.queued(32), 1);
    }

    #[test]
    fn test_recycle_into_undeclared_class_is_dropped() {
        let mut lists = FreeLists::new();
        lists.declare(8);
        assert!(!lists.recycle(24, 5));
        assert_eq!(lists.queued(24), 0);
        assert!(!lists.has_class(24));
    }

    #[test]
    fn test_classes_iterate_ascending() {
        let mut lists = FreeLists::new();
        for size in [64, 8, 32, 16] {
            lists.declare(size);
        }
        let classes: Vec<usize> = lists.classes().collect();
        assert_eq!(classes, vec![8, 16, 32, 64]);
    }
}
