//! Bounded binary min-heap keyed by an `f32` priority.
//!
//! One type serves two queues: the search frontier (keyed by `TileIndex`) and
//! the repath scheduler (keyed by `AgentId`).  Both have a bound that is
//! known before the match starts, so the heap never grows past its capacity;
//! a push into a full heap is refused and the existing contents are left as
//! they were.
//!
//! Entries are compared by priority only (lowest first), using
//! `f32::total_cmp` so that NaN cannot break the ordering.  Lookup by key is
//! a linear scan, which is cheap at the sizes involved and avoids a side
//! index that would have to be kept in sync on every swap.

use std::cmp::Ordering;

use thiserror::Error;

/// One `(key, priority)` pair held in a [`MinHeap`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PriorityEntry<K> {
    pub key:      K,
    pub priority: f32,
}

impl<K> PriorityEntry<K> {
    #[inline]
    pub fn new(key: K, priority: f32) -> Self {
        Self { key, priority }
    }

    #[inline]
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.priority.total_cmp(&other.priority)
    }
}

/// Returned by [`MinHeap::push`] when the heap is already at capacity.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
#[error("priority queue is full (capacity {capacity})")]
pub struct HeapFull {
    pub capacity: usize,
}

/// Array-backed binary min-heap with a fixed maximum size.
#[derive(Clone, Debug)]
pub struct MinHeap<K> {
    slots:    Vec<PriorityEntry<K>>,
    capacity: usize,
}

impl<K: Copy + PartialEq> MinHeap<K> {
    /// An empty heap that will hold at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), capacity }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Remove every entry, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Insert an entry.  O(log n).
    pub fn push(&mut self, key: K, priority: f32) -> Result<(), HeapFull> {
        if self.is_full() {
            return Err(HeapFull { capacity: self.capacity });
        }
        self.slots.push(PriorityEntry::new(key, priority));
        self.sift_up(self.slots.len() - 1);
        Ok(())
    }

    /// Remove and return the entry with the lowest priority.  O(log n).
    pub fn pop(&mut self) -> Option<PriorityEntry<K>> {
        if self.slots.is_empty() {
            return None;
        }
        let top = self.slots.swap_remove(0);
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// The entry `pop` would return, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&PriorityEntry<K>> {
        self.slots.first()
    }

    /// Slot index of the entry whose key equals `key`.  O(n).
    pub fn index_of(&self, key: K) -> Option<usize> {
        self.slots.iter().position(|e| e.key == key)
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.index_of(key).is_some()
    }

    /// The entry at slot `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&PriorityEntry<K>> {
        self.slots.get(idx)
    }

    /// Overwrite slot `idx` and restore heap order.
    ///
    /// Callers normally only lower a priority, but raising one is handled too
    /// (the entry sifts down instead of up).  Returns `false` if `idx` is out
    /// of range.
    pub fn update_at(&mut self, idx: usize, key: K, priority: f32) -> bool {
        debug_assert!(idx < self.slots.len(), "update_at({idx}) on heap of len {}", self.slots.len());
        let Some(slot) = self.slots.get_mut(idx) else {
            return false;
        };
        let old = slot.priority;
        *slot = PriorityEntry::new(key, priority);
        match priority.total_cmp(&old) {
            Ordering::Less    => self.sift_up(idx),
            Ordering::Greater => self.sift_down(idx),
            Ordering::Equal   => {}
        }
        true
    }

    /// Remove the entry at slot `idx` regardless of its priority.
    ///
    /// The last entry is moved into the hole and sifted whichever way its
    /// priority requires, so exactly the requested entry leaves the heap.
    pub fn delete_at(&mut self, idx: usize) -> Option<PriorityEntry<K>> {
        if idx >= self.slots.len() {
            return None;
        }
        let removed = self.slots.swap_remove(idx);
        if idx < self.slots.len() {
            match self.slots[idx].cmp_priority(&removed) {
                Ordering::Less    => self.sift_up(idx),
                Ordering::Greater => self.sift_down(idx),
                Ordering::Equal   => {}
            }
        }
        Some(removed)
    }

    /// Iterate entries in storage (not priority) order.
    pub fn iter(&self) -> impl Iterator<Item = &PriorityEntry<K>> + '_ {
        self.slots.iter()
    }

    /// `true` if every parent's priority is ≤ both children's.
    pub fn is_valid_heap(&self) -> bool {
        (1..self.slots.len()).all(|i| {
            let parent = (i - 1) / 2;
            self.slots[parent].cmp_priority(&self.slots[i]) != Ordering::Greater
        })
    }

    // ── Sifting ───────────────────────────────────────────────────────────

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.slots[idx].cmp_priority(&self.slots[parent]) != Ordering::Less {
                break;
            }
            self.slots.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.slots.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < len && self.slots[left].cmp_priority(&self.slots[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && self.slots[right].cmp_priority(&self.slots[smallest]) == Ordering::Less {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.slots.swap(idx, smallest);
            idx = smallest;
        }
    }
}
