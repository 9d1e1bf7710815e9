//! The open set of the searches: a binary min-heap over Cells that can lower the key of any
//! Cell it contains without searching for it.
//!
//! The tree is stored twice: once in array order (`slots`) to find the next free leaf and the
//! last leaf, and once as explicit parent/left/right links between entries. Entries are fixed
//! tree positions; sifting moves the Cells between them and keeps each Cell's back-reference
//! to its current entry up to date.

use crate::Cost;

/// Index of a Cell in the Grid
pub(crate) type CellID = usize;
/// Index of an entry in the pool of the Heap
pub(crate) type EntryID = usize;

/// Access to the keys and back-references of the Cells stored in an [`IndexedHeap`].
pub(crate) trait HeapKeys {
    /// The key the Heap is ordered by
    fn key(&self, cell: CellID) -> Cost;
    /// Called whenever `cell` moves to another entry or leaves the Heap
    fn set_slot(&mut self, cell: CellID, entry: Option<EntryID>);
}

#[derive(Clone, Copy, Debug, Default)]
struct Entry {
    cell: CellID,
    parent: Option<EntryID>,
    left: Option<EntryID>,
    right: Option<EntryID>,
}

#[derive(Clone, Debug)]
pub(crate) struct IndexedHeap {
    /// every entry ever created, live or not
    pool: Vec<Entry>,
    /// live entries in array order, `slots[0]` is the root
    slots: Vec<EntryID>,
    /// recycled entries
    free: Vec<EntryID>,
    /// the pool never grows past this
    max_capacity: usize,
}

impl IndexedHeap {
    /// Creates a Heap with `capacity` pre-allocated entries that may grow up to `max_capacity`.
    pub fn new(capacity: usize, max_capacity: usize) -> IndexedHeap {
        let capacity = capacity.min(max_capacity);
        IndexedHeap {
            pool: vec![Entry::default(); capacity],
            slots: Vec::with_capacity(capacity),
            free: (0..capacity).rev().collect(),
            max_capacity,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The number of entries in the pool
    #[cfg(test)]
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn peek(&self) -> Option<CellID> {
        self.slots.first().map(|&root| self.pool[root].cell)
    }

    /// Adds `cell` to the Heap and returns the entry it ended up in.
    pub fn insert<K: HeapKeys + ?Sized>(&mut self, cell: CellID, keys: &mut K) -> EntryID {
        let index = self.slots.len();
        let parent = if index == 0 {
            None
        } else {
            Some(self.slots[(index - 1) / 2])
        };
        let id = self.acquire(cell, parent);
        if let Some(parent) = parent {
            let parent = &mut self.pool[parent];
            if parent.left.is_none() {
                parent.left = Some(id);
            } else {
                parent.right = Some(id);
            }
        }
        self.slots.push(id);
        self.sift_up(id, keys)
    }

    /// Restores the Heap order after the key of the Cell in `entry` changed.
    ///
    /// Only one direction is checked: if the key is smaller than the parent's it moves up,
    /// otherwise down.
    #[track_caller]
    pub fn modify<K: HeapKeys + ?Sized>(&mut self, entry: EntryID, keys: &mut K) -> EntryID {
        let key = keys.key(self.pool[entry].cell);
        match self.pool[entry].parent {
            Some(parent) if keys.key(self.pool[parent].cell) > key => self.sift_up(entry, keys),
            _ => self.sift_down(entry, keys),
        }
    }

    /// Removes the Cell with the smallest key.
    pub fn pop_min<K: HeapKeys + ?Sized>(&mut self, keys: &mut K) -> Option<CellID> {
        let root = *self.slots.first()?;
        let min = self.pool[root].cell;
        keys.set_slot(min, None);

        let last = self.slots.pop().expect("Heap has a root but no last entry");
        if last != root {
            let parent = self.pool[last]
                .parent
                .expect("non-root entry of the Heap has no parent");
            let parent = &mut self.pool[parent];
            if parent.left == Some(last) {
                parent.left = None;
            } else {
                parent.right = None;
            }
            self.pool[root].cell = self.pool[last].cell;
            self.sift_down(root, keys);
        }
        self.release(last);
        Some(min)
    }

    /// Removes all Cells. Only touches the live entries, not the whole pool.
    pub fn reset(&mut self) {
        while let Some(id) = self.slots.pop() {
            self.release(id);
        }
    }

    fn acquire(&mut self, cell: CellID, parent: Option<EntryID>) -> EntryID {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                assert!(
                    self.pool.len() < self.max_capacity,
                    "Heap pool exhausted: more than {} entries",
                    self.max_capacity
                );
                debug!("growing Heap pool to {} entries", self.pool.len() + 1);
                self.pool.push(Entry::default());
                self.pool.len() - 1
            }
        };
        self.pool[id] = Entry {
            cell,
            parent,
            left: None,
            right: None,
        };
        id
    }

    fn release(&mut self, id: EntryID) {
        self.pool[id] = Entry::default();
        self.free.push(id);
    }

    fn sift_up<K: HeapKeys + ?Sized>(&mut self, mut node: EntryID, keys: &mut K) -> EntryID {
        let cell = self.pool[node].cell;
        let key = keys.key(cell);

        while let Some(parent) = self.pool[node].parent {
            let parent_cell = self.pool[parent].cell;
            if key >= keys.key(parent_cell) {
                break;
            }
            self.pool[node].cell = parent_cell;
            keys.set_slot(parent_cell, Some(node));
            node = parent;
        }
        self.pool[node].cell = cell;
        keys.set_slot(cell, Some(node));
        node
    }

    fn sift_down<K: HeapKeys + ?Sized>(&mut self, mut node: EntryID, keys: &mut K) -> EntryID {
        let cell = self.pool[node].cell;
        let key = keys.key(cell);

        loop {
            let Entry { left, right, .. } = self.pool[node];
            let child = match (left, right) {
                (Some(left), Some(right)) => {
                    if keys.key(self.pool[right].cell) < keys.key(self.pool[left].cell) {
                        right
                    } else {
                        left
                    }
                }
                (Some(left), None) => left,
                _ => break,
            };
            let child_cell = self.pool[child].cell;
            if keys.key(child_cell) >= key {
                break;
            }
            self.pool[node].cell = child_cell;
            keys.set_slot(child_cell, Some(node));
            node = child;
        }
        self.pool[node].cell = cell;
        keys.set_slot(cell, Some(node));
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (key, slot) per cell
    struct Keys(Vec<(Cost, Option<EntryID>)>);

    impl HeapKeys for Keys {
        fn key(&self, cell: CellID) -> Cost {
            self.0[cell].0
        }
        fn set_slot(&mut self, cell: CellID, entry: Option<EntryID>) {
            self.0[cell].1 = entry;
        }
    }

    impl IndexedHeap {
        /// panics if the Heap order or any link is broken
        fn check(&self, keys: &Keys) {
            for (index, &id) in self.slots.iter().enumerate() {
                let entry = self.pool[id];
                assert_eq!(keys.0[entry.cell].1, Some(id), "stale back-reference");
                let expected_parent = if index == 0 {
                    None
                } else {
                    Some(self.slots[(index - 1) / 2])
                };
                assert_eq!(entry.parent, expected_parent);
                for (child_index, child) in [(2 * index + 1, entry.left), (2 * index + 2, entry.right)] {
                    assert_eq!(self.slots.get(child_index).copied(), child);
                    if let Some(child) = child {
                        assert!(keys.key(entry.cell) <= keys.key(self.pool[child].cell));
                    }
                }
            }
        }
    }

    fn drain(heap: &mut IndexedHeap, keys: &mut Keys) -> Vec<Cost> {
        let mut ret = vec![];
        while let Some(cell) = heap.pop_min(keys) {
            assert_eq!(keys.0[cell].1, None);
            ret.push(keys.key(cell));
            heap.check(keys);
        }
        ret
    }

    #[test]
    fn pops_in_order() {
        let values = [42, 7, 19, 3, 3, 88, 0, 56, 21, 7, 13];
        let mut keys = Keys(values.iter().map(|&v| (v, None)).collect());
        let mut heap = IndexedHeap::new(4, values.len());

        for cell in 0..values.len() {
            heap.insert(cell, &mut keys);
            heap.check(&keys);
        }
        assert_eq!(heap.len(), values.len());
        assert_eq!(heap.peek().map(|cell| keys.key(cell)), Some(0));

        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        assert_eq!(drain(&mut heap, &mut keys), sorted);
        assert!(heap.is_empty());
        assert!(heap.pop_min(&mut keys).is_none());
    }

    #[test]
    fn decrease_key() {
        let values = [50, 40, 30, 20, 10, 60, 70];
        let mut keys = Keys(values.iter().map(|&v| (v, None)).collect());
        let mut heap = IndexedHeap::new(8, 8);
        for cell in 0..values.len() {
            heap.insert(cell, &mut keys);
        }

        // the last leaf becomes the smallest
        keys.0[6].0 = 1;
        let entry = keys.0[6].1.unwrap();
        heap.modify(entry, &mut keys);
        heap.check(&keys);
        assert_eq!(heap.peek(), Some(6));

        // an inner entry changes without breaking the order
        keys.0[0].0 = 25;
        let entry = keys.0[0].1.unwrap();
        heap.modify(entry, &mut keys);
        heap.check(&keys);

        assert_eq!(drain(&mut heap, &mut keys), vec![1, 10, 20, 25, 30, 40, 60]);
    }

    #[test]
    fn increase_key_moves_down() {
        let values = [1, 2, 3, 4, 5];
        let mut keys = Keys(values.iter().map(|&v| (v, None)).collect());
        let mut heap = IndexedHeap::new(5, 5);
        for cell in 0..values.len() {
            heap.insert(cell, &mut keys);
        }
        keys.0[0].0 = 9;
        let entry = keys.0[0].1.unwrap();
        heap.modify(entry, &mut keys);
        heap.check(&keys);
        assert_eq!(drain(&mut heap, &mut keys), vec![2, 3, 4, 5, 9]);
    }

    #[test]
    fn reset_recycles_entries() {
        let mut keys = Keys((0..6).map(|v| (v, None)).collect());
        let mut heap = IndexedHeap::new(3, 6);

        for cell in 0..6 {
            heap.insert(cell, &mut keys);
        }
        assert_eq!(heap.pool_size(), 6);

        heap.reset();
        assert!(heap.is_empty());
        assert!(heap.peek().is_none());

        for cell in (0..6).rev() {
            heap.insert(cell, &mut keys);
            heap.check(&keys);
        }
        // everything was recycled
        assert_eq!(heap.pool_size(), 6);
        assert_eq!(drain(&mut heap, &mut keys), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn single_entry() {
        let mut keys = Keys(vec![(5, None)]);
        let mut heap = IndexedHeap::new(1, 1);
        let entry = heap.insert(0, &mut keys);
        assert_eq!(keys.0[0].1, Some(entry));
        assert_eq!(heap.pop_min(&mut keys), Some(0));
        assert!(heap.is_empty());
        assert_eq!(keys.0[0].1, None);
    }

    #[test]
    #[should_panic(expected = "Heap pool exhausted")]
    fn pool_is_bounded() {
        let mut keys = Keys(vec![(0, None); 3]);
        let mut heap = IndexedHeap::new(1, 2);
        for cell in 0..3 {
            heap.insert(cell, &mut keys);
        }
    }
}
