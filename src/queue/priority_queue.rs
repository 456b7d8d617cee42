//! Min-priority queue ordered by a caller-supplied key
//!
//! The key is computed once, when an item is added, and stored next to it.
//! The heap only ever compares keys, so items need no ordering of their own.
//! Items with equal keys come out in no particular order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// Heap entry: an item and its precomputed key
struct Keyed<K, T> {
    key: K,
    item: T,
}

// BinaryHeap is a max-heap, so the ordering is reversed to pop the smallest
// key first. Incomparable keys (NaN) count as equal.
impl<K: PartialOrd, T> Ord for Keyed<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key.partial_cmp(&self.key).unwrap_or(Ordering::Equal)
    }
}

impl<K: PartialOrd, T> PartialOrd for Keyed<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd, T> PartialEq for Keyed<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd, T> Eq for Keyed<K, T> {}

/// Binary-heap priority queue returning the item with the smallest key first
///
/// ```
/// use annograph::queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new(|x: &i32| *x);
/// for x in [5, 3, 8, 1] {
///     queue.add(x);
/// }
/// assert_eq!(queue.poll(), Some(1));
/// assert_eq!(queue.peek(), Some(&3));
/// ```
pub struct PriorityQueue<T, K, F>
where
    F: Fn(&T) -> K,
{
    heap: BinaryHeap<Keyed<K, T>>,
    key_fn: F,
}

impl<T, K, F> PriorityQueue<T, K, F>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    pub fn new(key_fn: F) -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(),
            key_fn,
        }
    }

    pub fn with_capacity(capacity: usize, key_fn: F) -> Self {
        PriorityQueue {
            heap: BinaryHeap::with_capacity(capacity),
            key_fn,
        }
    }

    /// Insert an item, O(log n)
    pub fn add(&mut self, item: T) {
        let key = (self.key_fn)(&item);
        self.heap.push(Keyed { key, item });
    }

    /// Item with the smallest key, left in place
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|entry| &entry.item)
    }

    /// Remove and return the item with the smallest key
    pub fn poll(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Drain every item in ascending key order
    pub fn into_sorted_vec(self) -> Vec<T> {
        // Ascending under the reversed ordering means descending by key.
        let mut items: Vec<T> = self
            .heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| entry.item)
            .collect();
        items.reverse();
        items
    }
}

impl<T, K, F> Extend<T> for PriorityQueue<T, K, F>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T, K, F> fmt::Debug for PriorityQueue<T, K, F>
where
    F: Fn(&T) -> K,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .finish_non_exhaustive()
    }
}
