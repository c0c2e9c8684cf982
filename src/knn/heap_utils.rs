//! This module contains a bounded binary heap that keeps the k best neighbors seen so far.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

/// A training row selected as a neighbor of a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the row in the training dataset.
    pub index: usize,
    pub distance: f64,
}

/// Heap entry ordered by `(distance, index)`.
///
/// `OrderedFloat` gives distances a total order (NaN sorts after every other
/// value) and the index breaks exact distance ties in favour of the earlier
/// training row.
#[derive(Debug)]
struct HeapElement {
    distance: OrderedFloat<f64>,
    index: usize,
}

impl PartialEq for HeapElement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapElement {}

impl PartialOrd for HeapElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the worst kept neighbor sits at the top.
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Keeps the `capacity` smallest neighbors under the `(distance, index)` order.
#[derive(Debug)]
pub struct KBestNeighbors {
    capacity: usize,
    heap: BinaryHeap<HeapElement>,
}

impl KBestNeighbors {
    pub fn new(capacity: usize) -> Self {
        KBestNeighbors {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
        }
    }

    pub fn add(&mut self, distance: f64, index: usize) {
        if self.capacity == 0 {
            return;
        }
        let item = HeapElement { distance: OrderedFloat(distance), index };
        if self.heap.len() < self.capacity {
            self.heap.push(item);
        } else if let Some(mut worst) = self.heap.peek_mut() {
            if item < *worst {
                *worst = item;
            }
        }
    }

    /// Distance of the worst kept neighbor once the heap is full.
    pub fn current_farthest_distance(&self) -> Option<f64> {
        if self.heap.len() == self.capacity {
            self.heap.peek().map(|elem| elem.distance.0)
        } else {
            None
        }
    }

    /// Consumes the heap, returning neighbors nearest first.
    pub fn into_sorted_neighbors(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|elem| Neighbor { index: elem.index, distance: elem.distance.0 })
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
