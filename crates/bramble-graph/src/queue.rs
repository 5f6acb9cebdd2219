//! Binary min-heap keyed by tentative distance.
//!
//! There is no decrease-key: Dijkstra pushes a vertex again whenever its
//! distance improves and skips the stale copies when they surface.

use crate::graph::VertexId;

/// A queued vertex and the distance it was queued with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueItem {
    pub vertex: VertexId,
    pub distance: f64,
}

impl QueueItem {
    pub fn new(vertex: VertexId, distance: f64) -> Self {
        Self { vertex, distance }
    }
}

/// A minimum priority queue backed by a growable binary heap.
///
/// The children of slot `i` are `2i + 1` and `2i + 2`. Ties between equal
/// distances come out in no particular order.
#[derive(Debug, Default, Clone)]
pub struct PriorityQueue {
    items: Vec<QueueItem>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue with room for `capacity` items before reallocating.
    ///
    /// The capacity is only a hint; pushing past it grows the heap.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the minimum item without removing it.
    pub fn peek(&self) -> Option<&QueueItem> {
        self.items.first()
    }

    /// Inserts an item.
    pub fn push(&mut self, item: QueueItem) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the item with the smallest distance.
    pub fn pop_min(&mut self) -> Option<QueueItem> {
        if self.items.is_empty() {
            return None;
        }

        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Moves the item at `idx` up while it is strictly smaller than its parent.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.items[idx].distance < self.items[parent].distance {
                self.items.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    /// Moves the item at `idx` down towards its smaller child.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;

            if left < len && self.items[left].distance < self.items[smallest].distance {
                smallest = left;
            }
            if right < len && self.items[right].distance < self.items[smallest].distance {
                smallest = right;
            }

            if smallest == idx {
                break;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drain(queue: &mut PriorityQueue) -> Vec<f64> {
        let mut out = Vec::new();
        while let Some(item) = queue.pop_min() {
            out.push(item.distance);
        }
        out
    }

    #[test]
    fn test_push_and_pop_min() {
        let mut pq = PriorityQueue::with_capacity(5);
        pq.push(QueueItem::new(0, 10.0));
        pq.push(QueueItem::new(1, 3.0));
        pq.push(QueueItem::new(2, 7.0));

        assert_eq!(pq.len(), 3);
        assert_eq!(pq.peek().map(|item| item.vertex), Some(1));

        assert_eq!(pq.pop_min(), Some(QueueItem::new(1, 3.0)));
        assert_eq!(pq.pop_min(), Some(QueueItem::new(2, 7.0)));
        assert_eq!(pq.pop_min(), Some(QueueItem::new(0, 10.0)));
        assert!(pq.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let mut pq = PriorityQueue::new();
        assert_eq!(pq.pop_min(), None);
        assert_eq!(pq.peek(), None);
    }

    #[test]
    fn test_grows_past_capacity() {
        let mut pq = PriorityQueue::with_capacity(2);
        for i in 0..10 {
            pq.push(QueueItem::new(i, (10 - i) as f64));
        }
        assert_eq!(pq.len(), 10);
        assert_eq!(pq.pop_min().map(|item| item.vertex), Some(9));
    }

    #[test]
    fn test_duplicate_vertices_allowed() {
        let mut pq = PriorityQueue::new();
        pq.push(QueueItem::new(4, 5.0));
        pq.push(QueueItem::new(4, 2.0));
        assert_eq!(pq.pop_min(), Some(QueueItem::new(4, 2.0)));
        assert_eq!(pq.pop_min(), Some(QueueItem::new(4, 5.0)));
    }

    proptest! {
        #[test]
        fn prop_pops_in_non_decreasing_order(distances in prop::collection::vec(0.0f64..1000.0, 0..200)) {
            let mut pq = PriorityQueue::new();
            for (vertex, distance) in distances.iter().enumerate() {
                pq.push(QueueItem::new(vertex, *distance));
            }

            let popped = drain(&mut pq);
            prop_assert_eq!(popped.len(), distances.len());
            for pair in popped.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }

        #[test]
        fn prop_interleaved_push_pop(ops in prop::collection::vec(prop::option::of(0u32..50), 0..200)) {
            let mut pq = PriorityQueue::new();
            let mut pushed = 0usize;
            let mut popped = 0usize;

            for (vertex, op) in ops.into_iter().enumerate() {
                match op {
                    Some(distance) => {
                        pq.push(QueueItem::new(vertex, distance as f64));
                        pushed += 1;
                    }
                    None => {
                        if let Some(item) = pq.pop_min() {
                            popped += 1;
                            if let Some(next) = pq.peek() {
                                prop_assert!(item.distance <= next.distance);
                            }
                        }
                    }
                }
            }

            prop_assert_eq!(pq.len(), pushed - popped);
        }
    }
}
