//! Indexed binary min-heap with decrease-key.
//!
//! Items are dense indices `0..n`. The queue owns each item's priority and
//! tracks where the item sits in the heap, so lowering a priority costs
//! O(log n). Equal priorities are ordered by item index.

#[derive(Debug)]
pub(crate) struct IndexedMinQueue {
    heap: Vec<usize>,
    position: Vec<Option<usize>>,
    priority: Vec<i32>,
}

impl IndexedMinQueue {
    /// Queue holding every item `i` with priority `priorities[i]`.
    pub(crate) fn with_priorities(priorities: Vec<i32>) -> Self {
        let n = priorities.len();
        let mut queue = Self {
            heap: (0..n).collect(),
            position: (0..n).map(Some).collect(),
            priority: priorities,
        };
        for i in (0..n / 2).rev() {
            queue.sift_down(i);
        }
        queue
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Current priority of `item`, or `None` once it has been popped.
    pub(crate) fn priority(&self, item: usize) -> Option<i32> {
        self.position
            .get(item)
            .copied()
            .flatten()
            .map(|_| self.priority[item])
    }

    /// Remove the item with the lowest priority.
    pub(crate) fn pop(&mut self) -> Option<(usize, i32)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let item = self.heap.pop()?;
        self.position[item] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((item, self.priority[item]))
    }

    /// Lower the priority of a queued item. Returns false if the item is not
    /// queued or `priority` is not lower than its current one.
    pub(crate) fn decrease_priority(&mut self, item: usize, priority: i32) -> bool {
        let Some(pos) = self.position.get(item).copied().flatten() else {
            return false;
        };
        if priority >= self.priority[item] {
            return false;
        }
        self.priority[item] = priority;
        self.sift_up(pos);
        true
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (x, y) = (self.heap[a], self.heap[b]);
        (self.priority[x], x) < (self.priority[y], y)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}
