use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Pop-order discipline of a search fringe.
///
/// `priority` is ignored by the structural frontiers ([`Stack`], [`Queue`]).
pub trait Frontier<T> {
    fn push(&mut self, item: T, priority: f64);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// LIFO frontier used by depth-first search.
#[derive(Debug)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Frontier<T> for Stack<T> {
    fn push(&mut self, item: T, _priority: f64) {
        self.items.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// FIFO frontier used by breadth-first search.
#[derive(Debug)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Frontier<T> for Queue<T> {
    fn push(&mut self, item: T, _priority: f64) {
        self.items.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug)]
struct HeapItem<T> {
    priority: f64,
    order: u64,
    item: T,
}

impl<T> PartialEq for HeapItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for HeapItem<T> {}

impl<T> PartialOrd for HeapItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for HeapItem<T> {
    // BinaryHeap is a max-heap: lowest key, then earliest insertion, sorts greatest.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Min-key frontier used by uniform-cost and A* search.
///
/// Entries with equal keys pop in insertion order.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<HeapItem<T>>,
    order: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            order: 0,
        }
    }
}

impl<T> Frontier<T> for PriorityQueue<T> {
    fn push(&mut self, item: T, priority: f64) {
        self.order += 1;
        self.heap.push(HeapItem {
            priority,
            order: self.order,
            item,
        });
    }

    fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
