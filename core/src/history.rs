//! Bounded FIFO record of drawn values.

use std::collections::VecDeque;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Ring buffer of reals with an explicit capacity.
///
/// RULE: `len() <= capacity()` after every mutation. The oldest value is
/// evicted first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    values:   VecDeque<f64>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Append one value, evicting from the front while full.
    /// A zero-capacity buffer records nothing.
    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        while self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Push each value in order.
    pub fn extend<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        for value in values {
            self.push(value);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, trimming the oldest overflow immediately.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.values.len() > capacity {
            self.values.pop_front();
        }
    }

    /// Independent copy of the contents, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.back().copied()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self { Self::new() }
}
