//! Recently closed tabs, most recent first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::DEFAULT_CLOSED_TAB_CAPACITY;
use crate::tabs::Tab;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTabEntry {
    pub tab: Tab,
    pub closed_at: i64,
    /// Position the tab held in the tab strip when it was closed.
    pub index: usize,
}

/// Bounded LIFO. Pushing past capacity drops the oldest entry.
#[derive(Debug, Clone)]
pub struct ClosedTabStack {
    entries: VecDeque<ClosedTabEntry>,
    capacity: usize,
}

impl Default for ClosedTabStack {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSED_TAB_CAPACITY)
    }
}

impl ClosedTabStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn from_entries(entries: Vec<ClosedTabEntry>, capacity: usize) -> Self {
        let mut stack = Self::new(capacity);
        stack.entries = entries.into_iter().take(stack.capacity).collect();
        stack
    }

    pub fn push(&mut self, tab: Tab, index: usize, closed_at: i64) {
        self.entries.push_front(ClosedTabEntry {
            tab,
            closed_at,
            index,
        });
        self.entries.truncate(self.capacity);
    }

    pub fn pop(&mut self) -> Option<ClosedTabEntry> {
        self.entries.pop_front()
    }

    pub fn peek(&self) -> Option<&ClosedTabEntry> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &ClosedTabEntry> {
        self.entries.iter()
    }

    /// Snapshot in persisted order.
    pub fn to_vec(&self) -> Vec<ClosedTabEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(url: &str) -> Tab {
        Tab::new(url, url, 0)
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = ClosedTabStack::default();
        stack.push(tab("https://a.com"), 0, 1);
        stack.push(tab("https://b.com"), 1, 2);

        assert_eq!(stack.peek().unwrap().tab.url, "https://b.com");
        assert_eq!(stack.pop().unwrap().tab.url, "https://b.com");
        assert_eq!(stack.pop().unwrap().index, 0);
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut stack = ClosedTabStack::default();
        for i in 0..26 {
            stack.push(tab(&format!("https://t{}.com", i)), i, i as i64);
        }
        assert_eq!(stack.len(), 25);
        assert_eq!(stack.peek().unwrap().tab.url, "https://t25.com");
        assert!(stack.iter().all(|entry| entry.tab.url != "https://t0.com"));
    }

    #[test]
    fn test_clear() {
        let mut stack = ClosedTabStack::default();
        stack.push(tab("https://a.com"), 0, 1);
        stack.clear();
        assert!(stack.is_empty());
    }
}
