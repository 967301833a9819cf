//! Visit history log.
//!
//! Newest entries sit at the front. The log is bounded; recording past the
//! capacity evicts from the tail, so the oldest visits go first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::url_utils::{generate_id, is_internal_url};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub visited_at: i64,
}

/// Time window for [`HistoryLog::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearRange {
    Hour,
    Day,
    Week,
    Month,
    All,
}

impl ClearRange {
    /// Window length in milliseconds, `None` for [`ClearRange::All`].
    pub fn window_ms(&self) -> Option<i64> {
        match self {
            ClearRange::Hour => Some(HOUR_MS),
            ClearRange::Day => Some(DAY_MS),
            ClearRange::Week => Some(WEEK_MS),
            ClearRange::Month => Some(MONTH_MS),
            ClearRange::All => None,
        }
    }
}

impl FromStr for ClearRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" => Ok(ClearRange::Hour),
            "day" => Ok(ClearRange::Day),
            "week" => Ok(ClearRange::Week),
            "month" => Ok(ClearRange::Month),
            "all" => Ok(ClearRange::All),
            other => Err(format!(
                "invalid range '{}': use hour, day, week, month or all",
                other
            )),
        }
    }
}

impl fmt::Display for ClearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClearRange::Hour => "hour",
            ClearRange::Day => "day",
            ClearRange::Week => "week",
            ClearRange::Month => "month",
            ClearRange::All => "all",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild from persisted entries, dropping anything past capacity.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
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

    /// Record a visit at `visited_at`.
    ///
    /// Internal pages are not recorded; the most recent entry is returned
    /// instead, if there is one.
    pub fn record(&mut self, url: &str, title: &str, visited_at: i64) -> Option<HistoryEntry> {
        if is_internal_url(url) {
            return self.entries.first().cloned();
        }

        let entry = HistoryEntry {
            id: generate_id(),
            url: url.to_string(),
            title: title.to_string(),
            visited_at,
        };
        self.entries.insert(0, entry.clone());

        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            debug!("History over capacity, evicted {} oldest entries", evicted);
        }

        Some(entry)
    }

    /// Case-insensitive substring match over title and url.
    pub fn search(&self, query: &str) -> Vec<HistoryEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.clone();
        }

        self.entries
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle)
                    || entry.url.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Drop entries visited before `now - range`; `All` drops everything.
    /// Returns how many entries were removed.
    pub fn clear(&mut self, range: ClearRange, now: i64) -> usize {
        let before = self.entries.len();
        match range.window_ms() {
            None => self.entries.clear(),
            Some(window) => {
                let cutoff = now - window;
                self.entries.retain(|entry| entry.visited_at >= cutoff);
            }
        }
        before - self.entries.len()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Replace the placeholder title on the newest entry once the page
    /// reports its real one. Only applies if that entry is for `url`.
    pub fn retitle_latest(&mut self, url: &str, title: &str) -> bool {
        match self.entries.first_mut() {
            Some(entry) if entry.url == url => {
                entry.title = title.to_string();
                true
            }
            _ => false,
        }
    }

    /// The `limit` most recent entries.
    pub fn recent(&self, limit: usize) -> &[HistoryEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_log_never_exceeds_capacity(
            capacity in 1usize..50,
            visits in 0usize..200,
        ) {
            let mut log = HistoryLog::new(capacity);
            for i in 0..visits {
                log.record(&format!("https://s{}.com", i), "", i as i64);
            }
            prop_assert_eq!(log.len(), visits.min(capacity));
            if visits > 0 {
                let newest = format!("https://s{}.com", visits - 1);
                prop_assert_eq!(&log.entries()[0].url, &newest);
            }
        }
    }
}
