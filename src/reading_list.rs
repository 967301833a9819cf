use serde::{Deserialize, Serialize};

use crate::url_utils::generate_id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListItem {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub added_at: i64,
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_content: Option<String>,
}

/// Saved-for-later pages, newest first, at most one item per url.
#[derive(Debug, Clone, Default)]
pub struct ReadingList {
    items: Vec<ReadingListItem>,
}

impl ReadingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ReadingListItem>) -> Self {
        let mut list = Self::new();
        for item in items {
            if !list.items.iter().any(|existing| existing.url == item.url) {
                list.items.push(item);
            }
        }
        list
    }

    pub fn items(&self) -> &[ReadingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Save `url`. An item already saved under the same url is returned
    /// unchanged.
    pub fn add(
        &mut self,
        url: &str,
        title: &str,
        description: Option<&str>,
        added_at: i64,
    ) -> ReadingListItem {
        if let Some(existing) = self.items.iter().find(|item| item.url == url) {
            return existing.clone();
        }

        let item = ReadingListItem {
            id: generate_id(),
            url: url.to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            added_at,
            is_read: false,
            cached_content: None,
        };
        self.items.insert(0, item.clone());
        item
    }

    pub fn find(&self, id: &str) -> Option<&ReadingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Flip the read flag; returns the new value.
    pub fn toggle_read(&mut self, id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.is_read = !item.is_read;
        Some(item.is_read)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn cache_content(&mut self, id: &str, content: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.cached_content = Some(content.to_string());
                true
            }
            None => false,
        }
    }

    pub fn unread(&self) -> Vec<&ReadingListItem> {
        self.items.iter().filter(|item| !item.is_read).collect()
    }

    /// Drop every item already read; returns how many went.
    pub fn clear_read(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_read);
        before - self.items.len()
    }
}
