//! Tab record and its private back/forward history.

use serde::{Deserialize, Serialize};

use crate::url_utils::{favicon_url, generate_id, is_internal_url};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_muted: bool,
    #[serde(default)]
    pub is_loading: bool,
    pub last_accessed: i64,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default)]
    pub history_index: usize,
}

impl Tab {
    pub fn new(url: &str, title: &str, last_accessed: i64) -> Self {
        Self {
            id: generate_id(),
            url: url.to_string(),
            title: title.to_string(),
            favicon: favicon_url(url),
            is_pinned: false,
            is_muted: false,
            is_loading: false,
            last_accessed,
            group_id: None,
            history: vec![url.to_string()],
            history_index: 0,
        }
    }

    /// Load `url` as a new page: forward entries past the current index are
    /// discarded before it is appended.
    pub fn push_page(&mut self, url: &str, title: &str) {
        self.history.truncate(self.history_index + 1);
        self.history.push(url.to_string());
        self.history_index = self.history.len() - 1;
        self.show(url, title);
    }

    fn show(&mut self, url: &str, title: &str) {
        self.url = url.to_string();
        self.title = title.to_string();
        self.favicon = favicon_url(url);
        self.is_loading = !is_internal_url(url);
    }

    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Step back one entry. `title_for` supplies the placeholder title.
    pub fn go_back(&mut self, title_for: impl Fn(&str) -> String) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.history_index -= 1;
        let url = self.history[self.history_index].clone();
        self.show(&url, &title_for(&url));
        true
    }

    pub fn go_forward(&mut self, title_for: impl Fn(&str) -> String) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.history_index += 1;
        let url = self.history[self.history_index].clone();
        self.show(&url, &title_for(&url));
        true
    }

    /// Copy with a fresh id, unpinned, sharing url and history.
    pub fn duplicate(&self, last_accessed: i64) -> Self {
        Self {
            id: generate_id(),
            is_pinned: false,
            is_loading: false,
            last_accessed,
            ..self.clone()
        }
    }

    /// Restore the history invariants on a record read from storage.
    /// Returns `true` if anything had to change.
    pub fn repair(&mut self) -> bool {
        let mut changed = false;

        if self.history.is_empty() {
            self.history.push(self.url.clone());
            self.history_index = 0;
            changed = true;
        }
        if self.history_index >= self.history.len() {
            self.history_index = self.history.len() - 1;
            changed = true;
        }
        if self.url != self.history[self.history_index] {
            self.url = self.history[self.history_index].clone();
            changed = true;
        }
        if self.is_loading {
            // nothing is in flight after a restart
            self.is_loading = false;
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(url: &str) -> String {
        url.to_string()
    }

    fn tab_with_history(urls: &[&str], index: usize) -> Tab {
        let mut tab = Tab::new(urls[0], "", 0);
        for url in &urls[1..] {
            tab.push_page(url, "");
        }
        while tab.history_index > index {
            tab.go_back(title);
        }
        tab
    }

    #[test]
    fn test_push_truncates_forward_history() {
        let mut tab = tab_with_history(&["A", "B", "C"], 1);
        assert_eq!(tab.url, "B");

        tab.push_page("D", "D");
        assert_eq!(tab.history, vec!["A", "B", "D"]);
        assert_eq!(tab.history_index, 2);
        assert!(!tab.can_go_forward());
    }

    #[test]
    fn test_back_and_forward_bounds() {
        let mut tab = tab_with_history(&["A", "B"], 1);
        assert!(!tab.go_forward(title));
        assert!(tab.go_back(title));
        assert_eq!(tab.url, "A");
        assert!(!tab.go_back(title));
        assert_eq!(tab.history_index, 0);
        assert!(tab.go_forward(title));
        assert_eq!(tab.url, "B");
    }

    #[test]
    fn test_duplicate_gets_new_id_unpinned() {
        let mut tab = tab_with_history(&["A", "B"], 1);
        tab.is_pinned = true;

        let copy = tab.duplicate(5);
        assert_ne!(copy.id, tab.id);
        assert!(!copy.is_pinned);
        assert_eq!(copy.history, tab.history);
        assert_eq!(copy.history_index, 1);
    }

    #[test]
    fn test_repair_clamps_index() {
        let mut tab = Tab::new("https://a.com", "A", 0);
        tab.history = vec!["https://a.com".into(), "https://b.com".into()];
        tab.history_index = 7;
        assert!(tab.repair());
        assert_eq!(tab.history_index, 1);
        assert_eq!(tab.url, "https://b.com");

        let mut empty = Tab::new("https://c.com", "C", 0);
        empty.history.clear();
        assert!(empty.repair());
        assert_eq!(empty.history, vec!["https://c.com"]);
        assert!(!empty.repair());
    }

    #[test]
    fn test_json_field_names() {
        let tab = Tab::new("about:start", "Start Page", 42);
        let json = serde_json::to_value(&tab).unwrap();
        assert_eq!(json["lastAccessed"], 42);
        assert_eq!(json["historyIndex"], 0);
        assert!(json["groupId"].is_null());
        assert_eq!(json["isPinned"], false);
    }
}
