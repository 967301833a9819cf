use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub block_popups: bool,
    /// While set, navigation leaves no trace in history or favorites.
    pub private_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiSettings {
    pub show_bookmarks_bar: bool,
    pub show_start_page: bool,
    pub last_sidebar_section: String,
    pub home_page: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_bookmarks_bar: true,
            show_start_page: true,
            last_sidebar_section: "bookmarks".to_string(),
            home_page: crate::config::START_PAGE_URL.to_string(),
        }
    }
}
