use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;
pub const DEFAULT_CLOSED_TAB_CAPACITY: usize = 25;
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";
pub const START_PAGE_URL: &str = "about:start";

/// Session tunables.
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum history entries kept
    pub history_capacity: usize,

    /// Maximum closed tabs kept for restore
    pub closed_tab_capacity: usize,

    /// Search engine prefix; the encoded query is appended
    pub search_url: String,

    /// Sentinel url shown by new tabs
    pub start_page_url: String,

    /// Seed the favorites registry on first run
    pub seed_favorites: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            closed_tab_capacity: DEFAULT_CLOSED_TAB_CAPACITY,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            start_page_url: START_PAGE_URL.to_string(),
            seed_favorites: true,
        }
    }
}

impl SessionConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: SessionConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(anyhow!("history_capacity must be at least 1"));
        }
        if self.closed_tab_capacity == 0 {
            return Err(anyhow!("closed_tab_capacity must be at least 1"));
        }
        if self.search_url.trim().is_empty() {
            return Err(anyhow!("search_url must not be empty"));
        }
        if !self.start_page_url.starts_with("about:") {
            return Err(anyhow!(
                "start_page_url must be an about: url, got {}",
                self.start_page_url
            ));
        }
        Ok(())
    }
}

/// Default database location: `$HOME/.browser-session/session.sqlite3`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home)
        .join(".browser-session")
        .join("session.sqlite3"))
}
