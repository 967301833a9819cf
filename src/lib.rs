//! Browser session core: tabs, groups, closed-tab restore, history,
//! favorites, reading list and a bookmark tree, persisted through a
//! pluggable key-value port.

pub mod bookmarks;
pub mod closed_tabs;
pub mod config;
pub mod error;
pub mod favorites;
pub mod history;
pub mod reading_list;
pub mod session;
pub mod settings;
pub mod storage;
pub mod tab_groups;
pub mod tabs;
pub mod url_utils;
pub mod validator;

pub use bookmarks::{Bookmark, BookmarkTree, BookmarkUpdate};
pub use config::SessionConfig;
pub use error::{StorageError, StorageResult};
pub use history::ClearRange;
pub use session::SessionStore;
pub use storage::{KeyValueStore, MemoryStore, Persistence, SqliteStore};
pub use tab_groups::GroupColor;
pub use tabs::Tab;
