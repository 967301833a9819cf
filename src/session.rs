//! Tab session store.
//!
//! The single owner of open tabs, the active tab pointer and tab groups, and
//! the only caller that touches more than one collection per intent. Every
//! public mutation finishes by writing each collection it changed through
//! the persistence port, once per collection.
//!
//! Intents that name an unknown tab, group or bookmark are no-ops: the
//! caller is a UI event handler with nothing useful to do with an error.

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::bookmarks::{Bookmark, BookmarkTree, BookmarkUpdate};
use crate::closed_tabs::{ClosedTabEntry, ClosedTabStack};
use crate::config::SessionConfig;
use crate::favorites::{Favorite, FavoritesRegistry};
use crate::history::{ClearRange, HistoryEntry, HistoryLog};
use crate::reading_list::{ReadingList, ReadingListItem};
use crate::settings::{PrivacySettings, UiSettings};
use crate::storage::{keys, Persistence};
use crate::tab_groups::{GroupColor, TabGroup, TabGroupRegistry};
use crate::tabs::Tab;
use crate::url_utils::{display_title, generate_id, is_internal_url, normalize_url_with, now_millis};
use crate::validator::ValidationReport;

pub struct SessionStore {
    persistence: Persistence,
    config: SessionConfig,
    tabs: Vec<Tab>,
    active_tab_id: Option<String>,
    groups: TabGroupRegistry,
    closed_tabs: ClosedTabStack,
    history: HistoryLog,
    favorites: FavoritesRegistry,
    reading_list: ReadingList,
    bookmarks: BookmarkTree,
    privacy: PrivacySettings,
    ui: UiSettings,
    /// Last handed-out access time; keeps `Tab::last_accessed` strictly increasing.
    clock: i64,
    report: ValidationReport,
}

fn load_collection<T: DeserializeOwned>(
    persistence: &Persistence,
    key: &'static str,
    report: &mut ValidationReport,
) -> Option<T> {
    if !persistence.contains(key) {
        report.add_missing(key);
        return None;
    }
    let value = persistence.load_opt(key);
    if value.is_none() {
        report.add_discarded(key);
    }
    value
}

impl SessionStore {
    /// Open a session with the default configuration.
    pub fn open(persistence: Persistence) -> Self {
        Self::with_config(persistence, SessionConfig::default())
    }

    /// Load every collection, repair what does not hold up, and write the
    /// repaired collections back.
    pub fn with_config(persistence: Persistence, config: SessionConfig) -> Self {
        let mut report = ValidationReport::new();
        let now = now_millis();

        let groups: Vec<TabGroup> =
            load_collection(&persistence, keys::TAB_GROUPS, &mut report).unwrap_or_default();
        report.add_loaded(keys::TAB_GROUPS, groups.len());

        let tabs: Vec<Tab> =
            load_collection(&persistence, keys::TABS, &mut report).unwrap_or_default();
        report.add_loaded(keys::TABS, tabs.len());

        let active_tab_id: Option<String> =
            load_collection::<Option<String>>(&persistence, keys::ACTIVE_TAB, &mut report).flatten();

        let closed: Vec<ClosedTabEntry> =
            load_collection(&persistence, keys::CLOSED_TABS, &mut report).unwrap_or_default();
        report.add_loaded(keys::CLOSED_TABS, closed.len());

        let history: Vec<HistoryEntry> =
            load_collection(&persistence, keys::HISTORY, &mut report).unwrap_or_default();
        report.add_loaded(keys::HISTORY, history.len());

        let favorites: Option<Vec<Favorite>> =
            load_collection(&persistence, keys::FAVORITES, &mut report);
        report.add_loaded(keys::FAVORITES, favorites.as_ref().map_or(0, Vec::len));

        let reading: Vec<ReadingListItem> =
            load_collection(&persistence, keys::READING_LIST, &mut report).unwrap_or_default();
        report.add_loaded(keys::READING_LIST, reading.len());

        let roots: Vec<Bookmark> =
            load_collection(&persistence, keys::BOOKMARKS, &mut report).unwrap_or_default();
        report.add_loaded(keys::BOOKMARKS, roots.len());

        let privacy: PrivacySettings =
            load_collection(&persistence, keys::PRIVACY, &mut report).unwrap_or_default();
        let ui: UiSettings =
            load_collection(&persistence, keys::SETTINGS, &mut report).unwrap_or_default();

        let favorites = match favorites {
            Some(favorites) => FavoritesRegistry::from_favorites(favorites),
            None if config.seed_favorites && !persistence.contains(keys::FAVORITES) => {
                report.add_repair(keys::FAVORITES, "seeded default favorites");
                FavoritesRegistry::seeded()
            }
            None => FavoritesRegistry::new(),
        };

        if history.len() > config.history_capacity {
            report.add_repair(keys::HISTORY, "truncated to capacity");
        }
        if closed.len() > config.closed_tab_capacity {
            report.add_repair(keys::CLOSED_TABS, "truncated to capacity");
        }
        let reading_count = reading.len();
        let reading_list = ReadingList::from_items(reading);
        if reading_list.len() != reading_count {
            report.add_repair(keys::READING_LIST, "dropped duplicate urls");
        }

        let bookmarks = BookmarkTree::from_roots(roots.clone(), now);
        if bookmarks.roots() != roots.as_slice() {
            report.add_repair(keys::BOOKMARKS, "recreated reserved folders");
        }

        let mut closed_tabs = ClosedTabStack::from_entries(closed, config.closed_tab_capacity);
        let mut repaired_closed = closed_tabs.to_vec();
        if repaired_closed.iter_mut().fold(false, |acc, e| e.tab.repair() | acc) {
            report.add_repair(keys::CLOSED_TABS, "repaired tab history");
            closed_tabs = ClosedTabStack::from_entries(repaired_closed, config.closed_tab_capacity);
        }

        let clock = tabs.iter().map(|t| t.last_accessed).max().unwrap_or(0);
        let mut store = Self {
            persistence,
            history: HistoryLog::from_entries(history, config.history_capacity),
            config,
            tabs,
            active_tab_id,
            groups: TabGroupRegistry::from_groups(groups),
            closed_tabs,
            favorites,
            reading_list,
            bookmarks,
            privacy,
            ui,
            clock,
            report,
        };

        store.repair_tabs();

        let dirty = store.report.dirty_keys();
        if !dirty.is_empty() {
            info!("Session repaired on load: {:?}", dirty);
            store.persist(&dirty);
        }
        debug!(
            "Session opened with {} tabs, {} history entries",
            store.tabs.len(),
            store.history.len()
        );
        store
    }

    /// Enforce the tab and group invariants on freshly loaded state.
    fn repair_tabs(&mut self) {
        let mut seen = HashSet::new();
        let before = self.tabs.len();
        self.tabs.retain(|tab| seen.insert(tab.id.clone()));
        if self.tabs.len() != before {
            self.report.add_repair(keys::TABS, "dropped duplicate tab ids");
        }

        let mut histories_fixed = false;
        for tab in &mut self.tabs {
            histories_fixed |= tab.repair();
        }
        if histories_fixed {
            self.report.add_repair(keys::TABS, "repaired tab history");
        }

        for tab in &mut self.tabs {
            if let Some(group_id) = &tab.group_id {
                if !self.groups.contains(group_id) {
                    warn!("Tab {} referenced missing group {}", tab.id, group_id);
                    tab.group_id = None;
                    self.report.add_repair(keys::TABS, "cleared dangling group reference");
                }
            }
        }

        let assignments: Vec<(&str, &str)> = self
            .tabs
            .iter()
            .filter_map(|tab| tab.group_id.as_deref().map(|group| (tab.id.as_str(), group)))
            .collect();
        if self.groups.reconcile(&assignments) {
            self.report.add_repair(keys::TAB_GROUPS, "reconciled member lists");
        }

        if self.tabs.is_empty() {
            let tab = self.default_tab();
            self.active_tab_id = Some(tab.id.clone());
            self.tabs.push(tab);
            self.report.add_repair(keys::TABS, "created start page tab");
        }

        let active_valid = self
            .active_tab_id
            .as_ref()
            .is_some_and(|id| self.tabs.iter().any(|tab| &tab.id == id));
        if !active_valid {
            self.active_tab_id = self.most_recent_tab_id();
            self.report.add_repair(keys::TABS, "reassigned active tab");
        }
    }

    fn tick(&mut self) -> i64 {
        self.clock = now_millis().max(self.clock + 1);
        self.clock
    }

    fn default_tab(&mut self) -> Tab {
        let url = self.config.start_page_url.clone();
        let title = display_title(&url, &self.config.search_url);
        let now = self.tick();
        Tab::new(&url, &title, now)
    }

    fn most_recent_tab_id(&self) -> Option<String> {
        self.tabs
            .iter()
            .max_by_key(|tab| tab.last_accessed)
            .map(|tab| tab.id.clone())
    }

    fn tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == tab_id)
    }

    /// Write the named collections.
    fn persist(&mut self, changed: &[&str]) {
        for key in changed {
            match *key {
                keys::TABS | keys::ACTIVE_TAB => {
                    self.persistence.save(keys::TABS, &self.tabs);
                    self.persistence.save(keys::ACTIVE_TAB, &self.active_tab_id);
                }
                keys::TAB_GROUPS => self.persistence.save(keys::TAB_GROUPS, self.groups.groups()),
                keys::CLOSED_TABS => self
                    .persistence
                    .save(keys::CLOSED_TABS, &self.closed_tabs.to_vec()),
                keys::HISTORY => self.persistence.save(keys::HISTORY, self.history.entries()),
                keys::FAVORITES => self
                    .persistence
                    .save(keys::FAVORITES, self.favorites.favorites()),
                keys::READING_LIST => self
                    .persistence
                    .save(keys::READING_LIST, self.reading_list.items()),
                keys::BOOKMARKS => self.persistence.save(keys::BOOKMARKS, self.bookmarks.roots()),
                keys::PRIVACY => self.persistence.save(keys::PRIVACY, &self.privacy),
                keys::SETTINGS => self.persistence.save(keys::SETTINGS, &self.ui),
                other => warn!("Unknown collection {}", other),
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_deref().and_then(|id| self.tab(id))
    }

    pub fn groups(&self) -> &[TabGroup] {
        self.groups.groups()
    }

    pub fn group(&self, group_id: &str) -> Option<&TabGroup> {
        self.groups.get(group_id)
    }

    pub fn closed_tabs(&self) -> &ClosedTabStack {
        &self.closed_tabs
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn favorites(&self) -> &FavoritesRegistry {
        &self.favorites
    }

    pub fn reading_list(&self) -> &ReadingList {
        &self.reading_list
    }

    pub fn bookmarks(&self) -> &BookmarkTree {
        &self.bookmarks
    }

    pub fn privacy(&self) -> &PrivacySettings {
        &self.privacy
    }

    pub fn ui_settings(&self) -> &UiSettings {
        &self.ui
    }

    /// What was repaired when the session was opened.
    pub fn validation_report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Close the session and hand back its persistence port.
    pub fn into_persistence(self) -> Persistence {
        self.persistence
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    /// Open a new active tab at the end of the strip. Without a url it shows
    /// the start page.
    pub fn create_tab(&mut self, url: Option<&str>, title: Option<&str>) -> Tab {
        let url = url
            .map(|input| normalize_url_with(input, &self.config.search_url))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.config.start_page_url.clone());
        let title = match title {
            Some(title) => title.to_string(),
            None => display_title(&url, &self.config.search_url),
        };

        let now = self.tick();
        let tab = Tab::new(&url, &title, now);
        self.active_tab_id = Some(tab.id.clone());
        self.tabs.push(tab.clone());
        debug!("Created tab {} at {}", tab.id, tab.url);

        self.persist(&[keys::TABS]);
        tab
    }

    /// Load `input` in the tab as a new page.
    ///
    /// Forward history is discarded. Unless private mode is on, the visit
    /// is recorded in history and counted toward favorites.
    pub fn navigate(&mut self, tab_id: &str, input: &str) -> bool {
        let url = normalize_url_with(input, &self.config.search_url);
        if url.is_empty() {
            return false;
        }
        let title = display_title(&url, &self.config.search_url);
        let now = self.tick();

        let Some(tab) = self.tab_mut(tab_id) else {
            debug!("Navigate ignored, no tab {}", tab_id);
            return false;
        };
        tab.push_page(&url, &title);
        tab.last_accessed = now;
        debug!("Tab {} navigated to {}", tab_id, url);

        let mut changed = vec![keys::TABS];
        if !self.privacy.private_mode && !is_internal_url(&url) {
            self.history.record(&url, &title, now);
            self.favorites.increment(&url, &title);
            changed.push(keys::HISTORY);
            changed.push(keys::FAVORITES);
        }

        self.persist(&changed);
        true
    }

    pub fn can_go_back(&self, tab_id: &str) -> bool {
        self.tab(tab_id).is_some_and(Tab::can_go_back)
    }

    pub fn can_go_forward(&self, tab_id: &str) -> bool {
        self.tab(tab_id).is_some_and(Tab::can_go_forward)
    }

    pub fn back(&mut self, tab_id: &str) -> bool {
        let search_url = self.config.search_url.clone();
        let moved = self
            .tab_mut(tab_id)
            .is_some_and(|tab| tab.go_back(|url| display_title(url, &search_url)));
        if moved {
            self.persist(&[keys::TABS]);
        }
        moved
    }

    pub fn forward(&mut self, tab_id: &str) -> bool {
        let search_url = self.config.search_url.clone();
        let moved = self
            .tab_mut(tab_id)
            .is_some_and(|tab| tab.go_forward(|url| display_title(url, &search_url)));
        if moved {
            self.persist(&[keys::TABS]);
        }
        moved
    }

    /// Mark the tab as loading its current page again. History is untouched.
    pub fn reload(&mut self, tab_id: &str) -> bool {
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        tab.is_loading = !is_internal_url(&tab.url);
        self.persist(&[keys::TABS]);
        true
    }

    /// The content layer finished loading the tab's page, optionally
    /// reporting the real page title.
    pub fn finish_loading(&mut self, tab_id: &str, title: Option<&str>) -> bool {
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        tab.is_loading = false;

        let mut changed = vec![keys::TABS];
        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            tab.title = title.to_string();
            let url = tab.url.clone();
            if self.history.retitle_latest(&url, title) {
                changed.push(keys::HISTORY);
            }
            if self.favorites.retitle(&url, title) {
                changed.push(keys::FAVORITES);
            }
        }

        self.persist(&changed);
        true
    }

    /// Detach the tab from the strip and its group, and remember it on the
    /// closed-tab stack. Does not persist.
    fn close_tab_inner(&mut self, tab_id: &str) -> bool {
        let Some(index) = self.tab_index(tab_id) else {
            return false;
        };

        let tab = self.tabs.remove(index);
        self.groups.remove_tab(&tab.id);
        let now = self.tick();
        self.closed_tabs.push(tab, index, now);

        if self.tabs.is_empty() {
            let fresh = self.default_tab();
            self.active_tab_id = Some(fresh.id.clone());
            self.tabs.push(fresh);
            debug!("Closed the last tab, opened a start page");
        } else if self.active_tab_id.as_deref() == Some(tab_id) {
            self.active_tab_id = self.most_recent_tab_id();
        }
        true
    }

    pub fn close_tab(&mut self, tab_id: &str) -> bool {
        let closed = self.close_tab_inner(tab_id);
        if closed {
            debug!("Closed tab {}", tab_id);
            self.persist(&[keys::TABS, keys::TAB_GROUPS, keys::CLOSED_TABS]);
        }
        closed
    }

    /// Close every unpinned tab except `tab_id`, which becomes active.
    pub fn close_other_tabs(&mut self, tab_id: &str) -> usize {
        if self.tab_index(tab_id).is_none() {
            return 0;
        }

        let doomed: Vec<String> = self
            .tabs
            .iter()
            .filter(|tab| tab.id != tab_id && !tab.is_pinned)
            .map(|tab| tab.id.clone())
            .collect();
        for id in &doomed {
            self.close_tab_inner(id);
        }

        let now = self.tick();
        if let Some(tab) = self.tab_mut(tab_id) {
            tab.last_accessed = now;
        }
        self.active_tab_id = Some(tab_id.to_string());

        self.persist(&[keys::TABS, keys::TAB_GROUPS, keys::CLOSED_TABS]);
        doomed.len()
    }

    /// Bring back the most recently closed tab, at its old position when
    /// that still exists.
    pub fn reopen_closed_tab(&mut self) -> Option<Tab> {
        let entry = self.closed_tabs.pop()?;
        let mut tab = entry.tab;

        if self.tab_index(&tab.id).is_some() {
            tab.id = generate_id();
        }
        tab.last_accessed = self.tick();
        tab.is_loading = false;

        match tab.group_id.clone() {
            Some(group_id) if self.groups.contains(&group_id) => {
                self.groups.add_tab(&group_id, &tab.id);
            }
            _ => tab.group_id = None,
        }

        let index = entry.index.min(self.tabs.len());
        self.tabs.insert(index, tab.clone());
        self.active_tab_id = Some(tab.id.clone());
        info!("Reopened {} at position {}", tab.url, index);

        self.persist(&[keys::TABS, keys::TAB_GROUPS, keys::CLOSED_TABS]);
        Some(tab)
    }

    pub fn clear_closed_tabs(&mut self) {
        self.closed_tabs.clear();
        self.persist(&[keys::CLOSED_TABS]);
    }

    pub fn select_tab(&mut self, tab_id: &str) -> bool {
        let now = self.tick();
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        tab.last_accessed = now;
        self.active_tab_id = Some(tab_id.to_string());
        self.persist(&[keys::TABS]);
        true
    }

    /// Toggle pinned; returns the new value.
    pub fn pin_tab(&mut self, tab_id: &str) -> Option<bool> {
        let tab = self.tab_mut(tab_id)?;
        tab.is_pinned = !tab.is_pinned;
        let pinned = tab.is_pinned;
        self.persist(&[keys::TABS]);
        Some(pinned)
    }

    /// Toggle muted; returns the new value.
    pub fn mute_tab(&mut self, tab_id: &str) -> Option<bool> {
        let tab = self.tab_mut(tab_id)?;
        tab.is_muted = !tab.is_muted;
        let muted = tab.is_muted;
        self.persist(&[keys::TABS]);
        Some(muted)
    }

    /// Open a copy right after the original and make it active.
    pub fn duplicate_tab(&mut self, tab_id: &str) -> Option<Tab> {
        let index = self.tab_index(tab_id)?;
        let now = self.tick();
        let copy = self.tabs[index].duplicate(now);

        if let Some(group_id) = &copy.group_id {
            self.groups.add_tab(group_id, &copy.id);
        }
        self.tabs.insert(index + 1, copy.clone());
        self.active_tab_id = Some(copy.id.clone());

        self.persist(&[keys::TABS, keys::TAB_GROUPS]);
        Some(copy)
    }

    /// Move a tab to `new_index`, clamped to the strip.
    pub fn move_tab(&mut self, tab_id: &str, new_index: usize) -> bool {
        let Some(index) = self.tab_index(tab_id) else {
            return false;
        };
        let tab = self.tabs.remove(index);
        let target = new_index.min(self.tabs.len());
        self.tabs.insert(target, tab);
        self.persist(&[keys::TABS]);
        true
    }

    /// Put the tab in `group_id`, or in no group. An unknown group counts as
    /// no group.
    fn assign_group(&mut self, tab_id: &str, group_id: Option<&str>) -> bool {
        let target = group_id
            .filter(|id| self.groups.contains(id))
            .map(str::to_string);
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        tab.group_id = target.clone();

        self.groups.remove_tab(tab_id);
        if let Some(group_id) = &target {
            self.groups.add_tab(group_id, tab_id);
        }
        true
    }

    pub fn move_tab_to_group(&mut self, tab_id: &str, group_id: Option<&str>) -> bool {
        let moved = self.assign_group(tab_id, group_id);
        if moved {
            self.persist(&[keys::TABS, keys::TAB_GROUPS]);
        }
        moved
    }

    // ------------------------------------------------------------------
    // Tab groups
    // ------------------------------------------------------------------

    /// Create a group and move the listed tabs into it. Unknown tab ids are
    /// skipped.
    pub fn create_group(&mut self, name: &str, color: GroupColor, tab_ids: &[&str]) -> TabGroup {
        let now = self.tick();
        let group = self.groups.create(name, color, now);
        for tab_id in tab_ids {
            self.assign_group(tab_id, Some(group.id.as_str()));
        }
        debug!("Created group {} ({})", group.name, group.color);

        self.persist(&[keys::TABS, keys::TAB_GROUPS]);
        self.groups.get(&group.id).cloned().unwrap_or(group)
    }

    pub fn rename_group(&mut self, group_id: &str, name: &str) -> bool {
        let renamed = self.groups.rename(group_id, name);
        if renamed {
            self.persist(&[keys::TAB_GROUPS]);
        }
        renamed
    }

    pub fn set_group_color(&mut self, group_id: &str, color: GroupColor) -> bool {
        let changed = self.groups.set_color(group_id, color);
        if changed {
            self.persist(&[keys::TAB_GROUPS]);
        }
        changed
    }

    pub fn toggle_group_collapse(&mut self, group_id: &str) -> Option<bool> {
        let collapsed = self.groups.toggle_collapse(group_id)?;
        self.persist(&[keys::TAB_GROUPS]);
        Some(collapsed)
    }

    /// Delete the group. Member tabs stay open, ungrouped.
    pub fn delete_group(&mut self, group_id: &str) -> bool {
        if self.groups.delete(group_id).is_none() {
            return false;
        }
        for tab in &mut self.tabs {
            if tab.group_id.as_deref() == Some(group_id) {
                tab.group_id = None;
            }
        }
        self.persist(&[keys::TABS, keys::TAB_GROUPS]);
        true
    }

    // ------------------------------------------------------------------
    // Bookmarks
    // ------------------------------------------------------------------

    pub fn add_bookmark(&mut self, url: &str, title: &str, parent_id: Option<&str>) -> Bookmark {
        let now = self.tick();
        let bookmark = self.bookmarks.add(url, title, parent_id, now);
        self.persist(&[keys::BOOKMARKS]);
        bookmark
    }

    pub fn create_bookmark_folder(&mut self, name: &str, parent_id: Option<&str>) -> Bookmark {
        let now = self.tick();
        let folder = self.bookmarks.create_folder(name, parent_id, now);
        self.persist(&[keys::BOOKMARKS]);
        folder
    }

    pub fn remove_bookmark(&mut self, id: &str) -> bool {
        let removed = self.bookmarks.remove(id);
        if removed {
            self.persist(&[keys::BOOKMARKS]);
        }
        removed
    }

    pub fn update_bookmark(&mut self, id: &str, update: BookmarkUpdate) -> bool {
        let updated = self.bookmarks.update(id, update);
        if updated {
            self.persist(&[keys::BOOKMARKS]);
        }
        updated
    }

    pub fn move_bookmark(&mut self, id: &str, new_parent_id: Option<&str>) -> bool {
        let moved = self.bookmarks.move_node(id, new_parent_id);
        if moved {
            self.persist(&[keys::BOOKMARKS]);
        }
        moved
    }

    pub fn export_bookmarks(&self) -> String {
        self.bookmarks.export_tree()
    }

    pub fn import_bookmarks(&mut self, data: &str) -> bool {
        let now = self.tick();
        let imported = self.bookmarks.import_tree(data, now);
        if imported {
            info!("Imported bookmarks");
            self.persist(&[keys::BOOKMARKS]);
        }
        imported
    }

    // ------------------------------------------------------------------
    // Reading list
    // ------------------------------------------------------------------

    pub fn add_to_reading_list(
        &mut self,
        url: &str,
        title: &str,
        description: Option<&str>,
    ) -> ReadingListItem {
        let now = self.tick();
        let before = self.reading_list.len();
        let item = self.reading_list.add(url, title, description, now);
        if self.reading_list.len() != before {
            self.persist(&[keys::READING_LIST]);
        }
        item
    }

    pub fn toggle_reading_list_read(&mut self, id: &str) -> Option<bool> {
        let is_read = self.reading_list.toggle_read(id)?;
        self.persist(&[keys::READING_LIST]);
        Some(is_read)
    }

    pub fn remove_from_reading_list(&mut self, id: &str) -> bool {
        let removed = self.reading_list.remove(id);
        if removed {
            self.persist(&[keys::READING_LIST]);
        }
        removed
    }

    pub fn cache_reading_list_content(&mut self, id: &str, content: &str) -> bool {
        let cached = self.reading_list.cache_content(id, content);
        if cached {
            self.persist(&[keys::READING_LIST]);
        }
        cached
    }

    pub fn clear_read_items(&mut self) -> usize {
        let removed = self.reading_list.clear_read();
        if removed > 0 {
            self.persist(&[keys::READING_LIST]);
        }
        removed
    }

    // ------------------------------------------------------------------
    // History and favorites
    // ------------------------------------------------------------------

    pub fn search_history(&self, query: &str) -> Vec<HistoryEntry> {
        self.history.search(query)
    }

    pub fn clear_history(&mut self, range: ClearRange) -> usize {
        let removed = self.history.clear(range, now_millis());
        info!("Cleared {} history entries ({})", removed, range);
        if removed > 0 {
            self.persist(&[keys::HISTORY]);
        }
        removed
    }

    pub fn remove_history_entry(&mut self, id: &str) -> bool {
        let removed = self.history.remove(id);
        if removed {
            self.persist(&[keys::HISTORY]);
        }
        removed
    }

    pub fn top_sites(&self, limit: usize) -> Vec<Favorite> {
        self.favorites.top_n(limit)
    }

    pub fn remove_favorite(&mut self, id: &str) -> bool {
        let removed = self.favorites.remove(id);
        if removed {
            self.persist(&[keys::FAVORITES]);
        }
        removed
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn set_privacy(&mut self, privacy: PrivacySettings) {
        self.privacy = privacy;
        self.persist(&[keys::PRIVACY]);
    }

    pub fn set_ui_settings(&mut self, ui: UiSettings) {
        self.ui = ui;
        self.persist(&[keys::SETTINGS]);
    }
}
