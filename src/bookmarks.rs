//! Bookmark tree.
//!
//! Each folder owns its children outright; nodes carry their parent's id but
//! never a pointer to it. Every walk is depth-first, pre-order, children in
//! insertion order, and stops at the first match.
//!
//! Two reserved root folders always exist: [`FAVORITES_ID`] and
//! [`BOOKMARKS_BAR_ID`]. They can be written into but not removed or moved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::url_utils::generate_id;

pub const FAVORITES_ID: &str = "favorites";
pub const BOOKMARKS_BAR_ID: &str = "bookmarks-bar";
const FAVORITES_TITLE: &str = "Favorites";
const BOOKMARKS_BAR_TITLE: &str = "Bookmarks Bar";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkFolder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub children: Vec<Bookmark>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Bookmark {
    Folder(BookmarkFolder),
    #[serde(rename = "bookmark")]
    Link(BookmarkLink),
}

impl Bookmark {
    pub fn id(&self) -> &str {
        match self {
            Bookmark::Folder(folder) => &folder.id,
            Bookmark::Link(link) => &link.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Bookmark::Folder(folder) => &folder.title,
            Bookmark::Link(link) => &link.title,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Bookmark::Folder(_) => None,
            Bookmark::Link(link) => Some(&link.url),
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Bookmark::Folder(folder) => folder.parent_id.as_deref(),
            Bookmark::Link(link) => link.parent_id.as_deref(),
        }
    }

    pub fn created_at(&self) -> i64 {
        match self {
            Bookmark::Folder(folder) => folder.created_at,
            Bookmark::Link(link) => link.created_at,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Bookmark::Folder(_))
    }

    /// Children of a folder; empty for links.
    pub fn children(&self) -> &[Bookmark] {
        match self {
            Bookmark::Folder(folder) => &folder.children,
            Bookmark::Link(_) => &[],
        }
    }

    fn set_parent(&mut self, parent_id: Option<String>) {
        match self {
            Bookmark::Folder(folder) => folder.parent_id = parent_id,
            Bookmark::Link(link) => link.parent_id = parent_id,
        }
    }
}

/// Fields to change in [`BookmarkTree::update`]. `url` is ignored for folders.
#[derive(Debug, Clone, Default)]
pub struct BookmarkUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
}

fn is_reserved(id: &str) -> bool {
    id == FAVORITES_ID || id == BOOKMARKS_BAR_ID
}

fn root_folder(id: &str, title: &str, created_at: i64) -> Bookmark {
    Bookmark::Folder(BookmarkFolder {
        id: id.to_string(),
        title: title.to_string(),
        parent_id: None,
        children: Vec::new(),
        created_at,
    })
}

fn find_in<'a>(nodes: &'a [Bookmark], id: &str) -> Option<&'a Bookmark> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [Bookmark], id: &str) -> Option<&'a mut Bookmark> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Bookmark::Folder(folder) = node {
            if let Some(found) = find_in_mut(&mut folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<Bookmark>, id: &str) -> Option<Bookmark> {
    if let Some(index) = nodes.iter().position(|node| node.id() == id) {
        return Some(nodes.remove(index));
    }
    for node in nodes.iter_mut() {
        if let Bookmark::Folder(folder) = node {
            if let Some(removed) = remove_from(&mut folder.children, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Detach the first folder with `id`, searching depth-first.
fn take_folder(nodes: &mut Vec<Bookmark>, id: &str) -> Option<Bookmark> {
    if let Some(index) = nodes
        .iter()
        .position(|node| node.id() == id && node.is_folder())
    {
        return Some(nodes.remove(index));
    }
    for node in nodes.iter_mut() {
        if let Bookmark::Folder(folder) = node {
            if let Some(found) = take_folder(&mut folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Give every node with `id` a fresh id. Returns how many were renamed.
fn rename_nodes(nodes: &mut [Bookmark], id: &str) -> usize {
    let mut renamed = 0;
    for node in nodes {
        if node.id() == id {
            let fresh = generate_id();
            match node {
                Bookmark::Folder(folder) => {
                    for child in &mut folder.children {
                        child.set_parent(Some(fresh.clone()));
                    }
                    folder.id = fresh;
                }
                Bookmark::Link(link) => link.id = fresh,
            }
            renamed += 1;
        }
        if let Bookmark::Folder(folder) = node {
            renamed += rename_nodes(&mut folder.children, id);
        }
    }
    renamed
}

fn collect_preorder<'a>(nodes: &'a [Bookmark], out: &mut Vec<&'a Bookmark>) {
    for node in nodes {
        out.push(node);
        collect_preorder(node.children(), out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkTree {
    roots: Vec<Bookmark>,
}

impl Default for BookmarkTree {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BookmarkTree {
    /// Empty tree holding only the reserved roots.
    pub fn new(created_at: i64) -> Self {
        let mut tree = Self { roots: Vec::new() };
        tree.ensure_roots(created_at);
        tree
    }

    /// Rebuild from persisted roots, recreating any missing reserved folder.
    pub fn from_roots(roots: Vec<Bookmark>, created_at: i64) -> Self {
        let mut tree = Self { roots };
        if tree.ensure_roots(created_at) {
            warn!("Bookmark tree was missing a reserved folder; recreated it");
        }
        tree
    }

    /// Returns `true` if a reserved folder had to be created or moved, or a
    /// stray node carrying a reserved id was renamed.
    fn ensure_roots(&mut self, created_at: i64) -> bool {
        let favorites = self.ensure_root(FAVORITES_ID, FAVORITES_TITLE, 0, created_at);
        let bar = self.ensure_root(BOOKMARKS_BAR_ID, BOOKMARKS_BAR_TITLE, 1, created_at);
        favorites || bar
    }

    /// Make `id` a unique top-level folder. A folder found deeper in the
    /// tree is lifted to the top level with its children; any other node
    /// holding the id gets a fresh one.
    fn ensure_root(&mut self, id: &str, title: &str, at: usize, created_at: i64) -> bool {
        let position = self
            .roots
            .iter()
            .position(|node| node.id() == id && node.is_folder());

        let mut changed = false;
        let mut root = match position {
            Some(index) => self.roots.remove(index),
            None => {
                changed = true;
                take_folder(&mut self.roots, id)
                    .unwrap_or_else(|| root_folder(id, title, created_at))
            }
        };

        let renamed = rename_nodes(&mut self.roots, id);
        if renamed > 0 {
            warn!("Renamed {} bookmark nodes that reused reserved id {}", renamed, id);
            changed = true;
        }

        root.set_parent(None);
        let index = position.unwrap_or(at).min(self.roots.len());
        self.roots.insert(index, root);
        changed
    }

    pub fn roots(&self) -> &[Bookmark] {
        &self.roots
    }

    pub fn favorites(&self) -> &[Bookmark] {
        self.find(FAVORITES_ID).map(Bookmark::children).unwrap_or(&[])
    }

    pub fn bookmarks_bar(&self) -> &[Bookmark] {
        self.find(BOOKMARKS_BAR_ID)
            .map(Bookmark::children)
            .unwrap_or(&[])
    }

    pub fn find(&self, id: &str) -> Option<&Bookmark> {
        find_in(&self.roots, id)
    }

    /// Every node, depth-first pre-order.
    pub fn walk(&self) -> Vec<&Bookmark> {
        let mut out = Vec::new();
        collect_preorder(&self.roots, &mut out);
        out
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Bookmark> {
        self.walk().into_iter().find(|node| node.url() == Some(url))
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.find_by_url(url).is_some()
    }

    /// Number of links (folders not counted).
    pub fn count(&self) -> usize {
        self.walk().iter().filter(|node| !node.is_folder()).count()
    }

    /// Append `node` under folder `parent_id`, or at the top level when
    /// there is no such folder.
    fn insert(&mut self, mut node: Bookmark, parent_id: Option<&str>) -> Bookmark {
        if let Some(parent_id) = parent_id {
            if let Some(Bookmark::Folder(folder)) = find_in_mut(&mut self.roots, parent_id) {
                node.set_parent(Some(folder.id.clone()));
                folder.children.push(node.clone());
                return node;
            }
            warn!(
                "Bookmark parent {} not found, placing {} at the top level",
                parent_id,
                node.id()
            );
        }

        node.set_parent(None);
        self.roots.push(node.clone());
        node
    }

    /// Add a bookmark under `parent_id` (default: Favorites).
    pub fn add(
        &mut self,
        url: &str,
        title: &str,
        parent_id: Option<&str>,
        created_at: i64,
    ) -> Bookmark {
        let node = Bookmark::Link(BookmarkLink {
            id: generate_id(),
            title: title.to_string(),
            url: url.to_string(),
            parent_id: None,
            created_at,
        });
        let added = self.insert(node, Some(parent_id.unwrap_or(FAVORITES_ID)));
        debug!("Bookmarked {} in {:?}", url, added.parent_id());
        added
    }

    /// Create a folder under `parent_id`, or at the top level for `None`.
    pub fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
        created_at: i64,
    ) -> Bookmark {
        let node = Bookmark::Folder(BookmarkFolder {
            id: generate_id(),
            title: name.to_string(),
            parent_id: None,
            children: Vec::new(),
            created_at,
        });
        self.insert(node, parent_id)
    }

    /// Remove a node and its whole subtree. Reserved roots stay.
    pub fn remove(&mut self, id: &str) -> bool {
        if is_reserved(id) {
            debug!("Refusing to remove reserved folder {}", id);
            return false;
        }
        remove_from(&mut self.roots, id).is_some()
    }

    pub fn update(&mut self, id: &str, update: BookmarkUpdate) -> bool {
        let Some(node) = find_in_mut(&mut self.roots, id) else {
            return false;
        };

        match node {
            Bookmark::Folder(folder) => {
                if let Some(title) = update.title {
                    folder.title = title;
                }
            }
            Bookmark::Link(link) => {
                if let Some(title) = update.title {
                    link.title = title;
                }
                if let Some(url) = update.url {
                    link.url = url;
                }
            }
        }
        true
    }

    /// Move a node under folder `new_parent_id`, or to the top level for
    /// `None`. Refuses reserved roots, unknown targets, and moves that would
    /// put a folder inside itself.
    pub fn move_node(&mut self, id: &str, new_parent_id: Option<&str>) -> bool {
        if is_reserved(id) {
            return false;
        }
        let Some(node) = self.find(id) else {
            return false;
        };

        if let Some(target) = new_parent_id {
            if target == id || find_in(node.children(), target).is_some() {
                warn!("Refusing to move {} into its own subtree", id);
                return false;
            }
            if !matches!(self.find(target), Some(Bookmark::Folder(_))) {
                return false;
            }
        }

        match remove_from(&mut self.roots, id) {
            Some(node) => {
                self.insert(node, new_parent_id);
                true
            }
            None => false,
        }
    }

    /// Pretty JSON of the whole tree.
    pub fn export_tree(&self) -> String {
        serde_json::to_string_pretty(&self.roots).unwrap_or_else(|e| {
            error!("Failed to export bookmarks: {}", e);
            "[]".to_string()
        })
    }

    /// Import a JSON sequence of bookmark nodes into a new top-level
    /// `Imported <date>` folder.
    ///
    /// The whole payload is validated before anything is attached; on any
    /// malformed node the tree is left untouched and `false` is returned.
    pub fn import_tree(&mut self, data: &str, now: i64) -> bool {
        let value: Value = match serde_json::from_str(data) {
            Ok(value) => value,
            Err(e) => {
                warn!("Bookmark import is not valid JSON: {}", e);
                return false;
            }
        };
        let Some(items) = value.as_array() else {
            warn!("Bookmark import must be a JSON array");
            return false;
        };

        let folder_id = generate_id();
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            match import_node(item, &folder_id, now) {
                Some(node) => children.push(node),
                None => {
                    warn!("Bookmark import rejected: malformed node {}", item);
                    return false;
                }
            }
        }

        let date = DateTime::<Utc>::from_timestamp_millis(now)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| now.to_string());
        let imported = children.len();

        self.roots.push(Bookmark::Folder(BookmarkFolder {
            id: folder_id,
            title: format!("Imported {}", date),
            parent_id: None,
            children,
            created_at: now,
        }));
        debug!("Imported {} top-level bookmark nodes", imported);
        true
    }
}

/// Rebuild one imported node (and its subtree) with fresh ids.
///
/// Accepts this crate's export format as well as Chromium-style nodes
/// (`name` for the title, `type: "url"` for links).
fn import_node(value: &Value, parent_id: &str, now: i64) -> Option<Bookmark> {
    let object = value.as_object()?;
    let title = object
        .get("title")
        .or_else(|| object.get("name"))?
        .as_str()?
        .to_string();
    let created_at = object
        .get("createdAt")
        .and_then(Value::as_i64)
        .unwrap_or(now);
    let url = object.get("url");

    let is_folder = match object.get("type").map(Value::as_str) {
        Some(Some("folder")) => true,
        Some(Some("bookmark")) | Some(Some("url")) => false,
        Some(_) => return None,
        None => url.is_none(),
    };

    if !is_folder {
        return Some(Bookmark::Link(BookmarkLink {
            id: generate_id(),
            title,
            url: url?.as_str()?.to_string(),
            parent_id: Some(parent_id.to_string()),
            created_at,
        }));
    }

    let id = generate_id();
    let children = match object.get("children") {
        None => Vec::new(),
        Some(children) => children
            .as_array()?
            .iter()
            .map(|child| import_node(child, &id, now))
            .collect::<Option<Vec<_>>>()?,
    };

    Some(Bookmark::Folder(BookmarkFolder {
        id,
        title,
        parent_id: Some(parent_id.to_string()),
        children,
        created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_new_tree_has_reserved_roots() {
        let tree = BookmarkTree::new(NOW);
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.roots()[0].title(), "Favorites");
        assert_eq!(tree.roots()[1].title(), "Bookmarks Bar");
        assert_eq!(tree.count(), 0);
    }

    #[test]
    fn test_add_defaults_to_favorites() {
        let mut tree = BookmarkTree::new(NOW);
        let added = tree.add("https://a.com", "A", None, NOW);

        assert_eq!(added.parent_id(), Some(FAVORITES_ID));
        assert_eq!(tree.favorites().len(), 1);
        assert!(tree.is_bookmarked("https://a.com"));
        assert!(!tree.is_bookmarked("https://b.com"));
    }

    #[test]
    fn test_missing_parent_falls_back_to_top_level() {
        let mut tree = BookmarkTree::new(NOW);
        let added = tree.add("https://a.com", "A", Some("nope"), NOW);
        assert_eq!(added.parent_id(), None);
        assert_eq!(tree.roots().len(), 3);
        assert_eq!(tree.find(added.id()), Some(&added));
    }

    #[test]
    fn test_link_is_not_a_parent() {
        let mut tree = BookmarkTree::new(NOW);
        let link = tree.add("https://a.com", "A", None, NOW);
        let child = tree.add("https://b.com", "B", Some(link.id()), NOW);
        assert_eq!(child.parent_id(), None);
    }

    #[test]
    fn test_remove_at_depth() {
        let mut tree = BookmarkTree::new(NOW);
        let outer = tree.create_folder("Outer", Some(BOOKMARKS_BAR_ID), NOW);
        let inner = tree.create_folder("Inner", Some(outer.id()), NOW);
        let deep = tree.add("https://deep.com", "Deep", Some(inner.id()), NOW);

        assert!(tree.find(deep.id()).is_some());
        assert!(tree.remove(deep.id()));
        assert!(tree.find(deep.id()).is_none());
        assert!(tree.find(inner.id()).unwrap().children().is_empty());
        assert!(!tree.remove(deep.id()));
    }

    #[test]
    fn test_reserved_roots_cannot_be_removed() {
        let mut tree = BookmarkTree::new(NOW);
        assert!(!tree.remove(FAVORITES_ID));
        assert!(!tree.remove(BOOKMARKS_BAR_ID));
        assert_eq!(tree.roots().len(), 2);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut tree = BookmarkTree::new(NOW);
        let link = tree.add("https://a.com", "A", None, NOW);
        let folder = tree.create_folder("F", None, NOW);

        assert!(tree.update(
            link.id(),
            BookmarkUpdate {
                title: Some("Renamed".into()),
                url: None,
            }
        ));
        let updated = tree.find(link.id()).unwrap();
        assert_eq!(updated.title(), "Renamed");
        assert_eq!(updated.url(), Some("https://a.com"));

        assert!(tree.update(
            folder.id(),
            BookmarkUpdate {
                title: None,
                url: Some("https://ignored.com".into()),
            }
        ));
        assert_eq!(tree.find(folder.id()).unwrap().url(), None);
        assert!(!tree.update("missing", BookmarkUpdate::default()));
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut tree = BookmarkTree::new(NOW);
        let folder = tree.create_folder("F", Some(FAVORITES_ID), NOW);
        tree.add("https://a.com", "A", Some(folder.id()), NOW);
        tree.add("https://b.com", "B", None, NOW);

        let titles: Vec<&str> = tree.walk().iter().map(|node| node.title()).collect();
        assert_eq!(titles, vec!["Favorites", "F", "A", "B", "Bookmarks Bar"]);
    }

    #[test]
    fn test_move_node_refuses_cycles() {
        let mut tree = BookmarkTree::new(NOW);
        let outer = tree.create_folder("Outer", None, NOW);
        let inner = tree.create_folder("Inner", Some(outer.id()), NOW);

        assert!(!tree.move_node(outer.id(), Some(inner.id())));
        assert!(!tree.move_node(outer.id(), Some(outer.id())));
        assert!(!tree.move_node(FAVORITES_ID, Some(outer.id())));

        assert!(tree.move_node(inner.id(), Some(BOOKMARKS_BAR_ID)));
        assert_eq!(tree.bookmarks_bar()[0].id(), inner.id());
        assert_eq!(
            tree.find(inner.id()).unwrap().parent_id(),
            Some(BOOKMARKS_BAR_ID)
        );
        assert!(tree.find(outer.id()).unwrap().children().is_empty());
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut source = BookmarkTree::new(NOW);
        let folder = source.create_folder("Docs", Some(BOOKMARKS_BAR_ID), NOW);
        source.add("https://docs.rs", "Docs.rs", Some(folder.id()), NOW);
        let exported = source.export_tree();

        let mut target = BookmarkTree::new(NOW);
        assert!(target.import_tree(&exported, NOW));

        let imported = target.roots().last().unwrap();
        assert_eq!(imported.title(), "Imported 2023-11-14");
        assert_eq!(imported.children().len(), 2);
        assert!(target.is_bookmarked("https://docs.rs"));

        let docs_rs = target.find_by_url("https://docs.rs").unwrap();
        let parent = target.find(docs_rs.parent_id().unwrap()).unwrap();
        assert_eq!(parent.title(), "Docs");
        assert_ne!(docs_rs.id(), source.find_by_url("https://docs.rs").unwrap().id());
    }

    #[test]
    fn test_import_accepts_chromium_nodes() {
        let mut tree = BookmarkTree::new(NOW);
        let data = r#"[
            {"type": "folder", "name": "Work", "children": [
                {"type": "url", "name": "Repo", "url": "https://github.com"}
            ]},
            {"title": "Plain", "url": "https://plain.com"}
        ]"#;
        assert!(tree.import_tree(data, NOW));
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn test_malformed_import_leaves_tree_untouched() {
        let mut tree = BookmarkTree::new(NOW);
        tree.add("https://a.com", "A", None, NOW);
        let before = tree.clone();

        assert!(!tree.import_tree("{\"title\": \"not a list\"}", NOW));
        assert!(!tree.import_tree("not json", NOW));
        assert!(!tree.import_tree(r#"[{"title": "ok", "url": "https://ok.com"}, {"url": "https://no-title.com"}]"#, NOW));
        assert!(!tree.import_tree(r#"[{"type": "bookmark", "title": "no url"}]"#, NOW));
        assert!(!tree.import_tree(r#"[{"type": "folder", "title": "F", "children": {}}]"#, NOW));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_from_roots_recreates_missing_reserved() {
        let tree = BookmarkTree::from_roots(Vec::new(), NOW);
        assert!(tree.find(FAVORITES_ID).is_some());
        assert!(tree.find(BOOKMARKS_BAR_ID).is_some());
    }

    fn link(id: &str, url: &str, parent_id: Option<&str>) -> Bookmark {
        Bookmark::Link(BookmarkLink {
            id: id.to_string(),
            title: url.to_string(),
            url: url.to_string(),
            parent_id: parent_id.map(str::to_string),
            created_at: NOW,
        })
    }

    fn folder(id: &str, parent_id: Option<&str>, children: Vec<Bookmark>) -> Bookmark {
        Bookmark::Folder(BookmarkFolder {
            id: id.to_string(),
            title: id.to_string(),
            parent_id: parent_id.map(str::to_string),
            children,
            created_at: NOW,
        })
    }

    fn ids(tree: &BookmarkTree) -> Vec<String> {
        tree.walk().iter().map(|node| node.id().to_string()).collect()
    }

    #[test]
    fn test_reserved_ids_stay_unique() {
        let nested_bar = folder(
            BOOKMARKS_BAR_ID,
            Some("work"),
            vec![link("x", "https://x.com", Some(BOOKMARKS_BAR_ID))],
        );
        let roots = vec![
            link(FAVORITES_ID, "https://stray.com", None),
            folder("work", None, vec![nested_bar]),
        ];

        let tree = BookmarkTree::from_roots(roots, NOW);
        let all = ids(&tree);
        let unique: std::collections::HashSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), all.len());

        assert!(tree.roots()[0].is_folder());
        assert_eq!(tree.roots()[0].id(), FAVORITES_ID);
        let bar = tree
            .roots()
            .iter()
            .find(|node| node.id() == BOOKMARKS_BAR_ID)
            .unwrap();
        assert!(bar.parent_id().is_none());
        assert_eq!(bar.children()[0].id(), "x");
        assert!(tree.find("work").unwrap().children().is_empty());
        assert!(tree.is_bookmarked("https://stray.com"));
    }

    #[test]
    fn test_well_formed_roots_are_untouched() {
        let mut original = BookmarkTree::new(NOW);
        original.add("https://a.com", "A", Some(BOOKMARKS_BAR_ID), NOW);

        let reloaded = BookmarkTree::from_roots(original.roots().to_vec(), NOW + 1);
        assert_eq!(reloaded, original);
    }

    #[test]
    fn test_json_shape() {
        let mut tree = BookmarkTree::new(NOW);
        tree.add("https://a.com", "A", None, NOW);
        let json: Value = serde_json::from_str(&tree.export_tree()).unwrap();

        assert_eq!(json[0]["type"], "folder");
        assert!(json[0]["parentId"].is_null());
        assert_eq!(json[0]["children"][0]["type"], "bookmark");
        assert_eq!(json[0]["children"][0]["parentId"], FAVORITES_ID);
        assert_eq!(json[0]["children"][0]["createdAt"], NOW);
    }
}
