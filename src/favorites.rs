//! Frequently visited sites, ranked by visit count.

use serde::{Deserialize, Serialize};

use crate::url_utils::generate_id;

/// Seed entries shown on a brand new start page.
const DEFAULT_FAVORITES: &[(&str, &str)] = &[
    ("https://www.apple.com", "Apple"),
    ("https://www.google.com", "Google"),
    ("https://www.wikipedia.org", "Wikipedia"),
    ("https://github.com", "GitHub"),
    ("https://www.youtube.com", "YouTube"),
    ("https://news.ycombinator.com", "Hacker News"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub url: String,
    pub title: String,
    pub visit_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FavoritesRegistry {
    favorites: Vec<Favorite>,
}

impl FavoritesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_favorites(favorites: Vec<Favorite>) -> Self {
        Self { favorites }
    }

    /// The first-run set.
    pub fn seeded() -> Self {
        let favorites = DEFAULT_FAVORITES
            .iter()
            .map(|(url, title)| Favorite {
                id: generate_id(),
                url: url.to_string(),
                title: title.to_string(),
                visit_count: 0,
            })
            .collect();
        Self { favorites }
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Count a visit to `url`, creating the favorite on first visit.
    /// `title` is only used for a new favorite; an existing title stays.
    pub fn increment(&mut self, url: &str, title: &str) -> &Favorite {
        let index = match self.favorites.iter().position(|f| f.url == url) {
            Some(index) => {
                let favorite = &mut self.favorites[index];
                favorite.visit_count = favorite.visit_count.saturating_add(1);
                index
            }
            None => {
                self.favorites.push(Favorite {
                    id: generate_id(),
                    url: url.to_string(),
                    title: title.to_string(),
                    visit_count: 1,
                });
                self.favorites.len() - 1
            }
        };
        &self.favorites[index]
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != id);
        self.favorites.len() != before
    }

    /// Replace the title of the favorite for `url` with the page's real one.
    pub fn retitle(&mut self, url: &str, title: &str) -> bool {
        match self.favorites.iter_mut().find(|f| f.url == url) {
            Some(favorite) if favorite.title != title => {
                favorite.title = title.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Favorite> {
        self.favorites.iter().find(|f| f.url == url)
    }

    /// Most visited first. Equal counts keep insertion order.
    pub fn top_n(&self, limit: usize) -> Vec<Favorite> {
        let mut ranked = self.favorites.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.visit_count.cmp(&a.visit_count));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(url: &str, visit_count: u32) -> Favorite {
        Favorite {
            id: url.to_string(),
            url: url.to_string(),
            title: url.to_string(),
            visit_count,
        }
    }

    #[test]
    fn test_increment_creates_then_counts() {
        let mut registry = FavoritesRegistry::new();
        assert_eq!(registry.increment("https://a.com", "A").visit_count, 1);
        assert_eq!(registry.increment("https://a.com", "A").visit_count, 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_visits_keep_title_until_retitled() {
        let mut registry = FavoritesRegistry::seeded();
        let visited = registry.increment("https://github.com", "github.com");
        assert_eq!(visited.title, "GitHub");
        assert_eq!(visited.visit_count, 1);

        assert!(registry.retitle("https://github.com", "GitHub: Let's build"));
        assert!(!registry.retitle("https://github.com", "GitHub: Let's build"));
        assert!(!registry.retitle("https://missing.com", "Missing"));
        assert_eq!(
            registry.find_by_url("https://github.com").unwrap().title,
            "GitHub: Let's build"
        );
    }

    #[test]
    fn test_top_n_is_stable() {
        let registry = FavoritesRegistry::from_favorites(vec![
            favorite("A", 5),
            favorite("B", 5),
            favorite("C", 10),
        ]);

        let top: Vec<String> = registry.top_n(3).into_iter().map(|f| f.url).collect();
        assert_eq!(top, vec!["C", "A", "B"]);
        assert_eq!(registry.top_n(1).len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut registry = FavoritesRegistry::from_favorites(vec![favorite("A", 1)]);
        assert!(registry.remove("A"));
        assert!(!registry.remove("A"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_seeded_is_not_empty() {
        let registry = FavoritesRegistry::seeded();
        assert_eq!(registry.len(), DEFAULT_FAVORITES.len());
        assert!(registry.find_by_url("https://github.com").is_some());
    }
}
