//! Named, colored tab groups.
//!
//! Groups only record membership. Tab lifetime belongs to the session
//! store, which keeps `Tab::group_id` and `TabGroup::tab_ids` in step.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::url_utils::generate_id;

const UNTITLED_GROUP: &str = "Untitled Group";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    #[default]
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    pub const ALL: [GroupColor; 9] = [
        GroupColor::Grey,
        GroupColor::Blue,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Purple,
        GroupColor::Cyan,
        GroupColor::Orange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        GroupColor::ALL
            .into_iter()
            .find(|color| color.name() == lower || (lower == "gray" && *color == GroupColor::Grey))
            .ok_or_else(|| format!("unknown group color: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroup {
    pub id: String,
    pub name: String,
    pub color: GroupColor,
    pub is_collapsed: bool,
    pub tab_ids: Vec<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct TabGroupRegistry {
    groups: Vec<TabGroup>,
}

fn group_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        UNTITLED_GROUP.to_string()
    } else {
        trimmed.to_string()
    }
}

impl TabGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: Vec<TabGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn get(&self, id: &str) -> Option<&TabGroup> {
        self.groups.iter().find(|group| group.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut TabGroup> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn create(&mut self, name: &str, color: GroupColor, created_at: i64) -> TabGroup {
        let group = TabGroup {
            id: generate_id(),
            name: group_name(name),
            color,
            is_collapsed: false,
            tab_ids: Vec::new(),
            created_at,
        };
        self.groups.push(group.clone());
        group
    }

    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        match self.get_mut(id) {
            Some(group) => {
                group.name = group_name(name);
                true
            }
            None => false,
        }
    }

    pub fn set_color(&mut self, id: &str, color: GroupColor) -> bool {
        match self.get_mut(id) {
            Some(group) => {
                group.color = color;
                true
            }
            None => false,
        }
    }

    /// Flip the collapsed flag; returns the new value.
    pub fn toggle_collapse(&mut self, id: &str) -> Option<bool> {
        let group = self.get_mut(id)?;
        group.is_collapsed = !group.is_collapsed;
        Some(group.is_collapsed)
    }

    /// Remove the group and hand back its member tab ids so the caller can
    /// detach them.
    pub fn delete(&mut self, id: &str) -> Option<Vec<String>> {
        let index = self.groups.iter().position(|group| group.id == id)?;
        Some(self.groups.remove(index).tab_ids)
    }

    pub fn add_tab(&mut self, id: &str, tab_id: &str) -> bool {
        match self.get_mut(id) {
            Some(group) => {
                if !group.tab_ids.iter().any(|t| t == tab_id) {
                    group.tab_ids.push(tab_id.to_string());
                }
                true
            }
            None => false,
        }
    }

    /// Bring member lists in line with `assignments`, `(tab_id, group_id)`
    /// pairs in tab-strip order. Members keep the order they joined in:
    /// stale or repeated ids are dropped and unlisted members are appended.
    /// Returns `true` if any list changed.
    pub fn reconcile(&mut self, assignments: &[(&str, &str)]) -> bool {
        let mut changed = false;
        for group in &mut self.groups {
            let group_id = group.id.as_str();
            let belongs = |tab_id: &str| {
                assignments
                    .iter()
                    .any(|(tab, owner)| *tab == tab_id && *owner == group_id)
            };

            let mut seen = HashSet::new();
            let mut members: Vec<String> = group
                .tab_ids
                .iter()
                .filter(|tab_id| belongs(tab_id.as_str()) && seen.insert(tab_id.as_str()))
                .cloned()
                .collect();
            for (tab_id, _) in assignments.iter().filter(|(_, owner)| *owner == group_id) {
                if !members.iter().any(|member| member == tab_id) {
                    members.push(tab_id.to_string());
                }
            }

            if members != group.tab_ids {
                group.tab_ids = members;
                changed = true;
            }
        }
        changed
    }

    /// Drop `tab_id` from whichever groups list it.
    pub fn remove_tab(&mut self, tab_id: &str) {
        for group in &mut self.groups {
            group.tab_ids.retain(|t| t != tab_id);
        }
    }
}
