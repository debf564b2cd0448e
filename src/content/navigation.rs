//! Side navigation menus attached to posts

use serde::{Deserialize, Serialize};

/// One entry of a post's navigation menu
///
/// Either a plain link or a titled group of nested entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuItem {
    Link { title: String, url: String },
    Submenu { title: String, submenu: Vec<MenuItem> },
}

impl MenuItem {
    pub fn title(&self) -> &str {
        match self {
            MenuItem::Link { title, .. } | MenuItem::Submenu { title, .. } => title,
        }
    }

    /// Number of links reachable from this entry, including nested ones
    pub fn link_count(&self) -> usize {
        match self {
            MenuItem::Link { .. } => 1,
            MenuItem::Submenu { submenu, .. } => submenu.iter().map(MenuItem::link_count).sum(),
        }
    }
}
