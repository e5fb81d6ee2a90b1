//! Page and river definitions.

use serde::Serialize;

/// A single monitored waterway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct River {
    /// Key, unique within its page.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Path appended to the upstream base URL.
    pub api_path: String,
    /// Display color as `#rrggbb`.
    pub color: String,
}

impl River {
    /// Create a river definition.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        api_path: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            api_path: api_path.into(),
            color: color.into(),
        }
    }
}

/// A dashboard grouping one or more rivers under one URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// URL slug.
    pub id: String,
    /// Human readable title.
    pub title: String,
    /// Template rendered for `GET /{id}`.
    pub template: String,
    /// Rivers in display order.
    pub rivers: Vec<River>,
}

impl Page {
    /// Create a page with no rivers; add them with [`Page::river`].
    pub fn new(id: impl Into<String>, title: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            template: template.into(),
            rivers: Vec::new(),
        }
    }

    /// Append a river.
    pub fn river(mut self, river: River) -> Self {
        self.rivers.push(river);
        self
    }

    /// Look up a river by key.
    pub fn get_river(&self, key: &str) -> Option<&River> {
        self.rivers.iter().find(|r| r.key == key)
    }
}

/// Check a `#rrggbb` color code.
pub(crate) fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}
