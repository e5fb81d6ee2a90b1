//! Static page/river registry.
//!
//! This module handles:
//! - Page and river definitions
//! - The built-in page set
//! - Invariant checks run once at construction
//!
//! A [`Registry`] is immutable once built and is shared behind an `Arc`.

pub mod pages;
pub mod types;

use std::collections::HashSet;

use crate::error::{GatewayError, Result};

pub use pages::{default_pages, default_registry, LEGACY_PAGE_ID, LRC_PAGE_ID, LRC_RIVER_KEY};
pub use types::{Page, River};

/// Read-only set of dashboard pages.
#[derive(Debug, Clone)]
pub struct Registry {
    pages: Vec<Page>,
}

impl Registry {
    /// Build a registry, rejecting data that breaks the page/river invariants.
    pub fn new(pages: Vec<Page>) -> Result<Self> {
        let mut page_ids = HashSet::new();

        for page in &pages {
            if !page_ids.insert(page.id.as_str()) {
                return Err(GatewayError::Registry(format!("duplicate page id {}", page.id)));
            }

            if page.rivers.is_empty() {
                return Err(GatewayError::Registry(format!("page {} has no rivers", page.id)));
            }

            let mut river_keys = HashSet::new();
            for river in &page.rivers {
                if !river_keys.insert(river.key.as_str()) {
                    return Err(GatewayError::Registry(format!(
                        "duplicate river key {} on page {}",
                        river.key, page.id
                    )));
                }

                if !types::is_hex_color(&river.color) {
                    return Err(GatewayError::Registry(format!(
                        "river {} has invalid color {}",
                        river.key, river.color
                    )));
                }
            }
        }

        Ok(Self { pages })
    }

    /// All pages in configuration order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by id.
    pub fn get(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Look up a page by id, failing with [`GatewayError::PageNotFound`].
    pub fn page(&self, page_id: &str) -> Result<&Page> {
        self.get(page_id)
            .ok_or_else(|| GatewayError::PageNotFound(page_id.to_string()))
    }

    /// Look up a river under a page.
    pub fn river(&self, page_id: &str, river_key: &str) -> Result<&River> {
        self.page(page_id)?
            .get_river(river_key)
            .ok_or_else(|| GatewayError::RiverNotFound {
                page: page_id.to_string(),
                river: river_key.to_string(),
            })
    }
}
