//! Built-in page configuration.

use super::types::{Page, River};
use super::Registry;
use crate::error::Result;

/// Page served by the legacy `/api/rivers` endpoint.
pub const LEGACY_PAGE_ID: &str = "south-sauty-short-creek";

/// Page holding the river served by `/api/river/lrc`.
pub const LRC_PAGE_ID: &str = "little-river-canyon";

/// River key served by `/api/river/lrc`.
pub const LRC_RIVER_KEY: &str = "lrc";

/// Pages shipped with the application.
pub fn default_pages() -> Vec<Page> {
    vec![
        Page::new(
            LEGACY_PAGE_ID,
            "South Sauty & Short Creek",
            "south-sauty-short-creek.html",
        )
        .river(River::new(
            "short",
            "Short Creek",
            "/api/river-levels/name/short",
            "#22c55e",
        ))
        .river(River::new(
            "sauty",
            "South Sauty",
            "/api/river-levels/03572690",
            "#3b82f6",
        )),
        Page::new(LRC_PAGE_ID, "Little River Canyon", "little-river-canyon.html").river(
            River::new(
                LRC_RIVER_KEY,
                "Little River Canyon",
                "/api/river-levels/02399200",
                "#f59e0b",
            ),
        ),
    ]
}

/// Validated registry of the built-in pages.
pub fn default_registry() -> Result<Registry> {
    Registry::new(default_pages())
}
