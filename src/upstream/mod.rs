//! Upstream river-level API access.
//!
//! Fans a page out into one GET per river and folds every per-river
//! failure into a [`RiverResult`] instead of failing the page.

pub mod client;
pub mod types;

pub use client::{PageResults, RiverClient};
pub use types::{RiverOutcome, RiverResult};
