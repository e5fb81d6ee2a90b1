//! Paddle Watch: river-level dashboard gateway.
//!
//! Serves two static dashboard pages plus a JSON API that proxies a single
//! upstream river-level service. Each page groups one or more rivers; a
//! page request fans out one upstream GET per river and returns every
//! river's data or error, keyed by river:
//!
//! ```text
//! GET /api/rivers/south-sauty-short-creek
//! {
//!   "sauty": { "name": "South Sauty", "color": "#3b82f6", "data": { ... } },
//!   "short": { "name": "Short Creek", "color": "#22c55e", "error": "API returned 503" }
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`registry`]: Static page/river registry
//! - [`upstream`]: Upstream client and per-river result folding
//! - [`api`]: HTTP handlers and router
//! - [`web`]: HTML templates
//! - [`metrics`]: Upstream fetch metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod upstream;
pub mod utils;
pub mod web;

pub use config::Config;
pub use error::{GatewayError, Result};
