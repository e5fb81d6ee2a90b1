//! HTML page rendering via `minijinja`.
//!
//! Templates live in `templates/` and are embedded at compile time, so the
//! binary serves pages without a templates directory on disk.

use minijinja::{context, Environment};

use crate::error::{GatewayError, Result};
use crate::registry::{Page, Registry};

/// Embedded templates as (name, source) pairs.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("index.html", include_str!("../../templates/index.html")),
    (
        "south-sauty-short-creek.html",
        include_str!("../../templates/south-sauty-short-creek.html"),
    ),
    (
        "little-river-canyon.html",
        include_str!("../../templates/little-river-canyon.html"),
    ),
];

/// Template used for the landing page.
const INDEX_TEMPLATE: &str = "index.html";

/// Loaded page templates.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load the embedded templates.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Fail if any page in `registry` names a template that is not loaded.
    pub fn check(&self, registry: &Registry) -> Result<()> {
        for page in registry.pages() {
            if self.env.get_template(&page.template).is_err() {
                return Err(GatewayError::Registry(format!(
                    "page {} uses unknown template {}",
                    page.id, page.template
                )));
            }
        }
        Ok(())
    }

    /// Render the landing page listing every page.
    pub fn render_index(&self, registry: &Registry) -> Result<String> {
        let html = self
            .env
            .get_template(INDEX_TEMPLATE)?
            .render(context! { pages => registry.pages() })?;
        Ok(html)
    }

    /// Render one page's dashboard.
    pub fn render_page(&self, page: &Page) -> Result<String> {
        let api_url = format!("/api/rivers/{}", page.id);
        let html = self
            .env
            .get_template(&page.template)?
            .render(context! { page => page, api_url => api_url })?;
        Ok(html)
    }
}
