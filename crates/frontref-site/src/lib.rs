//! Static site export for frontref documentation.
//!
//! Renders the landing page and every item page of a catalog into HTML files,
//! along with a search index and a sitemap.

pub mod builder;
pub mod pages;
pub mod templates;

pub use builder::{load_catalog, BuildError, BuildResult, SiteBuilder, SiteConfig};
pub use pages::{site_pages, Layout, PageRenderer, RenderedPage, SitePage};
pub use templates::TemplateEngine;
