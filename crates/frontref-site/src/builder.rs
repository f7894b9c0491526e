//! Static site builder.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use frontref_catalog::{Catalog, CatalogError};
use frontref_render::escape_html;

use crate::pages::{stylesheet_name, PageRenderer, SitePage};

/// Configuration for exporting the site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Catalog file; the builtin catalog is used when unset
    pub catalog: Option<PathBuf>,

    /// Output directory
    pub output_dir: PathBuf,

    /// Site title
    pub title: String,

    /// Base URL the site is deployed under
    pub base_url: String,

    /// Paths to externally supplied CSS stylesheets
    pub styles: Vec<String>,

    /// Directory copied verbatim into `assets/`
    pub assets_dir: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            output_dir: PathBuf::from("dist"),
            title: "Frontend Reference".to_string(),
            base_url: "/".to_string(),
            styles: vec![],
            assets_dir: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Pages no route rendered content into
    pub empty_pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Load the configured catalog, or the builtin one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => {
            let catalog = Catalog::load(path)?;
            tracing::info!(
                "Loaded {} items from {}",
                catalog.item_count(),
                path.display()
            );
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

/// Static site builder.
pub struct SiteBuilder {
    config: SiteConfig,
    renderer: PageRenderer,
}

impl SiteBuilder {
    /// Create a builder, loading the configured catalog.
    pub fn new(config: SiteConfig) -> Result<Self, BuildError> {
        let catalog = load_catalog(config.catalog.as_deref())?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create a builder for an already loaded catalog.
    pub fn with_catalog(config: SiteConfig, catalog: Catalog) -> Self {
        let styles = config
            .styles
            .iter()
            .map(|s| stylesheet_name(s).to_string())
            .collect();
        let renderer = PageRenderer::new(Arc::new(catalog), config.title.clone(), styles);

        Self { config, renderer }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        // Catalogs handed in through with_catalog skip the loader's checks
        self.renderer.catalog().validate()?;

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.renderer.pages();

        // Render and write pages in parallel
        let results: Vec<Result<bool, BuildError>> =
            pages.par_iter().map(|page| self.build_page(page)).collect();

        let mut empty_pages = 0;
        for result in results {
            if !result? {
                empty_pages += 1;
            }
        }

        self.copy_styles()?;
        self.copy_assets()?;
        self.generate_search_index(&pages)?;
        self.generate_sitemap(&pages)?;

        Ok(BuildResult {
            pages: pages.len(),
            empty_pages,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render and write one page. Returns whether a route rendered it.
    fn build_page(&self, page: &SitePage) -> Result<bool, BuildError> {
        let rendered = self
            .renderer
            .render(page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if rendered.route.is_none() {
            tracing::warn!("No route renders {}, writing an empty page", page.path);
        }

        if !Path::new(&page.path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(BuildError::WriteError(format!(
                "{}: page path leaves the output directory",
                page.path
            )));
        }

        let output_path = self.config.output_dir.join(&page.path);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&output_path, rendered.html)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(rendered.route.is_some())
    }

    /// Copy configured stylesheets into `assets/`.
    fn copy_styles(&self) -> Result<(), BuildError> {
        if self.config.styles.is_empty() {
            return Ok(());
        }

        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if !source_path.exists() {
                tracing::warn!("Stylesheet not found: {}", style_path);
                continue;
            }

            let content = fs::read_to_string(&source_path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", style_path, e)))?;
            fs::write(assets_dir.join(stylesheet_name(style_path)), content)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
            tracing::info!("Copied stylesheet from {}", style_path);
        }

        Ok(())
    }

    /// Copy the assets directory into `assets/`, keeping its layout.
    fn copy_assets(&self) -> Result<(), BuildError> {
        let Some(assets_src) = &self.config.assets_dir else {
            return Ok(());
        };

        if !assets_src.exists() {
            tracing::warn!("Assets directory not found: {}", assets_src.display());
            return Ok(());
        }

        let assets_dir = self.config.output_dir.join("assets");
        let mut copied = 0;

        for entry in WalkDir::new(assets_src)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(assets_src).unwrap_or(path);
            let target = assets_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }

            fs::copy(path, &target)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
            copied += 1;
        }

        tracing::info!("Copied {} assets from {}", copied, assets_src.display());
        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, pages: &[SitePage]) -> Result<(), BuildError> {
        let catalog = self.renderer.catalog();

        let index: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                let mut tags: Vec<&str> = Vec::new();
                let mut content: Vec<&str> = Vec::new();

                if let Some(item) = catalog.ui.items.iter().find(|i| same_page(&i.path, page)) {
                    content.extend(item.entries.iter().map(|c| c.name.as_str()));
                }
                if let Some(item) = catalog.js.items.iter().find(|i| same_page(&i.path, page)) {
                    for util in &item.entries {
                        content.push(util.name.as_str());
                        for tag in &util.tags {
                            if !tags.contains(&tag.as_str()) {
                                tags.push(tag.as_str());
                            }
                        }
                    }
                }

                serde_json::json!({
                    "title": page.title,
                    "description": page.description,
                    "url": format!("{}{}", self.config.base_url, page.path),
                    "tags": tags,
                    "content": content.join(" "),
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate sitemap.
    fn generate_sitemap(&self, pages: &[SitePage]) -> Result<(), BuildError> {
        let urls: Vec<String> = pages
            .iter()
            .map(|page| {
                let loc = format!("{}{}", self.config.base_url, page.path);
                format!("  <url>\n    <loc>{}</loc>\n  </url>", escape_html(&loc))
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

fn same_page(item_path: &str, page: &SitePage) -> bool {
    item_path.trim_start_matches('/') == page.path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn builds_builtin_site() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let builder = SiteBuilder::new(SiteConfig {
            output_dir: out.clone(),
            ..Default::default()
        })
        .unwrap();
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 4);
        assert_eq!(result.empty_pages, 0);
        assert!(out.join("index.html").exists());
        assert!(out.join("ui/buttons.html").exists());
        assert!(out.join("ui/cards.html").exists());
        assert!(out.join("js/utils.html").exists());

        let buttons = fs::read_to_string(out.join("ui/buttons.html")).unwrap();
        assert!(buttons.contains(r#"<div class="preview">"#));
        assert!(buttons.contains("&lt;button class=&quot;btn btn-primary&quot;&gt;"));
    }

    #[tokio::test]
    async fn generates_search_index_and_sitemap() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let builder = SiteBuilder::new(SiteConfig {
            output_dir: out.clone(),
            base_url: "https://example.com/ref/".to_string(),
            ..Default::default()
        })
        .unwrap();
        builder.build().await.unwrap();

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("search-index.json")).unwrap())
                .unwrap();
        let entries = index.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3]["url"], "https://example.com/ref/js/utils.html");
        assert_eq!(entries[3]["tags"], serde_json::json!(["Utility", "Function"]));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/ref/ui/cards.html</loc>"));
        assert!(out.join("robots.txt").exists());
    }

    #[tokio::test]
    async fn copies_styles_and_assets() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let style = temp.path().join("theme.css");
        let assets = temp.path().join("assets");
        fs::write(&style, ".btn { color: red; }").unwrap();
        fs::create_dir_all(assets.join("img")).unwrap();
        fs::write(assets.join("img/logo.svg"), "<svg/>").unwrap();

        let builder = SiteBuilder::new(SiteConfig {
            output_dir: out.clone(),
            styles: vec![style.display().to_string()],
            assets_dir: Some(assets),
            ..Default::default()
        })
        .unwrap();
        builder.build().await.unwrap();

        assert!(out.join("assets/theme.css").exists());
        assert!(out.join("assets/img/logo.svg").exists());

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(r#"href="assets/theme.css""#));
    }

    #[tokio::test]
    async fn routes_extra_catalog_pages() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let mut catalog = Catalog::builtin();
        catalog.js.items[0].path = "docs/helpers.html".to_string();
        catalog.js.items[0].id = "helpers".to_string();

        let builder = SiteBuilder::with_catalog(
            SiteConfig {
                output_dir: out.clone(),
                ..Default::default()
            },
            catalog,
        );
        let result = builder.build().await.unwrap();

        assert_eq!(result.empty_pages, 0);
        let html = fs::read_to_string(out.join("docs/helpers.html")).unwrap();
        assert!(html.contains(r#"<div class="utils">"#));
    }

    #[tokio::test]
    async fn writes_item_sharing_a_standard_prefix() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let mut catalog = Catalog::builtin();
        let mut large = catalog.ui.items[0].clone();
        large.id = "buttons-large".to_string();
        large.path = "ui/buttons-large.html".to_string();
        large.entries.truncate(1);
        catalog.ui.items.push(large);

        let builder = SiteBuilder::with_catalog(
            SiteConfig {
                output_dir: out.clone(),
                ..Default::default()
            },
            catalog,
        );
        builder.build().await.unwrap();

        let large = fs::read_to_string(out.join("ui/buttons-large.html")).unwrap();
        assert_eq!(large.matches(r#"class="component-title""#).count(), 1);
        let buttons = fs::read_to_string(out.join("ui/buttons.html")).unwrap();
        assert_eq!(buttons.matches(r#"class="component-title""#).count(), 6);
    }

    #[tokio::test]
    async fn rejects_pages_outside_output_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let mut catalog = Catalog::builtin();
        catalog.js.items[0].path = "../escape.html".to_string();

        let builder = SiteBuilder::with_catalog(
            SiteConfig {
                output_dir: out,
                ..Default::default()
            },
            catalog,
        );
        let result = builder.build().await;

        assert!(matches!(
            result,
            Err(BuildError::Catalog(CatalogError::InvalidPath { .. }))
        ));
        assert!(!temp.path().join("escape.html").exists());
    }

    #[tokio::test]
    async fn escapes_sitemap_locations() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let builder = SiteBuilder::new(SiteConfig {
            output_dir: out.clone(),
            base_url: "https://example.com/a&b/".to_string(),
            ..Default::default()
        })
        .unwrap();
        builder.build().await.unwrap();

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/a&amp;b/index.html</loc>"));
        assert!(!sitemap.contains("a&b"));
    }

    #[test]
    fn loads_catalog_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"ui": {"category": "UI"}, "js": {"category": "JS"}}"#,
        )
        .unwrap();

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.item_count(), 0);

        let result = SiteBuilder::new(SiteConfig {
            catalog: Some(temp.path().join("missing.toml")),
            ..Default::default()
        });
        assert!(matches!(result, Err(BuildError::Catalog(_))));
    }
}
