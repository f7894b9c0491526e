//! Site pages and their rendering into full HTML documents.

use std::path::Path;
use std::sync::Arc;

use frontref_catalog::Catalog;
use frontref_render::{install, Document, Page, RouteTable, Slot};

use crate::templates::{Context, TemplateEngine};

/// Which container layout a page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Landing page with the primary container
    Landing,
    /// Detail page with the shared secondary container
    Detail,
}

impl Layout {
    fn slot(self) -> Slot {
        match self {
            Layout::Landing => Slot::Primary,
            Layout::Detail => Slot::Secondary,
        }
    }

    fn template(self) -> &'static str {
        match self {
            Layout::Landing => "landing.html",
            Layout::Detail => "detail.html",
        }
    }

    fn empty_page(self) -> Page {
        Page::with_slots(&[self.slot()])
    }
}

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePage {
    /// Output path relative to the site root (e.g., "ui/buttons.html")
    pub path: String,
    /// Page title
    pub title: String,
    /// One-line summary for the search index
    pub description: String,
    pub layout: Layout,
}

impl SitePage {
    /// Location the page is served at.
    pub fn location(&self) -> String {
        format!("/{}", self.path)
    }

    /// Relative prefix leading from this page back to the site root.
    pub fn root(&self) -> String {
        "../".repeat(self.path.matches('/').count())
    }
}

/// A page rendered to HTML.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    /// Name of the route that rendered the container, if any
    pub route: Option<String>,
}

/// List every page of the site: the landing page, then one page per item.
pub fn site_pages(catalog: &Catalog, site_title: &str) -> Vec<SitePage> {
    let mut pages = vec![SitePage {
        path: "index.html".to_string(),
        title: site_title.to_string(),
        description: String::new(),
        layout: Layout::Landing,
    }];

    for group in catalog.groups() {
        for card in group.items {
            pages.push(SitePage {
                path: card.path.trim_start_matches('/').to_string(),
                title: card.name.to_string(),
                description: card.description.to_string(),
                layout: Layout::Detail,
            });
        }
    }

    pages
}

/// Renders site pages from a catalog.
pub struct PageRenderer {
    catalog: Arc<Catalog>,
    routes: Arc<RouteTable>,
    templates: TemplateEngine,
    site_title: String,
    styles: Vec<String>,
    reload_script: Option<String>,
}

impl PageRenderer {
    /// Create a renderer. `styles` are stylesheet file names under `assets/`.
    pub fn new(catalog: Arc<Catalog>, site_title: impl Into<String>, styles: Vec<String>) -> Self {
        let routes = Arc::new(RouteTable::for_catalog(&catalog));
        Self {
            catalog,
            routes,
            templates: TemplateEngine::new(),
            site_title: site_title.into(),
            styles,
            reload_script: None,
        }
    }

    /// Include a live reload script in every page.
    pub fn with_reload_script(mut self, src: impl Into<String>) -> Self {
        self.reload_script = Some(src.into());
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every page of the site.
    pub fn pages(&self) -> Vec<SitePage> {
        site_pages(&self.catalog, &self.site_title)
    }

    /// Find the page served at a URL path. `/` maps to the landing page.
    pub fn find_page(&self, url_path: &str) -> Option<SitePage> {
        let wanted = url_path.trim_start_matches('/');
        let wanted = if wanted.is_empty() || wanted.ends_with('/') {
            format!("{}index.html", wanted)
        } else {
            wanted.to_string()
        };

        self.pages().into_iter().find(|page| page.path == wanted)
    }

    /// Render a page to a complete HTML document.
    pub fn render(&self, page: &SitePage) -> Result<RenderedPage, minijinja::Error> {
        let location = page.location();

        let mut doc = Document::loading(location.as_str(), page.layout.empty_page());
        install(Arc::clone(&self.catalog), Arc::clone(&self.routes), &mut doc);
        doc.finish_parsing();

        let content = doc
            .page()
            .container(page.layout.slot())
            .map(|c| c.outer_html())
            .unwrap_or_default();

        let root = page.root();
        let context = Context {
            title: page.title.clone(),
            site_title: self.site_title.clone(),
            root: root.clone(),
            content,
            styles: self
                .styles
                .iter()
                .map(|s| format!("{}assets/{}", root, stylesheet_name(s)))
                .collect(),
            reload_script: self.reload_script.clone(),
        };

        let html = self.templates.render_page(page.layout.template(), &context)?;

        Ok(RenderedPage {
            html,
            route: self
                .routes
                .resolve(&location)
                .map(|route| route.name.clone()),
        })
    }
}

/// File name a configured stylesheet is published under.
pub fn stylesheet_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> PageRenderer {
        PageRenderer::new(
            Arc::new(Catalog::builtin()),
            "Frontend Reference",
            vec!["styles/theme.css".to_string()],
        )
    }

    #[test]
    fn lists_landing_and_item_pages() {
        let pages = renderer().pages();
        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["index.html", "ui/buttons.html", "ui/cards.html", "js/utils.html"]
        );
        assert_eq!(pages[0].layout, Layout::Landing);
        assert_eq!(pages[2].title, "Cards");
    }

    #[test]
    fn computes_root_prefix() {
        let pages = renderer().pages();

        assert_eq!(pages[0].root(), "");
        assert_eq!(pages[1].root(), "../");
    }

    #[test]
    fn finds_pages_by_url() {
        let renderer = renderer();

        assert_eq!(renderer.find_page("/").unwrap().path, "index.html");
        assert_eq!(renderer.find_page("/index.html").unwrap().path, "index.html");
        assert_eq!(
            renderer.find_page("/js/utils.html").unwrap().path,
            "js/utils.html"
        );
        assert!(renderer.find_page("/missing.html").is_none());
    }

    #[test]
    fn renders_landing_document() {
        let renderer = renderer();
        let page = renderer.find_page("/").unwrap();

        let rendered = renderer.render(&page).unwrap();

        assert_eq!(rendered.route.as_deref(), Some("landing"));
        assert!(rendered.html.contains(r#"<div class="container"><div class="sections">"#));
        assert!(rendered.html.contains(r#"<a class="card" href="ui/buttons.html">"#));
        assert!(rendered.html.contains(r#"href="assets/theme.css""#));
    }

    #[test]
    fn renders_detail_document() {
        let renderer = renderer().with_reload_script("/__reload.js");
        let page = renderer.find_page("/ui/cards.html").unwrap();

        let rendered = renderer.render(&page).unwrap();

        assert_eq!(rendered.route.as_deref(), Some("ui/cards"));
        assert!(rendered.html.contains(r#"<div class="container-sm"><div class="components">"#));
        assert!(rendered.html.contains(r#"href="../assets/theme.css""#));
        assert!(rendered.html.contains("/__reload.js"));
    }
}
