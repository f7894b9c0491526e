//! Location-based route table.
//!
//! Routes are evaluated in order and the first match wins. A path that no
//! route matches renders nothing.

use frontref_catalog::Catalog;

use crate::dom::Surface;
use crate::renderer::{PreviewMode, Renderer};

/// The view a route renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Landing page with all groups
    Landing,
    /// Detail page of a UI item
    ComponentDetail { item: String, previews: PreviewMode },
    /// Detail page of a utility item
    UtilityDetail { item: String },
}

impl View {
    /// Id of the catalog item the view shows, if any.
    pub fn item(&self) -> Option<&str> {
        match self {
            View::Landing => None,
            View::ComponentDetail { item, .. } | View::UtilityDetail { item } => Some(item),
        }
    }
}

/// Predicate deciding whether a route serves a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// `/`, any path ending in `/`, or any path mentioning `index.html`
    Landing,
    /// Path contains the substring
    Contains(String),
    /// Path is the page path, optionally below a directory prefix
    Page(String),
}

impl Matcher {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Matcher::Landing => path.ends_with('/') || path.contains("index.html"),
            Matcher::Contains(needle) => path.contains(needle.as_str()),
            Matcher::Page(page) => {
                let path = path.trim_start_matches('/');
                path == page.as_str()
                    || path
                        .strip_suffix(page.as_str())
                        .is_some_and(|prefix| prefix.ends_with('/'))
            }
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Short name used in logs
    pub name: String,
    pub matcher: Matcher,
    pub view: View,
}

/// Ordered list of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// An empty table that matches nothing.
    pub fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a route with the lowest priority so far.
    pub fn route(mut self, name: impl Into<String>, matcher: Matcher, view: View) -> Self {
        self.routes.push(Route {
            name: name.into(),
            matcher,
            view,
        });
        self
    }

    /// The standard table extended with a route for every catalog item whose
    /// path the standard table does not already serve with that item.
    ///
    /// Unserved paths get a substring route at the end. Paths a route for a
    /// different item would claim get an exact page route ahead of the
    /// substring routes. UI items get variant previews; utility items get the
    /// utility view.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let mut table = Self::default();

        let ui = catalog.ui.items.iter().map(|item| {
            (
                item.path.as_str(),
                View::ComponentDetail {
                    item: item.id.clone(),
                    previews: PreviewMode::Variants,
                },
            )
        });
        let js = catalog.js.items.iter().map(|item| {
            (
                item.path.as_str(),
                View::UtilityDetail {
                    item: item.id.clone(),
                },
            )
        });

        let mut exact = 0;
        for (path, view) in ui.chain(js) {
            let location = format!("/{}", path.trim_start_matches('/'));
            let needle = page_stem(path);

            match table.resolve(&location) {
                Some(route) if route.view.item() == view.item() => {}
                Some(route) => {
                    tracing::debug!(
                        "Catalog page {} is shadowed by route {}, adding exact route",
                        path,
                        route.name
                    );
                    let page = path.trim_start_matches('/').to_string();
                    table.routes.insert(
                        exact,
                        Route {
                            name: needle,
                            matcher: Matcher::Page(page),
                            view,
                        },
                    );
                    exact += 1;
                }
                None => {
                    tracing::debug!("Adding route for catalog page {}", path);
                    table = table.route(needle.clone(), Matcher::Contains(needle), view);
                }
            }
        }

        table
    }

    /// First route matching the path.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for RouteTable {
    /// Landing first, then button, card and utility detail pages.
    fn default() -> Self {
        Self::empty()
            .route("landing", Matcher::Landing, View::Landing)
            .route(
                "ui/buttons",
                Matcher::Contains("ui/buttons".to_string()),
                View::ComponentDetail {
                    item: "buttons".to_string(),
                    previews: PreviewMode::Variants,
                },
            )
            .route(
                "ui/cards",
                Matcher::Contains("ui/cards".to_string()),
                View::ComponentDetail {
                    item: "cards".to_string(),
                    previews: PreviewMode::None,
                },
            )
            .route(
                "js/utils",
                Matcher::Contains("js/utils".to_string()),
                View::UtilityDetail {
                    item: "utils".to_string(),
                },
            )
    }
}

/// Strip a leading slash and the `.html` suffix from a page path.
fn page_stem(path: &str) -> String {
    let path = path.trim_start_matches('/');
    path.strip_suffix(".html").unwrap_or(path).to_string()
}

impl<S: Surface> Renderer<'_, S> {
    /// Render a view.
    pub fn render_view(&mut self, view: &View) {
        match view {
            View::Landing => self.render_landing(),
            View::ComponentDetail { item, previews } => {
                self.render_component_detail(item, *previews)
            }
            View::UtilityDetail { item } => self.render_utility_detail(item),
        }
    }

    /// Render whichever view the route table assigns to `path`.
    ///
    /// Returns the name of the matched route, or `None` when nothing matched
    /// and nothing was rendered.
    pub fn dispatch<'r>(&mut self, routes: &'r RouteTable, path: &str) -> Option<&'r str> {
        let Some(route) = routes.resolve(path) else {
            tracing::debug!("No route for {}", path);
            return None;
        };

        tracing::debug!("Dispatching {} to {}", path, route.name);
        self.render_view(&route.view);
        Some(route.name.as_str())
    }
}
