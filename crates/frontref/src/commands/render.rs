//! Render a single location to stdout.

use std::path::Path;

use anyhow::Result;
use frontref_render::{Page, Renderer, RouteTable, Slot};
use frontref_site::load_catalog;

use crate::config::ConfigFile;

/// Run the render command.
pub fn run(config_path: &Path, path: &str) -> Result<()> {
    let config = ConfigFile::load(config_path)?;
    let catalog = load_catalog(config.site.catalog.as_deref())?;

    let html = render_location(&catalog, path);
    if html.is_empty() {
        tracing::warn!("Nothing rendered for {}", path);
    } else {
        println!("{}", html);
    }

    Ok(())
}

/// Dispatch `path` on a page offering both containers and return the
/// HTML of every container that received content.
fn render_location(catalog: &frontref_catalog::Catalog, path: &str) -> String {
    let routes = RouteTable::for_catalog(catalog);
    let mut renderer = Renderer::new(catalog, Page::with_slots(&[Slot::Primary, Slot::Secondary]));
    renderer.dispatch(&routes, path);

    let page = renderer.into_surface();
    [Slot::Primary, Slot::Secondary]
        .into_iter()
        .filter_map(|slot| page.container(slot))
        .filter(|container| !container.is_empty())
        .map(|container| container.outer_html())
        .collect::<Vec<_>>()
        .join("\n")
}
