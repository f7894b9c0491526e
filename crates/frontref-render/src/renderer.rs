//! Rendering catalog views into page containers.
//!
//! Every render operation owns one block class inside its container. Before
//! appending a fresh block it removes the block it rendered last time, so
//! repeated calls never duplicate markup.

use frontref_catalog::{Catalog, Component, GroupView, ItemCard, PlainText, UtilityEntry, Variant};

use crate::dom::{Element, Slot, Surface};

/// Block class owned by the landing render.
pub const SECTIONS_BLOCK: &str = "sections";

/// Block class owned by the component detail render.
pub const COMPONENTS_BLOCK: &str = "components";

/// Block class owned by the utility detail render.
pub const UTILS_BLOCK: &str = "utils";

const USAGE_LABEL: &str = "Usage";
const CODE_LABEL: &str = "Code";
const EXAMPLE_LABEL: &str = "Example";

/// Whether a component detail page shows live previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Preview area with one interactive element per variant
    #[default]
    Variants,
    /// No preview area
    None,
}

/// Renders catalog views into the containers of a surface.
pub struct Renderer<'a, S> {
    catalog: &'a Catalog,
    surface: S,
}

impl<'a, S: Surface> Renderer<'a, S> {
    /// Create a renderer drawing into `surface`.
    pub fn new(catalog: &'a Catalog, surface: S) -> Self {
        Self { catalog, surface }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Give back the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Render the landing page: one section per group, one card per item.
    pub fn render_landing(&mut self) {
        let Some(container) = self.surface.container_mut(Slot::Primary) else {
            tracing::debug!("Landing container absent, skipping render");
            return;
        };

        container.remove_block(SECTIONS_BLOCK);

        let mut sections = Element::with_class("div", SECTIONS_BLOCK);
        for group in self.catalog.groups() {
            sections.push(group_section(&group));
        }

        container.append(sections);
    }

    /// Render the detail page of a UI item.
    ///
    /// Unknown ids leave the container untouched.
    pub fn render_component_detail(&mut self, item_id: &str, previews: PreviewMode) {
        let Some(container) = self.surface.container_mut(Slot::Secondary) else {
            tracing::debug!("Detail container absent, skipping '{}'", item_id);
            return;
        };

        let Some(item) = self.catalog.ui.find(item_id) else {
            tracing::debug!("UI item '{}' not in catalog, skipping render", item_id);
            return;
        };

        container.remove_block(COMPONENTS_BLOCK);

        let mut block = Element::with_class("div", COMPONENTS_BLOCK);
        for component in &item.entries {
            block.push(component_block(component, previews));
        }

        container.append(block);
    }

    /// Render the detail page of a utility item.
    ///
    /// Unknown ids leave the container untouched.
    pub fn render_utility_detail(&mut self, item_id: &str) {
        let Some(container) = self.surface.container_mut(Slot::Secondary) else {
            tracing::debug!("Detail container absent, skipping '{}'", item_id);
            return;
        };

        let Some(item) = self.catalog.js.find(item_id) else {
            tracing::debug!("Utility item '{}' not in catalog, skipping render", item_id);
            return;
        };

        container.remove_block(UTILS_BLOCK);

        let mut block = Element::with_class("div", UTILS_BLOCK);
        for util in &item.entries {
            block.push(utility_block(util));
        }

        container.append(block);
    }
}

fn group_section(group: &GroupView<'_>) -> Element {
    let mut grid = Element::with_class("div", "grid");
    for card in &group.items {
        grid.push(item_card(card));
    }

    Element::with_class("section", "section")
        .child(Element::with_class("h2", "section-title").text(group.category))
        .child(grid)
}

fn item_card(card: &ItemCard<'_>) -> Element {
    Element::with_class("a", "card").attr("href", card.path).child(
        Element::with_class("div", "card-body")
            .child(Element::with_class("div", "card-icon").text(card.icon))
            .child(Element::with_class("div", "card-title").text(card.name))
            .child(Element::with_class("div", "card-desc").text(card.description))
            .child(Element::with_class("div", "card-meta").text(card.count)),
    )
}

fn component_block(component: &Component, previews: PreviewMode) -> Element {
    let title = Element::new("div")
        .child(Element::with_class("h2", "component-title").text(&component.name))
        .child(Element::with_class("p", "component-desc").text(&component.description));

    let mut el = Element::with_class("div", "component").child(title);

    if previews == PreviewMode::Variants {
        el.push(preview_area(component));
    }

    el.child(Element::with_class("div", "code-block").text(&component.code))
}

fn preview_area(component: &Component) -> Element {
    let mut preview = Element::with_class("div", "preview");

    if component.variants.is_empty() {
        if let Some(markup) = &component.preview {
            preview.push(markup);
        }
    } else {
        for variant in &component.variants {
            preview.push(variant_button(variant));
        }
    }

    preview
}

fn variant_button(variant: &Variant) -> Element {
    let button = Element::new("button")
        .attr("class", variant.class.as_str())
        .attr("title", variant.label.as_str())
        .text(&variant.text);

    if variant.disabled {
        button.flag("disabled")
    } else {
        button
    }
}

fn utility_block(util: &UtilityEntry) -> Element {
    let title = Element::new("div")
        .child(Element::with_class("div", "util-name").text(&util.name))
        .child(Element::with_class("p", "util-desc").text(&util.description));

    let mut el = Element::with_class("div", "util")
        .child(title)
        .child(util_section(
            USAGE_LABEL,
            Element::with_class("p", "util-usage").text(&util.usage),
        ))
        .child(util_section(CODE_LABEL, code_block(&util.code)))
        .child(util_section(EXAMPLE_LABEL, code_block(&util.example)));

    if !util.tags.is_empty() {
        let mut tags = Element::with_class("div", "tags");
        for tag in &util.tags {
            tags.push(Element::with_class("span", "tag category").text(tag));
        }
        el.push(tags);
    }

    el
}

fn util_section(label: &str, body: Element) -> Element {
    Element::with_class("div", "util-section")
        .child(Element::with_class("div", "util-label").text(&PlainText::new(label)))
        .child(body)
}

fn code_block(code: &PlainText) -> Element {
    Element::with_class("div", "code-block").text(code)
}
