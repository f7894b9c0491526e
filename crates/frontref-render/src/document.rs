//! Page lifecycle: location, ready state and load-time dispatch.

use std::sync::Arc;

use frontref_catalog::Catalog;

use crate::dom::Page;
use crate::renderer::Renderer;
use crate::router::RouteTable;

/// Loading progress of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Structure still being parsed
    Loading,
    /// Structure parsed, dependent resources may still load
    Interactive,
    /// Fully loaded
    Complete,
}

type ReadyCallback = Box<dyn FnOnce(&mut Document)>;

/// A loaded (or loading) page at a location.
pub struct Document {
    location: String,
    ready_state: ReadyState,
    page: Page,
    on_ready: Vec<ReadyCallback>,
}

impl Document {
    /// A document whose structure is still being parsed.
    pub fn loading(location: impl Into<String>, page: Page) -> Self {
        Self {
            location: location.into(),
            ready_state: ReadyState::Loading,
            page,
            on_ready: Vec::new(),
        }
    }

    /// A document whose structure has already been parsed.
    pub fn interactive(location: impl Into<String>, page: Page) -> Self {
        Self {
            ready_state: ReadyState::Interactive,
            ..Self::loading(location, page)
        }
    }

    /// Current location path.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Change the location without reloading, as client-side navigation does.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn into_page(self) -> Page {
        self.page
    }

    /// Run `callback` once the structure is parsed: later if still loading,
    /// right away otherwise.
    pub fn when_ready(&mut self, callback: impl FnOnce(&mut Document) + 'static) {
        if self.ready_state == ReadyState::Loading {
            self.on_ready.push(Box::new(callback));
        } else {
            callback(self);
        }
    }

    /// Mark the structure as parsed and run pending callbacks once each.
    pub fn finish_parsing(&mut self) {
        if self.ready_state != ReadyState::Loading {
            return;
        }

        self.ready_state = ReadyState::Interactive;
        for callback in std::mem::take(&mut self.on_ready) {
            callback(self);
        }
    }

    /// Mark the document fully loaded.
    pub fn finish_loading(&mut self) {
        self.finish_parsing();
        self.ready_state = ReadyState::Complete;
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("location", &self.location)
            .field("ready_state", &self.ready_state)
            .field("page", &self.page)
            .field("pending", &self.on_ready.len())
            .finish()
    }
}

/// Render the view for the document's current location.
pub fn dispatch_document(catalog: &Catalog, routes: &RouteTable, document: &mut Document) {
    let location = document.location().to_string();
    let mut renderer = Renderer::new(catalog, document.page_mut());
    renderer.dispatch(routes, &location);
}

/// Schedule the load-time dispatch for a document.
pub fn install(catalog: Arc<Catalog>, routes: Arc<RouteTable>, document: &mut Document) {
    document.when_ready(move |doc| dispatch_document(&catalog, &routes, doc));
}
