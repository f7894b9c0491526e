//! Catalog renderer for frontref pages.
//!
//! Builds element fragments for the landing page and the detail pages, and
//! places them into the containers of a [`Page`]. A [`RouteTable`] maps the
//! document location to exactly one view.

pub mod document;
pub mod dom;
pub mod escape;
pub mod renderer;
pub mod router;

pub use document::{dispatch_document, install, Document, ReadyState};
pub use dom::{Container, Element, Node, Page, Slot, Surface};
pub use escape::escape_html;
pub use renderer::{PreviewMode, Renderer, COMPONENTS_BLOCK, SECTIONS_BLOCK, UTILS_BLOCK};
pub use router::{Matcher, Route, RouteTable, View};
