//! Catalog model for frontref documentation.
//!
//! This crate describes the documented UI components and utility functions as
//! a read-only tree, and loads that tree from hand-authored TOML, YAML or JSON.

pub mod loader;
pub mod model;
pub mod text;

pub use loader::{CatalogError, Format};
pub use model::{
    Catalog, Component, Group, GroupView, Item, ItemCard, UtilityEntry, Variant, BUILTIN_SOURCE,
};
pub use text::{PlainText, TrustedMarkup};
