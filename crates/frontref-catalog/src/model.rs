//! Catalog data model.

use serde::Deserialize;

use crate::text::{PlainText, TrustedMarkup};

/// Source of the catalog shipped with frontref.
pub const BUILTIN_SOURCE: &str = include_str!("../data/catalog.toml");

/// The full documentation catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    /// UI component group
    pub ui: Group<Component>,

    /// Utility function group
    pub js: Group<UtilityEntry>,
}

/// A top-level category of documented items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Group<E> {
    /// Category heading (e.g., "UI Components")
    pub category: PlainText,

    /// Icon glyph for the category
    #[serde(default)]
    pub icon: PlainText,

    /// Items in display order
    #[serde(default = "Vec::new")]
    pub items: Vec<Item<E>>,
}

/// A documented topic, such as "Buttons", holding entries of one kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item<E> {
    /// Lookup identifier, unique within its group (never displayed)
    pub id: String,

    /// Display name
    pub name: PlainText,

    /// Icon glyph shown on the landing card
    #[serde(default)]
    pub icon: PlainText,

    /// Short description
    #[serde(default)]
    pub description: PlainText,

    /// Count label (e.g., "6 components")
    #[serde(default)]
    pub count: PlainText,

    /// Page path relative to the site root (e.g., "ui/buttons.html")
    pub path: String,

    /// Documented entries in display order
    #[serde(rename = "items", default = "Vec::new")]
    pub entries: Vec<E>,
}

/// One documented UI widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Component {
    pub name: PlainText,

    #[serde(default)]
    pub description: PlainText,

    /// Example markup, shown as escaped source
    pub code: PlainText,

    /// Interactive variants for the live preview
    #[serde(default)]
    pub variants: Vec<Variant>,

    /// Author-provided preview snippet used when there are no variants
    #[serde(default)]
    pub preview: Option<TrustedMarkup>,
}

/// One styled rendering of a component in its preview.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variant {
    /// Human label (e.g., "Small")
    pub label: PlainText,

    /// Space-separated style classes
    pub class: String,

    /// Text displayed inside the element
    pub text: PlainText,

    #[serde(default)]
    pub disabled: bool,
}

/// One documented utility function.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UtilityEntry {
    pub name: PlainText,

    #[serde(default)]
    pub description: PlainText,

    /// Where the utility is typically used
    #[serde(default)]
    pub usage: PlainText,

    /// Source code
    pub code: PlainText,

    /// Example code
    #[serde(default)]
    pub example: PlainText,

    #[serde(default)]
    pub tags: Vec<PlainText>,
}

/// Kind-independent view of an item, as shown on landing cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemCard<'a> {
    pub id: &'a str,
    pub name: &'a PlainText,
    pub icon: &'a PlainText,
    pub description: &'a PlainText,
    pub count: &'a PlainText,
    pub path: &'a str,
}

/// Kind-independent view of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView<'a> {
    pub category: &'a PlainText,
    pub icon: &'a PlainText,
    pub items: Vec<ItemCard<'a>>,
}

impl Catalog {
    /// The catalog shipped with frontref.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_SOURCE).expect("builtin catalog is valid")
    }

    /// All groups in display order, UI components first.
    pub fn groups(&self) -> Vec<GroupView<'_>> {
        vec![self.ui.view(), self.js.view()]
    }

    /// Total number of items across all groups.
    pub fn item_count(&self) -> usize {
        self.ui.items.len() + self.js.items.len()
    }
}

impl<E> Group<E> {
    /// Find an item by identifier. The first match wins.
    pub fn find(&self, id: &str) -> Option<&Item<E>> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Borrow this group as a kind-independent view.
    pub fn view(&self) -> GroupView<'_> {
        GroupView {
            category: &self.category,
            icon: &self.icon,
            items: self.items.iter().map(Item::card).collect(),
        }
    }
}

impl<E> Item<E> {
    /// Borrow the fields shown on a landing card.
    pub fn card(&self) -> ItemCard<'_> {
        ItemCard {
            id: &self.id,
            name: &self.name,
            icon: &self.icon,
            description: &self.description,
            count: &self.count,
            path: &self.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_catalog_has_both_groups() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.ui.category.as_str(), "UI Components");
        assert_eq!(catalog.js.category.as_str(), "JavaScript Utils");

        let ids: Vec<&str> = catalog.ui.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["buttons", "cards"]);
        assert_eq!(catalog.js.items[0].id, "utils");
        assert_eq!(catalog.item_count(), 3);
    }

    #[test]
    fn builtin_buttons_carry_variants() {
        let catalog = Catalog::builtin();
        let buttons = catalog.ui.find("buttons").unwrap();

        assert_eq!(buttons.entries.len(), 6);
        let primary = &buttons.entries[0];
        assert_eq!(primary.variants.len(), 4);
        assert!(primary.variants[3].disabled);
        assert!(!primary.variants[0].disabled);
        assert_eq!(
            primary.code.as_str(),
            r#"<button class="btn btn-primary">Confirm</button>"#
        );
    }

    #[test]
    fn builtin_cards_have_no_variants() {
        let catalog = Catalog::builtin();
        let cards = catalog.ui.find("cards").unwrap();

        assert_eq!(cards.entries.len(), 6);
        assert!(cards.entries.iter().all(|c| c.variants.is_empty()));
    }

    #[test]
    fn find_returns_first_match() {
        let mut catalog = Catalog::builtin();
        let mut duplicate = catalog.ui.items[0].clone();
        duplicate.name = PlainText::new("Second Buttons");
        catalog.ui.items.push(duplicate);

        let found = catalog.ui.find("buttons").unwrap();
        assert_eq!(found.name.as_str(), "Buttons");
    }

    #[test]
    fn find_missing_item_is_none() {
        let catalog = Catalog::builtin();

        assert!(catalog.ui.find("tables").is_none());
        assert!(catalog.js.find("buttons").is_none());
    }

    #[test]
    fn groups_keep_stored_order() {
        let catalog = Catalog::builtin();
        let groups = catalog.groups();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category.as_str(), "UI Components");
        assert_eq!(groups[0].items[1].path, "ui/cards.html");
        assert_eq!(groups[1].items[0].path, "js/utils.html");
    }
}
