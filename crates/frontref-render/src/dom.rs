//! Minimal element tree and the containers pages are rendered into.

use frontref_catalog::{PlainText, TrustedMarkup};

use crate::escape::escape_html;

/// A node in a rendered fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Text, escaped when serialized
    Text(String),
    /// Trusted HTML, serialized verbatim
    Markup(TrustedMarkup),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&PlainText> for Node {
    fn from(text: &PlainText) -> Self {
        Node::Text(text.as_str().to_string())
    }
}

impl From<&TrustedMarkup> for Node {
    fn from(markup: &TrustedMarkup) -> Self {
        Node::Markup(markup.clone())
    }
}

/// An HTML element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    /// Attributes in insertion order; an empty value renders as a bare flag
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element with a class attribute.
    pub fn with_class(tag: &'static str, class: &str) -> Self {
        Self::new(tag).attr("class", class)
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set a boolean attribute such as `disabled`.
    pub fn flag(self, name: &'static str) -> Self {
        self.attr(name, "")
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append escaped text.
    pub fn text(self, text: &PlainText) -> Self {
        self.child(text)
    }

    /// Append a child node in place.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Get an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a boolean or valued attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| *n == name)
    }

    /// Check the class list for a class name.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, skipping text and markup.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// All descendant elements carrying a class, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by(&mut found, &|el: &Element| el.has_class(class));
        found
    }

    /// All descendant elements with a tag name, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by(&mut found, &|el: &Element| el.tag == tag);
        found
    }

    fn collect_by<'a>(&'a self, found: &mut Vec<&'a Element>, pred: &dyn Fn(&Element) -> bool) {
        for child in self.child_elements() {
            if pred(child) {
                found.push(child);
            }
            child.collect_by(found, pred);
        }
    }

    /// Concatenated unescaped text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(el) => el.collect_text(out),
                Node::Text(text) => out.push_str(text),
                Node::Markup(markup) => out.push_str(markup.as_str()),
            }
        }
    }

    /// Serialize this element to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Serialize this element to HTML, appending to `out`.
    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }
        out.push('>');

        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Markup(markup) => out.push_str(markup.as_str()),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// The two well-known containers a page can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Landing page container
    Primary,
    /// Container shared by all detail pages
    Secondary,
}

impl Slot {
    /// Class name identifying the container in page markup.
    pub fn class_name(self) -> &'static str {
        match self {
            Slot::Primary => "container",
            Slot::Secondary => "container-sm",
        }
    }
}

/// A container element holding rendered blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    slot: Slot,
    blocks: Vec<Element>,
}

impl Container {
    /// Create an empty container for a slot.
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            blocks: Vec::new(),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Rendered blocks in insertion order.
    pub fn blocks(&self) -> &[Element] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append a block.
    pub fn append(&mut self, block: Element) {
        self.blocks.push(block);
    }

    /// First block carrying a class.
    pub fn find_block(&self, class: &str) -> Option<&Element> {
        self.blocks.iter().find(|b| b.has_class(class))
    }

    /// Number of blocks carrying a class.
    pub fn count_blocks(&self, class: &str) -> usize {
        self.blocks.iter().filter(|b| b.has_class(class)).count()
    }

    /// Remove the first block carrying a class. Returns whether one was removed.
    pub fn remove_block(&mut self, class: &str) -> bool {
        match self.blocks.iter().position(|b| b.has_class(class)) {
            Some(index) => {
                self.blocks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Serialize the blocks (the container's inner HTML).
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            block.write_html(&mut out);
        }
        out
    }

    /// Serialize the container including its own element.
    pub fn outer_html(&self) -> String {
        format!(
            r#"<div class="{}">{}</div>"#,
            self.slot.class_name(),
            self.inner_html()
        )
    }
}

/// Access to the containers a renderer draws into.
pub trait Surface {
    /// The container for a slot, if the page has one.
    fn container_mut(&mut self, slot: Slot) -> Option<&mut Container>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn container_mut(&mut self, slot: Slot) -> Option<&mut Container> {
        (**self).container_mut(slot)
    }
}

/// A page offering any subset of the two containers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    primary: Option<Container>,
    secondary: Option<Container>,
}

impl Page {
    /// A page without containers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A page with the given containers.
    pub fn with_slots(slots: &[Slot]) -> Self {
        let mut page = Self::empty();
        for slot in slots {
            match slot {
                Slot::Primary => page.primary = Some(Container::new(Slot::Primary)),
                Slot::Secondary => page.secondary = Some(Container::new(Slot::Secondary)),
            }
        }
        page
    }

    /// The landing page layout (primary container only).
    pub fn landing() -> Self {
        Self::with_slots(&[Slot::Primary])
    }

    /// The detail page layout (secondary container only).
    pub fn detail() -> Self {
        Self::with_slots(&[Slot::Secondary])
    }

    pub fn container(&self, slot: Slot) -> Option<&Container> {
        match slot {
            Slot::Primary => self.primary.as_ref(),
            Slot::Secondary => self.secondary.as_ref(),
        }
    }
}

impl Surface for Page {
    fn container_mut(&mut self, slot: Slot) -> Option<&mut Container> {
        match slot {
            Slot::Primary => self.primary.as_mut(),
            Slot::Secondary => self.secondary.as_mut(),
        }
    }
}
