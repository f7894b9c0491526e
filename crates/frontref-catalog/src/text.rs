//! Text values with an explicit trust level.
//!
//! Catalog fields are either [`PlainText`], which renderers must escape, or
//! [`TrustedMarkup`], which is author-controlled HTML inserted verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display text that is always HTML-escaped when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlainText(String);

impl PlainText {
    /// Wrap a string as plain text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw, unescaped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PlainText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for PlainText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for PlainText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author-controlled HTML inserted into pages without escaping.
///
/// Only construct this from content the site author wrote. Anything that may
/// carry outside input belongs in [`PlainText`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Mark an HTML snippet as trusted.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
