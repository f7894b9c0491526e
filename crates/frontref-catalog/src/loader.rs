//! Loading catalogs from hand-authored files.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use crate::model::{Catalog, Group};

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Errors that can occur when loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {message}")]
    Read { path: String, message: String },

    #[error("Unsupported catalog format: {0} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid TOML in catalog: {0}")]
    InvalidToml(String),

    #[error("Invalid YAML in catalog: {0}")]
    InvalidYaml(String),

    #[error("Invalid JSON in catalog: {0}")]
    InvalidJson(String),

    #[error("Duplicate item id '{id}' in group '{group}'")]
    DuplicateId { group: String, id: String },

    #[error("Item '{id}' has invalid page path '{path}'")]
    InvalidPath { id: String, path: String },

    #[error("Page path '{path}' is used by more than one page")]
    DuplicatePath { path: String },
}

impl Catalog {
    /// Parse a catalog from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog =
            toml::from_str(source).map_err(|e| CatalogError::InvalidToml(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from YAML source.
    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog =
            serde_yaml::from_str(source).map_err(|e| CatalogError::InvalidYaml(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON source.
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog =
            serde_json::from_str(source).map_err(|e| CatalogError::InvalidJson(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog in the given format.
    pub fn parse(source: &str, format: Format) -> Result<Self, CatalogError> {
        match format {
            Format::Toml => Self::from_toml_str(source),
            Format::Yaml => Self::from_yaml_str(source),
            Format::Json => Self::from_json_str(source),
        }
    }

    /// Load a catalog file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let format = Format::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.display().to_string()))?;

        let source = fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&source, format)
    }

    /// Check that item ids are unique within each group, and that every item
    /// has its own relative page path.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_unique_ids(&self.ui)?;
        check_unique_ids(&self.js)?;

        // The landing page is always written at index.html
        let mut pages = HashSet::from(["index.html"]);
        for card in self.groups().iter().flat_map(|group| &group.items) {
            let page = card.path.trim_start_matches('/');
            if !is_relative_page(page) {
                return Err(CatalogError::InvalidPath {
                    id: card.id.to_string(),
                    path: card.path.to_string(),
                });
            }
            if !pages.insert(page) {
                return Err(CatalogError::DuplicatePath {
                    path: page.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Non-empty and made of plain components only.
fn is_relative_page(page: &str) -> bool {
    let path = Path::new(page);
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn check_unique_ids<E>(group: &Group<E>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for item in &group.items {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                group: group.category.to_string(),
                id: item.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const MINIMAL_TOML: &str = r#"
[ui]
category = "UI Components"

[[ui.items]]
id = "buttons"
name = "Buttons"
path = "ui/buttons.html"

[[ui.items.items]]
name = "Primary"
code = "<button>OK</button>"

[js]
category = "JavaScript Utils"
"#;

    #[test]
    fn parses_minimal_toml() {
        let catalog = Catalog::from_toml_str(MINIMAL_TOML).unwrap();

        assert_eq!(catalog.ui.items.len(), 1);
        assert!(catalog.js.items.is_empty());

        let component = &catalog.ui.items[0].entries[0];
        assert!(component.variants.is_empty());
        assert!(component.preview.is_none());
        assert!(component.description.is_empty());
    }

    #[test]
    fn parses_yaml() {
        let source = r#"
ui:
  category: UI Components
  items: []
js:
  category: JavaScript Utils
  items:
    - id: utils
      name: Utils
      path: js/utils.html
      items:
        - name: noop()
          code: "export function noop() {}"
          tags: [Utility]
"#;

        let catalog = Catalog::from_yaml_str(source).unwrap();
        let utils = catalog.js.find("utils").unwrap();

        assert_eq!(utils.entries[0].tags.len(), 1);
        assert_eq!(utils.entries[0].tags[0].as_str(), "Utility");
    }

    #[test]
    fn parses_json_with_preview_markup() {
        let source = r#"{
  "ui": {
    "category": "UI Components",
    "items": [{
      "id": "badges",
      "name": "Badges",
      "path": "ui/badges.html",
      "items": [{
        "name": "Badge",
        "code": "<span class=\"badge\">New</span>",
        "preview": "<span class=\"badge\">New</span>"
      }]
    }]
  },
  "js": { "category": "JavaScript Utils" }
}"#;

        let catalog = Catalog::from_json_str(source).unwrap();
        let badge = &catalog.ui.items[0].entries[0];

        assert_eq!(
            badge.preview.as_ref().map(|p| p.as_str()),
            Some(r#"<span class="badge">New</span>"#)
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let source = r#"
[ui]
category = "UI Components"

[[ui.items]]
id = "buttons"
name = "Buttons"
path = "ui/buttons.html"

[[ui.items]]
id = "buttons"
name = "More Buttons"
path = "ui/more-buttons.html"

[js]
category = "JavaScript Utils"
"#;

        let result = Catalog::from_toml_str(source);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateId { ref id, .. }) if id == "buttons"
        ));
    }

    #[test]
    fn rejects_paths_leaving_the_site() {
        let source = MINIMAL_TOML.replace("ui/buttons.html", "../buttons.html");

        let result = Catalog::from_toml_str(&source);

        assert!(matches!(
            result,
            Err(CatalogError::InvalidPath { ref id, .. }) if id == "buttons"
        ));
    }

    #[test]
    fn rejects_shared_page_paths() {
        let source = r#"
[ui]
category = "UI Components"

[[ui.items]]
id = "buttons"
name = "Buttons"
path = "ui/buttons.html"

[js]
category = "JavaScript Utils"

[[js.items]]
id = "utils"
name = "Utils"
path = "/ui/buttons.html"
"#;

        let result = Catalog::from_toml_str(source);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicatePath { ref path }) if path == "ui/buttons.html"
        ));

        let landing = MINIMAL_TOML.replace("ui/buttons.html", "index.html");
        assert!(matches!(
            Catalog::from_toml_str(&landing),
            Err(CatalogError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn errors_on_invalid_toml() {
        let result = Catalog::from_toml_str("[ui\ncategory = ");
        assert!(matches!(result, Err(CatalogError::InvalidToml(_))));
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("catalog.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("catalog.YML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("catalog.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("catalog.txt")), None);
    }

    #[test]
    fn loads_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("catalog.toml");
        fs::write(&path, MINIMAL_TOML).unwrap();

        let catalog = Catalog::load(&path).unwrap();

        assert_eq!(catalog.ui.items[0].id, "buttons");
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("catalog.ini");
        fs::write(&path, MINIMAL_TOML).unwrap();

        let result = Catalog::load(&path);

        assert!(matches!(result, Err(CatalogError::UnsupportedFormat(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempdir().unwrap();
        let result = Catalog::load(&temp.path().join("missing.toml"));

        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }
}
