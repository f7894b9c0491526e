//! Configuration file (frontref.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use frontref_server::DevServerConfig;
use frontref_site::SiteConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub dev: DevSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Catalog file; the builtin catalog is used when absent
    pub catalog: Option<PathBuf>,
    /// Paths to CSS stylesheets to include
    #[serde(default)]
    pub styles: Vec<String>,
    /// Directory copied verbatim into the output
    pub assets: Option<PathBuf>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            catalog: None,
            styles: vec![],
            assets: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DevSection {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DevSection {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_title() -> String {
    "Frontend Reference".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_port() -> u16 {
    7777
}

impl ConfigFile {
    /// Load configuration if the file exists.
    /// Returns an error if the config file exists but is malformed.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(catalog) = &mut self.site.catalog {
            *catalog = base.join(&*catalog);
        }
        if let Some(assets) = &mut self.site.assets {
            *assets = base.join(&*assets);
        }
        for style in &mut self.site.styles {
            *style = base.join(&*style).display().to_string();
        }
        self.build.output = base.join(&self.build.output);
    }

    /// Export settings, with an optional output directory override.
    pub fn site_config(&self, output: Option<PathBuf>) -> SiteConfig {
        SiteConfig {
            catalog: self.site.catalog.clone(),
            output_dir: output.unwrap_or_else(|| self.build.output.clone()),
            title: self.site.title.clone(),
            base_url: self.site.base_url.clone(),
            styles: self.site.styles.clone(),
            assets_dir: self.site.assets.clone(),
        }
    }

    /// Preview server settings, with an optional port override.
    pub fn dev_config(&self, port: Option<u16>, open: bool) -> DevServerConfig {
        DevServerConfig {
            catalog: self.site.catalog.clone(),
            assets_dir: self.site.assets.clone(),
            styles: self.site.styles.clone(),
            title: self.site.title.clone(),
            port: port.unwrap_or(self.dev.port),
            open,
            ..Default::default()
        }
    }
}
