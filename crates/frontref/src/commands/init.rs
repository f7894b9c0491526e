//! Write a starter config and catalog.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use frontref_catalog::BUILTIN_SOURCE;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing frontref...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    write_starter(config_path, DEFAULT_CONFIG, yes)?;
    write_starter(&root.join("catalog.toml"), BUILTIN_SOURCE, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'frontref dev' to start the preview server.");

    Ok(())
}

/// Write a file unless it exists; `overwrite` replaces existing files.
fn write_starter(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# frontref configuration

[site]
# Site title
title = "Frontend Reference"

# Base URL (for deployment)
base_url = "/"

# Catalog file (TOML, YAML or JSON); the builtin catalog is used when absent
catalog = "catalog.toml"

# Stylesheets linked from every page
styles = []

# Directory copied into assets/
# assets = "assets"

[build]
# Output directory for built site
output = "dist"

[dev]
# Preview server port
port = 7777
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use frontref_catalog::Catalog;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_loadable_starter_files() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("frontref.toml");

        run(&config_path, false).await.unwrap();

        let config = ConfigFile::load(&config_path).unwrap();
        assert_eq!(config.site.title, "Frontend Reference");

        let catalog = Catalog::load(&temp.path().join("catalog.toml")).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[tokio::test]
    async fn starter_in_subdirectory_builds() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        let config_path = site.join("frontref.toml");

        run(&config_path, false).await.unwrap();

        let config = ConfigFile::load(&config_path).unwrap();
        let builder = frontref_site::SiteBuilder::new(config.site_config(None)).unwrap();
        let result = builder.build().await.unwrap();

        assert_eq!(result.output_dir, site.join("dist"));
        assert!(site.join("dist/index.html").exists());
    }

    #[tokio::test]
    async fn keeps_existing_files_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("frontref.toml");
        fs::write(&config_path, "[site]\ntitle = \"Mine\"\n").unwrap();

        run(&config_path, false).await.unwrap();
        assert!(fs::read_to_string(&config_path).unwrap().contains("Mine"));

        run(&config_path, true).await.unwrap();
        assert!(!fs::read_to_string(&config_path).unwrap().contains("Mine"));
    }
}
