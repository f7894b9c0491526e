//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use frontref_site::SiteBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = ConfigFile::load(config_path)?;
    let config = file_config.site_config(output);

    let result = SiteBuilder::new(config)?.build().await?;

    tracing::info!(
        "Built {} pages ({} empty) in {}ms",
        result.pages,
        result.empty_pages,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
