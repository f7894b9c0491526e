//! Preview server command.

use std::path::Path;

use anyhow::Result;
use frontref_server::DevServer;

use crate::config::ConfigFile;

/// Run the preview server.
pub async fn run(config_path: &Path, port: Option<u16>, open: bool) -> Result<()> {
    let config = ConfigFile::load(config_path)?.dev_config(port, open);

    tracing::info!("Starting preview server on port {}", config.port);

    DevServer::new(config).start().await?;

    Ok(())
}
