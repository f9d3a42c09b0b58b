use anyhow::{Context, Result};

use crate::config::Config;
use crate::source::StatusSource;

pub async fn run_init(config: &Config) -> Result<()> {
    let source = config.source();

    if source.is_available().await {
        println!(
            "GitButler is already set up in {}",
            config.workspace_root.display()
        );
        return Ok(());
    }

    println!("🔧 Initializing GitButler in {}...", config.workspace_root.display());
    source
        .initialize_repository()
        .await
        .context("Failed to initialize GitButler")?;
    println!("✅ GitButler initialized.");

    Ok(())
}
