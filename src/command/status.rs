use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::session::NOT_A_REPOSITORY;
use crate::source::StatusSource;
use crate::tree::{self, RenderOptions};

pub async fn run_status(config: &Config, json: bool, expand_all: bool) -> Result<()> {
    let source = config.source();

    if !source.is_available().await {
        println!("ℹ️  {}", NOT_A_REPOSITORY);
        return Ok(());
    }

    let status = source
        .fetch_status(config.include_files)
        .await
        .context("Failed to fetch workspace status")?;

    let nodes = tree::build(&status, RenderOptions { expand_all }, Utc::now());

    if json {
        let out = serde_json::to_string_pretty(&nodes).context("Failed to serialize tree")?;
        println!("{}", out);
    } else if nodes.is_empty() {
        println!("✅ Workspace is clean: no stacks, no unassigned changes.");
    } else {
        print!("{}", tree::render_text(&nodes));
    }

    Ok(())
}
