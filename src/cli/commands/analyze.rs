use anyhow::{Context, Result};
use extract::RigAnalyst;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::handlers::analyze::analyze_bytes;

/// Analyze plan documents from disk and print the results as JSON.
pub async fn analyze(files: &[PathBuf], pretty: bool) -> Result<()> {
    let config = AppConfig::load()?;
    let analyst = RigAnalyst::from_settings(config.llm_settings())?;

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        info!("Analyzing {}", path.display());
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let analysis = analyze_bytes(&analyst, &display_name(path), &data)
            .await
            .with_context(|| format!("Failed to analyze {}", path.display()))?;
        debug!("Finished {}", path.display());
        results.push(analysis);
    }

    let output = if pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{output}");
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
        .unwrap_or_else(|| path.display().to_string())
}
