//! On-disk artifacts and destination publishing.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::extract::GameRecord;
use crate::render::{render, OutputFormat};
use crate::summary::DaySummary;

/// Writes the decoded game array next to the summary for later inspection.
pub fn write_raw_games(games: &[GameRecord], dir: &Path) -> Result<PathBuf, anyhow::Error> {
    let path = dir.join("games_raw.json");
    let content = serde_json::to_string_pretty(games)?;
    std::fs::write(&path, content)?;
    debug!(path = %path.display(), "archived raw games");
    Ok(path)
}

/// File name of the day's summary artifact, e.g. `summary Jun 14 2024.json`.
pub fn summary_file_name(summary: &DaySummary, format: OutputFormat) -> String {
    format!("summary {}.{}", summary.date, format.file_extension())
}

/// Writes the summary artifacts into `dir`. The JSON form is always written;
/// the markdown form only when requested. Returns the path of the artifact
/// matching `format`, which is the one that gets published.
pub fn write_summary(
    summary: &DaySummary,
    format: OutputFormat,
    dir: &Path,
) -> Result<PathBuf, anyhow::Error> {
    let json_path = dir.join(summary_file_name(summary, OutputFormat::Json));
    std::fs::write(&json_path, render(summary, OutputFormat::Json)?)?;
    debug!(path = %json_path.display(), "wrote summary");

    if format == OutputFormat::Json {
        return Ok(json_path);
    }

    let path = dir.join(summary_file_name(summary, format));
    std::fs::write(&path, render(summary, format)?)?;
    debug!(path = %path.display(), "wrote summary");
    Ok(path)
}

/// Copies a finished artifact into the destination directory.
pub fn publish(path: &Path, dest_dir: &Path) -> Result<PathBuf, anyhow::Error> {
    if !dest_dir.exists() {
        return Err(anyhow::anyhow!(
            "destination path does not exist: {}",
            dest_dir.display()
        ));
    }
    let file_name = path.file_name().ok_or_else(|| {
        anyhow::anyhow!("artifact path has no file name: {}", path.display())
    })?;
    let dest = dest_dir.join(file_name);
    std::fs::copy(path, &dest)?;
    info!(dest = %dest.display(), "summary copied");
    Ok(dest)
}
