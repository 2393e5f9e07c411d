use std::str::FromStr;

use crate::errors::RecapError;
use crate::summary::DaySummary;

/// Supported renderings of a day summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RecapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "markdown" => Ok(OutputFormat::Markdown),
            other => Err(RecapError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Renders the summary in the requested format. JSON is the canonical form;
/// markdown wraps it in a winrate header and a fenced block.
pub fn render(summary: &DaySummary, format: OutputFormat) -> Result<String, RecapError> {
    let json =
        serde_json::to_string_pretty(summary).map_err(|source| RecapError::Render { source })?;
    match format {
        OutputFormat::Json => Ok(json),
        OutputFormat::Markdown => Ok(format!(
            "## Winrate {}\n\n```json\n{}\n```",
            summary.winrate, json
        )),
    }
}
