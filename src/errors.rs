use thiserror::Error;

/// Pipeline stage a failure belongs to, for diagnostic purposes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PipelineStage {
    /// Fetching the games page from the ladder site
    Fetch,
    /// Locating and carving the embedded data block
    Extract,
    /// Decoding the carved payload as JSON
    Decode,
    /// Filtering games down to the target day
    Select,
    /// Reducing the day's games to a win/loss summary
    Aggregate,
    /// Rendering the summary artifact
    Render,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl PipelineStage {
    /// Get a user-friendly name for the stage
    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStage::Fetch => "Page Fetch",
            PipelineStage::Extract => "Payload Extraction",
            PipelineStage::Decode => "Payload Decode",
            PipelineStage::Select => "Day Selection",
            PipelineStage::Aggregate => "Summary Aggregation",
            PipelineStage::Render => "Summary Rendering",
        }
    }

    /// Get an actionable suggestion for the likely cause of a failure at this stage
    pub fn suggestion(&self) -> &'static str {
        match self {
            PipelineStage::Fetch => {
                "Check the configured region/realm/user ids and that the site is reachable."
            }
            PipelineStage::Extract => {
                "The page layout likely changed. Adjust data_occurrence in config.toml or update the markers."
            }
            PipelineStage::Decode => {
                "The embedded payload format changed. Inspect the page source around the data block."
            }
            PipelineStage::Select => {
                "A game record carries an unusable date. Inspect games_raw.json for the offending record."
            }
            PipelineStage::Aggregate => {
                "A game record is malformed. Inspect games_raw.json at the reported index."
            }
            PipelineStage::Render => {
                "Check the dest_format value; only json and markdown are supported."
            }
        }
    }
}

/// Errors produced by the recap pipeline. Every one is fatal to the run;
/// there is no skip-and-continue for individual records.
#[derive(Debug, Error)]
pub enum RecapError {
    /// Games page request came back with a non-success status
    #[error("games page request returned status {status}: {body}")]
    ServerStatus { status: u16, body: String },

    /// The n-th occurrence of a data block marker is absent from the page
    #[error("game data block not found: occurrence {occurrence} of {marker:?} is missing")]
    MarkersNotFound {
        marker: &'static str,
        occurrence: usize,
    },

    /// The carved payload failed to decode as JSON
    #[error("game data payload is not valid JSON: {source}")]
    MalformedPayload { source: serde_json::Error },

    /// A game record lacks a field the pipeline needs
    #[error("game record {index} has no usable {field:?} field")]
    MissingField { index: usize, field: &'static str },

    /// Requested output format is not one of the supported set
    #[error("unsupported output format {format:?} (expected \"json\" or \"markdown\")")]
    UnsupportedFormat { format: String },

    /// Summary serialization failed
    #[error("failed to encode summary: {source}")]
    Render { source: serde_json::Error },
}

impl RecapError {
    /// Stage of the pipeline this error belongs to
    pub fn stage(&self) -> PipelineStage {
        match self {
            RecapError::ServerStatus { .. } => PipelineStage::Fetch,
            RecapError::MarkersNotFound { .. } => PipelineStage::Extract,
            RecapError::MalformedPayload { .. } => PipelineStage::Decode,
            RecapError::MissingField { field: "date", .. } => PipelineStage::Select,
            RecapError::MissingField { .. } => PipelineStage::Aggregate,
            RecapError::UnsupportedFormat { .. } | RecapError::Render { .. } => {
                PipelineStage::Render
            }
        }
    }

    /// Get detailed diagnostic information about the error
    pub fn diagnostics(&self) -> String {
        let stage = self.stage();
        format!(
            "{} failed\nError: {}\nSuggestion: {}",
            stage.display_name(),
            self,
            stage.suggestion()
        )
    }
}
