//! Extraction of the games payload embedded in the ladder site's HTML.
//!
//! The site inlines the match history as a JavaScript assignment inside a
//! CDATA comment pair. The pair of interest is not the first on the page,
//! so location is by occurrence count, not by first match.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::RecapError;

/// Comment pair wrapping the inline script that assigns the games data.
pub const DATA_BLOCK_OPEN: &str = "/*<![CDATA[*/";
pub const DATA_BLOCK_CLOSE: &str = "/*]]>*/";

/// Assignment prefix exactly as the site emits it, double space included.
pub const GAMES_VAR_PREFIX: &str = "var gamesData  = ";

/// The games block is the third CDATA pair on the page; the earlier pairs
/// wrap unrelated inline scripts.
pub const DEFAULT_DATA_OCCURRENCE: usize = 3;

/// One game as decoded from the payload. Fields the pipeline reads are
/// declared; everything else rides along untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// "Win" or "Loss"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameRecord {
    /// Calendar day of the game: the first three whitespace-separated tokens
    /// of the raw timestamp, e.g. "Jun 14 2024" out of "Jun 14 2024, 10:05pm".
    pub fn day(&self) -> Option<String> {
        let date = self.date.as_deref()?;
        let tokens: Vec<&str> = date.split_whitespace().take(3).collect();
        Some(tokens.join(" "))
    }
}

/// Byte offset of the n-th (1-indexed) non-overlapping occurrence of `marker`
/// in `text`, scanning left to right. `None` when fewer than `n` occurrences
/// exist.
pub fn find_nth(text: &str, marker: &str, n: usize) -> Option<usize> {
    if n == 0 || marker.is_empty() {
        return None;
    }
    let mut hit = text.find(marker)?;
    for _ in 1..n {
        let from = hit + marker.len();
        hit = text[from..].find(marker)? + from;
    }
    Some(hit)
}

/// Carves the games payload out of the page: the text between the
/// `occurrence`-th marker pair, trimmed, with the assignment prefix stripped.
/// The returned slice is the JSON source handed to the decoder.
pub fn extract_raw(page: &str, occurrence: usize) -> Result<&str, RecapError> {
    let open = find_nth(page, DATA_BLOCK_OPEN, occurrence).ok_or(RecapError::MarkersNotFound {
        marker: DATA_BLOCK_OPEN,
        occurrence,
    })?;
    let close = find_nth(page, DATA_BLOCK_CLOSE, occurrence).ok_or(RecapError::MarkersNotFound {
        marker: DATA_BLOCK_CLOSE,
        occurrence,
    })?;

    let body_start = open + DATA_BLOCK_OPEN.len();
    if close < body_start {
        // Close marker sits before the open marker; the pair is not a block.
        return Err(RecapError::MarkersNotFound {
            marker: DATA_BLOCK_CLOSE,
            occurrence,
        });
    }

    let body = page[body_start..close].trim();
    Ok(body.strip_prefix(GAMES_VAR_PREFIX).unwrap_or(body).trim_start())
}

/// Locates, carves and decodes the payload into game records, in page order.
pub fn extract_games(page: &str, occurrence: usize) -> Result<Vec<GameRecord>, RecapError> {
    let raw = extract_raw(page, occurrence)?;
    debug!(bytes = raw.len(), "carved games payload");
    serde_json::from_str(raw).map_err(|source| RecapError::MalformedPayload { source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> GameRecord {
        GameRecord {
            date: Some(date.to_string()),
            resolution: None,
            members: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn day_takes_first_three_tokens() {
        assert_eq!(
            record("Jun 14 2024, 10:05pm").day().as_deref(),
            Some("Jun 14 2024")
        );
    }

    #[test]
    fn day_collapses_extra_whitespace() {
        assert_eq!(
            record("  Jun  14   2024 ").day().as_deref(),
            Some("Jun 14 2024")
        );
    }

    #[test]
    fn find_nth_advances_past_each_hit() {
        assert_eq!(find_nth("aaaa", "aa", 1), Some(0));
        assert_eq!(find_nth("aaaa", "aa", 2), Some(2));
        assert_eq!(find_nth("aaaa", "aa", 3), None);
    }

    #[test]
    fn prefix_is_stripped_exactly() {
        let page = format!(
            "{}\n{}[]\n{}",
            DATA_BLOCK_OPEN, GAMES_VAR_PREFIX, DATA_BLOCK_CLOSE
        );
        assert_eq!(extract_raw(&page, 1).unwrap(), "[]");
    }

    #[test]
    fn single_spaced_prefix_is_left_for_the_decoder() {
        // Not the literal the site emits, so it is not stripped and the
        // decode fails rather than guessing.
        let page = format!(
            "{}var gamesData = []{}",
            DATA_BLOCK_OPEN, DATA_BLOCK_CLOSE
        );
        let err = extract_games(&page, 1).expect_err("decode should fail");
        assert!(matches!(err, RecapError::MalformedPayload { .. }));
    }

    #[test]
    fn close_before_open_is_not_a_block() {
        let page = format!("{}{}", DATA_BLOCK_CLOSE, DATA_BLOCK_OPEN);
        let err = extract_raw(&page, 1).expect_err("reversed pair");
        assert!(matches!(err, RecapError::MarkersNotFound { .. }));
    }
}
