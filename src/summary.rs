use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::RecapError;
use crate::extract::GameRecord;

/// Calendar-day format used by the site and throughout the summary.
pub const DAY_FORMAT: &str = "%b %d %Y";

/// How the day of interest is picked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayPolicy {
    /// Keep games dated exactly yesterday (today minus one calendar day).
    #[default]
    Offset,
    /// Keep games whose whole-day distance from today is exactly one.
    /// Legacy behavior; parses every record's date instead of comparing
    /// against a precomputed target.
    DeltaMatch,
}

/// Yesterday relative to `today`, rendered in the site's day format.
pub fn target_day(today: NaiveDate) -> String {
    (today - Days::new(1)).format(DAY_FORMAT).to_string()
}

/// Filters `games` down to the day of interest, preserving their order.
/// A record without a usable date fails the whole run.
pub fn games_for_day(
    games: &[GameRecord],
    today: NaiveDate,
    policy: DayPolicy,
) -> Result<Vec<GameRecord>, RecapError> {
    let target = target_day(today);
    let mut picked = Vec::new();

    for (index, game) in games.iter().enumerate() {
        let day = game.day().ok_or(RecapError::MissingField {
            index,
            field: "date",
        })?;
        let keep = match policy {
            DayPolicy::Offset => day == target,
            DayPolicy::DeltaMatch => {
                let game_day = NaiveDate::parse_from_str(&day, DAY_FORMAT).map_err(|_| {
                    RecapError::MissingField {
                        index,
                        field: "date",
                    }
                })?;
                (today - game_day).num_days() == 1
            }
        };
        if keep {
            debug!(index, day = %day, "game selected");
            picked.push(game.clone());
        }
    }

    Ok(picked)
}

/// Result and bracket of a single game, e.g. a `W` in `3v3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummaryEntry {
    pub result: String,
    pub mode: String,
}

/// Win/loss digest for one calendar day. Field order is the serialized
/// key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: String,
    pub winrate: String,
    pub matches: Vec<GameSummaryEntry>,
}

/// Reduces the day's games to the summary record, in input order. Fails on
/// the first record missing a resolution or members roster.
pub fn aggregate(games: &[GameRecord], date: &str) -> Result<DaySummary, RecapError> {
    let mut matches = Vec::with_capacity(games.len());
    let mut losses = 0usize;

    for (index, game) in games.iter().enumerate() {
        let resolution = game.resolution.as_deref().ok_or(RecapError::MissingField {
            index,
            field: "resolution",
        })?;
        let members = game.members.as_ref().ok_or(RecapError::MissingField {
            index,
            field: "members",
        })?;

        let result = if resolution == "Loss" { "L" } else { "W" };
        if result == "L" {
            losses += 1;
        }
        matches.push(GameSummaryEntry {
            result: result.to_string(),
            mode: format!("{}v{}", members.len(), members.len()),
        });
    }

    let wins = matches.len() - losses;
    let winrate = if matches.is_empty() {
        "0W / 0L (No games)".to_string()
    } else {
        let pct = round_half_even(wins as f64 / matches.len() as f64 * 100.0);
        format!("{}W / {}L ({}%)", wins, losses, pct)
    };

    Ok(DaySummary {
        date: date.to_string(),
        winrate,
        matches,
    })
}

/// Banker's rounding to the nearest integer percentage.
fn round_half_even(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor == 0.5 {
        let below = floor as i64;
        if below % 2 == 0 {
            below
        } else {
            below + 1
        }
    } else {
        value.round() as i64
    }
}
