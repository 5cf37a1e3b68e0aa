// Weekly stat and projection record loading and normalization.
//
// Reads Sleeper-export-format CSV files: one row per player per week, with
// player_id/season/week columns followed by whatever stat columns the export
// includes (pts_ppr, rec_yd, position, status, ...). Stat columns are kept
// untyped here; the series builder owns all numeric coercion.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Highest week number in an NFL fantasy season.
pub const MAX_WEEK: u8 = 18;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One player's raw stat line (or projection line) for a single week.
///
/// Immutable once materialized. Actual results and forecasts share this
/// shape; the caller keeps the two sets separate.
#[derive(Debug, Clone)]
pub struct WeeklyRecord {
    pub player_id: String,
    pub season: u16,
    pub week: u8,
    pub stats: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw weekly CSV row. All stat columns are absorbed untyped via
/// `#[serde(flatten)]` so exports with different column sets load the same
/// way.
#[derive(Debug, Deserialize)]
struct RawWeeklyRow {
    player_id: String,
    season: u16,
    week: u8,
    #[serde(flatten)]
    stats: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_records_from_reader<R: Read>(rdr: R) -> Result<Vec<WeeklyRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut records = Vec::new();
    for result in reader.deserialize::<RawWeeklyRow>() {
        match result {
            Ok(raw) => {
                let player_id = raw.player_id.trim().to_string();
                if player_id.is_empty() {
                    warn!("skipping weekly row with empty player_id");
                    continue;
                }
                if raw.week == 0 || raw.week > MAX_WEEK {
                    warn!(
                        "skipping weekly row for '{}': week {} out of range",
                        player_id, raw.week
                    );
                    continue;
                }
                records.push(WeeklyRecord {
                    player_id,
                    season: raw.season,
                    week: raw.week,
                    stats: raw.stats,
                });
            }
            Err(e) => {
                warn!("skipping malformed weekly row: {}", e);
            }
        }
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load weekly records from a CSV file. Used for both actual stat lines and
/// projection lines; the two live in separate files.
pub fn load_weekly_records(path: &Path) -> Result<Vec<WeeklyRecord>, RecordError> {
    let file = std::fs::File::open(path).map_err(|e| RecordError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_records_from_reader(file).map_err(|e| RecordError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Grouping helper
// ---------------------------------------------------------------------------

/// Group records by player id, preserving input order within each player.
pub fn group_by_player(records: Vec<WeeklyRecord>) -> HashMap<String, Vec<WeeklyRecord>> {
    let mut grouped: HashMap<String, Vec<WeeklyRecord>> = HashMap::new();
    for record in records {
        grouped.entry(record.player_id.clone()).or_default().push(record);
    }
    grouped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
