// Configuration loading and parsing (league.toml, strategy.toml, roster.toml).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lineup::optimizer::{RosterState, SlotAssignment};
use crate::lineup::risk::RiskThresholds;
use crate::lineup::slot::Slot;
use crate::records::MAX_WEEK;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub risk: RiskThresholds,
    pub roster: RosterConfig,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub platform: String,
    /// The stat key treated as "points" throughout (PPR scoring by default).
    #[serde(default = "default_scoring_metric")]
    pub scoring_metric: String,
    #[serde(default = "default_weeks_per_season")]
    pub weeks_per_season: u8,
    /// Slot label -> count, e.g. `{"QB": 1, "RB": 2, "FLEX": 1, "BN": 6}`.
    pub lineup: HashMap<String, usize>,
}

fn default_scoring_metric() -> String {
    "pts_ppr".to_string()
}

fn default_weeks_per_season() -> u8 {
    MAX_WEEK
}

// ---------------------------------------------------------------------------
// strategy.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    /// Omitting the section keeps the fixed constants from `lineup::risk`.
    #[serde(default)]
    risk: RiskThresholds,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub stats: String,
    pub projections: String,
}

// ---------------------------------------------------------------------------
// roster.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[roster]` table in roster.toml.
#[derive(Debug, Clone, Deserialize)]
struct RosterFile {
    roster: RosterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    pub season: u16,
    pub week: u8,
    pub starters: Vec<StarterEntry>,
    #[serde(default)]
    pub bench: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarterEntry {
    pub slot: String,
    pub player_id: String,
}

impl RosterConfig {
    /// Parse the configured starter entries into the optimizer's roster
    /// shape. Slot strings must name startable slots.
    pub fn to_roster_state(&self) -> Result<RosterState, ConfigError> {
        let mut starters = Vec::with_capacity(self.starters.len());
        for entry in &self.starters {
            let slot = Slot::from_str_pos(&entry.slot).ok_or_else(|| {
                ConfigError::ValidationError {
                    field: "roster.starters.slot".into(),
                    message: format!("unknown slot '{}'", entry.slot),
                }
            })?;
            if !slot.is_startable() {
                return Err(ConfigError::ValidationError {
                    field: "roster.starters.slot".into(),
                    message: format!("'{}' is not a startable slot", entry.slot),
                });
            }
            starters.push(SlotAssignment {
                slot,
                player_id: entry.player_id.clone(),
            });
        }
        Ok(RosterState {
            starters,
            bench: self.bench.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml`,
/// `config/strategy.toml`, and `config/roster.toml`, all relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let strategy_path = config_dir.join("strategy.toml");
    let strategy_text = read_file(&strategy_path)?;
    let strategy_file: StrategyFile =
        toml::from_str(&strategy_text).map_err(|e| ConfigError::ParseError {
            path: strategy_path.clone(),
            source: e,
        })?;

    let roster_path = config_dir.join("roster.toml");
    let roster_text = read_file(&roster_path)?;
    let roster_file: RosterFile =
        toml::from_str(&roster_text).map_err(|e| ConfigError::ParseError {
            path: roster_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        risk: strategy_file.risk,
        roster: roster_file.roster,
        data_paths: strategy_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for name in ["league.toml", "strategy.toml", "roster.toml"] {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if !source.is_file() || target.exists() {
            continue;
        }
        std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying default config files first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    // League validations
    let weeks = config.league.weeks_per_season;
    if weeks == 0 || weeks > MAX_WEEK {
        return Err(ConfigError::ValidationError {
            field: "league.weeks_per_season".into(),
            message: format!("must be between 1 and {MAX_WEEK}, got {weeks}"),
        });
    }

    if config.league.scoring_metric.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.scoring_metric".into(),
            message: "must not be empty".into(),
        });
    }

    let mut startable_slots = 0usize;
    for (key, &count) in &config.league.lineup {
        let Some(slot) = Slot::from_str_pos(key) else {
            return Err(ConfigError::ValidationError {
                field: "league.lineup".into(),
                message: format!("unknown slot '{key}'"),
            });
        };
        if slot.is_startable() {
            startable_slots += count;
        }
    }
    if startable_slots == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.lineup".into(),
            message: "must define at least one startable slot".into(),
        });
    }

    // Risk thresholds
    let risk = &config.risk;
    for (name, val) in [
        ("risk.low_confidence_floor", risk.low_confidence_floor),
        ("risk.high_confidence_ceiling", risk.high_confidence_ceiling),
    ] {
        if !(0.0..=1.0).contains(&val) {
            return Err(ConfigError::ValidationError {
                field: name.into(),
                message: format!("must be between 0.0 and 1.0 inclusive, got {val}"),
            });
        }
    }
    if risk.high_confidence_ceiling > risk.low_confidence_floor {
        return Err(ConfigError::ValidationError {
            field: "risk.high_confidence_ceiling".into(),
            message: format!(
                "must not exceed low_confidence_floor ({} > {})",
                risk.high_confidence_ceiling, risk.low_confidence_floor
            ),
        });
    }

    // Roster validations
    if config.roster.week == 0 || config.roster.week > weeks {
        return Err(ConfigError::ValidationError {
            field: "roster.week".into(),
            message: format!("must be between 1 and {weeks}, got {}", config.roster.week),
        });
    }
    if config.roster.starters.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.starters".into(),
            message: "must not be empty".into(),
        });
    }
    for entry in &config.roster.starters {
        if entry.player_id.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "roster.starters.player_id".into(),
                message: "must not be empty".into(),
            });
        }
    }
    // Surfaces bad slot strings at load time rather than at optimize time.
    config.roster.to_roster_state()?;

    // Data paths
    for (name, path) in [
        ("data_paths.stats", &config.data_paths.stats),
        ("data_paths.projections", &config.data_paths.projections),
    ] {
        if path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.into(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
