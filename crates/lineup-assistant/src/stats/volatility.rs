// Player volatility profiles derived from weekly scoring history.

use serde::Serialize;

use crate::records::WeeklyRecord;
use crate::stats::describe::compute_box;
use crate::stats::series::{build_series, NumericSeries};

// ---------------------------------------------------------------------------
// Unknown-player prior
// ---------------------------------------------------------------------------

/// Standard deviation assumed for a player with no scoring history.
///
/// A league-average-ish prior for rookies and unknowns, not a computed
/// statistic.
pub const DEFAULT_STD_DEV: f64 = 6.0;

/// Coefficient of variation assumed for a player with no scoring history.
pub const DEFAULT_CV: f64 = 0.6;

// ---------------------------------------------------------------------------
// VolatilityProfile
// ---------------------------------------------------------------------------

/// Week-to-week scoring variability for a single player.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VolatilityProfile {
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
    pub games_analyzed: usize,
}

impl VolatilityProfile {
    /// The fixed profile used when a player has no history at all.
    pub fn unknown() -> Self {
        VolatilityProfile {
            std_dev: DEFAULT_STD_DEV,
            coefficient_of_variation: DEFAULT_CV,
            games_analyzed: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// Compute a volatility profile from an already-built scoring series.
///
/// An empty series yields the fixed unknown-player prior. Otherwise the
/// profile carries the population standard deviation and coefficient of
/// variation over the full series.
pub fn assess_series(series: &NumericSeries) -> VolatilityProfile {
    let values = series.values();
    match compute_box(&values) {
        None => VolatilityProfile::unknown(),
        Some(stats) => VolatilityProfile {
            std_dev: stats.std_dev,
            coefficient_of_variation: stats.coefficient_of_variation,
            games_analyzed: values.len(),
        },
    }
}

/// Compute a volatility profile directly from a player's weekly records,
/// using `metric_key` as the actual-points metric.
pub fn assess_history(records: &[WeeklyRecord], metric_key: &str) -> VolatilityProfile {
    assess_series(&build_series(records, metric_key))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
