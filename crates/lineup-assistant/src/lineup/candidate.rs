// Lineup candidates: a player's projection and consistency for one week.

use serde::Serialize;

use crate::lineup::slot::Position;
use crate::stats::volatility::VolatilityProfile;

// ---------------------------------------------------------------------------
// Confidence mapping
// ---------------------------------------------------------------------------

/// Map a volatility profile to a confidence score in [0, 1].
///
/// Confidence decreases monotonically with the coefficient of variation:
/// `1 - cv / 2`, clamped. A perfectly steady player (cv 0) scores 1.0; a
/// player whose weekly swing is twice their average output (cv 2) scores 0.
pub fn confidence_from_volatility(volatility: &VolatilityProfile) -> f64 {
    (1.0 - volatility.coefficient_of_variation / 2.0).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// LineupCandidate
// ---------------------------------------------------------------------------

/// A roster player scored for a single target week.
#[derive(Debug, Clone, Serialize)]
pub struct LineupCandidate {
    pub player_id: String,
    pub position: Position,
    pub projected_points: f64,
    pub volatility: VolatilityProfile,
    pub confidence_score: f64,
}

impl LineupCandidate {
    /// Build a candidate from a projection and a volatility profile,
    /// deriving the confidence score.
    pub fn new(
        player_id: String,
        position: Position,
        projected_points: f64,
        volatility: VolatilityProfile,
    ) -> Self {
        let confidence_score = confidence_from_volatility(&volatility);
        LineupCandidate {
            player_id,
            position,
            projected_points,
            volatility,
            confidence_score,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
