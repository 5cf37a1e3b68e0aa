// Projection ranges: confidence bands around a single projected point total.

use serde::Serialize;

use crate::stats::volatility::VolatilityProfile;

/// Z-score for a two-sided 90% interval under a normal approximation.
/// A fixed configuration constant, not a derived statistic.
pub const CONFIDENCE_90_Z: f64 = 1.645;

// ---------------------------------------------------------------------------
// ProjectedRange
// ---------------------------------------------------------------------------

/// A projected point total with ±1σ and 90%-confidence bands.
///
/// Lower bounds are clamped at 0: fantasy point totals cannot be negative.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectedRange {
    pub base: f64,
    pub lower_1sigma: f64,
    pub upper_1sigma: f64,
    pub lower_90: f64,
    pub upper_90: f64,
}

/// Derive the projection bands for `base` using a player's historical
/// volatility.
pub fn projected_range(base: f64, volatility: &VolatilityProfile) -> ProjectedRange {
    let sigma = volatility.std_dev;
    let band_90 = CONFIDENCE_90_Z * sigma;

    ProjectedRange {
        base,
        lower_1sigma: (base - sigma).max(0.0),
        upper_1sigma: base + sigma,
        lower_90: (base - band_90).max(0.0),
        upper_90: base + band_90,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
