// Descriptive statistics: five-number summary plus mean, standard deviation,
// and coefficient of variation.

use serde::Serialize;

/// Threshold below which a mean is treated as zero when computing the
/// coefficient of variation.
const MEAN_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// BoxStats
// ---------------------------------------------------------------------------

/// Five-number summary with dispersion extras for a numeric series.
///
/// Invariant for any non-empty input: `min <= q1 <= median <= q3 <= max`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Compute descriptive statistics for a series of values.
///
/// Returns `None` for an empty series (a "no data" signal, distinct from a
/// zero-filled series). The caller's slice is never reordered; non-finite
/// values are dropped before computation.
///
/// Quartiles use the exclusive median-of-halves method, with no
/// interpolation:
/// - length <= 2: `q1 = min`, `q3 = max` (the halves would be undefined)
/// - otherwise the lower half is the first `n/2` values and the upper half
///   starts at `n/2` (even n) or `n/2 + 1` (odd n); q1/q3 are the medians
///   of those halves.
///
/// Standard deviation uses the population formula (N denominator), matching
/// how the series represents a player's complete game log rather than a
/// sample. When the mean is approximately zero the coefficient of variation
/// is defined as 0.0 rather than dividing by zero.
pub fn compute_box(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let median = median_of(&sorted);

    let (q1, q3) = if n <= 2 {
        (min, max)
    } else {
        let lower = &sorted[..n / 2];
        let upper = &sorted[(n + 1) / 2..];
        (median_of(lower), median_of(upper))
    };

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let std_dev = variance.sqrt();

    let coefficient_of_variation = if mean.abs() < MEAN_EPSILON {
        0.0
    } else {
        std_dev / mean
    };

    Some(BoxStats {
        min,
        q1,
        median,
        q3,
        max,
        mean,
        std_dev,
        coefficient_of_variation,
    })
}

/// Median of an already-sorted, non-empty slice: the middle value for odd
/// lengths, the mean of the two middle values for even lengths.
fn median_of(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
