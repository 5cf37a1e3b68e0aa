// Weekly numeric series construction.
//
// Turns raw weekly records into an ordered week -> value series for a single
// metric. All numeric coercion lives here: the rest of the stats pipeline
// works on strict floats only.

use std::collections::BTreeMap;

use crate::records::WeeklyRecord;

// ---------------------------------------------------------------------------
// Series types
// ---------------------------------------------------------------------------

/// A single (week, value) observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub week: u8,
    pub value: f64,
}

/// An ordered sequence of weekly observations, ascending by week.
///
/// Rebuilt fresh on every computation; never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct NumericSeries {
    pub points: Vec<SeriesPoint>,
}

impl NumericSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The raw values in week order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Coerce a raw stat value to a finite float.
///
/// Accepts JSON numbers and numeric strings (Sleeper exports carry both,
/// and CSV-sourced records arrive as strings). Everything else (null,
/// booleans, arrays, objects, non-numeric strings, NaN/inf) yields `None`
/// and the record is skipped, never treated as zero.
pub fn numeric_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Series construction
// ---------------------------------------------------------------------------

/// Build a numeric series for `metric_key` from a set of weekly records.
///
/// Records missing the metric, or carrying a non-numeric value for it, are
/// silently skipped. When two records collide on the same week the later
/// record in input order wins. Returns an empty series (not an error) when
/// no valid values exist.
pub fn build_series(records: &[WeeklyRecord], metric_key: &str) -> NumericSeries {
    let mut by_week: BTreeMap<u8, f64> = BTreeMap::new();

    for record in records {
        if let Some(value) = record.stats.get(metric_key).and_then(numeric_value) {
            by_week.insert(record.week, value);
        }
    }

    NumericSeries {
        points: by_week
            .into_iter()
            .map(|(week, value)| SeriesPoint { week, value })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
