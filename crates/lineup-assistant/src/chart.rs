// Box-plot geometry for weekly scoring distributions.
//
// Maps five-number summaries onto 2D plotting coordinates. Pure geometry:
// the statistical work happens in `stats::describe`, and the output is a
// device-independent pixel layout for whatever renders it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::describe::{compute_box, BoxStats};

/// Value range below which a scale is considered degenerate.
const RANGE_EPSILON: f64 = 1e-9;

/// Box width as a fraction of each label's column.
const BOX_WIDTH_FRACTION: f64 = 0.6;

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Target drawing surface in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            width: 640.0,
            height: 400.0,
            padding: 40.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry output
// ---------------------------------------------------------------------------

/// Pixel coordinates for one label's box plot. Y grows downward, so higher
/// values map to smaller y.
#[derive(Debug, Clone, Serialize)]
pub struct BoxGeometry {
    pub label: String,
    pub stats: BoxStats,
    pub x_center: f64,
    pub box_left: f64,
    pub box_right: f64,
    pub whisker_low_y: f64,
    pub q1_y: f64,
    pub median_y: f64,
    pub q3_y: f64,
    pub whisker_high_y: f64,
}

/// Complete plot layout for a set of labeled series.
#[derive(Debug, Clone, Serialize)]
pub struct PlotGeometry {
    pub canvas: Canvas,
    /// Value-space bounds after any degenerate-range expansion.
    pub value_min: f64,
    pub value_max: f64,
    pub boxes: Vec<BoxGeometry>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Lay out a box plot for each labeled series.
///
/// Labels whose series is empty (or all non-numeric) are skipped, not drawn
/// at zero. When every value across every series is identical the value
/// range is expanded by ±1 so the linear scale never divides by zero; every
/// emitted coordinate is finite.
pub fn map_box_plot(series_by_label: &BTreeMap<String, Vec<f64>>, canvas: &Canvas) -> PlotGeometry {
    let labeled_stats: Vec<(String, BoxStats)> = series_by_label
        .iter()
        .filter_map(|(label, values)| compute_box(values).map(|stats| (label.clone(), stats)))
        .collect();

    if labeled_stats.is_empty() {
        return PlotGeometry {
            canvas: *canvas,
            value_min: 0.0,
            value_max: 1.0,
            boxes: Vec::new(),
        };
    }

    let mut value_min = labeled_stats
        .iter()
        .map(|(_, s)| s.min)
        .fold(f64::INFINITY, f64::min);
    let mut value_max = labeled_stats
        .iter()
        .map(|(_, s)| s.max)
        .fold(f64::NEG_INFINITY, f64::max);

    // Degenerate range: every value identical. Expand by ±1 to keep the
    // scale well-defined.
    if (value_max - value_min).abs() < RANGE_EPSILON {
        value_min -= 1.0;
        value_max += 1.0;
    }

    let plot_width = (canvas.width - 2.0 * canvas.padding).max(0.0);
    let plot_height = (canvas.height - 2.0 * canvas.padding).max(0.0);
    let column_width = plot_width / labeled_stats.len() as f64;

    let y_for = |value: f64| -> f64 {
        canvas.padding + (value_max - value) / (value_max - value_min) * plot_height
    };

    let boxes = labeled_stats
        .into_iter()
        .enumerate()
        .map(|(i, (label, stats))| {
            let x_center = canvas.padding + (i as f64 + 0.5) * column_width;
            let half_box = column_width * BOX_WIDTH_FRACTION / 2.0;
            BoxGeometry {
                label,
                stats,
                x_center,
                box_left: x_center - half_box,
                box_right: x_center + half_box,
                whisker_low_y: y_for(stats.min),
                q1_y: y_for(stats.q1),
                median_y: y_for(stats.median),
                q3_y: y_for(stats.q3),
                whisker_high_y: y_for(stats.max),
            }
        })
        .collect();

    PlotGeometry {
        canvas: *canvas,
        value_min,
        value_max,
        boxes,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
