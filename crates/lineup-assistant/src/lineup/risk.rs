// Lineup risk bucketing from starter confidence scores.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Average confidence above which a lineup is low risk.
pub const LOW_RISK_CONFIDENCE_FLOOR: f64 = 0.7;

/// Average confidence below which a lineup is high risk.
pub const HIGH_RISK_CONFIDENCE_CEILING: f64 = 0.5;

/// Configurable risk cutoffs. The defaults reproduce the fixed constants
/// above; `strategy.toml` may override them.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RiskThresholds {
    pub low_confidence_floor: f64,
    pub high_confidence_ceiling: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            low_confidence_floor: LOW_RISK_CONFIDENCE_FLOOR,
            high_confidence_ceiling: HIGH_RISK_CONFIDENCE_CEILING,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk levels
// ---------------------------------------------------------------------------

/// How much week-to-week variance the optimized lineup carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Risk verdict for a full lineup.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub average_confidence: f64,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Average the given confidence scores and bucket the result.
///
/// Low when the average exceeds the low floor, high when it falls below the
/// high ceiling, medium in between. An empty slice (no starters) averages to
/// 0.0 and classifies as high.
pub fn assess_risk(confidence_scores: &[f64], thresholds: &RiskThresholds) -> RiskAssessment {
    let average_confidence = if confidence_scores.is_empty() {
        0.0
    } else {
        confidence_scores.iter().sum::<f64>() / confidence_scores.len() as f64
    };

    let level = if average_confidence > thresholds.low_confidence_floor {
        RiskLevel::Low
    } else if average_confidence < thresholds.high_confidence_ceiling {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    };

    RiskAssessment {
        level,
        average_confidence,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
