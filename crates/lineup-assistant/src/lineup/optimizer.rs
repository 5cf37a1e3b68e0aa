// Start/sit lineup optimization.
//
// Recomputes the highest-expected-value legal lineup for a target week from
// the roster's current starters and bench, then reports the projected
// improvement, per-swap recommendations, and an overall risk verdict.
// Selection is driven by projected points alone; confidence and volatility
// are reported alongside but never override a higher projection.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::lineup::candidate::{confidence_from_volatility, LineupCandidate};
use crate::lineup::risk::{assess_risk, RiskAssessment, RiskThresholds};
use crate::lineup::slot::{Position, Slot};
use crate::records::WeeklyRecord;
use crate::stats::series::numeric_value;
use crate::stats::volatility::{assess_history, VolatilityProfile};

// ---------------------------------------------------------------------------
// Week inputs
// ---------------------------------------------------------------------------

/// Game availability for a player in the target week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Active,
    Questionable,
    Doubtful,
    Out,
    Bye,
}

impl PlayerStatus {
    /// Parse a status string as reported in weekly exports.
    pub fn from_str_status(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Some(PlayerStatus::Active),
            "QUESTIONABLE" | "Q" => Some(PlayerStatus::Questionable),
            "DOUBTFUL" | "D" => Some(PlayerStatus::Doubtful),
            "OUT" | "O" => Some(PlayerStatus::Out),
            "BYE" => Some(PlayerStatus::Bye),
            _ => None,
        }
    }

    /// Whether a player with this status may be moved into the lineup.
    /// Players ruled out or on bye cannot enter; an unavailable player
    /// already in a slot may still be replaced.
    pub fn can_enter_lineup(&self) -> bool {
        matches!(
            self,
            PlayerStatus::Active | PlayerStatus::Questionable | PlayerStatus::Doubtful
        )
    }
}

/// Per-player inputs for the target week, resolved by the caller.
#[derive(Debug, Clone)]
pub struct PlayerWeek {
    pub position: Position,
    /// Points already scored, when the player's game has been played.
    pub actual: Option<f64>,
    /// Forecast points for the target week. Missing projections degrade to
    /// 0.0 inside the optimizer, never to an error.
    pub projected: Option<f64>,
    /// Whether the player's game is locked (underway or finished); locked
    /// players can be moved neither in nor out.
    pub locked: bool,
    pub status: PlayerStatus,
}

// ---------------------------------------------------------------------------
// Roster shape
// ---------------------------------------------------------------------------

/// A starting slot with its current occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAssignment {
    pub slot: Slot,
    pub player_id: String,
}

/// The roster as it stands before optimization.
#[derive(Debug, Clone)]
pub struct RosterState {
    pub starters: Vec<SlotAssignment>,
    pub bench: Vec<String>,
}

// ---------------------------------------------------------------------------
// Result shape
// ---------------------------------------------------------------------------

/// Why a player entered the optimized lineup.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub reason: String,
    pub confidence_score: f64,
    pub volatility: VolatilityProfile,
}

/// The optimizer's verdict for one roster and one week.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub season: u16,
    pub week: u8,
    pub starters: Vec<SlotAssignment>,
    pub bench: Vec<String>,
    /// Projected-point gain over the original lineup. Never negative.
    pub improvement: f64,
    /// Keyed by the id of each player who entered the lineup.
    pub recommendations: BTreeMap<String, Recommendation>,
    pub risk: RiskAssessment,
}

// ---------------------------------------------------------------------------
// Week data resolution
// ---------------------------------------------------------------------------

/// Build per-player week inputs from raw stat and projection records.
///
/// Position and status are read from the records' stat columns; a player's
/// game counts as locked once an actual stat line exists for the target
/// week. Players whose position cannot be determined are skipped (they can
/// neither fill nor be slotted), with a warning.
pub fn resolve_week_data(
    player_ids: &[String],
    stats: &HashMap<String, Vec<WeeklyRecord>>,
    projections: &HashMap<String, Vec<WeeklyRecord>>,
    metric_key: &str,
    season: u16,
    week: u8,
) -> HashMap<String, PlayerWeek> {
    let empty: Vec<WeeklyRecord> = Vec::new();
    let mut resolved = HashMap::new();

    for id in player_ids {
        let stat_records = stats.get(id).unwrap_or(&empty);
        let proj_records = projections.get(id).unwrap_or(&empty);

        let Some(position) = find_position(stat_records, proj_records) else {
            warn!("skipping player '{}': no position found in records", id);
            continue;
        };

        let actual = metric_at(stat_records, metric_key, season, week);
        let projected = metric_at(proj_records, metric_key, season, week);
        let status = find_status(stat_records, proj_records, season, week)
            .unwrap_or_default();

        resolved.insert(
            id.clone(),
            PlayerWeek {
                position,
                actual,
                projected,
                locked: actual.is_some(),
                status,
            },
        );
    }

    resolved
}

/// Latest position string found across a player's records.
fn find_position(stats: &[WeeklyRecord], projections: &[WeeklyRecord]) -> Option<Position> {
    stats
        .iter()
        .chain(projections.iter())
        .rev()
        .find_map(|rec| {
            rec.stats
                .get("position")
                .and_then(|v| v.as_str())
                .and_then(Position::from_str_pos)
        })
}

/// Metric value for one (season, week), last record winning on collision.
fn metric_at(records: &[WeeklyRecord], metric_key: &str, season: u16, week: u8) -> Option<f64> {
    records
        .iter()
        .rev()
        .filter(|rec| rec.season == season && rec.week == week)
        .find_map(|rec| rec.stats.get(metric_key).and_then(|v| numeric_value(v)))
}

/// Status string for the target week, from either record set.
fn find_status(
    stats: &[WeeklyRecord],
    projections: &[WeeklyRecord],
    season: u16,
    week: u8,
) -> Option<PlayerStatus> {
    stats
        .iter()
        .chain(projections.iter())
        .rev()
        .filter(|rec| rec.season == season && rec.week == week)
        .find_map(|rec| {
            rec.stats
                .get("status")
                .and_then(|v| v.as_str())
                .and_then(PlayerStatus::from_str_status)
        })
}

// ---------------------------------------------------------------------------
// Core optimization
// ---------------------------------------------------------------------------

/// Recompute the best legal lineup for `(season, week)`.
///
/// Algorithm:
/// 1. Score every roster player: projected points for the target week
///    (0.0 when no projection exists) plus a volatility profile from all
///    history strictly before the target week.
/// 2. Fill slots greedily, most restrictive first (dedicated slots before
///    FLEX), each slot taking the eligible unassigned candidate with the
///    highest projected points. Ties keep the current starter. Locked
///    players stay where they are; players ruled out or on bye never enter.
/// 3. Slot count is invariant: every original slot is refilled. If the
///    greedy pass would score below the original lineup it is discarded and
///    the original assignment kept, so `improvement` is never negative.
/// 4. Each player entering the lineup yields a recommendation naming the
///    displaced starter, the slot, and the projected gain.
/// 5. Risk is the bucketed average confidence across the final starters.
pub fn optimize(
    roster: &RosterState,
    week_data: &HashMap<String, PlayerWeek>,
    history: &HashMap<String, Vec<WeeklyRecord>>,
    metric_key: &str,
    thresholds: &RiskThresholds,
    season: u16,
    week: u8,
) -> OptimizationResult {
    let roster_ids = collect_roster_ids(roster);

    // ---- 1. Volatility and candidates ----

    let mut volatility: HashMap<String, VolatilityProfile> = HashMap::new();
    for id in &roster_ids {
        let prior: Vec<WeeklyRecord> = history
            .get(id)
            .map(|records| {
                records
                    .iter()
                    .filter(|rec| {
                        rec.season < season || (rec.season == season && rec.week < week)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        volatility.insert(id.clone(), assess_history(&prior, metric_key));
    }

    let mut candidates: HashMap<String, LineupCandidate> = HashMap::new();
    for id in &roster_ids {
        match week_data.get(id) {
            Some(pw) => {
                candidates.insert(
                    id.clone(),
                    LineupCandidate::new(
                        id.clone(),
                        pw.position,
                        pw.projected.unwrap_or(0.0),
                        volatility[id],
                    ),
                );
            }
            None => {
                warn!("no week data for player '{}'; treated as unavailable", id);
            }
        }
    }

    // ---- 2. Greedy slot filling, most restrictive slots first ----

    let mut fill_order: Vec<usize> = (0..roster.starters.len()).collect();
    fill_order.sort_by_key(|&i| {
        let slot = roster.starters[i].slot;
        (slot.eligible_positions().len(), slot.sort_order(), i)
    });

    let mut assigned: Vec<Option<String>> = vec![None; roster.starters.len()];
    let mut used: HashSet<String> = HashSet::new();
    let mut unfillable = false;

    for &i in &fill_order {
        let slot = roster.starters[i].slot;
        let incumbent = &roster.starters[i].player_id;

        let incumbent_locked = week_data.get(incumbent).is_some_and(|pw| pw.locked);
        if incumbent_locked && !used.contains(incumbent) {
            assigned[i] = Some(incumbent.clone());
            used.insert(incumbent.clone());
            continue;
        }

        let mut best: Option<&LineupCandidate> = None;
        for id in &roster_ids {
            if used.contains(id) {
                continue;
            }
            let Some(cand) = candidates.get(id) else {
                continue;
            };
            if !slot.accepts(cand.position) {
                continue;
            }
            let is_incumbent = id == incumbent;
            if !is_incumbent {
                let Some(pw) = week_data.get(id) else {
                    continue;
                };
                if pw.locked || !pw.status.can_enter_lineup() {
                    continue;
                }
            }
            best = match best {
                None => Some(cand),
                Some(current) => {
                    if cand.projected_points > current.projected_points
                        || (cand.projected_points == current.projected_points && is_incumbent)
                    {
                        Some(cand)
                    } else {
                        Some(current)
                    }
                }
            };
        }

        match best {
            Some(cand) => {
                assigned[i] = Some(cand.player_id.clone());
                used.insert(cand.player_id.clone());
            }
            None if !used.contains(incumbent) => {
                // No scoreable candidate; the incumbent keeps the slot.
                assigned[i] = Some(incumbent.clone());
                used.insert(incumbent.clone());
            }
            None => {
                // The incumbent was pulled into another slot and nothing is
                // left for this one; abandon the greedy pass entirely.
                unfillable = true;
                break;
            }
        }
    }

    // ---- 3. Monotonic-improvement guard ----

    let projected_for = |id: &str| -> f64 {
        candidates.get(id).map_or(0.0, |c| c.projected_points)
    };

    let original_total: f64 = roster
        .starters
        .iter()
        .map(|sa| projected_for(&sa.player_id))
        .sum();

    let greedy_total: f64 = if unfillable {
        f64::NEG_INFINITY
    } else {
        assigned
            .iter()
            .map(|id| id.as_deref().map_or(0.0, &projected_for))
            .sum()
    };

    let (final_starters, improvement) = if unfillable || greedy_total < original_total {
        (roster.starters.clone(), 0.0)
    } else {
        let starters: Vec<SlotAssignment> = roster
            .starters
            .iter()
            .zip(assigned.iter())
            .map(|(original, new_id)| SlotAssignment {
                slot: original.slot,
                player_id: new_id.clone().unwrap_or_else(|| original.player_id.clone()),
            })
            .collect();
        (starters, greedy_total - original_total)
    };

    // ---- 4. Recommendations for players entering the lineup ----

    let original_starter_ids: HashSet<&str> = roster
        .starters
        .iter()
        .map(|sa| sa.player_id.as_str())
        .collect();

    let mut recommendations = BTreeMap::new();
    for (original, new) in roster.starters.iter().zip(final_starters.iter()) {
        if new.player_id == original.player_id
            || original_starter_ids.contains(new.player_id.as_str())
        {
            continue;
        }
        let gain = projected_for(&new.player_id) - projected_for(&original.player_id);
        let profile = volatility[&new.player_id];
        recommendations.insert(
            new.player_id.clone(),
            Recommendation {
                reason: format!(
                    "Start {} over {} at {}: +{:.1} projected points",
                    new.player_id,
                    original.player_id,
                    new.slot.display_str(),
                    gain
                ),
                confidence_score: candidates
                    .get(&new.player_id)
                    .map_or_else(|| confidence_from_volatility(&profile), |c| c.confidence_score),
                volatility: profile,
            },
        );
    }

    // ---- 5. Risk across the final starters ----

    let confidences: Vec<f64> = final_starters
        .iter()
        .map(|sa| {
            candidates.get(&sa.player_id).map_or_else(
                || confidence_from_volatility(&volatility[&sa.player_id]),
                |c| c.confidence_score,
            )
        })
        .collect();
    let risk = assess_risk(&confidences, thresholds);

    // ---- Bench = everyone on the roster not in the final lineup ----

    let final_ids: HashSet<&str> = final_starters
        .iter()
        .map(|sa| sa.player_id.as_str())
        .collect();
    let bench: Vec<String> = roster_ids
        .iter()
        .filter(|id| !final_ids.contains(id.as_str()))
        .cloned()
        .collect();

    OptimizationResult {
        season,
        week,
        starters: final_starters,
        bench,
        improvement,
        recommendations,
        risk,
    }
}

/// All roster player ids, starters first, input order preserved.
fn collect_roster_ids(roster: &RosterState) -> Vec<String> {
    let mut seen = HashSet::new();
    roster
        .starters
        .iter()
        .map(|sa| sa.player_id.clone())
        .chain(roster.bench.iter().cloned())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn record(player_id: &str, season: u16, week: u8, pts: f64) -> WeeklyRecord {
        WeeklyRecord {
            player_id: player_id.into(),
            season,
            week,
            stats: HashMap::from([("pts_ppr".to_string(), json!(pts))]),
        }
    }

    fn history_of(entries: &[(&str, &[f64])]) -> HashMap<String, Vec<WeeklyRecord>> {
        entries
            .iter()
            .map(|(id, points)| {
                let records = points
                    .iter()
                    .enumerate()
                    .map(|(i, &pts)| record(id, 2024, (i + 1) as u8, pts))
                    .collect();
                (id.to_string(), records)
            })
            .collect()
    }

    fn week(position: Position, projected: f64) -> PlayerWeek {
        PlayerWeek {
            position,
            actual: None,
            projected: Some(projected),
            locked: false,
            status: PlayerStatus::Active,
        }
    }

    fn starter(slot: Slot, id: &str) -> SlotAssignment {
        SlotAssignment {
            slot,
            player_id: id.into(),
        }
    }

    fn run(
        roster: &RosterState,
        week_data: &HashMap<String, PlayerWeek>,
        history: &HashMap<String, Vec<WeeklyRecord>>,
    ) -> OptimizationResult {
        optimize(
            roster,
            week_data,
            history,
            "pts_ppr",
            &RiskThresholds::default(),
            2024,
            10,
        )
    }

    #[test]
    fn higher_projection_beats_stable_starter() {
        // Volatile bench player A projects 25.0; steady starter B projects
        // 20.0. Projection wins and the improvement is exactly 5.0.
        let roster = RosterState {
            starters: vec![starter(Slot::RunningBack, "B")],
            bench: vec!["A".into()],
        };
        let week_data = HashMap::from([
            ("A".to_string(), week(Position::RunningBack, 25.0)),
            ("B".to_string(), week(Position::RunningBack, 20.0)),
        ]);
        let history = history_of(&[
            ("A", &[2.0, 30.0, 5.0, 28.0, 1.0, 33.0][..]),
            ("B", &[19.0, 20.0, 21.0, 20.0, 19.5, 20.5][..]),
        ]);

        let result = run(&roster, &week_data, &history);

        assert_eq!(result.starters[0].player_id, "A");
        assert!(approx_eq(result.improvement, 5.0, 1e-10));
        assert_eq!(result.bench, vec!["B".to_string()]);

        let rec = result.recommendations.get("A").expect("swap recommendation");
        assert!(rec.reason.contains("over B"));
        assert!(rec.reason.contains("RB"));
        assert!(rec.volatility.std_dev > 5.0);
    }

    #[test]
    fn already_optimal_lineup_keeps_starters() {
        let roster = RosterState {
            starters: vec![starter(Slot::WideReceiver, "wr1")],
            bench: vec!["wr2".into()],
        };
        let week_data = HashMap::from([
            ("wr1".to_string(), week(Position::WideReceiver, 16.0)),
            ("wr2".to_string(), week(Position::WideReceiver, 9.0)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());

        assert_eq!(result.starters[0].player_id, "wr1");
        assert!(approx_eq(result.improvement, 0.0, 1e-10));
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn improvement_never_negative() {
        // Every bench option is worse; the optimizer must leave the lineup
        // alone rather than make it worse.
        let roster = RosterState {
            starters: vec![
                starter(Slot::Quarterback, "qb1"),
                starter(Slot::RunningBack, "rb1"),
                starter(Slot::Flex, "wr1"),
            ],
            bench: vec!["qb2".into(), "rb2".into(), "wr2".into()],
        };
        let week_data = HashMap::from([
            ("qb1".to_string(), week(Position::Quarterback, 24.0)),
            ("rb1".to_string(), week(Position::RunningBack, 17.0)),
            ("wr1".to_string(), week(Position::WideReceiver, 13.0)),
            ("qb2".to_string(), week(Position::Quarterback, 12.0)),
            ("rb2".to_string(), week(Position::RunningBack, 6.0)),
            ("wr2".to_string(), week(Position::WideReceiver, 4.0)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());

        assert!(approx_eq(result.improvement, 0.0, 1e-10));
        let starter_ids: Vec<&str> =
            result.starters.iter().map(|sa| sa.player_id.as_str()).collect();
        assert_eq!(starter_ids, vec!["qb1", "rb1", "wr1"]);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn tie_keeps_current_starter() {
        let roster = RosterState {
            starters: vec![starter(Slot::TightEnd, "te1")],
            bench: vec!["te2".into()],
        };
        let week_data = HashMap::from([
            ("te1".to_string(), week(Position::TightEnd, 11.0)),
            ("te2".to_string(), week(Position::TightEnd, 11.0)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());
        assert_eq!(result.starters[0].player_id, "te1");
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn missing_projection_defaults_to_zero() {
        let roster = RosterState {
            starters: vec![starter(Slot::WideReceiver, "no_proj")],
            bench: vec!["has_proj".into()],
        };
        let week_data = HashMap::from([
            (
                "no_proj".to_string(),
                PlayerWeek {
                    position: Position::WideReceiver,
                    actual: None,
                    projected: None,
                    locked: false,
                    status: PlayerStatus::Active,
                },
            ),
            ("has_proj".to_string(), week(Position::WideReceiver, 6.5)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());
        assert_eq!(result.starters[0].player_id, "has_proj");
        assert!(approx_eq(result.improvement, 6.5, 1e-10));
    }

    #[test]
    fn locked_starter_is_not_swapped() {
        let roster = RosterState {
            starters: vec![starter(Slot::RunningBack, "locked_rb")],
            bench: vec!["big_proj".into()],
        };
        let week_data = HashMap::from([
            (
                "locked_rb".to_string(),
                PlayerWeek {
                    position: Position::RunningBack,
                    actual: Some(4.2),
                    projected: Some(8.0),
                    locked: true,
                    status: PlayerStatus::Active,
                },
            ),
            ("big_proj".to_string(), week(Position::RunningBack, 22.0)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());
        assert_eq!(result.starters[0].player_id, "locked_rb");
        assert!(approx_eq(result.improvement, 0.0, 1e-10));
    }

    #[test]
    fn out_and_bye_bench_players_cannot_enter() {
        let roster = RosterState {
            starters: vec![starter(Slot::WideReceiver, "starter_wr")],
            bench: vec!["out_wr".into(), "bye_wr".into()],
        };
        let mut out_week = week(Position::WideReceiver, 30.0);
        out_week.status = PlayerStatus::Out;
        let mut bye_week = week(Position::WideReceiver, 28.0);
        bye_week.status = PlayerStatus::Bye;
        let week_data = HashMap::from([
            ("starter_wr".to_string(), week(Position::WideReceiver, 10.0)),
            ("out_wr".to_string(), out_week),
            ("bye_wr".to_string(), bye_week),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());
        assert_eq!(result.starters[0].player_id, "starter_wr");
    }

    #[test]
    fn flex_takes_best_remaining_skill_player() {
        // Dedicated slots resolve first, then FLEX picks the best leftover
        // among RB/WR/TE.
        let roster = RosterState {
            starters: vec![
                starter(Slot::RunningBack, "rb1"),
                starter(Slot::Flex, "flex_te"),
            ],
            bench: vec!["rb2".into(), "wr1".into()],
        };
        let week_data = HashMap::from([
            ("rb1".to_string(), week(Position::RunningBack, 18.0)),
            ("flex_te".to_string(), week(Position::TightEnd, 7.0)),
            ("rb2".to_string(), week(Position::RunningBack, 14.0)),
            ("wr1".to_string(), week(Position::WideReceiver, 12.0)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());
        assert_eq!(result.starters[0].player_id, "rb1");
        assert_eq!(result.starters[1].player_id, "rb2");
        assert!(approx_eq(result.improvement, 7.0, 1e-10));
        // wr1 stays on the bench along with the displaced TE.
        assert!(result.bench.contains(&"flex_te".to_string()));
        assert!(result.bench.contains(&"wr1".to_string()));
    }

    #[test]
    fn slot_count_invariant_and_disjoint_sets() {
        let roster = RosterState {
            starters: vec![
                starter(Slot::Quarterback, "qb1"),
                starter(Slot::RunningBack, "rb1"),
                starter(Slot::WideReceiver, "wr1"),
                starter(Slot::Flex, "wr2"),
            ],
            bench: vec!["qb2".into(), "rb2".into(), "te1".into()],
        };
        let week_data = HashMap::from([
            ("qb1".to_string(), week(Position::Quarterback, 17.0)),
            ("rb1".to_string(), week(Position::RunningBack, 9.0)),
            ("wr1".to_string(), week(Position::WideReceiver, 11.0)),
            ("wr2".to_string(), week(Position::WideReceiver, 8.0)),
            ("qb2".to_string(), week(Position::Quarterback, 21.0)),
            ("rb2".to_string(), week(Position::RunningBack, 13.0)),
            ("te1".to_string(), week(Position::TightEnd, 10.0)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());

        assert_eq!(result.starters.len(), 4);
        let starter_ids: HashSet<_> =
            result.starters.iter().map(|sa| sa.player_id.clone()).collect();
        assert_eq!(starter_ids.len(), 4, "each player fills at most one slot");
        for id in &result.bench {
            assert!(!starter_ids.contains(id));
        }
        assert_eq!(starter_ids.len() + result.bench.len(), 7);
        assert!(result.improvement >= 0.0);
    }

    #[test]
    fn moved_starter_produces_no_recommendation() {
        // rb1 slides from RB to FLEX; only the bench player entering the RB
        // slot is a recommendation.
        let roster = RosterState {
            starters: vec![
                starter(Slot::RunningBack, "rb1"),
                starter(Slot::Flex, "te1"),
            ],
            bench: vec!["rb2".into()],
        };
        let week_data = HashMap::from([
            ("rb1".to_string(), week(Position::RunningBack, 15.0)),
            ("te1".to_string(), week(Position::TightEnd, 5.0)),
            ("rb2".to_string(), week(Position::RunningBack, 16.0)),
        ]);

        let result = run(&roster, &week_data, &HashMap::new());

        // RB slot takes rb2 (16 > 15); FLEX then takes rb1 (15 > 5).
        assert_eq!(result.starters[0].player_id, "rb2");
        assert_eq!(result.starters[1].player_id, "rb1");
        assert!(approx_eq(result.improvement, 11.0, 1e-10));
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations.contains_key("rb2"));
    }

    #[test]
    fn risk_reflects_starter_confidence() {
        // Steady histories (low cv) across the lineup should bucket low.
        let roster = RosterState {
            starters: vec![
                starter(Slot::RunningBack, "rb1"),
                starter(Slot::WideReceiver, "wr1"),
            ],
            bench: vec![],
        };
        let week_data = HashMap::from([
            ("rb1".to_string(), week(Position::RunningBack, 15.0)),
            ("wr1".to_string(), week(Position::WideReceiver, 14.0)),
        ]);
        let history = history_of(&[
            ("rb1", &[14.0, 15.0, 16.0, 15.0, 14.5, 15.5][..]),
            ("wr1", &[13.0, 14.0, 15.0, 14.0, 13.5, 14.5][..]),
        ]);

        let result = run(&roster, &week_data, &history);
        assert_eq!(result.risk.level, crate::lineup::risk::RiskLevel::Low);
        assert!(result.risk.average_confidence > 0.7);
    }

    #[test]
    fn history_after_target_week_ignored() {
        // Records at or after the target week must not leak into volatility.
        let roster = RosterState {
            starters: vec![starter(Slot::RunningBack, "rb1")],
            bench: vec![],
        };
        let week_data =
            HashMap::from([("rb1".to_string(), week(Position::RunningBack, 12.0))]);
        let history = HashMap::from([(
            "rb1".to_string(),
            vec![
                record("rb1", 2024, 10, 99.0),
                record("rb1", 2024, 11, 99.0),
                record("rb1", 2025, 1, 99.0),
            ],
        )]);

        let result = run(&roster, &week_data, &history);
        // Nothing before week 10 of 2024: the unknown-player prior applies.
        let rec_volatility = result.risk.average_confidence;
        assert!(approx_eq(rec_volatility, 0.7, 1e-10));
    }

    #[test]
    fn resolve_week_data_reads_position_projection_and_lock() {
        let mut stats_rec = record("rb1", 2024, 10, 9.5);
        stats_rec
            .stats
            .insert("position".to_string(), json!("RB"));
        let mut proj_rec = record("rb1", 2024, 10, 14.0);
        proj_rec
            .stats
            .insert("position".to_string(), json!("RB"));

        let stats = HashMap::from([("rb1".to_string(), vec![stats_rec])]);
        let projections = HashMap::from([("rb1".to_string(), vec![proj_rec])]);

        let resolved = resolve_week_data(
            &["rb1".to_string()],
            &stats,
            &projections,
            "pts_ppr",
            2024,
            10,
        );

        let pw = &resolved["rb1"];
        assert_eq!(pw.position, Position::RunningBack);
        assert_eq!(pw.actual, Some(9.5));
        assert_eq!(pw.projected, Some(14.0));
        assert!(pw.locked, "an actual stat line locks the player");
        assert_eq!(pw.status, PlayerStatus::Active);
    }

    #[test]
    fn resolve_week_data_skips_unknown_position() {
        let stats = HashMap::from([("mystery".to_string(), vec![record("mystery", 2024, 9, 7.0)])]);
        let resolved = resolve_week_data(
            &["mystery".to_string()],
            &stats,
            &HashMap::new(),
            "pts_ppr",
            2024,
            10,
        );
        assert!(resolved.is_empty());
    }

    #[test]
    fn resolve_week_data_parses_status() {
        let mut proj_rec = record("wr1", 2024, 10, 0.0);
        proj_rec.stats.insert("position".to_string(), json!("WR"));
        proj_rec.stats.insert("status".to_string(), json!("Out"));

        let projections = HashMap::from([("wr1".to_string(), vec![proj_rec])]);
        let resolved = resolve_week_data(
            &["wr1".to_string()],
            &HashMap::new(),
            &projections,
            "pts_ppr",
            2024,
            10,
        );

        assert_eq!(resolved["wr1"].status, PlayerStatus::Out);
        assert!(!resolved["wr1"].status.can_enter_lineup());
        assert!(!resolved["wr1"].locked);
    }

    #[test]
    fn status_parsing() {
        assert_eq!(
            PlayerStatus::from_str_status("questionable"),
            Some(PlayerStatus::Questionable)
        );
        assert_eq!(PlayerStatus::from_str_status("Q"), Some(PlayerStatus::Questionable));
        assert_eq!(PlayerStatus::from_str_status("BYE"), Some(PlayerStatus::Bye));
        assert_eq!(PlayerStatus::from_str_status("???"), None);
        assert!(PlayerStatus::Questionable.can_enter_lineup());
        assert!(!PlayerStatus::Out.can_enter_lineup());
        assert!(!PlayerStatus::Bye.can_enter_lineup());
    }
}
