// Player positions and roster slot eligibility.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Football positions used for lineup eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles Sleeper-style abbreviations: "DEF" and "DST" both map to
    /// Defense.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DEF" | "DST" => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// A roster slot and the positions allowed to fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    /// RB/WR/TE flex.
    Flex,
    Kicker,
    Defense,
    Bench,
    InjuredReserve,
}

impl Slot {
    /// Parse a slot string into a Slot enum.
    ///
    /// Handles common league-config spellings: "FLEX" and "W/R/T" both map
    /// to Flex, "BN"/"BE" to Bench, "IR" to InjuredReserve.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Slot::Quarterback),
            "RB" => Some(Slot::RunningBack),
            "WR" => Some(Slot::WideReceiver),
            "TE" => Some(Slot::TightEnd),
            "FLEX" | "W/R/T" => Some(Slot::Flex),
            "K" => Some(Slot::Kicker),
            "DEF" | "DST" => Some(Slot::Defense),
            "BN" | "BE" => Some(Slot::Bench),
            "IR" => Some(Slot::InjuredReserve),
            _ => None,
        }
    }

    /// Return the display string for this slot.
    pub fn display_str(&self) -> &'static str {
        match self {
            Slot::Quarterback => "QB",
            Slot::RunningBack => "RB",
            Slot::WideReceiver => "WR",
            Slot::TightEnd => "TE",
            Slot::Flex => "FLEX",
            Slot::Kicker => "K",
            Slot::Defense => "DEF",
            Slot::Bench => "BN",
            Slot::InjuredReserve => "IR",
        }
    }

    /// The positions eligible to fill this slot. Meta slots accept nothing.
    pub fn eligible_positions(&self) -> &'static [Position] {
        match self {
            Slot::Quarterback => &[Position::Quarterback],
            Slot::RunningBack => &[Position::RunningBack],
            Slot::WideReceiver => &[Position::WideReceiver],
            Slot::TightEnd => &[Position::TightEnd],
            Slot::Flex => &[
                Position::RunningBack,
                Position::WideReceiver,
                Position::TightEnd,
            ],
            Slot::Kicker => &[Position::Kicker],
            Slot::Defense => &[Position::Defense],
            Slot::Bench | Slot::InjuredReserve => &[],
        }
    }

    /// Whether a player at `pos` may fill this slot.
    pub fn accepts(&self, pos: Position) -> bool {
        self.eligible_positions().contains(&pos)
    }

    /// Whether this is a meta-slot (not a scoring lineup position).
    pub fn is_meta_slot(&self) -> bool {
        matches!(self, Slot::Bench | Slot::InjuredReserve)
    }

    /// Whether this slot contributes to the starting lineup.
    pub fn is_startable(&self) -> bool {
        !self.is_meta_slot()
    }

    /// Deterministic ordering index for lineup display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Slot::Quarterback => 0,
            Slot::RunningBack => 1,
            Slot::WideReceiver => 2,
            Slot::TightEnd => 3,
            Slot::Flex => 4,
            Slot::Kicker => 5,
            Slot::Defense => 6,
            Slot::Bench => 7,
            Slot::InjuredReserve => 8,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
