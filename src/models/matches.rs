//! Match model.
//!
//! A match is the smallest schedulable unit: one court for one duration.
//! Matches are created by the graph builder and stay immutable afterwards,
//! except for `pool_round` (set by the pool colorer) and
//! `effective_players` (set by the probability filter).

use serde::{Deserialize, Serialize};

use super::CourtTier;

/// Builds the globally unique match id `"{division}:{round}:M{n}"`.
pub fn match_id(division_code: &str, round_name: &str, match_num: u32) -> String {
    format!("{division_code}:{round_name}:M{match_num}")
}

/// Parsed content of one player-slot string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// Empty slot or "Bye".
    Empty,
    /// One name (singles) or two names (doubles).
    Players(Vec<String>),
    /// "Winner R1-M3": the winner of an earlier match in the same bracket.
    Winner { round: String, match_num: u32 },
    /// "Slot 4": an unassigned structural position (filled from group standings).
    Position(String),
}

impl Slot {
    /// Concrete names in this slot (empty for placeholders).
    pub fn names(&self) -> &[String] {
        match self {
            Slot::Players(names) => names,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Slot::Players(_))
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Winner { .. } | Slot::Position(_))
    }
}

/// One side of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Original slot string, used for display.
    pub label: String,
    pub slot: Slot,
    /// Schedulable feeder match whose winner fills this slot.
    pub feeder: Option<String>,
    /// Players carried in through a bye feeder.
    pub advanced: Vec<String>,
}

impl PlayerSlot {
    pub fn new(label: impl Into<String>, slot: Slot) -> Self {
        Self {
            label: label.into(),
            slot,
            feeder: None,
            advanced: Vec::new(),
        }
    }
}

/// One schedulable contest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Unique id, see [`match_id`].
    pub id: String,
    pub division_code: String,
    pub division_name: String,
    pub category: String,
    pub round_name: String,
    pub match_num: u32,
    /// The two sides.
    pub slots: [PlayerSlot; 2],
    /// Court tier of the division.
    pub tier: CourtTier,
    /// Court time (minutes).
    pub duration_min: u32,
    /// Mandatory rest after play (minutes).
    pub rest_min: u32,
    /// Lower = scheduled earlier.
    pub priority: u32,
    /// Semifinals and finals must start on the finals day.
    pub is_sf_or_final: bool,
    /// Conflict-free grouping inside a round-robin pool.
    pub pool_round: u32,
    /// Matches that must finish before this one.
    pub prerequisites: Vec<String>,
    /// Every player who may occupy this match.
    pub known_players: Vec<String>,
    /// Subset of `known_players` actually reserved by the scheduler.
    pub effective_players: Vec<String>,
}

impl Match {
    /// Creates a match with standard timing and no dependencies.
    pub fn new(
        division_code: impl Into<String>,
        round_name: impl Into<String>,
        match_num: u32,
        player1: PlayerSlot,
        player2: PlayerSlot,
    ) -> Self {
        let division_code = division_code.into();
        let round_name = round_name.into();
        Self {
            id: match_id(&division_code, &round_name, match_num),
            division_name: division_code.clone(),
            division_code,
            category: String::new(),
            round_name,
            match_num,
            slots: [player1, player2],
            tier: CourtTier::General,
            duration_min: 30,
            rest_min: 30,
            priority: 0,
            is_sf_or_final: false,
            pool_round: 0,
            prerequisites: Vec::new(),
            known_players: Vec::new(),
            effective_players: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: CourtTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_timing(mut self, duration_min: u32, rest_min: u32) -> Self {
        self.duration_min = duration_min;
        self.rest_min = rest_min;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_prerequisite(mut self, id: impl Into<String>) -> Self {
        self.prerequisites.push(id.into());
        self
    }

    /// True only when both slots name concrete participants.
    pub fn has_real_players(&self) -> bool {
        self.slots.iter().all(|s| s.slot.is_concrete())
    }

    /// Whether this match belongs to the elite tier.
    #[inline]
    pub fn is_elite(&self) -> bool {
        self.tier == CourtTier::Elite
    }

    /// Concrete names across both slots, in slot order.
    pub fn concrete_players(&self) -> Vec<String> {
        self.slots
            .iter()
            .flat_map(|s| s.slot.names().iter().cloned())
            .collect()
    }

    /// Players carried in through bye feeders.
    pub fn advanced_players(&self) -> Vec<String> {
        self.slots
            .iter()
            .flat_map(|s| s.advanced.iter().cloned())
            .collect()
    }

    /// Players certain to play this match: named ones plus bye-advanced
    /// ones. Equal to the concrete players for real-player matches.
    pub fn certain_players(&self) -> Vec<String> {
        let mut players = self.concrete_players();
        players.extend(self.advanced_players());
        players
    }

    /// End minute for a given start.
    #[inline]
    pub fn end_at(&self, start_min: u32) -> u32 {
        start_min + self.duration_min
    }
}
