//! Match graph: schedulable matches plus their dependency edges.
//!
//! # Components
//! - [`GraphBuilder`]: expands division draws into matches.
//! - [`assign_pool_rounds`]: conflict-free rounds inside one pool.
//! - [`parse_slot`]: player-slot string grammar.
//! - `trace`: topological order, known-player resolution, round depths.

mod builder;
mod pool_rounds;
mod slot;
pub(crate) mod trace;

pub use builder::{
    round_priority, GraphBuilder, PRIORITY_ELITE_POOL, PRIORITY_FINAL, PRIORITY_GROUP_PLAYOFF,
    PRIORITY_POOL, PRIORITY_QF, PRIORITY_R1, PRIORITY_R2, PRIORITY_SF,
};
pub use pool_rounds::assign_pool_rounds;
pub use slot::{is_bye, parse_slot, round_for_abbrev};

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::models::{match_id, Match, MatchRow, Slot};
use crate::validation::validate_graph;

/// A bye cell: no court time needed, the advancing side moves on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ByeAdvance {
    /// Id the cell would have had as a match.
    pub match_id: String,
    /// Label of the advancing side ("Bye" if both sides are empty).
    pub label: String,
    /// The advancing side ([`Slot::Empty`] for an empty cell).
    pub advancing: Slot,
}

impl ByeAdvance {
    pub(crate) fn new(division: &str, round: &str, row: &MatchRow, s1: Slot, s2: Slot) -> Self {
        let (label, advancing) = if s1 != Slot::Empty {
            (row.player1.clone(), s1)
        } else if s2 != Slot::Empty {
            (row.player2.clone(), s2)
        } else {
            ("Bye".to_string(), Slot::Empty)
        };
        Self {
            match_id: match_id(division, round, row.number),
            label,
            advancing,
        }
    }

    /// Display note, e.g. "Anna auto-advances".
    pub fn note(&self) -> String {
        match self.advancing {
            Slot::Empty => "Empty slot".to_string(),
            _ => format!("{} auto-advances", self.label),
        }
    }
}

/// Flat collection of matches with an id index.
#[derive(Debug, Clone, Default)]
pub struct MatchGraph {
    matches: Vec<Match>,
    index: HashMap<String, usize>,
    /// Topological order (prerequisites first).
    order: Vec<usize>,
    pub(crate) byes: Vec<ByeAdvance>,
    pub(crate) seeds: BTreeMap<String, String>,
}

impl MatchGraph {
    /// Wraps pre-built matches: checks integrity, orders them and
    /// resolves `known_players`. `effective_players` starts equal to
    /// `known_players`.
    ///
    /// # Errors
    /// [`Error::InvalidGraph`] on duplicate ids, unknown or cross-division
    /// prerequisites, or dependency cycles.
    pub fn from_matches(mut matches: Vec<Match>) -> Result<Self> {
        validate_graph(&matches).map_err(Error::InvalidGraph)?;

        let index: HashMap<String, usize> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();
        let order = trace::topological_order(&matches, &index)?;
        trace::resolve_known_players(&mut matches, &index, &order);
        for m in &mut matches {
            m.effective_players = m.known_players.clone();
        }

        Ok(Self {
            matches,
            index,
            order,
            byes: Vec::new(),
            seeds: BTreeMap::new(),
        })
    }

    /// Attaches seed labels (player → label).
    pub fn with_seeds(mut self, seeds: impl IntoIterator<Item = (String, String)>) -> Self {
        self.seeds.extend(seeds);
        self
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub(crate) fn matches_mut(&mut self) -> &mut [Match] {
        &mut self.matches
    }

    pub fn get(&self, id: &str) -> Option<&Match> {
        self.index.get(id).map(|&i| &self.matches[i])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn index(&self) -> &HashMap<String, usize> {
        &self.index
    }

    /// Match indices, prerequisites first.
    pub fn topological_order(&self) -> &[usize] {
        &self.order
    }

    /// Bye cells removed from the schedulable set.
    pub fn byes(&self) -> &[ByeAdvance] {
        &self.byes
    }

    pub fn seed_of(&self, player: &str) -> Option<&str> {
        self.seeds.get(player).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
