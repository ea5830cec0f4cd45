//! Reach probabilities for placeholder matches.
//!
//! For every match, estimates the probability that each known player
//! actually occupies it. The scheduler reserves only players at or above
//! the configured threshold.
//!
//! # Algorithm
//! 1. Visit matches in ascending priority (prerequisites first on ties).
//! 2. Real-player matches: every player has raw probability 1.
//! 3. Otherwise each prerequisite's players are carried forward, scaled by
//!    their chance of winning it: 0.5 in flat mode, a seed lookup in
//!    seeded mode. Named and bye-advanced players enter at 1.
//! 4. Normalize by round depth: `min(raw / 0.5^depth, 1)`, so every round
//!    carries comparable mass regardless of how deep it sits.
//!
//! The flat model halves per hop regardless of draw size. It is a
//! heuristic, not a measured distribution.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::{ScheduleConfig, SeedingTable, SEED_VS_SEED_KEY};
use crate::graph::{trace, MatchGraph};
use crate::models::Match;

/// player → probability
pub type PlayerProbabilities = BTreeMap<String, f64>;

/// match id → player → probability
pub type ProbabilityMap = BTreeMap<String, PlayerProbabilities>;

const FLAT_WIN: f64 = 0.5;

/// Probability that a player seeded `seed_a` beats one seeded `seed_b`.
pub fn win_probability(seed_a: Option<&str>, seed_b: Option<&str>, table: &SeedingTable) -> f64 {
    let default = table.default_probability();
    let vs_unseeded = |seed: &str| {
        table
            .get(&format!("{seed}_vs_unseeded"))
            .unwrap_or(default)
    };
    match (seed_a, seed_b) {
        (None, None) => default,
        (Some(a), None) => vs_unseeded(a),
        (None, Some(b)) => 1.0 - vs_unseeded(b),
        (Some(_), Some(_)) => table.get(SEED_VS_SEED_KEY).unwrap_or(default),
    }
}

/// Computes per-match reach probabilities.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilityEstimator<'a> {
    config: &'a ScheduleConfig,
}

impl<'a> ProbabilityEstimator<'a> {
    pub fn new(config: &'a ScheduleConfig) -> Self {
        Self { config }
    }

    /// Normalized probabilities for every match in the graph.
    ///
    /// Real-player matches map each player to exactly 1.0.
    pub fn estimate(&self, graph: &MatchGraph) -> ProbabilityMap {
        let matches = graph.matches();
        let order = graph.topological_order();

        let mut visit: Vec<(usize, usize)> = order.iter().enumerate().map(|(rank, &i)| (i, rank)).collect();
        visit.sort_by_key(|&(i, rank)| (matches[i].priority, rank));

        let mut raw: Vec<PlayerProbabilities> = vec![BTreeMap::new(); matches.len()];
        for &(i, _) in &visit {
            raw[i] = self.raw_for(graph, &matches[i], &raw);
        }

        let depths = trace::round_depths(matches, graph.index(), order);
        let mut out = ProbabilityMap::new();
        for (i, m) in matches.iter().enumerate() {
            let probs = if m.has_real_players() {
                certain(&m.known_players)
            } else {
                let base = FLAT_WIN.powi(depths[i] as i32);
                raw[i]
                    .iter()
                    .map(|(p, &r)| (p.clone(), (r / base).min(1.0)))
                    .collect()
            };
            out.insert(m.id.clone(), probs);
        }

        debug!(
            matches = out.len(),
            seeded = self.config.use_seeding,
            "reach probabilities estimated"
        );
        out
    }

    fn raw_for(&self, graph: &MatchGraph, m: &Match, raw: &[PlayerProbabilities]) -> PlayerProbabilities {
        if m.has_real_players() {
            return certain(&m.known_players);
        }

        let mut probs = PlayerProbabilities::new();
        for prereq in &m.prerequisites {
            let Some(j) = graph.position(prereq) else {
                continue;
            };
            let feeder = &raw[j];
            if feeder.is_empty() {
                continue;
            }
            if self.config.use_seeding {
                let sides = [side_players(graph, &graph.matches()[j], 0), side_players(graph, &graph.matches()[j], 1)];
                for (player, &p) in feeder {
                    let opposite = if sides[0].contains(player) { &sides[1] } else { &sides[0] };
                    let opponent = feeder.keys().find(|q| opposite.contains(*q));
                    let win = match opponent {
                        Some(o) => win_probability(
                            graph.seed_of(player),
                            graph.seed_of(o),
                            &self.config.seeding_probabilities,
                        ),
                        None => self.config.seeding_probabilities.default_probability(),
                    };
                    probs.insert(player.clone(), p * win);
                }
            } else {
                for (player, &p) in feeder {
                    probs.insert(player.clone(), p * FLAT_WIN);
                }
            }
        }

        for player in m.certain_players() {
            probs.insert(player, 1.0);
        }
        probs
    }
}

fn certain(players: &[String]) -> PlayerProbabilities {
    players.iter().map(|p| (p.clone(), 1.0)).collect()
}

/// Every player who may stand on one side of a match.
fn side_players(graph: &MatchGraph, m: &Match, side: usize) -> BTreeSet<String> {
    let slot = &m.slots[side];
    let mut set: BTreeSet<String> = slot.slot.names().iter().cloned().collect();
    set.extend(slot.advanced.iter().cloned());
    if let Some(feeder) = slot.feeder.as_deref().and_then(|id| graph.get(id)) {
        set.extend(feeder.known_players.iter().cloned());
    }
    set
}

/// Sets `effective_players` on every match from its known players.
///
/// Players below the division's threshold are dropped. A threshold of 0
/// (or below) keeps every known player.
pub fn apply_threshold(graph: &mut MatchGraph, probabilities: &ProbabilityMap, config: &ScheduleConfig) {
    let mut filtered = 0usize;
    for m in graph.matches_mut() {
        let threshold = config.threshold_for(&m.division_code);
        m.effective_players = if threshold <= 0.0 {
            m.known_players.clone()
        } else {
            let probs = probabilities.get(&m.id);
            m.known_players
                .iter()
                .filter(|p| {
                    probs
                        .and_then(|pp| pp.get(p.as_str()))
                        .copied()
                        .unwrap_or(0.0)
                        >= threshold
                })
                .cloned()
                .collect()
        };
        filtered += m.known_players.len() - m.effective_players.len();
    }
    debug!(filtered, "probability threshold applied");
}
