//! Match graph builder.
//!
//! Turns per-division draw definitions into a flat list of schedulable
//! matches with dependency edges.
//!
//! # Formats
//! - **Elimination**: one match per non-bye bracket cell. A `Winner` slot
//!   depends on its feeder match; a bye feeder is resolved structurally and
//!   contributes its advancing players instead of a dependency.
//! - **Round robin**: one match per pairing, colored into pool rounds.
//! - **Group + playoff**: colored group pools plus a playoff bracket whose
//!   first round depends on every group match.

use std::collections::HashMap;
use tracing::debug;

use super::pool_rounds::assign_pool_rounds;
use super::slot::parse_slot;
use super::{ByeAdvance, MatchGraph};
use crate::error::{Error, Result};
use crate::models::{
    match_id, CourtTier, Division, DrawFormat, DrawRound, Match, MatchRow, PlayerSlot, Slot,
    TierRules,
};

/// Priority of elite round-robin pools (long rest makes them cascade).
pub const PRIORITY_ELITE_POOL: u32 = 5;
pub const PRIORITY_POOL: u32 = 10;
pub const PRIORITY_R1: u32 = 20;
pub const PRIORITY_GROUP_PLAYOFF: u32 = 30;
pub const PRIORITY_R2: u32 = 40;
pub const PRIORITY_QF: u32 = 50;
pub const PRIORITY_SF: u32 = 60;
pub const PRIORITY_FINAL: u32 = 70;

/// Priority of a named bracket round, if it has a fixed one.
pub fn round_priority(round_name: &str) -> Option<u32> {
    match round_name {
        "Round 1" => Some(PRIORITY_R1),
        "Round 2" => Some(PRIORITY_R2),
        "Quarter-Final" => Some(PRIORITY_QF),
        "Semi-Final" => Some(PRIORITY_SF),
        "Final" => Some(PRIORITY_FINAL),
        _ => None,
    }
}

fn is_sf_or_final(round_name: &str) -> bool {
    matches!(round_name, "Semi-Final" | "Final")
}

/// Which kind of bracket is being expanded.
enum Bracket<'a> {
    /// Elimination main draw.
    Main,
    /// Playoff after a group stage; the first round waits for all of `groups`.
    Playoff { groups: &'a [String] },
}

impl Bracket<'_> {
    fn round_name(&self, name: &str) -> String {
        match self {
            Bracket::Main => name.to_string(),
            Bracket::Playoff { .. } => format!("Playoff {name}"),
        }
    }

    fn priority(&self, name: &str) -> u32 {
        match self {
            Bracket::Main => round_priority(name).unwrap_or(PRIORITY_R1),
            Bracket::Playoff { .. } => round_priority(name)
                .unwrap_or(PRIORITY_GROUP_PLAYOFF)
                .max(PRIORITY_GROUP_PLAYOFF),
        }
    }
}

/// Shared per-division attributes.
struct DivisionContext<'a> {
    division: &'a Division,
    tier: CourtTier,
    duration_min: u32,
    rest_min: u32,
}

impl DivisionContext<'_> {
    fn code(&self) -> &str {
        &self.division.code
    }

    fn parse(&self, label: &str) -> Result<Slot> {
        parse_slot(label).ok_or_else(|| Error::MalformedSlot {
            division: self.division.code.clone(),
            label: label.to_string(),
        })
    }

    fn new_match(&self, round_name: &str, number: u32, slots: [PlayerSlot; 2], priority: u32) -> Match {
        let [p1, p2] = slots;
        let mut m = Match::new(self.code(), round_name, number, p1, p2)
            .with_tier(self.tier)
            .with_timing(self.duration_min, self.rest_min)
            .with_priority(priority);
        if !self.division.name.is_empty() {
            m.division_name = self.division.name.clone();
        }
        m.category = self.division.category.clone();
        m
    }
}

/// Builds a [`MatchGraph`] from draw definitions.
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    tiers: &'a TierRules,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(tiers: &'a TierRules) -> Self {
        Self { tiers }
    }

    /// Builds the full graph.
    ///
    /// # Errors
    /// Malformed slot strings, unknown formats, dangling winner references
    /// and graph integrity problems (duplicate ids, cycles) are fatal.
    pub fn build(&self, divisions: &[Division]) -> Result<MatchGraph> {
        let mut matches = Vec::new();
        let mut byes = Vec::new();
        let mut seeds = Vec::new();

        for division in divisions {
            let before = (matches.len(), byes.len());
            self.build_division(division, &mut matches, &mut byes)?;
            seeds.extend(division.seeds());
            debug!(
                division = %division.code,
                format = %division.format,
                matches = matches.len() - before.0,
                byes = byes.len() - before.1,
                "division expanded"
            );
        }

        let mut graph = MatchGraph::from_matches(matches)?;
        graph.byes = byes;
        graph.seeds = seeds.into_iter().collect();
        Ok(graph)
    }

    fn build_division(
        &self,
        division: &Division,
        matches: &mut Vec<Match>,
        byes: &mut Vec<ByeAdvance>,
    ) -> Result<()> {
        let format = DrawFormat::parse(&division.format).ok_or_else(|| Error::UnknownFormat {
            division: division.code.clone(),
            format: division.format.clone(),
        })?;
        let tier = self.tiers.tier_of(&division.code, &division.category);
        let timing = self.tiers.timing(tier);
        let ctx = DivisionContext {
            division,
            tier,
            duration_min: timing.duration_min,
            rest_min: timing.rest_min,
        };

        match format {
            DrawFormat::Elimination => {
                self.bracket(&ctx, &division.rounds, Bracket::Main, matches, byes)?;
            }
            DrawFormat::RoundRobin => {
                let pool = self.pool(&ctx, "Pool", &division.matches, byes)?;
                matches.extend(pool);
            }
            DrawFormat::GroupPlayoff => {
                let mut group_ids = Vec::new();
                for group in &division.groups {
                    let round = format!("{} Pool", group.name);
                    let pool = self.pool(&ctx, &round, &group.matches, byes)?;
                    group_ids.extend(pool.iter().map(|m| m.id.clone()));
                    matches.extend(pool);
                }
                if let Some(playoff) = &division.playoff {
                    let kind = Bracket::Playoff { groups: &group_ids };
                    self.bracket(&ctx, &playoff.rounds, kind, matches, byes)?;
                }
            }
        }
        Ok(())
    }

    /// Expands one round-robin pool and colors it.
    fn pool(
        &self,
        ctx: &DivisionContext<'_>,
        round_name: &str,
        rows: &[MatchRow],
        byes: &mut Vec<ByeAdvance>,
    ) -> Result<Vec<Match>> {
        let priority = if ctx.tier == CourtTier::Elite {
            PRIORITY_ELITE_POOL
        } else {
            PRIORITY_POOL
        };

        let mut pool = Vec::with_capacity(rows.len());
        for row in rows {
            let s1 = ctx.parse(&row.player1)?;
            let s2 = ctx.parse(&row.player2)?;
            if s1 == Slot::Empty || s2 == Slot::Empty {
                byes.push(ByeAdvance::new(ctx.code(), round_name, row, s1, s2));
                continue;
            }
            for (label, slot) in [(&row.player1, &s1), (&row.player2, &s2)] {
                if !slot.is_concrete() {
                    return Err(Error::MalformedSlot {
                        division: ctx.code().to_string(),
                        label: label.clone(),
                    });
                }
            }
            let slots = [
                PlayerSlot::new(row.player1.clone(), s1),
                PlayerSlot::new(row.player2.clone(), s2),
            ];
            pool.push(ctx.new_match(round_name, row.number, slots, priority));
        }

        assign_pool_rounds(&mut pool);
        Ok(pool)
    }

    /// Expands a bracket (main draw or playoff).
    fn bracket(
        &self,
        ctx: &DivisionContext<'_>,
        rounds: &[DrawRound],
        kind: Bracket<'_>,
        matches: &mut Vec<Match>,
        byes: &mut Vec<ByeAdvance>,
    ) -> Result<()> {
        // (round name, match number) → parsed slots
        let mut cells: HashMap<(&str, u32), [Slot; 2]> = HashMap::new();
        for round in rounds {
            for row in &round.matches {
                let slots = [ctx.parse(&row.player1)?, ctx.parse(&row.player2)?];
                cells.insert((round.name.as_str(), row.number), slots);
            }
        }
        let is_bye = |slots: &[Slot; 2]| slots.iter().any(|s| *s == Slot::Empty);

        for (round_idx, round) in rounds.iter().enumerate() {
            let round_name = kind.round_name(&round.name);
            let priority = kind.priority(&round.name);

            for row in &round.matches {
                let cell = &cells[&(round.name.as_str(), row.number)];
                let [s1, s2] = cell.clone();
                if is_bye(cell) {
                    byes.push(ByeAdvance::new(ctx.code(), &round_name, row, s1, s2));
                    continue;
                }

                let id = match_id(ctx.code(), &round_name, row.number);
                let mut slots = [
                    PlayerSlot::new(row.player1.clone(), s1),
                    PlayerSlot::new(row.player2.clone(), s2),
                ];
                for slot in &mut slots {
                    if let Slot::Winner { round, match_num } = &slot.slot {
                        match resolve_feeder(&cells, rounds, &is_bye, round_idx, round, *match_num) {
                            Some(Feeder::Match(r, n)) => {
                                slot.feeder = Some(match_id(ctx.code(), &kind.round_name(&r), n));
                            }
                            Some(Feeder::Advanced(names)) => slot.advanced = names,
                            Some(Feeder::Open) => {}
                            None => {
                                return Err(Error::UnknownFeeder {
                                    match_id: id,
                                    label: slot.label.clone(),
                                })
                            }
                        }
                    }
                }

                let mut m = ctx.new_match(&round_name, row.number, slots, priority);
                m.is_sf_or_final = is_sf_or_final(&round.name);
                m.prerequisites = match &kind {
                    Bracket::Playoff { groups } if round_idx == 0 => groups.to_vec(),
                    _ => Vec::new(),
                };
                for feeder in m.slots.iter().filter_map(|s| s.feeder.clone()) {
                    if !m.prerequisites.contains(&feeder) {
                        m.prerequisites.push(feeder);
                    }
                }
                matches.push(m);
            }
        }
        Ok(())
    }
}

/// Where the winner of a bracket cell comes from.
enum Feeder {
    /// A schedulable match (round name, number).
    Match(String, u32),
    /// Decided by a bye: these players advance without playing.
    Advanced(Vec<String>),
    /// Decided by a bye with no concrete side (empty cell or position).
    Open,
}

/// Round a winner reference points at, with its index in `rounds`.
///
/// An exact name wins. Otherwise the reference is taken as a name prefix
/// (rounds without a fixed code are abbreviated by their first letters,
/// e.g. `Ro` for "Round 3") and the closest round before `before` that
/// carries it is chosen.
fn referenced_round<'r>(rounds: &'r [DrawRound], before: usize, reference: &str) -> Option<(usize, &'r str)> {
    if let Some(i) = rounds.iter().position(|r| r.name == reference) {
        return Some((i, rounds[i].name.as_str()));
    }
    rounds[..before.min(rounds.len())]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, r)| r.name.starts_with(reference))
        .map(|(i, r)| (i, r.name.as_str()))
}

/// Follows a winner reference made from round `round_idx` through any
/// chain of byes.
///
/// Returns `None` for references to cells that do not exist.
fn resolve_feeder(
    cells: &HashMap<(&str, u32), [Slot; 2]>,
    rounds: &[DrawRound],
    is_bye: &impl Fn(&[Slot; 2]) -> bool,
    round_idx: usize,
    round: &str,
    match_num: u32,
) -> Option<Feeder> {
    let mut from = round_idx;
    let mut current = (round.to_string(), match_num);
    // Each hop moves to an earlier cell; more hops than cells means a loop.
    for _ in 0..=cells.len() {
        let (idx, name) = referenced_round(rounds, from, &current.0)?;
        let slots = cells.get(&(name, current.1))?;
        if !is_bye(slots) {
            return Some(Feeder::Match(name.to_string(), current.1));
        }
        let advancing = slots.iter().find(|s| **s != Slot::Empty);
        match advancing {
            Some(Slot::Players(names)) => return Some(Feeder::Advanced(names.clone())),
            Some(Slot::Winner { round, match_num }) => {
                from = idx;
                current = (round.clone(), *match_num);
            }
            _ => return Some(Feeder::Open),
        }
    }
    None
}
