//! Priority-driven greedy match scheduler.
//!
//! # Algorithm
//!
//! 1. Estimate reach probabilities and filter each match's known players
//!    down to `effective_players`.
//! 2. Sort matches by (priority, pool round, most players first, match
//!    number, division code, id). The order is total, so runs are
//!    reproducible.
//! 3. For each match compute the earliest allowed start: players' next
//!    availability, every scheduled prerequisite's end plus this match's
//!    rest, and the finals-day boundary for semifinals and finals. Snap it
//!    up to the slot grid.
//! 4. Sweep slots chronologically from there. At each slot where all
//!    effective players are free, take the first eligible court that can
//!    hold the whole match.
//! 5. Players certain to play (named or bye-advanced) are reserved after
//!    every placement. Possible occupants of placeholder slots gate the
//!    placement but are never reserved.
//! 6. A match that fits nowhere is recorded as unscheduled.
//!
//! # Complexity
//! O(n · s · c) where n = matches, s = slots, c = eligible courts per slot.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::cmp::Reverse;
use tracing::{debug, info, warn};

use super::eligibility::eligible_courts;
use super::{CourtTimeline, PlayerTracker};
use crate::config::ScheduleConfig;
use crate::graph::MatchGraph;
use crate::models::{Match, Placement, Schedule};
use crate::probability::{apply_threshold, ProbabilityEstimator, ProbabilityMap};

/// Everything one scheduling run produces.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome<'a> {
    pub schedule: Schedule,
    /// Final court bookings.
    pub timeline: CourtTimeline<'a>,
    /// Final player availability.
    pub tracker: PlayerTracker,
    /// Reach probabilities used for filtering.
    pub probabilities: ProbabilityMap,
}

/// Greedy court/time placement.
///
/// # Example
///
/// ```
/// use court_schedule::config::ScheduleConfig;
/// use court_schedule::graph::GraphBuilder;
/// use court_schedule::models::{Division, DrawFormat};
/// use court_schedule::scheduler::MatchScheduler;
///
/// let config = ScheduleConfig::default();
/// let division = Division::new("MS C", DrawFormat::Elimination)
///     .with_round("Round 1", &[(1, "A", "B"), (2, "C", "D")])
///     .with_round("Final", &[(1, "Winner R1-M1", "Winner R1-M2")]);
/// let mut graph = GraphBuilder::new(&config.tiers).build(&[division]).unwrap();
///
/// let outcome = MatchScheduler::new(&config).schedule(&mut graph);
/// assert_eq!(outcome.schedule.placement_count(), 3);
/// assert!(outcome.schedule.unscheduled.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MatchScheduler<'a> {
    config: &'a ScheduleConfig,
}

impl<'a> MatchScheduler<'a> {
    pub fn new(config: &'a ScheduleConfig) -> Self {
        Self { config }
    }

    /// Places every match of the graph.
    ///
    /// Sets `effective_players` on the graph's matches; nothing else in the
    /// graph is modified.
    pub fn schedule(&self, graph: &mut MatchGraph) -> ScheduleOutcome<'a> {
        let probabilities = ProbabilityEstimator::new(self.config).estimate(graph);
        apply_threshold(graph, &probabilities, self.config);

        let venue = &self.config.venue;
        let slots = venue.slots();
        let mut timeline = CourtTimeline::new(venue);
        let mut tracker = PlayerTracker::new();
        let mut schedule = Schedule::new();

        for i in placement_order(graph.matches()) {
            let m = &graph.matches()[i];
            let earliest = venue.snap_up(self.earliest_start(m, &schedule, &tracker));

            let first = slots.partition_point(|&s| s < earliest);
            let found = slots[first..].iter().find_map(|&slot| {
                if !tracker.all_free_at(&m.effective_players, slot) {
                    return None;
                }
                eligible_courts(venue, m, slot)
                    .iter()
                    .find(|&&court| timeline.can_book(court, slot, m.duration_min))
                    .map(|&court| (court, slot))
            });

            match found {
                Some((court, start)) => {
                    timeline.book(court, start, &m.id, m.duration_min);
                    let certain = m.certain_players();
                    if !certain.is_empty() {
                        tracker.update(&certain, start, m.duration_min, m.rest_min);
                    }
                    debug!(match_id = %m.id, court, at = %venue.label(start), "placed");
                    schedule.add_placement(Placement::new(&m.id, court, start, m.end_at(start)));
                }
                None => {
                    warn!(match_id = %m.id, earliest = %venue.label(earliest), "no court/slot available");
                    schedule.add_unscheduled(&m.id);
                }
            }
        }

        info!(
            scheduled = schedule.placement_count(),
            unscheduled = schedule.unscheduled.len(),
            "scheduling finished"
        );

        ScheduleOutcome {
            schedule,
            timeline,
            tracker,
            probabilities,
        }
    }

    /// Earliest allowed start before snapping to the slot grid.
    ///
    /// Unscheduled prerequisites contribute nothing.
    fn earliest_start(&self, m: &Match, schedule: &Schedule, tracker: &PlayerTracker) -> u32 {
        let players = tracker
            .earliest_for(&m.effective_players)
            .max(tracker.earliest_for(&m.certain_players()));
        let feeders = m
            .prerequisites
            .iter()
            .filter_map(|id| schedule.placement(id))
            .map(|p| p.end_min + m.rest_min)
            .max()
            .unwrap_or(0);
        let finals = if m.is_sf_or_final {
            self.config.venue.finals_boundary()
        } else {
            0
        };
        players.max(feeders).max(finals)
    }
}

/// Match indices in placement order.
pub fn placement_order(matches: &[Match]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..matches.len()).collect();
    order.sort_by(|&a, &b| {
        let key = |m: &Match| {
            (
                m.priority,
                m.pool_round,
                Reverse(m.known_players.len()),
                m.match_num,
                m.division_code.clone(),
                m.id.clone(),
            )
        };
        key(&matches[a]).cmp(&key(&matches[b]))
    });
    order
}
