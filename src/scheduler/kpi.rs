//! Schedule quality metrics (KPIs).
//!
//! Computes summary indicators from a completed schedule and its match
//! graph.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest end minute |
//! | Completion Rate | Scheduled / (scheduled + unscheduled) |
//! | Court Utilization | Booked minutes / open minutes, per court |
//! | Avg Utilization | Mean over courts that are ever open |
//! | Division Load | Scheduled matches per division |
//! | Session Load | Scheduled matches per output session |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;
use std::collections::BTreeMap;

use crate::graph::MatchGraph;
use crate::models::{Schedule, Venue};

/// Schedule performance indicators. Times are in minutes.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    pub scheduled: usize,
    pub unscheduled: usize,
    /// Latest end minute (0 for an empty schedule).
    pub makespan_min: u32,
    /// Fraction of matches placed (1.0 when there is nothing to place).
    pub completion_rate: f64,
    /// Court → booked minutes.
    pub booked_by_court: BTreeMap<u32, u32>,
    /// Court → booked / open minutes (0.0..1.0).
    pub utilization_by_court: BTreeMap<u32, f64>,
    /// Mean utilization over all courts.
    pub avg_utilization: f64,
    /// Division code → scheduled matches.
    pub by_division: BTreeMap<String, usize>,
    /// Session name → scheduled matches.
    pub by_session: BTreeMap<String, usize>,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    ///
    /// Booked minutes count each match's full court block, so a 45-minute
    /// match on a 30-minute grid counts 60.
    pub fn calculate(schedule: &Schedule, graph: &MatchGraph, venue: &Venue) -> Self {
        let scheduled = schedule.placement_count();
        let unscheduled = schedule.unscheduled.len();

        let mut booked_by_court: BTreeMap<u32, u32> = BTreeMap::new();
        let mut by_division: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_session: BTreeMap<String, usize> = BTreeMap::new();
        for p in &schedule.placements {
            let cells = venue.cells_for(p.duration_min());
            *booked_by_court.entry(p.court).or_insert(0) += cells * venue.slot_min;

            if let Some(m) = graph.get(&p.match_id) {
                *by_division.entry(m.division_code.clone()).or_insert(0) += 1;
            }
            if let Some(session) = venue.sessions.iter().find(|s| s.contains(p.start_min)) {
                *by_session.entry(session.name.clone()).or_insert(0) += 1;
            }
        }

        let utilization_by_court: BTreeMap<u32, f64> = venue
            .courts()
            .into_iter()
            .filter_map(|court| {
                let open = venue.open_minutes(court);
                (open > 0).then(|| {
                    let booked = booked_by_court.get(&court).copied().unwrap_or(0);
                    (court, booked as f64 / open as f64)
                })
            })
            .collect();
        let avg_utilization = if utilization_by_court.is_empty() {
            0.0
        } else {
            utilization_by_court.values().sum::<f64>() / utilization_by_court.len() as f64
        };

        let total = scheduled + unscheduled;
        let completion_rate = if total == 0 {
            1.0
        } else {
            scheduled as f64 / total as f64
        };

        Self {
            scheduled,
            unscheduled,
            makespan_min: schedule.makespan_min(),
            completion_rate,
            booked_by_court,
            utilization_by_court,
            avg_utilization,
            by_division,
            by_session,
        }
    }

    /// Whether every match found a place.
    pub fn is_complete(&self) -> bool {
        self.unscheduled == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfig;
    use crate::graph::GraphBuilder;
    use crate::models::{Division, DrawFormat};
    use crate::scheduler::MatchScheduler;

    #[test]
    fn test_kpi_basic() {
        let config = ScheduleConfig::default();
        let div = Division::new("MS C", DrawFormat::Elimination)
            .with_round("Round 1", &[(1, "A", "B"), (2, "C", "D")])
            .with_round("Final", &[(1, "Winner R1-M1", "Winner R1-M2")]);
        let mut graph = GraphBuilder::new(&config.tiers).build(&[div]).unwrap();
        let outcome = MatchScheduler::new(&config).schedule(&mut graph);

        let kpi = ScheduleKpi::calculate(&outcome.schedule, &graph, &config.venue);
        assert_eq!(kpi.scheduled, 3);
        assert!(kpi.is_complete());
        assert_eq!(kpi.completion_rate, 1.0);
        assert_eq!(kpi.makespan_min, 1470);
        assert_eq!(kpi.by_division["MS C"], 3);
        assert_eq!(kpi.by_session["Saturday Morning"], 2);
        assert_eq!(kpi.by_session["Sunday Morning"], 1);
        assert_eq!(kpi.booked_by_court[&1], 60);
        // Court 1 is open 780 + 420 minutes
        assert!((kpi.utilization_by_court[&1] - 60.0 / 1200.0).abs() < 1e-9);
        assert_eq!(kpi.utilization_by_court.len(), 12);
    }

    #[test]
    fn test_kpi_empty() {
        let graph = MatchGraph::default();
        let kpi = ScheduleKpi::calculate(&Schedule::new(), &graph, &Venue::default());
        assert_eq!(kpi.makespan_min, 0);
        assert_eq!(kpi.completion_rate, 1.0);
        assert_eq!(kpi.avg_utilization, 0.0);
        assert!(kpi.by_session.is_empty());
    }

    #[test]
    fn test_elite_block_counts_two_cells() {
        let mut s = Schedule::new();
        s.add_placement(crate::models::Placement::new("MS V:Pool:M1", 5, 0, 45));
        let kpi = ScheduleKpi::calculate(&s, &MatchGraph::default(), &Venue::default());
        assert_eq!(kpi.booked_by_court[&5], 60);
        assert!(kpi.by_division.is_empty());
    }
}
