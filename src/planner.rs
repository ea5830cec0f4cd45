//! One-call pipeline: build → schedule → validate → report.

use tracing::info;

use crate::config::ScheduleConfig;
use crate::error::Result;
use crate::graph::{GraphBuilder, MatchGraph};
use crate::models::{Division, Schedule};
use crate::probability::ProbabilityMap;
use crate::report::Report;
use crate::scheduler::{MatchScheduler, ScheduleKpi};
use crate::validation::validate_schedule;

/// Result of a full planning run.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Match graph with `effective_players` filled in.
    pub graph: MatchGraph,
    /// Placements, unscheduled ids and validator violations.
    pub schedule: Schedule,
    pub probabilities: ProbabilityMap,
    pub kpi: ScheduleKpi,
    pub report: Report,
}

/// Runs every stage with one configuration.
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    config: &'a ScheduleConfig,
    tournament: String,
}

impl<'a> Planner<'a> {
    pub fn new(config: &'a ScheduleConfig) -> Self {
        Self {
            config,
            tournament: String::new(),
        }
    }

    pub fn with_tournament(mut self, name: impl Into<String>) -> Self {
        self.tournament = name.into();
        self
    }

    /// Plans a tournament.
    ///
    /// # Errors
    /// Only graph construction can fail; unplaceable matches and rule
    /// violations end up in the returned [`Schedule`].
    pub fn plan(&self, divisions: &[Division]) -> Result<Plan> {
        let mut graph = GraphBuilder::new(&self.config.tiers).build(divisions)?;
        info!(
            divisions = divisions.len(),
            matches = graph.len(),
            byes = graph.byes().len(),
            "match graph built"
        );

        let outcome = MatchScheduler::new(self.config).schedule(&mut graph);
        let mut schedule = outcome.schedule;
        for violation in validate_schedule(&graph, &schedule, &self.config.venue) {
            schedule.add_violation(violation);
        }

        let kpi = ScheduleKpi::calculate(&schedule, &graph, &self.config.venue);
        let report = Report::build(&graph, &schedule, &self.config.venue, self.tournament.clone());
        info!(
            scheduled = kpi.scheduled,
            unscheduled = kpi.unscheduled,
            warnings = schedule.violations.len(),
            makespan = %self.config.venue.label(kpi.makespan_min),
            "plan complete"
        );

        Ok(Plan {
            graph,
            schedule,
            probabilities: outcome.probabilities,
            kpi,
            report,
        })
    }
}
