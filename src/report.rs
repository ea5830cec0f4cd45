//! Published schedule records.
//!
//! Placements are turned into display records, sorted by (start, court)
//! and split into the venue's sessions. A [`RunSummary`] indexes the
//! session files and carries totals, unscheduled ids and validator
//! warnings.

use serde::{Deserialize, Serialize};

use crate::graph::MatchGraph;
use crate::models::{Schedule, Venue};

/// Note attached to matches whose players are not known yet.
pub const TBD_NOTE: &str = "Players TBD based on earlier results";

/// One scheduled match as published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Start time "HH:MM".
    pub time: String,
    pub court: u32,
    /// Division code.
    pub division: String,
    pub division_name: String,
    pub round: String,
    pub match_num: u32,
    /// Slot strings as supplied in the draw.
    pub player1: String,
    pub player2: String,
    pub duration_min: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip)]
    pub start_min: u32,
}

/// One session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSchedule {
    pub session: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub matches: Vec<MatchRecord>,
    #[serde(skip)]
    pub file: String,
}

/// Index entry for one session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub file: String,
    pub label: String,
    /// "HH:MM–HH:MM"
    pub time_range: String,
    pub match_count: usize,
}

/// Run totals and session index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub tournament: String,
    /// ISO date of generation, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<String>,
    pub sessions: Vec<SessionSummary>,
    /// Scheduled plus unscheduled (byes excluded).
    pub total_matches: usize,
    pub total_scheduled: usize,
    pub unscheduled: Vec<String>,
    pub warnings: Vec<String>,
}

/// Everything written for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub sessions: Vec<SessionSchedule>,
    pub summary: RunSummary,
}

impl Report {
    /// Builds session records from a validated schedule.
    ///
    /// Placements starting outside every session are left out of the
    /// session files but still count as scheduled.
    pub fn build(graph: &MatchGraph, schedule: &Schedule, venue: &Venue, tournament: impl Into<String>) -> Self {
        let mut records: Vec<MatchRecord> = schedule
            .placements
            .iter()
            .filter_map(|p| {
                let m = graph.get(&p.match_id)?;
                let (_, time) = venue.display(p.start_min);
                let notes = m.slots[0].slot.is_placeholder().then(|| TBD_NOTE.to_string());
                Some(MatchRecord {
                    time,
                    court: p.court,
                    division: m.division_code.clone(),
                    division_name: m.division_name.clone(),
                    round: m.round_name.clone(),
                    match_num: m.match_num,
                    player1: m.slots[0].label.clone(),
                    player2: m.slots[1].label.clone(),
                    duration_min: m.duration_min,
                    category: m.category.clone(),
                    notes,
                    start_min: p.start_min,
                })
            })
            .collect();
        records.sort_by_key(|r| (r.start_min, r.court));

        let sessions: Vec<SessionSchedule> = venue
            .sessions
            .iter()
            .map(|s| SessionSchedule {
                session: s.name.clone(),
                date: s.date.clone(),
                start: s.start_time.clone(),
                end: s.end_time.clone(),
                matches: records
                    .iter()
                    .filter(|r| s.contains(r.start_min))
                    .cloned()
                    .collect(),
                file: s.file.clone(),
            })
            .collect();

        let summary = RunSummary {
            tournament: tournament.into(),
            generated: None,
            sessions: sessions
                .iter()
                .map(|s| SessionSummary {
                    file: s.file.clone(),
                    label: s.session.clone(),
                    time_range: format!("{}–{}", s.start, s.end),
                    match_count: s.matches.len(),
                })
                .collect(),
            total_matches: schedule.placement_count() + schedule.unscheduled.len(),
            total_scheduled: schedule.placement_count(),
            unscheduled: schedule.unscheduled.clone(),
            warnings: schedule.warnings(),
        };

        Self { sessions, summary }
    }

    /// Stamps the generation date.
    pub fn with_generated(mut self, date: impl Into<String>) -> Self {
        self.summary.generated = Some(date.into());
        self
    }

    /// Matches across all session files.
    pub fn published_count(&self) -> usize {
        self.sessions.iter().map(|s| s.matches.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Division, DrawFormat, Placement, TierRules};
    use crate::graph::GraphBuilder;

    fn graph() -> MatchGraph {
        let div = Division::new("MS C", DrawFormat::Elimination)
            .with_name("Men's Singles C")
            .with_category("Open")
            .with_round("Round 1", &[(1, "A", "B"), (2, "C", "D")])
            .with_round("Final", &[(1, "Winner R1-M1", "Winner R1-M2")]);
        GraphBuilder::new(&TierRules::default()).build(&[div]).unwrap()
    }

    fn schedule() -> Schedule {
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS C:Final:M1", 1, 1440, 1470));
        s.add_placement(Placement::new("MS C:Round 1:M2", 2, 0, 30));
        s.add_placement(Placement::new("MS C:Round 1:M1", 1, 0, 30));
        s
    }

    #[test]
    fn test_records_sorted_and_split() {
        let report = Report::build(&graph(), &schedule(), &Venue::default(), "Open 2025");
        assert_eq!(report.sessions.len(), 5);

        let morning = &report.sessions[0];
        assert_eq!(morning.session, "Saturday Morning");
        assert_eq!(morning.file, "Saturday_Morning.json");
        let courts: Vec<u32> = morning.matches.iter().map(|r| r.court).collect();
        assert_eq!(courts, vec![1, 2]);
        assert_eq!(morning.matches[0].time, "09:00");
        assert_eq!(morning.matches[0].division_name, "Men's Singles C");
        assert!(morning.matches[0].notes.is_none());

        let sunday = &report.sessions[3];
        assert_eq!(sunday.matches.len(), 1);
        assert_eq!(sunday.matches[0].player1, "Winner R1-M1");
        assert_eq!(sunday.matches[0].notes.as_deref(), Some(TBD_NOTE));
        assert_eq!(report.published_count(), 3);
    }

    #[test]
    fn test_summary() {
        let mut s = schedule();
        s.add_unscheduled("MS C:Round 1:M9");
        let report = Report::build(&graph(), &s, &Venue::default(), "Open 2025").with_generated("2025-03-01");
        let summary = &report.summary;
        assert_eq!(summary.total_matches, 4);
        assert_eq!(summary.total_scheduled, 3);
        assert_eq!(summary.unscheduled, vec!["MS C:Round 1:M9"]);
        assert_eq!(summary.sessions[0].time_range, "09:00–13:00");
        assert_eq!(summary.sessions[0].match_count, 2);
        assert_eq!(summary.generated.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_record_json_shape() {
        let report = Report::build(&graph(), &schedule(), &Venue::default(), "T");
        let json = serde_json::to_value(&report.sessions[0].matches[0]).unwrap();
        assert_eq!(json["division"], "MS C");
        assert_eq!(json["match_num"], 1);
        assert!(json.get("notes").is_none());
        assert!(json.get("start_min").is_none());

        let summary = serde_json::to_value(&RunSummary {
            generated: None,
            ..report.summary.clone()
        })
        .unwrap();
        assert!(summary.get("generated").is_none());
    }
}
