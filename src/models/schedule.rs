//! Schedule (solution) model.
//!
//! A schedule is the court/time placement of every match the scheduler
//! managed to fit, the ids of those it could not, and any rule violations
//! found afterwards by the validator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete scheduling result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Placements, in the order they were made.
    pub placements: Vec<Placement>,
    /// Ids of matches that found no (slot, court) pair.
    pub unscheduled: Vec<String>,
    /// Violations detected by the validator.
    pub violations: Vec<Violation>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

/// A match-court-time placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub match_id: String,
    pub court: u32,
    /// Start minute.
    pub start_min: u32,
    /// End minute (start + duration).
    pub end_min: u32,
}

/// A rule violation found in a finished schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub violation_type: ViolationType,
    /// Match (or first of the pair) the violation is about.
    pub match_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Semifinal or final before the finals-day boundary.
    FinalsTooEarly,
    /// Feeder match not finished before its dependent starts.
    RoundOrder,
    /// A player booked into two overlapping matches.
    DoubleBooking,
    /// A player's matches closer than the minimum rest period.
    InsufficientRest,
    /// Elite match outside the reserved elite courts.
    EliteCourt,
}

impl Placement {
    pub fn new(match_id: impl Into<String>, court: u32, start_min: u32, end_min: u32) -> Self {
        Self {
            match_id: match_id.into(),
            court,
            start_min,
            end_min,
        }
    }

    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.end_min - self.start_min
    }
}

impl Violation {
    pub fn new(
        violation_type: ViolationType,
        match_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            match_id: match_id.into(),
            message: message.into(),
        }
    }
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.index
            .insert(placement.match_id.clone(), self.placements.len());
        self.placements.push(placement);
    }

    /// Records a match that could not be placed.
    pub fn add_unscheduled(&mut self, match_id: impl Into<String>) {
        self.unscheduled.push(match_id.into());
    }

    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the validator found nothing.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Placement of a match, if it was scheduled.
    pub fn placement(&self, match_id: &str) -> Option<&Placement> {
        match self.index.get(match_id) {
            Some(&i) => self.placements.get(i),
            // Deserialized schedules have no index.
            None => self.placements.iter().find(|p| p.match_id == match_id),
        }
    }

    pub fn is_scheduled(&self, match_id: &str) -> bool {
        self.placement(match_id).is_some()
    }

    /// Latest end minute across all placements.
    pub fn makespan_min(&self) -> u32 {
        self.placements.iter().map(|p| p.end_min).max().unwrap_or(0)
    }

    /// All placements on one court.
    pub fn placements_on_court(&self, court: u32) -> Vec<&Placement> {
        self.placements.iter().filter(|p| p.court == court).collect()
    }

    /// Validator messages, in detection order.
    pub fn warnings(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS C:Round 1:M1", 1, 0, 30));
        s.add_placement(Placement::new("MS C:Round 1:M2", 2, 0, 30));
        s.add_placement(Placement::new("MS C:Final:M1", 1, 1440, 1470));
        s.add_unscheduled("MS V:Pool:M9");
        s
    }

    #[test]
    fn test_schedule_lookup() {
        let s = sample_schedule();
        let p = s.placement("MS C:Final:M1").unwrap();
        assert_eq!(p.court, 1);
        assert_eq!(p.duration_min(), 30);
        assert!(s.is_scheduled("MS C:Round 1:M2"));
        assert!(!s.is_scheduled("MS V:Pool:M9"));
        assert_eq!(s.placement_count(), 3);
    }

    #[test]
    fn test_makespan_and_court() {
        let s = sample_schedule();
        assert_eq!(s.makespan_min(), 1470);
        assert_eq!(s.placements_on_court(1).len(), 2);
        assert!(s.placements_on_court(9).is_empty());
    }

    #[test]
    fn test_violations() {
        let mut s = sample_schedule();
        assert!(s.is_valid());
        s.add_violation(Violation::new(
            ViolationType::EliteCourt,
            "MS V:Pool:M1",
            "Elite on wrong court: MS V:Pool:M1 on court 1",
        ));
        assert!(!s.is_valid());
        assert_eq!(s.warnings(), vec!["Elite on wrong court: MS V:Pool:M1 on court 1"]);
    }

    #[test]
    fn test_lookup_after_deserialize() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.placement("MS C:Round 1:M2").map(|p| p.court), Some(2));
        assert_eq!(back.unscheduled, vec!["MS V:Pool:M9"]);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert_eq!(s.makespan_min(), 0);
        assert!(s.is_valid());
        assert_eq!(s.placement_count(), 0);
    }
}
