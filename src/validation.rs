//! Validation for match graphs and finished schedules.
//!
//! Two passes with different failure semantics:
//! - [`validate_graph`] checks structural integrity of the match graph
//!   before scheduling. Any problem is fatal.
//! - [`validate_schedule`] re-derives rule violations from a finished
//!   schedule. Violations are reported, never raised.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

use crate::graph::{trace, MatchGraph};
use crate::models::{Match, Schedule, Venue, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A graph integrity problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of graph integrity problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two matches share the same id.
    DuplicateId,
    /// A prerequisite names a match that doesn't exist.
    InvalidPrerequisite,
    /// A prerequisite belongs to another division.
    CrossDivisionPrerequisite,
    /// Dependency graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a flat match list.
///
/// Checks:
/// 1. No duplicate match ids
/// 2. Every prerequisite references an existing match
/// 3. Prerequisites stay inside their division
/// 4. No circular dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_graph(matches: &[Match]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut index: HashMap<String, usize> = HashMap::with_capacity(matches.len());
    for (i, m) in matches.iter().enumerate() {
        if index.contains_key(&m.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate match ID: {}", m.id),
            ));
        } else {
            index.insert(m.id.clone(), i);
        }
    }

    for m in matches {
        for prereq in &m.prerequisites {
            match index.get(prereq) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPrerequisite,
                    format!("Match '{}' references unknown prerequisite '{}'", m.id, prereq),
                )),
                Some(&j) if matches[j].division_code != m.division_code => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::CrossDivisionPrerequisite,
                        format!(
                            "Match '{}' depends on '{}' from division {}",
                            m.id, prereq, matches[j].division_code
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    if let Err(e) = trace::topological_order(matches, &index) {
        errors.push(ValidationError::new(
            ValidationErrorKind::CyclicDependency,
            e.to_string(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Re-derives rule violations from a finished schedule.
///
/// Checks, in order:
/// 1. Semifinals and finals start on or after the finals-day boundary
/// 2. Every scheduled prerequisite ends before its dependent starts
/// 3. Players certain to play a match (named or bye-advanced) are never
///    double-booked and always get `venue.min_rest_min` between matches
/// 4. Elite matches sit on the reserved elite courts
///
/// Possible occupants of placeholder slots are skipped by check 3.
pub fn validate_schedule(graph: &MatchGraph, schedule: &Schedule, venue: &Venue) -> Vec<Violation> {
    let mut violations = Vec::new();
    let placed = move || {
        graph
            .matches()
            .iter()
            .filter_map(move |m| schedule.placement(&m.id).map(|p| (m, p)))
    };

    let boundary = venue.finals_boundary();
    for (m, p) in placed() {
        if m.is_sf_or_final && p.start_min < boundary {
            violations.push(Violation::new(
                ViolationType::FinalsTooEarly,
                &m.id,
                format!("SF/Final before finals day: {} at {}", m.id, venue.label(p.start_min)),
            ));
        }
    }

    for (m, p) in placed() {
        for prereq in &m.prerequisites {
            let Some(q) = schedule.placement(prereq) else {
                continue;
            };
            if q.end_min >= p.start_min {
                violations.push(Violation::new(
                    ViolationType::RoundOrder,
                    &m.id,
                    format!(
                        "Round order violation: {} ends {} but {} starts {}",
                        prereq,
                        venue.label(q.end_min),
                        m.id,
                        venue.label(p.start_min)
                    ),
                ));
            }
        }
    }

    // player → (start, end, match id)
    let mut by_player: BTreeMap<String, Vec<(u32, u32, &str)>> = BTreeMap::new();
    for (m, p) in placed() {
        for name in m.certain_players() {
            by_player
                .entry(name)
                .or_default()
                .push((p.start_min, p.end_min, m.id.as_str()));
        }
    }
    for (player, mut slots) in by_player {
        slots.sort_unstable();
        for pair in slots.windows(2) {
            let (_, end1, id1) = pair[0];
            let (start2, _, id2) = pair[1];
            if start2 < end1 {
                violations.push(Violation::new(
                    ViolationType::DoubleBooking,
                    id1,
                    format!("Double-booking: {player} in {id1} and {id2}"),
                ));
            } else if start2 < end1 + venue.min_rest_min {
                violations.push(Violation::new(
                    ViolationType::InsufficientRest,
                    id1,
                    format!(
                        "Insufficient rest for {player}: {id1} ends at {}, {id2} starts at {}",
                        venue.label(end1),
                        venue.label(start2)
                    ),
                ));
            }
        }
    }

    let elite: HashSet<u32> = venue.elite_courts().into_iter().collect();
    for (m, p) in placed() {
        if m.is_elite() && !elite.contains(&p.court) {
            violations.push(Violation::new(
                ViolationType::EliteCourt,
                &m.id,
                format!("Elite on wrong court: {} on court {}", m.id, p.court),
            ));
        }
    }

    for v in &violations {
        warn!(kind = ?v.violation_type, "{}", v.message);
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourtTier, Placement, PlayerSlot, Slot};

    fn real(division: &str, round: &str, n: u32, a: &str, b: &str) -> Match {
        Match::new(
            division,
            round,
            n,
            PlayerSlot::new(a, Slot::Players(vec![a.into()])),
            PlayerSlot::new(b, Slot::Players(vec![b.into()])),
        )
    }

    fn final_of(division: &str, feeders: &[&str]) -> Match {
        let winner = |n: u32| {
            PlayerSlot::new(
                format!("Winner R1-M{n}"),
                Slot::Winner {
                    round: "Round 1".into(),
                    match_num: n,
                },
            )
        };
        let mut m = Match::new(division, "Final", 1, winner(1), winner(2));
        m.is_sf_or_final = true;
        m.prerequisites = feeders.iter().map(|s| s.to_string()).collect();
        m
    }

    fn knockout() -> MatchGraph {
        MatchGraph::from_matches(vec![
            real("MS C", "Round 1", 1, "A", "B"),
            real("MS C", "Round 1", 2, "C", "D"),
            final_of("MS C", &["MS C:Round 1:M1", "MS C:Round 1:M2"]),
        ])
        .unwrap()
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_valid_graph() {
        assert!(validate_graph(knockout().matches()).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let matches = vec![
            real("MS C", "Round 1", 1, "A", "B"),
            real("MS C", "Round 1", 1, "C", "D"),
        ];
        let errors = validate_graph(&matches).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_invalid_prerequisite() {
        let matches = vec![final_of("MS C", &["MS C:Round 1:M9"])];
        let errors = validate_graph(&matches).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidPrerequisite));
    }

    #[test]
    fn test_cross_division_prerequisite() {
        let matches = vec![
            real("WS C", "Round 1", 1, "A", "B"),
            final_of("MS C", &["WS C:Round 1:M1"]),
        ];
        let errors = validate_graph(&matches).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::CrossDivisionPrerequisite);
    }

    #[test]
    fn test_cyclic_dependency() {
        let mut sf = final_of("MS C", &["MS C:Final:M1"]);
        sf.id = "MS C:Semi-Final:M1".into();
        let f = final_of("MS C", &["MS C:Semi-Final:M1"]);
        let errors = validate_graph(&[sf, f]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_clean_schedule() {
        let graph = knockout();
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS C:Round 1:M1", 1, 0, 30));
        s.add_placement(Placement::new("MS C:Round 1:M2", 2, 0, 30));
        s.add_placement(Placement::new("MS C:Final:M1", 1, 1440, 1470));
        assert!(validate_schedule(&graph, &s, &Venue::default()).is_empty());
    }

    #[test]
    fn test_final_too_early_and_round_order() {
        let graph = knockout();
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS C:Round 1:M1", 1, 60, 90));
        s.add_placement(Placement::new("MS C:Final:M1", 1, 60, 90));
        let v = validate_schedule(&graph, &s, &Venue::default());
        assert_eq!(kinds(&v), vec![ViolationType::FinalsTooEarly, ViolationType::RoundOrder]);
        assert!(v[0].message.contains("Saturday 10:00"));
    }

    #[test]
    fn test_double_booking_and_rest() {
        let graph = MatchGraph::from_matches(vec![
            real("MS C", "Round 1", 1, "A", "B"),
            real("MD C", "Round 1", 1, "A", "C"),
            real("XD C", "Pool", 1, "A", "D"),
        ])
        .unwrap();
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS C:Round 1:M1", 1, 0, 30));
        s.add_placement(Placement::new("MD C:Round 1:M1", 2, 0, 30));
        s.add_placement(Placement::new("XD C:Pool:M1", 3, 30, 60));
        let v = validate_schedule(&graph, &s, &Venue::default());
        assert_eq!(
            kinds(&v),
            vec![ViolationType::DoubleBooking, ViolationType::InsufficientRest]
        );
        assert!(v[0].message.starts_with("Double-booking: A"));
    }

    #[test]
    fn test_placeholder_players_not_checked() {
        let graph = knockout();
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS C:Round 1:M1", 1, 1380, 1410));
        // Known players of the final overlap with A/B but are only possible
        s.add_placement(Placement::new("MS C:Final:M1", 5, 1440, 1470));
        assert!(validate_schedule(&graph, &s, &Venue::default()).is_empty());
    }

    #[test]
    fn test_named_player_beside_placeholder_is_checked() {
        let winner = PlayerSlot::new(
            "Winner R1-M1",
            Slot::Winner {
                round: "Round 1".into(),
                match_num: 1,
            },
        );
        let r2 = Match::new("MS C", "Round 2", 1, winner, PlayerSlot::new("C", Slot::Players(vec!["C".into()])));
        let graph = MatchGraph::from_matches(vec![r2, real("MS B", "Quarter-Final", 1, "C", "D")]).unwrap();
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS C:Round 2:M1", 1, 0, 30));
        s.add_placement(Placement::new("MS B:Quarter-Final:M1", 2, 0, 30));

        let v = validate_schedule(&graph, &s, &Venue::default());
        assert_eq!(kinds(&v), vec![ViolationType::DoubleBooking]);
        assert_eq!(v[0].message, "Double-booking: C in MS B:Quarter-Final:M1 and MS C:Round 2:M1");
    }

    #[test]
    fn test_elite_court() {
        let m = real("MS V", "Pool", 1, "A", "B").with_tier(CourtTier::Elite);
        let graph = MatchGraph::from_matches(vec![m]).unwrap();
        let mut s = Schedule::new();
        s.add_placement(Placement::new("MS V:Pool:M1", 2, 0, 45));
        let v = validate_schedule(&graph, &s, &Venue::default());
        assert_eq!(kinds(&v), vec![ViolationType::EliteCourt]);
        assert_eq!(v[0].message, "Elite on wrong court: MS V:Pool:M1 on court 2");
    }
}
