//! Tournament scheduling domain models.
//!
//! Provides the data types shared by the graph builder, the probability
//! estimator, the scheduler and the validator.
//!
//! # Data Flow
//!
//! | Input | Built | Output |
//! |-------|-------|--------|
//! | [`Division`] draw rows | [`Match`] with [`PlayerSlot`]s | [`Placement`] |
//! | [`TierRules`] | [`CourtTier`], [`MatchTiming`] | [`Violation`] |
//! | [`Venue`] | court windows, slots, sessions | session records |

mod draw;
mod matches;
mod schedule;
mod tier;
mod venue;

pub use draw::{DrawFormat, DrawRound, Division, Entrant, Group, MatchRow, Partner, Playoff};
pub use matches::{match_id, Match, PlayerSlot, Slot};
pub use schedule::{Placement, Schedule, Violation, ViolationType};
pub use tier::{CourtTier, MatchTiming, TierRules};
pub use venue::{CourtPreference, CourtWindow, EventDay, Session, Venue};
