//! Greedy match scheduling and KPI evaluation.
//!
//! # Components
//!
//! - [`CourtTimeline`]: bookable (court, slot) cells per venue rules.
//! - [`PlayerTracker`]: earliest next start per player.
//! - [`eligible_courts`]: ordered courts per tier and day.
//! - [`MatchScheduler`]: priority-ordered first-fit placement.
//! - [`ScheduleKpi`]: makespan, completion and utilization metrics.
//!
//! # Algorithm
//!
//! `MatchScheduler` is a greedy, priority-driven, first-available-slot
//! heuristic. It is not optimal: an unplaceable match is reported, not
//! retried.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod eligibility;
mod greedy;
mod kpi;
mod timeline;
mod tracker;

pub use eligibility::eligible_courts;
pub use greedy::{placement_order, MatchScheduler, ScheduleOutcome};
pub use kpi::ScheduleKpi;
pub use timeline::CourtTimeline;
pub use tracker::PlayerTracker;
