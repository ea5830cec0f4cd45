//! Tournament match scheduling.
//!
//! Turns division draws (elimination brackets, round-robin pools, group +
//! playoff) into a court/time schedule. Matches whose players depend on
//! earlier results reserve only the players likely to reach them.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Division`, `Match`, `Slot`, `Venue`,
//!   `TierRules`, `Schedule`, `Violation`
//! - **`graph`**: Match graph builder, slot parsing, pool round coloring,
//!   dependency tracing
//! - **`probability`**: Reach probabilities and threshold filtering
//! - **`scheduler`**: Court timeline, player tracker, greedy placement, KPIs
//! - **`validation`**: Graph integrity checks and schedule rule checks
//! - **`report`**, **`loader`**: Session records and their JSON files
//! - **`planner`**: The whole pipeline in one call
//!
//! # Example
//!
//! ```
//! use court_schedule::config::ScheduleConfig;
//! use court_schedule::models::{Division, DrawFormat};
//! use court_schedule::planner::Planner;
//!
//! let config = ScheduleConfig::default();
//! let division = Division::new("WS B", DrawFormat::RoundRobin)
//!     .with_pool(&[(1, "Ann", "Bea"), (2, "Ann", "Cat"), (3, "Bea", "Cat")]);
//!
//! let plan = Planner::new(&config).plan(&[division]).unwrap();
//! assert_eq!(plan.schedule.placement_count(), 3);
//! assert!(plan.schedule.is_valid());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod models;
pub mod planner;
pub mod probability;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
