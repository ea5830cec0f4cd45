//! Venue model: event days, court opening windows, slots and sessions.
//!
//! # Time Model
//! All times are whole minutes relative to the first day's opening
//! (day 1 09:00 = minute 0). Later days start at fixed offsets, so the
//! gap between days is simply never covered by any court window.
//!
//! # Availability
//! A court operates at a minute iff the day containing that minute has a
//! [`CourtWindow`] that covers both the court number and the minute.

use serde::{Deserialize, Serialize};

use super::CourtTier;

/// A range of courts open during a time interval [start, end).
///
/// Half-open in time, inclusive in court numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtWindow {
    /// Lowest court number covered.
    pub first_court: u32,
    /// Highest court number covered (inclusive).
    pub last_court: u32,
    /// Opening minute (inclusive).
    pub start_min: u32,
    /// Closing minute (exclusive).
    pub end_min: u32,
}

impl CourtWindow {
    /// Creates a new window.
    pub fn new(first_court: u32, last_court: u32, start_min: u32, end_min: u32) -> Self {
        Self {
            first_court,
            last_court,
            start_min,
            end_min,
        }
    }

    /// Whether `court` is open at `minute` under this window.
    #[inline]
    pub fn covers(&self, court: u32, minute: u32) -> bool {
        (self.first_court..=self.last_court).contains(&court)
            && minute >= self.start_min
            && minute < self.end_min
    }

    /// Open minutes of a single court under this window.
    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.end_min.saturating_sub(self.start_min)
    }
}

/// One event day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDay {
    /// Display label (e.g. "Saturday").
    pub label: String,
    /// First minute belonging to this day.
    pub start_min: u32,
    /// Wall clock at `start_min`, in minutes after midnight (540 = 09:00).
    pub clock_start_min: u32,
    /// Court opening windows.
    pub windows: Vec<CourtWindow>,
}

impl EventDay {
    /// Latest closing minute across all windows of this day.
    pub fn end_min(&self) -> u32 {
        self.windows
            .iter()
            .map(|w| w.end_min)
            .max()
            .unwrap_or(self.start_min)
    }
}

/// A named day-part used to group the published schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    /// Output file name for this session.
    pub file: String,
    /// Day label.
    pub date: String,
    pub start_min: u32,
    pub end_min: u32,
    pub start_time: String,
    pub end_time: String,
}

impl Session {
    fn new(name: &str, date: &str, start_min: u32, end_min: u32, start: &str, end: &str) -> Self {
        Self {
            name: name.to_string(),
            file: format!("{}.json", name.replace(' ', "_")),
            date: date.to_string(),
            start_min,
            end_min,
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    /// Whether a start minute falls in this session.
    #[inline]
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start_min && minute < self.end_min
    }
}

/// Ordered court preference for one tier, one list per day.
///
/// Days beyond the last list reuse the last list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtPreference {
    pub tier: CourtTier,
    pub by_day: Vec<Vec<u32>>,
}

/// Physical venue rules for one tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    /// Booking granularity (minutes).
    pub slot_min: u32,
    /// Event days in chronological order.
    pub days: Vec<EventDay>,
    /// Index into `days` from which semifinals and finals may start.
    pub finals_day: usize,
    /// Minimum gap between a player's matches, used by the validator.
    pub min_rest_min: u32,
    /// Court preferences by tier.
    pub preferences: Vec<CourtPreference>,
    /// Output sessions.
    pub sessions: Vec<Session>,
}

impl Default for Venue {
    fn default() -> Self {
        let low = vec![1, 2, 3, 4, 5, 6, 7, 8];
        Self {
            slot_min: 30,
            days: vec![
                EventDay {
                    label: "Saturday".into(),
                    start_min: 0,
                    clock_start_min: 9 * 60,
                    windows: vec![CourtWindow::new(1, 12, 0, 780)],
                },
                EventDay {
                    label: "Sunday".into(),
                    start_min: 1440,
                    clock_start_min: 9 * 60,
                    windows: vec![
                        CourtWindow::new(1, 4, 1440, 1860),
                        CourtWindow::new(5, 8, 1440, 1980),
                    ],
                },
            ],
            finals_day: 1,
            min_rest_min: 30,
            preferences: vec![
                CourtPreference {
                    tier: CourtTier::Elite,
                    by_day: vec![vec![5, 6, 7, 8]],
                },
                CourtPreference {
                    tier: CourtTier::Secondary,
                    by_day: vec![
                        vec![5, 6, 7, 8, 1, 2, 3, 4, 9, 10, 11, 12],
                        vec![5, 6, 7, 8, 1, 2, 3, 4],
                    ],
                },
                CourtPreference {
                    tier: CourtTier::Junior,
                    by_day: vec![vec![9, 10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8], low.clone()],
                },
                CourtPreference {
                    tier: CourtTier::General,
                    by_day: vec![vec![1, 2, 3, 4, 9, 10, 11, 12, 5, 6, 7, 8], low],
                },
            ],
            sessions: vec![
                Session::new("Saturday Morning", "Saturday", 0, 240, "09:00", "13:00"),
                Session::new("Saturday Afternoon", "Saturday", 240, 540, "13:00", "18:00"),
                Session::new("Saturday Evening", "Saturday", 540, 780, "18:00", "22:00"),
                Session::new("Sunday Morning", "Sunday", 1440, 1680, "09:00", "13:00"),
                Session::new("Sunday Afternoon", "Sunday", 1680, 1980, "13:00", "18:00"),
            ],
        }
    }
}

impl Venue {
    /// Index of the day containing `minute` (the last day starting at or before it).
    pub fn day_index(&self, minute: u32) -> usize {
        self.days
            .iter()
            .rposition(|d| d.start_min <= minute)
            .unwrap_or(0)
    }

    /// Whether a court physically operates at a minute.
    pub fn court_open(&self, court: u32, minute: u32) -> bool {
        match self.days.get(self.day_index(minute)) {
            Some(day) => day.windows.iter().any(|w| w.covers(court, minute)),
            None => false,
        }
    }

    /// Earliest minute at which semifinals and finals may start.
    pub fn finals_boundary(&self) -> u32 {
        self.days
            .get(self.finals_day)
            .map(|d| d.start_min)
            .unwrap_or(0)
    }

    /// All slot start minutes in chronological order.
    pub fn slots(&self) -> Vec<u32> {
        let step = self.slot_min.max(1) as usize;
        self.days
            .iter()
            .flat_map(|d| (d.start_min..d.end_min()).step_by(step))
            .collect()
    }

    /// Number of booking cells a match of `duration_min` occupies.
    #[inline]
    pub fn cells_for(&self, duration_min: u32) -> u32 {
        let slot = self.slot_min.max(1);
        duration_min.div_ceil(slot)
    }

    /// Rounds a minute up to the next slot boundary.
    #[inline]
    pub fn snap_up(&self, minute: u32) -> u32 {
        let slot = self.slot_min.max(1);
        minute.div_ceil(slot) * slot
    }

    /// Ordered courts a tier may use at a minute.
    pub fn courts_for(&self, tier: CourtTier, minute: u32) -> &[u32] {
        let day = self.day_index(minute);
        self.preferences
            .iter()
            .find(|p| p.tier == tier)
            .and_then(|p| p.by_day.get(day).or_else(|| p.by_day.last()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Courts reserved for the elite tier (union over all days).
    pub fn elite_courts(&self) -> Vec<u32> {
        let mut courts: Vec<u32> = self
            .preferences
            .iter()
            .filter(|p| p.tier == CourtTier::Elite)
            .flat_map(|p| p.by_day.iter().flatten().copied())
            .collect();
        courts.sort_unstable();
        courts.dedup();
        courts
    }

    /// Every court number mentioned by any window.
    pub fn courts(&self) -> Vec<u32> {
        let mut courts: Vec<u32> = self
            .days
            .iter()
            .flat_map(|d| d.windows.iter())
            .flat_map(|w| w.first_court..=w.last_court)
            .collect();
        courts.sort_unstable();
        courts.dedup();
        courts
    }

    /// Total minutes a court is open across the event.
    pub fn open_minutes(&self, court: u32) -> u32 {
        self.days
            .iter()
            .flat_map(|d| d.windows.iter())
            .filter(|w| (w.first_court..=w.last_court).contains(&court))
            .map(CourtWindow::duration_min)
            .sum()
    }

    /// Converts a minute offset to (day label, "HH:MM").
    pub fn display(&self, minute: u32) -> (String, String) {
        match self.days.get(self.day_index(minute)) {
            Some(day) => {
                let clock = day.clock_start_min + (minute - day.start_min.min(minute));
                (
                    day.label.clone(),
                    format!("{:02}:{:02}", clock / 60, clock % 60),
                )
            }
            None => (String::new(), format!("{:02}:{:02}", minute / 60, minute % 60)),
        }
    }

    /// Human-readable "Day HH:MM".
    pub fn label(&self, minute: u32) -> String {
        let (day, time) = self.display(minute);
        format!("{day} {time}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_court_window() {
        let w = CourtWindow::new(5, 8, 1440, 1980);
        assert!(w.covers(5, 1440));
        assert!(w.covers(8, 1950));
        assert!(!w.covers(8, 1980)); // exclusive end
        assert!(!w.covers(4, 1500));
        assert_eq!(w.duration_min(), 540);
    }

    #[test]
    fn test_default_day_rules() {
        let v = Venue::default();
        // Saturday: courts 1-12 from 09:00 to 22:00
        assert!(v.court_open(1, 0));
        assert!(v.court_open(12, 750));
        assert!(!v.court_open(12, 780));
        assert!(!v.court_open(13, 0));

        // Sunday: courts 1-4 close at 16:00, 5-8 at 18:00, 9-12 closed
        assert!(v.court_open(1, 1440));
        assert!(!v.court_open(1, 1860));
        assert!(v.court_open(5, 1950));
        assert!(!v.court_open(9, 1440));
    }

    #[test]
    fn test_slots_are_chronological() {
        let v = Venue::default();
        let slots = v.slots();
        assert_eq!(slots.first(), Some(&0));
        assert_eq!(slots.last(), Some(&1950));
        // 26 Saturday slots + 18 Sunday slots
        assert_eq!(slots.len(), 26 + 18);
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
        assert!(!slots.contains(&780));
    }

    #[test]
    fn test_snap_and_cells() {
        let v = Venue::default();
        assert_eq!(v.snap_up(0), 0);
        assert_eq!(v.snap_up(31), 60);
        assert_eq!(v.snap_up(60), 60);
        assert_eq!(v.cells_for(30), 1);
        assert_eq!(v.cells_for(45), 2);
    }

    #[test]
    fn test_display() {
        let v = Venue::default();
        assert_eq!(v.display(0), ("Saturday".to_string(), "09:00".to_string()));
        assert_eq!(v.display(270), ("Saturday".to_string(), "13:30".to_string()));
        assert_eq!(v.display(1440), ("Sunday".to_string(), "09:00".to_string()));
        assert_eq!(v.label(1500), "Sunday 10:00");
    }

    #[test]
    fn test_court_preferences() {
        let v = Venue::default();
        assert_eq!(v.courts_for(CourtTier::Elite, 0), &[5, 6, 7, 8]);
        assert_eq!(v.courts_for(CourtTier::Elite, 1500), &[5, 6, 7, 8]);
        assert_eq!(v.courts_for(CourtTier::Junior, 0)[0], 9);
        assert_eq!(v.courts_for(CourtTier::General, 1500).len(), 8);
        assert_eq!(v.elite_courts(), vec![5, 6, 7, 8]);
        assert_eq!(v.finals_boundary(), 1440);
    }

    #[test]
    fn test_open_minutes() {
        let v = Venue::default();
        assert_eq!(v.open_minutes(1), 780 + 420);
        assert_eq!(v.open_minutes(5), 780 + 540);
        assert_eq!(v.open_minutes(10), 780);
        assert_eq!(v.courts().len(), 12);
    }
}
