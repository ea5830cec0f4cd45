//! Court timeline: bookable (court, slot) cells.
//!
//! A cell is bookable iff the venue operates the court at that minute and
//! no match holds it yet. Matches longer than one slot occupy consecutive
//! cells (a 45-minute match blocks two 30-minute cells).

use std::collections::{BTreeMap, HashMap};

use crate::models::Venue;

/// Bookings for one scheduling run.
#[derive(Debug, Clone)]
pub struct CourtTimeline<'a> {
    venue: &'a Venue,
    /// (court, slot start) → match id
    booked: HashMap<(u32, u32), String>,
}

impl<'a> CourtTimeline<'a> {
    pub fn new(venue: &'a Venue) -> Self {
        Self {
            venue,
            booked: HashMap::new(),
        }
    }

    pub fn venue(&self) -> &Venue {
        self.venue
    }

    /// Whether the court operates at `minute` and the cell is free.
    pub fn is_available(&self, court: u32, minute: u32) -> bool {
        self.venue.court_open(court, minute) && !self.booked.contains_key(&(court, minute))
    }

    /// Whether every cell a match of `duration_min` would occupy is available.
    pub fn can_book(&self, court: u32, minute: u32, duration_min: u32) -> bool {
        self.cells(minute, duration_min)
            .all(|t| self.is_available(court, t))
    }

    /// Marks every cell the match occupies.
    ///
    /// # Panics
    /// If any of those cells is already booked. Callers must check
    /// [`can_book`](Self::can_book) first.
    pub fn book(&mut self, court: u32, minute: u32, match_id: &str, duration_min: u32) {
        for t in self.cells(minute, duration_min).collect::<Vec<_>>() {
            let previous = self.booked.insert((court, t), match_id.to_string());
            assert!(
                previous.is_none(),
                "court {court} at minute {t} double-booked: {} and {match_id}",
                previous.unwrap_or_default()
            );
        }
    }

    /// Match holding a cell, if any.
    pub fn booking(&self, court: u32, minute: u32) -> Option<&str> {
        self.booked.get(&(court, minute)).map(String::as_str)
    }

    /// Number of booked cells.
    pub fn booked_cells(&self) -> usize {
        self.booked.len()
    }

    /// Booked minutes per court.
    pub fn booked_minutes(&self) -> BTreeMap<u32, u32> {
        let mut out = BTreeMap::new();
        for &(court, _) in self.booked.keys() {
            *out.entry(court).or_insert(0) += self.venue.slot_min;
        }
        out
    }

    fn cells(&self, minute: u32, duration_min: u32) -> impl Iterator<Item = u32> {
        let step = self.venue.slot_min.max(1);
        (0..self.venue.cells_for(duration_min)).map(move |i| minute + i * step)
    }
}
