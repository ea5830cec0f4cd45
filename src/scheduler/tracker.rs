//! Player availability tracker.

use std::collections::HashMap;

/// Earliest minute each player may next start a match.
///
/// Players never recorded are available from minute 0. Recorded times only
/// ever move forward.
#[derive(Debug, Clone, Default)]
pub struct PlayerTracker {
    available_from: HashMap<String, u32>,
}

impl PlayerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest minute at which one player is free.
    pub fn available_from(&self, player: &str) -> u32 {
        self.available_from.get(player).copied().unwrap_or(0)
    }

    /// Earliest minute at which all of `players` are free (0 if empty).
    pub fn earliest_for<S: AsRef<str>>(&self, players: &[S]) -> u32 {
        players
            .iter()
            .map(|p| self.available_from(p.as_ref()))
            .max()
            .unwrap_or(0)
    }

    /// Whether all of `players` are free at `minute`.
    pub fn all_free_at<S: AsRef<str>>(&self, players: &[S], minute: u32) -> bool {
        self.earliest_for(players) <= minute
    }

    /// Records a played match: each player is next free at
    /// `start + duration + rest`, unless already later.
    pub fn update<S: AsRef<str>>(&mut self, players: &[S], start_min: u32, duration_min: u32, rest_min: u32) {
        let next = start_min + duration_min + rest_min;
        for p in players {
            let entry = self.available_from.entry(p.as_ref().to_string()).or_insert(0);
            *entry = (*entry).max(next);
        }
    }

    /// Number of players recorded so far.
    pub fn len(&self) -> usize {
        self.available_from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available_from.is_empty()
    }
}
