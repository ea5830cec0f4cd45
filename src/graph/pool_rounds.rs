//! Pool round assignment for round-robin matches.
//!
//! # Algorithm
//! Greedy first-fit coloring of the pool's conflict graph (vertices =
//! matches, edges = pairs of matches sharing a player). Matches are taken
//! in listed order; each gets the lowest round index not already used by a
//! conflicting match. The coloring is valid but not necessarily minimal.
//!
//! # Complexity
//! O(n²) for n matches in the pool.

use std::collections::HashSet;

use crate::models::Match;

/// Assigns `pool_round` to every match of one pool.
pub fn assign_pool_rounds(pool: &mut [Match]) {
    let participants: Vec<HashSet<String>> = pool
        .iter()
        .map(|m| m.concrete_players().into_iter().collect())
        .collect();

    let mut rounds: Vec<u32> = Vec::with_capacity(pool.len());
    for (i, players) in participants.iter().enumerate() {
        let mut round = 0;
        while (0..i).any(|j| rounds[j] == round && !participants[j].is_disjoint(players)) {
            round += 1;
        }
        rounds.push(round);
    }

    for (m, round) in pool.iter_mut().zip(rounds) {
        m.pool_round = round;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerSlot, Slot};

    fn pool_match(n: u32, a: &str, b: &str) -> Match {
        let side = |s: &str| {
            PlayerSlot::new(
                s,
                Slot::Players(s.split(" / ").map(str::to_string).collect()),
            )
        };
        Match::new("XD C", "Pool", n, side(a), side(b))
    }

    fn all_pairs(entrants: &[&str]) -> Vec<Match> {
        let mut out = Vec::new();
        let mut n = 1;
        for i in 0..entrants.len() {
            for j in (i + 1)..entrants.len() {
                out.push(pool_match(n, entrants[i], entrants[j]));
                n += 1;
            }
        }
        out
    }

    #[test]
    fn test_four_entrants() {
        let mut pool = all_pairs(&["A", "B", "C", "D"]);
        assign_pool_rounds(&mut pool);
        // Listed order: AB, AC, AD, BC, BD, CD
        let rounds: Vec<u32> = pool.iter().map(|m| m.pool_round).collect();
        assert_eq!(rounds, vec![0, 1, 2, 2, 1, 0]);
    }

    #[test]
    fn test_doubles_share_partner() {
        let mut pool = vec![
            pool_match(1, "A / B", "C / D"),
            pool_match(2, "A / E", "F / G"),
            pool_match(3, "H / I", "J / K"),
        ];
        assign_pool_rounds(&mut pool);
        assert_eq!(pool[0].pool_round, 0);
        assert_eq!(pool[1].pool_round, 1); // shares A
        assert_eq!(pool[2].pool_round, 0);
    }

    #[test]
    fn test_empty_pool() {
        let mut pool: Vec<Match> = Vec::new();
        assign_pool_rounds(&mut pool);
        assert!(pool.is_empty());
    }
}
