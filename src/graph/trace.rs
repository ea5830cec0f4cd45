//! Dependency tracing over the match graph.
//!
//! The bracket graph is acyclic by construction, but traversal never
//! assumes it: an explicit DFS with an on-path marker turns any back edge
//! into [`Error::CyclicDependency`]. Every traversal is iterative, so cost
//! is linear in graph size regardless of bracket depth.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::models::Match;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Returns match indices ordered so that every prerequisite precedes its
/// dependents. Prerequisite ids missing from `index` are ignored.
pub fn topological_order(matches: &[Match], index: &HashMap<String, usize>) -> Result<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; matches.len()];
    let mut order = Vec::with_capacity(matches.len());
    let mut stack: Vec<(usize, bool)> = Vec::new();

    for root in 0..matches.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        stack.push((root, false));

        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                marks[node] = Mark::Done;
                order.push(node);
                continue;
            }
            match marks[node] {
                Mark::Done => continue,
                Mark::OnPath => return Err(cycle_at(&matches[node])),
                Mark::Unvisited => {}
            }

            marks[node] = Mark::OnPath;
            stack.push((node, true));
            for prereq in &matches[node].prerequisites {
                let Some(&next) = index.get(prereq) else {
                    continue;
                };
                match marks[next] {
                    Mark::OnPath => return Err(cycle_at(&matches[next])),
                    Mark::Unvisited => stack.push((next, false)),
                    Mark::Done => {}
                }
            }
        }
    }

    Ok(order)
}

fn cycle_at(m: &Match) -> Error {
    Error::CyclicDependency {
        match_id: m.id.clone(),
    }
}

/// Fills `known_players` bottom-up along a topological `order`.
///
/// Real-player matches keep exactly their slot names. Any other match gets
/// the sorted union of its concrete names, bye-advanced names and the known
/// players of every prerequisite.
pub fn resolve_known_players(
    matches: &mut [Match],
    index: &HashMap<String, usize>,
    order: &[usize],
) {
    for &i in order {
        let known = if matches[i].has_real_players() {
            matches[i].concrete_players()
        } else {
            let mut set: BTreeSet<String> = matches[i].concrete_players().into_iter().collect();
            set.extend(matches[i].advanced_players());
            for prereq in &matches[i].prerequisites {
                if let Some(&j) = index.get(prereq) {
                    set.extend(matches[j].known_players.iter().cloned());
                }
            }
            set.into_iter().collect()
        };
        matches[i].known_players = known;
    }
}

/// Dependency hops from each match to the nearest real-player match.
///
/// Zero for real-player matches and matches without prerequisites,
/// otherwise one more than the deepest prerequisite.
pub fn round_depths(matches: &[Match], index: &HashMap<String, usize>, order: &[usize]) -> Vec<u32> {
    let mut depths = vec![0; matches.len()];
    for &i in order {
        let m = &matches[i];
        if m.has_real_players() {
            continue;
        }
        depths[i] = m
            .prerequisites
            .iter()
            .filter_map(|p| index.get(p))
            .map(|&j| depths[j] + 1)
            .max()
            .unwrap_or(0);
    }
    depths
}
