//! Player-slot string parsing.
//!
//! # Grammar
//! - empty, or starting with `Bye` → [`Slot::Empty`]
//! - `Winner <ABBR>-M<n>` → [`Slot::Winner`]
//! - `Slot <label>` → [`Slot::Position`]
//! - otherwise one name, or two names joined by `" / "` (doubles)
//!
//! A bare `Slot` with no label parses as a player name.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Slot;

static WINNER_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Winner\s+(\w+)-M(\d+)$").expect("valid regex"));

const WINNER_PREFIX: &str = "Winner ";
const POSITION_PREFIX: &str = "Slot ";
const PAIR_SEPARATOR: &str = " / ";

/// Round name for a bracket abbreviation. Unknown abbreviations are
/// returned verbatim.
pub fn round_for_abbrev(abbrev: &str) -> &str {
    match abbrev {
        "R1" => "Round 1",
        "R2" => "Round 2",
        "QF" => "Quarter-Final",
        "SF" => "Semi-Final",
        "F" => "Final",
        other => other,
    }
}

/// Whether a slot string marks a bye.
pub fn is_bye(label: &str) -> bool {
    let label = label.trim();
    label.is_empty() || label.starts_with("Bye")
}

/// Parses a slot string. Returns `None` when the string is malformed.
pub fn parse_slot(label: &str) -> Option<Slot> {
    let label = label.trim();
    if is_bye(label) {
        return Some(Slot::Empty);
    }

    if label.starts_with(WINNER_PREFIX) {
        let caps = WINNER_REF.captures(label)?;
        let round = round_for_abbrev(&caps[1]).to_string();
        let match_num = caps[2].parse().ok()?;
        return Some(Slot::Winner { round, match_num });
    }

    if let Some(rest) = label.strip_prefix(POSITION_PREFIX) {
        let rest = rest.trim();
        return (!rest.is_empty()).then(|| Slot::Position(rest.to_string()));
    }

    let names: Vec<String> = label.split(PAIR_SEPARATOR).map(|n| n.trim().to_string()).collect();
    if names.len() > 2 || names.iter().any(|n| n.is_empty()) {
        return None;
    }
    Some(Slot::Players(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byes() {
        assert_eq!(parse_slot(""), Some(Slot::Empty));
        assert_eq!(parse_slot("Bye"), Some(Slot::Empty));
        assert_eq!(parse_slot("Bye 3"), Some(Slot::Empty));
        assert!(is_bye("  "));
        assert!(!is_bye("Anna"));
    }

    #[test]
    fn test_singles_and_doubles() {
        assert_eq!(parse_slot("Anna"), Some(Slot::Players(vec!["Anna".into()])));
        assert_eq!(
            parse_slot("Anna / Bea"),
            Some(Slot::Players(vec!["Anna".into(), "Bea".into()]))
        );
        // Only the spaced separator splits a pair
        assert_eq!(parse_slot("AC/DC"), Some(Slot::Players(vec!["AC/DC".into()])));
    }

    #[test]
    fn test_winner_reference() {
        assert_eq!(
            parse_slot("Winner R1-M3"),
            Some(Slot::Winner {
                round: "Round 1".into(),
                match_num: 3
            })
        );
        assert_eq!(
            parse_slot("Winner SF-M2"),
            Some(Slot::Winner {
                round: "Semi-Final".into(),
                match_num: 2
            })
        );
        // Unknown abbreviations are kept verbatim
        assert_eq!(
            parse_slot("Winner R3-M1"),
            Some(Slot::Winner {
                round: "R3".into(),
                match_num: 1
            })
        );
    }

    #[test]
    fn test_position() {
        assert_eq!(parse_slot("Slot 4"), Some(Slot::Position("4".into())));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse_slot("Winner of something"), None);
        assert_eq!(parse_slot("Winner R1-Mx"), None);
        assert_eq!(parse_slot("A /  / B"), None);
        assert_eq!(parse_slot("A / B / C"), None);
    }
}
