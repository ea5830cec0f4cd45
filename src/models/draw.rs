//! Draw definitions: the normalized per-division records supplied by the
//! upstream extraction step.
//!
//! The JSON shape mirrors the division files written by that step:
//! a division declares a `format` and carries either `rounds`
//! (elimination), `matches` (round robin) or `groups` + `playoff`
//! (group then playoff).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Draw structure of a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawFormat {
    Elimination,
    RoundRobin,
    GroupPlayoff,
}

impl DrawFormat {
    /// Parses the wire name (`elimination`, `round_robin`, `group_playoff`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "elimination" => Some(Self::Elimination),
            "round_robin" => Some(Self::RoundRobin),
            "group_playoff" => Some(Self::GroupPlayoff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elimination => "elimination",
            Self::RoundRobin => "round_robin",
            Self::GroupPlayoff => "group_playoff",
        }
    }
}

impl fmt::Display for DrawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One division's draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    /// Short code, e.g. "MS C".
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category, e.g. "Open", "Junior".
    #[serde(default)]
    pub category: String,
    /// Wire name of the draw format. Parsed by the graph builder.
    pub format: String,
    /// Entrants (with seeds).
    #[serde(default)]
    pub players: Vec<Entrant>,
    /// Elimination rounds.
    #[serde(default)]
    pub rounds: Vec<DrawRound>,
    /// Round-robin pairings.
    #[serde(default)]
    pub matches: Vec<MatchRow>,
    /// Group stage of a group + playoff draw.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Playoff bracket of a group + playoff draw.
    #[serde(default)]
    pub playoff: Option<Playoff>,
}

/// A singles player or a doubles pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entrant {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub seed: Option<String>,
    /// Doubles partners.
    #[serde(default)]
    pub players: Vec<Partner>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    #[serde(default)]
    pub seed: Option<String>,
}

/// One round of a bracket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRound {
    pub name: String,
    #[serde(default)]
    pub matches: Vec<MatchRow>,
}

/// One match row as supplied upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    #[serde(rename = "match")]
    pub number: u32,
    #[serde(default)]
    pub player1: String,
    #[serde(default)]
    pub player2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MatchRow {
    pub fn new(number: u32, player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            number,
            player1: player1.into(),
            player2: player2.into(),
            notes: None,
        }
    }
}

/// A round-robin group of a group + playoff draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub players: Vec<Entrant>,
    #[serde(default)]
    pub matches: Vec<MatchRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playoff {
    #[serde(default)]
    pub rounds: Vec<DrawRound>,
}

impl Division {
    /// Creates an empty division of the given format.
    pub fn new(code: impl Into<String>, format: DrawFormat) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            category: String::new(),
            format: format.as_str().to_string(),
            players: Vec::new(),
            rounds: Vec::new(),
            matches: Vec::new(),
            groups: Vec::new(),
            playoff: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Adds an entrant with an optional seed label.
    pub fn with_entrant(mut self, name: impl Into<String>, seed: Option<&str>) -> Self {
        self.players.push(Entrant {
            name: Some(name.into()),
            seed: seed.map(str::to_string),
            players: Vec::new(),
        });
        self
    }

    /// Adds an elimination round from `(number, player1, player2)` rows.
    pub fn with_round(mut self, name: impl Into<String>, rows: &[(u32, &str, &str)]) -> Self {
        self.rounds.push(DrawRound {
            name: name.into(),
            matches: rows.iter().map(|&(n, a, b)| MatchRow::new(n, a, b)).collect(),
        });
        self
    }

    /// Adds round-robin rows.
    pub fn with_pool(mut self, rows: &[(u32, &str, &str)]) -> Self {
        self.matches
            .extend(rows.iter().map(|&(n, a, b)| MatchRow::new(n, a, b)));
        self
    }

    /// Adds a group of a group + playoff draw.
    pub fn with_group(mut self, name: impl Into<String>, rows: &[(u32, &str, &str)]) -> Self {
        self.groups.push(Group {
            name: name.into(),
            players: Vec::new(),
            matches: rows.iter().map(|&(n, a, b)| MatchRow::new(n, a, b)).collect(),
        });
        self
    }

    /// Adds a playoff round.
    pub fn with_playoff_round(
        mut self,
        name: impl Into<String>,
        rows: &[(u32, &str, &str)],
    ) -> Self {
        self.playoff
            .get_or_insert_with(Playoff::default)
            .rounds
            .push(DrawRound {
                name: name.into(),
                matches: rows.iter().map(|&(n, a, b)| MatchRow::new(n, a, b)).collect(),
            });
        self
    }

    /// Player → seed label pairs declared by this division.
    ///
    /// Doubles partners without their own seed inherit the pair seed.
    pub fn seeds(&self) -> Vec<(String, String)> {
        let entrants = self
            .players
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.players.iter()));

        let mut seeds = Vec::new();
        for entrant in entrants {
            if let (Some(name), Some(seed)) = (&entrant.name, &entrant.seed) {
                seeds.push((name.clone(), seed.clone()));
            }
            for partner in &entrant.players {
                if let Some(seed) = partner.seed.as_ref().or(entrant.seed.as_ref()) {
                    seeds.push((partner.name.clone(), seed.clone()));
                }
            }
        }
        seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(DrawFormat::parse("elimination"), Some(DrawFormat::Elimination));
        assert_eq!(DrawFormat::parse("round_robin"), Some(DrawFormat::RoundRobin));
        assert_eq!(DrawFormat::parse("group_playoff"), Some(DrawFormat::GroupPlayoff));
        assert_eq!(DrawFormat::parse("swiss"), None);
    }

    #[test]
    fn test_division_from_json() {
        let json = r#"{
            "code": "MD C",
            "name": "Men's Doubles C",
            "category": "Open",
            "format": "elimination",
            "players": [
                {"seed": "1", "players": [{"name": "A1"}, {"name": "A2", "seed": "2"}]},
                {"name": "Solo", "seed": "3/4"}
            ],
            "rounds": [
                {"name": "Round 1", "matches": [
                    {"match": 1, "player1": "A1 / A2", "player2": "Bye", "notes": "A1 / A2 auto-advances"}
                ]}
            ]
        }"#;
        let div: Division = serde_json::from_str(json).unwrap();
        assert_eq!(div.code, "MD C");
        assert_eq!(div.rounds[0].matches[0].number, 1);
        assert_eq!(div.rounds[0].matches[0].player2, "Bye");

        let seeds = div.seeds();
        assert!(seeds.contains(&("A1".to_string(), "1".to_string())));
        assert!(seeds.contains(&("A2".to_string(), "2".to_string())));
        assert!(seeds.contains(&("Solo".to_string(), "3/4".to_string())));
    }

    #[test]
    fn test_division_builder() {
        let div = Division::new("XD B", DrawFormat::GroupPlayoff)
            .with_category("Open")
            .with_group("Group A", &[(1, "A", "B")])
            .with_playoff_round("Final", &[(1, "Slot 1", "Slot 2")]);

        assert_eq!(div.format, "group_playoff");
        assert_eq!(div.groups.len(), 1);
        assert_eq!(div.playoff.as_ref().map(|p| p.rounds.len()), Some(1));
    }
}
