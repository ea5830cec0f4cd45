//! Division tiers.
//!
//! A tier decides which courts a division may use, and how long its
//! matches and rest periods are.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Court allocation tier of a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtTier {
    /// Top-tier divisions, reserved to a fixed court range.
    Elite,
    /// Second tier, prefers the elite courts but may spill over.
    Secondary,
    /// Junior categories.
    Junior,
    /// Everything else.
    General,
}

/// Match length and mandatory rest afterwards (minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTiming {
    pub duration_min: u32,
    pub rest_min: u32,
}

/// Classification rules mapping divisions to tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierRules {
    /// Division codes of the elite tier.
    pub elite_divisions: BTreeSet<String>,
    /// Division codes of the secondary tier.
    pub secondary_divisions: BTreeSet<String>,
    /// Categories scheduled on junior courts.
    pub junior_categories: BTreeSet<String>,
    pub elite_timing: MatchTiming,
    pub standard_timing: MatchTiming,
}

impl Default for TierRules {
    fn default() -> Self {
        let set = |items: &[&str]| -> BTreeSet<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            elite_divisions: set(&["MS V", "WS V", "XD V"]),
            secondary_divisions: set(&["MS A", "MD A", "WD A", "XD A"]),
            junior_categories: set(&["Junior"]),
            elite_timing: MatchTiming {
                duration_min: 45,
                rest_min: 60,
            },
            standard_timing: MatchTiming {
                duration_min: 30,
                rest_min: 30,
            },
        }
    }
}

impl TierRules {
    /// Tier of a division. Elite and secondary are matched by code,
    /// junior by category.
    pub fn tier_of(&self, division_code: &str, category: &str) -> CourtTier {
        if self.elite_divisions.contains(division_code) {
            CourtTier::Elite
        } else if self.secondary_divisions.contains(division_code) {
            CourtTier::Secondary
        } else if self.junior_categories.contains(category) {
            CourtTier::Junior
        } else {
            CourtTier::General
        }
    }

    /// Timing for a tier.
    pub fn timing(&self, tier: CourtTier) -> MatchTiming {
        match tier {
            CourtTier::Elite => self.elite_timing,
            _ => self.standard_timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_classification() {
        let rules = TierRules::default();
        assert_eq!(rules.tier_of("MS V", "Open"), CourtTier::Elite);
        assert_eq!(rules.tier_of("MD A", "Open"), CourtTier::Secondary);
        assert_eq!(rules.tier_of("BS U15", "Junior"), CourtTier::Junior);
        assert_eq!(rules.tier_of("MS C", "Open"), CourtTier::General);
    }

    #[test]
    fn test_timing() {
        let rules = TierRules::default();
        assert_eq!(rules.timing(CourtTier::Elite).duration_min, 45);
        assert_eq!(rules.timing(CourtTier::Elite).rest_min, 60);
        assert_eq!(rules.timing(CourtTier::Junior).duration_min, 30);
    }

    #[test]
    fn test_deserialize_partial() {
        let rules: TierRules =
            serde_json::from_str(r#"{"elite_divisions": ["MS X"]}"#).unwrap();
        assert_eq!(rules.tier_of("MS X", "Open"), CourtTier::Elite);
        assert_eq!(rules.tier_of("MS V", "Open"), CourtTier::General);
        assert_eq!(rules.standard_timing.duration_min, 30);
    }
}
