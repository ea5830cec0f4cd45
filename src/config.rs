//! Run configuration.
//!
//! One [`ScheduleConfig`] is constructed per run and passed by reference to
//! every component that needs it. Every field has a default, so an empty
//! JSON object is a valid configuration file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{TierRules, Venue};

/// Key of the fallback win probability.
pub const DEFAULT_KEY: &str = "default";
/// Key of the win probability between two seeded entrants.
pub const SEED_VS_SEED_KEY: &str = "seed_vs_seed";

/// Scenario key → win probability of the favourite.
///
/// Keys are `"{seed}_vs_unseeded"` (e.g. `"3/4_vs_unseeded"`),
/// [`SEED_VS_SEED_KEY`] and [`DEFAULT_KEY`]. Deserialized tables are merged
/// over the defaults, so a file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeedingTable(BTreeMap<String, f64>);

impl Default for SeedingTable {
    fn default() -> Self {
        Self(
            [
                ("1_vs_unseeded", 0.75),
                ("2_vs_unseeded", 0.70),
                ("3/4_vs_unseeded", 0.65),
                (SEED_VS_SEED_KEY, 0.55),
                (DEFAULT_KEY, 0.50),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for SeedingTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let overrides = BTreeMap::<String, f64>::deserialize(deserializer)?;
        let mut table = Self::default();
        table.0.extend(overrides);
        Ok(table)
    }
}

impl SeedingTable {
    /// Looks up a scenario key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Fallback probability when no scenario applies.
    pub fn default_probability(&self) -> f64 {
        self.get(DEFAULT_KEY).unwrap_or(0.5)
    }

    /// Sets a scenario key.
    pub fn with(mut self, key: impl Into<String>, probability: f64) -> Self {
        self.0.insert(key.into(), probability);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Per-division settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DivisionOverride {
    /// Probability threshold overriding `default_threshold`.
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Scheduling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Minimum reach probability for a player to be reserved (0 = keep all).
    pub default_threshold: f64,
    /// Use seed-based win probabilities instead of flat halving.
    pub use_seeding: bool,
    pub seeding_probabilities: SeedingTable,
    /// Division code → overrides.
    pub divisions: BTreeMap<String, DivisionOverride>,
    pub tiers: TierRules,
    pub venue: Venue,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_threshold: 0.0,
            use_seeding: false,
            seeding_probabilities: SeedingTable::default(),
            divisions: BTreeMap::new(),
            tiers: TierRules::default(),
            venue: Venue::default(),
        }
    }
}

impl ScheduleConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| Error::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects thresholds and probabilities outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        check_threshold("default", self.default_threshold)?;
        for (code, over) in &self.divisions {
            if let Some(t) = over.threshold {
                check_threshold(code, t)?;
            }
        }
        for (key, p) in self.seeding_probabilities.iter() {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidProbability {
                    key: key.to_string(),
                    value: p,
                });
            }
        }
        Ok(())
    }

    /// Effective threshold for a division (override first, then default).
    pub fn threshold_for(&self, division_code: &str) -> f64 {
        self.divisions
            .get(division_code)
            .and_then(|d| d.threshold)
            .unwrap_or(self.default_threshold)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.default_threshold = threshold;
        self
    }

    pub fn with_division_threshold(mut self, code: impl Into<String>, threshold: f64) -> Self {
        self.divisions.insert(
            code.into(),
            DivisionOverride {
                threshold: Some(threshold),
            },
        );
        self
    }

    pub fn with_seeding(mut self, table: SeedingTable) -> Self {
        self.use_seeding = true;
        self.seeding_probabilities = table;
        self
    }

    pub fn with_venue(mut self, venue: Venue) -> Self {
        self.venue = venue;
        self
    }
}

fn check_threshold(scope: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidThreshold {
            scope: scope.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = ScheduleConfig::default();
        assert_eq!(c.default_threshold, 0.0);
        assert!(!c.use_seeding);
        assert_eq!(c.seeding_probabilities.get("1_vs_unseeded"), Some(0.75));
        assert_eq!(c.seeding_probabilities.default_probability(), 0.5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_merges_defaults() {
        let c: ScheduleConfig = serde_json::from_str(
            r#"{
                "default_threshold": 0.3,
                "use_seeding": true,
                "seeding_probabilities": {"1_vs_unseeded": 0.9},
                "divisions": {"MS C": {"threshold": 0.6}, "WS C": {}}
            }"#,
        )
        .unwrap();

        assert_eq!(c.seeding_probabilities.get("1_vs_unseeded"), Some(0.9));
        assert_eq!(c.seeding_probabilities.get("2_vs_unseeded"), Some(0.70));
        assert_eq!(c.threshold_for("MS C"), 0.6);
        assert_eq!(c.threshold_for("WS C"), 0.3);
        assert_eq!(c.threshold_for("XD C"), 0.3);
        assert_eq!(c.venue, Venue::default());
    }

    #[test]
    fn test_invalid_threshold() {
        let c = ScheduleConfig::default().with_division_threshold("MS C", 1.5);
        assert!(matches!(
            c.validate(),
            Err(Error::InvalidThreshold { ref scope, .. }) if scope == "MS C"
        ));
    }

    #[test]
    fn test_invalid_probability() {
        let c = ScheduleConfig::default()
            .with_seeding(SeedingTable::default().with("seed_vs_seed", -0.1));
        assert!(matches!(c.validate(), Err(Error::InvalidProbability { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_threshold": 0.25}}"#).unwrap();
        let c = ScheduleConfig::load(file.path()).unwrap();
        assert_eq!(c.default_threshold, 0.25);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ScheduleConfig::load(file.path()),
            Err(Error::Json { .. })
        ));
    }
}
