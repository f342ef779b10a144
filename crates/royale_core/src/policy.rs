//! Fixed policy inputs for the planners.
//!
//! A policy is the desired building mix, the desired unit mix, and the
//! thresholds that make the queen fall back to defence. Policies are plain
//! data and can be loaded from RON:
//!
//! ```text
//! Policy(
//!     name: "Knight rush",
//!     building_mix: { Mine: 4, Tower: 1, KnightBarracks: 1 },
//!     unit_mix: { Knight: 15 },
//!     defense: (threat_radius: 400, min_owned_sites: 5),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{StructureKind, UnitKind};
use crate::math::Fixed;
use crate::tally::Tally;

/// Error type for policy loading.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// File not found.
    #[error("Policy file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read policy file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse policy: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

/// Complete planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy name, for logs.
    pub name: String,
    /// Desired ratio of structures.
    pub building_mix: Tally<StructureKind>,
    /// Desired ratio of units.
    pub unit_mix: Tally<UnitKind>,
    /// When the queen stops expanding and seeks cover.
    #[serde(default)]
    pub defense: DefenseRules,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            name: "Knight pressure".to_string(),
            building_mix: [
                (StructureKind::Mine, 4),
                (StructureKind::Tower, 1),
                (StructureKind::KnightBarracks, 1),
            ]
            .into_iter()
            .collect(),
            unit_mix: [(UnitKind::Knight, 15)].into_iter().collect(),
            defense: DefenseRules::default(),
        }
    }
}

impl Policy {
    /// Load a policy from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PolicyError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self, PolicyError> {
        let policy: Policy = ron::from_str(ron)?;
        Ok(policy)
    }
}

/// Defence trigger thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseRules {
    /// An enemy knight closer than this to the queen is a threat.
    pub threat_radius: u32,
    /// Defence only kicks in once this many sites are owned.
    pub min_owned_sites: usize,
}

impl DefenseRules {
    /// Threat radius in map units.
    #[must_use]
    pub fn threat_radius(&self) -> Fixed {
        Fixed::from_num(self.threat_radius)
    }
}

impl Default for DefenseRules {
    fn default() -> Self {
        Self {
            threat_radius: 400,
            min_owned_sites: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_source_mix() {
        let policy = Policy::default();
        assert_eq!(policy.building_mix.as_slice(), &[4, 1, 1, 0, 0]);
        assert_eq!(policy.unit_mix.as_slice(), &[15, 0, 0]);
        assert_eq!(policy.defense.threat_radius, 400);
        assert_eq!(policy.defense.min_owned_sites, 5);
    }

    #[test]
    fn test_parse_ron_policy() {
        let ron = r#"
            Policy(
                name: "Archer wall",
                building_mix: { Mine: 3, ArcherBarracks: 2 },
                unit_mix: { Archer: 6, Giant: 1 },
                defense: (threat_radius: 250, min_owned_sites: 3),
            )
        "#;
        let policy = Policy::from_ron_str(ron).unwrap();
        assert_eq!(policy.name, "Archer wall");
        assert_eq!(policy.building_mix.as_slice(), &[3, 0, 0, 2, 0]);
        assert_eq!(policy.unit_mix.as_slice(), &[0, 6, 1]);
        assert_eq!(policy.defense.threat_radius, 250);
    }

    #[test]
    fn test_defense_defaults_when_omitted() {
        let ron = r#"Policy(name: "Eco", building_mix: { Mine: 1 }, unit_mix: {})"#;
        let policy = Policy::from_ron_str(ron).unwrap();
        assert_eq!(policy.defense, DefenseRules::default());
        assert_eq!(policy.unit_mix.total(), 0);
    }

    #[test]
    fn test_pretty_ron_reloads() {
        let policy = Policy::default();
        let text = ron::ser::to_string_pretty(&policy, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(Policy::from_ron_str(&text).unwrap(), policy);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let ron = r#"Policy(name: "Bad", building_mix: { Castle: 1 }, unit_mix: {})"#;
        assert!(matches!(
            Policy::from_ron_str(ron),
            Err(PolicyError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Policy::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, PolicyError::FileNotFound(_)));
    }
}
