//! Key schema for character sheets
//!
//! The fixed tables every patch is checked against:
//! - the five attributes
//! - the sixteen skills
//! - the five keys an advance record must carry
//!
//! Changing the game system's sheet layout means changing this module only.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Experience points needed per advance. Ledger slot `i` unlocks at `(i + 1) * XP_PER_ADVANCE`.
pub const XP_PER_ADVANCE: i64 = 5;

/// Maximum number of ledger slots a character can hold.
///
/// Caps the slot index derived from a caller-supplied `xp`, so a single patch
/// cannot grow the ledger without bound.
pub const ADVANCE_SLOT_LIMIT: usize = 100;

/// Keys an advance record must carry, no more and no fewer.
pub const ADVANCE_KEYS: [&str; 5] = ["xp", "advType", "val", "val2", "edgeId"];

/// Core attribute of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKey {
    Strength,
    Vigor,
    Agility,
    Smarts,
    Spirit,
}

impl AttributeKey {
    /// All attributes in sheet order
    pub fn all() -> &'static [AttributeKey] {
        &[
            AttributeKey::Strength,
            AttributeKey::Vigor,
            AttributeKey::Agility,
            AttributeKey::Smarts,
            AttributeKey::Spirit,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Strength => "strength",
            AttributeKey::Vigor => "vigor",
            AttributeKey::Agility => "agility",
            AttributeKey::Smarts => "smarts",
            AttributeKey::Spirit => "spirit",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown attribute: {}", s)))
    }
}

/// Skill on a character sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKey {
    Athletics,
    Fighting,
    Healing,
    Intimidation,
    Investigation,
    Notice,
    Persuasion,
    Repair,
    Riding,
    Shooting,
    Stealth,
    Streetwise,
    Survival,
    Taunt,
    Throwing,
    Tracking,
}

impl SkillKey {
    /// All skills in sheet order
    pub fn all() -> &'static [SkillKey] {
        &[
            SkillKey::Athletics,
            SkillKey::Fighting,
            SkillKey::Healing,
            SkillKey::Intimidation,
            SkillKey::Investigation,
            SkillKey::Notice,
            SkillKey::Persuasion,
            SkillKey::Repair,
            SkillKey::Riding,
            SkillKey::Shooting,
            SkillKey::Stealth,
            SkillKey::Streetwise,
            SkillKey::Survival,
            SkillKey::Taunt,
            SkillKey::Throwing,
            SkillKey::Tracking,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKey::Athletics => "athletics",
            SkillKey::Fighting => "fighting",
            SkillKey::Healing => "healing",
            SkillKey::Intimidation => "intimidation",
            SkillKey::Investigation => "investigation",
            SkillKey::Notice => "notice",
            SkillKey::Persuasion => "persuasion",
            SkillKey::Repair => "repair",
            SkillKey::Riding => "riding",
            SkillKey::Shooting => "shooting",
            SkillKey::Stealth => "stealth",
            SkillKey::Streetwise => "streetwise",
            SkillKey::Survival => "survival",
            SkillKey::Taunt => "taunt",
            SkillKey::Throwing => "throwing",
            SkillKey::Tracking => "tracking",
        }
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_expected_sizes() {
        assert_eq!(AttributeKey::all().len(), 5);
        assert_eq!(SkillKey::all().len(), 16);
        assert_eq!(ADVANCE_KEYS.len(), 5);
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for key in AttributeKey::all() {
            assert_eq!(key.as_str().parse::<AttributeKey>().unwrap(), *key);
        }
        for key in SkillKey::all() {
            assert_eq!(key.as_str().parse::<SkillKey>().unwrap(), *key);
        }
    }

    #[test]
    fn serde_names_match_as_str() {
        let json = serde_json::to_value(SkillKey::Streetwise).unwrap();
        assert_eq!(json, serde_json::json!("streetwise"));
        let key: AttributeKey = serde_json::from_value(serde_json::json!("smarts")).unwrap();
        assert_eq!(key, AttributeKey::Smarts);
    }

    #[test]
    fn unknown_keys_do_not_parse() {
        assert!("charisma".parse::<AttributeKey>().is_err());
        assert!("Fighting".parse::<SkillKey>().is_err());
    }
}
