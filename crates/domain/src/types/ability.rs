//! The six ability scores and their vendor identifiers.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six fixed abilities.
///
/// The numeric id matches the vendor's `stats[].id` numbering (1 = Strength
/// through 6 = Charisma).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in vendor id order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Vendor numeric id (1-6).
    pub fn id(self) -> i64 {
        match self {
            Ability::Strength => 1,
            Ability::Dexterity => 2,
            Ability::Constitution => 3,
            Ability::Intelligence => 4,
            Ability::Wisdom => 5,
            Ability::Charisma => 6,
        }
    }

    /// Look up an ability by vendor numeric id.
    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|ability| ability.id() == id)
    }

    /// Lowercase name used in modifier subtypes and stored records.
    pub fn as_str(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" | "str" => Ok(Ability::Strength),
            "dexterity" | "dex" => Ok(Ability::Dexterity),
            "constitution" | "con" => Ok(Ability::Constitution),
            "intelligence" | "int" => Ok(Ability::Intelligence),
            "wisdom" | "wis" => Ok(Ability::Wisdom),
            "charisma" | "cha" => Ok(Ability::Charisma),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_lookup() {
        for ability in Ability::ALL {
            assert_eq!(Ability::from_id(ability.id()), Some(ability));
        }
        assert_eq!(Ability::from_id(0), None);
        assert_eq!(Ability::from_id(7), None);
    }

    #[test]
    fn parses_names_and_abbreviations() {
        assert_eq!("Wisdom".parse::<Ability>().ok(), Some(Ability::Wisdom));
        assert_eq!("cha".parse::<Ability>().ok(), Some(Ability::Charisma));
        assert!("luck".parse::<Ability>().is_err());
    }
}
