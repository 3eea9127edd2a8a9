//! DerivedStatBlock - the normalized output document
//!
//! Six named sections, serialized with the record field names the
//! persistence layer stores. `stats`, `ac` and `hit_points` are single
//! records but are emitted as one-element lists, matching the record-set
//! shape the create/update endpoints accept.

use serde::{Serialize, Serializer};

use crate::types::{Ability, Skill};

/// Display string used whenever a payload string is absent.
pub const UNKNOWN: &str = "Unknown";

/// Condition display string for a character with no conditions.
pub const NO_CONDITIONS: &str = "None";

/// Character-level record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterStats {
    #[serde(rename = "character_is_inspired")]
    pub is_inspired: bool,
    #[serde(rename = "character_name")]
    pub name: String,
    /// Class names joined with ", "
    #[serde(rename = "character_class")]
    pub class: String,
    #[serde(rename = "character_race")]
    pub race: String,
    #[serde(rename = "character_background")]
    pub background: String,
    /// Subclass names joined with ", "
    #[serde(rename = "character_subclass")]
    pub subclass: String,
    /// Sum of all class levels
    #[serde(rename = "character_level")]
    pub level: u32,
    #[serde(rename = "character_alignment")]
    pub alignment: String,
    #[serde(rename = "character_conditions")]
    pub conditions: String,
    #[serde(rename = "character_update_link")]
    pub update_link: String,
    #[serde(rename = "character_proficiency_bonus")]
    pub proficiency_bonus: i64,
    #[serde(rename = "character_speed")]
    pub speed: i64,
    #[serde(rename = "character_gender")]
    pub gender: String,
    #[serde(rename = "character_death_save_success")]
    pub death_save_successes: i64,
    #[serde(rename = "character_death_save_failure")]
    pub death_save_failures: i64,
    #[serde(rename = "character_exhaustion")]
    pub exhaustion: i64,
    /// Manual override, never derived
    #[serde(rename = "character_initiative_adjustment")]
    pub initiative_adjustment: i64,
    /// Manual override, never derived
    #[serde(rename = "character_proficiency_bonus_adjustment")]
    pub proficiency_bonus_adjustment: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeEntry {
    #[serde(rename = "attribute_name")]
    pub ability: Ability,
    /// Base score plus aggregated modifiers
    #[serde(rename = "attribute_value")]
    pub value: i64,
    /// floor((value - 10) / 2)
    #[serde(rename = "attribute_adjustment")]
    pub modifier: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    #[serde(rename = "skill_name")]
    pub skill: Skill,
    #[serde(rename = "skill_adjustment")]
    pub value: i64,
    #[serde(rename = "skill_is_proficient")]
    pub is_proficient: bool,
    #[serde(rename = "skill_is_expertise")]
    pub is_expertise: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavingThrowEntry {
    #[serde(rename = "saving_throw_name")]
    pub ability: Ability,
    #[serde(rename = "saving_throw_adjustment")]
    pub value: i64,
    #[serde(rename = "saving_throw_is_proficient")]
    pub is_proficient: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArmorClassEntry {
    #[serde(rename = "ac_base")]
    pub base: i64,
    /// Aggregated armor-class bonus on top of `base`
    #[serde(rename = "ac_modified")]
    pub modified: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HitPointsEntry {
    #[serde(rename = "hit_points_current")]
    pub current: i64,
    #[serde(rename = "hit_points_max")]
    pub max: i64,
    #[serde(rename = "hit_points_temp")]
    pub temp: i64,
    pub non_lethal_damage: i64,
}

/// The fully resolved stat block.
///
/// Always carries exactly six attributes, eighteen skills and six saving
/// throws, in [`Ability::ALL`] / [`Skill::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedStatBlock {
    #[serde(serialize_with = "as_single_record_list")]
    pub stats: CharacterStats,
    pub attributes: Vec<AttributeEntry>,
    pub skills: Vec<SkillEntry>,
    pub saving_throw_proficiencies: Vec<SavingThrowEntry>,
    #[serde(serialize_with = "as_single_record_list")]
    pub ac: ArmorClassEntry,
    #[serde(serialize_with = "as_single_record_list")]
    pub hit_points: HitPointsEntry,
}

fn as_single_record_list<S, T>(record: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    std::slice::from_ref(record).serialize(serializer)
}

impl DerivedStatBlock {
    pub fn attribute(&self, ability: Ability) -> Option<&AttributeEntry> {
        self.attributes.iter().find(|entry| entry.ability == ability)
    }

    pub fn skill(&self, skill: Skill) -> Option<&SkillEntry> {
        self.skills.iter().find(|entry| entry.skill == skill)
    }

    pub fn saving_throw(&self, ability: Ability) -> Option<&SavingThrowEntry> {
        self.saving_throw_proficiencies
            .iter()
            .find(|entry| entry.ability == ability)
    }

    /// Serialize into the output document.
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
