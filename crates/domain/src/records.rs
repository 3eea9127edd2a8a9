//! Storage records: manually entered stat blocks and storage validation.
//!
//! A stat block that did not come out of [`crate::engine::StatBlockEngine`]
//! arrives as a partially filled record set. [`StatBlockRecords::normalize`]
//! fills it in from the per-section defaults and completes the fixed
//! attribute, saving-throw and skill sets.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{DomainError, FieldViolation};
use crate::payload::lenient;
use crate::resolvers::DEFAULT_ARMOR_CLASS;
use crate::stat_block::{
    ArmorClassEntry, AttributeEntry, CharacterStats, DerivedStatBlock, HitPointsEntry,
    SavingThrowEntry, SkillEntry, NO_CONDITIONS, UNKNOWN,
};
use crate::types::{Ability, Skill};

/// Column limit for trait names.
pub const MAX_TRAIT_NAME_LEN: usize = 20;

/// Column limit for character display strings.
pub const MAX_DISPLAY_LEN: usize = 50;

const DEFAULT_ATTRIBUTE_VALUE: i64 = 10;
const DEFAULT_LEVEL: u32 = 1;
const DEFAULT_PROFICIENCY_BONUS: i64 = 2;
const DEFAULT_SPEED: i64 = 30;
const DEFAULT_HIT_POINTS: i64 = 30;

/// A partially filled stat-block record set, keyed by section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatBlockRecords {
    #[serde(default, deserialize_with = "lenient::list")]
    pub stats: Vec<StatsRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub attributes: Vec<AttributeRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub ac: Vec<ArmorClassRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub saving_throw_proficiencies: Vec<SavingThrowRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub skills: Vec<SkillRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub hit_points: Vec<HitPointsRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsRecord {
    #[serde(default, rename = "character_is_inspired", deserialize_with = "lenient::flag")]
    pub is_inspired: bool,
    #[serde(default, rename = "character_name", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, rename = "character_class", deserialize_with = "lenient::opt_string")]
    pub class: Option<String>,
    #[serde(default, rename = "character_race", deserialize_with = "lenient::opt_string")]
    pub race: Option<String>,
    #[serde(default, rename = "character_background", deserialize_with = "lenient::opt_string")]
    pub background: Option<String>,
    #[serde(default, rename = "character_subclass", deserialize_with = "lenient::opt_string")]
    pub subclass: Option<String>,
    #[serde(default, rename = "character_level", deserialize_with = "lenient::opt_int")]
    pub level: Option<i64>,
    #[serde(default, rename = "character_alignment", deserialize_with = "lenient::opt_string")]
    pub alignment: Option<String>,
    #[serde(default, rename = "character_conditions", deserialize_with = "lenient::opt_string")]
    pub conditions: Option<String>,
    #[serde(
        default,
        rename = "character_update_link",
        alias = "character_source_link",
        deserialize_with = "lenient::opt_string"
    )]
    pub update_link: Option<String>,
    #[serde(
        default,
        rename = "character_proficiency_bonus",
        deserialize_with = "lenient::opt_int"
    )]
    pub proficiency_bonus: Option<i64>,
    #[serde(default, rename = "character_speed", deserialize_with = "lenient::opt_int")]
    pub speed: Option<i64>,
    #[serde(default, rename = "character_gender", deserialize_with = "lenient::opt_string")]
    pub gender: Option<String>,
    #[serde(
        default,
        rename = "character_death_save_success",
        deserialize_with = "lenient::opt_int"
    )]
    pub death_save_successes: Option<i64>,
    #[serde(
        default,
        rename = "character_death_save_failure",
        deserialize_with = "lenient::opt_int"
    )]
    pub death_save_failures: Option<i64>,
    #[serde(default, rename = "character_exhaustion", deserialize_with = "lenient::opt_int")]
    pub exhaustion: Option<i64>,
    #[serde(
        default,
        rename = "character_initiative_adjustment",
        deserialize_with = "lenient::opt_int"
    )]
    pub initiative_adjustment: Option<i64>,
    #[serde(
        default,
        rename = "character_proficiency_bonus_adjustment",
        deserialize_with = "lenient::opt_int"
    )]
    pub proficiency_bonus_adjustment: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeRecord {
    #[serde(default, rename = "attribute_name", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, rename = "attribute_value", deserialize_with = "lenient::opt_int")]
    pub value: Option<i64>,
    #[serde(default, rename = "attribute_adjustment", deserialize_with = "lenient::opt_int")]
    pub adjustment: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavingThrowRecord {
    #[serde(default, rename = "saving_throw_name", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, rename = "saving_throw_adjustment", deserialize_with = "lenient::opt_int")]
    pub adjustment: Option<i64>,
    #[serde(default, rename = "saving_throw_is_proficient", deserialize_with = "lenient::flag")]
    pub is_proficient: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillRecord {
    #[serde(default, rename = "skill_name", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, rename = "skill_adjustment", deserialize_with = "lenient::opt_int")]
    pub adjustment: Option<i64>,
    #[serde(default, rename = "skill_is_proficient", deserialize_with = "lenient::flag")]
    pub is_proficient: bool,
    #[serde(default, rename = "skill_is_expertise", deserialize_with = "lenient::flag")]
    pub is_expertise: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmorClassRecord {
    #[serde(default, rename = "ac_base", deserialize_with = "lenient::opt_int")]
    pub base: Option<i64>,
    #[serde(default, rename = "ac_modified", deserialize_with = "lenient::opt_int")]
    pub modified: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitPointsRecord {
    #[serde(default, rename = "hit_points_current", deserialize_with = "lenient::opt_int")]
    pub current: Option<i64>,
    #[serde(default, rename = "hit_points_max", deserialize_with = "lenient::opt_int")]
    pub max: Option<i64>,
    #[serde(default, rename = "hit_points_temp", deserialize_with = "lenient::opt_int")]
    pub temp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub non_lethal_damage: Option<i64>,
}

impl StatBlockRecords {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DomainError> {
        StatBlockRecords::deserialize(value)
            .map_err(|e| DomainError::parse(format!("Unreadable stat block records: {}", e)))
    }

    /// Fill defaults and complete the fixed trait sets.
    ///
    /// Sections are checked in storage order; the first empty one is reported.
    /// Trait names must be known and may appear at most once per section.
    pub fn normalize(self) -> Result<DerivedStatBlock, DomainError> {
        self.check_sections()?;

        let Self {
            stats,
            attributes,
            ac,
            saving_throw_proficiencies,
            skills,
            hit_points,
        } = self;

        let attributes = complete_traits(
            attributes,
            Ability::ALL,
            |record| record.name.as_deref(),
            Ability::as_str,
            |ability, record| AttributeEntry {
                ability,
                value: record.value.unwrap_or(DEFAULT_ATTRIBUTE_VALUE),
                modifier: record.adjustment.unwrap_or(0),
            },
        )?;
        let saving_throw_proficiencies = complete_traits(
            saving_throw_proficiencies,
            Ability::ALL,
            |record| record.name.as_deref(),
            Ability::as_str,
            |ability, record| SavingThrowEntry {
                ability,
                value: record.adjustment.unwrap_or(0),
                is_proficient: record.is_proficient,
            },
        )?;
        let skills = complete_traits(
            skills,
            Skill::ALL,
            |record| record.name.as_deref(),
            Skill::as_str,
            |skill, record| SkillEntry {
                skill,
                value: record.adjustment.unwrap_or(0),
                is_proficient: record.is_proficient,
                is_expertise: record.is_expertise,
            },
        )?;

        Ok(DerivedStatBlock {
            stats: stats.into_iter().next().unwrap_or_default().into_stats(),
            attributes,
            skills,
            saving_throw_proficiencies,
            ac: ac.into_iter().next().unwrap_or_default().into_entry(),
            hit_points: hit_points.into_iter().next().unwrap_or_default().into_entry(),
        })
    }

    fn check_sections(&self) -> Result<(), DomainError> {
        let sections = [
            ("stats", self.stats.is_empty()),
            ("attributes", self.attributes.is_empty()),
            ("ac", self.ac.is_empty()),
            ("saving_throw_proficiencies", self.saving_throw_proficiencies.is_empty()),
            ("skills", self.skills.is_empty()),
            ("hit_points", self.hit_points.is_empty()),
        ];
        match sections.into_iter().find(|(_, empty)| *empty) {
            Some((topic, _)) => Err(DomainError::validation(format!(
                "Missing data for topic '{}'.",
                topic
            ))),
            None => Ok(()),
        }
    }
}

/// Match records to the fixed trait set by name, then append defaults for
/// every trait not supplied. The result is in `all` order.
fn complete_traits<K, R, E, const N: usize>(
    records: Vec<R>,
    all: [K; N],
    name_of: impl Fn(&R) -> Option<&str>,
    default_name: impl Fn(K) -> &'static str,
    build: impl Fn(K, &R) -> E,
) -> Result<Vec<E>, DomainError>
where
    K: Copy + Ord + FromStr,
    R: Default,
{
    let fallback = default_name(all[0]);
    let mut supplied: BTreeMap<K, R> = BTreeMap::new();

    for record in records {
        let name = name_of(&record).unwrap_or(fallback).to_string();
        let key = name
            .parse::<K>()
            .ok()
            .filter(|key| !supplied.contains_key(key))
            .ok_or_else(|| DomainError::validation(format!("Invalid trait name '{}'.", name)))?;
        supplied.insert(key, record);
    }

    Ok(all
        .into_iter()
        .map(|key| match supplied.get(&key) {
            Some(record) => build(key, record),
            None => build(key, &R::default()),
        })
        .collect())
}

impl StatsRecord {
    fn into_stats(self) -> CharacterStats {
        let text = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());
        CharacterStats {
            is_inspired: self.is_inspired,
            name: text(self.name),
            class: text(self.class),
            race: text(self.race),
            background: text(self.background),
            subclass: text(self.subclass),
            level: self
                .level
                .map(|level| u32::try_from(level.max(0)).unwrap_or(u32::MAX))
                .unwrap_or(DEFAULT_LEVEL),
            alignment: text(self.alignment),
            conditions: self.conditions.unwrap_or_else(|| NO_CONDITIONS.to_string()),
            update_link: self.update_link.unwrap_or_default(),
            proficiency_bonus: self.proficiency_bonus.unwrap_or(DEFAULT_PROFICIENCY_BONUS),
            speed: self.speed.unwrap_or(DEFAULT_SPEED),
            gender: text(self.gender),
            death_save_successes: self.death_save_successes.unwrap_or(0),
            death_save_failures: self.death_save_failures.unwrap_or(0),
            exhaustion: self.exhaustion.unwrap_or(0),
            initiative_adjustment: self.initiative_adjustment.unwrap_or(0),
            proficiency_bonus_adjustment: self.proficiency_bonus_adjustment.unwrap_or(0),
        }
    }
}

impl ArmorClassRecord {
    fn into_entry(self) -> ArmorClassEntry {
        ArmorClassEntry {
            base: self.base.unwrap_or(DEFAULT_ARMOR_CLASS),
            modified: self.modified.unwrap_or(0),
        }
    }
}

impl HitPointsRecord {
    fn into_entry(self) -> HitPointsEntry {
        HitPointsEntry {
            current: self.current.unwrap_or(DEFAULT_HIT_POINTS),
            max: self.max.unwrap_or(DEFAULT_HIT_POINTS),
            temp: self.temp.unwrap_or(0),
            non_lethal_damage: self.non_lethal_damage.unwrap_or(0),
        }
    }
}

/// Check a stat block against the storage column limits.
///
/// Reports every violation, not just the first.
pub fn validate_for_storage(block: &DerivedStatBlock) -> Result<(), DomainError> {
    let stats = &block.stats;
    let display_fields = [
        ("stats.character_name", &stats.name),
        ("stats.character_class", &stats.class),
        ("stats.character_race", &stats.race),
        ("stats.character_background", &stats.background),
        ("stats.character_subclass", &stats.subclass),
        ("stats.character_conditions", &stats.conditions),
    ];

    let mut violations: Vec<FieldViolation> = display_fields
        .into_iter()
        .filter_map(|(field, value)| too_long(field, value, MAX_DISPLAY_LEN))
        .collect();

    let trait_names = block
        .attributes
        .iter()
        .map(|entry| ("attributes.attribute_name", entry.ability.as_str()))
        .chain(block.saving_throw_proficiencies.iter().map(|entry| {
            (
                "saving_throw_proficiencies.saving_throw_name",
                entry.ability.as_str(),
            )
        }))
        .chain(
            block
                .skills
                .iter()
                .map(|entry| ("skills.skill_name", entry.skill.as_str())),
        );
    violations.extend(
        trait_names.filter_map(|(field, name)| too_long(field, name, MAX_TRAIT_NAME_LEN)),
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::ValidationErrors(violations))
    }
}

fn too_long(field: &str, value: &str, limit: usize) -> Option<FieldViolation> {
    let length = value.chars().count();
    (length > limit).then(|| {
        FieldViolation::new(
            field,
            format!(
                "Ensure this field has no more than {} characters (it has {}).",
                limit, length
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StatBlockEngine;
    use serde_json::{json, Value};

    fn minimal_records() -> Value {
        json!({
            "stats": [{"character_name": "Mira", "character_class": "Wizard"}],
            "attributes": [{
                "attribute_name": "intelligence",
                "attribute_value": 18,
                "attribute_adjustment": 4
            }],
            "ac": [{"ac_base": 12}],
            "saving_throw_proficiencies": [{
                "saving_throw_name": "wisdom",
                "saving_throw_is_proficient": true
            }],
            "skills": [{
                "skill_name": "arcana",
                "skill_adjustment": 6,
                "skill_is_proficient": true
            }],
            "hit_points": [{"hit_points_current": 14}]
        })
    }

    fn normalize(value: Value) -> Result<DerivedStatBlock, DomainError> {
        StatBlockRecords::from_value(&value)?.normalize()
    }

    #[test]
    fn fills_defaults_and_completes_trait_sets() {
        let block = normalize(minimal_records()).unwrap();

        assert_eq!(block.stats.name, "Mira");
        assert_eq!(block.stats.race, "Unknown");
        assert_eq!(block.stats.level, 1);
        assert_eq!(block.stats.proficiency_bonus, 2);
        assert_eq!(block.stats.speed, 30);
        assert!(!block.stats.is_inspired);

        assert_eq!(block.attributes.len(), 6);
        assert_eq!(block.saving_throw_proficiencies.len(), 6);
        assert_eq!(block.skills.len(), 18);

        let intelligence = block.attribute(Ability::Intelligence).unwrap();
        assert_eq!((intelligence.value, intelligence.modifier), (18, 4));
        let strength = block.attribute(Ability::Strength).unwrap();
        assert_eq!((strength.value, strength.modifier), (10, 0));

        assert!(block.saving_throw(Ability::Wisdom).unwrap().is_proficient);
        assert!(!block.saving_throw(Ability::Charisma).unwrap().is_proficient);
        assert_eq!(block.skill(Skill::Arcana).unwrap().value, 6);
        assert!(!block.skill(Skill::Stealth).unwrap().is_expertise);

        assert_eq!((block.ac.base, block.ac.modified), (12, 0));
        assert_eq!(block.hit_points.current, 14);
        assert_eq!(block.hit_points.max, 30);
    }

    #[test]
    fn armor_class_record_without_base_uses_unarmored_default() {
        let mut records = minimal_records();
        records["ac"] = json!([{"ac_modified": 2}]);

        let block = normalize(records).unwrap();
        assert_eq!(block.ac.base, DEFAULT_ARMOR_CLASS);
        assert_eq!(block.ac.modified, 2);
    }

    #[test]
    fn completed_sets_keep_fixed_order() {
        let block = normalize(minimal_records()).unwrap();
        let order: Vec<_> = block.attributes.iter().map(|a| a.ability).collect();
        assert_eq!(order, Ability::ALL.to_vec());
        let skills: Vec<_> = block.skills.iter().map(|s| s.skill).collect();
        assert_eq!(skills, Skill::ALL.to_vec());
    }

    #[test]
    fn missing_or_empty_topic_is_rejected() {
        let mut records = minimal_records();
        records["skills"] = json!([]);
        let err = normalize(records).unwrap_err();
        assert_eq!(err.to_string(), "Missing data for topic 'skills'.");

        let mut records = minimal_records();
        records.as_object_mut().unwrap().remove("stats");
        let err = normalize(records).unwrap_err();
        assert_eq!(err.to_string(), "Missing data for topic 'stats'.");
    }

    #[test]
    fn unknown_or_repeated_trait_names_are_rejected() {
        let mut records = minimal_records();
        records["attributes"] = json!([{"attribute_name": "luck"}]);
        let err = normalize(records).unwrap_err();
        assert_eq!(err.to_string(), "Invalid trait name 'luck'.");

        let mut records = minimal_records();
        records["skills"] = json!([{"skill_name": "arcana"}, {"skill_name": "arcana"}]);
        let err = normalize(records).unwrap_err();
        assert_eq!(err.to_string(), "Invalid trait name 'arcana'.");
    }

    #[test]
    fn nameless_trait_takes_the_first_name() {
        let mut records = minimal_records();
        records["attributes"] = json!([{"attribute_value": 15}]);
        let block = normalize(records).unwrap();
        assert_eq!(block.attribute(Ability::Strength).unwrap().value, 15);
    }

    #[test]
    fn derived_stat_block_passes_storage_validation() {
        let block = StatBlockEngine::new()
            .derive_from_value(&json!({"name": "Short Name"}))
            .unwrap();
        assert!(validate_for_storage(&block).is_ok());
    }

    #[test]
    fn overlong_display_strings_are_all_reported() {
        let mut block = normalize(minimal_records()).unwrap();
        block.stats.name = "N".repeat(51);
        block.stats.conditions =
            "Blinded, Charmed, Deafened, Frightened, Grappled, Poisoned".to_string();
        block.stats.race = "R".repeat(50);

        let err = validate_for_storage(&block).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["stats.character_name", "stats.character_conditions"]);
        assert!(err.to_string().starts_with("Invalid stat block: stats.character_name: "));
    }
}
