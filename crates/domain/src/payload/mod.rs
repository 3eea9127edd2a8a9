//! Raw vendor character payload.
//!
//! These types mirror the vendor's character JSON closely enough to pull out
//! the fields the engine needs. Upstream shape is not contractually
//! guaranteed, so every field is optional and coerced through [`lenient`]:
//! nothing in here fails on a missing or mistyped field.

pub mod lenient;

use crate::error::DomainError;
use crate::modifiers::Modifier;
use crate::types::Ability;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Walking speed used when the payload carries none.
pub const DEFAULT_WALK_SPEED: i64 = 30;

/// Score used for an ability missing from `stats`.
pub const DEFAULT_ABILITY_SCORE: i64 = 10;

/// The character document, after unwrapping the vendor `data` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCharacterPayload {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub race: Option<RacePayload>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub background: Option<BackgroundPayload>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub classes: Vec<ClassPayload>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub stats: Vec<StatPayload>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub alignment_id: Option<i64>,
    #[serde(default, deserialize_with = "condition_entries")]
    pub conditions: Vec<ConditionEntry>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub inspiration: bool,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub death_saves: Option<DeathSavesPayload>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub exhaustion: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub current_hp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub max_hp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub temp_hp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub armor_class: Option<i64>,
    /// Modifier lists keyed by source category (`race`, `class`, `feats`, ...)
    #[serde(default, deserialize_with = "modifier_categories")]
    pub modifiers: HashMap<String, Vec<Modifier>>,
}

impl RawCharacterPayload {
    /// Parse a raw payload document.
    ///
    /// Accepts either the bare character object or the vendor envelope
    /// `{"data": {...}}`. Returns [`DomainError::MissingInput`] when there is
    /// no character document at all: `null`, a non-object, an empty object,
    /// or an envelope whose `data` is empty.
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        let document = character_document(value)
            .ok_or_else(|| DomainError::missing_input(DomainError::NO_DATA))?;

        RawCharacterPayload::deserialize(document)
            .map_err(|e| DomainError::parse(format!("Unreadable character payload: {}", e)))
    }

    /// Sum of all class levels; negative levels count as 0.
    pub fn total_level(&self) -> u32 {
        self.classes
            .iter()
            .map(ClassPayload::level)
            .fold(0u32, u32::saturating_add)
    }

    /// The stat entry for `ability`, matched by `id` or `statId`.
    pub fn stat(&self, ability: Ability) -> Option<&StatPayload> {
        self.stats
            .iter()
            .find(|stat| stat.ability() == Some(ability))
    }

    /// Base score for `ability` before modifiers.
    pub fn base_score(&self, ability: Ability) -> i64 {
        self.stat(ability)
            .and_then(|stat| stat.value)
            .unwrap_or(DEFAULT_ABILITY_SCORE)
    }

    /// Base walking speed before modifiers.
    pub fn base_walk_speed(&self) -> i64 {
        self.race
            .as_ref()
            .and_then(RacePayload::walk_speed)
            .unwrap_or(DEFAULT_WALK_SPEED)
    }
}

fn character_document(value: &Value) -> Option<&Value> {
    let map = value.as_object()?;
    let document = match map.get("data") {
        Some(inner) => inner,
        None => value,
    };
    document
        .as_object()
        .filter(|fields| !fields.is_empty())
        .map(|_| document)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacePayload {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub speed: Option<SpeedPayload>,
    /// Newer payload revisions nest speeds under `weightSpeeds.normal`
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub weight_speeds: Option<WeightSpeedsPayload>,
}

impl RacePayload {
    pub fn walk_speed(&self) -> Option<i64> {
        self.speed.as_ref().and_then(|speed| speed.walk).or_else(|| {
            self.weight_speeds
                .as_ref()
                .and_then(|speeds| speeds.normal.as_ref())
                .and_then(|speed| speed.walk)
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeedPayload {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub walk: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightSpeedsPayload {
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub normal: Option<SpeedPayload>,
}

/// `{"name": ...}` definitions used by backgrounds, classes and subclasses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefinitionPayload {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackgroundPayload {
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub definition: Option<DefinitionPayload>,
}

impl BackgroundPayload {
    pub fn name(&self) -> Option<&str> {
        self.definition.as_ref()?.name.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub level: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub definition: Option<DefinitionPayload>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub subclass_definition: Option<DefinitionPayload>,
}

impl ClassPayload {
    pub fn level(&self) -> u32 {
        self.level
            .map(|level| u32::try_from(level.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    pub fn name(&self) -> Option<&str> {
        self.definition.as_ref()?.name.as_deref()
    }

    pub fn subclass_name(&self) -> Option<&str> {
        self.subclass_definition.as_ref()?.name.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatPayload {
    /// Numeric id, numeric string, or ability name
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub stat_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub value: Option<i64>,
}

impl StatPayload {
    /// The ability this entry describes, from `id` first, then `statId`.
    pub fn ability(&self) -> Option<Ability> {
        [self.id.as_ref(), self.stat_id.as_ref()]
            .into_iter()
            .flatten()
            .find_map(ability_key)
    }
}

fn ability_key(key: &Value) -> Option<Ability> {
    match lenient::coerce_int(key) {
        Some(id) => Ability::from_id(id),
        None => key.as_str().and_then(|name| name.parse().ok()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeathSavesPayload {
    #[serde(default, alias = "successCount", deserialize_with = "lenient::opt_int")]
    pub successes: Option<i64>,
    #[serde(default, alias = "failCount", deserialize_with = "lenient::opt_int")]
    pub failures: Option<i64>,
}

/// One entry of the payload's `conditions` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionEntry {
    /// A bare condition id
    Id(i64),
    /// An object entry; `level` is only meaningful for exhaustion
    Detailed { id: Option<i64>, level: Option<i64> },
}

impl ConditionEntry {
    /// Discriminate a raw entry. Numbers are bare ids, objects are detailed,
    /// anything else is not a condition.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(_) => lenient::coerce_int(value).map(ConditionEntry::Id),
            Value::Object(fields) => Some(ConditionEntry::Detailed {
                id: fields.get("id").and_then(lenient::coerce_int),
                level: fields.get("level").and_then(lenient::coerce_int),
            }),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            ConditionEntry::Id(id) => Some(*id),
            ConditionEntry::Detailed { id, .. } => *id,
        }
    }
}

fn condition_entries<'de, D>(deserializer: D) -> Result<Vec<ConditionEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| {
            let entry = ConditionEntry::from_value(item);
            if entry.is_none() {
                tracing::debug!(entry = %item, "Dropping unrecognized condition entry");
            }
            entry
        })
        .collect())
}

fn modifier_categories<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<Modifier>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(categories) = value else {
        return Ok(HashMap::new());
    };

    Ok(categories
        .into_iter()
        .map(|(category, modifiers)| (category, lenient::records_from(modifiers)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> RawCharacterPayload {
        RawCharacterPayload::from_value(&value).unwrap()
    }

    #[test]
    fn absent_payloads_are_missing_input() {
        for value in [
            json!(null),
            json!({}),
            json!([]),
            json!("character"),
            json!({"data": {}}),
            json!({"data": null}),
        ] {
            let err = RawCharacterPayload::from_value(&value).unwrap_err();
            assert_eq!(err, DomainError::missing_input("No data found."), "{value}");
        }
    }

    #[test]
    fn unwraps_vendor_envelope() {
        let payload = parse(json!({"success": true, "data": {"name": "Vex"}}));
        assert_eq!(payload.name.as_deref(), Some("Vex"));

        let bare = parse(json!({"name": "Vex"}));
        assert_eq!(bare.name.as_deref(), Some("Vex"));
    }

    #[test]
    fn mistyped_fields_default_instead_of_failing() {
        let payload = parse(json!({
            "name": null,
            "race": "Elf",
            "classes": {"level": 3},
            "stats": [{"id": 1, "value": "15"}, 7],
            "inspiration": "yes",
            "deathSaves": [],
            "currentHp": "12",
            "modifiers": {
                "race": {"type": "bonus"},
                "class": [{"type": "bonus", "subType": "stats-2", "value": 1}]
            }
        }));

        assert_eq!(payload.name, None);
        assert!(payload.race.is_none());
        assert!(payload.classes.is_empty());
        assert_eq!(payload.base_score(Ability::Strength), 15);
        assert!(!payload.inspiration);
        assert!(payload.death_saves.is_none());
        assert_eq!(payload.current_hp, Some(12));
        assert!(payload.modifiers["race"].is_empty());
        assert_eq!(payload.modifiers["class"].len(), 1);
    }

    #[test]
    fn total_level_sums_classes_and_ignores_negatives() {
        let payload = parse(json!({
            "classes": [{"level": 3}, {"level": 2}, {"level": -4}, {}]
        }));
        assert_eq!(payload.total_level(), 5);
    }

    #[test]
    fn stats_match_by_id_stat_id_or_name() {
        let payload = parse(json!({
            "stats": [
                {"id": 1, "value": 16},
                {"statId": 2, "value": 14},
                {"id": "3", "value": 13},
                {"id": "wisdom", "value": 12},
                {"id": 6, "value": null}
            ]
        }));

        assert_eq!(payload.base_score(Ability::Strength), 16);
        assert_eq!(payload.base_score(Ability::Dexterity), 14);
        assert_eq!(payload.base_score(Ability::Constitution), 13);
        assert_eq!(payload.base_score(Ability::Intelligence), 10);
        assert_eq!(payload.base_score(Ability::Wisdom), 12);
        assert_eq!(payload.base_score(Ability::Charisma), 10);
    }

    #[test]
    fn walk_speed_defaults_and_falls_back_to_weight_speeds() {
        assert_eq!(parse(json!({"name": "A"})).base_walk_speed(), 30);
        assert_eq!(
            parse(json!({"race": {"speed": {"walk": 25}}})).base_walk_speed(),
            25
        );
        assert_eq!(
            parse(json!({"race": {"weightSpeeds": {"normal": {"walk": 35}}}})).base_walk_speed(),
            35
        );
        assert_eq!(parse(json!({"race": {"speed": {}}})).base_walk_speed(), 30);
    }

    #[test]
    fn conditions_are_discriminated_at_ingestion() {
        let payload = parse(json!({
            "conditions": [3, {"id": 15, "level": 2}, "poisoned", null, {"level": 1}]
        }));

        assert_eq!(
            payload.conditions,
            vec![
                ConditionEntry::Id(3),
                ConditionEntry::Detailed { id: Some(15), level: Some(2) },
                ConditionEntry::Detailed { id: None, level: Some(1) },
            ]
        );
    }

    #[test]
    fn death_saves_accept_vendor_count_names() {
        let payload = parse(json!({"deathSaves": {"successCount": 2, "failCount": 1}}));
        let saves = payload.death_saves.unwrap();
        assert_eq!(saves.successes, Some(2));
        assert_eq!(saves.failures, Some(1));
    }
}
