//! Stat-Block Assembler.
//!
//! Composes the resolvers into a [`DerivedStatBlock`]. Each derivation is a
//! single pass over a borrowed payload; the same payload always yields the
//! same stat block.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::DomainError;
use crate::game_systems::{CalculationEngine, Dnd5eSystem};
use crate::modifiers::ModifierPool;
use crate::payload::RawCharacterPayload;
use crate::resolvers;
use crate::stat_block::{CharacterStats, DerivedStatBlock, HitPointsEntry, UNKNOWN};

/// Base URL of the vendor character page; the payload id is appended.
pub const UPDATE_LINK_BASE: &str = "https://www.dndbeyond.com/characters/";

/// Derives stat blocks from raw character payloads.
#[derive(Clone)]
pub struct StatBlockEngine {
    rules: Arc<dyn CalculationEngine>,
}

impl Default for StatBlockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatBlockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatBlockEngine")
            .field("rules", &self.rules.system_id())
            .finish()
    }
}

impl StatBlockEngine {
    /// Engine using D&D 5e rules.
    pub fn new() -> Self {
        Self::with_rules(Arc::new(Dnd5eSystem::new()))
    }

    pub fn with_rules(rules: Arc<dyn CalculationEngine>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &dyn CalculationEngine {
        self.rules.as_ref()
    }

    /// Parse and derive in one step.
    ///
    /// Fails only with [`DomainError::MissingInput`] when there is no character
    /// document; malformed fields inside a present document are defaulted.
    pub fn derive_from_value(&self, value: &Value) -> Result<DerivedStatBlock, DomainError> {
        let payload = RawCharacterPayload::from_value(value)?;
        Ok(self.derive(&payload))
    }

    pub fn derive(&self, payload: &RawCharacterPayload) -> DerivedStatBlock {
        let rules = self.rules();
        let pool = ModifierPool::collect(&payload.modifiers);
        let level = payload.total_level();
        let proficiency_bonus = rules.proficiency_bonus(level);

        tracing::debug!(
            system = rules.system_id(),
            level,
            proficiency_bonus,
            modifiers = pool.len(),
            "Deriving stat block"
        );

        let attributes = resolvers::resolve_attributes(payload, &pool, rules);
        let skills = resolvers::resolve_skills(&attributes, &pool, proficiency_bonus, rules);
        let saving_throw_proficiencies =
            resolvers::resolve_saving_throws(&attributes, &pool, proficiency_bonus, rules);

        let stats = CharacterStats {
            is_inspired: payload.inspiration,
            name: or_unknown(payload.name.as_deref()),
            class: joined_or_unknown(payload.classes.iter().map(|class| class.name())),
            race: or_unknown(
                payload
                    .race
                    .as_ref()
                    .and_then(|race| race.full_name.as_deref()),
            ),
            background: or_unknown(payload.background.as_ref().and_then(|b| b.name())),
            subclass: joined_or_unknown(payload.classes.iter().map(|class| class.subclass_name())),
            level,
            alignment: resolvers::alignment_name(payload.alignment_id),
            conditions: resolvers::conditions_display(&payload.conditions),
            update_link: update_link(payload.id.as_deref()),
            proficiency_bonus,
            speed: resolvers::resolve_speed(payload, &pool),
            gender: or_unknown(payload.gender.as_deref()),
            death_save_successes: payload
                .death_saves
                .as_ref()
                .and_then(|saves| saves.successes)
                .unwrap_or(0),
            death_save_failures: payload
                .death_saves
                .as_ref()
                .and_then(|saves| saves.failures)
                .unwrap_or(0),
            exhaustion: payload.exhaustion.unwrap_or(0),
            initiative_adjustment: 0,
            proficiency_bonus_adjustment: 0,
        };

        DerivedStatBlock {
            stats,
            attributes,
            skills,
            saving_throw_proficiencies,
            ac: resolvers::resolve_armor_class(payload, &pool),
            hit_points: HitPointsEntry {
                current: payload.current_hp.unwrap_or(0),
                max: payload.max_hp.unwrap_or(0),
                temp: payload.temp_hp.unwrap_or(0),
                non_lethal_damage: 0,
            },
        }
    }

    /// Document boundary: the stat block document, or `{"error": "<message>"}`.
    pub fn derive_document(&self, value: &Value) -> Value {
        let document = self
            .derive_from_value(value)
            .and_then(|block| {
                block
                    .to_document()
                    .map_err(|e| DomainError::parse(e.to_string()))
            });

        match document {
            Ok(document) => document,
            Err(e) => error_document(&e),
        }
    }
}

/// Derive with the default rules and return the output document.
pub fn derive_document(value: &Value) -> Value {
    StatBlockEngine::new().derive_document(value)
}

/// The single-field error document returned in place of a stat block.
pub fn error_document(error: &DomainError) -> Value {
    json!({ "error": error.to_string() })
}

/// Whether `document` is the error shape rather than a stat block.
pub fn is_error_document(document: &Value) -> bool {
    document
        .as_object()
        .is_some_and(|fields| fields.len() == 1 && fields.contains_key("error"))
}

fn update_link(id: Option<&str>) -> String {
    format!("{}{}", UPDATE_LINK_BASE, id.unwrap_or_default())
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

fn joined_or_unknown<'a>(names: impl Iterator<Item = Option<&'a str>>) -> String {
    let names: Vec<&str> = names.map(|name| name.unwrap_or(UNKNOWN)).collect();
    if names.is_empty() {
        UNKNOWN.to_string()
    } else {
        names.join(", ")
    }
}
