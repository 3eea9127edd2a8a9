//! Attribute Resolver: base ability scores plus aggregated modifiers.

use crate::game_systems::CalculationEngine;
use crate::modifiers::{ModifierPool, ModifierTarget};
use crate::payload::RawCharacterPayload;
use crate::stat_block::AttributeEntry;
use crate::types::Ability;

/// Resolve all six abilities in [`Ability::ALL`] order.
pub fn resolve_attributes(
    payload: &RawCharacterPayload,
    pool: &ModifierPool,
    rules: &dyn CalculationEngine,
) -> Vec<AttributeEntry> {
    Ability::ALL
        .into_iter()
        .map(|ability| {
            let value = payload
                .base_score(ability)
                .saturating_add(pool.value_sum(ModifierTarget::Ability(ability)));
            AttributeEntry {
                ability,
                value,
                modifier: rules.ability_modifier(value),
            }
        })
        .collect()
}

/// The derived modifier for `ability`; 0 if the ability was not resolved.
pub fn ability_modifier(attributes: &[AttributeEntry], ability: Ability) -> i64 {
    attributes
        .iter()
        .find(|entry| entry.ability == ability)
        .map_or(0, |entry| entry.modifier)
}
