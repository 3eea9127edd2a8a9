//! Speed and armor-class resolvers.

use crate::modifiers::{ModifierPool, ModifierTarget};
use crate::payload::RawCharacterPayload;
use crate::stat_block::ArmorClassEntry;

/// Armor class used when the payload carries none (unarmored).
pub const DEFAULT_ARMOR_CLASS: i64 = 10;

/// Walking speed: base (default 30) plus every speed-tagged modifier.
pub fn resolve_speed(payload: &RawCharacterPayload, pool: &ModifierPool) -> i64 {
    payload
        .base_walk_speed()
        .saturating_add(pool.value_sum(ModifierTarget::Speed))
}

/// Armor class: payload base plus aggregated armor-class bonuses as the delta.
pub fn resolve_armor_class(payload: &RawCharacterPayload, pool: &ModifierPool) -> ArmorClassEntry {
    ArmorClassEntry {
        base: payload.armor_class.unwrap_or(DEFAULT_ARMOR_CLASS),
        modified: pool.value_sum(ModifierTarget::ArmorClass),
    }
}
