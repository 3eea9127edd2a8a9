//! Classification of vendor subtypes into closed modifier targets.
//!
//! Vendor subtypes are free-form strings whose spelling drifts between
//! payload revisions, so matching is substring/suffix based rather than
//! exact. All of that fuzziness lives here; resolvers only see targets.

use super::{Modifier, ModifierKind};
use crate::types::{Ability, Skill};

/// What a modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierTarget {
    /// An ability score (`stats-1`, `strength-score`, `strength-modifier`)
    Ability(Ability),
    /// A skill (`skills-athletics`, `sleight-of-hand`, ...)
    Skill(Skill),
    /// A saving throw (`strength-saving-throws`, `1-saving-throws`)
    SavingThrow(Ability),
    /// Walking speed
    Speed,
    /// Armor class bonus
    ArmorClass,
}

impl ModifierTarget {
    /// Every target the modifier matches. One subtype may match several.
    pub fn classify(modifier: &Modifier) -> Vec<ModifierTarget> {
        let sub_type = modifier.normalized_sub_type();
        let mut targets = Vec::new();

        for ability in Ability::ALL {
            if matches_ability_score(&sub_type, ability) {
                targets.push(ModifierTarget::Ability(ability));
            }
            if matches_saving_throw(&sub_type, ability) {
                targets.push(ModifierTarget::SavingThrow(ability));
            }
        }

        targets.extend(
            Skill::ALL
                .into_iter()
                .filter(|skill| matches_skill(&sub_type, *skill))
                .map(ModifierTarget::Skill),
        );

        if matches_speed(modifier, &sub_type) {
            targets.push(ModifierTarget::Speed);
        }

        if modifier.kind == ModifierKind::Bonus && sub_type.contains("armor-class") {
            targets.push(ModifierTarget::ArmorClass);
        }

        targets
    }
}

fn matches_ability_score(sub_type: &str, ability: Ability) -> bool {
    let name = ability.as_str();
    sub_type.ends_with(&format!("stats-{}", ability.id()))
        || sub_type.ends_with(&format!("{name}-score"))
        || sub_type.ends_with(&format!("{name}-modifier"))
}

fn matches_saving_throw(sub_type: &str, ability: Ability) -> bool {
    sub_type.ends_with(&format!("{}-saving-throws", ability.as_str()))
        || sub_type.ends_with(&format!("{}-saving-throws", ability.id()))
}

fn matches_skill(sub_type: &str, skill: Skill) -> bool {
    sub_type.contains(skill.as_str()) || sub_type.contains(skill.vendor_slug())
}

fn matches_speed(modifier: &Modifier, sub_type: &str) -> bool {
    if sub_type.contains("speed") {
        return true;
    }
    modifier.kind == ModifierKind::Bonus
        && modifier
            .friendly_subtype_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains("speed"))
}
