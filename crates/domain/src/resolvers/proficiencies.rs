//! Skill & Saving-Throw Resolver.

use super::attributes::ability_modifier;
use crate::game_systems::{CalculationEngine, ProficiencyLevel};
use crate::modifiers::{ModifierPool, ModifierTarget};
use crate::stat_block::{AttributeEntry, SavingThrowEntry, SkillEntry};
use crate::types::{Ability, Skill};

/// Resolve all eighteen skills in [`Skill::ALL`] order.
///
/// An expertise grant without a matching proficiency grant still counts as
/// expertise (two bonus terms) and reports the skill as proficient.
pub fn resolve_skills(
    attributes: &[AttributeEntry],
    pool: &ModifierPool,
    proficiency_bonus: i64,
    rules: &dyn CalculationEngine,
) -> Vec<SkillEntry> {
    Skill::ALL
        .into_iter()
        .map(|skill| {
            let target = ModifierTarget::Skill(skill);
            let level = ProficiencyLevel::from_flags(
                pool.is_proficient(target),
                pool.has_expertise(target),
            );
            let modifier = ability_modifier(attributes, skill.ability());
            SkillEntry {
                skill,
                value: rules.skill_value(modifier, proficiency_bonus, level),
                is_proficient: level.is_proficient(),
                is_expertise: level.is_expert(),
            }
        })
        .collect()
}

/// Resolve the six saving throws in [`Ability::ALL`] order. Expertise never applies.
pub fn resolve_saving_throws(
    attributes: &[AttributeEntry],
    pool: &ModifierPool,
    proficiency_bonus: i64,
    rules: &dyn CalculationEngine,
) -> Vec<SavingThrowEntry> {
    Ability::ALL
        .into_iter()
        .map(|ability| {
            let proficient = pool.is_proficient(ModifierTarget::SavingThrow(ability));
            let modifier = ability_modifier(attributes, ability);
            SavingThrowEntry {
                ability,
                value: rules.saving_throw_value(modifier, proficiency_bonus, proficient),
                is_proficient: proficient,
            }
        })
        .collect()
}
