//! D&D 5th Edition calculation rules.

use super::traits::{CalculationEngine, ProficiencyLevel};

/// D&D 5th Edition game system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dnd5eSystem;

impl Dnd5eSystem {
    /// Create a new D&D 5e system instance.
    pub fn new() -> Self {
        Self
    }
}

impl CalculationEngine for Dnd5eSystem {
    fn system_id(&self) -> &str {
        "dnd5e"
    }

    fn ability_modifier(&self, score: i64) -> i64 {
        // Rust's / rounds toward zero; div_euclid by a positive divisor floors
        score.saturating_sub(10).div_euclid(2)
    }

    fn proficiency_bonus(&self, level: u32) -> i64 {
        match level {
            0 => 0,
            1..=4 => 2,
            5..=8 => 3,
            9..=12 => 4,
            13..=16 => 5,
            _ => 6,
        }
    }

    fn skill_value(
        &self,
        ability_modifier: i64,
        proficiency_bonus: i64,
        proficiency_level: ProficiencyLevel,
    ) -> i64 {
        ability_modifier
            .saturating_add(proficiency_bonus.saturating_mul(proficiency_level.bonus_terms()))
    }

    fn saving_throw_value(
        &self,
        ability_modifier: i64,
        proficiency_bonus: i64,
        proficient: bool,
    ) -> i64 {
        if proficient {
            ability_modifier.saturating_add(proficiency_bonus)
        } else {
            ability_modifier
        }
    }
}
