//! Game system traits for rules-specific formulas.
//!
//! Resolvers never hard-code a formula; they ask a [`CalculationEngine`].

/// Calculation rules that vary per game system.
pub trait CalculationEngine: Send + Sync {
    /// Unique identifier for this rule set (e.g., "dnd5e").
    fn system_id(&self) -> &str;

    /// Calculate ability modifier from score.
    ///
    /// For D&D-like systems: floor((score - 10) / 2)
    fn ability_modifier(&self, score: i64) -> i64;

    /// Calculate proficiency bonus from total character level.
    fn proficiency_bonus(&self, level: u32) -> i64;

    /// Calculate a skill's resolved value.
    fn skill_value(
        &self,
        ability_modifier: i64,
        proficiency_bonus: i64,
        proficiency_level: ProficiencyLevel,
    ) -> i64;

    /// Calculate a saving throw's resolved value.
    fn saving_throw_value(
        &self,
        ability_modifier: i64,
        proficiency_bonus: i64,
        proficient: bool,
    ) -> i64;
}

/// Proficiency level for skills and saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProficiencyLevel {
    /// Not proficient
    #[default]
    None,
    /// Standard proficiency
    Proficient,
    /// Expertise (second proficiency term)
    Expert,
}

impl ProficiencyLevel {
    /// Combine the detected flags. Expertise outranks a missing proficiency grant.
    pub fn from_flags(proficient: bool, expertise: bool) -> Self {
        match (proficient, expertise) {
            (_, true) => ProficiencyLevel::Expert,
            (true, false) => ProficiencyLevel::Proficient,
            (false, false) => ProficiencyLevel::None,
        }
    }

    /// How many proficiency-bonus terms this level adds.
    pub fn bonus_terms(self) -> i64 {
        match self {
            ProficiencyLevel::None => 0,
            ProficiencyLevel::Proficient => 1,
            ProficiencyLevel::Expert => 2,
        }
    }

    pub fn is_proficient(self) -> bool {
        self != ProficiencyLevel::None
    }

    pub fn is_expert(self) -> bool {
        self == ProficiencyLevel::Expert
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine_into_levels() {
        assert_eq!(ProficiencyLevel::from_flags(false, false), ProficiencyLevel::None);
        assert_eq!(ProficiencyLevel::from_flags(true, false), ProficiencyLevel::Proficient);
        assert_eq!(ProficiencyLevel::from_flags(true, true), ProficiencyLevel::Expert);
        assert_eq!(ProficiencyLevel::from_flags(false, true), ProficiencyLevel::Expert);
    }

    #[test]
    fn expertise_implies_proficiency() {
        let level = ProficiencyLevel::from_flags(false, true);
        assert!(level.is_proficient());
        assert!(level.is_expert());
        assert_eq!(level.bonus_terms(), 2);
    }
}
