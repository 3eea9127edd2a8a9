//! Character stat-block derivation.
//!
//! Turns a raw vendor character payload into a normalized [`DerivedStatBlock`]:
//! ability scores and modifiers, skills, saving throws, armor class, speed,
//! hit points and display strings. Pure computation, no I/O.

pub mod engine;
pub mod error;
pub mod game_systems;
pub mod modifiers;
pub mod payload;
pub mod records;
pub mod resolvers;
pub mod stat_block;
pub mod types;

pub use engine::{derive_document, error_document, is_error_document, StatBlockEngine};
pub use error::{DomainError, FieldViolation};

// Re-export game system traits and types
pub use game_systems::{CalculationEngine, Dnd5eSystem, ProficiencyLevel};

pub use modifiers::{Modifier, ModifierKind, ModifierPool, ModifierSource, ModifierTarget};
pub use payload::{ConditionEntry, RawCharacterPayload};
pub use records::{validate_for_storage, StatBlockRecords};
pub use stat_block::{
    ArmorClassEntry, AttributeEntry, CharacterStats, DerivedStatBlock, HitPointsEntry,
    SavingThrowEntry, SkillEntry,
};
pub use types::{Ability, Alignment, Condition, Skill};
