//! Resolvers turn (base values, modifier pool) into resolved stat-block entries.
//!
//! Each resolver is a pure function. None of them calls back into another
//! except through already-resolved values (skills read resolved attributes).

mod attributes;
mod conditions;
mod proficiencies;
mod speed;

pub use attributes::{ability_modifier, resolve_attributes};
pub use conditions::{alignment_name, condition_label, conditions_display};
pub use proficiencies::{resolve_saving_throws, resolve_skills};
pub use speed::{resolve_armor_class, resolve_speed, DEFAULT_ARMOR_CLASS};
