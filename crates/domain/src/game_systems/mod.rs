//! Game system implementations.
//!
//! Each system implements [`CalculationEngine`]; the resolvers are written
//! against the trait.
//!
//! # Supported Systems
//!
//! - D&D 5th Edition (`dnd5e`)

mod dnd5e;
mod traits;

pub use dnd5e::Dnd5eSystem;
pub use traits::{CalculationEngine, ProficiencyLevel};
