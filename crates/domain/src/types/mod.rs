//! # Lookup Tables
//!
//! Closed vocabularies shared by every resolver: the six abilities, the
//! eighteen skills, the fifteen conditions, and the nine alignments.
//!
//! These are process-wide constants. Nothing here is mutable and nothing
//! here performs I/O.

mod ability;
pub use ability::Ability;

mod skill;
pub use skill::Skill;

mod condition;
pub use condition::{Alignment, Condition};
