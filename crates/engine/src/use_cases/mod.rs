//! Use cases - orchestration across the engine and the ports.

mod import_character;

pub use import_character::{ImportCharacter, ImportError};
