//! Statblock Engine library.
//!
//! Composition around the domain engine: reads a raw character payload,
//! derives the stat block, validates it for storage and writes it out.
//!
//! ## Structure
//!
//! - `config` - Environment and command-line configuration
//! - `infrastructure/` - Port traits and their file/stdio adapters
//! - `render` - JSON and plain-text output
//! - `use_cases/` - The import flow

pub mod config;
pub mod infrastructure;
pub mod render;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use config::{EngineConfig, OutputFormat};
pub use use_cases::{ImportCharacter, ImportError};
