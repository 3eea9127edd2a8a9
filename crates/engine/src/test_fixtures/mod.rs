//! Test fixtures loader for JSON fixture files and common test helpers.

use std::path::PathBuf;

use serde_json::Value;

/// Path of a fixture file in this directory.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("test_fixtures")
        .join(name)
}

/// Load a JSON fixture.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture(name: &str) -> Value {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture '{}': {}", path.display(), e))
}

/// Level 6 Half-Elf Bard 5 / Rogue 1 (Seraphine Vale), wrapped in the vendor envelope.
///
/// - DEX 16, CHA 18 after racial bonuses
/// - Expertise in Sleight of Hand
/// - Cloak of Protection (+1 AC)
/// - Frightened
pub fn sample_character() -> Value {
    load_fixture("sample_character.json")
}
