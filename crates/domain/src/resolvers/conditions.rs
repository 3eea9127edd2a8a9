//! Condition / Alignment Mapper.

use crate::payload::ConditionEntry;
use crate::stat_block::{NO_CONDITIONS, UNKNOWN};
use crate::types::{Alignment, Condition};

/// Alignment display name; absent or unknown ids resolve to "Unknown".
pub fn alignment_name(alignment_id: Option<i64>) -> String {
    match alignment_id.map(|id| (id, Alignment::from_id(id))) {
        Some((_, Some(alignment))) => alignment.display_name().to_string(),
        Some((id, None)) => {
            tracing::debug!(alignment_id = id, "Unknown alignment id");
            UNKNOWN.to_string()
        }
        None => UNKNOWN.to_string(),
    }
}

/// Display string for one condition entry.
///
/// Detailed exhaustion entries carry their level: `"Exhaustion (Level 2)"`.
/// A bare exhaustion id has no level to show.
pub fn condition_label(entry: &ConditionEntry) -> String {
    let condition = entry.id().and_then(Condition::from_id);
    let Some(condition) = condition else {
        tracing::debug!(condition_id = ?entry.id(), "Unknown condition id");
        return Condition::UNKNOWN.to_string();
    };

    match entry {
        ConditionEntry::Detailed { level, .. } if condition == Condition::Exhaustion => {
            format!("{} (Level {})", condition, level.unwrap_or(0))
        }
        _ => condition.display_name().to_string(),
    }
}

/// All conditions joined with ", ", or "None" when there are none.
pub fn conditions_display(entries: &[ConditionEntry]) -> String {
    if entries.is_empty() {
        return NO_CONDITIONS.to_string();
    }
    entries
        .iter()
        .map(condition_label)
        .collect::<Vec<_>>()
        .join(", ")
}
