//! Gameplay modifiers and the Modifier Aggregator.
//!
//! A [`Modifier`] is one vendor effect record (type, target subtype, signed
//! value). Modifiers arrive grouped by source category; the
//! [`ModifierPool`] flattens the five tracked categories, classifies every
//! record into [`ModifierTarget`]s once, and answers the aggregate queries
//! the resolvers need.

mod pool;
mod target;

pub use pool::{ModifierPool, PooledModifier};
pub use target::ModifierTarget;

use crate::payload::lenient;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// What a modifier does to its target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModifierKind {
    /// Grants the proficiency bonus
    Proficiency,
    /// Grants a second proficiency bonus term (skills only)
    Expertise,
    /// Adds `value` to the target
    Bonus,
    /// Any other vendor type (`set`, `advantage`, `resistance`, ...), kept verbatim
    Other(String),
    /// The record carried no usable type
    #[default]
    Unspecified,
}

impl ModifierKind {
    pub fn as_str(&self) -> &str {
        match self {
            ModifierKind::Proficiency => "proficiency",
            ModifierKind::Expertise => "expertise",
            ModifierKind::Bonus => "bonus",
            ModifierKind::Other(kind) => kind,
            ModifierKind::Unspecified => "",
        }
    }
}

impl From<&str> for ModifierKind {
    fn from(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "proficiency" => ModifierKind::Proficiency,
            "expertise" => ModifierKind::Expertise,
            "bonus" => ModifierKind::Bonus,
            "" => ModifierKind::Unspecified,
            _ => ModifierKind::Other(kind.to_string()),
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<ModifierKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::opt_string(deserializer)?
        .map(|kind| ModifierKind::from(kind.as_str()))
        .unwrap_or_default())
}

/// A single vendor modifier record.
///
/// Immutable input. Only `kind`, `sub_type`, `value` and (for speed)
/// `friendly_subtype_name` take part in computation; the rest is provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    #[serde(rename = "type", default, deserialize_with = "deserialize_kind")]
    pub kind: ModifierKind,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sub_type: Option<String>,
    /// Signed amount; `None` contributes 0 to every sum
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub value: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub entity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub entity_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub friendly_subtype_name: Option<String>,
}

impl Modifier {
    pub fn new(kind: impl Into<String>, sub_type: impl Into<String>, value: Option<i64>) -> Self {
        let kind: String = kind.into();
        Self {
            kind: ModifierKind::from(kind.as_str()),
            sub_type: Some(sub_type.into()),
            value,
            ..Self::default()
        }
    }

    pub fn with_friendly_subtype_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_subtype_name = Some(name.into());
        self
    }

    /// The subtype lowercased, or empty when absent.
    pub fn normalized_sub_type(&self) -> String {
        self.sub_type
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }
}

/// The payload categories whose modifiers feed the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierSource {
    Race,
    Feats,
    MagicItems,
    Class,
    Background,
}

impl ModifierSource {
    /// Walk order when flattening the payload's modifier map.
    pub const ALL: [ModifierSource; 5] = [
        ModifierSource::Race,
        ModifierSource::Feats,
        ModifierSource::MagicItems,
        ModifierSource::Class,
        ModifierSource::Background,
    ];

    /// Key of this category in the payload's `modifiers` map.
    pub fn key(self) -> &'static str {
        match self {
            ModifierSource::Race => "race",
            ModifierSource::Feats => "feats",
            ModifierSource::MagicItems => "magic-items",
            ModifierSource::Class => "class",
            ModifierSource::Background => "background",
        }
    }
}

impl fmt::Display for ModifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
