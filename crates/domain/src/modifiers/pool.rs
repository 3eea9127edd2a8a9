//! The Modifier Aggregator.

use super::{Modifier, ModifierKind, ModifierSource, ModifierTarget};
use std::collections::HashMap;

/// A modifier together with where it came from and what it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledModifier {
    pub source: ModifierSource,
    pub modifier: Modifier,
    pub targets: Vec<ModifierTarget>,
}

impl PooledModifier {
    pub fn new(source: ModifierSource, modifier: Modifier) -> Self {
        let targets = ModifierTarget::classify(&modifier);
        Self {
            source,
            modifier,
            targets,
        }
    }

    pub fn aims_at(&self, target: ModifierTarget) -> bool {
        self.targets.contains(&target)
    }
}

/// Flat, classified view over every tracked modifier of one payload.
///
/// Duplicate records are kept: two grants of the same bonus both count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierPool {
    entries: Vec<PooledModifier>,
}

impl ModifierPool {
    /// Flatten the payload's category map. Categories other than the five
    /// tracked [`ModifierSource`]s are ignored.
    pub fn collect(categories: &HashMap<String, Vec<Modifier>>) -> Self {
        let entries = ModifierSource::ALL
            .into_iter()
            .flat_map(|source| {
                categories
                    .get(source.key())
                    .into_iter()
                    .flatten()
                    .map(move |modifier| PooledModifier::new(source, modifier.clone()))
            })
            .collect();
        Self { entries }
    }

    pub fn from_modifiers(
        modifiers: impl IntoIterator<Item = (ModifierSource, Modifier)>,
    ) -> Self {
        Self {
            entries: modifiers
                .into_iter()
                .map(|(source, modifier)| PooledModifier::new(source, modifier))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PooledModifier> {
        self.entries.iter()
    }

    /// Sum of `value` over every modifier aimed at `target`; missing values count as 0.
    pub fn value_sum(&self, target: ModifierTarget) -> i64 {
        self.matching(target)
            .map(|entry| entry.modifier.value.unwrap_or(0))
            .fold(0i64, i64::saturating_add)
    }

    /// Whether any `proficiency` modifier targets `target`.
    pub fn is_proficient(&self, target: ModifierTarget) -> bool {
        self.has_kind(target, &ModifierKind::Proficiency)
    }

    /// Whether any `expertise` modifier targets `target`.
    pub fn has_expertise(&self, target: ModifierTarget) -> bool {
        self.has_kind(target, &ModifierKind::Expertise)
    }

    fn has_kind(&self, target: ModifierTarget, kind: &ModifierKind) -> bool {
        self.matching(target)
            .any(|entry| &entry.modifier.kind == kind)
    }

    fn matching(&self, target: ModifierTarget) -> impl Iterator<Item = &PooledModifier> {
        self.entries.iter().filter(move |entry| entry.aims_at(target))
    }
}
