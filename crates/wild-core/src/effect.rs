//! Signed stat deltas.
//!
//! An effect is a mapping from stat key to a signed amount. Keys are kept as
//! strings so effect tables authored elsewhere may carry keys this build does
//! not know about; those keys are carried along and ignored when applied.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stat::Stat;

/// A set of signed stat deltas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Effect {
    deltas: BTreeMap<String, i32>,
}

impl Effect {
    /// Create an empty effect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delta for a stat, replacing any earlier value.
    pub fn with(mut self, stat: Stat, delta: i32) -> Self {
        self.deltas.insert(stat.key().to_string(), delta);
        self
    }

    /// Set the delta for an arbitrary key, recognized or not.
    pub fn with_key(mut self, key: impl Into<String>, delta: i32) -> Self {
        self.deltas.insert(key.into(), delta);
        self
    }

    /// Build an effect from `(stat, delta)` pairs.
    pub fn from_pairs(pairs: &[(Stat, i32)]) -> Self {
        pairs.iter().copied().collect()
    }

    /// The delta for a stat, or 0 if the effect does not touch it.
    pub fn get(&self, stat: Stat) -> i32 {
        self.deltas.get(stat.key()).copied().unwrap_or(0)
    }

    /// Deltas whose key names a known stat.
    pub fn recognized(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.deltas
            .iter()
            .filter_map(|(key, delta)| Stat::parse(key).map(|s| (s, *delta)))
    }

    /// Keys that do not name a known stat.
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.deltas
            .keys()
            .filter(|k| Stat::parse(k).is_none())
            .map(String::as_str)
    }

    /// Number of keys in the effect.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Whether the effect has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

impl FromIterator<(Stat, i32)> for Effect {
    fn from_iter<I: IntoIterator<Item = (Stat, i32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Effect::new(), |effect, (stat, delta)| effect.with(stat, delta))
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .deltas
            .iter()
            .map(|(key, delta)| format!("{key} {delta:+}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
