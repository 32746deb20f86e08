//! Stat identifiers.
//!
//! The ledger tracks eight stats. Three of them (wildness, loyalty,
//! survival) grow over a whole run and are drawn against a cap of
//! [`MAX_STAT`]; the other five describe Buck's condition and are drawn
//! against [`MAX_SIMPLE`]. Caps only matter for display: raw values are
//! never clamped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Display cap for wildness, loyalty and survival.
pub const MAX_STAT: i32 = 20;

/// Display cap for hunger, fatigue, cold, morale and respect.
pub const MAX_SIMPLE: i32 = 10;

/// One of the eight character statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Pull of the wild.
    Wildness,
    /// Attachment to people and the team.
    Loyalty,
    /// Accumulated hardiness.
    Survival,
    /// 0 = starving, 10 = full.
    Hunger,
    /// 0 = fresh, 10 = exhausted.
    Fatigue,
    /// 0 = warm, 10 = freezing.
    Cold,
    /// 0 = broken, 10 = inspired.
    Morale,
    /// Standing within the pack.
    Respect,
}

impl Stat {
    /// Every stat, in ledger order.
    pub const ALL: [Stat; 8] = [
        Stat::Wildness,
        Stat::Loyalty,
        Stat::Survival,
        Stat::Hunger,
        Stat::Fatigue,
        Stat::Cold,
        Stat::Morale,
        Stat::Respect,
    ];

    /// The key used in effect tables and saved snapshots.
    pub fn key(self) -> &'static str {
        match self {
            Self::Wildness => "wildness",
            Self::Loyalty => "loyalty",
            Self::Survival => "survival",
            Self::Hunger => "hunger",
            Self::Fatigue => "fatigue",
            Self::Cold => "cold",
            Self::Morale => "morale",
            Self::Respect => "respect",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Wildness => "Wildness",
            Self::Loyalty => "Loyalty",
            Self::Survival => "Survival",
            Self::Hunger => "Hunger",
            Self::Fatigue => "Fatigue",
            Self::Cold => "Cold",
            Self::Morale => "Morale",
            Self::Respect => "Pack Respect",
        }
    }

    /// The display cap for this stat.
    pub fn cap(self) -> i32 {
        match self {
            Self::Wildness | Self::Loyalty | Self::Survival => MAX_STAT,
            _ => MAX_SIMPLE,
        }
    }

    /// Look up a stat by its key. Returns `None` for unrecognized keys.
    pub fn parse(key: &str) -> Option<Stat> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Stat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownStat(s.to_string()))
    }
}
