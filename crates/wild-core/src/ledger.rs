//! The stat ledger.
//!
//! Values are stored raw and are never clamped on write. Display code reads
//! [`StatLedger::displayed`], which clamps into `[0, cap]`; gameplay rules
//! read [`StatLedger::get`] and must cope with values outside that range.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::stat::Stat;

/// The eight raw character statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLedger {
    /// Raw wildness.
    pub wildness: i32,
    /// Raw loyalty.
    pub loyalty: i32,
    /// Raw survival.
    pub survival: i32,
    /// Raw hunger.
    pub hunger: i32,
    /// Raw fatigue.
    pub fatigue: i32,
    /// Raw cold.
    pub cold: i32,
    /// Raw morale.
    pub morale: i32,
    /// Raw pack respect.
    pub respect: i32,
}

impl Default for StatLedger {
    /// The ledger at the start of a run.
    fn default() -> Self {
        Self {
            wildness: 0,
            loyalty: 0,
            survival: 0,
            hunger: 5,
            fatigue: 0,
            cold: 0,
            morale: 5,
            respect: 0,
        }
    }
}

impl StatLedger {
    /// The ledger at the start of a run.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger with every stat at zero, used as an accumulator.
    pub fn zeroed() -> Self {
        Self {
            wildness: 0,
            loyalty: 0,
            survival: 0,
            hunger: 0,
            fatigue: 0,
            cold: 0,
            morale: 0,
            respect: 0,
        }
    }

    /// Raw value of a stat.
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Wildness => self.wildness,
            Stat::Loyalty => self.loyalty,
            Stat::Survival => self.survival,
            Stat::Hunger => self.hunger,
            Stat::Fatigue => self.fatigue,
            Stat::Cold => self.cold,
            Stat::Morale => self.morale,
            Stat::Respect => self.respect,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Wildness => &mut self.wildness,
            Stat::Loyalty => &mut self.loyalty,
            Stat::Survival => &mut self.survival,
            Stat::Hunger => &mut self.hunger,
            Stat::Fatigue => &mut self.fatigue,
            Stat::Cold => &mut self.cold,
            Stat::Morale => &mut self.morale,
            Stat::Respect => &mut self.respect,
        }
    }

    /// Builder-style setter, mostly for tests and fixtures.
    pub fn with(mut self, stat: Stat, value: i32) -> Self {
        *self.slot(stat) = value;
        self
    }

    /// Value clamped into `[0, cap]` for display.
    pub fn displayed(&self, stat: Stat) -> i32 {
        self.get(stat).clamp(0, stat.cap())
    }

    /// Displayed value as a fraction of the cap (0.0 to 1.0).
    pub fn fraction(&self, stat: Stat) -> f64 {
        f64::from(self.displayed(stat)) / f64::from(stat.cap())
    }

    /// Iterate `(stat, raw value)` in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    /// Add every recognized delta of `effect` without recording a snapshot.
    ///
    /// Sums saturate at the `i32` bounds.
    pub fn accumulate(&mut self, effect: &Effect) {
        for (stat, delta) in effect.recognized() {
            let slot = self.slot(stat);
            *slot = slot.saturating_add(delta);
        }
    }

    /// Apply an effect and return the before/after snapshot.
    ///
    /// Unrecognized keys are skipped. No clamping happens here.
    pub fn apply(&mut self, effect: &Effect) -> StatChange {
        let before = *self;
        self.accumulate(effect);
        log::debug!("applied effect [{effect}]");
        StatChange {
            before,
            after: *self,
        }
    }
}

/// Direction a displayed bar moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// The displayed value went up.
    Rising,
    /// The displayed value went down.
    Falling,
    /// The displayed value did not move.
    Steady,
}

/// The ledger before and after one application of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChange {
    /// Ledger before the effect.
    pub before: StatLedger,
    /// Ledger after the effect.
    pub after: StatLedger,
}

impl StatChange {
    /// Raw difference for a stat.
    pub fn delta(&self, stat: Stat) -> i32 {
        self.after.get(stat).saturating_sub(self.before.get(stat))
    }

    /// How the displayed (clamped) value moved.
    pub fn trend(&self, stat: Stat) -> Trend {
        let old = self.before.displayed(stat);
        let new = self.after.displayed(stat);
        match new.cmp(&old) {
            std::cmp::Ordering::Greater => Trend::Rising,
            std::cmp::Ordering::Less => Trend::Falling,
            std::cmp::Ordering::Equal => Trend::Steady,
        }
    }

    /// Stats whose displayed value moved.
    pub fn moved(&self) -> impl Iterator<Item = (Stat, Trend)> + '_ {
        Stat::ALL
            .into_iter()
            .map(|s| (s, self.trend(s)))
            .filter(|(_, t)| *t != Trend::Steady)
    }
}
