//! Day and night.
//!
//! Story scenes with an even id happen at night, odd ids by day. Battles are
//! always at night. Entering a story scene nudges the stats toward its time of
//! day, but never past the display cap of the drifted stat.

use wild_core::{Effect, MAX_SIMPLE, Stat, StatLedger};

use crate::scene::Scene;

/// Time of day of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// Day: morale drifts up.
    Day,
    /// Night: cold and fatigue drift up.
    Night,
}

impl TimeOfDay {
    /// Time of day for a scene.
    pub fn of(scene: &Scene) -> Self {
        if scene.is_battle() || scene.id % 2 == 0 {
            Self::Night
        } else {
            Self::Day
        }
    }

    /// Stats that drift at this time of day.
    pub fn drifting(self) -> &'static [Stat] {
        match self {
            Self::Day => &[Stat::Morale],
            Self::Night => &[Stat::Cold, Stat::Fatigue],
        }
    }
}

/// The drift applied on entering `scene`, or `None` for battles.
///
/// Each drifted stat moves to `min(10, v + 1)`, so a value already above the
/// cap drifts down to it.
pub fn drift(scene: &Scene, ledger: &StatLedger) -> Option<Effect> {
    if scene.is_battle() {
        return None;
    }
    let effect: Effect = TimeOfDay::of(scene)
        .drifting()
        .iter()
        .map(|&stat| {
            let v = ledger.get(stat);
            (stat, v.saturating_add(1).min(MAX_SIMPLE).saturating_sub(v))
        })
        .filter(|(_, delta)| *delta != 0)
        .collect();
    (!effect.is_empty()).then_some(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Choice;

    fn story(id: u32) -> Scene {
        Scene::story(id, 1, "One", "", vec![Choice::new("x").to(0)])
    }

    #[test]
    fn parity_decides_time_of_day() {
        assert_eq!(TimeOfDay::of(&story(4)), TimeOfDay::Night);
        assert_eq!(TimeOfDay::of(&story(7)), TimeOfDay::Day);
        let battle = Scene::battle(5, 1, "One", "", "spitz", 0, 0);
        assert_eq!(TimeOfDay::of(&battle), TimeOfDay::Night);
    }

    #[test]
    fn night_raises_cold_and_fatigue() {
        let ledger = StatLedger::new();
        let effect = drift(&story(0), &ledger).unwrap();
        assert_eq!(effect.get(Stat::Cold), 1);
        assert_eq!(effect.get(Stat::Fatigue), 1);
        assert_eq!(effect.get(Stat::Morale), 0);
    }

    #[test]
    fn day_raises_morale() {
        let effect = drift(&story(1), &StatLedger::new()).unwrap();
        assert_eq!(effect.get(Stat::Morale), 1);
        assert_eq!(effect.len(), 1);
    }

    #[test]
    fn drift_stops_at_the_cap() {
        let ledger = StatLedger::new().with(Stat::Cold, 10).with(Stat::Fatigue, 9);
        let effect = drift(&story(2), &ledger).unwrap();
        assert_eq!(effect.get(Stat::Cold), 0);
        assert_eq!(effect.get(Stat::Fatigue), 1);

        let full = StatLedger::new().with(Stat::Cold, 10).with(Stat::Fatigue, 10);
        assert!(drift(&story(2), &full).is_none());
    }

    #[test]
    fn drift_pulls_overflow_back_to_the_cap() {
        let ledger = StatLedger::new().with(Stat::Morale, 13);
        let effect = drift(&story(3), &ledger).unwrap();
        assert_eq!(effect.get(Stat::Morale), -3);
    }

    #[test]
    fn drift_at_integer_bounds() {
        let low = StatLedger::new().with(Stat::Morale, i32::MIN);
        assert_eq!(drift(&story(1), &low).unwrap().get(Stat::Morale), 1);

        let high = StatLedger::new().with(Stat::Cold, i32::MAX).with(Stat::Fatigue, 10);
        let effect = drift(&story(2), &high).unwrap();
        assert_eq!(effect.get(Stat::Cold), 10 - i32::MAX);
        let mut pulled = high;
        pulled.apply(&effect);
        assert_eq!(pulled.cold, 10);
    }

    #[test]
    fn battles_do_not_drift() {
        let battle = Scene::battle(4, 1, "One", "", "spitz", 0, 0);
        assert!(drift(&battle, &StatLedger::new()).is_none());
    }
}
