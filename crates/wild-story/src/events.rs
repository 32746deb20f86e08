//! Random trail events.
//!
//! Entering a story scene draws once from the roll source. Six bands of
//! width 0.15 each select an event; draws of 0.90 and above select nothing.

use wild_core::{Effect, RollSource, Stat};

/// Upper bound (exclusive) of each event's band, in [`EventKind::ALL`] order.
const BAND_LIMITS: [f64; 6] = [0.15, 0.30, 0.45, 0.60, 0.75, 0.90];

/// One of the six trail events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Cold snap.
    Blizzard,
    /// Found food.
    Carcass,
    /// A young wolf backs down.
    WolfChallenge,
    /// Fall on hidden ice.
    IceSlip,
    /// Aurora overhead.
    NorthernLights,
    /// The sled tips over.
    SledOverturn,
}

impl EventKind {
    /// Every event, in band order.
    pub const ALL: [EventKind; 6] = [
        EventKind::Blizzard,
        EventKind::Carcass,
        EventKind::WolfChallenge,
        EventKind::IceSlip,
        EventKind::NorthernLights,
        EventKind::SledOverturn,
    ];

    /// Narrative line appended to the scene.
    pub fn text(self) -> &'static str {
        match self {
            Self::Blizzard => "A sudden blizzard sweeps across the trail. The cold bites deep.",
            Self::Carcass => "You find a frozen carcass beneath the snow. A rare meal.",
            Self::WolfChallenge => "A young wolf challenges you, then backs down. The pack watches.",
            Self::IceSlip => "You slip on hidden ice and crash into the traces.",
            Self::NorthernLights => {
                "The northern lights shimmer above. Something in you feels lighter."
            }
            Self::SledOverturn => "The sled overturns in deep snow. The work is brutal.",
        }
    }

    /// Stat deltas the event applies.
    pub fn effect(self) -> Effect {
        let pairs: &[(Stat, i32)] = match self {
            Self::Blizzard => &[(Stat::Cold, 2), (Stat::Fatigue, 1)],
            Self::Carcass => &[(Stat::Hunger, -2), (Stat::Survival, 1)],
            Self::WolfChallenge => &[(Stat::Respect, 2), (Stat::Wildness, 1)],
            Self::IceSlip => &[(Stat::Fatigue, 2), (Stat::Survival, -1)],
            Self::NorthernLights => &[(Stat::Morale, 2)],
            Self::SledOverturn => &[(Stat::Fatigue, 1), (Stat::Survival, -1), (Stat::Respect, 1)],
        };
        Effect::from_pairs(pairs)
    }

    /// The event selected by a draw in `[0, 1)`, if any.
    pub fn for_draw(draw: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .zip(BAND_LIMITS)
            .find(|(_, limit)| draw < *limit)
            .map(|(kind, _)| kind)
    }

    /// Draw once and select an event.
    pub fn roll(rolls: &mut dyn RollSource) -> Option<Self> {
        let draw = rolls.next_unit();
        let event = Self::for_draw(draw);
        log::debug!("event roll {draw:.3} -> {event:?}");
        event
    }
}

#[cfg(test)]
mod tests {
    use wild_core::{ScriptedRolls, StdRoller};

    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(EventKind::for_draw(0.0), Some(EventKind::Blizzard));
        assert_eq!(EventKind::for_draw(0.1499), Some(EventKind::Blizzard));
        assert_eq!(EventKind::for_draw(0.15), Some(EventKind::Carcass));
        assert_eq!(EventKind::for_draw(0.30), Some(EventKind::WolfChallenge));
        assert_eq!(EventKind::for_draw(0.45), Some(EventKind::IceSlip));
        assert_eq!(EventKind::for_draw(0.60), Some(EventKind::NorthernLights));
        assert_eq!(EventKind::for_draw(0.75), Some(EventKind::SledOverturn));
        assert_eq!(EventKind::for_draw(0.8999), Some(EventKind::SledOverturn));
        assert_eq!(EventKind::for_draw(0.90), None);
        assert_eq!(EventKind::for_draw(0.9999), None);
    }

    #[test]
    fn effects() {
        assert_eq!(EventKind::Carcass.effect().get(Stat::Hunger), -2);
        assert_eq!(EventKind::Carcass.effect().get(Stat::Survival), 1);
        assert_eq!(EventKind::SledOverturn.effect().len(), 3);
        assert_eq!(EventKind::NorthernLights.effect().get(Stat::Morale), 2);
    }

    #[test]
    fn roll_consumes_one_draw() {
        let mut rolls = ScriptedRolls::new([0.5, 0.95]);
        assert_eq!(EventKind::roll(&mut rolls), Some(EventKind::IceSlip));
        assert_eq!(rolls.remaining(), 1);
        assert_eq!(EventKind::roll(&mut rolls), None);
    }

    #[test]
    fn long_run_frequencies() {
        let mut rolls = StdRoller::seeded(42);
        let trials = 60_000;
        let mut counts = [0usize; 7];
        for _ in 0..trials {
            let slot = match EventKind::roll(&mut rolls) {
                Some(kind) => EventKind::ALL.iter().position(|k| *k == kind).unwrap_or(6),
                None => 6,
            };
            counts[slot] += 1;
        }
        for count in &counts[..6] {
            let share = *count as f64 / trials as f64;
            assert!((share - 0.15).abs() < 0.01, "share {share}");
        }
        let none = counts[6] as f64 / trials as f64;
        assert!((none - 0.10).abs() < 0.01, "none {none}");
    }
}
