//! Ending classification and the end-of-run report.

use serde::{Deserialize, Serialize};
use wild_core::{Stat, StatLedger};

use crate::path_log::PathLog;

/// Survival above this earns the legendary-survivor ending.
pub const LEGEND_SURVIVAL: i32 = 12;

/// The four ways a run can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ending {
    /// Leads the wolf pack.
    WildLeader,
    /// Stays with Thornton.
    LoyalCompanion,
    /// Becomes a legend of the north.
    LegendarySurvivor,
    /// Disappears into the wilderness.
    FadeAway,
}

impl Ending {
    /// Classify raw final stats. The first matching rule wins.
    pub fn classify(ledger: &StatLedger) -> Self {
        let (wild, loyal, survival) = (ledger.wildness, ledger.loyalty, ledger.survival);
        if wild > loyal && wild > survival {
            Self::WildLeader
        } else if loyal > wild {
            Self::LoyalCompanion
        } else if survival > LEGEND_SURVIVAL {
            Self::LegendarySurvivor
        } else {
            Self::FadeAway
        }
    }

    /// Closing narration.
    pub fn text(self, hero: &str) -> String {
        match self {
            Self::WildLeader => {
                format!("{hero} answers the call and becomes leader of the wild pack.")
            }
            Self::LoyalCompanion => {
                format!("{hero} stays loyal to John Thornton, choosing love over the wild.")
            }
            Self::LegendarySurvivor => {
                format!("{hero} becomes a northern legend, feared and respected.")
            }
            Self::FadeAway => format!("{hero} fades quietly into the wilderness, his fate unknown."),
        }
    }
}

/// Everything shown when the run ends.
#[derive(Debug, Clone, PartialEq)]
pub struct EndingReport {
    /// The classified ending.
    pub ending: Ending,
    /// Closing narration.
    pub text: String,
    /// Path log, one line per entry.
    pub path: Vec<String>,
    /// Raw final stats.
    pub stats: StatLedger,
    /// Question for the reader.
    pub reflection: String,
}

impl EndingReport {
    /// Build the report from final state.
    pub fn new(ledger: &StatLedger, path: &PathLog, hero: &str) -> Self {
        let ending = Ending::classify(ledger);
        Self {
            ending,
            text: ending.text(hero),
            path: path.lines(),
            stats: *ledger,
            reflection: format!(
                "How did {hero} change between home, the sled team, Thornton, and the final call of the wild?"
            ),
        }
    }

    /// Plain-text rendering.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n\n", self.text));
        out.push_str("Trail Summary - Choices Made:\n");
        for line in &self.path {
            out.push_str(&format!("{line}\n"));
        }
        out.push('\n');
        out.push_str("Final Stats:\n");
        for stat in Stat::ALL {
            out.push_str(&format!("{}: {}\n", stat.label(), self.stats.get(stat)));
        }
        out.push('\n');
        out.push_str("Reflection Prompt:\n");
        out.push_str(&self.reflection);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(wildness: i32, loyalty: i32, survival: i32) -> StatLedger {
        StatLedger {
            wildness,
            loyalty,
            survival,
            ..StatLedger::new()
        }
    }

    #[test]
    fn classification() {
        assert_eq!(Ending::classify(&stats(10, 5, 5)), Ending::WildLeader);
        assert_eq!(Ending::classify(&stats(5, 10, 5)), Ending::LoyalCompanion);
        assert_eq!(Ending::classify(&stats(5, 5, 13)), Ending::LegendarySurvivor);
        assert_eq!(Ending::classify(&stats(5, 5, 5)), Ending::FadeAway);
    }

    #[test]
    fn ties_fall_through() {
        // wildness ties survival: not a leader, and loyalty is lower.
        assert_eq!(Ending::classify(&stats(13, 2, 13)), Ending::LegendarySurvivor);
        assert_eq!(Ending::classify(&stats(12, 2, 12)), Ending::FadeAway);
        // loyalty beats wildness even when survival is highest.
        assert_eq!(Ending::classify(&stats(3, 4, 20)), Ending::LoyalCompanion);
    }

    #[test]
    fn raw_values_beyond_the_cap_still_count() {
        assert_eq!(Ending::classify(&stats(31, 25, 22)), Ending::WildLeader);
        assert_eq!(Ending::classify(&stats(-4, -2, -9)), Ending::LoyalCompanion);
    }

    #[test]
    fn report_rendering() {
        let mut path = PathLog::new();
        path.record(0, 1, "A prisoner, angry and wild");
        path.record(4, 1, "[BATTLE] Savage Leap");
        let report = EndingReport::new(&stats(9, 3, 4), &path, "Buck");
        insta::assert_snapshot!(report.render(), @r"
        Buck answers the call and becomes leader of the wild pack.

        Trail Summary - Choices Made:
        Chapter 1, Scene 0: A prisoner, angry and wild
        Chapter 1, Scene 4: [BATTLE] Savage Leap

        Final Stats:
        Wildness: 9
        Loyalty: 3
        Survival: 4
        Hunger: 5
        Fatigue: 0
        Cold: 0
        Morale: 5
        Pack Respect: 0

        Reflection Prompt:
        How did Buck change between home, the sled team, Thornton, and the final call of the wild?
        ");
    }

    #[test]
    fn empty_path_keeps_every_section() {
        let report = EndingReport::new(&stats(5, 5, 5), &PathLog::new(), "Buck");
        let text = report.render();
        assert!(text.starts_with("Buck fades quietly into the wilderness"));
        assert!(text.contains("\n\nTrail Summary - Choices Made:\n\nFinal Stats:\n"));
        assert!(text.ends_with(&report.reflection));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn hero_name_is_substituted() {
        assert_eq!(
            Ending::LegendarySurvivor.text("Spitz"),
            "Spitz becomes a northern legend, feared and respected."
        );
    }
}
