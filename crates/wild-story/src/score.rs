//! Per-chapter effect totals.
//!
//! Only choice effects and battle buffs/outcomes are attributed to chapters.
//! Random events and ambient drift move the ledger but not these totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wild_core::{Effect, StatLedger};

/// Accumulated deltas per chapter. Accumulate-only within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterScores {
    chapters: BTreeMap<u32, StatLedger>,
}

impl ChapterScores {
    /// No chapters recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the recognized keys of `effect` to `chapter`'s totals.
    ///
    /// The chapter's accumulator is created on first use even if `effect`
    /// carries nothing recognized.
    pub fn record(&mut self, chapter: u32, effect: &Effect) {
        self.chapters
            .entry(chapter)
            .or_insert_with(StatLedger::zeroed)
            .accumulate(effect);
    }

    /// Totals for a chapter, if anything was recorded.
    pub fn get(&self, chapter: u32) -> Option<&StatLedger> {
        self.chapters.get(&chapter)
    }

    /// Recorded chapters in order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &StatLedger)> + '_ {
        self.chapters.iter().map(|(c, l)| (*c, l))
    }

    /// Number of chapters with an accumulator.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Summary text for a chapter: a header line then one `key: +n` line per
    /// non-zero total.
    pub fn summary(&self, chapter: u32) -> Option<String> {
        let totals = self.get(chapter)?;
        let mut text = format!("Chapter {chapter} Summary:");
        for (stat, value) in totals.iter().filter(|(_, v)| *v != 0) {
            text.push_str(&format!("\n{}: {value:+}", stat.key()));
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use wild_core::Stat;

    use super::*;

    #[test]
    fn lazily_created() {
        let mut scores = ChapterScores::new();
        assert!(scores.summary(1).is_none());
        scores.record(1, &Effect::new().with_key("courage", 3));
        assert_eq!(scores.get(1), Some(&StatLedger::zeroed()));
        assert_eq!(scores.summary(1).unwrap(), "Chapter 1 Summary:");
    }

    #[test]
    fn summary_lists_non_zero_totals() {
        let mut scores = ChapterScores::new();
        scores.record(2, &Effect::from_pairs(&[(Stat::Wildness, 2), (Stat::Morale, -1)]));
        scores.record(2, &Effect::from_pairs(&[(Stat::Loyalty, 1), (Stat::Morale, 1)]));
        insta::assert_snapshot!(scores.summary(2).unwrap(), @r"
        Chapter 2 Summary:
        wildness: +2
        loyalty: +1
        ");
    }

    #[test]
    fn chapters_are_independent() {
        let mut scores = ChapterScores::new();
        scores.record(1, &Effect::new().with(Stat::Survival, 2));
        scores.record(3, &Effect::new().with(Stat::Survival, -1));
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get(1).unwrap().survival, 2);
        assert_eq!(scores.get(3).unwrap().survival, -1);
        assert!(scores.get(2).is_none());
    }

    #[test]
    fn serde_uses_chapter_keys() {
        let mut scores = ChapterScores::new();
        scores.record(4, &Effect::new().with(Stat::Respect, 2));
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json["4"]["respect"], 2);
        let back: ChapterScores = serde_json::from_value(json).unwrap();
        assert_eq!(back, scores);
    }

    proptest! {
        #[test]
        fn totals_match_the_sum_of_recorded_deltas(
            deltas in proptest::collection::vec((1u32..4, -3i32..4), 0..40)
        ) {
            let mut scores = ChapterScores::new();
            let mut expected = BTreeMap::new();
            for (chapter, delta) in &deltas {
                let before = scores.len();
                scores.record(*chapter, &Effect::new().with(Stat::Wildness, *delta));
                prop_assert!(scores.len() >= before);
                *expected.entry(*chapter).or_insert(0) += delta;
            }
            for (chapter, total) in expected {
                prop_assert_eq!(scores.get(chapter).map(|l| l.wildness), Some(total));
            }
        }
    }
}
