//! Stat predicates that gate conditional branches.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use wild_core::{Stat, StatLedger};

/// Assignments beyond this many are not enumerated by [`Condition::covers_all`].
const MAX_ASSIGNMENTS: usize = 1 << 16;

/// A predicate over raw stat values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// `stat >= value`.
    AtLeast {
        /// Stat to test.
        stat: Stat,
        /// Inclusive lower bound.
        value: i32,
    },
    /// `stat < value`.
    Below {
        /// Stat to test.
        stat: Stat,
        /// Exclusive upper bound.
        value: i32,
    },
    /// Negation.
    Not(Box<Condition>),
    /// All must hold.
    And(Vec<Condition>),
    /// At least one must hold.
    Or(Vec<Condition>),
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// `stat >= value`.
    pub fn at_least(stat: Stat, value: i32) -> Self {
        Self::AtLeast { stat, value }
    }

    /// `stat < value`.
    pub fn below(stat: Stat, value: i32) -> Self {
        Self::Below { stat, value }
    }

    /// Evaluate against raw ledger values.
    pub fn evaluate(&self, ledger: &StatLedger) -> bool {
        match self {
            Self::AtLeast { stat, value } => ledger.get(*stat) >= *value,
            Self::Below { stat, value } => ledger.get(*stat) < *value,
            Self::Not(inner) => !inner.evaluate(ledger),
            Self::And(all) => all.iter().all(|c| c.evaluate(ledger)),
            Self::Or(any) => any.iter().any(|c| c.evaluate(ledger)),
            Self::Always => true,
        }
    }

    /// Collect every `(stat, threshold)` this condition compares against.
    pub fn thresholds(&self, out: &mut BTreeMap<Stat, BTreeSet<i32>>) {
        match self {
            Self::AtLeast { stat, value } | Self::Below { stat, value } => {
                out.entry(*stat).or_default().insert(*value);
            }
            Self::Not(inner) => inner.thresholds(out),
            Self::And(list) | Self::Or(list) => {
                for c in list {
                    c.thresholds(out);
                }
            }
            Self::Always => {}
        }
    }

    /// Whether at least one of `conditions` holds for every possible ledger.
    ///
    /// Every atom is a single integer comparison, so the truth of the list
    /// only changes at thresholds. Testing `t - 1` and `t` for each threshold
    /// visits every region. Returns `false` if the search space is too large
    /// to enumerate.
    pub fn covers_all(conditions: &[Condition]) -> bool {
        let mut thresholds = BTreeMap::new();
        for c in conditions {
            c.thresholds(&mut thresholds);
        }

        let axes: Vec<(Stat, Vec<i32>)> = thresholds
            .into_iter()
            .map(|(stat, ts)| {
                let mut points = BTreeSet::new();
                for t in ts {
                    points.insert(t.saturating_sub(1));
                    points.insert(t);
                }
                (stat, points.into_iter().collect())
            })
            .collect();

        let total = axes
            .iter()
            .try_fold(1usize, |acc, (_, points)| acc.checked_mul(points.len()));
        let Some(total) = total.filter(|n| *n <= MAX_ASSIGNMENTS) else {
            log::warn!("branch coverage check skipped: too many stat combinations");
            return false;
        };

        let mut cursor = vec![0usize; axes.len()];
        for _ in 0..total {
            let ledger = axes
                .iter()
                .zip(&cursor)
                .fold(StatLedger::zeroed(), |l, ((stat, points), &i)| {
                    l.with(*stat, points[i])
                });
            if !conditions.iter().any(|c| c.evaluate(&ledger)) {
                return false;
            }
            for (slot, (_, points)) in cursor.iter_mut().zip(&axes) {
                *slot += 1;
                if *slot < points.len() {
                    break;
                }
                *slot = 0;
            }
        }
        true
    }
}
