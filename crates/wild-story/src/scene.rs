//! Scenes, choices and transition targets.
//!
//! Scenes are immutable once loaded. A story scene offers choices; a battle
//! scene names an enemy and where to go on victory or defeat.

use std::fmt;

use serde::{Deserialize, Serialize};
use wild_core::{Effect, StatLedger};

use crate::condition::Condition;

/// Scene identifier.
pub type SceneId = u32;

/// Where a transition leads: a scene or the terminal ending marker.
///
/// Serialized as a bare number or the string `"end"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TargetRepr", into = "TargetRepr")]
pub enum SceneTarget {
    /// Another scene.
    Scene(SceneId),
    /// The end of the run.
    End,
}

impl SceneTarget {
    /// The scene id, unless this is the ending marker.
    pub fn scene(self) -> Option<SceneId> {
        match self {
            Self::Scene(id) => Some(id),
            Self::End => None,
        }
    }
}

impl From<SceneId> for SceneTarget {
    fn from(id: SceneId) -> Self {
        Self::Scene(id)
    }
}

impl fmt::Display for SceneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene(id) => write!(f, "{id}"),
            Self::End => write!(f, "end"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Id(SceneId),
    Marker(String),
}

impl TryFrom<TargetRepr> for SceneTarget {
    type Error = String;

    fn try_from(repr: TargetRepr) -> Result<Self, Self::Error> {
        match repr {
            TargetRepr::Id(id) => Ok(Self::Scene(id)),
            TargetRepr::Marker(m) if m == "end" => Ok(Self::End),
            TargetRepr::Marker(m) => Err(format!("unknown scene marker '{m}'")),
        }
    }
}

impl From<SceneTarget> for TargetRepr {
    fn from(target: SceneTarget) -> Self {
        match target {
            SceneTarget::Scene(id) => Self::Id(id),
            SceneTarget::End => Self::Marker("end".to_string()),
        }
    }
}

/// A conditional successor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Predicate over raw stats.
    pub condition: Condition,
    /// Target taken when the predicate holds.
    pub next: SceneTarget,
}

/// One option offered by a story scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Label shown to the player.
    pub text: String,
    /// Stat deltas applied when chosen.
    #[serde(default, rename = "effects", skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// Fallback successor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<SceneTarget>,
    /// Ordered conditional successors; the first match wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_by_stats: Vec<Branch>,
}

impl Choice {
    /// A choice with no effect and no successor yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            effect: None,
            next: None,
            next_by_stats: Vec::new(),
        }
    }

    /// Set the fallback successor.
    pub fn to(mut self, next: impl Into<SceneTarget>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Set the stat effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Append a conditional successor.
    pub fn branch(mut self, condition: Condition, next: impl Into<SceneTarget>) -> Self {
        self.next_by_stats.push(Branch {
            condition,
            next: next.into(),
        });
        self
    }

    /// The successor for the given ledger: first matching branch, else the
    /// fallback. `None` only when nothing matches and there is no fallback.
    pub fn resolve_next(&self, ledger: &StatLedger) -> Option<SceneTarget> {
        self.next_by_stats
            .iter()
            .find(|b| b.condition.evaluate(ledger))
            .map(|b| b.next)
            .or(self.next)
    }

    /// Every target this choice can lead to.
    pub fn targets(&self) -> impl Iterator<Item = SceneTarget> + '_ {
        self.next_by_stats
            .iter()
            .map(|b| b.next)
            .chain(self.next)
    }
}

/// What a scene asks of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SceneKind {
    /// Pick one of several choices.
    Story {
        /// Offered choices, in display order.
        choices: Vec<Choice>,
    },
    /// Fight an enemy.
    Battle {
        /// Key into the enemy roster.
        enemy: String,
        /// Successor on victory.
        next_win: SceneTarget,
        /// Successor on defeat.
        next_lose: SceneTarget,
    },
}

/// A node of the story graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique id.
    pub id: SceneId,
    /// Chapter number.
    pub chapter: u32,
    /// Chapter title.
    pub chapter_title: String,
    /// Narrative text.
    pub text: String,
    /// Story or battle payload.
    #[serde(flatten)]
    pub kind: SceneKind,
}

impl Scene {
    /// A story scene.
    pub fn story(
        id: SceneId,
        chapter: u32,
        chapter_title: impl Into<String>,
        text: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            id,
            chapter,
            chapter_title: chapter_title.into(),
            text: text.into(),
            kind: SceneKind::Story { choices },
        }
    }

    /// A battle scene.
    pub fn battle(
        id: SceneId,
        chapter: u32,
        chapter_title: impl Into<String>,
        text: impl Into<String>,
        enemy: impl Into<String>,
        next_win: impl Into<SceneTarget>,
        next_lose: impl Into<SceneTarget>,
    ) -> Self {
        Self {
            id,
            chapter,
            chapter_title: chapter_title.into(),
            text: text.into(),
            kind: SceneKind::Battle {
                enemy: enemy.into(),
                next_win: next_win.into(),
                next_lose: next_lose.into(),
            },
        }
    }

    /// Choices offered; empty for battle scenes.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            SceneKind::Story { choices } => choices,
            SceneKind::Battle { .. } => &[],
        }
    }

    /// Whether this is a battle scene.
    pub fn is_battle(&self) -> bool {
        matches!(self.kind, SceneKind::Battle { .. })
    }

    /// Every target reachable in one step.
    pub fn successors(&self) -> Vec<SceneTarget> {
        match &self.kind {
            SceneKind::Story { choices } => choices.iter().flat_map(Choice::targets).collect(),
            SceneKind::Battle {
                next_win,
                next_lose,
                ..
            } => vec![*next_win, *next_lose],
        }
    }
}
