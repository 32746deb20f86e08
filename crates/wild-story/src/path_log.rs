//! Append-only record of every choice and battle move.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scene::SceneId;

/// One action the player took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathEntry {
    /// Scene the action was taken in.
    pub scene_id: SceneId,
    /// That scene's chapter.
    pub chapter: u32,
    /// Choice text, or `[BATTLE] <move>` for battle moves.
    pub choice: String,
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chapter {}, Scene {}: {}",
            self.chapter, self.scene_id, self.choice
        )
    }
}

/// Ordered path log. Entries are never mutated or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathLog {
    entries: Vec<PathEntry>,
}

impl PathLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&mut self, scene_id: SceneId, chapter: u32, choice: impl Into<String>) {
        self.entries.push(PathEntry {
            scene_id,
            chapter,
            choice: choice.into(),
        });
    }

    /// All entries in order.
    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&PathEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One rendered line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
