//! Persistence snapshot and the store it is written to.
//!
//! The session serializes itself into a [`SaveData`] JSON document and hands
//! the raw text to a [`SaveStore`]. Parsing happens on the way back in, so a
//! store never needs to understand the format.

use serde::{Deserialize, Serialize};
use wild_core::StatLedger;

use crate::error::{StoryError, StoryResult};
use crate::path_log::PathLog;
use crate::scene::SceneId;
use crate::score::ChapterScores;
use crate::session::Advance;

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Everything needed to resume a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    /// Raw ledger.
    pub stats: StatLedger,
    /// Scene the run was in; `None` if it had not started.
    pub current_scene_id: Option<SceneId>,
    /// Choices and moves so far.
    #[serde(default)]
    pub path_log: PathLog,
    /// Per-chapter totals.
    #[serde(default)]
    pub chapter_scores: ChapterScores,
    /// Presentation theme.
    #[serde(default)]
    pub theme: Theme,
}

impl SaveData {
    /// Serialize to JSON.
    pub fn to_json(&self) -> StoryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse saved JSON. Any failure is reported as a corrupt save.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        serde_json::from_str(json).map_err(|e| StoryError::CorruptSave(e.to_string()))
    }
}

/// Where save data lives.
pub trait SaveStore {
    /// Replace the stored save.
    fn write(&mut self, data: &str) -> StoryResult<()>;

    /// The stored save, or `None` if there is none.
    fn read(&self) -> StoryResult<Option<String>>;
}

/// A single in-memory save slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with raw text.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
        }
    }

    /// The raw stored text.
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn write(&mut self, data: &str) -> StoryResult<()> {
        self.slot = Some(data.to_string());
        Ok(())
    }

    fn read(&self) -> StoryResult<Option<String>> {
        Ok(self.slot.clone())
    }
}

/// Result of a load request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The store was empty; nothing changed.
    NothingToLoad,
    /// State was restored and the saved scene re-entered.
    Restored(Advance),
}
