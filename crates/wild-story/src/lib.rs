//! Branching narrative engine for Wildcall.
//!
//! A story is a [`SceneGraph`] of immutable scenes keyed by id. Story scenes
//! offer choices whose effects flow into the stat ledger; battle scenes hand
//! control to `wild-battle` until one side falls. A [`StorySession`] threads
//! the whole run through one explicit context: ledger, current scene, battle,
//! path log, chapter scores and any pending paced continuation.

/// Ambient day/night drift on scene entry.
pub mod ambient;
/// Stat predicates for conditional branches.
pub mod condition;
/// Session configuration.
pub mod config;
/// The built-in "Call of the Wild" story.
pub mod content;
/// Ending classification and the end-of-run report.
pub mod ending;
/// Error types for the narrative engine.
pub mod error;
/// Random trail events rolled on story scene entry.
pub mod events;
/// The validated scene graph.
pub mod graph;
/// Deferred continuations and the pacer that waits on them.
pub mod pacing;
/// Append-only record of every choice and move.
pub mod path_log;
/// Persistence snapshot and store abstraction.
pub mod save;
/// Scene, choice and target records.
pub mod scene;
/// Per-chapter effect totals.
pub mod score;
/// The story session engine.
pub mod session;

pub use condition::Condition;
pub use config::StoryConfig;
pub use ending::{Ending, EndingReport};
pub use error::{GraphIssue, StoryError, StoryResult};
pub use events::EventKind;
pub use graph::{SceneGraph, StoryFile};
pub use pacing::{InstantPacer, Pacer, Pending, ThreadPacer};
pub use path_log::{PathEntry, PathLog};
pub use save::{LoadOutcome, MemoryStore, SaveData, SaveStore, Theme};
pub use scene::{Branch, Choice, Scene, SceneId, SceneKind, SceneTarget};
pub use score::ChapterScores;
pub use session::{
    Advance, BattleView, ChangeCause, SceneBody, SceneView, StoryEvent, StorySession,
};
