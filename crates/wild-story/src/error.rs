//! Error types for the narrative engine.

use thiserror::Error;
use wild_battle::BattleError;

use crate::scene::SceneId;

/// Result type for narrative operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading or playing a story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The scene graph failed validation.
    #[error("invalid scene graph: {}", summarize(.0))]
    InvalidGraph(Vec<GraphIssue>),

    /// A scene id is not in the graph.
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),

    /// No branch matched and the choice has no fallback.
    #[error("choice {choice} of scene {scene} has no matching branch and no fallback")]
    UnresolvableChoice {
        /// Scene holding the choice.
        scene: SceneId,
        /// 0-based choice index.
        choice: usize,
    },

    /// The choice index is out of range for the current scene.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// The session has not entered any scene yet.
    #[error("the story has not started")]
    NotStarted,

    /// Choices are not available while a battle is running.
    #[error("a battle is in progress")]
    InBattle,

    /// A battle move was submitted outside of a battle.
    #[error("no battle in progress")]
    NotInBattle,

    /// The ending has been reached; nothing more can happen.
    #[error("the run is over")]
    RunOver,

    /// Saved data could not be understood.
    #[error("nothing to restore: {0}")]
    CorruptSave(String),

    /// The save store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Battle error.
    #[error(transparent)]
    Battle(#[from] BattleError),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A problem found while validating a scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphIssue {
    /// Two scenes share an id.
    #[error("duplicate scene id {0}")]
    DuplicateScene(SceneId),

    /// The start scene does not exist.
    #[error("start scene {0} does not exist")]
    MissingStart(SceneId),

    /// A transition points at a scene that does not exist.
    #[error("scene {scene} points at unknown scene {target}")]
    DanglingTarget {
        /// Scene holding the transition.
        scene: SceneId,
        /// The missing target.
        target: SceneId,
    },

    /// A story scene offers no choices.
    #[error("story scene {0} has no choices")]
    EmptyScene(SceneId),

    /// A choice has neither a fixed next scene nor branches.
    #[error("choice {choice} of scene {scene} leads nowhere")]
    NoSuccessor {
        /// Scene holding the choice.
        scene: SceneId,
        /// 0-based choice index.
        choice: usize,
    },

    /// A choice's branches can all be false and there is no fallback.
    #[error("choice {choice} of scene {scene} has branches that do not cover every case and no fallback")]
    NonExhaustiveBranches {
        /// Scene holding the choice.
        scene: SceneId,
        /// 0-based choice index.
        choice: usize,
    },

    /// A battle scene names an enemy the roster does not have.
    #[error("battle scene {scene} references unknown enemy '{enemy}'")]
    UnknownEnemy {
        /// The battle scene.
        scene: SceneId,
        /// The missing enemy key.
        enemy: String,
    },

    /// An enemy in the roster cannot be fought.
    #[error("{0}")]
    InvalidEnemy(String),
}

fn summarize(issues: &[GraphIssue]) -> String {
    match issues {
        [] => "no issues".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
