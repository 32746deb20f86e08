//! Error types for battle resolution.

use crate::moves::MoveCategory;

/// Errors that can occur while configuring or running a battle.
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    /// No enemy is registered under this key.
    #[error("unknown enemy: {0}")]
    UnknownEnemy(String),

    /// An enemy configuration cannot be fought.
    #[error("invalid enemy '{name}': {reason}")]
    InvalidEnemy {
        /// Enemy key or display name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A move index is out of range for its category.
    #[error("no {category} move #{index}")]
    InvalidMove {
        /// The category that was asked for.
        category: MoveCategory,
        /// The out-of-range index (0-based).
        index: usize,
    },

    /// A move category name could not be parsed.
    #[error("unknown move category: {0}")]
    UnknownCategory(String),

    /// A player move was submitted outside the player's turn.
    #[error("it is not the player's turn")]
    NotPlayersTurn,

    /// An enemy turn was requested outside the enemy's turn.
    #[error("it is not the enemy's turn")]
    NotEnemysTurn,
}

/// Convenience result type for battle operations.
pub type BattleResult<T> = Result<T, BattleError>;
