//! Turn-based battle resolution for Wildcall.
//!
//! A battle pits the protagonist against one configured enemy. The hero
//! always starts at 100 HP; the enemy starts at its configured maximum.
//! Player moves come from a fixed table grouped by [`MoveCategory`]. Damage
//! is shaped by the hero's current stats: morale raises the crit chance,
//! fatigue dampens outgoing damage, cold above 5 drains HP every player
//! turn, and pack respect gives a chance to dodge enemy attacks.

pub mod combat;
pub mod enemy;
pub mod error;
pub mod moves;

pub use combat::{Actor, BattleOutcome, BattlePhase, BattleSession, TurnReport};
pub use enemy::{EnemyConfig, EnemyMove, EnemyRoster};
pub use error::{BattleError, BattleResult};
pub use moves::{MoveCategory, PlayerMove};
