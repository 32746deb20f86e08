//! Core types for Wildcall: the character statistics, the ledger that holds
//! them, signed effect deltas, and the uniform random source every
//! probabilistic rule draws from.
//!
//! Nothing in this crate knows about scenes or battles. The ledger is the
//! single mutation point for character state: every narrative choice, random
//! event, battle buff and battle outcome is expressed as an [`Effect`] and
//! applied through [`StatLedger::apply`].

/// Signed stat deltas.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// The raw stat ledger and before/after change snapshots.
pub mod ledger;
/// Uniform `[0, 1)` random sources.
pub mod roll;
/// Stat identifiers and display caps.
pub mod stat;

/// Re-export effect types.
pub use effect::Effect;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export ledger types.
pub use ledger::{StatChange, StatLedger, Trend};
/// Re-export random sources.
pub use roll::{RollSource, ScriptedRolls, StdRoller};
/// Re-export stat identifiers.
pub use stat::{MAX_SIMPLE, MAX_STAT, Stat};
