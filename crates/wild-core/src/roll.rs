//! Uniform random sources.
//!
//! Every probabilistic rule (random events, crits, dodges, enemy move
//! selection) draws a single value in `[0, 1)` from a [`RollSource`] and
//! compares it against a threshold. Tests swap in [`ScriptedRolls`] to force
//! a particular band.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RollSource {
    /// Draw the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Pick an index in `0..len` uniformly. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len - 1)
    }
}

/// A [`RollSource`] backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRoller {
    rng: StdRng,
}

impl StdRoller {
    /// A reproducible roller.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RollSource for StdRoller {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// A [`RollSource`] that replays a fixed list of draws.
///
/// Once the list is exhausted every further draw returns the fallback value
/// (0.99 unless changed, which lands in the "nothing happens" band of every
/// table in the game).
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRolls {
    /// Replay `rolls` in order.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.99,
        }
    }

    /// Set the value returned once the script runs out.
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Queue more draws at the end of the script.
    pub fn push(&mut self, roll: f64) {
        self.rolls.push_back(roll);
    }

    /// Draws left before the fallback kicks in.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RollSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
