//! Deferred continuations.
//!
//! After an enemy turn is queued, and after a battle ends, the session holds
//! a [`Pending`] continuation instead of running it at once. The caller
//! decides how long to wait before calling `resume`, usually through a
//! [`Pacer`].

use std::thread;
use std::time::Duration;

use crate::scene::SceneTarget;

/// A continuation the session is waiting to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// The enemy acts next.
    EnemyTurn,
    /// The battle is over; move on to this target.
    Transition(SceneTarget),
}

/// Waits out a pacing delay.
pub trait Pacer {
    /// Block for `delay`, or not at all.
    fn wait(&mut self, delay: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn wait(&mut self, _delay: Duration) {}
}
