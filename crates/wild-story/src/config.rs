//! Session configuration.

use std::time::Duration;

use wild_core::{RollSource, StdRoller};

/// Default pause before the enemy acts.
pub const ENEMY_TURN_DELAY: Duration = Duration::from_millis(700);
/// Default pause between the end of a battle and the next scene.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(1200);

/// Configuration for a [`StorySession`](crate::StorySession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryConfig {
    /// RNG seed; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Protagonist name used in battle and ending text.
    pub hero_name: String,
    /// Pause before the enemy acts.
    pub enemy_turn_delay: Duration,
    /// Pause before leaving a finished battle.
    pub transition_delay: Duration,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            seed: None,
            hero_name: "Buck".to_string(),
            enemy_turn_delay: ENEMY_TURN_DELAY,
            transition_delay: TRANSITION_DELAY,
        }
    }
}

impl StoryConfig {
    /// Set a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the protagonist's name.
    pub fn with_hero_name(mut self, name: impl Into<String>) -> Self {
        self.hero_name = name.into();
        self
    }

    /// Set the pause before the enemy acts.
    pub fn with_enemy_turn_delay(mut self, delay: Duration) -> Self {
        self.enemy_turn_delay = delay;
        self
    }

    /// Set the pause before leaving a finished battle.
    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = delay;
        self
    }

    /// A roll source matching the seed setting.
    pub fn roller(&self) -> Box<dyn RollSource> {
        match self.seed {
            Some(seed) => Box::new(StdRoller::seeded(seed)),
            None => Box::new(StdRoller::from_os()),
        }
    }
}
