//! Enemy configurations and the roster battle scenes refer to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};

/// A named enemy attack with fixed damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyMove {
    /// Display name.
    pub name: String,
    /// HP removed from the hero when the attack lands.
    pub damage: i32,
}

/// A configured opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyConfig {
    /// Display name.
    pub name: String,
    /// Starting and maximum HP.
    pub max_hp: i32,
    /// Attacks the enemy picks from uniformly.
    pub moves: Vec<EnemyMove>,
}

impl EnemyConfig {
    /// Create an enemy with no attacks yet.
    pub fn new(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            moves: Vec::new(),
        }
    }

    /// Add an attack.
    pub fn with_move(mut self, name: impl Into<String>, damage: i32) -> Self {
        self.moves.push(EnemyMove {
            name: name.into(),
            damage,
        });
        self
    }

    /// Check the enemy can actually be fought.
    pub fn validate(&self) -> BattleResult<()> {
        if self.max_hp <= 0 {
            return Err(BattleError::InvalidEnemy {
                name: self.name.clone(),
                reason: format!("max HP must be positive, got {}", self.max_hp),
            });
        }
        if self.moves.is_empty() {
            return Err(BattleError::InvalidEnemy {
                name: self.name.clone(),
                reason: "no attacks defined".to_string(),
            });
        }
        Ok(())
    }
}

/// Enemies keyed by the string a battle scene uses to refer to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyRoster {
    enemies: BTreeMap<String, EnemyConfig>,
}

impl EnemyRoster {
    /// An empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// The three opponents of the built-in story.
    pub fn standard() -> Self {
        Self::new()
            .with(
                "redSweater",
                EnemyConfig::new("Man in the Red Sweater", 80)
                    .with_move("Club Swing", 15)
                    .with_move("Kick", 10),
            )
            .with(
                "spitz",
                EnemyConfig::new("Spitz", 100)
                    .with_move("Bite", 15)
                    .with_move("Charge", 20)
                    .with_move("Snap", 10),
            )
            .with(
                "humans",
                EnemyConfig::new("Men at the Camp", 120)
                    .with_move("Rifle Butt", 18)
                    .with_move("Kick", 12)
                    .with_move("Shout", 8),
            )
    }

    /// Register an enemy, replacing any earlier one under the same key.
    pub fn with(mut self, key: impl Into<String>, enemy: EnemyConfig) -> Self {
        self.insert(key, enemy);
        self
    }

    /// Register an enemy, replacing any earlier one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, enemy: EnemyConfig) {
        self.enemies.insert(key.into(), enemy);
    }

    /// Look up an enemy.
    pub fn get(&self, key: &str) -> Option<&EnemyConfig> {
        self.enemies.get(key)
    }

    /// Look up an enemy, failing on unknown keys.
    pub fn require(&self, key: &str) -> BattleResult<&EnemyConfig> {
        self.get(key)
            .ok_or_else(|| BattleError::UnknownEnemy(key.to_string()))
    }

    /// Whether an enemy is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.enemies.contains_key(key)
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.enemies.keys().map(String::as_str)
    }

    /// Number of registered enemies.
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Validate every enemy in the roster.
    pub fn validate(&self) -> BattleResult<()> {
        for (key, enemy) in &self.enemies {
            enemy.validate().map_err(|e| match e {
                BattleError::InvalidEnemy { reason, .. } => BattleError::InvalidEnemy {
                    name: key.clone(),
                    reason,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}
