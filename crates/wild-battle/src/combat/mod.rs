//! Battle state machine.
//!
//! A session starts with the player choosing. A non-final player turn hands
//! over to the enemy; an enemy turn hands back to the player. Either side
//! reaching 0 HP or below ends the battle. Only a player turn can produce a
//! win.

pub mod turn;

pub use turn::{Actor, TurnReport};

use serde::{Deserialize, Serialize};
use wild_core::{Effect, RollSource, Stat, StatLedger};

use crate::enemy::EnemyConfig;
use crate::error::{BattleError, BattleResult};
use crate::moves::PlayerMove;

/// HP the hero starts every battle with.
pub const HERO_MAX_HP: i32 = 100;

/// Whose move it is, or how the battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Waiting for the player to pick a move.
    PlayerChoosing,
    /// The player has moved and the enemy is about to strike.
    EnemyTurn,
    /// The enemy fell.
    Won,
    /// The hero collapsed.
    Lost,
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The enemy fell.
    Won,
    /// The hero collapsed.
    Lost,
}

impl BattleOutcome {
    /// The stat effect granted (or taken) when a battle ends this way.
    pub fn effect(self) -> Effect {
        match self {
            Self::Won => Effect::from_pairs(&[
                (Stat::Wildness, 2),
                (Stat::Survival, 2),
                (Stat::Respect, 1),
            ]),
            Self::Lost => Effect::from_pairs(&[(Stat::Survival, -2), (Stat::Morale, -1)]),
        }
    }

    /// Closing line appended to the final battle log.
    pub fn closing_line(self) -> &'static str {
        match self {
            Self::Won => "The wild remembers your strength.",
            Self::Lost => "The snow grows quiet around you.",
        }
    }
}

/// An ongoing battle between the hero and one enemy.
#[derive(Debug, Clone)]
pub struct BattleSession {
    hero: String,
    enemy: EnemyConfig,
    hero_hp: i32,
    enemy_hp: i32,
    phase: BattlePhase,
    turns: Vec<TurnReport>,
}

impl BattleSession {
    /// Start a battle. The hero is at full HP and moves first.
    ///
    /// Fails if the enemy has no attacks or no HP.
    pub fn new(hero: impl Into<String>, enemy: EnemyConfig) -> BattleResult<Self> {
        enemy.validate()?;
        let enemy_hp = enemy.max_hp;
        Ok(Self {
            hero: hero.into(),
            enemy,
            hero_hp: HERO_MAX_HP,
            enemy_hp,
            phase: BattlePhase::PlayerChoosing,
            turns: Vec::new(),
        })
    }

    /// The hero's display name.
    pub fn hero(&self) -> &str {
        &self.hero
    }

    /// The enemy being fought.
    pub fn enemy(&self) -> &EnemyConfig {
        &self.enemy
    }

    /// Raw hero HP. May be negative once the battle is lost.
    pub fn hero_hp(&self) -> i32 {
        self.hero_hp
    }

    /// Raw enemy HP. May be negative once the battle is won.
    pub fn enemy_hp(&self) -> i32 {
        self.enemy_hp
    }

    /// Hero HP as a fraction of 100, floored at 0.
    pub fn hero_fraction(&self) -> f64 {
        f64::from(self.hero_hp.max(0)) / f64::from(HERO_MAX_HP)
    }

    /// Enemy HP as a fraction of its maximum, floored at 0.
    pub fn enemy_fraction(&self) -> f64 {
        f64::from(self.enemy_hp.max(0)) / f64::from(self.enemy.max_hp)
    }

    /// Current phase.
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// How the battle ended, if it has.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Won => Some(BattleOutcome::Won),
            BattlePhase::Lost => Some(BattleOutcome::Lost),
            _ => None,
        }
    }

    /// Whether the battle has ended.
    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Every resolved turn, oldest first.
    pub fn turns(&self) -> &[TurnReport] {
        &self.turns
    }

    /// Resolve the hero's move.
    ///
    /// Any stat buff the move carries is applied to `ledger` before the
    /// cold drain is computed.
    pub fn player_turn(
        &mut self,
        mv: &PlayerMove,
        ledger: &mut StatLedger,
        rolls: &mut dyn RollSource,
    ) -> BattleResult<TurnReport> {
        if self.phase != BattlePhase::PlayerChoosing {
            return Err(BattleError::NotPlayersTurn);
        }
        let report = turn::resolve_player_move(self, mv, ledger, rolls);
        Ok(self.record(report))
    }

    /// Resolve the enemy's attack.
    pub fn enemy_turn(
        &mut self,
        ledger: &StatLedger,
        rolls: &mut dyn RollSource,
    ) -> BattleResult<TurnReport> {
        if self.phase != BattlePhase::EnemyTurn {
            return Err(BattleError::NotEnemysTurn);
        }
        let report = turn::resolve_enemy_attack(self, ledger, rolls);
        Ok(self.record(report))
    }

    fn record(&mut self, report: TurnReport) -> TurnReport {
        log::debug!(
            "battle vs {}: {} (hero {} / enemy {})",
            self.enemy.name,
            report.text,
            self.hero_hp,
            self.enemy_hp
        );
        if let Some(outcome) = report.outcome {
            log::info!("battle vs {} ended: {outcome:?}", self.enemy.name);
        }
        self.turns.push(report.clone());
        report
    }
}
