//! The hero's move table.
//!
//! Moves are grouped into four categories. The table is fixed: every battle
//! offers the same moves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wild_core::{Effect, Stat};

use crate::error::{BattleError, BattleResult};

/// A menu of player moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    /// Plain strikes.
    Attack,
    /// Heavy strikes with recoil.
    Special,
    /// Escape attempts. They never succeed.
    Run,
    /// Healing, bracing and buffs.
    Misc,
}

impl MoveCategory {
    /// Every category, in menu order.
    pub const ALL: [MoveCategory; 4] = [
        MoveCategory::Attack,
        MoveCategory::Special,
        MoveCategory::Run,
        MoveCategory::Misc,
    ];

    /// Lowercase menu name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Special => "special",
            Self::Run => "run",
            Self::Misc => "misc",
        }
    }

    /// The moves in this category.
    pub fn moves(self) -> &'static [PlayerMove] {
        match self {
            Self::Attack => &ATTACK,
            Self::Special => &SPECIAL,
            Self::Run => &RUN,
            Self::Misc => &MISC,
        }
    }

    /// Look up a move by 0-based index.
    pub fn get(self, index: usize) -> BattleResult<&'static PlayerMove> {
        self.moves().get(index).ok_or(BattleError::InvalidMove {
            category: self,
            index,
        })
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoveCategory {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BattleError::UnknownCategory(s.to_string()))
    }
}

/// A move the hero can pick on their turn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMove {
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Base damage dealt to the enemy.
    pub enemy_damage: i32,
    /// HP the hero loses using it. Negative values heal.
    pub recoil: i32,
    /// Base crit chance in `[0, 1]`.
    pub crit_chance: f64,
    /// Escape attempt: deals nothing and hands the turn to the enemy.
    pub escape: bool,
    /// Stat deltas applied when the move is used.
    pub buff: &'static [(Stat, i32)],
}

impl PlayerMove {
    const fn strike(
        name: &'static str,
        description: &'static str,
        enemy_damage: i32,
        recoil: i32,
        crit_chance: f64,
    ) -> Self {
        Self {
            name,
            description,
            enemy_damage,
            recoil,
            crit_chance,
            escape: false,
            buff: &[],
        }
    }

    const fn flight(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            enemy_damage: 0,
            recoil: 0,
            crit_chance: 0.0,
            escape: true,
            buff: &[],
        }
    }

    const fn with_buff(mut self, buff: &'static [(Stat, i32)]) -> Self {
        self.buff = buff;
        self
    }

    /// The buff as an [`Effect`], if the move has one.
    pub fn buff_effect(&self) -> Option<Effect> {
        if self.buff.is_empty() {
            None
        } else {
            Some(Effect::from_pairs(self.buff))
        }
    }
}

static ATTACK: [PlayerMove; 3] = [
    PlayerMove::strike("Bite", "A fierce bite.", 14, 0, 0.2),
    PlayerMove::strike("Lunge", "A powerful leap.", 18, 0, 0.15),
    PlayerMove::strike("Feint", "Quick, tricky strike.", 10, 0, 0.3),
];

static SPECIAL: [PlayerMove; 3] = [
    PlayerMove::strike("Rend", "Savage attack, but risky.", 24, 8, 0.25),
    PlayerMove::strike("Fury", "Push your limits.", 28, 12, 0.3),
    PlayerMove::strike("Savage Leap", "All-out leap.", 32, 15, 0.35),
];

static RUN: [PlayerMove; 3] = [
    PlayerMove::flight("Flee", "Try to escape the fight."),
    PlayerMove::flight("Run to Perrault", "Instinct pulls you toward old memories."),
    PlayerMove::flight("Retreat to the Forest", "Melt into the trees."),
];

static MISC: [PlayerMove; 4] = [
    PlayerMove::strike("Howl", "Rally your spirit.", 0, -15, 0.0)
        .with_buff(&[(Stat::Morale, 2), (Stat::Wildness, 1)]),
    PlayerMove::strike("Block", "Brace for impact.", 0, -5, 0.0),
    PlayerMove::strike("Dodge", "Avoid the next blow.", 6, -10, 0.0),
    PlayerMove::strike("Circle", "Wolf tactic, test the enemy.", 8, 0, 0.0)
        .with_buff(&[(Stat::Respect, 1)]),
];
