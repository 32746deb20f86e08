//! Resolution of single player and enemy turns.

use wild_core::{Effect, RollSource, StatChange, StatLedger};

use super::{BattleOutcome, BattlePhase, BattleSession};
use crate::moves::PlayerMove;

/// Crit hits multiply damage by this factor.
pub const CRIT_MULTIPLIER: f64 = 1.5;
/// Each point of morale adds `1 / MORALE_CRIT_DIVISOR` crit chance.
pub const MORALE_CRIT_DIVISOR: f64 = 40.0;
/// Each point of fatigue removes `1 / FATIGUE_DIVISOR` of outgoing damage.
pub const FATIGUE_DIVISOR: f64 = 20.0;
/// Cold above this drains HP every player turn.
pub const COLD_THRESHOLD: i32 = 5;
/// Each point of respect adds `1 / RESPECT_DODGE_DIVISOR` dodge chance.
pub const RESPECT_DODGE_DIVISOR: f64 = 25.0;

/// Who acted in a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The protagonist.
    Hero,
    /// The opponent.
    Enemy,
}

/// Everything that happened in one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Who acted.
    pub actor: Actor,
    /// Name of the move or attack used.
    pub move_name: String,
    /// The move was an escape attempt.
    pub escape_attempt: bool,
    /// Damage dealt to the enemy after crit and fatigue.
    pub enemy_damage: i32,
    /// The hit was a crit.
    pub critical: bool,
    /// HP the hero lost to recoil or to the enemy's attack. Negative heals.
    pub hero_damage: i32,
    /// The enemy's attack was dodged.
    pub dodged: bool,
    /// Buff carried by the move, if any.
    pub buff: Option<Effect>,
    /// Ledger snapshot from applying the buff.
    pub stat_change: Option<StatChange>,
    /// Extra HP lost to cold.
    pub cold_drain: i32,
    /// Set when this turn ended the battle.
    pub outcome: Option<BattleOutcome>,
    /// Hero HP after the turn.
    pub hero_hp: i32,
    /// Enemy HP after the turn.
    pub enemy_hp: i32,
    /// Human-readable log line.
    pub text: String,
}

impl TurnReport {
    fn new(actor: Actor, move_name: &str) -> Self {
        Self {
            actor,
            move_name: move_name.to_string(),
            escape_attempt: false,
            enemy_damage: 0,
            critical: false,
            hero_damage: 0,
            dodged: false,
            buff: None,
            stat_change: None,
            cold_drain: 0,
            outcome: None,
            hero_hp: 0,
            enemy_hp: 0,
            text: String::new(),
        }
    }
}

/// Outgoing damage after the crit check and fatigue dampening.
///
/// The crit draw is only taken when the base damage is positive. The
/// fatigue multiplier itself is not clamped, so fatigue above 20 drives it
/// negative; only the resulting damage is floored at 0.
pub fn outgoing_damage(
    base: i32,
    crit_chance: f64,
    ledger: &StatLedger,
    rolls: &mut dyn RollSource,
) -> (i32, bool) {
    let mut damage = base;
    let chance = crit_chance + f64::from(ledger.morale) / MORALE_CRIT_DIVISOR;
    let critical = damage > 0 && rolls.next_unit() < chance;
    if critical {
        damage = (f64::from(damage) * CRIT_MULTIPLIER).round() as i32;
    }
    let fatigue_factor = 1.0 - f64::from(ledger.fatigue) / FATIGUE_DIVISOR;
    let damage = ((f64::from(damage) * fatigue_factor).round() as i32).max(0);
    (damage, critical)
}

/// HP drained by cold on a player turn.
pub fn cold_drain(ledger: &StatLedger) -> i32 {
    if ledger.cold > COLD_THRESHOLD {
        ledger.cold - COLD_THRESHOLD
    } else {
        0
    }
}

/// Chance the enemy's attack is dodged. Not clamped.
pub fn dodge_chance(ledger: &StatLedger) -> f64 {
    f64::from(ledger.respect) / RESPECT_DODGE_DIVISOR
}

pub(super) fn resolve_player_move(
    battle: &mut BattleSession,
    mv: &PlayerMove,
    ledger: &mut StatLedger,
    rolls: &mut dyn RollSource,
) -> TurnReport {
    let mut report = TurnReport::new(Actor::Hero, mv.name);
    let mut text = format!("{} used {}! ", battle.hero, mv.name);

    if mv.escape {
        report.escape_attempt = true;
        text.push_str("You try to flee... but the wild holds you here.");
        battle.phase = BattlePhase::EnemyTurn;
        return finish(battle, report, text);
    }

    let (damage, critical) = outgoing_damage(mv.enemy_damage, mv.crit_chance, ledger, rolls);
    if critical {
        text.push_str("It's a critical hit! ");
    }
    report.critical = critical;
    report.enemy_damage = damage;

    if damage != 0 {
        battle.enemy_hp = battle.enemy_hp.saturating_sub(damage);
        text.push_str(&format!("It dealt {damage} damage. "));
    }

    if mv.recoil != 0 {
        battle.hero_hp = battle.hero_hp.saturating_sub(mv.recoil);
        report.hero_damage = mv.recoil;
        if mv.recoil < 0 {
            text.push_str(&format!("{} recovered {} HP. ", battle.hero, -mv.recoil));
        } else {
            text.push_str(&format!("{} took {} recoil. ", battle.hero, mv.recoil));
        }
    }

    if let Some(buff) = mv.buff_effect() {
        report.stat_change = Some(ledger.apply(&buff));
        report.buff = Some(buff);
        text.push_str(&format!("{} feels different. ", battle.hero));
    }

    let drain = cold_drain(ledger);
    if drain > 0 {
        battle.hero_hp = battle.hero_hp.saturating_sub(drain);
        report.cold_drain = drain;
        text.push_str(&format!("The cold drains {drain} more HP. "));
    }

    if battle.enemy_hp <= 0 {
        text.push_str(&format!("{} falls.", battle.enemy.name));
        battle.phase = BattlePhase::Won;
        report.outcome = Some(BattleOutcome::Won);
    } else if battle.hero_hp <= 0 {
        text.push_str(&format!("{} collapses...", battle.hero));
        battle.phase = BattlePhase::Lost;
        report.outcome = Some(BattleOutcome::Lost);
    } else {
        text.push_str(&format!("{} prepares to strike back.", battle.enemy.name));
        battle.phase = BattlePhase::EnemyTurn;
    }

    finish(battle, report, text)
}

pub(super) fn resolve_enemy_attack(
    battle: &mut BattleSession,
    ledger: &StatLedger,
    rolls: &mut dyn RollSource,
) -> TurnReport {
    let attack = battle.enemy.moves[rolls.pick(battle.enemy.moves.len())].clone();
    let mut report = TurnReport::new(Actor::Enemy, &attack.name);

    if rolls.next_unit() < dodge_chance(ledger) {
        report.dodged = true;
        let text = format!(
            "{} used {}, but {} dodged thanks to his pack instincts!",
            battle.enemy.name, attack.name, battle.hero
        );
        battle.phase = BattlePhase::PlayerChoosing;
        return finish(battle, report, text);
    }

    battle.hero_hp = battle.hero_hp.saturating_sub(attack.damage);
    report.hero_damage = attack.damage;
    let mut text = format!(
        "{} used {}! {} took {} damage. ",
        battle.enemy.name, attack.name, battle.hero, attack.damage
    );

    if battle.hero_hp <= 0 {
        text.push_str(&format!("{} collapses...", battle.hero));
        battle.phase = BattlePhase::Lost;
        report.outcome = Some(BattleOutcome::Lost);
    } else {
        text.push_str("It's your turn.");
        battle.phase = BattlePhase::PlayerChoosing;
    }

    finish(battle, report, text)
}

fn finish(battle: &BattleSession, mut report: TurnReport, text: String) -> TurnReport {
    report.hero_hp = battle.hero_hp;
    report.enemy_hp = battle.enemy_hp;
    report.text = text;
    report
}
