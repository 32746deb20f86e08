//! The story session engine.
//!
//! A [`StorySession`] is the single context a run flows through. Every
//! operation takes `&mut self`; nothing is global, so any number of runs can
//! live side by side.
//!
//! Pacing is explicit. When the player moves in battle the session queues
//! [`Pending::EnemyTurn`]; when a battle ends it queues
//! [`Pending::Transition`]. Until the caller calls [`StorySession::resume`]
//! (directly, or through [`StorySession::settle`] with a [`Pacer`]) every
//! choice or move is answered with [`Advance::Ignored`].

use std::time::Duration;

use wild_battle::{BattleOutcome, BattleSession, MoveCategory, TurnReport};
use wild_core::{Effect, RollSource, StatChange, StatLedger};

use crate::ambient::{self, TimeOfDay};
use crate::config::StoryConfig;
use crate::ending::{Ending, EndingReport};
use crate::error::{StoryError, StoryResult};
use crate::events::EventKind;
use crate::graph::SceneGraph;
use crate::pacing::{Pacer, Pending};
use crate::path_log::PathLog;
use crate::save::{LoadOutcome, SaveData, SaveStore, Theme};
use crate::scene::{Scene, SceneId, SceneKind, SceneTarget};
use crate::score::ChapterScores;

/// Why the ledger changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// A story choice.
    Choice,
    /// A random trail event.
    RandomEvent,
    /// Day/night drift on scene entry.
    Ambient,
    /// A battle move's buff.
    BattleBuff,
    /// Victory reward or defeat penalty.
    BattleOutcome,
}

/// Something observers may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryEvent {
    /// The previous chapter closed with these totals.
    ChapterSummary {
        /// The chapter that closed.
        chapter: u32,
        /// Rendered summary.
        text: String,
    },
    /// A new chapter opened.
    ChapterIntro {
        /// Chapter number.
        chapter: u32,
        /// Chapter title.
        title: String,
    },
    /// The ledger changed.
    StatsChanged {
        /// What caused it.
        cause: ChangeCause,
        /// Before and after.
        change: StatChange,
    },
    /// A random event fired.
    RandomEvent(EventKind),
    /// A battle began.
    BattleStarted {
        /// Enemy display name.
        enemy: String,
    },
    /// A battle turn resolved.
    BattleTurn(TurnReport),
    /// A battle ended.
    BattleEnded(BattleOutcome),
    /// The run ended.
    Ending(Ending),
}

/// Battle state shown when a battle scene is entered.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleView {
    /// Enemy display name.
    pub enemy: String,
    /// Hero HP out of 100.
    pub hero_hp: i32,
    /// Enemy HP.
    pub enemy_hp: i32,
    /// Enemy maximum HP.
    pub enemy_max_hp: i32,
    /// Opening log line.
    pub log: String,
}

impl BattleView {
    fn of(battle: &BattleSession) -> Self {
        Self {
            enemy: battle.enemy().name.clone(),
            hero_hp: battle.hero_hp(),
            enemy_hp: battle.enemy_hp(),
            enemy_max_hp: battle.enemy().max_hp,
            log: format!("{} appears! Choose your move.", battle.enemy().name),
        }
    }
}

/// What the scene asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneBody {
    /// Choice labels in order.
    Choices(Vec<String>),
    /// A battle has started.
    Battle(BattleView),
}

/// A scene as presented on entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneView {
    /// Scene id.
    pub id: SceneId,
    /// Chapter number.
    pub chapter: u32,
    /// Chapter title.
    pub chapter_title: String,
    /// Base text with any chapter summary and event text appended.
    pub text: String,
    /// Day or night.
    pub time_of_day: TimeOfDay,
    /// Choices or battle.
    pub body: SceneBody,
}

/// Result of an input or continuation.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Nothing happened; a continuation is pending or nothing was pending.
    Ignored,
    /// A scene was entered.
    Scene(SceneView),
    /// A battle turn resolved.
    Turn(TurnReport),
    /// The run ended.
    Ending(EndingReport),
}

/// One playthrough of a story.
pub struct StorySession {
    graph: SceneGraph,
    config: StoryConfig,
    rolls: Box<dyn RollSource>,
    ledger: StatLedger,
    current: Option<SceneId>,
    battle: Option<BattleSession>,
    pending: Option<Pending>,
    path_log: PathLog,
    scores: ChapterScores,
    theme: Theme,
    ending: Option<EndingReport>,
    events: Vec<StoryEvent>,
}

impl StorySession {
    /// A fresh session drawing from the configured roll source.
    pub fn new(graph: SceneGraph, config: StoryConfig) -> Self {
        let rolls = config.roller();
        Self::with_rolls(graph, config, rolls)
    }

    /// A fresh session drawing from `rolls`.
    pub fn with_rolls(graph: SceneGraph, config: StoryConfig, rolls: Box<dyn RollSource>) -> Self {
        Self {
            graph,
            config,
            rolls,
            ledger: StatLedger::new(),
            current: None,
            battle: None,
            pending: None,
            path_log: PathLog::new(),
            scores: ChapterScores::new(),
            theme: Theme::default(),
            ending: None,
            events: Vec::new(),
        }
    }

    /// Enter the start scene.
    pub fn start(&mut self) -> StoryResult<Advance> {
        let start = self.graph.start();
        self.enter(SceneTarget::Scene(start))
    }

    /// Transition to `target`.
    ///
    /// Entering the ending marker classifies the ending and closes the run.
    /// Entering a scene emits chapter events when the chapter changes,
    /// applies day/night drift, then either rolls a random event (story) or
    /// starts a battle.
    pub fn enter(&mut self, target: SceneTarget) -> StoryResult<Advance> {
        if self.ending.is_some() {
            return Err(StoryError::RunOver);
        }
        let id = match target {
            SceneTarget::End => return Ok(self.finish_run()),
            SceneTarget::Scene(id) => id,
        };
        let scene = self.graph.require(id)?.clone();
        let opponent = match &scene.kind {
            SceneKind::Battle { enemy, .. } => {
                let enemy = self.graph.enemies().require(enemy)?.clone();
                Some(BattleSession::new(self.config.hero_name.clone(), enemy)?)
            }
            SceneKind::Story { .. } => None,
        };
        log::debug!("entering scene {id}");

        let previous = self.current_scene().map(|s| s.chapter);
        let mut text = scene.text.clone();
        if previous != Some(scene.chapter) {
            if let Some((closed, summary)) =
                previous.and_then(|c| self.scores.summary(c).map(|s| (c, s)))
            {
                text.push_str("\n\n[Chapter Summary]\n");
                text.push_str(&summary);
                self.events.push(StoryEvent::ChapterSummary {
                    chapter: closed,
                    text: summary,
                });
            }
            log::info!("chapter {}: {}", scene.chapter, scene.chapter_title);
            self.events.push(StoryEvent::ChapterIntro {
                chapter: scene.chapter,
                title: scene.chapter_title.clone(),
            });
        }

        let time_of_day = TimeOfDay::of(&scene);
        self.current = Some(id);
        self.pending = None;
        self.battle = None;
        if let Some(drift) = ambient::drift(&scene, &self.ledger) {
            self.apply(&drift, ChangeCause::Ambient);
        }

        let body = match opponent {
            Some(battle) => {
                let view = BattleView::of(&battle);
                self.events.push(StoryEvent::BattleStarted {
                    enemy: view.enemy.clone(),
                });
                self.battle = Some(battle);
                SceneBody::Battle(view)
            }
            None => {
                if let Some(event) = EventKind::roll(self.rolls.as_mut()) {
                    self.apply(&event.effect(), ChangeCause::RandomEvent);
                    text.push_str("\n\n[Event] ");
                    text.push_str(event.text());
                    self.events.push(StoryEvent::RandomEvent(event));
                }
                SceneBody::Choices(scene.choices().iter().map(|c| c.text.clone()).collect())
            }
        };

        Ok(Advance::Scene(SceneView {
            id,
            chapter: scene.chapter,
            chapter_title: scene.chapter_title,
            text,
            time_of_day,
            body,
        }))
    }

    /// Pick a choice in the current story scene.
    ///
    /// The choice's effect is applied, attributed to the chapter and logged
    /// before the successor is resolved against the updated ledger.
    pub fn choose(&mut self, index: usize) -> StoryResult<Advance> {
        if self.ending.is_some() {
            return Err(StoryError::RunOver);
        }
        if let Some(pending) = self.pending {
            log::warn!("choice {index} ignored: {pending:?} pending");
            return Ok(Advance::Ignored);
        }
        if self.battle.is_some() {
            return Err(StoryError::InBattle);
        }
        let scene = self.current_scene().ok_or(StoryError::NotStarted)?;
        let (id, chapter) = (scene.id, scene.chapter);
        let choice = scene
            .choices()
            .get(index)
            .cloned()
            .ok_or(StoryError::InvalidChoice(index))?;

        if let Some(effect) = &choice.effect {
            self.apply(effect, ChangeCause::Choice);
            self.scores.record(chapter, effect);
        }
        self.path_log.record(id, chapter, choice.text.clone());

        let next = choice
            .resolve_next(&self.ledger)
            .ok_or(StoryError::UnresolvableChoice { scene: id, choice: index })?;
        log::debug!("scene {id} choice {index} -> {next}");
        self.enter(next)
    }

    /// Play a move in the current battle.
    pub fn battle_move(&mut self, category: MoveCategory, index: usize) -> StoryResult<Advance> {
        if self.ending.is_some() {
            return Err(StoryError::RunOver);
        }
        if let Some(pending) = self.pending {
            log::warn!("{category} move {index} ignored: {pending:?} pending");
            return Ok(Advance::Ignored);
        }
        if self.battle.is_none() {
            return Err(StoryError::NotInBattle);
        }
        let mv = category.get(index)?;
        let (id, chapter) = self
            .current_scene()
            .map(|s| (s.id, s.chapter))
            .ok_or(StoryError::NotStarted)?;
        let Some(battle) = self.battle.as_mut() else {
            return Err(StoryError::NotInBattle);
        };

        self.path_log.record(id, chapter, format!("[BATTLE] {}", mv.name));
        let mut report = battle.player_turn(mv, &mut self.ledger, self.rolls.as_mut())?;

        if let Some(change) = report.stat_change {
            self.events.push(StoryEvent::StatsChanged {
                cause: ChangeCause::BattleBuff,
                change,
            });
        }
        if let Some(buff) = &report.buff {
            self.scores.record(chapter, buff);
        }
        match report.outcome {
            Some(outcome) => self.conclude_battle(outcome, &mut report)?,
            None => self.pending = Some(Pending::EnemyTurn),
        }
        self.events.push(StoryEvent::BattleTurn(report.clone()));
        Ok(Advance::Turn(report))
    }

    /// The queued continuation, if any.
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// How long to wait before resuming the queued continuation.
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.map(|p| match p {
            Pending::EnemyTurn => self.config.enemy_turn_delay,
            Pending::Transition(_) => self.config.transition_delay,
        })
    }

    /// Run the queued continuation now.
    pub fn resume(&mut self) -> StoryResult<Advance> {
        match self.pending.take() {
            None => Ok(Advance::Ignored),
            Some(Pending::EnemyTurn) => {
                let Some(battle) = self.battle.as_mut() else {
                    return Err(StoryError::NotInBattle);
                };
                let mut report = battle.enemy_turn(&self.ledger, self.rolls.as_mut())?;
                if let Some(outcome) = report.outcome {
                    self.conclude_battle(outcome, &mut report)?;
                }
                self.events.push(StoryEvent::BattleTurn(report.clone()));
                Ok(Advance::Turn(report))
            }
            Some(Pending::Transition(target)) => {
                self.battle = None;
                self.enter(target)
            }
        }
    }

    /// Wait out and resume continuations until none is queued.
    pub fn settle<P: Pacer + ?Sized>(&mut self, pacer: &mut P) -> StoryResult<Vec<Advance>> {
        let mut steps = Vec::new();
        while let Some(delay) = self.pending_delay() {
            pacer.wait(delay);
            steps.push(self.resume()?);
        }
        Ok(steps)
    }

    fn conclude_battle(&mut self, outcome: BattleOutcome, report: &mut TurnReport) -> StoryResult<()> {
        let scene = self.current_scene().ok_or(StoryError::NotStarted)?;
        let (chapter, next) = match &scene.kind {
            SceneKind::Battle {
                next_win,
                next_lose,
                ..
            } => (
                scene.chapter,
                match outcome {
                    BattleOutcome::Won => *next_win,
                    BattleOutcome::Lost => *next_lose,
                },
            ),
            SceneKind::Story { .. } => return Err(StoryError::NotInBattle),
        };

        let effect = outcome.effect();
        self.apply(&effect, ChangeCause::BattleOutcome);
        self.scores.record(chapter, &effect);
        report.text.push(' ');
        report.text.push_str(outcome.closing_line());
        self.events.push(StoryEvent::BattleEnded(outcome));
        self.pending = Some(Pending::Transition(next));
        Ok(())
    }

    fn finish_run(&mut self) -> Advance {
        let report = EndingReport::new(&self.ledger, &self.path_log, &self.config.hero_name);
        log::info!("run ended: {:?}", report.ending);
        self.events.push(StoryEvent::Ending(report.ending));
        self.battle = None;
        self.pending = None;
        self.ending = Some(report.clone());
        Advance::Ending(report)
    }

    fn apply(&mut self, effect: &Effect, cause: ChangeCause) -> StatChange {
        for key in effect.unrecognized_keys() {
            log::debug!("ignoring unknown stat key '{key}'");
        }
        let change = self.ledger.apply(effect);
        self.events.push(StoryEvent::StatsChanged { cause, change });
        change
    }

    /// Snapshot of everything a save needs.
    pub fn snapshot(&self) -> SaveData {
        SaveData {
            stats: self.ledger,
            current_scene_id: self.current,
            path_log: self.path_log.clone(),
            chapter_scores: self.scores.clone(),
            theme: self.theme,
        }
    }

    /// Write a snapshot to `store`.
    pub fn save(&self, store: &mut dyn SaveStore) -> StoryResult<()> {
        store.write(&self.snapshot().to_json()?)?;
        log::info!("saved at scene {:?}", self.current);
        Ok(())
    }

    /// Read a snapshot from `store` and restore it.
    ///
    /// On any error the session is left exactly as it was.
    pub fn load(&mut self, store: &dyn SaveStore) -> StoryResult<LoadOutcome> {
        let Some(raw) = store.read()? else {
            log::info!("nothing to load");
            return Ok(LoadOutcome::NothingToLoad);
        };
        let data = SaveData::from_json(&raw).inspect_err(|e| log::warn!("load failed: {e}"))?;
        self.restore(data).map(LoadOutcome::Restored)
    }

    /// Replace the run state with `data` and re-enter the saved scene.
    ///
    /// Any battle or pending continuation is dropped. Re-entry has full entry
    /// semantics, so drift and a random event roll apply again.
    pub fn restore(&mut self, data: SaveData) -> StoryResult<Advance> {
        let target = match data.current_scene_id {
            Some(id) if self.graph.get(id).is_none() => {
                log::warn!("save refers to unknown scene {id}");
                return Err(StoryError::CorruptSave(format!("unknown scene {id}")));
            }
            Some(id) => id,
            None => self.graph.start(),
        };
        self.ledger = data.stats;
        self.path_log = data.path_log;
        self.scores = data.chapter_scores;
        self.theme = data.theme;
        self.current = data.current_scene_id;
        self.battle = None;
        self.pending = None;
        self.ending = None;
        log::info!("restored save at scene {target}");
        self.enter(SceneTarget::Scene(target))
    }

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The story being played.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Session configuration.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Raw stats.
    pub fn ledger(&self) -> &StatLedger {
        &self.ledger
    }

    /// The scene the run is in.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.and_then(|id| self.graph.get(id))
    }

    /// The running battle, including one that has ended but not yet
    /// transitioned away.
    pub fn battle(&self) -> Option<&BattleSession> {
        self.battle.as_ref()
    }

    /// Choices and moves so far.
    pub fn path_log(&self) -> &PathLog {
        &self.path_log
    }

    /// Per-chapter totals.
    pub fn chapter_scores(&self) -> &ChapterScores {
        &self.scores
    }

    /// The ending report once the run is over.
    pub fn ending(&self) -> Option<&EndingReport> {
        self.ending.as_ref()
    }

    /// Whether the run is over.
    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// Drain events raised since the last call.
    pub fn take_events(&mut self) -> Vec<StoryEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use wild_battle::{EnemyConfig, EnemyRoster};
    use wild_core::{ScriptedRolls, Stat};

    use super::*;
    use crate::content::call_of_the_wild;
    use crate::pacing::InstantPacer;
    use crate::save::MemoryStore;
    use crate::scene::Choice;

    #[derive(Default)]
    struct RecordingPacer {
        waits: Vec<Duration>,
    }

    impl Pacer for RecordingPacer {
        fn wait(&mut self, delay: Duration) {
            self.waits.push(delay);
        }
    }

    fn scripted(graph: SceneGraph, rolls: &[f64]) -> StorySession {
        StorySession::with_rolls(
            graph,
            StoryConfig::default(),
            Box::new(ScriptedRolls::new(rolls.to_vec())),
        )
    }

    fn wild(rolls: &[f64]) -> StorySession {
        scripted(call_of_the_wild().unwrap(), rolls)
    }

    fn arena(enemy: EnemyConfig) -> SceneGraph {
        SceneGraph::new(
            1,
            vec![
                Scene::battle(1, 1, "Arena", "A foe appears.", "foe", 2, 3),
                Scene::story(2, 2, "Aftermath", "You won.", vec![Choice::new("Rest").to(SceneTarget::End)]),
                Scene::story(3, 2, "Aftermath", "You lost.", vec![Choice::new("Limp on").to(SceneTarget::End)]),
            ],
            EnemyRoster::new().with("foe", enemy),
        )
        .unwrap()
    }

    fn spitz() -> EnemyConfig {
        EnemyConfig::new("Spitz", 100)
            .with_move("Bite", 15)
            .with_move("Charge", 20)
            .with_move("Snap", 10)
    }

    fn view(advance: Advance) -> SceneView {
        match advance {
            Advance::Scene(view) => view,
            other => panic!("expected a scene, got {other:?}"),
        }
    }

    fn turn(advance: Advance) -> TurnReport {
        match advance {
            Advance::Turn(report) => report,
            other => panic!("expected a turn, got {other:?}"),
        }
    }

    fn causes(events: &[StoryEvent]) -> Vec<ChangeCause> {
        events
            .iter()
            .filter_map(|e| match e {
                StoryEvent::StatsChanged { cause, .. } => Some(*cause),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_opens_chapter_one_at_night() {
        let mut s = wild(&[]);
        let v = view(s.start().unwrap());
        assert_eq!(v.id, 0);
        assert_eq!(v.chapter, 1);
        assert_eq!(v.chapter_title, "Stolen From Home");
        assert_eq!(v.time_of_day, TimeOfDay::Night);
        assert_eq!(v.text, s.graph().get(0).unwrap().text);
        let SceneBody::Choices(choices) = v.body else {
            panic!("expected choices");
        };
        assert_eq!(choices.len(), 4);

        assert_eq!(s.ledger().cold, 1);
        assert_eq!(s.ledger().fatigue, 1);
        let events = s.take_events();
        assert_eq!(
            events[0],
            StoryEvent::ChapterIntro {
                chapter: 1,
                title: "Stolen From Home".to_string()
            }
        );
        assert_eq!(causes(&events), vec![ChangeCause::Ambient]);
    }

    #[test]
    fn random_event_is_appended_after_drift() {
        let mut s = wild(&[0.0]);
        let v = view(s.start().unwrap());
        assert!(v.text.starts_with("You awaken in a wooden crate"));
        assert!(v.text.ends_with(
            "\n\n[Event] A sudden blizzard sweeps across the trail. The cold bites deep."
        ));
        assert_eq!(s.ledger().cold, 3);
        assert_eq!(s.ledger().fatigue, 2);
        let events = s.take_events();
        assert_eq!(
            causes(&events),
            vec![ChangeCause::Ambient, ChangeCause::RandomEvent]
        );
        assert!(events.contains(&StoryEvent::RandomEvent(EventKind::Blizzard)));
    }

    #[test]
    fn choice_applies_scores_and_logs_before_moving_on() {
        let mut s = wild(&[]);
        s.start().unwrap();
        let v = view(s.choose(0).unwrap());
        assert_eq!(v.id, 1);
        assert_eq!(v.time_of_day, TimeOfDay::Day);

        assert_eq!(s.ledger().loyalty, 2);
        assert_eq!(s.ledger().morale, 5);
        let scores = s.chapter_scores().get(1).unwrap();
        assert_eq!(scores.loyalty, 2);
        assert_eq!(scores.morale, -1);
        assert_eq!(scores.cold, 0);
        assert_eq!(
            s.path_log().lines(),
            vec!["Chapter 1, Scene 0: A pet, confused and loyal"]
        );
    }

    #[test]
    fn chapter_change_appends_the_previous_summary() {
        let mut s = wild(&[]);
        s.start().unwrap();
        s.choose(0).unwrap();
        s.take_events();
        let v = view(s.enter(SceneTarget::Scene(5)).unwrap());
        assert_eq!(v.chapter, 2);
        assert!(v.text.ends_with(
            "\n\n[Chapter Summary]\nChapter 1 Summary:\nloyalty: +2\nmorale: -1"
        ));
        let events = s.take_events();
        assert!(matches!(events[0], StoryEvent::ChapterSummary { chapter: 1, .. }));
        assert!(matches!(events[1], StoryEvent::ChapterIntro { chapter: 2, .. }));
    }

    #[test]
    fn same_chapter_has_no_chapter_events() {
        let mut s = wild(&[]);
        s.start().unwrap();
        s.take_events();
        s.choose(2).unwrap();
        let events = s.take_events();
        assert!(!events.iter().any(|e| matches!(
            e,
            StoryEvent::ChapterIntro { .. } | StoryEvent::ChapterSummary { .. }
        )));
    }

    #[test]
    fn wildness_fork_reads_the_updated_ledger() {
        let at_scene_nine = |wildness: i32| SaveData {
            stats: StatLedger::new().with(Stat::Wildness, wildness),
            current_scene_id: Some(9),
            path_log: PathLog::new(),
            chapter_scores: ChapterScores::new(),
            theme: Theme::Light,
        };

        let mut s = wild(&[]);
        s.restore(at_scene_nine(4)).unwrap();
        assert_eq!(view(s.choose(0).unwrap()).id, 10);

        let mut s = wild(&[]);
        s.restore(at_scene_nine(3)).unwrap();
        assert_eq!(view(s.choose(0).unwrap()).id, 11);
    }

    #[test]
    fn bad_input_changes_nothing() {
        let mut s = wild(&[]);
        assert!(matches!(s.choose(0), Err(StoryError::NotStarted)));
        s.start().unwrap();
        let before = *s.ledger();
        assert!(matches!(s.choose(4), Err(StoryError::InvalidChoice(4))));
        assert!(matches!(
            s.battle_move(MoveCategory::Attack, 0),
            Err(StoryError::NotInBattle)
        ));
        assert_eq!(*s.ledger(), before);
        assert!(s.path_log().is_empty());
    }

    #[test]
    fn entering_an_unknown_scene_changes_nothing() {
        let mut s = wild(&[]);
        s.start().unwrap();
        s.choose(0).unwrap();
        s.take_events();
        let before = s.snapshot();

        assert!(matches!(
            s.enter(SceneTarget::Scene(404)),
            Err(StoryError::UnknownScene(404))
        ));
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.current_scene().map(|scene| scene.id), Some(1));
        assert!(s.take_events().is_empty());
        assert!(!s.is_over());
    }

    #[test]
    fn battle_turns_alternate_through_pending_state() {
        let mut s = scripted(arena(spitz()), &[]);
        let v = view(s.start().unwrap());
        let SceneBody::Battle(battle) = v.body else {
            panic!("expected a battle");
        };
        assert_eq!(battle.log, "Spitz appears! Choose your move.");
        assert_eq!(battle.enemy_max_hp, 100);
        assert!(causes(&s.take_events()).is_empty());

        let report = turn(s.battle_move(MoveCategory::Attack, 0).unwrap());
        assert_eq!(
            report.text,
            "Buck used Bite! It dealt 14 damage. Spitz prepares to strike back."
        );
        assert_eq!(s.pending(), Some(Pending::EnemyTurn));
        assert_eq!(s.pending_delay(), Some(Duration::from_millis(700)));

        assert_eq!(s.battle_move(MoveCategory::Attack, 0).unwrap(), Advance::Ignored);
        assert_eq!(s.choose(0).unwrap(), Advance::Ignored);
        assert_eq!(s.path_log().lines(), vec!["Chapter 1, Scene 1: [BATTLE] Bite"]);

        let report = turn(s.resume().unwrap());
        assert_eq!(report.text, "Spitz used Snap! Buck took 10 damage. It's your turn.");
        assert_eq!(s.pending(), None);
        assert_eq!(s.battle().unwrap().hero_hp(), 90);
        assert_eq!(s.resume().unwrap(), Advance::Ignored);
    }

    #[test]
    fn victory_rewards_and_transitions() {
        let mut s = scripted(arena(EnemyConfig::new("Pup", 10).with_move("Yip", 1)), &[]);
        s.start().unwrap();
        let report = turn(s.battle_move(MoveCategory::Attack, 0).unwrap());
        assert_eq!(report.outcome, Some(BattleOutcome::Won));
        assert!(report.text.ends_with("Pup falls. The wild remembers your strength."));
        assert_eq!(s.ledger().wildness, 2);
        assert_eq!(s.ledger().survival, 2);
        assert_eq!(s.ledger().respect, 1);
        assert_eq!(s.pending(), Some(Pending::Transition(SceneTarget::Scene(2))));
        assert_eq!(s.battle_move(MoveCategory::Misc, 0).unwrap(), Advance::Ignored);

        let mut pacer = RecordingPacer::default();
        let steps = s.settle(&mut pacer).unwrap();
        assert_eq!(pacer.waits, vec![Duration::from_millis(1200)]);
        assert_eq!(steps.len(), 1);
        let v = view(steps.into_iter().next().unwrap());
        assert_eq!(v.id, 2);
        assert_eq!(
            v.text,
            "You won.\n\n[Chapter Summary]\nChapter 1 Summary:\nwildness: +2\nsurvival: +2\nrespect: +1"
        );
        assert!(s.battle().is_none());
    }

    #[test]
    fn defeat_penalizes_and_the_run_can_still_end() {
        let mut s = scripted(arena(EnemyConfig::new("Bear", 500).with_move("Maul", 200)), &[]);
        s.start().unwrap();
        s.battle_move(MoveCategory::Attack, 0).unwrap();

        let mut pacer = RecordingPacer::default();
        let steps = s.settle(&mut pacer).unwrap();
        assert_eq!(
            pacer.waits,
            vec![Duration::from_millis(700), Duration::from_millis(1200)]
        );
        let report = turn(steps[0].clone());
        assert_eq!(
            report.text,
            "Bear used Maul! Buck took 200 damage. Buck collapses... The snow grows quiet around you."
        );
        assert_eq!(view(steps[1].clone()).id, 3);
        assert_eq!(s.ledger().survival, -2);
        let scores = s.chapter_scores().get(1).unwrap();
        assert_eq!((scores.survival, scores.morale), (-2, -1));

        let Advance::Ending(ending) = s.choose(0).unwrap() else {
            panic!("expected the ending");
        };
        assert_eq!(ending.ending, Ending::FadeAway);
        assert_eq!(ending.path.len(), 2);
        assert!(s.is_over());
        assert!(matches!(s.choose(0), Err(StoryError::RunOver)));
        assert!(matches!(
            s.battle_move(MoveCategory::Attack, 0),
            Err(StoryError::RunOver)
        ));
        assert!(matches!(s.enter(SceneTarget::Scene(1)), Err(StoryError::RunOver)));
    }

    #[test]
    fn save_and_load_restore_the_run() {
        let mut s = wild(&[]);
        s.start().unwrap();
        s.toggle_theme();
        let mut store = MemoryStore::new();
        s.save(&mut store).unwrap();

        s.choose(0).unwrap();
        s.toggle_theme();
        assert_eq!(s.path_log().len(), 1);

        let LoadOutcome::Restored(advance) = s.load(&store).unwrap() else {
            panic!("expected a restore");
        };
        assert_eq!(view(advance).id, 0);
        assert!(s.path_log().is_empty());
        assert_eq!(s.ledger().loyalty, 0);
        assert_eq!(s.ledger().cold, 2);
        assert_eq!(s.theme(), Theme::Dark);
    }

    #[test]
    fn loading_clears_a_battle_in_progress() {
        let mut s = scripted(arena(spitz()), &[]);
        let mut store = MemoryStore::new();
        s.save(&mut store).unwrap();
        s.start().unwrap();
        s.battle_move(MoveCategory::Attack, 0).unwrap();
        assert_eq!(s.pending(), Some(Pending::EnemyTurn));

        s.load(&store).unwrap();
        assert_eq!(s.pending(), None);
        assert_eq!(s.battle().unwrap().hero_hp(), 100);
        assert!(s.path_log().is_empty());
    }

    #[test]
    fn missing_or_corrupt_saves_leave_state_alone() {
        let mut s = wild(&[]);
        s.start().unwrap();
        s.choose(1).unwrap();
        let before = s.snapshot();

        assert_eq!(s.load(&MemoryStore::new()).unwrap(), LoadOutcome::NothingToLoad);
        assert!(matches!(
            s.load(&MemoryStore::with_raw("{ broken")),
            Err(StoryError::CorruptSave(_))
        ));
        let mut unknown = before.clone();
        unknown.current_scene_id = Some(404);
        let raw = unknown.to_json().unwrap();
        assert!(matches!(
            s.load(&MemoryStore::with_raw(raw)),
            Err(StoryError::CorruptSave(_))
        ));
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn a_seeded_run_reaches_an_ending() {
        let mut s = StorySession::new(call_of_the_wild().unwrap(), StoryConfig::default().with_seed(3));
        s.start().unwrap();
        for _ in 0..500 {
            if s.is_over() {
                break;
            }
            if s.battle().is_some() {
                s.battle_move(MoveCategory::Special, 2).unwrap();
            } else {
                s.choose(0).unwrap();
            }
            s.settle(&mut InstantPacer).unwrap();
        }
        let ending = s.ending().unwrap();
        assert_eq!(ending.stats, *s.ledger());
        assert_eq!(ending.path.len(), s.path_log().len());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn path_log_and_chapters_only_grow(
            seed in any::<u64>(),
            picks in proptest::collection::vec(0usize..4, 1..150),
        ) {
            let mut s = StorySession::new(
                call_of_the_wild().unwrap(),
                StoryConfig::default().with_seed(seed),
            );
            s.start().unwrap();
            let (mut entries, mut chapters) = (0, 0);
            for pick in picks {
                if s.is_over() {
                    break;
                }
                let result = if s.battle().is_some() {
                    s.battle_move(MoveCategory::ALL[pick], 0)
                } else {
                    s.choose(pick)
                };
                prop_assert!(result.is_ok());
                prop_assert!(s.settle(&mut InstantPacer).is_ok());
                prop_assert!(s.path_log().len() > entries);
                prop_assert!(s.chapter_scores().len() >= chapters);
                entries = s.path_log().len();
                chapters = s.chapter_scores().len();
            }
        }
    }
}
