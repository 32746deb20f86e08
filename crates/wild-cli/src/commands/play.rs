use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use wild_battle::{BattleSession, MoveCategory, TurnReport};
use wild_core::{StatChange, Trend};
use wild_story::{
    Advance, EndingReport, InstantPacer, LoadOutcome, Pacer, SceneBody, SceneView, StoryConfig,
    StoryEvent, StorySession, ThreadPacer,
};

use super::FileStore;

const HELP: &str = "\
  <n>               pick choice n
  <category> <n>    battle move, e.g. 'attack 1' or 'm 2'
  moves             list battle moves
  stats             show the stat ledger
  log               show the path so far
  save | load       write or restore the save file
  theme             toggle light/dark
  quit              leave the trail";

enum Flow {
    Continue,
    Quit,
}

pub fn run(
    story: Option<&Path>,
    seed: Option<u64>,
    save: &Path,
    fast: bool,
    hero: Option<&str>,
) -> Result<(), String> {
    let graph = super::load_graph(story)?;
    let mut config = StoryConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(hero) = hero {
        config = config.with_hero_name(hero);
    }

    let mut session = StorySession::new(graph, config);
    let mut store = FileStore::new(save);
    let mut pacer: Box<dyn Pacer> = if fast {
        Box::new(InstantPacer)
    } else {
        Box::new(ThreadPacer)
    };

    println!("  {} The Call of the Wild", "Starting".bold());
    if let Some(seed) = seed {
        println!("  Seed: {seed}");
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let opening = session.start().map_err(|e| e.to_string())?;
    show(&mut session, opening);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !session.is_over() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match handle(&mut session, &mut store, input) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("{}\n", e.yellow()),
        }

        for step in session.settle(pacer.as_mut()).map_err(|e| e.to_string())? {
            show(&mut session, step);
        }
    }

    Ok(())
}

fn handle(session: &mut StorySession, store: &mut FileStore, input: &str) -> Result<Flow, String> {
    let lower = input.to_ascii_lowercase();
    let mut words = lower.split_whitespace();
    let head = words.next().unwrap_or_default();

    match head {
        "quit" | "q" | "exit" => return Ok(Flow::Quit),
        "help" | "h" | "?" => println!("{HELP}\n"),
        "moves" => print_moves(),
        "stats" => print_stats(session),
        "log" => {
            let lines = session.path_log().lines();
            if lines.is_empty() {
                println!("  Nothing yet.\n");
            } else {
                for line in lines {
                    println!("  {line}");
                }
                println!();
            }
        }
        "save" => {
            session.save(store).map_err(|e| e.to_string())?;
            println!("  Saved to {}\n", store.path().display());
        }
        "load" => match session.load(&*store) {
            Ok(LoadOutcome::NothingToLoad) => println!("  Nothing to restore.\n"),
            Ok(LoadOutcome::Restored(advance)) => {
                println!("  {}\n", "Restored.".green());
                show(session, advance);
            }
            Err(e) => println!("  {}\n", e.to_string().yellow()),
        },
        "theme" => println!("  Theme: {:?}\n", session.toggle_theme()),
        _ => {
            if let Ok(n) = head.parse::<usize>() {
                let index = n.checked_sub(1).ok_or("choices start at 1")?;
                let advance = session.choose(index).map_err(|e| e.to_string())?;
                show(session, advance);
            } else if let Some(category) = parse_category(head) {
                let n: usize = words
                    .next()
                    .ok_or(format!("which {category} move? e.g. '{category} 1'"))?
                    .parse()
                    .map_err(|_| "move numbers start at 1".to_string())?;
                let index = n.checked_sub(1).ok_or("move numbers start at 1")?;
                let advance = session
                    .battle_move(category, index)
                    .map_err(|e| e.to_string())?;
                show(session, advance);
            } else {
                return Err(format!("unknown command '{input}'. Type 'help'."));
            }
        }
    }
    Ok(Flow::Continue)
}

/// Accepts a category name or any prefix of it.
fn parse_category(word: &str) -> Option<MoveCategory> {
    MoveCategory::ALL
        .into_iter()
        .find(|c| c.name().starts_with(word))
}

fn show(session: &mut StorySession, advance: Advance) {
    for event in session.take_events() {
        match event {
            StoryEvent::ChapterIntro { chapter, title } => {
                println!("{}\n", format!("== Chapter {chapter}: {title} ==").bold().cyan());
            }
            StoryEvent::StatsChanged { change, .. } => print_change(&change),
            _ => {}
        }
    }

    match advance {
        Advance::Ignored => println!("  {}\n", "(the trail is still moving)".dimmed()),
        Advance::Scene(view) => print_scene(session, &view),
        Advance::Turn(report) => print_turn(session, &report),
        Advance::Ending(report) => print_ending(&report),
    }
}

fn print_scene(session: &StorySession, view: &SceneView) {
    println!("{}\n", view.text);
    match &view.body {
        SceneBody::Choices(choices) => {
            for (i, choice) in choices.iter().enumerate() {
                println!("  {}. {choice}", i + 1);
            }
            println!();
        }
        SceneBody::Battle(battle) => {
            println!("  {}", battle.log.bold());
            if let Some(battle) = session.battle() {
                print_hp(battle);
            }
            print_moves();
        }
    }
}

fn print_turn(session: &StorySession, report: &TurnReport) {
    println!("  {}", report.text);
    if let Some(battle) = session.battle() {
        print_hp(battle);
    }
}

/// Hero HP is out of 100; enemy HP is relative to its maximum.
fn print_hp(battle: &BattleSession) {
    println!(
        "  {} {:.0}% | {} {:.0}%\n",
        battle.hero(),
        battle.hero_fraction() * 100.0,
        battle.enemy().name,
        battle.enemy_fraction() * 100.0
    );
}

fn print_ending(report: &EndingReport) {
    println!("{}\n", "== Final Outcome ==".bold().cyan());
    println!("{}\n", report.render());
}

/// Only stats whose bar moved are shown, coloured by direction.
fn print_change(change: &StatChange) {
    let parts: Vec<String> = change
        .moved()
        .map(|(stat, trend)| {
            let text = format!("{} {:+}", stat.label(), change.delta(stat));
            match trend {
                Trend::Rising => text.green().to_string(),
                Trend::Falling => text.red().to_string(),
                Trend::Steady => text,
            }
        })
        .collect();
    if !parts.is_empty() {
        println!("  [{}]", parts.join(", "));
    }
}

fn print_moves() {
    for category in MoveCategory::ALL {
        let moves: Vec<String> = category
            .moves()
            .iter()
            .enumerate()
            .map(|(i, m)| format!("{}. {}", i + 1, m.name))
            .collect();
        println!("  {:<8} {}", category.name(), moves.join("  "));
    }
    println!();
}

fn print_stats(session: &StorySession) {
    let ledger = session.ledger();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value", "Bar"]);
    for (stat, value) in ledger.iter() {
        let filled = ledger.displayed(stat) as usize;
        let empty = (stat.cap() as usize).saturating_sub(filled);
        table.add_row(vec![
            stat.label().to_string(),
            value.to_string(),
            format!("{}{}", "#".repeat(filled), ".".repeat(empty)),
        ]);
    }
    println!("{table}\n");
}
