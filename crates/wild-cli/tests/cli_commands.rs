//! Integration tests for the wild-cli binary commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wild() -> Command {
    Command::cargo_bin("wild").unwrap()
}

/// A two-scene story with one battle.
const TINY_STORY: &str = r#"{
    "start": 1,
    "scenes": [
        { "id": 1, "chapter": 1, "chapterTitle": "The Yard", "text": "A dog growls.",
          "type": "story",
          "choices": [ { "text": "Stand your ground", "effects": { "wildness": 1 }, "next": 2 } ] },
        { "id": 2, "chapter": 1, "chapterTitle": "The Yard", "text": "It lunges.",
          "type": "battle", "enemy": "pup", "nextWin": "end", "nextLose": "end" }
    ],
    "enemies": {
        "pup": { "name": "Pup", "maxHp": 5, "moves": [ { "name": "Yip", "damage": 1 } ] }
    }
}"#;

fn story_file(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("story.json");
    fs::write(&path, json).unwrap();
    path
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_builtin_story() {
    wild()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("33 scenes, 7 chapters, 3 battles"));
}

#[test]
fn check_rejects_dangling_target() {
    let dir = TempDir::new().unwrap();
    let path = story_file(
        &dir,
        r#"{ "start": 1, "scenes": [
            { "id": 1, "chapter": 1, "chapterTitle": "A", "text": "x", "type": "story",
              "choices": [ { "text": "go", "next": 9 } ] } ] }"#,
    );
    wild()
        .args(["check", "--story"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scene 9"));
}

#[test]
fn check_rejects_non_exhaustive_branches() {
    let dir = TempDir::new().unwrap();
    let path = story_file(
        &dir,
        r#"{ "start": 1, "scenes": [
            { "id": 1, "chapter": 1, "chapterTitle": "A", "text": "x", "type": "story",
              "choices": [ { "text": "fork", "nextByStats": [
                  { "condition": { "atLeast": { "stat": "wildness", "value": 8 } }, "next": "end" },
                  { "condition": { "below": { "stat": "wildness", "value": 5 } }, "next": "end" }
              ] } ] } ] }"#,
    );
    wild()
        .args(["check", "--story"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not cover every case"));
}

#[test]
fn check_missing_file() {
    wild()
        .args(["check", "--story", "/nonexistent/story.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// scenes / export
// ---------------------------------------------------------------------------

#[test]
fn scenes_lists_a_chapter() {
    wild()
        .args(["scenes", "--chapter", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("battle: spitz"))
        .stdout(predicate::str::contains("7 scenes"));
}

#[test]
fn export_round_trips_through_check() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("wild.json");
    wild()
        .args(["export", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let json = fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"chapterTitle\": \"Stolen From Home\""));
    wild()
        .args(["check", "--story"])
        .arg(&out)
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_opens_the_first_chapter() {
    let dir = TempDir::new().unwrap();
    wild()
        .args(["play", "--fast", "--seed", "1", "--save"])
        .arg(dir.path().join("save.json"))
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 1: Stolen From Home"))
        .stdout(predicate::str::contains("You awaken in a wooden crate"))
        .stdout(predicate::str::contains("1. A pet, confused and loyal"));
}

#[test]
fn play_tiny_story_to_the_end() {
    let dir = TempDir::new().unwrap();
    let path = story_file(&dir, TINY_STORY);
    wild()
        .args(["play", "--fast", "--seed", "7", "--story"])
        .arg(&path)
        .arg("--save")
        .arg(dir.path().join("save.json"))
        .write_stdin("1\nattack 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pup appears! Choose your move."))
        .stdout(predicate::str::contains("Buck 100% | Pup 100%"))
        .stdout(predicate::str::contains("Pup 0%"))
        .stdout(predicate::str::contains("Pup falls. The wild remembers your strength."))
        .stdout(predicate::str::contains("Chapter 1, Scene 1: Stand your ground"))
        .stdout(predicate::str::contains("Chapter 1, Scene 2: [BATTLE] Bite"))
        .stdout(predicate::str::contains("Final Stats:"));
}

/// Loyalty is untouched by drift and events, so only choices move it.
const LOYAL_STORY: &str = r#"{
    "start": 1,
    "scenes": [
        { "id": 1, "chapter": 1, "chapterTitle": "Camp", "text": "Thornton kneels.",
          "type": "story",
          "choices": [ { "text": "Go to him", "effects": { "loyalty": 25 }, "next": 3 } ] },
        { "id": 3, "chapter": 1, "chapterTitle": "Camp", "text": "He laughs.",
          "type": "story",
          "choices": [ { "text": "Stay", "effects": { "loyalty": 3 }, "next": "end" } ] }
    ]
}"#;

#[test]
fn play_shows_only_stats_whose_bar_moved() {
    let dir = TempDir::new().unwrap();
    let path = story_file(&dir, LOYAL_STORY);
    wild()
        .args(["play", "--fast", "--story"])
        .arg(&path)
        .arg("--save")
        .arg(dir.path().join("save.json"))
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loyalty +25"))
        .stdout(predicate::str::contains("Loyalty +3").not())
        .stdout(predicate::str::contains("Loyalty: 28"));
}

#[test]
fn play_save_writes_camel_case_snapshot() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("save.json");
    wild()
        .args(["play", "--fast", "--seed", "2", "--save"])
        .arg(&save)
        .write_stdin("1\nsave\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    let raw = fs::read_to_string(&save).unwrap();
    assert!(raw.contains("\"currentSceneId\":1"));
    assert!(raw.contains("\"pathLog\":[{\"sceneId\":0"));
    assert!(raw.contains("\"theme\":\"light\""));
}

#[test]
fn play_load_reports_missing_and_corrupt_saves() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("save.json");
    wild()
        .args(["play", "--fast", "--save"])
        .arg(&save)
        .write_stdin("load\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to restore."));

    fs::write(&save, "{ definitely not a save").unwrap();
    wild()
        .args(["play", "--fast", "--save"])
        .arg(&save)
        .write_stdin("load\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to restore: "));
}

#[test]
fn play_rejects_moves_outside_battle() {
    let dir = TempDir::new().unwrap();
    wild()
        .args(["play", "--fast", "--save"])
        .arg(dir.path().join("save.json"))
        .write_stdin("attack 1\n9\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("no battle in progress"))
        .stdout(predicate::str::contains("invalid choice: 8"));
}
