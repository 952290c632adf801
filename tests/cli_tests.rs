//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

const GIST_LESSON: &str = r#"{
    "id": 3,
    "lesson_type": "gist",
    "title": "Ordering Coffee",
    "description": "Listen to a customer ordering coffee.",
    "steps": [
        {"type": "audio", "id": "intro", "audio_url": "/a.mp3",
         "title": "Listen to the conversation", "description": ""},
        {"type": "question", "id": "q1",
         "question": "What did the customer order?",
         "options": ["Un cafe con leche", "Un te", "Agua"],
         "correct_index": 0,
         "explanation": "The customer asked for a coffee with milk."},
        {"type": "reveal", "id": "r1",
         "correct_answer": "Un cafe con leche",
         "transcript": "Un cafe con leche, por favor.",
         "translation": "A coffee with milk, please.",
         "key_phrases": [
            {"spanish": "por favor", "english": "please"}
         ]}
    ]
}"#;

fn hearsay() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hearsay"))
}

#[test]
fn play_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();

    hearsay()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["play", "99", "--lessons-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn play_unknown_path_fails() {
    let dir = tempfile::tempdir().unwrap();

    hearsay()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["play", "missing-lesson.json", "--lessons-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lesson not found"));
}

#[test]
fn list_empty_directory_succeeds() {
    let dir = tempfile::tempdir().unwrap();

    hearsay()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["list", "--lessons-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No lessons found"));
}

#[test]
fn list_shows_lesson_titles() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("3.json"), GIST_LESSON).unwrap();

    hearsay()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["list", "--lessons-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ordering Coffee"));
}

#[test]
fn muted_playthrough_completes_with_perfect_score() {
    let dir = tempfile::tempdir().unwrap();
    let lesson_path = dir.path().join("3.json");
    std::fs::write(&lesson_path, GIST_LESSON).unwrap();
    let out_path = dir.path().join("attempt.json");

    // p: play (silent, finishes at once), c: continue,
    // 1+s: answer correctly, c: continue, c: acknowledge reveal
    hearsay()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .arg("play")
        .arg(&lesson_path)
        .args(["--mute", "--out"])
        .arg(&out_path)
        .write_stdin("p\nc\n1\ns\nc\nc\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Lesson complete"));

    let summary = std::fs::read_to_string(&out_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(json["score"], 1.0);
    assert_eq!(json["lesson_id"], 3);
    assert_eq!(json["responses"].as_array().unwrap().len(), 1);
}

#[test]
fn quitting_mid_lesson_discards_progress() {
    let dir = tempfile::tempdir().unwrap();
    let lesson_path = dir.path().join("3.json");
    std::fs::write(&lesson_path, GIST_LESSON).unwrap();
    let out_path = dir.path().join("attempt.json");

    // Quit at the first step and confirm
    hearsay()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .arg("play")
        .arg(&lesson_path)
        .args(["--mute", "--out"])
        .arg(&out_path)
        .write_stdin("q\ny\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("abandoned"));

    // The completion sink never ran
    assert!(!out_path.exists());
}

#[test]
fn config_path_prints_a_toml_path() {
    let config_home = tempfile::tempdir().unwrap();

    hearsay()
        .args(["config", "path"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_creates_the_file_once() {
    let config_home = tempfile::tempdir().unwrap();

    hearsay()
        .args(["config", "init"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .assert()
        .success();

    hearsay()
        .args(["config", "init"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_list_works_without_a_file() {
    let config_home = tempfile::tempdir().unwrap();

    hearsay()
        .args(["config", "list"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("not set"));
}
