// Drives the compiled binary end to end. Every test points --config at a
// temp file so the user's stored config is never read or written.

use assert_cmd::Command;
use std::fs;
use tempfile::{tempdir, TempDir};

fn mealpace(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mealpace").unwrap();
    cmd.arg("--config").arg(dir.path().join("scoring.json"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_session(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

const STEADY_CSV: &str = "timestamp,foodRemaining\n0,100\n10000,95\n20000,90\n30000,85\n40000,80\n";

#[test]
fn score_prints_text_report() {
    let dir = tempdir().unwrap();
    let file = write_session(&dir, "meal.csv", STEADY_CSV);

    let out = mealpace(&dir).arg("score").arg(&file).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Ideal Rate Intervals: 4/4"));
    assert!(stdout.contains("Streaks: 1"));
    assert!(stdout.contains("Session Duration: 0:40"));
}

#[test]
fn score_json_with_visualization() {
    let dir = tempdir().unwrap();
    let file = write_session(&dir, "meal.csv", STEADY_CSV);

    let out = mealpace(&dir)
        .args(["score", "--json", "--viz"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["result"]["sessionStats"]["intervalCount"], 4);
    assert_eq!(
        json["visualization"]["rateChart"].as_array().map(|a| a.len()),
        Some(4)
    );
}

#[test]
fn score_fails_on_single_sample() {
    let dir = tempdir().unwrap();
    let file = write_session(&dir, "one.json", r#"[{"timestamp":1000,"foodRemaining":100}]"#);

    let out = mealpace(&dir).arg("score").arg(&file).output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("at least 2 samples"));
}

#[test]
fn pace_reports_last_intervals() {
    let dir = tempdir().unwrap();
    let file = write_session(
        &dir,
        "meal.json",
        r#"[
            {"timestamp":0,"foodRemaining":100},
            {"timestamp":10000,"foodRemaining":95},
            {"timestamp":20000,"foodRemaining":80},
            {"timestamp":30000,"foodRemaining":80}
        ]"#,
    );

    let out = mealpace(&dir)
        .args(["pace", "--last", "2", "--json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let statuses: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["too-fast", "stopped"]);
}

#[test]
fn config_set_persists_and_applies() {
    let dir = tempdir().unwrap();

    let set = mealpace(&dir)
        .args(["config", "set", "--ideal-rate", "1.0", "--algorithm", "threshold"])
        .output()
        .unwrap();
    assert!(set.status.success());

    let stored: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("scoring.json")).unwrap()).unwrap();
    assert_eq!(stored["idealRate"], 1.0);
    assert_eq!(stored["scoringAlgorithm"], "threshold");
    assert_eq!(stored["tolerance"], 0.2);

    // 0.5%/s is now too slow
    let file = write_session(&dir, "meal.csv", STEADY_CSV);
    let out = mealpace(&dir).arg("score").arg(&file).output().unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Ideal Rate Intervals: 0/4"));

    let reset = mealpace(&dir).args(["config", "reset"]).output().unwrap();
    assert!(reset.status.success());
    let stored: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("scoring.json")).unwrap()).unwrap();
    assert_eq!(stored["idealRate"], 0.5);
}

#[test]
fn demo_is_reproducible_with_seed() {
    let dir = tempdir().unwrap();
    let run = |seed: &str| {
        mealpace(&dir)
            .args(["demo", "--json", "--seed", seed])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run("11"), run("11"));

    let json: serde_json::Value = serde_json::from_slice(&run("11")).unwrap();
    assert_eq!(json["sessionStats"]["intervalCount"], 19);
    assert!(json["totalScore"].as_f64().unwrap() > 0.0);
}

#[test]
fn demo_scores_intervals_despite_stored_duration_bounds() {
    let dir = tempdir().unwrap();
    let set = mealpace(&dir)
        .args(["config", "set", "--min-interval", "10", "--timestamp-unit", "seconds"])
        .output()
        .unwrap();
    assert!(set.status.success());

    let out = mealpace(&dir)
        .args(["demo", "--json", "--seed", "3", "--count", "10"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["sessionStats"]["intervalCount"], 9);
    assert!(json["totalScore"].as_f64().unwrap() > 0.0);
}
