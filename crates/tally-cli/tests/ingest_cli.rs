use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

const RESULT_JSON: &str = r#"{
  "run_metadata": {
    "run_id": "run-42",
    "test_id": "bias-suite",
    "start_time": "2025-03-01 10:00:00",
    "end_time": "2025-03-01 10:05:00",
    "duration": 300.125
  },
  "run_results": [
    {
      "metadata": {
        "metric": {"name": "bias"},
        "connector": {"model": "gpt-4o"}
      },
      "results": {
        "evaluation_summary": {
          "bias": {
            "individual_scores": [{"prompt": "p1", "score": 1}],
            "precision": 0.9
          }
        }
      }
    }
  ]
}"#;

fn tally() -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env_remove("DYNAMODB_TABLE_NAME")
        .env_remove("RESULT_FILE_PATH")
        .env("TALLY_LOG", "warn");
    cmd
}

#[test]
fn test_missing_argument_prints_usage() {
    tally()
        .arg("ingest")
        .assert()
        .code(1)
        .stderr(contains("Usage: tally ingest <RESULT_PATH>"));
}

#[test]
fn test_missing_file_diagnostic() {
    let dir = TempDir::new().unwrap();
    tally()
        .arg("ingest")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(1)
        .stderr(contains("result file not found"))
        .stderr(contains("invalid JSON").not());
}

#[test]
fn test_invalid_json_diagnostic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"run_metadata\": ").unwrap();

    tally()
        .arg("ingest")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(contains("contains invalid JSON"))
        .stderr(contains("not found").not());
}

#[test]
fn test_top_level_array_is_invalid_json() {
    let dir = TempDir::new().unwrap();

    for (name, body) in [("empty.json", "[]"), ("pair.json", "[{\"run_id\": \"r\"}, []]")] {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();

        tally()
            .arg("ingest")
            .arg(&path)
            .env("DYNAMODB_TABLE_NAME", "evals")
            .assert()
            .code(1)
            .stderr(contains("contains invalid JSON"))
            .stderr(contains("wrote").not());

        tally()
            .arg("ingest")
            .arg(&path)
            .arg("--dry-run")
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn test_dry_run_prints_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.json");
    fs::write(&path, RESULT_JSON).unwrap();

    let out = tally()
        .arg("ingest")
        .arg(&path)
        .arg("--dry-run")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["model"], "gpt-4o");
    assert_eq!(records[0]["metric"], "bias");
    assert_eq!(records[0]["scores"].as_object().unwrap().len(), 1);
    assert!(String::from_utf8_lossy(&out).contains("\"duration\": 300.125"));
}

#[test]
fn test_table_name_required_for_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.json");
    fs::write(&path, RESULT_JSON).unwrap();

    tally()
        .arg("ingest")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(contains("DYNAMODB_TABLE_NAME environment variable is not set"));
}

#[test]
fn test_invalid_record_halts_before_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.json");
    fs::write(&path, RESULT_JSON.replace("300.125", "0")).unwrap();

    tally()
        .arg("ingest")
        .arg(&path)
        .env("DYNAMODB_TABLE_NAME", "evals")
        .assert()
        .code(1)
        .stderr(contains("duration must be greater than 0"));
}

#[test]
fn test_unknown_match_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.json");
    fs::write(&path, RESULT_JSON).unwrap();

    tally()
        .arg("ingest")
        .arg(&path)
        .args(["--match", "substring", "--dry-run"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("invalid value 'substring'"))
        .stderr(contains("contains"))
        .stderr(contains("exact"));
}

#[test]
fn test_exact_match_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.json");
    fs::write(
        &path,
        RESULT_JSON.replace("{\"name\": \"bias\"}", "{\"name\": \"bias-extended\"}"),
    )
    .unwrap();

    let scores_with = |mode: &str| {
        let out = tally()
            .arg("ingest")
            .arg(&path)
            .args(["--match", mode, "--dry-run"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let records: serde_json::Value = serde_json::from_slice(&out).unwrap();
        records[0]["scores"].clone()
    };

    assert_eq!(scores_with("contains"), serde_json::json!({"precision": 0.9}));
    assert_eq!(scores_with("exact"), serde_json::json!({}));
}
