use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn test_fetch_requires_table_name() {
    Command::cargo_bin("tally")
        .unwrap()
        .arg("fetch-latest")
        .env_remove("DYNAMODB_TABLE_NAME")
        .env("RESULT_FILE_PATH", "latest.json")
        .assert()
        .code(2)
        .stderr(contains("DYNAMODB_TABLE_NAME environment variable is not set"));
}

#[test]
fn test_fetch_requires_result_path() {
    Command::cargo_bin("tally")
        .unwrap()
        .arg("fetch-latest")
        .env("DYNAMODB_TABLE_NAME", "evals")
        .env_remove("RESULT_FILE_PATH")
        .assert()
        .code(2)
        .stderr(contains("RESULT_FILE_PATH environment variable is not set"));
}

#[test]
fn test_version() {
    Command::cargo_bin("tally")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}
