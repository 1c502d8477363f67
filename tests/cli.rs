use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn rank_without_api_key_exits_one_before_any_request() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("yt-rank").unwrap();
    cmd.current_dir(dir.path())
        .env("YT_RANK_DATA_DIR", dir.path())
        .env_remove("YOUTUBE_API_KEY")
        .args(["rank", "@veritasium"]);

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("YOUTUBE_API_KEY not set"))
        .stderr(predicate::str::contains("yt-rank init"))
        .stderr(predicate::str::contains("Resolving channel").not());
}

#[test]
fn init_writes_the_key_to_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("yt-rank").unwrap();
    cmd.current_dir(dir.path())
        .env("YT_RANK_DATA_DIR", dir.path())
        .args(["init", "--api-key", "AIzaTestKey123"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Config saved"));

    let saved = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    assert_eq!(saved, "YOUTUBE_API_KEY=AIzaTestKey123\n");
}
