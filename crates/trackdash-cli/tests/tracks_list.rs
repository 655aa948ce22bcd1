use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;

fn write_roadmap(dir: &std::path::Path) -> std::path::PathBuf {
    let roadmap = json!({
        "title": "Demo",
        "tracks": [
            {
                "id": "core",
                "title": "Core engine",
                "status": "in_progress",
                "tasks": [
                    { "id": "t1", "title": "Parse", "status": "done" },
                    { "id": "t2", "title": "Render" }
                ]
            },
            { "id": "docs", "title": "Documentation" }
        ],
        "iterations": [{ "number": 1, "goal": "MVP", "track_ids": ["core"] }]
    });
    let path = dir.join("roadmap.json");
    fs::write(&path, roadmap.to_string()).unwrap();
    path
}

#[test]
fn test_tracks_lists_tab_separated_rows() {
    let dir = tempdir().unwrap();
    let data = write_roadmap(dir.path());

    cargo_bin_cmd!("trackdash")
        .env("TRACKDASH_HOME", dir.path())
        .arg("--data")
        .arg(&data)
        .arg("tracks")
        .assert()
        .success()
        .stdout(predicate::str::contains("core\tactive\t1/2\t1\tCore engine"))
        .stdout(predicate::str::contains("docs\ttodo\t0/0\t-\tDocumentation"));
}

#[test]
fn test_tracks_uses_data_path_from_config() {
    let dir = tempdir().unwrap();
    let data = write_roadmap(dir.path());
    fs::write(
        dir.path().join("config.toml"),
        format!("data_path = {:?}\n", data.display().to_string()),
    )
    .unwrap();

    cargo_bin_cmd!("trackdash")
        .env("TRACKDASH_HOME", dir.path())
        .arg("tracks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Core engine"));
}

#[test]
fn test_missing_roadmap_is_reported() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("trackdash")
        .env("TRACKDASH_HOME", dir.path())
        .args(["tracks", "--data"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read roadmap"));
}

#[test]
fn test_tracks_writes_log_file() {
    let dir = tempdir().unwrap();
    let data = write_roadmap(dir.path());

    cargo_bin_cmd!("trackdash")
        .env("TRACKDASH_HOME", dir.path())
        .env("TRACKDASH_LOG", "info")
        .arg("--data")
        .arg(&data)
        .arg("tracks")
        .assert()
        .success();

    assert!(dir.path().join("logs").join("trackdash.log").exists());
}
