use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

fn asset_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("outline")).unwrap();
    fs::write(dir.path().join("outline/home.svg"), "<svg>home</svg>").unwrap();
    fs::write(dir.path().join("outline/bell.svg"), "<svg>bell</svg>").unwrap();
    dir
}

fn iconcache(dir: &Path) -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("iconcache");
    let mut cmd = Command::new(bin);
    cmd.env_remove("RUST_LOG")
        .env("ICONCACHE_SOURCE__KIND", "dir")
        .arg("--asset-dir")
        .arg(dir);
    cmd
}

#[test]
fn fetch_prints_asset_body() {
    let dir = asset_dir();
    let assert = iconcache(dir.path())
        .args(["fetch", "outline", "home"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    assert_eq!(stdout.trim_end(), "<svg>home</svg>");
}

#[test]
fn fetch_json_reports_size() {
    let dir = asset_dir();
    let assert = iconcache(dir.path())
        .args(["--output", "json", "fetch", "outline", "bell"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["variant"].as_str(), Some("outline"));
    assert_eq!(value["name"].as_str(), Some("bell"));
    assert_eq!(value["bytes"].as_u64(), Some(15));
    assert_eq!(value["body"].as_str(), Some("<svg>bell</svg>"));
}

#[test]
fn fetch_of_missing_asset_fails() {
    let dir = asset_dir();
    let assert = iconcache(dir.path())
        .args(["fetch", "outline", "ghost"])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 output");
    assert!(stderr.contains("outline/ghost"), "stderr: {stderr}");
}

#[test]
fn preload_reports_failures_without_failing() {
    let dir = asset_dir();
    let assert = iconcache(dir.path())
        .args([
            "--output",
            "json",
            "preload",
            "outline:home",
            "outline:ghost",
            "outline:bell",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["resolved"].as_u64(), Some(2));
    assert_eq!(value["failed"].as_u64(), Some(1));

    let assets = value["assets"].as_array().unwrap();
    assert_eq!(assets.len(), 3);
    assert_eq!(assets[1]["asset"].as_str(), Some("outline/ghost"));
    assert_eq!(assets[1]["cached"].as_bool(), Some(false));
    assert_eq!(assets[2]["cached"].as_bool(), Some(true));
}

#[test]
fn preload_reads_targets_from_file() {
    let dir = asset_dir();
    let list = dir.path().join("icons.txt");
    fs::write(&list, "# warm set\noutline:home\n\noutline:bell\n").unwrap();

    let assert = iconcache(dir.path())
        .args(["preload", "--from-file"])
        .arg(&list)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    assert!(stdout.starts_with("preloaded 2 asset(s), 0 failed"), "stdout: {stdout}");
}

#[test]
fn preload_rejects_malformed_target() {
    let dir = asset_dir();
    iconcache(dir.path())
        .args(["preload", "home"])
        .assert()
        .failure();
}
