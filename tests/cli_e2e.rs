//! End-to-end CLI tests for the auto-fiddler binary.

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

/// Binary command isolated from the user's config file and log settings.
fn auto_fiddler(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("auto-fiddler").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_binary_help_displays_usage() {
    let temp = TempDir::new().unwrap();
    auto_fiddler(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Collect ABC fiddle tunes"));
}

#[test]
fn test_binary_version_displays_version() {
    let temp = TempDir::new().unwrap();
    auto_fiddler(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto-fiddler"));
}

#[test]
fn test_binary_without_subcommand_fails() {
    let temp = TempDir::new().unwrap();
    auto_fiddler(temp.path()).assert().failure();
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let temp = TempDir::new().unwrap();
    auto_fiddler(temp.path())
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_metadata_prints_json_record() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("tune.abc");
    std::fs::write(&file, "X:1\nT:Some Title\nC:Trad.\nK:Cmaj\nabc|\n").unwrap();

    auto_fiddler(temp.path())
        .arg("metadata")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Title": "Some Title""#))
        .stdout(predicate::str::contains(r#""Composer": "Trad.""#))
        .stdout(predicate::str::contains(r#""Key": "Cmaj""#))
        .stdout(predicate::str::contains(r#""body": "abc|""#));
}

#[test]
fn test_metadata_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    auto_fiddler(temp.path())
        .arg("metadata")
        .arg(temp.path().join("absent.abc"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("absent.abc"));
}

#[test]
fn test_dedupe_then_classify_output_dir() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("downloads");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("a.abc"), "X:1\nT:A\nK:G\nG|\n").unwrap();
    std::fs::write(out.join("b.abc"), "X:1\nT:A\nK:G\nG|\n").unwrap();
    std::fs::write(out.join("c.abc"), "X:1\nT:C\nK:D\n\nX:2\nT:D\nK:A\n").unwrap();

    auto_fiddler(temp.path())
        .args(["dedupe", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicates removed: 1"));

    auto_fiddler(temp.path())
        .args(["classify", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("tunes: 1"))
        .stdout(predicate::str::contains("collections: 1"));

    assert!(out.join("collections/c.abc").is_file());
}

#[test]
fn test_split_writes_tunes_next_to_collection() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("set.abc");
    std::fs::write(&file, "X:1\nT:A\nK:G\nG|\n\nX:2\nT:B\nK:D\nD|\n").unwrap();

    auto_fiddler(temp.path())
        .arg("split")
        .arg(&file)
        .arg("--remove-original")
        .assert()
        .success()
        .stdout(predicate::str::contains("set_1.abc"))
        .stdout(predicate::str::contains("set_2.abc"));

    assert!(temp.path().join("set_2.abc").is_file());
    assert!(!file.exists());
}

#[test]
fn test_config_shows_file_values_and_cli_overrides() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("auto-fiddler");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "concurrency = 7\nextension = \".txt\"\n",
    )
    .unwrap();

    auto_fiddler(temp.path())
        .args(["config", "-e", ".abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = loaded"))
        .stdout(predicate::str::contains("concurrency = 7"))
        .stdout(predicate::str::contains("extension = .abc"));
}

#[test]
fn test_config_without_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    auto_fiddler(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found (using defaults)"))
        .stdout(predicate::str::contains("concurrency = 1"))
        .stdout(predicate::str::contains("output_dir = ./downloads"));
}

#[test]
fn test_invalid_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("auto-fiddler");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "concurrency = 0\n").unwrap();

    auto_fiddler(temp.path())
        .arg("config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("concurrency"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_partial_failure_exits_one() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="ok.abc">ok</a> <a href="gone.abc">gone</a>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok.abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("X:1\nK:G\n"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.abc"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    let config_home = temp.path().to_path_buf();
    let out_dir = out.clone();
    let page = format!("{}/index.html", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        auto_fiddler(&config_home)
            .args(["fetch", "-v", "-c", "2", "-o"])
            .arg(&out_dir)
            .arg(page)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 downloaded, 1 failed"))
        .stdout(predicate::str::contains("  saved: ").and(predicate::str::contains("ok.abc")))
        .stdout(predicate::str::contains("  failed: ").and(predicate::str::contains("gone.abc")));
    assert!(out.join("ok.abc").is_file());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_all_failed_exits_two() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="gone.abc">gone</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.abc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    let config_home = temp.path().to_path_buf();
    let page = format!("{}/index.html", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        auto_fiddler(&config_home)
            .args(["fetch", "-o"])
            .arg(config_home.join("out"))
            .arg(page)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .code(2)
        .stdout(predicate::str::contains("saved:").not());
}
