//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn matzip() -> Command {
    let mut cmd = Command::cargo_bin("matzip").unwrap();
    // keep the user's environment out of the picture
    cmd.env_remove("DATABASE_URL").env_remove("RUST_LOG");
    cmd
}

// === Serve / Migrate ===

#[test]
fn test_serve_help() {
    matzip()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Apply schema migrations before serving"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    let dir = TempDir::new().unwrap();
    matzip()
        .env("MATZIP_CONFIG", dir.path().join("absent.toml"))
        .current_dir(dir.path())
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

// === Admin ===

#[test]
fn test_admin_list_shows_registry() {
    matzip()
        .arg("admin")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("restaurant_category"))
        .stdout(predicate::str::contains("/admin/reviews"));
}

#[test]
fn test_admin_show_by_path() {
    matzip()
        .arg("admin")
        .arg("show")
        .arg("restaurants")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"autocomplete_fields\""))
        .stdout(predicate::str::contains("\"tabular\""));
}

#[test]
fn test_admin_show_unknown_model() {
    matzip()
        .arg("admin")
        .arg("show")
        .arg("boards")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown admin model"));
}

// === Config ===

#[test]
fn test_config_init_then_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matzip/config.toml");

    matzip()
        .env("MATZIP_CONFIG", &path)
        .arg("config")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));
    assert!(path.exists());

    // refuses to clobber without --force
    matzip()
        .env("MATZIP_CONFIG", &path)
        .arg("config")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    matzip()
        .env("MATZIP_CONFIG", &path)
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_validate_reports_missing_url() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nbind = \"127.0.0.1:3030\"\n").unwrap();

    matzip()
        .env("MATZIP_CONFIG", &path)
        .arg("config")
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("database.url"));
}

#[test]
fn test_config_get_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[database]\nurl = \"postgres://localhost/matzip\"\n").unwrap();

    matzip()
        .env("MATZIP_CONFIG", &path)
        .arg("config")
        .arg("get")
        .arg("database.url")
        .assert()
        .success()
        .stdout(predicate::str::contains("postgres://localhost/matzip"));
}

// === Completions ===

#[test]
fn test_completions_bash() {
    matzip()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("matzip"));
}
