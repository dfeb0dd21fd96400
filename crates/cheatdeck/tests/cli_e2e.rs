#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "default_language": "en",
  "supported_languages": {
    "en": {"name": "English", "flag": "🇺🇸", "interface": {
      "error_language_unsupported": "Language not supported. Available languages"
    }},
    "es": {"name": "Español", "flag": "🇪🇸", "interface": {
      "error_language_unsupported": "Idioma no soportado. Idiomas disponibles"
    }}
  }
}"#;

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("languages.json"), CATALOG).unwrap();
        Self { temp }
    }

    fn data_dir(&self) -> PathBuf {
        self.temp.path().join("cheatsheets")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("cheatdeck"));
        cmd.env_remove("CHEATDECK_DATA_PATH")
            .env_remove("CHEATDECK_LANGUAGES_FILE")
            .env_remove("CHEATDECK_DEFAULT_LANGUAGE")
            .env_remove("CHEATDECK_LANGUAGE")
            .arg("--config")
            .arg(self.temp.path().join("config.toml"))
            .arg("--data")
            .arg(self.data_dir())
            .arg("--languages")
            .arg(self.temp.path().join("languages.json"));
        cmd
    }
}

#[test]
fn test_seed_then_list() {
    let env = Env::new();

    env.cmd()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 2"));

    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Git Commands"))
        .stdout(predicate::str::contains("Linux Commands"));

    env.cmd()
        .args(["list", "--tag", "git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Git Commands"))
        .stdout(predicate::str::contains("Linux Commands").not());

    env.cmd()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing seeded"));
}

#[test]
fn test_create_show_and_delete() {
    let env = Env::new();

    env.cmd()
        .args([
            "create",
            "Docker Commands",
            "--tag",
            "Docker",
            "--item",
            "docker ps::List containers::docker ps -a",
        ])
        .assert()
        .success()
        .stdout("docker-commands\n");

    assert!(env.data_dir().join("docker-commands.json").exists());

    env.cmd()
        .args(["--json", "show", "docker-commands"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Docker Commands\""))
        .stdout(predicate::str::contains("\"docker\""))
        .stdout(predicate::str::contains("\"language\": \"en\""));

    env.cmd()
        .args(["delete", "docker-commands"])
        .assert()
        .success();

    env.cmd()
        .args(["show", "docker-commands"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_delete_rejects_paths_outside_collection() {
    let env = Env::new();
    let victim = env.temp.path().join("victim.json");
    fs::write(&victim, "{}").unwrap();

    env.cmd()
        .args(["delete", "../victim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cheatsheet name"));

    assert!(victim.exists());
}

#[test]
fn test_create_reports_validation_problems() {
    let env = Env::new();

    env.cmd()
        .args(["create", "Empty", "--lang", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Language not supported. Available languages: en, es",
        ))
        .stderr(predicate::str::contains("There must be at least one item"));

    assert!(!env.data_dir().join("empty.json").exists());
}

#[test]
fn test_migrate_and_languages() {
    let env = Env::new();
    env.cmd()
        .args(["create", "Git", "--item", "git log::History"])
        .assert()
        .success();

    env.cmd()
        .args(["migrate", "en", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated 1"));

    env.cmd()
        .args(["list", "--lang", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Git"));

    env.cmd()
        .args(["--ui-lang", "es", "migrate", "es", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Idioma no soportado"));

    env.cmd()
        .args(["--json", "languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"));
}

#[test]
fn test_tag_maintenance() {
    let env = Env::new();
    env.cmd().arg("seed").assert().success();

    env.cmd()
        .args(["rename-tag", "terminal", "shell"])
        .assert()
        .success();

    env.cmd()
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("shell"))
        .stdout(predicate::str::contains("terminal").not());

    env.cmd()
        .args(["delete-tag", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no cheatsheet uses tag 'nope'"));
}

#[test]
fn test_validate_catalog() {
    let env = Env::new();
    env.cmd().arg("validate-catalog").assert().success();

    let broken = env.temp.path().join("broken.json");
    fs::write(
        &broken,
        r#"{"default_language": "de", "supported_languages": {"en": {}}}"#,
    )
    .unwrap();

    env.cmd()
        .arg("validate-catalog")
        .arg(&broken)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Language 'en': missing 'name' field"))
        .stdout(predicate::str::contains(
            "Default language 'de' is not in supported_languages",
        ));
}

#[test]
fn test_add_language_leaves_broken_catalog_alone() {
    let env = Env::new();
    let catalog = env.temp.path().join("languages.json");
    let broken = r#"{"supported_languages": {"de": {"name": "Deutsch"}"#;
    fs::write(&catalog, broken).unwrap();

    env.cmd()
        .args(["add-language", "fr", "Français"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    assert_eq!(fs::read_to_string(&catalog).unwrap(), broken);
}

#[test]
fn test_config_reads_file() {
    let env = Env::new();
    fs::write(env.temp.path().join("config.toml"), "current_tag = \"git\"\n").unwrap();

    env.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("current_tag = git"));
}
