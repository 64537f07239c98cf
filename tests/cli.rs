use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct TestEnv {
    _tmp: TempDir,
    data_dir: std::path::PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let data_dir = tmp.path().join("data");
        Self {
            _tmp: tmp,
            data_dir,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cineshelf").expect("binary exists");
        // Favorites subcommands must work offline, without an API key.
        cmd.env_remove("TMDB_API_KEY")
            .env("CINESHELF_DATA_DIR", &self.data_dir);
        cmd
    }
}

#[test]
fn favorites_list_starts_empty() {
    let env = TestEnv::new();
    env.cmd()
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn favorites_add_list_remove_round_trip() {
    let env = TestEnv::new();
    env.cmd()
        .args(["favorites", "add", "27205"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 27205 to favorites."));
    env.cmd()
        .args(["favorites", "add", "157336"])
        .assert()
        .success();
    env.cmd()
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::eq("27205\n157336\n"));
    env.cmd()
        .args(["favorites", "remove", "27205"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 27205 from favorites."));
    env.cmd()
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::eq("157336\n"));
}

#[test]
fn favorites_add_is_idempotent_across_invocations() {
    let env = TestEnv::new();
    env.cmd().args(["favorites", "add", "27205"]).assert().success();
    env.cmd().args(["favorites", "add", "27205"]).assert().success();
    env.cmd()
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::eq("27205\n"));
}

#[test]
fn favorites_defaults_to_list() {
    let env = TestEnv::new();
    env.cmd().args(["favorites", "add", "550"]).assert().success();
    env.cmd()
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::eq("550\n"));
}

#[test]
fn data_dir_flag_overrides_the_environment() {
    let env = TestEnv::new();
    let other = TempDir::new().unwrap();
    env.cmd()
        .args(["favorites", "add", "27205"])
        .args(["--data-dir", other.path().to_str().unwrap()])
        .assert()
        .success();
    // The env-var directory stays untouched.
    env.cmd()
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    env.cmd()
        .args(["favorites", "list"])
        .args(["--data-dir", other.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::eq("27205\n"));
}

#[test]
fn network_commands_require_an_api_key() {
    let env = TestEnv::new();
    env.cmd()
        .arg("popular")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}
