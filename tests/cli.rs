use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct TestEnv {
    _tmp: TempDir,
    store: PathBuf,
    repo: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let store = tmp.path().join("profiles.json");
        let repo = tmp.path().join("repo");
        fs::create_dir_all(&repo).expect("create repo dir");
        Self {
            _tmp: tmp,
            store,
            repo,
        }
    }

    /// Command whose git program does not exist, so identity reads degrade
    /// and nothing outside the temp dir is touched.
    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("git-profile");
        cmd.env_remove("GIT_PROFILE_STORE")
            .env_remove("GIT_PROFILE_GIT")
            .arg("--store")
            .arg(&self.store)
            .arg("--git")
            .arg("git-profile-test-missing-git")
            .arg("--repo")
            .arg(&self.repo);
        cmd
    }

    fn stored(&self) -> serde_json::Value {
        let content = fs::read_to_string(&self.store).expect("read store");
        serde_json::from_str(&content).expect("valid json store")
    }
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("git-profile");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_list_without_store() {
    let env = TestEnv::new();
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ℹ️  No saved profiles."));
    assert!(!env.store.exists());
}

#[test]
fn test_add_then_list() {
    let env = TestEnv::new();
    env.cmd()
        .args(["add", "work", "--name", "Jane Doe", "--email", "jane@co.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'work' added"));

    assert_eq!(
        env.stored(),
        serde_json::json!([
            {"profile_name": "work", "name": "Jane Doe", "email": "jane@co.com"}
        ])
    );

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe").and(predicate::str::contains("jane@co.com")));
}

#[test]
fn test_add_missing_field_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["add", "work", "--name", "Jane Doe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email field is required"));
    assert!(!env.store.exists());
}

#[test]
fn test_add_duplicate_needs_force() {
    let env = TestEnv::new();
    env.cmd()
        .args(["add", "work", "-n", "Jane", "-e", "old@co.com"])
        .assert()
        .success();

    // stdin is not a terminal, so the overwrite prompt answers no
    env.cmd()
        .args(["add", "work", "-n", "Jane", "-e", "new@co.com"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(env.stored()[0]["email"], "old@co.com");

    env.cmd()
        .args(["add", "work", "-n", "Jane", "-e", "new@co.com", "--force"])
        .assert()
        .success();
    assert_eq!(env.stored()[0]["email"], "new@co.com");
}

#[test]
fn test_current_without_git_is_not_configured() {
    let env = TestEnv::new();
    env.cmd()
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:  Not configured"));
}

#[test]
fn test_backup_without_identity_is_a_no_op() {
    let env = TestEnv::new();
    env.cmd()
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("ℹ️  Nothing to back up"));
    assert!(!env.store.exists());
}

#[test]
fn test_add_from_current_needs_identity() {
    let env = TestEnv::new();
    env.cmd()
        .args(["add", "--from-current"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn test_apply_reports_git_failure() {
    let env = TestEnv::new();
    env.cmd()
        .args(["add", "work", "-n", "Jane", "-e", "jane@co.com"])
        .assert()
        .success();

    env.cmd()
        .args(["apply", "work", "--scope", "global"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to apply profile 'work'"));
}

#[test]
fn test_apply_rejects_unknown_scope() {
    let env = TestEnv::new();
    env.cmd()
        .args(["apply", "work", "--scope", "system"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scope"));
}

#[test]
fn test_delete_by_position() {
    let env = TestEnv::new();
    for (profile, email) in [("a", "a@x.com"), ("b", "b@x.com")] {
        env.cmd()
            .args(["add", profile, "-n", "Someone", "-e", email])
            .assert()
            .success();
    }

    env.cmd()
        .args(["delete", "1"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠️  Deletion cancelled."));
    assert_eq!(env.stored().as_array().map(Vec::len), Some(2));

    env.cmd()
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'a' deleted."));
    assert_eq!(env.stored()[0]["profile_name"], "b");
}

#[test]
fn test_show_unknown_profile() {
    let env = TestEnv::new();
    env.cmd()
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[cfg(unix)]
mod with_fake_git {
    use super::*;

    /// Run as `sh config <args>`: records the arguments, accepts scoped
    /// writes, and reports every read as unset.
    const FAKE_GIT: &str = r#"echo "$@" >> calls.log
case "$1" in
  --local|--global) exit 0 ;;
esac
exit 1
"#;

    fn fake_cmd(env: &TestEnv) -> Command {
        fs::write(env.repo.join("config"), FAKE_GIT).expect("write fake git");
        let mut cmd = cargo_bin_cmd!("git-profile");
        cmd.arg("--store")
            .arg(&env.store)
            .arg("--git")
            .arg("sh")
            .arg("--repo")
            .arg(&env.repo);
        cmd
    }

    fn calls(repo: &Path) -> String {
        fs::read_to_string(repo.join("calls.log")).unwrap_or_default()
    }

    #[test]
    fn test_local_apply_uses_local_flag() {
        let env = TestEnv::new();
        fake_cmd(&env)
            .args(["add", "work", "-n", "Jane Doe", "-e", "jane@co.com"])
            .assert()
            .success();

        fake_cmd(&env)
            .args(["apply", "work"])
            .assert()
            .success()
            .stdout(predicate::str::contains("applied to this repository"));

        let log = calls(&env.repo);
        assert!(log.contains("--local user.name Jane Doe"));
        assert!(log.contains("--local user.email jane@co.com"));
        assert!(!log.contains("--global"));
    }

    #[test]
    fn test_global_apply_uses_global_flag() {
        let env = TestEnv::new();
        fake_cmd(&env)
            .args(["add", "home", "-n", "Jane", "-e", "jane@home.org"])
            .assert()
            .success();

        fake_cmd(&env)
            .args(["apply", "1", "--scope", "global"])
            .assert()
            .success()
            .stdout(predicate::str::contains("applied globally"));

        let log = calls(&env.repo);
        assert!(log.contains("--global user.name Jane"));
        assert!(log.contains("--global user.email jane@home.org"));
        assert!(!log.contains("--local"));
    }
}
