use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fam(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fam").unwrap();
    cmd.env("FAM_CLI_DATA_DIR", dir.path()).env_remove("FAM_LOG");
    cmd
}

fn register(dir: &TempDir, name: &str, archetype: &str, account: &str, balance: &str) {
    fam(dir)
        .args([
            "register",
            name,
            "--dob",
            "2000-01-01",
            "--type",
            archetype,
            "--account",
            account,
            "--bank",
            "Maple Bank",
            "--balance",
            balance,
            "--games",
            "40",
            "--clothing",
            "40",
            "--eating-out",
            "50",
            "--misc",
            "40",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Registered {}", name)));
}

#[test]
fn init_writes_settings() {
    let dir = TempDir::new().unwrap();

    fam(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());

    fam(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:      Yes"))
        .stdout(predicate::str::contains("2 transactions per 30 days"));
}

#[test]
fn rebel_walkthrough() {
    let dir = TempDir::new().unwrap();
    register(&dir, "Sam", "rebel", "123-456", "100");

    fam(&dir)
        .args(["record", "Sam", "eating-out", "160", "--merchant", "Diner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("insufficient funds"));

    fam(&dir)
        .args(["record", "sam", "3", "50", "--merchant", "Diner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded:"))
        .stdout(predicate::str::contains(
            "Locked: You have exceeded your budget limit.",
        ));

    fam(&dir)
        .args(["record", "Sam", "3", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transaction not recorded: Eating Out is locked.",
        ));

    fam(&dir)
        .args(["budget", "Sam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Locked"));

    fam(&dir)
        .args(["transaction", "list", "Sam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diner"))
        .stdout(predicate::str::contains("$50.00"));
}

#[test]
fn account_show_lists_budgets_and_history() {
    let dir = TempDir::new().unwrap();
    register(&dir, "Ana", "angel", "9-9", "80");

    fam(&dir)
        .args(["record", "Ana", "games", "12.50", "-m", "Arcade"])
        .assert()
        .success();

    fam(&dir)
        .args(["account", "show", "Ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account: 9-9"))
        .stdout(predicate::str::contains("$67.50"))
        .stdout(predicate::str::contains("Games & Entertainment"))
        .stdout(predicate::str::contains("Arcade"));

    fam(&dir)
        .args(["audit", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"));
}

#[test]
fn duplicate_user_is_rejected() {
    let dir = TempDir::new().unwrap();
    register(&dir, "Sam", "rebel", "1", "10");

    fam(&dir)
        .args([
            "register",
            "SAM",
            "--dob",
            "2000-01-01",
            "--type",
            "rebel",
            "--account",
            "2",
            "--bank",
            "Maple Bank",
            "--games",
            "1",
            "--clothing",
            "1",
            "--eating-out",
            "1",
            "--misc",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn unknown_user_fails() {
    let dir = TempDir::new().unwrap();

    fam(&dir)
        .args(["budget", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: Nobody"));
}

#[test]
fn user_list_shows_registered_users() {
    let dir = TempDir::new().unwrap();
    register(&dir, "Tom", "troublemaker", "77", "20");

    fam(&dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tom"))
        .stdout(predicate::str::contains("TroubleMaker"));
}
