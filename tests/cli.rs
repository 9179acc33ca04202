//! End-to-end CLI tests against a temporary data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn shows_help() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal finance tracker"));
}

#[test]
fn wallet_lifecycle() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["wallet", "create", "Cash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created wallet"));

    fintrack(&dir)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash"));

    fintrack(&dir)
        .args(["wallet", "delete", "Cash"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No wallets"));
}

#[test]
fn expense_flows_into_summary() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["wallet", "create", "Cash"])
        .assert()
        .success();

    fintrack(&dir)
        .args([
            "expense", "add", "Cash", "12.50", "Groceries", "--date", "2025-01-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense"));

    fintrack(&dir)
        .args(["report", "summary", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$12.50"));

    fintrack(&dir)
        .args(["report", "breakdown", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn unknown_wallet_is_an_error() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["expense", "add", "Nope", "5", "Groceries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn budget_status_reports_health() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["wallet", "create", "Cash"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["category", "create", "Groceries"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["budget", "set", "Groceries", "100", "--period", "2025-01"])
        .assert()
        .success();
    fintrack(&dir)
        .args([
            "expense", "add", "Cash", "150", "Groceries", "--date", "2025-01-10",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args(["budget", "status", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeded"));
}

#[test]
fn reimbursement_link_excludes_expense_from_totals() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["wallet", "create", "Cash"])
        .assert()
        .success();

    let add = fintrack(&dir)
        .args([
            "expense",
            "add",
            "Cash",
            "80",
            "Travel",
            "--reimbursable",
            "--date",
            "2025-01-05",
        ])
        .assert()
        .success();
    let expense_id = extract_id(&stdout_of(&add), "Added expense ");

    let add = fintrack(&dir)
        .args([
            "income", "add", "Cash", "80", "Employer", "--date", "2025-01-20",
        ])
        .assert()
        .success();
    let income_id = extract_id(&stdout_of(&add), "Added income ");

    fintrack(&dir)
        .args(["income", "link", income_id.as_str(), expense_id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked"));

    // The reimbursed expense and the reimbursement income both drop out
    fintrack(&dir)
        .args(["report", "summary", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data"));

    fintrack(&dir)
        .args(["report", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("check out"));
}

#[test]
fn export_writes_named_csv() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["wallet", "create", "Cash"])
        .assert()
        .success();
    fintrack(&dir)
        .args([
            "expense", "add", "Cash", "9.99", "Groceries", "--date", "2025-01-10",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args([
            "export",
            "expenses",
            "--period",
            "2025-01",
            "--wallet",
            "Cash",
            "--out",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("fintrack-expenses-cash-"));

    let files: Vec<_> = std::fs::read_dir(out.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
    let content = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("Groceries"));
    assert!(content.contains("9.99"));
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

fn extract_id(stdout: &str, prefix: &str) -> String {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix(prefix))
        .expect("id line in output")
        .trim()
        .to_string()
}
