use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::{json, Value};
use tempfile::TempDir;

const ACC_A: &str = "a0000000-0000-4000-8000-000000000001";
const ACC_B: &str = "a0000000-0000-4000-8000-000000000002";
const TASK: &str = "d0000000-0000-4000-8000-000000000001";

struct Fixture {
    dir: TempDir,
    snapshot: PathBuf,
}

impl Fixture {
    fn new(document: &Value) -> Self {
        let dir = TempDir::new().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        std::fs::write(&snapshot, serde_json::to_string_pretty(document).unwrap()).unwrap();
        Self { dir, snapshot }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("fintrack").unwrap();
        cmd.env("FINTRACK_DATA_DIR", self.dir.path().join("config"))
            .env_remove("FINTRACK_SNAPSHOT")
            .env_remove("RUST_LOG")
            .arg("--snapshot")
            .arg(&self.snapshot);
        cmd
    }

    fn saved(&self) -> Value {
        read_json(&self.snapshot)
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn transaction(id: u32, kind: &str, amount: f64, date: &str) -> Value {
    json!({
        "id": format!("b0000000-0000-4000-8000-{:012}", id),
        "type": kind,
        "amount": amount,
        "currency": "DOP",
        "date": date,
        "accountId": ACC_A,
        "category": "General"
    })
}

/// Two DOP accounts: income 100 and expense 30 on A, transfer 20 from A to B
fn scenario() -> Value {
    let mut transfer = transaction(3, "transfer", 20.0, "2024-03-03");
    transfer["transferToAccountId"] = json!(ACC_B);
    transfer.as_object_mut().unwrap().remove("category");

    json!({
        "accounts": [
            {"id": ACC_A, "name": "Popular", "type": "checking", "currency": "DOP"},
            {"id": ACC_B, "name": "Ahorro", "type": "savings", "currency": "DOP"}
        ],
        "transactions": [
            transaction(1, "income", 100.0, "2024-03-01"),
            transaction(2, "expense", 30.0, "2024-03-02"),
            transfer
        ],
        "recurringTransactions": [{
            "id": "c0000000-0000-4000-8000-000000000001",
            "description": "Alquiler",
            "amount": 25000,
            "type": "expense",
            "category": "Vivienda",
            "currency": "DOP",
            "accountId": ACC_B,
            "frequency": "monthly",
            "startDate": "2024-01-31"
        }],
        "tasks": [{
            "id": TASK,
            "title": "Pagar luz",
            "dueDate": "2024-03-10",
            "isCompleted": false,
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        }],
        "budgets": [
            {"id": "e0000000-0000-4000-8000-000000000001", "category": "General", "amount": 50, "currency": "DOP"}
        ]
    })
}

#[test]
fn test_balances_csv() {
    let fixture = Fixture::new(&scenario());
    fixture
        .cmd()
        .args(["balances", "--format", "csv"])
        .assert()
        .success()
        .stdout(contains(format!("{},Popular,,checking,DOP,50.00,0.00", ACC_A)))
        .stdout(contains(format!("{},Ahorro,,savings,DOP,20.00,0.00", ACC_B)));
}

#[test]
fn test_balances_json() {
    let fixture = Fixture::new(&scenario());
    let output = fixture
        .cmd()
        .args(["balances", "--format", "json", "--as-of", "2024-03-31"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["as_of"], "2024-03-31");
    assert_eq!(value["accounts"][0]["balanceDOP"], 50.0);
    assert_eq!(value["accounts"][1]["balanceDOP"], 20.0);
    assert_eq!(value["totals"]["balanceDOP"], 70.0);
    assert_eq!(value["totals"]["balanceUSD"], 0.0);
}

#[test]
fn test_balances_table() {
    let fixture = Fixture::new(&scenario());
    fixture
        .cmd()
        .arg("balances")
        .assert()
        .success()
        .stdout(contains("Popular"))
        .stdout(contains("RD$50.00"))
        .stdout(contains("RD$70.00"));
}

#[test]
fn test_missing_snapshot_is_empty() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("fintrack")
        .unwrap()
        .env("FINTRACK_DATA_DIR", dir.path())
        .arg("--snapshot")
        .arg(dir.path().join("missing.json"))
        .arg("balances")
        .assert()
        .success()
        .stdout(contains("No accounts found."));
}

#[test]
fn test_malformed_records_are_reported() {
    let mut document = scenario();
    document["transactions"]
        .as_array_mut()
        .unwrap()
        .push(json!({"id": "b0000000-0000-4000-8000-000000000099", "type": "refund"}));

    let fixture = Fixture::new(&document);
    fixture
        .cmd()
        .args(["balances", "--format", "csv"])
        .assert()
        .success()
        .stderr(contains("skipped 1 malformed record(s)"))
        .stdout(contains("50.00"));
}

#[test]
fn test_write_commands_keep_unreadable_records() {
    let mut document = scenario();
    document["schemaVersion"] = json!(3);
    document["accounts"][0]["userId"] = json!("u-42");
    let mut euro = transaction(9, "expense", 12.0, "2024-03-04");
    euro["currency"] = json!("EUR");
    document["transactions"].as_array_mut().unwrap().push(euro);

    let fixture = Fixture::new(&document);
    fixture
        .cmd()
        .args(["task", "complete", "Pagar luz"])
        .assert()
        .success()
        .stderr(contains("skipped 1 malformed record(s)"));

    let saved = fixture.saved();
    assert_eq!(saved["tasks"][0]["isCompleted"], true);
    assert_eq!(saved["schemaVersion"], 3);
    assert_eq!(saved["accounts"][0]["userId"], "u-42");
    let transactions = saved["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 4);
    assert!(transactions.iter().any(|t| t["currency"] == "EUR"));

    // Deleting an unrelated account leaves the unreadable record alone
    fixture
        .cmd()
        .args(["account", "delete", "Ahorro"])
        .assert()
        .success()
        .stdout(contains("Unreadable records removed").not());
    let saved = fixture.saved();
    assert!(saved["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["currency"] == "EUR"));

    // Deleting its own account removes it with the rest of the cascade
    fixture
        .cmd()
        .args(["account", "delete", "Popular"])
        .assert()
        .success()
        .stdout(contains("Unreadable records removed: 1"));
    assert_eq!(fixture.saved()["transactions"], json!([]));
}

#[test]
fn test_next_due() {
    let dir = TempDir::new().unwrap();
    let run = |args: &[&str]| {
        let mut cmd = Command::cargo_bin("fintrack").unwrap();
        cmd.env("FINTRACK_DATA_DIR", dir.path()).arg("next-due").args(args);
        cmd
    };

    run(&["2024-01-31", "monthly", "--as-of", "2024-04-01"])
        .assert()
        .success()
        .stdout("2024-04-30\n");
    run(&["2024-01-01", "monthly", "--as-of", "2024-03-15"])
        .assert()
        .success()
        .stdout("2024-04-01\n");
    run(&["2024-05-01", "weekly", "--as-of", "2024-05-01"])
        .assert()
        .success()
        .stdout("2024-05-01\n");
    run(&["2024-01-01", "fortnightly"])
        .assert()
        .failure()
        .stderr(contains("Invalid frequency"));
    run(&["2024-02-30", "monthly"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_upcoming() {
    let fixture = Fixture::new(&scenario());
    fixture
        .cmd()
        .args(["upcoming", "--as-of", "2024-04-01", "--days", "30"])
        .assert()
        .success()
        .stdout(contains("2024-04-30"))
        .stdout(contains("Alquiler"))
        .stdout(contains("in 29 days"));

    fixture
        .cmd()
        .args(["upcoming", "--as-of", "2024-04-01", "--days", "7"])
        .assert()
        .success()
        .stdout(contains("Nothing due"));
}

#[test]
fn test_budgets_and_spending() {
    let fixture = Fixture::new(&scenario());
    fixture
        .cmd()
        .args(["budgets", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("General"))
        .stdout(contains("RD$30.00 / RD$50.00"))
        .stdout(contains("OVER").not());

    fixture
        .cmd()
        .args(["spending", "--from", "2024-03-01", "--to", "2024-03-31", "--currency", "DOP"])
        .assert()
        .success()
        .stdout(contains("General"))
        .stdout(contains("RD$30.00"));
}

#[test]
fn test_account_delete_cascades() {
    let fixture = Fixture::new(&scenario());
    fixture
        .cmd()
        .args(["account", "delete", "ahorro"])
        .assert()
        .success()
        .stdout(contains("Deleted account: Ahorro"))
        .stdout(contains("Transactions removed: 1"))
        .stdout(contains("Recurring items removed: 1"));

    let saved = fixture.saved();
    assert_eq!(saved["accounts"].as_array().unwrap().len(), 1);
    assert_eq!(saved["transactions"].as_array().unwrap().len(), 2);
    assert!(saved["recurringTransactions"].as_array().unwrap().is_empty());

    // Without the transfer out, A keeps income minus expense
    fixture
        .cmd()
        .args(["balances", "--format", "csv"])
        .assert()
        .success()
        .stdout(contains("Popular,,checking,DOP,70.00,0.00"))
        .stdout(contains("Ahorro").not());

    fixture
        .cmd()
        .args(["account", "delete", "Ahorro"])
        .assert()
        .failure()
        .stderr(contains("Account not found"));
}

#[test]
fn test_task_complete_records_transaction() {
    let fixture = Fixture::new(&scenario());
    fixture
        .cmd()
        .args([
            "task", "complete", "pagar luz", "--type", "expense", "--amount", "15", "--account",
            "Popular", "--category", "Servicios",
        ])
        .assert()
        .success()
        .stdout(contains("Completed task"))
        .stdout(contains("Servicios"));

    let saved = fixture.saved();
    let task = &saved["tasks"][0];
    assert_eq!(task["isCompleted"], true);
    let txn_id = task["transactionId"].as_str().unwrap();

    let transactions = saved["transactions"].as_array().unwrap();
    let recorded = transactions.iter().find(|t| t["id"] == txn_id).unwrap();
    assert_eq!(recorded["amount"], 15.0);
    assert_eq!(recorded["currency"], "DOP");
    assert_eq!(recorded["description"], "Pagar luz");

    fixture
        .cmd()
        .args(["task", "complete", TASK])
        .assert()
        .failure()
        .stderr(contains("already completed"));
}

#[test]
fn test_task_complete_needs_full_entry() {
    let fixture = Fixture::new(&scenario());
    fixture
        .cmd()
        .args(["task", "complete", "Pagar luz", "--amount", "15"])
        .assert()
        .failure()
        .stderr(contains("--type, --amount, --account and --category"));

    assert_eq!(fixture.saved()["tasks"][0]["isCompleted"], false);
}

#[test]
fn test_init_and_config() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("fintrack");
    let mut init = Command::cargo_bin("fintrack").unwrap();
    init.env("FINTRACK_DATA_DIR", &config_dir)
        .env_remove("FINTRACK_SNAPSHOT")
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    assert!(config_dir.join("config.json").exists());
    let snapshot = read_json(&config_dir.join("data").join("snapshot.json"));
    assert_eq!(snapshot["accounts"], json!([]));

    let mut config = Command::cargo_bin("fintrack").unwrap();
    config
        .env("FINTRACK_DATA_DIR", &config_dir)
        .env_remove("FINTRACK_SNAPSHOT")
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Default currency: DOP"))
        .stdout(contains("Upcoming horizon: 30 days"));
}
