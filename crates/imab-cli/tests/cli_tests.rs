//! End-to-end tests of the `imab` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BONDS_CSV: &str = "\
index_name,bond_ticker,maturity,price,duration,convexity,rate,weight
IMA-B,NTNB_2026-08-15,2026-08-15,4300.0,252,1.2,0.065,0.3
IMA-B,NTNB_2030-08-15,2030-08-15,4200.0,1008,12.5,0.062,0.3
IMA-B,NTNB_2035-05-15,2035-05-15,4100.0,2016,40.1,0.061,0.2
IMA-B,NTNB_2050-08-15,2050-08-15,4000.0,4032,150.3,0.060,0.2
IMA-B 5+,NTNB_2035-05-15,2035-05-15,4100.0,2016,40.1,0.061,0.5
IMA-B 5+,NTNB_2050-08-15,2050-08-15,4000.0,4032,150.3,0.060,0.5
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bonds.csv"), BONDS_CSV).unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn bonds(&self) -> PathBuf {
        self.path("bonds.csv")
    }

    fn imab(&self) -> Command {
        let mut cmd = Command::cargo_bin("imab").unwrap();
        cmd.env("IMAB_CONFIG", self.path("config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_index_table() {
    let ws = Workspace::new();
    ws.imab()
        .args(["index", "--data", arg(&ws.bonds()), "--index", "imab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NTN-B 2035-05"))
        .stdout(predicate::str::contains("NTN-B 2026-08"))
        .stdout(predicate::str::contains("Summary"));
}

#[test]
fn test_index_json_only_lists_selected_index() {
    let ws = Workspace::new();
    let output = ws
        .imab()
        .args(["-f", "json", "index", "--data", arg(&ws.bonds()), "--index", "IMA-B 5+"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let bonds = value["bonds"].as_array().unwrap();
    assert_eq!(bonds.len(), 2);
    assert_eq!(bonds[0]["ticker"], "NTN-B 2035-05");
}

#[test]
fn test_optimize_with_investment() {
    let ws = Workspace::new();
    ws.imab()
        .args([
            "optimize",
            "--data",
            arg(&ws.bonds()),
            "--invest",
            "NTN-B 2035-05=1,000,000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("PL: $ 1,000,000.00"))
        .stdout(predicate::str::contains("Risk comparison"))
        .stdout(predicate::str::contains("New allocations"))
        .stdout(predicate::str::contains("NTN-B 2050-08"));
}

#[test]
fn test_optimize_without_investment_shows_weights_only() {
    let ws = Workspace::new();
    ws.imab()
        .args(["optimize", "--data", arg(&ws.bonds())])
        .assert()
        .success()
        .stdout(predicate::str::contains("New allocations"))
        .stdout(predicate::str::contains("Risk comparison").not());
}

#[test]
fn test_optimize_json_from_holdings_file() {
    let ws = Workspace::new();
    let holdings = ws.path("holdings.csv");
    std::fs::write(
        &holdings,
        "ticker,invested_value\nNTN-B 2026-08,\"500,000\"\nNTN-B 2050-08,500000\n",
    )
    .unwrap();

    let output = ws
        .imab()
        .args([
            "--format",
            "json",
            "optimize",
            "--data",
            arg(&ws.bonds()),
            "--portfolio",
            arg(&holdings),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["optimized_shares"].as_array().unwrap().len(), 4);
    assert!(value["result"]["dv01_by_ticker"].is_array());
}

#[test]
fn test_unknown_holding_fails() {
    let ws = Workspace::new();
    ws.imab()
        .args(["optimize", "--data", arg(&ws.bonds()), "--invest", "NTN-B 2099-01=10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NTN-B 2099-01"));
}

#[test]
fn test_unknown_index_fails() {
    let ws = Workspace::new();
    ws.imab()
        .args(["index", "--data", arg(&ws.bonds()), "--index", "imab7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("imab7"));
}

#[test]
fn test_missing_data_file_fails() {
    let ws = Workspace::new();
    ws.imab()
        .args(["index", "--data", arg(&ws.path("missing.csv"))])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_config_init_and_show() {
    let ws = Workspace::new();
    let target = ws.path("imab.toml");

    ws.imab()
        .args(["config", "init", arg(&target)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"));

    ws.imab()
        .args(["config", "init", arg(&target)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ws.imab()
        .args(["--config", arg(&target), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("optimizer.issue_type"))
        .stdout(predicate::str::contains("NTN-B"));
}
