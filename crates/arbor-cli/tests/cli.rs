//! End-to-end tests for the `arbor` binary.

use assert_cmd::Command;
use predicates::prelude::*;

const VANILLA_FLAGS: &[&str] = &[
    "--coupon",
    "0.045",
    "--maturity",
    "24",
    "--r0",
    "0.05",
    "--up",
    "1.05",
    "--down",
    "0.95",
    "--up-prob",
    "0.55",
    "--down-prob",
    "0.45",
];

fn arbor() -> Command {
    Command::cargo_bin("arbor").unwrap()
}

#[test]
fn test_price_table_from_flags() {
    arbor()
        .arg("price")
        .args(VANILLA_FLAGS)
        .assert()
        .success()
        .stdout(predicate::str::contains("$98.99"))
        .stdout(predicate::str::contains("Straight Price").not());
}

#[test]
fn test_price_minimal() {
    arbor()
        .args(["price", "--format", "minimal"])
        .args(VANILLA_FLAGS)
        .assert()
        .success()
        .stdout("98.991904\n");
}

#[test]
fn test_price_callable_scenario_json() {
    let output = arbor()
        .args(["price", "--scenario", "CALLABLE.2Y", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let price = report["price"].as_f64().unwrap();
    let straight = report["straight_price"].as_f64().unwrap();
    let option_value = report["option_value"].as_f64().unwrap();

    assert!((price - 102.13007830704998).abs() < 1e-9);
    assert!((straight - 102.54261853104225).abs() < 1e-9);
    assert!((option_value - (straight - price)).abs() < 1e-12);
    assert_eq!(report["periods"], 4);
    assert_eq!(report["node_count"], 31);
}

#[test]
fn test_price_with_put_override() {
    arbor()
        .args(["price", "--scenario", "VANILLA.2Y", "--put", "102", "-f", "minimal"])
        .assert()
        .success()
        .stdout("102.000000\n");
}

#[test]
fn test_call_and_put_conflict() {
    arbor()
        .args(["price", "--scenario", "VANILLA.2Y", "--call", "101", "--put", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_flag_reported() {
    arbor()
        .args(["price", "--maturity", "24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required argument: --coupon"));
}

#[test]
fn test_uneven_maturity_rejected() {
    arbor()
        .arg("price")
        .args(VANILLA_FLAGS)
        .args(["--frequency", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bond.maturity_months"));
}

#[test]
fn test_too_many_periods_rejected() {
    arbor()
        .args([
            "price", "--coupon", "0.05", "--maturity", "126", "--r0", "0.05", "--up", "1.1",
            "--down", "0.9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 20"));
}

#[test]
fn test_price_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puttable.toml");
    std::fs::write(
        &path,
        r#"
name = "PUTTABLE"

[bond]
coupon_rate = 0.045
maturity_months = 24

[bond.option]
has_option = true
is_call = false
strike = 99.0

[lattice]
r0 = 0.05
up = 1.05
down = 0.95
up_prob = 0.55
down_prob = 0.45
"#,
    )
    .unwrap();

    arbor()
        .args(["price", "-f", "minimal", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("99.168668\n");
}

#[test]
fn test_tree_minimal_with_values() {
    arbor()
        .args(["tree", "--scenario", "VANILLA.2Y", "--values", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.0500 | 98.9919\n"));
}

#[test]
fn test_tree_table() {
    arbor()
        .args(["tree", "--scenario", "VANILLA.2Y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 periods, 31 nodes"))
        .stdout(predicate::str::contains("0.0525 0.0475"));
}

#[test]
fn test_schedule_csv() {
    arbor()
        .args(["schedule", "--scenario", "VANILLA.2Y", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("level,month,coupon,principal,total\n0,0,0.0,0.0,0.0\n"))
        .stdout(predicate::str::contains("4,24,2.25,100.0,102.25"));
}

#[test]
fn test_schedule_too_many_periods_rejected() {
    arbor()
        .args([
            "schedule", "--coupon", "0.05", "--maturity", "126", "--r0", "0.05", "--up", "1.1",
            "--down", "0.9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 20"));
}

#[test]
fn test_schedule_huge_frequency() {
    arbor()
        .args([
            "schedule", "-f", "csv", "--coupon", "0.05", "--frequency", "3000000000",
            "--maturity", "3000000000", "--r0", "0.05", "--up", "1.1", "--down", "0.9",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,3000000000,"));
}

#[test]
fn test_scenarios_minimal() {
    arbor()
        .args(["scenarios", "--format", "minimal"])
        .assert()
        .success()
        .stdout("CALLABLE.2Y\nVANILLA.2Y\n");
}

#[test]
fn test_scenarios_show_round_trips_through_file() {
    let output = arbor()
        .args(["scenarios", "--show", "CALLABLE.2Y"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("callable.toml");
    std::fs::write(&path, &output.stdout).unwrap();

    arbor()
        .args(["price", "-f", "minimal", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("102.130078\n");
}

#[test]
fn test_unknown_scenario() {
    arbor()
        .args(["price", "--scenario", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scenario not found: NOPE"));
}
