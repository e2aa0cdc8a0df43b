use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;

fn cli() -> Command {
    Command::cargo_bin("ballistics-cli").expect("ballistics-cli bin")
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf8 stdout")
}

#[test]
fn test_cli_trajectory_table() {
    cli()
        .args([
            "trajectory",
            "--velocity", "2600",
            "--bc", "0.495",
            "--weight", "175",
            "--zero-range", "200",
            "--max-range", "600",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Range"))
        .stdout(predicate::str::contains("bore angle"))
        .stdout(predicate::str::contains("NOT CONVERGED").not());
}

#[test]
fn test_cli_trajectory_json() {
    let stdout = stdout_of(cli().args([
        "trajectory",
        "--velocity", "2600",
        "--bc", "0.495",
        "--zero-range", "200",
        "--max-range", "500",
        "--output", "json",
    ]));

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["zero"]["converged"], true);
    assert_eq!(json["max_valid_range"], 500);

    let rows = json["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[2]["range"], 200);
    assert!(rows[2]["path"].as_f64().unwrap().abs() < 0.1);
    assert!(rows[5]["path"].as_f64().unwrap() < -20.0);
}

#[test]
fn test_cli_trajectory_csv() {
    let stdout = stdout_of(cli().args([
        "trajectory",
        "--velocity", "2600",
        "--bc", "0.495",
        "--max-range", "300",
        "--step", "50",
        "-o", "csv",
    ]));

    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("range,path,path_moa,windage,windage_moa,velocity,energy,time")
    );
    assert_eq!(lines.count(), 7);
}

#[test]
fn test_cli_zero_json() {
    let stdout = stdout_of(cli().args([
        "zero",
        "--velocity", "2600",
        "--bc", "0.495",
        "--zero-range", "200",
        "--output", "json",
    ]));

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let angle = json["angle_deg"].as_f64().unwrap();
    assert!(angle > 0.05 && angle < 0.2, "angle {angle}");
    assert_eq!(json["converged"], true);
    assert_eq!(json["drag_model"], "G1");
}

#[test]
fn test_cli_zero_reports_unreachable_target() {
    cli()
        .args([
            "zero",
            "--velocity", "2600",
            "--bc", "0.495",
            "--zero-range", "100",
            "--y-intercept", "10000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converged:   no"));
}

#[test]
fn test_cli_pbr() {
    cli()
        .args([
            "pbr",
            "--velocity", "2600",
            "--bc", "0.495",
            "--zero-range", "200",
            "--vital-zone", "4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Point blank:"));
}

#[test]
fn test_cli_load_file_with_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("load.toml");
    let mut file = File::create(&path).expect("load file");
    writeln!(
        file,
        r#"
drag_model = "G7"
velocity = 2700.0
weight = 175.0
zero_range = 300.0
max_range = 400

[[coefficients]]
bc = 0.243
"#
    )
    .unwrap();

    let stdout = stdout_of(cli().args([
        "trajectory",
        "--config", path.to_str().unwrap(),
        "--max-range", "200",
        "-o", "json",
    ]));
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["zero"]["drag_model"], "G7");
    assert_eq!(json["max_valid_range"], 200);
}

#[test]
fn test_cli_bc_segments() {
    cli()
        .args([
            "trajectory",
            "--velocity", "2900",
            "--bc-segment", "0.50:2000:3000",
            "--bc-segment", "0.45:1500:2800",
            "--bc-segment", "0.40:1000:2600",
            "--max-range", "800",
            "-o", "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("range,path"));
}

#[test]
fn test_cli_requires_velocity_or_config() {
    cli()
        .args(["trajectory", "--bc", "0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--velocity"));
}

#[test]
fn test_cli_rejects_missing_coefficients() {
    cli()
        .args(["trajectory", "--velocity", "2600"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NoCoefficients"));
}

#[test]
fn test_cli_rejects_huge_max_range() {
    cli()
        .args([
            "trajectory",
            "--velocity", "2600",
            "--bc", "0.495",
            "--max-range", "18446744073709551615",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum range"));
}

#[test]
fn test_cli_rejects_unknown_drag_model() {
    cli()
        .args(["zero", "--velocity", "2600", "--bc", "0.5", "--drag-model", "G9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("G9"));
}

#[test]
fn test_cli_info() {
    cli()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("G1"))
        .stdout(predicate::str::contains("G7"))
        .stdout(predicate::str::contains("boat-tail"));
}
