use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/commands.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""row":1,"ok":true"#))
        .stdout(predicate::str::contains(r#""transaction_id":"123456789""#))
        .stdout(predicate::str::contains(r#""amount":"10.00""#))
        // Zero amount is refused before the terminal sees it
        .stdout(predicate::str::contains(
            r#"{"row":2,"ok":false,"error":"Validation error: Amount must be positive"}"#,
        ))
        .stdout(predicate::str::contains("Refund processed successfully"))
        .stdout(predicate::str::contains("Transaction voided successfully"));

    Ok(())
}

#[test]
fn test_cli_uses_config_file_and_overrides() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"{{"device_ip": "10.1.1.5", "port": 10009, "connection_type": "usb"}}"#
    )
    .unwrap();
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "type, amount").unwrap();
    writeln!(csv, "payment, 1.25").unwrap();

    let mut cmd = Command::new(cargo_bin!("moneris-dx8000"));
    cmd.arg(csv.path())
        .arg("--config")
        .arg(config.path())
        .arg("--connection-type")
        .arg("bluetooth")
        .env("RUST_LOG", "info");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""amount":"1.25""#))
        .stderr(predicate::str::contains("10.1.1.5"))
        .stderr(predicate::str::contains("bluetooth"));
}

#[test]
fn test_cli_rejects_unknown_connection_type() {
    let mut cmd = Command::new(cargo_bin!("moneris-dx8000"));
    cmd.arg("tests/fixtures/commands.csv")
        .arg("--connection-type")
        .arg("serial");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown connection type"));
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("moneris-dx8000"));
    cmd.arg("tests/fixtures/does-not-exist.csv");

    cmd.assert().failure();
}
