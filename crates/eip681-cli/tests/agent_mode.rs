use std::io::Write;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::{NamedTempFile, TempDir};

const TO: &str = "0x7772fb5804c9C60B76C56aBEEb79f2F6d54519C4";
const LINK: &str = "0x514910771AF9Ca656af840dff83E8264EcF986CA";
const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn run_agent(args: &[&str]) -> Output {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("eip681"));
    cmd.arg("--output")
        .arg("json")
        .args(args)
        .env_remove("EIP681_CHAIN_ID")
        .env_remove("RUST_LOG");
    cmd.output().expect("failed to run eip681")
}

fn parse_stdout(output: &Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8");
    serde_json::from_str(stdout.trim()).expect("stdout should contain a JSON envelope")
}

#[test]
fn uri_command_prints_canonical_token_request() {
    let output = run_agent(&["uri", "--erc20", LINK, "--to", TO, "--value", "0.1"]);
    assert_eq!(output.status.code(), Some(0));

    let payload = parse_stdout(&output);
    assert_eq!(payload["success"], true);
    assert_eq!(payload["operation"], "uri");
    assert_eq!(
        payload["result"]["uri"],
        format!("ethereum:{LINK}@1/transfer?address={TO}&uint256=100000000000000000")
    );
    assert_eq!(payload["result"]["chainId"], 1);
}

#[test]
fn chain_id_can_come_from_environment() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("eip681"));
    let output = cmd
        .args(["--output", "json", "uri", "--to", TO, "--value", "1"])
        .env("EIP681_CHAIN_ID", "11155111")
        .output()
        .expect("failed to run eip681");
    assert_eq!(output.status.code(), Some(0));

    let payload = parse_stdout(&output);
    assert_eq!(
        payload["result"]["uri"],
        format!("ethereum:{TO}@11155111?value=1000000000000000000")
    );
}

#[test]
fn invalid_amount_exits_with_validation_error() {
    let output = run_agent(&["qr", "--to", TO, "--value", "some ether"]);
    assert_eq!(output.status.code(), Some(1));

    let payload = parse_stdout(&output);
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"]["code"], 1002);
    assert_eq!(payload["error"]["details"]["field"], "amount");
    assert_eq!(payload["error"]["details"]["value"], "some ether");
}

#[test]
fn invalid_recipient_exits_with_validation_error() {
    let output = run_agent(&[
        "uri",
        "--to",
        "0xADDRESS7772fb5804c9C60B76C56aBEEb79f2F6d54519C4",
        "--value",
        "0.1",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let payload = parse_stdout(&output);
    assert_eq!(payload["error"]["name"], "INVALID_ADDRESS");
    assert_eq!(payload["error"]["details"]["field"], "to");
}

#[test]
fn qr_command_writes_png_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let png_path = dir.path().join("request.png");
    let output = run_agent(&[
        "qr",
        "--to",
        TO,
        "--value",
        "0.1",
        "--out",
        png_path.to_str().expect("temp path should be UTF-8"),
    ]);
    assert_eq!(output.status.code(), Some(0));

    let payload = parse_stdout(&output);
    assert_eq!(payload["result"]["file"], &*png_path.to_string_lossy());
    let png = std::fs::read(&png_path).expect("png should be written");
    assert!(png.starts_with(&PNG_SIGNATURE));
}

#[test]
fn qr_command_prints_data_uri_without_out() {
    let output = run_agent(&["qr", "--to", TO, "--value", "0.1"]);
    assert_eq!(output.status.code(), Some(0));

    let payload = parse_stdout(&output);
    let data_uri = payload["result"]["dataUri"]
        .as_str()
        .expect("dataUri should be a string");
    assert!(data_uri.starts_with("data:image/png;base64,"));
}

#[test]
fn intent_file_drives_the_request() {
    let mut file = NamedTempFile::new().expect("failed to create temp intent");
    write!(
        file,
        r#"{{"kind":"native_transfer_on_network","to":"{TO}","amount":"2","chainId":-1}}"#
    )
    .expect("failed to write intent");
    file.flush().expect("failed to flush intent");

    let output = run_agent(&["uri", "--input", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let payload = parse_stdout(&output);
    assert_eq!(payload["error"]["code"], 1003);
    assert_eq!(payload["error"]["details"]["field"], "chainId");
    assert_eq!(payload["error"]["details"]["value"], "-1");
}

fn intent_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp intent");
    file.write_all(json.as_bytes()).expect("failed to write intent");
    file.flush().expect("failed to flush intent");
    file
}

#[test]
fn intent_file_with_field_outside_its_kind_is_rejected() {
    let file = intent_file(&format!(
        r#"{{"kind":"native_transfer","to":"{TO}","amount":"1","chainId":11155111}}"#
    ));

    let output = run_agent(&["uri", "--input", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));

    let payload = parse_stdout(&output);
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"]["code"], 2005);
    assert!(payload["error"]["message"]
        .as_str()
        .unwrap()
        .contains("chainId"));
}

#[test]
fn intent_file_cannot_take_chain_id_from_flags_or_environment() {
    let file = intent_file(&format!(
        r#"{{"kind":"native_transfer","to":"{TO}","amount":"1"}}"#
    ));
    let path = file.path().to_str().unwrap();

    let flagged = run_agent(&["uri", "--input", path, "--chain-id", "11155111"]);
    assert_eq!(flagged.status.code(), Some(2));
    assert_eq!(parse_stdout(&flagged)["error"]["code"], 2001);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("eip681"));
    let from_env = cmd
        .args(["--output", "json", "uri", "--input", path])
        .env("EIP681_CHAIN_ID", "11155111")
        .output()
        .expect("failed to run eip681");
    assert_eq!(from_env.status.code(), Some(2));
    assert_eq!(parse_stdout(&from_env)["error"]["code"], 2001);
}

#[test]
fn missing_subcommand_reports_json_usage_error() {
    let output = run_agent(&[]);
    assert_eq!(output.status.code(), Some(2));

    let payload = parse_stdout(&output);
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"]["code"], 2001);
}
