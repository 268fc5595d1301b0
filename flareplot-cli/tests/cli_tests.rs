use serde_json::Value;
use std::fs;
use std::process::Command;

const FINGERPRINT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../tests/data/fingerprint.csv");

fn flareplot() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_flareplot"));
    command.env("RUST_LOG", "warn");
    command
}

#[test]
fn test_writes_fragment() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested/out/plot.html");

    let status = flareplot()
        .arg(FINGERPRINT)
        .arg(&output)
        .args(["--width", "640", "--height", "480"])
        .status()
        .unwrap();
    assert!(status.success());

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("width: 640px; height: 480px;"));
    assert!(html.contains(r#""name1":"LIG101","name2":"A50","width":0.6"#));
    assert!(!html.contains("<!DOCTYPE html>"));
}

#[test]
fn test_writes_json_and_page() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("plot.html");
    let json = dir.path().join("json/plot.json");

    let status = flareplot()
        .arg(FINGERPRINT)
        .arg(&output)
        .args(["--threshold", "0.25", "--dedupe-nodes", "--page", "--json"])
        .arg(&json)
        .status()
        .unwrap();
    assert!(status.success());

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("require.min.js"));

    let document: Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    let edges = document["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[2]["name2"], "K60");
    assert_eq!(edges[2]["color"], "#9c86fa");

    // LIG101 appears on every edge but is listed once
    let nodes = document["tracks"][0]["trackProperties"].as_array().unwrap();
    assert_eq!(nodes.len(), 4);
    let paths = document["trees"][0]["treeProperties"].as_array().unwrap();
    assert_eq!(paths[0]["path"], "A.LIG101");
}

#[test]
fn test_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("plot.html");

    let status = flareplot()
        .arg(FINGERPRINT)
        .arg(&output)
        .args(["--threshold", "1.5"])
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!output.exists());

    let status = flareplot()
        .arg(dir.path().join("missing.csv"))
        .arg(&output)
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!output.exists());
}
