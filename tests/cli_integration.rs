//! CLI integration tests
//!
//! These run the compiled binary the way a GitHub runner would: inputs in
//! `INPUT_*` variables, outputs through `GITHUB_OUTPUT`, workflow commands on
//! stdout and the exit code as the step result.

mod support;

use mockito::{Matcher, Server};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use support::Workspace;

fn ketryx_report_bin() -> &'static str {
    env!("CARGO_BIN_EXE_ketryx-report")
}

/// Runs the binary with a clean environment plus the given variables
fn run_step(workspace: &Path, output_file: &Path, vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(ketryx_report_bin());
    command
        .env_clear()
        .env("GITHUB_OUTPUT", output_file)
        .arg("--working-directory")
        .arg(workspace)
        .arg("--timeout")
        .arg("10");
    for (name, value) in vars {
        command.env(name, value);
    }
    command.output().expect("Failed to execute ketryx-report")
}

#[test]
fn test_cli_help() {
    let output = Command::new(ketryx_report_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute ketryx-report");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ketryx-report"));
    assert!(stdout.contains("--working-directory"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(ketryx_report_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute ketryx-report");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_mismatched_credentials_exit_with_failure() {
    let workspace = Workspace::new();
    let output_file = workspace.write("github_output", "");

    let output = run_step(
        workspace.path(),
        &output_file,
        &[("INPUT_API-KEY", "KXK1,KXK2"), ("INPUT_PROJECT", "KXPRJ1")],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("::error::The number of api-keys must match the number of projects"));
    assert!(fs::read_to_string(&output_file).unwrap().is_empty());
}

#[test]
fn test_full_run_reports_build() {
    let mut server = Server::new();
    let upload = server
        .mock("POST", "/api/v1/build-artifacts")
        .match_query(Matcher::UrlEncoded("project".into(), "KXPRJ1".into()))
        .match_header("authorization", "Bearer KXK1")
        .with_status(200)
        .with_body(r#"{"id":"file-1"}"#)
        .expect(3)
        .create();
    let build = server
        .mock("POST", "/api/v1/builds")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "project": "KXPRJ1",
            "commitSha": "abc123",
            "artifacts": [
                {"id": "file-1", "type": "artifact"},
                {"id": "file-1", "type": "junit-xml"},
                {"id": "file-1", "type": "spdx-json"}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"ok":true,"buildId":"build-7"}"#)
        .create();

    let workspace = Workspace::new();
    workspace.write("dist/app.tar.gz", "binary");
    workspace.write("reports/unit.xml", "<testsuite/>");
    workspace.write("sbom.spdx.json", "{}");
    let output_file = workspace.write("github_output", "");

    let url = server.url();
    let output = run_step(
        workspace.path(),
        &output_file,
        &[
            ("INPUT_API-KEY", "KXK1"),
            ("INPUT_PROJECT", "KXPRJ1"),
            ("INPUT_API-URL", url.as_str()),
            ("INPUT_ARTIFACT-PATH", "dist/*.tar.gz"),
            ("INPUT_TEST-JUNIT-PATH", "reports/*.xml"),
            ("INPUT_SPDX-JSON-PATH", "*.spdx.json"),
            ("GITHUB_SHA", "abc123"),
        ],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout);
    assert!(stdout.contains("Reported build to Ketryx: build-7"));

    let outputs = fs::read_to_string(&output_file).unwrap();
    assert!(outputs.contains("ok<<ghadelimiter_"));
    assert!(outputs.contains("\ntrue\n"));
    assert!(outputs.contains("build-id<<ghadelimiter_"));
    assert!(outputs.contains("\nbuild-7\n"));

    upload.assert();
    build.assert();
}

#[test]
fn test_rejected_build_exits_with_failure() {
    let mut server = Server::new();
    let _build = server
        .mock("POST", "/api/v1/builds")
        .with_status(400)
        .with_body(r#"{"ok":false,"error":"Unknown project"}"#)
        .create();

    let workspace = Workspace::new();
    let output_file = workspace.write("github_output", "");

    let url = server.url();
    let output = run_step(
        workspace.path(),
        &output_file,
        &[
            ("INPUT_API-KEY", "KXK1"),
            ("INPUT_PROJECT", "KXPRJ1"),
            ("INPUT_API-URL", url.as_str()),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("::error::Failure reporting build to Ketryx: Unknown project"));

    let outputs = fs::read_to_string(&output_file).unwrap();
    assert!(outputs.contains("\nfalse\n"));
    assert!(outputs.contains("\nUnknown project\n"));
}
