//! End-to-end tests of the `taskdef` binary.
//!
//! Covers:
//! 1. `update` with directives for every update kind
//! 2. No-op pass-through when no directives are given
//! 3. Failure surface: stderr message, non-zero exit, empty stdout
//! 4. `get` field extraction from a file and from stdin

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

fn task_definition() -> Value {
    json!({
        "taskDefinition": {
            "family": "web-app",
            "requiresCompatibilities": ["FARGATE"],
            "containerDefinitions": [
                {
                    "name": "web",
                    "image": "app:1",
                    "essential": true
                },
                {
                    "name": "proxy",
                    "image": "envoy:1.29",
                    "environment": [{"name": "ENVOY_LOG", "value": "info"}]
                }
            ]
        },
        "tags": [{"key": "env", "value": "prod"}]
    })
}

fn taskdef() -> Command {
    let mut cmd = Command::cargo_bin("taskdef").expect("binary should build");
    for var in [
        "TASKDEF_TASK_DEFINITION",
        "TASKDEF_IMAGE_UPDATES",
        "TASKDEF_ENV_UPDATES",
        "TASKDEF_DOCKER_LABEL_UPDATES",
        "TASKDEF_SECRET_UPDATES",
        "RUST_LOG",
    ] {
        let _ = cmd.env_remove(var);
    }
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ── update ───────────────────────────────────────────────────────────

#[test]
fn update_applies_tag_and_environment() {
    let output = taskdef()
        .args([
            "update",
            "--task-definition",
            &task_definition().to_string(),
            "--image-updates",
            "container=web,tag=2",
            "--env-updates",
            "container=web,name=LOG_LEVEL,value=debug",
        ])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let containers = stdout_json(&output);
    assert_eq!(containers[0]["image"], "app:2");
    assert_eq!(
        containers[0]["environment"],
        json!([{"name": "LOG_LEVEL", "value": "debug"}])
    );
    assert_eq!(containers[0]["essential"], true);
    assert_eq!(containers[1], task_definition()["taskDefinition"]["containerDefinitions"][1]);
}

#[test]
fn update_applies_labels_and_secrets() {
    let output = taskdef()
        .args([
            "update",
            "--task-definition",
            &task_definition().to_string(),
            "--docker-label-updates",
            "container=proxy,team=edge",
            "--secret-updates",
            "container=proxy,name=TLS_KEY,valueFrom=arn:aws:secretsmanager:eu-west-1:1:secret:tls",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());

    let containers = stdout_json(&output);
    assert_eq!(containers[1]["dockerLabels"], json!({"team": "edge"}));
    assert_eq!(
        containers[1]["secrets"],
        json!([{
            "name": "TLS_KEY",
            "valueFrom": "arn:aws:secretsmanager:eu-west-1:1:secret:tls"
        }])
    );
}

#[test]
fn update_without_directives_passes_through() {
    let output = taskdef()
        .args(["update", "--task-definition", &task_definition().to_string()])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        task_definition()["taskDefinition"]["containerDefinitions"]
    );
}

#[test]
fn update_reads_directives_from_environment() {
    let output = taskdef()
        .env("TASKDEF_IMAGE_UPDATES", "container=proxy,image=registry.local:5000/envoy")
        .args(["update", "--task-definition", &task_definition().to_string()])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)[1]["image"],
        "registry.local:5000/envoy:1.29"
    );
}

#[test]
fn update_reads_task_definition_from_stdin() {
    let output = taskdef()
        .args(["update", "--image-updates", "container=web,image-and-tag=redis:latest"])
        .write_stdin(task_definition().to_string())
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)[0]["image"], "redis:latest");
}

#[test]
fn update_unknown_container_fails() {
    taskdef()
        .args([
            "update",
            "--task-definition",
            &task_definition().to_string(),
            "--env-updates",
            "container=ghost,name=A,value=1",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn update_malformed_directive_echoes_it() {
    taskdef()
        .args([
            "update",
            "--task-definition",
            &task_definition().to_string(),
            "--env-updates",
            "container=web,name=FOO",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("container=web,name=FOO"));
}

#[test]
fn update_malformed_task_definition_fails() {
    taskdef()
        .args(["update", "--task-definition", r#"{"family": "x"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no valid task definition"));
}

#[test]
fn update_pretty_output_is_multiline() {
    let output = taskdef()
        .args([
            "update",
            "--pretty",
            "--task-definition",
            &task_definition().to_string(),
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).lines().count() > 1);
}

// ── get ──────────────────────────────────────────────────────────────

#[test]
fn get_reads_field_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("td.json");
    std::fs::write(&path, task_definition().to_string()).expect("write");

    taskdef()
        .args(["get", "requiresCompatibilities", "--task-definition-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("FARGATE\n");
}

#[test]
fn get_tags_from_stdin() {
    taskdef()
        .args(["get", "tags"])
        .write_stdin(task_definition().to_string())
        .assert()
        .success()
        .stdout("[{\"key\":\"env\",\"value\":\"prod\"}]\n");
}

#[test]
fn get_missing_array_field_defaults() {
    taskdef()
        .args(["get", "volumes", "--task-definition", &task_definition().to_string()])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn get_missing_file_fails() {
    taskdef()
        .args(["get", "family", "--task-definition-file", "/nonexistent/td.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
