//! Tests that run the built binary.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use std::process::{Command, Output};

fn registrar_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_registrar"));
    // Keep the user's config file out of the way.
    let home = std::env::temp_dir().join("registrar-cli-tests");
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", &home)
        .env_remove("RUST_LOG");
    cmd
}

/// Run `registrar --base-url <backend> <args>` off the async runtime so the
/// mock backend keeps serving.
async fn run_against(backend: &MockBackend, args: &[&str]) -> Output {
    let mut cmd = registrar_cmd();
    cmd.arg("--base-url").arg(backend.base_url()).args(args);
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute command"))
        .await
        .expect("command task panicked")
}

#[test]
fn test_help_lists_subcommands_and_overrides() {
    let output = registrar_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for needle in ["tui", "list", "entities", "--base-url", "--page-size", "--entity"] {
        assert!(stdout.contains(needle), "help is missing {needle}: {stdout}");
    }
}

#[test]
fn test_entities_prints_registry() {
    let output = registrar_cmd()
        .arg("entities")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("students (Students)"));
    assert!(stdout.contains("courses (Courses)"));
    assert!(stdout.contains("options: Fall | Spring | Summer"));
    assert!(stdout.contains("read-only"));
}

#[test]
fn test_entities_json_is_valid() {
    let output = registrar_cmd()
        .args(["entities", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("entities --json must print JSON");
    let entities = parsed.as_array().unwrap();
    assert_eq!(entities.len(), 4);
    assert_eq!(entities[3]["name"], "employees");
}

#[test]
fn test_unknown_entity_exits_with_error() {
    let output = registrar_cmd()
        .args(["list", "--entity", "departments"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("departments"), "stderr: {stderr}");
}

#[test]
fn test_invalid_page_size_exits_with_error() {
    let output = registrar_cmd()
        .args(["list", "--page-size", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page_size"), "stderr: {stderr}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_prints_requested_page() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::page(
            r#"[{"id": 14, "courseCode": "CS340", "courseName": "Compilers", "credits": 6},
                {"id": 9, "courseCode": "MA210", "courseName": "Topology", "credits": 5}]"#,
            23,
        ))
        .await;

    let output = run_against(
        &backend,
        &[
            "list", "--entity", "courses", "--page", "2", "--sort", "credits", "--order", "desc",
        ],
    )
    .await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    let request = backend.only_request().await;
    assert_eq!(request.path, "/courses");
    assert_eq!(
        request.query_pairs(),
        vec![
            ("_page".to_string(), "2".to_string()),
            ("_limit".to_string(), "10".to_string()),
            ("_sort".to_string(), "credits".to_string()),
            ("_order".to_string(), "desc".to_string()),
        ]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].contains("Credits ▼"), "stdout: {stdout}");
    assert!(!lines[0].contains("Actions"));
    assert!(lines[1].starts_with("14"), "stdout: {stdout}");
    assert!(lines[1].contains("Compilers"));
    assert_eq!(lines.last(), Some(&"Page 2 of 3 (23 total)"));
    assert!(!stderr.contains("total count"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_sends_search_and_warns_without_total() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"[{"id": 1, "firstName": "Ada"}]"#))
        .await;

    let output = run_against(&backend, &["list", "--search", "ada"]).await;

    assert!(output.status.success());
    let request = backend.only_request().await;
    assert_eq!(request.path, "/students");
    assert!(request
        .query_pairs()
        .contains(&("q".to_string(), "ada".to_string())));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.ends_with("Page 1 of 1 (1 total)\n"), "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Server did not report a total count"),
        "stderr: {stderr}"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_rejects_unsortable_field() {
    let backend = MockBackend::start().await;

    let output = run_against(
        &backend,
        &["list", "--entity", "courses", "--sort", "description"],
    )
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("'description' is not a sortable courses field"),
        "stderr: {stderr}"
    );
    assert!(backend.captured_requests().await.is_empty());
}
