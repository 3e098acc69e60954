use agent_bridge::{AskThenRunOptions, BridgeClient, TaskRunner};
use httpmock::prelude::*;

fn client(server: &MockServer) -> BridgeClient {
    BridgeClient::with_address("127.0.0.1", server.port()).unwrap()
}

#[tokio::test]
async fn test_ask_then_run_executes_first_python_file() {
    let server = MockServer::start();
    let task_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/copilot-task")
            .json_body_partial(r#"{"prompt": "write hello world", "auto_accept": true}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "ok": true,
                "llm_response": "Created hello.py",
                "files_changed": ["README.md", "hello.py", "other.py"],
                "diff_summary": "+12 -0",
                "elapsed_ms": 3100
            }));
    });
    let run_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/run-terminal")
            .json_body_partial(r#"{"command": "python \"hello.py\"", "capture_output": true}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true, "stdout": "Hello world!\n", "exit_code": 0}));
    });

    let client = client(&server);
    let runner = TaskRunner::new(&client);

    let report = runner
        .ask_then_run("write hello world", AskThenRunOptions::default())
        .await
        .unwrap();

    task_mock.assert();
    // README.md is skipped; only the first runnable file executes.
    run_mock.assert();
    assert_eq!(report.run_output, "Hello world!");
    assert_eq!(report.files_changed.len(), 3);
}

#[tokio::test]
async fn test_ask_then_run_dispatches_js_to_node() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/copilot-task");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "ok": true,
                "files_changed": ["app.js"]
            }));
    });
    let run_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/run-terminal")
            .json_body_partial(r#"{"command": "node \"app.js\""}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true, "stdout": "ready\n"}));
    });

    let client = client(&server);
    let report = TaskRunner::new(&client)
        .ask_then_run("make an app", AskThenRunOptions::default())
        .await
        .unwrap();

    run_mock.assert();
    assert_eq!(report.run_output, "ready");
}

#[tokio::test]
async fn test_ask_then_run_skips_execution_when_disabled() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/copilot-task");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "ok": true,
                "files_changed": ["hello.py"]
            }));
    });
    let run_mock = server.mock(|when, then| {
        when.method(POST).path("/run-terminal");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true}));
    });

    let client = client(&server);
    let report = TaskRunner::new(&client)
        .ask_then_run(
            "write hello world",
            AskThenRunOptions {
                run_result: false,
                slack_report: false,
            },
        )
        .await
        .unwrap();

    run_mock.assert_hits(0);
    assert_eq!(report.run_output, "");
}

#[tokio::test]
async fn test_ask_then_run_ignores_non_runnable_files() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/copilot-task");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "ok": true,
                "files_changed": ["notes.md", "config.toml"]
            }));
    });
    let run_mock = server.mock(|when, then| {
        when.method(POST).path("/run-terminal");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true}));
    });

    let client = client(&server);
    let report = TaskRunner::new(&client)
        .ask_then_run("update docs", AskThenRunOptions::default())
        .await
        .unwrap();

    run_mock.assert_hits(0);
    assert_eq!(report.run_output, "");
}

#[tokio::test]
async fn test_ask_then_run_posts_slack_summary() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/copilot-task");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "ok": true,
                "files_changed": ["hello.py"]
            }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/run-terminal");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true, "stdout": "Hello world!\n"}));
    });
    let slack_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/slack-post")
            .body_contains("Task complete.")
            .body_contains("hello.py")
            .body_contains("Hello world!");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true}));
    });

    let client = client(&server);
    TaskRunner::new(&client)
        .ask_then_run(
            "write hello world",
            AskThenRunOptions {
                run_result: true,
                slack_report: true,
            },
        )
        .await
        .unwrap();

    slack_mock.assert();
}
